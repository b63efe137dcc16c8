use ss_api_types::BadgeInfo;
use ss_badge_source::CatalogSource;
use std::rc::Rc;
use tracing::warn;

use crate::LOAD_FAILED_MESSAGE;
use crate::components::BadgeModal;
use crate::state::{LifecycleGuard, ViewState};

pub const ALL_CATEGORIES: &str = "All";

/// Community badge gallery with search and a category filter.
pub struct GalleryController {
    catalog: Rc<dyn CatalogSource>,
    lifecycle: LifecycleGuard,
    state: ViewState<Vec<BadgeInfo>>,
    search: String,
    category: String,
    pub modal: BadgeModal,
}

impl GalleryController {
    pub fn new(catalog: Rc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            lifecycle: LifecycleGuard::default(),
            state: ViewState::NotMounted,
            search: String::new(),
            category: ALL_CATEGORIES.to_owned(),
            modal: BadgeModal::default(),
        }
    }

    pub fn mount(&mut self) {
        self.lifecycle.mark_ready();
        self.state = ViewState::Loading;
    }

    pub async fn load(&mut self) {
        if !self.lifecycle.is_ready() {
            return;
        }
        self.state = ViewState::Loading;
        self.state = match self.catalog.gallery_badges().await {
            Ok(badges) => ViewState::from_items(badges),
            Err(err) => {
                warn!("gallery load failed: {err}");
                ViewState::Error(LOAD_FAILED_MESSAGE.to_owned())
            }
        };
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn state(&self) -> &ViewState<Vec<BadgeInfo>> {
        &self.state
    }

    /// `All` followed by each non-empty category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_owned()];
        for badge in self.state.items() {
            if !badge.category.is_empty() && !categories.contains(&badge.category) {
                categories.push(badge.category.clone());
            }
        }
        categories
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_owned();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_owned();
    }

    fn matches(&self, badge: &BadgeInfo) -> bool {
        let term = self.search.to_lowercase();
        let matches_search =
            badge.name.to_lowercase().contains(&term) || badge.description.to_lowercase().contains(&term);
        let matches_category = self.category == ALL_CATEGORIES || badge.category == self.category;
        matches_search && matches_category
    }

    /// Loaded badges after search and filter. A filter that matches
    /// nothing yields `Empty`.
    pub fn visible(&self) -> ViewState<Vec<&BadgeInfo>> {
        match &self.state {
            ViewState::Populated(badges) => {
                ViewState::from_items(badges.iter().filter(|badge| self.matches(badge)).collect())
            }
            ViewState::NotMounted => ViewState::NotMounted,
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(message) => ViewState::Error(message.clone()),
            ViewState::Empty => ViewState::Empty,
        }
    }

    pub fn select_badge(&mut self, id: &str) -> bool {
        match self.state.items().iter().find(|badge| badge.id == id) {
            Some(badge) => {
                self.modal.open(badge.clone());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCatalog, badge};

    fn ids(state: &ViewState<Vec<&BadgeInfo>>) -> Vec<String> {
        state.items().iter().map(|badge| badge.id.clone()).collect()
    }

    async fn loaded(catalog: FakeCatalog) -> GalleryController {
        let mut gallery = GalleryController::new(Rc::new(catalog));
        gallery.mount();
        gallery.load().await;
        gallery
    }

    #[tokio::test]
    async fn categories_keep_first_seen_order_without_blanks() {
        let gallery = loaded(FakeCatalog {
            gallery: Some(vec![
                badge("1", "A", "Finance"),
                badge("2", "B", ""),
                badge("3", "C", "Art"),
                badge("4", "D", "Finance"),
            ]),
            ..FakeCatalog::default()
        })
        .await;
        assert_eq!(gallery.categories(), ["All", "Finance", "Art"]);
    }

    #[tokio::test]
    async fn sample_catalog_categories() {
        let gallery = loaded(FakeCatalog::default()).await;
        assert_eq!(
            gallery.categories(),
            ["All", "Development", "Security", "Finance", "Art", "Governance", "Architecture"]
        );
        assert_eq!(gallery.visible().items().len(), 8);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_name_and_description() {
        let mut gallery = loaded(FakeCatalog::default()).await;

        gallery.set_search("SMART CONTRACT");
        assert_eq!(ids(&gallery.visible()), ["1", "2", "7"]);

        gallery.set_search("defi");
        assert_eq!(ids(&gallery.visible()), ["3"]);
    }

    #[tokio::test]
    async fn category_and_search_combine() {
        let mut gallery = loaded(FakeCatalog::default()).await;
        gallery.set_category("Finance");
        assert_eq!(ids(&gallery.visible()), ["3", "8"]);

        gallery.set_search("token");
        assert_eq!(ids(&gallery.visible()), ["8"]);

        gallery.set_search("nothing like this");
        assert_eq!(gallery.visible(), ViewState::Empty);
    }

    #[tokio::test]
    async fn catalog_failure_is_an_error_with_retry() {
        let catalog = Rc::new(FakeCatalog::default());
        catalog.failing.set(true);
        let mut gallery = GalleryController::new(catalog.clone());
        gallery.mount();
        gallery.load().await;
        assert_eq!(*gallery.state(), ViewState::Error(LOAD_FAILED_MESSAGE.to_owned()));
        assert_eq!(gallery.categories(), ["All"]);

        catalog.failing.set(false);
        gallery.retry().await;
        assert!(gallery.select_badge("5"));
        assert_eq!(gallery.modal.badge().map(|b| b.name.as_str()), Some("DAO Governor"));
    }
}
