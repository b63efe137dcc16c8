use ss_api_types::{BadgeInfo, Profile, WalletAddress};
use ss_badge_source::{BadgeSource, CatalogSource};
use std::rc::Rc;
use tracing::{info, warn};

use super::load_badges;
use crate::components::BadgeModal;
use crate::format::format_badge_date;
use crate::state::{FetchPolicy, LifecycleGuard, Route, ViewState, WalletConnection};

pub const PROFILE_SAVED_MESSAGE: &str = "Profile saved successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Bio,
    Website,
    Twitter,
    Linkedin,
    Github,
}

/// Profile card plus the wallet's badges. Edits live in memory only.
pub struct ProfileController {
    source: Rc<dyn BadgeSource>,
    catalog: Rc<dyn CatalogSource>,
    lifecycle: LifecycleGuard,
    wallet: Option<WalletAddress>,
    badges: ViewState<Vec<BadgeInfo>>,
    profile: Profile,
    pub modal: BadgeModal,
}

impl ProfileController {
    pub fn new(source: Rc<dyn BadgeSource>, catalog: Rc<dyn CatalogSource>) -> Self {
        Self {
            source,
            catalog,
            lifecycle: LifecycleGuard::default(),
            wallet: None,
            badges: ViewState::NotMounted,
            profile: Profile::default(),
            modal: BadgeModal::default(),
        }
    }

    pub fn mount(&mut self, connection: &WalletConnection) -> Option<Route> {
        self.lifecycle.mark_ready();
        self.wallet = connection.address().cloned();
        match self.wallet {
            Some(_) => {
                self.badges = ViewState::Loading;
                None
            }
            None => {
                self.badges = ViewState::NotMounted;
                Some(Route::Home)
            }
        }
    }

    pub async fn load(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            return;
        };
        self.badges = ViewState::Loading;
        self.badges = load_badges(self.source.as_ref(), &wallet, FetchPolicy::Degrade).await;
        match self.catalog.profile(&wallet).await {
            Ok(profile) => self.profile = profile,
            Err(err) => warn!(wallet = %wallet, "profile unavailable, keeping current fields: {err}"),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn badges(&self) -> &ViewState<Vec<BadgeInfo>> {
        &self.badges
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn edit(&mut self, field: ProfileField, value: &str) {
        let slot = match field {
            ProfileField::Name => &mut self.profile.name,
            ProfileField::Bio => &mut self.profile.bio,
            ProfileField::Website => &mut self.profile.website,
            ProfileField::Twitter => &mut self.profile.twitter,
            ProfileField::Linkedin => &mut self.profile.linkedin,
            ProfileField::Github => &mut self.profile.github,
        };
        *slot = value.to_owned();
    }

    /// Acknowledges the edit. Nothing is persisted.
    pub fn save(&self) -> &'static str {
        info!(name = %self.profile.name, "profile saved in memory");
        PROFILE_SAVED_MESSAGE
    }

    pub fn twitter_url(&self) -> Option<String> {
        let handle = self.profile.twitter.trim().trim_start_matches('@');
        (!handle.is_empty()).then(|| format!("https://twitter.com/{handle}"))
    }

    pub fn website_url(&self) -> Option<&str> {
        Some(self.profile.website.trim()).filter(|url| !url.is_empty())
    }

    pub fn joined(&self) -> String {
        format_badge_date(&self.profile.join_date)
    }

    pub fn select_badge(&mut self, id: &str) -> bool {
        match self.badges.items().iter().find(|badge| badge.id == id) {
            Some(badge) => {
                self.modal.open(badge.clone());
                true
            }
            None => false,
        }
    }
}
