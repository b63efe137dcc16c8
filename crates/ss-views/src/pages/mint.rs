use ss_api_types::{BadgeInfo, BadgeLevel, WalletAddress};
use ss_badge_source::BadgeSource;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::notify::Notification;
use crate::state::{LifecycleGuard, Route, WalletConnection};

/// Delay between a successful mint and the move to the dashboard.
pub const MINT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct MintOutcome {
    pub notification: Notification,
    pub badge: Option<BadgeInfo>,
    /// Where to go, and after how long.
    pub redirect: Option<(Route, Duration)>,
}

pub struct MintController {
    source: Rc<dyn BadgeSource>,
    lifecycle: LifecycleGuard,
    wallet: Option<WalletAddress>,
    selected: BadgeLevel,
    minting: bool,
}

impl MintController {
    pub fn new(source: Rc<dyn BadgeSource>) -> Self {
        Self {
            source,
            lifecycle: LifecycleGuard::default(),
            wallet: None,
            selected: BadgeLevel::Beginner,
            minting: false,
        }
    }

    pub fn mount(&mut self, connection: &WalletConnection) -> Option<Route> {
        self.lifecycle.mark_ready();
        self.wallet = connection.address().cloned();
        self.wallet.is_none().then_some(Route::Home)
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn selected(&self) -> BadgeLevel {
        self.selected
    }

    pub fn select(&mut self, level: BadgeLevel) {
        self.selected = level;
    }

    pub fn is_minting(&self) -> bool {
        self.minting
    }

    /// Mints the selected level. `None` when the page is not mounted with a
    /// wallet or a mint is already running.
    pub async fn mint(&mut self) -> Option<MintOutcome> {
        if !self.lifecycle.is_ready() || self.minting {
            return None;
        }
        let wallet = self.wallet.clone()?;
        let level = self.selected;

        self.minting = true;
        let result = self.source.mint_badge(&wallet, level.id()).await;
        self.minting = false;

        Some(match result {
            Ok(badge) => MintOutcome {
                notification: Notification::info(
                    "Success!",
                    format!("Your {} level badge has been minted successfully.", level.id()),
                )
                .with_action("View", Route::Dashboard),
                badge: Some(badge),
                redirect: Some((Route::Dashboard, MINT_REDIRECT_DELAY)),
            },
            Err(err) => {
                warn!(wallet = %wallet, level = level.id(), "mint failed: {err}");
                MintOutcome {
                    notification: Notification::destructive("Error", err.to_string()),
                    badge: None,
                    redirect: None,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationAction, NotificationVariant};
    use crate::testing::{FakeSource, badge};
    use ss_badge_source::{GENERIC_MINT_ERROR, MintError};

    fn mint_page(source: FakeSource) -> (Rc<FakeSource>, MintController) {
        let source = Rc::new(source);
        (source.clone(), MintController::new(source))
    }

    #[tokio::test]
    async fn requires_a_connection() {
        let (source, mut page) = mint_page(FakeSource::default());
        assert_eq!(page.mount(&WalletConnection::disconnected()), Some(Route::Home));
        assert_eq!(page.mint().await, None);
        assert!(source.minted_levels.borrow().is_empty());
    }

    #[tokio::test]
    async fn mints_the_selected_level_and_redirects() {
        let (source, mut page) = mint_page(FakeSource::with_mint(Ok(badge("9", "Web3 Developer", "Development"))));
        assert_eq!(page.mount(&WalletConnection::connected("0xABC")), None);
        assert_eq!(page.selected(), BadgeLevel::Beginner);
        page.select(BadgeLevel::Expert);

        let outcome = page.mint().await.unwrap();
        assert_eq!(*source.minted_levels.borrow(), ["expert"]);
        assert_eq!(outcome.badge.map(|b| b.id), Some("9".to_owned()));
        assert_eq!(outcome.redirect, Some((Route::Dashboard, Duration::from_secs(2))));
        assert_eq!(outcome.notification.variant, NotificationVariant::Default);
        assert_eq!(outcome.notification.title, "Success!");
        assert_eq!(
            outcome.notification.description,
            "Your expert level badge has been minted successfully."
        );
        assert_eq!(
            outcome.notification.action,
            Some(NotificationAction {
                label: "View".into(),
                route: Route::Dashboard
            })
        );
        assert!(!page.is_minting());
    }

    #[tokio::test]
    async fn failure_is_a_destructive_notification_with_the_remote_message() {
        let (_, mut page) = mint_page(FakeSource::with_mint(Err(MintError::from_remote(Some(
            "Wallet already holds this badge",
        )))));
        page.mount(&WalletConnection::connected("0xABC"));

        let outcome = page.mint().await.unwrap();
        assert_eq!(outcome.notification.variant, NotificationVariant::Destructive);
        assert_eq!(outcome.notification.title, "Error");
        assert_eq!(outcome.notification.description, "Wallet already holds this badge");
        assert_eq!(outcome.redirect, None);

        let outcome = page.mint().await.unwrap();
        assert_eq!(outcome.notification.description, GENERIC_MINT_ERROR);
    }
}
