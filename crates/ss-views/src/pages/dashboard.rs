use ss_api_types::{BadgeInfo, WalletAddress};
use ss_badge_source::BadgeSource;
use std::rc::Rc;
use tracing::debug;

use super::load_badges;
use crate::components::BadgeModal;
use crate::state::{FetchPolicy, LifecycleGuard, Route, ViewState, WalletConnection};

pub const MINT_FIRST_LABEL: &str = "Mint Your First Badge";

/// The connected wallet's own badges.
pub struct DashboardController {
    source: Rc<dyn BadgeSource>,
    policy: FetchPolicy,
    lifecycle: LifecycleGuard,
    wallet: Option<WalletAddress>,
    state: ViewState<Vec<BadgeInfo>>,
    pub modal: BadgeModal,
}

impl DashboardController {
    pub fn new(source: Rc<dyn BadgeSource>, policy: FetchPolicy) -> Self {
        Self {
            source,
            policy,
            lifecycle: LifecycleGuard::default(),
            wallet: None,
            state: ViewState::NotMounted,
            modal: BadgeModal::default(),
        }
    }

    /// Returns the redirect to follow when no wallet is connected.
    pub fn mount(&mut self, connection: &WalletConnection) -> Option<Route> {
        self.lifecycle.mark_ready();
        match connection.address() {
            Some(address) => {
                self.wallet = Some(address.clone());
                self.state = ViewState::Loading;
                None
            }
            None => {
                self.wallet = None;
                self.state = ViewState::NotMounted;
                Some(Route::Home)
            }
        }
    }

    pub async fn load(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            return;
        };
        self.state = ViewState::Loading;
        self.state = load_badges(self.source.as_ref(), &wallet, self.policy).await;
        debug!(wallet = %wallet, "dashboard loaded");
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn state(&self) -> &ViewState<Vec<BadgeInfo>> {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// `0x1234...abcd` for the page header.
    pub fn wallet_label(&self) -> Option<String> {
        self.wallet.as_ref().map(WalletAddress::short)
    }

    /// Opens the detail modal; false when no loaded badge has `id`.
    pub fn select_badge(&mut self, id: &str) -> bool {
        match self.state.items().iter().find(|badge| badge.id == id) {
            Some(badge) => {
                self.modal.open(badge.clone());
                true
            }
            None => false,
        }
    }

    /// Call to action shown in the empty state.
    pub fn empty_action(&self) -> (&'static str, Route) {
        (MINT_FIRST_LABEL, Route::Mint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LOAD_FAILED_MESSAGE;
    use crate::testing::{FakeSource, badge};
    use ss_badge_source::FetchFailure;

    fn dashboard(source: FakeSource, policy: FetchPolicy) -> (Rc<FakeSource>, DashboardController) {
        let source = Rc::new(source);
        let controller = DashboardController::new(source.clone(), policy);
        (source, controller)
    }

    #[tokio::test]
    async fn disconnected_mount_redirects_home_without_fetching() {
        let (source, mut dashboard) = dashboard(FakeSource::default(), FetchPolicy::Degrade);
        assert_eq!(dashboard.mount(&WalletConnection::disconnected()), Some(Route::Home));
        dashboard.load().await;
        assert_eq!(source.fetch_calls.get(), 0);
        assert_eq!(*dashboard.state(), ViewState::NotMounted);
    }

    #[tokio::test]
    async fn nothing_is_exposed_before_mount() {
        let (_, mut dashboard) = dashboard(FakeSource::default(), FetchPolicy::Degrade);
        dashboard.load().await;
        assert_eq!(*dashboard.state(), ViewState::NotMounted);
    }

    #[tokio::test]
    async fn populated_then_modal() {
        let (_, mut dashboard) = dashboard(
            FakeSource::with_fetches(vec![Ok(vec![badge("1", "X", "Dev"), badge("2", "Y", "")])]),
            FetchPolicy::Degrade,
        );
        assert_eq!(dashboard.mount(&WalletConnection::connected("0xABC")), None);
        assert!(dashboard.state().is_loading());

        dashboard.load().await;
        assert_eq!(dashboard.state().items().len(), 2);
        assert!(dashboard.select_badge("2"));
        assert_eq!(dashboard.modal.badge().map(|b| b.name.as_str()), Some("Y"));
        assert!(!dashboard.select_badge("missing"));
    }

    #[tokio::test]
    async fn degrade_policy_turns_failure_into_empty() {
        let (_, mut dashboard) = dashboard(
            FakeSource::with_fetches(vec![Err(FetchFailure::Network("refused".into()))]),
            FetchPolicy::Degrade,
        );
        dashboard.mount(&WalletConnection::connected("0xABC"));
        dashboard.load().await;
        assert_eq!(*dashboard.state(), ViewState::Empty);
        assert_eq!(dashboard.empty_action(), ("Mint Your First Badge", Route::Mint));
    }

    #[tokio::test]
    async fn strict_policy_surfaces_error_and_retry_recovers() {
        let (source, mut dashboard) = dashboard(
            FakeSource::with_fetches(vec![
                Err(FetchFailure::Http {
                    status: 502,
                    body: String::new(),
                }),
                Ok(vec![badge("1", "X", "Dev")]),
            ]),
            FetchPolicy::Strict,
        );
        dashboard.mount(&WalletConnection::connected("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"));
        assert_eq!(dashboard.wallet_label().as_deref(), Some("0x742d...f44e"));

        dashboard.load().await;
        assert_eq!(*dashboard.state(), ViewState::Error(LOAD_FAILED_MESSAGE.to_owned()));

        dashboard.retry().await;
        assert_eq!(dashboard.state().items().len(), 1);
        assert_eq!(source.fetch_calls.get(), 2);
    }
}
