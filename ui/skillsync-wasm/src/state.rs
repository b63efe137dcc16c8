//! Global application state.
//!
//! `thread_local!` + `RefCell`, since wasm is single-threaded. Controllers
//! are taken out of the state while they await and put back afterwards;
//! the navigation epoch decides whether a finished load is still wanted.

use gloo_storage::{LocalStorage, Storage};
use ss_badge_source::{BadgeSource, CatalogSource, StaticSampleCatalog};
use ss_views::{
    BadgeModal, DashboardController, FetchPolicy, GalleryController, HomeController, LeaderboardController, MintController,
    ProfileController, Route, WalletConnection,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::BrowserWorkflowClient;

const WALLET_KEY: &str = "skillsync_wallet";
const FETCH_POLICY_KEY: &str = "skillsync_fetch_policy";

pub enum Page {
    Home(HomeController),
    Dashboard(DashboardController),
    Mint(MintController),
    Gallery(GalleryController),
    Leaderboard(LeaderboardController),
    Profile(ProfileController),
}

impl Page {
    pub async fn load(&mut self) {
        match self {
            Page::Dashboard(page) => page.load().await,
            Page::Gallery(page) => page.load().await,
            Page::Leaderboard(page) => page.load().await,
            Page::Profile(page) => page.load().await,
            Page::Home(_) | Page::Mint(_) => {}
        }
    }

    pub fn modal_mut(&mut self) -> Option<&mut BadgeModal> {
        match self {
            Page::Dashboard(page) => Some(&mut page.modal),
            Page::Gallery(page) => Some(&mut page.modal),
            Page::Profile(page) => Some(&mut page.modal),
            Page::Home(_) | Page::Mint(_) | Page::Leaderboard(_) => None,
        }
    }

    /// Opens the badge modal for `id`; false when the page has no such badge.
    pub fn select_badge(&mut self, id: &str) -> bool {
        match self {
            Page::Dashboard(page) => page.select_badge(id),
            Page::Gallery(page) => page.select_badge(id),
            Page::Profile(page) => page.select_badge(id),
            Page::Home(_) | Page::Mint(_) | Page::Leaderboard(_) => false,
        }
    }
}

pub struct AppState {
    pub connection: WalletConnection,
    pub route: Route,
    /// Bumped on every navigation.
    pub epoch: u64,
    pub page: Option<Page>,
    pub source: Rc<dyn BadgeSource>,
    pub catalog: Rc<dyn CatalogSource>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            connection: WalletConnection::disconnected(),
            route: Route::Home,
            epoch: 0,
            page: None,
            source: Rc::new(BrowserWorkflowClient::default()),
            catalog: Rc::new(StaticSampleCatalog),
        }
    }
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn connection() -> WalletConnection {
    with(|s| s.connection.clone())
}

pub fn route() -> Route {
    with(|s| s.route)
}

pub fn epoch() -> u64 {
    with(|s| s.epoch)
}

pub fn sources() -> (Rc<dyn BadgeSource>, Rc<dyn CatalogSource>) {
    with(|s| (s.source.clone(), s.catalog.clone()))
}

/// Runs `f` on the mounted page, if there is one.
pub fn with_page<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Page) -> R,
{
    with_mut(|s| s.page.as_mut().map(f))
}

/// Starts a new navigation and returns its epoch.
pub fn begin_navigation(route: Route) -> u64 {
    with_mut(|s| {
        s.route = route;
        s.epoch += 1;
        s.page = None;
        s.epoch
    })
}

pub fn set_page(epoch: u64, page: Page) -> bool {
    with_mut(|s| {
        if s.epoch != epoch {
            return false;
        }
        s.page = Some(page);
        true
    })
}

/// Takes the page out for an await, if `epoch` is still current.
pub fn take_page(epoch: u64) -> Option<Page> {
    with_mut(|s| if s.epoch == epoch { s.page.take() } else { None })
}

/// Puts the page back; stale pages are dropped.
pub fn restore_page(epoch: u64, page: Page) -> bool {
    set_page(epoch, page)
}

// ── Persistence ──

pub fn restore_connection() {
    let connection = match LocalStorage::get::<String>(WALLET_KEY) {
        Ok(address) => WalletConnection::connected(address),
        Err(_) => WalletConnection::disconnected(),
    };
    with_mut(|s| s.connection = connection);
}

pub fn set_connection(connection: WalletConnection) {
    match connection.address() {
        Some(address) => {
            let _ = LocalStorage::set(WALLET_KEY, address.as_str());
        }
        None => LocalStorage::delete(WALLET_KEY),
    }
    with_mut(|s| s.connection = connection);
}

/// `strict` in local storage turns on strict badge fetching.
pub fn fetch_policy() -> FetchPolicy {
    match LocalStorage::get::<String>(FETCH_POLICY_KEY) {
        Ok(value) if value.eq_ignore_ascii_case("strict") => FetchPolicy::Strict,
        _ => FetchPolicy::Degrade,
    }
}
