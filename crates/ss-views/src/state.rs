use ss_api_types::WalletAddress;

/// Client-side routes of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Dashboard,
    Mint,
    Gallery,
    Leaderboard,
    Profile,
}

impl Route {
    pub const PRIMARY: [Route; 4] = [Route::Dashboard, Route::Mint, Route::Gallery, Route::Leaderboard];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::Mint => "/mint",
            Route::Gallery => "/gallery",
            Route::Leaderboard => "/leaderboard",
            Route::Profile => "/profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Dashboard => "Dashboard",
            Route::Mint => "Mint Badge",
            Route::Gallery => "Gallery",
            Route::Leaderboard => "Leaderboard",
            Route::Profile => "Profile",
        }
    }

    /// Unknown paths land on Home.
    pub fn from_path(path: &str) -> Route {
        let path = path.trim_end_matches('/');
        [
            Route::Dashboard,
            Route::Mint,
            Route::Gallery,
            Route::Leaderboard,
            Route::Profile,
        ]
        .into_iter()
        .find(|route| route.path() == path)
        .unwrap_or(Route::Home)
    }
}

/// Read-only view of the wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletConnection {
    address: Option<WalletAddress>,
}

impl WalletConnection {
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: Some(WalletAddress::new(address)),
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn address(&self) -> Option<&WalletAddress> {
        self.address.as_ref().filter(|address| !address.is_blank())
    }

    pub fn is_connected(&self) -> bool {
        self.address().is_some()
    }
}

/// Uninitialized until the page has mounted; controllers expose nothing
/// before that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleGuard {
    #[default]
    Uninitialized,
    Ready,
}

impl LifecycleGuard {
    pub fn mark_ready(&mut self) {
        *self = LifecycleGuard::Ready;
    }

    pub fn is_ready(self) -> bool {
        self == LifecycleGuard::Ready
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState<T> {
    #[default]
    NotMounted,
    Loading,
    Error(String),
    Empty,
    Populated(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            ViewState::Populated(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated(items)
        }
    }

    pub fn items(&self) -> &[T] {
        self.populated().map(Vec::as_slice).unwrap_or_default()
    }
}

/// How a page treats a failed badge fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Failures look like an empty result.
    #[default]
    Degrade,
    /// Failures land in the error state with a retry.
    Strict,
}
