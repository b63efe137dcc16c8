use crate::state::{LifecycleGuard, Route, WalletConnection};

/// Landing page. Connected visitors go straight to their dashboard.
#[derive(Debug, Default)]
pub struct HomeController {
    lifecycle: LifecycleGuard,
}

impl HomeController {
    pub fn mount(&mut self, connection: &WalletConnection) -> Option<Route> {
        self.lifecycle.mark_ready();
        self.redirect(connection)
    }

    /// Re-evaluated whenever the connection changes.
    pub fn redirect(&self, connection: &WalletConnection) -> Option<Route> {
        (self.lifecycle.is_ready() && connection.is_connected()).then_some(Route::Dashboard)
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }
}
