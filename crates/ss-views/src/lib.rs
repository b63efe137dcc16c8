//! Page controllers and presentational view models for SkillSync.
//!
//! Controllers own their page state and drive a `BadgeSource` or
//! `CatalogSource`; they never touch the DOM. The browser front end renders
//! whatever they expose.

pub mod components;
pub mod format;
pub mod notify;
pub mod pages;
pub mod state;

pub use components::{BadgeCardView, BadgeDetails, BadgeModal, NavLink, Navbar, ShareAction, ShareEffect, ShareLinks};
pub use notify::{Notification, NotificationAction, NotificationVariant};
pub use pages::{
    DashboardController, GalleryController, HomeController, LeaderboardController, LeaderboardRow, Medal,
    MintController, MintOutcome, ProfileController, ProfileField, RankChange,
};
pub use state::{FetchPolicy, LifecycleGuard, Route, ViewState, WalletConnection};

/// Shown when a strict badge fetch fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load badges. Please try again.";

#[cfg(test)]
pub(crate) mod testing;
