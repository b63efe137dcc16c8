use ss_api_types::LeaderboardEntry;
use ss_badge_source::CatalogSource;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

use crate::state::{LifecycleGuard, Route, ViewState};

pub const LEADERBOARD_FAILED_MESSAGE: &str = "Failed to load leaderboard. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Medal> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// Movement since the previous standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChange {
    Up(u32),
    Down(u32),
    Same,
}

impl From<i32> for RankChange {
    fn from(change: i32) -> Self {
        match change {
            0 => RankChange::Same,
            n if n > 0 => RankChange::Up(n.unsigned_abs()),
            n => RankChange::Down(n.unsigned_abs()),
        }
    }
}

impl fmt::Display for RankChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankChange::Up(n) => write!(f, "+{n}"),
            RankChange::Down(n) => write!(f, "-{n}"),
            RankChange::Same => f.write_str("0"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub entry: LeaderboardEntry,
    pub medal: Option<Medal>,
    pub change: RankChange,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            medal: Medal::for_rank(entry.rank),
            change: RankChange::from(entry.change),
            entry,
        }
    }
}

pub struct LeaderboardController {
    catalog: Rc<dyn CatalogSource>,
    lifecycle: LifecycleGuard,
    state: ViewState<Vec<LeaderboardRow>>,
}

impl LeaderboardController {
    pub fn new(catalog: Rc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            lifecycle: LifecycleGuard::default(),
            state: ViewState::NotMounted,
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
        self.state = match self.catalog.leaderboard().await {
            Ok(entries) => ViewState::from_items(entries.into_iter().map(LeaderboardRow::from).collect()),
            Err(err) => {
                warn!("leaderboard load failed: {err}");
                ViewState::Error(LEADERBOARD_FAILED_MESSAGE.to_owned())
            }
        };
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn state(&self) -> &ViewState<Vec<LeaderboardRow>> {
        &self.state
    }

    /// "Earn More Badges" button under the table.
    pub fn earn_more(&self) -> (&'static str, Route) {
        ("Earn More Badges", Route::Mint)
    }
}
