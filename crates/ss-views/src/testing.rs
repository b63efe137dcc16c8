use async_trait::async_trait;
use ss_api_types::{BadgeInfo, LeaderboardEntry, Profile, WalletAddress};
use ss_badge_source::{BadgeSource, CatalogError, CatalogSource, FetchFailure, MintError, sample};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub fn badge(id: &str, name: &str, category: &str) -> BadgeInfo {
    BadgeInfo {
        id: id.to_owned(),
        name: name.to_owned(),
        description: format!("{name} description"),
        category: category.to_owned(),
        date: "2024-01-02".to_owned(),
        ..BadgeInfo::default()
    }
}

/// Replays queued fetch results, then answers with an empty list.
#[derive(Default)]
pub struct FakeSource {
    pub fetches: RefCell<VecDeque<Result<Vec<BadgeInfo>, FetchFailure>>>,
    pub fetch_calls: Cell<usize>,
    pub mint_result: RefCell<Option<Result<BadgeInfo, MintError>>>,
    pub minted_levels: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_fetches(fetches: Vec<Result<Vec<BadgeInfo>, FetchFailure>>) -> Self {
        Self {
            fetches: RefCell::new(fetches.into()),
            ..Self::default()
        }
    }

    pub fn with_mint(result: Result<BadgeInfo, MintError>) -> Self {
        Self {
            mint_result: RefCell::new(Some(result)),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl BadgeSource for FakeSource {
    async fn try_fetch_badges(&self, _wallet: &WalletAddress) -> Result<Vec<BadgeInfo>, FetchFailure> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        self.fetches.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn mint_badge(&self, _wallet: &WalletAddress, level: &str) -> Result<BadgeInfo, MintError> {
        self.minted_levels.borrow_mut().push(level.to_owned());
        self.mint_result
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(MintError::generic()))
    }
}

/// Sample catalog that can be switched to failing.
#[derive(Default)]
pub struct FakeCatalog {
    pub failing: Cell<bool>,
    pub gallery: Option<Vec<BadgeInfo>>,
}

impl FakeCatalog {
    fn check(&self) -> Result<(), CatalogError> {
        if self.failing.get() {
            Err(CatalogError::Unavailable("offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl CatalogSource for FakeCatalog {
    async fn gallery_badges(&self) -> Result<Vec<BadgeInfo>, CatalogError> {
        self.check()?;
        Ok(self.gallery.clone().unwrap_or_else(sample::gallery_badges))
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CatalogError> {
        self.check()?;
        Ok(sample::leaderboard())
    }

    async fn profile(&self, _wallet: &WalletAddress) -> Result<Profile, CatalogError> {
        self.check()?;
        Ok(sample::profile())
    }
}
