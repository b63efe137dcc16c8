use async_trait::async_trait;
use ss_api_types::{BadgeInfo, LeaderboardEntry, Profile, WalletAddress};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{BadgeSource, sample};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Community-wide data for the gallery, leaderboard and profile pages.
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn gallery_badges(&self) -> Result<Vec<BadgeInfo>, CatalogError>;
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CatalogError>;
    async fn profile(&self, wallet: &WalletAddress) -> Result<Profile, CatalogError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticSampleCatalog;

#[async_trait(?Send)]
impl CatalogSource for StaticSampleCatalog {
    async fn gallery_badges(&self) -> Result<Vec<BadgeInfo>, CatalogError> {
        Ok(sample::gallery_badges())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CatalogError> {
        Ok(sample::leaderboard())
    }

    async fn profile(&self, _wallet: &WalletAddress) -> Result<Profile, CatalogError> {
        Ok(sample::profile())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMember {
    pub name: String,
    pub wallet: WalletAddress,
}

impl CommunityMember {
    pub fn new(name: impl Into<String>, wallet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wallet: WalletAddress(wallet.into()),
        }
    }
}

/// Builds the community pages from live workflow data for a known set of
/// wallets.
///
/// Members whose fetch fails are skipped; the catalog only errors when no
/// member could be read at all. Rank changes are measured against the
/// previous `leaderboard()` call on the same instance.
pub struct RemoteCatalog {
    source: Rc<dyn BadgeSource>,
    community: Vec<CommunityMember>,
    previous_ranks: RefCell<HashMap<String, u32>>,
}

impl RemoteCatalog {
    pub fn new(source: Rc<dyn BadgeSource>, community: Vec<CommunityMember>) -> Self {
        Self {
            source,
            community,
            previous_ranks: RefCell::new(HashMap::new()),
        }
    }

    async fn collect(&self) -> Result<Vec<(&CommunityMember, Vec<BadgeInfo>)>, CatalogError> {
        let mut collected = Vec::with_capacity(self.community.len());
        let mut last_error = None;

        for member in &self.community {
            match self.source.try_fetch_badges(&member.wallet).await {
                Ok(badges) => collected.push((member, badges)),
                Err(err) => {
                    warn!(wallet = %member.wallet, "skipping community member: {err}");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if collected.is_empty() => Err(CatalogError::Unavailable(err.to_string())),
            _ => Ok(collected),
        }
    }
}

#[async_trait(?Send)]
impl CatalogSource for RemoteCatalog {
    async fn gallery_badges(&self) -> Result<Vec<BadgeInfo>, CatalogError> {
        let collected = self.collect().await?;
        Ok(collected.into_iter().flat_map(|(_, badges)| badges).collect())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CatalogError> {
        let mut counts: Vec<(&CommunityMember, u32)> = self
            .collect()
            .await?
            .into_iter()
            .map(|(member, badges)| (member, badges.len() as u32))
            .collect();
        // stable: equal counts keep community order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut previous = self.previous_ranks.borrow_mut();
        let mut next_ranks = HashMap::with_capacity(counts.len());
        let entries: Vec<LeaderboardEntry> = counts
            .into_iter()
            .enumerate()
            .map(|(index, (member, badge_count))| {
                let rank = index as u32 + 1;
                let change = previous
                    .get(member.wallet.as_str())
                    .map(|prev| *prev as i32 - rank as i32)
                    .unwrap_or(0);
                next_ranks.insert(member.wallet.0.clone(), rank);
                LeaderboardEntry {
                    id: member.wallet.0.clone(),
                    name: member.name.clone(),
                    wallet: member.wallet.short(),
                    badge_count,
                    rank,
                    change,
                }
            })
            .collect();
        *previous = next_ranks;
        debug!(entries = entries.len(), "leaderboard rebuilt");

        Ok(entries)
    }

    async fn profile(&self, wallet: &WalletAddress) -> Result<Profile, CatalogError> {
        let name = self
            .community
            .iter()
            .find(|member| member.wallet == *wallet)
            .map(|member| member.name.clone())
            .unwrap_or_default();
        Ok(Profile {
            name,
            ..Profile::default()
        })
    }
}
