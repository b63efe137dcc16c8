use ss_api_types::BadgeInfo;
use ss_badge_source::sample;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Badges per wallet, held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct BadgeStore {
    seed_samples: bool,
    wallets: RwLock<HashMap<String, Vec<BadgeInfo>>>,
}

impl BadgeStore {
    pub fn new(seed_samples: bool) -> Self {
        Self {
            seed_samples,
            wallets: RwLock::new(HashMap::new()),
        }
    }

    fn initial(&self) -> Vec<BadgeInfo> {
        if self.seed_samples {
            sample::demo_badges()
        } else {
            Vec::new()
        }
    }

    pub async fn badges(&self, wallet: &str) -> Vec<BadgeInfo> {
        if let Some(badges) = self.wallets.read().await.get(wallet) {
            return badges.clone();
        }
        self.wallets
            .write()
            .await
            .entry(wallet.to_owned())
            .or_insert_with(|| self.initial())
            .clone()
    }

    pub async fn append(&self, wallet: &str, badge: BadgeInfo) {
        self.wallets
            .write()
            .await
            .entry(wallet.to_owned())
            .or_insert_with(|| self.initial())
            .push(badge);
    }
}
