//! Badge data capabilities shared by the native client and the browser UI.
//!
//! `BadgeSource` is the seam over the workflow service; `CatalogSource`
//! feeds the gallery, leaderboard and profile pages.

pub mod catalog;
pub mod decode;
pub mod sample;

use async_trait::async_trait;
use ss_api_types::{BadgeInfo, BadgeLevel, WalletAddress};
use thiserror::Error;
use tracing::warn;

pub use catalog::{CatalogError, CatalogSource, CommunityMember, RemoteCatalog, StaticSampleCatalog};

/// User-facing message for a failed mint when the service gave none.
pub const GENERIC_MINT_ERROR: &str = "Failed to mint badge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Http,
    Unexpected,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    /// Connection refused, DNS failure or timeout.
    #[error("workflow endpoint unreachable: {0}")]
    Network(String),
    #[error("workflow endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unexpected badge fetch failure: {0}")]
    Unexpected(String),
}

impl FetchFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchFailure::Network(_) => FailureKind::Network,
            FetchFailure::Http { .. } => FailureKind::Http,
            FetchFailure::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MintError {
    /// Rejected before any request; reads like any other failed mint.
    #[error("Failed to mint badge")]
    MissingWallet,
    #[error("{0}")]
    Rejected(String),
}

impl MintError {
    /// Prefer the message the workflow service sent back.
    pub fn from_remote(message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => MintError::Rejected(message.to_owned()),
            None => MintError::generic(),
        }
    }

    pub fn generic() -> Self {
        MintError::Rejected(GENERIC_MINT_ERROR.to_owned())
    }
}

#[async_trait(?Send)]
pub trait BadgeSource {
    /// Badges held by `wallet`, with the failure kept visible.
    async fn try_fetch_badges(&self, wallet: &WalletAddress) -> Result<Vec<BadgeInfo>, FetchFailure>;

    async fn mint_badge(&self, wallet: &WalletAddress, level: &str) -> Result<BadgeInfo, MintError>;

    /// Badges held by `wallet`; every failure degrades to an empty list.
    ///
    /// Callers cannot tell "no badges" from "fetch failed" here. Use
    /// [`BadgeSource::try_fetch_badges`] when that matters.
    async fn fetch_badges(&self, wallet: &WalletAddress) -> Vec<BadgeInfo> {
        if wallet.is_blank() {
            return Vec::new();
        }
        match self.try_fetch_badges(wallet).await {
            Ok(badges) => badges,
            Err(err) => {
                log_fetch_failure(wallet, &err);
                Vec::new()
            }
        }
    }

    async fn mint_default_level(&self, wallet: &WalletAddress) -> Result<BadgeInfo, MintError> {
        self.mint_badge(wallet, BadgeLevel::default().id()).await
    }
}

pub fn log_fetch_failure(wallet: &WalletAddress, err: &FetchFailure) {
    match err {
        FetchFailure::Network(detail) => {
            warn!(wallet = %wallet, "badge fetch failed, network unreachable: {detail}")
        }
        FetchFailure::Http { status, body } => {
            warn!(wallet = %wallet, status, "badge fetch failed with HTTP error: {body}")
        }
        FetchFailure::Unexpected(detail) => {
            warn!(wallet = %wallet, "badge fetch failed unexpectedly: {detail}")
        }
    }
}
