//! One controller per page.
//!
//! Every controller starts `NotMounted`, becomes ready on `mount`, and takes
//! `&mut self` across its fetch so a page never has two loads in flight.

mod dashboard;
mod gallery;
mod home;
mod leaderboard;
mod mint;
mod profile;

pub use dashboard::{DashboardController, MINT_FIRST_LABEL};
pub use gallery::{ALL_CATEGORIES, GalleryController};
pub use home::HomeController;
pub use leaderboard::{LEADERBOARD_FAILED_MESSAGE, LeaderboardController, LeaderboardRow, Medal, RankChange};
pub use mint::{MINT_REDIRECT_DELAY, MintController, MintOutcome};
pub use profile::{PROFILE_SAVED_MESSAGE, ProfileController, ProfileField};

use ss_api_types::{BadgeInfo, WalletAddress};
use ss_badge_source::{BadgeSource, log_fetch_failure};

use crate::LOAD_FAILED_MESSAGE;
use crate::state::{FetchPolicy, ViewState};

async fn load_badges(
    source: &dyn BadgeSource,
    wallet: &WalletAddress,
    policy: FetchPolicy,
) -> ViewState<Vec<BadgeInfo>> {
    match policy {
        FetchPolicy::Degrade => ViewState::from_items(source.fetch_badges(wallet).await),
        FetchPolicy::Strict => match source.try_fetch_badges(wallet).await {
            Ok(badges) => ViewState::from_items(badges),
            Err(err) => {
                log_fetch_failure(wallet, &err);
                ViewState::Error(LOAD_FAILED_MESSAGE.to_owned())
            }
        },
    }
}
