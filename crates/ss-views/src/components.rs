//! Presentational view models: badge card, badge detail modal, navbar.

use ss_api_types::{BadgeInfo, BadgeLevel};
use url::Url;

use crate::format::{format_badge_date, truncate_id};
use crate::notify::Notification;
use crate::state::{Route, WalletConnection};

pub const FALLBACK_CATEGORY: &str = "Skill";
pub const FALLBACK_ICON: &str = "\u{1F3C6}";
pub const BRAND: &str = "SkillSync";

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const LINKEDIN_SHARE: &str = "https://www.linkedin.com/sharing/share-offsite/";

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `None` renders the trophy icon.
    pub image: Option<String>,
    pub category: String,
    pub date: String,
}

impl From<&BadgeInfo> for BadgeCardView {
    fn from(badge: &BadgeInfo) -> Self {
        Self {
            id: badge.id.clone(),
            name: badge.name.clone(),
            description: badge.description.clone(),
            image: non_empty(&badge.image),
            category: or_fallback(&badge.category, FALLBACK_CATEGORY),
            date: format_badge_date(&badge.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDetails {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub level: String,
    pub date: String,
    pub short_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub badge_url: String,
    pub twitter: String,
    pub linkedin: String,
}

impl ShareLinks {
    pub fn for_badge(badge: &BadgeInfo, origin: &str) -> Self {
        let badge_url = format!("{}/badge/{}", origin.trim_end_matches('/'), badge.id);
        let tweet = format!("I just earned the \"{}\" badge on SkillSync! Check it out:", badge.name);
        let title = format!("I just earned the {} badge on SkillSync!", badge.name);

        Self {
            twitter: with_query(TWITTER_INTENT, &[("text", tweet.as_str()), ("url", badge_url.as_str())]),
            linkedin: with_query(LINKEDIN_SHARE, &[("url", badge_url.as_str()), ("title", title.as_str())]),
            badge_url,
        }
    }
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.into(),
        Err(_) => base.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    CopyLink,
    Twitter,
    LinkedIn,
}

/// Side effect the front end performs for a share action. Failures of the
/// effect itself are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareEffect {
    CopyToClipboard { text: String, notification: Notification },
    OpenWindow { url: String },
}

/// Detail modal over one badge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeModal {
    badge: Option<BadgeInfo>,
}

impl BadgeModal {
    pub fn open(&mut self, badge: BadgeInfo) {
        self.badge = Some(badge);
    }

    pub fn close(&mut self) {
        self.badge = None;
    }

    pub fn is_open(&self) -> bool {
        self.badge.is_some()
    }

    pub fn badge(&self) -> Option<&BadgeInfo> {
        self.badge.as_ref()
    }

    pub fn details(&self) -> Option<BadgeDetails> {
        let badge = self.badge.as_ref()?;
        Some(BadgeDetails {
            name: badge.name.clone(),
            description: badge.description.clone(),
            image: non_empty(&badge.image),
            category: or_fallback(&badge.category, FALLBACK_CATEGORY),
            level: or_fallback(&badge.level, BadgeLevel::Beginner.display_name()),
            date: format_badge_date(&badge.date),
            short_id: truncate_id(&badge.id),
        })
    }

    pub fn share(&self, action: ShareAction, origin: &str) -> Option<ShareEffect> {
        let links = ShareLinks::for_badge(self.badge.as_ref()?, origin);
        Some(match action {
            ShareAction::CopyLink => ShareEffect::CopyToClipboard {
                text: links.badge_url,
                notification: Notification::info("Link copied!", "Badge link copied to clipboard"),
            },
            ShareAction::Twitter => ShareEffect::OpenWindow { url: links.twitter },
            ShareAction::LinkedIn => ShareEffect::OpenWindow { url: links.linkedin },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
    pub active: bool,
}

impl NavLink {
    fn new(route: Route, current: Route) -> Self {
        Self {
            label: route.label(),
            route,
            active: route == current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    /// Present only while a wallet is connected.
    pub profile: Option<NavLink>,
    pub short_address: Option<String>,
}

impl Navbar {
    pub fn new(current: Route, connection: &WalletConnection) -> Self {
        let address = connection.address();
        Self {
            brand: BRAND,
            links: Route::PRIMARY
                .into_iter()
                .map(|route| NavLink::new(route, current))
                .collect(),
            profile: address.map(|_| NavLink::new(Route::Profile, current)),
            short_address: address.map(|address| address.short()),
        }
    }
}
