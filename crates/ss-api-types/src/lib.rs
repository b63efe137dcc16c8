use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Skill name the workflow mints badges for.
pub const MINT_SKILL: &str = "Web3 Developer";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `0x1234...abcd` form used in headers and the navbar.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A skill badge as issued by the workflow service.
///
/// Members the client does not model are kept in `extra` so a badge can be
/// handed back exactly as the service produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BadgeInfo {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub image: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub date: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub category: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub level: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BadgeLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl BadgeLevel {
    pub const ALL: [BadgeLevel; 4] = [
        BadgeLevel::Beginner,
        BadgeLevel::Intermediate,
        BadgeLevel::Advanced,
        BadgeLevel::Expert,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BadgeLevel::Beginner => "beginner",
            BadgeLevel::Intermediate => "intermediate",
            BadgeLevel::Advanced => "advanced",
            BadgeLevel::Expert => "expert",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BadgeLevel::Beginner => "Beginner",
            BadgeLevel::Intermediate => "Intermediate",
            BadgeLevel::Advanced => "Advanced",
            BadgeLevel::Expert => "Expert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BadgeLevel::Beginner => "For those starting their Web3 journey",
            BadgeLevel::Intermediate => "For developers with some Web3 experience",
            BadgeLevel::Advanced => "For experienced Web3 developers",
            BadgeLevel::Expert => "For Web3 masters and blockchain architects",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BadgeLevel::Beginner => "\u{1F331}",
            BadgeLevel::Intermediate => "\u{2B50}",
            BadgeLevel::Advanced => "\u{1F525}",
            BadgeLevel::Expert => "\u{1F3C6}",
        }
    }

    /// Case-insensitive match on the level id.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.id().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for BadgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MintBadgeRequest {
    pub wallet_address: String,
    pub level: String,
    pub skill: String,
    pub date: String,
}

impl MintBadgeRequest {
    pub fn new(wallet_address: &WalletAddress, level: &str, date: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.0.clone(),
            level: level.to_owned(),
            skill: MINT_SKILL.to_owned(),
            date: date.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgesQuery {
    pub wallet_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BadgesResponse {
    pub badges: Vec<BadgeInfo>,
}

/// Error body returned by the workflow service on failed calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkflowErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub wallet: String,
    pub badge_count: u32,
    pub rank: u32,
    #[serde(default)]
    pub change: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub website: String,
    pub twitter: String,
    pub linkedin: String,
    pub github: String,
    pub join_date: String,
}

/// Any JSON scalar as text; `null` is empty and nested values keep their
/// JSON form, so one odd member never sinks the whole badge.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn badge_keeps_unknown_members_and_defaults_missing_ones() {
        let raw = json!({
            "id": 9,
            "name": "Web3 Developer",
            "level": "expert",
            "image": null,
            "tokenId": "0x2a",
        });

        let badge: BadgeInfo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(badge.id, "9");
        assert_eq!(badge.image, "");
        assert_eq!(badge.category, "");
        assert_eq!(badge.extra.get("tokenId"), Some(&json!("0x2a")));

        let back = serde_json::to_value(&badge).unwrap();
        assert_eq!(back["tokenId"], json!("0x2a"));
        assert_eq!(back["level"], json!("expert"));
    }

    #[test]
    fn badge_with_odd_members_still_decodes() {
        let badge: BadgeInfo = serde_json::from_value(json!({ "name": 42, "level": null })).unwrap();
        assert_eq!(badge.id, "");
        assert_eq!(badge.name, "42");
        assert_eq!(badge.level, "");

        let badge: BadgeInfo = serde_json::from_value(json!({ "id": true, "category": ["a"] })).unwrap();
        assert_eq!(badge.id, "true");
        assert_eq!(badge.category, r#"["a"]"#);
    }

    #[test]
    fn level_parse_ignores_case() {
        assert_eq!(BadgeLevel::parse("Expert"), Some(BadgeLevel::Expert));
        assert_eq!(BadgeLevel::parse(" beginner "), Some(BadgeLevel::Beginner));
        assert_eq!(BadgeLevel::parse("grandmaster"), None);
        assert_eq!(BadgeLevel::default().id(), "intermediate");
    }

    #[test]
    fn mint_request_uses_camel_case() {
        let req = MintBadgeRequest::new(&WalletAddress::from("0xABC"), "expert", "2024-01-01T00:00:00.000Z");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "walletAddress": "0xABC",
                "level": "expert",
                "skill": "Web3 Developer",
                "date": "2024-01-01T00:00:00.000Z",
            })
        );
    }

    #[test]
    fn short_address() {
        let addr = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc454e4438f44e");
        assert_eq!(addr.short(), "0x742d...f44e");
        assert_eq!(WalletAddress::from("0xABC").short(), "0xABC");
        assert!(WalletAddress::from("   ").is_blank());
    }
}
