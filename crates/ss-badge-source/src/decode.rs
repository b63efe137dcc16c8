//! Body decoding shared by every `BadgeSource` transport.

use serde_json::Value;
use ss_api_types::{BadgeInfo, WorkflowErrorBody};
use tracing::warn;

use crate::{FetchFailure, MintError};

/// Accepts `{ "badges": [...] }` or a bare array. Anything else that is
/// valid JSON counts as "no badges".
///
/// Badges decode one by one, in order. Entries that are not JSON objects
/// are logged and left out; every object comes back.
pub fn decode_badge_list(body: Value) -> Result<Vec<BadgeInfo>, FetchFailure> {
    let list = match body {
        Value::Object(mut map) => match map.remove("badges") {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(badges) => badges,
        },
        list @ Value::Array(_) => list,
        _ => return Ok(Vec::new()),
    };

    let Value::Array(items) = list else {
        return Err(FetchFailure::Unexpected(format!("badges is not a list: {list}")));
    };

    let total = items.len();
    let badges: Vec<BadgeInfo> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(badge) => Some(badge),
            Err(err) => {
                warn!(index, "skipping badge entry: {err}");
                None
            }
        })
        .collect();
    if badges.len() < total {
        warn!(kept = badges.len(), total, "badge list had entries that are not badges");
    }
    Ok(badges)
}

pub fn decode_badge_list_text(text: &str) -> Result<Vec<BadgeInfo>, FetchFailure> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let body: Value = serde_json::from_str(text)
        .map_err(|err| FetchFailure::Unexpected(format!("badge list parse: {err}")))?;
    decode_badge_list(body)
}

pub fn decode_minted_badge(text: &str) -> Result<BadgeInfo, MintError> {
    serde_json::from_str(text).map_err(|_| MintError::generic())
}

/// Pulls `message` out of a failed mint response, if there is one.
pub fn mint_error_from_body(text: &str) -> MintError {
    let body = serde_json::from_str::<WorkflowErrorBody>(text).unwrap_or_default();
    MintError::from_remote(body.message.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GENERIC_MINT_ERROR;
    use serde_json::json;

    #[test]
    fn wrapped_list_is_returned_exactly() {
        let badges = decode_badge_list(json!({
            "badges": [
                { "id": "1", "name": "X" },
                { "id": "3", "name": "Z" },
                { "id": "2", "name": "Y" },
            ],
            "total": 3,
        }))
        .unwrap();
        let ids: Vec<&str> = badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
    }

    #[test]
    fn bare_array_is_returned_exactly() {
        let badges = decode_badge_list(json!([{ "id": "7", "name": "Solo" }])).unwrap();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].name, "Solo");
    }

    #[test]
    fn shapeless_bodies_mean_no_badges() {
        assert!(decode_badge_list(json!({})).unwrap().is_empty());
        assert!(decode_badge_list(json!({ "badges": null })).unwrap().is_empty());
        assert!(decode_badge_list(Value::Null).unwrap().is_empty());
        assert!(decode_badge_list(json!("ok")).unwrap().is_empty());
        assert!(decode_badge_list_text("   ").unwrap().is_empty());
    }

    #[test]
    fn malformed_bodies_are_unexpected_failures() {
        let err = decode_badge_list_text("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, FetchFailure::Unexpected(_)));

        let err = decode_badge_list(json!({ "badges": "soon" })).unwrap_err();
        assert!(matches!(err, FetchFailure::Unexpected(_)));
    }

    #[test]
    fn one_odd_badge_does_not_drop_the_rest() {
        let badges = decode_badge_list(json!({
            "badges": [
                { "id": "1", "name": "X" },
                { "name": "no id" },
                { "id": "3", "name": 7 },
            ]
        }))
        .unwrap();
        assert_eq!(badges.len(), 3);
        assert_eq!(badges[0].id, "1");
        assert_eq!(badges[1].id, "");
        assert_eq!(badges[1].name, "no id");
        assert_eq!(badges[2].name, "7");
    }

    #[test]
    fn non_object_entries_are_left_out() {
        let badges = decode_badge_list(json!([{ "id": "1" }, "stray", 5, { "id": "2" }])).unwrap();
        let ids: Vec<&str> = badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn mint_error_body() {
        assert_eq!(
            mint_error_from_body(r#"{"message":"Wallet already holds this badge"}"#).to_string(),
            "Wallet already holds this badge"
        );
        assert_eq!(mint_error_from_body(r#"{"error":"x"}"#).to_string(), GENERIC_MINT_ERROR);
        assert_eq!(mint_error_from_body("Internal Server Error").to_string(), GENERIC_MINT_ERROR);
    }

    #[test]
    fn minted_badge_decode_failure_is_generic() {
        assert_eq!(decode_minted_badge("[]").unwrap_err(), MintError::generic());
        let badge = decode_minted_badge(r#"{"id":"9","level":"expert"}"#).unwrap();
        assert_eq!(badge.level, "expert");
    }
}
