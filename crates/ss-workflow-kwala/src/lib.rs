use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use ss_api_types::{BadgeInfo, BadgesQuery, MINT_SKILL, MintBadgeRequest, WalletAddress};
use ss_badge_source::decode::{decode_badge_list_text, decode_minted_badge, mint_error_from_body};
use ss_badge_source::{BadgeSource, FetchFailure, MintError};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_MINT_URL: &str = "https://api.kwala.xyz/workflow/MintSkillBadge";
pub const DEFAULT_FETCH_URL: &str = "https://api.kwala.xyz/workflow/GetUserBadges";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Endpoints and deadlines for the Kwala workflow service.
///
/// Environment variables, falling back to the hosted workflow:
/// `KWALA_MINT_URL`, `KWALA_FETCH_URL`, `KWALA_FETCH_TIMEOUT_MS` (default
/// 10000) and `KWALA_MINT_TIMEOUT_MS` (unset means mints never time out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub mint_url: String,
    pub fetch_url: String,
    pub fetch_timeout: Duration,
    pub mint_timeout: Option<Duration>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl WorkflowConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        let millis = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring non-numeric timeout");
                    None
                }
            }
        };

        Self {
            mint_url: url("KWALA_MINT_URL", DEFAULT_MINT_URL),
            fetch_url: url("KWALA_FETCH_URL", DEFAULT_FETCH_URL),
            fetch_timeout: millis("KWALA_FETCH_TIMEOUT_MS").unwrap_or(DEFAULT_FETCH_TIMEOUT),
            mint_timeout: millis("KWALA_MINT_TIMEOUT_MS").filter(|timeout| !timeout.is_zero()),
        }
    }

    /// Both workflows under one base, e.g. the local stub service.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            mint_url: format!("{base}/workflow/MintSkillBadge"),
            fetch_url: format!("{base}/workflow/GetUserBadges"),
            ..Self::default()
        }
    }
}

/// `BadgeSource` over the Kwala HTTP workflows.
pub struct KwalaWorkflowClient {
    config: WorkflowConfig,
    http: reqwest::Client,
}

impl Default for KwalaWorkflowClient {
    fn default() -> Self {
        Self::new(WorkflowConfig::from_env())
    }
}

impl KwalaWorkflowClient {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }
}

fn transport_failure(err: reqwest::Error) -> FetchFailure {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        FetchFailure::Network(err.to_string())
    } else {
        FetchFailure::Unexpected(err.to_string())
    }
}

#[async_trait(?Send)]
impl BadgeSource for KwalaWorkflowClient {
    async fn try_fetch_badges(&self, wallet: &WalletAddress) -> Result<Vec<BadgeInfo>, FetchFailure> {
        if wallet.is_blank() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(&self.config.fetch_url)
            .query(&BadgesQuery {
                wallet_address: wallet.0.clone(),
            })
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_failure)?;
        if !status.is_success() {
            return Err(FetchFailure::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let badges = decode_badge_list_text(&text)?;
        debug!(wallet = %wallet, count = badges.len(), "fetched badges");
        Ok(badges)
    }

    async fn mint_badge(&self, wallet: &WalletAddress, level: &str) -> Result<BadgeInfo, MintError> {
        if wallet.is_blank() {
            return Err(MintError::MissingWallet);
        }

        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let body = MintBadgeRequest::new(wallet, level, date);
        let mut request = self.http.post(&self.config.mint_url).json(&body);
        if let Some(timeout) = self.config.mint_timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(wallet = %wallet, level, "mint transport failed: {err}");
                return Err(MintError::generic());
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let err = mint_error_from_body(&text);
            warn!(wallet = %wallet, level, status = status.as_u16(), "mint rejected: {err}");
            return Err(err);
        }

        let badge = decode_minted_badge(&text)?;
        info!(wallet = %wallet, level, skill = MINT_SKILL, badge_id = %badge.id, "badge minted");
        Ok(badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use ss_badge_source::{FailureKind, GENERIC_MINT_ERROR};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> anyhow::Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move { axum::serve(listener, router).await });
        Ok(format!("http://{addr}"))
    }

    fn fetch_returning(status: StatusCode, body: &'static str) -> Router {
        Router::new().route(
            "/workflow/GetUserBadges",
            get(move || async move { (status, body) }),
        )
    }

    fn client(base: &str) -> KwalaWorkflowClient {
        KwalaWorkflowClient::new(WorkflowConfig::with_base(base))
    }

    #[test]
    fn config_defaults_and_overrides() {
        let config = WorkflowConfig::default();
        assert_eq!(config.mint_url, DEFAULT_MINT_URL);
        assert_eq!(config.fetch_url, DEFAULT_FETCH_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.mint_timeout, None);

        let vars = HashMap::from([
            ("KWALA_FETCH_URL", "http://localhost:8090/workflow/GetUserBadges"),
            ("KWALA_FETCH_TIMEOUT_MS", "250"),
            ("KWALA_MINT_TIMEOUT_MS", "soon"),
        ]);
        let config = WorkflowConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()));
        assert_eq!(config.fetch_url, "http://localhost:8090/workflow/GetUserBadges");
        assert_eq!(config.mint_url, DEFAULT_MINT_URL);
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
        assert_eq!(config.mint_timeout, None);
    }

    #[tokio::test]
    async fn fetch_sends_wallet_and_returns_wrapped_list() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/workflow/GetUserBadges",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                let wallet = query.get("walletAddress").cloned().unwrap_or_default();
                Json(json!({
                    "badges": [{ "id": "1", "name": "X", "description": wallet }]
                }))
            }),
        );
        let base = serve(router).await?;

        let badges = client(&base).fetch_badges(&WalletAddress::from("0xABC")).await;
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].id, "1");
        assert_eq!(badges[0].description, "0xABC");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_accepts_bare_array() -> anyhow::Result<()> {
        let base = serve(fetch_returning(
            StatusCode::OK,
            r#"[{"id":"a","name":"A"},{"id":"b","name":"B"}]"#,
        ))
        .await?;

        let badges = client(&base).fetch_badges(&WalletAddress::from("0xABC")).await;
        let ids: Vec<&str> = badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn server_error_degrades_but_stays_visible_to_try_fetch() -> anyhow::Result<()> {
        let base = serve(fetch_returning(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await?;
        let client = client(&base);
        let wallet = WalletAddress::from("0xABC");

        assert!(client.fetch_badges(&wallet).await.is_empty());
        let err = client.try_fetch_badges(&wallet).await.unwrap_err();
        assert_eq!(
            err,
            FetchFailure::Http {
                status: 500,
                body: "boom".into()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_degrades() -> anyhow::Result<()> {
        let base = serve(fetch_returning(StatusCode::OK, "<html>oops</html>")).await?;
        let client = client(&base);
        let wallet = WalletAddress::from("0xABC");

        assert!(client.fetch_badges(&wallet).await.is_empty());
        assert_eq!(
            client.try_fetch_badges(&wallet).await.unwrap_err().kind(),
            FailureKind::Unexpected
        );
        Ok(())
    }

    #[tokio::test]
    async fn slow_endpoint_times_out_as_network_failure() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/workflow/GetUserBadges",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "badges": [{ "id": "late" }] }))
            }),
        );
        let base = serve(router).await?;
        let client = KwalaWorkflowClient::new(WorkflowConfig {
            fetch_timeout: Duration::from_millis(100),
            ..WorkflowConfig::with_base(&base)
        });
        let wallet = WalletAddress::from("0xABC");

        assert!(client.fetch_badges(&wallet).await.is_empty());
        assert_eq!(
            client.try_fetch_badges(&wallet).await.unwrap_err().kind(),
            FailureKind::Network
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_failure() -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client = client(&format!("http://{addr}"));
        let err = client
            .try_fetch_badges(&WalletAddress::from("0xABC"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
        Ok(())
    }

    #[tokio::test]
    async fn blank_wallet_makes_no_request() -> anyhow::Result<()> {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/workflow/GetUserBadges",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "badges": [] }))
                }),
            )
            .with_state(hits.clone());
        let base = serve(router).await?;
        let client = client(&base);

        assert!(client.fetch_badges(&WalletAddress::from("")).await.is_empty());
        assert!(client.try_fetch_badges(&WalletAddress::from("   ")).await?.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn mint_returns_the_service_badge_unchanged() -> anyhow::Result<()> {
        let minted = json!({
            "id": "9",
            "name": "Web3 Developer",
            "description": "Verified Web3 skills",
            "image": "",
            "date": "2024-03-01T10:00:00.000Z",
            "category": "Development",
            "level": "expert",
            "txHash": "0xfeed",
        });
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let reply = minted.clone();
        let router = Router::new()
            .route(
                "/workflow/MintSkillBadge",
                post(
                    move |State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                        *seen.lock().unwrap() = Some(body);
                        Json(reply)
                    },
                ),
            )
            .with_state(seen.clone());
        let base = serve(router).await?;

        let badge = client(&base)
            .mint_badge(&WalletAddress::from("0xABC"), "expert")
            .await?;
        assert_eq!(serde_json::to_value(&badge)?, minted);

        let request = seen.lock().unwrap().take().expect("mint request body");
        assert_eq!(request["walletAddress"], "0xABC");
        assert_eq!(request["level"], "expert");
        assert_eq!(request["skill"], MINT_SKILL);
        assert!(request["date"].as_str().is_some_and(|date| date.ends_with('Z')));
        Ok(())
    }

    #[tokio::test]
    async fn mint_rejection_prefers_remote_message() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/workflow/MintSkillBadge",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Wallet already holds this badge" })),
                )
            }),
        );
        let base = serve(router).await?;

        let err = client(&base)
            .mint_badge(&WalletAddress::from("0xABC"), "beginner")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Wallet already holds this badge");
        Ok(())
    }

    #[tokio::test]
    async fn mint_failure_without_message_is_generic() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/workflow/MintSkillBadge",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        );
        let base = serve(router).await?;

        let err = client(&base)
            .mint_badge(&WalletAddress::from("0xABC"), "beginner")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_MINT_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn mint_requires_a_wallet() {
        let client = client("http://127.0.0.1:9");
        let err = client
            .mint_badge(&WalletAddress::from(" "), "beginner")
            .await
            .unwrap_err();
        assert_eq!(err, MintError::MissingWallet);
        assert_eq!(err.to_string(), GENERIC_MINT_ERROR);
    }
}
