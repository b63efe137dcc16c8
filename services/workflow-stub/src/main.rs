//! Local stand-in for the Kwala badge workflows.

mod store;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use ss_api_types::{BadgeInfo, BadgeLevel, BadgesQuery, BadgesResponse, MINT_SKILL, MintBadgeRequest, WorkflowErrorBody};
use std::net::SocketAddr;
use std::sync::Arc;
use store::BadgeStore;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

const SERVICE: &str = "workflow-stub";

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<WorkflowErrorBody>)>;

#[derive(Clone)]
struct AppState {
    store: Arc<BadgeStore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StubConfig {
    addr: SocketAddr,
    seed_samples: bool,
}

impl StubConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = match lookup("WORKFLOW_STUB_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("WORKFLOW_STUB_ADDR is not a socket address: {raw}"))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8090)),
        };
        let seed_samples = match lookup("WORKFLOW_STUB_SEED_SAMPLES") {
            Some(raw) => !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
            None => true,
        };
        Ok(Self { addr, seed_samples })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = StubConfig::from_lookup(|key| std::env::var(key).ok())?;
    let state = AppState {
        store: Arc::new(BadgeStore::new(config.seed_samples)),
    };

    info!(
        "{SERVICE} listening on {} (sample seeding {})",
        config.addr,
        if config.seed_samples { "on" } else { "off" }
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{SERVICE} stopped");
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/workflow/GetUserBadges", get(get_user_badges))
        .route("/workflow/MintSkillBadge", post(mint_skill_badge))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE,
        status: "ok",
    })
}

async fn get_user_badges(State(state): State<AppState>, Query(query): Query<BadgesQuery>) -> Json<BadgesResponse> {
    let wallet = query.wallet_address.trim();
    if wallet.is_empty() {
        return Json(BadgesResponse { badges: Vec::new() });
    }

    let badges = state.store.badges(wallet).await;
    info!(wallet, count = badges.len(), "badges requested");
    Json(BadgesResponse { badges })
}

async fn mint_skill_badge(
    State(state): State<AppState>,
    Json(request): Json<MintBadgeRequest>,
) -> ApiResult<BadgeInfo> {
    let wallet = request.wallet_address.trim();
    if wallet.is_empty() {
        return Err(bad_request("walletAddress is required"));
    }
    let Some(level) = BadgeLevel::parse(&request.level) else {
        return Err(bad_request(&format!("Unknown badge level: {}", request.level)));
    };

    let skill = match request.skill.trim() {
        "" => MINT_SKILL,
        skill => skill,
    };
    let date = match request.date.trim() {
        "" => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        date => date.to_owned(),
    };

    let badge = BadgeInfo {
        id: Uuid::new_v4().to_string(),
        name: skill.to_owned(),
        description: format!("Verified {skill} skills at the {level} level"),
        image: String::new(),
        date,
        category: "Development".to_owned(),
        level: level.display_name().to_owned(),
        ..BadgeInfo::default()
    };

    state.store.append(wallet, badge.clone()).await;
    info!(wallet, level = level.id(), badge_id = %badge.id, "badge minted");
    Ok(Json(badge))
}

fn bad_request(message: &str) -> (StatusCode, Json<WorkflowErrorBody>) {
    warn!("rejecting mint: {message}");
    (
        StatusCode::BAD_REQUEST,
        Json(WorkflowErrorBody {
            message: Some(message.to_owned()),
        }),
    )
}
