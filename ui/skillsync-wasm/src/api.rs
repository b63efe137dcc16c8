//! Workflow client over the browser `fetch` API.
//!
//! `workflow_base()` picks the endpoint per request, so editing the
//! `#workflowUrl` input takes effect immediately.

use crate::dom;
use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use ss_api_types::{BadgeInfo, MintBadgeRequest, WalletAddress};
use ss_badge_source::decode::{decode_badge_list_text, decode_minted_badge, mint_error_from_body};
use ss_badge_source::{BadgeSource, FetchFailure, MintError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, RequestMode, Response};

pub const FETCH_TIMEOUT_MS: u32 = 10_000;

/// Priority: `#workflowUrl` input, then the stub on `:8090` of the page host.
pub fn workflow_base() -> String {
    if let Some(value) = dom::input_value("workflowUrl").filter(|v| !v.is_empty()) {
        return value.trim_end_matches('/').to_owned();
    }

    let loc = dom::window().location();
    let host = loc.hostname().unwrap_or_default();
    let protocol = loc.protocol().unwrap_or_else(|_| "http:".into());
    format!("{protocol}//{host}:8090")
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn local_failure(err: JsValue) -> FetchFailure {
    FetchFailure::Unexpected(describe(&err))
}

struct RawResponse {
    status: u16,
    ok: bool,
    body: String,
}

async fn send(
    url: &str,
    method: &str,
    body: Option<&str>,
    timeout_ms: Option<u32>,
) -> Result<RawResponse, FetchFailure> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(local_failure)?;
    if let Some(body) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(local_failure)?;
        opts.set_body(&JsValue::from_str(body));
    }
    opts.set_headers(&headers);

    // Dropping the timer cancels it, so the deadline covers the body read too.
    let _deadline = match timeout_ms {
        Some(ms) => {
            let controller = AbortController::new().map_err(local_failure)?;
            opts.set_signal(Some(&controller.signal()));
            Some(Timeout::new(ms, move || controller.abort()))
        }
        None => None,
    };

    let request = Request::new_with_str_and_init(url, &opts).map_err(local_failure)?;
    let response = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(|err| FetchFailure::Network(describe(&err)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| FetchFailure::Unexpected("fetch did not resolve to a Response".into()))?;

    let text = JsFuture::from(response.text().map_err(local_failure)?)
        .await
        .map_err(|err| FetchFailure::Network(describe(&err)))?;

    Ok(RawResponse {
        status: response.status(),
        ok: response.ok(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// `BadgeSource` for the browser build.
pub struct BrowserWorkflowClient {
    fetch_timeout_ms: u32,
}

impl Default for BrowserWorkflowClient {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

#[async_trait(?Send)]
impl BadgeSource for BrowserWorkflowClient {
    async fn try_fetch_badges(&self, wallet: &WalletAddress) -> Result<Vec<BadgeInfo>, FetchFailure> {
        if wallet.is_blank() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/workflow/GetUserBadges?walletAddress={}",
            workflow_base(),
            String::from(js_sys::encode_uri_component(wallet.as_str()))
        );
        let result = match send(&url, "GET", None, Some(self.fetch_timeout_ms)).await {
            Ok(response) if response.ok => decode_badge_list_text(&response.body),
            Ok(response) => Err(FetchFailure::Http {
                status: response.status,
                body: response.body,
            }),
            Err(err) => Err(err),
        };

        if let Err(err) = &result {
            gloo_console::warn!(format!("badge fetch for {wallet} failed: {err}"));
        }
        result
    }

    async fn mint_badge(&self, wallet: &WalletAddress, level: &str) -> Result<BadgeInfo, MintError> {
        if wallet.is_blank() {
            return Err(MintError::MissingWallet);
        }

        let date = String::from(js_sys::Date::new_0().to_iso_string());
        let body = serde_json::to_string(&MintBadgeRequest::new(wallet, level, date))
            .map_err(|_| MintError::generic())?;
        let url = format!("{}/workflow/MintSkillBadge", workflow_base());

        match send(&url, "POST", Some(&body), None).await {
            Ok(response) if response.ok => decode_minted_badge(&response.body),
            Ok(response) => {
                gloo_console::warn!(format!("mint rejected with HTTP {}", response.status));
                Err(mint_error_from_body(&response.body))
            }
            Err(err) => {
                gloo_console::warn!(format!("mint transport failed: {err}"));
                Err(MintError::generic())
            }
        }
    }
}
