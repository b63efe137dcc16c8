//! Wallet connect/disconnect.
//!
//! An injected provider (`window.ethereum`) is asked for its accounts;
//! without one the address typed into `#walletAddress` is used.

use js_sys::{Array, Function, Object, Promise, Reflect};
use ss_views::{Notification, Route, WalletConnection};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::{self, Elements};
use crate::{render, router, state};

async fn injected_account() -> Result<Option<String>, JsValue> {
    let provider = Reflect::get(&dom::window(), &JsValue::from_str("ethereum"))?;
    if provider.is_undefined() || provider.is_null() {
        return Ok(None);
    }
    let request: Function = Reflect::get(&provider, &JsValue::from_str("request"))?.dyn_into()?;

    let args = Object::new();
    Reflect::set(&args, &"method".into(), &"eth_requestAccounts".into())?;
    let promise: Promise = request.call1(&provider, &args)?.dyn_into()?;
    let accounts = JsFuture::from(promise).await?;

    Ok(Array::from(&accounts).get(0).as_string())
}

pub async fn connect(els: &Elements) {
    let address = match injected_account().await {
        Ok(Some(address)) => Some(address),
        Ok(None) => dom::input_value("walletAddress").filter(|v| !v.is_empty()),
        Err(err) => {
            gloo_console::warn!("wallet provider refused:", err);
            dom::input_value("walletAddress").filter(|v| !v.is_empty())
        }
    };

    let Some(address) = address else {
        render::toast(
            els,
            &Notification::destructive("Error", "Enter a wallet address or install a wallet extension."),
        );
        return;
    };

    state::set_connection(WalletConnection::connected(address));
    let route = match state::route() {
        Route::Home => Route::Dashboard,
        route => route,
    };
    router::navigate(els, route);
}

pub fn disconnect(els: &Elements) {
    state::set_connection(WalletConnection::disconnected());
    router::navigate(els, Route::Home);
}
