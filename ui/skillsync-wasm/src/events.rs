//! Event binding.
//!
//! Pages are re-rendered as HTML, so listeners sit on the document and
//! dispatch on the nearest `data-action` (clicks) or element id (inputs).

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use ss_api_types::BadgeLevel;
use ss_views::{Notification, ProfileField, Route, ShareAction, ShareEffect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{self, Elements};
use crate::state::{self, Page};
use crate::{render, router, wallet};

fn listen(target: &web_sys::EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref()) {
        gloo_console::error!(format!("could not listen for {kind}:"), err);
    }
    cb.forget();
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    let doc = dom::document();

    let click_els = els.clone();
    listen(&doc, "click", move |event: Event| on_click(&click_els, &event));

    listen(&doc, "input", move |event: Event| on_input(&event));
    listen(&doc, "change", move |event: Event| on_input(&event));

    let hash_els = els.clone();
    listen(&dom::window(), "hashchange", move |_: Event| {
        router::show(&hash_els, router::current_route());
    });
}

fn action_target(event: &Event) -> Option<Element> {
    let target: Element = event.target()?.dyn_into().ok()?;
    target.closest("[data-action]").ok().flatten()
}

fn on_click(els: &Elements, event: &Event) {
    let Some(el) = action_target(event) else {
        return;
    };
    let action = el.get_attribute("data-action").unwrap_or_default();

    match action.as_str() {
        "navigate" => {
            event.prevent_default();
            let path = el.get_attribute("data-route").unwrap_or_default();
            router::navigate(els, Route::from_path(&path));
        }
        "connect" => {
            let els = els.clone();
            spawn_local(async move { wallet::connect(&els).await });
        }
        "disconnect" => wallet::disconnect(els),
        "open-badge" => {
            let id = el.get_attribute("data-id").unwrap_or_default();
            if state::with_page(|page| page.select_badge(&id)) == Some(true) {
                render::render(els);
            }
        }
        "close-modal" => {
            state::with_page(|page| page.modal_mut().map(|modal| modal.close()));
            render::render(els);
        }
        "share-copy" => share(els, ShareAction::CopyLink),
        "share-twitter" => share(els, ShareAction::Twitter),
        "share-linkedin" => share(els, ShareAction::LinkedIn),
        "retry" => {
            if let Some(panel) = el.closest(".panel--error").ok().flatten() {
                dom::set_inner_html(&panel, r#"<div class="spinner" aria-label="Loading"></div>"#);
            }
            router::load(els, state::epoch());
        }
        "select-level" => {
            let Some(level) = el.get_attribute("data-level").as_deref().and_then(BadgeLevel::parse) else {
                return;
            };
            state::with_page(|page| {
                if let Page::Mint(mint) = page {
                    mint.select(level);
                }
            });
            render::render(els);
        }
        "mint" => {
            if let Some(button) = dom::by_id("mintButton") {
                let _ = button.set_attribute("disabled", "");
                button.set_text_content(Some("Minting..."));
            }
            let els = els.clone();
            spawn_local(async move { mint(&els).await });
        }
        "save-profile" => {
            let message = state::with_page(|page| match page {
                Page::Profile(profile) => Some(profile.save()),
                _ => None,
            })
            .flatten();
            if let Some(message) = message {
                render::render(els);
                render::toast(els, &Notification::info(message, ""));
            }
        }
        _ => {}
    }
}

fn share(els: &Elements, action: ShareAction) {
    let origin = dom::window().location().origin().unwrap_or_default();
    let effect = state::with_page(|page| page.modal_mut().and_then(|modal| modal.share(action, &origin))).flatten();

    match effect {
        Some(ShareEffect::CopyToClipboard { text, notification }) => {
            copy_to_clipboard(&text);
            render::toast(els, &notification);
        }
        Some(ShareEffect::OpenWindow { url }) => {
            let _ = dom::window().open_with_url_and_target(&url, "_blank");
        }
        None => {}
    }
}

/// Best effort; browsers without the async clipboard API are ignored.
fn copy_to_clipboard(text: &str) {
    let write = || -> Result<(), JsValue> {
        let navigator = Reflect::get(&dom::window(), &"navigator".into())?;
        let clipboard = Reflect::get(&navigator, &"clipboard".into())?;
        let write_text: Function = Reflect::get(&clipboard, &"writeText".into())?.dyn_into()?;
        write_text.call1(&clipboard, &JsValue::from_str(text))?;
        Ok(())
    };
    if let Err(err) = write() {
        gloo_console::warn!("clipboard unavailable:", err);
    }
}

async fn mint(els: &Elements) {
    let epoch = state::epoch();
    let Some(mut page) = state::take_page(epoch) else {
        return;
    };
    let outcome = match &mut page {
        Page::Mint(controller) => controller.mint().await,
        _ => None,
    };
    if state::restore_page(epoch, page) {
        render::render(els);
    }

    let Some(outcome) = outcome else {
        return;
    };
    render::toast(els, &outcome.notification);
    if let Some((route, delay)) = outcome.redirect {
        let els = els.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            if state::epoch() == epoch {
                router::navigate(&els, route);
            }
        })
        .forget();
    }
}

fn field_value(target: &Element) -> Option<String> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
}

fn profile_field(name: &str) -> Option<ProfileField> {
    Some(match name {
        "name" => ProfileField::Name,
        "bio" => ProfileField::Bio,
        "website" => ProfileField::Website,
        "twitter" => ProfileField::Twitter,
        "linkedin" => ProfileField::Linkedin,
        "github" => ProfileField::Github,
        _ => return None,
    })
}

fn on_input(event: &Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Some(value) = field_value(&target) else {
        return;
    };

    match target.id().as_str() {
        "gallerySearch" | "galleryCategory" => {
            let search = target.id() == "gallerySearch";
            state::with_page(|page| {
                if let Page::Gallery(gallery) = page {
                    if search {
                        gallery.set_search(&value);
                    } else {
                        gallery.set_category(&value);
                    }
                }
            });
            render::render_gallery_results();
        }
        _ => {
            let Some(field) = target.get_attribute("data-field").as_deref().and_then(profile_field) else {
                return;
            };
            state::with_page(|page| {
                if let Page::Profile(profile) = page {
                    profile.edit(field, &value);
                }
            });
        }
    }
}
