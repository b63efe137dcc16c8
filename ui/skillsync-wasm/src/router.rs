//! Hash routing: `#/dashboard` and friends map onto page controllers.

use ss_views::{
    DashboardController, GalleryController, HomeController, LeaderboardController, MintController,
    ProfileController, Route,
};
use wasm_bindgen_futures::spawn_local;

use crate::dom::{self, Elements};
use crate::render;
use crate::state::{self, Page};

pub fn current_route() -> Route {
    let hash = dom::window().location().hash().unwrap_or_default();
    Route::from_path(hash.trim_start_matches('#'))
}

/// Changes the hash; the `hashchange` listener does the rest.
pub fn navigate(els: &Elements, route: Route) {
    if current_route() == route {
        show(els, route);
        return;
    }
    if dom::window().location().set_hash(route.path()).is_err() {
        show(els, route);
    }
}

fn build(route: Route) -> Result<Page, Route> {
    let connection = state::connection();
    let (source, catalog) = state::sources();
    let redirect = |target: Option<Route>| target.map_or(Ok(()), Err);

    let page = match route {
        Route::Home => {
            let mut page = HomeController::default();
            redirect(page.mount(&connection))?;
            Page::Home(page)
        }
        Route::Dashboard => {
            let mut page = DashboardController::new(source, state::fetch_policy());
            redirect(page.mount(&connection))?;
            Page::Dashboard(page)
        }
        Route::Mint => {
            let mut page = MintController::new(source);
            redirect(page.mount(&connection))?;
            Page::Mint(page)
        }
        Route::Gallery => {
            let mut page = GalleryController::new(catalog);
            page.mount();
            Page::Gallery(page)
        }
        Route::Leaderboard => {
            let mut page = LeaderboardController::new(catalog);
            page.mount();
            Page::Leaderboard(page)
        }
        Route::Profile => {
            let mut page = ProfileController::new(source, catalog);
            redirect(page.mount(&connection))?;
            Page::Profile(page)
        }
    };
    Ok(page)
}

/// Mounts the page for `route`, renders it, then loads its data.
pub fn show(els: &Elements, route: Route) {
    let epoch = state::begin_navigation(route);
    let page = match build(route) {
        Ok(page) => page,
        Err(target) => {
            gloo_console::log!(format!("{} redirects to {}", route.path(), target.path()));
            navigate(els, target);
            return;
        }
    };
    state::set_page(epoch, page);
    render::render(els);
    load(els, epoch);
}

/// Re-runs the current page's load; used by Retry.
pub fn load(els: &Elements, epoch: u64) {
    let els = els.clone();
    spawn_local(async move {
        let Some(mut page) = state::take_page(epoch) else {
            return;
        };
        page.load().await;
        if state::restore_page(epoch, page) {
            render::render(&els);
        }
    });
}
