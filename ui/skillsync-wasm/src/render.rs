//! HTML rendering for the navbar, pages, badge modal and toasts.
//!
//! Everything is rebuilt from controller state; event wiring lives in
//! `events.rs` and finds its targets through `data-action` attributes.

use ss_api_types::{BadgeInfo, BadgeLevel};
use ss_views::components::FALLBACK_ICON;
use ss_views::{
    BadgeCardView, BadgeModal, DashboardController, GalleryController, LeaderboardController, LeaderboardRow, Medal,
    MintController, Navbar, Notification, NotificationVariant, ProfileController, Route, ViewState, WalletConnection,
};

use crate::dom::{self, Elements, escape};
use crate::state::{self, AppState, Page};

/// Leaves the DOM alone while the page is out of state for an await.
pub fn render(els: &Elements) {
    if let Some(html) = state::with(app_html) {
        dom::set_inner_html(&els.app, &html);
    }
}

fn app_html(s: &AppState) -> Option<String> {
    let page = s.page.as_ref()?;
    let nav = navbar(&Navbar::new(s.route, &s.connection));
    let body = page_body(page, &s.connection);
    let modal = page_modal(page).map(badge_modal).unwrap_or_default();
    Some(format!(r#"{nav}<main class="container">{body}</main>{modal}"#))
}

/// Re-renders only the gallery grid, keeping focus in the search box.
pub fn render_gallery_results() {
    let html = state::with(|s| match &s.page {
        Some(Page::Gallery(page)) => gallery_results(page),
        _ => String::new(),
    });
    dom::set_html_by_id("galleryResults", &html);
}

fn page_body(page: &Page, connection: &WalletConnection) -> String {
    match page {
        Page::Home(_) => home(),
        Page::Dashboard(page) => dashboard(page),
        Page::Mint(page) => mint(page),
        Page::Gallery(page) => gallery(page),
        Page::Leaderboard(page) => leaderboard(page),
        Page::Profile(page) => profile(page, connection),
    }
}

fn page_modal(page: &Page) -> Option<&BadgeModal> {
    let modal = match page {
        Page::Dashboard(page) => &page.modal,
        Page::Gallery(page) => &page.modal,
        Page::Profile(page) => &page.modal,
        _ => return None,
    };
    modal.is_open().then_some(modal)
}

fn route_attr(route: Route) -> String {
    format!(r#"data-action="navigate" data-route="{}""#, route.path())
}

fn navbar(nav: &Navbar) -> String {
    let links: String = nav
        .links
        .iter()
        .map(|link| {
            format!(
                r##"<a class="nav-link{}" href="#{}">{}</a>"##,
                if link.active { " nav-link--active" } else { "" },
                link.route.path(),
                link.label
            )
        })
        .collect();
    let profile = nav
        .profile
        .as_ref()
        .map(|link| {
            format!(
                r##"<a class="nav-profile{}" href="#{}">{}</a>"##,
                if link.active { " nav-link--active" } else { "" },
                link.route.path(),
                link.label
            )
        })
        .unwrap_or_default();
    let wallet = match &nav.short_address {
        Some(address) => format!(
            r#"<span class="nav-address">{}</span><button class="secondary" data-action="disconnect">Disconnect</button>"#,
            escape(address)
        ),
        None => r#"<input id="walletAddress" placeholder="0x… wallet address" />
               <button class="primary" data-action="connect">Connect Wallet</button>"#
            .to_owned(),
    };

    format!(
        r##"<nav class="navbar">
          <a class="brand" href="#/">{}</a>
          <div class="nav-links">{links}</div>
          <div class="nav-wallet">{profile}{wallet}</div>
        </nav>"##,
        nav.brand
    )
}

fn spinner() -> &'static str {
    r#"<div class="spinner" aria-label="Loading"></div>"#
}

fn error_panel(message: &str) -> String {
    format!(
        r#"<div class="panel panel--error"><p>{}</p><button data-action="retry">Retry</button></div>"#,
        escape(message)
    )
}

fn badge_card(badge: &BadgeInfo) -> String {
    let card = BadgeCardView::from(badge);
    let image = match &card.image {
        Some(src) => format!(r#"<img src="{}" alt="{}" />"#, escape(src), escape(&card.name)),
        None => format!(r#"<div class="badge-icon">{FALLBACK_ICON}</div>"#),
    };
    format!(
        r#"<div class="badge-card" data-action="open-badge" data-id="{}">
          {image}
          <h3>{}</h3>
          <p>{}</p>
          <div class="badge-meta"><span class="badge-category">{}</span><span>{}</span></div>
        </div>"#,
        escape(&card.id),
        escape(&card.name),
        escape(&card.description),
        escape(&card.category),
        escape(&card.date)
    )
}

fn badge_grid<'a>(badges: impl IntoIterator<Item = &'a BadgeInfo>) -> String {
    let cards: String = badges.into_iter().map(badge_card).collect();
    format!(r#"<div class="badge-grid">{cards}</div>"#)
}

fn badge_modal(modal: &BadgeModal) -> String {
    let Some(details) = modal.details() else {
        return String::new();
    };
    let image = match &details.image {
        Some(src) => format!(r#"<img src="{}" alt="{}" />"#, escape(src), escape(&details.name)),
        None => format!(r#"<div class="badge-icon badge-icon--large">{FALLBACK_ICON}</div>"#),
    };
    format!(
        r#"<div class="modal-backdrop" data-action="close-modal">
          <div class="modal" data-action="noop">
            <button class="modal-close" data-action="close-modal" title="Close">&times;</button>
            {image}
            <h2>{}</h2>
            <p>{}</p>
            <dl class="badge-details">
              <dt>Category</dt><dd>{}</dd>
              <dt>Level</dt><dd>{}</dd>
              <dt>Issued On</dt><dd>{}</dd>
              <dt>Badge ID</dt><dd class="mono">{}</dd>
            </dl>
            <div class="share">
              <span>Share this badge</span>
              <button data-action="share-copy" title="Copy link">Copy link</button>
              <button data-action="share-twitter" title="Share on Twitter">Twitter</button>
              <button data-action="share-linkedin" title="Share on LinkedIn">LinkedIn</button>
            </div>
            <button class="secondary" data-action="close-modal">Close</button>
          </div>
        </div>"#,
        escape(&details.name),
        escape(&details.description),
        escape(&details.category),
        escape(&details.level),
        escape(&details.date),
        escape(&details.short_id)
    )
}

fn home() -> String {
    r#"<section class="hero">
      <h1>SkillSync</h1>
      <p>Mint and showcase verifiable skill badges on the blockchain. Connect your wallet to get started.</p>
      <div class="features">
        <div><h3>Connect</h3><p>Securely connect your Web3 wallet to begin your journey.</p></div>
        <div><h3>Earn</h3><p>Earn verifiable skill badges by completing challenges.</p></div>
        <div><h3>Showcase</h3><p>Display your achievements and build your reputation.</p></div>
      </div>
    </section>"#
        .to_owned()
}

fn dashboard(page: &DashboardController) -> String {
    let header = format!(
        r#"<h1>My Dashboard</h1><p>Connected wallet: <span class="mono">{}</span></p>"#,
        escape(&page.wallet_label().unwrap_or_default())
    );
    let body = match page.state() {
        ViewState::NotMounted => String::new(),
        ViewState::Loading => spinner().to_owned(),
        ViewState::Error(message) => error_panel(message),
        ViewState::Empty => {
            let (label, route) = page.empty_action();
            format!(
                r#"<div class="panel"><h3>No badges yet</h3><p>Get started by minting your first skill badge.</p>
                   <button class="primary" {}>{label}</button></div>"#,
                route_attr(route)
            )
        }
        ViewState::Populated(badges) => badge_grid(badges),
    };
    format!("{header}{body}")
}

fn mint(page: &MintController) -> String {
    let levels: String = BadgeLevel::ALL
        .into_iter()
        .map(|level| {
            format!(
                r#"<div class="level{}" data-action="select-level" data-level="{}">
                  <span class="level-icon">{}</span>
                  <div><h4>{}</h4><p>{}</p></div>
                </div>"#,
                if level == page.selected() { " level--selected" } else { "" },
                level.id(),
                level.icon(),
                level.display_name(),
                level.description()
            )
        })
        .collect();
    let button = if page.is_minting() {
        r#"<button id="mintButton" class="primary" disabled>Minting...</button>"#
    } else {
        r#"<button id="mintButton" class="primary" data-action="mint">Mint Badge</button>"#
    };

    format!(
        r#"<section class="panel mint">
          <h1>Mint New Badge</h1>
          <p>Earn a verifiable skill badge by completing this challenge.</p>
          <h2>Web3 Developer Badge</h2>
          <p>This badge verifies your skills in Web3 development, including smart contracts,
             decentralized applications, and blockchain fundamentals.</p>
          <h3>Select Badge Level</h3>
          <p class="hint">Choose the level that best matches your skills</p>
          <div class="levels">{levels}</div>
          <h3>Requirements</h3>
          <ul>
            <li>Complete a smart contract challenge</li>
            <li>Deploy a dApp to a testnet</li>
            <li>Verify your identity with a wallet signature</li>
          </ul>
          {button}
        </section>"#
    )
}

fn gallery(page: &GalleryController) -> String {
    let options: String = page
        .categories()
        .iter()
        .map(|category| {
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                escape(category),
                if category == page.category() { " selected" } else { "" }
            )
        })
        .collect();
    format!(
        r#"<h1>Badge Gallery</h1>
        <p>Explore skill badges earned by the community</p>
        <div class="filters">
          <input id="gallerySearch" placeholder="Search badges..." value="{}" />
          <select id="galleryCategory">{options}</select>
        </div>
        <div id="galleryResults">{}</div>"#,
        escape(page.search()),
        gallery_results(page)
    )
}

fn gallery_results(page: &GalleryController) -> String {
    match page.visible() {
        ViewState::NotMounted => String::new(),
        ViewState::Loading => spinner().to_owned(),
        ViewState::Error(message) => error_panel(&message),
        ViewState::Empty => r#"<div class="panel"><h3>No badges found</h3>
            <p>Try adjusting your search or filter criteria</p></div>"#
            .to_owned(),
        ViewState::Populated(badges) => badge_grid(badges),
    }
}

fn medal_class(medal: Option<Medal>) -> &'static str {
    match medal {
        Some(Medal::Gold) => "rank rank--gold",
        Some(Medal::Silver) => "rank rank--silver",
        Some(Medal::Bronze) => "rank rank--bronze",
        None => "rank",
    }
}

fn leaderboard_row(row: &LeaderboardRow) -> String {
    format!(
        r#"<div class="leader">
          <div class="{}">{}</div>
          <div class="leader-name"><div>{}</div><div class="mono">{}</div></div>
          <span class="leader-count">{} badges</span>
          <span class="leader-change">{}</span>
        </div>"#,
        medal_class(row.medal),
        row.entry.rank,
        escape(&row.entry.name),
        escape(&row.entry.wallet),
        row.entry.badge_count,
        row.change
    )
}

fn leaderboard(page: &LeaderboardController) -> String {
    let body = match page.state() {
        ViewState::NotMounted => String::new(),
        ViewState::Loading => spinner().to_owned(),
        ViewState::Error(message) => error_panel(message),
        ViewState::Empty => r#"<div class="panel"><p>No one has earned a badge yet.</p></div>"#.to_owned(),
        ViewState::Populated(rows) => {
            let rows: String = rows.iter().map(leaderboard_row).collect();
            let (label, route) = page.earn_more();
            format!(
                r#"<div class="leaders">{rows}</div>
                <p>Keep earning badges to climb the leaderboard!</p>
                <button class="primary" {}>{label}</button>"#,
                route_attr(route)
            )
        }
    };
    format!(r#"<h1>Leaderboard</h1><p>Top badge earners in our community</p>{body}"#)
}

fn profile_input(id: &str, field: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{id}">{label}</label><input id="{id}" data-field="{field}" value="{}" />"#,
        escape(value)
    )
}

fn profile(page: &ProfileController, connection: &WalletConnection) -> String {
    let data = page.profile();
    let address = connection.address().map(|a| a.short()).unwrap_or_default();
    let mut links = String::new();
    if let Some(website) = page.website_url() {
        links.push_str(&format!(
            r#"<a href="{0}" target="_blank" rel="noopener">{0}</a>"#,
            escape(website)
        ));
    }
    if let Some(twitter) = page.twitter_url() {
        links.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape(&twitter),
            escape(&data.twitter)
        ));
    }
    let badges = match page.badges() {
        ViewState::NotMounted => String::new(),
        ViewState::Loading => spinner().to_owned(),
        ViewState::Error(message) => error_panel(message),
        ViewState::Empty => r#"<div class="panel"><p>No badges yet.</p></div>"#.to_owned(),
        ViewState::Populated(badges) => badge_grid(badges),
    };

    format!(
        r#"<section class="profile">
          <div class="panel profile-card">
            <h1>{}</h1>
            <p class="mono">{}</p>
            <p>{}</p>
            <div class="profile-links">{links}</div>
            <p class="hint">Joined {}</p>
          </div>
          <div class="panel profile-edit">
            <h2>Edit Profile</h2>
            {}{}
            <label for="profileBio">Bio</label>
            <textarea id="profileBio" data-field="bio">{}</textarea>
            {}{}{}
            <button class="primary" data-action="save-profile">Save Profile</button>
          </div>
          <h2>My Badges</h2>
          {badges}
        </section>"#,
        escape(&data.name),
        escape(&address),
        escape(&data.bio),
        escape(&page.joined()),
        profile_input("profileName", "name", "Name", &data.name),
        profile_input("profileWebsite", "website", "Website", &data.website),
        escape(&data.bio),
        profile_input("profileTwitter", "twitter", "Twitter", &data.twitter),
        profile_input("profileLinkedin", "linkedin", "LinkedIn", &data.linkedin),
        profile_input("profileGithub", "github", "GitHub", &data.github),
    )
}

pub fn toast(els: &Elements, notification: &Notification) {
    let class = match notification.variant {
        NotificationVariant::Default => "toast",
        NotificationVariant::Destructive => "toast toast--destructive",
    };
    let action = notification
        .action
        .as_ref()
        .map(|action| {
            format!(
                r#"<button {}>{}</button>"#,
                route_attr(action.route),
                escape(&action.label)
            )
        })
        .unwrap_or_default();
    let html = format!(
        r#"<div class="{class}"><strong>{}</strong><p>{}</p>{action}</div>"#,
        escape(&notification.title),
        escape(&notification.description)
    );
    dom::set_inner_html(&els.toasts, &html);

    let toasts = els.toasts.clone();
    gloo_timers::callback::Timeout::new(5_000, move || toasts.set_inner_html("")).forget();
}
