//! Command handlers for the CLI.
//!
//! Each handler drives a [`Session`] the same way the browser front end
//! does, then prints or writes what the view updates describe. An alert from
//! the session becomes the command's error.

use std::path::Path;

use stockmap_client::InventoryClient;
use stockmap_core::AppConfig;
use stockmap_export::{load_styles, StyleTable};
use stockmap_view::render::results_page;
use stockmap_view::session::ACCESS_CODE_KEY;
use stockmap_view::{
    Command, FileStore, KeyValueStore, ListItem, ListView, RestockDetail, Session, ViewUpdate,
    WarehouseCard,
};

fn load_style_table(config: &AppConfig) -> anyhow::Result<StyleTable> {
    match &config.export_styles_path {
        Some(path) => load_styles(path).map_err(|e| anyhow::anyhow!("invalid export styles: {e}")),
        None => Ok(StyleTable::default()),
    }
}

fn open_session(config: &AppConfig) -> anyhow::Result<Session<FileStore>> {
    let styles = load_style_table(config)?;
    let storage = FileStore::new(&config.storage_path);
    Ok(Session::new(storage, styles, config.narrow_viewport_px))
}

/// The identifier to search with: the `--user` flag, else the saved one.
pub(crate) fn resolve_user<S: KeyValueStore>(
    storage: &S,
    user: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(user) = user.map(str::trim).filter(|u| !u.is_empty()) {
        return Ok(user.to_string());
    }
    storage
        .get(ACCESS_CODE_KEY)?
        .filter(|saved| !saved.is_empty())
        .ok_or_else(|| anyhow::anyhow!("no --user given and no saved access code"))
}

fn first_alert(updates: &[ViewUpdate]) -> Option<&str> {
    updates.iter().find_map(|u| match u {
        ViewUpdate::Alert(message) => Some(message.as_str()),
        _ => None,
    })
}

async fn fetch(
    config: &AppConfig,
    session: &mut Session<FileStore>,
    user: Option<&str>,
    radius: u32,
) -> anyhow::Result<Vec<ViewUpdate>> {
    session.start();
    let user = resolve_user(session.storage(), user)?;
    let client = InventoryClient::new(&config.inventory_url, &config.inventory_token)
        .map_err(|e| anyhow::anyhow!("failed to build inventory client: {e}"))?;

    let updates = session.submit(&client, &user, radius).await;
    if let Some(alert) = first_alert(&updates) {
        anyhow::bail!("{alert}");
    }
    Ok(updates)
}

/// Search and print the list; optionally write the HTML results page.
///
/// # Errors
///
/// Returns an error if no identifier is available, the fetch fails, or the
/// HTML file cannot be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    user: Option<&str>,
    radius: u32,
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    let updates = fetch(config, &mut session, user, radius).await?;

    let Some(view) = updates.iter().find_map(|u| match u {
        ViewUpdate::RenderList(view) => Some(view),
        _ => None,
    }) else {
        anyhow::bail!("search produced no result list");
    };
    print!("{}", list_text(view));

    if let Some(path) = html {
        let title = format!("Warehouses within {} mi", session.radius().value);
        let map = session.map();
        let page = results_page(&title, view, map.surface(), map.markers(), map.bounds());
        std::fs::write(path, page)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
        println!("wrote results page to {}", path.display());
    }
    Ok(())
}

/// Search and write the dated KML export into `out_dir`.
///
/// # Errors
///
/// Returns an error if the fetch fails, nothing is in stock, or the file
/// cannot be written.
pub(crate) async fn run_export(
    config: &AppConfig,
    user: Option<&str>,
    radius: u32,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    fetch(config, &mut session, user, radius).await?;

    let today = chrono::Local::now().date_naive();
    let updates = session.dispatch(Command::Export { today });
    if let Some(alert) = first_alert(&updates) {
        anyhow::bail!("{alert}");
    }

    for update in updates {
        if let ViewUpdate::Download {
            file_name, content, ..
        } = update
        {
            std::fs::create_dir_all(out_dir)
                .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", out_dir.display()))?;
            let path = out_dir.join(&file_name);
            std::fs::write(&path, content)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), "export written");
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Print the style table the export would use.
///
/// # Errors
///
/// Returns an error if the configured styles file is invalid.
pub(crate) fn run_styles(config: &AppConfig) -> anyhow::Result<()> {
    let styles = load_style_table(config)?;
    print!("{}", serde_yaml::to_string(&styles)?);
    Ok(())
}

/// Plain-text rendering of the result list.
pub(crate) fn list_text(view: &ListView) -> String {
    if view.empty_state_visible {
        return format!("{}\n", stockmap_view::list::EMPTY_STATE_MESSAGE);
    }

    let mut out = String::new();
    if let Some(summary) = &view.summary {
        out.push_str(summary);
        out.push_str("\n\n");
    }
    for item in &view.items {
        match item {
            ListItem::Card(card) => out.push_str(&card_text(card)),
            ListItem::Divider(text) => out.push_str(&format!("-- {text} --\n\n")),
            ListItem::NoStockNotice(text) => out.push_str(&format!("{text}\n")),
        }
    }
    out
}

fn card_text(card: &WarehouseCard) -> String {
    let mut out = format!(
        "{} (#{})  {}  [{}]\n",
        card.name,
        card.key,
        card.distance,
        card.status.label()
    );
    if let Some(widget) = &card.restock {
        out.push_str(&format!(
            "  {}  {}  restocked {} {} {}",
            widget.brand_label,
            widget.tier.label(),
            widget.restocked.month,
            widget.restocked.day,
            widget.restocked.time_of_day.label()
        ));
        match &widget.detail {
            Some(RestockDetail::OutOfStock { since, lasted }) => {
                out.push_str(&format!(
                    "  sold out {} {} {}",
                    since.month,
                    since.day,
                    since.time_of_day.label()
                ));
                if let Some(lines) = lasted {
                    out.push_str(&format!("  in stock for {}", lines.first));
                    if let Some(second) = &lines.second {
                        out.push_str(&format!(", {second}"));
                    }
                }
            }
            Some(detail @ (RestockDetail::UsuallyLasts(lines) | RestockDetail::InStockFor(lines))) => {
                out.push_str(&format!("  {} {}", detail.label().to_lowercase(), lines.first));
                if let Some(second) = &lines.second {
                    out.push_str(&format!(", {second}"));
                }
            }
            None => {}
        }
        out.push('\n');
    }
    for product in &card.products {
        out.push_str(&format!(
            "  - {} (#{}) {}\n",
            product.name,
            product.item_number,
            product.status.label()
        ));
    }
    if let Some(phone) = &card.phone {
        out.push_str(&format!("  phone: {phone}\n"));
    }
    out.push_str(&format!("  directions: {}\n\n", card.maps_link));
    out
}
