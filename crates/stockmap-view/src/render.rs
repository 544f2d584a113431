//! HTML rendering of the view models.
//!
//! Fragments mirror the markup the browser front end builds: cards carry a
//! `data-warehouse-key` attribute and popups link to directions and a phone
//! dialer. [`results_page`] assembles a standalone page with a Leaflet map.

use std::borrow::Cow;

use quick_xml::escape::escape;
use serde_json::json;

use crate::list::{ListItem, ListView, WarehouseCard, EMPTY_STATE_MESSAGE};
use crate::map::{BoundingBox, MapSurface, Marker, Popup, FIT_PADDING};
use crate::restock::{DurationLines, RestockDetail, RestockWidget};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

fn esc(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Popup body for a map marker.
#[must_use]
pub fn popup_html(popup: &Popup) -> String {
    let mut html = String::with_capacity(512);
    html.push_str("<div class=\"popup\">");
    html.push_str(&format!("<h3>{}</h3>", esc(&popup.name)));
    html.push_str(&format!(
        "<p class=\"popup-status\" style=\"color: {}\">{}</p>",
        popup.status_color,
        popup.status.label()
    ));
    if !popup.products.is_empty() {
        html.push_str("<ul class=\"popup-products\">");
        for product in &popup.products {
            html.push_str(&format!("<li>{}</li>", esc(product)));
        }
        html.push_str("</ul>");
    }
    html.push_str(&format!(
        "<a class=\"directions\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Directions</a>",
        esc(&popup.maps_link)
    ));
    if let (Some(phone), Some(dial)) = (&popup.phone, &popup.dial_target) {
        html.push_str(&format!(
            "<a class=\"call\" href=\"tel:{}\">{}</a>",
            dial,
            esc(phone)
        ));
    }
    html.push_str("</div>");
    html
}

fn duration_lines_html(lines: &DurationLines) -> String {
    match &lines.second {
        Some(second) => format!(
            "<span class=\"line\">{}</span><span class=\"line\">{}</span>",
            esc(&lines.first),
            esc(second)
        ),
        None => format!("<span class=\"line\">{}</span>", esc(&lines.first)),
    }
}

/// Restock widget markup: brand header, restock date, and the status detail.
#[must_use]
pub fn restock_widget_html(widget: &RestockWidget) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(&format!(
        "<div class=\"restock-widget {}\">",
        widget.tier.css_class()
    ));
    html.push_str(&format!(
        "<div class=\"restock-header\"><span class=\"brand\">{}</span><span class=\"tier\">{}</span></div>",
        widget.brand_label,
        widget.tier.label()
    ));
    html.push_str("<div class=\"restock-body\">");
    html.push_str(&format!(
        "<div class=\"restock-left\"><span class=\"label\">RESTOCKED</span>\
         <span class=\"date\">{} {}</span><span class=\"time\">{}</span></div>",
        widget.restocked.month,
        widget.restocked.day,
        widget.restocked.time_of_day.label()
    ));
    html.push_str("<div class=\"restock-right\">");
    if let Some(detail) = &widget.detail {
        html.push_str(&format!("<span class=\"label\">{}</span>", detail.label()));
        match detail {
            RestockDetail::OutOfStock { since, lasted } => {
                html.push_str(&format!(
                    "<span class=\"date\">{} {}</span><span class=\"time\">{}</span>",
                    since.month,
                    since.day,
                    since.time_of_day.label()
                ));
                if let Some(lines) = lasted {
                    html.push_str(&format!(
                        "<span class=\"label\">IN STOCK FOR</span><span class=\"lasted\">{}</span>",
                        duration_lines_html(lines)
                    ));
                }
            }
            RestockDetail::UsuallyLasts(lines) | RestockDetail::InStockFor(lines) => {
                html.push_str(&duration_lines_html(lines));
            }
        }
    }
    html.push_str("</div></div></div>");
    html
}

/// One warehouse card.
#[must_use]
pub fn card_html(card: &WarehouseCard) -> String {
    let mut html = String::with_capacity(1024);
    let class = if card.is_out_of_stock() {
        "warehouse-card out-of-stock"
    } else {
        "warehouse-card"
    };
    html.push_str(&format!(
        "<article class=\"{class}\" data-warehouse-key=\"{}\">",
        esc(&card.key)
    ));
    html.push_str(&format!(
        "<header><h3>{}</h3><span class=\"distance\">{}</span>\
         <span class=\"status-badge {}\">{}</span></header>",
        esc(&card.name),
        card.distance,
        card.status.css_class(),
        card.status.label()
    ));
    if let Some(widget) = &card.restock {
        html.push_str(&restock_widget_html(widget));
    }
    if !card.products.is_empty() {
        html.push_str("<ul class=\"products\">");
        for product in &card.products {
            html.push_str(&format!(
                "<li><span class=\"product-name\">{}</span>\
                 <span class=\"item-number\">#{}</span>\
                 <span class=\"badge {}\">{}</span></li>",
                esc(&product.name),
                esc(&product.item_number),
                product.badge_class(),
                product.status.label()
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str("<footer>");
    html.push_str(&format!(
        "<a class=\"directions\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Directions</a>",
        esc(&card.maps_link)
    ));
    match (&card.phone, &card.dial_target) {
        (Some(phone), Some(dial)) => html.push_str(&format!(
            "<a class=\"call\" href=\"tel:{dial}\">{}</a>",
            esc(phone)
        )),
        _ => html.push_str("<span class=\"call disabled\">No phone</span>"),
    }
    html.push_str("</footer></article>");
    html
}

/// Summary line, empty state and every list item.
#[must_use]
pub fn list_html(view: &ListView) -> String {
    let mut html = String::with_capacity(4096);
    if let Some(summary) = &view.summary {
        html.push_str(&format!("<p class=\"results-summary\">{}</p>\n", esc(summary)));
    }
    if view.empty_state_visible {
        html.push_str(&format!(
            "<div class=\"empty-state\">{EMPTY_STATE_MESSAGE}</div>\n"
        ));
    }
    for item in &view.items {
        match item {
            ListItem::Card(card) => html.push_str(&card_html(card)),
            ListItem::Divider(text) => {
                html.push_str(&format!("<div class=\"divider\">{text}</div>"));
            }
            ListItem::NoStockNotice(text) => {
                html.push_str(&format!("<div class=\"no-stock-notice\">{text}</div>"));
            }
        }
        html.push('\n');
    }
    html
}

/// JSON payload the results page script reads to build the map.
#[must_use]
pub fn map_payload(
    surface: &MapSurface,
    markers: &[Marker],
    bounds: Option<BoundingBox>,
) -> serde_json::Value {
    json!({
        "center": [surface.center.lat, surface.center.lng],
        "zoom": surface.zoom,
        "tiles": {
            "url": surface.tile_layer.url_template,
            "attribution": surface.tile_layer.attribution,
            "maxZoom": surface.tile_layer.max_zoom,
        },
        "padding": [FIT_PADDING.0, FIT_PADDING.1],
        "bounds": bounds.map(|b| [[b.south, b.west], [b.north, b.east]]),
        "markers": markers
            .iter()
            .map(|m| json!({
                "key": m.key,
                "lat": m.position.lat,
                "lng": m.position.lng,
                "color": m.color,
                "popup": popup_html(&m.popup),
            }))
            .collect::<Vec<_>>(),
    })
}

/// Standalone results page: list pane plus a Leaflet map with one circle
/// marker per available warehouse.
#[must_use]
pub fn results_page(
    title: &str,
    view: &ListView,
    surface: &MapSurface,
    markers: &[Marker],
    bounds: Option<BoundingBox>,
) -> String {
    // "</" inside the inline script would close it early.
    let payload = map_payload(surface, markers, bounds)
        .to_string()
        .replace("</", "<\\/");

    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", esc(title)));
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n"));
    html.push_str("<style>\n");
    html.push_str("body { font-family: system-ui, sans-serif; margin: 0; display: flex; height: 100vh; }\n");
    html.push_str("#list { width: 420px; overflow-y: auto; padding: 16px; box-sizing: border-box; }\n");
    html.push_str("#map { flex: 1; }\n");
    html.push_str(".warehouse-card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px; margin-bottom: 12px; cursor: pointer; }\n");
    html.push_str(".warehouse-card.active { border-color: #2563eb; box-shadow: 0 0 0 2px #bfdbfe; }\n");
    html.push_str(".warehouse-card.out-of-stock { opacity: 0.6; }\n");
    html.push_str(".badge.in-stock, .status-badge.in-stock { color: #059669; }\n");
    html.push_str(".badge.low-stock, .status-badge.low-stock { color: #d97706; }\n");
    html.push_str(".badge.out-of-stock, .status-badge.out-of-stock { color: #dc2626; }\n");
    html.push_str(".restock-widget { display: flex; flex-direction: column; font-size: 0.8em; margin: 8px 0; }\n");
    html.push_str(".restock-widget .line { display: block; }\n");
    html.push_str(".divider { font-weight: 600; margin: 16px 0 8px; }\n");
    html.push_str("@media (max-width: 1024px) { body { flex-direction: column; } #list { width: 100%; height: 50vh; } }\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<section id=\"list\">\n<h1>{}</h1>\n",
        esc(title)
    ));
    html.push_str(&list_html(view));
    html.push_str("</section>\n<div id=\"map\"></div>\n");
    html.push_str(&format!("<script src=\"{LEAFLET_JS}\"></script>\n"));
    html.push_str(&format!(
        "<script id=\"map-data\" type=\"application/json\">{payload}</script>\n"
    ));
    html.push_str(MAP_SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

const MAP_SCRIPT: &str = r#"<script>
const data = JSON.parse(document.getElementById('map-data').textContent);
const map = L.map('map').setView(data.center, data.zoom);
L.tileLayer(data.tiles.url, { attribution: data.tiles.attribution, maxZoom: data.tiles.maxZoom }).addTo(map);
const cards = document.querySelectorAll('[data-warehouse-key]');
const activate = (key) => cards.forEach((c) => c.classList.toggle('active', c.dataset.warehouseKey === key));
const markers = {};
for (const m of data.markers) {
  const marker = L.circleMarker([m.lat, m.lng], { radius: 10, color: '#fff', weight: 2, fillColor: m.color, fillOpacity: 0.9 })
    .bindPopup(m.popup)
    .addTo(map);
  marker.on('click', () => {
    activate(m.key);
    document.querySelector(`[data-warehouse-key="${m.key}"]`)?.scrollIntoView({ behavior: 'smooth', block: 'nearest' });
  });
  markers[m.key] = marker;
}
cards.forEach((card) => card.addEventListener('click', () => {
  activate(card.dataset.warehouseKey);
  markers[card.dataset.warehouseKey]?.openPopup();
}));
if (data.bounds) {
  map.fitBounds(data.bounds, { padding: data.padding });
}
</script>
"#;
