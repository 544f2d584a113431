//! List pane: warehouse cards grouped by availability and sorted by distance.

use chrono::{DateTime, TimeZone, Utc};
use stockmap_core::format::{count_noun, format_distance};
use stockmap_core::{InventoryResponse, StockStatus, Warehouse};

use crate::restock::{build_restock_widget, RestockWidget};
use crate::update::ViewUpdate;

pub const OUT_OF_STOCK_DIVIDER: &str = "Out of Stock Locations";
pub const NO_STOCK_NOTICE: &str = "No stock in your area right now";
pub const EMPTY_STATE_MESSAGE: &str = "No warehouses found. Try a larger radius.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub name: String,
    pub item_number: String,
    pub status: StockStatus,
}

impl ProductRow {
    /// Badge class: `in-stock`, `low-stock` or `out-of-stock`.
    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        self.status.css_class()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseCard {
    /// Warehouse number; matches the marker key.
    pub key: String,
    pub name: String,
    pub status: StockStatus,
    pub distance: String,
    pub maps_link: String,
    pub phone: Option<String>,
    /// Digits-only `tel:` target; `None` disables the call link.
    pub dial_target: Option<String>,
    pub products: Vec<ProductRow>,
    pub restock: Option<RestockWidget>,
}

impl WarehouseCard {
    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.status == StockStatus::OutOfStock
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Card(WarehouseCard),
    Divider(&'static str),
    NoStockNotice(&'static str),
}

/// Everything the list pane shows after a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub items: Vec<ListItem>,
    pub summary: Option<String>,
    pub empty_state_visible: bool,
}

impl ListView {
    pub fn cards(&self) -> impl Iterator<Item = &WarehouseCard> {
        self.items.iter().filter_map(|item| match item {
            ListItem::Card(card) => Some(card),
            _ => None,
        })
    }

    #[must_use]
    pub fn has_divider(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, ListItem::Divider(_)))
    }

    #[must_use]
    pub fn summary_visible(&self) -> bool {
        self.summary.is_some()
    }
}

/// Tracks which cards are on screen and which one is active.
#[derive(Debug, Default)]
pub struct ListController {
    card_keys: Vec<String>,
    active: Option<String>,
}

impl ListController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn has_card(&self, key: &str) -> bool {
        self.card_keys.iter().any(|k| k == key)
    }

    /// Build the list view for a fetch result, replacing any previous cards.
    pub fn render<Tz: TimeZone>(
        &mut self,
        result: &InventoryResponse,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> ListView {
        self.card_keys.clear();
        self.active = None;

        if result.warehouses.is_empty() {
            return ListView {
                items: Vec::new(),
                summary: None,
                empty_state_visible: true,
            };
        }

        let (available, unavailable) = partition_by_distance(&result.warehouses);
        let mut items = Vec::with_capacity(result.warehouses.len() + 1);

        let summary = if available.is_empty() {
            items.push(ListItem::NoStockNotice(NO_STOCK_NOTICE));
            format!(
                "{} nearby, all out of stock",
                count_noun(unavailable.len(), "warehouse")
            )
        } else {
            for w in &available {
                items.push(ListItem::Card(self.card(w, now, tz)));
            }
            if !unavailable.is_empty() {
                items.push(ListItem::Divider(OUT_OF_STOCK_DIVIDER));
                for w in &unavailable {
                    items.push(ListItem::Card(self.card(w, now, tz)));
                }
            }
            summary_text(
                available.len(),
                usize::try_from(result.total_products).unwrap_or(usize::MAX),
                unavailable.len(),
            )
        };

        tracing::debug!(
            available = available.len(),
            unavailable = unavailable.len(),
            "list rendered"
        );

        ListView {
            items,
            summary: Some(summary),
            empty_state_visible: false,
        }
    }

    /// Mark the card for `key` active, deactivating the previous one.
    ///
    /// Returns `None` when no card with that key is on screen.
    pub fn activate(&mut self, key: &str) -> Option<ViewUpdate> {
        if !self.has_card(key) {
            return None;
        }
        self.active = Some(key.to_string());
        Some(ViewUpdate::ActivateCard(key.to_string()))
    }

    fn card<Tz: TimeZone>(&mut self, w: &Warehouse, now: DateTime<Utc>, tz: &Tz) -> WarehouseCard {
        self.card_keys.push(w.warehouse_number.clone());
        WarehouseCard {
            key: w.warehouse_number.clone(),
            name: w.name.clone(),
            status: w.inventory_status,
            distance: format_distance(w.distance),
            maps_link: w.maps_link(),
            phone: w.display_phone().map(str::to_string),
            dial_target: w.dial_target(),
            products: w
                .products
                .iter()
                .map(|p| ProductRow {
                    name: p.name.clone(),
                    item_number: p.item_number.clone(),
                    status: p.stock_status,
                })
                .collect(),
            restock: build_restock_widget(w, now, tz),
        }
    }
}

/// Split into available and out-of-stock groups, each stably sorted by
/// ascending distance.
#[must_use]
pub fn partition_by_distance(warehouses: &[Warehouse]) -> (Vec<&Warehouse>, Vec<&Warehouse>) {
    let (mut available, mut unavailable): (Vec<&Warehouse>, Vec<&Warehouse>) =
        warehouses.iter().partition(|w| w.is_available());
    available.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    unavailable.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    (available, unavailable)
}

fn summary_text(available: usize, products: usize, unavailable: usize) -> String {
    let mut text = format!(
        "Found {} with {} in stock",
        count_noun(available, "warehouse"),
        count_noun(products, "product")
    );
    if unavailable > 0 {
        text.push_str(&format!(", {} out of stock", count_noun(unavailable, "location")));
    }
    text
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
