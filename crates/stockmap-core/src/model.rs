//! Inventory response types for the warehouse search endpoint.
//!
//! ## Observed shape
//!
//! ### Identifiers
//! `warehouseNumber` and `itemNumber` arrive as JSON numbers from some
//! regions and as strings from others. Both are opaque display keys, so they
//! are normalised to `String` on the way in.
//!
//! ### Status strings
//! Statuses are lowercase, space-separated phrases: `"in stock"`,
//! `"low stock"`, `"out of stock"`. Hyphenated and underscored spellings are
//! accepted as aliases.
//!
//! ### Historic timestamps
//! Usually RFC 3339 with an offset. Naive timestamps are read as UTC.
//! Unparseable or empty values become `None` rather than failing the whole
//! response, so a bad timestamp only hides the restock widget.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stock classification used both for a warehouse's aggregate status and for
/// each product inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "in stock", alias = "in-stock", alias = "in_stock")]
    InStock,
    #[serde(rename = "low stock", alias = "low-stock", alias = "low_stock")]
    LowStock,
    #[serde(
        rename = "out of stock",
        alias = "out-of-stock",
        alias = "out_of_stock"
    )]
    OutOfStock,
}

impl StockStatus {
    /// Human-readable label, exactly as the endpoint spells it.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "in stock",
            StockStatus::LowStock => "low stock",
            StockStatus::OutOfStock => "out of stock",
        }
    }

    /// CSS class used by badges and cards.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    /// `true` for in-stock and low-stock.
    #[must_use]
    pub fn is_available(self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level response from the inventory endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    /// Absent or `null` is treated the same as an empty list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub total_warehouses: u32,
    #[serde(default)]
    pub total_products: u32,
}

impl InventoryResponse {
    /// Warehouses with in-stock or low-stock status, in response order.
    pub fn available(&self) -> impl Iterator<Item = &Warehouse> {
        self.warehouses.iter().filter(|w| w.is_available())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A physical warehouse returned by a radius search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    /// Unique within one result set; used to link cards and markers.
    #[serde(deserialize_with = "string_or_number")]
    pub warehouse_number: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub inventory_status: StockStatus,
    /// Miles from the search origin.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    #[serde(default)]
    pub historic: Option<Historic>,
}

impl Warehouse {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.inventory_status.is_available()
    }

    /// Google Maps search link for the warehouse coordinates.
    #[must_use]
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.coordinates.latitude, self.coordinates.longitude
        )
    }

    /// Digits-only dial target, or `None` when there is no usable phone.
    #[must_use]
    pub fn dial_target(&self) -> Option<String> {
        let digits: String = self
            .phone
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            None
        } else {
            Some(digits)
        }
    }

    /// Phone number with surrounding whitespace removed; blank is `None`.
    #[must_use]
    pub fn display_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub item_number: String,
    pub stock_status: StockStatus,
}

/// Past restock metadata attached to a warehouse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Historic {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub latest_restock: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub became_out_of_stock: Option<DateTime<Utc>>,
    /// Free-form text such as `"2 days and 3 hours"`.
    #[serde(default)]
    pub duration_in_stock: Option<String>,
}

impl Historic {
    /// Duration text with blank values treated as absent.
    #[must_use]
    pub fn duration_text(&self) -> Option<&str> {
        self.duration_in_stock
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Parse an RFC 3339 timestamp, falling back to naive formats read as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
