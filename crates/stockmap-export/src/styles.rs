use std::path::Path;

use serde::{Deserialize, Serialize};
use stockmap_core::StockStatus;

use crate::ExportError;

/// Icon styling for one placemark status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// `Style/@id`, referenced from placemarks as `#<id>`.
    pub id: String,
    /// KML `aabbggrr` color.
    pub color: String,
    pub icon_href: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

/// The two placemark styles used by the export: in stock and low stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    pub in_stock: MarkerStyle,
    pub low_stock: MarkerStyle,
}

impl Default for StyleTable {
    /// Green for in stock, amber for low stock, matching the map markers
    /// (`#059669` and `#d97706` converted to KML byte order).
    fn default() -> Self {
        Self {
            in_stock: MarkerStyle {
                id: "inStock".to_string(),
                color: "ff699605".to_string(),
                icon_href: "https://maps.google.com/mapfiles/kml/paddle/grn-circle.png"
                    .to_string(),
                scale: default_scale(),
            },
            low_stock: MarkerStyle {
                id: "lowStock".to_string(),
                color: "ff0677d9".to_string(),
                icon_href: "https://maps.google.com/mapfiles/kml/paddle/ylw-circle.png"
                    .to_string(),
                scale: default_scale(),
            },
        }
    }
}

impl StyleTable {
    /// Style for an available status; `None` for out of stock, which is never
    /// exported.
    #[must_use]
    pub fn for_status(&self, status: StockStatus) -> Option<&MarkerStyle> {
        match status {
            StockStatus::InStock => Some(&self.in_stock),
            StockStatus::LowStock => Some(&self.low_stock),
            StockStatus::OutOfStock => None,
        }
    }

    fn validate(&self) -> Result<(), ExportError> {
        for style in [&self.in_stock, &self.low_stock] {
            if style.id.trim().is_empty() {
                return Err(ExportError::Validation(
                    "style id must be non-empty".to_string(),
                ));
            }
            if style.color.len() != 8 || !style.color.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ExportError::Validation(format!(
                    "style '{}' has invalid color '{}'; expected 8 hex digits (aabbggrr)",
                    style.id, style.color
                )));
            }
            if !(style.scale.is_finite() && style.scale > 0.0) {
                return Err(ExportError::Validation(format!(
                    "style '{}' has invalid scale {}",
                    style.id, style.scale
                )));
            }
        }
        if self.in_stock.id == self.low_stock.id {
            return Err(ExportError::Validation(format!(
                "in_stock and low_stock share style id '{}'",
                self.in_stock.id
            )));
        }
        Ok(())
    }
}

fn default_scale() -> f64 {
    1.1
}

/// Load and validate a style table from a YAML file.
///
/// # Errors
///
/// Returns `ExportError` if the file cannot be read, parsed, or fails validation.
pub fn load_styles(path: &Path) -> Result<StyleTable, ExportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ExportError::StylesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_styles(&content)
}

fn parse_styles(content: &str) -> Result<StyleTable, ExportError> {
    let table: StyleTable = serde_yaml::from_str(content)?;
    table.validate()?;
    Ok(table)
}
