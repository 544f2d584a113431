//! Restock widget embedded in each warehouse card.

use chrono::{DateTime, TimeZone, Utc};
use stockmap_core::format::{
    and_to_comma, bucket_date, elapsed_hours, format_elapsed, split_first_comma, DateBucket,
};
use stockmap_core::{classify, CompetitivenessTier, StockStatus, Warehouse};

/// Fixed label shown in the widget header.
pub const BRAND_LABEL: &str = "RESTOCK RADAR";

/// A duration split for display: everything before the first comma, then
/// the remainder on a second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationLines {
    pub first: String,
    pub second: Option<String>,
}

impl DurationLines {
    fn from_text(text: &str) -> Self {
        let (first, second) = split_first_comma(text);
        Self { first, second }
    }
}

/// Right-hand section of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestockDetail {
    /// Sold out: when it sold out and, if known, how long the batch lasted.
    OutOfStock {
        since: DateBucket,
        lasted: Option<DurationLines>,
    },
    /// On shelves, with a historic figure for how long stock usually lasts.
    UsuallyLasts(DurationLines),
    /// On shelves, with time elapsed since the restock.
    InStockFor(DurationLines),
}

impl RestockDetail {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RestockDetail::OutOfStock { .. } => "OUT OF STOCK",
            RestockDetail::UsuallyLasts(_) => "STOCK USUALLY LASTS FOR",
            RestockDetail::InStockFor(_) => "IN STOCK FOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockWidget {
    pub brand_label: &'static str,
    pub tier: CompetitivenessTier,
    pub restocked: DateBucket,
    /// `None` for a sold-out warehouse with no sold-out timestamp.
    pub detail: Option<RestockDetail>,
}

/// Build the restock widget for a card, or `None` when there is no historic
/// data to show.
///
/// `tz` is the viewer's time zone; date buckets are computed in it.
#[must_use]
pub fn build_restock_widget<Tz: TimeZone>(
    warehouse: &Warehouse,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<RestockWidget> {
    let historic = warehouse.historic.as_ref()?;
    let latest_restock = historic.latest_restock?;
    let tier = classify(warehouse, now)?;

    let detail = if warehouse.inventory_status == StockStatus::OutOfStock {
        historic
            .became_out_of_stock
            .map(|sold_out| RestockDetail::OutOfStock {
                since: bucket_date(sold_out, tz),
                lasted: historic
                    .duration_text()
                    .map(|d| DurationLines::from_text(&and_to_comma(d))),
            })
    } else if let Some(text) = historic.duration_text() {
        Some(RestockDetail::UsuallyLasts(DurationLines::from_text(
            &and_to_comma(&text.to_uppercase()),
        )))
    } else {
        let elapsed = format_elapsed(elapsed_hours(latest_restock, now));
        Some(RestockDetail::InStockFor(DurationLines::from_text(
            &elapsed.to_uppercase(),
        )))
    };

    Some(RestockWidget {
        brand_label: BRAND_LABEL,
        tier,
        restocked: bucket_date(latest_restock, tz),
        detail,
    })
}
