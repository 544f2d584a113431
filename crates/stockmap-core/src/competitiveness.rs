//! Restock competitiveness classification.
//!
//! Out-of-stock warehouses are judged by how long their last batch lasted;
//! everything else by how long ago the latest restock happened.

use chrono::{DateTime, Utc};

use crate::format::{elapsed_hours, parse_duration_hours};
use crate::model::{StockStatus, Warehouse};

/// How quickly a product sells out or how recently it restocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompetitivenessTier {
    HighlyCompetitive,
    Competitive,
    LessCompetitive,
}

impl CompetitivenessTier {
    /// CSS class of the tier badge.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            CompetitivenessTier::HighlyCompetitive => "highly-competitive",
            CompetitivenessTier::Competitive => "competitive",
            CompetitivenessTier::LessCompetitive => "less-competitive",
        }
    }

    /// Badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompetitivenessTier::HighlyCompetitive => "HIGHLY COMPETITIVE",
            CompetitivenessTier::Competitive => "COMPETITIVE",
            CompetitivenessTier::LessCompetitive => "LESS COMPETITIVE",
        }
    }
}

/// Tier for a sold-out item from how many hours it stayed in stock.
#[must_use]
pub fn tier_for_duration_hours(hours: u32) -> CompetitivenessTier {
    if hours < 24 {
        CompetitivenessTier::HighlyCompetitive
    } else if hours < 48 {
        CompetitivenessTier::Competitive
    } else {
        CompetitivenessTier::LessCompetitive
    }
}

/// Tier for an item still on shelves from hours elapsed since restock.
/// Items in stock never rank as highly competitive.
#[must_use]
pub fn tier_for_elapsed_hours(hours: f64) -> CompetitivenessTier {
    if hours < 36.0 {
        CompetitivenessTier::Competitive
    } else {
        CompetitivenessTier::LessCompetitive
    }
}

/// Classify a warehouse, or `None` when the historic data needed is missing.
#[must_use]
pub fn classify(warehouse: &Warehouse, now: DateTime<Utc>) -> Option<CompetitivenessTier> {
    let historic = warehouse.historic.as_ref()?;
    let latest_restock = historic.latest_restock?;

    if warehouse.inventory_status == StockStatus::OutOfStock {
        let text = historic.duration_text()?;
        Some(tier_for_duration_hours(parse_duration_hours(Some(text))))
    } else {
        Some(tier_for_elapsed_hours(elapsed_hours(latest_restock, now)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::model::{Coordinates, Historic};

    fn warehouse(status: StockStatus, historic: Option<Historic>) -> Warehouse {
        Warehouse {
            warehouse_number: "1".to_string(),
            name: "Test".to_string(),
            coordinates: Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
            inventory_status: status,
            distance: 1.0,
            phone: None,
            products: Vec::new(),
            historic,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sold_out_after(duration: &str) -> Warehouse {
        warehouse(
            StockStatus::OutOfStock,
            Some(Historic {
                latest_restock: Some(now() - Duration::days(3)),
                became_out_of_stock: None,
                duration_in_stock: Some(duration.to_string()),
            }),
        )
    }

    fn restocked_hours_ago(status: StockStatus, hours: i64) -> Warehouse {
        warehouse(
            status,
            Some(Historic {
                latest_restock: Some(now() - Duration::hours(hours)),
                ..Historic::default()
            }),
        )
    }

    #[test]
    fn out_of_stock_short_duration_is_highly_competitive() {
        assert_eq!(
            classify(&sold_out_after("10 hours"), now()),
            Some(CompetitivenessTier::HighlyCompetitive)
        );
    }

    #[test]
    fn out_of_stock_medium_duration_is_competitive() {
        assert_eq!(
            classify(&sold_out_after("1 day 6 hours"), now()),
            Some(CompetitivenessTier::Competitive)
        );
    }

    #[test]
    fn out_of_stock_long_duration_is_less_competitive() {
        assert_eq!(
            classify(&sold_out_after("2 days and 12 hours"), now()),
            Some(CompetitivenessTier::LessCompetitive)
        );
    }

    #[test]
    fn out_of_stock_without_duration_is_unclassified() {
        let w = warehouse(
            StockStatus::OutOfStock,
            Some(Historic {
                latest_restock: Some(now()),
                ..Historic::default()
            }),
        );
        assert_eq!(classify(&w, now()), None);
    }

    #[test]
    fn in_stock_recent_restock_is_competitive() {
        assert_eq!(
            classify(&restocked_hours_ago(StockStatus::InStock, 20), now()),
            Some(CompetitivenessTier::Competitive)
        );
    }

    #[test]
    fn in_stock_old_restock_is_less_competitive() {
        assert_eq!(
            classify(&restocked_hours_ago(StockStatus::InStock, 40), now()),
            Some(CompetitivenessTier::LessCompetitive)
        );
    }

    #[test]
    fn low_stock_follows_in_stock_rules() {
        assert_eq!(
            classify(&restocked_hours_ago(StockStatus::LowStock, 20), now()),
            Some(CompetitivenessTier::Competitive)
        );
    }

    #[test]
    fn missing_historic_or_restock_is_unclassified() {
        assert_eq!(classify(&warehouse(StockStatus::InStock, None), now()), None);
        let w = warehouse(StockStatus::InStock, Some(Historic::default()));
        assert_eq!(classify(&w, now()), None);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for_duration_hours(23), CompetitivenessTier::HighlyCompetitive);
        assert_eq!(tier_for_duration_hours(24), CompetitivenessTier::Competitive);
        assert_eq!(tier_for_duration_hours(48), CompetitivenessTier::LessCompetitive);
        assert_eq!(tier_for_elapsed_hours(35.9), CompetitivenessTier::Competitive);
        assert_eq!(tier_for_elapsed_hours(36.0), CompetitivenessTier::LessCompetitive);
    }
}
