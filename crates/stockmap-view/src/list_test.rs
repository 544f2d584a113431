use stockmap_core::{Coordinates, Product};

use super::*;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T18:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn warehouse(key: &str, status: StockStatus, distance: f64) -> Warehouse {
    Warehouse {
        warehouse_number: key.to_string(),
        name: format!("Warehouse {key}"),
        coordinates: Coordinates {
            latitude: 47.0,
            longitude: -122.0,
        },
        inventory_status: status,
        distance,
        phone: None,
        products: Vec::new(),
        historic: None,
    }
}

fn response(warehouses: Vec<Warehouse>, total_products: u32) -> InventoryResponse {
    InventoryResponse {
        total_warehouses: u32::try_from(warehouses.len()).unwrap(),
        total_products,
        warehouses,
    }
}

fn card_keys(view: &ListView) -> Vec<&str> {
    view.cards().map(|c| c.key.as_str()).collect()
}

#[test]
fn empty_result_shows_empty_state_and_hides_summary() {
    let mut list = ListController::new();
    let view = list.render(&response(Vec::new(), 0), now(), &Utc);
    assert!(view.empty_state_visible);
    assert!(!view.summary_visible());
    assert!(view.items.is_empty());
}

#[test]
fn available_block_precedes_unavailable_block_each_sorted_by_distance() {
    let result = response(
        vec![
            warehouse("a", StockStatus::OutOfStock, 3.0),
            warehouse("b", StockStatus::InStock, 9.0),
            warehouse("c", StockStatus::LowStock, 1.5),
            warehouse("d", StockStatus::OutOfStock, 0.5),
            warehouse("e", StockStatus::InStock, 4.0),
        ],
        6,
    );
    let mut list = ListController::new();
    let view = list.render(&result, now(), &Utc);

    assert_eq!(card_keys(&view), vec!["c", "e", "b", "d", "a"]);
    assert!(matches!(view.items[3], ListItem::Divider(OUT_OF_STOCK_DIVIDER)));
    assert!(!view.empty_state_visible);
}

#[test]
fn distance_ties_keep_original_order() {
    let result = response(
        vec![
            warehouse("first", StockStatus::InStock, 2.0),
            warehouse("second", StockStatus::LowStock, 2.0),
            warehouse("third", StockStatus::InStock, 2.0),
        ],
        3,
    );
    let view = ListController::new().render(&result, now(), &Utc);
    assert_eq!(card_keys(&view), vec!["first", "second", "third"]);
}

#[test]
fn card_and_divider_counts_match_partition_sizes() {
    for (n, m) in [(0usize, 0usize), (1, 0), (0, 2), (2, 3), (3, 1)] {
        let mut warehouses = Vec::new();
        for i in 0..n {
            warehouses.push(warehouse(&format!("a{i}"), StockStatus::InStock, 1.0));
        }
        for i in 0..m {
            warehouses.push(warehouse(&format!("u{i}"), StockStatus::OutOfStock, 1.0));
        }
        let view = ListController::new().render(&response(warehouses, 1), now(), &Utc);

        let expected_cards = if n == 0 { 0 } else { n + m };
        assert_eq!(view.cards().count(), expected_cards, "n={n} m={m}");
        assert_eq!(view.has_divider(), n > 0 && m > 0, "n={n} m={m}");
        assert_eq!(view.empty_state_visible, n + m == 0, "n={n} m={m}");
    }
}

#[test]
fn only_out_of_stock_shows_notice_and_count() {
    let result = response(
        vec![
            warehouse("a", StockStatus::OutOfStock, 3.0),
            warehouse("b", StockStatus::OutOfStock, 1.0),
        ],
        0,
    );
    let view = ListController::new().render(&result, now(), &Utc);
    assert_eq!(view.items, vec![ListItem::NoStockNotice(NO_STOCK_NOTICE)]);
    assert_eq!(
        view.summary.as_deref(),
        Some("2 warehouses nearby, all out of stock")
    );
}

#[test]
fn summary_uses_singular_for_one() {
    let result = response(vec![warehouse("a", StockStatus::InStock, 1.0)], 1);
    let view = ListController::new().render(&result, now(), &Utc);
    assert_eq!(
        view.summary.as_deref(),
        Some("Found 1 warehouse with 1 product in stock")
    );
}

#[test]
fn summary_uses_plural_and_reports_unavailable() {
    let result = response(
        vec![
            warehouse("a", StockStatus::InStock, 1.0),
            warehouse("b", StockStatus::LowStock, 2.0),
            warehouse("c", StockStatus::OutOfStock, 3.0),
        ],
        4,
    );
    let view = ListController::new().render(&result, now(), &Utc);
    assert_eq!(
        view.summary.as_deref(),
        Some("Found 2 warehouses with 4 products in stock, 1 location out of stock")
    );
}

#[test]
fn card_carries_distance_links_and_product_badges() {
    let mut w = warehouse("481", StockStatus::LowStock, 4.26);
    w.phone = Some("(425) 313-0965".to_string());
    w.products = vec![
        Product {
            name: "Gold Bar".to_string(),
            item_number: "1560890".to_string(),
            stock_status: StockStatus::LowStock,
        },
        Product {
            name: "Silver Coin".to_string(),
            item_number: "22".to_string(),
            stock_status: StockStatus::OutOfStock,
        },
    ];
    let view = ListController::new().render(&response(vec![w], 2), now(), &Utc);
    let card = view.cards().next().unwrap();

    assert_eq!(card.distance, "4.3 mi");
    assert_eq!(card.dial_target.as_deref(), Some("4253130965"));
    assert!(card.maps_link.starts_with("https://www.google.com/maps/search/"));
    let badges: Vec<&str> = card.products.iter().map(ProductRow::badge_class).collect();
    assert_eq!(badges, vec!["low-stock", "out-of-stock"]);
    assert!(card.restock.is_none());
    assert!(!card.is_out_of_stock());
}

#[test]
fn card_without_phone_has_no_call_target() {
    let view = ListController::new().render(
        &response(vec![warehouse("1", StockStatus::InStock, 1.0)], 0),
        now(),
        &Utc,
    );
    assert!(view.cards().next().unwrap().dial_target.is_none());
}

#[test]
fn activate_switches_active_card() {
    let result = response(
        vec![
            warehouse("a", StockStatus::InStock, 1.0),
            warehouse("b", StockStatus::OutOfStock, 2.0),
        ],
        1,
    );
    let mut list = ListController::new();
    list.render(&result, now(), &Utc);

    assert_eq!(list.activate("a"), Some(ViewUpdate::ActivateCard("a".into())));
    assert_eq!(list.active(), Some("a"));
    assert_eq!(list.activate("b"), Some(ViewUpdate::ActivateCard("b".into())));
    assert_eq!(list.active(), Some("b"));
    assert_eq!(list.activate("zzz"), None);
    assert_eq!(list.active(), Some("b"));
}

#[test]
fn render_resets_active_card() {
    let mut list = ListController::new();
    list.render(
        &response(vec![warehouse("a", StockStatus::InStock, 1.0)], 1),
        now(),
        &Utc,
    );
    list.activate("a");
    list.render(
        &response(vec![warehouse("b", StockStatus::InStock, 1.0)], 1),
        now(),
        &Utc,
    );
    assert!(list.active().is_none());
    assert!(!list.has_card("a"));
    assert!(list.has_card("b"));
}
