//! End-to-end search flow against a mocked inventory endpoint.

use chrono::NaiveDate;
use serde_json::json;
use stockmap_client::InventoryClient;
use stockmap_export::StyleTable;
use stockmap_view::session::{ACCESS_CODE_KEY, FETCH_ERROR_ALERT};
use stockmap_view::{
    Command, KeyValueStore, ListItem, MemoryStore, Screen, Session, Tab, ViewUpdate,
};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn body() -> serde_json::Value {
    json!({
        "warehouses": [
            {
                "warehouseNumber": "6",
                "name": "Tukwila",
                "coordinates": { "latitude": 47.4593, "longitude": -122.2569 },
                "inventoryStatus": "out of stock",
                "distance": 3.1,
                "products": []
            },
            {
                "warehouseNumber": "113",
                "name": "Kirkland",
                "coordinates": { "latitude": 47.6815, "longitude": -122.1874 },
                "inventoryStatus": "in stock",
                "distance": 8.4,
                "phone": "425-822-0414",
                "products": [
                    { "name": "1 oz Gold Bar", "itemNumber": "1560890", "stockStatus": "in stock" }
                ],
                "historic": {
                    "latestRestock": "2026-10-18T15:00:00Z",
                    "durationInStock": "1 day and 2 hours"
                }
            },
            {
                "warehouseNumber": "1",
                "name": "Seattle",
                "coordinates": { "latitude": 47.5665, "longitude": -122.3405 },
                "inventoryStatus": "low stock",
                "distance": 5.0,
                "phone": null,
                "products": [
                    { "name": "1 oz Gold Bar", "itemNumber": "1560890", "stockStatus": "low stock" }
                ]
            }
        ],
        "totalWarehouses": 3,
        "totalProducts": 2
    })
}

fn new_session() -> Session<MemoryStore> {
    Session::new(MemoryStore::new(), StyleTable::default(), 1024)
}

#[tokio::test]
async fn search_then_interact_then_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("user", "member-42"))
        .and(query_param("radius", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = InventoryClient::new(&server.uri(), "test-token").unwrap();
    let mut session = new_session();
    session.start();

    let updates = session.submit(&client, "member-42", 50).await;

    let view = updates
        .iter()
        .find_map(|u| match u {
            ViewUpdate::RenderList(v) => Some(v),
            _ => None,
        })
        .expect("list rendered");
    let keys: Vec<&str> = view.cards().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["1", "113", "6"]);
    assert!(matches!(view.items[2], ListItem::Divider(_)));
    assert_eq!(
        view.summary.as_deref(),
        Some("Found 2 warehouses with 2 products in stock, 1 location out of stock")
    );

    assert_eq!(session.screen(), Screen::Results);
    assert_eq!(session.map().markers().len(), 2);
    assert_eq!(
        session.storage().get(ACCESS_CODE_KEY).unwrap().as_deref(),
        Some("member-42")
    );

    let clicked = session.dispatch(Command::MarkerClicked("113".to_string()));
    assert!(clicked.contains(&ViewUpdate::ScrollCardIntoView("113".to_string())));
    assert_eq!(session.list().active(), Some("113"));

    let narrow = session.dispatch(Command::CardClicked {
        key: "1".to_string(),
        viewport_width: 600,
    });
    assert!(narrow.contains(&ViewUpdate::ActivateTab(Tab::Map)));
    assert!(narrow.contains(&ViewUpdate::OpenPopup("1".to_string())));

    let export = session.dispatch(Command::Export {
        today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    });
    match &export[..] {
        [ViewUpdate::Download {
            file_name, content, ..
        }] => {
            assert_eq!(file_name, "warehouse-inventory-2026-10-19.kml");
            assert!(content.contains("Kirkland"));
            assert!(!content.contains("Tukwila"));
        }
        other => panic!("unexpected export updates: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_surfaces_alert_and_prefill_survives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = MemoryStore::new();
    store.set(ACCESS_CODE_KEY, "member-7").unwrap();
    let mut session = Session::new(store, StyleTable::default(), 1024);
    assert!(session
        .start()
        .contains(&ViewUpdate::PrefillIdentifier("member-7".to_string())));

    let client = InventoryClient::new(&server.uri(), "test-token").unwrap();
    let updates = session.submit(&client, "member-8", 25).await;

    assert!(updates.contains(&ViewUpdate::Alert(FETCH_ERROR_ALERT.to_string())));
    assert_eq!(updates.last(), Some(&ViewUpdate::Busy {
        busy: false,
        button_text: "Search Warehouses",
    }));
    assert_eq!(
        session.storage().get(ACCESS_CODE_KEY).unwrap().as_deref(),
        Some("member-7")
    );
    assert_eq!(session.screen(), Screen::Search);
}
