//! Map pane: marker registry, popups and viewport bounds.

use stockmap_core::{StockStatus, Warehouse};

use crate::update::ViewUpdate;

/// Continental US.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 39.8283,
    lng: -98.5795,
};
pub const DEFAULT_ZOOM: u8 = 4;
/// Pixel padding applied whenever the viewport is fitted to the markers.
pub const FIT_PADDING: (u32, u32) = (50, 50);

pub const IN_STOCK_COLOR: &str = "#059669";
pub const LOW_STOCK_COLOR: &str = "#d97706";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for no points.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    west: p.lng,
                    south: p.lat,
                    east: p.lng,
                    north: p.lat,
                },
                Some(b) => Self {
                    west: b.west.min(p.lng),
                    south: b.south.min(p.lat),
                    east: b.east.max(p.lng),
                    north: b.north.max(p.lat),
                },
            })
        })
    }

    #[must_use]
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

/// Initial state of the map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub name: String,
    pub status: StockStatus,
    pub status_color: &'static str,
    pub maps_link: String,
    pub phone: Option<String>,
    pub dial_target: Option<String>,
    pub products: Vec<String>,
}

/// A map pin for one available warehouse, keyed by warehouse number.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: String,
    pub position: LatLng,
    pub color: &'static str,
    pub popup: Popup,
}

/// Marker color for an available status; out of stock has none.
#[must_use]
pub fn marker_color(status: StockStatus) -> Option<&'static str> {
    match status {
        StockStatus::InStock => Some(IN_STOCK_COLOR),
        StockStatus::LowStock => Some(LOW_STOCK_COLOR),
        StockStatus::OutOfStock => None,
    }
}

pub struct MapController {
    surface: MapSurface,
    markers: Vec<Marker>,
    bounds: Option<BoundingBox>,
}

impl MapController {
    /// Map centered on the continental default with one OpenStreetMap layer.
    #[must_use]
    pub fn initialize() -> Self {
        Self {
            surface: MapSurface {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
                tile_layer: TileLayer {
                    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
                    max_zoom: 19,
                },
            },
            markers: Vec::new(),
            bounds: None,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn marker(&self, key: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.key == key)
    }

    #[must_use]
    pub fn has_marker(&self, key: &str) -> bool {
        self.marker(key).is_some()
    }

    /// Bounding box of the current markers, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Replace all markers with one per available warehouse and fit the
    /// viewport to them.
    ///
    /// Out-of-stock warehouses are skipped. With no markers the previous
    /// bounds are dropped and the viewport is left alone.
    pub fn set_markers<'a, I>(&mut self, warehouses: I) -> Vec<ViewUpdate>
    where
        I: IntoIterator<Item = &'a Warehouse>,
    {
        self.markers = warehouses.into_iter().filter_map(build_marker).collect();
        self.bounds = BoundingBox::from_points(self.markers.iter().map(|m| m.position));

        tracing::debug!(markers = self.markers.len(), "markers replaced");

        let mut updates = vec![ViewUpdate::SetMarkers(self.markers.clone())];
        if let Some(bounds) = self.bounds {
            updates.push(ViewUpdate::FitBounds {
                bounds,
                padding: FIT_PADDING,
            });
        }
        updates
    }

    /// Key of the clicked marker, if it is still on the map.
    #[must_use]
    pub fn marker_clicked(&self, key: &str) -> Option<String> {
        self.marker(key).map(|m| m.key.clone())
    }

    /// Re-apply the last computed bounds, e.g. after the map pane was hidden.
    #[must_use]
    pub fn refit(&self) -> Option<ViewUpdate> {
        self.bounds.map(|bounds| ViewUpdate::FitBounds {
            bounds,
            padding: FIT_PADDING,
        })
    }
}

fn build_marker(warehouse: &Warehouse) -> Option<Marker> {
    let color = marker_color(warehouse.inventory_status)?;
    let position = LatLng {
        lat: warehouse.coordinates.latitude,
        lng: warehouse.coordinates.longitude,
    };
    Some(Marker {
        key: warehouse.warehouse_number.clone(),
        position,
        color,
        popup: Popup {
            name: warehouse.name.clone(),
            status: warehouse.inventory_status,
            status_color: color,
            maps_link: warehouse.maps_link(),
            phone: warehouse.display_phone().map(str::to_string),
            dial_target: warehouse.dial_target(),
            products: warehouse.products.iter().map(|p| p.name.clone()).collect(),
        },
    })
}

#[cfg(test)]
mod tests {
    use stockmap_core::Coordinates;

    use super::*;

    fn warehouse(key: &str, status: StockStatus, lat: f64, lng: f64) -> Warehouse {
        Warehouse {
            warehouse_number: key.to_string(),
            name: format!("Warehouse {key}"),
            coordinates: Coordinates {
                latitude: lat,
                longitude: lng,
            },
            inventory_status: status,
            distance: 1.0,
            phone: None,
            products: Vec::new(),
            historic: None,
        }
    }

    #[test]
    fn initialize_uses_continental_default() {
        let map = MapController::initialize();
        assert_eq!(map.surface().center, DEFAULT_CENTER);
        assert_eq!(map.surface().zoom, 4);
        assert_eq!(map.surface().tile_layer.max_zoom, 19);
        assert!(map.markers().is_empty());
        assert!(map.refit().is_none());
    }

    #[test]
    fn markers_exist_only_for_available_warehouses() {
        let warehouses = vec![
            warehouse("1", StockStatus::InStock, 47.0, -122.0),
            warehouse("2", StockStatus::OutOfStock, 48.0, -121.0),
            warehouse("3", StockStatus::LowStock, 46.0, -123.0),
        ];
        let mut map = MapController::initialize();
        map.set_markers(&warehouses);

        for w in &warehouses {
            assert_eq!(
                map.has_marker(&w.warehouse_number),
                w.is_available(),
                "marker presence for {}",
                w.warehouse_number
            );
        }
        assert_eq!(map.marker("1").unwrap().color, IN_STOCK_COLOR);
        assert_eq!(map.marker("3").unwrap().color, LOW_STOCK_COLOR);
    }

    #[test]
    fn set_markers_fits_bounds_of_marker_coordinates() {
        let warehouses = vec![
            warehouse("1", StockStatus::InStock, 47.0, -122.0),
            warehouse("2", StockStatus::OutOfStock, 60.0, -100.0),
            warehouse("3", StockStatus::LowStock, 46.0, -123.0),
        ];
        let mut map = MapController::initialize();
        let updates = map.set_markers(&warehouses);

        let expected = BoundingBox {
            west: -123.0,
            south: 46.0,
            east: -122.0,
            north: 47.0,
        };
        assert_eq!(map.bounds(), Some(expected));
        assert!(updates.contains(&ViewUpdate::FitBounds {
            bounds: expected,
            padding: FIT_PADDING
        }));
        assert_eq!(
            map.refit(),
            Some(ViewUpdate::FitBounds {
                bounds: expected,
                padding: FIT_PADDING
            })
        );
    }

    #[test]
    fn empty_input_clears_without_viewport_change() {
        let mut map = MapController::initialize();
        map.set_markers(&[warehouse("1", StockStatus::InStock, 47.0, -122.0)]);
        let updates = map.set_markers(&[]);

        assert_eq!(updates, vec![ViewUpdate::SetMarkers(Vec::new())]);
        assert!(map.markers().is_empty());
        assert!(map.refit().is_none());
    }

    #[test]
    fn new_markers_replace_previous_set() {
        let mut map = MapController::initialize();
        map.set_markers(&[warehouse("1", StockStatus::InStock, 47.0, -122.0)]);
        map.set_markers(&[warehouse("2", StockStatus::InStock, 40.0, -100.0)]);
        assert!(!map.has_marker("1"));
        assert!(map.has_marker("2"));
        assert_eq!(map.markers().len(), 1);
    }

    #[test]
    fn popup_carries_products_and_phone() {
        let mut w = warehouse("7", StockStatus::LowStock, 47.0, -122.0);
        w.phone = Some("425-555-0100".to_string());
        w.products = vec![stockmap_core::Product {
            name: "Gold Bar".to_string(),
            item_number: "1".to_string(),
            stock_status: StockStatus::LowStock,
        }];
        let mut map = MapController::initialize();
        map.set_markers([&w]);

        let popup = &map.marker("7").unwrap().popup;
        assert_eq!(popup.products, vec!["Gold Bar".to_string()]);
        assert_eq!(popup.phone.as_deref(), Some("425-555-0100"));
        assert_eq!(popup.dial_target.as_deref(), Some("4255550100"));
        assert_eq!(popup.status_color, LOW_STOCK_COLOR);
    }

    #[test]
    fn marker_click_resolves_key_only_for_known_markers() {
        let mut map = MapController::initialize();
        map.set_markers(&[warehouse("1", StockStatus::InStock, 47.0, -122.0)]);
        assert_eq!(map.marker_clicked("1").as_deref(), Some("1"));
        assert!(map.marker_clicked("99").is_none());
    }

    #[test]
    fn bounding_box_contains_its_points() {
        let points = [
            LatLng { lat: 1.0, lng: 2.0 },
            LatLng { lat: -3.0, lng: 5.0 },
        ];
        let b = BoundingBox::from_points(points).unwrap();
        assert!(points.iter().all(|p| b.contains(*p)));
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }
}
