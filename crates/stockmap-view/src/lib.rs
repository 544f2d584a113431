//! View layer for the warehouse search front end.
//!
//! Controllers turn inventory data into plain view models and return
//! [`ViewUpdate`] lists describing what the presentation should change.
//! [`render`] turns view models into HTML fragments.

pub mod list;
pub mod map;
pub mod render;
pub mod restock;
pub mod session;
pub mod storage;
pub mod update;

pub use list::{ListController, ListItem, ListView, ProductRow, WarehouseCard};
pub use map::{BoundingBox, LatLng, MapController, MapSurface, Marker, Popup};
pub use restock::{build_restock_widget, DurationLines, RestockDetail, RestockWidget};
pub use session::{Command, InventoryFetcher, RadiusSlider, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use update::{Screen, Tab, ViewUpdate};
