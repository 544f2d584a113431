//! Search session: owns the active result set and both view controllers.
//!
//! User actions arrive as [`Command`]s (or, for the search itself, through
//! [`Session::submit`]) and come back out as [`ViewUpdate`] lists.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use stockmap_client::{InventoryClient, InventoryError};
use stockmap_core::InventoryResponse;
use stockmap_export::{export_file_name, generate_kml, StyleTable, KML_MIME_TYPE};

use crate::list::{partition_by_distance, ListController};
use crate::map::MapController;
use crate::storage::KeyValueStore;
use crate::update::{Screen, Tab, ViewUpdate};

/// Storage key holding the last identifier that produced a successful search.
pub const ACCESS_CODE_KEY: &str = "accessCode";

pub const FETCH_ERROR_ALERT: &str = "Error fetching inventory. Please try again.";
pub const EXPORT_EMPTY_ALERT: &str = "No in-stock warehouses to export.";
pub const EXPORT_FAILED_ALERT: &str = "Could not generate the export file.";

pub const SEARCH_BUTTON_TEXT: &str = "Search Warehouses";
pub const SEARCHING_BUTTON_TEXT: &str = "Searching...";

/// Source of inventory data for a search.
#[allow(async_fn_in_trait)]
pub trait InventoryFetcher {
    /// # Errors
    ///
    /// Returns [`InventoryError`] when the fetch fails for any reason.
    async fn fetch_inventory(
        &self,
        identifier: &str,
        radius: u32,
    ) -> Result<InventoryResponse, InventoryError>;
}

impl InventoryFetcher for InventoryClient {
    async fn fetch_inventory(
        &self,
        identifier: &str,
        radius: u32,
    ) -> Result<InventoryResponse, InventoryError> {
        InventoryClient::fetch_inventory(self, identifier, radius).await
    }
}

/// Radius input in miles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSlider {
    pub min: u32,
    pub max: u32,
    pub value: u32,
}

impl Default for RadiusSlider {
    fn default() -> Self {
        Self {
            min: 5,
            max: 100,
            value: 25,
        }
    }
}

impl RadiusSlider {
    /// Set the value, clamped to the slider range.
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Track fill as a percentage of the range.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.max <= self.min {
            return 100.0;
        }
        f64::from(self.value - self.min) / f64::from(self.max - self.min) * 100.0
    }

    fn readout(&self) -> ViewUpdate {
        ViewUpdate::RadiusReadout {
            value: self.value,
            percent: self.percent(),
        }
    }
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RadiusInput(u32),
    MarkerClicked(String),
    CardClicked { key: String, viewport_width: u32 },
    SwitchTab(Tab),
    Back,
    Export { today: NaiveDate },
}

pub struct Session<S: KeyValueStore> {
    map: MapController,
    list: ListController,
    active: Option<InventoryResponse>,
    storage: S,
    styles: StyleTable,
    radius: RadiusSlider,
    screen: Screen,
    tab: Tab,
    busy: bool,
    narrow_viewport_px: u32,
}

impl<S: KeyValueStore> Session<S> {
    #[must_use]
    pub fn new(storage: S, styles: StyleTable, narrow_viewport_px: u32) -> Self {
        Self {
            map: MapController::initialize(),
            list: ListController::new(),
            active: None,
            storage,
            styles,
            radius: RadiusSlider::default(),
            screen: Screen::Search,
            tab: Tab::List,
            busy: false,
            narrow_viewport_px,
        }
    }

    #[must_use]
    pub fn map(&self) -> &MapController {
        &self.map
    }

    #[must_use]
    pub fn list(&self) -> &ListController {
        &self.list
    }

    /// Warehouses from the most recent successful search.
    #[must_use]
    pub fn active_result(&self) -> Option<&InventoryResponse> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn radius(&self) -> RadiusSlider {
        self.radius
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Startup: search screen, list tab, radius readout, and the stored
    /// identifier prefilled when one exists.
    pub fn start(&mut self) -> Vec<ViewUpdate> {
        let mut updates = vec![
            ViewUpdate::ShowScreen(Screen::Search),
            ViewUpdate::ActivateTab(Tab::List),
            self.radius.readout(),
        ];
        match self.storage.get(ACCESS_CODE_KEY) {
            Ok(Some(saved)) if !saved.is_empty() => {
                updates.push(ViewUpdate::PrefillIdentifier(saved));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "could not read saved access code"),
        }
        self.screen = Screen::Search;
        self.tab = Tab::List;
        updates
    }

    /// Run one search: busy state, fetch, render, ready state.
    ///
    /// The fetch is the only suspension point. Dates in the restock widget
    /// use the local time zone.
    pub async fn submit<F: InventoryFetcher>(
        &mut self,
        fetcher: &F,
        identifier: &str,
        radius: u32,
    ) -> Vec<ViewUpdate> {
        let identifier = identifier.trim().to_string();
        let mut updates = self.begin_search();
        self.radius.set(radius);
        let outcome = fetcher.fetch_inventory(&identifier, self.radius.value).await;
        updates.extend(self.finish_search(&identifier, outcome, Utc::now(), &Local));
        updates
    }

    /// Disable the submit control and show the busy indicator.
    pub fn begin_search(&mut self) -> Vec<ViewUpdate> {
        self.busy = true;
        vec![
            ViewUpdate::SubmitEnabled(false),
            ViewUpdate::Busy {
                busy: true,
                button_text: SEARCHING_BUTTON_TEXT,
            },
        ]
    }

    /// Apply a fetch outcome and restore the ready state.
    pub fn finish_search<Tz: TimeZone>(
        &mut self,
        identifier: &str,
        outcome: Result<InventoryResponse, InventoryError>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Vec<ViewUpdate> {
        let mut updates = match outcome {
            Ok(result) => self.apply_result(identifier, result, now, tz),
            Err(e) => {
                tracing::error!(error = %e, "error fetching inventory");
                vec![ViewUpdate::Alert(FETCH_ERROR_ALERT.to_string())]
            }
        };
        self.busy = false;
        updates.push(ViewUpdate::SubmitEnabled(true));
        updates.push(ViewUpdate::Busy {
            busy: false,
            button_text: SEARCH_BUTTON_TEXT,
        });
        updates
    }

    fn apply_result<Tz: TimeZone>(
        &mut self,
        identifier: &str,
        result: InventoryResponse,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Vec<ViewUpdate> {
        if let Err(e) = self.storage.set(ACCESS_CODE_KEY, identifier) {
            tracing::warn!(error = %e, "could not persist access code");
        }

        self.screen = Screen::Results;
        let mut updates = vec![ViewUpdate::ShowScreen(Screen::Results)];
        updates.push(ViewUpdate::RenderList(self.list.render(&result, now, tz)));

        let (available, _) = partition_by_distance(&result.warehouses);
        updates.extend(self.map.set_markers(available));

        tracing::info!(
            warehouses = result.warehouses.len(),
            markers = self.map.markers().len(),
            "search results applied"
        );
        self.active = Some(result);
        updates
    }

    /// Handle a discrete user action.
    pub fn dispatch(&mut self, command: Command) -> Vec<ViewUpdate> {
        match command {
            Command::RadiusInput(value) => {
                self.radius.set(value);
                vec![self.radius.readout()]
            }
            Command::MarkerClicked(key) => self.marker_clicked(&key),
            Command::CardClicked {
                key,
                viewport_width,
            } => self.card_clicked(&key, viewport_width),
            Command::SwitchTab(tab) => self.switch_tab(tab),
            Command::Back => {
                self.screen = Screen::Search;
                vec![ViewUpdate::ShowScreen(Screen::Search)]
            }
            Command::Export { today } => self.export(today),
        }
    }

    fn marker_clicked(&mut self, key: &str) -> Vec<ViewUpdate> {
        let Some(key) = self.map.marker_clicked(key) else {
            return Vec::new();
        };
        match self.list.activate(&key) {
            Some(activate) => vec![activate, ViewUpdate::ScrollCardIntoView(key)],
            None => Vec::new(),
        }
    }

    fn card_clicked(&mut self, key: &str, viewport_width: u32) -> Vec<ViewUpdate> {
        let Some(activate) = self.list.activate(key) else {
            return Vec::new();
        };
        let mut updates = vec![activate];
        if self.map.has_marker(key) {
            updates.push(ViewUpdate::OpenPopup(key.to_string()));
            if viewport_width <= self.narrow_viewport_px {
                updates.extend(self.switch_tab(Tab::Map));
            }
        }
        updates
    }

    /// Switching to the map re-measures it and refits the last bounds, since
    /// a hidden map has a stale size.
    fn switch_tab(&mut self, tab: Tab) -> Vec<ViewUpdate> {
        self.tab = tab;
        let mut updates = vec![ViewUpdate::ActivateTab(tab)];
        if tab == Tab::Map {
            updates.push(ViewUpdate::InvalidateMapSize);
            updates.extend(self.map.refit());
        }
        updates
    }

    fn export(&self, today: NaiveDate) -> Vec<ViewUpdate> {
        let warehouses = self
            .active
            .as_ref()
            .map_or(&[][..], |r| r.warehouses.as_slice());
        match generate_kml(warehouses, &self.styles) {
            Ok(Some(content)) => vec![ViewUpdate::Download {
                file_name: export_file_name(today),
                mime_type: KML_MIME_TYPE,
                content,
            }],
            Ok(None) => vec![ViewUpdate::Alert(EXPORT_EMPTY_ALERT.to_string())],
            Err(e) => {
                tracing::error!(error = %e, "failed to generate export");
                vec![ViewUpdate::Alert(EXPORT_FAILED_ALERT.to_string())]
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
