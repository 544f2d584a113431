use crate::list::ListView;
use crate::map::{BoundingBox, Marker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    Results,
}

/// Pane shown on narrow viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    List,
    Map,
}

/// A single presentation change produced by a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    PrefillIdentifier(String),
    RadiusReadout { value: u32, percent: f64 },
    SubmitEnabled(bool),
    Busy { busy: bool, button_text: &'static str },
    ShowScreen(Screen),
    RenderList(ListView),
    /// Replaces every marker on the map.
    SetMarkers(Vec<Marker>),
    FitBounds {
        bounds: BoundingBox,
        padding: (u32, u32),
    },
    /// Marks one card active and every other card inactive.
    ActivateCard(String),
    ScrollCardIntoView(String),
    OpenPopup(String),
    ActivateTab(Tab),
    InvalidateMapSize,
    Alert(String),
    Download {
        file_name: String,
        mime_type: &'static str,
        content: String,
    },
}
