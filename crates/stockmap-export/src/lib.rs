pub mod error;
pub mod kml;
pub mod styles;

pub use error::ExportError;
pub use kml::{export_file_name, generate_kml, KML_MIME_TYPE};
pub use styles::{load_styles, MarkerStyle, StyleTable};
