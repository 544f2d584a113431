use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Inventory endpoint; `radius` and `user` are appended as query params.
    pub inventory_url: String,
    /// Static bearer credential forwarded on every inventory request.
    pub inventory_token: String,
    /// JSON file backing the client-side key-value store.
    pub storage_path: PathBuf,
    /// Optional YAML file overriding the built-in KML style table.
    pub export_styles_path: Option<PathBuf>,
    /// Viewport widths at or below this value are treated as narrow (tabbed).
    pub narrow_viewport_px: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("inventory_url", &self.inventory_url)
            .field("inventory_token", &"[redacted]")
            .field("storage_path", &self.storage_path)
            .field("export_styles_path", &self.export_styles_path)
            .field("narrow_viewport_px", &self.narrow_viewport_px)
            .finish()
    }
}
