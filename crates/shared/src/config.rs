//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store (JSONBin) configuration.
    pub jsonbin: JsonBinConfig,
    /// Config provider (Google Sheets) configuration.
    pub sheets: SheetsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonBinConfig {
    /// Base URL of the JSONBin v3 API.
    #[serde(default = "default_jsonbin_base_url")]
    pub base_url: String,
    /// Server-side master key attached to every request.
    pub master_key: String,
    /// Bin holding the tracker document.
    pub bin_id: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_jsonbin_base_url() -> String {
    "https://api.jsonbin.io/v3".to_string()
}

/// Config provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Base URL of the Sheets v4 API.
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    /// API key for read access.
    pub api_key: String,
    /// Spreadsheet holding the roster.
    pub sheet_id: String,
    /// A1 range to read.
    #[serde(default = "default_sheets_range")]
    pub range: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_sheets_range() -> String {
    "dependientxs!A1:D500".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRACKER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
