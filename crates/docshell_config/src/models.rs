// --- File: crates/docshell_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. mongodb://localhost:27017/app, or memory:// for the in-process store
    #[serde(default)]
    pub name: Option<String>, // overrides the database named in the URL
}

// --- Single-page shell ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    /// Directory holding the built client bundle.
    pub dir: String,
    /// Served for every non-API path that does not name a file.
    #[serde(default = "default_index")]
    pub index: String,
}

fn default_index() -> String {
    "index.html".to_string()
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub web: Option<WebConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: None,
            web: None,
        }
    }
}
