use std::path::PathBuf;

use serde::Deserialize;

use super::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pre-built front-end served for non-API paths.
    pub static_dir: Option<PathBuf>,
    pub admin_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
            admin_api_key: None,
        }
    }
}
