use serde::Deserialize;

use super::{GeneratorConfig, LoggingConfig, ServerConfig, StorageConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
