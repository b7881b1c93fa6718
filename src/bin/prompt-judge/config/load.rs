use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::ConfigError;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub exists: bool,
}

/// Reads the TOML file at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(LoadedConfig {
            config: toml::from_str(&contents)?,
            exists: true,
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(LoadedConfig {
            config: AppConfig::default(),
            exists: false,
        }),
        Err(err) => Err(ConfigError::Io(err)),
    }
}

/// Applies `PORT` and `ADMIN_API_KEY` from the environment. The generator
/// key is read later, when the configuration is resolved.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = non_blank(lookup("PORT")) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: "PORT",
            message: format!("'{port}' is not a valid port"),
        })?;
    }
    if let Some(key) = non_blank(lookup("ADMIN_API_KEY")) {
        config.server.admin_api_key = Some(key);
    }
    Ok(())
}

pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
