use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no API key for {backend}: set generator.api_key or the {env} environment variable")]
    MissingApiKey { backend: String, env: String },
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}
