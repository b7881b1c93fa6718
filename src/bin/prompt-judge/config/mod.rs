mod error;
mod load;
mod resolve;
mod types;

pub use load::{apply_env, load_config};
pub use resolve::{resolve, ResolvedConfig};
pub use types::{AppConfig, LoggingConfig, StorageBackend};
