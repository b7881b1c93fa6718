mod app;
mod generator;
mod logging;
mod server;
mod storage;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_TOKENS: u32 = 1500;
const DEFAULT_CUSTOM_TEMPERATURE: f32 = 0.1;
const DEFAULT_CHALLENGE_TEMPERATURE: f32 = 0.8;
const DEFAULT_EVALUATIONS_DIR: &str = "./evaluations";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
pub use generator::GeneratorConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};
