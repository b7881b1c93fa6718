use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::LoggingConfig;

/// Starts the global logger. `RUST_LOG` overrides the configured level.
/// The returned handle must be kept alive for the life of the process.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(&config.level)?;
    let Some(path) = config.path.as_deref() else {
        return Ok(logger.log_to_stderr().start()?);
    };

    let log_path = Path::new(path);
    let directory = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("prompt-judge")
        .to_string();

    Ok(logger
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?)
}
