use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "prompt-judge.toml";

#[derive(Parser, Debug)]
#[command(
    name = "prompt-judge",
    version,
    about = "HTTP service that scores prompts against a baseline with an LLM judge"
)]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
    /// Directory where evaluation records are written
    #[arg(long)]
    pub evaluations_dir: Option<PathBuf>,
    /// Validate the configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

impl CliArgs {
    /// Flags take precedence over the file and the environment.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.evaluations_dir {
            config.storage.evaluations_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::parse_from([
            "prompt-judge",
            "--port",
            "8080",
            "--evaluations-dir",
            "/tmp/evals",
        ]);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(!args.check_config);

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.evaluations_dir, PathBuf::from("/tmp/evals"));
    }
}
