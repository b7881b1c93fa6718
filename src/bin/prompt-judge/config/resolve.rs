use std::net::{IpAddr, SocketAddr};

use prompt_judge::builder::Backend;
use prompt_judge::evaluator::EvaluationSettings;
use secrecy::SecretString;

use super::error::ConfigError;
use super::load::non_blank;
use super::types::AppConfig;

/// Configuration with secrets wrapped and strings parsed.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub addr: SocketAddr,
    pub backend: Backend,
    pub api_key: SecretString,
    pub admin_key: Option<SecretString>,
    pub settings: EvaluationSettings,
}

/// Validates `config` and picks up the generator key, preferring the
/// environment variable over the file.
pub fn resolve<F>(config: &AppConfig, lookup: F) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host: IpAddr = config
        .server
        .host
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            field: "server.host",
            message: format!("'{}' is not an IP address", config.server.host),
        })?;

    let backend: Backend = config
        .generator
        .backend
        .parse()
        .map_err(|err: prompt_judge::JudgeError| ConfigError::InvalidValue {
            field: "generator.backend",
            message: err.to_string(),
        })?;

    let env_name = config
        .generator
        .api_key_env
        .clone()
        .unwrap_or_else(|| backend.api_key_env().to_string());
    let api_key = non_blank(lookup(&env_name))
        .or_else(|| non_blank(config.generator.api_key.clone()))
        .ok_or_else(|| ConfigError::MissingApiKey {
            backend: backend.name().to_string(),
            env: env_name.clone(),
        })?;

    Ok(ResolvedConfig {
        addr: SocketAddr::new(host, config.server.port),
        backend,
        api_key: SecretString::new(api_key),
        admin_key: non_blank(config.server.admin_api_key.clone()).map(SecretString::new),
        settings: EvaluationSettings {
            custom_temperature: config.generator.custom_temperature,
            challenge_temperature: config.generator.challenge_temperature,
            max_tokens: config.generator.max_tokens,
            apply_focus_filter: config.generator.focus_filter,
        },
    })
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_generator_key_is_an_error() {
        let err = resolve(&AppConfig::default(), no_env).unwrap_err();
        match err {
            ConfigError::MissingApiKey { env, .. } => assert_eq!(env, "GROQ_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn environment_key_wins_over_file() {
        let mut config = AppConfig::default();
        config.generator.api_key = Some("from-file".into());
        let resolved = resolve(&config, |key| {
            (key == "GROQ_API_KEY").then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(resolved.api_key.expose_secret(), "from-env");
        assert_eq!(resolved.addr, "0.0.0.0:3001".parse().unwrap());
        assert!(resolved.admin_key.is_none());
    }

    #[test]
    fn custom_key_variable_and_backend() {
        let mut config = AppConfig::default();
        config.generator.backend = "DeepSeek".into();
        config.generator.api_key_env = Some("JUDGE_KEY".into());
        config.generator.custom_temperature = 0.3;
        config.server.admin_api_key = Some("   ".into());
        let resolved = resolve(&config, |key| (key == "JUDGE_KEY").then(|| "k".to_string())).unwrap();
        assert_eq!(resolved.backend, Backend::DeepSeek);
        assert_eq!(resolved.settings.custom_temperature, 0.3);
        assert!(resolved.admin_key.is_none());
    }

    #[test]
    fn unknown_backend_and_bad_host_are_rejected() {
        let mut config = AppConfig::default();
        config.generator.api_key = Some("k".into());
        config.generator.backend = "mystery".into();
        assert!(matches!(
            resolve(&config, no_env),
            Err(ConfigError::InvalidValue { field: "generator.backend", .. })
        ));

        config.generator.backend = "groq".into();
        config.server.host = "not a host".into();
        assert!(matches!(
            resolve(&config, no_env),
            Err(ConfigError::InvalidValue { field: "server.host", .. })
        ));
    }
}
