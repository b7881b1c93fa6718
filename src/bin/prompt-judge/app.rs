use std::sync::Arc;

use clap::Parser;
use prompt_judge::api::{router, serve, ServerState};
use prompt_judge::builder::GeneratorBuilder;
use prompt_judge::challenges::ChallengeCatalog;
use prompt_judge::evaluator::EvaluationService;
use prompt_judge::store::{EvaluationStore, JsonFileStore, MemoryStore};

use crate::args::CliArgs;
use crate::config::{apply_env, load_config, resolve, AppConfig, StorageBackend};
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(&args.config)?;
    let mut config = loaded.config;
    let env = |key: &str| std::env::var(key).ok();
    apply_env(&mut config, env)?;
    args.apply(&mut config);

    let _logger = init_logging(&config.logging)?;
    if loaded.exists {
        log::info!("loaded configuration from {}", args.config.display());
    } else {
        log::info!(
            "no configuration file at {}, using defaults",
            args.config.display()
        );
    }

    let resolved = resolve(&config, env)?;
    if args.check_config {
        print_summary(&config, &resolved);
        return Ok(());
    }

    let mut builder = GeneratorBuilder::new()
        .backend(resolved.backend)
        .api_key_secret(resolved.api_key)
        .max_tokens(config.generator.max_tokens);
    if let Some(url) = &config.generator.base_url {
        builder = builder.base_url(url.clone());
    }
    if let Some(model) = &config.generator.model {
        builder = builder.model(model.clone());
    }
    if let Some(timeout) = config.generator.timeout_seconds {
        builder = builder.timeout_seconds(timeout);
    }
    let generator = builder.build()?;

    let service = EvaluationService::new(
        Arc::from(generator),
        open_store(&config),
        Arc::new(ChallengeCatalog::predefined()),
    )
    .with_settings(resolved.settings);

    if resolved.admin_key.is_none() {
        log::warn!("no admin API key configured; admin routes will refuse requests");
    }
    let state = ServerState::new(Arc::new(service), resolved.admin_key);
    let app = router(state, config.server.static_dir.as_deref());
    serve(resolved.addr, app).await?;
    Ok(())
}

fn open_store(config: &AppConfig) -> Arc<dyn EvaluationStore> {
    match config.storage.backend {
        StorageBackend::File => {
            log::info!(
                "storing evaluations in {}",
                config.storage.evaluations_dir.display()
            );
            Arc::new(JsonFileStore::new(config.storage.evaluations_dir.clone()))
        }
        StorageBackend::Memory => {
            log::warn!("using in-memory storage; evaluations are lost on exit");
            Arc::new(MemoryStore::new())
        }
    }
}

fn print_summary(config: &AppConfig, resolved: &crate::config::ResolvedConfig) {
    println!("configuration OK");
    println!("  listen:      {}", resolved.addr);
    println!("  backend:     {}", resolved.backend.name());
    println!(
        "  model:       {}",
        config
            .generator
            .model
            .as_deref()
            .unwrap_or(resolved.backend.default_model())
    );
    println!("  storage:     {:?}", config.storage.backend);
    println!(
        "  admin key:   {}",
        if resolved.admin_key.is_some() { "set" } else { "not set" }
    );
}
