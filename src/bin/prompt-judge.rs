#[path = "prompt-judge/app.rs"]
mod app;
#[path = "prompt-judge/args.rs"]
mod args;
#[path = "prompt-judge/config/mod.rs"]
mod config;
#[path = "prompt-judge/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
