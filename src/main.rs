use anyhow::{Context, Result};
use clap::Parser;
use oral_grader::{AppState, Config, OpenAiModel};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "oral-grader", about = "Oral presentation grading service")]
struct Cli {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/oral-grader")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!(
        "Presentation phase: {}s, question phase: {}s",
        cfg.session.presentation_secs, cfg.session.answer_secs
    );

    let model = OpenAiModel::try_from_env()
        .context("Generative model configuration missing")?
        .with_model(&cfg.model.name)
        .with_timeout(Duration::from_secs(cfg.model.timeout_secs));

    info!("Generative model: {}", cfg.model.name);

    let state = AppState::new(Arc::new(model), cfg.session);
    let app = oral_grader::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
