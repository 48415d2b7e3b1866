use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use adsense_readiness::cli::{self, Cli, Commands};
use adsense_readiness::config::Config;
use adsense_readiness::lifecycle;
use adsense_readiness::server::HttpServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    lifecycle::init_logging(&config.logging.level);

    let app = lifecycle::build_application(&config).await?;

    match cli.command {
        Commands::Serve => {
            let server = HttpServer::new(config.server.clone(), Arc::new(app));
            server
                .run(async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        log::error!("[HTTP] Failed to listen for shutdown signal: {}", e);
                    }
                })
                .await?;
        }
        Commands::Analyze(cmd) => {
            let outcome = app
                .analyze(&cmd.url)
                .await
                .with_context(|| format!("analysis of {} failed", cmd.url))?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            } else {
                print!("{}", cli::render_summary(&outcome.result));
            }
        }
        Commands::Batch(cmd) => {
            for entry in app.analyze_batch(&cmd.urls).await {
                println!("{}", cli::render_batch_line(&entry));
            }
        }
        Commands::History => {
            let records = app.history().await;
            if records.is_empty() {
                println!("No analyses recorded.");
            }
            for record in records {
                println!(
                    "{}  {:>3}/100 {:<2}  {}",
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.overall_score,
                    record.grade,
                    record.url
                );
            }
        }
    }

    Ok(())
}
