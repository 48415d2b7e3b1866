//! Process lifecycle: logging setup and assembly of the shared application.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::application::Application;
use crate::config::Config;
use crate::db;
use crate::repository::sqlite::SqliteAnalysisRepository;
use crate::service::{Analyzer, InMemoryCache};

/// Initialize logging with tracing_subscriber. `RUST_LOG` takes precedence
/// over `level`; `log` records are bridged into the subscriber.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level))
        .add_directive("sqlx=warn".parse().expect("static directive"))
        .add_directive("hyper=info".parse().expect("static directive"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}

/// Build the application from configuration.
///
/// An unreachable database disables persistence rather than failing startup.
pub async fn build_application(config: &Config) -> Result<Application> {
    let analyzer = Analyzer::from_config(config).context("failed to build analyzer")?;
    let mut app = Application::new(analyzer);

    if config.cache.enabled {
        let cache = Arc::new(InMemoryCache::new());
        spawn_cache_purger(cache.clone(), Duration::from_secs(60));
        app = app.with_cache(cache, Duration::from_secs(config.cache.ttl_secs));
    }

    match config.database.url.as_deref() {
        Some(url) => match db::open_pool(url).await {
            Ok(pool) => {
                app = app.with_repository(
                    Arc::new(SqliteAnalysisRepository::new(pool)),
                    config.database.history_limit,
                );
            }
            Err(e) => log::warn!("[DB] Persistence disabled, could not open {}: {}", url, e),
        },
        None => log::info!("[DB] No database configured; history is disabled"),
    }

    Ok(app)
}

/// Periodically evict expired cache entries. Runs until the runtime stops.
fn spawn_cache_purger(cache: Arc<InMemoryCache>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            cache.purge_expired();
        }
    });
}
