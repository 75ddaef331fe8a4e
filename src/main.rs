use std::env;
use std::sync::Arc;

use tracing::{error, info};

use zmon_history::auth::StaticToken;
use zmon_history::config::{flag_enabled, Entities};
use zmon_history::{logging, History, HistoryConfig, TimeWindow};

/// Small demo client: queries a check's history against a live KairosDB.
#[tokio::main]
async fn main() {
    logging::init_logger();

    let entities = match env::var("ZMON_ENTITIES") {
        Ok(raw) => Entities::from(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>(),
        ),
        Err(_) => Entities::Absent,
    };

    let config = HistoryConfig {
        url: env::var("KAIROSDB_URL").unwrap_or_default(),
        history_enabled: env::var("KAIROSDB_HISTORY_ENABLED")
            .map(|raw| flag_enabled(&raw))
            .unwrap_or(true),
        check_id: env::var("ZMON_CHECK_ID").unwrap_or_else(|_| "17".to_string()),
        entities,
    };

    let history = match env::var("OAUTH2_ACCESS_TOKEN") {
        Ok(token) => History::with_token_provider(config, Arc::new(StaticToken::new(token))),
        Err(_) => History::new(config),
    };

    let history = match history {
        Ok(history) => history,
        Err(err) => {
            eprintln!("Failed to configure history client: {}", err);
            std::process::exit(1);
        }
    };

    let window = TimeWindow::default();

    match history.fetch_raw(window).await {
        Ok(response) => info!("raw response: {:?}", response),
        Err(err) => error!("raw query failed: {}", err),
    }

    match history.fetch_series(window).await {
        Ok(series) => info!("series: {:?}", series),
        Err(err) => error!("series query failed: {}", err),
    }

    match history.get_avg("", window).await {
        Ok(value) => info!("aggregated avg: {:?}", value),
        Err(err) => error!("aggregate query failed: {}", err),
    }
}
