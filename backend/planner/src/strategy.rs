use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use signalbot_config::{Config, StrategyKind};
use signalbot_core::{PredictionStrategy, Result};

use crate::advisor::RemoteAdvisor;
use crate::engine::PredictionEngine;
use crate::providers::HttpTextGenerator;

/// Build the one strategy this instance answers with.
pub fn select_strategy(config: &Config) -> Result<Arc<dyn PredictionStrategy>> {
    let strategy: Arc<dyn PredictionStrategy> = match config.strategy {
        StrategyKind::Heuristic => Arc::new(PredictionEngine::new()),
        StrategyKind::Remote => {
            let generator = HttpTextGenerator::new(
                &config.advisor_url,
                Duration::from_secs(config.advisor_timeout_secs),
            )?;
            Arc::new(RemoteAdvisor::new(Arc::new(generator)))
        }
    };
    info!(strategy = strategy.name(), "Prediction strategy selected");
    Ok(strategy)
}
