mod doctor_cmd;
mod predict_cmd;
mod scan_cmd;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use signalbot_channels::{ChannelAdapter, SignalPipeline, TelegramAdapter};
use signalbot_config::Config;
use signalbot_understanding::{DigitExtractor, TesseractCli};

#[derive(Parser)]
#[command(name = "signalbot")]
#[command(about = "SignalBot: reads game numbers from screenshots and predicts Small/Big")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot and the liveness server (default)
    Serve {
        /// Port for the liveness server
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the local heuristic on digits given on the command line
    Predict {
        /// Digits, oldest first
        #[arg(required = true, value_parser = clap::value_parser!(u8).range(0..=9))]
        digits: Vec<u8>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run OCR and the configured strategy on a local image
    Scan {
        image: PathBuf,
    },
    /// Check token, OCR engine, and temp directory
    Doctor,
    /// Query a running bot's liveness endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = signalbot_config::load_from_env()?;

    signalbot_logging::init_logger(&config.log_level, config.log_dir.as_deref());

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Predict { digits, json } => predict_cmd::run(digits, json)?,
        Commands::Scan { image } => scan_cmd::run(&config, image).await?,
        Commands::Doctor => doctor_cmd::run(&config).await?,
        Commands::Status { port } => status_cmd::run(port.unwrap_or(config.port)).await?,
    }

    Ok(())
}

/// Wire OCR, the configured strategy, and the per-request temp directory.
pub(crate) fn build_pipeline(config: &Config) -> Result<SignalPipeline> {
    let recognizer = TesseractCli::new(&config.ocr_binary, &config.ocr_language);
    let extractor = DigitExtractor::new(Arc::new(recognizer));
    let strategy = signalbot_planner::select_strategy(config)?;
    Ok(SignalPipeline::new(extractor, strategy, &config.temp_dir))
}

async fn run_server(config: Config) -> Result<()> {
    let token = match config.require_bot_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            error!(error = %e, "Cannot start without a bot token");
            return Err(e.into());
        }
    };

    info!(
        port = config.port,
        bind = %config.bind_address,
        strategy = %config.strategy,
        temp_dir = %config.temp_dir.display(),
        "Starting SignalBot"
    );

    let pipeline = Arc::new(build_pipeline(&config)?);
    let adapter = TelegramAdapter::new(token, pipeline);

    let addr = config.liveness_addr();
    let liveness = tokio::spawn(async move {
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        if let Err(e) = signalbot_gateway::start_server(&addr, shutdown).await {
            error!(error = %e, "Liveness server failed");
        }
    });

    info!(adapter = adapter.name(), "Channel adapter starting");
    adapter.start().await?;

    liveness.await?;
    Ok(())
}
