use async_trait::async_trait;

pub mod commands;
pub mod pipeline;
pub mod replies;
pub mod telegram;
pub mod temp_image;

pub use commands::BotCommand;
pub use pipeline::SignalPipeline;
pub use telegram::TelegramAdapter;
pub use temp_image::TempImage;

/// All chat transports implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Run the adapter's receive loop until shutdown.
    async fn start(&self) -> anyhow::Result<()>;
}
