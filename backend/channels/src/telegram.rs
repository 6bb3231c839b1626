use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, ParseMode};
use tracing::{Instrument, error, info, info_span};

use signalbot_core::{ChatReply, ChatRequest, ImageSource, Result, SignalError};
use signalbot_logging::redact_sensitive_data;

use crate::ChannelAdapter;
use crate::pipeline::SignalPipeline;

/// Long-polling Telegram transport in front of a [`SignalPipeline`].
///
/// teloxide runs updates from different chats concurrently and updates from
/// one chat in order.
pub struct TelegramAdapter {
    bot: Bot,
    pipeline: Arc<SignalPipeline>,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>, pipeline: Arc<SignalPipeline>) -> Self {
        Self {
            bot: Bot::new(token),
            pipeline,
        }
    }
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!(strategy = self.pipeline.strategy_name(), "Starting Telegram adapter");

        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![Arc::clone(&self.pipeline)])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram adapter stopped");
        Ok(())
    }
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    pipeline: Arc<SignalPipeline>,
) -> ResponseResult<()> {
    let request = ChatRequest::new(msg.chat.id.0);

    let reply = if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        let source = TelegramPhoto {
            bot: bot.clone(),
            file: largest.file.clone(),
        };
        let span = info_span!(
            "image_request",
            request_id = %request.request_id,
            chat_id = request.chat_id
        );
        Some(pipeline.handle_image(&request, &source).instrument(span).await)
    } else if let Some(text) = msg.text() {
        pipeline.handle_text(&request, text)
    } else {
        None
    };

    if let Some(reply) = reply {
        send_reply(&bot, &reply).await;
    }
    respond(())
}

/// Send failures are logged; nothing is retried.
async fn send_reply(bot: &Bot, reply: &ChatReply) {
    let result = bot
        .send_message(ChatId(reply.chat_id), reply.text.clone())
        .parse_mode(ParseMode::Html)
        .await;
    if let Err(e) = result {
        error!(
            chat_id = reply.chat_id,
            kind = ?reply.kind,
            error = %redact_sensitive_data(&e.to_string()),
            "Failed to send reply"
        );
    }
}

/// The largest size of one inbound photo.
struct TelegramPhoto {
    bot: Bot,
    file: FileMeta,
}

#[async_trait]
impl ImageSource for TelegramPhoto {
    async fn fetch(&self) -> Result<Bytes> {
        let file = self
            .bot
            .get_file(self.file.id.clone())
            .await
            .map_err(|e| SignalError::Download(redact_sensitive_data(&e.to_string())))?;

        let mut buf: Vec<u8> = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| SignalError::Download(redact_sensitive_data(&e.to_string())))?;

        Ok(Bytes::from(buf))
    }
}
