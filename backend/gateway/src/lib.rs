//! SignalBot liveness HTTP server.
//!
//! Answers every request with `200 Bot is running` so process supervisors
//! and hosting platforms can tell the bot is up.

pub mod server;

pub use server::{LIVENESS_BODY, liveness_router, start_server};
