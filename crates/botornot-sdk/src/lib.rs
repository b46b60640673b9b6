//! BotOrNot Rust SDK
//!
//! Async client for the reasoning agent's HTTP backend.
//!
//! # Example
//!
//! ```no_run
//! use botornot_sdk::BotOrNotClient;
//!
//! # async fn example() -> Result<(), botornot_sdk::SdkError> {
//! let client = BotOrNotClient::new("http://127.0.0.1:5000")?;
//!
//! let reply = client.chat("Who works on sodium-ion batteries?", &[]).await?;
//! println!("{}", reply.answer);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod wire;

pub use client::BotOrNotClient;
pub use error::SdkError;
pub use wire::{ChatResponse, EMPTY_ANSWER};
