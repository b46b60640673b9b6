//! Trait definitions for external interactions
//!
//! The agent is an external collaborator reached over HTTP. The trait below
//! is the boundary; `botornot-sdk` provides the HTTP implementation and tests
//! provide canned ones.

use crate::{AgentReply, ChatMessage};
use std::future::Future;

/// Something that answers questions on behalf of the remote agent
///
/// Implemented by the infrastructure layer (botornot-sdk)
pub trait AgentBackend {
    /// Error type for backend calls
    type Error: std::fmt::Display;

    /// Send a question together with the prior conversation
    fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<AgentReply, Self::Error>> + Send;
}
