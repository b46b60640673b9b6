//! BotOrNot Domain Layer
//!
//! Value types shared by every BotOrNot crate: provenance sources, expert
//! records, attributed answer segments and the chat exchange with the remote
//! agent. The only external dependency is `serde`, because these records
//! cross the HTTP boundary as JSON.
//!
//! ## Key Concepts
//!
//! - **Source**: an opaque provenance reference (URL or named-tool label)
//! - **ExpertRecord**: profile data for a domain expert named in an answer
//! - **Segment**: one displayed unit of answer text, attributed to one Source
//! - **AgentReply**: the raw `answer` / `trace_text` pair the core consumes
//!
//! ## Architecture
//!
//! - Pure data, no I/O
//! - Trait definitions for the network boundary live in [`traits`]
//! - Extraction and attribution live in `botornot-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod expert;
pub mod segment;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use chat::{AgentReply, ChatMessage, Role};
pub use expert::ExpertRecord;
pub use segment::{AttributedSegment, AttributionBasis, Segment};
pub use source::{Source, SourceKind};
