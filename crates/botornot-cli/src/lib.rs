//! BotOrNot CLI library.
//!
//! Configuration, command execution, the chat session and output formatting
//! behind the `botornot` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod session;
pub mod view_state;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::{ChatSession, Turn};
pub use view_state::ViewState;
