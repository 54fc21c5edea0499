//! Interactive chat module
//!
//! Provides a readline-based interface to the chat workspace.

pub mod command;
mod repl;

pub use command::{CommandError, ReplCommand};
pub use repl::ChatRepl;
