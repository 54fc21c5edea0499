//! Conversation domain.
//!
//! - [`entities::Message`]: a message posted in a channel
//! - [`entities::ChatTurn`]: a (role, text) pair used to seed a bot session
//! - [`entities::history_for`]: channel messages to turns

pub mod entities;
