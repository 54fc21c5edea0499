//! Domain layer for gemchat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Workspace
//!
//! Everything a logged-in user sees lives in one in-memory [`Workspace`]:
//!
//! - **Server**: a named grouping of channels and members
//! - **Channel**: a named conversation thread within a server
//! - **Message**: a post in a channel, by a user or by the bot
//!
//! Nothing is persisted. Logging in seeds mock data; logging out drops it.
//!
//! ## Chat turns
//!
//! When the bot answers in a channel, the channel's earlier messages become
//! [`ChatTurn`]s (human or assistant) that seed the bot's conversation.

pub mod api_reference;
pub mod channel;
pub mod conversation;
pub mod core;
pub mod server;
pub mod user;
pub mod workspace;

// Re-export commonly used types
pub use api_reference::{ApiReference, Endpoint, EventDirection, HttpMethod, SocketEvent, api_reference};
pub use channel::entities::{Channel, ChannelDraft, ChannelIcon, ChannelPermissions};
pub use conversation::entities::{ChatTurn, Message, TurnRole, history_for};
pub use core::{error::DomainError, id::IdGenerator};
pub use server::{
    entities::{CreateServerData, Member, Server, UpdateServerData},
    value_objects::{ServerCategory, ServerRole},
};
pub use user::entities::{BOT_USER_ID, ProfileUpdate, User};
pub use workspace::{aggregate::Workspace, seed::WELCOME_MESSAGE};
