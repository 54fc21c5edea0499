//! Servers (groups): named collections of channels and members.
//!
//! - [`entities::Server`]: the server with its member list
//! - [`entities::CreateServerData`] / [`entities::UpdateServerData`]: dialog inputs
//! - [`value_objects::ServerRole`] / [`value_objects::ServerCategory`]

pub mod entities;
pub mod value_objects;
