//! Channels: named conversation threads within a server.

pub mod entities;
