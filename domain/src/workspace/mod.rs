//! Workspace: everything the logged-in user can see.
//!
//! - [`aggregate::Workspace`]: servers, channels, selection and messages
//! - [`seed`]: mock data loaded at login

pub mod aggregate;
pub mod seed;
