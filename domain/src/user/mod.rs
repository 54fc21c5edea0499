//! Users: the logged-in person, the mock directory and the bot participant.

pub mod entities;
