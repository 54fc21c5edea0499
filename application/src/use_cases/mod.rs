//! Use cases for the application layer

pub mod post_message;
pub mod send_message;
