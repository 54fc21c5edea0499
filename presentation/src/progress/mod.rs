//! Progress display

pub mod typing;
