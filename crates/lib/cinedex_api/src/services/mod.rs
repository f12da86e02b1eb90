//! Services orchestrating core operations for the handlers.

pub mod auth;
pub mod movies;
