//! # cinedex_core
//!
//! Core domain logic for Cinedex.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod movies;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
