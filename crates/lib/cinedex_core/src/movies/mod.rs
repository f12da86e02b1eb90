//! Movie collection logic.
//!
//! Field validation plus the store queries for create/read/update/soft-delete,
//! filtered listing, and transactional bulk insert.

pub mod queries;
pub mod validation;

use thiserror::Error;

/// Movie operation errors.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("{0}")]
    Validation(String),

    #[error("Movie not found")]
    NotFound,

    #[error("A movie with this title already exists")]
    DuplicateTitle,

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}
