//! Repositories for stations, lines, and sections

pub mod lines;
pub mod sections;
pub mod stations;

pub use lines::{LineDetail, LineRecord, LineRepo};
pub use sections::{SectionRecord, SectionRepo};
pub use stations::{StationRecord, StationRepo};

use metroctl_core::{SectionError, ValidationError};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Section chain invariant violation; nothing was mutated.
    #[error(transparent)]
    Chain(#[from] SectionError),

    /// Stored row failed domain validation on load.
    #[error("invalid stored value: {0}")]
    Invalid(#[from] ValidationError),
}
