//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.
//!
//! The document operations themselves are total; these errors surface only from
//! the reference resolution helpers, which callers may use directly.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A local reference whose target is missing from `components` (or forms a cycle).
    #[from(ignore)]
    #[display("Unresolved reference: {_0}")]
    UnresolvedReference(String),

    /// A `$ref` that does not point at `#/components/<section>/<name>` of this document.
    #[from(ignore)]
    #[display("Foreign reference: {_0}")]
    ForeignReference(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
