//! Operation error types for the query and mutation layers.

use thiserror::Error;

/// Outcome of a query or mutation operation.
///
/// Store-level failures are carried as a single variant: callers show a
/// generic message and the underlying cause goes to the logs only.
#[derive(Error, Debug)]
pub enum OpError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),
}
