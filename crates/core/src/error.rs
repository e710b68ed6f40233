//! Engine error type.

/// Errors surfaced by the analytics engine.
///
/// The engine recovers from malformed values locally (coercion, row
/// drops); these variants cover the cases where input is structurally
/// unusable.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A metric column name that no observation row carries.
    #[error("unknown metric column: {0}")]
    UnknownMetric(String),

    /// A date string that matches none of the accepted formats.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
