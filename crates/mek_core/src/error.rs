//! Error types for the unit engine.

use thiserror::Error;

use crate::unit::UnitType;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Top-level error type for engine failures.
///
/// Rule violations are never reported through this type; they live in
/// [`crate::validation::ValidationReport`]. These errors cover the cases where
/// the engine cannot even decide how to treat a document or record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No registered handler claims the document.
    #[error("No handler for unit type '{0}'")]
    NoHandler(String),

    /// More than one registered handler claims the document.
    #[error("Multiple handlers claim unit type '{unit_type}': {claimants:?}")]
    AmbiguousHandler {
        /// Raw unit type tag from the document.
        unit_type: String,
        /// Kinds of every handler that claimed the document.
        claimants: Vec<UnitType>,
    },

    /// A handler was asked to work on a record of another kind.
    #[error("Handler for {expected} cannot process a {found} record")]
    WrongKind {
        /// Kind the handler supports.
        expected: UnitType,
        /// Kind of the record it was given.
        found: UnitType,
    },

    /// The registry has no handler for a unit type.
    #[error("No handler registered for {0}")]
    Unregistered(UnitType),
}
