//! # MekForge Core
//!
//! Construction, validation and scoring engine for tabletop unit records.
//!
//! This crate contains **only** pure logic:
//! - No file or network IO
//! - No global state
//! - No logging subscriber (callers install one)
//!
//! A decoded legacy unit file ([`document::UnitDocument`]) goes through the
//! pipeline parse → validate → score → serialize, driven by
//! [`registry::HandlerRegistry`].
//!
//! ## Crate Structure
//!
//! - [`document`] - Decoded unit file model
//! - [`lookup`] - Classification tables and rounding helpers
//! - [`components`] - Engine, gyro, cockpit, structure, armor and heat sink types
//! - [`common`] - Fields shared by every kind
//! - [`unit`] - Unit record and kind payloads
//! - [`equipment`] - Mounted equipment
//! - [`handlers`] - One handler per unit kind
//! - [`validation`] - Validation reports
//! - [`serialization`] - Interchange format
//! - [`registry`] - Handler registry and pipeline

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod common;
pub mod components;
pub mod document;
pub mod equipment;
pub mod error;
pub mod handlers;
pub mod lookup;
pub mod registry;
pub mod serialization;
pub mod unit;
pub mod validation;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{TagValue, UnitDocument};
    pub use crate::error::{EngineError, Result};
    pub use crate::handlers::{handler_for, ParsedFields, UnitHandler};
    pub use crate::registry::{HandlerRegistry, ParseResult, ProcessedUnit};
    pub use crate::serialization::{DeserializeOutcome, SerializedUnit};
    pub use crate::unit::{
        Era, RulesLevel, TechBase, Unit, UnitBase, UnitPayload, UnitType, WeightClass,
    };
    pub use crate::validation::ValidationReport;
}
