//! Handler registry.
//!
//! The registry owns one handler per kind and is the entry point for the
//! parse → validate → score pipeline. It is built once and never mutated, so
//! it can be shared freely between threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::extract_common_fields;
use crate::document::UnitDocument;
use crate::error::{EngineError, Result};
use crate::handlers::{handler_for, UnitHandler};
use crate::serialization::{DeserializeOutcome, SerializedUnit};
use crate::unit::{Unit, UnitType};
use crate::validation::ValidationReport;

/// Output of [`HandlerRegistry::parse`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    /// The record, absent when the document could not be turned into one.
    pub unit: Option<Unit>,
    /// Problems that prevented building a record.
    pub errors: Vec<String>,
    /// Problems recovered from with a default.
    pub warnings: Vec<String>,
}

impl ParseResult {
    fn failed(error: &EngineError) -> Self {
        Self {
            unit: None,
            errors: vec![error.to_string()],
            warnings: Vec::new(),
        }
    }
}

/// Output of [`HandlerRegistry::process`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessedUnit {
    /// Scored record with validation state filled in.
    pub unit: Option<Unit>,
    /// Validation outcome. Empty when parsing failed.
    pub report: ValidationReport,
    /// Parse errors.
    pub parse_errors: Vec<String>,
    /// Parse warnings.
    pub parse_warnings: Vec<String>,
}

impl ProcessedUnit {
    /// True when the document parsed and the record passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.unit.is_some() && self.parse_errors.is_empty() && self.report.is_valid()
    }

    /// Parse and validation warnings together.
    pub fn all_warnings(&self) -> impl Iterator<Item = &str> {
        self.parse_warnings
            .iter()
            .chain(&self.report.warnings)
            .map(String::as_str)
    }
}

/// Set of handlers consulted for every document.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn UnitHandler>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl HandlerRegistry {
    /// One handler for every kind.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_handlers(UnitType::ALL.into_iter().map(handler_for).collect())
    }

    /// Registry over a custom handler set.
    #[must_use]
    pub fn with_handlers(handlers: Vec<Box<dyn UnitHandler>>) -> Self {
        Self { handlers }
    }

    /// Kinds of the registered handlers, in registration order.
    #[must_use]
    pub fn kinds(&self) -> Vec<UnitType> {
        self.handlers.iter().map(|h| h.unit_type()).collect()
    }

    /// First handler registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: UnitType) -> Option<&dyn UnitHandler> {
        self.handlers
            .iter()
            .find(|h| h.unit_type() == kind)
            .map(AsRef::as_ref)
    }

    fn handler(&self, kind: UnitType) -> Result<&dyn UnitHandler> {
        self.get(kind).ok_or(EngineError::Unregistered(kind))
    }

    /// The single handler claiming `doc`.
    pub fn resolve(&self, doc: &UnitDocument) -> Result<&dyn UnitHandler> {
        let mut claimants = self.handlers.iter().filter(|h| h.can_handle(doc));
        let Some(first) = claimants.next() else {
            return Err(EngineError::NoHandler(doc.unit_type.clone()));
        };
        let rest: Vec<UnitType> = claimants.map(|h| h.unit_type()).collect();
        if !rest.is_empty() {
            let mut all = vec![first.unit_type()];
            all.extend(rest);
            return Err(EngineError::AmbiguousHandler {
                unit_type: doc.unit_type.clone(),
                claimants: all,
            });
        }
        tracing::debug!(unit_type = %doc.unit_type, kind = %first.unit_type(), "Resolved handler");
        Ok(first.as_ref())
    }

    /// Parse a document into a record. Never fails; engine errors land in
    /// [`ParseResult::errors`].
    #[must_use]
    pub fn parse(&self, doc: &UnitDocument) -> ParseResult {
        let handler = match self.resolve(doc) {
            Ok(handler) => handler,
            Err(err) => {
                tracing::debug!(error = %err, "Cannot parse document");
                return ParseResult::failed(&err);
            }
        };

        let parsed = handler.parse_type_specific_fields(doc);
        for warning in &parsed.warnings {
            tracing::debug!(unit = %doc.name, warning = %warning, "Parse warning");
        }
        let errors = parsed.errors.clone();
        let warnings = parsed.warnings.clone();
        if !errors.is_empty() {
            return ParseResult {
                unit: None,
                errors,
                warnings,
            };
        }

        let unit = handler.combine_fields(&extract_common_fields(doc), parsed);
        ParseResult {
            unit: Some(unit),
            errors,
            warnings,
        }
    }

    /// Validate a record with its kind's handler.
    pub fn validate(&self, unit: &Unit) -> Result<ValidationReport> {
        Ok(self.handler(unit.unit_type())?.validate(unit))
    }

    /// Copy of a record with weight, battle value, cost and validation state
    /// filled in.
    pub fn score(&self, unit: &Unit) -> Result<(Unit, ValidationReport)> {
        let handler = self.handler(unit.unit_type())?;
        let report = handler.validate(unit);
        let weight = handler.calculate_weight(unit);
        let bv = handler.calculate_bv(unit);
        let cost = handler.calculate_cost(unit);
        tracing::debug!(
            unit = %unit.base.id,
            weight,
            bv,
            cost,
            valid = report.is_valid(),
            "Scored unit"
        );
        Ok((unit.with_scores(weight, bv, cost, report.errors.clone()), report))
    }

    /// Parse, validate and score a document.
    #[must_use]
    pub fn process(&self, doc: &UnitDocument) -> ProcessedUnit {
        let parsed = self.parse(doc);
        let Some(unit) = parsed.unit else {
            return ProcessedUnit {
                unit: None,
                report: ValidationReport::new(),
                parse_errors: parsed.errors,
                parse_warnings: parsed.warnings,
            };
        };
        match self.score(&unit) {
            Ok((scored, report)) => ProcessedUnit {
                unit: Some(scored),
                report,
                parse_errors: parsed.errors,
                parse_warnings: parsed.warnings,
            },
            Err(err) => ProcessedUnit {
                unit: None,
                report: ValidationReport::new(),
                parse_errors: vec![err.to_string()],
                parse_warnings: parsed.warnings,
            },
        }
    }

    /// Interchange form of a record.
    pub fn serialize(&self, unit: &Unit) -> Result<SerializedUnit> {
        Ok(self.handler(unit.unit_type())?.serialize(unit))
    }

    /// Rebuild a record, picking the handler from its `unitType` label.
    ///
    /// An unknown label or a missing handler is a
    /// [`DeserializeOutcome::Failure`] carrying the error text.
    #[must_use]
    pub fn deserialize(&self, serialized: &SerializedUnit) -> DeserializeOutcome {
        let handler = UnitType::from_label(&serialized.unit_type)
            .ok_or_else(|| EngineError::NoHandler(serialized.unit_type.clone()))
            .and_then(|kind| self.handler(kind));
        match handler {
            Ok(handler) => handler.deserialize(serialized),
            Err(err) => {
                tracing::debug!("Cannot deserialize {}: {err}", serialized.unit_type);
                DeserializeOutcome::Failure(vec![err.to_string()])
            }
        }
    }
}
