//! Validation aggregation.
//!
//! A [`ValidationReport`] collects messages in the order rules run: common
//! rules first, then the active handler's rules. Messages are never sorted or
//! deduplicated because callers jump to the first error.

use serde::{Deserialize, Serialize};

use crate::handlers::UnitHandler;
use crate::unit::Unit;

/// Outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Advisory problems.
    pub warnings: Vec<String>,
    /// Informational notes.
    pub infos: Vec<String>,
}

impl ValidationReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record an informational note.
    pub fn info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    /// Record an error unless `value` lies in `[min, max]`.
    pub fn check_range(&mut self, what: &str, value: f64, min: f64, max: f64, units: &str) {
        if value < min || value > max {
            self.error(format!(
                "{what} {} is outside the allowed range {}-{} {units}",
                fmt_number(value),
                fmt_number(min),
                fmt_number(max)
            ));
        }
    }

    /// Record an error unless `value >= min`.
    pub fn check_min(&mut self, what: &str, value: f64, min: f64) {
        if value < min {
            self.error(format!(
                "{what} must be at least {} (found {})",
                fmt_number(min),
                fmt_number(value)
            ));
        }
    }

    /// True when any error mentions `needle` (case-insensitive).
    #[must_use]
    pub fn has_error_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.errors.iter().any(|e| e.to_lowercase().contains(&needle))
    }
}

fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Rules every record must satisfy regardless of kind.
pub fn check_common_rules(unit: &Unit, report: &mut ValidationReport) {
    if unit.base.tonnage < 0.0 || !unit.base.tonnage.is_finite() {
        report.error(format!(
            "Tonnage must be non-negative (found {})",
            unit.base.tonnage
        ));
    }
    if unit.base.chassis.trim().is_empty() {
        report.error("Chassis name is required");
    }
    if unit.base.model.trim().is_empty() {
        report.info("No model designation set");
    }
}

/// Run the common rules and then the handler's own rules.
pub fn validate_unit<H: UnitHandler + ?Sized>(handler: &H, unit: &Unit) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_common_rules(unit, &mut report);

    if unit.unit_type() != handler.unit_type() {
        report.error(format!(
            "{} handler cannot validate a {} record",
            handler.unit_type(),
            unit.unit_type()
        ));
        return report;
    }

    handler.validate_type_specific_rules(unit, &mut report);

    tracing::trace!(
        unit = %unit.base.id,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated unit"
    );
    report
}
