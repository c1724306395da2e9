//! Unit-type handlers.
//!
//! Each kind gets one stateless handler implementing [`UnitHandler`]. A
//! handler owns everything kind-specific: how to read the document, which
//! rules apply, and how weight, battle value and cost are scored.
//! [`handler_for`] is the single exhaustive mapping from kind to handler.

pub mod aerospace;
pub mod battle_armor;
pub mod capital;
pub mod dropship;
pub mod infantry;
pub mod jumpship;
pub mod mech;
pub mod protomech;
pub mod space_station;
pub mod vehicle;
pub mod vtol;
pub mod warship;

use crate::common::CommonFields;
use crate::document::UnitDocument;
use crate::lookup::{canonical_id, classify_rules_level, classify_tech_base, resolve_era};
use crate::serialization::{display_name, DeserializeOutcome, SerializedUnit};
use crate::unit::{RulesLevel, Unit, UnitBase, UnitPayload, UnitType, WeightClass};
use crate::validation::{validate_unit, ValidationReport};

/// Kind-specific output of the parse step.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    /// Tonnage as read or derived (infantry and battle armor derive it).
    pub tonnage: f64,
    /// Kind-specific record.
    pub payload: UnitPayload,
    /// Problems that prevent building a record.
    pub errors: Vec<String>,
    /// Problems recovered from with a default.
    pub warnings: Vec<String>,
}

impl ParsedFields {
    /// Parsed fields with no diagnostics.
    #[must_use]
    pub const fn new(tonnage: f64, payload: UnitPayload) -> Self {
        Self {
            tonnage,
            payload,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Attach warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Behavior of one unit kind.
///
/// Every method is pure. Scoring methods return 0 when handed a record of
/// another kind or a degenerate record.
pub trait UnitHandler: Send + Sync {
    /// Kind this handler owns.
    fn unit_type(&self) -> UnitType;

    /// Whether this handler claims the document.
    fn can_handle(&self, doc: &UnitDocument) -> bool {
        doc.mapped_unit_type() == Some(self.unit_type())
    }

    /// Location vocabulary, in display order.
    fn locations(&self) -> Vec<&'static str>;

    /// Rules level used when the `type` block names none.
    fn default_rules_level(&self) -> RulesLevel {
        RulesLevel::Standard
    }

    /// Weight class of a parsed record.
    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass;

    /// Read the kind-specific part of the document.
    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields;

    /// Merge common and kind-specific fields into a record.
    fn combine_fields(&self, common: &CommonFields, parsed: ParsedFields) -> Unit {
        let base = base_from_common(
            common,
            self.unit_type(),
            parsed.tonnage,
            self.weight_class(&parsed),
            self.default_rules_level(),
        );
        let unit = Unit {
            base,
            payload: parsed.payload,
        };
        debug_check_record(&unit);
        unit
    }

    /// Kind-specific rules, appended to `report`.
    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport);

    /// Common rules followed by the kind's rules.
    fn validate(&self, unit: &Unit) -> ValidationReport {
        validate_unit(self, unit)
    }

    /// Calculated weight in tons.
    fn calculate_weight(&self, unit: &Unit) -> f64;

    /// Battle value.
    fn calculate_bv(&self, unit: &Unit) -> u32;

    /// C-bill cost.
    fn calculate_cost(&self, unit: &Unit) -> u64;

    /// Interchange form of a record.
    fn serialize(&self, unit: &Unit) -> SerializedUnit;

    /// Rebuild a record from its interchange form.
    fn deserialize(&self, _serialized: &SerializedUnit) -> DeserializeOutcome {
        DeserializeOutcome::unsupported(self.unit_type())
    }
}

/// Handler for a kind.
#[must_use]
pub fn handler_for(unit_type: UnitType) -> Box<dyn UnitHandler> {
    match unit_type {
        UnitType::BattleMech => Box::new(mech::MechHandler),
        UnitType::Vehicle => Box::new(vehicle::VehicleHandler),
        UnitType::Vtol => Box::new(vtol::VtolHandler),
        UnitType::Aerospace => Box::new(aerospace::AerospaceHandler),
        UnitType::BattleArmor => Box::new(battle_armor::BattleArmorHandler),
        UnitType::Infantry => Box::new(infantry::InfantryHandler),
        UnitType::ProtoMech => Box::new(protomech::ProtoMechHandler),
        UnitType::JumpShip => Box::new(jumpship::JumpShipHandler),
        UnitType::DropShip => Box::new(dropship::DropShipHandler),
        UnitType::SpaceStation => Box::new(space_station::SpaceStationHandler),
        UnitType::WarShip => Box::new(warship::WarShipHandler),
    }
}

/// Build the shared base from common fields with calculated fields zeroed.
#[must_use]
pub fn base_from_common(
    common: &CommonFields,
    unit_type: UnitType,
    tonnage: f64,
    weight_class: WeightClass,
    default_rules_level: RulesLevel,
) -> UnitBase {
    UnitBase {
        id: canonical_id(&common.chassis, &common.model),
        name: display_name(&common.chassis, &common.model),
        chassis: common.chassis.clone(),
        model: common.model.clone(),
        unit_type,
        tonnage,
        weight_class,
        tech_base: classify_tech_base(&common.tech_base_raw),
        era: resolve_era(&common.era_raw, common.year),
        rules_level: classify_rules_level(&common.tech_base_raw, default_rules_level),
        role: common.role.clone(),
        source: common.source.clone(),
        year: common.year,
        bv: 0,
        cost: 0,
        total_weight: 0.0,
        remaining_tonnage: tonnage,
        is_valid: false,
        validation_errors: Vec::new(),
    }
}

/// Ground-unit weight class by tonnage (mechs, vehicles, fighters).
#[must_use]
pub fn standard_weight_class(tonnage: f64) -> WeightClass {
    if tonnage < 20.0 {
        WeightClass::Ultralight
    } else if tonnage < 40.0 {
        WeightClass::Light
    } else if tonnage < 60.0 {
        WeightClass::Medium
    } else if tonnage < 80.0 {
        WeightClass::Heavy
    } else if tonnage <= 100.0 {
        WeightClass::Assault
    } else {
        WeightClass::SuperHeavy
    }
}

/// Sum of an armor allocation.
#[must_use]
pub fn total_armor(points: &[u32]) -> u32 {
    points.iter().fold(0, |sum, &p| sum.saturating_add(p))
}

/// Check record invariants that parsing must establish.
#[cfg(feature = "debug-validation")]
pub(crate) fn debug_check_record(unit: &Unit) {
    debug_assert_eq!(unit.base.unit_type, unit.payload.unit_type());
    debug_assert!(unit.base.tonnage.is_finite());
    match &unit.payload {
        UnitPayload::Infantry(p) => {
            debug_assert_eq!(p.platoon_strength, p.squad_size * p.number_of_squads);
        }
        UnitPayload::JumpShip(p) => debug_assert_eq!(p.core.crew.pilots, 2),
        UnitPayload::DropShip(p) => debug_assert_eq!(p.core.crew.pilots, 2),
        UnitPayload::WarShip(p) => debug_assert_eq!(p.core.crew.pilots, 2),
        UnitPayload::SpaceStation(p) => debug_assert_eq!(p.core.crew.pilots, 0),
        _ => {}
    }
}

#[cfg(not(feature = "debug-validation"))]
#[inline]
pub(crate) fn debug_check_record(_unit: &Unit) {}
