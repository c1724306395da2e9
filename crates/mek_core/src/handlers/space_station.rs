//! Space stations.

use serde::{Deserialize, Serialize};

use super::capital::{
    capital_weight_class, has_kf_drive, non_broadside_labels, parse_core, CapitalArc,
    CapitalCore, STATION_ARMOR_ORDER,
};
use super::jumpship::STATION_KEEPING_FRACTION;
use super::{ParsedFields, UnitHandler};
use crate::document::UnitDocument;
use crate::lookup::{cbills, round_kg};
use crate::serialization::SerializedUnit;
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal space station.
pub const MIN_TONNAGE: f64 = 2000.0;
/// Heaviest legal space station.
pub const MAX_TONNAGE: f64 = 2_500_000.0;

/// Space station record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceStationPayload {
    /// Shared capital fields. Stations carry no pilots.
    pub core: CapitalCore<CapitalArc>,
    /// Docking collars.
    pub docking_collars: u32,
    /// Modular construction (assembled in orbit from K-F transportable sections).
    pub is_modular: bool,
}

/// Handler for space stations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceStationHandler;

fn payload(unit: &Unit) -> Option<&SpaceStationPayload> {
    match &unit.payload {
        UnitPayload::SpaceStation(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for SpaceStationHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::SpaceStation
    }

    fn locations(&self) -> Vec<&'static str> {
        non_broadside_labels()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        capital_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let parsed = parse_core::<CapitalArc>(doc, STATION_ARMOR_ORDER.len(), 0);
        let mut warnings = parsed.warnings;
        if has_kf_drive(doc) {
            warnings.push("Space stations cannot mount a K-F drive; ignored".to_string());
        }
        let payload = SpaceStationPayload {
            core: parsed.core,
            docking_collars: doc
                .tag_number("docking_collars")
                .map_or(0, |n| n.max(0.0) as u32),
            is_modular: doc.tag_flag("modular"),
        };
        ParsedFields::new(doc.tonnage, UnitPayload::SpaceStation(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if p.core.safe_thrust > 0 {
            report.warning(format!(
                "Space stations only station-keep; safe thrust {} is ignored",
                p.core.safe_thrust
            ));
        }
        if p.core.equipment.iter().any(|m| m.location.is_broadside()) {
            report.error("Broadside arcs are only available on WarShips");
        }
        p.core.validate(report);
    }

    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        round_kg(p.core.hull_weight(tonnage) + tonnage * STATION_KEEPING_FRACTION)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        payload(unit).map_or(0, |p| p.core.battle_value())
    }

    /// Hull + 50 per ton of station-keeping drive + 100,000 per docking
    /// collar, x1.25 when modular.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let base =
            p.core.hull_cost() + 50.0 * tonnage + 100_000.0 * f64::from(p.docking_collars);
        let modular = if p.is_modular { 1.25 } else { 1.0 };
        cbills(base * modular)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, "Space Station");
        p.core.serialize_into(&mut out, &STATION_ARMOR_ORDER);
        out.extend("dockingCollars", p.docking_collars);
        out.extend("modular", u32::from(p.is_modular));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::extract_common_fields;

    fn create_test_doc() -> UnitDocument {
        UnitDocument {
            unit_type: "SpaceStation".to_string(),
            name: "Olympus".to_string(),
            model: "Recharge Station".to_string(),
            year: 2300,
            tech_type: "IS Level 2".to_string(),
            tonnage: 100_000.0,
            structural_integrity: Some(1),
            heatsinks: Some(200),
            crew: Some(30),
            passengers: Some(60),
            escape_pod: Some(10),
            life_boat: Some(5),
            armor: vec![30, 30, 30, 30, 30, 30],
            transporters: vec!["smallcraftbay:4:2".to_string()],
            ..Default::default()
        }
    }

    fn build(doc: &UnitDocument) -> Unit {
        let parsed = SpaceStationHandler.parse_type_specific_fields(doc);
        SpaceStationHandler.combine_fields(&extract_common_fields(doc), parsed)
    }

    #[test]
    fn test_parse_station() {
        let unit = build(&create_test_doc());
        let p = payload(&unit).unwrap();
        assert_eq!(p.core.crew.pilots, 0);
        assert_eq!(p.core.escape_capacity(), 90);
        let report = SpaceStationHandler.validate(&unit);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_thrust_is_a_warning() {
        let mut doc = create_test_doc();
        doc.safe_thrust = Some(1);
        let report = SpaceStationHandler.validate(&build(&doc));
        assert!(report.is_valid());
        assert!(report.warnings[0].contains("safe thrust 1"));
    }

    #[test]
    fn test_tonnage_floor() {
        let mut doc = create_test_doc();
        doc.tonnage = 1500.0;
        let report = SpaceStationHandler.validate(&build(&doc));
        assert!(report.has_error_containing("2000-2500000"));
    }

    #[test]
    fn test_broadside_mounts_rejected() {
        let mut doc = create_test_doc();
        doc.equipment.insert(
            "Left Broadside Equipment".to_string(),
            vec!["Naval Laser 55".to_string()],
        );
        let report = SpaceStationHandler.validate(&build(&doc));
        assert!(report.has_error_containing("broadside"));
    }

    #[test]
    fn test_modular_cost_premium() {
        let plain = build(&create_test_doc());
        let mut doc = create_test_doc();
        doc.tags.insert(
            "modular".to_string(),
            crate::document::TagValue::Single("yes".to_string()),
        );
        let modular = build(&doc);
        assert!(
            SpaceStationHandler.calculate_cost(&modular) > SpaceStationHandler.calculate_cost(&plain)
        );
    }
}
