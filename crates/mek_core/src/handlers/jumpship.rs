//! JumpShips.

use serde::{Deserialize, Serialize};

use super::capital::{
    capital_weight_class, has_kf_drive, kf_battle_value, kf_rating, non_broadside_labels,
    parse_core, CapitalArc, CapitalCore, KF_COST_PER_RATING, STATION_ARMOR_ORDER,
};
use super::{ParsedFields, UnitHandler};
use crate::document::UnitDocument;
use crate::lookup::{battle_value, cbills, round_kg};
use crate::serialization::SerializedUnit;
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal JumpShip.
pub const MIN_TONNAGE: f64 = 50_000.0;
/// Heaviest legal JumpShip.
pub const MAX_TONNAGE: f64 = 500_000.0;
/// Pilots on every JumpShip.
pub const PILOTS: u32 = 2;

/// K-F drive share of a JumpShip's tonnage.
pub const KF_DRIVE_FRACTION: f64 = 0.9525;
/// Station-keeping drive share of tonnage.
pub const STATION_KEEPING_FRACTION: f64 = 0.012;

/// Flat C-bill cost of a lithium-fusion battery.
pub const LF_BATTERY_FLAT_COST: f64 = 10_000_000.0;
/// Lithium-fusion battery cost as a share of the K-F drive cost.
pub const LF_BATTERY_DRIVE_SHARE: f64 = 0.1;

/// JumpShip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpShipPayload {
    /// Shared capital fields.
    pub core: CapitalCore<CapitalArc>,
    /// Kearny-Fuchida drive fitted.
    pub has_kf_drive: bool,
    /// K-F drive rating.
    pub kf_rating: u32,
    /// Lithium-fusion battery fitted.
    pub has_lf_battery: bool,
    /// Docking collars for DropShips.
    pub docking_collars: u32,
}

/// K-F drive cost plus the lithium-fusion battery when fitted.
#[must_use]
pub fn jump_drive_cost(kf_rating: u32, has_lf_battery: bool) -> f64 {
    let drive = KF_COST_PER_RATING * f64::from(kf_rating);
    if has_lf_battery {
        drive + LF_BATTERY_FLAT_COST + drive * LF_BATTERY_DRIVE_SHARE
    } else {
        drive
    }
}

/// Handler for JumpShips.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpShipHandler;

fn payload(unit: &Unit) -> Option<&JumpShipPayload> {
    match &unit.payload {
        UnitPayload::JumpShip(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for JumpShipHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::JumpShip
    }

    fn locations(&self) -> Vec<&'static str> {
        non_broadside_labels()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        capital_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let parsed = parse_core::<CapitalArc>(doc, STATION_ARMOR_ORDER.len(), PILOTS);
        let has_kf_drive = has_kf_drive(doc);
        let payload = JumpShipPayload {
            core: parsed.core,
            has_kf_drive,
            kf_rating: kf_rating(doc, has_kf_drive),
            has_lf_battery: doc.tag_flag("lf"),
            docking_collars: doc
                .tag_number("docking_collars")
                .map_or(0, |n| n.max(0.0) as u32),
        };
        ParsedFields::new(doc.tonnage, UnitPayload::JumpShip(payload))
            .with_warnings(parsed.warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if !p.has_kf_drive {
            report.error("JumpShips require a K-F drive");
        }
        if p.has_lf_battery {
            report.info("Lithium-fusion battery allows a second jump before recharging");
        }
        if p.core.equipment.iter().any(|m| m.location.is_broadside()) {
            report.error("Broadside arcs are only available on WarShips");
        }
        p.core.validate(report);
    }

    /// Hull plus K-F drive and station-keeping drive.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let drive = if p.has_kf_drive {
            tonnage * KF_DRIVE_FRACTION
        } else {
            0.0
        };
        round_kg(p.core.hull_weight(tonnage) + drive + tonnage * STATION_KEEPING_FRACTION)
    }

    /// Hull battle value plus the K-F drive term.
    fn calculate_bv(&self, unit: &Unit) -> u32 {
        payload(unit).map_or(0, |p| {
            battle_value(p.core.raw_battle_value() + kf_battle_value(p.has_kf_drive, p.kf_rating))
        })
    }

    /// Hull + K-F rating x 100,000,000 (+ lithium-fusion battery) + 50 per
    /// ton of station-keeping drive + 100,000 per docking collar.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        cbills(
            p.core.hull_cost()
                + jump_drive_cost(p.kf_rating, p.has_lf_battery)
                + 50.0 * tonnage
                + 100_000.0 * f64::from(p.docking_collars),
        )
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, "JumpShip");
        p.core.serialize_into(&mut out, &STATION_ARMOR_ORDER);
        out.extend("kfDrive", u32::from(p.has_kf_drive));
        out.extend("kfRating", p.kf_rating);
        out.extend("lithiumFusion", u32::from(p.has_lf_battery));
        out.extend("dockingCollars", p.docking_collars);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::extract_common_fields;
    use crate::document::TagValue;
    use crate::handlers::capital::KF_BV_PER_RATING;

    fn create_test_doc() -> UnitDocument {
        let mut doc = UnitDocument {
            unit_type: "JumpShip".to_string(),
            name: "Invader".to_string(),
            model: "(2631)".to_string(),
            year: 2631,
            tech_type: "IS Level 2".to_string(),
            tonnage: 152_000.0,
            structural_integrity: Some(1),
            heatsinks: Some(117),
            fuel: Some(500),
            crew: Some(20),
            officers: Some(4),
            gunners: Some(2),
            passengers: Some(4),
            escape_pod: Some(2),
            life_boat: Some(2),
            armor: vec![11, 11, 11, 11, 11, 11],
            transporters: vec!["cargobay:1219:2".to_string()],
            ..Default::default()
        };
        doc.equipment
            .insert("Hull Equipment".to_string(), vec!["K-F Drive".to_string()]);
        doc.tags.insert(
            "docking_collars".to_string(),
            TagValue::Single("3".to_string()),
        );
        doc
    }

    fn build(doc: &UnitDocument) -> Unit {
        let parsed = JumpShipHandler.parse_type_specific_fields(doc);
        JumpShipHandler.combine_fields(&extract_common_fields(doc), parsed)
    }

    #[test]
    fn test_parse_invader() {
        let unit = build(&create_test_doc());
        let p = payload(&unit).unwrap();
        assert!(p.has_kf_drive);
        assert_eq!(p.kf_rating, 1);
        assert_eq!(p.docking_collars, 3);
        assert_eq!(p.core.crew.pilots, PILOTS);
        assert_eq!(p.core.bays.len(), 1);
        assert_eq!(unit.base.weight_class, WeightClass::Heavy);
        let report = JumpShipHandler.validate(&unit);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_small_tonnage_is_an_error() {
        let mut doc = create_test_doc();
        doc.tonnage = 3000.0;
        let report = JumpShipHandler.validate(&build(&doc));
        assert!(report.has_error_containing("tonnage 3000"));
    }

    #[test]
    fn test_kf_drive_required() {
        let mut doc = create_test_doc();
        doc.equipment.clear();
        let report = JumpShipHandler.validate(&build(&doc));
        assert!(report.has_error_containing("k-f drive"));
    }

    #[test]
    fn test_lithium_fusion_info_and_cost() {
        let plain = build(&create_test_doc());
        let mut doc = create_test_doc();
        doc.tags
            .insert("lf".to_string(), TagValue::Single("true".to_string()));
        let lf = build(&doc);

        let report = JumpShipHandler.validate(&lf);
        assert!(report.is_valid());
        assert_eq!(report.infos.len(), 1);
        assert!(report.infos[0].contains("Lithium-fusion"));
        assert_eq!(
            JumpShipHandler.calculate_cost(&lf) - JumpShipHandler.calculate_cost(&plain),
            20_000_000
        );
    }

    #[test]
    fn test_cost_includes_kf_rating() {
        let mut doc = create_test_doc();
        let base = JumpShipHandler.calculate_cost(&build(&doc));
        doc.tags
            .insert("kf_rating".to_string(), TagValue::Single("3".to_string()));
        let rated = JumpShipHandler.calculate_cost(&build(&doc));
        assert_eq!(rated - base, 200_000_000);
    }

    #[test]
    fn test_bv_scales_with_kf_rating() {
        let mut doc = create_test_doc();
        let base = JumpShipHandler.calculate_bv(&build(&doc));
        doc.tags
            .insert("kf_rating".to_string(), TagValue::Single("5".to_string()));
        let rated = JumpShipHandler.calculate_bv(&build(&doc));
        assert_eq!(rated - base, 4 * KF_BV_PER_RATING as u32);

        let mut driveless = create_test_doc();
        driveless.equipment.clear();
        assert!(JumpShipHandler.calculate_bv(&build(&driveless)) < base);
    }

    #[test]
    fn test_serialize_carries_drive() {
        let unit = build(&create_test_doc());
        let serialized = JumpShipHandler.serialize(&unit);
        assert_eq!(serialized.extension_count("kfDrive"), 1);
        assert_eq!(serialized.extension_count("pilots"), 2);
        assert_eq!(serialized.armor.unwrap().allocation.len(), 6);
    }
}
