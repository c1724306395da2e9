//! WarShips.

use serde::{Deserialize, Serialize};

use super::capital::{
    capital_weight_class, has_kf_drive, kf_battle_value, kf_rating, parse_core, CapitalArc,
    CapitalCore, WARSHIP_ARMOR_ORDER,
};
use super::jumpship::jump_drive_cost;
use super::{ParsedFields, UnitHandler};
use crate::document::UnitDocument;
use crate::equipment::labels;
use crate::lookup::{battle_value, cbills, round_kg};
use crate::serialization::SerializedUnit;
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal WarShip.
pub const MIN_TONNAGE: f64 = 100_000.0;
/// Heaviest legal WarShip.
pub const MAX_TONNAGE: f64 = 2_500_000.0;
/// Pilots on every WarShip.
pub const PILOTS: u32 = 2;
/// Compact K-F drive share of tonnage.
pub const COMPACT_KF_FRACTION: f64 = 0.4525;

/// WarShip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarShipPayload {
    /// Shared capital fields.
    pub core: CapitalCore<CapitalArc>,
    /// Compact K-F drive fitted.
    pub has_kf_drive: bool,
    /// K-F drive rating.
    pub kf_rating: u32,
    /// Lithium-fusion battery fitted.
    pub has_lf_battery: bool,
}

/// Handler for WarShips.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarShipHandler;

fn payload(unit: &Unit) -> Option<&WarShipPayload> {
    match &unit.payload {
        UnitPayload::WarShip(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for WarShipHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::WarShip
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<CapitalArc>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        capital_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let parsed = parse_core::<CapitalArc>(doc, WARSHIP_ARMOR_ORDER.len(), PILOTS);
        let has_kf_drive = has_kf_drive(doc);
        let payload = WarShipPayload {
            core: parsed.core,
            has_kf_drive,
            kf_rating: kf_rating(doc, has_kf_drive),
            has_lf_battery: doc.tag_flag("lf"),
        };
        ParsedFields::new(doc.tonnage, UnitPayload::WarShip(payload))
            .with_warnings(parsed.warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if !p.has_kf_drive {
            report.error("WarShips require a K-F drive");
        }
        report.check_min("Safe thrust", f64::from(p.core.safe_thrust), 1.0);
        if p.has_lf_battery {
            report.info("Lithium-fusion battery allows a second jump before recharging");
        }
        p.core.validate(report);
    }

    /// Hull + compact K-F drive + `tonnage * safe thrust * 0.06` of thrust drive.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let kf = if p.has_kf_drive {
            tonnage * COMPACT_KF_FRACTION
        } else {
            0.0
        };
        let drive = tonnage * f64::from(p.core.safe_thrust) * 0.06;
        round_kg(p.core.hull_weight(tonnage) + kf + drive)
    }

    /// Hull battle value plus the K-F drive term.
    fn calculate_bv(&self, unit: &Unit) -> u32 {
        payload(unit).map_or(0, |p| {
            battle_value(p.core.raw_battle_value() + kf_battle_value(p.has_kf_drive, p.kf_rating))
        })
    }

    /// Hull + K-F drive (x1.5 for the compact core) + 1000 per ton per point of
    /// safe thrust.
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
                + 1.5 * jump_drive_cost(p.kf_rating, p.has_lf_battery)
                + 1000.0 * tonnage * f64::from(p.core.safe_thrust),
        )
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, "WarShip");
        p.core.serialize_into(&mut out, &WARSHIP_ARMOR_ORDER);
        out.extend("kfDrive", u32::from(p.has_kf_drive));
        out.extend("kfRating", p.kf_rating);
        out.extend("lithiumFusion", u32::from(p.has_lf_battery));
        out
    }
}
