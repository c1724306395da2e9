//! DropShips.

use serde::{Deserialize, Serialize};

use super::aerospace::AeroDesign;
use super::capital::{
    capital_weight_class, parse_core, CapitalCore, DropShipArc, DROPSHIP_ARMOR_ORDER,
};
use super::{ParsedFields, UnitHandler};
use crate::document::UnitDocument;
use crate::equipment::{labels, Mounted};
use crate::lookup::{cbills, round_kg};
use crate::serialization::SerializedUnit;
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal DropShip.
pub const MIN_TONNAGE: f64 = 200.0;
/// Heaviest legal DropShip.
pub const MAX_TONNAGE: f64 = 100_000.0;
/// Heaviest aerodyne DropShip.
pub const MAX_AERODYNE_TONNAGE: f64 = 35_000.0;
/// Pilots on every DropShip.
pub const PILOTS: u32 = 2;

/// Equipment mounted on a DropShip.
pub type DropShipMounted = Mounted<DropShipArc>;

/// DropShip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropShipPayload {
    /// Shared capital fields.
    pub core: CapitalCore<DropShipArc>,
    /// Hull design.
    pub design: AeroDesign,
}

/// Handler for DropShips.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropShipHandler;

fn payload(unit: &Unit) -> Option<&DropShipPayload> {
    match &unit.payload {
        UnitPayload::DropShip(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for DropShipHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::DropShip
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<DropShipArc>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        capital_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let parsed = parse_core::<DropShipArc>(doc, DROPSHIP_ARMOR_ORDER.len(), PILOTS);
        let payload = DropShipPayload {
            core: parsed.core,
            design: AeroDesign::from_text(doc.tag_str("design_type").unwrap_or_default()),
        };
        ParsedFields::new(doc.tonnage, UnitPayload::DropShip(payload))
            .with_warnings(parsed.warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        let tonnage = unit.base.tonnage;
        report.check_range("Tonnage", tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if p.design == AeroDesign::Aerodyne && tonnage > MAX_AERODYNE_TONNAGE {
            report.error(format!(
                "Aerodyne DropShips cannot exceed {MAX_AERODYNE_TONNAGE} tons (found {tonnage})"
            ));
        }
        report.check_min("Safe thrust", f64::from(p.core.safe_thrust), 1.0);
        p.core.validate(report);
    }

    /// Hull plus a thrust drive of `tonnage * safe thrust * 0.06` and
    /// `0.0075 * tonnage` of bridge and controls.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let drive = tonnage * f64::from(p.core.safe_thrust) * 0.06;
        round_kg(p.core.hull_weight(tonnage) + drive + tonnage * 0.0075)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        payload(unit).map_or(0, |p| p.core.battle_value())
    }

    /// `(hull + 500 * tonnage * safe thrust)`, x1.1 for aerodynes.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let drive = 500.0 * tonnage * f64::from(p.core.safe_thrust);
        let design = match p.design {
            AeroDesign::Aerodyne => 1.1,
            AeroDesign::Spheroid => 1.0,
        };
        cbills((p.core.hull_cost() + drive) * design)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.design.label());
        p.core.serialize_into(&mut out, &DROPSHIP_ARMOR_ORDER);
        out
    }
}
