//! VTOLs.

use serde::{Deserialize, Serialize};

use super::vehicle::{
    control_weight, ground_bv, parse_engine, structure_per_location, vehicle_engine_rating,
    vehicle_engine_weight, VehicleMotion,
};
use super::{standard_weight_class, total_armor, ParsedFields, UnitHandler};
use crate::components::{ArmorType, EngineType, StructureType};
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{cbills, ceil_half, count, round_kg, run_mp, speed_factor};
use crate::serialization::{
    armor_allocation, enum_label, serialize_mounts, SerializedArmor, SerializedEngine,
    SerializedMovement, SerializedUnit,
};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Heaviest legal VTOL.
pub const MAX_TONNAGE: f64 = 30.0;
/// Rotor armor above this is flagged.
pub const ROTOR_ARMOR_CAP: u32 = 2;

/// VTOL locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VtolLocation {
    /// Front.
    Front,
    /// Right side.
    Right,
    /// Left side.
    Left,
    /// Rear.
    Rear,
    /// Rotor.
    Rotor,
    /// Body.
    Body,
}

impl Location for VtolLocation {
    const ALL: &'static [Self] = &[
        Self::Front,
        Self::Right,
        Self::Left,
        Self::Rear,
        Self::Rotor,
        Self::Body,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Rear => "Rear",
            Self::Rotor => "Rotor",
            Self::Body => "Body",
        }
    }
}

/// Order of the document armor array.
pub const ARMOR_ORDER: [VtolLocation; 5] = [
    VtolLocation::Front,
    VtolLocation::Right,
    VtolLocation::Left,
    VtolLocation::Rear,
    VtolLocation::Rotor,
];

/// Equipment mounted on a VTOL.
pub type VtolMounted = Mounted<VtolLocation>;

/// VTOL record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtolPayload {
    /// Engine type.
    pub engine_type: EngineType,
    /// Engine rating.
    pub engine_rating: u32,
    /// Cruise MP.
    pub cruise_mp: u32,
    /// Flank MP.
    pub flank_mp: u32,
    /// Structure type.
    pub structure_type: StructureType,
    /// Armor type.
    pub armor_type: ArmorType,
    /// Armor points in [`ARMOR_ORDER`].
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// OmniVTOL.
    pub is_omni: bool,
    /// Mounted equipment.
    pub equipment: Vec<VtolMounted>,
}

impl VtolPayload {
    /// Rotor armor.
    #[must_use]
    pub fn rotor_armor(&self) -> u32 {
        self.armor.get(4).copied().unwrap_or(0)
    }
}

/// Handler for VTOLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtolHandler;

fn payload(unit: &Unit) -> Option<&VtolPayload> {
    match &unit.payload {
        UnitPayload::Vtol(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for VtolHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::Vtol
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<VtolLocation>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        standard_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();
        let engine_type = parse_engine(doc, &mut warnings);
        let cruise_mp = count(doc.cruise_mp, 0);
        let armor: Vec<u32> = (0..ARMOR_ORDER.len()).map(|i| doc.armor_at(i)).collect();
        let mounts = parse_mounts::<VtolLocation>(doc, &[]);
        warnings.extend(mounts.warnings);

        let payload = VtolPayload {
            engine_type,
            engine_rating: vehicle_engine_rating(cruise_mp, doc.tonnage, &VehicleMotion::Vtol),
            cruise_mp,
            flank_mp: run_mp(cruise_mp),
            structure_type: StructureType::from_text(doc.tag_str("internal_type").unwrap_or_default()),
            armor_type: ArmorType::from_text(doc.tag_str("armor_type").unwrap_or_default()),
            total_armor_points: total_armor(&armor),
            armor,
            is_omni: doc.tag_flag("omni"),
            equipment: mounts.mounts,
        };
        ParsedFields::new(doc.tonnage, UnitPayload::Vtol(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, 1.0, MAX_TONNAGE, "tons");
        report.check_min("Cruise MP", f64::from(p.cruise_mp), 1.0);
        if p.rotor_armor() > ROTOR_ARMOR_CAP {
            report.warning(format!(
                "Rotor armor {} exceeds the usual cap of {ROTOR_ARMOR_CAP}",
                p.rotor_armor()
            ));
        }
    }

    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let structure = ceil_half(0.1 * tonnage * p.structure_type.weight_multiplier());
        let engine = vehicle_engine_weight(p.engine_type, p.engine_rating);
        let rotor = ceil_half(0.1 * tonnage);
        let armor = p.armor_type.tons_for(p.total_armor_points);
        round_kg(structure + engine + control_weight(tonnage) + rotor + armor)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        ground_bv(
            f64::from(p.total_armor_points) * p.armor_type.bv_multiplier(),
            structure_per_location(unit.base.tonnage).saturating_mul(5),
            unit.base.tonnage,
            speed_factor(p.flank_mp, 0),
            p.equipment.len(),
        )
    }

    /// Vehicle cost components with a rotor in place of lift equipment, scaled
    /// by `1 + tonnage / 30`.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let base = p.structure_type.cost_per_ton() * tonnage
            + p.engine_type.cost_factor() * f64::from(p.engine_rating) * tonnage / 75.0
            + 10_000.0 * control_weight(tonnage)
            + 40_000.0 * ceil_half(0.1 * tonnage)
            + p.armor_type.cost_per_ton() * p.armor_type.tons_for(p.total_armor_points);
        let omni = if p.is_omni { 1.25 } else { 1.0 };
        cbills(base * VehicleMotion::Vtol.cost_multiplier(tonnage) * omni)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, VehicleMotion::Vtol.label());
        out.engine = Some(SerializedEngine {
            engine_type: enum_label(&p.engine_type),
            rating: p.engine_rating,
        });
        out.structure = Some(enum_label(&p.structure_type));
        out.armor = Some(SerializedArmor {
            armor_type: enum_label(&p.armor_type),
            allocation: armor_allocation(&ARMOR_ORDER, &p.armor),
        });
        out.movement = Some(SerializedMovement {
            walk: p.cruise_mp,
            run: p.flank_mp,
            jump: 0,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.extend("omni", u32::from(p.is_omni));
        out
    }
}
