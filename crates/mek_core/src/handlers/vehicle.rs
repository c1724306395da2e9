//! Ground combat vehicles.
//!
//! Also home to the motion-type table and the engine/control weights shared
//! with VTOLs.

use serde::{Deserialize, Serialize};

use super::{standard_weight_class, total_armor, ParsedFields, UnitHandler};
use crate::components::{fusion_engine_weight, ArmorType, EngineType, StructureType};
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{battle_value, cbills, ceil_half, count, round_kg, run_mp, speed_factor};
use crate::serialization::{
    armor_allocation, deserialize_base, deserialize_mounts, enum_from_label, enum_label,
    read_allocation, serialize_mounts, DeserializeOutcome, SerializedArmor, SerializedEngine,
    SerializedMovement, SerializedUnit,
};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Vehicle locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleLocation {
    /// Front.
    Front,
    /// Right side.
    Right,
    /// Left side.
    Left,
    /// Rear.
    Rear,
    /// Turret.
    Turret,
    /// Body (unarmored internal location).
    Body,
}

impl Location for VehicleLocation {
    const ALL: &'static [Self] = &[
        Self::Front,
        Self::Right,
        Self::Left,
        Self::Rear,
        Self::Turret,
        Self::Body,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Rear => "Rear",
            Self::Turret => "Turret",
            Self::Body => "Body",
        }
    }
}

/// Order of the document armor array.
pub const ARMOR_ORDER: [VehicleLocation; 5] = [
    VehicleLocation::Front,
    VehicleLocation::Right,
    VehicleLocation::Left,
    VehicleLocation::Rear,
    VehicleLocation::Turret,
];

/// Equipment mounted on a vehicle.
pub type VehicleMounted = Mounted<VehicleLocation>;

/// Ground and naval motion types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleMotion {
    /// Tracked.
    #[default]
    Tracked,
    /// Wheeled.
    Wheeled,
    /// Hovercraft.
    Hover,
    /// Surface naval.
    Naval,
    /// Hydrofoil.
    Hydrofoil,
    /// Submarine.
    Submarine,
    /// Wing-in-ground-effect.
    WiGE,
    /// VTOL.
    Vtol,
    /// Value not in the table.
    Unmapped(String),
}

impl VehicleMotion {
    /// Map a raw motion type. Empty means tracked.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "tracked" => Self::Tracked,
            "wheeled" => Self::Wheeled,
            "hover" => Self::Hover,
            "naval" => Self::Naval,
            "hydrofoil" => Self::Hydrofoil,
            "submarine" => Self::Submarine,
            "wige" => Self::WiGE,
            "vtol" => Self::Vtol,
            _ => Self::Unmapped(raw.trim().to_string()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Tracked => "Tracked",
            Self::Wheeled => "Wheeled",
            Self::Hover => "Hover",
            Self::Naval => "Naval",
            Self::Hydrofoil => "Hydrofoil",
            Self::Submarine => "Submarine",
            Self::WiGE => "WiGE",
            Self::Vtol => "VTOL",
            Self::Unmapped(raw) => raw,
        }
    }

    /// Heaviest legal tonnage, `None` when unmapped.
    #[must_use]
    pub const fn max_tonnage(&self) -> Option<f64> {
        match self {
            Self::Tracked | Self::Hydrofoil => Some(100.0),
            Self::Wheeled | Self::WiGE => Some(80.0),
            Self::Hover => Some(50.0),
            Self::Naval | Self::Submarine => Some(300.0),
            Self::Vtol => Some(30.0),
            Self::Unmapped(_) => None,
        }
    }

    /// Rating subtracted from `cruise * tonnage` when sizing the engine.
    #[must_use]
    pub const fn suspension_factor(&self) -> u32 {
        match self {
            Self::Tracked | Self::Unmapped(_) => 0,
            Self::Wheeled => 20,
            Self::Naval | Self::Submarine => 30,
            Self::Hover => 40,
            Self::WiGE => 45,
            Self::Vtol => 50,
            Self::Hydrofoil => 60,
        }
    }

    /// Whether the chassis needs lift, dive or rotor equipment.
    #[must_use]
    pub const fn needs_lift_equipment(&self) -> bool {
        matches!(
            self,
            Self::Hover | Self::Hydrofoil | Self::Submarine | Self::WiGE | Self::Vtol
        )
    }

    /// Chassis cost multiplier for a tonnage.
    #[must_use]
    pub fn cost_multiplier(&self, tonnage: f64) -> f64 {
        let divisor = match self {
            Self::Tracked | Self::Naval | Self::Submarine | Self::Unmapped(_) => 100.0,
            Self::Wheeled => 200.0,
            Self::Hover => 50.0,
            Self::Hydrofoil => 10.0,
            Self::WiGE => 25.0,
            Self::Vtol => 30.0,
        };
        1.0 + tonnage / divisor
    }
}

/// Engine rating: `cruise * tonnage - suspension`, at least 10.
#[must_use]
pub fn vehicle_engine_rating(cruise_mp: u32, tonnage: f64, motion: &VehicleMotion) -> u32 {
    let raw = f64::from(cruise_mp) * tonnage - f64::from(motion.suspension_factor());
    (raw.max(10.0)).round() as u32
}

/// Engine weight. Non-fusion engines carry no shielding.
#[must_use]
pub fn vehicle_engine_weight(engine: EngineType, rating: u32) -> f64 {
    ceil_half(fusion_engine_weight(rating) * engine.weight_multiplier())
}

/// Control systems weight.
#[must_use]
pub fn control_weight(tonnage: f64) -> f64 {
    ceil_half(0.05 * tonnage)
}

/// Internal structure points per location.
#[must_use]
pub fn structure_per_location(tonnage: f64) -> u32 {
    (tonnage / 10.0).ceil().max(1.0) as u32
}

/// Vehicle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePayload {
    /// Motion type.
    pub motion_type: VehicleMotion,
    /// Engine type.
    pub engine_type: EngineType,
    /// Engine rating.
    pub engine_rating: u32,
    /// Cruise MP.
    pub cruise_mp: u32,
    /// Flank MP, `ceil(cruise * 1.5)`.
    pub flank_mp: u32,
    /// Jump MP.
    pub jump_mp: u32,
    /// Structure type.
    pub structure_type: StructureType,
    /// Armor type.
    pub armor_type: ArmorType,
    /// Armor points in [`ARMOR_ORDER`].
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// Whether the chassis has a turret.
    pub has_turret: bool,
    /// OmniVehicle.
    pub is_omni: bool,
    /// Mounted equipment.
    pub equipment: Vec<VehicleMounted>,
}

impl VehiclePayload {
    /// Armor at a location, 0 for the body.
    #[must_use]
    pub fn armor_at(&self, location: VehicleLocation) -> u32 {
        ARMOR_ORDER
            .iter()
            .position(|l| *l == location)
            .and_then(|i| self.armor.get(i))
            .copied()
            .unwrap_or(0)
    }
}

/// Handler for ground vehicles.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleHandler;

fn payload(unit: &Unit) -> Option<&VehiclePayload> {
    match &unit.payload {
        UnitPayload::Vehicle(p) => Some(p),
        _ => None,
    }
}

/// Engine type from the numeric code, falling back to the `engine` tag text.
pub(crate) fn parse_engine(doc: &UnitDocument, warnings: &mut Vec<String>) -> EngineType {
    if let Some(code) = doc.engine_type {
        if let Some(engine) = EngineType::from_code(code) {
            return engine;
        }
        warnings.push(format!("Unknown engine code {code}, assuming fusion"));
    }
    doc.tag_str("engine")
        .map_or(EngineType::Fusion, EngineType::from_text)
}

impl UnitHandler for VehicleHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::Vehicle
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<VehicleLocation>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        standard_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();

        let motion_type = VehicleMotion::from_text(&doc.motion_type);
        if let VehicleMotion::Unmapped(raw) = &motion_type {
            warnings.push(format!("Unknown vehicle motion type '{raw}'"));
        }

        let engine_type = parse_engine(doc, &mut warnings);
        let cruise_mp = count(doc.cruise_mp, 0);
        let armor: Vec<u32> = (0..ARMOR_ORDER.len()).map(|i| doc.armor_at(i)).collect();
        let mounts = parse_mounts::<VehicleLocation>(doc, &[]);
        warnings.extend(mounts.warnings);

        let has_turret = doc.tag_flag("turret") || armor[4] > 0;

        let payload = VehiclePayload {
            engine_rating: vehicle_engine_rating(cruise_mp, doc.tonnage, &motion_type),
            motion_type,
            engine_type,
            cruise_mp,
            flank_mp: run_mp(cruise_mp),
            jump_mp: count(doc.jump_mp, 0),
            structure_type: StructureType::from_text(doc.tag_str("internal_type").unwrap_or_default()),
            armor_type: ArmorType::from_text(doc.tag_str("armor_type").unwrap_or_default()),
            total_armor_points: total_armor(&armor),
            armor,
            has_turret,
            is_omni: doc.tag_flag("omni"),
            equipment: mounts.mounts,
        };

        ParsedFields::new(doc.tonnage, UnitPayload::Vehicle(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        let tonnage = unit.base.tonnage;

        report.check_min("Tonnage", tonnage, 1.0);
        match p.motion_type.max_tonnage() {
            Some(max) if tonnage > max => report.error(format!(
                "{} vehicles cannot exceed {max} tons (found {tonnage})",
                p.motion_type.label()
            )),
            None => report.error(format!(
                "Unknown motion type '{}'",
                p.motion_type.label()
            )),
            Some(_) => {}
        }
        report.check_min("Cruise MP", f64::from(p.cruise_mp), 1.0);

        if !p.has_turret {
            for mount in p
                .equipment
                .iter()
                .filter(|m| m.is_turret_mounted || m.location == VehicleLocation::Turret)
            {
                report.error(format!(
                    "{} is turret-mounted but the vehicle has no turret",
                    mount.name
                ));
            }
        }
        let max_armor = max_armor_points(tonnage);
        if p.total_armor_points > max_armor {
            report.warning(format!(
                "Armor {} exceeds the usual maximum of {max_armor} points",
                p.total_armor_points
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
        let lift = if p.motion_type.needs_lift_equipment() {
            ceil_half(0.1 * tonnage)
        } else {
            0.0
        };
        let turret = if p.has_turret {
            ceil_half(0.05 * tonnage)
        } else {
            0.0
        };
        let armor = p.armor_type.tons_for(p.total_armor_points);
        round_kg(structure + engine + control_weight(tonnage) + lift + turret + armor)
    }

    /// `round((armor * 2.5 * armor factor + structure * 1.5 + tonnage * 0.5)
    /// * speed factor + equipment * 10)`, speed factor taken from flank MP.
    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let locations = if p.has_turret { 5 } else { 4 };
        let structure = structure_per_location(unit.base.tonnage).saturating_mul(locations);
        ground_bv(
            f64::from(p.total_armor_points) * p.armor_type.bv_multiplier(),
            structure,
            unit.base.tonnage,
            speed_factor(p.flank_mp, p.jump_mp),
            p.equipment.len(),
        )
    }

    /// Structure, engine, control, lift, turret and armor, scaled by the
    /// motion type's chassis multiplier and by 1.25 for OmniVehicles.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let turret = if p.has_turret {
            5000.0 * ceil_half(0.05 * tonnage)
        } else {
            0.0
        };
        let lift = if p.motion_type.needs_lift_equipment() {
            20_000.0 * ceil_half(0.1 * tonnage)
        } else {
            0.0
        };
        let base = p.structure_type.cost_per_ton() * tonnage
            + p.engine_type.cost_factor() * f64::from(p.engine_rating) * tonnage / 75.0
            + 10_000.0 * control_weight(tonnage)
            + p.armor_type.cost_per_ton() * p.armor_type.tons_for(p.total_armor_points)
            + turret
            + lift;
        let omni = if p.is_omni { 1.25 } else { 1.0 };
        cbills(base * p.motion_type.cost_multiplier(tonnage) * omni)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.motion_type.label());
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
            jump: p.jump_mp,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.extend("hasTurret", u32::from(p.has_turret));
        out.extend("omni", u32::from(p.is_omni));
        out
    }

    fn deserialize(&self, serialized: &SerializedUnit) -> DeserializeOutcome {
        let mut errors = Vec::new();
        let base = deserialize_base(
            serialized,
            UnitType::Vehicle,
            standard_weight_class(serialized.tonnage),
            &mut errors,
        );

        let motion_type = VehicleMotion::from_text(&serialized.configuration);
        if let VehicleMotion::Unmapped(raw) = &motion_type {
            errors.push(format!("Unknown motion type '{raw}'"));
        }
        let engine_type = match &serialized.engine {
            Some(engine) => enum_from_label(&engine.engine_type).unwrap_or_else(|| {
                errors.push(format!("Unknown engine type '{}'", engine.engine_type));
                EngineType::Fusion
            }),
            None => {
                errors.push("Missing engine".to_string());
                EngineType::Fusion
            }
        };
        let Some(movement) = serialized.movement else {
            errors.push("Missing movement".to_string());
            return DeserializeOutcome::Failure(errors);
        };
        let equipment = deserialize_mounts::<VehicleLocation>(&serialized.equipment, &mut errors);

        let (armor_type, armor) = serialized.armor.as_ref().map_or_else(
            || (ArmorType::Standard, vec![0; ARMOR_ORDER.len()]),
            |a| {
                (
                    enum_from_label(&a.armor_type).unwrap_or_default(),
                    read_allocation(&ARMOR_ORDER, &a.allocation),
                )
            },
        );
        let structure_type = serialized
            .structure
            .as_deref()
            .and_then(enum_from_label::<StructureType>)
            .unwrap_or_default();

        let Some(base) = base.filter(|_| errors.is_empty()) else {
            return DeserializeOutcome::Failure(errors);
        };
        let payload = VehiclePayload {
            engine_rating: serialized.engine.as_ref().map_or(0, |e| e.rating),
            motion_type,
            engine_type,
            cruise_mp: movement.walk,
            flank_mp: run_mp(movement.walk),
            jump_mp: movement.jump,
            structure_type,
            armor_type,
            total_armor_points: total_armor(&armor),
            armor,
            has_turret: serialized.extension_count("hasTurret") > 0,
            is_omni: serialized.extension_count("omni") > 0,
            equipment,
        };
        DeserializeOutcome::Success(Unit {
            base,
            payload: UnitPayload::Vehicle(payload),
        })
    }
}

/// Usual armor ceiling: `3.5 * tonnage + 40`.
#[must_use]
pub fn max_armor_points(tonnage: f64) -> u32 {
    (3.5 * tonnage + 40.0).floor().max(0.0) as u32
}

/// Shared ground-unit battle value.
#[must_use]
pub fn ground_bv(
    armor_points: f64,
    structure_points: u32,
    tonnage: f64,
    speed: f64,
    equipment: usize,
) -> u32 {
    let defensive = armor_points * 2.5 + f64::from(structure_points) * 1.5 + tonnage * 0.5;
    battle_value(defensive * speed + equipment as f64 * 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::extract_common_fields;

    fn create_test_doc() -> UnitDocument {
        let mut doc = UnitDocument {
            unit_type: "Tank".to_string(),
            name: "Manticore".to_string(),
            model: "MNT-1".to_string(),
            year: 3022,
            tech_type: "IS Level 2".to_string(),
            tonnage: 60.0,
            motion_type: "Tracked".to_string(),
            cruise_mp: Some(4),
            engine_type: Some(0),
            armor: vec![40, 30, 30, 20, 40],
            ..Default::default()
        };
        doc.equipment.insert(
            "Turret Equipment".to_string(),
            vec!["PPC".to_string(), "LRM 10".to_string()],
        );
        doc.equipment
            .insert("Front Equipment".to_string(), vec!["SRM 6".to_string()]);
        doc
    }

    fn build(doc: &UnitDocument) -> Unit {
        let parsed = VehicleHandler.parse_type_specific_fields(doc);
        VehicleHandler.combine_fields(&extract_common_fields(doc), parsed)
    }

    #[test]
    fn test_parse_manticore() {
        let unit = build(&create_test_doc());
        let p = payload(&unit).unwrap();
        assert_eq!(p.cruise_mp, 4);
        assert_eq!(p.flank_mp, 6);
        assert_eq!(p.engine_rating, 240);
        assert_eq!(p.total_armor_points, 160);
        assert!(p.has_turret);
        assert_eq!(p.armor_at(VehicleLocation::Turret), 40);
        assert_eq!(p.armor_at(VehicleLocation::Body), 0);
        assert_eq!(unit.base.weight_class, WeightClass::Heavy);
        assert!(VehicleHandler.validate(&unit).is_valid());
    }

    #[test]
    fn test_weight_breakdown() {
        let unit = build(&create_test_doc());
        // structure 6 + engine 12 + control 3 + turret 3 + armor 10
        assert!((VehicleHandler.calculate_weight(&unit) - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_engine_rating_floor() {
        assert_eq!(vehicle_engine_rating(1, 5.0, &VehicleMotion::Hover), 10);
        assert_eq!(vehicle_engine_rating(5, 20.0, &VehicleMotion::Wheeled), 80);
    }

    #[test]
    fn test_motion_limits() {
        let mut doc = create_test_doc();
        doc.motion_type = "Hover".to_string();
        let report = VehicleHandler.validate(&build(&doc));
        assert!(report.has_error_containing("cannot exceed 50"));

        doc.motion_type = "Rail".to_string();
        let parsed = VehicleHandler.parse_type_specific_fields(&doc);
        assert_eq!(parsed.warnings.len(), 1);
        let report = VehicleHandler.validate(&build(&doc));
        assert!(report.has_error_containing("unknown motion type"));
    }

    #[test]
    fn test_turret_equipment_without_turret() {
        let mut doc = create_test_doc();
        doc.armor = vec![40, 30, 30, 20];
        doc.equipment.remove("Turret Equipment");
        doc.equipment
            .insert("Front Equipment".to_string(), vec!["Medium Laser (T)".to_string()]);
        let unit = build(&doc);
        assert!(!payload(&unit).unwrap().has_turret);
        let report = VehicleHandler.validate(&unit);
        assert!(report.has_error_containing("no turret"));
    }

    #[test]
    fn test_cruise_mp_required() {
        let mut doc = create_test_doc();
        doc.cruise_mp = None;
        let report = VehicleHandler.validate(&build(&doc));
        assert!(report.has_error_containing("cruise mp"));
    }

    #[test]
    fn test_round_trip() {
        let unit = build(&create_test_doc());
        let serialized = VehicleHandler.serialize(&unit);
        assert_eq!(serialized.configuration, "Tracked");
        let back = VehicleHandler.deserialize(&serialized).into_unit().unwrap();
        assert_eq!(back.base.chassis, unit.base.chassis);
        assert_eq!(back.base.tonnage, unit.base.tonnage);
        assert_eq!(back.payload, unit.payload);
    }

    #[test]
    fn test_deserialize_requires_engine() {
        let unit = build(&create_test_doc());
        let mut serialized = VehicleHandler.serialize(&unit);
        serialized.engine = None;
        match VehicleHandler.deserialize(&serialized) {
            DeserializeOutcome::Failure(errors) => {
                assert!(errors.iter().any(|e| e.contains("engine")));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_scores_are_stable() {
        let unit = build(&create_test_doc());
        assert_eq!(VehicleHandler.calculate_bv(&unit), VehicleHandler.calculate_bv(&unit));
        assert!(VehicleHandler.calculate_cost(&unit) > 0);
    }
}
