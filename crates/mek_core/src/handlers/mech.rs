//! BattleMechs.
//!
//! Armor arrives as an eleven-entry array: head, center torso, right torso,
//! left torso, right arm, left arm, right leg, left leg and then the three
//! rear torso values. On quads the arm entries hold the front legs and the
//! leg entries the rear legs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vehicle::parse_engine;
use super::{standard_weight_class, total_armor, ParsedFields, UnitHandler};
use crate::components::{
    fusion_engine_weight, ArmorType, CockpitType, EngineType, GyroType, HeatSinkType,
    StructureType,
};
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{
    battle_value, cbills, count, mech_structure, round_kg, run_mp, speed_factor, MechStructure,
};
use crate::serialization::{
    deserialize_base, deserialize_mounts, enum_from_label, enum_label, serialize_mounts,
    slots_by_location, DeserializeOutcome, SerializedArmor, SerializedEngine, SerializedHeatSinks,
    SerializedMovement, SerializedUnit,
};
use crate::unit::{RulesLevel, Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest standard BattleMech.
pub const MIN_TONNAGE: f64 = 20.0;
/// Heaviest standard BattleMech.
pub const MAX_TONNAGE: f64 = 100.0;
/// Heat sinks included with every fusion engine.
pub const BASE_HEAT_SINKS: u32 = 10;
/// Head armor cap.
pub const MAX_HEAD_ARMOR: u32 = 9;

/// Entries in the document armor array.
pub const ARMOR_SLOTS: usize = 11;

/// BattleMech locations, biped and quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MechLocation {
    /// Head.
    Head,
    /// Center torso.
    CenterTorso,
    /// Right torso.
    RightTorso,
    /// Left torso.
    LeftTorso,
    /// Right arm.
    RightArm,
    /// Left arm.
    LeftArm,
    /// Right leg.
    RightLeg,
    /// Left leg.
    LeftLeg,
    /// Quad front right leg.
    FrontRightLeg,
    /// Quad front left leg.
    FrontLeftLeg,
    /// Quad rear right leg.
    RearRightLeg,
    /// Quad rear left leg.
    RearLeftLeg,
}

impl Location for MechLocation {
    const ALL: &'static [Self] = &[
        Self::Head,
        Self::CenterTorso,
        Self::RightTorso,
        Self::LeftTorso,
        Self::RightArm,
        Self::LeftArm,
        Self::RightLeg,
        Self::LeftLeg,
        Self::FrontRightLeg,
        Self::FrontLeftLeg,
        Self::RearRightLeg,
        Self::RearLeftLeg,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::CenterTorso => "Center Torso",
            Self::RightTorso => "Right Torso",
            Self::LeftTorso => "Left Torso",
            Self::RightArm => "Right Arm",
            Self::LeftArm => "Left Arm",
            Self::RightLeg => "Right Leg",
            Self::LeftLeg => "Left Leg",
            Self::FrontRightLeg => "Front Right Leg",
            Self::FrontLeftLeg => "Front Left Leg",
            Self::RearRightLeg => "Rear Right Leg",
            Self::RearLeftLeg => "Rear Left Leg",
        }
    }
}

impl MechLocation {
    fn structure(self, table: &MechStructure) -> u32 {
        match self {
            Self::Head => table.head,
            Self::CenterTorso => table.center_torso,
            Self::RightTorso | Self::LeftTorso => table.side_torso,
            Self::RightArm | Self::LeftArm => table.arm,
            Self::RightLeg
            | Self::LeftLeg
            | Self::FrontRightLeg
            | Self::FrontLeftLeg
            | Self::RearRightLeg
            | Self::RearLeftLeg => table.leg,
        }
    }

    /// Index of the rear armor entry for torso locations.
    const fn rear_slot(self) -> Option<usize> {
        match self {
            Self::CenterTorso => Some(8),
            Self::RightTorso => Some(9),
            Self::LeftTorso => Some(10),
            _ => None,
        }
    }
}

/// Equipment mounted on a BattleMech.
pub type MechMounted = Mounted<MechLocation>;

/// Body plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MechConfiguration {
    /// Two legs, two arms.
    #[default]
    Biped,
    /// Four legs.
    Quad,
    /// Three legs.
    Tripod,
    /// Land-air 'Mech.
    Lam,
    /// Quad that converts to a vehicle.
    QuadVee,
}

impl MechConfiguration {
    /// Map the raw motion type. `None` for anything unrecognized.
    #[must_use]
    pub fn from_text(raw: &str) -> Option<Self> {
        let config = match raw.trim().to_ascii_lowercase().as_str() {
            "" | "biped" | "leg" => Self::Biped,
            "quad" => Self::Quad,
            "tripod" => Self::Tripod,
            "lam" => Self::Lam,
            "quadvee" => Self::QuadVee,
            _ => return None,
        };
        Some(config)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Biped => "Biped",
            Self::Quad => "Quad",
            Self::Tripod => "Tripod",
            Self::Lam => "LAM",
            Self::QuadVee => "QuadVee",
        }
    }

    /// Whether the limbs are four legs.
    #[must_use]
    pub const fn is_quad(self) -> bool {
        matches!(self, Self::Quad | Self::QuadVee)
    }

    /// Locations of the first eight armor entries for this body plan.
    #[must_use]
    pub const fn armor_locations(self) -> [MechLocation; 8] {
        use MechLocation as L;
        if self.is_quad() {
            [
                L::Head,
                L::CenterTorso,
                L::RightTorso,
                L::LeftTorso,
                L::FrontRightLeg,
                L::FrontLeftLeg,
                L::RearRightLeg,
                L::RearLeftLeg,
            ]
        } else {
            [
                L::Head,
                L::CenterTorso,
                L::RightTorso,
                L::LeftTorso,
                L::RightArm,
                L::LeftArm,
                L::RightLeg,
                L::LeftLeg,
            ]
        }
    }
}

/// BattleMech record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechPayload {
    /// Body plan.
    pub configuration: MechConfiguration,
    /// OmniMech.
    pub is_omni: bool,
    /// Engine type.
    pub engine_type: EngineType,
    /// Engine rating, `walk * tonnage`.
    pub engine_rating: u32,
    /// Walk MP.
    pub walk_mp: u32,
    /// Run MP.
    pub run_mp: u32,
    /// Jump MP.
    pub jump_mp: u32,
    /// Gyro type.
    pub gyro_type: GyroType,
    /// Cockpit type.
    pub cockpit_type: CockpitType,
    /// Internal structure type.
    pub structure_type: StructureType,
    /// Armor type.
    pub armor_type: ArmorType,
    /// Heat sink type.
    pub heat_sink_type: HeatSinkType,
    /// Heat sink count, engine sinks included.
    pub heat_sinks: u32,
    /// Armor points, [`ARMOR_SLOTS`] entries in document order.
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// Mounted equipment.
    pub equipment: Vec<MechMounted>,
}

impl MechPayload {
    /// Front armor at a location of this body plan, 0 elsewhere.
    #[must_use]
    pub fn front_armor(&self, location: MechLocation) -> u32 {
        self.configuration
            .armor_locations()
            .iter()
            .position(|&l| l == location)
            .and_then(|i| self.armor.get(i).copied())
            .unwrap_or(0)
    }

    /// Rear armor at a torso location, 0 elsewhere.
    #[must_use]
    pub fn rear_armor(&self, location: MechLocation) -> u32 {
        location
            .rear_slot()
            .and_then(|i| self.armor.get(i).copied())
            .unwrap_or(0)
    }

    /// Whether any mount is an improved jump jet.
    #[must_use]
    pub fn has_improved_jump_jets(&self) -> bool {
        self.equipment
            .iter()
            .any(|m| m.name.to_ascii_lowercase().contains("improved jump jet"))
    }

    /// Internal structure points for this body plan, 0 off the table.
    #[must_use]
    pub fn structure_points(&self, tonnage: f64) -> u32 {
        structure_table(tonnage).map_or(0, |table| {
            self.configuration
                .armor_locations()
                .iter()
                .map(|l| l.structure(&table))
                .sum()
        })
    }
}

fn structure_table(tonnage: f64) -> Option<MechStructure> {
    if tonnage.fract() != 0.0 || tonnage < 0.0 {
        return None;
    }
    mech_structure(tonnage as u32)
}

/// Engine rating, `walk * tonnage`.
#[must_use]
pub fn mech_engine_rating(walk_mp: u32, tonnage: f64) -> u32 {
    (f64::from(walk_mp) * tonnage).round().max(0.0) as u32
}

/// Jump jet tons per MP.
#[must_use]
pub fn jump_jet_weight(tonnage: f64) -> f64 {
    if tonnage < 60.0 {
        0.5
    } else if tonnage < 90.0 {
        1.0
    } else {
        2.0
    }
}

fn gyro_size(rating: u32) -> f64 {
    f64::from(rating.div_ceil(100))
}

/// Handler for BattleMechs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MechHandler;

fn payload(unit: &Unit) -> Option<&MechPayload> {
    match &unit.payload {
        UnitPayload::BattleMech(p) => Some(p),
        _ => None,
    }
}

fn rear_label(location: MechLocation) -> String {
    format!("{} (Rear)", location.label())
}

fn mech_armor_allocation(p: &MechPayload) -> BTreeMap<String, u32> {
    let mut allocation: BTreeMap<String, u32> = p
        .configuration
        .armor_locations()
        .iter()
        .zip(&p.armor)
        .map(|(loc, &points)| (loc.label().to_string(), points))
        .collect();
    for loc in [
        MechLocation::CenterTorso,
        MechLocation::RightTorso,
        MechLocation::LeftTorso,
    ] {
        allocation.insert(rear_label(loc), p.rear_armor(loc));
    }
    allocation
}

fn read_mech_allocation(
    configuration: MechConfiguration,
    allocation: &BTreeMap<String, u32>,
) -> Vec<u32> {
    let points = |key: &str| allocation.get(key).copied().unwrap_or(0);
    let mut armor: Vec<u32> = configuration
        .armor_locations()
        .iter()
        .map(|loc| points(loc.label()))
        .collect();
    for loc in [
        MechLocation::CenterTorso,
        MechLocation::RightTorso,
        MechLocation::LeftTorso,
    ] {
        armor.push(points(&rear_label(loc)));
    }
    armor
}

impl UnitHandler for MechHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::BattleMech
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<MechLocation>()
    }

    fn default_rules_level(&self) -> RulesLevel {
        RulesLevel::Introductory
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        standard_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();
        let configuration = MechConfiguration::from_text(&doc.motion_type).unwrap_or_else(|| {
            warnings.push(format!(
                "Unknown configuration '{}', assuming Biped",
                doc.motion_type
            ));
            MechConfiguration::Biped
        });
        let engine_type = parse_engine(doc, &mut warnings);

        let mut heat_sinks = count(doc.heatsinks, BASE_HEAT_SINKS);
        if heat_sinks < BASE_HEAT_SINKS {
            warnings.push(format!(
                "Heat sink count {heat_sinks} raised to the engine minimum of {BASE_HEAT_SINKS}"
            ));
            heat_sinks = BASE_HEAT_SINKS;
        }

        let walk_mp = count(doc.cruise_mp, 0);
        let armor: Vec<u32> = (0..ARMOR_SLOTS).map(|i| doc.armor_at(i)).collect();
        let mounts = parse_mounts::<MechLocation>(doc, &[]);
        warnings.extend(mounts.warnings);
        let tag = |key: &str| doc.tag_str(key).unwrap_or_default();

        let payload = MechPayload {
            configuration,
            is_omni: doc.tag_flag("omni"),
            engine_type,
            engine_rating: mech_engine_rating(walk_mp, doc.tonnage),
            walk_mp,
            run_mp: run_mp(walk_mp),
            jump_mp: count(doc.jump_mp, 0),
            gyro_type: GyroType::from_text(tag("gyro")),
            cockpit_type: CockpitType::from_text(tag("cockpit")),
            structure_type: StructureType::from_text(tag("internal_type")),
            armor_type: ArmorType::from_text(tag("armor_type")),
            heat_sink_type: HeatSinkType::from_text(tag("sink_type")),
            heat_sinks,
            total_armor_points: total_armor(&armor),
            armor,
            equipment: mounts.mounts,
        };
        ParsedFields::new(doc.tonnage, UnitPayload::BattleMech(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        let tonnage = unit.base.tonnage;
        report.check_range("Tonnage", tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if tonnage % 5.0 != 0.0 {
            report.error(format!("Tonnage {tonnage} must be a multiple of 5"));
        }
        report.check_range(
            "Engine rating",
            f64::from(p.engine_rating),
            10.0,
            400.0,
            "",
        );
        report.check_min("Walk MP", f64::from(p.walk_mp), 1.0);
        report.check_min("Heat sinks", f64::from(p.heat_sinks), f64::from(BASE_HEAT_SINKS));

        if p.jump_mp > p.walk_mp && !p.has_improved_jump_jets() {
            report.error(format!(
                "Jump MP {} exceeds walk MP {} without improved jump jets",
                p.jump_mp, p.walk_mp
            ));
        }

        let head = p.front_armor(MechLocation::Head);
        if head > MAX_HEAD_ARMOR {
            report.error(format!(
                "Head armor {head} exceeds the maximum of {MAX_HEAD_ARMOR}"
            ));
        }
        if let Some(table) = structure_table(tonnage) {
            for loc in p.configuration.armor_locations().into_iter().skip(1) {
                let points = p.front_armor(loc).saturating_add(p.rear_armor(loc));
                let cap = loc.structure(&table).saturating_mul(2);
                if points > cap {
                    report.error(format!(
                        "{} armor {points} exceeds twice its internal structure ({cap})",
                        loc.label()
                    ));
                }
            }
        }

        let allowed = p.configuration.armor_locations();
        for mount in &p.equipment {
            if !allowed.contains(&mount.location) {
                report.error(format!(
                    "{} is mounted in {}, which a {} BattleMech does not have",
                    mount.name,
                    mount.location.label(),
                    p.configuration.label()
                ));
            }
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
        let structure = 0.1 * tonnage * p.structure_type.weight_multiplier();
        let engine = fusion_engine_weight(p.engine_rating) * p.engine_type.weight_multiplier();
        let gyro = gyro_size(p.engine_rating) * p.gyro_type.weight_multiplier();
        let armor = p.armor_type.tons_for(p.total_armor_points);
        let sinks = f64::from(p.heat_sinks.saturating_sub(BASE_HEAT_SINKS));
        let jump = jump_jet_weight(tonnage) * f64::from(p.jump_mp);
        round_kg(structure + engine + gyro + p.cockpit_type.weight() + armor + sinks + jump)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let armor = f64::from(p.total_armor_points) * p.armor_type.bv_multiplier();
        let structure = f64::from(p.structure_points(unit.base.tonnage));
        let defensive = armor * 2.5 + structure * 1.5 + unit.base.tonnage * 0.5;
        battle_value(
            defensive * speed_factor(p.run_mp, p.jump_mp)
                + p.equipment.len() as f64 * 10.0
                + f64::from(p.heat_sinks),
        )
    }

    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let jump = f64::from(p.jump_mp);
        let base = p.structure_type.cost_per_ton() * tonnage
            + p.engine_type.cost_factor() * f64::from(p.engine_rating) * tonnage / 75.0
            + 300_000.0 * gyro_size(p.engine_rating) * p.gyro_type.cost_multiplier()
            + p.cockpit_type.cost()
            + p.armor_type.cost_per_ton() * p.armor_type.tons_for(p.total_armor_points)
            + f64::from(p.heat_sinks.saturating_sub(BASE_HEAT_SINKS)) * p.heat_sink_type.cost()
            + 200.0 * tonnage * jump * jump;
        let omni = if p.is_omni { 1.25 } else { 1.0 };
        cbills(base * (1.0 + tonnage / 100.0) * omni)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.configuration.label());
        out.engine = Some(SerializedEngine {
            engine_type: enum_label(&p.engine_type),
            rating: p.engine_rating,
        });
        out.gyro = Some(enum_label(&p.gyro_type));
        out.cockpit = Some(enum_label(&p.cockpit_type));
        out.structure = Some(enum_label(&p.structure_type));
        out.armor = Some(SerializedArmor {
            armor_type: enum_label(&p.armor_type),
            allocation: mech_armor_allocation(p),
        });
        out.heat_sinks = Some(SerializedHeatSinks {
            heat_sink_type: enum_label(&p.heat_sink_type),
            count: p.heat_sinks,
        });
        out.movement = Some(SerializedMovement {
            walk: p.walk_mp,
            run: p.run_mp,
            jump: p.jump_mp,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.critical_slots = slots_by_location(&p.equipment);
        out.extend("omni", u32::from(p.is_omni));
        out
    }

    fn deserialize(&self, serialized: &SerializedUnit) -> DeserializeOutcome {
        let mut errors = Vec::new();
        let base = deserialize_base(
            serialized,
            UnitType::BattleMech,
            standard_weight_class(serialized.tonnage),
            &mut errors,
        );
        let configuration = MechConfiguration::from_text(&serialized.configuration)
            .unwrap_or_else(|| {
                errors.push(format!(
                    "Unknown configuration '{}'",
                    serialized.configuration
                ));
                MechConfiguration::Biped
            });
        let Some(engine) = serialized.engine.as_ref() else {
            errors.push("Missing engine".to_string());
            return DeserializeOutcome::Failure(errors);
        };
        let Some(movement) = serialized.movement else {
            errors.push("Missing movement".to_string());
            return DeserializeOutcome::Failure(errors);
        };
        let engine_type = enum_from_label(&engine.engine_type).unwrap_or_else(|| {
            errors.push(format!("Unknown engine type '{}'", engine.engine_type));
            EngineType::Fusion
        });
        let equipment = deserialize_mounts::<MechLocation>(&serialized.equipment, &mut errors);
        let (armor_type, armor) = serialized.armor.as_ref().map_or_else(
            || (ArmorType::Standard, vec![0; ARMOR_SLOTS]),
            |a| {
                (
                    enum_from_label(&a.armor_type).unwrap_or_default(),
                    read_mech_allocation(configuration, &a.allocation),
                )
            },
        );
        let (heat_sink_type, heat_sinks) = serialized.heat_sinks.as_ref().map_or(
            (HeatSinkType::Single, BASE_HEAT_SINKS),
            |h| (enum_from_label(&h.heat_sink_type).unwrap_or_default(), h.count),
        );

        let Some(base) = base.filter(|_| errors.is_empty()) else {
            return DeserializeOutcome::Failure(errors);
        };
        let payload = MechPayload {
            configuration,
            is_omni: serialized.extension_count("omni") > 0,
            engine_type,
            engine_rating: engine.rating,
            walk_mp: movement.walk,
            run_mp: run_mp(movement.walk),
            jump_mp: movement.jump,
            gyro_type: serialized
                .gyro
                .as_deref()
                .and_then(enum_from_label::<GyroType>)
                .unwrap_or_default(),
            cockpit_type: serialized
                .cockpit
                .as_deref()
                .and_then(enum_from_label::<CockpitType>)
                .unwrap_or_default(),
            structure_type: serialized
                .structure
                .as_deref()
                .and_then(enum_from_label::<StructureType>)
                .unwrap_or_default(),
            armor_type,
            heat_sink_type,
            heat_sinks,
            total_armor_points: total_armor(&armor),
            armor,
            equipment,
        };
        DeserializeOutcome::Success(Unit {
            base,
            payload: UnitPayload::BattleMech(payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::extract_common_fields;

    fn create_test_doc() -> UnitDocument {
        let mut doc = UnitDocument {
            unit_type: "BattleMech".to_string(),
            name: "Atlas".to_string(),
            model: "AS7-D".to_string(),
            year: 2755,
            tech_type: "IS Level 1".to_string(),
            tonnage: 100.0,
            motion_type: "Biped".to_string(),
            cruise_mp: Some(3),
            engine_type: Some(0),
            heatsinks: Some(20),
            armor: vec![9, 47, 32, 32, 34, 34, 41, 41, 14, 10, 10],
            ..Default::default()
        };
        let mut put = |loc: &str, items: &[&str]| {
            doc.equipment.insert(
                format!("{loc} Equipment"),
                items.iter().map(|s| (*s).to_string()).collect(),
            );
        };
        put("Right Torso", &["AC/20", "Ammo AC/20"]);
        put("Left Torso", &["LRM 20", "SRM 6"]);
        put("Right Arm", &["Medium Laser"]);
        put("Left Arm", &["Medium Laser"]);
        put("Center Torso", &["Medium Laser (R)", "Medium Laser (R)"]);
        doc
    }

    fn build(doc: &UnitDocument) -> Unit {
        let parsed = MechHandler.parse_type_specific_fields(doc);
        MechHandler.combine_fields(&extract_common_fields(doc), parsed)
    }

    #[test]
    fn test_parse_atlas() {
        let unit = build(&create_test_doc());
        let p = payload(&unit).unwrap();
        assert_eq!(p.configuration, MechConfiguration::Biped);
        assert_eq!(p.engine_type, EngineType::Fusion);
        assert_eq!(p.engine_rating, 300);
        assert_eq!(p.run_mp, 5);
        assert_eq!(p.total_armor_points, 304);
        assert_eq!(p.rear_armor(MechLocation::CenterTorso), 14);
        assert_eq!(p.front_armor(MechLocation::RightLeg), 41);
        assert_eq!(p.equipment.len(), 8);
        assert!(p.equipment.iter().filter(|m| m.is_rear_mounted).count() == 2);
        assert_eq!(unit.base.weight_class, WeightClass::Assault);
        assert_eq!(unit.base.rules_level, RulesLevel::Introductory);
        let report = MechHandler.validate(&unit);
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn test_scores() {
        let unit = build(&create_test_doc());
        assert!((MechHandler.calculate_weight(&unit) - 64.0).abs() < 1e-9);
        assert_eq!(MechHandler.calculate_bv(&unit), 1138);
        assert_eq!(MechHandler.calculate_cost(&unit), 6_700_000);
    }

    #[test]
    fn test_omni_cost_premium() {
        let mut doc = create_test_doc();
        doc.tags.insert(
            "omni".to_string(),
            crate::document::TagValue::Single("1".to_string()),
        );
        let unit = build(&doc);
        assert_eq!(MechHandler.calculate_cost(&unit), 8_375_000);
    }

    #[test]
    fn test_low_heat_sinks_are_raised() {
        let mut doc = create_test_doc();
        doc.heatsinks = Some(6);
        let parsed = MechHandler.parse_type_specific_fields(&doc);
        assert!(parsed.warnings.iter().any(|w| w.contains("raised")));
        let UnitPayload::BattleMech(p) = &parsed.payload else {
            panic!("expected a BattleMech payload");
        };
        assert_eq!(p.heat_sinks, 10);
    }

    #[test]
    fn test_tonnage_rules() {
        let mut doc = create_test_doc();
        doc.tonnage = 47.0;
        doc.cruise_mp = Some(4);
        let report = MechHandler.validate(&build(&doc));
        assert!(report.has_error_containing("multiple of 5"));

        doc.tonnage = 105.0;
        doc.cruise_mp = Some(3);
        let report = MechHandler.validate(&build(&doc));
        assert!(report.has_error_containing("20-100"));
    }

    #[test]
    fn test_engine_rating_range() {
        let mut doc = create_test_doc();
        doc.cruise_mp = Some(5);
        let report = MechHandler.validate(&build(&doc));
        assert!(report.has_error_containing("engine rating 500"));
    }

    #[test]
    fn test_armor_caps() {
        let mut doc = create_test_doc();
        doc.armor[0] = 12;
        doc.armor[8] = 20;
        let report = MechHandler.validate(&build(&doc));
        assert!(report.has_error_containing("head armor 12"));
        assert!(report.has_error_containing("center torso armor 67"));
    }

    #[test]
    fn test_jump_needs_improved_jets() {
        let mut doc = create_test_doc();
        doc.jump_mp = Some(4);
        let report = MechHandler.validate(&build(&doc));
        assert!(report.has_error_containing("improved jump jets"));

        doc.equipment.insert(
            "Right Leg Equipment".to_string(),
            vec!["Improved Jump Jet".to_string()],
        );
        let report = MechHandler.validate(&build(&doc));
        assert!(!report.has_error_containing("improved jump jets"));
    }

    #[test]
    fn test_quad_locations() {
        let mut doc = create_test_doc();
        doc.motion_type = "Quad".to_string();
        let unit = build(&doc);
        let p = payload(&unit).unwrap();
        assert_eq!(p.front_armor(MechLocation::FrontRightLeg), 34);
        assert_eq!(p.front_armor(MechLocation::RightArm), 0);
        let report = MechHandler.validate(&unit);
        assert!(report.has_error_containing("right arm, which a quad"));
    }

    #[test]
    fn test_unknown_configuration_warns() {
        let mut doc = create_test_doc();
        doc.motion_type = "Hexapod".to_string();
        let parsed = MechHandler.parse_type_specific_fields(&doc);
        assert!(parsed.warnings.iter().any(|w| w.contains("Hexapod")));
    }

    #[test]
    fn test_round_trip() {
        let unit = build(&create_test_doc());
        let serialized = MechHandler.serialize(&unit);
        assert_eq!(serialized.configuration, "Biped");
        assert_eq!(serialized.critical_slots["Center Torso"].len(), 2);
        assert_eq!(
            serialized.armor.as_ref().unwrap().allocation["Center Torso (Rear)"],
            14
        );
        let back = MechHandler.deserialize(&serialized).into_unit().unwrap();
        assert_eq!(back.payload, unit.payload);
        assert_eq!(back.base.id, unit.base.id);
    }

    #[test]
    fn test_deserialize_requires_engine() {
        let unit = build(&create_test_doc());
        let mut serialized = MechHandler.serialize(&unit);
        serialized.engine = None;
        match MechHandler.deserialize(&serialized) {
            DeserializeOutcome::Failure(errors) => {
                assert!(errors.iter().any(|e| e.contains("engine")));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
