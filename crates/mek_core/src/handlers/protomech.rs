//! ProtoMechs.

use serde::{Deserialize, Serialize};

use super::vehicle::ground_bv;
use super::{total_armor, ParsedFields, UnitHandler};
use crate::components::fusion_engine_weight;
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{cbills, count, round_kg, run_mp, speed_factor};
use crate::serialization::{
    armor_allocation, deserialize_base, deserialize_mounts, read_allocation, serialize_mounts,
    DeserializeOutcome, SerializedArmor, SerializedEngine, SerializedMovement, SerializedUnit,
};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal ProtoMech.
pub const MIN_TONNAGE: f64 = 2.0;
/// Heaviest legal ProtoMech.
pub const MAX_TONNAGE: f64 = 15.0;

/// ProtoMech locations. Armor is stored in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtoLocation {
    /// Head.
    Head,
    /// Torso.
    Torso,
    /// Right arm.
    RightArm,
    /// Left arm.
    LeftArm,
    /// Legs.
    Legs,
    /// Main gun.
    MainGun,
}

impl Location for ProtoLocation {
    const ALL: &'static [Self] = &[
        Self::Head,
        Self::Torso,
        Self::RightArm,
        Self::LeftArm,
        Self::Legs,
        Self::MainGun,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Torso => "Torso",
            Self::RightArm => "Right Arm",
            Self::LeftArm => "Left Arm",
            Self::Legs => "Legs",
            Self::MainGun => "Main Gun",
        }
    }
}

/// Equipment mounted on a ProtoMech.
pub type ProtoMounted = Mounted<ProtoLocation>;

/// Body plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProtoChassis {
    /// Standard biped.
    #[default]
    Biped,
    /// Four-legged.
    Quad,
    /// Winged glider.
    Glider,
}

impl ProtoChassis {
    /// Map the raw motion type.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "quad" => Self::Quad,
            "glider" | "wige" => Self::Glider,
            _ => Self::Biped,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Biped => "Biped",
            Self::Quad => "Quad",
            Self::Glider => "Glider",
        }
    }
}

/// ProtoMech record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoMechPayload {
    /// Body plan.
    pub chassis_type: ProtoChassis,
    /// Walk MP.
    pub walk_mp: u32,
    /// Run MP.
    pub run_mp: u32,
    /// Jump MP.
    pub jump_mp: u32,
    /// Engine rating, `walk * tonnage`.
    pub engine_rating: u32,
    /// Armor points per location, in [`ProtoLocation::ALL`] order.
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// Whether a main gun location is fitted.
    pub has_main_gun: bool,
    /// Mounted equipment.
    pub equipment: Vec<ProtoMounted>,
}

/// Engine rating: `walk * tonnage`.
#[must_use]
pub fn proto_engine_rating(walk_mp: u32, tonnage: f64) -> u32 {
    (f64::from(walk_mp) * tonnage).round().max(0.0) as u32
}

/// Engine weight. Ratings below 40 use 25 kg per point.
#[must_use]
pub fn proto_engine_weight(rating: u32) -> f64 {
    if rating < 40 {
        f64::from(rating) * 0.025
    } else {
        fusion_engine_weight(rating)
    }
}

/// Internal structure points, `ceil(2.5 * tonnage)`.
#[must_use]
pub fn proto_structure_points(tonnage: f64) -> u32 {
    (2.5 * tonnage).ceil().max(0.0) as u32
}

/// Handler for ProtoMechs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoMechHandler;

fn payload(unit: &Unit) -> Option<&ProtoMechPayload> {
    match &unit.payload {
        UnitPayload::ProtoMech(p) => Some(p),
        _ => None,
    }
}

fn proto_weight_class(tonnage: f64) -> WeightClass {
    if tonnage < 5.0 {
        WeightClass::Ultralight
    } else if tonnage < 8.0 {
        WeightClass::Light
    } else if tonnage < 10.0 {
        WeightClass::Medium
    } else if tonnage < 14.0 {
        WeightClass::Heavy
    } else {
        WeightClass::Assault
    }
}

impl UnitHandler for ProtoMechHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::ProtoMech
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<ProtoLocation>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        proto_weight_class(parsed.tonnage)
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mounts = parse_mounts::<ProtoLocation>(doc, &[]);
        let armor: Vec<u32> = (0..ProtoLocation::ALL.len()).map(|i| doc.armor_at(i)).collect();
        let walk_mp = count(doc.cruise_mp, 0);
        let has_main_gun = armor[5] > 0
            || mounts
                .mounts
                .iter()
                .any(|m| m.location == ProtoLocation::MainGun);

        let payload = ProtoMechPayload {
            chassis_type: ProtoChassis::from_text(&doc.motion_type),
            walk_mp,
            run_mp: run_mp(walk_mp),
            jump_mp: count(doc.jump_mp, 0),
            engine_rating: proto_engine_rating(walk_mp, doc.tonnage),
            total_armor_points: total_armor(&armor),
            armor,
            has_main_gun,
            equipment: mounts.mounts,
        };
        ParsedFields::new(doc.tonnage, UnitPayload::ProtoMech(payload))
            .with_warnings(mounts.warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        report.check_min("Walk MP", f64::from(p.walk_mp), 1.0);
        if p.chassis_type == ProtoChassis::Quad {
            if p.jump_mp > 0 {
                report.error("Quad ProtoMechs cannot mount jump jets");
            }
        } else if p.jump_mp > p.walk_mp {
            report.error(format!(
                "Jump MP {} exceeds walk MP {}",
                p.jump_mp, p.walk_mp
            ));
        }
    }

    /// Structure + engine + 0.5 t cockpit + 50 kg per armor point + jump jets.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let jump_per_mp = if tonnage <= 5.0 {
            0.05
        } else if tonnage <= 9.0 {
            0.1
        } else {
            0.15
        };
        let total = 0.1 * tonnage
            + proto_engine_weight(p.engine_rating)
            + 0.5
            + 0.05 * f64::from(p.total_armor_points)
            + jump_per_mp * f64::from(p.jump_mp);
        round_kg(total)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        ground_bv(
            f64::from(p.total_armor_points),
            proto_structure_points(unit.base.tonnage),
            unit.base.tonnage,
            speed_factor(p.run_mp, p.jump_mp),
            p.equipment.len(),
        )
    }

    /// `(500000 + 2400 * tonnage + engine + 625 per armor point + 200 *
    /// tonnage * jump^2) * (1 + tonnage / 100)`.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let jump = f64::from(p.jump_mp);
        let base = 500_000.0
            + 2400.0 * tonnage
            + 5000.0 * f64::from(p.engine_rating) * tonnage / 75.0
            + 625.0 * f64::from(p.total_armor_points)
            + 200.0 * tonnage * jump * jump;
        cbills(base * (1.0 + tonnage / 100.0))
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.chassis_type.label());
        out.engine = Some(SerializedEngine {
            engine_type: "FUSION".to_string(),
            rating: p.engine_rating,
        });
        out.armor = Some(SerializedArmor {
            armor_type: "STANDARD".to_string(),
            allocation: armor_allocation(ProtoLocation::ALL, &p.armor),
        });
        out.movement = Some(SerializedMovement {
            walk: p.walk_mp,
            run: p.run_mp,
            jump: p.jump_mp,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.extend("mainGun", u32::from(p.has_main_gun));
        out
    }

    fn deserialize(&self, serialized: &SerializedUnit) -> DeserializeOutcome {
        let mut errors = Vec::new();
        let base = deserialize_base(
            serialized,
            UnitType::ProtoMech,
            proto_weight_class(serialized.tonnage),
            &mut errors,
        );
        let Some(movement) = serialized.movement else {
            errors.push("Missing movement".to_string());
            return DeserializeOutcome::Failure(errors);
        };
        let equipment = deserialize_mounts::<ProtoLocation>(&serialized.equipment, &mut errors);
        let armor = serialized.armor.as_ref().map_or_else(
            || vec![0; ProtoLocation::ALL.len()],
            |a| read_allocation(ProtoLocation::ALL, &a.allocation),
        );
        let Some(base) = base.filter(|_| errors.is_empty()) else {
            return DeserializeOutcome::Failure(errors);
        };

        let payload = ProtoMechPayload {
            chassis_type: ProtoChassis::from_text(&serialized.configuration),
            walk_mp: movement.walk,
            run_mp: run_mp(movement.walk),
            jump_mp: movement.jump,
            engine_rating: serialized
                .engine
                .as_ref()
                .map_or_else(|| proto_engine_rating(movement.walk, base.tonnage), |e| e.rating),
            total_armor_points: total_armor(&armor),
            armor,
            has_main_gun: serialized.extension_count("mainGun") > 0,
            equipment,
        };
        DeserializeOutcome::Success(Unit {
            base,
            payload: UnitPayload::ProtoMech(payload),
        })
    }
}
