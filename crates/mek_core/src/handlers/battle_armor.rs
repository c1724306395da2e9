//! Battle armor squads.

use serde::{Deserialize, Serialize};

use super::{ParsedFields, UnitHandler};
use crate::components::ArmorType;
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{battle_value, cbills, count, round_kg, speed_factor};
use crate::serialization::{
    enum_label, serialize_mounts, SerializedArmor, SerializedMovement, SerializedUnit,
};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Troopers in a squad when the document names none.
pub const DEFAULT_TROOPERS: u32 = 4;
/// Largest legal squad.
pub const MAX_TROOPERS: u32 = 6;

/// Battle armor locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleArmorLocation {
    /// Squad-level equipment.
    Squad,
    /// Suit body.
    Body,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Turret.
    Turret,
}

impl Location for BattleArmorLocation {
    const ALL: &'static [Self] = &[
        Self::Squad,
        Self::Body,
        Self::LeftArm,
        Self::RightArm,
        Self::Turret,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Squad => "Squad",
            Self::Body => "Body",
            Self::LeftArm => "Left Arm",
            Self::RightArm => "Right Arm",
            Self::Turret => "Turret",
        }
    }
}

/// Equipment mounted on a suit.
pub type BattleArmorMounted = Mounted<BattleArmorLocation>;

/// Suit weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum SuitClass {
    /// Powered armor (light), exoskeletons.
    PaL,
    /// Light.
    Light,
    /// Medium.
    #[default]
    Medium,
    /// Heavy.
    Heavy,
    /// Assault.
    Assault,
}

impl SuitClass {
    /// Every class, lightest first.
    pub const ALL: [Self; 5] = [
        Self::PaL,
        Self::Light,
        Self::Medium,
        Self::Heavy,
        Self::Assault,
    ];

    /// Map the numeric `weightclass` code or a class name.
    #[must_use]
    pub fn from_text(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        match lower.as_str() {
            "0" | "pa(l)" | "pal" | "exoskeleton" => Some(Self::PaL),
            "1" | "light" => Some(Self::Light),
            "2" | "medium" => Some(Self::Medium),
            "3" | "heavy" => Some(Self::Heavy),
            "4" | "assault" => Some(Self::Assault),
            _ => None,
        }
    }

    /// Class for the mass of one suit in tons.
    #[must_use]
    pub fn from_suit_mass(mass: f64) -> Self {
        if mass <= 0.4 {
            Self::PaL
        } else if mass <= 0.75 {
            Self::Light
        } else if mass <= 1.0 {
            Self::Medium
        } else if mass <= 1.5 {
            Self::Heavy
        } else {
            Self::Assault
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PaL => "PA(L)",
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
            Self::Assault => "Assault",
        }
    }

    /// Nominal suit mass in tons.
    #[must_use]
    pub const fn nominal_mass(self) -> f64 {
        match self {
            Self::PaL => 0.4,
            Self::Light => 0.75,
            Self::Medium => 1.0,
            Self::Heavy => 1.5,
            Self::Assault => 2.0,
        }
    }

    /// Chassis mass of one suit in tons.
    #[must_use]
    pub const fn chassis_mass(self) -> f64 {
        match self {
            Self::PaL => 0.08,
            Self::Light => 0.1,
            Self::Medium => 0.175,
            Self::Heavy => 0.3,
            Self::Assault => 0.55,
        }
    }

    /// Most armor points one suit may carry.
    #[must_use]
    pub const fn max_armor(self) -> u32 {
        match self {
            Self::PaL => 2,
            Self::Light => 5,
            Self::Medium => 8,
            Self::Heavy => 11,
            Self::Assault => 14,
        }
    }

    /// Most jump MP one suit may carry.
    #[must_use]
    pub const fn max_jump(self) -> u32 {
        match self {
            Self::PaL | Self::Light | Self::Medium => 3,
            Self::Heavy => 2,
            Self::Assault => 0,
        }
    }

    /// C-bills for one suit chassis.
    #[must_use]
    pub const fn chassis_cost(self) -> f64 {
        match self {
            Self::PaL => 10_000.0,
            Self::Light => 50_000.0,
            Self::Medium => 100_000.0,
            Self::Heavy => 150_000.0,
            Self::Assault => 200_000.0,
        }
    }

    /// Matching unit weight class.
    #[must_use]
    pub const fn weight_class(self) -> WeightClass {
        match self {
            Self::PaL => WeightClass::Ultralight,
            Self::Light => WeightClass::Light,
            Self::Medium => WeightClass::Medium,
            Self::Heavy => WeightClass::Heavy,
            Self::Assault => WeightClass::Assault,
        }
    }
}

/// Suit body plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SuitChassis {
    /// Humanoid suit.
    #[default]
    Biped,
    /// Four-legged suit.
    Quad,
}

/// Battle armor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleArmorPayload {
    /// Suit weight class.
    pub suit_class: SuitClass,
    /// Body plan.
    pub chassis_type: SuitChassis,
    /// Troopers in the squad.
    pub trooper_count: u32,
    /// Ground MP.
    pub ground_mp: u32,
    /// Jump MP.
    pub jump_mp: u32,
    /// Armor type.
    pub armor_type: ArmorType,
    /// Armor points per trooper, one entry per trooper up to
    /// [`MAX_TROOPERS`].
    pub armor: Vec<u32>,
    /// Armor points across the whole squad, saturating.
    pub total_armor_points: u32,
    /// Whether the suit can make swarm attacks.
    pub can_swarm: bool,
    /// Whether the suit can ride OmniMechs.
    pub can_mount_omni: bool,
    /// Mounted equipment.
    pub equipment: Vec<BattleArmorMounted>,
}

impl BattleArmorPayload {
    /// Armor on one trooper.
    #[must_use]
    pub fn armor_per_trooper(&self) -> u32 {
        self.armor.iter().copied().max().unwrap_or(0)
    }
}

/// Handler for battle armor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattleArmorHandler;

fn payload(unit: &Unit) -> Option<&BattleArmorPayload> {
    match &unit.payload {
        UnitPayload::BattleArmor(p) => Some(p),
        _ => None,
    }
}

/// A flag tag, or `default` when the tag is absent.
fn flag_or(doc: &UnitDocument, key: &str, default: bool) -> bool {
    if doc.tag_str(key).is_some() {
        doc.tag_flag(key)
    } else {
        default
    }
}

impl UnitHandler for BattleArmorHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::BattleArmor
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<BattleArmorLocation>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        match &parsed.payload {
            UnitPayload::BattleArmor(p) => p.suit_class.weight_class(),
            _ => WeightClass::Medium,
        }
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();
        let trooper_count = count(doc.trooper_count, DEFAULT_TROOPERS);

        let suit_class = match doc.tag_str("weightclass") {
            Some(raw) => SuitClass::from_text(raw).unwrap_or_else(|| {
                warnings.push(format!("Unknown battle armor weight class '{raw}'"));
                SuitClass::default()
            }),
            None if doc.tonnage > 0.0 && trooper_count > 0 => {
                SuitClass::from_suit_mass(doc.tonnage / f64::from(trooper_count))
            }
            None => SuitClass::default(),
        };

        let chassis_type = if doc.tag_str("chassis").is_some_and(|c| c.eq_ignore_ascii_case("quad")) {
            SuitChassis::Quad
        } else {
            SuitChassis::Biped
        };

        let per_trooper = doc.armor_at(0);
        let armor = vec![per_trooper; trooper_count.min(MAX_TROOPERS) as usize];
        let mounts = parse_mounts::<BattleArmorLocation>(doc, &[]);
        warnings.extend(mounts.warnings);

        let not_assault = suit_class != SuitClass::Assault;
        let payload = BattleArmorPayload {
            suit_class,
            chassis_type,
            trooper_count,
            ground_mp: count(doc.cruise_mp, 1),
            jump_mp: count(doc.jump_mp, 0),
            armor_type: ArmorType::from_text(doc.tag_str("armor_type").unwrap_or_default()),
            total_armor_points: per_trooper.saturating_mul(trooper_count),
            armor,
            can_swarm: flag_or(doc, "swarm", not_assault && chassis_type == SuitChassis::Biped),
            can_mount_omni: flag_or(doc, "mechanized", not_assault),
            equipment: mounts.mounts,
        };

        let tonnage = if doc.tonnage > 0.0 {
            doc.tonnage
        } else {
            round_kg(suit_class.nominal_mass() * f64::from(trooper_count))
        };
        ParsedFields::new(tonnage, UnitPayload::BattleArmor(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range(
            "Trooper count",
            f64::from(p.trooper_count),
            1.0,
            f64::from(MAX_TROOPERS),
            "troopers",
        );
        let cap = p.suit_class.max_armor();
        if p.armor_per_trooper() > cap {
            report.error(format!(
                "{} suits carry at most {cap} armor points (found {})",
                p.suit_class.label(),
                p.armor_per_trooper()
            ));
        }
        if p.suit_class == SuitClass::Assault {
            if p.can_swarm {
                report.error("Assault battle armor cannot make swarm attacks");
            }
            if p.can_mount_omni {
                report.error("Assault battle armor cannot ride OmniMechs");
            }
        }
        if p.jump_mp > p.suit_class.max_jump() {
            report.error(format!(
                "{} suits are limited to {} jump MP (found {})",
                p.suit_class.label(),
                p.suit_class.max_jump(),
                p.jump_mp
            ));
        }
        report.check_min("Ground MP", f64::from(p.ground_mp), 1.0);
    }

    /// Per suit: chassis + 50 kg per armor point + 25 kg per jump MP (60 kg
    /// for heavy and assault suits), times troopers.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let jump_mass = if p.suit_class >= SuitClass::Heavy {
            0.06
        } else {
            0.025
        };
        let suit = p.suit_class.chassis_mass()
            + 0.05 * f64::from(p.armor_per_trooper())
            + jump_mass * f64::from(p.jump_mp)
            + 0.025 * f64::from(p.ground_mp.saturating_sub(1));
        round_kg(suit * f64::from(p.trooper_count))
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let defensive =
            (f64::from(p.armor_per_trooper()) * p.armor_type.bv_multiplier() + 1.0) * 2.5;
        let offensive = p.equipment.len() as f64 * 10.0;
        let per_trooper = defensive * speed_factor(p.ground_mp, p.jump_mp) + offensive;
        battle_value(per_trooper * f64::from(p.trooper_count))
    }

    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let suit = p.suit_class.chassis_cost()
            + 10_000.0 * f64::from(p.armor_per_trooper())
            + 50_000.0 * f64::from(p.jump_mp)
            + 25_000.0 * f64::from(p.ground_mp.saturating_sub(1));
        cbills(suit * f64::from(p.trooper_count))
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.suit_class.label());
        out.armor = Some(SerializedArmor {
            armor_type: enum_label(&p.armor_type),
            allocation: [("Trooper".to_string(), p.armor_per_trooper())]
                .into_iter()
                .collect(),
        });
        out.movement = Some(SerializedMovement {
            walk: p.ground_mp,
            run: p.ground_mp,
            jump: p.jump_mp,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.extend("troopers", p.trooper_count);
        out.extend("quad", u32::from(p.chassis_type == SuitChassis::Quad));
        out.extend("swarm", u32::from(p.can_swarm));
        out.extend("mechanized", u32::from(p.can_mount_omni));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::extract_common_fields;
    use crate::document::TagValue;

    fn create_test_doc() -> UnitDocument {
        let mut doc = UnitDocument {
            unit_type: "BattleArmor".to_string(),
            name: "Elemental".to_string(),
            model: "[Laser](Sqd5)".to_string(),
            year: 2868,
            tech_type: "Clan Level 2".to_string(),
            trooper_count: Some(5),
            cruise_mp: Some(1),
            jump_mp: Some(3),
            armor: vec![10],
            ..Default::default()
        };
        doc.tags
            .insert("weightclass".to_string(), TagValue::from("3"));
        doc.equipment.insert(
            "Right Arm Equipment".to_string(),
            vec!["Small Laser".to_string()],
        );
        doc
    }

    fn build(doc: &UnitDocument) -> Unit {
        let parsed = BattleArmorHandler.parse_type_specific_fields(doc);
        BattleArmorHandler.combine_fields(&extract_common_fields(doc), parsed)
    }

    #[test]
    fn test_parse_elemental() {
        let unit = build(&create_test_doc());
        let p = payload(&unit).unwrap();
        assert_eq!(p.suit_class, SuitClass::Heavy);
        assert_eq!(p.total_armor_points, 50);
        assert_eq!(unit.base.weight_class, WeightClass::Heavy);
        assert!((unit.base.tonnage - 7.5).abs() < 1e-9);
        assert!(p.can_swarm);
        let report = BattleArmorHandler.validate(&unit);
        assert!(report.has_error_containing("jump mp"));
    }

    #[test]
    fn test_armor_caps() {
        let caps: Vec<u32> = SuitClass::ALL.iter().map(|c| c.max_armor()).collect();
        assert_eq!(caps, vec![2, 5, 8, 11, 14]);

        let mut doc = create_test_doc();
        doc.armor = vec![12];
        doc.jump_mp = Some(2);
        let report = BattleArmorHandler.validate(&build(&doc));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("at most 11"));
    }

    #[test]
    fn test_assault_restrictions() {
        let mut doc = create_test_doc();
        doc.tags
            .insert("weightclass".to_string(), TagValue::from("Assault"));
        doc.tags.insert("swarm".to_string(), TagValue::from("yes"));
        doc.tags
            .insert("mechanized".to_string(), TagValue::from("true"));
        doc.jump_mp = Some(0);
        let report = BattleArmorHandler.validate(&build(&doc));
        assert!(report.has_error_containing("swarm"));
        assert!(report.has_error_containing("OmniMechs"));
    }

    #[test]
    fn test_assault_defaults_to_no_swarm() {
        let mut doc = create_test_doc();
        doc.tags
            .insert("weightclass".to_string(), TagValue::from("4"));
        doc.jump_mp = Some(0);
        let unit = build(&doc);
        let p = payload(&unit).unwrap();
        assert!(!p.can_swarm);
        assert!(!p.can_mount_omni);
        assert!(BattleArmorHandler.validate(&unit).is_valid());
    }

    #[test]
    fn test_trooper_count_range() {
        let mut doc = create_test_doc();
        doc.trooper_count = Some(8);
        doc.jump_mp = Some(2);
        let report = BattleArmorHandler.validate(&build(&doc));
        assert!(report.has_error_containing("trooper count"));
    }

    #[test]
    fn test_huge_trooper_count_is_bounded() {
        let mut doc = create_test_doc();
        doc.trooper_count = Some(2_000_000_000);
        let unit = build(&doc);
        let p = payload(&unit).unwrap();
        assert_eq!(p.trooper_count, 2_000_000_000);
        assert_eq!(p.armor.len(), MAX_TROOPERS as usize);
        assert_eq!(p.armor_per_trooper(), 10);
        assert_eq!(p.total_armor_points, u32::MAX);
        assert!(BattleArmorHandler.validate(&unit).has_error_containing("trooper count"));
        assert!(BattleArmorHandler.calculate_weight(&unit).is_finite());
    }

    #[test]
    fn test_class_from_mass() {
        let mut doc = create_test_doc();
        doc.tags.remove("weightclass");
        doc.tonnage = 4.0;
        doc.trooper_count = Some(4);
        let unit = build(&doc);
        assert_eq!(payload(&unit).unwrap().suit_class, SuitClass::Medium);
    }

    #[test]
    fn test_weight_scales_with_troopers() {
        let unit = build(&create_test_doc());
        // (0.3 + 0.5 + 0.18) * 5
        assert!((BattleArmorHandler.calculate_weight(&unit) - 4.9).abs() < 1e-9);
    }
}
