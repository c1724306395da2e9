//! Document model for decoded BLK unit files.
//!
//! A [`UnitDocument`] is the normalized form of a legacy block-format file
//! after the upstream tokenizer has split it into blocks. Every field has a
//! default so that partial documents load; handlers turn missing values into
//! kind-specific defaults instead of failing.
//!
//! Raw tag lookups are meant for handler parse functions only. Nothing past
//! the parse step should read the tag dictionary.
//!
//! # Example RON
//!
//! ```ron
//! UnitDocument(
//!     unit_type: "Infantry",
//!     name: "Foot Platoon",
//!     model: "(Laser)",
//!     year: 3025,
//!     tech_type: "IS Level 2",
//!     motion_type: "Leg",
//!     squad_size: Some(7),
//!     squadn: Some(4),
//!     tags: {
//!         "primary": "Laser Rifle",
//!     },
//! )
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::unit::UnitType;

/// Value stored in the free-form tag dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Single-line block.
    Single(String),
    /// Multi-line block.
    List(Vec<String>),
}

impl TagValue {
    /// First line of the block, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s.as_str()),
            Self::List(lines) => lines.first().map(String::as_str),
        }
    }

    /// All lines of the block.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::List(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

/// Decoded legacy unit file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitDocument {
    /// Raw `UnitType` block (e.g. `"Tank"`, `"AeroSpaceFighter"`).
    pub unit_type: String,

    /// Chassis name.
    pub name: String,

    /// Model designation.
    pub model: String,

    /// Introduction year.
    pub year: u32,

    /// Raw `type` block carrying tech base and rules level (e.g. `"IS Level 2"`).
    pub tech_type: String,

    /// Tonnage in tons.
    pub tonnage: f64,

    /// Raw motion type string.
    pub motion_type: String,

    /// Equipment names keyed by free-form location block name.
    pub equipment: BTreeMap<String, Vec<String>>,

    /// Armor points, ordered by the kind's location convention.
    pub armor: Vec<i32>,

    /// Transporter definitions (`name:capacity:doors`).
    pub transporters: Vec<String>,

    /// Safe thrust for aerospace and capital units.
    pub safe_thrust: Option<i32>,

    /// Fuel points.
    pub fuel: Option<i32>,

    /// Heat sink count.
    pub heatsinks: Option<i32>,

    /// Structural integrity for aerospace and capital units.
    pub structural_integrity: Option<i32>,

    /// Cruise/walk/ground MP.
    pub cruise_mp: Option<i32>,

    /// Jump MP.
    pub jump_mp: Option<i32>,

    /// Numeric engine type code.
    pub engine_type: Option<i32>,

    /// General crew.
    pub crew: Option<i32>,

    /// Officers.
    pub officers: Option<i32>,

    /// Gunners.
    pub gunners: Option<i32>,

    /// Passengers.
    pub passengers: Option<i32>,

    /// Marines.
    pub marines: Option<i32>,

    /// Escape pods.
    pub escape_pod: Option<i32>,

    /// Life boats.
    pub life_boat: Option<i32>,

    /// Infantry squad size.
    pub squad_size: Option<i32>,

    /// Infantry squad count.
    pub squadn: Option<i32>,

    /// Battle armor trooper count.
    pub trooper_count: Option<i32>,

    /// Everything else, keyed by lower-case block name.
    pub tags: BTreeMap<String, TagValue>,
}

impl UnitDocument {
    /// Map the raw unit type tag to a handler kind.
    ///
    /// Tanks and support vehicles with a `VTOL` motion type are VTOLs.
    #[must_use]
    pub fn mapped_unit_type(&self) -> Option<UnitType> {
        let kind = match self.unit_type.trim() {
            "BattleMech" | "Mech" | "Biped" | "Quad" | "Tripod" | "OmniMech"
            | "IndustrialMech" => UnitType::BattleMech,
            "Tank" | "Vehicle" | "SupportTank" | "Support Vehicle" | "SupportVehicle" => {
                if self.motion_type.trim().eq_ignore_ascii_case("vtol") {
                    UnitType::Vtol
                } else {
                    UnitType::Vehicle
                }
            }
            "VTOL" | "SupportVTOL" => UnitType::Vtol,
            "Aero" | "Aerospace" | "AeroSpaceFighter" => UnitType::Aerospace,
            "BattleArmor" | "Battle Armor" => UnitType::BattleArmor,
            "Infantry" => UnitType::Infantry,
            "ProtoMech" | "Protomech" => UnitType::ProtoMech,
            "Jumpship" | "JumpShip" => UnitType::JumpShip,
            "Dropship" | "DropShip" => UnitType::DropShip,
            "SpaceStation" | "Space Station" => UnitType::SpaceStation,
            "Warship" | "WarShip" => UnitType::WarShip,
            _ => return None,
        };
        Some(kind)
    }

    /// Raw tag value.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// First line of a tag, trimmed. Empty lines count as absent.
    #[must_use]
    pub fn tag_str(&self, key: &str) -> Option<&str> {
        self.tag(key)
            .and_then(TagValue::first)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Tag parsed as a number. Unparseable values count as absent.
    #[must_use]
    pub fn tag_number(&self, key: &str) -> Option<f64> {
        self.tag_str(key).and_then(|s| s.parse::<f64>().ok())
    }

    /// Tag parsed as a boolean flag (`true`, `yes` or a non-zero number).
    #[must_use]
    pub fn tag_flag(&self, key: &str) -> bool {
        self.tag_str(key).is_some_and(|s| {
            let lower = s.to_ascii_lowercase();
            lower == "true" || lower == "yes" || lower.parse::<f64>().is_ok_and(|n| n != 0.0)
        })
    }

    /// Armor value at `index`, or 0 when the array is short. Negative values clamp to 0.
    #[must_use]
    pub fn armor_at(&self, index: usize) -> u32 {
        self.armor
            .get(index)
            .map_or(0, |&points| points.max(0) as u32)
    }

    /// Equipment lists whose location key does not match any of `known`.
    pub fn unknown_locations<'a>(&'a self, known: &'a [&str]) -> impl Iterator<Item = &'a str> {
        self.equipment.keys().map(String::as_str).filter(move |key| {
            let label = location_label(key);
            !known.iter().any(|k| k.eq_ignore_ascii_case(label))
        })
    }

    /// Every equipment name in the document, in block order.
    pub fn all_equipment(&self) -> impl Iterator<Item = &str> {
        self.equipment.values().flatten().map(String::as_str)
    }
}

/// Strip the trailing `Equipment` from a BLK block name.
///
/// `"Nose Equipment"` becomes `"Nose"`; names without the suffix pass through.
#[must_use]
pub fn location_label(key: &str) -> &str {
    let trimmed = key.trim();
    trimmed
        .strip_suffix("Equipment")
        .or_else(|| trimmed.strip_suffix("equipment"))
        .map_or(trimmed, str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_tags(tags: &[(&str, &str)]) -> UnitDocument {
        UnitDocument {
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), TagValue::from(*v)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mapped_unit_type() {
        let mut doc = UnitDocument {
            unit_type: "Tank".to_string(),
            motion_type: "Tracked".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.mapped_unit_type(), Some(UnitType::Vehicle));

        doc.motion_type = "VTOL".to_string();
        assert_eq!(doc.mapped_unit_type(), Some(UnitType::Vtol));

        doc.unit_type = "AeroSpaceFighter".to_string();
        assert_eq!(doc.mapped_unit_type(), Some(UnitType::Aerospace));

        doc.unit_type = "SmallCraft".to_string();
        assert_eq!(doc.mapped_unit_type(), None);
    }

    #[test]
    fn test_tag_helpers() {
        let doc = doc_with_tags(&[
            ("omni", "1"),
            ("lf", "no"),
            ("kf_rating", "2.5"),
            ("role", "  Juggernaut "),
            ("blank", "   "),
        ]);

        assert!(doc.tag_flag("omni"));
        assert!(!doc.tag_flag("lf"));
        assert!(!doc.tag_flag("missing"));
        assert_eq!(doc.tag_number("kf_rating"), Some(2.5));
        assert_eq!(doc.tag_str("role"), Some("Juggernaut"));
        assert_eq!(doc.tag_str("blank"), None);
    }

    #[test]
    fn test_armor_at_is_lenient() {
        let doc = UnitDocument {
            armor: vec![10, -4],
            ..Default::default()
        };
        assert_eq!(doc.armor_at(0), 10);
        assert_eq!(doc.armor_at(1), 0);
        assert_eq!(doc.armor_at(7), 0);
    }

    #[test]
    fn test_location_label() {
        assert_eq!(location_label("Nose Equipment"), "Nose");
        assert_eq!(location_label("Left Wing Equipment "), "Left Wing");
        assert_eq!(location_label("Platoon"), "Platoon");
    }

    #[test]
    fn test_unknown_locations() {
        let mut doc = UnitDocument::default();
        doc.equipment
            .insert("Nose Equipment".to_string(), vec!["Medium Laser".to_string()]);
        doc.equipment
            .insert("Bridge Equipment".to_string(), vec!["Small Laser".to_string()]);

        let unknown: Vec<_> = doc.unknown_locations(&["Nose", "Aft"]).collect();
        assert_eq!(unknown, vec!["Bridge Equipment"]);
    }

    #[test]
    fn test_tag_value_lines() {
        let value = TagValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.first(), Some("a"));
        assert_eq!(value.lines(), vec!["a", "b"]);
    }
}
