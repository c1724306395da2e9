//! Unit record shared by every kind.
//!
//! A [`Unit`] is a [`UnitBase`] (identity, classification, tech metadata and
//! calculated fields) plus a [`UnitPayload`] carrying the kind-specific
//! record. The payload enum is closed: adding a kind means adding a variant,
//! and every exhaustive `match` in the crate points at the code that must
//! learn about it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handlers::aerospace::AerospacePayload;
use crate::handlers::battle_armor::BattleArmorPayload;
use crate::handlers::dropship::DropShipPayload;
use crate::handlers::infantry::InfantryPayload;
use crate::handlers::jumpship::JumpShipPayload;
use crate::handlers::mech::MechPayload;
use crate::handlers::protomech::ProtoMechPayload;
use crate::handlers::space_station::SpaceStationPayload;
use crate::handlers::vehicle::VehiclePayload;
use crate::handlers::vtol::VtolPayload;
use crate::handlers::warship::WarShipPayload;

/// Unit kind handled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    /// BattleMech (including OmniMechs and IndustrialMechs).
    BattleMech,
    /// Ground combat vehicle.
    Vehicle,
    /// Vertical take-off and landing vehicle.
    #[serde(rename = "VTOL")]
    Vtol,
    /// Aerospace fighter.
    Aerospace,
    /// Battle armor squad.
    #[serde(rename = "Battle Armor")]
    BattleArmor,
    /// Conventional infantry platoon.
    Infantry,
    /// ProtoMech.
    ProtoMech,
    /// JumpShip.
    JumpShip,
    /// DropShip.
    DropShip,
    /// Space station.
    #[serde(rename = "Space Station")]
    SpaceStation,
    /// WarShip.
    WarShip,
}

impl UnitType {
    /// Every kind, in registry order.
    pub const ALL: [Self; 11] = [
        Self::BattleMech,
        Self::Vehicle,
        Self::Vtol,
        Self::Aerospace,
        Self::BattleArmor,
        Self::Infantry,
        Self::ProtoMech,
        Self::JumpShip,
        Self::DropShip,
        Self::SpaceStation,
        Self::WarShip,
    ];

    /// Display label, also used as the serialized `unitType` string.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BattleMech => "BattleMech",
            Self::Vehicle => "Vehicle",
            Self::Vtol => "VTOL",
            Self::Aerospace => "Aerospace",
            Self::BattleArmor => "Battle Armor",
            Self::Infantry => "Infantry",
            Self::ProtoMech => "ProtoMech",
            Self::JumpShip => "JumpShip",
            Self::DropShip => "DropShip",
            Self::SpaceStation => "Space Station",
            Self::WarShip => "WarShip",
        }
    }

    /// Parse a display label back into a kind.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Whether the kind is a capital-scale spacecraft.
    #[must_use]
    pub const fn is_capital(self) -> bool {
        matches!(
            self,
            Self::JumpShip | Self::DropShip | Self::SpaceStation | Self::WarShip
        )
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Technology lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechBase {
    /// Inner Sphere technology.
    #[default]
    InnerSphere,
    /// Clan technology.
    Clan,
    /// Mixed Inner Sphere and Clan technology.
    Mixed,
}

impl TechBase {
    /// Serialized label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InnerSphere => "INNER_SPHERE",
            Self::Clan => "CLAN",
            Self::Mixed => "MIXED",
        }
    }
}

/// Rules level gating which equipment and rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RulesLevel {
    /// Introductory rules.
    Introductory,
    /// Standard rules.
    #[default]
    Standard,
    /// Advanced rules.
    Advanced,
    /// Experimental rules.
    Experimental,
}

impl RulesLevel {
    /// Serialized label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Introductory => "INTRODUCTORY",
            Self::Standard => "STANDARD",
            Self::Advanced => "ADVANCED",
            Self::Experimental => "EXPERIMENTAL",
        }
    }
}

/// Weight class of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightClass {
    /// Ultralight (PA(L) battle armor, small protos, conventional infantry).
    Ultralight,
    /// Light.
    #[default]
    Light,
    /// Medium.
    Medium,
    /// Heavy.
    Heavy,
    /// Assault.
    Assault,
    /// Super-heavy.
    SuperHeavy,
}

/// Historical era of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Era {
    /// Before 2005.
    EarlySpaceflight,
    /// 2005-2570.
    AgeOfWar,
    /// 2571-2780.
    StarLeague,
    /// 2781-3049.
    #[default]
    SuccessionWars,
    /// 3050-3067.
    ClanInvasion,
    /// 3068-3080.
    CivilWar,
    /// 3081-3151.
    DarkAge,
    /// 3152 onward.
    #[serde(rename = "ILCLAN")]
    IlClan,
}

impl Era {
    /// Every era, oldest first.
    pub const ALL: [Self; 8] = [
        Self::EarlySpaceflight,
        Self::AgeOfWar,
        Self::StarLeague,
        Self::SuccessionWars,
        Self::ClanInvasion,
        Self::CivilWar,
        Self::DarkAge,
        Self::IlClan,
    ];

    /// Serialized label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlySpaceflight => "EARLY_SPACEFLIGHT",
            Self::AgeOfWar => "AGE_OF_WAR",
            Self::StarLeague => "STAR_LEAGUE",
            Self::SuccessionWars => "SUCCESSION_WARS",
            Self::ClanInvasion => "CLAN_INVASION",
            Self::CivilWar => "CIVIL_WAR",
            Self::DarkAge => "DARK_AGE",
            Self::IlClan => "ILCLAN",
        }
    }
}

/// Identity, classification and calculated fields shared by every kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitBase {
    /// Canonical id derived from chassis and model.
    pub id: String,
    /// Display name (`"chassis model"`).
    pub name: String,
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    pub model: String,
    /// Unit kind.
    pub unit_type: UnitType,
    /// Tonnage in tons.
    pub tonnage: f64,
    /// Weight class derived from tonnage by kind.
    pub weight_class: WeightClass,
    /// Technology lineage.
    pub tech_base: TechBase,
    /// Design era.
    pub era: Era,
    /// Rules level.
    pub rules_level: RulesLevel,
    /// Battlefield role.
    pub role: String,
    /// Publication source.
    pub source: String,
    /// Introduction year.
    pub year: u32,
    /// Battle value.
    pub bv: u32,
    /// C-bill cost.
    pub cost: u64,
    /// Calculated weight in tons.
    pub total_weight: f64,
    /// Tonnage minus calculated weight.
    pub remaining_tonnage: f64,
    /// Whether the last validation produced no errors.
    pub is_valid: bool,
    /// Errors from the last validation.
    pub validation_errors: Vec<String>,
}

/// Kind-specific record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitPayload {
    /// BattleMech record.
    BattleMech(MechPayload),
    /// Vehicle record.
    Vehicle(VehiclePayload),
    /// VTOL record.
    Vtol(VtolPayload),
    /// Aerospace fighter record.
    Aerospace(AerospacePayload),
    /// Battle armor record.
    BattleArmor(BattleArmorPayload),
    /// Infantry record.
    Infantry(InfantryPayload),
    /// ProtoMech record.
    ProtoMech(ProtoMechPayload),
    /// JumpShip record.
    JumpShip(JumpShipPayload),
    /// DropShip record.
    DropShip(DropShipPayload),
    /// Space station record.
    SpaceStation(SpaceStationPayload),
    /// WarShip record.
    WarShip(WarShipPayload),
}

impl UnitPayload {
    /// Kind of this payload.
    #[must_use]
    pub const fn unit_type(&self) -> UnitType {
        match self {
            Self::BattleMech(_) => UnitType::BattleMech,
            Self::Vehicle(_) => UnitType::Vehicle,
            Self::Vtol(_) => UnitType::Vtol,
            Self::Aerospace(_) => UnitType::Aerospace,
            Self::BattleArmor(_) => UnitType::BattleArmor,
            Self::Infantry(_) => UnitType::Infantry,
            Self::ProtoMech(_) => UnitType::ProtoMech,
            Self::JumpShip(_) => UnitType::JumpShip,
            Self::DropShip(_) => UnitType::DropShip,
            Self::SpaceStation(_) => UnitType::SpaceStation,
            Self::WarShip(_) => UnitType::WarShip,
        }
    }
}

/// Complete unit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Shared fields.
    pub base: UnitBase,
    /// Kind-specific fields.
    pub payload: UnitPayload,
}

impl Unit {
    /// Kind of this record.
    #[must_use]
    pub const fn unit_type(&self) -> UnitType {
        self.payload.unit_type()
    }

    /// Copy of this record with calculated fields and validation state filled in.
    #[must_use]
    pub fn with_scores(&self, total_weight: f64, bv: u32, cost: u64, errors: Vec<String>) -> Self {
        let mut scored = self.clone();
        scored.base.total_weight = total_weight;
        scored.base.remaining_tonnage = self.base.tonnage - total_weight;
        scored.base.bv = bv;
        scored.base.cost = cost;
        scored.base.is_valid = errors.is_empty();
        scored.base.validation_errors = errors;
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_labels_round_trip() {
        for kind in UnitType::ALL {
            assert_eq!(UnitType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(UnitType::from_label("space station"), Some(UnitType::SpaceStation));
        assert_eq!(UnitType::from_label("Small Craft"), None);
    }

    #[test]
    fn test_capital_kinds() {
        let capital: Vec<_> = UnitType::ALL.into_iter().filter(|k| k.is_capital()).collect();
        assert_eq!(
            capital,
            vec![
                UnitType::JumpShip,
                UnitType::DropShip,
                UnitType::SpaceStation,
                UnitType::WarShip
            ]
        );
    }

    #[test]
    fn test_enum_serialization_labels() {
        assert_eq!(
            serde_json::to_string(&TechBase::InnerSphere).unwrap(),
            "\"INNER_SPHERE\""
        );
        assert_eq!(
            serde_json::to_string(&UnitType::BattleArmor).unwrap(),
            "\"Battle Armor\""
        );
        assert_eq!(serde_json::to_string(&Era::IlClan).unwrap(), "\"ILCLAN\"");
    }
}
