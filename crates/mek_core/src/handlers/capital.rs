//! Shared pieces of the capital-scale kinds.
//!
//! JumpShips, DropShips, space stations and WarShips share a crew
//! complement, escape craft, transport bays, structural integrity and a
//! facing-arc armor layout. Each kind wraps a [`CapitalCore`] in its own
//! payload and adds its drive and hull rules on top.

use serde::{Deserialize, Serialize};

use super::total_armor;
use crate::components::HeatSinkType;
use crate::document::UnitDocument;
use crate::equipment::{parse_mounts, Location, Mounted};
use crate::lookup::{battle_value, ceil_half, count, run_mp};
use crate::serialization::{
    armor_allocation, enum_label, serialize_mounts, SerializedArmor, SerializedHeatSinks,
    SerializedMovement, SerializedUnit,
};
use crate::unit::WeightClass;
use crate::validation::ValidationReport;

/// People each escape pod or life boat carries.
pub const ESCAPE_CRAFT_CAPACITY: u32 = 6;

/// Facing arcs of JumpShips, space stations and WarShips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapitalArc {
    /// Nose.
    Nose,
    /// Front left.
    FrontLeft,
    /// Front right.
    FrontRight,
    /// Aft left.
    AftLeft,
    /// Aft right.
    AftRight,
    /// Aft.
    Aft,
    /// Left broadside (WarShips only).
    LeftBroadside,
    /// Right broadside (WarShips only).
    RightBroadside,
    /// Hull-mounted, no arc.
    Hull,
}

impl Location for CapitalArc {
    const ALL: &'static [Self] = &[
        Self::Nose,
        Self::FrontLeft,
        Self::FrontRight,
        Self::AftLeft,
        Self::AftRight,
        Self::Aft,
        Self::LeftBroadside,
        Self::RightBroadside,
        Self::Hull,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::FrontLeft => "Front Left",
            Self::FrontRight => "Front Right",
            Self::AftLeft => "Aft Left",
            Self::AftRight => "Aft Right",
            Self::Aft => "Aft",
            Self::LeftBroadside => "Left Broadside",
            Self::RightBroadside => "Right Broadside",
            Self::Hull => "Hull",
        }
    }
}

impl CapitalArc {
    /// Whether the arc exists only on WarShips.
    #[must_use]
    pub const fn is_broadside(self) -> bool {
        matches!(self, Self::LeftBroadside | Self::RightBroadside)
    }
}

/// Armor order of JumpShips and space stations.
pub const STATION_ARMOR_ORDER: [CapitalArc; 6] = [
    CapitalArc::Nose,
    CapitalArc::FrontLeft,
    CapitalArc::FrontRight,
    CapitalArc::AftLeft,
    CapitalArc::AftRight,
    CapitalArc::Aft,
];

/// Armor order of WarShips.
pub const WARSHIP_ARMOR_ORDER: [CapitalArc; 8] = [
    CapitalArc::Nose,
    CapitalArc::FrontLeft,
    CapitalArc::FrontRight,
    CapitalArc::AftLeft,
    CapitalArc::AftRight,
    CapitalArc::Aft,
    CapitalArc::LeftBroadside,
    CapitalArc::RightBroadside,
];

/// Labels of the capital arcs without the WarShip broadsides.
#[must_use]
pub fn non_broadside_labels() -> Vec<&'static str> {
    CapitalArc::ALL
        .iter()
        .filter(|arc| !arc.is_broadside())
        .map(|arc| arc.label())
        .collect()
}

/// Equipment mounted on a JumpShip, space station or WarShip.
pub type CapitalMounted = Mounted<CapitalArc>;

/// Facing arcs of DropShips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropShipArc {
    /// Nose.
    Nose,
    /// Left side.
    LeftSide,
    /// Right side.
    RightSide,
    /// Aft.
    Aft,
    /// Hull-mounted, no arc.
    Hull,
}

impl Location for DropShipArc {
    const ALL: &'static [Self] = &[
        Self::Nose,
        Self::LeftSide,
        Self::RightSide,
        Self::Aft,
        Self::Hull,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::LeftSide => "Left Side",
            Self::RightSide => "Right Side",
            Self::Aft => "Aft",
            Self::Hull => "Hull",
        }
    }
}

/// Armor order of DropShips.
pub const DROPSHIP_ARMOR_ORDER: [DropShipArc; 4] = [
    DropShipArc::Nose,
    DropShipArc::LeftSide,
    DropShipArc::RightSide,
    DropShipArc::Aft,
];

/// Crew complement.
///
/// `crew` is the whole ship's company; officers, gunners and pilots are
/// broken out of it rather than added to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrewConfiguration {
    /// Ship's company.
    pub crew: u32,
    /// Officers.
    pub officers: u32,
    /// Gunners.
    pub gunners: u32,
    /// Pilots, fixed by kind.
    pub pilots: u32,
    /// Passengers.
    pub passengers: u32,
    /// Marines.
    pub marines: u32,
}

impl CrewConfiguration {
    /// Read the crew blocks, fixing pilots.
    #[must_use]
    pub fn from_document(doc: &UnitDocument, pilots: u32) -> Self {
        Self {
            crew: count(doc.crew, 0),
            officers: count(doc.officers, 0),
            gunners: count(doc.gunners, 0),
            pilots,
            passengers: count(doc.passengers, 0),
            marines: count(doc.marines, 0),
        }
    }

    /// Everyone aboard who needs a seat in an escape craft.
    #[must_use]
    pub const fn aboard(&self) -> u32 {
        self.crew
            .saturating_add(self.passengers)
            .saturating_add(self.marines)
    }
}

/// What a transport bay carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BayType {
    /// Bulk cargo, including liquid, refrigerated and livestock bays.
    Cargo,
    /// Small craft.
    SmallCraft,
    /// Aerospace fighters.
    Fighter,
    /// BattleMechs.
    Mech,
    /// Vehicles.
    Vehicle,
    /// Conventional infantry.
    Infantry,
    /// Battle armor.
    BattleArmor,
}

impl BayType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cargo => "Cargo",
            Self::SmallCraft => "Small Craft",
            Self::Fighter => "Fighter",
            Self::Mech => "Mech",
            Self::Vehicle => "Vehicle",
            Self::Infantry => "Infantry",
            Self::BattleArmor => "Battle Armor",
        }
    }

    /// Bay tons per unit of capacity. Cargo capacity is already in tons.
    #[must_use]
    pub const fn tons_per_unit(self) -> f64 {
        match self {
            Self::Cargo => 1.0,
            Self::SmallCraft => 200.0,
            Self::Fighter | Self::Mech => 150.0,
            Self::Vehicle => 100.0,
            Self::Infantry => 5.0,
            Self::BattleArmor => 10.0,
        }
    }
}

const CARGO_KEYWORDS: [&str; 5] = ["cargo", "liquid", "refrigerated", "insulated", "livestock"];

/// Classify a transporter name by keyword.
///
/// Keywords are checked in a fixed priority so that, for example,
/// `cargobay` is never mistaken for a battle armor bay.
#[must_use]
pub fn classify_bay(name: &str) -> Option<BayType> {
    let name = name.trim().to_ascii_lowercase();
    let kind = if CARGO_KEYWORDS.iter().any(|k| name.contains(k)) {
        BayType::Cargo
    } else if name.contains("smallcraft") || name.contains("small craft") {
        BayType::SmallCraft
    } else if name.contains("asf") || name.contains("fighter") {
        BayType::Fighter
    } else if name.contains("mech") {
        BayType::Mech
    } else if name.contains("vehicle") {
        BayType::Vehicle
    } else if name.contains("infantry") {
        BayType::Infantry
    } else if name.contains("battlearmor") || name.starts_with("ba") {
        BayType::BattleArmor
    } else {
        return None;
    };
    Some(kind)
}

/// A transport bay read from a `name:capacity[:doors]` transporter line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportBay {
    /// What the bay carries.
    pub bay_type: BayType,
    /// Units carried, or tons for cargo.
    pub capacity: f64,
    /// Bay doors.
    pub doors: u32,
}

impl TransportBay {
    /// Tons the bay occupies.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.capacity * self.bay_type.tons_per_unit()
    }
}

/// Parse a transporter line. Doors default to 1.
///
/// # Errors
///
/// Returns a message when the bay type is unknown or a number does not parse.
pub fn parse_bay(raw: &str) -> Result<TransportBay, String> {
    let mut parts = raw.split(':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let bay_type = classify_bay(name).ok_or_else(|| format!("Unknown transport bay '{raw}'"))?;
    let capacity = match parts.next() {
        Some(c) => c
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite() && *c >= 0.0)
            .ok_or_else(|| format!("Invalid bay capacity in '{raw}'"))?,
        None => 0.0,
    };
    let doors = match parts.next() {
        Some(d) => d
            .parse::<u32>()
            .map_err(|_| format!("Invalid bay door count in '{raw}'"))?,
        None => 1,
    };
    Ok(TransportBay {
        bay_type,
        capacity,
        doors,
    })
}

/// Fields every capital-scale kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalCore<L> {
    /// Safe thrust.
    pub safe_thrust: u32,
    /// Max thrust, `ceil(safe * 1.5)`.
    pub max_thrust: u32,
    /// Structural integrity.
    pub structural_integrity: u32,
    /// Fuel points.
    pub fuel: u32,
    /// Heat sinks.
    pub heat_sinks: u32,
    /// Heat sink type.
    pub heat_sink_type: HeatSinkType,
    /// Armor points per arc, in the kind's armor order.
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// Crew complement.
    pub crew: CrewConfiguration,
    /// Escape pods.
    pub escape_pods: u32,
    /// Life boats.
    pub life_boats: u32,
    /// Transport bays.
    pub bays: Vec<TransportBay>,
    /// Mounted equipment.
    pub equipment: Vec<Mounted<L>>,
}

/// Capital core plus the warnings collected while reading it.
#[derive(Debug)]
pub struct ParsedCore<L> {
    /// The core.
    pub core: CapitalCore<L>,
    /// Recovered problems.
    pub warnings: Vec<String>,
}

/// Read the shared capital fields.
#[must_use]
pub fn parse_core<L: Location>(doc: &UnitDocument, arcs: usize, pilots: u32) -> ParsedCore<L> {
    let mounts = parse_mounts::<L>(doc, &[]);
    let mut warnings = mounts.warnings;
    let armor: Vec<u32> = (0..arcs).map(|i| doc.armor_at(i)).collect();
    let safe_thrust = count(doc.safe_thrust, 0);

    let mut bays = Vec::new();
    for line in doc.transporters.iter().filter(|l| !l.trim().is_empty()) {
        match parse_bay(line) {
            Ok(bay) => bays.push(bay),
            Err(message) => warnings.push(message),
        }
    }

    let core = CapitalCore {
        safe_thrust,
        max_thrust: run_mp(safe_thrust),
        structural_integrity: count(doc.structural_integrity, 1),
        fuel: count(doc.fuel, 0),
        heat_sinks: count(doc.heatsinks, 0),
        heat_sink_type: HeatSinkType::from_text(doc.tag_str("sink_type").unwrap_or_default()),
        total_armor_points: total_armor(&armor),
        armor,
        crew: CrewConfiguration::from_document(doc, pilots),
        escape_pods: count(doc.escape_pod, 0),
        life_boats: count(doc.life_boat, 0),
        bays,
        equipment: mounts.mounts,
    };
    ParsedCore { core, warnings }
}

impl<L: Location> CapitalCore<L> {
    /// People the escape craft can carry.
    #[must_use]
    pub const fn escape_capacity(&self) -> u32 {
        self.escape_craft().saturating_mul(ESCAPE_CRAFT_CAPACITY)
    }

    /// Escape pods and life boats together.
    #[must_use]
    pub const fn escape_craft(&self) -> u32 {
        self.escape_pods.saturating_add(self.life_boats)
    }

    /// Rules shared by every capital kind.
    pub fn validate(&self, report: &mut ValidationReport) {
        report.check_min(
            "Structural integrity",
            f64::from(self.structural_integrity),
            1.0,
        );
        let aboard = self.crew.aboard();
        if aboard > self.escape_capacity() {
            report.warning(format!(
                "{aboard} aboard but escape craft carry only {}",
                self.escape_capacity()
            ));
        }
        for bay in &self.bays {
            if bay.capacity <= 0.0 {
                report.warning(format!("{} bay has no capacity", bay.bay_type.label()));
            }
            if bay.doors == 0 {
                report.warning(format!("{} bay has no doors", bay.bay_type.label()));
            }
        }
    }

    /// Hull weight excluding drives: structure, armor, heat sinks, fuel, crew
    /// quarters, escape craft and bays.
    ///
    /// Structure is `SI * tonnage / 1000`, armor 16 points per ton, fuel 10
    /// points per ton, quarters 10 t per officer, 7 t per other crew member
    /// and 5 t per passenger or marine, 7 t per escape craft.
    #[must_use]
    pub fn hull_weight(&self, tonnage: f64) -> f64 {
        let structure = ceil_half(f64::from(self.structural_integrity) * tonnage / 1000.0);
        let armor = ceil_half(f64::from(self.total_armor_points) / 16.0);
        let quarters = 10.0 * f64::from(self.crew.officers)
            + 7.0 * f64::from(self.crew.crew.saturating_sub(self.crew.officers))
            + 5.0 * (f64::from(self.crew.passengers) + f64::from(self.crew.marines));
        let escape = 7.0 * f64::from(self.escape_craft());
        let bays: f64 = self.bays.iter().map(TransportBay::weight).sum();
        structure
            + armor
            + f64::from(self.heat_sinks)
            + f64::from(self.fuel) / 10.0
            + quarters
            + escape
            + bays
    }

    /// `(armor * 2.5 + SI * 20) * (1 + safe thrust * 0.05) + 25 per mount`.
    #[must_use]
    pub fn battle_value(&self) -> u32 {
        battle_value(self.raw_battle_value())
    }

    /// Unrounded hull battle value, for kinds that add drive terms.
    #[must_use]
    pub fn raw_battle_value(&self) -> f64 {
        let defensive =
            f64::from(self.total_armor_points) * 2.5 + f64::from(self.structural_integrity) * 20.0;
        let mobility = 1.0 + f64::from(self.safe_thrust) * 0.05;
        defensive * mobility + self.equipment.len() as f64 * 25.0
    }

    /// Hull cost excluding drives: 100000 per SI point, 10000 per armor ton,
    /// heat sinks, 5000 per escape craft and 1000 per bay ton.
    #[must_use]
    pub fn hull_cost(&self) -> f64 {
        let armor_tons = ceil_half(f64::from(self.total_armor_points) / 16.0);
        let bays: f64 = self.bays.iter().map(TransportBay::weight).sum();
        100_000.0 * f64::from(self.structural_integrity)
            + 10_000.0 * armor_tons
            + self.heat_sink_type.cost() * f64::from(self.heat_sinks)
            + 5000.0 * f64::from(self.escape_craft())
            + 1000.0 * bays
    }

    /// Fill the shared serialized fields.
    pub fn serialize_into(&self, out: &mut SerializedUnit, armor_order: &[L]) {
        out.armor = Some(SerializedArmor {
            armor_type: "STANDARD".to_string(),
            allocation: armor_allocation(armor_order, &self.armor),
        });
        out.heat_sinks = Some(SerializedHeatSinks {
            heat_sink_type: enum_label(&self.heat_sink_type),
            count: self.heat_sinks,
        });
        out.movement = Some(SerializedMovement {
            walk: self.safe_thrust,
            run: self.max_thrust,
            jump: 0,
        });
        out.equipment = serialize_mounts(&self.equipment);
        out.extend("structuralIntegrity", self.structural_integrity);
        out.extend("fuel", self.fuel);
        out.extend("crew", self.crew.crew);
        out.extend("officers", self.crew.officers);
        out.extend("gunners", self.crew.gunners);
        out.extend("pilots", self.crew.pilots);
        out.extend("passengers", self.crew.passengers);
        out.extend("marines", self.crew.marines);
        out.extend("escapePods", self.escape_pods);
        out.extend("lifeBoats", self.life_boats);
        out.extend("bays", self.bays.len() as f64);
    }
}

/// Weight class of capital-scale kinds.
#[must_use]
pub fn capital_weight_class(tonnage: f64) -> WeightClass {
    if tonnage < 2500.0 {
        WeightClass::Light
    } else if tonnage < 50_000.0 {
        WeightClass::Medium
    } else if tonnage < 250_000.0 {
        WeightClass::Heavy
    } else {
        WeightClass::SuperHeavy
    }
}

/// Whether the document fits a Kearny-Fuchida drive, by tag or equipment.
#[must_use]
pub fn has_kf_drive(doc: &UnitDocument) -> bool {
    doc.tag_flag("kfdrive")
        || doc.all_equipment().any(|name| {
            let lower = name.to_ascii_lowercase();
            lower.contains("k-f") || lower.contains("kf drive")
        })
}

/// K-F drive rating. Defaults to 1 when a drive is fitted.
#[must_use]
pub fn kf_rating(doc: &UnitDocument, has_drive: bool) -> u32 {
    doc.tag_number("kf_rating")
        .filter(|r| r.is_finite() && *r >= 0.0)
        .map_or(u32::from(has_drive), |r| r as u32)
}

/// C-bills per point of K-F rating.
pub const KF_COST_PER_RATING: f64 = 100_000_000.0;

/// Battle value per point of K-F rating.
pub const KF_BV_PER_RATING: f64 = 2_500.0;

/// Battle value of a K-F drive. A fitted drive counts as at least rating 1.
#[must_use]
pub fn kf_battle_value(has_drive: bool, rating: u32) -> f64 {
    if has_drive {
        KF_BV_PER_RATING * f64::from(rating.max(1))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_bay_is_not_battle_armor() {
        let bay = parse_bay("cargobay:75.5:1").unwrap();
        assert_eq!(bay.bay_type, BayType::Cargo);
        assert!((bay.capacity - 75.5).abs() < f64::EPSILON);
        assert_eq!(bay.doors, 1);
    }

    #[test]
    fn test_mech_bay_defaults_doors() {
        let bay = parse_bay("mechbay:12").unwrap();
        assert_eq!(bay.bay_type, BayType::Mech);
        assert!((bay.capacity - 12.0).abs() < f64::EPSILON);
        assert_eq!(bay.doors, 1);
    }

    #[test]
    fn test_classification_priority() {
        assert_eq!(classify_bay("asfbay"), Some(BayType::Fighter));
        assert_eq!(classify_bay("smallcraftbay"), Some(BayType::SmallCraft));
        assert_eq!(classify_bay("heavyvehiclebay"), Some(BayType::Vehicle));
        assert_eq!(classify_bay("infantrybay"), Some(BayType::Infantry));
        assert_eq!(classify_bay("battlearmorbay"), Some(BayType::BattleArmor));
        assert_eq!(classify_bay("babay"), Some(BayType::BattleArmor));
        assert_eq!(classify_bay("liquidcargobay"), Some(BayType::Cargo));
        assert_eq!(classify_bay("dockingcollar"), None);
    }

    #[test]
    fn test_bad_bay_lines() {
        assert!(parse_bay("mechbay:lots").is_err());
        assert!(parse_bay("mechbay:2:x").is_err());
        assert!(parse_bay("teleporter:1").is_err());
    }

    #[test]
    fn test_escape_capacity_warning() {
        let doc = UnitDocument {
            crew: Some(40),
            passengers: Some(10),
            escape_pod: Some(4),
            life_boat: Some(2),
            structural_integrity: Some(10),
            ..Default::default()
        };
        let parsed = parse_core::<DropShipArc>(&doc, DROPSHIP_ARMOR_ORDER.len(), 2);
        assert_eq!(parsed.core.escape_capacity(), 36);
        let mut report = ValidationReport::new();
        parsed.core.validate(&mut report);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("50 aboard"));
    }

    #[test]
    fn test_unknown_transporter_is_a_warning() {
        let doc = UnitDocument {
            transporters: vec!["mechbay:4:2".to_string(), "hangar?:1".to_string()],
            ..Default::default()
        };
        let parsed = parse_core::<CapitalArc>(&doc, STATION_ARMOR_ORDER.len(), 0);
        assert_eq!(parsed.core.bays.len(), 1);
        assert_eq!(parsed.core.bays[0].doors, 2);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_kf_battle_value() {
        assert_eq!(kf_battle_value(false, 4), 0.0);
        assert_eq!(kf_battle_value(true, 0), KF_BV_PER_RATING);
        assert_eq!(kf_battle_value(true, 3), 3.0 * KF_BV_PER_RATING);
    }

    #[test]
    fn test_huge_escape_counts_saturate() {
        let doc = UnitDocument {
            crew: Some(i32::MAX),
            passengers: Some(i32::MAX),
            marines: Some(i32::MAX),
            escape_pod: Some(1_000_000_000),
            life_boat: Some(i32::MAX),
            ..Default::default()
        };
        let parsed = parse_core::<DropShipArc>(&doc, DROPSHIP_ARMOR_ORDER.len(), 2);
        assert_eq!(parsed.core.crew.aboard(), u32::MAX);
        assert_eq!(parsed.core.escape_capacity(), u32::MAX);
        let mut report = ValidationReport::new();
        parsed.core.validate(&mut report);
        assert!(parsed.core.hull_weight(3500.0).is_finite());
        assert!(parsed.core.hull_cost().is_finite());
    }

    #[test]
    fn test_kf_detection() {
        let mut doc = UnitDocument::default();
        assert!(!has_kf_drive(&doc));
        doc.equipment
            .insert("Hull Equipment".to_string(), vec!["K-F Drive".to_string()]);
        assert!(has_kf_drive(&doc));
        assert_eq!(kf_rating(&doc, true), 1);
    }
}
