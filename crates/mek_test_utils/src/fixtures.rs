//! Document fixtures.
//!
//! One valid, canonical document per unit kind, stored as RON the same way
//! the tools crate reads unit files from disk.

use mek_core::document::UnitDocument;
use mek_core::unit::UnitType;

const ATLAS: &str = r#"(
    unit_type: "BattleMech",
    name: "Atlas",
    model: "AS7-D",
    year: 2755,
    tech_type: "IS Level 1",
    tonnage: 100.0,
    motion_type: "Biped",
    cruise_mp: Some(3),
    engine_type: Some(0),
    heatsinks: Some(20),
    armor: [9, 47, 32, 32, 34, 34, 41, 41, 14, 10, 10],
    equipment: {
        "Right Torso Equipment": ["AC/20", "Ammo AC/20"],
        "Left Torso Equipment": ["LRM 20", "SRM 6"],
        "Right Arm Equipment": ["Medium Laser"],
        "Left Arm Equipment": ["Medium Laser"],
        "Center Torso Equipment": ["Medium Laser (R)", "Medium Laser (R)"],
    },
    tags: {
        "role": "Juggernaut",
        "source": "TRO 3039",
    },
)"#;

const MANTICORE: &str = r#"(
    unit_type: "Tank",
    name: "Manticore",
    model: "MNT-1",
    year: 3022,
    tech_type: "IS Level 2",
    tonnage: 60.0,
    motion_type: "Tracked",
    cruise_mp: Some(4),
    engine_type: Some(0),
    armor: [40, 30, 30, 20, 40],
    equipment: {
        "Turret Equipment": ["PPC", "LRM 10"],
        "Front Equipment": ["SRM 6"],
    },
)"#;

const WARRIOR: &str = r#"(
    unit_type: "Tank",
    name: "Warrior",
    model: "H-7",
    year: 2957,
    tech_type: "IS Level 1",
    tonnage: 21.0,
    motion_type: "VTOL",
    cruise_mp: Some(8),
    engine_type: Some(6),
    armor: [10, 8, 8, 6, 2],
    equipment: {
        "Front Equipment": ["AC/2"],
    },
)"#;

const SPARROWHAWK: &str = r#"(
    unit_type: "AeroSpaceFighter",
    name: "Sparrowhawk",
    model: "SPR-H5",
    year: 2590,
    tech_type: "IS Level 1",
    tonnage: 30.0,
    safe_thrust: Some(7),
    fuel: Some(400),
    heatsinks: Some(10),
    armor: [30, 22, 22, 16],
    equipment: {
        "Nose Equipment": ["Medium Laser", "Medium Laser"],
    },
)"#;

const ELEMENTAL: &str = r#"(
    unit_type: "BattleArmor",
    name: "Elemental",
    model: "[Laser](Sqd5)",
    year: 2868,
    tech_type: "Clan Level 2",
    trooper_count: Some(5),
    cruise_mp: Some(1),
    jump_mp: Some(2),
    armor: [10],
    equipment: {
        "Right Arm Equipment": ["Small Laser"],
    },
    tags: {
        "weightclass": "3",
    },
)"#;

const FOOT_PLATOON: &str = r#"(
    unit_type: "Infantry",
    name: "Foot Platoon",
    model: "(Rifle)",
    year: 3025,
    tech_type: "IS Level 1",
    motion_type: "Leg",
    squad_size: Some(7),
    squadn: Some(4),
    tags: {
        "primary": "Auto-Rifle",
    },
)"#;

const MINOTAUR: &str = r#"(
    unit_type: "ProtoMech",
    name: "Minotaur",
    year: 3060,
    tech_type: "Clan Level 2",
    tonnage: 9.0,
    motion_type: "Biped",
    cruise_mp: Some(4),
    jump_mp: Some(4),
    armor: [3, 15, 5, 5, 8],
    equipment: {
        "Torso Equipment": ["ER Medium Laser (Clan)"],
    },
)"#;

const INVADER: &str = r#"(
    unit_type: "JumpShip",
    name: "Invader",
    model: "(2631)",
    year: 2631,
    tech_type: "IS Level 2",
    tonnage: 152000.0,
    structural_integrity: Some(1),
    heatsinks: Some(117),
    fuel: Some(500),
    crew: Some(20),
    officers: Some(4),
    gunners: Some(2),
    passengers: Some(4),
    escape_pod: Some(2),
    life_boat: Some(2),
    armor: [11, 11, 11, 11, 11, 11],
    transporters: ["cargobay:1219:2"],
    equipment: {
        "Hull Equipment": ["K-F Drive"],
    },
    tags: {
        "docking_collars": "3",
    },
)"#;

const UNION: &str = r#"(
    unit_type: "DropShip",
    name: "Union",
    model: "(2708)",
    year: 2708,
    tech_type: "IS Level 2",
    tonnage: 3500.0,
    safe_thrust: Some(3),
    structural_integrity: Some(9),
    heatsinks: Some(60),
    fuel: Some(1100),
    crew: Some(9),
    officers: Some(3),
    gunners: Some(2),
    marines: Some(4),
    escape_pod: Some(0),
    life_boat: Some(3),
    armor: [172, 143, 143, 122],
    transporters: ["mechbay:12:3", "asfbay:2:1", "cargobay:95:1"],
    equipment: {
        "Nose Equipment": ["PPC", "LRM 20"],
    },
    tags: {
        "design_type": "spheroid",
    },
)"#;

const OLYMPUS: &str = r#"(
    unit_type: "SpaceStation",
    name: "Olympus",
    model: "Recharge Station",
    year: 2300,
    tech_type: "IS Level 2",
    tonnage: 100000.0,
    structural_integrity: Some(1),
    heatsinks: Some(200),
    crew: Some(30),
    passengers: Some(60),
    escape_pod: Some(10),
    life_boat: Some(5),
    armor: [30, 30, 30, 30, 30, 30],
    transporters: ["smallcraftbay:4:2"],
)"#;

const AEGIS: &str = r#"(
    unit_type: "WarShip",
    name: "Aegis",
    model: "Heavy Cruiser",
    year: 2372,
    tech_type: "IS Level 3",
    tonnage: 750000.0,
    safe_thrust: Some(3),
    structural_integrity: Some(70),
    heatsinks: Some(2430),
    fuel: Some(2500),
    crew: Some(200),
    officers: Some(30),
    gunners: Some(90),
    marines: Some(40),
    escape_pod: Some(30),
    life_boat: Some(10),
    armor: [43, 39, 39, 33, 33, 31, 37, 37],
    equipment: {
        "Left Broadside Equipment": ["Naval Autocannon 20"],
        "Right Broadside Equipment": ["Naval Autocannon 20"],
    },
    tags: {
        "kfdrive": "1",
    },
)"#;

/// RON text of the canonical fixture for a kind.
#[must_use]
pub fn fixture_ron(kind: UnitType) -> &'static str {
    match kind {
        UnitType::BattleMech => ATLAS,
        UnitType::Vehicle => MANTICORE,
        UnitType::Vtol => WARRIOR,
        UnitType::Aerospace => SPARROWHAWK,
        UnitType::BattleArmor => ELEMENTAL,
        UnitType::Infantry => FOOT_PLATOON,
        UnitType::ProtoMech => MINOTAUR,
        UnitType::JumpShip => INVADER,
        UnitType::DropShip => UNION,
        UnitType::SpaceStation => OLYMPUS,
        UnitType::WarShip => AEGIS,
    }
}

/// Canonical fixture document for a kind.
///
/// # Panics
///
/// Panics if the embedded RON is malformed, which the fixture tests rule out.
#[must_use]
pub fn fixture(kind: UnitType) -> UnitDocument {
    ron::from_str(fixture_ron(kind))
        .unwrap_or_else(|e| panic!("fixture for {kind} is not valid RON: {e}"))
}

/// One fixture per kind, in [`UnitType::ALL`] order.
#[must_use]
pub fn all_fixtures() -> Vec<UnitDocument> {
    UnitType::ALL.into_iter().map(fixture).collect()
}

/// Copy of `doc` with one tag set.
#[must_use]
pub fn with_tag(mut doc: UnitDocument, key: &str, value: &str) -> UnitDocument {
    doc.tags.insert(key.to_string(), value.into());
    doc
}

/// Copy of `doc` with one equipment location replaced.
#[must_use]
pub fn with_equipment(mut doc: UnitDocument, location: &str, items: &[&str]) -> UnitDocument {
    doc.equipment.insert(
        format!("{location} Equipment"),
        items.iter().map(|s| (*s).to_string()).collect(),
    );
    doc
}
