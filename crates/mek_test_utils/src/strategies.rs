//! Proptest strategies for unit documents.
//!
//! Generated documents stay inside the shapes the legacy files use (armor
//! arrays of the right length, known motion types) but are free to break
//! construction rules, so properties must hold for invalid records too.
//! Count fields mostly stay in a typical range but also take any `i32`.

use std::ops::RangeInclusive;

use proptest::collection::vec;
use proptest::prelude::*;

use mek_core::document::UnitDocument;
use mek_core::unit::UnitType;

use crate::fixtures::{fixture, with_tag};

/// Tech strings seen in legacy files.
pub fn arb_tech_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("IS Level 1".to_string()),
        Just("IS Level 2".to_string()),
        Just("IS Level 3".to_string()),
        Just("Clan Level 2".to_string()),
        Just("Mixed (IS Chassis)".to_string()),
        Just(String::new()),
    ]
}

/// A count field: usually within `typical`, sometimes any `i32`.
pub fn arb_count(typical: RangeInclusive<i32>) -> impl Strategy<Value = i32> {
    prop_oneof![4 => typical, 1 => any::<i32>()]
}

/// Armor array of `len` entries, including the negative values some files carry.
pub fn arb_armor(len: usize, max: i32) -> impl Strategy<Value = Vec<i32>> {
    vec(arb_count(-2..=max), len)
}

/// A BattleMech document with arbitrary tonnage, movement and armor.
pub fn arb_mech_doc() -> impl Strategy<Value = UnitDocument> {
    (
        (4u32..=22).prop_map(|t| f64::from(t * 5)),
        arb_count(0..=8),
        arb_count(0..=8),
        prop_oneof![Just("Biped"), Just("Quad"), Just("Tripod"), Just("LAM")],
        arb_armor(11, 60),
        proptest::option::of(arb_count(0..=30)),
        arb_tech_type(),
    )
        .prop_map(|(tonnage, walk, jump, motion, armor, sinks, tech)| {
            let mut doc = fixture(UnitType::BattleMech);
            doc.tonnage = tonnage;
            doc.cruise_mp = Some(walk);
            doc.jump_mp = Some(jump);
            doc.motion_type = motion.to_string();
            doc.armor = armor;
            doc.heatsinks = sinks;
            doc.tech_type = tech;
            doc
        })
}

/// A ground vehicle document with arbitrary motion type and tonnage.
pub fn arb_vehicle_doc() -> impl Strategy<Value = UnitDocument> {
    (
        1u32..=120,
        arb_count(0..=10),
        prop_oneof![
            Just("Tracked"),
            Just("Wheeled"),
            Just("Hover"),
            Just("Naval"),
            Just("WiGE"),
            Just("Hovercraft?"),
        ],
        arb_armor(5, 80),
        proptest::option::of(-1i32..=9),
    )
        .prop_map(|(tonnage, cruise, motion, armor, engine)| {
            let mut doc = fixture(UnitType::Vehicle);
            doc.tonnage = f64::from(tonnage);
            doc.cruise_mp = Some(cruise);
            doc.motion_type = motion.to_string();
            doc.armor = armor;
            doc.engine_type = engine;
            doc
        })
}

/// An infantry platoon document with arbitrary squads and motion.
pub fn arb_infantry_doc() -> impl Strategy<Value = UnitDocument> {
    (
        proptest::option::of(arb_count(-1..=12)),
        proptest::option::of(arb_count(0..=6)),
        prop_oneof![
            Just("Leg"),
            Just("Jump"),
            Just("Motorized"),
            Just("Tracked"),
            Just("Beast"),
        ],
        any::<bool>(),
    )
        .prop_map(|(squad_size, squads, motion, field_gun)| {
            let mut doc = fixture(UnitType::Infantry);
            doc.squad_size = squad_size;
            doc.squadn = squads;
            doc.motion_type = motion.to_string();
            if field_gun {
                doc.equipment
                    .insert("Field Guns Equipment".to_string(), vec!["AC/10".to_string()]);
            }
            doc
        })
}

/// An aerospace fighter document with arbitrary thrust and armor.
pub fn arb_aerospace_doc() -> impl Strategy<Value = UnitDocument> {
    (
        1u32..=150,
        proptest::option::of(arb_count(0..=12)),
        arb_armor(4, 90),
        proptest::option::of(arb_count(0..=30)),
    )
        .prop_map(|(tonnage, thrust, armor, sinks)| {
            let mut doc = fixture(UnitType::Aerospace);
            doc.tonnage = f64::from(tonnage);
            doc.safe_thrust = thrust;
            doc.armor = armor;
            doc.heatsinks = sinks;
            doc
        })
}

/// A capital-scale document of any capital kind with arbitrary crew,
/// escape craft and drive rating.
pub fn arb_capital_doc() -> impl Strategy<Value = UnitDocument> {
    (
        prop_oneof![
            Just(UnitType::JumpShip),
            Just(UnitType::DropShip),
            Just(UnitType::SpaceStation),
            Just(UnitType::WarShip),
        ],
        (arb_count(0..=500), arb_count(0..=100), arb_count(0..=100)),
        arb_count(0..=40),
        arb_count(0..=40),
        proptest::option::of(0u32..=10),
        vec("[a-z]{2,12}:[0-9]{1,3}(:[0-9])?", 0..4),
    )
        .prop_map(|(kind, (crew, passengers, marines), pods, boats, kf, transporters)| {
            let mut doc = fixture(kind);
            doc.crew = Some(crew);
            doc.passengers = Some(passengers);
            doc.marines = Some(marines);
            doc.escape_pod = Some(pods);
            doc.life_boat = Some(boats);
            doc.transporters = transporters;
            if let Some(rating) = kf {
                doc = with_tag(doc, "kf_rating", &rating.to_string());
            }
            doc
        })
}

/// A battle armor squad with arbitrary troopers, movement and armor.
pub fn arb_battle_armor_doc() -> impl Strategy<Value = UnitDocument> {
    (
        proptest::option::of(arb_count(0..=6)),
        arb_count(0..=3),
        arb_count(0..=3),
        arb_armor(1, 15),
    )
        .prop_map(|(troopers, ground, jump, armor)| {
            let mut doc = fixture(UnitType::BattleArmor);
            doc.trooper_count = troopers;
            doc.cruise_mp = Some(ground);
            doc.jump_mp = Some(jump);
            doc.armor = armor;
            doc
        })
}

/// Any fixture kind, perturbed.
pub fn arb_document() -> impl Strategy<Value = UnitDocument> {
    prop_oneof![
        arb_mech_doc(),
        arb_vehicle_doc(),
        arb_infantry_doc(),
        arb_aerospace_doc(),
        arb_capital_doc(),
        arb_battle_armor_doc(),
        Just(fixture(UnitType::Vtol)),
        Just(fixture(UnitType::ProtoMech)),
    ]
}
