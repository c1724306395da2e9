//! Property tests over perturbed documents.
//!
//! The pipeline must never panic and must stay internally consistent for
//! any document, valid or not.

use mek_core::handlers::battle_armor::MAX_TROOPERS;
use mek_core::prelude::*;
use mek_test_utils::strategies::{
    arb_battle_armor_doc, arb_capital_doc, arb_document, arb_infantry_doc, arb_mech_doc,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn process_never_panics(doc in arb_document()) {
        let registry = HandlerRegistry::standard();
        let processed = registry.process(&doc);
        if let Some(unit) = &processed.unit {
            prop_assert_eq!(unit.base.is_valid, processed.report.is_valid());
            prop_assert_eq!(&unit.base.validation_errors, &processed.report.errors);
            prop_assert!(unit.base.total_weight.is_finite());
        }
    }

    #[test]
    fn scoring_is_deterministic(doc in arb_document()) {
        let registry = HandlerRegistry::standard();
        prop_assert_eq!(registry.process(&doc), registry.process(&doc));
    }

    #[test]
    fn serialize_never_panics(doc in arb_document()) {
        let registry = HandlerRegistry::standard();
        if let Some(unit) = registry.process(&doc).unit {
            let serialized = registry.serialize(&unit).unwrap();
            prop_assert_eq!(serialized.unit_type, unit.unit_type().label());
        }
    }

    #[test]
    fn mech_round_trip_keeps_payload(doc in arb_mech_doc()) {
        let registry = HandlerRegistry::standard();
        let unit = registry.parse(&doc).unit.unwrap();
        let serialized = registry.serialize(&unit).unwrap();
        let back = registry.deserialize(&serialized).into_unit().unwrap();
        prop_assert_eq!(back.payload, unit.payload);
    }

    #[test]
    fn infantry_weight_follows_strength(doc in arb_infantry_doc()) {
        let registry = HandlerRegistry::standard();
        let unit = registry.process(&doc).unit.unwrap();
        let empty = doc.squad_size.is_some_and(|n| n <= 0) || doc.squadn.is_some_and(|n| n <= 0);
        prop_assert!(unit.base.tonnage >= 0.0);
        let towing = doc.equipment.contains_key("Field Guns Equipment");
        prop_assert_eq!(unit.base.tonnage > 0.0, !empty || towing);
    }

    #[test]
    fn battle_armor_storage_is_bounded(doc in arb_battle_armor_doc()) {
        let registry = HandlerRegistry::standard();
        let unit = registry.process(&doc).unit.unwrap();
        if let UnitPayload::BattleArmor(p) = &unit.payload {
            prop_assert!(p.armor.len() <= MAX_TROOPERS as usize);
            prop_assert!(p.total_armor_points >= p.armor_per_trooper() || p.trooper_count == 0);
        } else {
            prop_assert!(false, "expected a battle armor payload");
        }
    }

    #[test]
    fn escape_capacity_never_wraps(doc in arb_capital_doc()) {
        let registry = HandlerRegistry::standard();
        let processed = registry.process(&doc);
        let unit = processed.unit.unwrap();
        prop_assert!(unit.base.total_weight.is_finite());

        // A saturated capacity covers any headcount.
        let craft = [doc.escape_pod, doc.life_boat]
            .iter()
            .map(|n| u64::from(n.unwrap_or(0).max(0).unsigned_abs()))
            .sum::<u64>();
        if craft * 6 >= u64::from(u32::MAX) {
            let short = processed.report.warnings.iter().any(|w| w.contains("escape craft carry"));
            prop_assert!(!short);
        }
    }
}
