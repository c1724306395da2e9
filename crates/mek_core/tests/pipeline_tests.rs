//! End-to-end pipeline tests for mek_core.
//!
//! Every test goes through [`HandlerRegistry`] with the canonical fixtures,
//! the same way the tools crate drives the engine.

use mek_core::prelude::*;
use mek_test_utils::consistency::verify_repeatable;
use mek_test_utils::fixtures::{all_fixtures, fixture, with_equipment, with_tag};

// =============================================================================
// Fixtures
// =============================================================================

mod fixtures {
    use super::*;

    #[test]
    fn test_every_fixture_processes_cleanly() {
        let registry = HandlerRegistry::standard();
        for doc in all_fixtures() {
            let processed = registry.process(&doc);
            assert!(
                processed.is_valid(),
                "{} should be valid: parse {:?}, validation {:?}",
                doc.name,
                processed.parse_errors,
                processed.report.errors
            );
            let unit = processed.unit.as_ref().unwrap();
            assert!(unit.base.is_valid);
            assert!(unit.base.validation_errors.is_empty());
            assert!(unit.base.bv > 0, "{} has no battle value", doc.name);
            assert!(unit.base.cost > 0, "{} has no cost", doc.name);
        }
    }

    #[test]
    fn test_kind_matches_document() {
        let registry = HandlerRegistry::standard();
        for kind in UnitType::ALL {
            let unit = registry.parse(&fixture(kind)).unit.unwrap();
            assert_eq!(unit.unit_type(), kind);
            assert_eq!(unit.base.unit_type, kind);
        }
    }

    #[test]
    fn test_ids_are_slugs() {
        let registry = HandlerRegistry::standard();
        let atlas = registry.parse(&fixture(UnitType::BattleMech)).unit.unwrap();
        assert_eq!(atlas.base.id, "atlas-as7-d");
        assert_eq!(atlas.base.name, "Atlas AS7-D");
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::BattleMech);
        doc.unit_type = "Gun Emplacement".to_string();
        let processed = registry.process(&doc);
        assert!(processed.unit.is_none());
        assert!(!processed.is_valid());
        assert!(processed.parse_errors[0].contains("Gun Emplacement"));
    }
}

// =============================================================================
// Scoring
// =============================================================================

mod scoring {
    use super::*;

    #[test]
    fn test_scoring_is_idempotent() {
        let registry = HandlerRegistry::standard();
        for doc in all_fixtures() {
            let unit = registry.parse(&doc).unit.unwrap();
            let (once, _) = registry.score(&unit).unwrap();
            let (twice, _) = registry.score(&once).unwrap();
            assert_eq!(once, twice, "rescoring {} changed it", doc.name);
            verify_repeatable(&registry, &doc, 4).assert_consistent();
        }
    }

    #[test]
    fn test_remaining_tonnage_tracks_weight() {
        let registry = HandlerRegistry::standard();
        for doc in all_fixtures() {
            let unit = registry.process(&doc).unit.unwrap();
            let expected = unit.base.tonnage - unit.base.total_weight;
            assert!((unit.base.remaining_tonnage - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_atlas_scores() {
        let registry = HandlerRegistry::standard();
        let unit = registry.process(&fixture(UnitType::BattleMech)).unit.unwrap();
        assert!((unit.base.total_weight - 64.0).abs() < 1e-9);
        assert_eq!(unit.base.bv, 1138);
        assert_eq!(unit.base.cost, 6_700_000);
        assert_eq!(unit.base.weight_class, WeightClass::Assault);
        assert_eq!(unit.base.rules_level, RulesLevel::Introductory);
    }

    #[test]
    fn test_omni_premium() {
        let registry = HandlerRegistry::standard();
        let doc = with_tag(fixture(UnitType::BattleMech), "omni", "true");
        let unit = registry.process(&doc).unit.unwrap();
        assert_eq!(unit.base.cost, 8_375_000);
    }
}

// =============================================================================
// Infantry
// =============================================================================

mod infantry {
    use super::*;

    #[test]
    fn test_rifle_platoon() {
        let registry = HandlerRegistry::standard();
        let unit = registry.process(&fixture(UnitType::Infantry)).unit.unwrap();
        assert!((unit.base.tonnage - 2.24).abs() < 1e-9);
        assert!((unit.base.total_weight - 2.24).abs() < 1e-9);
        assert_eq!(unit.base.bv, 56);
        assert_eq!(unit.base.cost, 28_000);
        assert_eq!(unit.base.weight_class, WeightClass::Ultralight);
    }

    #[test]
    fn test_srm_anti_mech_platoon() {
        let registry = HandlerRegistry::standard();
        let doc = with_tag(fixture(UnitType::Infantry), "primary", "SRM Launcher");
        let doc = with_tag(doc, "antimek", "true");
        let unit = registry.process(&doc).unit.unwrap();
        assert_eq!(unit.base.bv, 140);
    }

    #[test]
    fn test_secondary_laser_keeps_rifle_rating() {
        let registry = HandlerRegistry::standard();
        let doc = with_tag(fixture(UnitType::Infantry), "primary", "Rifle");
        let doc = with_tag(doc, "secondary", "Laser Rifle");
        let unit = registry.process(&doc).unit.unwrap();
        assert_eq!(unit.base.bv, 56);
    }

    #[test]
    fn test_unknown_motion_is_reported_once() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::Infantry);
        doc.motion_type = "Beast".to_string();
        let processed = registry.process(&doc);
        let warnings: Vec<_> = processed.all_warnings().collect();
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(warnings[0].contains("Beast"));
    }

    #[test]
    fn test_jump_platoon_cannot_tow_field_guns() {
        let registry = HandlerRegistry::standard();
        let mut doc = with_equipment(fixture(UnitType::Infantry), "Field Guns", &["AC/5"]);
        doc.motion_type = "Jump".to_string();
        let processed = registry.process(&doc);
        assert!(!processed.is_valid());
        assert!(processed.report.has_error_containing("field guns"));
        let unit = processed.unit.unwrap();
        assert!(!unit.base.is_valid);
        assert!(!unit.base.validation_errors.is_empty());
    }
}

// =============================================================================
// Aerospace and capital ships
// =============================================================================

mod aerospace {
    use super::*;

    #[test]
    fn test_fighter_needs_thrust() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::Aerospace);
        doc.safe_thrust = Some(0);
        let processed = registry.process(&doc);
        assert!(processed.report.has_error_containing("thrust"));
    }

    #[test]
    fn test_fighter_tonnage_limit() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::Aerospace);
        doc.tonnage = 150.0;
        let processed = registry.process(&doc);
        assert!(processed.report.errors.iter().any(|e| e.contains("100")));
    }

    #[test]
    fn test_small_jumpship_is_rejected() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::JumpShip);
        doc.tonnage = 3000.0;
        let processed = registry.process(&doc);
        assert!(processed.report.has_error_containing("tonnage 3000"));
    }

    #[test]
    fn test_lithium_fusion_battery() {
        let registry = HandlerRegistry::standard();
        let plain = registry.process(&fixture(UnitType::JumpShip));
        let lf = registry.process(&with_tag(fixture(UnitType::JumpShip), "lf", "true"));
        assert!(lf.is_valid());
        assert!(lf.report.infos.iter().any(|i| i.contains("Lithium-fusion")));
        let plain_cost = plain.unit.unwrap().base.cost;
        let lf_cost = lf.unit.unwrap().base.cost;
        assert_eq!(lf_cost - plain_cost, 20_000_000);
    }

    #[test]
    fn test_kf_rating_raises_battle_value() {
        let registry = HandlerRegistry::standard();
        let bv = |rating: &str| {
            let doc = with_tag(fixture(UnitType::JumpShip), "kf_rating", rating);
            registry.process(&doc).unit.unwrap().base.bv
        };
        assert!(bv("5") > bv("1"));

        let warship = registry.process(&fixture(UnitType::WarShip)).unit.unwrap();
        let rated = with_tag(fixture(UnitType::WarShip), "kf_rating", "3");
        assert!(registry.process(&rated).unit.unwrap().base.bv > warship.base.bv);
    }

    #[test]
    fn test_cargo_bay_regressions() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::DropShip);
        doc.transporters = vec!["cargobay:75.5:1".to_string(), "babay:4".to_string()];
        let processed = registry.process(&doc);
        assert!(processed.parse_warnings.is_empty(), "{:?}", processed.parse_warnings);

        let serialized = registry.serialize(processed.unit.as_ref().unwrap()).unwrap();
        assert_eq!(serialized.extension_count("bays"), 2);
    }

    #[test]
    fn test_bad_transporter_is_a_parse_warning() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::SpaceStation);
        doc.transporters.push("mechbay:many".to_string());
        let processed = registry.process(&doc);
        assert!(processed.is_valid());
        assert_eq!(processed.parse_warnings.len(), 1);
        assert_eq!(processed.all_warnings().count(), 1);
    }

    #[test]
    fn test_broadside_only_on_warships() {
        let registry = HandlerRegistry::standard();
        let doc = with_equipment(
            fixture(UnitType::JumpShip),
            "Left Broadside",
            &["Naval Laser 45"],
        );
        assert!(!registry.process(&doc).is_valid());
        assert!(registry.process(&fixture(UnitType::WarShip)).is_valid());
    }
}

// =============================================================================
// Interchange format
// =============================================================================

mod interchange {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let registry = HandlerRegistry::standard();
        for kind in [UnitType::BattleMech, UnitType::Vehicle, UnitType::ProtoMech] {
            let unit = registry.process(&fixture(kind)).unit.unwrap();
            let json = registry.serialize(&unit).unwrap().to_json(true).unwrap();
            let serialized = SerializedUnit::from_json(&json).unwrap();
            assert_eq!(serialized.unit_type, kind.label());

            let back = registry.deserialize(&serialized).into_unit().unwrap();
            assert_eq!(back.payload, unit.payload, "{kind} payload changed");
            assert_eq!(back.base.id, unit.base.id);
            assert_eq!(back.base.chassis, unit.base.chassis);
            assert_eq!(back.base.model, unit.base.model);
            assert_eq!(back.base.tech_base, unit.base.tech_base);
        }
    }

    #[test]
    fn test_other_kinds_are_unsupported() {
        let registry = HandlerRegistry::standard();
        for kind in [
            UnitType::Infantry,
            UnitType::Aerospace,
            UnitType::JumpShip,
            UnitType::WarShip,
        ] {
            let unit = registry.process(&fixture(kind)).unit.unwrap();
            let serialized = registry.serialize(&unit).unwrap();
            match registry.deserialize(&serialized) {
                DeserializeOutcome::Unsupported { unit_type, .. } => assert_eq!(unit_type, kind),
                other => panic!("expected unsupported for {kind}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_label_is_a_failure() {
        let registry = HandlerRegistry::standard();
        let unit = registry.process(&fixture(UnitType::Vehicle)).unit.unwrap();
        let mut serialized = registry.serialize(&unit).unwrap();
        serialized.unit_type = "Gun Emplacement".to_string();
        match registry.deserialize(&serialized) {
            DeserializeOutcome::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("Gun Emplacement"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}

// =============================================================================
// Out-of-range counts
// =============================================================================

mod out_of_range {
    use super::*;

    fn assert_scores(registry: &HandlerRegistry, doc: &UnitDocument) -> Unit {
        let processed = registry.process(doc);
        let unit = processed.unit.unwrap();
        assert!(unit.base.total_weight.is_finite());
        assert!(!unit.base.is_valid, "{} should fail validation", doc.name);
        registry.serialize(&unit).unwrap();
        unit
    }

    #[test]
    fn test_huge_platoon() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::Infantry);
        doc.squad_size = Some(100_000);
        doc.squadn = Some(100_000);
        let unit = assert_scores(&registry, &doc);
        assert!(unit.base.bv > 0);
    }

    #[test]
    fn test_huge_escape_craft() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::DropShip);
        doc.escape_pod = Some(1_000_000_000);
        doc.life_boat = Some(i32::MAX);
        doc.crew = Some(i32::MAX);
        doc.structural_integrity = Some(0);
        assert_scores(&registry, &doc);
    }

    #[test]
    fn test_huge_battle_armor_squad() {
        let registry = HandlerRegistry::standard();
        let mut doc = fixture(UnitType::BattleArmor);
        doc.trooper_count = Some(2_000_000_000);
        assert_scores(&registry, &doc);
    }

    #[test]
    fn test_huge_armor_and_heat_sinks() {
        let registry = HandlerRegistry::standard();
        let mut mech = fixture(UnitType::BattleMech);
        mech.armor = vec![i32::MAX; mech.armor.len()];
        assert_scores(&registry, &mech);

        let mut fighter = fixture(UnitType::Aerospace);
        fighter.armor = vec![i32::MAX; fighter.armor.len()];
        fighter.heatsinks = Some(i32::MAX);
        registry.process(&fighter).unit.unwrap();

        let mut tank = fixture(UnitType::Vehicle);
        tank.tonnage = 1e12;
        assert_scores(&registry, &tank);
    }
}
