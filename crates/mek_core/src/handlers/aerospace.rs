//! Aerospace fighters.

use serde::{Deserialize, Serialize};

use super::vehicle::parse_engine;
use super::{total_armor, ParsedFields, UnitHandler};
use crate::components::{ArmorType, EngineType, HeatSinkType};
use crate::document::UnitDocument;
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{battle_value, cbills, count, round_kg, run_mp};
use crate::serialization::{
    armor_allocation, enum_label, serialize_mounts, SerializedArmor, SerializedEngine,
    SerializedHeatSinks, SerializedMovement, SerializedUnit,
};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Lightest legal fighter.
pub const MIN_TONNAGE: f64 = 5.0;
/// Heaviest legal fighter.
pub const MAX_TONNAGE: f64 = 100.0;
/// Heat sinks included with the engine.
pub const BASE_HEAT_SINKS: u32 = 10;

/// Aerospace locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AerospaceLocation {
    /// Nose.
    Nose,
    /// Left wing.
    LeftWing,
    /// Right wing.
    RightWing,
    /// Aft.
    Aft,
    /// Fuselage (unarmored).
    Fuselage,
}

impl Location for AerospaceLocation {
    const ALL: &'static [Self] = &[
        Self::Nose,
        Self::LeftWing,
        Self::RightWing,
        Self::Aft,
        Self::Fuselage,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::LeftWing => "Left Wing",
            Self::RightWing => "Right Wing",
            Self::Aft => "Aft",
            Self::Fuselage => "Fuselage",
        }
    }
}

/// Order of the document armor array.
pub const ARMOR_ORDER: [AerospaceLocation; 4] = [
    AerospaceLocation::Nose,
    AerospaceLocation::LeftWing,
    AerospaceLocation::RightWing,
    AerospaceLocation::Aft,
];

/// Equipment mounted on a fighter.
pub type AerospaceMounted = Mounted<AerospaceLocation>;

/// Hull design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AeroDesign {
    /// Winged hull.
    #[default]
    Aerodyne,
    /// Spherical hull.
    Spheroid,
}

impl AeroDesign {
    /// Map a raw design tag. Anything but `spheroid` is aerodyne.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("spheroid") {
            Self::Spheroid
        } else {
            Self::Aerodyne
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aerodyne => "Aerodyne",
            Self::Spheroid => "Spheroid",
        }
    }
}

/// Aerospace fighter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerospacePayload {
    /// Hull design.
    pub design: AeroDesign,
    /// Engine type.
    pub engine_type: EngineType,
    /// Safe thrust.
    pub safe_thrust: u32,
    /// Max thrust, `ceil(safe * 1.5)`.
    pub max_thrust: u32,
    /// Structural integrity.
    pub structural_integrity: u32,
    /// Heat sinks.
    pub heat_sinks: u32,
    /// Heat sink type.
    pub heat_sink_type: HeatSinkType,
    /// Fuel points.
    pub fuel: u32,
    /// Armor type.
    pub armor_type: ArmorType,
    /// Armor points in [`ARMOR_ORDER`].
    pub armor: Vec<u32>,
    /// Sum of `armor`.
    pub total_armor_points: u32,
    /// OmniFighter.
    pub is_omni: bool,
    /// Mounted equipment.
    pub equipment: Vec<AerospaceMounted>,
}

impl AerospacePayload {
    /// Engine rating: `(safe thrust - 2) * tonnage`, at least 10.
    #[must_use]
    pub fn engine_rating(&self, tonnage: f64) -> u32 {
        let thrust = f64::from(self.safe_thrust.saturating_sub(2));
        (thrust * tonnage).round().max(10.0) as u32
    }
}

/// Default SI: the larger of safe thrust and a tenth of the tonnage.
#[must_use]
pub fn default_structural_integrity(safe_thrust: u32, tonnage: f64) -> u32 {
    let by_tonnage = (tonnage / 10.0).ceil().max(0.0) as u32;
    safe_thrust.max(by_tonnage)
}

/// Handler for aerospace fighters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AerospaceHandler;

fn payload(unit: &Unit) -> Option<&AerospacePayload> {
    match &unit.payload {
        UnitPayload::Aerospace(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for AerospaceHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::Aerospace
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<AerospaceLocation>()
    }

    fn weight_class(&self, parsed: &ParsedFields) -> WeightClass {
        let tonnage = parsed.tonnage;
        if tonnage < 50.0 {
            WeightClass::Light
        } else if tonnage < 75.0 {
            WeightClass::Medium
        } else {
            WeightClass::Heavy
        }
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();
        let engine_type = parse_engine(doc, &mut warnings);
        let safe_thrust = count(doc.safe_thrust, 0);
        let armor: Vec<u32> = (0..ARMOR_ORDER.len()).map(|i| doc.armor_at(i)).collect();
        let mounts = parse_mounts::<AerospaceLocation>(doc, &[]);
        warnings.extend(mounts.warnings);

        let payload = AerospacePayload {
            design: AeroDesign::from_text(doc.tag_str("design_type").unwrap_or_default()),
            engine_type,
            safe_thrust,
            max_thrust: run_mp(safe_thrust),
            structural_integrity: count(
                doc.structural_integrity,
                default_structural_integrity(safe_thrust, doc.tonnage),
            ),
            heat_sinks: count(doc.heatsinks, BASE_HEAT_SINKS),
            heat_sink_type: HeatSinkType::from_text(doc.tag_str("sink_type").unwrap_or_default()),
            fuel: count(doc.fuel, 0),
            armor_type: ArmorType::from_text(doc.tag_str("armor_type").unwrap_or_default()),
            total_armor_points: total_armor(&armor),
            armor,
            is_omni: doc.tag_flag("omni"),
            equipment: mounts.mounts,
        };
        ParsedFields::new(doc.tonnage, UnitPayload::Aerospace(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };
        report.check_range("Tonnage", unit.base.tonnage, MIN_TONNAGE, MAX_TONNAGE, "tons");
        if p.safe_thrust < 1 {
            report.error("Safe thrust must be at least 1");
        }
        report.check_min("Structural integrity", f64::from(p.structural_integrity), 1.0);
        report.check_min(
            "Heat sinks",
            f64::from(p.heat_sinks),
            f64::from(BASE_HEAT_SINKS),
        );

        let max_arc = p.armor.iter().copied().max().unwrap_or(0);
        let min_arc = p.armor.iter().copied().min().unwrap_or(0);
        if max_arc > min_arc.saturating_mul(3) {
            report.warning(format!(
                "Armor is unbalanced across arcs ({min_arc} to {max_arc} points)"
            ));
        }
    }

    /// `thrust * tonnage * 0.05 + tonnage * 0.1 + armor / 16 + extra heat
    /// sinks + fuel / 200 + 3`.
    fn calculate_weight(&self, unit: &Unit) -> f64 {
        let Some(p) = payload(unit) else {
            return 0.0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0.0;
        }
        let engine = f64::from(p.safe_thrust) * tonnage * 0.05;
        let structure = tonnage * 0.1;
        let armor = f64::from(p.total_armor_points) / 16.0;
        let sinks = f64::from(p.heat_sinks.saturating_sub(BASE_HEAT_SINKS));
        let fuel = f64::from(p.fuel) / 200.0;
        round_kg(engine + structure + armor + sinks + fuel + 3.0)
    }

    /// `round((armor * 2.5 + SI * 2 * tonnage / 10) * (1 + (max thrust - 5)
    /// * 0.1) + equipment * 10 + heat dissipation)`.
    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let defensive = f64::from(p.total_armor_points) * 2.5 * p.armor_type.bv_multiplier()
            + f64::from(p.structural_integrity) * 2.0 * unit.base.tonnage / 10.0;
        let speed = (1.0 + (f64::from(p.max_thrust) - 5.0) * 0.1).max(0.5);
        let heat = f64::from(p.heat_sinks) * f64::from(p.heat_sink_type.dissipation());
        battle_value(defensive * speed + p.equipment.len() as f64 * 10.0 + heat)
    }

    /// Cockpit, structure, engine, control, armor and heat sinks, times
    /// `1 + tonnage / 200`.
    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let tonnage = unit.base.tonnage;
        if tonnage <= 0.0 {
            return 0;
        }
        let rating = p.engine_rating(tonnage);
        let base = 200_000.0
            + 50_000.0 * f64::from(p.structural_integrity) * tonnage / 100.0
            + p.engine_type.cost_factor() * f64::from(rating) * tonnage / 75.0
            + 25_000.0 * tonnage / 10.0
            + p.armor_type.cost_per_ton() * p.armor_type.tons_for(p.total_armor_points)
            + p.heat_sink_type.cost() * f64::from(p.heat_sinks.saturating_sub(BASE_HEAT_SINKS));
        let omni = if p.is_omni { 1.25 } else { 1.0 };
        cbills(base * (1.0 + tonnage / 200.0) * omni)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.design.label());
        out.engine = Some(SerializedEngine {
            engine_type: enum_label(&p.engine_type),
            rating: p.engine_rating(unit.base.tonnage),
        });
        out.armor = Some(SerializedArmor {
            armor_type: enum_label(&p.armor_type),
            allocation: armor_allocation(&ARMOR_ORDER, &p.armor),
        });
        out.heat_sinks = Some(SerializedHeatSinks {
            heat_sink_type: enum_label(&p.heat_sink_type),
            count: p.heat_sinks,
        });
        out.movement = Some(SerializedMovement {
            walk: p.safe_thrust,
            run: p.max_thrust,
            jump: 0,
        });
        out.equipment = serialize_mounts(&p.equipment);
        out.extend("structuralIntegrity", p.structural_integrity);
        out.extend("fuel", p.fuel);
        out.extend("omni", u32::from(p.is_omni));
        out
    }
}
