//! Construction component types and their weight/cost tables.
//!
//! Each component enum maps the free-text or numeric values found in legacy
//! files through a fixed keyword table. The keyword order matters: more
//! specific keywords are tested before the general ones they contain (for
//! example `XXL` before `XL`, `Endo Composite` before `Endo`).

use serde::{Deserialize, Serialize};

/// Engine type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    /// Standard fusion.
    #[default]
    Fusion,
    /// Inner Sphere extra-light.
    Xl,
    /// Clan extra-light.
    ClanXl,
    /// Light fusion.
    Light,
    /// Compact fusion.
    Compact,
    /// Extra-extra-light.
    Xxl,
    /// Internal combustion.
    Ice,
    /// Fuel cell.
    FuelCell,
    /// Fission.
    Fission,
}

impl EngineType {
    /// Map a numeric engine code from the file header.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Fusion),
            1 => Some(Self::Xl),
            2 => Some(Self::Light),
            3 => Some(Self::Compact),
            4 => Some(Self::ClanXl),
            5 => Some(Self::Xxl),
            6 => Some(Self::Ice),
            7 => Some(Self::FuelCell),
            8 => Some(Self::Fission),
            _ => None,
        }
    }

    /// Map a free-text engine name.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.to_ascii_uppercase();
        if upper.contains("XXL") {
            Self::Xxl
        } else if upper.contains("XL") && upper.contains("CLAN") {
            Self::ClanXl
        } else if upper.contains("XL") || upper.contains("EXTRA-LIGHT") {
            Self::Xl
        } else if upper.contains("LIGHT") {
            Self::Light
        } else if upper.contains("COMPACT") {
            Self::Compact
        } else if upper.contains("ICE") || upper.contains("COMBUSTION") {
            Self::Ice
        } else if upper.contains("FUEL") || upper.contains("CELL") {
            Self::FuelCell
        } else if upper.contains("FISSION") {
            Self::Fission
        } else {
            Self::Fusion
        }
    }

    /// Weight relative to a standard fusion engine of the same rating.
    #[must_use]
    pub const fn weight_multiplier(self) -> f64 {
        match self {
            Self::Fusion => 1.0,
            Self::Xl | Self::ClanXl => 0.5,
            Self::Light => 0.75,
            Self::Compact => 1.5,
            Self::Xxl => 1.0 / 3.0,
            Self::Ice => 2.0,
            Self::FuelCell => 1.2,
            Self::Fission => 1.75,
        }
    }

    /// C-bills per rating point per ton of unit (divided by 75 by callers).
    #[must_use]
    pub const fn cost_factor(self) -> f64 {
        match self {
            Self::Fusion => 5000.0,
            Self::Xl | Self::ClanXl => 20000.0,
            Self::Light => 15000.0,
            Self::Compact => 10000.0,
            Self::Xxl => 100_000.0,
            Self::Ice => 1250.0,
            Self::FuelCell => 3500.0,
            Self::Fission => 7500.0,
        }
    }

    /// Whether the engine is a fusion design (relevant for heat sinks and power amps).
    #[must_use]
    pub const fn is_fusion(self) -> bool {
        !matches!(self, Self::Ice | Self::FuelCell)
    }
}

/// Standard fusion engine weight for a rating, rounded up to the half ton.
#[must_use]
pub fn fusion_engine_weight(rating: u32) -> f64 {
    let rating = f64::from(rating);
    crate::lookup::ceil_half(rating * rating / 4800.0)
}

/// Gyro type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GyroType {
    /// Standard gyro.
    #[default]
    Standard,
    /// Extra-light gyro.
    Xl,
    /// Compact gyro.
    Compact,
    /// Heavy-duty gyro.
    HeavyDuty,
    /// Superheavy gyro.
    Superheavy,
    /// No gyro (interface cockpit designs).
    None,
}

impl GyroType {
    /// Map a free-text gyro name or numeric code.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.as_str() {
            "0" => return Self::Standard,
            "1" => return Self::Xl,
            "2" => return Self::Compact,
            "3" => return Self::HeavyDuty,
            "4" => return Self::Superheavy,
            "NONE" => return Self::None,
            _ => {}
        }
        if upper.contains("SUPERHEAVY") || upper.contains("SUPER HEAVY") {
            Self::Superheavy
        } else if upper.contains("XL") || upper.contains("EXTRA") {
            Self::Xl
        } else if upper.contains("COMPACT") {
            Self::Compact
        } else if upper.contains("HEAVY") {
            Self::HeavyDuty
        } else {
            Self::Standard
        }
    }

    /// Weight relative to a standard gyro.
    #[must_use]
    pub const fn weight_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Xl => 0.5,
            Self::Compact => 1.5,
            Self::HeavyDuty | Self::Superheavy => 2.0,
            Self::None => 0.0,
        }
    }

    /// Cost relative to a standard gyro.
    #[must_use]
    pub const fn cost_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Xl => 2.5,
            Self::Compact => 2.0,
            Self::HeavyDuty | Self::Superheavy => 1.5,
            Self::None => 0.0,
        }
    }
}

/// Cockpit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CockpitType {
    /// Standard cockpit.
    #[default]
    Standard,
    /// Small cockpit.
    Small,
    /// Command console.
    CommandConsole,
    /// Torso-mounted cockpit.
    TorsoMounted,
    /// Primitive cockpit.
    Primitive,
    /// Industrial cockpit.
    Industrial,
    /// Interface cockpit.
    Interface,
}

impl CockpitType {
    /// Map a free-text cockpit name.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.to_ascii_uppercase();
        if upper.contains("SMALL") {
            Self::Small
        } else if upper.contains("COMMAND") {
            Self::CommandConsole
        } else if upper.contains("TORSO") {
            Self::TorsoMounted
        } else if upper.contains("PRIMITIVE") {
            Self::Primitive
        } else if upper.contains("INDUSTRIAL") {
            Self::Industrial
        } else if upper.contains("INTERFACE") {
            Self::Interface
        } else {
            Self::Standard
        }
    }

    /// Weight in tons.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Small => 2.0,
            Self::Standard | Self::Industrial => 3.0,
            Self::TorsoMounted | Self::Interface => 4.0,
            Self::Primitive => 5.0,
            Self::CommandConsole => 6.0,
        }
    }

    /// Cost in C-bills.
    #[must_use]
    pub const fn cost(self) -> f64 {
        match self {
            Self::Standard => 200_000.0,
            Self::Small => 175_000.0,
            Self::CommandConsole => 500_000.0,
            Self::TorsoMounted => 750_000.0,
            Self::Primitive => 125_000.0,
            Self::Industrial => 100_000.0,
            Self::Interface => 1_500_000.0,
        }
    }
}

/// Internal structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureType {
    /// Standard structure.
    #[default]
    Standard,
    /// Inner Sphere endo steel.
    EndoSteel,
    /// Clan endo steel.
    EndoSteelClan,
    /// Endo-composite.
    EndoComposite,
    /// Reinforced structure.
    Reinforced,
    /// Composite structure.
    Composite,
    /// Industrial structure.
    Industrial,
}

impl StructureType {
    /// Map a free-text structure name.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.to_ascii_uppercase();
        if upper.contains("ENDO") && upper.contains("COMPOSITE") {
            Self::EndoComposite
        } else if upper.contains("ENDO") && upper.contains("CLAN") {
            Self::EndoSteelClan
        } else if upper.contains("ENDO") {
            Self::EndoSteel
        } else if upper.contains("REINFORCED") {
            Self::Reinforced
        } else if upper.contains("COMPOSITE") {
            Self::Composite
        } else if upper.contains("INDUSTRIAL") {
            Self::Industrial
        } else {
            Self::Standard
        }
    }

    /// Weight relative to standard structure.
    #[must_use]
    pub const fn weight_multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::EndoSteel | Self::EndoSteelClan | Self::Composite => 0.5,
            Self::EndoComposite => 0.75,
            Self::Reinforced | Self::Industrial => 2.0,
        }
    }

    /// C-bills per ton of unit.
    #[must_use]
    pub const fn cost_per_ton(self) -> f64 {
        match self {
            Self::Standard => 400.0,
            Self::EndoSteel | Self::EndoSteelClan | Self::Composite => 1600.0,
            Self::EndoComposite => 3200.0,
            Self::Reinforced => 6400.0,
            Self::Industrial => 300.0,
        }
    }
}

/// Armor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmorType {
    /// Standard armor.
    #[default]
    Standard,
    /// Inner Sphere ferro-fibrous.
    FerroFibrous,
    /// Clan ferro-fibrous.
    FerroFibrousClan,
    /// Light ferro-fibrous.
    LightFerroFibrous,
    /// Heavy ferro-fibrous.
    HeavyFerroFibrous,
    /// Stealth armor.
    Stealth,
    /// Reactive armor.
    Reactive,
    /// Laser-reflective armor.
    Reflective,
    /// Hardened armor.
    Hardened,
    /// Primitive armor.
    Primitive,
    /// Industrial armor.
    Industrial,
    /// Commercial armor.
    Commercial,
    /// Heavy industrial armor.
    HeavyIndustrial,
    /// Impact-resistant armor.
    ImpactResistant,
}

impl ArmorType {
    /// Map a free-text armor name.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.to_ascii_uppercase();
        if upper.contains("STEALTH") {
            Self::Stealth
        } else if upper.contains("REACTIVE") {
            Self::Reactive
        } else if upper.contains("REFLECTIVE") || upper.contains("LASER-REFLECT") {
            Self::Reflective
        } else if upper.contains("HARDENED") {
            Self::Hardened
        } else if upper.contains("HEAVY") && upper.contains("FERRO") {
            Self::HeavyFerroFibrous
        } else if upper.contains("LIGHT") && upper.contains("FERRO") {
            Self::LightFerroFibrous
        } else if upper.contains("FERRO") && upper.contains("CLAN") {
            Self::FerroFibrousClan
        } else if upper.contains("FERRO") {
            Self::FerroFibrous
        } else if upper.contains("PRIMITIVE") {
            Self::Primitive
        } else if upper.contains("COMMERCIAL") {
            Self::Commercial
        } else if upper.contains("IMPACT") && upper.contains("RESIST") {
            Self::ImpactResistant
        } else if upper.contains("HEAVY") && upper.contains("INDUSTRIAL") {
            Self::HeavyIndustrial
        } else if upper.contains("INDUSTRIAL") {
            Self::Industrial
        } else {
            Self::Standard
        }
    }

    /// Armor points provided per ton.
    #[must_use]
    pub const fn points_per_ton(self) -> f64 {
        match self {
            Self::Standard
            | Self::Stealth
            | Self::Reactive
            | Self::Reflective
            | Self::HeavyIndustrial
            | Self::ImpactResistant => 16.0,
            Self::FerroFibrous => 17.92,
            Self::FerroFibrousClan => 19.2,
            Self::LightFerroFibrous => 16.96,
            Self::HeavyFerroFibrous => 19.84,
            Self::Hardened => 8.0,
            Self::Primitive => 10.72,
            Self::Industrial => 10.0,
            Self::Commercial => 10.67,
        }
    }

    /// C-bills per ton.
    #[must_use]
    pub const fn cost_per_ton(self) -> f64 {
        match self {
            Self::Standard | Self::HeavyIndustrial => 10000.0,
            Self::FerroFibrous | Self::FerroFibrousClan | Self::ImpactResistant => 20000.0,
            Self::LightFerroFibrous | Self::Hardened => 15000.0,
            Self::HeavyFerroFibrous => 25000.0,
            Self::Stealth => 50000.0,
            Self::Reactive | Self::Reflective => 30000.0,
            Self::Primitive | Self::Industrial => 5000.0,
            Self::Commercial => 3000.0,
        }
    }

    /// Battle value multiplier applied to armor points.
    #[must_use]
    pub const fn bv_multiplier(self) -> f64 {
        match self {
            Self::Hardened => 2.0,
            Self::Reactive | Self::Reflective | Self::ImpactResistant => 1.5,
            Self::Commercial => 0.5,
            _ => 1.0,
        }
    }

    /// Tons of armor needed for a number of points.
    #[must_use]
    pub fn tons_for(self, points: u32) -> f64 {
        crate::lookup::ceil_half(f64::from(points) / self.points_per_ton())
    }
}

/// Heat sink type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatSinkType {
    /// Single heat sinks.
    #[default]
    Single,
    /// Inner Sphere double heat sinks.
    Double,
    /// Clan double heat sinks.
    DoubleClan,
    /// Compact heat sinks.
    Compact,
    /// Laser heat sinks.
    Laser,
}

impl HeatSinkType {
    /// Map a free-text heat sink name or the numeric `sink_type` code.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.as_str() {
            "0" => return Self::Single,
            "1" => return Self::Double,
            _ => {}
        }
        if upper.contains("DOUBLE") && upper.contains("CLAN") {
            Self::DoubleClan
        } else if upper.contains("DOUBLE") {
            Self::Double
        } else if upper.contains("COMPACT") {
            Self::Compact
        } else if upper.contains("LASER") {
            Self::Laser
        } else {
            Self::Single
        }
    }

    /// Heat dissipated per sink.
    #[must_use]
    pub const fn dissipation(self) -> u32 {
        match self {
            Self::Single | Self::Compact => 1,
            Self::Double | Self::DoubleClan | Self::Laser => 2,
        }
    }

    /// C-bills per sink.
    #[must_use]
    pub const fn cost(self) -> f64 {
        match self {
            Self::Single => 2000.0,
            Self::Compact => 3000.0,
            Self::Double | Self::DoubleClan => 6000.0,
            Self::Laser => 6000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_from_text_priority() {
        assert_eq!(EngineType::from_text("XXL Engine(Clan)"), EngineType::Xxl);
        assert_eq!(EngineType::from_text("XL Engine (Clan)"), EngineType::ClanXl);
        assert_eq!(EngineType::from_text("XL Engine(IS)"), EngineType::Xl);
        assert_eq!(EngineType::from_text("Light Fusion Engine"), EngineType::Light);
        assert_eq!(EngineType::from_text("ICE"), EngineType::Ice);
        assert_eq!(EngineType::from_text("Fuel-Cell Engine"), EngineType::FuelCell);
        assert_eq!(EngineType::from_text("Fusion Engine"), EngineType::Fusion);
    }

    #[test]
    fn test_engine_codes() {
        assert_eq!(EngineType::from_code(0), Some(EngineType::Fusion));
        assert_eq!(EngineType::from_code(4), Some(EngineType::ClanXl));
        assert_eq!(EngineType::from_code(42), None);
    }

    #[test]
    fn test_fusion_engine_weight() {
        assert_eq!(fusion_engine_weight(300), 19.0);
        assert_eq!(fusion_engine_weight(200), 8.5);
        assert_eq!(fusion_engine_weight(0), 0.0);
    }

    #[test]
    fn test_structure_from_text_priority() {
        assert_eq!(
            StructureType::from_text("Endo-Composite"),
            StructureType::EndoComposite
        );
        assert_eq!(
            StructureType::from_text("Clan Endo Steel"),
            StructureType::EndoSteelClan
        );
        assert_eq!(StructureType::from_text("IS Endo Steel"), StructureType::EndoSteel);
        assert_eq!(StructureType::from_text("Standard"), StructureType::Standard);
    }

    #[test]
    fn test_armor_from_text_priority() {
        assert_eq!(
            ArmorType::from_text("Heavy Ferro-Fibrous"),
            ArmorType::HeavyFerroFibrous
        );
        assert_eq!(
            ArmorType::from_text("Ferro-Fibrous(Clan)"),
            ArmorType::FerroFibrousClan
        );
        assert_eq!(
            ArmorType::from_text("Heavy Industrial Armor"),
            ArmorType::HeavyIndustrial
        );
        assert_eq!(ArmorType::from_text("Laser-Reflective"), ArmorType::Reflective);
        assert_eq!(ArmorType::from_text("Standard(Inner Sphere)"), ArmorType::Standard);
    }

    #[test]
    fn test_armor_tons() {
        assert_eq!(ArmorType::Standard.tons_for(160), 10.0);
        assert_eq!(ArmorType::Standard.tons_for(161), 10.5);
        assert_eq!(ArmorType::Hardened.tons_for(16), 2.0);
    }

    #[test]
    fn test_heat_sink_from_text() {
        assert_eq!(
            HeatSinkType::from_text("Clan Double Heat Sink"),
            HeatSinkType::DoubleClan
        );
        assert_eq!(HeatSinkType::from_text("1"), HeatSinkType::Double);
        assert_eq!(HeatSinkType::from_text("Laser Heat Sink"), HeatSinkType::Laser);
        assert_eq!(HeatSinkType::from_text(""), HeatSinkType::Single);
    }

    #[test]
    fn test_gyro_and_cockpit() {
        assert_eq!(GyroType::from_text("Heavy-Duty Gyro"), GyroType::HeavyDuty);
        assert_eq!(GyroType::from_text("Super Heavy Gyro"), GyroType::Superheavy);
        assert_eq!(GyroType::from_text("3"), GyroType::HeavyDuty);
        assert_eq!(CockpitType::from_text("Small Cockpit"), CockpitType::Small);
        assert_eq!(
            CockpitType::from_text("Torso-Mounted Cockpit"),
            CockpitType::TorsoMounted
        );
        assert_eq!(CockpitType::Small.weight(), 2.0);
    }
}
