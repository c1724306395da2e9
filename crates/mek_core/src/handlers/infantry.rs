//! Conventional infantry platoons.

use serde::{Deserialize, Serialize};

use super::{ParsedFields, UnitHandler};
use crate::document::{location_label, UnitDocument};
use crate::equipment::{labels, parse_mounts, Location, Mounted};
use crate::lookup::{battle_value, cbills, count, normalize_equipment_id, round_kg};
use crate::serialization::{serialize_mounts, SerializedMovement, SerializedUnit};
use crate::unit::{Unit, UnitPayload, UnitType, WeightClass};
use crate::validation::ValidationReport;

/// Default troopers per squad.
pub const DEFAULT_SQUAD_SIZE: u32 = 7;
/// Default squads per platoon.
pub const DEFAULT_SQUADS: u32 = 4;
/// Tons per trooper.
pub const TONS_PER_TROOPER: f64 = 0.08;
/// Tons per field gun carriage.
pub const TONS_PER_FIELD_GUN: f64 = 0.5;

const FIELD_GUN_BLOCK: &str = "Field Guns";

/// Infantry locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfantryLocation {
    /// The platoon itself.
    Platoon,
    /// Towed field guns.
    FieldGuns,
}

impl Location for InfantryLocation {
    const ALL: &'static [Self] = &[Self::Platoon, Self::FieldGuns];

    fn label(self) -> &'static str {
        match self {
            Self::Platoon => "Platoon",
            Self::FieldGuns => FIELD_GUN_BLOCK,
        }
    }
}

/// Equipment carried by a platoon.
pub type InfantryMounted = Mounted<InfantryLocation>;

/// How a platoon moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InfantryMotion {
    /// Foot (leg) infantry.
    #[default]
    Foot,
    /// Jump infantry.
    Jump,
    /// Motorized infantry.
    Motorized,
    /// Mechanized wheeled.
    Wheeled,
    /// Mechanized tracked.
    Tracked,
    /// Mechanized hover.
    Hover,
    /// Mechanized VTOL (microcopter).
    Vtol,
    /// Microlite.
    Microlite,
    /// Underwater maneuvering units.
    Umu,
    /// Value not in the table.
    Unmapped(String),
}

impl InfantryMotion {
    /// Map the raw motion type. Empty means foot.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        match lower.as_str() {
            "" | "leg" | "foot" => Self::Foot,
            "jump" => Self::Jump,
            "motorized" => Self::Motorized,
            "wheeled" => Self::Wheeled,
            "tracked" => Self::Tracked,
            "hover" => Self::Hover,
            "vtol" | "microcopter" => Self::Vtol,
            "microlite" => Self::Microlite,
            "umu" | "submarine" => Self::Umu,
            _ => Self::Unmapped(raw.trim().to_string()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Foot => "Foot",
            Self::Jump => "Jump",
            Self::Motorized => "Motorized",
            Self::Wheeled => "Wheeled",
            Self::Tracked => "Tracked",
            Self::Hover => "Hover",
            Self::Vtol => "VTOL",
            Self::Microlite => "Microlite",
            Self::Umu => "UMU",
            Self::Unmapped(raw) => raw,
        }
    }

    /// Ground MP for the motion type.
    #[must_use]
    pub const fn ground_mp(&self) -> u32 {
        match self {
            Self::Foot | Self::Jump | Self::Unmapped(_) => 1,
            Self::Motorized | Self::Umu => 3,
            Self::Wheeled | Self::Tracked => 4,
            Self::Hover | Self::Vtol | Self::Microlite => 5,
        }
    }

    /// Jump MP for the motion type.
    #[must_use]
    pub const fn jump_mp(&self) -> u32 {
        match self {
            Self::Jump => 3,
            _ => 0,
        }
    }
}

/// Personal armor kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArmorKit {
    /// No kit.
    #[default]
    None,
    /// Flak armor.
    Flak,
    /// Ablative armor.
    Ablative,
    /// Generic armor kit.
    Generic,
    /// Sneak suits (camo, IR or ECM).
    Sneak,
    /// Clan armor kit.
    Clan,
    /// Environmental suits.
    Environmental,
}

impl ArmorKit {
    /// Map a free-text kit name. Unknown names are treated as a generic kit.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.is_empty() || lower == "none" {
            Self::None
        } else if lower.contains("flak") {
            Self::Flak
        } else if lower.contains("ablative") {
            Self::Ablative
        } else if lower.contains("sneak") {
            Self::Sneak
        } else if lower.contains("clan") {
            Self::Clan
        } else if lower.contains("environment") || lower.contains("vacuum") {
            Self::Environmental
        } else {
            Self::Generic
        }
    }

    /// Extra C-bills per trooper.
    #[must_use]
    pub const fn cost_per_trooper(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Flak | Self::Ablative | Self::Generic => 500.0,
            Self::Sneak | Self::Clan | Self::Environmental => 2000.0,
        }
    }
}

/// A towed field gun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGun {
    /// Weapon name.
    pub name: String,
    /// Normalized equipment id.
    pub equipment_id: String,
    /// Troopers needed to crew it.
    pub crew: u32,
}

impl FieldGun {
    /// Field gun for a weapon name with its crew requirement.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            equipment_id: normalize_equipment_id(&name),
            crew: field_gun_crew(&name),
            name,
        }
    }
}

/// Crew needed to operate a field gun.
///
/// More specific names are checked first (`UAC/5` before `AC/5`).
#[must_use]
pub fn field_gun_crew(name: &str) -> u32 {
    const TABLE: [(&str, u32); 10] = [
        ("long tom", 30),
        ("sniper", 20),
        ("thumper", 15),
        ("gauss", 15),
        ("uac/5", 9),
        ("lb 10-x", 11),
        ("ac/20", 14),
        ("ac/10", 12),
        ("ac/5", 8),
        ("ac/2", 6),
    ];
    let lower = name.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or(2, |(_, crew)| *crew)
}

/// Infantry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfantryPayload {
    /// Motion type.
    pub motion_type: InfantryMotion,
    /// Troopers per squad.
    pub squad_size: u32,
    /// Squads in the platoon.
    pub number_of_squads: u32,
    /// `squad_size * number_of_squads`, saturating.
    pub platoon_strength: u32,
    /// Primary weapon name.
    pub primary_weapon: String,
    /// Secondary weapon name.
    pub secondary_weapon: String,
    /// Secondary weapons per squad.
    pub secondary_count: u32,
    /// Personal armor kit.
    pub armor_kit: ArmorKit,
    /// Anti-mech training.
    pub anti_mech_training: bool,
    /// Towed field guns.
    pub field_guns: Vec<FieldGun>,
    /// Other platoon equipment.
    pub equipment: Vec<InfantryMounted>,
}

impl InfantryPayload {
    /// Whether the primary weapon names `needle`. Secondary weapons do not
    /// change the per-trooper rating.
    fn primary_is(&self, needle: &str) -> bool {
        self.primary_weapon.to_ascii_lowercase().contains(needle)
    }
}

/// Handler for conventional infantry.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfantryHandler;

fn payload(unit: &Unit) -> Option<&InfantryPayload> {
    match &unit.payload {
        UnitPayload::Infantry(p) => Some(p),
        _ => None,
    }
}

impl UnitHandler for InfantryHandler {
    fn unit_type(&self) -> UnitType {
        UnitType::Infantry
    }

    fn locations(&self) -> Vec<&'static str> {
        labels::<InfantryLocation>()
    }

    fn weight_class(&self, _parsed: &ParsedFields) -> WeightClass {
        WeightClass::Ultralight
    }

    fn parse_type_specific_fields(&self, doc: &UnitDocument) -> ParsedFields {
        let mut warnings = Vec::new();

        let motion_type = InfantryMotion::from_text(&doc.motion_type);
        if let InfantryMotion::Unmapped(raw) = &motion_type {
            warnings.push(format!("Unknown infantry motion type '{raw}'"));
        }

        let squad_size = count(doc.squad_size, DEFAULT_SQUAD_SIZE);
        let number_of_squads = count(doc.squadn, DEFAULT_SQUADS);
        let platoon_strength = squad_size.saturating_mul(number_of_squads);

        let field_guns: Vec<FieldGun> = doc
            .equipment
            .iter()
            .filter(|(key, _)| {
                location_label(key).eq_ignore_ascii_case(FIELD_GUN_BLOCK)
            })
            .flat_map(|(_, names)| names.iter())
            .filter(|name| !name.trim().is_empty())
            .map(|name| FieldGun::new(name))
            .collect();

        let parsed = parse_mounts::<InfantryLocation>(doc, &[FIELD_GUN_BLOCK]);
        warnings.extend(parsed.warnings);

        let payload = InfantryPayload {
            motion_type,
            squad_size,
            number_of_squads,
            platoon_strength,
            primary_weapon: doc.tag_str("primary").unwrap_or_default().to_string(),
            secondary_weapon: doc.tag_str("secondary").unwrap_or_default().to_string(),
            secondary_count: doc.tag_number("secondn").map_or(0, |n| n.max(0.0) as u32),
            armor_kit: ArmorKit::from_text(doc.tag_str("armorkit").unwrap_or_default()),
            anti_mech_training: doc.tag_flag("antimek"),
            field_guns,
            equipment: parsed.mounts,
        };

        let tonnage = if doc.tonnage > 0.0 {
            doc.tonnage
        } else {
            platoon_weight(&payload)
        };

        ParsedFields::new(tonnage, UnitPayload::Infantry(payload)).with_warnings(warnings)
    }

    fn validate_type_specific_rules(&self, unit: &Unit, report: &mut ValidationReport) {
        let Some(p) = payload(unit) else {
            return;
        };

        report.check_range("Squad size", f64::from(p.squad_size), 1.0, 10.0, "troopers");
        if !(1..=4).contains(&p.number_of_squads) {
            report.warning(format!(
                "Platoon has {} squads; platoons normally field 1-4",
                p.number_of_squads
            ));
        }
        if p.motion_type == InfantryMotion::Jump && !p.field_guns.is_empty() {
            report.error("Jump infantry cannot carry field guns");
        }
        for gun in &p.field_guns {
            if gun.crew > p.squad_size {
                report.error(format!(
                    "Field gun {} needs a crew of {} but squads have {} troopers",
                    gun.name, gun.crew, p.squad_size
                ));
            }
        }
    }

    fn calculate_weight(&self, unit: &Unit) -> f64 {
        payload(unit).map_or(0.0, platoon_weight)
    }

    fn calculate_bv(&self, unit: &Unit) -> u32 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let mut per_trooper = 2.0;
        if p.primary_is("laser") {
            per_trooper += 1.0;
        }
        if p.primary_is("srm") {
            per_trooper += 2.0;
        }
        if p.anti_mech_training {
            per_trooper += 1.0;
        }
        if p.armor_kit != ArmorKit::None {
            per_trooper += 0.5;
        }
        battle_value(f64::from(p.platoon_strength) * per_trooper)
    }

    fn calculate_cost(&self, unit: &Unit) -> u64 {
        let Some(p) = payload(unit) else {
            return 0;
        };
        let mut per_trooper = 1000.0;
        if p.anti_mech_training {
            per_trooper += 500.0;
        }
        per_trooper += p.armor_kit.cost_per_trooper();
        let guns = 50_000.0 * p.field_guns.len() as f64;
        cbills(f64::from(p.platoon_strength) * per_trooper + guns)
    }

    fn serialize(&self, unit: &Unit) -> SerializedUnit {
        let Some(p) = payload(unit) else {
            return SerializedUnit::from_base(&unit.base, "");
        };
        let mut out = SerializedUnit::from_base(&unit.base, p.motion_type.label());
        out.movement = Some(SerializedMovement {
            walk: p.motion_type.ground_mp(),
            run: p.motion_type.ground_mp(),
            jump: p.motion_type.jump_mp(),
        });
        out.equipment = serialize_mounts(&p.equipment);
        let guns: Vec<InfantryMounted> = p
            .field_guns
            .iter()
            .enumerate()
            .map(|(i, gun)| Mounted::from_raw(&gun.name, InfantryLocation::FieldGuns, i))
            .collect();
        out.equipment.extend(serialize_mounts(&guns));
        out.extend("squadSize", p.squad_size);
        out.extend("numberOfSquads", p.number_of_squads);
        out.extend("platoonStrength", p.platoon_strength);
        out.extend("secondaryCount", p.secondary_count);
        out.extend("antiMechTraining", u32::from(p.anti_mech_training));
        out
    }
}

fn platoon_weight(p: &InfantryPayload) -> f64 {
    round_kg(
        f64::from(p.platoon_strength) * TONS_PER_TROOPER
            + TONS_PER_FIELD_GUN * p.field_guns.len() as f64,
    )
}
