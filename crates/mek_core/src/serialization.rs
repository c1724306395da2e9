//! Interchange format for unit records.
//!
//! [`SerializedUnit`] is the camelCase JSON shape shared with the editor and
//! persistence layers. Serialization always succeeds; deserialization reports
//! problems through [`DeserializeOutcome`] and never panics.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::equipment::{Location, Mounted};
use crate::lookup::canonical_id;
use crate::unit::{Era, RulesLevel, TechBase, Unit, UnitBase, UnitType, WeightClass};

/// Engine sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEngine {
    /// Engine type label.
    #[serde(rename = "type")]
    pub engine_type: String,
    /// Engine rating.
    pub rating: u32,
}

/// Armor sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedArmor {
    /// Armor type label.
    #[serde(rename = "type")]
    pub armor_type: String,
    /// Points per location label.
    pub allocation: BTreeMap<String, u32>,
}

/// Heat sink sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedHeatSinks {
    /// Heat sink type label.
    #[serde(rename = "type")]
    pub heat_sink_type: String,
    /// Number of sinks.
    pub count: u32,
}

/// Movement sub-object. Ground units use walk/run, fighters safe/max thrust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedMovement {
    /// Walk, cruise or safe-thrust MP.
    pub walk: u32,
    /// Run, flank or max-thrust MP.
    pub run: u32,
    /// Jump MP.
    #[serde(default)]
    pub jump: u32,
}

/// One mounted equipment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEquipment {
    /// Mount id.
    pub id: String,
    /// Normalized equipment id.
    pub equipment_id: String,
    /// Equipment name.
    pub name: String,
    /// Location label.
    pub location: String,
    /// Rear-facing mount.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_rear_mounted: bool,
    /// Turret mount.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_turret_mounted: bool,
    /// Anti-personnel mount.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ap_mount: bool,
    /// Modular mount.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_modular: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Serialized unit record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedUnit {
    /// Canonical id.
    pub id: String,
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    pub model: String,
    /// Tonnage.
    pub tonnage: f64,
    /// Unit kind label.
    pub unit_type: String,
    /// Kind-specific configuration (mech configuration, motion type, design).
    pub configuration: String,
    /// Tech base label.
    pub tech_base: String,
    /// Rules level label.
    pub rules_level: String,
    /// Era label.
    pub era: String,
    /// Introduction year.
    pub year: u32,
    /// Battlefield role.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Publication source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    /// Engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<SerializedEngine>,
    /// Gyro type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gyro: Option<String>,
    /// Cockpit type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cockpit: Option<String>,
    /// Structure type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    /// Armor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<SerializedArmor>,
    /// Heat sinks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_sinks: Option<SerializedHeatSinks>,
    /// Movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<SerializedMovement>,
    /// Mounted equipment.
    #[serde(default)]
    pub equipment: Vec<SerializedEquipment>,
    /// Equipment names per location, in mount order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub critical_slots: BTreeMap<String, Vec<String>>,
    /// Kind-specific numeric fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, f64>,
}

impl SerializedUnit {
    /// Start a serialized record from the shared base fields.
    #[must_use]
    pub fn from_base(base: &UnitBase, configuration: impl Into<String>) -> Self {
        Self {
            id: base.id.clone(),
            chassis: base.chassis.clone(),
            model: base.model.clone(),
            tonnage: base.tonnage,
            unit_type: base.unit_type.label().to_string(),
            configuration: configuration.into(),
            tech_base: base.tech_base.label().to_string(),
            rules_level: base.rules_level.label().to_string(),
            era: base.era.label().to_string(),
            year: base.year,
            role: base.role.clone(),
            source: base.source.clone(),
            ..Self::default()
        }
    }

    /// Record a kind-specific numeric field.
    pub fn extend(&mut self, key: &str, value: impl Into<f64>) {
        self.extensions.insert(key.to_string(), value.into());
    }

    /// Numeric extension as a count, 0 when absent or negative.
    #[must_use]
    pub fn extension_count(&self, key: &str) -> u32 {
        self.extensions
            .get(key)
            .map_or(0, |&v| if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 })
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error only if a float field is not representable in JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid serialized unit.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Result of turning a serialized record back into a unit.
#[derive(Debug, Clone, PartialEq)]
pub enum DeserializeOutcome {
    /// The record was rebuilt.
    Success(Unit),
    /// The record was malformed.
    Failure(Vec<String>),
    /// The kind has no deserializer.
    Unsupported {
        /// Kind that was requested.
        unit_type: UnitType,
        /// Why it is unsupported.
        reason: String,
    },
}

impl DeserializeOutcome {
    /// Unsupported outcome with the standard reason.
    #[must_use]
    pub fn unsupported(unit_type: UnitType) -> Self {
        Self::Unsupported {
            unit_type,
            reason: format!("Deserialization is not implemented for {unit_type} records"),
        }
    }

    /// True for [`DeserializeOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The rebuilt unit, if any.
    #[must_use]
    pub fn into_unit(self) -> Option<Unit> {
        match self {
            Self::Success(unit) => Some(unit),
            Self::Failure(_) | Self::Unsupported { .. } => None,
        }
    }
}

/// Label of a serde unit-variant enum (e.g. `"ENDO_STEEL"`).
#[must_use]
pub fn enum_label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::new(),
    }
}

/// Parse a serde unit-variant label produced by [`enum_label`].
#[must_use]
pub fn enum_from_label<T: DeserializeOwned>(label: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(label.to_string())).ok()
}

/// Serialize typed mounts.
#[must_use]
pub fn serialize_mounts<L: Location>(mounts: &[Mounted<L>]) -> Vec<SerializedEquipment> {
    mounts
        .iter()
        .map(|m| SerializedEquipment {
            id: m.id.clone(),
            equipment_id: m.equipment_id.clone(),
            name: m.name.clone(),
            location: m.location.label().to_string(),
            is_rear_mounted: m.is_rear_mounted,
            is_turret_mounted: m.is_turret_mounted,
            is_ap_mount: m.is_ap_mount,
            is_modular: m.is_modular,
        })
        .collect()
}

/// Equipment names grouped by location label.
#[must_use]
pub fn slots_by_location<L: Location>(mounts: &[Mounted<L>]) -> BTreeMap<String, Vec<String>> {
    let mut slots: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for mount in mounts {
        slots
            .entry(mount.location.label().to_string())
            .or_default()
            .push(mount.raw_name());
    }
    slots
}

/// Rebuild typed mounts, recording an error for each unknown location.
pub fn deserialize_mounts<L: Location>(
    entries: &[SerializedEquipment],
    errors: &mut Vec<String>,
) -> Vec<Mounted<L>> {
    let mut mounts = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(location) = L::from_label(&entry.location) else {
            errors.push(format!(
                "Equipment '{}' has unknown location '{}'",
                entry.name, entry.location
            ));
            continue;
        };
        mounts.push(Mounted {
            id: entry.id.clone(),
            equipment_id: entry.equipment_id.clone(),
            name: entry.name.clone(),
            location,
            is_rear_mounted: entry.is_rear_mounted,
            is_turret_mounted: entry.is_turret_mounted,
            is_ap_mount: entry.is_ap_mount,
            is_modular: entry.is_modular,
        });
    }
    mounts
}

/// Armor points keyed by location label.
#[must_use]
pub fn armor_allocation<L: Location>(order: &[L], points: &[u32]) -> BTreeMap<String, u32> {
    order
        .iter()
        .zip(points)
        .map(|(loc, &p)| (loc.label().to_string(), p))
        .collect()
}

/// Points in `order` from a label-keyed allocation. Missing labels read as 0.
#[must_use]
pub fn read_allocation<L: Location>(order: &[L], allocation: &BTreeMap<String, u32>) -> Vec<u32> {
    order
        .iter()
        .map(|loc| allocation.get(loc.label()).copied().unwrap_or(0))
        .collect()
}

/// Rebuild the shared base of a serialized record.
///
/// Checks the kind label, chassis and tonnage. Unknown tech base, rules level
/// or era labels are errors; calculated fields start at zero.
pub fn deserialize_base(
    serialized: &SerializedUnit,
    expected: UnitType,
    weight_class: WeightClass,
    errors: &mut Vec<String>,
) -> Option<UnitBase> {
    if UnitType::from_label(&serialized.unit_type) != Some(expected) {
        errors.push(format!(
            "Expected unitType '{expected}', found '{}'",
            serialized.unit_type
        ));
    }
    if serialized.chassis.trim().is_empty() {
        errors.push("Missing chassis".to_string());
    }
    if !serialized.tonnage.is_finite() || serialized.tonnage < 0.0 {
        errors.push(format!("Invalid tonnage {}", serialized.tonnage));
    }
    let tech_base = parse_label::<TechBase>("techBase", &serialized.tech_base, errors);
    let rules_level = parse_label::<RulesLevel>("rulesLevel", &serialized.rules_level, errors);
    let era = parse_label::<Era>("era", &serialized.era, errors);

    if !errors.is_empty() {
        return None;
    }

    let id = if serialized.id.trim().is_empty() {
        canonical_id(&serialized.chassis, &serialized.model)
    } else {
        serialized.id.clone()
    };
    Some(UnitBase {
        id,
        name: display_name(&serialized.chassis, &serialized.model),
        chassis: serialized.chassis.clone(),
        model: serialized.model.clone(),
        unit_type: expected,
        tonnage: serialized.tonnage,
        weight_class,
        tech_base: tech_base.unwrap_or_default(),
        era: era.unwrap_or_default(),
        rules_level: rules_level.unwrap_or_default(),
        role: serialized.role.clone(),
        source: serialized.source.clone(),
        year: serialized.year,
        bv: 0,
        cost: 0,
        total_weight: 0.0,
        remaining_tonnage: serialized.tonnage,
        is_valid: false,
        validation_errors: Vec::new(),
    })
}

fn parse_label<T: DeserializeOwned>(field: &str, raw: &str, errors: &mut Vec<String>) -> Option<T> {
    let parsed = enum_from_label(raw);
    if parsed.is_none() {
        errors.push(format!("Unknown {field} '{raw}'"));
    }
    parsed
}

/// `"chassis model"`, or just the chassis when the model is empty.
#[must_use]
pub fn display_name(chassis: &str, model: &str) -> String {
    if model.trim().is_empty() {
        chassis.to_string()
    } else {
        format!("{chassis} {model}")
    }
}
