//! Mounted equipment entries.
//!
//! A mount is generic over the owning kind's location vocabulary, so a
//! vehicle mount can only name vehicle locations and an aerospace mount only
//! aerospace arcs. Mount flags are read from the suffix conventions of the
//! legacy files: `(R)` rear-mounted, `(T)` turret-mounted, `:APM`
//! anti-personnel mount and `:Modular` modular mount.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::document::{location_label, UnitDocument};
use crate::lookup::normalize_equipment_id;

/// Location vocabulary of one unit kind.
pub trait Location: Copy + Eq + Debug + 'static {
    /// Every location, in display order.
    const ALL: &'static [Self];

    /// Display label.
    fn label(self) -> &'static str;

    /// Parse a display label, ignoring case and a trailing `Equipment`.
    fn from_label(raw: &str) -> Option<Self> {
        let label = location_label(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|loc| loc.label().eq_ignore_ascii_case(label))
    }
}

/// One piece of equipment mounted on a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mounted<L> {
    /// Mount id, unique within the unit.
    pub id: String,
    /// Normalized equipment id.
    pub equipment_id: String,
    /// Equipment name with mount suffixes removed.
    pub name: String,
    /// Where the equipment is mounted.
    pub location: L,
    /// Rear-facing mount.
    pub is_rear_mounted: bool,
    /// Turret mount.
    pub is_turret_mounted: bool,
    /// Anti-personnel mount (battle armor).
    pub is_ap_mount: bool,
    /// Modular mount (battle armor).
    pub is_modular: bool,
}

impl<L: Location> Mounted<L> {
    /// Build a mount from a raw equipment line, stripping mount suffixes.
    #[must_use]
    pub fn from_raw(raw: &str, location: L, index: usize) -> Self {
        let mut name = raw.trim().to_string();
        let mut is_rear_mounted = false;
        let mut is_turret_mounted = false;
        let mut is_ap_mount = false;
        let mut is_modular = false;

        loop {
            if let Some(rest) = strip_suffix_ci(&name, ":APM") {
                is_ap_mount = true;
                name = rest;
            } else if let Some(rest) = strip_suffix_ci(&name, ":Modular") {
                is_modular = true;
                name = rest;
            } else if let Some(rest) = strip_suffix_ci(&name, "(R)") {
                is_rear_mounted = true;
                name = rest;
            } else if let Some(rest) = strip_suffix_ci(&name, "(T)") {
                is_turret_mounted = true;
                name = rest;
            } else {
                break;
            }
        }

        let slot = normalize_equipment_id(location.label());
        Self {
            id: format!("{slot}-{index}"),
            equipment_id: normalize_equipment_id(&name),
            name,
            location,
            is_rear_mounted,
            is_turret_mounted,
            is_ap_mount,
            is_modular,
        }
    }

    /// Raw line form with mount suffixes restored.
    #[must_use]
    pub fn raw_name(&self) -> String {
        let mut raw = self.name.clone();
        if self.is_rear_mounted {
            raw.push_str(" (R)");
        }
        if self.is_turret_mounted {
            raw.push_str(" (T)");
        }
        if self.is_modular {
            raw.push_str(":Modular");
        }
        if self.is_ap_mount {
            raw.push_str(":APM");
        }
        raw
    }
}

fn strip_suffix_ci(name: &str, suffix: &str) -> Option<String> {
    let trimmed = name.trim_end();
    if trimmed.len() < suffix.len() || !trimmed.is_char_boundary(trimmed.len() - suffix.len()) {
        return None;
    }
    let (head, tail) = trimmed.split_at(trimmed.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix)
        .then(|| head.trim_end().to_string())
}

/// Equipment read from a document, with warnings for unknown location blocks.
#[derive(Debug, Clone)]
pub struct ParsedEquipment<L> {
    /// Mounts in block order.
    pub mounts: Vec<Mounted<L>>,
    /// One warning per skipped location block.
    pub warnings: Vec<String>,
}

/// Read every equipment block of a document into typed mounts.
///
/// Blocks whose key is not a location of `L` are skipped with a warning.
/// Blocks listed in `ignored` (for example infantry field guns, which the
/// handler reads itself) are skipped silently.
#[must_use]
pub fn parse_mounts<L: Location>(doc: &UnitDocument, ignored: &[&str]) -> ParsedEquipment<L> {
    let mut mounts = Vec::new();
    let mut warnings = Vec::new();

    for (key, names) in &doc.equipment {
        let label = location_label(key);
        if ignored.iter().any(|i| i.eq_ignore_ascii_case(label)) {
            continue;
        }
        let Some(location) = L::from_label(key) else {
            warnings.push(format!(
                "Unknown equipment location '{key}': {} item(s) ignored",
                names.len()
            ));
            continue;
        };
        for name in names.iter().filter(|n| !n.trim().is_empty()) {
            let index = mounts.len();
            mounts.push(Mounted::from_raw(name, location, index));
        }
    }

    ParsedEquipment { mounts, warnings }
}

/// Labels of a location vocabulary.
#[must_use]
pub fn labels<L: Location>() -> Vec<&'static str> {
    L::ALL.iter().map(|loc| loc.label()).collect()
}
