//! Fixed classification tables and numeric helpers shared by the handlers.
//!
//! Everything here is a pure function over already-decoded values. The
//! tables mirror the conventions of the legacy file formats: tech base and
//! rules level live in a single free-text `type` block, eras are bucketed by
//! introduction year, and ids are slugs of chassis and model.

use crate::unit::{Era, RulesLevel, TechBase};

/// Derive the tech base from the raw `type` block.
///
/// `"clan"` means Clan unless `"mixed"` also appears, in which case the unit
/// is Mixed. The numeric codes `1` and `2` used by some files map to Clan and
/// Mixed. Anything else is Inner Sphere.
#[must_use]
pub fn classify_tech_base(raw: &str) -> TechBase {
    let lower = raw.trim().to_ascii_lowercase();
    match lower.as_str() {
        "1" => return TechBase::Clan,
        "2" => return TechBase::Mixed,
        _ => {}
    }
    if lower.contains("mixed") {
        TechBase::Mixed
    } else if lower.contains("clan") {
        TechBase::Clan
    } else {
        TechBase::InnerSphere
    }
}

/// Derive the rules level from the raw `type` block.
///
/// `"level 1"` through `"level 4"` map to Introductory through Experimental.
/// Bare rules-level words are accepted too. Otherwise `default` is returned.
#[must_use]
pub fn classify_rules_level(raw: &str, default: RulesLevel) -> RulesLevel {
    let lower = raw.trim().to_ascii_lowercase();
    let by_level = [
        ("level 1", RulesLevel::Introductory),
        ("level 2", RulesLevel::Standard),
        ("level 3", RulesLevel::Advanced),
        ("level 4", RulesLevel::Experimental),
    ];
    if let Some((_, level)) = by_level.iter().find(|(needle, _)| lower.contains(needle)) {
        return *level;
    }
    match lower.as_str() {
        "introductory" => RulesLevel::Introductory,
        "standard" => RulesLevel::Standard,
        "advanced" => RulesLevel::Advanced,
        "experimental" => RulesLevel::Experimental,
        _ => default,
    }
}

/// Bucket an introduction year into an era.
#[must_use]
pub const fn era_from_year(year: u32) -> Era {
    match year {
        0..=2004 => Era::EarlySpaceflight,
        2005..=2570 => Era::AgeOfWar,
        2571..=2780 => Era::StarLeague,
        2781..=3049 => Era::SuccessionWars,
        3050..=3067 => Era::ClanInvasion,
        3068..=3080 => Era::CivilWar,
        3081..=3151 => Era::DarkAge,
        _ => Era::IlClan,
    }
}

/// Parse a free-text era name, ignoring case, spaces, dashes and underscores.
#[must_use]
pub fn parse_era(raw: &str) -> Option<Era> {
    let key = squash(raw);
    if key.is_empty() {
        return None;
    }
    Era::ALL.into_iter().find(|era| squash(era.label()) == key)
}

/// Resolve the era from an explicit name, falling back to the year.
#[must_use]
pub fn resolve_era(raw: &str, year: u32) -> Era {
    parse_era(raw).unwrap_or_else(|| era_from_year(year))
}

fn squash(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Canonical id for a design: lower-case `chassis-model` with punctuation removed.
#[must_use]
pub fn canonical_id(chassis: &str, model: &str) -> String {
    slugify(&format!("{chassis}-{model}"))
}

/// Normalize an equipment name into an id.
///
/// Tech-base qualifiers are folded into the slug (`"(Clan)"` becomes `clan`).
#[must_use]
pub fn normalize_equipment_id(name: &str) -> String {
    let lower = name
        .to_lowercase()
        .replace("(clan)", "clan")
        .replace("(inner sphere)", "is")
        .replace("(is)", "is");
    slugify(&lower)
}

fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        match c {
            ' ' | '/' | '-' => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            '(' | ')' | '\'' | '"' | '.' | ',' => {}
            other => slug.push(other),
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Round up to the next half ton.
#[must_use]
pub fn ceil_half(tons: f64) -> f64 {
    (tons * 2.0).ceil() / 2.0
}

/// Round to the nearest kilogram to keep float noise out of reported weights.
#[must_use]
pub fn round_kg(tons: f64) -> f64 {
    (tons * 1000.0).round() / 1000.0
}

/// Running MP from walking/cruising/safe-thrust MP.
#[must_use]
pub fn run_mp(walk: u32) -> u32 {
    (f64::from(walk) * 1.5).ceil() as u32
}

/// Battle value speed multiplier from the best of running and jumping MP.
///
/// `1 + (max(run, jump) - 5) * 0.1`, never below 0.5.
#[must_use]
pub fn speed_factor(run: u32, jump: u32) -> f64 {
    let best = f64::from(run.max(jump));
    (1.0 + (best - 5.0) * 0.1).max(0.5)
}

/// Clamp a possibly-negative document number into a count.
#[must_use]
pub fn count(value: Option<i32>, default: u32) -> u32 {
    value.map_or(default, |v| v.max(0) as u32)
}

/// Clamp a float into a non-negative C-bill amount.
#[must_use]
pub fn cbills(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Clamp a float into a non-negative battle value.
#[must_use]
pub fn battle_value(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Internal structure points per location for a biped BattleMech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechStructure {
    /// Head structure.
    pub head: u32,
    /// Center torso structure.
    pub center_torso: u32,
    /// Each side torso.
    pub side_torso: u32,
    /// Each arm.
    pub arm: u32,
    /// Each leg (all four legs on quads).
    pub leg: u32,
}

impl MechStructure {
    /// Total structure points for a biped.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.head + self.center_torso + 2 * self.side_torso + 2 * self.arm + 2 * self.leg
    }
}

/// Internal structure table for 20-100 ton BattleMechs.
///
/// Returns `None` for tonnages off the table (not a multiple of 5 or out of range).
#[must_use]
pub fn mech_structure(tonnage: u32) -> Option<MechStructure> {
    const TABLE: [(u32, u32, u32, u32, u32); 17] = [
        (20, 6, 5, 3, 4),
        (25, 8, 6, 4, 6),
        (30, 10, 7, 5, 7),
        (35, 11, 8, 6, 8),
        (40, 12, 10, 6, 10),
        (45, 14, 11, 7, 11),
        (50, 16, 12, 8, 12),
        (55, 18, 13, 9, 13),
        (60, 20, 14, 10, 14),
        (65, 21, 15, 10, 15),
        (70, 22, 15, 11, 15),
        (75, 23, 16, 12, 16),
        (80, 25, 17, 13, 17),
        (85, 27, 18, 14, 18),
        (90, 29, 19, 15, 19),
        (95, 30, 20, 16, 20),
        (100, 31, 21, 17, 21),
    ];

    TABLE
        .iter()
        .find(|row| row.0 == tonnage)
        .map(|&(_, center_torso, side_torso, arm, leg)| MechStructure {
            head: 3,
            center_torso,
            side_torso,
            arm,
            leg,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tech_base() {
        assert_eq!(classify_tech_base("IS Level 2"), TechBase::InnerSphere);
        assert_eq!(classify_tech_base("Clan Level 3"), TechBase::Clan);
        assert_eq!(classify_tech_base("Mixed (Clan Chassis)"), TechBase::Mixed);
        assert_eq!(classify_tech_base("1"), TechBase::Clan);
        assert_eq!(classify_tech_base(""), TechBase::InnerSphere);
    }

    #[test]
    fn test_classify_rules_level() {
        let d = RulesLevel::Standard;
        assert_eq!(classify_rules_level("IS Level 1", d), RulesLevel::Introductory);
        assert_eq!(classify_rules_level("Clan Level 3", d), RulesLevel::Advanced);
        assert_eq!(classify_rules_level("IS Level 4", d), RulesLevel::Experimental);
        assert_eq!(classify_rules_level("Experimental", d), RulesLevel::Experimental);
        assert_eq!(
            classify_rules_level("Inner Sphere", RulesLevel::Introductory),
            RulesLevel::Introductory
        );
    }

    #[test]
    fn test_era_from_year_boundaries() {
        assert_eq!(era_from_year(2004), Era::EarlySpaceflight);
        assert_eq!(era_from_year(2570), Era::AgeOfWar);
        assert_eq!(era_from_year(2571), Era::StarLeague);
        assert_eq!(era_from_year(3025), Era::SuccessionWars);
        assert_eq!(era_from_year(3050), Era::ClanInvasion);
        assert_eq!(era_from_year(3080), Era::CivilWar);
        assert_eq!(era_from_year(3151), Era::DarkAge);
        assert_eq!(era_from_year(3152), Era::IlClan);
    }

    #[test]
    fn test_resolve_era_prefers_explicit_name() {
        assert_eq!(resolve_era("Star League", 3060), Era::StarLeague);
        assert_eq!(resolve_era("dark-age", 2500), Era::DarkAge);
        assert_eq!(resolve_era("", 3060), Era::ClanInvasion);
        assert_eq!(resolve_era("Golden Age", 3060), Era::ClanInvasion);
    }

    #[test]
    fn test_canonical_id() {
        assert_eq!(canonical_id("Atlas", "AS7-D"), "atlas-as7-d");
        assert_eq!(
            canonical_id("Foot Platoon", "(Laser)"),
            "foot-platoon-laser"
        );
        assert_eq!(canonical_id("Mad Cat", ""), "mad-cat");
    }

    #[test]
    fn test_normalize_equipment_id() {
        assert_eq!(normalize_equipment_id("ER Large Laser (Clan)"), "er-large-laser-clan");
        assert_eq!(normalize_equipment_id("Autocannon/20"), "autocannon-20");
        assert_eq!(normalize_equipment_id("LRM 10 (IS)"), "lrm-10-is");
    }

    #[test]
    fn test_ceil_half() {
        assert_eq!(ceil_half(2.1), 2.5);
        assert_eq!(ceil_half(2.5), 2.5);
        assert_eq!(ceil_half(2.51), 3.0);
        assert_eq!(ceil_half(0.0), 0.0);
    }

    #[test]
    fn test_run_mp() {
        assert_eq!(run_mp(4), 6);
        assert_eq!(run_mp(5), 8);
        assert_eq!(run_mp(0), 0);
    }

    #[test]
    fn test_speed_factor() {
        assert!((speed_factor(5, 0) - 1.0).abs() < 1e-9);
        assert!((speed_factor(6, 8) - 1.3).abs() < 1e-9);
        assert!((speed_factor(0, 0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(count(Some(-3), 7), 0);
        assert_eq!(count(None, 7), 7);
        assert_eq!(cbills(-5.0), 0);
        assert_eq!(cbills(f64::NAN), 0);
        assert_eq!(battle_value(55.5), 56);
    }

    #[test]
    fn test_mech_structure_table() {
        let atlas = mech_structure(100).unwrap();
        assert_eq!(atlas.center_torso, 31);
        assert_eq!(atlas.total(), 3 + 31 + 42 + 34 + 42);
        assert!(mech_structure(47).is_none());
        assert!(mech_structure(105).is_none());
    }
}
