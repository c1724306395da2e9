//! Export unit files to the JSON interchange format.

use std::fs;
use std::path::{Path, PathBuf};

use mek_core::registry::HandlerRegistry;

use crate::error::{Result, ToolError};
use crate::validate::load_document;

/// JSON interchange text for the unit in a RON file.
///
/// Units that fail validation are still exported; their problems are logged.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, does not describe a unit,
/// or cannot be encoded.
pub fn export_unit(registry: &HandlerRegistry, input: &Path, pretty: bool) -> Result<String> {
    let path_str = input.display().to_string();
    let doc = load_document(input)?;
    let processed = registry.process(&doc);
    let Some(unit) = processed.unit else {
        return Err(ToolError::Unparseable {
            path: path_str,
            errors: processed.parse_errors,
        });
    };
    for error in &processed.report.errors {
        tracing::warn!(unit = %unit.base.id, "Exporting invalid unit: {error}");
    }

    registry
        .serialize(&unit)?
        .to_json(pretty)
        .map_err(|e| ToolError::Json {
            path: path_str,
            source: e,
        })
}

/// Default output path: the input with a `.json` extension.
#[must_use]
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Export a unit file and write the JSON next to it, or to `output`.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an error if exporting fails or the output cannot be written.
pub fn export_to_file(
    registry: &HandlerRegistry,
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
) -> Result<PathBuf> {
    let json = export_unit(registry, input, pretty)?;
    let target = output.map_or_else(|| default_output(input), Path::to_path_buf);
    fs::write(&target, json).map_err(|e| ToolError::Io {
        path: target.display().to_string(),
        source: e,
    })?;
    tracing::info!("Exported {} to {}", input.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mek_core::serialization::SerializedUnit;
    use mek_core::unit::UnitType;
    use mek_test_utils::fixtures::fixture_ron;
    use tempfile::TempDir;

    #[test]
    fn test_export_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("atlas.ron");
        fs::write(&input, fixture_ron(UnitType::BattleMech)).unwrap();

        let written = export_to_file(&HandlerRegistry::standard(), &input, None, true).unwrap();
        assert_eq!(written, dir.path().join("atlas.json"));

        let json = fs::read_to_string(&written).unwrap();
        assert!(json.contains('\n'));
        let serialized = SerializedUnit::from_json(&json).unwrap();
        assert_eq!(serialized.id, "atlas-as7-d");
        assert_eq!(serialized.unit_type, "BattleMech");
    }

    #[test]
    fn test_explicit_output_and_compact() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("union.ron");
        let output = dir.path().join("out.json");
        fs::write(&input, fixture_ron(UnitType::DropShip)).unwrap();

        export_to_file(&HandlerRegistry::standard(), &input, Some(&output), false).unwrap();
        let json = fs::read_to_string(&output).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_unknown_kind_is_unparseable() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bunker.ron");
        fs::write(&input, r#"(unit_type: "Gun Emplacement", name: "Bunker")"#).unwrap();

        let result = export_unit(&HandlerRegistry::standard(), &input, false);
        assert!(matches!(result, Err(ToolError::Unparseable { .. })));
    }
}
