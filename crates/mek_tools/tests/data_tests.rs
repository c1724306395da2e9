//! Checks on the unit files shipped with the tools crate.

use std::path::Path;

use mek_core::registry::HandlerRegistry;
use mek_tools::export::export_to_file;
use mek_tools::validate::validate_path;

fn data_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/units"))
}

#[test]
fn test_shipped_units_pass_strict_validation() {
    let summary = validate_path(&HandlerRegistry::standard(), data_dir()).unwrap();
    assert!(summary.total() >= 8);
    for failure in summary.failures(true) {
        panic!("{} failed: {:?}", failure.path.display(), failure.problems(true));
    }
}

#[test]
fn test_shipped_units_export() {
    let out = tempfile::tempdir().unwrap();
    let registry = HandlerRegistry::standard();
    for name in ["atlas", "locust", "manticore", "union"] {
        let input = data_dir().join(format!("{name}.ron"));
        let output = out.path().join(format!("{name}.json"));
        let written = export_to_file(&registry, &input, Some(&output), true).unwrap();
        assert!(written.exists());
    }
}
