//! Testing utilities for registry client tests.

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory
///   (e.g., "auth/login_success.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    serde_json::from_str(&load_fixture_text(fixture_path)).expect("Invalid JSON in fixture")
}

/// Load a fixture file as raw text (used for XML notice fixtures).
///
/// # Panics
/// If the fixture file cannot be read.
pub fn load_fixture_text(fixture_path: &str) -> String {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}
