//! Build script: validates aliases.json at compile time.

use std::collections::BTreeMap;
use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "aliases.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", config_path.display());

    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. aliases.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    struct AliasFile {
        moves: BTreeMap<String, String>,
        sections: BTreeMap<String, String>,
    }
    let file: AliasFile = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "aliases.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });

    // Move keys are looked up after lowercasing and stripping dots and whitespace,
    // so a key in any other shape could never match.
    for key in file.moves.keys() {
        let normalized: String = key
            .to_lowercase()
            .chars()
            .filter(|c| *c != '.' && !c.is_whitespace())
            .collect();
        if &normalized != key {
            panic!(
                "aliases.json: move key '{}' is not normalized (expected '{}')",
                key, normalized
            );
        }
    }
    for key in file.sections.keys() {
        if key.to_lowercase() != *key {
            panic!("aliases.json: section key '{}' must be lowercase", key);
        }
    }
}
