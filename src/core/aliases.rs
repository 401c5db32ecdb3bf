//! Move shorthand and section synonyms.
//!
//! Both tables are loaded from `config/aliases.json` (embedded at compile time,
//! validated by `build.rs`).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AliasFile {
    moves: HashMap<String, String>,
    sections: HashMap<String, String>,
}

fn load_aliases() -> AliasFile {
    let json = include_str!("../../config/aliases.json");
    serde_json::from_str(json).expect("aliases.json must be valid")
}

static ALIASES: OnceLock<AliasFile> = OnceLock::new();

fn aliases() -> &'static AliasFile {
    ALIASES.get_or_init(load_aliases)
}

/// Lookup key for a move token: lowercase, no dots, no whitespace.
fn move_key(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect()
}

/// Map loose move shorthand (`cl`, `C.L`, `2 h`, `236236H`) to its canonical name.
/// Unknown input is returned exactly as given so the lookup downstream can report it.
pub fn normalize_move(raw: &str) -> String {
    match aliases().moves.get(&move_key(raw)) {
        Some(canonical) => canonical.clone(),
        None => raw.to_string(),
    }
}

/// Map a section token (`dash_normals`, `air`) to the wiki section title.
/// Unknown tokens pass through unchanged.
pub fn normalize_section(raw: &str) -> String {
    match aliases().sections.get(&raw.to_lowercase()) {
        Some(title) => title.clone(),
        None => raw.to_string(),
    }
}

/// Distinct section titles, sorted, for help output.
pub fn section_titles() -> Vec<&'static str> {
    let mut titles: Vec<&'static str> = aliases().sections.values().map(String::as_str).collect();
    titles.sort_unstable();
    titles.dedup();
    titles
}
