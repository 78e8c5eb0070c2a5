//! Loads known-answer suites from JSON files

use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{Fields, TestSuite};
use std::fs;
use std::path::{Path, PathBuf};

fn kat_json_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("vectors")
        .join("kat_json")
}

/// Map alternative field spellings onto the canonical keys (`iv`, `pt`, `ct`)
fn canonicalise_inputs(inputs: &mut Fields) {
    for (alias, canonical) in [
        ("ctr", "iv"),
        ("nonce", "iv"),
        ("plaintext", "pt"),
        ("ciphertext", "ct"),
    ] {
        if !inputs.contains_key(canonical) {
            if let Some(v) = inputs.get(alias).cloned() {
                inputs.insert(canonical.into(), v);
            }
        }
    }
}

/// Load `src/vectors/kat_json/<suite_name>/prompt.json`
pub fn load_suite_by_name(suite_name: &str) -> Result<TestSuite> {
    let prompt = kat_json_dir().join(suite_name).join("prompt.json");
    let json = fs::read_to_string(&prompt)
        .map_err(|e| EngineError::InvalidData(format!("{}: {}", prompt.display(), e)))?;
    let mut suite: TestSuite = serde_json::from_str(&json)?;
    suite.name = suite_name.to_string();

    for group in &mut suite.groups {
        if group.algorithm.is_empty() {
            group.algorithm = suite.algorithm.clone();
        }
        canonicalise_inputs(&mut group.defaults);
        for tc in &mut group.tests {
            for (k, v) in &group.defaults {
                tc.inputs.entry(k.clone()).or_insert_with(|| v.clone());
            }
            canonicalise_inputs(&mut tc.inputs);
        }
    }

    log::debug!(
        "loaded {} ({} groups)",
        suite.name,
        suite.groups.len()
    );
    Ok(suite)
}

/// Every suite directory under `kat_json`, sorted by name
pub fn suite_names() -> Result<Vec<String>> {
    let dir = kat_json_dir();
    let entries = fs::read_dir(&dir)
        .map_err(|e| EngineError::InvalidData(format!("{}: {}", dir.display(), e)))?;
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().join("prompt.json").is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    Ok(names)
}
