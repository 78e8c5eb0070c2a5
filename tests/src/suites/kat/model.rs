//! Shape of a known-answer suite file
//!
//! A suite holds groups; a group fixes algorithm, direction and any
//! shared fields (usually the key) for its cases. Hex values stay as
//! strings until a handler decodes them.

use serde::Deserialize;
use std::collections::HashMap;

/// Scalar field value: hex strings, or numbers such as `split`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    Number(u64),
}

impl Field {
    pub fn text(&self) -> String {
        match self {
            Field::Text(s) => s.clone(),
            Field::Number(n) => n.to_string(),
        }
    }

    pub fn number(&self) -> Option<usize> {
        match self {
            Field::Number(n) => usize::try_from(*n).ok(),
            Field::Text(s) => s.parse().ok(),
        }
    }
}

pub type Fields = HashMap<String, Field>;

/// Whether a case should be accepted or rejected by the cipher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    #[default]
    Valid,
    Fail,
}

#[derive(Debug, Deserialize)]
pub struct TestCase {
    #[serde(rename = "tcId")]
    pub id: u64,
    #[serde(rename = "expectedResult", default)]
    pub expected: Expectation,
    #[serde(flatten)]
    pub inputs: Fields,
}

#[derive(Debug, Deserialize)]
pub struct TestGroup {
    #[serde(rename = "tgId")]
    pub id: u64,
    #[serde(rename = "testType")]
    pub test_type: String,
    /// Empty means "inherit from the suite"
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub direction: Option<String>,
    pub tests: Vec<TestCase>,
    /// Copied into every case by the loader
    #[serde(flatten)]
    pub defaults: Fields,
}

#[derive(Debug, Deserialize)]
pub struct TestSuite {
    #[serde(rename = "vsId")]
    pub id: u64,
    pub algorithm: String,
    #[serde(rename = "testGroups")]
    pub groups: Vec<TestGroup>,
    /// Directory the suite was loaded from
    #[serde(skip)]
    pub name: String,
}
