//! Engine that routes each case to its registered handler

use crate::suites::kat::dispatcher::{DispatchKey, REGISTRY};
use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};
use crate::suites::kat::runner::KatEngine;

/// The blockmode engine; one instance serves every suite
pub struct BlockmodeEngine;

impl KatEngine for BlockmodeEngine {
    fn run(&self, group: &TestGroup, case: &TestCase) -> Result<()> {
        let key = DispatchKey::for_group(group);
        let handler = REGISTRY
            .get(&key)
            .ok_or_else(|| EngineError::Unsupported(format!("{:?}", key)))?;
        handler(group, case)
    }
}
