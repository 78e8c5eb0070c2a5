//! Handler table keyed by algorithm, direction and test type

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::error::Result;
use super::model::{TestCase, TestGroup};

/// Identifies the handler for a group
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
pub struct DispatchKey {
    pub algo: String,
    pub dir: String,
    pub kind: String,
}

impl DispatchKey {
    pub fn new(algo: &str, dir: &str, kind: &str) -> Self {
        Self {
            algo: algo.into(),
            dir: dir.into(),
            kind: kind.into(),
        }
    }

    /// Key a group resolves to; a missing direction matches `""`
    pub fn for_group(group: &TestGroup) -> Self {
        Self::new(
            &group.algorithm,
            group.direction.as_deref().unwrap_or(""),
            &group.test_type,
        )
    }
}

pub type HandlerFn = fn(&TestGroup, &TestCase) -> Result<()>;

/// Handlers registered by each algorithm module
#[derive(Default)]
pub struct Handlers(HashMap<DispatchKey, HandlerFn>);

impl Handlers {
    pub fn add(&mut self, algo: &str, dir: &str, kind: &str, handler: HandlerFn) {
        self.0.insert(DispatchKey::new(algo, dir, kind), handler);
    }

    pub fn get(&self, key: &DispatchKey) -> Option<HandlerFn> {
        self.0.get(key).copied()
    }
}

pub static REGISTRY: Lazy<Handlers> = Lazy::new(|| {
    let mut handlers = Handlers::default();
    super::algorithms::sm4::register(&mut handlers);
    super::algorithms::stream::register(&mut handlers);
    super::algorithms::wrap::register(&mut handlers);
    super::algorithms::gcm::register(&mut handlers);
    handlers
});
