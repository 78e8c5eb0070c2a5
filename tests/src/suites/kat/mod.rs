//! JSON known-answer suites driven through the cipher registry
//!
//! `use blockmode_tests::suites::kat::*;` pulls in the loader, runner and
//! engine.

pub mod algorithms;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;

pub use engine::*;
pub use error::*;
pub use loader::*;
pub use model::*;
pub use runner::*;
