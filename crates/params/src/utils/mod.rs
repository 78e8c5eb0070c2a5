//! Algorithm constants grouped by family

pub mod symmetric;
