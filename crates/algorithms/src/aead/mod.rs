//! Authenticated encryption

pub mod gcm;

pub use gcm::Gcm128;
