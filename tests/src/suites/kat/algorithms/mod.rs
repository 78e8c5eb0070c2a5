//! Per-algorithm handlers

pub mod gcm;
pub mod sm4;
pub mod stream;
pub mod wrap;

use blockmode_algorithms::block::Sm4;
use blockmode_symmetric::{registry, CipherContext, CipherId, Direction};

use super::error::{EngineError, Result};
use super::model::{TestCase, TestGroup};

pub(crate) fn field(case: &TestCase, name: &str) -> Option<String> {
    case.inputs.get(name).map(|v| v.text())
}

pub(crate) fn hex_field(case: &TestCase, name: &'static str) -> Result<Vec<u8>> {
    let value = field(case, name).ok_or(EngineError::MissingField(name))?;
    Ok(hex::decode(value)?)
}

pub(crate) fn usize_field(case: &TestCase, name: &str) -> Option<usize> {
    case.inputs.get(name).and_then(|v| v.number())
}

pub(crate) fn check(expected: &[u8], actual: &[u8]) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EngineError::Mismatch {
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        })
    }
}

pub(crate) fn direction(group: &TestGroup) -> Result<Direction> {
    match group.direction.as_deref() {
        Some("encrypt") => Ok(Direction::Encrypt),
        Some("decrypt") => Ok(Direction::Decrypt),
        other => Err(EngineError::InvalidData(format!("direction {:?}", other))),
    }
}

/// Suite algorithm name to registry id
pub(crate) fn cipher_id(algorithm: &str) -> Result<CipherId> {
    let id = match algorithm {
        "SM4-CTR" => CipherId::Sm4Ctr,
        "SM4-CFB1" => CipherId::Sm4Cfb1,
        "SM4-CFB8" => CipherId::Sm4Cfb8,
        "SM4-KW" => CipherId::Sm4Wrap,
        "SM4-GCM" => CipherId::Sm4Gcm,
        other => return Err(EngineError::Unsupported(other.to_string())),
    };
    Ok(id)
}

/// Context for the group's algorithm initialised with key and IV
pub(crate) fn context(
    group: &TestGroup,
    key: &[u8],
    iv: Option<&[u8]>,
) -> Result<CipherContext<Sm4>> {
    let mut ctx = CipherContext::new(registry::lookup(cipher_id(&group.algorithm)?));
    ctx.init(Some(key), iv, direction(group)?)?;
    Ok(ctx)
}
