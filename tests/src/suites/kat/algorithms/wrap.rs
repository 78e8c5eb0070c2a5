//! Key-wrap handlers

use blockmode_symmetric::CipherStatus;

use super::{check, context, field, hex_field};
use crate::suites::kat::dispatcher::Handlers;
use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};

fn process(group: &TestGroup, case: &TestCase, input: &'static str, output: &'static str) -> Result<()> {
    let key = hex_field(case, "key")?;
    let iv = match field(case, "iv") {
        Some(h) => Some(hex::decode(h)?),
        None => None,
    };
    let data = hex_field(case, input)?;

    let mut ctx = context(group, &key, iv.as_deref())?;
    let out_len = match ctx.cipher(None, Some(&data[..]), data.len()) {
        CipherStatus::Length(n) => n,
        other => return Err(EngineError::Crypto(format!("length query returned {:?}", other))),
    };
    let mut out = vec![0u8; out_len];
    match ctx.update(&mut out, &data) {
        CipherStatus::Length(n) if n == out_len => {}
        other => return Err(EngineError::Crypto(format!("key wrap returned {:?}", other))),
    }
    check(&hex_field(case, output)?, &out)
}

fn wrap(group: &TestGroup, case: &TestCase) -> Result<()> {
    process(group, case, "pt", "ct")
}

fn unwrap(group: &TestGroup, case: &TestCase) -> Result<()> {
    process(group, case, "ct", "pt")
}

pub fn register(handlers: &mut Handlers) {
    handlers.add("SM4-KW", "encrypt", "AFT", wrap);
    handlers.add("SM4-KW", "decrypt", "AFT", unwrap);
}
