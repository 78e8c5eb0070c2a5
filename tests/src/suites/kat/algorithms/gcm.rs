//! GCM handlers
//!
//! Decrypt cases whose tag does not verify are expected to carry
//! `"expectedResult": "fail"`.

use blockmode_symmetric::{CipherContext, CipherStatus, CtrlCommand};
use blockmode_algorithms::block::Sm4;

use super::{check, context, hex_field};
use crate::suites::kat::dispatcher::Handlers;
use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};

fn expect_len(status: CipherStatus, len: usize, what: &str) -> Result<()> {
    match status {
        CipherStatus::Length(n) if n == len => Ok(()),
        other => Err(EngineError::Crypto(format!("{} returned {:?}", what, other))),
    }
}

fn feed_aad(ctx: &mut CipherContext<Sm4>, aad: &[u8]) -> Result<()> {
    if aad.is_empty() {
        return Ok(());
    }
    expect_len(ctx.cipher(None, Some(aad), aad.len()), aad.len(), "AAD")
}

fn encrypt(group: &TestGroup, case: &TestCase) -> Result<()> {
    let iv = hex_field(case, "iv")?;
    let mut ctx = context(group, &hex_field(case, "key")?, None)?;
    if iv.len() != ctx.descriptor().iv_len() {
        ctx.ctrl(CtrlCommand::SetIvLen(iv.len()))?;
    }
    ctx.init(None, Some(&iv[..]), super::direction(group)?)?;

    feed_aad(&mut ctx, &hex_field(case, "aad")?)?;
    let pt = hex_field(case, "pt")?;
    let mut ct = vec![0u8; pt.len()];
    expect_len(ctx.update(&mut ct, &pt), pt.len(), "encrypt")?;
    expect_len(ctx.cipher(None, None, 0), 0, "finalize")?;

    let expected_tag = hex_field(case, "tag")?;
    let mut tag = vec![0u8; expected_tag.len()];
    ctx.ctrl(CtrlCommand::GetTag(&mut tag))?;

    check(&hex_field(case, "ct")?, &ct)?;
    check(&expected_tag, &tag)
}

fn decrypt(group: &TestGroup, case: &TestCase) -> Result<()> {
    let iv = hex_field(case, "iv")?;
    let mut ctx = context(group, &hex_field(case, "key")?, None)?;
    if iv.len() != ctx.descriptor().iv_len() {
        ctx.ctrl(CtrlCommand::SetIvLen(iv.len()))?;
    }
    ctx.init(None, Some(&iv[..]), super::direction(group)?)?;
    ctx.ctrl(CtrlCommand::SetTag(&hex_field(case, "tag")?))?;

    feed_aad(&mut ctx, &hex_field(case, "aad")?)?;
    let ct = hex_field(case, "ct")?;
    let mut pt = vec![0u8; ct.len()];
    expect_len(ctx.update(&mut pt, &ct), ct.len(), "decrypt")?;
    expect_len(ctx.cipher(None, None, 0), 0, "tag check")?;

    check(&hex_field(case, "pt")?, &pt)
}

pub fn register(handlers: &mut Handlers) {
    handlers.add("SM4-GCM", "encrypt", "AFT", encrypt);
    handlers.add("SM4-GCM", "decrypt", "AFT", decrypt);
}
