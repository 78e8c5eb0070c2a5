//! CTR, CFB-1 and CFB-8 handlers
//!
//! Cases may carry `split`, the size of the first call; the remainder goes
//! in a second call so partial-block state is exercised. CFB-1 cases may
//! carry `payloadLen` in bits.

use blockmode_symmetric::CipherStatus;

use super::{check, context, hex_field, usize_field};
use crate::suites::kat::dispatcher::Handlers;
use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};

fn expect_success(status: CipherStatus) -> Result<()> {
    match status {
        CipherStatus::Success => Ok(()),
        other => Err(EngineError::Crypto(format!("cipher call returned {:?}", other))),
    }
}

fn process(group: &TestGroup, case: &TestCase, input: &'static str, output: &'static str) -> Result<()> {
    let key = hex_field(case, "key")?;
    let iv = hex_field(case, "iv")?;
    let data = hex_field(case, input)?;
    let expected = hex_field(case, output)?;

    let mut ctx = context(group, &key, Some(&iv[..]))?;
    let mut out = vec![0u8; data.len()];

    if let Some(bits) = usize_field(case, "payloadLen") {
        ctx.set_length_in_bits(true);
        expect_success(ctx.cipher(Some(&mut out[..]), Some(&data[..]), bits))?;
    } else {
        let split = usize_field(case, "split").unwrap_or(data.len()).min(data.len());
        expect_success(ctx.cipher(Some(&mut out[..]), Some(&data[..]), split))?;
        expect_success(ctx.cipher(Some(&mut out[split..]), Some(&data[split..]), data.len() - split))?;
    }
    check(&expected, &out)
}

fn encrypt(group: &TestGroup, case: &TestCase) -> Result<()> {
    process(group, case, "pt", "ct")
}

fn decrypt(group: &TestGroup, case: &TestCase) -> Result<()> {
    process(group, case, "ct", "pt")
}

pub fn register(handlers: &mut Handlers) {
    for algo in ["SM4-CTR", "SM4-CFB1", "SM4-CFB8"] {
        handlers.add(algo, "encrypt", "AFT", encrypt);
        handlers.add(algo, "decrypt", "AFT", decrypt);
    }
}
