//! SM4 single-block handlers

use blockmode_algorithms::block::{Block, BlockCipher, Sm4};

use super::{check, hex_field};
use crate::suites::kat::dispatcher::Handlers;
use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};

fn block(bytes: &[u8]) -> Result<Block> {
    Block::try_from(bytes).map_err(|_| EngineError::InvalidData(format!("block of {} bytes", bytes.len())))
}

fn sm4_encrypt(_group: &TestGroup, case: &TestCase) -> Result<()> {
    let cipher = Sm4::set_encrypt_key(&hex_field(case, "key")?)?;
    let mut b = block(&hex_field(case, "pt")?)?;
    cipher.encrypt_block(&mut b);
    check(&hex_field(case, "ct")?, &b)
}

fn sm4_decrypt(_group: &TestGroup, case: &TestCase) -> Result<()> {
    let cipher = Sm4::set_decrypt_key(&hex_field(case, "key")?)?;
    let mut b = block(&hex_field(case, "ct")?)?;
    cipher.encrypt_block(&mut b);
    check(&hex_field(case, "pt")?, &b)
}

pub fn register(handlers: &mut Handlers) {
    handlers.add("SM4", "encrypt", "AFT", sm4_encrypt);
    handlers.add("SM4", "decrypt", "AFT", sm4_decrypt);
}
