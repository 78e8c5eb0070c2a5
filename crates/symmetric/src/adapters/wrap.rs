//! Key-wrap adapter
//!
//! The context keeps no counter for key wrap: the adapter state holds the
//! direction-specific schedule and the optional custom IV. A cipher call
//! processes the whole input at once, with no output it only reports the
//! output length.

use blockmode_algorithms::block::modes::wrap::{self, WrapIv};
use blockmode_algorithms::block::BlockCipher;
use blockmode_api::Direction;
use blockmode_params::utils::symmetric::{
    UNWRAP_MIN_INPUT, WRAP_BLOCK_SIZE, WRAP_IV_SIZE, WRAP_MAX, WRAP_MIN_INPUT,
};
use zeroize::Zeroize;

use super::{invalid_state, reject, reject_with, FOREIGN_STATE};
use crate::cipher::{AdapterState, CipherDescriptor, CipherFlags, CipherId, CipherMode, CipherStatus};
use crate::context::CipherContext;
use crate::error::{validate, Result, ResultExt};

/// Adapter state for key wrap
#[derive(Clone)]
pub struct WrapState<C: BlockCipher> {
    pub(crate) schedule: Option<C>,
    pub(crate) iv: Option<WrapIv>,
}

impl<C: BlockCipher> WrapState<C> {
    /// True once a key has been installed
    pub fn key_set(&self) -> bool {
        self.schedule.is_some()
    }

    /// Custom IV, if one replaced the default check value
    pub fn custom_iv(&self) -> Option<&WrapIv> {
        self.iv.as_ref()
    }
}

fn new_state<C: BlockCipher>() -> AdapterState<C> {
    AdapterState::Wrap(WrapState {
        schedule: None,
        iv: None,
    })
}

fn init<C: BlockCipher>(ctx: &mut CipherContext<C>, key: Option<&[u8]>, iv: Option<&[u8]>) -> Result<()> {
    if key.is_none() && iv.is_none() {
        return Ok(());
    }
    if let Some(iv) = iv {
        validate::length("key wrap IV", iv.len(), WRAP_IV_SIZE)?;
    }

    let schedule = match key {
        Some(key) => {
            let built = match ctx.direction {
                Direction::Encrypt => C::set_encrypt_key(key),
                Direction::Decrypt => C::set_decrypt_key(key),
            };
            Some(built.with_context("key schedule")?)
        }
        None => None,
    };

    let CipherContext {
        state, iv: ctx_iv, ..
    } = ctx;
    let state = match state {
        AdapterState::Wrap(w) => w,
        _ => return Err(invalid_state("key wrap adapter", FOREIGN_STATE)),
    };

    if let Some(schedule) = schedule {
        state.schedule = Some(schedule);
        if iv.is_none() {
            state.iv = None;
            ctx_iv[..WRAP_IV_SIZE].zeroize();
        }
    }
    if let Some(iv) = iv {
        let mut custom: WrapIv = [0u8; WRAP_IV_SIZE];
        custom.copy_from_slice(iv);
        state.iv = Some(custom);
        ctx_iv[..WRAP_IV_SIZE].copy_from_slice(iv);
    }
    Ok(())
}

/// Whole semiblocks, at least the wrap or unwrap minimum, at most `WRAP_MAX`
fn check_length(len: usize, encrypt: bool) -> Result<()> {
    let (context, min) = if encrypt {
        ("key wrap input", WRAP_MIN_INPUT)
    } else {
        ("key unwrap input", UNWRAP_MIN_INPUT)
    };
    validate::multiple_of(context, len, WRAP_BLOCK_SIZE)?;
    validate::min_length(context, len, min)?;
    validate::max_length(context, len, WRAP_MAX)
}

fn wrap_cipher<C: BlockCipher>(
    ctx: &mut CipherContext<C>,
    out: Option<&mut [u8]>,
    input: Option<&[u8]>,
    len: usize,
) -> CipherStatus {
    let name = ctx.descriptor.name();
    let input = match input {
        Some(i) => i,
        None => return CipherStatus::Length(0),
    };
    if input.len() < len {
        return reject(name, "input shorter than requested length");
    }
    let encrypt = ctx.direction.is_encrypt();
    if let Err(e) = check_length(len, encrypt) {
        return reject_with(name, e);
    }

    let out = match out {
        Some(o) => o,
        None if encrypt => return CipherStatus::Length(len + WRAP_BLOCK_SIZE),
        None => return CipherStatus::Length(len - WRAP_BLOCK_SIZE),
    };

    let state = match &ctx.state {
        AdapterState::Wrap(w) => w,
        _ => return reject(name, FOREIGN_STATE),
    };
    let schedule = match &state.schedule {
        Some(s) => s,
        None => return reject(name, "key not set"),
    };

    let result = if encrypt {
        wrap::wrap(schedule, state.iv.as_ref(), &input[..len], out)
    } else {
        wrap::unwrap(schedule, state.iv.as_ref(), &input[..len], out)
    };
    match result {
        Ok(n) => CipherStatus::Length(n),
        Err(e) => reject_with(name, e),
    }
}

/// Key-wrap descriptor: 8-byte semiblocks, optional 8-byte custom IV
pub fn wrap_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    CipherDescriptor::builder(CipherId::Sm4Wrap, CipherMode::Wrap, init::<C>, wrap_cipher::<C>, new_state::<C>)
        .block_size(WRAP_BLOCK_SIZE)
        .iv_len(WRAP_IV_SIZE)
        .flags(
            CipherFlags::WRAP_MODE
                | CipherFlags::CUSTOM_IV
                | CipherFlags::CUSTOM_CIPHER
                | CipherFlags::ALWAYS_CALL_INIT,
        )
        .build()
}
