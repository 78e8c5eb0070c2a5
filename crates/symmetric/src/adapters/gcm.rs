//! GCM adapter
//!
//! Drives a [`Gcm128`] through the host contract. The state machine is
//! `uninitialized -> key set -> ready -> (finalize) -> key set`: an IV
//! that arrives before the key is cached and applied once the key is
//! known, and every finalize invalidates the IV so it cannot be reused.
//!
//! A cipher call with input but no output feeds AAD, one with both
//! encrypts or decrypts, and one without input finalizes. Encryption
//! leaves the tag in the context buffer for [`CtrlCommand::GetTag`];
//! decryption compares against the tag from [`CtrlCommand::SetTag`].

use blockmode_algorithms::aead::Gcm128;
use blockmode_algorithms::block::BlockCipher;
use blockmode_common::SecretBuffer;
use blockmode_params::utils::symmetric::{GCM_DEFAULT_IV_SIZE, GCM_MAX_IV_SIZE, GCM_TAG_SIZE};
use zeroize::Zeroize;

use super::{invalid_state, reject, reject_with, FOREIGN_STATE};
use crate::cipher::{
    AdapterState, CipherDescriptor, CipherFlags, CipherId, CipherMode, CipherStatus, CtrlCommand,
};
use crate::context::CipherContext;
use crate::error::{validate, Result, ResultExt};

/// Adapter state for GCM
#[derive(Clone)]
pub struct GcmState<C: BlockCipher> {
    pub(crate) gcm: Option<Gcm128<C>>,
    pub(crate) iv: SecretBuffer<GCM_MAX_IV_SIZE>,
    pub(crate) ivlen: usize,
    pub(crate) iv_set: bool,
    /// Length of the tag held in the context buffer
    pub(crate) taglen: Option<usize>,
    pub(crate) fast_ctr32: bool,
}

impl<C: BlockCipher> GcmState<C> {
    fn new(fast_ctr32: bool) -> Self {
        Self {
            gcm: None,
            iv: SecretBuffer::zeroed(),
            ivlen: GCM_DEFAULT_IV_SIZE,
            iv_set: false,
            taglen: None,
            fast_ctr32,
        }
    }

    /// True once a key has been installed
    pub fn key_set(&self) -> bool {
        self.gcm.is_some()
    }

    /// True while an IV is applied or cached and not yet finalized
    pub fn iv_set(&self) -> bool {
        self.iv_set
    }

    /// IV length expected by the next init
    pub fn iv_len(&self) -> usize {
        self.ivlen
    }

    /// IV bytes as last supplied, `ivlen` long; zeros until one arrives
    pub fn current_iv(&self) -> &[u8] {
        &self.iv.as_ref()[..self.ivlen]
    }

    fn apply_iv(&mut self) -> Result<()> {
        if let Some(gcm) = self.gcm.as_mut() {
            gcm.set_iv(&self.iv.as_ref()[..self.ivlen])?;
        }
        self.iv_set = true;
        self.taglen = None;
        Ok(())
    }
}

fn new_state_ctr32<C: BlockCipher>() -> AdapterState<C> {
    AdapterState::Gcm(GcmState::new(true))
}

fn new_state_generic<C: BlockCipher>() -> AdapterState<C> {
    AdapterState::Gcm(GcmState::new(false))
}

fn state_mut<C: BlockCipher>(state: &mut AdapterState<C>) -> Result<&mut GcmState<C>> {
    match state {
        AdapterState::Gcm(g) => Ok(g),
        _ => Err(invalid_state("GCM adapter", FOREIGN_STATE)),
    }
}

fn init<C: BlockCipher>(ctx: &mut CipherContext<C>, key: Option<&[u8]>, iv: Option<&[u8]>) -> Result<()> {
    if key.is_none() && iv.is_none() {
        return Ok(());
    }
    let g = state_mut(&mut ctx.state)?;

    if let Some(iv) = iv {
        validate::length("GCM IV", iv.len(), g.ivlen)?;
    }

    if let Some(key) = key {
        let schedule = C::set_encrypt_key(key).with_context("key schedule")?;
        let mut gcm = Gcm128::new(schedule);
        gcm.set_fast_ctr32(g.fast_ctr32);
        g.gcm = Some(gcm);
        log::trace!("GCM key set");
    }

    match iv {
        Some(iv) => {
            g.iv.as_mut()[..iv.len()].copy_from_slice(iv);
            g.apply_iv()?;
        }
        // Key alone picks up an IV cached by an earlier IV-only init
        None if g.iv_set => g.apply_iv()?,
        None => {}
    }
    Ok(())
}

fn cleanup<C: BlockCipher>(ctx: &mut CipherContext<C>) {
    if let AdapterState::Gcm(g) = &mut ctx.state {
        g.gcm = None;
        g.iv.zeroize();
        g.iv_set = false;
        g.taglen = None;
    }
}

fn gcm_cipher<C: BlockCipher>(
    ctx: &mut CipherContext<C>,
    out: Option<&mut [u8]>,
    input: Option<&[u8]>,
    len: usize,
) -> CipherStatus {
    let name = ctx.descriptor.name();
    let encrypt = ctx.direction.is_encrypt();
    let CipherContext { state, buf, .. } = ctx;
    let g = match state {
        AdapterState::Gcm(g) => g,
        _ => return reject(name, FOREIGN_STATE),
    };
    if !g.iv_set {
        return reject(name, "IV not set");
    }
    let gcm = match g.gcm.as_mut() {
        Some(gcm) => gcm,
        None => return reject(name, "key not set"),
    };

    let input = match input {
        Some(i) => i,
        None if encrypt => {
            return match gcm.finish() {
                Ok(mut tag) => {
                    buf.as_mut().copy_from_slice(&tag);
                    tag.zeroize();
                    g.taglen = Some(GCM_TAG_SIZE);
                    g.iv_set = false;
                    CipherStatus::Length(0)
                }
                Err(e) => reject_with(name, e),
            };
        }
        None => {
            let taglen = match g.taglen {
                Some(t) => t,
                None => return reject(name, "expected tag not set"),
            };
            let result = gcm.verify(&buf.as_ref()[..taglen]);
            g.iv_set = false;
            g.taglen = None;
            return match result {
                Ok(()) => CipherStatus::Length(0),
                Err(e) => reject_with(name, e),
            };
        }
    };

    if input.len() < len {
        return reject(name, "input shorter than requested length");
    }
    let input = &input[..len];

    let result = match out {
        None => gcm.aad(input),
        Some(out) if out.len() < len => {
            return reject(name, "output shorter than requested length")
        }
        Some(out) if encrypt => gcm.encrypt(input, &mut out[..len]),
        Some(out) => gcm.decrypt(input, &mut out[..len]),
    };
    match result {
        Ok(()) => CipherStatus::Length(len),
        Err(e) => reject_with(name, e),
    }
}

fn ctrl<C: BlockCipher>(ctx: &mut CipherContext<C>, command: CtrlCommand<'_>) -> Result<()> {
    let encrypt = ctx.direction.is_encrypt();
    let CipherContext { state, buf, .. } = ctx;
    let g = state_mut(state)?;

    match command {
        CtrlCommand::SetIvLen(n) => {
            validate::parameter(!g.iv_set, "GCM IV length", "IV already set")?;
            validate::parameter(
                n > 0 && n <= GCM_MAX_IV_SIZE,
                "GCM IV length",
                "must be 1 to 128 bytes",
            )?;
            g.ivlen = n;
        }
        CtrlCommand::SetTag(tag) => {
            validate::parameter(!encrypt, "GCM tag", "expected tag is only set for decryption")?;
            validate::parameter(
                !tag.is_empty() && tag.len() <= GCM_TAG_SIZE,
                "GCM tag",
                "must be 1 to 16 bytes",
            )?;
            buf.as_mut()[..tag.len()].copy_from_slice(tag);
            g.taglen = Some(tag.len());
        }
        CtrlCommand::GetTag(out) => {
            validate::parameter(encrypt, "GCM tag", "tag is only produced by encryption")?;
            let taglen = match g.taglen {
                Some(t) => t,
                None => return Err(invalid_state("GCM tag", "message not finalized")),
            };
            validate::parameter(
                !out.is_empty() && out.len() <= taglen,
                "GCM tag",
                "requested length exceeds tag",
            )?;
            out.copy_from_slice(&buf.as_ref()[..out.len()]);
        }
    }
    Ok(())
}

fn descriptor<C: BlockCipher>(new_state: fn() -> AdapterState<C>) -> CipherDescriptor<C> {
    CipherDescriptor::builder(CipherId::Sm4Gcm, CipherMode::Gcm, init::<C>, gcm_cipher::<C>, new_state)
        .block_size(16)
        .iv_len(GCM_DEFAULT_IV_SIZE)
        .flags(
            CipherFlags::CUSTOM_IV
                | CipherFlags::CUSTOM_CIPHER
                | CipherFlags::ALWAYS_CALL_INIT
                | CipherFlags::AEAD,
        )
        .cleanup(cleanup::<C>)
        .ctrl(ctrl::<C>)
        .build()
}

/// GCM descriptor using the block-granular counter path
pub fn gcm_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    descriptor(new_state_ctr32::<C>)
}

/// GCM descriptor using the byte-at-a-time counter path
pub fn gcm_generic_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    descriptor(new_state_generic::<C>)
}
