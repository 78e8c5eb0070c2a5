//! CTR, CFB-1 and CFB-8 adapters
//!
//! All three keep a forward key schedule in the adapter state and use the
//! context's IV as the running counter or feedback register. The schedule
//! is always built for encryption: decrypting a stream mode still runs the
//! forward transform.

use blockmode_algorithms::block::modes::{cfb, ctr};
use blockmode_algorithms::block::BlockCipher;
use blockmode_params::utils::symmetric::STREAM_IV_SIZE;

use super::{invalid_state, reject, reject_with, FOREIGN_STATE};
use crate::cipher::{AdapterState, CipherDescriptor, CipherFlags, CipherId, CipherMode, CipherStatus};
use crate::context::CipherContext;
use crate::error::{Result, ResultExt};

/// Adapter state for the stream modes
#[derive(Clone)]
pub struct StreamState<C: BlockCipher> {
    pub(crate) schedule: Option<C>,
}

impl<C: BlockCipher> StreamState<C> {
    /// True once a key has been installed
    pub fn key_set(&self) -> bool {
        self.schedule.is_some()
    }
}

fn new_state<C: BlockCipher>() -> AdapterState<C> {
    AdapterState::Stream(StreamState { schedule: None })
}

fn init<C: BlockCipher>(ctx: &mut CipherContext<C>, key: Option<&[u8]>, _iv: Option<&[u8]>) -> Result<()> {
    let key = match key {
        Some(k) => k,
        None => return Ok(()),
    };
    let schedule = C::set_encrypt_key(key).with_context("key schedule")?;
    match &mut ctx.state {
        AdapterState::Stream(s) => {
            s.schedule = Some(schedule);
            Ok(())
        }
        _ => Err(invalid_state("stream adapter", FOREIGN_STATE)),
    }
}

fn cleanup<C: BlockCipher>(ctx: &mut CipherContext<C>) {
    if let AdapterState::Stream(s) = &mut ctx.state {
        s.schedule = None;
    }
}

/// Split the optional buffers of a stream call
///
/// `Ok(None)` means there is no input and nothing to do.
fn buffers<'a>(
    name: &str,
    out: Option<&'a mut [u8]>,
    input: Option<&'a [u8]>,
    bytes: usize,
) -> core::result::Result<Option<(&'a mut [u8], &'a [u8])>, CipherStatus> {
    match (out, input) {
        (_, None) => Ok(None),
        (None, Some(_)) => Err(reject(name, "output buffer required")),
        (Some(out), Some(input)) => {
            if input.len() < bytes || out.len() < bytes {
                return Err(reject(name, "buffer shorter than requested length"));
            }
            Ok(Some((&mut out[..bytes], &input[..bytes])))
        }
    }
}

fn ctr_cipher<C: BlockCipher>(
    ctx: &mut CipherContext<C>,
    out: Option<&mut [u8]>,
    input: Option<&[u8]>,
    len: usize,
) -> CipherStatus {
    let name = ctx.descriptor.name();
    let (out, input) = match buffers(name, out, input, len) {
        Ok(Some(io)) => io,
        Ok(None) => return CipherStatus::Success,
        Err(status) => return status,
    };

    let CipherContext {
        state, iv, buf, num, ..
    } = ctx;
    let schedule = match state {
        AdapterState::Stream(StreamState {
            schedule: Some(s),
        }) => s,
        _ => return reject(name, "key not set"),
    };

    match ctr::ctr32_stream(schedule, iv, &mut **buf, num, input, out) {
        Ok(()) => CipherStatus::Success,
        Err(e) => reject_with(name, e),
    }
}

fn cfb8_cipher<C: BlockCipher>(
    ctx: &mut CipherContext<C>,
    out: Option<&mut [u8]>,
    input: Option<&[u8]>,
    len: usize,
) -> CipherStatus {
    let name = ctx.descriptor.name();
    let (out, input) = match buffers(name, out, input, len) {
        Ok(Some(io)) => io,
        Ok(None) => return CipherStatus::Success,
        Err(status) => return status,
    };

    let direction = ctx.direction;
    let CipherContext { state, iv, .. } = ctx;
    let schedule = match state {
        AdapterState::Stream(StreamState {
            schedule: Some(s),
        }) => s,
        _ => return reject(name, "key not set"),
    };

    match cfb::cfb8_encrypt(schedule, iv, input, out, direction) {
        Ok(()) => CipherStatus::Success,
        Err(e) => reject_with(name, e),
    }
}

fn cfb1_cipher<C: BlockCipher>(
    ctx: &mut CipherContext<C>,
    out: Option<&mut [u8]>,
    input: Option<&[u8]>,
    len: usize,
) -> CipherStatus {
    let name = ctx.descriptor.name();
    let in_bits = ctx.length_in_bits;
    let bytes = if in_bits {
        len / 8 + usize::from(len % 8 != 0)
    } else {
        len
    };
    let (out, input) = match buffers(name, out, input, bytes) {
        Ok(Some(io)) => io,
        Ok(None) => return CipherStatus::Success,
        Err(status) => return status,
    };

    let direction = ctx.direction;
    let CipherContext { state, iv, .. } = ctx;
    let schedule = match state {
        AdapterState::Stream(StreamState {
            schedule: Some(s),
        }) => s,
        _ => return reject(name, "key not set"),
    };

    let result = if in_bits {
        cfb::cfb1_encrypt_bits(schedule, iv, input, out, len, direction)
    } else {
        cfb::cfb1_encrypt(schedule, iv, input, out, direction)
    };
    match result {
        Ok(()) => CipherStatus::Success,
        Err(e) => reject_with(name, e),
    }
}

/// CTR descriptor: 16-byte block, key of the primitive, 16-byte counter
pub fn ctr_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    CipherDescriptor::builder(CipherId::Sm4Ctr, CipherMode::Ctr, init::<C>, ctr_cipher::<C>, new_state::<C>)
        .block_size(16)
        .iv_len(STREAM_IV_SIZE)
        .cleanup(cleanup::<C>)
        .build()
}

/// CFB-1 descriptor; lengths may be given in bits
pub fn cfb1_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    CipherDescriptor::builder(CipherId::Sm4Cfb1, CipherMode::Cfb, init::<C>, cfb1_cipher::<C>, new_state::<C>)
        .block_size(16)
        .iv_len(STREAM_IV_SIZE)
        .flags(CipherFlags::LENGTH_BITS)
        .cleanup(cleanup::<C>)
        .build()
}

/// CFB-8 descriptor
pub fn cfb8_descriptor<C: BlockCipher>() -> CipherDescriptor<C> {
    CipherDescriptor::builder(CipherId::Sm4Cfb8, CipherMode::Cfb, init::<C>, cfb8_cipher::<C>, new_state::<C>)
        .block_size(16)
        .iv_len(STREAM_IV_SIZE)
        .cleanup(cleanup::<C>)
        .build()
}
