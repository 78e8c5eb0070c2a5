//! AES-style key wrap (RFC 3394) over a 128-bit block cipher
//!
//! Wrapping runs six passes over the `n` 64-bit semiblocks of the key data,
//! encrypting `A || R[i]` and folding the step counter `t` into `A`. The
//! result is `n + 1` semiblocks. Unwrapping runs the passes backwards and
//! accepts the output only when the recovered `A` equals the integrity
//! check value (the caller's IV, or `A6A6A6A6A6A6A6A6`).
//!
//! Only the forward block call is used. For unwrap the schedule must have
//! been built with [`BlockCipher::set_decrypt_key`].

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use blockmode_api::Direction;
use blockmode_internal::constant_time::ct_eq;
use blockmode_internal::zeroing::secure_zero;
use blockmode_params::utils::symmetric::{
    UNWRAP_MIN_INPUT, WRAP_BLOCK_SIZE, WRAP_DEFAULT_IV, WRAP_IV_SIZE, WRAP_MAX, WRAP_MIN_INPUT,
};

use super::super::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Error, Result};

/// An 8-byte integrity check value
pub type WrapIv = [u8; WRAP_IV_SIZE];

#[inline(always)]
fn xor_step_counter(a: &mut [u8], t: u64) {
    let mut tb = [0u8; 8];
    BigEndian::write_u64(&mut tb, t);
    for (x, y) in a.iter_mut().zip(tb.iter()) {
        *x ^= *y;
    }
}

fn check_input(context: &'static str, len: usize, min: usize) -> Result<()> {
    if len % WRAP_BLOCK_SIZE != 0 {
        return Err(Error::param(context, "length must be a multiple of 8"));
    }
    validate::min_length(context, len, min)?;
    validate::max_length(context, len, WRAP_MAX)
}

/// Output length of wrapping `input_len` bytes
pub fn wrapped_len(input_len: usize) -> Result<usize> {
    check_input("key wrap input", input_len, WRAP_MIN_INPUT)?;
    Ok(input_len + WRAP_BLOCK_SIZE)
}

/// Output length of unwrapping `input_len` bytes
pub fn unwrapped_len(input_len: usize) -> Result<usize> {
    check_input("key unwrap input", input_len, UNWRAP_MIN_INPUT)?;
    Ok(input_len - WRAP_BLOCK_SIZE)
}

/// Wrap `input` into `output`, returning the number of bytes written
pub fn wrap<B: BlockCipher>(
    cipher: &B,
    iv: Option<&WrapIv>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    let out_len = wrapped_len(input.len())?;
    validate::min_length("key wrap output", output.len(), out_len)?;

    let n = input.len() / WRAP_BLOCK_SIZE;
    let iv = iv.unwrap_or(&WRAP_DEFAULT_IV);

    output[WRAP_BLOCK_SIZE..out_len].copy_from_slice(input);
    let mut b: Block = [0u8; BLOCK_SIZE];
    b[..8].copy_from_slice(iv);

    let mut t: u64 = 1;
    for _ in 0..6 {
        for i in 0..n {
            let r = WRAP_BLOCK_SIZE * (i + 1);
            b[8..].copy_from_slice(&output[r..r + 8]);
            cipher.encrypt_block(&mut b);
            xor_step_counter(&mut b[..8], t);
            output[r..r + 8].copy_from_slice(&b[8..]);
            t += 1;
        }
    }

    output[..8].copy_from_slice(&b[..8]);
    b.zeroize();
    Ok(out_len)
}

/// Unwrap `input` into `output`, returning the number of bytes written
///
/// On integrity failure the written part of `output` is zeroed and an
/// authentication error is returned.
pub fn unwrap<B: BlockCipher>(
    cipher: &B,
    iv: Option<&WrapIv>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    let out_len = unwrapped_len(input.len())?;
    validate::min_length("key unwrap output", output.len(), out_len)?;

    let n = out_len / WRAP_BLOCK_SIZE;
    let iv = iv.unwrap_or(&WRAP_DEFAULT_IV);

    output[..out_len].copy_from_slice(&input[WRAP_BLOCK_SIZE..]);
    let mut b: Block = [0u8; BLOCK_SIZE];
    b[..8].copy_from_slice(&input[..8]);

    let mut t = 6 * n as u64;
    for _ in 0..6 {
        for i in (0..n).rev() {
            let r = WRAP_BLOCK_SIZE * i;
            xor_step_counter(&mut b[..8], t);
            b[8..].copy_from_slice(&output[r..r + 8]);
            cipher.encrypt_block(&mut b);
            output[r..r + 8].copy_from_slice(&b[8..]);
            t -= 1;
        }
    }

    let valid = ct_eq(&b[..8], iv);
    b.zeroize();
    if !valid {
        secure_zero(&mut output[..out_len]);
        return Err(Error::Authentication {
            algorithm: "key unwrap",
        });
    }
    Ok(out_len)
}

/// Key wrap over an owned schedule built for one direction
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyWrap<B: BlockCipher> {
    cipher: B,
    iv: Option<WrapIv>,
    #[zeroize(skip)]
    direction: Direction,
}

impl<B: BlockCipher> KeyWrap<B> {
    /// Build a wrapper (encrypt) or unwrapper (decrypt) from a raw key
    pub fn new(key: &[u8], iv: Option<&[u8]>, direction: Direction) -> Result<Self> {
        let cipher = match direction {
            Direction::Encrypt => B::set_encrypt_key(key)?,
            Direction::Decrypt => B::set_decrypt_key(key)?,
        };
        let iv = match iv {
            Some(bytes) => {
                validate::length("key wrap IV", bytes.len(), WRAP_IV_SIZE)?;
                let mut v = [0u8; WRAP_IV_SIZE];
                v.copy_from_slice(bytes);
                Some(v)
            }
            None => None,
        };
        Ok(Self {
            cipher,
            iv,
            direction,
        })
    }

    /// Output length for `input_len` bytes in this direction
    pub fn output_len(&self, input_len: usize) -> Result<usize> {
        match self.direction {
            Direction::Encrypt => wrapped_len(input_len),
            Direction::Decrypt => unwrapped_len(input_len),
        }
    }

    /// Wrap or unwrap `input` into `output`
    pub fn process(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        match self.direction {
            Direction::Encrypt => wrap(&self.cipher, self.iv.as_ref(), input, output),
            Direction::Decrypt => unwrap(&self.cipher, self.iv.as_ref(), input, output),
        }
    }
}
