//! Counter (CTR) mode with a 32-bit big-endian counter
//!
//! The keystream is the encryption of successive counter blocks. Only the
//! low 32 bits (bytes 12..16) of the 128-bit counter block are incremented;
//! they wrap from `0xffffffff` to `0` without carrying into the upper 96
//! bits. This matches the counter layout GCM uses and NIST SP 800-38A
//! with a 32-bit counter field.
//!
//! Keystream bytes left over from a partial block are cached together with
//! a progress index so that consecutive calls compose into one stream.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use blockmode_common::security::barrier;
use blockmode_internal::constant_time::xor_in_place;

use super::super::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Result};

/// Increment the low 32 bits of `counter`, wrapping without carry
#[inline(always)]
pub fn increment_counter32(counter: &mut Block) {
    let low = BigEndian::read_u32(&counter[12..]);
    BigEndian::write_u32(&mut counter[12..], low.wrapping_add(1));
}

/// Encrypt or decrypt whole blocks with a 32-bit counter
///
/// Processes `input.len() / 16` blocks from `input` into `output`, starting
/// at `counter` and advancing it by one per block. Any trailing partial
/// block is left untouched; `output` must be at least as long as the
/// processed part of `input`.
pub fn ctr32_encrypt_blocks<B: BlockCipher>(
    cipher: &B,
    input: &[u8],
    output: &mut [u8],
    counter: &mut Block,
) {
    let mut keystream = [0u8; BLOCK_SIZE];
    for (src, dst) in input
        .chunks_exact(BLOCK_SIZE)
        .zip(output.chunks_exact_mut(BLOCK_SIZE))
    {
        keystream.copy_from_slice(counter);
        cipher.encrypt_block(&mut keystream);
        increment_counter32(counter);
        for i in 0..BLOCK_SIZE {
            dst[i] = src[i] ^ keystream[i];
        }
    }
    keystream.zeroize();
}

/// Stream `input` through CTR mode into `output`
///
/// `counter` holds the next counter block, `keystream` the most recently
/// generated keystream block and `num` how many of its bytes are already
/// used (0 means none are cached). All three persist between calls.
pub fn ctr32_stream<B: BlockCipher>(
    cipher: &B,
    counter: &mut Block,
    keystream: &mut Block,
    num: &mut usize,
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    validate::length("CTR output", output.len(), input.len())?;

    barrier::compiler_fence_seq_cst();

    let mut n = *num % BLOCK_SIZE;
    let mut offset = 0;

    // Drain cached keystream first
    while n != 0 && offset < input.len() {
        output[offset] = input[offset] ^ keystream[n];
        offset += 1;
        n = (n + 1) % BLOCK_SIZE;
    }

    // Whole blocks
    let whole = (input.len() - offset) / BLOCK_SIZE * BLOCK_SIZE;
    if whole > 0 {
        ctr32_encrypt_blocks(
            cipher,
            &input[offset..offset + whole],
            &mut output[offset..offset + whole],
            counter,
        );
        offset += whole;
    }

    // Tail: generate one more block and keep the unused part cached
    if offset < input.len() {
        keystream.copy_from_slice(counter);
        cipher.encrypt_block(keystream);
        increment_counter32(counter);
        let tail = input.len() - offset;
        output[offset..].copy_from_slice(&input[offset..]);
        xor_in_place(&mut output[offset..], &keystream[..tail]);
        n = tail;
    }

    *num = n;
    barrier::compiler_fence_seq_cst();
    Ok(())
}

/// CTR mode over an owned key schedule and counter
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ctr32<B: BlockCipher> {
    cipher: B,
    counter: Block,
    keystream: Block,
    num: usize,
}

impl<B: BlockCipher> Ctr32<B> {
    /// Create a CTR instance from a schedule and a 16-byte initial counter
    pub fn new(cipher: B, iv: &[u8]) -> Result<Self> {
        validate::length("CTR initial counter", iv.len(), BLOCK_SIZE)?;
        let mut counter = [0u8; BLOCK_SIZE];
        counter.copy_from_slice(iv);
        Ok(Self {
            cipher,
            counter,
            keystream: [0u8; BLOCK_SIZE],
            num: 0,
        })
    }

    /// XOR the keystream into `input`, writing `output`
    pub fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        ctr32_stream(
            &self.cipher,
            &mut self.counter,
            &mut self.keystream,
            &mut self.num,
            input,
            output,
        )
    }

    /// Encrypt or decrypt `data` in place
    pub fn process(&mut self, data: &mut [u8]) {
        let mut n = self.num % BLOCK_SIZE;
        for byte in data.iter_mut() {
            if n == 0 {
                self.keystream.copy_from_slice(&self.counter);
                self.cipher.encrypt_block(&mut self.keystream);
                increment_counter32(&mut self.counter);
            }
            *byte ^= self.keystream[n];
            n = (n + 1) % BLOCK_SIZE;
        }
        self.num = n;
    }

    /// The next counter block
    pub fn counter(&self) -> &Block {
        &self.counter
    }

    /// Bytes of the current keystream block already consumed
    pub fn progress(&self) -> usize {
        self.num
    }
}
