//! Cipher feedback (CFB) mode with 1-bit and 8-bit segments
//!
//! Each segment encrypts the 128-bit feedback register, XORs the leading
//! `s` bits of the result into the data, then shifts the register left by
//! `s` bits and appends the ciphertext segment (NIST SP 800-38A, 6.3).
//! Both directions use the forward block transform; the direction only
//! decides whether the output or the input segment is the ciphertext fed
//! back.

use zeroize::{Zeroize, ZeroizeOnDrop};

use blockmode_api::Direction;
use blockmode_params::utils::symmetric::MAX_BIT_CHUNK;

use super::super::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Result};

/// Shift `register` left by one bit, shifting `bit` into the low end
#[inline(always)]
fn shift_in_bit(register: &mut Block, bit: u8) {
    for i in 0..BLOCK_SIZE - 1 {
        register[i] = (register[i] << 1) | (register[i + 1] >> 7);
    }
    register[BLOCK_SIZE - 1] = (register[BLOCK_SIZE - 1] << 1) | (bit & 1);
}

/// CFB-8 over `input`, one feedback step per byte
pub fn cfb8_encrypt<B: BlockCipher>(
    cipher: &B,
    register: &mut Block,
    input: &[u8],
    output: &mut [u8],
    direction: Direction,
) -> Result<()> {
    validate::length("CFB-8 output", output.len(), input.len())?;

    let mut keystream = [0u8; BLOCK_SIZE];
    for (src, dst) in input.iter().zip(output.iter_mut()) {
        keystream.copy_from_slice(register);
        cipher.encrypt_block(&mut keystream);
        let c = *src ^ keystream[0];
        *dst = c;

        let feedback = match direction {
            Direction::Encrypt => c,
            Direction::Decrypt => *src,
        };
        register.copy_within(1.., 0);
        register[BLOCK_SIZE - 1] = feedback;
    }
    keystream.zeroize();
    Ok(())
}

/// CFB-1 over the first `bits` bits of `input`, most significant bit first
///
/// Bits of `output` beyond `bits` keep their previous value. Both buffers
/// must hold at least `ceil(bits / 8)` bytes.
pub fn cfb1_encrypt_bits<B: BlockCipher>(
    cipher: &B,
    register: &mut Block,
    input: &[u8],
    output: &mut [u8],
    bits: usize,
    direction: Direction,
) -> Result<()> {
    let bytes = bits / 8 + usize::from(bits % 8 != 0);
    validate::min_length("CFB-1 input", input.len(), bytes)?;
    validate::min_length("CFB-1 output", output.len(), bytes)?;

    let mut keystream = [0u8; BLOCK_SIZE];
    for n in 0..bits {
        let byte = n / 8;
        let shift = 7 - (n % 8);

        keystream.copy_from_slice(register);
        cipher.encrypt_block(&mut keystream);

        let in_bit = (input[byte] >> shift) & 1;
        let out_bit = in_bit ^ (keystream[0] >> 7);
        output[byte] = (output[byte] & !(1 << shift)) | (out_bit << shift);

        let feedback = match direction {
            Direction::Encrypt => out_bit,
            Direction::Decrypt => in_bit,
        };
        shift_in_bit(register, feedback);
    }
    keystream.zeroize();
    Ok(())
}

/// CFB-1 over whole bytes, split into passes of at most `chunk_limit` bytes
///
/// Every pass handles `pass_len * 8` bits, so `chunk_limit` must keep that
/// product inside `usize`. The result is identical to a single pass.
pub fn cfb1_encrypt_chunked<B: BlockCipher>(
    cipher: &B,
    register: &mut Block,
    input: &[u8],
    output: &mut [u8],
    direction: Direction,
    chunk_limit: usize,
) -> Result<()> {
    validate::length("CFB-1 output", output.len(), input.len())?;
    validate::parameter(
        chunk_limit > 0 && chunk_limit <= MAX_BIT_CHUNK,
        "chunk_limit",
        "chunk must be non-empty and its bit count must fit in usize",
    )?;

    for (src, dst) in input.chunks(chunk_limit).zip(output.chunks_mut(chunk_limit)) {
        cfb1_encrypt_bits(cipher, register, src, dst, src.len() * 8, direction)?;
    }
    Ok(())
}

/// CFB-1 over whole bytes using the largest safe pass size
pub fn cfb1_encrypt<B: BlockCipher>(
    cipher: &B,
    register: &mut Block,
    input: &[u8],
    output: &mut [u8],
    direction: Direction,
) -> Result<()> {
    cfb1_encrypt_chunked(cipher, register, input, output, direction, MAX_BIT_CHUNK)
}

fn load_register(iv: &[u8]) -> Result<Block> {
    validate::length("CFB feedback register", iv.len(), BLOCK_SIZE)?;
    let mut register = [0u8; BLOCK_SIZE];
    register.copy_from_slice(iv);
    Ok(register)
}

/// CFB-8 over an owned schedule and feedback register
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cfb8<B: BlockCipher> {
    cipher: B,
    register: Block,
    #[zeroize(skip)]
    direction: Direction,
}

impl<B: BlockCipher> Cfb8<B> {
    /// Create a CFB-8 instance; `iv` must be 16 bytes
    pub fn new(cipher: B, iv: &[u8], direction: Direction) -> Result<Self> {
        Ok(Self {
            cipher,
            register: load_register(iv)?,
            direction,
        })
    }

    /// Process `input` into `output`
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        cfb8_encrypt(&self.cipher, &mut self.register, input, output, self.direction)
    }

    /// Current feedback register
    pub fn register(&self) -> &Block {
        &self.register
    }
}

/// CFB-1 over an owned schedule and feedback register
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cfb1<B: BlockCipher> {
    cipher: B,
    register: Block,
    #[zeroize(skip)]
    direction: Direction,
}

impl<B: BlockCipher> Cfb1<B> {
    /// Create a CFB-1 instance; `iv` must be 16 bytes
    pub fn new(cipher: B, iv: &[u8], direction: Direction) -> Result<Self> {
        Ok(Self {
            cipher,
            register: load_register(iv)?,
            direction,
        })
    }

    /// Process whole bytes of `input` into `output`
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        cfb1_encrypt(&self.cipher, &mut self.register, input, output, self.direction)
    }

    /// Process the first `bits` bits of `input` into `output`
    pub fn update_bits(&mut self, input: &[u8], output: &mut [u8], bits: usize) -> Result<()> {
        cfb1_encrypt_bits(&self.cipher, &mut self.register, input, output, bits, self.direction)
    }

    /// Current feedback register
    pub fn register(&self) -> &Block {
        &self.register
    }
}
