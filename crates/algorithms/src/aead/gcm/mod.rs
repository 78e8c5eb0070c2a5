//! Galois/Counter Mode (NIST SP 800-38D) as a streaming context
//!
//! [`Gcm128`] follows the usual incremental shape: set an IV, feed any
//! amount of additional authenticated data, then stream the payload through
//! [`encrypt`](Gcm128::encrypt) or [`decrypt`](Gcm128::decrypt), and finally
//! produce or check the tag. AAD is only accepted before the first payload
//! byte. Finishing invalidates the IV; a new one must be set before the
//! context can process another message.

pub mod ghash;

pub use ghash::GHash;

use zeroize::{Zeroize, ZeroizeOnDrop};

use blockmode_common::security::{barrier, SecretBuffer};
use blockmode_internal::constant_time::{ct_eq, xor_in_place};
use blockmode_params::utils::symmetric::{GCM_MAX_AAD, GCM_MAX_PLAINTEXT, GCM_TAG_SIZE};

use crate::block::modes::ctr::{ctr32_stream, increment_counter32};
use crate::block::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Error, Result};

/// Streaming GCM over a 128-bit block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Gcm128<B: BlockCipher> {
    cipher: B,
    ghash: GHash,
    /// E(K, J0), masks the final GHASH value
    ek0: SecretBuffer<BLOCK_SIZE>,
    /// Next counter block
    counter: Block,
    /// Last keystream block and how much of it is used
    keystream: Block,
    keystream_used: usize,
    /// Partial block awaiting GHASH
    pending: Block,
    pending_len: usize,
    aad_len: u64,
    text_len: u64,
    iv_set: bool,
    fast_ctr32: bool,
}

impl<B: BlockCipher> Gcm128<B> {
    /// Create a context from an encryption schedule
    ///
    /// Derives the hash key `H = E(K, 0^128)`. No IV is set yet.
    pub fn new(cipher: B) -> Self {
        let mut h = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&mut h);
        let ghash = GHash::new(&h);
        h.zeroize();

        Self {
            cipher,
            ghash,
            ek0: SecretBuffer::zeroed(),
            counter: [0u8; BLOCK_SIZE],
            keystream: [0u8; BLOCK_SIZE],
            keystream_used: 0,
            pending: [0u8; BLOCK_SIZE],
            pending_len: 0,
            aad_len: 0,
            text_len: 0,
            iv_set: false,
            fast_ctr32: true,
        }
    }

    /// Select the block-granular counter path (default) or the byte loop
    ///
    /// Both paths produce identical output.
    pub fn set_fast_ctr32(&mut self, enabled: bool) {
        self.fast_ctr32 = enabled;
    }

    /// Start a new message under `iv`
    ///
    /// A 12-byte IV is used directly as `J0 = IV || 0^31 || 1`; any other
    /// non-empty length is compressed with GHASH.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        validate::parameter(!iv.is_empty(), "iv", "GCM IV must not be empty")?;

        self.ghash.reset();
        let mut j0 = [0u8; BLOCK_SIZE];
        if iv.len() == 12 {
            j0[..12].copy_from_slice(iv);
            j0[15] = 1;
        } else {
            self.ghash.update_padded(iv);
            self.ghash.update_lengths(0, iv.len() as u64);
            j0 = self.ghash.state();
            self.ghash.reset();
        }

        let mut ek0 = j0;
        self.cipher.encrypt_block(&mut ek0);
        self.ek0 = SecretBuffer::new(ek0);
        ek0.zeroize();

        increment_counter32(&mut j0);
        self.counter = j0;
        j0.zeroize();

        self.keystream.zeroize();
        self.keystream_used = 0;
        self.pending.zeroize();
        self.pending_len = 0;
        self.aad_len = 0;
        self.text_len = 0;
        self.iv_set = true;
        log::trace!("GCM IV set ({} bytes)", iv.len());
        Ok(())
    }

    /// True between [`set_iv`](Self::set_iv) and the next finish
    pub fn iv_set(&self) -> bool {
        self.iv_set
    }

    fn require_iv(&self, operation: &'static str) -> Result<()> {
        if !self.iv_set {
            return Err(Error::processing(operation, "IV not set"));
        }
        Ok(())
    }

    fn absorb(&mut self, mut data: &[u8]) {
        if self.pending_len > 0 {
            let take = (BLOCK_SIZE - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];
            if self.pending_len < BLOCK_SIZE {
                return;
            }
            self.ghash.update_block(&self.pending);
            self.pending_len = 0;
        }

        let whole = data.len() / BLOCK_SIZE * BLOCK_SIZE;
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in data[..whole].chunks_exact(BLOCK_SIZE) {
            block.copy_from_slice(chunk);
            self.ghash.update_block(&block);
        }
        block.zeroize();

        let rest = &data[whole..];
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn flush_pending(&mut self) {
        if self.pending_len > 0 {
            for b in &mut self.pending[self.pending_len..] {
                *b = 0;
            }
            self.ghash.update_block(&self.pending);
            self.pending_len = 0;
        }
    }

    /// Feed additional authenticated data
    pub fn aad(&mut self, data: &[u8]) -> Result<()> {
        self.require_iv("GCM AAD")?;
        if self.text_len > 0 {
            return Err(Error::processing(
                "GCM AAD",
                "AAD must precede the payload",
            ));
        }
        let total = self.aad_len.saturating_add(data.len() as u64);
        if total > GCM_MAX_AAD {
            return Err(Error::processing("GCM AAD", "AAD length limit exceeded"));
        }
        self.absorb(data);
        self.aad_len = total;
        Ok(())
    }

    fn start_payload(&mut self, operation: &'static str, input: &[u8], output: &[u8]) -> Result<()> {
        self.require_iv(operation)?;
        validate::length(operation, output.len(), input.len())?;
        let total = self.text_len.saturating_add(input.len() as u64);
        if total > GCM_MAX_PLAINTEXT {
            return Err(Error::processing(operation, "message length limit exceeded"));
        }
        if self.text_len == 0 && !input.is_empty() {
            self.flush_pending();
        }
        self.text_len = total;
        Ok(())
    }

    fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        if self.fast_ctr32 {
            return ctr32_stream(
                &self.cipher,
                &mut self.counter,
                &mut self.keystream,
                &mut self.keystream_used,
                input,
                output,
            );
        }

        let mut n = self.keystream_used;
        for (src, dst) in input.iter().zip(output.iter_mut()) {
            if n == 0 {
                self.keystream.copy_from_slice(&self.counter);
                self.cipher.encrypt_block(&mut self.keystream);
                increment_counter32(&mut self.counter);
            }
            *dst = *src ^ self.keystream[n];
            n = (n + 1) % BLOCK_SIZE;
        }
        self.keystream_used = n;
        Ok(())
    }

    /// Encrypt `input` into `output` (equal lengths)
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.start_payload("GCM encrypt", input, output)?;
        barrier::compiler_fence_seq_cst();
        self.apply_keystream(input, output)?;
        self.absorb(output);
        Ok(())
    }

    /// Decrypt `input` into `output` (equal lengths)
    ///
    /// The plaintext is released before the tag is checked; callers must
    /// discard it if [`verify`](Self::verify) fails.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.start_payload("GCM decrypt", input, output)?;
        barrier::compiler_fence_seq_cst();
        self.absorb(input);
        self.apply_keystream(input, output)
    }

    /// Finish the message and return the full 16-byte tag
    pub fn finish(&mut self) -> Result<[u8; GCM_TAG_SIZE]> {
        self.require_iv("GCM finish")?;
        self.flush_pending();
        self.ghash.update_lengths(self.aad_len, self.text_len);

        let mut tag = self.ghash.state();
        xor_in_place(&mut tag, self.ek0.as_ref());

        self.iv_set = false;
        self.keystream.zeroize();
        self.keystream_used = 0;
        log::trace!(
            "GCM finished: {} AAD bytes, {} payload bytes",
            self.aad_len,
            self.text_len
        );
        Ok(tag)
    }

    /// Finish the message and compare against `expected` (1..=16 bytes)
    ///
    /// A shorter `expected` is compared against the leading bytes of the
    /// computed tag.
    pub fn verify(&mut self, expected: &[u8]) -> Result<()> {
        validate::parameter(
            !expected.is_empty() && expected.len() <= GCM_TAG_SIZE,
            "tag",
            "GCM tag must be 1 to 16 bytes",
        )?;
        let mut tag = self.finish()?;
        let ok = barrier::with_barriers(|| ct_eq(&tag[..expected.len()], expected));
        tag.zeroize();
        validate::authentication(ok, "GCM")
    }
}
