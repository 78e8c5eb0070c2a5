//! Host-side cipher context
//!
//! A [`CipherContext`] is one logical stream: it is created from a
//! descriptor, initialised (key and IV may arrive in separate calls), driven
//! by any number of cipher calls and finally cleaned up or dropped.

use zeroize::Zeroize;

use blockmode_algorithms::block::{BlockCipher, BLOCK_SIZE};
use blockmode_api::{Direction, SecretBytes};

use crate::cipher::{AdapterState, CipherDescriptor, CipherFlags, CipherStatus, CtrlCommand};
use crate::error::{validate, Error, Result};

/// Mutable per-stream state driven through a [`CipherDescriptor`]
pub struct CipherContext<C: BlockCipher> {
    pub(crate) descriptor: CipherDescriptor<C>,
    pub(crate) direction: Direction,
    /// IV as supplied at init, restored when only a new key arrives
    pub(crate) oiv: [u8; BLOCK_SIZE],
    /// Running counter / feedback register
    pub(crate) iv: [u8; BLOCK_SIZE],
    /// Keystream cache (CTR) or tag (GCM)
    pub(crate) buf: SecretBytes<BLOCK_SIZE>,
    /// Bytes of `buf` already consumed
    pub(crate) num: usize,
    pub(crate) length_in_bits: bool,
    pub(crate) state: AdapterState<C>,
}

impl<C: BlockCipher> CipherContext<C> {
    /// Allocate a context for `descriptor`
    pub fn new(descriptor: &CipherDescriptor<C>) -> Self {
        Self {
            descriptor: *descriptor,
            direction: Direction::Encrypt,
            oiv: [0u8; BLOCK_SIZE],
            iv: [0u8; BLOCK_SIZE],
            buf: SecretBytes::zeroed(),
            num: 0,
            length_in_bits: false,
            state: (descriptor.new_state)(),
        }
    }

    /// Initialise with an optional key, optional IV and a direction
    ///
    /// Unless the descriptor manages its own IV, a supplied IV must be
    /// exactly [`iv_len`](CipherDescriptor::iv_len) bytes; it becomes the
    /// running counter or feedback register and the partial-block progress
    /// restarts. The adapter's init slot runs when a key is supplied or the
    /// descriptor asks to always be called.
    pub fn init(&mut self, key: Option<&[u8]>, iv: Option<&[u8]>, direction: Direction) -> Result<()> {
        let desc = self.descriptor;
        let flags = desc.flags();

        if let Some(key) = key {
            validate::length("cipher key", key.len(), desc.key_len())?;
        }

        if !flags.contains(CipherFlags::CUSTOM_IV) {
            if let Some(iv) = iv {
                validate::length("cipher IV", iv.len(), desc.iv_len())?;
                self.oiv[..iv.len()].copy_from_slice(iv);
            }
            if key.is_some() || iv.is_some() {
                self.iv = self.oiv;
                self.num = 0;
                self.buf.zeroize();
            }
        }

        self.direction = direction;

        if key.is_some() || flags.contains(CipherFlags::ALWAYS_CALL_INIT) {
            (desc.init)(self, key, iv).map_err(|e| {
                log::debug!("{}: init rejected: {}", desc.name(), e);
                e
            })?;
        }
        log::trace!(
            "{}: init key={} iv={} direction={:?}",
            desc.name(),
            key.is_some(),
            iv.is_some(),
            direction
        );
        Ok(())
    }

    /// Process `len` units of `input` into `output`
    ///
    /// `len` is a byte count, or a bit count for CFB-1 when
    /// [`set_length_in_bits`](Self::set_length_in_bits) is on. Passing no
    /// output queries a length (key wrap) or feeds AAD (GCM); passing no
    /// input finalizes (GCM).
    pub fn cipher(&mut self, output: Option<&mut [u8]>, input: Option<&[u8]>, len: usize) -> CipherStatus {
        let f = self.descriptor.cipher;
        f(self, output, input, len)
    }

    /// Process all of `input` into `output`
    pub fn update(&mut self, output: &mut [u8], input: &[u8]) -> CipherStatus {
        self.cipher(Some(output), Some(input), input.len())
    }

    /// Run a ctrl command
    pub fn ctrl(&mut self, command: CtrlCommand<'_>) -> Result<()> {
        match self.descriptor.ctrl {
            Some(f) => f(self, command),
            None => Err(Error::NotImplemented {
                feature: "ctrl command",
            }),
        }
    }

    /// Treat `len` as a bit count where the descriptor allows it
    pub fn set_length_in_bits(&mut self, on: bool) {
        self.length_in_bits = on;
    }

    /// Run the cleanup slot and return the context to its freshly allocated state
    pub fn cleanup(&mut self) {
        if let Some(f) = self.descriptor.cleanup {
            f(self);
        }
        self.state = (self.descriptor.new_state)();
        self.oiv.zeroize();
        self.iv.zeroize();
        self.buf.zeroize();
        self.num = 0;
        self.length_in_bits = false;
    }

    /// Descriptor this context was created from
    pub fn descriptor(&self) -> &CipherDescriptor<C> {
        &self.descriptor
    }

    /// Current IV / counter / feedback register (descriptor IV length)
    ///
    /// GCM reports its own IV at the configured IV length. Key wrap reports
    /// the custom IV, or zeros while the default IV is in use.
    pub fn iv(&self) -> &[u8] {
        if let AdapterState::Gcm(g) = &self.state {
            return g.current_iv();
        }
        let n = self.descriptor.iv_len().min(BLOCK_SIZE);
        &self.iv[..n]
    }

    /// Partial-block progress counter
    pub fn progress(&self) -> usize {
        self.num
    }

    /// Direction recorded at the last init
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether `len` is interpreted as bits
    pub fn length_in_bits(&self) -> bool {
        self.length_in_bits
    }
}

impl<C: BlockCipher> Drop for CipherContext<C> {
    fn drop(&mut self) {
        if let Some(f) = self.descriptor.cleanup {
            f(self);
        }
        self.oiv.zeroize();
        self.iv.zeroize();
    }
}

impl<C: BlockCipher> core::fmt::Debug for CipherContext<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CipherContext")
            .field("cipher", &self.descriptor.name())
            .field("direction", &self.direction)
            .field("progress", &self.num)
            .field("length_in_bits", &self.length_in_bits)
            .finish()
    }
}
