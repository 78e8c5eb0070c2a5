//! The host dispatch contract
//!
//! A [`CipherDescriptor`] is the immutable, per-algorithm record a host
//! looks up: sizes, capability flags, and the function slots that operate
//! on a [`CipherContext`]. Every descriptor is produced by the same
//! [`DescriptorBuilder`].

use core::fmt;
use core::ops::BitOr;

use blockmode_algorithms::block::BlockCipher;

use crate::adapters::{GcmState, StreamState, WrapState};
use crate::context::CipherContext;
use crate::error::Result;

/// Algorithms known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherId {
    /// SM4 in counter mode with a 32-bit counter
    Sm4Ctr,
    /// SM4 in 1-bit cipher feedback mode
    Sm4Cfb1,
    /// SM4 in 8-bit cipher feedback mode
    Sm4Cfb8,
    /// SM4 key wrap (RFC 3394 construction)
    Sm4Wrap,
    /// SM4 in Galois/Counter Mode
    Sm4Gcm,
}

impl CipherId {
    /// Every id, in registry order
    pub const ALL: [CipherId; 5] = [
        CipherId::Sm4Ctr,
        CipherId::Sm4Cfb1,
        CipherId::Sm4Cfb8,
        CipherId::Sm4Wrap,
        CipherId::Sm4Gcm,
    ];

    /// Canonical algorithm name
    pub fn name(self) -> &'static str {
        match self {
            CipherId::Sm4Ctr => "sms4-ctr",
            CipherId::Sm4Cfb1 => "sms4-cfb1",
            CipherId::Sm4Cfb8 => "sms4-cfb8",
            CipherId::Sm4Wrap => "sms4-wrap",
            CipherId::Sm4Gcm => "sms4-gcm",
        }
    }

    /// Parse a canonical name (ASCII case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }

    /// Position in [`CipherId::ALL`]
    pub fn index(self) -> usize {
        match self {
            CipherId::Sm4Ctr => 0,
            CipherId::Sm4Cfb1 => 1,
            CipherId::Sm4Cfb8 => 2,
            CipherId::Sm4Wrap => 3,
            CipherId::Sm4Gcm => 4,
        }
    }
}

impl fmt::Display for CipherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode tag carried in a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Counter mode
    Ctr,
    /// Cipher feedback mode
    Cfb,
    /// Key wrap
    Wrap,
    /// Galois/Counter Mode
    Gcm,
}

/// Capability flags of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CipherFlags(u32);

impl CipherFlags {
    /// No flags
    pub const NONE: CipherFlags = CipherFlags(0);
    /// The adapter manages the IV itself; the context does not copy it
    pub const CUSTOM_IV: CipherFlags = CipherFlags(1 << 0);
    /// Key wrap semantics (output is input plus one semiblock)
    pub const WRAP_MODE: CipherFlags = CipherFlags(1 << 1);
    /// The data length may be given in bits
    pub const LENGTH_BITS: CipherFlags = CipherFlags(1 << 2);
    /// The cipher slot returns byte counts and handles AAD/finalize itself
    pub const CUSTOM_CIPHER: CipherFlags = CipherFlags(1 << 3);
    /// Call init even when neither key nor IV is supplied
    pub const ALWAYS_CALL_INIT: CipherFlags = CipherFlags(1 << 4);
    /// Authenticated encryption with associated data
    pub const AEAD: CipherFlags = CipherFlags(1 << 5);

    /// Raw bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if all bits of `other` are set
    pub const fn contains(self, other: CipherFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CipherFlags {
    type Output = CipherFlags;

    fn bitor(self, rhs: CipherFlags) -> CipherFlags {
        CipherFlags(self.0 | rhs.0)
    }
}

/// Outcome of a cipher call, mirroring the integer convention hosts expect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherStatus {
    /// Stream adapters: all requested data processed
    Success,
    /// Byte count produced (or queried); `Length(0)` after finalize
    Length(usize),
    /// Precondition violation or integrity failure
    Failure,
}

impl CipherStatus {
    /// Integer form: 1 for success, `n` for a length, -1 for failure
    pub fn as_raw(self) -> isize {
        match self {
            CipherStatus::Success => 1,
            CipherStatus::Length(n) => n as isize,
            CipherStatus::Failure => -1,
        }
    }

    /// True unless [`CipherStatus::Failure`]
    pub fn is_ok(self) -> bool {
        !matches!(self, CipherStatus::Failure)
    }
}

/// Commands accepted by a descriptor's ctrl slot
#[derive(Debug)]
pub enum CtrlCommand<'a> {
    /// Change the IV length used by the next IV (GCM: 1..=128)
    SetIvLen(usize),
    /// Expected tag for decryption (1..=16 bytes)
    SetTag(&'a [u8]),
    /// Copy the tag produced by encryption into the buffer
    GetTag(&'a mut [u8]),
}

/// Per-context adapter state, created by the descriptor's state constructor
#[derive(Clone)]
pub enum AdapterState<C: BlockCipher> {
    /// CTR and CFB: a forward key schedule
    Stream(StreamState<C>),
    /// Key wrap: schedule for the context direction plus optional IV
    Wrap(WrapState<C>),
    /// GCM state machine
    Gcm(GcmState<C>),
}

/// Init slot: `(context, key, iv)`; the direction is already recorded on the context
pub type InitFn<C> = fn(&mut CipherContext<C>, Option<&[u8]>, Option<&[u8]>) -> Result<()>;

/// Cipher slot: `(context, out, in, len)`
pub type CipherFn<C> =
    fn(&mut CipherContext<C>, Option<&mut [u8]>, Option<&[u8]>, usize) -> CipherStatus;

/// Cleanup slot
pub type CleanupFn<C> = fn(&mut CipherContext<C>);

/// Ctrl slot
pub type CtrlFn<C> = fn(&mut CipherContext<C>, CtrlCommand<'_>) -> Result<()>;

/// State constructor slot
pub type StateFn<C> = fn() -> AdapterState<C>;

/// Immutable description of one algorithm
pub struct CipherDescriptor<C: BlockCipher> {
    id: CipherId,
    mode: CipherMode,
    block_size: usize,
    key_len: usize,
    iv_len: usize,
    flags: CipherFlags,
    pub(crate) init: InitFn<C>,
    pub(crate) cipher: CipherFn<C>,
    pub(crate) cleanup: Option<CleanupFn<C>>,
    pub(crate) ctrl: Option<CtrlFn<C>>,
    pub(crate) new_state: StateFn<C>,
}

impl<C: BlockCipher> Clone for CipherDescriptor<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: BlockCipher> Copy for CipherDescriptor<C> {}

impl<C: BlockCipher> CipherDescriptor<C> {
    /// Start building a descriptor from its mandatory slots
    pub fn builder(
        id: CipherId,
        mode: CipherMode,
        init: InitFn<C>,
        cipher: CipherFn<C>,
        new_state: StateFn<C>,
    ) -> DescriptorBuilder<C> {
        DescriptorBuilder {
            desc: CipherDescriptor {
                id,
                mode,
                block_size: 16,
                key_len: C::KEY_SIZE,
                iv_len: 16,
                flags: CipherFlags::NONE,
                init,
                cipher,
                cleanup: None,
                ctrl: None,
                new_state,
            },
        }
    }

    /// Algorithm id
    pub fn id(&self) -> CipherId {
        self.id
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Mode tag
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Block size in bytes
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Key length in bytes
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Default IV length in bytes
    pub fn iv_len(&self) -> usize {
        self.iv_len
    }

    /// Capability flags
    pub fn flags(&self) -> CipherFlags {
        self.flags
    }

    /// True if the descriptor has a ctrl slot
    pub fn has_ctrl(&self) -> bool {
        self.ctrl.is_some()
    }
}

impl<C: BlockCipher> fmt::Debug for CipherDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherDescriptor")
            .field("name", &self.name())
            .field("mode", &self.mode)
            .field("block_size", &self.block_size)
            .field("key_len", &self.key_len)
            .field("iv_len", &self.iv_len)
            .field("flags", &self.flags)
            .field("ctrl", &self.ctrl.is_some())
            .finish()
    }
}

/// Builder shared by every adapter's descriptor
pub struct DescriptorBuilder<C: BlockCipher> {
    desc: CipherDescriptor<C>,
}

impl<C: BlockCipher> DescriptorBuilder<C> {
    /// Block size in bytes (default 16)
    pub fn block_size(mut self, n: usize) -> Self {
        self.desc.block_size = n;
        self
    }

    /// Key length in bytes (default: the primitive's key size)
    pub fn key_len(mut self, n: usize) -> Self {
        self.desc.key_len = n;
        self
    }

    /// IV length in bytes (default 16)
    pub fn iv_len(mut self, n: usize) -> Self {
        self.desc.iv_len = n;
        self
    }

    /// Capability flags
    pub fn flags(mut self, flags: CipherFlags) -> Self {
        self.desc.flags = flags;
        self
    }

    /// Cleanup slot
    pub fn cleanup(mut self, f: CleanupFn<C>) -> Self {
        self.desc.cleanup = Some(f);
        self
    }

    /// Ctrl slot
    pub fn ctrl(mut self, f: CtrlFn<C>) -> Self {
        self.desc.ctrl = Some(f);
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> CipherDescriptor<C> {
        self.desc
    }
}
