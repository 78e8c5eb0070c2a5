//! Buffers for key-derived material: wiped on drop, redacted in `Debug`

use core::fmt;

use blockmode_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned secret bytes (GCM IV cache, encrypted pre-counter block) that
/// wipe themselves on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer<const N: usize>([u8; N]);

impl<const N: usize> SecretBuffer<N> {
    /// Takes ownership of `data`
    pub fn new(data: [u8; N]) -> Self {
        Self(data)
    }

    /// All zeros
    pub fn zeroed() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBuffer<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> PartialEq for SecretBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        ct_eq(self.0, other.0)
    }
}

impl<const N: usize> Eq for SecretBuffer<N> {}

impl<const N: usize> fmt::Debug for SecretBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer<{N}>(..)")
    }
}

/// Key schedule storage aligned to 16 bytes
///
/// Holds `N` bytes of round-key material addressed as native-endian 32-bit
/// words. The alignment lets block primitives load round keys with wide
/// aligned reads.
#[repr(C, align(16))]
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AlignedSchedule<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> AlignedSchedule<N> {
    /// Number of 32-bit words the schedule holds
    pub const WORDS: usize = N / 4;

    /// Create an all-zero schedule
    pub fn zeroed() -> Self {
        Self { bytes: [0u8; N] }
    }

    /// Read word `i`
    #[inline(always)]
    pub fn word(&self, i: usize) -> u32 {
        let off = i * 4;
        u32::from_ne_bytes([
            self.bytes[off],
            self.bytes[off + 1],
            self.bytes[off + 2],
            self.bytes[off + 3],
        ])
    }

    /// Overwrite word `i`
    #[inline(always)]
    pub fn set_word(&mut self, i: usize, value: u32) {
        let off = i * 4;
        self.bytes[off..off + 4].copy_from_slice(&value.to_ne_bytes());
    }

    /// Raw schedule bytes
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> fmt::Debug for AlignedSchedule<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlignedSchedule<{N}>(..)")
    }
}
