//! Shared types

use core::fmt;
use core::ops::{Deref, DerefMut};

use blockmode_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Result};

/// Fixed-size secret scratch space, wiped on drop.
///
/// Equality is constant time and `Debug` never prints the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize>([u8; N]);

impl<const N: usize> SecretBytes<N> {
    /// All-zero buffer
    pub fn zeroed() -> Self {
        Self([0u8; N])
    }

    /// Copies `bytes`, which must be exactly `N` long
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        validate::length("secret buffer", bytes.len(), N)?;
        let mut out = Self::zeroed();
        out.0.copy_from_slice(bytes);
        Ok(out)
    }
}

impl<const N: usize> Default for SecretBytes<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> Deref for SecretBytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> DerefMut for SecretBytes<N> {
    fn deref_mut(&mut self) -> &mut [u8; N] {
        &mut self.0
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        ct_eq(self.0, other.0)
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>(..)")
    }
}

/// Which way a mode runs
///
/// Stream modes always drive the forward block transform; the direction only
/// selects which side of the XOR is fed back or authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext in, ciphertext out
    Encrypt,
    /// Ciphertext in, plaintext out
    Decrypt,
}

impl Direction {
    /// True for [`Direction::Encrypt`]
    pub fn is_encrypt(self) -> bool {
        matches!(self, Direction::Encrypt)
    }
}
