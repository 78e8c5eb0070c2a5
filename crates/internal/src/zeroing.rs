//! Zeroing helpers

use zeroize::Zeroize;

/// Overwrite `buf` with zeros in a way the optimizer cannot elide
#[inline]
pub fn secure_zero(buf: &mut [u8]) {
    buf.zeroize();
}
