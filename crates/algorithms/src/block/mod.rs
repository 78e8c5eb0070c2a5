//! Block cipher primitive and modes of operation

pub mod modes;
pub mod sm4;

pub use modes::{Cfb1, Cfb8, Ctr32, KeyWrap};
pub use sm4::Sm4;

use zeroize::Zeroize;

use crate::error::Result;

/// A single 128-bit block
pub type Block = [u8; 16];

/// Size of [`Block`] in bytes
pub const BLOCK_SIZE: usize = 16;

/// A 128-bit block cipher as seen by the modes of operation
///
/// The implementing type *is* the key schedule. Modes only ever call
/// [`encrypt_block`](BlockCipher::encrypt_block); inverse transforms are
/// obtained by building the schedule with
/// [`set_decrypt_key`](BlockCipher::set_decrypt_key), after which the same
/// forward call runs the cipher backwards.
pub trait BlockCipher: Clone + Zeroize + Send + Sync + Sized {
    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Algorithm name
    fn name() -> &'static str;

    /// Build an encryption schedule from `key`
    fn set_encrypt_key(key: &[u8]) -> Result<Self>;

    /// Build a decryption schedule from `key`
    fn set_decrypt_key(key: &[u8]) -> Result<Self>;

    /// Transform one block in place with this schedule
    fn encrypt_block(&self, block: &mut Block);
}
