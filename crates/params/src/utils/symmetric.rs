//! Constants for the SM4 block cipher and its modes of operation

/// SM4 key size in bytes
pub const SM4_KEY_SIZE: usize = 16;

/// SM4 block size in bytes
pub const SM4_BLOCK_SIZE: usize = 16;

/// Number of SM4 rounds
pub const SM4_ROUNDS: usize = 32;

/// Bytes occupied by an SM4 round-key schedule (32 words)
pub const SM4_SCHEDULE_SIZE: usize = SM4_ROUNDS * 4;

/// IV / counter block size for CTR and CFB modes
pub const STREAM_IV_SIZE: usize = 16;

/// Largest byte count a single CFB-1 pass handles, so that the bit count
/// `bytes * 8` always fits in a `usize`
pub const MAX_BIT_CHUNK: usize = 1 << (usize::BITS - 4);

/// Key-wrap semiblock size in bytes
pub const WRAP_BLOCK_SIZE: usize = 8;

/// Key-wrap IV size in bytes
pub const WRAP_IV_SIZE: usize = 8;

/// Default key-wrap integrity check value (RFC 3394 section 2.2.3.1)
pub const WRAP_DEFAULT_IV: [u8; WRAP_IV_SIZE] = [0xA6; WRAP_IV_SIZE];

/// Smallest plaintext accepted by wrap (two semiblocks)
pub const WRAP_MIN_INPUT: usize = 16;

/// Smallest ciphertext accepted by unwrap (IV plus two semiblocks)
pub const UNWRAP_MIN_INPUT: usize = 24;

/// Largest input accepted by wrap or unwrap
pub const WRAP_MAX: usize = 1 << 31;

/// Default GCM IV length in bytes
pub const GCM_DEFAULT_IV_SIZE: usize = 12;

/// Largest GCM IV length accepted by the IV-length control
pub const GCM_MAX_IV_SIZE: usize = 128;

/// GCM tag size in bytes
pub const GCM_TAG_SIZE: usize = 16;

/// Maximum plaintext bytes per GCM message (2^36 - 32)
pub const GCM_MAX_PLAINTEXT: u64 = (1u64 << 36) - 32;

/// Maximum AAD bytes per GCM message (2^61)
pub const GCM_MAX_AAD: u64 = 1u64 << 61;
