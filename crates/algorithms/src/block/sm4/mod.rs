//! SM4 block cipher (GB/T 32907-2016)
//!
//! 128-bit block, 128-bit key, 32 rounds of an unbalanced Feistel network.
//! The decryption schedule is the encryption schedule in reverse order, so
//! both directions share the same round function.
//!
//! The S-box is applied by table lookup. Callers that need resistance to
//! cache-timing observers should prefer a hardware implementation behind the
//! same [`BlockCipher`] trait.

use zeroize::{Zeroize, ZeroizeOnDrop};

use blockmode_common::security::{barrier, AlignedSchedule};
use blockmode_internal::endian::{store_u32_be, u32_from_be_bytes};
use blockmode_params::utils::symmetric::{
    SM4_BLOCK_SIZE, SM4_KEY_SIZE, SM4_ROUNDS, SM4_SCHEDULE_SIZE,
};

use super::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{validate, Result};

const _: () = assert!(SM4_BLOCK_SIZE == BLOCK_SIZE);

const SBOX: [u8; 256] = [
    0xd6, 0x90, 0xe9, 0xfe, 0xcc, 0xe1, 0x3d, 0xb7, 0x16, 0xb6, 0x14, 0xc2, 0x28, 0xfb, 0x2c, 0x05,
    0x2b, 0x67, 0x9a, 0x76, 0x2a, 0xbe, 0x04, 0xc3, 0xaa, 0x44, 0x13, 0x26, 0x49, 0x86, 0x06, 0x99,
    0x9c, 0x42, 0x50, 0xf4, 0x91, 0xef, 0x98, 0x7a, 0x33, 0x54, 0x0b, 0x43, 0xed, 0xcf, 0xac, 0x62,
    0xe4, 0xb3, 0x1c, 0xa9, 0xc9, 0x08, 0xe8, 0x95, 0x80, 0xdf, 0x94, 0xfa, 0x75, 0x8f, 0x3f, 0xa6,
    0x47, 0x07, 0xa7, 0xfc, 0xf3, 0x73, 0x17, 0xba, 0x83, 0x59, 0x3c, 0x19, 0xe6, 0x85, 0x4f, 0xa8,
    0x68, 0x6b, 0x81, 0xb2, 0x71, 0x64, 0xda, 0x8b, 0xf8, 0xeb, 0x0f, 0x4b, 0x70, 0x56, 0x9d, 0x35,
    0x1e, 0x24, 0x0e, 0x5e, 0x63, 0x58, 0xd1, 0xa2, 0x25, 0x22, 0x7c, 0x3b, 0x01, 0x21, 0x78, 0x87,
    0xd4, 0x00, 0x46, 0x57, 0x9f, 0xd3, 0x27, 0x52, 0x4c, 0x36, 0x02, 0xe7, 0xa0, 0xc4, 0xc8, 0x9e,
    0xea, 0xbf, 0x8a, 0xd2, 0x40, 0xc7, 0x38, 0xb5, 0xa3, 0xf7, 0xf2, 0xce, 0xf9, 0x61, 0x15, 0xa1,
    0xe0, 0xae, 0x5d, 0xa4, 0x9b, 0x34, 0x1a, 0x55, 0xad, 0x93, 0x32, 0x30, 0xf5, 0x8c, 0xb1, 0xe3,
    0x1d, 0xf6, 0xe2, 0x2e, 0x82, 0x66, 0xca, 0x60, 0xc0, 0x29, 0x23, 0xab, 0x0d, 0x53, 0x4e, 0x6f,
    0xd5, 0xdb, 0x37, 0x45, 0xde, 0xfd, 0x8e, 0x2f, 0x03, 0xff, 0x6a, 0x72, 0x6d, 0x6c, 0x5b, 0x51,
    0x8d, 0x1b, 0xaf, 0x92, 0xbb, 0xdd, 0xbc, 0x7f, 0x11, 0xd9, 0x5c, 0x41, 0x1f, 0x10, 0x5a, 0xd8,
    0x0a, 0xc1, 0x31, 0x88, 0xa5, 0xcd, 0x7b, 0xbd, 0x2d, 0x74, 0xd0, 0x12, 0xb8, 0xe5, 0xb4, 0xb0,
    0x89, 0x69, 0x97, 0x4a, 0x0c, 0x96, 0x77, 0x7e, 0x65, 0xb9, 0xf1, 0x09, 0xc5, 0x6e, 0xc6, 0x84,
    0x18, 0xf0, 0x7d, 0xec, 0x3a, 0xdc, 0x4d, 0x20, 0x79, 0xee, 0x5f, 0x3e, 0xd7, 0xcb, 0x39, 0x48,
];

/// System parameter FK
const FK: [u32; 4] = [0xa3b1bac6, 0x56aa3350, 0x677d9197, 0xb27022dc];

/// Fixed parameter CK; byte j of CK[i] is (4i + j) * 7 mod 256
const CK: [u32; 32] = {
    let mut ck = [0u32; 32];
    let mut i = 0;
    while i < 32 {
        let mut word = 0u32;
        let mut j = 0;
        while j < 4 {
            word = (word << 8) | (((4 * i + j) * 7) & 0xff) as u32;
            j += 1;
        }
        ck[i] = word;
        i += 1;
    }
    ck
};

/// Non-linear transform tau: the S-box applied to each byte
#[inline(always)]
fn tau(a: u32) -> u32 {
    let b = a.to_be_bytes();
    u32::from_be_bytes([
        SBOX[b[0] as usize],
        SBOX[b[1] as usize],
        SBOX[b[2] as usize],
        SBOX[b[3] as usize],
    ])
}

/// Round transform T = L(tau(.))
#[inline(always)]
fn t(a: u32) -> u32 {
    let b = tau(a);
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Key schedule transform T' = L'(tau(.))
#[inline(always)]
fn t_prime(a: u32) -> u32 {
    let b = tau(a);
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// SM4 key schedule
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4 {
    round_keys: AlignedSchedule<SM4_SCHEDULE_SIZE>,
}

impl Sm4 {
    fn expand_key(key: &[u8], reverse: bool) -> Result<Self> {
        validate::length("SM4 key", key.len(), SM4_KEY_SIZE)?;

        let mut k = [
            u32_from_be_bytes(&key[0..4]) ^ FK[0],
            u32_from_be_bytes(&key[4..8]) ^ FK[1],
            u32_from_be_bytes(&key[8..12]) ^ FK[2],
            u32_from_be_bytes(&key[12..16]) ^ FK[3],
        ];

        let mut round_keys = AlignedSchedule::zeroed();
        for (i, ck) in CK.iter().enumerate() {
            let rk = k[0] ^ t_prime(k[1] ^ k[2] ^ k[3] ^ ck);
            k = [k[1], k[2], k[3], rk];
            let slot = if reverse { SM4_ROUNDS - 1 - i } else { i };
            round_keys.set_word(slot, rk);
        }
        k.zeroize();
        barrier::compiler_fence_seq_cst();

        Ok(Self { round_keys })
    }
}

impl BlockCipher for Sm4 {
    const KEY_SIZE: usize = SM4_KEY_SIZE;

    fn name() -> &'static str {
        "SM4"
    }

    fn set_encrypt_key(key: &[u8]) -> Result<Self> {
        Self::expand_key(key, false)
    }

    fn set_decrypt_key(key: &[u8]) -> Result<Self> {
        Self::expand_key(key, true)
    }

    fn encrypt_block(&self, block: &mut Block) {
        let mut x = [
            u32_from_be_bytes(&block[0..4]),
            u32_from_be_bytes(&block[4..8]),
            u32_from_be_bytes(&block[8..12]),
            u32_from_be_bytes(&block[12..16]),
        ];

        for i in 0..SM4_ROUNDS {
            let next = x[0] ^ t(x[1] ^ x[2] ^ x[3] ^ self.round_keys.word(i));
            x = [x[1], x[2], x[3], next];
        }

        // Reverse transform R
        store_u32_be(&mut block[0..4], x[3]);
        store_u32_be(&mut block[4..8], x[2]);
        store_u32_be(&mut block[8..12], x[1]);
        store_u32_be(&mut block[12..16], x[0]);
        x.zeroize();
    }
}
