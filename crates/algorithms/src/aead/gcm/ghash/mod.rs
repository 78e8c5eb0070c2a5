//! GHASH universal hash over GF(2^128) (NIST SP 800-38D, 6.4)
//!
//! Multiplication by the hash key `H` uses a 16-entry table of nibble
//! multiples of `H` and a 4-bit reduction table, processing the operand
//! four bits at a time from the least significant end.

use blockmode_internal::endian::{store_u64_be, u64_from_be_bytes};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{Block, BLOCK_SIZE};

/// Reduction table: `TABLE_P4[i]` is the high word of `i * R >> 120`,
/// where `R = 0xE1 << 120`
const TABLE_P4: [u64; 16] = [
    0x0000000000000000,
    0x1c20000000000000,
    0x3840000000000000,
    0x2460000000000000,
    0x7080000000000000,
    0x6ca0000000000000,
    0x48c0000000000000,
    0x54e0000000000000,
    0xe100000000000000,
    0xfd20000000000000,
    0xd940000000000000,
    0xc560000000000000,
    0x9180000000000000,
    0x8da0000000000000,
    0xa9c0000000000000,
    0xb5e0000000000000,
];

/// Field element as big-endian (high, low) words
#[derive(Clone, Copy, Default, PartialEq, Eq, Zeroize)]
struct Gf128 {
    h: u64,
    l: u64,
}

impl Gf128 {
    fn from_block(b: &Block) -> Self {
        Self {
            h: u64_from_be_bytes(&b[..8]),
            l: u64_from_be_bytes(&b[8..]),
        }
    }

    fn to_block(self) -> Block {
        let mut out = [0u8; BLOCK_SIZE];
        store_u64_be(&mut out[..8], self.h);
        store_u64_be(&mut out[8..], self.l);
        out
    }

    #[inline(always)]
    fn xor(self, other: Self) -> Self {
        Self {
            h: self.h ^ other.h,
            l: self.l ^ other.l,
        }
    }

    /// Multiply by x^4, reducing modulo the GCM polynomial
    #[inline(always)]
    fn shr4_reduce(self) -> Self {
        let rem = (self.l & 0x0f) as usize;
        Self {
            h: (self.h >> 4) ^ TABLE_P4[rem],
            l: (self.l >> 4) | (self.h << 60),
        }
    }

    /// Multiply by x, reducing modulo the GCM polynomial
    #[inline(always)]
    fn shr1_reduce(self) -> Self {
        let carry = self.l & 1;
        Self {
            h: (self.h >> 1) ^ (0xe100000000000000 & carry.wrapping_neg()),
            l: (self.l >> 1) | (self.h << 63),
        }
    }
}

/// GHASH state keyed by `H`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    table: [Gf128; 16],
    state: Gf128,
}

impl GHash {
    /// Precompute the multiplication table for hash key `h`
    pub fn new(h: &Block) -> Self {
        let mut table = [Gf128::default(); 16];
        table[8] = Gf128::from_block(h);

        let mut cur = table[8];
        for idx in [4usize, 2, 1] {
            cur = cur.shr1_reduce();
            table[idx] = cur;
        }

        for i in 2..16usize {
            if i.count_ones() > 1 {
                let msb = 1usize << (usize::BITS - 1 - i.leading_zeros());
                table[i] = table[msb].xor(table[i ^ msb]);
            }
        }

        Self {
            table,
            state: Gf128::default(),
        }
    }

    fn mul_h(&self, x: Gf128) -> Gf128 {
        let mut z = Gf128::default();
        for &byte in x.to_block().iter().rev() {
            z = z.shr4_reduce().xor(self.table[(byte & 0x0f) as usize]);
            z = z.shr4_reduce().xor(self.table[(byte >> 4) as usize]);
        }
        z
    }

    /// Absorb one full block: `state = (state ^ block) * H`
    pub fn update_block(&mut self, block: &Block) {
        let x = self.state.xor(Gf128::from_block(block));
        self.state = self.mul_h(x);
    }

    /// Absorb `data`, zero-padding the final partial block
    pub fn update_padded(&mut self, data: &[u8]) {
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in data.chunks(BLOCK_SIZE) {
            block.fill(0);
            block[..chunk.len()].copy_from_slice(chunk);
            self.update_block(&block);
        }
        block.zeroize();
    }

    /// Absorb the final length block; arguments are byte counts
    pub fn update_lengths(&mut self, aad_bytes: u64, text_bytes: u64) {
        let mut block = [0u8; BLOCK_SIZE];
        store_u64_be(&mut block[..8], aad_bytes.wrapping_mul(8));
        store_u64_be(&mut block[8..], text_bytes.wrapping_mul(8));
        self.update_block(&block);
    }

    /// Current accumulator value
    pub fn state(&self) -> Block {
        self.state.to_block()
    }

    /// Clear the accumulator, keeping the key
    pub fn reset(&mut self) {
        self.state = Gf128::default();
    }

    /// Bit-serial GF(2^128) product (SP 800-38D Algorithm 1)
    pub fn gf_multiply(x: &Block, y: &Block) -> Block {
        let x = Gf128::from_block(x);
        let mut v = Gf128::from_block(y);
        let mut z = Gf128::default();
        for i in 0..128 {
            let bit = if i < 64 {
                (x.h >> (63 - i)) & 1
            } else {
                (x.l >> (127 - i)) & 1
            };
            let mask = bit.wrapping_neg();
            z = z.xor(Gf128 {
                h: v.h & mask,
                l: v.l & mask,
            });
            v = v.shr1_reduce();
        }
        z.to_block()
    }
}
