//! Big-endian load/store helpers

/// Read a big-endian u32 from the first four bytes of `bytes`
#[inline(always)]
pub fn u32_from_be_bytes(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Write `value` big-endian into the first four bytes of `out`
#[inline(always)]
pub fn store_u32_be(out: &mut [u8], value: u32) {
    out[..4].copy_from_slice(&value.to_be_bytes());
}

/// Read a big-endian u64 from the first eight bytes of `bytes`
#[inline(always)]
pub fn u64_from_be_bytes(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Write `value` big-endian into the first eight bytes of `out`
#[inline(always)]
pub fn store_u64_be(out: &mut [u8], value: u64) {
    out[..8].copy_from_slice(&value.to_be_bytes());
}
