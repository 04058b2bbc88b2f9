//! CRC-32C (Castagnoli) with the masking transform the framing2 wire
//! format applies before a checksum is stored alongside data.

use crate::error::{Error, Result};

// Reflected Castagnoli polynomial; LSB-first table-driven update.
const POLY_REFLECTED: u32 = 0x82f6_3b78;

const MASK_DELTA: u32 = 0xa282_ead8;

const TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLY_REFLECTED
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the unmasked CRC-32C of `payload`.
///
/// Init `0xffff_ffff`, process LSB-first, xorout `0xffff_ffff`.
pub fn crc32c(payload: &[u8]) -> u32 {
    let mut crc = 0xffff_ffffu32;
    for &b in payload {
        crc = (crc >> 8) ^ TABLE[((crc ^ b as u32) & 0xff) as usize];
    }
    crc ^ 0xffff_ffff
}

/// Rotate-right by 15 and add a constant, the standard transform applied
/// before a CRC is placed on the wire next to length fields.
pub fn mask(crc: u32) -> u32 {
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Inverse of [`mask`].
pub fn unmask(masked: u32) -> u32 {
    let rot = masked.wrapping_sub(MASK_DELTA);
    (rot << 15) | (rot >> 17)
}

/// The value stored in a framing2 data chunk: masked CRC-32C of the
/// uncompressed bytes.
pub fn masked_crc32c(payload: &[u8]) -> u32 {
    mask(crc32c(payload))
}

/// Verifies a stored masked checksum. Returns `Ok(())` if it matches.
pub fn verify_masked(expected: u32, payload: &[u8]) -> Result<()> {
    let calculated = masked_crc32c(payload);
    if calculated == expected {
        Ok(())
    } else {
        Err(Error::checksum_mismatch(expected, calculated))
    }
}
