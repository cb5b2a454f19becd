//! # Instruction Encoding Constants and Helpers
//!
//! Instructions are an opcode byte followed by fixed-width fields packed
//! most-significant-bit first. The packed fields must end on a byte boundary.
//!
//! ```text
//! COPYBANK: [0x03][src:4][dst:4][offset:16]
//! REGLOAD:  [0x01][dest:8][write_mode:2][extent:3][source:3][literal:32]
//! ```

use crate::error::{PegasusError, Result};

// ============================================================================
// COPYBANK Field Widths
// ============================================================================

/// Source bank field (4 bits)
pub const COPYBANK_SRC_BITS: u32 = 4;

/// Destination bank field (4 bits)
pub const COPYBANK_DST_BITS: u32 = 4;

/// Byte offset field (16 bits)
pub const COPYBANK_OFFSET_BITS: u32 = 16;

// ============================================================================
// MAPBANK Operand Widths
// ============================================================================

/// Task selector operand (4 bits, only 0-3 name a task)
pub const MAPBANK_TASK_BITS: u32 = 4;

/// Virtual bank operand (4 bits)
pub const MAPBANK_VIRTUAL_BITS: u32 = 4;

/// Physical bank operand (8 bits)
pub const MAPBANK_PHYSICAL_BITS: u32 = 8;

// ============================================================================
// REGLOAD Field Widths and Mode Codes
// ============================================================================

/// Destination register ID field (8 bits)
pub const REGLOAD_DEST_BITS: u32 = 8;

/// Write mode field (2 bits)
pub const REGLOAD_WRITE_MODE_BITS: u32 = 2;

/// Extent field (3 bits)
pub const REGLOAD_EXTENT_BITS: u32 = 3;

/// Source mode field (3 bits)
pub const REGLOAD_SOURCE_BITS: u32 = 3;

/// Literal payload (32 bits)
pub const REGLOAD_LITERAL_BITS: u32 = 32;

/// Overwrite, do not zero-extend
pub const WRITE_MODE_OVERWRITE: u64 = 0b00;

/// Set the whole register
pub const EXTENT_WHOLE: u64 = 0b000;

/// Load from a 32-bit literal following the header
pub const SOURCE_LITERAL32: u64 = 0b010;

// ============================================================================
// Bit Packing
// ============================================================================

/// Accumulates fixed-width fields MSB first and emits whole bytes
#[derive(Debug, Default, Clone)]
pub struct BitPacker {
    bytes: Vec<u8>,
    acc: u8,
    pending: u32,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a packer with bytes already emitted (usually the opcode)
    pub fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            bytes: prefix.to_vec(),
            ..Self::default()
        }
    }

    /// Append `value` as a `bits`-wide field, rejecting values that do not fit
    pub fn field(&mut self, operand: &'static str, value: u64, bits: u32) -> Result<&mut Self> {
        if !fits(value, bits) {
            return Err(PegasusError::OperandRange {
                operand,
                value,
                bits,
            });
        }
        for shift in (0..bits).rev() {
            let bit = if shift >= 64 { 0 } else { ((value >> shift) & 1) as u8 };
            self.acc = (self.acc << 1) | bit;
            self.pending += 1;
            if self.pending == 8 {
                self.bytes.push(self.acc);
                self.acc = 0;
                self.pending = 0;
            }
        }
        Ok(self)
    }

    /// Total number of bits written, including any prefix bytes
    pub fn bit_len(&self) -> u32 {
        self.bytes.len() as u32 * 8 + self.pending
    }

    /// Finish packing; fails if the fields did not end on a byte boundary
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.pending != 0 {
            return Err(PegasusError::Unaligned {
                bits: self.bit_len(),
            });
        }
        Ok(self.bytes)
    }
}

/// Whether `value` fits in an unsigned field of `bits` width
#[inline]
pub const fn fits(value: u64, bits: u32) -> bool {
    bits >= 64 || value >> bits == 0
}

/// Check an operand against its declared width
pub fn check_operand(operand: &'static str, value: u64, bits: u32) -> Result<u64> {
    if fits(value, bits) {
        Ok(value)
    } else {
        Err(PegasusError::OperandRange {
            operand,
            value,
            bits,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_two_nibbles_form_one_byte(hi in 0u64..16, lo in 0u64..16) {
            let mut packer = BitPacker::new();
            packer.field("hi", hi, 4).unwrap().field("lo", lo, 4).unwrap();
            prop_assert_eq!(packer.finish().unwrap(), vec![((hi << 4) | lo) as u8]);
        }

        #[test]
        fn prop_u32_is_big_endian(value in any::<u32>()) {
            let mut packer = BitPacker::new();
            packer.field("v", value as u64, 32).unwrap();
            prop_assert_eq!(packer.finish().unwrap(), value.to_be_bytes().to_vec());
        }
    }
}
