//! Memory-map register contents
//!
//! ```text
//! 31            16 15   12 11    8 7            0
//! [ reserved:16  ][ rsv:4 ][flags:4][ phys bank:8 ]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag pattern for "bank present, no permissions"
pub const FLAG_PRESENT: u8 = 0b0001;

const FLAGS_SHIFT: u32 = 8;
const FLAGS_MASK: u32 = 0xF;
const BANK_MASK: u32 = 0xFF;
const RESERVED_MASK: u32 = 0xFFFF_F000;

/// Value of one per-task MMAP register
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryMapEntry {
    flags: u8,
    physical_bank: u8,
}

impl MemoryMapEntry {
    /// Entry mapping a present physical bank with zero permissions
    pub const fn present(physical_bank: u8) -> Self {
        Self {
            flags: FLAG_PRESENT,
            physical_bank,
        }
    }

    /// Parse a raw register value; `None` if any reserved bit is set
    pub const fn from_u32(raw: u32) -> Option<Self> {
        if raw & RESERVED_MASK != 0 {
            return None;
        }
        Some(Self {
            flags: ((raw >> FLAGS_SHIFT) & FLAGS_MASK) as u8,
            physical_bank: (raw & BANK_MASK) as u8,
        })
    }

    pub const fn to_u32(self) -> u32 {
        ((self.flags as u32 & FLAGS_MASK) << FLAGS_SHIFT) | self.physical_bank as u32
    }

    #[inline]
    pub const fn flags(self) -> u8 {
        self.flags
    }

    #[inline]
    pub const fn physical_bank(self) -> u8 {
        self.physical_bank
    }

    #[inline]
    pub const fn is_present(self) -> bool {
        self.flags & FLAG_PRESENT != 0
    }
}

impl fmt::Display for MemoryMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.to_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_layout() {
        let entry = MemoryMapEntry::present(1);
        assert_eq!(entry.to_u32(), 0x0000_0101);
        assert!(entry.is_present());
        assert_eq!(entry.flags(), 0b0001);
    }

    #[test]
    fn test_last_bank() {
        assert_eq!(MemoryMapEntry::present(0xFF).to_u32(), 0x0000_01FF);
    }

    #[test]
    fn test_from_u32() {
        let entry = MemoryMapEntry::from_u32(0x0000_0142).unwrap();
        assert_eq!(entry.physical_bank(), 0x42);
        assert!(entry.is_present());

        let absent = MemoryMapEntry::from_u32(0x0000_0007).unwrap();
        assert!(!absent.is_present());

        assert_eq!(MemoryMapEntry::from_u32(0x0000_1000), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MemoryMapEntry::present(1).to_string(), "0x00000101");
    }
}
