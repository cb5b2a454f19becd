//! # Pegasus Opcode Definitions
//!
//! Every instruction starts with a one-byte opcode.
//!
//! - 0x01: REGLOAD (load a register, here only from a 32-bit literal)
//! - 0x02: REGSAVE
//! - 0x03: COPYBANK
//!
//! MAPBANK has no opcode of its own; it expands to a REGLOAD.

use serde::{Deserialize, Serialize};
use std::fmt;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// REGLOAD: dest = source (mode bits select width and source)
    RegLoad = 0x01,
    /// REGSAVE: store a register
    RegSave = 0x02,
    /// COPYBANK: copy bytes from one bank to another at an offset
    CopyBank = 0x03,
}

impl Opcode {
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::RegLoad),
            0x02 => Some(Self::RegSave),
            0x03 => Some(Self::CopyBank),
            _ => None,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::RegLoad => "REGLOAD",
            Self::RegSave => "REGSAVE",
            Self::CopyBank => "COPYBANK",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
