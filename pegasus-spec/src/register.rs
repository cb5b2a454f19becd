//! # Pegasus register addressing
//!
//! Every register is named by an 8-bit ID built from three fields:
//!
//! ```text
//! [context:3][class:2][index:3]
//! ```
//!
//! Class codes are shared between the global and per-task contexts: `01` is
//! EXCEPTION in the global context and GPR in a task context, `10` is SYSCALL
//! globally and MMAP per task. The hardware decoder relies on this aliasing,
//! so decoding a class always goes through [`RegisterClass::resolve`].

use crate::error::{PegasusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of every architectural register in bits
pub const REGISTER_WIDTH: u32 = 32;

/// Context field width in bits
pub const CONTEXT_BITS: u32 = 3;

/// Class field width in bits
pub const CLASS_BITS: u32 = 2;

/// Index field width in bits
pub const INDEX_BITS: u32 = 3;

/// Number of slots in an indexed class (GPR, MMAP, IOMAP)
pub const SLOTS_PER_CLASS: u8 = 1 << INDEX_BITS;

const CONTEXT_SHIFT: u32 = CLASS_BITS + INDEX_BITS;
const CLASS_SHIFT: u32 = INDEX_BITS;
const CONTEXT_MASK: u8 = (1 << CONTEXT_BITS) - 1;
const CLASS_MASK: u8 = (1 << CLASS_BITS) - 1;
const INDEX_MASK: u8 = (1 << INDEX_BITS) - 1;

/// Execution context a register belongs to
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegisterContext {
    Global = 0b000,
    /// Whichever task is currently running
    Current = 0b001,
    Task0 = 0b010,
    Task1 = 0b011,
    Task2 = 0b100,
    Task3 = 0b101,
}

impl RegisterContext {
    /// Per-task contexts in namespace order
    pub const PER_TASK: [Self; 5] = [
        Self::Current,
        Self::Task0,
        Self::Task1,
        Self::Task2,
        Self::Task3,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b000 => Some(Self::Global),
            0b001 => Some(Self::Current),
            0b010 => Some(Self::Task0),
            0b011 => Some(Self::Task1),
            0b100 => Some(Self::Task2),
            0b101 => Some(Self::Task3),
            _ => None,
        }
    }

    /// Fixed task slot for a MAPBANK-style selector (0-3)
    pub fn task(selector: u64) -> Result<Self> {
        match selector {
            0 => Ok(Self::Task0),
            1 => Ok(Self::Task1),
            2 => Ok(Self::Task2),
            3 => Ok(Self::Task3),
            other => Err(PegasusError::InvalidTask(other)),
        }
    }

    #[inline]
    pub const fn is_global(self) -> bool {
        matches!(self, Self::Global)
    }

    /// Register-name prefix; the current task and the global context have none
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Global | Self::Current => "",
            Self::Task0 => "T0",
            Self::Task1 => "T1",
            Self::Task2 => "T2",
            Self::Task3 => "T3",
        }
    }
}

impl fmt::Display for RegisterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Global => "global",
            Self::Current => "current",
            Self::Task0 => "task0",
            Self::Task1 => "task1",
            Self::Task2 => "task2",
            Self::Task3 => "task3",
        };
        f.pad(name)
    }
}

/// Register class within a context
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterClass {
    Status,
    /// General purpose (per-task only)
    Gpr,
    /// Exception handler (global only)
    Exception,
    /// Memory map (per-task only)
    Mmap,
    /// Syscall handler (global only)
    Syscall,
    /// I/O map (per-task only)
    Iomap,
}

impl RegisterClass {
    /// Classes with eight addressable slots
    pub const INDEXED: [Self; 3] = [Self::Gpr, Self::Mmap, Self::Iomap];

    pub const fn code(self) -> u8 {
        match self {
            Self::Status => 0b00,
            Self::Gpr | Self::Exception => 0b01,
            Self::Mmap | Self::Syscall => 0b10,
            Self::Iomap => 0b11,
        }
    }

    /// Resolve an aliased class code against the kind of context it appears in
    pub const fn resolve(context: RegisterContext, code: u8) -> Option<Self> {
        match (context.is_global(), code) {
            (_, 0b00) => Some(Self::Status),
            (true, 0b01) => Some(Self::Exception),
            (true, 0b10) => Some(Self::Syscall),
            (true, _) => None,
            (false, 0b01) => Some(Self::Gpr),
            (false, 0b10) => Some(Self::Mmap),
            (false, 0b11) => Some(Self::Iomap),
            (false, _) => None,
        }
    }

    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Gpr | Self::Mmap | Self::Iomap)
    }

    /// Whether this class exists in the given context
    pub const fn valid_in(self, context: RegisterContext) -> bool {
        match self {
            Self::Status => true,
            Self::Exception | Self::Syscall => context.is_global(),
            Self::Gpr | Self::Mmap | Self::Iomap => !context.is_global(),
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::Gpr => "GPR",
            Self::Exception => "EXCEPTION",
            Self::Mmap => "MMAP",
            Self::Syscall => "SYSCALL",
            Self::Iomap => "IOMAP",
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.short_name())
    }
}

/// Slot selector within a class (0-7)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisterIndex(u8);

impl RegisterIndex {
    pub const ZERO: Self = Self(0);

    pub fn new(index: u64) -> Result<Self> {
        if index > INDEX_MASK as u64 {
            return Err(PegasusError::Encoding {
                field: "index",
                value: index,
                bits: INDEX_BITS,
            });
        }
        Ok(Self(index as u8))
    }

    /// All eight slots, in order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOTS_PER_CLASS).map(Self)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RegisterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 8-bit register identifier: `[context:3][class:2][index:3]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisterId(u8);

impl RegisterId {
    /// Build an ID from typed fields. The types bound every width, so this cannot fail.
    pub const fn new(context: RegisterContext, class: RegisterClass, index: RegisterIndex) -> Self {
        Self::pack(context.code(), class.code(), index.value())
    }

    /// Build an ID from raw field codes, rejecting any code wider than its field
    pub fn from_codes(context: u64, class: u64, index: u64) -> Result<Self> {
        check_width("context", context, CONTEXT_BITS)?;
        check_width("class", class, CLASS_BITS)?;
        check_width("index", index, INDEX_BITS)?;
        Ok(Self::pack(context as u8, class as u8, index as u8))
    }

    #[inline]
    const fn pack(context: u8, class: u8, index: u8) -> Self {
        Self(
            ((context & CONTEXT_MASK) << CONTEXT_SHIFT)
                | ((class & CLASS_MASK) << CLASS_SHIFT)
                | (index & INDEX_MASK),
        )
    }

    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Raw (context, class, index) codes
    #[inline]
    pub const fn codes(self) -> (u8, u8, u8) {
        (
            (self.0 >> CONTEXT_SHIFT) & CONTEXT_MASK,
            (self.0 >> CLASS_SHIFT) & CLASS_MASK,
            self.0 & INDEX_MASK,
        )
    }

    /// Typed fields, if the context code is defined and the class code is valid in it
    pub fn decode(self) -> Option<(RegisterContext, RegisterClass, RegisterIndex)> {
        let (context, class, index) = self.codes();
        let context = RegisterContext::from_code(context)?;
        let class = RegisterClass::resolve(context, class)?;
        Some((context, class, RegisterIndex(index)))
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

fn check_width(field: &'static str, value: u64, bits: u32) -> Result<()> {
    if value >> bits != 0 {
        return Err(PegasusError::Encoding { field, value, bits });
    }
    Ok(())
}
