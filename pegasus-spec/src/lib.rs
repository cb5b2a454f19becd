//! # Pegasus CPU Specification
//!
//! Register addressing and instruction encoding for the Pegasus multitasking CPU.
//!
//! ## Key Features
//! - Segmented register file: 8-bit IDs `[context:3][class:2][index:3]`
//! - Global context plus the current task and four fixed task slots
//! - Banked memory: per-task MMAP registers map virtual banks to physical banks
//! - Byte-oriented instructions: opcode byte followed by MSB-first packed fields

pub mod encoding;
pub mod error;
pub mod instruction;
pub mod mmap;
pub mod opcode;
pub mod register;

pub use error::{PegasusError, Result};
pub use instruction::Instruction;
pub use mmap::MemoryMapEntry;
pub use opcode::Opcode;
pub use register::{
    RegisterClass, RegisterContext, RegisterId, RegisterIndex, REGISTER_WIDTH,
};

/// Number of named registers in the architectural namespace
pub const NUM_REGISTERS: usize = 3 + 5 * (1 + 3 * register::SLOTS_PER_CLASS as usize);
