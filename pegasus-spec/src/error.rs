//! # Error Types for the Pegasus encoding core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PegasusError {
    /// A register-ID field code does not fit its declared width
    #[error("Invalid {field} code: {value} does not fit in {bits} bits")]
    Encoding {
        field: &'static str,
        value: u64,
        bits: u32,
    },

    /// An instruction operand does not fit its declared field width
    #[error("Operand {operand} out of range: {value} does not fit in {bits} bits")]
    OperandRange {
        operand: &'static str,
        value: u64,
        bits: u32,
    },

    #[error("Invalid task selector: {0} (valid range: 0-3)")]
    InvalidTask(u64),

    #[error("Packed fields are not byte aligned: {bits} bits")]
    Unaligned { bits: u32 },
}

pub type Result<T> = std::result::Result<T, PegasusError>;
