//! Assembler errors

use pegasus_spec::{PegasusError, RegisterId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error(transparent)]
    Encoding(#[from] PegasusError),

    #[error("Syntax error at column {column}: {message}")]
    SyntaxError { column: usize, message: String },

    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("Unknown register: {0}")]
    UnknownRegister(String),

    #[error("{mnemonic} expects {expected} operands, found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid operand {position} for {mnemonic}: {message}")]
    InvalidOperand {
        mnemonic: String,
        position: usize,
        message: String,
    },

    #[error("Duplicate register name: {0}")]
    DuplicateRegister(String),

    #[error("Duplicate register ID {id} for {name} (already bound to {existing})")]
    DuplicateRegisterId {
        name: String,
        id: RegisterId,
        existing: String,
    },

    #[error("Duplicate opcode: {0}")]
    DuplicateOpcode(String),

    #[error("Error on line {line} \"{text}\": {source}")]
    Line {
        line: usize,
        text: String,
        #[source]
        source: Box<AssemblerError>,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Strip line context, returning the underlying failure
    pub fn root(&self) -> &AssemblerError {
        match self {
            AssemblerError::Line { source, .. } => source.root(),
            other => other,
        }
    }

    /// Line number the error was reported on, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
