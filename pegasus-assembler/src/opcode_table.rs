//! Mnemonic table: operand shapes and encoder callbacks

use crate::config::Config;
use crate::error::{AssemblerError, Result};
use std::collections::HashMap;
use std::fmt;

/// Shape of one operand slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSpec {
    /// Label used in diagnostics
    pub name: &'static str,
    /// Accept a register name, resolved to its ID
    pub from_register: bool,
    /// Accept an integer literal
    pub from_literal: bool,
    /// Field width the resolved value must fit in
    pub bits: u32,
}

impl OperandSpec {
    pub const fn literal(name: &'static str, bits: u32) -> Self {
        Self {
            name,
            from_register: false,
            from_literal: true,
            bits,
        }
    }

    pub const fn register(name: &'static str, bits: u32) -> Self {
        Self {
            name,
            from_register: true,
            from_literal: false,
            bits,
        }
    }
}

/// Encoder callback: resolved operand values in, instruction bytes out
pub type EncoderFn = fn(&[u64]) -> Result<Vec<u8>>;

#[derive(Clone)]
pub struct OpcodeEntry {
    pub mnemonic: String,
    pub operands: Vec<OperandSpec>,
    pub encoder: EncoderFn,
}

impl fmt::Debug for OpcodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeEntry")
            .field("mnemonic", &self.mnemonic)
            .field("operands", &self.operands)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpcodeTable {
    config: Config,
    entries: HashMap<String, OpcodeEntry>,
}

impl OpcodeTable {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn register_opcode(
        &mut self,
        mnemonic: &str,
        operands: Vec<OperandSpec>,
        encoder: EncoderFn,
    ) -> Result<()> {
        let key = self.config.key(mnemonic);
        if self.entries.contains_key(&key) {
            return Err(AssemblerError::DuplicateOpcode(mnemonic.to_string()));
        }
        tracing::trace!(mnemonic, operands = operands.len(), "register opcode");
        self.entries.insert(
            key,
            OpcodeEntry {
                mnemonic: mnemonic.to_string(),
                operands,
                encoder,
            },
        );
        Ok(())
    }

    pub fn get(&self, mnemonic: &str) -> Option<&OpcodeEntry> {
        self.entries.get(&self.config.key(mnemonic))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
