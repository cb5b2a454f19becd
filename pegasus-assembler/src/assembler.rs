//! Main assembler logic

use crate::config::Config;
use crate::encoder::register_pegasus_opcodes;
use crate::error::{AssemblerError, Result};
use crate::namespace::build_register_table;
use crate::opcode_table::{OpcodeEntry, OpcodeTable};
use crate::output::{Listing, ListingEntry};
use crate::parser::{parse_line, Operand};
use crate::registry::RegisterTable;
use pegasus_spec::PegasusError;
use std::fs;
use std::path::Path;

/// Register table, opcode table and configuration, fixed at construction
#[derive(Debug, Clone)]
pub struct Assembler {
    config: Config,
    registers: RegisterTable,
    opcodes: OpcodeTable,
}

impl Assembler {
    /// Assembler for the Pegasus namespace and instruction set
    pub fn new() -> Result<Self> {
        Self::with_config(Config::DEFAULT)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let registers = build_register_table(config)?;
        let mut opcodes = OpcodeTable::new(config);
        register_pegasus_opcodes(&mut opcodes)?;
        Ok(Self::from_parts(config, registers, opcodes))
    }

    /// Assemble with caller-supplied tables
    pub fn from_parts(config: Config, registers: RegisterTable, opcodes: OpcodeTable) -> Self {
        Self {
            config,
            registers,
            opcodes,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registers(&self) -> &RegisterTable {
        &self.registers
    }

    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    /// Assemble a single line. Blank and comment-only lines produce no bytes.
    pub fn assemble_line(&self, text: &str) -> Result<Vec<u8>> {
        let Some(line) = parse_line(text)? else {
            return Ok(Vec::new());
        };

        let entry = self
            .opcodes
            .get(&line.mnemonic)
            .ok_or_else(|| AssemblerError::UnknownInstruction(line.mnemonic.clone()))?;
        let values = self.resolve_operands(entry, &line.operands)?;
        let bytes = (entry.encoder)(&values)?;

        tracing::debug!(mnemonic = %entry.mnemonic, ?values, len = bytes.len(), "encoded");
        Ok(bytes)
    }

    /// Assemble a whole source text. The first failing line aborts assembly.
    pub fn assemble(&self, source: &str) -> Result<Listing> {
        let mut listing = Listing::new(self.config.uppercase_hex);

        for (line_num, line) in source.lines().enumerate() {
            let text = line.trim();
            let bytes = self.assemble_line(text).map_err(|e| AssemblerError::Line {
                line: line_num + 1,
                text: text.to_string(),
                source: Box::new(e),
            })?;
            if bytes.is_empty() {
                continue;
            }
            listing.push(ListingEntry {
                line: line_num + 1,
                text: text.to_string(),
                bytes,
            });
        }

        tracing::debug!(lines = listing.entries().len(), size = listing.size(), "assembled");
        Ok(listing)
    }

    /// Read and assemble a source file
    pub fn assemble_file(&self, path: impl AsRef<Path>) -> Result<Listing> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "read source");
        self.assemble(&source)
    }

    fn resolve_operands(&self, entry: &OpcodeEntry, operands: &[Operand]) -> Result<Vec<u64>> {
        if operands.len() != entry.operands.len() {
            return Err(AssemblerError::OperandCount {
                mnemonic: entry.mnemonic.clone(),
                expected: entry.operands.len(),
                found: operands.len(),
            });
        }

        let mut values = Vec::with_capacity(operands.len());
        for (position, (operand, spec)) in operands.iter().zip(&entry.operands).enumerate() {
            let value = match operand {
                Operand::Literal(value) if spec.from_literal => *value,
                Operand::Name(name) if spec.from_register => self
                    .registers
                    .lookup(name)
                    .map(|info| info.id.value() as u64)
                    .ok_or_else(|| AssemblerError::UnknownRegister(name.clone()))?,
                Operand::Literal(value) => {
                    return Err(AssemblerError::InvalidOperand {
                        mnemonic: entry.mnemonic.clone(),
                        position: position + 1,
                        message: format!("{} must be a register, found literal {value}", spec.name),
                    });
                }
                Operand::Name(name) => {
                    return Err(AssemblerError::InvalidOperand {
                        mnemonic: entry.mnemonic.clone(),
                        position: position + 1,
                        message: format!("{} must be a literal, found '{name}'", spec.name),
                    });
                }
            };

            if !pegasus_spec::encoding::fits(value, spec.bits) {
                return Err(PegasusError::OperandRange {
                    operand: spec.name,
                    value,
                    bits: spec.bits,
                }
                .into());
            }
            values.push(value);
        }
        Ok(values)
    }
}

/// Assemble source text with the default Pegasus assembler, returning the image bytes
pub fn assemble(source: &str) -> Result<Vec<u8>> {
    Ok(Assembler::new()?.assemble(source)?.bytes())
}
