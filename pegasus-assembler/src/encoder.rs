//! Instruction encoders registered with the opcode table
//!
//! ```text
//! COPYBANK src:4 dst:4 offset:16
//! MAPBANK  task:4 virtual:4 physical:8   (expands to REGLOAD)
//! ```

use crate::error::{AssemblerError, Result};
use crate::opcode_table::{OpcodeTable, OperandSpec};
use pegasus_spec::encoding::{
    COPYBANK_DST_BITS, COPYBANK_OFFSET_BITS, COPYBANK_SRC_BITS, MAPBANK_PHYSICAL_BITS,
    MAPBANK_TASK_BITS, MAPBANK_VIRTUAL_BITS,
};
use pegasus_spec::Instruction;

/// COPYBANK src dst offset
pub fn encode_copybank(operands: &[u64]) -> Result<Vec<u8>> {
    let [src, dst, offset] = three_operands("COPYBANK", operands)?;
    Ok(Instruction::copy_bank(src, dst, offset)?.encode()?)
}

/// MAPBANK task virtual_bank physical_bank
pub fn encode_mapbank(operands: &[u64]) -> Result<Vec<u8>> {
    let [task, virtual_bank, physical_bank] = three_operands("MAPBANK", operands)?;
    Ok(Instruction::map_bank(task, virtual_bank, physical_bank)?.encode()?)
}

fn three_operands(mnemonic: &str, operands: &[u64]) -> Result<[u64; 3]> {
    match *operands {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(AssemblerError::OperandCount {
            mnemonic: mnemonic.to_string(),
            expected: 3,
            found: operands.len(),
        }),
    }
}

/// Register COPYBANK and MAPBANK
pub fn register_pegasus_opcodes(table: &mut OpcodeTable) -> Result<()> {
    table.register_opcode(
        "COPYBANK",
        vec![
            OperandSpec::literal("source bank", COPYBANK_SRC_BITS),
            OperandSpec::literal("destination bank", COPYBANK_DST_BITS),
            OperandSpec::literal("offset", COPYBANK_OFFSET_BITS),
        ],
        encode_copybank,
    )?;
    table.register_opcode(
        "MAPBANK",
        vec![
            OperandSpec::literal("task selector", MAPBANK_TASK_BITS),
            OperandSpec::literal("virtual bank", MAPBANK_VIRTUAL_BITS),
            OperandSpec::literal("physical bank", MAPBANK_PHYSICAL_BITS),
        ],
        encode_mapbank,
    )?;
    Ok(())
}
