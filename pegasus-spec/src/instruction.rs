//! Pegasus instructions with encoders
//!
//! Only the primitive forms the assembler can emit are modelled here.
//! MAPBANK is not an instruction of its own: [`Instruction::map_bank`]
//! expands it into the REGLOAD that programs the task's MMAP register.

use crate::encoding::*;
use crate::error::Result;
use crate::mmap::MemoryMapEntry;
use crate::opcode::Opcode;
use crate::register::{RegisterClass, RegisterContext, RegisterId, RegisterIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// REGLOAD: dest = literal (overwrite, whole register, 32-bit literal source)
    RegLoad { dest: RegisterId, literal: u32 },

    /// COPYBANK: copy from bank `src` to bank `dst` starting at `offset`
    CopyBank { src: u8, dst: u8, offset: u16 },
}

impl Instruction {
    /// Build a COPYBANK from raw operand values
    pub fn copy_bank(src: u64, dst: u64, offset: u64) -> Result<Self> {
        let src = check_operand("source bank", src, COPYBANK_SRC_BITS)?;
        let dst = check_operand("destination bank", dst, COPYBANK_DST_BITS)?;
        let offset = check_operand("offset", offset, COPYBANK_OFFSET_BITS)?;
        Ok(Instruction::CopyBank {
            src: src as u8,
            dst: dst as u8,
            offset: offset as u16,
        })
    }

    /// Expand MAPBANK into a REGLOAD of `T<task>MMAP<virtual_bank>`
    pub fn map_bank(task: u64, virtual_bank: u64, physical_bank: u64) -> Result<Self> {
        let context = RegisterContext::task(task)?;
        let virtual_bank = check_operand("virtual bank", virtual_bank, MAPBANK_VIRTUAL_BITS)?;
        let physical_bank = check_operand("physical bank", physical_bank, MAPBANK_PHYSICAL_BITS)?;

        // MMAP has eight slots; virtual banks past 7 have no register to land in
        let index = RegisterIndex::new(virtual_bank)?;
        let dest = RegisterId::new(context, RegisterClass::Mmap, index);
        let entry = MemoryMapEntry::present(physical_bank as u8);

        Ok(Instruction::RegLoad {
            dest,
            literal: entry.to_u32(),
        })
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::RegLoad { .. } => Opcode::RegLoad,
            Instruction::CopyBank { .. } => Opcode::CopyBank,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut packer = BitPacker::with_prefix(&[self.opcode().to_u8()]);
        match *self {
            Instruction::RegLoad { dest, literal } => {
                packer
                    .field("register", dest.value() as u64, REGLOAD_DEST_BITS)?
                    .field("write mode", WRITE_MODE_OVERWRITE, REGLOAD_WRITE_MODE_BITS)?
                    .field("extent", EXTENT_WHOLE, REGLOAD_EXTENT_BITS)?
                    .field("source mode", SOURCE_LITERAL32, REGLOAD_SOURCE_BITS)?
                    .field("literal", literal as u64, REGLOAD_LITERAL_BITS)?;
            }
            Instruction::CopyBank { src, dst, offset } => {
                packer
                    .field("source bank", src as u64, COPYBANK_SRC_BITS)?
                    .field("destination bank", dst as u64, COPYBANK_DST_BITS)?
                    .field("offset", offset as u64, COPYBANK_OFFSET_BITS)?;
            }
        }
        packer.finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::RegLoad { dest, literal } => {
                write!(f, "REGLOAD {}, {:#010x}", dest, literal)
            }
            Instruction::CopyBank { src, dst, offset } => {
                write!(f, "COPYBANK {} {} {}", src, dst, offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PegasusError;

    #[test]
    fn test_copybank_encoding() {
        let instr = Instruction::copy_bank(0, 1, 20).unwrap();
        assert_eq!(instr.encode().unwrap(), vec![0x03, 0x01, 0x00, 0x14]);
    }

    #[test]
    fn test_copybank_max_operands() {
        let instr = Instruction::copy_bank(15, 15, 0xFFFF).unwrap();
        assert_eq!(instr.encode().unwrap(), vec![0x03, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_copybank_out_of_range() {
        assert!(matches!(
            Instruction::copy_bank(16, 0, 0),
            Err(PegasusError::OperandRange { operand: "source bank", value: 16, bits: 4 })
        ));
        assert!(matches!(
            Instruction::copy_bank(0, 16, 0),
            Err(PegasusError::OperandRange { operand: "destination bank", .. })
        ));
        assert!(matches!(
            Instruction::copy_bank(0, 0, 0x1_0000),
            Err(PegasusError::OperandRange { operand: "offset", bits: 16, .. })
        ));
    }

    #[test]
    fn test_mapbank_expansion() {
        let instr = Instruction::map_bank(0, 0, 1).unwrap();
        assert_eq!(
            instr,
            Instruction::RegLoad {
                dest: RegisterId::from_u8(0x50),
                literal: 0x0000_0101,
            }
        );
        assert_eq!(
            instr.encode().unwrap(),
            vec![0x01, 0x50, 0x02, 0x00, 0x00, 0x01, 0x01]
        );
    }

    #[test]
    fn test_mapbank_targets_task_register() {
        // T3MMAP7 = 101 10 111
        let instr = Instruction::map_bank(3, 7, 0xFF).unwrap();
        let bytes = instr.encode().unwrap();
        assert_eq!(bytes[1], 0b1011_0111);
        assert_eq!(&bytes[3..], &[0x00, 0x00, 0x01, 0xFF]);
    }

    #[test]
    fn test_mapbank_invalid_task() {
        assert_eq!(Instruction::map_bank(4, 0, 1), Err(PegasusError::InvalidTask(4)));
    }

    #[test]
    fn test_mapbank_ranges() {
        assert!(matches!(
            Instruction::map_bank(0, 16, 1),
            Err(PegasusError::OperandRange { operand: "virtual bank", .. })
        ));
        assert!(matches!(
            Instruction::map_bank(0, 0, 256),
            Err(PegasusError::OperandRange { operand: "physical bank", .. })
        ));
        assert!(matches!(
            Instruction::map_bank(0, 8, 1),
            Err(PegasusError::Encoding { field: "index", value: 8, bits: 3 })
        ));
    }

    #[test]
    fn test_encoded_len_follows_widths() {
        let copy = Instruction::copy_bank(1, 2, 3).unwrap().encode().unwrap();
        let copy_bits = COPYBANK_SRC_BITS + COPYBANK_DST_BITS + COPYBANK_OFFSET_BITS;
        assert_eq!(copy.len() as u32, 1 + copy_bits / 8);

        let load = Instruction::map_bank(1, 2, 3).unwrap().encode().unwrap();
        let load_bits = REGLOAD_DEST_BITS
            + REGLOAD_WRITE_MODE_BITS
            + REGLOAD_EXTENT_BITS
            + REGLOAD_SOURCE_BITS
            + REGLOAD_LITERAL_BITS;
        assert_eq!(load.len() as u32, 1 + load_bits / 8);
    }

    #[test]
    fn test_display() {
        let instr = Instruction::map_bank(0, 0, 1).unwrap();
        assert_eq!(instr.to_string(), "REGLOAD 0x50, 0x00000101");
    }
}
