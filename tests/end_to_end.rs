//! End-to-end tests for the Pegasus toolchain
//!
//! These tests verify the complete workflow:
//! 1. Build the assembler (register namespace + opcode table)
//! 2. Assemble source into a byte image
//! 3. Check the image against the instruction layouts from `pegasus-spec`

use pegasus_assembler::{assemble, Assembler, AssemblerError};
use pegasus_spec::{Instruction, MemoryMapEntry, Opcode, RegisterClass, RegisterContext};

// ============================================================================
// Reference Programs
// ============================================================================

#[test]
fn test_reference_lines() {
    let asm = Assembler::new().expect("Assembler init failed");
    let listing = asm
        .assemble("COPYBANK 0 1 20\nMAPBANK  0 0 1\n")
        .expect("Assembly failed");

    let entries = listing.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].bytes, vec![0x03, 0x01, 0x00, 0x14]);
    assert_eq!(entries[1].bytes, vec![0x01, 0x50, 0x02, 0x00, 0x00, 0x01, 0x01]);
}

#[test]
fn test_boot_sequence_maps_every_task() {
    // Give each task its own physical bank in virtual slot 0, then seed bank 1 from bank 0
    let source = r#"
        MAPBANK 0 0 0x10
        MAPBANK 1 0 0x11
        MAPBANK 2 0 0x12
        MAPBANK 3 0 0x13
        COPYBANK 0 1 0
    "#;

    let image = assemble(source).expect("Assembly failed");
    assert_eq!(image.len(), 4 * 7 + 4);

    let asm = Assembler::new().unwrap();
    for (task, chunk) in image[..28].chunks(7).enumerate() {
        assert_eq!(chunk[0], Opcode::RegLoad.to_u8());

        let dest = asm
            .registers()
            .name_of(pegasus_spec::RegisterId::from_u8(chunk[1]))
            .unwrap();
        assert_eq!(dest, format!("T{task}MMAP0"));

        let entry = MemoryMapEntry::from_u32(u32::from_be_bytes([chunk[3], chunk[4], chunk[5], chunk[6]]))
            .unwrap();
        assert!(entry.is_present());
        assert_eq!(entry.physical_bank() as usize, 0x10 + task);
    }
    assert_eq!(&image[28..], &[0x03, 0x01, 0x00, 0x00]);
}

// ============================================================================
// Cross-Crate Consistency
// ============================================================================

#[test]
fn test_assembler_matches_spec_encoder() {
    let asm = Assembler::new().unwrap();
    for (task, virt, phys) in [(0, 0, 1), (1, 3, 0x80), (2, 7, 0xFF), (3, 5, 0)] {
        let from_line = asm
            .assemble_line(&format!("MAPBANK {task} {virt} {phys}"))
            .unwrap();
        let from_spec = Instruction::map_bank(task, virt, phys).unwrap().encode().unwrap();
        assert_eq!(from_line, from_spec);
    }
}

#[test]
fn test_mapbank_destination_decodes() {
    let bytes = Assembler::new().unwrap().assemble_line("MAPBANK 2 6 9").unwrap();
    let (context, class, index) = pegasus_spec::RegisterId::from_u8(bytes[1]).decode().unwrap();
    assert_eq!(context, RegisterContext::Task2);
    assert_eq!(class, RegisterClass::Mmap);
    assert_eq!(index.value(), 6);
}

// ============================================================================
// Failure Is All-Or-Nothing
// ============================================================================

#[test]
fn test_bad_line_aborts_image() {
    let source = r#"
        COPYBANK 0 1 20
        MAPBANK 0 0 1
        MAPBANK 5 0 1
    "#;
    let err = assemble(source).unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(matches!(err, AssemblerError::Line { .. }));
}
