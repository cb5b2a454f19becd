//! Property-based tests using proptest.
//!
//! Checks assembler invariants over randomly generated lines and sources.

use pegasus_assembler::{assemble, Assembler};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Arbitrary ASCII text, including control characters.
fn arb_asm_input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('\0', '\x7f'), 0..256)
        .prop_map(|v| v.into_iter().collect())
}

/// One valid source line and the number of bytes it should produce.
fn valid_line() -> impl Strategy<Value = (String, usize)> {
    prop_oneof![
        (0u64..16, 0u64..16, any::<u16>())
            .prop_map(|(s, d, o)| (format!("COPYBANK {s} {d} {o:#x}"), 4)),
        (0u64..4, 0u64..8, any::<u8>())
            .prop_map(|(t, v, p)| (format!("MAPBANK {t}, {v}, {p}"), 7)),
        Just(("; comment only".to_string(), 0)),
        Just((String::new(), 0)),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn arbitrary_input_never_panics(input in arb_asm_input()) {
        let _ = assemble(&input);
    }

    #[test]
    fn copybank_layout(src in 0u64..16, dst in 0u64..16, offset in any::<u16>()) {
        let bytes = Assembler::new().unwrap()
            .assemble_line(&format!("COPYBANK {src} {dst} {offset}"))
            .unwrap();
        let [hi, lo] = offset.to_be_bytes();
        prop_assert_eq!(bytes, vec![0x03, ((src << 4) | dst) as u8, hi, lo]);
    }

    #[test]
    fn mapbank_layout(task in 0u64..4, virt in 0u64..8, phys in any::<u8>()) {
        let bytes = Assembler::new().unwrap()
            .assemble_line(&format!("MAPBANK {task} {virt} {phys}"))
            .unwrap();
        let dest = (((task + 2) << 5) | (0b10 << 3) | virt) as u8;
        prop_assert_eq!(bytes, vec![0x01, dest, 0x02, 0x00, 0x00, 0x01, phys]);
    }

    #[test]
    fn image_is_concatenation_of_lines(lines in prop::collection::vec(valid_line(), 0..32)) {
        let source: String = lines.iter().map(|(text, _)| format!("{text}\n")).collect();
        let expected: usize = lines.iter().map(|(_, len)| len).sum();
        prop_assert_eq!(assemble(&source).unwrap().len(), expected);
    }

    #[test]
    fn mnemonics_ignore_case(src in 0u64..16, dst in 0u64..16, offset in any::<u16>()) {
        let asm = Assembler::new().unwrap();
        let upper = asm.assemble_line(&format!("COPYBANK {src} {dst} {offset}")).unwrap();
        let lower = asm.assemble_line(&format!("copybank {src} {dst} {offset}")).unwrap();
        prop_assert_eq!(upper, lower);
    }
}
