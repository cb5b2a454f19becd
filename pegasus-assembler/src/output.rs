//! Assembled output: per-line bytes plus a hex listing

use std::fmt;

/// Bytes produced by one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// 1-based source line number
    pub line: usize,
    pub text: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    entries: Vec<ListingEntry>,
    uppercase_hex: bool,
}

impl Listing {
    pub fn new(uppercase_hex: bool) -> Self {
        Self {
            entries: Vec::new(),
            uppercase_hex,
        }
    }

    pub fn push(&mut self, entry: ListingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// The output image: every entry's bytes in source order
    pub fn bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|e| e.bytes.iter().copied()).collect()
    }

    /// Image size in bytes
    pub fn size(&self) -> usize {
        self.entries.iter().map(|e| e.bytes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "\"{}\"  =>  0x{}",
                entry.text,
                to_hex(&entry.bytes, self.uppercase_hex)
            )?;
        }
        Ok(())
    }
}

/// Contiguous hex digits for `bytes`
pub fn to_hex(bytes: &[u8], uppercase: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        if uppercase {
            out.push_str(&format!("{byte:02X}"));
        } else {
            out.push_str(&format!("{byte:02x}"));
        }
    }
    out
}
