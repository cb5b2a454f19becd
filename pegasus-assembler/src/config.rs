//! Assembler configuration

/// Options controlling how source text is matched and how listings are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Match mnemonics and register names exactly instead of case-insensitively
    pub case_sensitive: bool,
    /// Print listing bytes as upper-case hex
    pub uppercase_hex: bool,
}

impl Config {
    /// Case-insensitive matching, lower-case hex
    pub const DEFAULT: Self = Self {
        case_sensitive: false,
        uppercase_hex: false,
    };

    pub const fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    pub const fn uppercase_hex(mut self, enabled: bool) -> Self {
        self.uppercase_hex = enabled;
        self
    }

    /// Normalize a mnemonic or register name into table-key form
    pub fn key(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_uppercase()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
