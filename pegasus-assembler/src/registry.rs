//! Named register table
//!
//! Registrations go through [`RegisterTableBuilder`], which rejects duplicate
//! names and duplicate IDs. [`RegisterTableBuilder::build`] freezes the result
//! into a read-only [`RegisterTable`].

use crate::config::Config;
use crate::error::{AssemblerError, Result};
use pegasus_spec::RegisterId;
use std::collections::HashMap;

/// One named register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInfo {
    pub name: String,
    pub id: RegisterId,
    pub width: u32,
}

#[derive(Debug, Default)]
pub struct RegisterTableBuilder {
    config: Config,
    entries: Vec<RegisterInfo>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<RegisterId, usize>,
}

impl RegisterTableBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn register(&mut self, name: &str, id: RegisterId, width: u32) -> Result<()> {
        let key = self.config.key(name);
        if self.by_name.contains_key(&key) {
            return Err(AssemblerError::DuplicateRegister(name.to_string()));
        }
        if let Some(&existing) = self.by_id.get(&id) {
            return Err(AssemblerError::DuplicateRegisterId {
                name: name.to_string(),
                id,
                existing: self.entries[existing].name.clone(),
            });
        }

        tracing::trace!(name, %id, width, "register");
        let slot = self.entries.len();
        self.entries.push(RegisterInfo {
            name: name.to_string(),
            id,
            width,
        });
        self.by_name.insert(key, slot);
        self.by_id.insert(id, slot);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> RegisterTable {
        RegisterTable {
            config: self.config,
            entries: self.entries,
            by_name: self.by_name,
            by_id: self.by_id,
        }
    }
}

/// Immutable name/ID lookup over every registered register, in registration order
#[derive(Debug, Clone)]
pub struct RegisterTable {
    config: Config,
    entries: Vec<RegisterInfo>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<RegisterId, usize>,
}

impl RegisterTable {
    pub fn lookup(&self, name: &str) -> Option<&RegisterInfo> {
        self.by_name
            .get(&self.config.key(name))
            .map(|&slot| &self.entries[slot])
    }

    pub fn by_id(&self, id: RegisterId) -> Option<&RegisterInfo> {
        self.by_id.get(&id).map(|&slot| &self.entries[slot])
    }

    pub fn name_of(&self, id: RegisterId) -> Option<&str> {
        self.by_id(id).map(|info| info.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisterInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut builder = RegisterTableBuilder::new(Config::DEFAULT);
        builder.register("GSTATUS", RegisterId::from_u8(0x00), 32).unwrap();
        builder.register("T0MMAP0", RegisterId::from_u8(0x50), 32).unwrap();
        let table = builder.build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("t0mmap0").unwrap().id, RegisterId::from_u8(0x50));
        assert_eq!(table.name_of(RegisterId::from_u8(0x00)), Some("GSTATUS"));
        assert!(table.lookup("T9MMAP0").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let mut builder = RegisterTableBuilder::new(Config::DEFAULT);
        builder.register("GPR0", RegisterId::from_u8(0x28), 32).unwrap();
        let err = builder.register("gpr0", RegisterId::from_u8(0x29), 32).unwrap_err();
        assert!(matches!(err, AssemblerError::DuplicateRegister(name) if name == "gpr0"));
    }

    #[test]
    fn test_duplicate_id() {
        let mut builder = RegisterTableBuilder::new(Config::DEFAULT);
        builder.register("GPR0", RegisterId::from_u8(0x28), 32).unwrap();
        let err = builder.register("ALIAS", RegisterId::from_u8(0x28), 32).unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::DuplicateRegisterId { ref existing, .. } if existing == "GPR0"
        ));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_case_sensitive_names() {
        let mut builder = RegisterTableBuilder::new(Config::DEFAULT.case_sensitive(true));
        builder.register("GPR0", RegisterId::from_u8(0x28), 32).unwrap();
        builder.register("gpr0", RegisterId::from_u8(0x29), 32).unwrap();
        let table = builder.build();
        assert_eq!(table.lookup("gpr0").unwrap().id, RegisterId::from_u8(0x29));
        assert!(table.lookup("Gpr0").is_none());
    }
}
