//! The architectural register namespace
//!
//! Global context: `GSTATUS`, `EXCEPTION`, `SYSCALL`.
//! Each per-task context (no prefix for the current task, `T0`..`T3` for the
//! fixed slots): `STATUS`, `GPR0-7`, `MMAP0-7`, `IOMAP0-7`.

use crate::config::Config;
use crate::error::Result;
use crate::registry::{RegisterTable, RegisterTableBuilder};
use pegasus_spec::{RegisterClass, RegisterContext, RegisterId, RegisterIndex, REGISTER_WIDTH};

const GLOBALS: [(&str, RegisterClass); 3] = [
    ("GSTATUS", RegisterClass::Status),
    ("EXCEPTION", RegisterClass::Exception),
    ("SYSCALL", RegisterClass::Syscall),
];

/// Register every architectural register into `builder`
pub fn register_namespace(builder: &mut RegisterTableBuilder) -> Result<()> {
    for (name, class) in GLOBALS {
        let id = RegisterId::new(RegisterContext::Global, class, RegisterIndex::ZERO);
        builder.register(name, id, REGISTER_WIDTH)?;
    }

    for context in RegisterContext::PER_TASK {
        let prefix = context.prefix();
        let status = RegisterId::new(context, RegisterClass::Status, RegisterIndex::ZERO);
        builder.register(&format!("{prefix}STATUS"), status, REGISTER_WIDTH)?;

        for class in RegisterClass::INDEXED {
            for index in RegisterIndex::all() {
                let name = format!("{prefix}{}{index}", class.short_name());
                builder.register(&name, RegisterId::new(context, class, index), REGISTER_WIDTH)?;
            }
        }
    }

    tracing::debug!(registers = builder.len(), "register namespace built");
    Ok(())
}

/// Build the finished, read-only register table
pub fn build_register_table(config: Config) -> Result<RegisterTable> {
    let mut builder = RegisterTableBuilder::new(config);
    register_namespace(&mut builder)?;
    Ok(builder.build())
}
