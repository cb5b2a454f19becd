//! Pegasus Assembler
//!
//! Assemble Pegasus assembly language into a raw byte image.
//!
//! ## Example
//!
//! ```rust
//! use pegasus_assembler::Assembler;
//!
//! let asm = Assembler::new().unwrap();
//! assert_eq!(asm.assemble_line("COPYBANK 0 1 20").unwrap(), [0x03, 0x01, 0x00, 0x14]);
//!
//! let listing = asm.assemble("MAPBANK 0 0 1 ; attach bank 1 to task 0").unwrap();
//! assert_eq!(listing.size(), 7);
//! ```

pub mod assembler;
pub mod config;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod namespace;
pub mod opcode_table;
pub mod output;
pub mod parser;
pub mod registry;

pub use assembler::{assemble, Assembler};
pub use config::Config;
pub use encoder::{encode_copybank, encode_mapbank};
pub use error::{AssemblerError, Result};
pub use namespace::build_register_table;
pub use opcode_table::{OpcodeTable, OperandSpec};
pub use output::{Listing, ListingEntry};
pub use parser::{parse_line, Operand, ParsedLine};
pub use registry::{RegisterInfo, RegisterTable, RegisterTableBuilder};
