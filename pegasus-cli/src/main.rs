//! `pegasm`: assemble Pegasus source into a raw image

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use pegasus_assembler::{Assembler, Config, Listing, RegisterTable};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pegasus assembler", long_about = None)]
struct Args {
    /// Source file, or `-` for stdin
    source: Option<PathBuf>,

    /// Write the raw image here
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print a per-line hex listing (default when no output file is given)
    #[arg(short, long, default_value_t = false)]
    listing: bool,

    /// Print the register namespace and exit
    #[arg(long, default_value_t = false)]
    registers: bool,

    /// Match mnemonics and register names case-sensitively
    #[arg(long, default_value_t = false)]
    case_sensitive: bool,

    /// Upper-case hex in listings
    #[arg(long, default_value_t = false)]
    uppercase: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        Config::DEFAULT
            .case_sensitive(self.case_sensitive)
            .uppercase_hex(self.uppercase)
    }
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn assemble_source(assembler: &Assembler, path: &Path) -> anyhow::Result<Listing> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(assembler.assemble(&buffer)?);
    }
    assembler
        .assemble_file(path)
        .with_context(|| format!("failed to assemble {}", path.display()))
}

fn format_registers(registers: &RegisterTable) -> String {
    let mut out = String::new();
    for info in registers.iter() {
        let fields = match info.id.decode() {
            Some((context, class, index)) => format!("{context:<8} {class:<9} {index}"),
            None => "?".to_string(),
        };
        out.push_str(&format!(
            "{:<10} {} {:>2}  {}\n",
            info.name, info.id, info.width, fields
        ));
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let assembler = Assembler::with_config(args.config())
        .context("failed to initialize assembler tables")?;
    let mut stdout = io::stdout().lock();

    if args.registers {
        stdout.write_all(format_registers(assembler.registers()).as_bytes())?;
        return Ok(());
    }

    let Some(source_path) = args.source.as_ref() else {
        bail!("no source file given (use `-` for stdin)");
    };
    let listing = assemble_source(&assembler, source_path)?;
    tracing::info!(size = listing.size(), "assembled {}", source_path.display());

    if let Some(output) = &args.output {
        fs::write(output, listing.bytes())
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    if args.listing || args.output.is_none() {
        write!(stdout, "{listing}")?;
    }
    Ok(())
}
