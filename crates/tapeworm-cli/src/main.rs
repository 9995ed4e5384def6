use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use tapeworm_vm::{Compiler, OperationRegistry, Program, VmConfig, DEFAULT_TAPE_LEN, VM};
use tracing::Level;

mod extensions;

/// Tapeworm - tape language interpreter
#[derive(Parser)]
#[command(name = "tapeworm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for a tape-based esoteric language with pluggable instructions")]
struct Cli {
    /// Source file to run
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Show the compiled program before running it
    #[arg(long, global = true)]
    debug_bytecode: bool,

    /// Number of cells on the tape
    #[arg(long, global = true, default_value_t = DEFAULT_TAPE_LEN)]
    tape_len: usize,

    /// Stop after this many instructions
    #[arg(long, global = true, value_name = "N")]
    max_steps: Option<u64>,

    /// Enable the `*` instruction (square the current cell)
    #[arg(long, global = true)]
    square: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a source file
    Run {
        /// Path to the source file
        file: String,
    },
    /// Run source code given on the command line
    Eval {
        /// Program text
        code: String,
    },
    /// Compile without executing
    Check {
        /// File to check
        file: String,
    },
    /// Show the compiled program
    Disassemble {
        /// File to disassemble
        file: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = dispatch(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: &Cli) -> Result<()> {
    let registry = build_registry(cli)?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Run { file }) => run_source(cli, &registry, &read_source(file)?, &mut stdout),
        Some(Commands::Eval { code }) => run_source(cli, &registry, code.as_bytes(), &mut stdout),
        Some(Commands::Check { file }) => {
            check_command(&registry, file, &read_source(file)?, &mut stdout)
        }
        Some(Commands::Disassemble { file, json }) => {
            disassemble_command(&registry, file, &read_source(file)?, *json, &mut stdout)
        }
        None => match &cli.input {
            Some(file) => run_source(cli, &registry, &read_source(file)?, &mut stdout),
            None => {
                eprintln!("Error: No input file.");
                eprintln!();
                eprintln!("Usage: tapeworm <COMMAND> or tapeworm <FILE>");
                eprintln!();
                eprintln!("Try 'tapeworm --help' for more information.");
                std::process::exit(1);
            }
        },
    }
}

fn build_registry(cli: &Cli) -> Result<OperationRegistry> {
    let mut registry = OperationRegistry::new();
    extensions::install(&mut registry, cli.square).context("failed to register extensions")?;
    Ok(registry)
}

fn read_source(filename: &str) -> Result<Vec<u8>> {
    fs::read(filename).with_context(|| format!("failed to read '{}'", filename))
}

fn compile(registry: &OperationRegistry, source: &[u8]) -> Result<Program> {
    Compiler::new(registry)
        .compile_bytes(source)
        .context("compile error")
}

/// Compile and run `source`, writing the raw program output to `out`
fn run_source<W: Write>(
    cli: &Cli,
    registry: &OperationRegistry,
    source: &[u8],
    out: &mut W,
) -> Result<()> {
    let program = compile(registry, source)?;

    if cli.debug_bytecode {
        eprint!("{}", tapeworm_vm::disassemble(&program));
    }

    let config = VmConfig {
        tape_len: cli.tape_len,
        max_steps: cli.max_steps,
    };
    let output = VM::with_config(config)
        .execute(&program, registry)
        .context("runtime error")?;

    out.write_all(&output)?;
    out.flush()?;
    Ok(())
}

fn check_command<W: Write>(
    registry: &OperationRegistry,
    filename: &str,
    source: &[u8],
    out: &mut W,
) -> Result<()> {
    let program =
        compile(registry, source).with_context(|| format!("'{}' does not compile", filename))?;

    writeln!(out, "✓ Compilation OK")?;
    writeln!(out, "  Instructions: {}", program.len())?;
    writeln!(out, "  Loops: {}", program.bracket_pairs())?;
    writeln!(out, "\nFile '{}' is ready to execute", filename)?;
    Ok(())
}

fn disassemble_command<W: Write>(
    registry: &OperationRegistry,
    filename: &str,
    source: &[u8],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let program = compile(registry, source)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &program)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Disassembly of '{}':", filename)?;
        writeln!(out)?;
        write!(out, "{}", tapeworm_vm::disassemble(&program))?;
    }
    Ok(())
}
