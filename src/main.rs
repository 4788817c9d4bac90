#[cfg(target_os = "linux")]
use std::os::linux::fs::MetadataExt;

use std::{
    io::{self, Read},
    path::PathBuf,
};

use thiserror::Error;

use brainspin::{compile, execute, ExecutionError, ParseError, ROT13_PROGRAM};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parsing error: {0}")]
    ParserError(#[from] ParseError),
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutionError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Interpret the source directly
    Interpret,
    /// Translate up front, then run the compiled program
    Compile,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a Brainfuck source file (standard input if no file is given)
    Run {
        /// Input Brainfuck source file
        input_file: Option<PathBuf>,

        /// Select execution mode
        #[arg(short, long, value_name = "MODE", default_value = "interpret")]
        mode: Mode,
    },
    /// Run the bundled rot13 program over standard input
    Rot13 {
        /// Select execution mode
        #[arg(short, long, value_name = "MODE", default_value = "interpret")]
        mode: Mode,
    },
}

fn load_source(path: Option<PathBuf>) -> Result<Vec<u8>, ProgramError> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::open(path)?;

            #[cfg(target_os = "linux")]
            let mut buf = Vec::with_capacity(file.metadata()?.st_size() as usize);
            #[cfg(not(target_os = "linux"))]
            let mut buf = Vec::new();

            file.read_to_end(&mut buf)?;
            Ok(buf)
        }
        None => {
            // Program text comes from stdin; whatever follows it (nothing,
            // since we read to EOF) is the program's input, so every `,`
            // will see the EOF sentinel.
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run_source(source: &[u8], mode: Mode) -> Result<(), ProgramError> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match mode {
        Mode::Interpret => execute(source, &mut input, &mut output)?,
        Mode::Compile => compile(source)?.run(&mut input, &mut output)?,
    }
    Ok(())
}

fn main() -> Result<(), ProgramError> {
    let args = Args::parse();

    match args.command {
        Command::Run { input_file, mode } => {
            let source = load_source(input_file)?;
            run_source(&source, mode)
        }
        Command::Rot13 { mode } => run_source(ROT13_PROGRAM.as_bytes(), mode),
    }
}
