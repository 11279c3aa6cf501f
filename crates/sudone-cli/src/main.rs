//! `sudone`: batch Sudoku solver over `.sud` files.
//!
//! Reads a puzzle from a file or stdin, solves it, and writes the solved
//! grid in the same binary format to a file or stdout.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sudone_core::{sud, Grid, SearchGrid, Solver, Unsolvable};

const EXIT_INVALID_ARG: i32 = 1;
const EXIT_INVALID_DATA: i32 = 2;
const EXIT_UNSOLVABLE: i32 = 3;

/// Hybrid constraint-propagation and backtracking Sudoku solver.
#[derive(Parser, Debug)]
#[command(name = "sudone", version, about)]
struct Cli {
    /// Input .sud file; "-" or absent reads stdin.
    input: Option<PathBuf>,

    /// Block side length; the grid side is its square.
    #[arg(
        short = 'n',
        long = "block-size",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(2..=11)
    )]
    block_size: u8,

    /// Output .sud file; absent writes stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also render the solved grid as text on stderr.
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_INVALID_ARG } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("sudone: {err:#}");
        process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<sud::ReadError>().is_some() {
        EXIT_INVALID_DATA
    } else if err.downcast_ref::<Unsolvable>().is_some() {
        EXIT_UNSOLVABLE
    } else {
        // Unopenable paths and other I/O failures are argument problems.
        EXIT_INVALID_ARG
    }
}

fn run(cli: &Cli) -> Result<()> {
    let grid = read_input(cli)?;
    info!("loaded {0}x{0} grid", grid.side());

    let started = Instant::now();
    let solved = Solver::new().solve(grid)?;
    info!("solved in {:?}", started.elapsed());

    if cli.pretty {
        eprint!("{solved}");
    }
    write_output(cli, &solved)
}

fn read_input(cli: &Cli) -> Result<Grid> {
    let n = usize::from(cli.block_size);
    let grid = match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            sud::read(&mut BufReader::new(file), n)
        }
        _ => sud::read(&mut io::stdin().lock(), n),
    }?;
    Ok(grid)
}

fn write_output(cli: &Cli, solved: &SearchGrid) -> Result<()> {
    match &cli.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            sud::write(&mut writer, solved)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            sud::write(&mut writer, solved)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["sudone"]).unwrap();
        assert_eq!(cli.block_size, 3);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.pretty);
    }

    #[test]
    fn test_parse_full() {
        let cli =
            Cli::try_parse_from(["sudone", "-n", "2", "-o", "out.sud", "--pretty", "in.sud"])
                .unwrap();
        assert_eq!(cli.block_size, 2);
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("in.sud")));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("out.sud")));
        assert!(cli.pretty);
    }

    #[test]
    fn test_parse_rejects_bad_block_size() {
        assert!(Cli::try_parse_from(["sudone", "-n", "1"]).is_err());
        assert!(Cli::try_parse_from(["sudone", "-n", "12"]).is_err());
    }
}
