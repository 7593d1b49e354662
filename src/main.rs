//! seqtable - inspect and convert columnar tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seqtable::io::{read_table, write_table};

/// Inspect and convert tabular data (CSV, JSON)
#[derive(Parser, Debug)]
#[command(name = "seqtable")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a table to the terminal
    Show {
        /// File to load
        file: PathBuf,

        /// Sort by a column before rendering
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Keep only the first N rows
        #[arg(long)]
        head: Option<usize>,

        /// Drop rows that contain missing values
        #[arg(long)]
        drop_nones: bool,
    },
    /// Read a table and write it out in another format
    Convert {
        /// File to read
        input: PathBuf,

        /// File to write; the extension picks the format
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Show {
            file,
            sort,
            desc,
            head,
            drop_nones,
        } => {
            let mut table = read_table(&file)
                .with_context(|| format!("failed to load: {}", file.display()))?;
            if drop_nones {
                table.drop_nones();
            }
            if let Some(column) = sort {
                table = table.sorted(&column, desc)?;
            }
            if let Some(n) = head {
                table = table.head(n);
            }
            let (cols, rows) = table.shape();
            println!("{table}");
            println!("{rows} rows x {cols} columns");
        }
        Command::Convert { input, output } => {
            let table = read_table(&input)
                .with_context(|| format!("failed to load: {}", input.display()))?;
            write_table(&output, &table)
                .with_context(|| format!("failed to write: {}", output.display()))?;
        }
    }

    Ok(())
}
