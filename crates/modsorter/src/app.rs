use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crate::config::RunConfig;
use crate::dump;
use crate::record;

/// Extracts and sorts the module records of a debug-symbol database.
///
/// Shells out to a symbol-dump utility (`<TOOL> dump --modules <PATH>`),
/// keeps the `Mod <index> <path>` records from its output, and prints them
/// to stdout sorted case-insensitively by path.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the debug-symbol database file.
    pub path: PathBuf,

    /// The symbol-dump executable to invoke.
    #[arg(long, value_name = "TOOL", default_value = "pdbtool")]
    pub tool: PathBuf,

    /// If enabled stderr diagnostics will be suppressed.
    #[arg(long, short)]
    pub quiet: bool,
}

fn execute() -> Result<()> {
    let cli = Cli::parse();
    RunConfig::configure(|cfg| {
        cfg.tool = cli.tool.clone();
        cfg.quiet = cli.quiet;
    });

    let config = RunConfig::get();
    let output = dump::dump_modules(&config.tool, &cli.path)
        .with_context(|| format!("failed to dump modules of {}", cli.path.display()))?;

    let mut records = record::filter_records(&output)?;
    record::sort_by_path(&mut records);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for record in &records {
        writeln!(stdout, "{record}")?;
    }

    log!(
        "Sorted {} module records",
        style(records.len()).yellow().bold()
    );

    Ok(())
}

pub fn main() -> ! {
    match execute() {
        Ok(()) => std::process::exit(0),
        Err(error) => {
            eprintln!("{}: {}", style("error").red().bold(), error);
            for cause in error.chain().skip(1) {
                eprintln!("{}", style(format!("  caused by {}", cause)).dim());
            }

            std::process::exit(1);
        }
    }
}
