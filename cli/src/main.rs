use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use sdf_compiler::{
    compile_file, write_script, CompilerConfig, Confirm, FixedAnswer, ScriptError,
};

#[derive(Parser)]
#[command(name = "sdfc")]
#[command(about = "Compile tabular event data into a binary .sdf script", long_about = None)]
struct Cli {
    /// Input `.csv` or `.json` file
    in_file: PathBuf,

    /// Output `.sdf` file (defaults to the input name with an `.sdf` extension)
    out_file: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    yes: bool,
}

/// Asks on stdout and blocks on a stdin line. Anything other than an
/// explicit yes declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
    }
}

fn resolve_out_path(in_file: &Path, out_file: Option<PathBuf>) -> PathBuf {
    match out_file {
        Some(path) if path.extension().is_none() => path.with_extension("sdf"),
        Some(path) => path,
        None => in_file.with_extension("sdf"),
    }
}

fn run(cli: Cli) -> Result<(), ScriptError> {
    let config = CompilerConfig::default();

    println!("Parsing data file '{}'...", cli.in_file.display());
    let (commands, bin) = compile_file(&cli.in_file, &config)?;
    println!("{} rows read.", commands.len());
    debug!(rows = commands.len(), bytes = bin.len(), "compiled script");

    let out_path = resolve_out_path(&cli.in_file, cli.out_file);
    let confirm: &dyn Confirm = if cli.yes {
        &FixedAnswer(true)
    } else {
        &StdinConfirm
    };
    let written = write_script(&out_path, &bin, confirm)?;

    println!("Wrote data file '{}'", out_path.display());
    println!("{} total commands.", commands.len());
    println!("Size: {} bytes.", written);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
