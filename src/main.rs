//! File Renamer CLI - Renames files to portable, title-cased names.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use file_renamer::config::Config;
use file_renamer::renamer::{self, Options};
use file_renamer::{Lexicon, normalize, report};
use log::LevelFilter;

/// Renames files to NTFS-safe, title-cased names using look-alike Unicode
/// punctuation.
#[derive(Parser, Debug)]
#[command(name = "file-renamer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory whose files are renamed.
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    directory: PathBuf,

    /// Show the proposed renames without performing them.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Rename without asking for confirmation.
    #[arg(short, long)]
    yes: bool,

    /// Descend into subdirectories.
    #[arg(short, long)]
    recursive: bool,

    /// Settings file to use instead of searching for one.
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Ignore settings files.
    #[arg(long, conflicts_with = "settings")]
    no_config: bool,

    /// Disable highlighting of changed characters.
    #[arg(long)]
    no_color: bool,

    /// Print more diagnostics (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Normalize a single name, print it, and exit.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let lexicon = match config.lexicon() {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(name) = &args.name {
        return match normalize(name, &lexicon) {
            Ok(normalized) => {
                println!("{}", normalized);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error normalizing {:?}: {}", name, e);
                ExitCode::FAILURE
            }
        };
    }

    run(&args, &config, &lexicon)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn load_config(args: &Args) -> Result<Config, file_renamer::config::ConfigError> {
    if args.no_config {
        return Ok(Config::default());
    }
    if let Some(path) = &args.settings {
        return Config::from_file(path);
    }
    Ok(Config::discover(&args.directory)?
        .map(|(_, config)| config)
        .unwrap_or_default())
}

fn run(args: &Args, config: &Config, lexicon: &Lexicon) -> ExitCode {
    let exclude = match config.exclude_patterns() {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let options = Options {
        recursive: args.recursive || config.recursive,
        exclude,
    };

    let plan = match renamer::plan(&args.directory, lexicon, &options) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let color = !args.no_color && io::stdout().is_terminal();
    print!("{}", report::render(&plan, &args.directory, color));
    let summary = plan.summary();
    println!("{}", report::summary_line(&summary));

    if args.dry_run || plan.is_empty() {
        return exit_code(summary.failures == 0);
    }
    if !args.yes && !confirm() {
        println!("Nothing renamed.");
        return ExitCode::SUCCESS;
    }

    let mut all_renamed = summary.failures == 0;
    for result in renamer::apply(&plan) {
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            all_renamed = false;
        }
    }
    exit_code(all_renamed)
}

fn confirm() -> bool {
    print!("Rename these files? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
