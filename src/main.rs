//! PQEK Language CLI
//!
//! Command-line interface for the PQEK programming language.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser as CliParser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;

use pqek::runtime::TerminalConsole;
use pqek::{Diagnostic, Options, PqekError, PqekResult, Summary};

/// Pipeline stage to stop after
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Print the token stream and lexical errors
    Tokens,
    /// Check the syntax
    Parse,
    /// Check syntax, declarations and types
    Check,
    /// Check and execute the program
    Run,
}

#[derive(Debug, CliParser)]
#[command(name = "pqek", version, about = "PQEK language interpreter")]
struct Cli {
    /// The script file to process
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Stop after this stage
    #[arg(short, long, value_enum, default_value_t = Stage::Run)]
    stage: Stage,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Report lexical error lines zero-based (legacy numbering)
    #[arg(long)]
    zero_based_lexer_lines: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG also applies
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filename = cli.file.display().to_string();
    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    let options = Options {
        zero_based_lexer_lines: cli.zero_based_lexer_lines,
    };

    let result = match cli.stage {
        Stage::Tokens => Ok(show_tokens(&source, &options, &filename)),
        Stage::Parse => pqek::parse_source(&source, &options, &mut TerminalConsole::new()).map(|(_, s)| s),
        Stage::Check => pqek::check(&source, &options, &mut TerminalConsole::new()).map(|(_, s)| s),
        Stage::Run => pqek::run(&source, &options, &mut TerminalConsole::new()),
    };

    process::exit(report(result, &source, &filename));
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Print every token, then the lexical errors
fn show_tokens(source: &str, options: &Options, filename: &str) -> Summary {
    let mut lexer = pqek::tokenize(source, options);
    let mut count = 0;

    for token in lexer.by_ref() {
        println!("{}", token);
        count += 1;
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", count);

    let diagnostics = lexer.take_diagnostics();
    for error in &diagnostics {
        eprint!("{}", Diagnostic::with_source(error, source).filename(filename));
    }
    if diagnostics.is_empty() {
        println!("{}", "Lexical analysis OK".green());
    }

    Summary {
        lexical_errors: diagnostics.len(),
        ..Summary::default()
    }
}

/// Render the outcome and pick the exit code
fn report(result: PqekResult<Summary>, source: &str, filename: &str) -> i32 {
    match result {
        Ok(summary) if summary.is_clean() => 0,
        Ok(_) => 1,
        Err(error) => {
            print_error(&error, source, filename);
            1
        }
    }
}

fn print_error(error: &PqekError, source: &str, filename: &str) {
    eprint!("{}", Diagnostic::with_source(error, source).filename(filename));
}
