//! # PQEK Programming Language
//!
//! A small typed scripting language with Spanish keywords:
//!
//! ```text
//! x Real;
//! x = Captura.Real();
//! y Real;
//! y = x * 2;
//! Mensaje.Texto("listo");
//! ```
//!
//! ## Architecture
//!
//! Source text flows through four stages:
//! - `lexer`: lazy tokenization; invalid characters are reported and skipped
//! - `parser`: builds the AST; the first syntax error aborts
//! - `semantic`: declaration and type checks, all defects reported together
//! - `runtime`: tree-walking interpreter talking to a `Console`
//!
//! `types` holds the type rules shared by the analyzer and the runtime and
//! `error` the error type and its rendering.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod semantic;
pub mod runtime;

use log::debug;

// Re-export commonly used types
pub use error::{Diagnostic, PqekError, PqekResult, SourceLocation};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{Parser, Program};
pub use runtime::{Console, Interpreter, Severity};
pub use semantic::{SemanticAnalyzer, SymbolTable};
pub use types::TypeInfo;

/// Version of the PQEK language
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pipeline options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Report lexical error lines one lower than the line they occur on
    pub zero_based_lexer_lines: bool,
}

/// Counts of the non-fatal problems of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub lexical_errors: usize,
    pub runtime_errors: usize,
}

impl Summary {
    pub fn is_clean(&self) -> bool {
        self.lexical_errors == 0 && self.runtime_errors == 0
    }
}

/// Lazily tokenize source text. Lexical errors collect in
/// [`Lexer::diagnostics`] as the tokens are pulled.
pub fn tokenize(source: &str, options: &Options) -> Lexer {
    Lexer::new(source).zero_based_error_lines(options.zero_based_lexer_lines)
}

/// Parse a token sequence into a program
pub fn parse<I>(tokens: I) -> PqekResult<Program>
where
    I: IntoIterator<Item = Token>,
{
    Parser::new(tokens).parse()
}

/// Check declarations and types, returning the populated symbol table
pub fn analyze(program: &Program) -> PqekResult<SymbolTable> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(program)?;
    Ok(analyzer.into_symbols())
}

/// Execute a semantically valid program, returning one error per failed statement
pub fn execute<C: Console>(program: &Program, console: C) -> Vec<PqekError> {
    let mut interpreter = Interpreter::new(console);
    interpreter.interpret(program);
    interpreter.failures().to_vec()
}

/// Tokenize and parse `source`. Lexical errors are written to the console
/// (and their lines marked) before the parse result is returned.
pub fn parse_source<C>(source: &str, options: &Options, console: &mut C) -> PqekResult<(Program, Summary)>
where
    C: Console + ?Sized,
{
    let mut lexer = tokenize(source, options);
    let parsed = parse(&mut lexer);

    let lexical = lexer.take_diagnostics();
    debug!("lexing finished with {} error(s)", lexical.len());
    for error in &lexical {
        console.write(&error.to_string(), Severity::Error);
        if let Some(location) = error.location() {
            console.mark_error_line(location.line);
        }
    }

    let program = parsed?;
    console.write("Syntax OK", Severity::Success);

    let summary = Summary {
        lexical_errors: lexical.len(),
        ..Summary::default()
    };
    Ok((program, summary))
}

/// Parse and semantically check `source` without running it
pub fn check<C>(source: &str, options: &Options, console: &mut C) -> PqekResult<(Program, Summary)>
where
    C: Console + ?Sized,
{
    let (program, summary) = parse_source(source, options, console)?;
    analyze(&program)?;
    console.write("Semantic analysis completed", Severity::Success);
    Ok((program, summary))
}

/// Compile and run a PQEK program from source code
///
/// This is the main entry point for executing PQEK programs. Parse and
/// semantic failures stop the pipeline before anything runs; lexical and
/// runtime errors are reported through the console and counted in the
/// returned summary.
pub fn run<C>(source: &str, options: &Options, console: &mut C) -> PqekResult<Summary>
where
    C: Console + ?Sized,
{
    let (program, mut summary) = check(source, options, console)?;

    console.write("Running program...", Severity::Info);
    let failures = execute(&program, &mut *console);
    summary.runtime_errors = failures.len();

    if failures.is_empty() {
        console.write("Execution finished", Severity::Success);
    } else {
        console.write(
            &format!("Execution finished with {} error(s)", failures.len()),
            Severity::Error,
        );
    }

    Ok(summary)
}
