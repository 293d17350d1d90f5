//! Diagnostic formatting for better error messages
//!
//! This module formats errors with color, the file name and the source
//! lines around the reported location.

use super::{PqekError, SourceLocation};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic<'a> {
    error: &'a PqekError,
    source: Option<&'a str>,
    filename: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Create a new diagnostic from an error
    pub fn new(error: &'a PqekError) -> Self {
        Self {
            error,
            source: None,
            filename: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: &'a PqekError, source: &'a str) -> Self {
        Self {
            error,
            source: Some(source),
            filename: None,
        }
    }

    /// Attach the name of the file the source came from
    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let members = self.error.errors();
        let mut output = String::new();

        if let PqekError::SemanticErrors(_) = self.error {
            output.push_str(&format!(
                "{}: {} problem(s) found\n",
                self.error.kind().red().bold(),
                members.len()
            ));
        }
        for error in members {
            output.push_str(&self.format_single(error));
        }
        output
    }

    fn format_single(&self, error: &PqekError) -> String {
        let mut output = String::new();

        // Error header
        let kind = error.kind().red().bold();
        output.push_str(&format!("{}: ", kind));
        output.push_str(&error.message());
        output.push('\n');

        // Location and source context
        if let Some(location) = error.location() {
            let place = match self.filename {
                Some(filename) => format!("{}:{}", filename, location),
                None => location.to_string(),
            };
            output.push_str(&format!("  {} {}\n", "-->".blue().bold(), place));

            if let Some(source) = self.source {
                output.push_str(&Self::format_source_context(source, location));
            }
        }

        output
    }

    /// Format source code context around the error location
    fn format_source_context(source: &str, location: &SourceLocation) -> String {
        let mut output = String::new();
        let lines: Vec<&str> = source.lines().collect();

        if location.line == 0 || location.line > lines.len() {
            return output;
        }

        let line_idx = location.line - 1;
        let line_num_width = (location.line + 1).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = line_num_width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", location.line, width = line_num_width)
                .blue()
                .bold(),
            lines[line_idx]
        ));

        let indicator_padding = " ".repeat(line_num_width + 2 + location.column.saturating_sub(1) + 1);
        output.push_str(&format!("{}{}\n", indicator_padding, "^".red().bold()));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = line_num_width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
