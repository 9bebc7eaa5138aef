//! Compilation errors and their terminal rendering
//!
//! [`CompileError`] wraps the error of whichever stage failed first. The
//! binary renders it against the source text:
//!
//! ```text
//! error: Variable y is not defined on line 3
//!  --> prog.c:3:5
//!   |
//! 3 | x = y = 5;
//!   |     ^
//! ```

use crate::codegen::errors::CodegenError;
use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crossterm::style::Stylize;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// First error raised by any pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(err) => err.location,
            CompileError::Parse(err) => err.location,
            CompileError::Codegen(err) => err.location(),
        }
    }

    /// Headline without the stage prefix
    pub fn message(&self) -> String {
        match self {
            CompileError::Lex(err) => format!("{} on line {}", err.message, err.location.line),
            CompileError::Parse(err) => format!(
                "Syntax error on line {}, unexpected '{}': {}",
                err.location.line, err.found, err.message
            ),
            CompileError::Codegen(err) => err.to_string(),
        }
    }

    /// Render the error with a source excerpt. `color` adds ANSI styling.
    pub fn render(&self, path: &Path, source: &str, color: bool) -> String {
        let location = self.location();
        let line_text = source
            .lines()
            .nth(location.line.saturating_sub(1))
            .unwrap_or("");
        let gutter = " ".repeat(location.line.to_string().len());
        let caret = format!("{}^", " ".repeat(location.column.saturating_sub(1)));

        let (label, bar, caret) = if color {
            (
                "error".red().bold().to_string(),
                "|".blue().bold().to_string(),
                caret.red().bold().to_string(),
            )
        } else {
            ("error".to_string(), "|".to_string(), caret)
        };

        let mut out = String::new();
        let _ = writeln!(out, "{label}: {}", self.message());
        let _ = writeln!(out, "{gutter}--> {}:{}:{}", path.display(), location.line, location.column);
        let _ = writeln!(out, "{gutter} {bar}");
        let _ = writeln!(out, "{} {bar} {line_text}", location.line);
        let _ = writeln!(out, "{gutter} {bar} {caret}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use crate::config::Options;

    #[test]
    fn test_plain_rendering() {
        let source = "int main(void) {\n  int x = 0;\n  x = y = 5;\n  return x;\n}\n";
        let err = compile(source, &Options::default()).unwrap_err();
        let rendered = err.render(Path::new("prog.c"), source, false);
        assert_eq!(
            rendered,
            "error: Variable y is not defined on line 3\n \
             --> prog.c:3:7\n  \
             |\n\
             3 |   x = y = 5;\n  \
             |       ^\n"
        );
    }

    #[test]
    fn test_stage_messages() {
        let lex = compile("int main(void) { return $; }", &Options::default()).unwrap_err();
        assert!(matches!(lex, CompileError::Lex(_)));
        assert_eq!(lex.message(), "Unexpected character '$' on line 1");

        let parse = compile("int main(void) { return 1 }", &Options::default()).unwrap_err();
        assert!(matches!(parse, CompileError::Parse(_)));
        assert!(parse.message().starts_with("Syntax error on line 1, unexpected '}'"));
    }

    #[test]
    fn test_colored_rendering_has_escapes() {
        let err = compile("int main(void) { return z; }", &Options::default()).unwrap_err();
        let rendered = err.render(Path::new("a.c"), "int main(void) { return z; }", true);
        assert!(rendered.contains("Variable z is not defined"));
        // crossterm honours NO_COLOR even when asked to style
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(rendered.contains('\u{1b}'));
        }
    }
}
