//! C source code front end
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), extended by the `declarations`,
//!   `statements` and `expressions` modules
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! - Types: `int`, `char`, `void`
//! - Top level: function definitions taking `(void)` and initialized globals
//! - Statements: `return`, initialized local declarations, expression statements
//! - Expressions: the full arithmetic, bitwise, shift, relational, logical,
//!   ternary, increment/decrement and (compound) assignment operator set
//! - Character literals with C escapes; decimal integer constants
//! - No preprocessor, pointers, arrays, structs or control flow statements
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

use crate::parser::ast::Program;
use crate::parser::lexer::Lexer;
use crate::parser::parse::Parser;
use crate::CompileError;

/// Lex and parse `source` into a [`Program`].
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    tracing::debug!(tokens = tokens.len(), "lexed source");

    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(declarations = program.declarations.len(), "parsed program");

    Ok(program)
}
