//! # Introduction
//!
//! arm64cc compiles a small subset of C into ARM64 assembly text in a single
//! pass per stage. The output targets the Apple/Mach-O flavour of the ABI
//! (`_`-prefixed symbols, `.cfi` directives) and is meant to be fed to an
//! external assembler and linker.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Generator → Assembly
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`codegen`]: walks the AST and emits assembly, allocating stack slots
//!    for locals through a per-function [`codegen::symbols::SymbolTable`].
//! 3. [`diagnostics`]: the [`CompileError`] raised by whichever stage fails
//!    first, with source-excerpt rendering.
//! 4. [`config`]: [`Options`] and command-line parsing for the binary.
//!
//! ## Supported C subset
//!
//! Types: `int`, `char`, `void`.
//! Top level: `type name(void) { ... }` functions and `type name = expr;` globals.
//! Statements: `return`, initialized local declarations, expression statements.
//! Expressions: 14 precedence levels from postfix `++`/`--` to (compound)
//! assignment, including ternaries and logical operators.
//!
//! ```
//! let asm = arm64cc::compile("int main(void) { return 2 + 3 * 4; }", &Default::default()).unwrap();
//! assert!(asm.starts_with(".globl _main\n"));
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod parser;

pub use config::Options;
pub use diagnostics::CompileError;

use codegen::engine::Generator;

/// Compile C `source` to ARM64 assembly text.
///
/// Fails with the first lexical, syntax or semantic error; no partial output
/// is ever returned.
pub fn compile(source: &str, options: &Options) -> Result<String, CompileError> {
    let program = parser::parse_source(source)?;
    let asm = Generator::new(options).generate(&program)?;
    Ok(asm)
}
