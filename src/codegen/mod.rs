//! ARM64 code generator
//!
//! This module lowers a parsed [`Program`](crate::parser::ast::Program) to
//! assembly text:
//! - [`engine`]: [`Generator`](engine::Generator), declaration and function emission
//! - [`symbols`]: per-function stack-slot table
//! - [`emitter`]: output buffer, load/store helpers and label allocation
//! - [`errors`]: semantic error types
//!
//! # Frame Model
//!
//! Each function reserves all of its locals at entry with
//! `sub sp, sp, #N` (N a multiple of 16) and copies `sp` into `x12`. Frames
//! wider than a 12-bit immediate take a second `sub` for the low bits. Slots
//! are addressed relative to `x12`, so temporaries pushed during expression
//! evaluation never disturb variable offsets.
//!
//! Statement and expression lowering is split across `statements`,
//! `expressions` and the `ops` modules as `impl Generator` blocks.

pub mod emitter;
pub mod engine;
pub mod errors;
mod expressions;
mod ops;
mod statements;
pub mod symbols;
