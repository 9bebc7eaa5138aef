//! Binary operator emission
//!
//! The left operand is evaluated first and spilled to the stack, the right
//! operand lands in `w0`, the left is reloaded into `w1`, and the two are
//! combined into `w0`.

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::{BinaryOp, Expr, SourceLocation};

impl Generator {
    pub(crate) fn emit_binary_op(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            return self.emit_logical_op(op, left, right);
        }

        self.emit_expr(left)?;
        self.asm.push_x0();
        self.emit_expr(right)?;
        self.asm.pop_x1();

        self.emit_combine(op, location)
    }

    /// Combine `w1 <op> w0` into `w0`.
    pub(crate) fn emit_combine(&mut self, op: BinaryOp, location: SourceLocation) -> Result<(), CodegenError> {
        use BinaryOp::*;

        let mnemonic = match op {
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "sdiv",
            BitAnd => "and",
            BitOr => "orr",
            BitXor => "eor",
            Shl => "lsl",
            Shr => "asr",
            Mod => {
                // left - (left / right) * right
                self.asm.instr("sdiv w2, w1, w0");
                self.asm.instr("mul w2, w2, w0");
                self.asm.instr("sub w0, w1, w2");
                return Ok(());
            }
            Eq | Ne | Lt | Le | Gt | Ge => {
                self.asm.instr("cmp w1, w0");
                self.asm.instr(format_args!("cset w0, {}", condition_code(op)));
                return Ok(());
            }
            And | Or => {
                return Err(CodegenError::UnsupportedOperator {
                    op: op.symbol().to_string(),
                    location,
                })
            }
        };

        self.asm.instr(format_args!("{mnemonic} w0, w1, w0"));
        Ok(())
    }
}

/// Condition suffix for a signed comparison
fn condition_code(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "eq",
        BinaryOp::Ne => "ne",
        BinaryOp::Lt => "lt",
        BinaryOp::Le => "le",
        BinaryOp::Gt => "gt",
        _ => "ge",
    }
}
