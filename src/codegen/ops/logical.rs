//! Logical `&&` / `||` emission
//!
//! Both forms produce a 0/1 result through two compare+branch pairs and a
//! pair of fresh labels. By default both operands are evaluated before any
//! branch is taken, so side effects on the right always happen. With
//! `short_circuit` enabled the right operand is skipped once the left one
//! decides the result.

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::{BinaryOp, Expr};

impl Generator {
    pub(crate) fn emit_logical_op(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodegenError> {
        // `&&` exits early on a zero operand, `||` on a non-zero one
        let (kind, branch, early, fallthrough) = match op {
            BinaryOp::Or => ("true", "b.ne", 1, 0),
            _ => ("false", "b.eq", 0, 1),
        };
        let early_label = self.labels.fresh(kind);
        let end_label = self.labels.fresh("end");

        if self.short_circuit {
            self.emit_expr(left)?;
            self.asm.instr("cmp w0, #0");
            self.asm.instr(format_args!("{branch} {early_label}"));
            self.emit_expr(right)?;
        } else {
            self.emit_expr(left)?;
            self.asm.push_x0();
            self.emit_expr(right)?;
            self.asm.pop_x1();
            self.asm.instr("cmp w1, #0");
            self.asm.instr(format_args!("{branch} {early_label}"));
        }
        self.asm.instr("cmp w0, #0");
        self.asm.instr(format_args!("{branch} {early_label}"));

        self.asm.instr(format_args!("mov w0, #{fallthrough}"));
        self.asm.instr(format_args!("b {end_label}"));
        self.asm.label(&early_label);
        self.asm.instr(format_args!("mov w0, #{early}"));
        self.asm.label(&end_label);

        Ok(())
    }
}
