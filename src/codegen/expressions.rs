//! Expression emission
//!
//! Every expression leaves its value in `x0`/`w0`. Operator-specific lowering
//! lives in the `ops` submodules; this module dispatches on the node kind and
//! handles the leaves and the ternary.

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::*;

impl Generator {
    pub(crate) fn emit_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match expr {
            Expr::Constant(value, _) => {
                self.asm.load_immediate(*value);
                Ok(())
            }
            Expr::Identifier(name, location) => {
                let slot = self.symbols.get_stack_pos(name, *location)?;
                self.asm.load_slot(slot.data_type, slot.offset);
                Ok(())
            }
            Expr::Unary {
                op,
                operand,
                location,
            } => self.emit_unary_op(*op, operand, *location),
            Expr::Binary {
                op,
                left,
                right,
                location,
            } => self.emit_binary_op(*op, left, right, *location),
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => self.emit_ternary(condition, then_expr, else_expr),
            Expr::Assignment {
                target,
                op,
                value,
                location,
            } => self.emit_assignment(target, *op, value, *location),
        }
    }

    fn emit_ternary(
        &mut self,
        condition: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> Result<(), CodegenError> {
        let else_label = self.labels.fresh("else");
        let end_label = self.labels.fresh("end");

        self.emit_expr(condition)?;
        self.asm.instr("cmp w0, #0");
        self.asm.instr(format_args!("b.eq {else_label}"));

        self.emit_expr(then_expr)?;
        self.asm.instr(format_args!("b {end_label}"));

        self.asm.label(&else_label);
        self.emit_expr(else_expr)?;

        self.asm.label(&end_label);
        Ok(())
    }
}
