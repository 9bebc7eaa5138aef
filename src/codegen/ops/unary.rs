//! Unary operator emission

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::*;

impl Generator {
    pub(crate) fn emit_unary_op(
        &mut self,
        op: UnaryOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        use UnaryOp::*;

        match op {
            Neg => {
                self.emit_expr(operand)?;
                self.asm.instr("neg w0, w0");
            }
            BitNot => {
                self.emit_expr(operand)?;
                self.asm.instr("mvn w0, w0");
            }
            Not => {
                self.emit_expr(operand)?;
                self.asm.instr("cmp w0, #0");
                self.asm.instr("cset w0, eq");
            }
            PreInc | PreDec | PostInc | PostDec => {
                self.emit_inc_dec(op, operand, location)?;
            }
        }

        Ok(())
    }

    /// Load, adjust by one and store back. Prefix forms leave the new value
    /// in `w0`, postfix forms the old one.
    fn emit_inc_dec(
        &mut self,
        op: UnaryOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        let Expr::Identifier(name, name_location) = operand else {
            return Err(CodegenError::InvalidIncrementOperand {
                op: op.symbol().to_string(),
                location,
            });
        };

        let slot = self.symbols.get_stack_pos(name, *name_location)?;
        let mnemonic = match op {
            UnaryOp::PreInc | UnaryOp::PostInc => "add",
            _ => "sub",
        };

        self.asm.load_slot(slot.data_type, slot.offset);
        match op {
            UnaryOp::PreInc | UnaryOp::PreDec => {
                self.asm.instr(format_args!("{mnemonic} w0, w0, #1"));
                self.asm.store_slot(slot.data_type, slot.offset, "w0");
            }
            _ => {
                self.asm.instr(format_args!("{mnemonic} w1, w0, #1"));
                self.asm.store_slot(slot.data_type, slot.offset, "w1");
            }
        }

        Ok(())
    }
}
