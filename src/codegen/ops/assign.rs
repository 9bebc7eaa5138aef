//! Assignment emission (`=` and compound `op=`)

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::{AssignOp, Expr, SourceLocation};

impl Generator {
    /// Store the right-hand value into `target`, leaving it in `w0`.
    pub(crate) fn emit_assignment(
        &mut self,
        target: &str,
        op: AssignOp,
        value: &Expr,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        let slot = self.symbols.get_stack_pos(target, location)?;

        match op {
            AssignOp::Assign => self.emit_expr(value)?,
            AssignOp::Compound(binary) => {
                self.asm.load_slot(slot.data_type, slot.offset);
                self.asm.push_x0();
                self.emit_expr(value)?;
                self.asm.pop_x1();
                self.emit_combine(binary, location)?;
            }
        }

        self.asm.store_slot(slot.data_type, slot.offset, "w0");
        Ok(())
    }
}
