//! Statement emission
//!
//! All methods are `impl Generator` blocks operating on the shared output
//! buffer and the current function's symbol table.

use crate::codegen::engine::Generator;
use crate::codegen::errors::CodegenError;
use crate::parser::ast::*;

impl Generator {
    pub(crate) fn emit_statement(&mut self, stmt: &Statement) -> Result<(), CodegenError> {
        match stmt {
            Statement::Return { expr, .. } => {
                self.emit_expr(expr)?;
                self.emit_epilogue();
                Ok(())
            }
            Statement::VariableDecl(var) => self.emit_variable_decl(var),
            Statement::Expression { expr, .. } => self.emit_expr(expr),
        }
    }

    /// Evaluate the initializer, then bring the variable into scope and
    /// store into its slot.
    pub(crate) fn emit_variable_decl(&mut self, var: &VariableDecl) -> Result<(), CodegenError> {
        self.emit_expr(&var.init)?;

        self.symbols.activate(&var.name);
        let slot = self.symbols.get_stack_pos(&var.name, var.location)?;
        self.asm.store_slot(slot.data_type, slot.offset, "w0");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::errors::CodegenError;
    use crate::compile;
    use crate::config::Options;
    use crate::CompileError;

    fn codegen_err(source: &str) -> CodegenError {
        match compile(source, &Options::default()) {
            Err(CompileError::Codegen(err)) => err,
            other => panic!("expected codegen error, got {other:?}"),
        }
    }

    #[test]
    fn test_use_before_declaration() {
        let err = codegen_err("int main(void) {\n int a = b;\n int b = 1;\n return a; }");
        assert_eq!(
            err,
            CodegenError::UndefinedVariable {
                name: "b".to_string(),
                location: crate::parser::ast::SourceLocation::new(2, 10),
            }
        );
    }

    #[test]
    fn test_self_reference_in_initializer() {
        assert!(matches!(
            codegen_err("int main(void) { int a = a; return a; }"),
            CodegenError::UndefinedVariable { .. }
        ));
    }

    #[test]
    fn test_slots_follow_declaration_order() {
        let asm = compile(
            "int main(void) { int a = 1; char c = 'x'; int b = 2; return a; }",
            &Options::default(),
        )
        .unwrap();
        // b is most recent (offset 0), c next (8), a oldest (16)
        assert!(asm.contains("mov x0, #1\n    str w0, [x12, #16]\n"));
        assert!(asm.contains("mov x0, #120\n    strb w0, [x12, #8]\n"));
        assert!(asm.contains("mov x0, #2\n    str w0, [x12, #0]\n"));
        assert!(asm.contains("ldr w0, [x12, #16]\n    add sp, sp, #32\n"));
    }
}
