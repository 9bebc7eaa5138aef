// Code generation engine: program, declaration and function emission

use crate::codegen::emitter::{Assembly, LabelAllocator};
use crate::codegen::errors::CodegenError;
use crate::codegen::symbols::SymbolTable;
use crate::config::Options;
use crate::parser::ast::*;
use tracing::{debug, trace, warn};

/// Lowers a [`Program`] to ARM64 assembly text
pub struct Generator {
    /// Output buffer, shared by every declaration
    pub(crate) asm: Assembly,

    /// Label counter for the whole compilation unit
    pub(crate) labels: LabelAllocator,

    /// Slots of the declaration currently being emitted
    pub(crate) symbols: SymbolTable,

    /// Aligned frame size of the current function
    pub(crate) frame_size: usize,

    /// Evaluate `&&`/`||` lazily
    pub(crate) short_circuit: bool,
}

impl Generator {
    pub fn new(options: &Options) -> Self {
        Self {
            asm: Assembly::new(),
            labels: LabelAllocator::new(),
            symbols: SymbolTable::new(),
            frame_size: 0,
            short_circuit: options.short_circuit,
        }
    }

    /// Emit every declaration in order. The first semantic error aborts the
    /// whole unit and no text is returned.
    pub fn generate(mut self, program: &Program) -> Result<String, CodegenError> {
        for decl in &program.declarations {
            self.emit_declaration(decl)?;
            self.asm.blank();
        }

        debug!(bytes = self.asm.len(), "generated assembly");
        Ok(self.asm.into_string())
    }

    fn emit_declaration(&mut self, decl: &Declaration) -> Result<(), CodegenError> {
        self.symbols.clear();
        self.frame_size = 0;

        match decl {
            Declaration::Function(function) => self.emit_function(function),
            Declaration::Variable(var) => self.emit_global_variable(var),
        }
    }

    /// Emit a function: symbol header, frame setup, body, epilogue.
    fn emit_function(&mut self, function: &Function) -> Result<(), CodegenError> {
        self.asm.line(format_args!(".globl _{}", function.name));
        self.asm.line(".p2align 2");
        self.asm.label(&format!("_{}", function.name));
        self.asm.instr(".cfi_startproc");

        // Reserve every local up front so the frame size is known
        for stmt in &function.body {
            if let Statement::VariableDecl(var) = stmt {
                self.symbols.declare(&var.name, var.data_type, var.location)?;
            }
        }
        self.frame_size = self.symbols.frame_size();

        trace!(
            function = %function.name,
            frame_size = self.frame_size,
            slots = self.symbols.len(),
            "emitting function"
        );

        self.asm.reserve_frame(self.frame_size);
        self.asm.instr("mov x12, sp");

        for stmt in &function.body {
            self.emit_statement(stmt)?;
        }

        if !matches!(function.body.last(), Some(Statement::Return { .. })) {
            warn!(function = %function.name, "no trailing return, returning 0");
            self.asm.instr("mov w0, #0");
            self.emit_epilogue();
        }

        self.asm.instr(".cfi_endproc");
        Ok(())
    }

    /// A top-level variable gets its own one-slot table and no frame.
    fn emit_global_variable(&mut self, var: &VariableDecl) -> Result<(), CodegenError> {
        self.symbols.declare(&var.name, var.data_type, var.location)?;
        self.emit_variable_decl(var)
    }

    /// Release the frame and return to the caller.
    pub(crate) fn emit_epilogue(&mut self) {
        self.asm.release_frame(self.frame_size);
        self.asm.instr("ret");
    }
}
