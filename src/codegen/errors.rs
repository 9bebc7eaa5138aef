//! Semantic error types for the code generator
//!
//! This module defines [`CodegenError`], which represents every error detected
//! while lowering a well-formed AST to assembly (as opposed to lexical or
//! syntax errors).
//!
//! All codegen errors are fatal: the declaration being emitted is abandoned and
//! no assembly is produced for the compilation unit.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Semantic errors that can occur during code generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// Reference to a variable with no visible declaration
    #[error("Variable {name} is not defined on line {}", .location.line)]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Same name declared twice in one function
    #[error(
        "Variable {name} redeclared on line {} (first declared on line {})",
        .location.line,
        .previous.line
    )]
    Redeclaration {
        name: String,
        location: SourceLocation,
        previous: SourceLocation,
    },

    /// `++`/`--` applied to something other than an identifier
    #[error("Can only {} identifiers, found operand of '{op}' on line {}", verb(.op), .location.line)]
    InvalidIncrementOperand {
        op: String,
        location: SourceLocation,
    },

    /// Variable declared with type `void`
    #[error("Variable {name} declared void on line {}", .location.line)]
    VoidVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("Unsupported operator '{op}' on line {}", .location.line)]
    UnsupportedOperator {
        op: String,
        location: SourceLocation,
    },
}

fn verb(op: &str) -> &'static str {
    if op == "--" {
        "decrement"
    } else {
        "increment"
    }
}

impl CodegenError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CodegenError::UndefinedVariable { location, .. }
            | CodegenError::Redeclaration { location, .. }
            | CodegenError::InvalidIncrementOperand { location, .. }
            | CodegenError::VoidVariable { location, .. }
            | CodegenError::UnsupportedOperator { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let err = CodegenError::UndefinedVariable {
            name: "y".to_string(),
            location: SourceLocation::new(4, 12),
        };
        assert_eq!(err.to_string(), "Variable y is not defined on line 4");
        assert_eq!(err.location().column, 12);

        let err = CodegenError::InvalidIncrementOperand {
            op: "--".to_string(),
            location: SourceLocation::new(2, 1),
        };
        assert!(err.to_string().starts_with("Can only decrement identifiers"));
    }
}
