//! Statement parsing implementation
//!
//! Function bodies are flat statement lists:
//!
//! - Return statements: `return expr;`
//! - Variable declarations: `int x = 42;`
//! - Expression statements: `x = y = 5;`, `x++;`
//!
//! # Grammar
//!
//! ```text
//! statement ::= "return" expression ";"
//!             | type identifier "=" expression ";"
//!             | expression ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();

        if self.match_token(TokenKind::Return) {
            let expr = self.parse_expression()?;
            self.expect_semicolon("after return value")?;
            return Ok(Statement::Return { expr, location });
        }

        if self.is_type_keyword() {
            return self.parse_var_declaration().map(Statement::VariableDecl);
        }

        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(Statement::Expression { expr, location })
    }

    /// Parse variable declaration: type name = init;
    pub(crate) fn parse_var_declaration(&mut self) -> Result<VariableDecl, ParseError> {
        let location = self.current_location();
        let data_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        self.expect_token(TokenKind::Eq, "Expected '=' in variable declaration")?;
        let init = self.parse_expression()?;
        self.expect_semicolon("after variable declaration")?;

        Ok(VariableDecl {
            data_type,
            name,
            init,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{ParseError, Parser};

    fn body(source: &str) -> Result<Vec<Statement>, ParseError> {
        let wrapped = format!("int main(void) {{ {source} }}");
        let program = Parser::new(tokenize(&wrapped).unwrap()).parse_program()?;
        match program.declarations.into_iter().next() {
            Some(Declaration::Function(f)) => Ok(f.body),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_statement_dispatch() {
        let stmts = body("int x = 1; x = x + 1; return x;").unwrap();
        assert!(matches!(stmts[0], Statement::VariableDecl(_)));
        assert!(matches!(stmts[1], Statement::Expression { .. }));
        assert!(matches!(stmts[2], Statement::Return { .. }));
    }

    #[test]
    fn test_declaration_requires_initializer() {
        let err = body("int x; return 0;").unwrap_err();
        assert_eq!(err.found, ";");
    }

    #[test]
    fn test_assignment_to_constant_rejected() {
        let err = body("int x = 1; 5 = x; return 0;").unwrap_err();
        assert_eq!(err.found, "=");
    }

    #[test]
    fn test_statement_locations() {
        let stmts = body("\nint x = 1;\n  return x;").unwrap();
        assert_eq!(stmts[0].location().line, 2);
        assert_eq!(stmts[1].location(), SourceLocation::new(3, 3));
    }
}
