//! Declaration parsing implementation
//!
//! This module handles parsing of top-level declarations:
//!
//! - Function definitions: `type name(void) { ... }`
//! - Global variable definitions: `type name = expr;`
//!
//! # Grammar
//!
//! ```text
//! declaration  ::= type identifier ( function_rest | variable_rest )
//! function_rest ::= "(" "void"? ")" "{" statement* "}"
//! variable_rest ::= "=" expression ";"
//! type         ::= "int" | "char" | "void"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a top-level declaration (function or global variable)
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.current_location();
        let data_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.match_token(TokenKind::LParen) {
            return self.parse_function_definition(data_type, name, location);
        }

        if self.match_token(TokenKind::Eq) {
            let init = self.parse_expression()?;
            self.expect_semicolon("after variable initializer")?;
            return Ok(Declaration::Variable(VariableDecl {
                data_type,
                name,
                init,
                location,
            }));
        }

        Err(self.error(format!("Expected '(' or '=' after '{name}'")))
    }

    /// Parse the rest of a function definition after its opening `(`
    fn parse_function_definition(
        &mut self,
        return_type: DataType,
        name: String,
        location: SourceLocation,
    ) -> Result<Declaration, ParseError> {
        // optional `void` parameter marker
        self.match_token(TokenKind::Void);
        self.expect_token(TokenKind::RParen, "Expected ')' after function parameters")?;
        self.expect_token(TokenKind::LBrace, "Expected '{' before function body")?;

        let body = self.parse_block_statements()?;

        self.expect_token(TokenKind::RBrace, "Expected '}' after function body")?;

        Ok(Declaration::Function(Function {
            return_type,
            name,
            body,
            location,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;

    fn parse_one(source: &str) -> Declaration {
        let mut program = Parser::new(tokenize(source).unwrap())
            .parse_program()
            .unwrap();
        assert_eq!(program.declarations.len(), 1);
        program.declarations.remove(0)
    }

    #[test]
    fn test_function_with_and_without_void() {
        for source in ["int main(void) { return 0; }", "int main() { return 0; }"] {
            match parse_one(source) {
                Declaration::Function(f) => {
                    assert_eq!(f.name, "main");
                    assert_eq!(f.return_type, DataType::Int);
                    assert_eq!(f.body.len(), 1);
                }
                other => panic!("expected function, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_global_variable() {
        match parse_one("char c = 'a';") {
            Declaration::Variable(v) => {
                assert_eq!(v.name, "c");
                assert_eq!(v.data_type, DataType::Char);
                assert!(matches!(v.init, Expr::Constant(97, _)));
            }
            other => panic!("expected variable, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_declarations() {
        let parse = |s: &str| Parser::new(tokenize(s).unwrap()).parse_program();
        assert!(parse("int x;").is_err());
        assert!(parse("main(void) { return 0; }").is_err());
        assert!(parse("int main(int) { return 0; }").is_err());
        assert!(parse("int main(void) return 0;").is_err());
    }
}
