//! Expression parsing implementation
//!
//! This module handles parsing of C expressions using precedence climbing
//! for binary operators and recursive descent for the other forms.
//!
//! # Precedence
//!
//! From loosest to tightest binding:
//!
//! | level | operators                         | associativity |
//! |-------|-----------------------------------|---------------|
//! | 14    | `= += -= *= /= %= <<= >>= &= ^= \|=` | right      |
//! | 13    | `? :`                             | right         |
//! | 12    | `\|\|`                            | left          |
//! | 11    | `&&`                              | left          |
//! | 10    | `\|`                              | left          |
//! | 9     | `^`                               | left          |
//! | 8     | `&`                               | left          |
//! | 7     | `== !=`                           | left          |
//! | 6     | `> >= < <=`                       | left          |
//! | 5     | `<< >>`                           | left          |
//! | 4     | `+ -`                             | left          |
//! | 3     | `* / %`                           | left          |
//! | 2     | prefix `+ - ! ~ ++ --`            | right         |
//! | 1     | postfix `++ --`                   | left          |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

type Level = fn(&mut Parser) -> Result<Expr, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative). Only an identifier directly
    /// followed by an assignment operator starts one.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let is_assignment = self.check(TokenKind::Identifier)
            && self
                .peek_ahead(1)
                .is_some_and(|next| next.kind.is_assignment());

        if !is_assignment {
            return self.parse_ternary();
        }

        let location = self.current_location();
        let target = self.expect_identifier()?;
        let op = self
            .match_any(&[
                (TokenKind::Eq, AssignOp::Assign),
                (TokenKind::PlusEq, AssignOp::Compound(BinaryOp::Add)),
                (TokenKind::MinusEq, AssignOp::Compound(BinaryOp::Sub)),
                (TokenKind::StarEq, AssignOp::Compound(BinaryOp::Mul)),
                (TokenKind::SlashEq, AssignOp::Compound(BinaryOp::Div)),
                (TokenKind::PercentEq, AssignOp::Compound(BinaryOp::Mod)),
                (TokenKind::LtLtEq, AssignOp::Compound(BinaryOp::Shl)),
                (TokenKind::GtGtEq, AssignOp::Compound(BinaryOp::Shr)),
                (TokenKind::AmpEq, AssignOp::Compound(BinaryOp::BitAnd)),
                (TokenKind::CaretEq, AssignOp::Compound(BinaryOp::BitXor)),
                (TokenKind::PipeEq, AssignOp::Compound(BinaryOp::BitOr)),
            ])
            .ok_or_else(|| self.error("Expected assignment operator"))?;

        let value = Box::new(self.parse_assignment()?);
        Ok(Expr::Assignment {
            target,
            op,
            value,
            location,
        })
    }

    /// Parse ternary: condition ? then_expr : else_expr
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_logical_or()?;

        if self.match_token(TokenKind::Question) {
            let location = self.previous_location();
            let then_expr = Box::new(self.parse_expression()?);
            self.expect_token(TokenKind::Colon, "Expected ':' in ternary expression")?;
            let else_expr = Box::new(self.parse_ternary()?);

            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                then_expr,
                else_expr,
                location,
            });
        }

        Ok(condition)
    }

    /// One left-associative binary level: operands come from `next`,
    /// operators from `ops`.
    fn parse_binary_level(
        &mut self,
        next: Level,
        ops: &[(TokenKind, BinaryOp)],
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;

        while let Some(op) = self.match_any(ops) {
            let location = self.previous_location();
            let right = Box::new(next(self)?);
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right,
                location,
            };
        }

        Ok(left)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_logical_and, &[(TokenKind::OrOr, BinaryOp::Or)])
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_or, &[(TokenKind::AndAnd, BinaryOp::And)])
    }

    /// Parse bitwise OR (|)
    fn parse_bitwise_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_xor, &[(TokenKind::Pipe, BinaryOp::BitOr)])
    }

    /// Parse bitwise XOR (^)
    fn parse_bitwise_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_and, &[(TokenKind::Caret, BinaryOp::BitXor)])
    }

    /// Parse bitwise AND (&)
    fn parse_bitwise_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, &[(TokenKind::Amp, BinaryOp::BitAnd)])
    }

    /// Parse equality (==, !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_relational,
            &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::Ne)],
        )
    }

    /// Parse relational (<, <=, >, >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_shift,
            &[
                (TokenKind::Gt, BinaryOp::Gt),
                (TokenKind::Ge, BinaryOp::Ge),
                (TokenKind::Lt, BinaryOp::Lt),
                (TokenKind::Le, BinaryOp::Le),
            ],
        )
    }

    /// Parse shift (<<, >>)
    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_additive,
            &[(TokenKind::LtLt, BinaryOp::Shl), (TokenKind::GtGt, BinaryOp::Shr)],
        )
    }

    /// Parse additive (+, -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_multiplicative,
            &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
        )
    }

    /// Parse multiplicative (*, /, %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_unary,
            &[
                (TokenKind::Star, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::Percent, BinaryOp::Mod),
            ],
        )
    }

    /// Parse prefix unary operators
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        // unary plus is a no-op
        if self.match_token(TokenKind::Plus) {
            return self.parse_unary();
        }

        let op = self.match_any(&[
            (TokenKind::Minus, UnaryOp::Neg),
            (TokenKind::Bang, UnaryOp::Not),
            (TokenKind::Tilde, UnaryOp::BitNot),
            (TokenKind::PlusPlus, UnaryOp::PreInc),
            (TokenKind::MinusMinus, UnaryOp::PreDec),
        ]);

        match op {
            Some(op) => {
                let location = self.previous_location();
                let operand = Box::new(self.parse_unary()?);
                Ok(Expr::Unary {
                    op,
                    operand,
                    location,
                })
            }
            None => self.parse_postfix(),
        }
    }

    /// Parse postfix ++ and --
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while let Some(op) = self.match_any(&[
            (TokenKind::PlusPlus, UnaryOp::PostInc),
            (TokenKind::MinusMinus, UnaryOp::PostDec),
        ]) {
            let location = self.previous_location();
            expr = Expr::Unary {
                op,
                operand: Box::new(expr),
                location,
            };
        }

        Ok(expr)
    }

    /// Parse primary expressions (constants, identifiers, parenthesized)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();

        match self.peek().kind {
            TokenKind::Constant => {
                let token = self.advance();
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| ParseError {
                        message: "Invalid integer constant".to_string(),
                        found: token.text.clone(),
                        location,
                    })?;
                Ok(Expr::Constant(value, location))
            }
            TokenKind::Identifier => {
                let name = self.advance().text.clone();
                Ok(Expr::Identifier(name, location))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }
}
