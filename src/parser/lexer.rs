//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexing is fail-fast: the first invalid character, unterminated comment or
//! unterminated character literal aborts the whole run and no partial token
//! stream is returned.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Identifier,
    Constant,

    // Keywords
    Int,
    Char,
    Void,
    Return,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Bitwise
    Amp,   // &
    Pipe,  // |
    Caret, // ^
    Tilde, // ~
    LtLt,  // <<
    GtGt,  // >>

    // Assignment
    Eq,        // =
    PlusEq,    // +=
    MinusEq,   // -=
    StarEq,    // *=
    SlashEq,   // /=
    PercentEq, // %=
    LtLtEq,    // <<=
    GtGtEq,    // >>=
    AmpEq,     // &=
    CaretEq,   // ^=
    PipeEq,    // |=

    // Increment/Decrement
    PlusPlus,   // ++
    MinusMinus, // --

    // Ternary
    Question, // ?
    Colon,    // :

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    Eof,
}

impl TokenKind {
    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Char | TokenKind::Void)
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::LtLtEq
                | TokenKind::GtGtEq
                | TokenKind::AmpEq
                | TokenKind::CaretEq
                | TokenKind::PipeEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Constant => "constant",
            TokenKind::Int => "'int'",
            TokenKind::Char => "'char'",
            TokenKind::Void => "'void'",
            TokenKind::Return => "'return'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtGt => "'>>'",
            TokenKind::Eq => "'='",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::LtLtEq => "'<<='",
            TokenKind::GtGtEq => "'>>='",
            TokenKind::AmpEq => "'&='",
            TokenKind::CaretEq => "'^='",
            TokenKind::PipeEq => "'|='",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Question => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// A lexed token. `text` is the source spelling, except for character
/// literals where it holds the decoded numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Int),
    ("return", TokenKind::Return),
    ("void", TokenKind::Void),
    ("char", TokenKind::Char),
];

/// Lexer for C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "EOF", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let start = self.position;
        let ch = self
            .advance()
            .ok_or_else(|| LexError::new("Unexpected end of file", loc))?;

        let kind = match ch {
            '\'' => return self.char_literal(loc),
            '0'..='9' => return self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' => return Ok(self.identifier_or_keyword(ch, loc)),

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,

            '+' => self.pick(&[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusEq)], TokenKind::Plus),
            '-' => self.pick(
                &[('-', TokenKind::MinusMinus), ('=', TokenKind::MinusEq)],
                TokenKind::Minus,
            ),
            '*' => self.pick(&[('=', TokenKind::StarEq)], TokenKind::Star),
            '/' => self.pick(&[('=', TokenKind::SlashEq)], TokenKind::Slash),
            '%' => self.pick(&[('=', TokenKind::PercentEq)], TokenKind::Percent),
            '^' => self.pick(&[('=', TokenKind::CaretEq)], TokenKind::Caret),
            '=' => self.pick(&[('=', TokenKind::EqEq)], TokenKind::Eq),
            '!' => self.pick(&[('=', TokenKind::NotEq)], TokenKind::Bang),
            '&' => self.pick(&[('&', TokenKind::AndAnd), ('=', TokenKind::AmpEq)], TokenKind::Amp),
            '|' => self.pick(&[('|', TokenKind::OrOr), ('=', TokenKind::PipeEq)], TokenKind::Pipe),
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    self.pick(&[('=', TokenKind::LtLtEq)], TokenKind::LtLt)
                } else {
                    self.pick(&[('=', TokenKind::Le)], TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    self.pick(&[('=', TokenKind::GtGtEq)], TokenKind::GtGt)
                } else {
                    self.pick(&[('=', TokenKind::Ge)], TokenKind::Gt)
                }
            }

            _ => {
                return Err(LexError::new(
                    format!("Unexpected character '{}'", ch.escape_default()),
                    loc,
                ))
            }
        };

        let text: String = self.input[start..self.position].iter().collect();
        Ok(Token::new(kind, text, loc))
    }

    /// Consume one more character if it selects a longer operator.
    fn pick(&mut self, longer: &[(char, TokenKind)], fallback: TokenKind) -> TokenKind {
        if let Some(next) = self.peek() {
            if let Some((_, kind)) = longer.iter().find(|(c, _)| *c == next) {
                self.advance();
                return *kind;
            }
        }
        fallback
    }

    /// Parse a character literal into an integer constant token
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let unterminated = || LexError::new("Unterminated character literal", loc);

        let ch = self.advance().ok_or_else(unterminated)?;
        let value = match ch {
            '\'' => return Err(LexError::new("Empty character literal", loc)),
            '\n' => return Err(unterminated()),
            '\\' => self.escape_sequence().ok_or_else(unterminated)?,
            other => other as i64,
        };

        if self.peek() != Some('\'') {
            return Err(unterminated());
        }
        self.advance();

        Ok(Token::new(TokenKind::Constant, value.to_string(), loc))
    }

    /// Decode the escape following a backslash. Returns `None` at end of input.
    fn escape_sequence(&mut self) -> Option<i64> {
        let escaped = self.peek()?;
        let simple = match escaped {
            'a' => Some(0x07),
            'b' => Some(0x08),
            'e' => Some(0x1b),
            'f' => Some(0x0c),
            'n' => Some(0x0a),
            'r' => Some(0x0d),
            't' => Some(0x09),
            'v' => Some(0x0b),
            '\\' => Some('\\' as i64),
            '\'' => Some('\'' as i64),
            '"' => Some('"' as i64),
            '?' => Some('?' as i64),
            _ => None,
        };
        if let Some(value) = simple {
            self.advance();
            return Some(value);
        }

        // Three decimal digits are taken as an octal escape; only the leading
        // octal digits contribute, so `\189` is 1.
        let digits: String = (0..3).filter_map(|i| self.peek_ahead(i)).collect();
        if digits.len() == 3 && digits.chars().all(|c| c.is_ascii_digit()) {
            for _ in 0..3 {
                self.advance();
            }
            let value = digits
                .chars()
                .map_while(|c| c.to_digit(8))
                .fold(0u32, |acc, d| acc * 8 + d);
            return Some(signed_char(value));
        }

        if escaped == 'x' {
            let hex: String = (1..3).filter_map(|i| self.peek_ahead(i)).collect();
            if hex.len() == 2 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                for _ in 0..3 {
                    self.advance();
                }
                let value = u32::from_str_radix(&hex, 16).ok()?;
                return Some(signed_char(value));
            }
        }

        // Unknown escapes degrade to a space.
        self.advance();
        Some(' ' as i64)
    }

    /// Parse numeric literal (decimal integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if num_str.parse::<i64>().is_err() {
            return Err(LexError::new(
                format!("Integer constant too large: {}", num_str),
                loc,
            ));
        }

        Ok(Token::new(TokenKind::Constant, num_str, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = KEYWORDS
            .iter()
            .find(|(word, _)| *word == ident)
            .map(|(_, kind)| *kind)
            .unwrap_or(TokenKind::Identifier);

        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => match self.peek_ahead(1) {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new(
            format!(
                "Unterminated block comment, missing '*/' for comment starting on line {}",
                start_loc.line
            ),
            start_loc,
        ))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Numeric escapes produce a `char`, which is signed: `'\377'` is -1.
fn signed_char(value: u32) -> i64 {
    i64::from(value as u8 as i8)
}

/// Convenience wrapper: lex `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
