// AST (Abstract Syntax Tree) definitions for the compiler front-end

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Scalar types a declaration may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Char,
    Void,
}

impl DataType {
    /// Width in bytes. `void` has no storage and reports 0.
    pub fn size(self) -> usize {
        match self {
            DataType::Int => 4,
            DataType::Char => 1,
            DataType::Void => 0,
        }
    }

    /// Storage width, or `None` for types that cannot hold a value.
    pub fn storage_size(self) -> Option<usize> {
        match self {
            DataType::Void => None,
            other => Some(other.size()),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

/// Unary operators. Increment and decrement carry their fixity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,     // -x
    Not,     // !x
    BitNot,  // ~x
    PreInc,  // ++x
    PreDec,  // --x
    PostInc, // x++
    PostDec, // x--
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }
}

/// Assignment operators: `=` and the compound `op=` family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
}

/// Expression tree. Every node exclusively owns its children.
///
/// `Constant` and `Identifier` are the two primary (leaf) forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(i64, SourceLocation),
    Identifier(String, SourceLocation),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        location: SourceLocation,
    },
    Assignment {
        target: String,
        op: AssignOp,
        value: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Constant(_, loc) | Expr::Identifier(_, loc) => *loc,
            Expr::Unary { location, .. }
            | Expr::Binary { location, .. }
            | Expr::Ternary { location, .. }
            | Expr::Assignment { location, .. } => *location,
        }
    }
}

/// `<type> <name> = <init>;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub data_type: DataType,
    pub name: String,
    pub init: Expr,
    pub location: SourceLocation,
}

/// Statements allowed in a function body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Return {
        expr: Expr,
        location: SourceLocation,
    },
    VariableDecl(VariableDecl),
    Expression {
        expr: Expr,
        location: SourceLocation,
    },
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Return { location, .. } | Statement::Expression { location, .. } => {
                *location
            }
            Statement::VariableDecl(decl) => decl.location,
        }
    }
}

/// Function definition: `<type> <name>(void) { <body> }`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: DataType,
    pub name: String,
    pub body: Vec<Statement>,
    pub location: SourceLocation,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(Function),
    Variable(VariableDecl),
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
