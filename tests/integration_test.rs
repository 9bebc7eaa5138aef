// Integration tests for the compilation pipeline

use arm64cc::codegen::errors::CodegenError;
use arm64cc::parser::ast::*;
use arm64cc::parser::lexer::{tokenize, TokenKind};
use arm64cc::parser::parse::Parser;
use arm64cc::{compile, CompileError, Options};
use std::fs;
use std::path::Path;

fn parse(source: &str) -> Program {
    let tokens = tokenize(source).expect("Lexing failed");
    Parser::new(tokens).parse_program().expect("Parsing failed")
}

fn compile_ok(source: &str) -> String {
    compile(source, &Options::default()).expect("Compilation failed")
}

/// Every `sub sp, sp, #N` in the output
fn frame_sizes(asm: &str) -> Vec<usize> {
    asm.lines()
        .filter_map(|line| line.trim().strip_prefix("sub sp, sp, #"))
        .map(|n| n.parse().expect("frame size is numeric"))
        .collect()
}

#[test]
fn test_declaration_count_matches_source() {
    let program = parse(
        r#"
        int limit = 10;
        char letter = 'q';
        int helper(void) { return 1; }
        int main(void) { return 0; }
    "#,
    );
    assert_eq!(program.declarations.len(), 4);
}

#[test]
fn test_precedence_shape_and_output() {
    let program = parse("int main(void){ return 2+3*4; }");
    let Declaration::Function(main) = &program.declarations[0] else {
        panic!("expected function");
    };
    let Statement::Return { expr, .. } = &main.body[0] else {
        panic!("expected return");
    };
    let Expr::Binary {
        op: BinaryOp::Add,
        left,
        right,
        ..
    } = expr
    else {
        panic!("expected addition at the root, got {expr:?}");
    };
    assert!(matches!(**left, Expr::Constant(2, _)));
    assert!(matches!(
        **right,
        Expr::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));

    let asm = compile_ok("int main(void){ return 2+3*4; }");
    let mul = asm.find("mul w0, w1, w0").expect("mul emitted");
    let add = asm.find("add w0, w1, w0").expect("add emitted");
    assert!(mul < add);
}

#[test]
fn test_subtraction_associates_left() {
    let program = parse("int main(void){ return 10-3-2; }");
    let Declaration::Function(main) = &program.declarations[0] else {
        panic!("expected function");
    };
    let Statement::Return { expr, .. } = &main.body[0] else {
        panic!("expected return");
    };
    match expr {
        Expr::Binary {
            op: BinaryOp::Sub,
            left,
            right,
            ..
        } => {
            assert!(matches!(**right, Expr::Constant(2, _)));
            assert!(matches!(
                **left,
                Expr::Binary {
                    op: BinaryOp::Sub,
                    ..
                }
            ));
        }
        other => panic!("expected subtraction, got {other:?}"),
    }
}

#[test]
fn test_chained_assignment_requires_both_targets() {
    compile_ok("int main(void) { int x = 0; int y = 0; x = y = 5; return x; }");

    let err = compile("int main(void) { int x = 0; x = y = 5; return x; }", &Options::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Codegen(CodegenError::UndefinedVariable { .. })));

    let err = compile("int main(void) { int x = 0; 5 = x; return x; }", &Options::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
}

#[test]
fn test_undefined_variable_names_identifier_and_line() {
    let source = "int main(void) {\n    int a = 1;\n    return a + missing;\n}\n";
    let err = compile(source, &Options::default()).unwrap_err();
    match &err {
        CompileError::Codegen(CodegenError::UndefinedVariable { name, location }) => {
            assert_eq!(name, "missing");
            assert_eq!(location.line, 3);
        }
        other => panic!("expected undefined variable, got {other:?}"),
    }
    assert!(err.to_string().contains("missing"));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_redeclaration_detected() {
    let source = "int main(void) {\n    int a = 1;\n    char a = 'x';\n    return a;\n}\n";
    let err = compile(source, &Options::default()).unwrap_err();
    match err {
        CompileError::Codegen(CodegenError::Redeclaration {
            name,
            location,
            previous,
        }) => {
            assert_eq!(name, "a");
            assert_eq!(location.line, 3);
            assert_eq!(previous.line, 2);
        }
        other => panic!("expected redeclaration, got {other:?}"),
    }
}

#[test]
fn test_same_name_in_different_functions() {
    compile_ok("int f(void) { int a = 1; return a; }\nint main(void) { int a = 2; return a; }");
}

#[test]
fn test_void_variable_rejected() {
    let err = compile("int main(void) { void v = 0; return 0; }", &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Codegen(CodegenError::VoidVariable { .. })));
}

#[test]
fn test_frames_are_positive_multiples_of_16() {
    let asm = compile_ok(
        r#"
        int none(void) { return 0; }
        int one(void) { char c = 'a'; return c; }
        int three(void) { int a = 1; int b = 2; char c = 'c'; return a + b + c; }
        int many(void) {
            int a = 1; int b = 2; int c = 3; int d = 4; int e = 5;
            return a + b + c + d + e;
        }
    "#,
    );
    let sizes = frame_sizes(&asm);
    assert_eq!(sizes, vec![16, 16, 32, 48]);
    for size in sizes {
        assert!(size > 0 && size % 16 == 0);
    }
}

#[test]
fn test_char_literal_tokens() {
    let value = |src: &str| -> i64 {
        let tokens = tokenize(src).expect("Lexing failed");
        assert_eq!(tokens[0].kind, TokenKind::Constant);
        tokens[0].text.parse().expect("numeric constant")
    };
    assert_eq!(value(r"'\n'"), 10);
    assert_eq!(value(r"'\x41'"), 65);
    assert_eq!(value("'A'"), 65);
}

#[test]
fn test_lex_failures_are_line_numbered() {
    let err = compile("int main(void) {\n  return 0;\n}\n/* no close", &Options::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Lex(_)));
    assert_eq!(err.location().line, 4);

    let err = compile("int main(void) {\n  return 'a;\n}", &Options::default()).unwrap_err();
    assert!(matches!(err, CompileError::Lex(_)));
    assert_eq!(err.location().line, 2);
}

#[test]
fn test_output_is_deterministic() {
    let source = "int main(void) { int x = 1; return x && (x || 0) ? x++ : --x; }";
    assert_eq!(compile_ok(source), compile_ok(source));
}

#[test]
fn test_sample_program() {
    let path = Path::new("sample/main.c");
    let source = fs::read_to_string(path).expect("Failed to read sample file");

    let asm = compile_ok(&source);
    assert!(asm.contains(".globl _main\n"));
    assert_eq!(asm.matches(".cfi_startproc").count(), 1);
    assert_eq!(asm.matches(".cfi_endproc").count(), 1);
    // nine 8-byte locals; the global gets no frame
    assert_eq!(frame_sizes(&asm), vec![80]);
}
