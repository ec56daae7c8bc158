use flinq::config::Config;
use flinq::interpreter::Interpreter;
use flinq::value::Val;
use std::f64::consts;

fn eval(interp: &mut Interpreter, stmt: &str) -> Val {
    interp
        .evaluate(stmt)
        .unwrap_or_else(|err| panic!("{stmt:?} failed: {err}"))
}

#[test]
fn arithmetic_precedence() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "2 + 3 * 4"), Val::Num(14.0));
    assert_eq!(eval(&mut interp, "(2 + 3) * 4"), Val::Num(20.0));
    assert_eq!(eval(&mut interp, "2 ^ 3"), Val::Num(8.0));
    assert_eq!(eval(&mut interp, "10 - 4 - 3"), Val::Num(3.0));
    assert_eq!(eval(&mut interp, "7 / 2"), Val::Num(3.5));
    assert_eq!(eval(&mut interp, "2 * 3 ^ 2"), Val::Num(18.0));
}

#[test]
fn unary_minus() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "-5 + 2"), Val::Num(-3.0));
    assert_eq!(eval(&mut interp, "- - 4"), Val::Num(4.0));
    assert_eq!(eval(&mut interp, "3 * -2"), Val::Num(-6.0));
    // Unary minus binds tighter than '^'.
    assert_eq!(eval(&mut interp, "-2 ^ 2"), Val::Num(4.0));
}

#[test]
fn ieee_division() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "1 / 0"), Val::Num(f64::INFINITY));
    let Val::Num(nan) = eval(&mut interp, "0 / 0") else {
        panic!("expected a number");
    };
    assert!(nan.is_nan());
}

#[test]
fn strings() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "\"ab\" + \"cd\""), Val::String("abcd".into()));
    assert_eq!(
        eval(&mut interp, "if (\"ab\" == \"ab\") then \"same\" else \"different\""),
        Val::String("same".into())
    );
    assert_eq!(
        eval(&mut interp, "if (\"ab\" != \"ab\") then 1 else 0"),
        Val::Num(0.0)
    );
    // No escapes: everything up to the closing quote is literal.
    assert_eq!(eval(&mut interp, "\"a\\b\""), Val::String("a\\b".into()));
}

#[test]
fn let_binding() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "let x = 5 in x * x"), Val::Num(25.0));
    assert_eq!(
        eval(&mut interp, "let x = 2 in let y = x + 1 in x * y"),
        Val::Num(6.0)
    );
}

#[test]
fn let_group() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "let -> { a = 1, b = 2 } in a + b"), Val::Num(3.0));
    assert_eq!(eval(&mut interp, "let -> { a = 1, a = 2 } in a"), Val::Num(2.0));
    assert_eq!(eval(&mut interp, "let -> { a = 1, b = a + 1 } in b"), Val::Num(2.0));
    assert_eq!(eval(&mut interp, "let llinq { a = 4 } in a"), Val::Num(4.0));
}

#[test]
fn let_binding_outlives_its_body() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "(let x = 2 in x) + x"), Val::Num(4.0));
}

#[test]
fn variables_do_not_survive_statements() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "let x = 2 in x");
    assert!(interp.evaluate("x").is_err());
}

#[test]
fn if_expression() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "if (3 > 2) then 1 else 0"), Val::Num(1.0));
    assert_eq!(eval(&mut interp, "if (3 <= 2) then 1 else 0"), Val::Num(0.0));
    assert_eq!(
        eval(&mut interp, "let n = 7 in if (n >= 7) then n * 2 else n"),
        Val::Num(14.0)
    );
    assert_eq!(
        eval(&mut interp, "if (1 == 2) then 1 else if (2 == 2) then 2 else 3"),
        Val::Num(2.0)
    );
}

#[test]
fn functions_persist_across_statements() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "function square(x) => x ^ 2"), Val::None);
    assert_eq!(eval(&mut interp, "square(4)"), Val::Num(16.0));
    assert_eq!(eval(&mut interp, "square(square(2)) + 1"), Val::Num(17.0));
}

#[test]
fn functions_call_earlier_functions() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "function inc(x) => x + 1");
    eval(&mut interp, "function twice(x) flinq inc(inc(x))");
    assert_eq!(eval(&mut interp, "twice(3)"), Val::Num(5.0));
}

#[test]
fn function_without_parameters() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "function answer() => 42");
    assert_eq!(eval(&mut interp, "answer() / 2"), Val::Num(21.0));
}

#[test]
fn function_bodies_see_caller_bindings() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "function addy(x) => x + y");
    assert_eq!(eval(&mut interp, "let y = 10 in addy(1)"), Val::Num(11.0));
    assert!(interp.evaluate("addy(1)").is_err());
}

#[test]
fn call_restores_caller_scope() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "function square(x) => x ^ 2");
    assert_eq!(eval(&mut interp, "let x = 1 in square(5) + x"), Val::Num(26.0));
}

#[test]
fn arguments_see_earlier_parameters() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "function pair(a, b) => a * 10 + b");
    assert_eq!(eval(&mut interp, "pair(1, 2)"), Val::Num(12.0));
    // `a` is already bound to 1 when the second argument is evaluated.
    assert_eq!(eval(&mut interp, "let a = 7 in pair(1, a)"), Val::Num(11.0));
}

#[test]
fn constants() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "PI"), Val::Num(consts::PI));
    assert_eq!(eval(&mut interp, "E"), Val::Num(consts::E));
    assert_eq!(eval(&mut interp, "G"), Val::Num(6.67430));
    assert_eq!(eval(&mut interp, "const Tau = PI * 2"), Val::None);
    assert_eq!(eval(&mut interp, "Tau"), Val::Num(consts::PI * 2.0));
}

#[test]
fn later_constant_wins() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "const K = 1");
    eval(&mut interp, "const K = 2");
    assert_eq!(eval(&mut interp, "K"), Val::Num(2.0));
    eval(&mut interp, "const PI = 3");
    assert_eq!(eval(&mut interp, "PI"), Val::Num(3.0));
}

#[test]
fn constants_are_evaluated_at_use() {
    let mut interp = Interpreter::new();
    eval(&mut interp, "const Twice = x * 2");
    assert_eq!(eval(&mut interp, "let x = 3 in Twice"), Val::Num(6.0));
    assert_eq!(eval(&mut interp, "let x = 5 in Twice"), Val::Num(10.0));
}

#[test]
fn variables_shadow_constants() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "let PI = 3 in PI"), Val::Num(3.0));
}

#[test]
fn print_produces_nothing() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "print(1 + 2)"), Val::None);
    assert_eq!(eval(&mut interp, "print(\"hi\")"), Val::None);
    assert!(interp.interpret("print(5);\r").is_empty());
}

#[test]
fn comments_and_trailing_semicolon() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, "1 + 1 // two"), Val::Num(2.0));
    assert_eq!(eval(&mut interp, "3;"), Val::Num(3.0));
    assert_eq!(eval(&mut interp, "// note\r4"), Val::Num(4.0));
}

#[test]
fn program_output() {
    let mut interp = Interpreter::new();
    let out = interp.interpret(
        "\
function square(x) => x ^ 2;\r\
const K = 3;\r\
square(K);\r\
\"a\" + \"b\";\r\
\r\
print(K);\r\
1 + 0.5;\r",
    );

    assert_eq!(out, vec!["9", "ab", "1.5"]);
}

#[test]
fn errors_only_abort_their_statement() {
    let mut interp = Interpreter::new();
    let out = interp.interpret("1 +;\rnope;\r2 * 2;\r");

    assert_eq!(out.len(), 3);
    assert!(out[0].starts_with("error:"), "{}", out[0]);
    assert!(out[1].starts_with("error:"), "{}", out[1]);
    assert_eq!(out[2], "4");
}

#[test]
fn run_reports_each_statement() {
    let mut interp = Interpreter::new();
    let results = interp.run("const A = 1;\rA + 1;\rA + \"x\";\r");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(Val::None));
    assert_eq!(results[1], Ok(Val::Num(2.0)));
    assert!(results[2].is_err());
}

#[test]
fn statements_span_lines() {
    let mut interp = Interpreter::new();
    let out = interp.interpret("let x = 2\rin\rx * 3;\r");
    assert_eq!(out, vec!["6"]);
}

#[test]
fn sessions_are_isolated() {
    let mut a = Interpreter::new();
    let mut b = Interpreter::new();
    eval(&mut a, "function f(x) => x");
    eval(&mut a, "const C = 1");

    assert!(b.evaluate("f(1)").is_err());
    assert!(b.evaluate("C").is_err());
    assert!(b.registry().function("f").is_none());
}

#[test]
fn custom_terminator() {
    let config = Config::default().with_terminator("\r");
    let mut interp = Interpreter::with_config(config);
    assert_eq!(interp.config().terminator, "\r");
    assert_eq!(interp.interpret("1 + 1\r2 * 3\r"), vec!["2", "6"]);
}

#[test]
fn number_rendering() {
    let mut interp = Interpreter::new();
    let out = interp.interpret(
        "1 / 0;\r0 - 1 / 0;\r0 / 0;\r1000000000000000000000;\r123456789012345;\r0.0001;\r0.00001;\r2.5;\r",
    );
    assert_eq!(
        out,
        vec!["∞", "-∞", "NaN", "1E+21", "123456789012345", "0.0001", "1E-05", "2.5"]
    );
}
