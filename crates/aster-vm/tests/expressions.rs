//! Literals, arithmetic, string, bitwise and comparison operators.

mod common;

use common::{assert_fails, assert_ok};

#[test]
fn integer_arithmetic() {
    assert_ok(
        r#"
        assert(1 + 2 * 3 == 7, "precedence");
        assert((1 + 2) * 3 == 9, "parens");
        assert(7 / 2 == 3, "integer division truncates");
        assert(7 % 2 == 1, "modulo");
        assert(-5 + 5 == 0, "unary neg");
        "#,
    );
}

#[test]
fn float_arithmetic() {
    assert_ok(
        r#"
        assert(1.5 + 2.5 == 4.0, "float add");
        assert(3.0 / 2.0 == 1.5, "float div");
        "#,
    );
}

#[test]
fn string_concat_and_repeat() {
    assert_ok(
        r#"
        let name = "world";
        assert("hello, " + name == "hello, world", "concat via +");
        assert("ab" * 3 == "ababab", "repeat via *");
        "#,
    );
}

#[test]
fn comparisons_are_numeric_only() {
    assert_ok(
        r#"
        assert(1 < 2, "lt");
        assert(2 > 1, "gt");
        assert(1 <= 1, "le");
        assert(1 >= 1, "ge");
        assert(1 == 1, "eq");
        assert(1 != 2, "ne");
        assert("a" == "a", "string eq by content");
        "#,
    );
}

#[test]
fn ordering_faults_on_non_numeric_operands() {
    assert_fails(
        r#"
        let x = "a" < "b";
        "#,
        "cannot compare",
    );
}

#[test]
fn bitwise_ops() {
    assert_ok(
        r#"
        assert((6 & 3) == 2, "and");
        assert((6 | 1) == 7, "or");
        assert((6 ^ 3) == 5, "xor");
        assert((1 << 4) == 16, "shl");
        assert((16 >> 4) == 1, "shr");
        assert(~0 == -1, "bnot");
        "#,
    );
}

#[test]
fn boolean_and_or_not() {
    assert_ok(
        r#"
        assert(true and true, "and");
        assert(not false, "not");
        assert((false or true), "or");
        assert(not (true and false), "combined");
        "#,
    );
}

#[test]
fn is_type_predicate() {
    assert_ok(
        r#"
        assert(1 is int, "int literal is int");
        assert(1.0 is float, "float literal is float");
        assert("s" is str, "string literal is str");
        assert(true is bool, "bool literal is bool");
        assert(not (1 is not int), "negated is");
        "#,
    );
}
