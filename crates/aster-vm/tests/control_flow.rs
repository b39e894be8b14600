//! if/elif/else, while, numeric and iterator for-loops, break/continue.

mod common;

use common::assert_ok;

#[test]
fn if_elif_else_chain() {
    assert_ok(
        r#"
        fn classify(n) {
            if n < 0 {
                return "negative";
            } elif n == 0 {
                return "zero";
            } else {
                return "positive";
            }
        }
        assert(classify(-1) == "negative", "negative branch");
        assert(classify(0) == "zero", "zero branch");
        assert(classify(1) == "positive", "positive branch");
        "#,
    );
}

#[test]
fn while_loop_accumulates() {
    assert_ok(
        r#"
        let mut i = 0;
        let mut total = 0;
        while i < 5 {
            total = total + i;
            i = i + 1;
        }
        assert(total == 10, "sum 0..4");
        "#,
    );
}

#[test]
fn numeric_for_loop_with_default_step() {
    assert_ok(
        r#"
        let mut total = 0;
        for i in 0 to 5 {
            total = total + i;
        }
        assert(total == 10, "0..4 inclusive-exclusive sum");
        "#,
    );
}

#[test]
fn numeric_for_loop_with_explicit_step() {
    assert_ok(
        r#"
        let mut total = 0;
        for i in 0 to 10 : 2 {
            total = total + i;
        }
        assert(total == 20, "0,2,4,6,8 sums to 20");
        "#,
    );
}

#[test]
fn iterator_for_loop_over_array() {
    assert_ok(
        r#"
        let items = array [10, 20, 30];
        let mut total = 0;
        for item in items {
            total = total + item;
        }
        assert(total == 60, "iterate array");
        "#,
    );
}

#[test]
fn break_and_continue() {
    assert_ok(
        r#"
        let mut seen = 0;
        let mut i = 0;
        while i < 10 {
            i = i + 1;
            if i % 2 == 0 {
                continue;
            }
            if i > 7 {
                break;
            }
            seen = seen + i;
        }
        assert(seen == 1 + 3 + 5 + 7, "odd numbers up to 7");
        "#,
    );
}
