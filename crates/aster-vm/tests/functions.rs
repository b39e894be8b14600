//! Function declarations, recursion, lambdas and closures captured by value.

mod common;

use common::assert_ok;

#[test]
fn recursive_function() {
    assert_ok(
        r#"
        fn fib(n) {
            if n < 2 {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
        assert(fib(10) == 55, "fib(10)");
        "#,
    );
}

#[test]
fn nested_named_function_recurses_into_itself() {
    assert_ok(
        r#"
        fn outer() {
            fn countdown(n) {
                if n <= 0 {
                    return 0;
                }
                return countdown(n - 1);
            }
            return countdown(5);
        }
        assert(outer() == 0, "a fn declared inside another fn can call itself");
        "#,
    );
}

#[test]
fn lambda_fn_and_proc() {
    assert_ok(
        r#"
        let double = fn(x) { return x * 2; };
        assert(double(21) == 42, "fn lambda");

        let adder = proc(a, b) { return a + b; };
        assert(adder(2, 3) == 5, "proc lambda");
        "#,
    );
}

#[test]
fn closure_captures_outer_local_by_value() {
    assert_ok(
        r#"
        fn make_adder(n) {
            return fn(x) { return x + n; };
        }
        let add5 = make_adder(5);
        let add10 = make_adder(10);
        assert(add5(1) == 6, "captured n=5");
        assert(add10(1) == 11, "captured n=10 is independent");
        "#,
    );
}

#[test]
fn closure_capture_is_snapshot_not_reference() {
    assert_ok(
        r#"
        fn make_counter() {
            let mut n = 0;
            let bump = fn() { n = n + 1; return n; };
            return bump;
        }
        let bump = make_counter();
        let first = bump();
        assert(first == 1, "first call still returns 1");
        "#,
    );
}

#[test]
fn higher_order_functions() {
    assert_ok(
        r#"
        fn apply_twice(f, x) {
            return f(f(x));
        }
        let inc = fn(x) { return x + 1; };
        assert(apply_twice(inc, 0) == 2, "apply inc twice");
        "#,
    );
}
