//! try/catch/throw unwinding and uncaught faults.

mod common;

use common::{assert_fails, assert_ok};

#[test]
fn catch_a_thrown_value() {
    assert_ok(
        r#"
        let mut caught = "";
        try {
            throw "boom";
        } catch (e) {
            caught = e;
        }
        assert(caught == "boom", "catch binds thrown value");
        "#,
    );
}

#[test]
fn catch_without_binding() {
    assert_ok(
        r#"
        let mut reached = false;
        try {
            throw "ignored";
        } catch {
            reached = true;
        }
        assert(reached, "catch without a name still runs");
        "#,
    );
}

#[test]
fn execution_resumes_after_try_catch() {
    assert_ok(
        r#"
        let mut steps = list [];
        try {
            steps.append(1);
            throw "x";
            steps.append(2);
        } catch (e) {
            steps.append(3);
        }
        steps.append(4);
        assert(len(steps) == 3, "the post-throw statement never ran");
        assert(steps[0] == 1, "first step");
        assert(steps[1] == 3, "catch body step");
        assert(steps[2] == 4, "resumed after try/catch");
        "#,
    );
}

#[test]
fn native_fault_is_catchable() {
    assert_ok(
        r#"
        let mut caught = false;
        try {
            let x = 1 / 0;
        } catch (e) {
            caught = true;
        }
        assert(caught, "division by zero is a catchable fault");
        "#,
    );
}

#[test]
fn throw_inside_function_unwinds_to_caller() {
    assert_ok(
        r#"
        fn risky() {
            throw "nope";
        }
        let mut caught = "";
        try {
            risky();
        } catch (e) {
            caught = e;
        }
        assert(caught == "nope", "exception crosses a call boundary");
        "#,
    );
}

#[test]
fn nested_try_inner_catch_does_not_leak() {
    assert_ok(
        r#"
        let mut outer_caught = false;
        let mut inner_caught = false;
        try {
            try {
                throw "inner";
            } catch (e) {
                inner_caught = true;
            }
        } catch (e) {
            outer_caught = true;
        }
        assert(inner_caught, "inner handler caught it");
        assert(not outer_caught, "outer handler never saw it");
        "#,
    );
}

#[test]
fn uncaught_throw_propagates_to_the_top() {
    assert_fails(
        r#"
        throw "fatal";
        "#,
        "fatal",
    );
}

#[test]
fn assert_failure_is_an_uncaught_throw_with_message() {
    assert_fails(
        r#"
        assert(1 == 2, "one is not two");
        "#,
        "one is not two",
    );
}

#[test]
fn catch_a_thrown_record_and_read_its_msg_field() {
    assert_ok(
        r#"
        let mut caught = "";
        try {
            throw record { msg: "boom" };
        } catch (e) {
            caught = e.msg;
        }
        assert(caught == "boom", "catch can read a thrown record's field");
        "#,
    );
}

#[test]
fn uncaught_record_throw_reports_its_msg_field() {
    assert_fails(
        r#"
        throw record { msg: "boom" };
        "#,
        "boom",
    );
}

#[test]
fn unbounded_recursion_is_a_catchable_fault_not_a_crash() {
    assert_ok(
        r#"
        let mut caught = false;
        fn recurse(n) {
            return recurse(n + 1);
        }
        try {
            recurse(0);
        } catch (e) {
            caught = true;
        }
        assert(caught, "runaway recursion hits the frame limit instead of overflowing the native stack");
        "#,
    );
}

#[test]
fn assert_failure_can_be_caught() {
    assert_ok(
        r#"
        let mut caught = "";
        try {
            assert(false, "nope");
        } catch (e) {
            caught = e;
        }
        assert(caught == "nope", "assert failure is a regular catchable throw");
        "#,
    );
}
