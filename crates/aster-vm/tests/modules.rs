//! `import` of native modules and of a sibling user-authored module file.

mod common;

use common::assert_ok;

#[test]
fn import_native_math_module() {
    assert_ok(
        r#"
        import "math" as math;
        assert(math.sqrt(16.0) == 4.0, "sqrt");
        assert(math.min(2, 5) == 2, "min");
        assert(math.max(2, 5) == 5, "max");
        assert(math.PI == math.PI, "PI member is accessible");
        "#,
    );
}

#[test]
fn import_user_module_by_relative_path() {
    assert_ok(
        r#"
        import "fixtures/greeter.as" as g;
        assert(g.greet("world") == "hello, world", "cross-module call");
        assert(g.square(6) == 36, "cross-module call 2");
        "#,
    );
}

#[test]
fn importing_the_same_module_twice_shadow_clones() {
    assert_ok(
        r#"
        import "fixtures/greeter.as" as a;
        import "fixtures/greeter.as" as b;
        assert(a.square(3) == 9, "first alias works");
        assert(b.square(4) == 16, "second alias works independently");
        "#,
    );
}
