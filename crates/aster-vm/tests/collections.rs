//! array/list/dict/record literals, indexing, stdlib methods, map/filter/sort.

mod common;

use common::{assert_fails, assert_ok};

#[test]
fn array_literal_index_and_len() {
    assert_ok(
        r#"
        let a = array [1, 2, 3];
        assert(len(a) == 3, "len");
        assert(a[0] == 1, "index 0");
        assert(a[2] == 3, "index 2");
        "#,
    );
}

#[test]
fn array_index_assignment() {
    assert_ok(
        r#"
        let a = array [1, 2, 3];
        a[1] = 99;
        assert(a[1] == 99, "mutated in place");
        "#,
    );
}

#[test]
fn array_type_of() {
    assert_ok(
        r#"
        let a = array [1, 2, 3];
        assert(type_of(a) == "array", "array literal type_of");
        "#,
    );
}

#[test]
fn list_grows_and_mutates() {
    assert_ok(
        r#"
        let l = list [1, 2];
        l.append(3);
        assert(len(l) == 3, "append grows list");
        assert(l.last() == 3, "last is appended value");
        assert(l.contains(2), "contains existing value");
        assert(not l.contains(42), "contains missing value");
        "#,
    );
}

#[test]
fn dict_literal_lookup_and_methods() {
    assert_ok(
        r#"
        let d = dict { a: 1, b: 2 };
        assert(len(d) == 2, "len");
        assert(d["a"] == 1, "lookup by key");
        assert(d.contains("b"), "contains key");
        assert(not d.contains("z"), "missing key");
        d["c"] = 3;
        assert(len(d) == 3, "insert via index assign");
        "#,
    );
}

#[test]
fn record_literal_field_access() {
    assert_ok(
        r#"
        let point = record { x: 1, y: 2 };
        assert(point.x == 1, "field x");
        assert(point.y == 2, "field y");
        assert(type_of(point) == "record", "record literal type_of");
        "#,
    );
}

#[test]
fn record_missing_field_faults() {
    assert_fails(
        r#"
        let point = record { x: 1 };
        let bad = point.z;
        "#,
        "no field",
    );
}

#[test]
fn array_map_filter() {
    assert_ok(
        r#"
        let a = array [1, 2, 3, 4, 5];
        let doubled = a.map(fn(x) { return x * 2; });
        assert(doubled[0] == 2, "mapped first");
        assert(doubled[4] == 10, "mapped last");

        let evens = a.filter(fn(x) { return x % 2 == 0; });
        assert(len(evens) == 2, "two even numbers");
        assert(evens[0] == 2, "first even");
        assert(evens[1] == 4, "second even");
        "#,
    );
}

#[test]
fn array_sort_with_comparator() {
    assert_ok(
        r#"
        let a = array [3, 1, 2];
        let sorted = a.sort(fn(x, y) { return x > y; });
        assert(sorted[0] == 1, "ascending first");
        assert(sorted[1] == 2, "ascending second");
        assert(sorted[2] == 3, "ascending third");
        "#,
    );
}

#[test]
fn list_sort_mutates_in_place() {
    assert_ok(
        r#"
        let l = list [3, 1, 2];
        l.sort(fn(x, y) { return x > y; });
        assert(l[0] == 1, "ascending first");
        assert(l[2] == 3, "ascending third");
        "#,
    );
}

#[test]
fn string_methods() {
    assert_ok(
        r#"
        let s = "Hello";
        assert(s.len() == 5, "len method");
        assert(s.upper() == "HELLO", "upper");
        assert(s.lower() == "hello", "lower");
        assert(s.substr(1, 3) == "ell", "substr");
        "#,
    );
}

#[test]
fn empty_list_first_and_last_are_user_errors() {
    assert_fails(
        r#"
        let l = list [];
        let x = l.first();
        "#,
        "empty",
    );
}

#[test]
fn out_of_range_index_is_a_user_error() {
    assert_fails(
        r#"
        let a = array [1, 2, 3];
        let x = a[5];
        "#,
        "out of range",
    );
}

#[test]
fn arity_mismatch_names_the_function_and_counts() {
    assert_fails(
        r#"
        fn add(a, b) {
            return a + b;
        }
        add(1);
        "#,
        "add",
    );
}

#[test]
fn type_of_builtin() {
    assert_ok(
        r#"
        assert(type_of(1) == "int", "int");
        assert(type_of(1.0) == "float", "float");
        assert(type_of("s") == "str", "str");
        assert(type_of(true) == "bool", "bool");
        assert(type_of(array [1]) == "array", "array");
        assert(type_of(list [1]) == "list", "list");
        assert(type_of(dict { a: 1 }) == "dict", "dict");
        assert(type_of(record { a: 1 }) == "record", "record");
        "#,
    );
}
