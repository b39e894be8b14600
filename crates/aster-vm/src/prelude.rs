//! Global built-ins available in every module without an `import`:
//! `len`, `print`, `type_of`, `assert`, `exit`. Registered as ordinary
//! `Obj::NativeFn` globals at module-build time (see `Vm::realize`) so
//! `GetGlobal` resolves them exactly like a user-defined global — notably
//! so `compile_for_iterator`'s hard-coded `GetGlobal("len")` + `Call(1)`
//! just works without the dispatch loop special-casing it.

use aster_core::{Heap, NativeFnPtr, Obj, Value};

use crate::format::stringify;

pub const PRELUDE: &[(&str, i32, NativeFnPtr)] =
    &[("len", 1, len), ("print", -1, print), ("type_of", 1, type_of), ("assert", -1, assert_fn), ("exit", 1, exit)];

fn len(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let v = args.first().ok_or("len requires one argument")?;
    match v {
        Value::Obj(r) => match heap.get(*r) {
            Obj::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
            Obj::Array(a) => Ok(Value::Int(a.len() as i64)),
            Obj::List(l) => Ok(Value::Int(l.len() as i64)),
            Obj::Dict(d) => Ok(Value::Int(d.len() as i64)),
            other => Err(format!("len is not defined for {}", other.type_name())),
        },
        _ => Err(format!("len is not defined for {}", v.type_name(heap))),
    }
}

fn print(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let rendered: Vec<String> = args.iter().map(|v| stringify(heap, *v)).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::Empty)
}

fn type_of(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let v = *args.first().ok_or("type_of requires one argument")?;
    Ok(Value::Obj(heap.alloc(Obj::Str(v.type_name(heap).to_string()))))
}

/// `assert(cond)` or `assert(cond, message)`. Failure is an `Err`, which
/// `invoke` turns into a regular catchable thrown exception — assertions
/// are just another source of runtime faults, not a separate mechanism.
fn assert_fn(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let cond = args.first().ok_or("assert requires at least one argument")?;
    if cond.truthy() {
        return Ok(Value::Empty);
    }
    match args.get(1) {
        Some(msg) => Err(stringify(heap, *msg)),
        None => Err("assertion failed".to_string()),
    }
}

fn exit(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let code = match args.first() {
        Some(Value::Int(n)) if (0..=255).contains(n) => *n as i32,
        Some(Value::Int(_)) => return Err("exit code must be between 0 and 255".to_string()),
        _ => return Err("exit requires an int argument".to_string()),
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_reports_container_sizes() {
        let mut heap = Heap::new();
        let s = heap.alloc(Obj::Str("hey".to_string()));
        assert_eq!(len(&mut heap, &[Value::Obj(s)]), Ok(Value::Int(3)));

        let a = heap.alloc(Obj::Array(vec![Value::Int(1), Value::Int(2)].into_boxed_slice()));
        assert_eq!(len(&mut heap, &[Value::Obj(a)]), Ok(Value::Int(2)));
    }

    #[test]
    fn len_rejects_non_container_values() {
        let mut heap = Heap::new();
        assert!(len(&mut heap, &[Value::Int(1)]).is_err());
    }

    #[test]
    fn type_of_names_primitives() {
        let mut heap = Heap::new();
        let v = type_of(&mut heap, &[Value::Int(1)]).unwrap();
        assert_eq!(heap.get(v.as_obj().unwrap()).as_str(), Some("int"));
    }

    #[test]
    fn assert_passes_on_truthy_condition() {
        let mut heap = Heap::new();
        assert_eq!(assert_fn(&mut heap, &[Value::Bool(true)]), Ok(Value::Empty));
    }

    #[test]
    fn assert_fails_with_default_message() {
        let mut heap = Heap::new();
        assert_eq!(assert_fn(&mut heap, &[Value::Bool(false)]), Err("assertion failed".to_string()));
    }

    #[test]
    fn assert_fails_with_custom_message() {
        let mut heap = Heap::new();
        let msg = heap.alloc(Obj::Str("custom".to_string()));
        assert_eq!(assert_fn(&mut heap, &[Value::Bool(false), Value::Obj(msg)]), Err("custom".to_string()));
    }
}
