//! `random` native module. The original's module body is an empty stub
//! (it only pulls in an unused xoshiro256 header); this fills it in with
//! the two operations every embedding script needs, using `rand` the
//! way the corpus's own VM project depends on it for randomness.

use aster_core::{Heap, NativeFn, NativeModuleObj, Obj, Value};
use rand::Rng;

fn float(_heap: &mut Heap, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Float(rand::thread_rng().gen_range(0.0..1.0)))
}

fn int(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let lo = match args.first() {
        Some(Value::Int(n)) => *n,
        _ => return Err("int requires a min and a max int".to_string()),
    };
    let hi = match args.get(1) {
        Some(Value::Int(n)) => *n,
        _ => return Err("int requires a min and a max int".to_string()),
    };
    if lo > hi {
        return Err(format!("min {lo} is greater than max {hi}"));
    }
    Ok(Value::Int(rand::thread_rng().gen_range(lo..=hi)))
}

pub fn register(heap: &mut Heap) -> NativeModuleObj {
    let mut m = NativeModuleObj { name: "random".to_string(), members: Default::default() };
    let fns: &[(&str, i32, aster_core::NativeFnPtr)] = &[("float", 0, float), ("int", 2, int)];
    for (fn_name, arity, func) in fns {
        let r = heap.alloc(Obj::NativeFn(NativeFn { name: fn_name.to_string(), arity: *arity, func: *func }));
        m.members.insert(fn_name.to_string(), Value::Obj(r));
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_is_in_unit_range() {
        let mut heap = Heap::new();
        match float(&mut heap, &[]).unwrap() {
            Value::Float(f) => assert!((0.0..1.0).contains(&f)),
            _ => panic!("expected float"),
        }
    }

    #[test]
    fn int_respects_bounds() {
        let mut heap = Heap::new();
        match int(&mut heap, &[Value::Int(5), Value::Int(5)]).unwrap() {
            Value::Int(n) => assert_eq!(n, 5),
            _ => panic!("expected int"),
        }
    }

    #[test]
    fn int_rejects_inverted_range() {
        let mut heap = Heap::new();
        assert!(int(&mut heap, &[Value::Int(5), Value::Int(1)]).is_err());
    }
}
