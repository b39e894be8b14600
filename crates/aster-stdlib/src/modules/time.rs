//! `time` native module.

use std::time::{SystemTime, UNIX_EPOCH};

use aster_core::{Heap, NativeFn, NativeModuleObj, Obj, Value};

fn millis(_heap: &mut Heap, _args: &[Value]) -> Result<Value, String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|_| "system clock before epoch".to_string())?;
    Ok(Value::Int(now.as_millis() as i64))
}

fn msleep(_heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let n = match args.first() {
        Some(Value::Int(n)) if *n >= 0 => *n as u64,
        _ => return Err("msleep requires a non-negative int of milliseconds".to_string()),
    };
    std::thread::sleep(std::time::Duration::from_millis(n));
    Ok(Value::Empty)
}

pub fn register(heap: &mut Heap) -> NativeModuleObj {
    let mut m = NativeModuleObj { name: "time".to_string(), members: Default::default() };
    let fns: &[(&str, i32, aster_core::NativeFnPtr)] = &[("millis", 0, millis), ("msleep", 1, msleep)];
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
    fn millis_is_positive() {
        let mut heap = Heap::new();
        match millis(&mut heap, &[]).unwrap() {
            Value::Int(n) => assert!(n > 0),
            _ => panic!("expected int"),
        }
    }
}
