//! `os` native module.

use aster_core::{Heap, NativeFn, NativeModuleObj, Obj, Value};

fn name(heap: &mut Heap, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Obj(heap.alloc(Obj::Str(std::env::consts::OS.to_string()))))
}

fn path_separator(heap: &mut Heap, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Obj(heap.alloc(Obj::Str(std::path::MAIN_SEPARATOR.to_string()))))
}

pub fn register(heap: &mut Heap) -> NativeModuleObj {
    let mut m = NativeModuleObj { name: "os".to_string(), members: Default::default() };
    let fns: &[(&str, i32, aster_core::NativeFnPtr)] = &[("name", 0, name), ("path_separator", 0, path_separator)];
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
    fn name_returns_a_str() {
        let mut heap = Heap::new();
        let v = name(&mut heap, &[]).unwrap();
        assert!(heap.get(v.as_obj().unwrap()).as_str().is_some());
    }
}
