//! `io` native module. The original exposes an open/read_byte/write_byte
//! file-handle API backed by a `Record` type carrying a raw `FILE*`; that
//! record kind isn't part of this object model (§3 Non-goals scope out
//! a first-class file handle object), so this keeps the path-based
//! whole-file operations and drops the handle-oriented ones.

use aster_core::{Heap, NativeFn, NativeModuleObj, Obj, Value};

fn arg_str<'h>(heap: &'h Heap, args: &[Value], i: usize) -> Result<&'h str, String> {
    match args.get(i) {
        Some(Value::Obj(r)) => heap.get(*r).as_str().ok_or_else(|| format!("argument {i} is not a str")),
        _ => Err(format!("argument {i} is not a str")),
    }
}

fn read_file(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let path = arg_str(heap, args, 0)?.to_string();
    let content = std::fs::read_to_string(&path).map_err(|e| format!("failed to read '{path}': {e}"))?;
    Ok(Value::Obj(heap.alloc(Obj::Str(content))))
}

fn write_file(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let path = arg_str(heap, args, 0)?.to_string();
    let content = arg_str(heap, args, 1)?.to_string();
    std::fs::write(&path, content).map_err(|e| format!("failed to write '{path}': {e}"))?;
    Ok(Value::Empty)
}

fn append_file(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    use std::io::Write;
    let path = arg_str(heap, args, 0)?.to_string();
    let content = arg_str(heap, args, 1)?.to_string();
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("failed to open '{path}' for append: {e}"))?;
    f.write_all(content.as_bytes()).map_err(|e| format!("failed to append to '{path}': {e}"))
}

fn is_file(heap: &mut Heap, args: &[Value]) -> Result<Value, String> {
    let path = arg_str(heap, args, 0)?.to_string();
    Ok(Value::Bool(std::path::Path::new(&path).is_file()))
}

pub fn register(heap: &mut Heap) -> NativeModuleObj {
    let mut m = NativeModuleObj { name: "io".to_string(), members: Default::default() };
    let fns: &[(&str, i32, aster_core::NativeFnPtr)] = &[
        ("read_file", 1, read_file),
        ("write_file", 2, write_file),
        ("append_file", 2, append_file),
        ("is_file", 1, is_file),
    ];
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
    fn write_then_read_roundtrip() {
        let mut heap = Heap::new();
        let dir = std::env::temp_dir().join(format!("aster-stdlib-io-test-{:p}", &heap));
        let path = heap.alloc(Obj::Str(dir.to_string_lossy().to_string()));
        let content = heap.alloc(Obj::Str("hello".to_string()));
        write_file(&mut heap, &[Value::Obj(path), Value::Obj(content)]).unwrap();
        let result = read_file(&mut heap, &[Value::Obj(path)]).unwrap();
        assert_eq!(heap.get(result.as_obj().unwrap()).as_str(), Some("hello"));
        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn read_missing_file_errors() {
        let mut heap = Heap::new();
        let path = heap.alloc(Obj::Str("/nonexistent/aster-stdlib-test-path".to_string()));
        assert!(read_file(&mut heap, &[Value::Obj(path)]).is_err());
    }
}
