//! `list` built-in methods. Lists are growable, so unlike `array` these
//! mutate the receiver in place instead of returning a new object.
//! Indexing (`l[i]`) goes through the VM's index opcodes, not a method.

use aster_core::{values_equal, Heap, Obj, ObjRef, Value};

use super::MethodFn;

pub fn lookup(method: &str) -> Option<MethodFn> {
    Some(match method {
        "len" => len,
        "clear" => clear,
        "to_array" => to_array,
        "first" => first,
        "last" => last,
        "insert" => insert,
        "insert_at" => insert_at,
        "remove" => remove,
        "append" => append,
        "sort" => sort,
        "contains" => contains,
        _ => return None,
    })
}

fn this<'h>(heap: &'h Heap, r: ObjRef) -> Result<&'h [Value], String> {
    match heap.get(r) {
        Obj::List(items) => Ok(items),
        _ => Err("receiver is not a list".to_string()),
    }
}

fn this_mut<'h>(heap: &'h mut Heap, r: ObjRef) -> Result<&'h mut Vec<Value>, String> {
    match heap.get_mut(r) {
        Obj::List(items) => Ok(items),
        _ => Err("receiver is not a list".to_string()),
    }
}

fn arg_int(args: &[Value], i: usize) -> Result<i64, String> {
    match args.get(i) {
        Some(Value::Int(n)) => Ok(*n),
        _ => Err(format!("argument {i} is not an int")),
    }
}

fn len(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(this(heap, r)?.len() as i64))
}

fn clear(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this_mut(heap, r)?.clear();
    Ok(Value::Empty)
}

fn to_array(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let items = this(heap, r)?.to_vec();
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

fn first(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.first().copied().ok_or_else(|| "first on empty list".to_string())
}

fn last(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.last().copied().ok_or_else(|| "last on empty list".to_string())
}

/// Prepends `value` in place. `append` is the complementary
/// add-at-the-end operation; `insert_at` takes an explicit index.
fn insert(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let value = *args.first().ok_or("insert requires one argument")?;
    this_mut(heap, r)?.insert(0, value);
    Ok(Value::Empty)
}

fn insert_at(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let value = *args.get(1).ok_or("insert_at requires an index and a value")?;
    let items = this_mut(heap, r)?;
    if idx < 0 || idx as usize > items.len() {
        return Err(format!("index {idx} out of range for list of length {}", items.len()));
    }
    items.insert(idx as usize, value);
    Ok(Value::Empty)
}

fn remove(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let items = this_mut(heap, r)?;
    if idx < 0 || idx as usize >= items.len() {
        return Err(format!("index {idx} out of range for list of length {}", items.len()));
    }
    Ok(items.remove(idx as usize))
}

fn append(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let value = *args.first().ok_or("append requires one argument")?;
    this_mut(heap, r)?.push(value);
    Ok(Value::Empty)
}

/// Sorts in place by natural ordering of ints/floats. A callback-based
/// comparator sort belongs to the VM layer, which can invoke user code.
fn sort(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let items = this_mut(heap, r)?;
    for i in 0..items.len() {
        for j in 0..items.len().saturating_sub(1 + i) {
            let swap = match (items[j], items[j + 1]) {
                (Value::Int(a), Value::Int(b)) => a > b,
                (Value::Float(a), Value::Float(b)) => a > b,
                (Value::Int(a), Value::Float(b)) => (a as f64) > b,
                (Value::Float(a), Value::Int(b)) => a > b as f64,
                _ => return Err("sort without a callback only supports numbers".to_string()),
            };
            if swap {
                items.swap(j, j + 1);
            }
        }
    }
    Ok(Value::Empty)
}

fn contains(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let needle = *args.first().ok_or("contains requires one argument")?;
    let items = this(heap, r)?.to_vec();
    Ok(Value::Bool(items.iter().any(|v| values_equal(v, &needle, heap))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_remove() {
        let mut heap = Heap::new();
        let l = heap.alloc(Obj::List(vec![]));
        append(&mut heap, l, &[Value::Int(1)]).unwrap();
        append(&mut heap, l, &[Value::Int(2)]).unwrap();
        assert_eq!(len(&mut heap, l, &[]).unwrap(), Value::Int(2));
        assert_eq!(remove(&mut heap, l, &[Value::Int(0)]).unwrap(), Value::Int(1));
        assert_eq!(len(&mut heap, l, &[]).unwrap(), Value::Int(1));
    }

    #[test]
    fn sort_numbers() {
        let mut heap = Heap::new();
        let l = heap.alloc(Obj::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]));
        sort(&mut heap, l, &[]).unwrap();
        match heap.get(l) {
            Obj::List(items) => assert_eq!(items, &[Value::Int(1), Value::Int(2), Value::Int(3)]),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn remove_out_of_range_errors() {
        let mut heap = Heap::new();
        let l = heap.alloc(Obj::List(vec![Value::Int(1)]));
        assert!(remove(&mut heap, l, &[Value::Int(4)]).is_err());
    }
}
