//! `array` built-in methods. Arrays are fixed-length, so every method
//! that would change the length (`grow`, `insert`, `insert_at`, `remove`,
//! `append`) returns a new array rather than mutating in place; `list`
//! is the growable counterpart. Indexing (`a[i]`) goes through the VM's
//! index opcodes, not a method here.

use aster_core::{values_equal, Heap, Obj, ObjRef, Value};

use super::MethodFn;

pub fn lookup(method: &str) -> Option<MethodFn> {
    Some(match method {
        "len" => len,
        "grow" => grow,
        "to_list" => to_list,
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
        Obj::Array(a) => Ok(a),
        _ => Err("receiver is not an array".to_string()),
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

/// Returns a new array with `n` additional empty-valued slots appended.
fn grow(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let n = arg_int(args, 0)?;
    if n < 0 {
        return Err("grow requires a non-negative amount".to_string());
    }
    let mut items = this(heap, r)?.to_vec();
    items.extend(std::iter::repeat(Value::Empty).take(n as usize));
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

fn to_list(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let items = this(heap, r)?.to_vec();
    Ok(Value::Obj(heap.alloc(Obj::List(items))))
}

fn first(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.first().copied().ok_or_else(|| "first on empty array".to_string())
}

fn last(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.last().copied().ok_or_else(|| "last on empty array".to_string())
}

/// Prepends `value`, returning a new array. `append` is the complementary
/// add-at-the-end operation; `insert_at` takes an explicit index.
fn insert(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let value = *args.first().ok_or("insert requires one argument")?;
    let mut items = this(heap, r)?.to_vec();
    items.insert(0, value);
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

fn insert_at(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let value = *args.get(1).ok_or("insert_at requires an index and a value")?;
    let mut items = this(heap, r)?.to_vec();
    if idx < 0 || idx as usize > items.len() {
        return Err(format!("index {idx} out of range for array of length {}", items.len()));
    }
    items.insert(idx as usize, value);
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

fn remove(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let mut items = this(heap, r)?.to_vec();
    if idx < 0 || idx as usize >= items.len() {
        return Err(format!("index {idx} out of range for array of length {}", items.len()));
    }
    items.remove(idx as usize);
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

fn append(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let value = *args.first().ok_or("append requires one argument")?;
    let mut items = this(heap, r)?.to_vec();
    items.push(value);
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
}

/// Sorts by natural ordering of ints/floats, returning a new array. A
/// callback-based comparator sort belongs to the VM layer.
fn sort(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let mut items = this(heap, r)?.to_vec();
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
    Ok(Value::Obj(heap.alloc(Obj::Array(items.into_boxed_slice()))))
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
    fn first_last_len() {
        let mut heap = Heap::new();
        let a = heap.alloc(Obj::Array(vec![Value::Int(1), Value::Int(2)].into_boxed_slice()));
        assert_eq!(len(&mut heap, a, &[]).unwrap(), Value::Int(2));
        assert_eq!(first(&mut heap, a, &[]).unwrap(), Value::Int(1));
        assert_eq!(last(&mut heap, a, &[]).unwrap(), Value::Int(2));
    }

    #[test]
    fn grow_pads_with_empty() {
        let mut heap = Heap::new();
        let a = heap.alloc(Obj::Array(vec![Value::Int(1)].into_boxed_slice()));
        let grown = grow(&mut heap, a, &[Value::Int(2)]).unwrap();
        match heap.get(grown.as_obj().unwrap()) {
            Obj::Array(items) => assert_eq!(items.as_ref(), &[Value::Int(1), Value::Empty, Value::Empty]),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn remove_out_of_range_errors() {
        let mut heap = Heap::new();
        let a = heap.alloc(Obj::Array(vec![Value::Int(1)].into_boxed_slice()));
        assert!(remove(&mut heap, a, &[Value::Int(5)]).is_err());
    }
}
