//! `str` built-in methods. Indexing (`s[i]`) goes through the VM's index
//! opcodes, not a method here — this table only covers the named method
//! set from the language's built-in dispatch table.

use aster_core::{Heap, Obj, ObjRef, Value};

use super::MethodFn;

pub fn lookup(method: &str) -> Option<MethodFn> {
    Some(match method {
        "len" => len,
        "code" => code,
        "insert" => insert,
        "remove" => remove,
        "remove_first" => remove_first,
        "remove_last" => remove_last,
        "substr" => substr,
        "upper" => upper,
        "lower" => lower,
        "trim" => trim,
        "split" => split,
        "index_of" => index_of,
        "to_int" => to_int,
        "to_float" => to_float,
        _ => return None,
    })
}

fn this<'h>(heap: &'h Heap, r: ObjRef) -> Result<&'h str, String> {
    heap.get(r).as_str().ok_or_else(|| "receiver is not a str".to_string())
}

fn arg_str<'h>(heap: &'h Heap, args: &[Value], i: usize) -> Result<&'h str, String> {
    match args.get(i) {
        Some(Value::Obj(r)) => heap.get(*r).as_str().ok_or_else(|| format!("argument {i} is not a str")),
        _ => Err(format!("argument {i} is not a str")),
    }
}

fn arg_int(args: &[Value], i: usize) -> Result<i64, String> {
    match args.get(i) {
        Some(Value::Int(n)) => Ok(*n),
        _ => Err(format!("argument {i} is not an int")),
    }
}

fn len(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(this(heap, r)?.chars().count() as i64))
}

/// Codepoint of the character at `idx`, as `code_at` does in the method
/// tables of string-heavy scripting runtimes.
fn code(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let s = this(heap, r)?;
    if idx < 0 {
        return Err(format!("index {idx} out of range for str of length {}", s.chars().count()));
    }
    s.chars().nth(idx as usize).map(|c| Value::Int(c as i64)).ok_or_else(|| {
        format!("index {idx} out of range for str of length {}", s.chars().count())
    })
}

fn insert(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let inserted = arg_str(heap, args, 1)?.to_string();
    let s = this(heap, r)?;
    let mut chars: Vec<char> = s.chars().collect();
    if idx < 0 || idx as usize > chars.len() {
        return Err(format!("index {idx} out of range for str of length {}", chars.len()));
    }
    chars.splice(idx as usize..idx as usize, inserted.chars());
    let out: String = chars.into_iter().collect();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn remove(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let idx = arg_int(args, 0)?;
    let s = this(heap, r)?;
    let mut chars: Vec<char> = s.chars().collect();
    if idx < 0 || idx as usize >= chars.len() {
        return Err(format!("index {idx} out of range for str of length {}", chars.len()));
    }
    chars.remove(idx as usize);
    let out: String = chars.into_iter().collect();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn remove_first(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let s = this(heap, r)?;
    let mut chars = s.chars();
    chars.next().ok_or("remove_first on empty str")?;
    let out: String = chars.collect();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn remove_last(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let s = this(heap, r)?;
    let mut chars: Vec<char> = s.chars().collect();
    if chars.pop().is_none() {
        return Err("remove_last on empty str".to_string());
    }
    let out: String = chars.into_iter().collect();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

/// `substr(start, len)`, not `substring(start, end)` — matches the
/// language's own method name.
fn substr(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let start = arg_int(args, 0)?;
    let length = arg_int(args, 1)?;
    let s = this(heap, r)?;
    let chars: Vec<char> = s.chars().collect();
    if start < 0 || length < 0 || start as usize + length as usize > chars.len() {
        return Err(format!("substr({start}, {length}) out of range for str of length {}", chars.len()));
    }
    let out: String = chars[start as usize..start as usize + length as usize].iter().collect();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn upper(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let out = this(heap, r)?.to_uppercase();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn lower(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let out = this(heap, r)?.to_lowercase();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn trim(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let out = this(heap, r)?.trim().to_string();
    Ok(Value::Obj(heap.alloc(Obj::Str(out))))
}

fn split(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let sep = arg_str(heap, args, 0)?.to_string();
    let parts: Vec<String> = if sep.is_empty() {
        this(heap, r)?.chars().map(|c| c.to_string()).collect()
    } else {
        this(heap, r)?.split(&sep).map(|s| s.to_string()).collect()
    };
    let values: Vec<Value> = parts.into_iter().map(|p| Value::Obj(heap.alloc(Obj::Str(p)))).collect();
    Ok(Value::Obj(heap.alloc(Obj::List(values))))
}

fn index_of(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let needle = arg_str(heap, args, 0)?.to_string();
    let s = this(heap, r)?;
    Ok(Value::Int(s.find(&needle).map(|b| s[..b].chars().count() as i64).unwrap_or(-1)))
}

fn to_int(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.trim().parse::<i64>().map(Value::Int).map_err(|_| "str does not parse as int".to_string())
}

fn to_float(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this(heap, r)?.trim().parse::<f64>().map(Value::Float).map_err(|_| "str does not parse as float".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_and_len_roundtrip() {
        let mut heap = Heap::new();
        let s = heap.alloc(Obj::Str("hi".into()));
        let v = upper(&mut heap, s, &[]).unwrap();
        assert_eq!(heap.get(v.as_obj().unwrap()).as_str(), Some("HI"));
        assert_eq!(len(&mut heap, s, &[]).unwrap(), Value::Int(2));
    }

    #[test]
    fn split_on_separator() {
        let mut heap = Heap::new();
        let s = heap.alloc(Obj::Str("a,b,c".into()));
        let sep = heap.alloc(Obj::Str(",".into()));
        let result = split(&mut heap, s, &[Value::Obj(sep)]).unwrap();
        match heap.get(result.as_obj().unwrap()) {
            Obj::List(items) => assert_eq!(items.len(), 3),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn remove_first_and_last() {
        let mut heap = Heap::new();
        let s = heap.alloc(Obj::Str("abc".into()));
        let v = remove_first(&mut heap, s, &[]).unwrap();
        assert_eq!(heap.get(v.as_obj().unwrap()).as_str(), Some("bc"));
        let v = remove_last(&mut heap, s, &[]).unwrap();
        assert_eq!(heap.get(v.as_obj().unwrap()).as_str(), Some("ab"));
    }

    #[test]
    fn substr_out_of_range_errors() {
        let mut heap = Heap::new();
        let s = heap.alloc(Obj::Str("abc".into()));
        assert!(substr(&mut heap, s, &[Value::Int(1), Value::Int(10)]).is_err());
    }
}
