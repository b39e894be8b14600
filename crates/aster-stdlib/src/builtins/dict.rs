//! `dict` built-in methods. Keying (`d[key]`) and insertion (`d[key] =
//! value`) go through the VM's index opcodes, not methods here — this
//! table only covers `len`, `contains`, `clear`, `remove`, `keys`,
//! `values`. Keys follow the `ValueKey` rules in `aster-core::value`:
//! primitives and strs key by value, everything else by heap identity.

use std::collections::HashMap;

use aster_core::{value_key, Heap, Obj, ObjRef, Value, ValueKey};

use super::MethodFn;

pub fn lookup(method: &str) -> Option<MethodFn> {
    Some(match method {
        "len" => len,
        "contains" => contains,
        "clear" => clear,
        "remove" => remove,
        "keys" => keys,
        "values" => values,
        _ => return None,
    })
}

fn this<'h>(heap: &'h Heap, r: ObjRef) -> Result<&'h HashMap<ValueKey, (Value, Value)>, String> {
    match heap.get(r) {
        Obj::Dict(m) => Ok(m),
        _ => Err("receiver is not a dict".to_string()),
    }
}

fn this_mut<'h>(heap: &'h mut Heap, r: ObjRef) -> Result<&'h mut HashMap<ValueKey, (Value, Value)>, String> {
    match heap.get_mut(r) {
        Obj::Dict(m) => Ok(m),
        _ => Err("receiver is not a dict".to_string()),
    }
}

fn len(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::Int(this(heap, r)?.len() as i64))
}

fn contains(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let key = *args.first().ok_or("contains requires one argument")?;
    let k = value_key(&key, heap);
    Ok(Value::Bool(this(heap, r)?.contains_key(&k)))
}

fn clear(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    this_mut(heap, r)?.clear();
    Ok(Value::Empty)
}

fn remove(heap: &mut Heap, r: ObjRef, args: &[Value]) -> Result<Value, String> {
    let key = *args.first().ok_or("remove requires one argument")?;
    let k = value_key(&key, heap);
    Ok(this_mut(heap, r)?.remove(&k).map(|(_, v)| v).unwrap_or(Value::Empty))
}

fn keys(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let ks: Vec<Value> = this(heap, r)?.values().map(|(k, _)| *k).collect();
    Ok(Value::Obj(heap.alloc(Obj::List(ks))))
}

fn values(heap: &mut Heap, r: ObjRef, _args: &[Value]) -> Result<Value, String> {
    let vs: Vec<Value> = this(heap, r)?.values().map(|(_, v)| *v).collect();
    Ok(Value::Obj(heap.alloc(Obj::List(vs))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_and_remove() {
        let mut heap = Heap::new();
        let d = heap.alloc(Obj::Dict(HashMap::new()));
        let key = heap.alloc(Obj::Str("a".into()));
        let k = Value::Obj(key);
        let vk = value_key(&k, &heap);
        match heap.get_mut(d) {
            Obj::Dict(map) => {
                map.insert(vk, (k, Value::Int(1)));
            }
            _ => unreachable!(),
        }
        assert_eq!(contains(&mut heap, d, &[Value::Obj(key)]).unwrap(), Value::Bool(true));
        assert_eq!(len(&mut heap, d, &[]).unwrap(), Value::Int(1));
        assert_eq!(remove(&mut heap, d, &[Value::Obj(key)]).unwrap(), Value::Int(1));
        assert_eq!(len(&mut heap, d, &[]).unwrap(), Value::Int(0));
    }

    #[test]
    fn keys_and_values_roundtrip() {
        let mut heap = Heap::new();
        let d = heap.alloc(Obj::Dict(HashMap::new()));
        let key = heap.alloc(Obj::Str("a".into()));
        let k = Value::Obj(key);
        let vk = value_key(&k, &heap);
        match heap.get_mut(d) {
            Obj::Dict(map) => {
                map.insert(vk, (k, Value::Int(1)));
            }
            _ => unreachable!(),
        }
        let ks = keys(&mut heap, d, &[]).unwrap();
        match heap.get(ks.as_obj().unwrap()) {
            Obj::List(items) => assert_eq!(items.len(), 1),
            _ => panic!("expected list"),
        }
    }
}
