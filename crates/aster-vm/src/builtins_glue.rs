//! Everything a `Call` or `GetAttr` instruction needs beyond plain opcode
//! dispatch: invoking a callable value (bytecode function, closure, native,
//! or bound method) and resolving an attribute off a module/record/
//! collection receiver.
//!
//! `map`/`filter` and comparator-`sort` live here rather than in
//! `aster-stdlib` because they call back into user bytecode, which needs a
//! call stack `aster-stdlib`'s method tables don't have (see that crate's
//! own doc comment on `builtins::lookup`).

use aster_core::{is_callable, Frame, Obj, ObjRef, Value};

use crate::error::VmError;
use crate::throw::{fault, Flow};
use crate::vm::Vm;

macro_rules! unwrap_flow {
    ($expr:expr) => {
        match $expr? {
            Flow::Value(v) => v,
            Flow::Thrown => return Ok(Flow::Thrown),
        }
    };
}

/// Invokes any callable `Value` with already-evaluated `args`, recursing
/// into `dispatch::run` for bytecode functions/closures so that `Call`,
/// `map`/`filter`/`sort` callbacks, and module top-level execution all go
/// through one call path.
pub fn invoke(vm: &mut Vm, callee: Value, args: Vec<Value>) -> Result<Flow, VmError> {
    let Some(callee_ref) = callee.as_obj() else {
        return fault(vm, format!("{} is not callable", callee.type_name(&vm.heap)));
    };

    match vm.heap.get(callee_ref).clone() {
        Obj::Fn(f) => {
            if args.len() != f.arity as usize {
                return fault(vm, format!("'{}' expects {} argument(s), got {}", f.name, f.arity, args.len()));
            }
            call_bytecode(vm, callee_ref, None, args)
        }
        Obj::Closure(c) => {
            let arity = match vm.heap.get(c.func) {
                Obj::Fn(f) => f.arity,
                _ => unreachable!("Closure::func always points at an Obj::Fn"),
            };
            if args.len() != arity as usize {
                return fault(vm, format!("closure expects {} argument(s), got {}", arity, args.len()));
            }
            call_bytecode(vm, c.func, Some(callee_ref), args)
        }
        Obj::NativeFn(nf) => {
            if nf.arity >= 0 && nf.arity as usize != args.len() {
                return fault(vm, format!("'{}' expects {} argument(s), got {}", nf.name, nf.arity, args.len()));
            }
            match (nf.func)(&mut vm.heap, &args) {
                Ok(v) => Ok(Flow::Value(v)),
                Err(msg) => fault(vm, msg),
            }
        }
        Obj::BoundMethod(bm) => invoke_bound_method(vm, bm.receiver, bm.name, args),
        Obj::ForeignFn(ff) => fault(vm, format!("'{}' is a foreign function and cannot be called directly", ff.symbol)),
        other => fault(vm, format!("{} is not callable", other.type_name())),
    }
}

fn call_bytecode(vm: &mut Vm, func: ObjRef, closure: Option<ObjRef>, args: Vec<Value>) -> Result<Flow, VmError> {
    if vm.frames.len() >= vm.scope_limits.max_frames {
        return fault(vm, format!("call stack exceeded the limit of {} frames", vm.scope_limits.max_frames));
    }
    let base = vm.stack.len();
    vm.stack.extend(args);
    let floor = vm.frames.len();
    vm.frames.push(match closure {
        Some(c) => Frame::with_closure(func, c, base),
        None => Frame::new(func, base),
    });
    if vm.should_collect() {
        vm.collect_garbage();
    }
    crate::dispatch::run(vm, floor)
}

fn invoke_bound_method(vm: &mut Vm, receiver: Value, name: String, args: Vec<Value>) -> Result<Flow, VmError> {
    let Some(r) = receiver.as_obj() else {
        return fault(vm, "method receiver is not a heap object");
    };
    let type_name = vm.heap.get(r).type_name();

    if (type_name == "array" || type_name == "list") && name == "map" {
        return map_collection(vm, r, type_name, args);
    }
    if (type_name == "array" || type_name == "list") && name == "filter" {
        return filter_collection(vm, r, type_name, args);
    }
    if (type_name == "array" || type_name == "list")
        && name == "sort"
        && args.len() == 1
        && is_callable(&args[0], &vm.heap)
    {
        return sort_with_comparator(vm, r, type_name, args[0]);
    }

    match aster_stdlib::lookup_method(type_name, &name) {
        Some(method) => match method(&mut vm.heap, r, &args) {
            Ok(v) => Ok(Flow::Value(v)),
            Err(msg) => fault(vm, msg),
        },
        None => fault(vm, format!("{type_name} has no method '{name}'")),
    }
}

fn collection_items(vm: &Vm, r: ObjRef) -> Vec<Value> {
    match vm.heap.get(r) {
        Obj::Array(items) => items.to_vec(),
        Obj::List(items) => items.clone(),
        _ => unreachable!("collection_items called on a non-array/list receiver"),
    }
}

fn wrap_collection(vm: &mut Vm, type_name: &str, items: Vec<Value>) -> Value {
    let obj = if type_name == "array" { Obj::Array(items.into_boxed_slice()) } else { Obj::List(items) };
    Value::Obj(vm.heap.alloc(obj))
}

fn map_collection(vm: &mut Vm, r: ObjRef, type_name: &str, args: Vec<Value>) -> Result<Flow, VmError> {
    let Some(callback) = args.first().copied() else {
        return fault(vm, "map requires one callback argument");
    };
    let items = collection_items(vm, r);
    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        mapped.push(unwrap_flow!(invoke(vm, callback, vec![item])));
    }
    Ok(Flow::Value(wrap_collection(vm, type_name, mapped)))
}

fn filter_collection(vm: &mut Vm, r: ObjRef, type_name: &str, args: Vec<Value>) -> Result<Flow, VmError> {
    let Some(callback) = args.first().copied() else {
        return fault(vm, "filter requires one callback argument");
    };
    let items = collection_items(vm, r);
    let mut kept = Vec::new();
    for item in items {
        let keep = unwrap_flow!(invoke(vm, callback, vec![item]));
        if keep.truthy() {
            kept.push(item);
        }
    }
    Ok(Flow::Value(wrap_collection(vm, type_name, kept)))
}

/// Comparator-`sort`: `cmp(a, b)` returns truthy when `a` should be ordered
/// after `b`, the same "swap if truthy" convention the natural-order sort
/// already uses in `aster-stdlib`. Array sort returns a new array (matching
/// its other length-preserving... well, its other methods that don't
/// mutate); list sort mutates in place.
fn sort_with_comparator(vm: &mut Vm, r: ObjRef, type_name: &str, cmp: Value) -> Result<Flow, VmError> {
    let mut items = collection_items(vm, r);
    for i in 0..items.len() {
        for j in 0..items.len().saturating_sub(1 + i) {
            let result = unwrap_flow!(invoke(vm, cmp, vec![items[j], items[j + 1]]));
            if result.truthy() {
                items.swap(j, j + 1);
            }
        }
    }
    if type_name == "list" {
        if let Obj::List(slot) = vm.heap.get_mut(r) {
            *slot = items;
        }
        Ok(Flow::Value(Value::Empty))
    } else {
        Ok(Flow::Value(wrap_collection(vm, "array", items)))
    }
}

/// `GetAttr`: module/native-module member lookup, record field lookup, or
/// a `BoundMethod` for a str/array/list/dict method name.
pub fn get_attr(vm: &mut Vm, receiver: Value, name: &str) -> Result<Flow, VmError> {
    let Some(r) = receiver.as_obj() else {
        return fault(vm, format!("{} has no attribute '{name}'", receiver.type_name(&vm.heap)));
    };

    match vm.heap.get(r) {
        Obj::Module(m) => {
            let found = m.sub.borrow().get(name).filter(|g| g.public).map(|g| g.value);
            match found {
                Some(v) => Ok(Flow::Value(v)),
                None => fault(vm, format!("module '{}' has no public member '{name}'", m.name)),
            }
        }
        Obj::NativeModule(nm) => match nm.members.get(name).copied() {
            Some(v) => Ok(Flow::Value(v)),
            None => fault(vm, format!("native module '{}' has no member '{name}'", nm.name)),
        },
        Obj::Record(rec) => match rec.fields.get(name).copied() {
            Some(v) => Ok(Flow::Value(v)),
            None => fault(vm, format!("record '{}' has no field '{name}'", rec.type_name)),
        },
        Obj::Str(_) | Obj::Array(_) | Obj::List(_) | Obj::Dict(_) => {
            let type_name = vm.heap.get(r).type_name();
            let is_vm_layer_method = (type_name == "array" || type_name == "list")
                && matches!(name, "map" | "filter");
            if is_vm_layer_method || aster_stdlib::lookup_method(type_name, name).is_some() {
                let bm = vm.heap.alloc(Obj::BoundMethod(aster_core::BoundMethodObj { receiver, name: name.to_string() }));
                Ok(Flow::Value(Value::Obj(bm)))
            } else {
                fault(vm, format!("{type_name} has no method '{name}'"))
            }
        }
        other => fault(vm, format!("{} has no attribute '{name}'", other.type_name())),
    }
}
