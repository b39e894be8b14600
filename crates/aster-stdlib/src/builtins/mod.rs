//! Native method tables for the built-in object kinds.
//!
//! A method here takes the receiver by `ObjRef` (so it can mutate
//! in-place, e.g. `list.push`) plus the call arguments, and returns a
//! `Value` or an error message; `aster-vm`'s builtin dispatch looks one up
//! by `(receiver type, method name)` when a `GetAttr` result is
//! immediately `Call`ed. Methods that would need to invoke back into user
//! bytecode (`map`, `filter`, a callback-based `sort`) are out of scope
//! here the same way spec.md keeps native module bodies interface-only;
//! they belong to the VM layer, which actually owns a call stack.

pub mod array;
pub mod dict;
pub mod list;
pub mod str;

use aster_core::{Heap, ObjRef, Value};

pub type MethodFn = fn(&mut Heap, ObjRef, &[Value]) -> Result<Value, String>;

pub fn lookup(type_name: &str, method: &str) -> Option<MethodFn> {
    match type_name {
        "str" => str::lookup(method),
        "array" => array::lookup(method),
        "list" => list::lookup(method),
        "dict" => dict::lookup(method),
        _ => None,
    }
}
