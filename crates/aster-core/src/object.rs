//! Heap object kinds.
//!
//! spec.md's 11 object kinds, realized as one `Obj` enum. `Str`/`Array`/
//! `List`/`Dict`/`Record` hold their payload inline; the callable and
//! module kinds hold the bookkeeping structs defined in `frame` and
//! `module`.

use crate::alloc::ObjRef;
use crate::frame::MetaClosure;
use crate::module::ModuleHandle;
use crate::value::{value_key, Value, ValueKey};
use aster_bytecode::Chunk;
use std::collections::HashMap;

pub type NativeFnPtr = fn(&mut crate::alloc::Heap, &[Value]) -> Result<Value, String>;

#[derive(Debug, Clone)]
pub struct NativeFn {
    pub name: String,
    /// `-1` marks a variadic native.
    pub arity: i32,
    pub func: NativeFnPtr,
}

#[derive(Debug, Clone)]
pub struct FnObj {
    pub name: String,
    pub arity: u8,
    pub chunk: Chunk,
    pub module: ModuleHandle,
    /// `Some` when this function closes over locals of an enclosing
    /// function; describes what to capture, not the captured values
    /// themselves (those live on the `Closure` built from this `Fn`).
    pub meta: Option<MetaClosure>,
}

#[derive(Debug, Clone)]
pub struct ClosureObj {
    pub func: ObjRef,
    /// Captured at closure-creation time, by value (spec.md §9's resolved
    /// open question) — not aliased back to the frame that created them.
    pub captured: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct NativeModuleObj {
    pub name: String,
    pub members: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
pub struct RecordObj {
    pub type_name: String,
    pub fields: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ForeignLibObj {
    pub path: String,
    /// Opaque handle into `aster-stdlib`'s native-library table; `aster-core`
    /// does not depend on `libloading` so it cannot hold the library itself.
    pub handle_id: u32,
}

#[derive(Debug, Clone)]
pub struct ForeignFnObj {
    pub lib: ObjRef,
    pub symbol: String,
    pub arity: i32,
}

/// A built-in method bound to its receiver, produced by `GetAttr` when the
/// receiver is a `Str`/`Array`/`List`/`Dict` and immediately consumed by a
/// following `Call`. Exists because those method tables live in
/// `aster-stdlib`, one layer above `aster-core`, so this only remembers
/// *what* to call (receiver plus name), not a resolved function pointer.
#[derive(Debug, Clone)]
pub struct BoundMethodObj {
    pub receiver: Value,
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum Obj {
    Str(String),
    Array(Box<[Value]>),
    List(Vec<Value>),
    /// Keyed by `ValueKey` so lookup doesn't need a `&Heap`, but each slot
    /// also keeps the original key `Value` so `keys()` can hand it back —
    /// `ValueKey::Ident` alone can't be turned back into the `Value` it
    /// came from for object-identity keys.
    Dict(HashMap<ValueKey, (Value, Value)>),
    Record(RecordObj),
    NativeFn(NativeFn),
    Fn(FnObj),
    Closure(ClosureObj),
    NativeModule(NativeModuleObj),
    Module(crate::module::ModuleObj),
    ForeignFn(ForeignFnObj),
    ForeignLib(ForeignLibObj),
    BoundMethod(BoundMethodObj),
}

impl Obj {
    pub fn type_name(&self) -> &'static str {
        match self {
            Obj::Str(_) => "str",
            Obj::Array(_) => "array",
            Obj::List(_) => "list",
            Obj::Dict(_) => "dict",
            Obj::Record(_) => "record",
            Obj::NativeFn(_) => "nativefn",
            Obj::Fn(_) => "fn",
            Obj::Closure(_) => "closure",
            Obj::NativeModule(_) => "nativemodule",
            Obj::Module(_) => "module",
            Obj::ForeignFn(_) => "foreignfn",
            Obj::ForeignLib(_) => "foreignlib",
            Obj::BoundMethod(_) => "boundmethod",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Obj::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Structural equality used when the two `ObjRef`s already failed the
    /// identity check. Only strings compare by content; every other kind
    /// is reference-semantic (two distinct arrays with equal elements are
    /// not `==`), matching how `values_equal` documents it.
    pub fn struct_eq(&self, other: &Obj) -> bool {
        match (self, other) {
            (Obj::Str(a), Obj::Str(b)) => a == b,
            _ => false,
        }
    }

    /// Rough accounting size in bytes, used only to drive the GC's
    /// allocate-vs-collect threshold — not an exact `size_of`.
    pub fn approx_size(&self) -> usize {
        let base = std::mem::size_of::<Obj>();
        base + match self {
            Obj::Str(s) => s.len(),
            Obj::Array(a) => a.len() * std::mem::size_of::<Value>(),
            Obj::List(l) => l.capacity() * std::mem::size_of::<Value>(),
            Obj::Dict(d) => d.len() * (std::mem::size_of::<Value>() * 2 + 32),
            Obj::Record(r) => r.fields.len() * 40,
            Obj::Fn(f) => f.chunk.code.len() * std::mem::size_of::<aster_bytecode::Op>(),
            Obj::Closure(c) => c.captured.len() * std::mem::size_of::<Value>(),
            Obj::NativeFn(_) | Obj::NativeModule(_) | Obj::Module(_) | Obj::ForeignFn(_) | Obj::ForeignLib(_) => 64,
            Obj::BoundMethod(_) => std::mem::size_of::<Value>() + 32,
        }
    }
}

/// Helper for native-method implementations that need to insert into a
/// `Dict` without reaching into `value::value_key` at every call site.
pub fn dict_insert(dict: &mut HashMap<ValueKey, (Value, Value)>, key: &Value, value: Value, heap: &crate::alloc::Heap) {
    dict.insert(value_key(key, heap), (*key, value));
}
