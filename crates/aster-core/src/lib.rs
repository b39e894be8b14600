//! The object model, allocator, string interner, module model and
//! mark-sweep collector shared by `aster-compiler` and `aster-vm`.

pub mod alloc;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exception;
pub mod frame;
pub mod gc;
pub mod intern;
pub mod module;
pub mod object;
pub mod value;

pub use alloc::{Arena, Heap, ObjRef};
pub use config::{GcConfig, ScopeLimits};
pub use diagnostics::{Diagnostic, LineIndex, Severity};
pub use error::CoreError;
pub use exception::{Exception, ExceptionHandler};
pub use frame::{CaptureSource, Frame, MetaClosure};
pub use gc::Gc;
pub use intern::{fnv1a, InternedStr, StringTable};
pub use module::{GlobalValue, ModuleHandle, ModuleObj, SubModule};
pub use object::{
    dict_insert, BoundMethodObj, ClosureObj, FnObj, ForeignFnObj, ForeignLibObj, NativeFn, NativeFnPtr,
    NativeModuleObj, Obj, RecordObj,
};
pub use value::{hash_value, is_array, is_callable, is_dict, is_list, is_record, is_str, value_key, values_equal, Value, ValueKey};
