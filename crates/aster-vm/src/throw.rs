//! Exception unwinding against the `ExceptionHandler` stack.
//!
//! Replaces the original VM's `setjmp`/`longjmp` pair with direct stack
//! surgery: a throw pops the innermost still-open handler, truncates the
//! frame and operand stacks back to where that `try` was entered, and
//! resumes at its catch block. Nothing here is floor-aware — `dispatch::run`
//! is the layer that notices an unwind landed at or above the frame depth
//! it started from and reports that back to whichever Rust caller (a
//! user-function `Call`, a module import, a `map`/`filter`/`sort` callback)
//! is waiting on this particular nested execution.

use aster_core::{Heap, Obj, Value};

use crate::error::VmError;
use crate::format::stringify;
use crate::vm::Vm;

/// The outcome of anything that might throw instead of producing a value.
/// `Thrown` means a handler already caught it and repositioned execution;
/// the caller must not treat this as "no result", only as "don't push a
/// result — resume from wherever the handler left the VM".
pub enum Flow {
    Value(Value),
    Thrown,
}

/// Throws `value`: unwinds to the innermost open handler, or — if none is
/// open — turns it into the fatal `VmError` that reaches the program's
/// tier-2 report.
pub fn throw_value(vm: &mut Vm, value: Value) -> Result<(), VmError> {
    match vm.handlers.pop() {
        Some(h) => {
            vm.frames.truncate(h.frame_depth);
            vm.stack.truncate(h.stack_depth);
            vm.stack.push(value);
            if let Some(top) = vm.frames.last_mut() {
                top.ip = h.catch_ip;
            }
            Ok(())
        }
        None => {
            let (line, pathname) = vm.current_location();
            let trace = vm.trace_snapshot();
            Err(VmError::new(describe(&vm.heap, value), line, pathname).with_trace(trace))
        }
    }
}

/// Allocates `message` as a thrown string and routes it through
/// [`throw_value`]; the one helper every fault site in `dispatch` and
/// `builtins_glue` goes through.
pub fn fault(vm: &mut Vm, message: impl Into<String>) -> Result<Flow, VmError> {
    let v = Value::Obj(vm.heap.alloc(Obj::Str(message.into())));
    throw_value(vm, v)?;
    Ok(Flow::Thrown)
}

/// A thrown `Record` with a `msg: Str` field reports that string directly,
/// the same as a thrown plain string; anything else falls back to its
/// stringified form.
fn describe(heap: &Heap, value: Value) -> String {
    match value {
        Value::Obj(r) if heap.get(r).as_str().is_some() => stringify(heap, value),
        Value::Obj(r) => match heap.get(r) {
            Obj::Record(rec) => match rec.fields.get("msg") {
                Some(msg @ Value::Obj(mr)) if heap.get(*mr).as_str().is_some() => stringify(heap, *msg),
                _ => format!("uncaught exception: {}", stringify(heap, value)),
            },
            _ => format!("uncaught exception: {}", stringify(heap, value)),
        },
        other => format!("uncaught exception: {}", stringify(heap, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::{GcConfig, ScopeLimits};

    fn test_vm() -> Vm {
        Vm::new(std::path::PathBuf::new(), ScopeLimits::default(), GcConfig::default())
    }

    #[test]
    fn throw_with_no_open_handler_becomes_a_vm_error() {
        let mut vm = test_vm();
        let v = Value::Obj(vm.heap.alloc(Obj::Str("boom".to_string())));
        let err = throw_value(&mut vm, v).unwrap_err();
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn throw_with_no_handler_wraps_non_string_values() {
        let mut vm = test_vm();
        let err = throw_value(&mut vm, Value::Int(7)).unwrap_err();
        assert_eq!(err.message, "uncaught exception: 7");
    }

    #[test]
    fn fault_allocates_a_string_and_throws_it() {
        let mut vm = test_vm();
        let err = match fault(&mut vm, "went wrong") {
            Ok(_) => panic!("fault with no handler should propagate Err"),
            Err(e) => e,
        };
        assert_eq!(err.message, "went wrong");
    }
}
