//! `Op::MakeFn`: turning a module's `idx`th `Fn` prototype into a `Closure`
//! that has captured its free variables by value out of the currently
//! executing frame.

use aster_core::{CaptureSource, ClosureObj, Obj, ObjRef, Value};

use crate::vm::Vm;

/// Realizes `MakeFn(idx)`: looks up prototype `idx` in the current frame's
/// module, captures each of its free variables, and allocates the `Closure`.
pub fn make_fn(vm: &mut Vm, idx: u16) -> ObjRef {
    let frame = vm.frames.last().expect("MakeFn with no active frame");
    let base = frame.base;
    let enclosing_closure = frame.closure;
    let module = vm.current_frame_module();

    let proto = vm.fn_tables.get(&module).expect("module has no fn table")[idx as usize];
    let (captures, self_capture) = match vm.heap.get(proto) {
        Obj::Fn(f) => match &f.meta {
            Some(m) => (m.captures.clone(), m.self_capture),
            None => (Vec::new(), None),
        },
        _ => unreachable!("fn_tables only ever holds Obj::Fn refs"),
    };

    // The self-capture slot (if any) names this very closure, which doesn't
    // exist until after it's allocated below — the frame-local slot
    // reserved for it at compile time may not even have been pushed onto
    // the operand stack yet. Skip reading it here; `self_capture` gets
    // patched in once the closure is real.
    let captured: Vec<Value> = captures
        .iter()
        .enumerate()
        .map(|(i, source)| {
            if Some(i as u8) == self_capture {
                return Value::Empty;
            }
            match source {
                CaptureSource::Local(slot) => vm.stack[base + *slot as usize],
                CaptureSource::Outer(idx) => {
                    let enclosing = enclosing_closure.expect("Outer capture with no enclosing closure");
                    match vm.heap.get(enclosing) {
                        Obj::Closure(c) => c.captured[*idx as usize],
                        _ => unreachable!("Frame::closure always points at an Obj::Closure"),
                    }
                }
            }
        })
        .collect();

    let closure_ref = vm.heap.alloc(Obj::Closure(ClosureObj { func: proto, captured }));
    // A recursive nested `fn` captured its own (not-yet-existing) value by
    // name; patch that slot now that the closure actually exists.
    if let Some(i) = self_capture {
        if let Obj::Closure(c) = vm.heap.get_mut(closure_ref) {
            c.captured[i as usize] = Value::Obj(closure_ref);
        }
    }
    closure_ref
}
