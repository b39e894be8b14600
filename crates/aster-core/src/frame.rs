//! Call frames and closure capture descriptors.

use crate::alloc::ObjRef;

/// Where a closure's Nth captured value comes from, recorded at compile
/// time on the `Fn` it closes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    /// Capture local slot `_0` of the frame that is executing when the
    /// `Closure` instruction runs.
    Local(u8),
    /// Capture the `_0`th already-captured value of the *enclosing*
    /// closure (for a closure nested inside another closure).
    Outer(u8),
}

#[derive(Debug, Clone, Default)]
pub struct MetaClosure {
    pub captures: Vec<CaptureSource>,
    /// `Some(i)` when this closure captured its own defining name (a
    /// recursive nested `fn`) at capture index `i` — `make_fn` patches that
    /// slot to point back at the freshly-allocated closure, since a
    /// by-value capture has no other way to reference a value that doesn't
    /// exist yet when captures are taken.
    pub self_capture: Option<u8>,
}

/// One activation of a `Fn` or `Closure`. `base` is the operand-stack index
/// of local slot 0; `ip` indexes into `func`'s chunk.
#[derive(Debug, Clone)]
pub struct Frame {
    pub func: ObjRef,
    /// `Some` when `func` is being run through a `Closure` wrapper, giving
    /// access to the captured-by-value upvalues.
    pub closure: Option<ObjRef>,
    pub ip: usize,
    pub base: usize,
}

impl Frame {
    pub fn new(func: ObjRef, base: usize) -> Self {
        Self { func, closure: None, ip: 0, base }
    }

    pub fn with_closure(func: ObjRef, closure: ObjRef, base: usize) -> Self {
        Self { func, closure: Some(closure), ip: 0, base }
    }
}
