//! Compile-time scope manager.
//!
//! Tracks nested lexical scopes as the compiler walks the AST and resolves
//! every identifier to exactly one of: a local slot in the current
//! function, a captured upvalue (possibly threaded through several
//! enclosing functions), or a global. Function boundaries are the only
//! scope kind that blocks direct local lookup — crossing one is what turns
//! a plain local reference into a capture candidate.

use aster_core::{Arena, ScopeLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Block,
    If,
    Elif,
    Else,
    While,
    For,
    Try,
    Catch,
    Fn,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Local,
    Global,
    NativeFn,
    Fn,
    Module,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Local(u8),
    Outer(u8),
}

impl From<CaptureSource> for aster_core::CaptureSource {
    fn from(c: CaptureSource) -> Self {
        match c {
            CaptureSource::Local(i) => aster_core::CaptureSource::Local(i),
            CaptureSource::Outer(i) => aster_core::CaptureSource::Outer(i),
        }
    }
}

#[derive(Debug, Clone)]
struct LocalSlot<'a> {
    name: &'a str,
    slot: u8,
    mutable: bool,
}

#[derive(Debug)]
struct Block<'a> {
    kind: ScopeKind,
    locals: Vec<LocalSlot<'a>>,
}

/// One function's worth of local-slot and upvalue bookkeeping. Pushed when
/// the compiler enters a `fn`/`proc`/lambda body, popped when it leaves.
/// Names live in the `Compiler`'s bump arena: none of this survives past a
/// single `compile()` call, so there is no reason to route it through the
/// GC heap the way a value that outlives compilation would be.
#[derive(Debug)]
struct FnScope<'a> {
    blocks: Vec<Block<'a>>,
    next_slot: u8,
    max_slot: u8,
    captures: Vec<(&'a str, CaptureSource)>,
}

impl<'a> FnScope<'a> {
    fn new() -> Self {
        Self { blocks: vec![Block { kind: ScopeKind::Fn, locals: Vec::new() }], next_slot: 0, max_slot: 0, captures: Vec::new() }
    }

    fn find_local(&self, name: &str) -> Option<u8> {
        for block in self.blocks.iter().rev() {
            if let Some(l) = block.locals.iter().rev().find(|l| l.name == name) {
                return Some(l.slot);
            }
        }
        None
    }

    fn find_capture(&self, name: &str) -> Option<u8> {
        self.captures.iter().position(|(n, _)| *n == name).map(|i| i as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Local(u8),
    Upvalue(u8),
    Global,
}

#[derive(Debug)]
pub enum ScopeError {
    TooManyLocals,
    TooManyFrames,
    DuplicateLocal(String),
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeError::TooManyLocals => write!(f, "too many local variables in one function (limit 255)"),
            ScopeError::TooManyFrames => write!(f, "function nesting too deep (limit 255)"),
            ScopeError::DuplicateLocal(n) => write!(f, "'{n}' is already declared in this scope"),
        }
    }
}

pub struct ScopeManager<'a> {
    arena: &'a Arena,
    fns: Vec<FnScope<'a>>,
    limits: ScopeLimits,
}

impl<'a> ScopeManager<'a> {
    pub fn new(limits: ScopeLimits, arena: &'a Arena) -> Self {
        Self { arena, fns: vec![FnScope::new()], limits }
    }

    pub fn enter_fn(&mut self) -> Result<(), ScopeError> {
        if self.fns.len() >= self.limits.max_frames {
            return Err(ScopeError::TooManyFrames);
        }
        self.fns.push(FnScope::new());
        Ok(())
    }

    /// Pop the current function scope, returning its capture list in
    /// declaration order (what `MetaClosure::captures` should be built
    /// from) and the number of local slots it used.
    pub fn exit_fn(&mut self) -> (Vec<CaptureSource>, u8) {
        let scope = self.fns.pop().expect("exit_fn without matching enter_fn");
        (scope.captures.into_iter().map(|(_, c)| c).collect(), scope.max_slot)
    }

    /// Index into the about-to-be-popped function's capture list that
    /// resolves to `name`, if the body ever referenced it. Queried before
    /// `exit_fn` by a named (non-lambda) function declaration to learn
    /// whether its own body captured itself by name — a recursive `fn`
    /// nested inside another function needs this to patch the closure's
    /// self-reference in after construction, since capture-by-value has no
    /// other way to let a closure see itself.
    pub fn pending_capture_index(&self, name: &str) -> Option<u8> {
        self.current_fn().find_capture(name)
    }

    pub fn enter_block(&mut self, kind: ScopeKind) {
        self.current_fn_mut().blocks.push(Block { kind, locals: Vec::new() });
    }

    /// Leave a block, returning how many locals it declared (the compiler
    /// emits one `Pop` per local that isn't the function's tail value).
    pub fn exit_block(&mut self) -> usize {
        let fn_scope = self.current_fn_mut();
        let block = fn_scope.blocks.pop().expect("exit_block without matching enter_block");
        fn_scope.next_slot -= block.locals.len() as u8;
        block.locals.len()
    }

    pub fn declare_local(&mut self, name: &str, mutable: bool) -> Result<u8, ScopeError> {
        let limit = self.limits.max_locals as u8;
        let arena = self.arena;
        let fn_scope = self.current_fn_mut();
        if fn_scope.blocks.last().unwrap().locals.iter().any(|l| l.name == name) {
            return Err(ScopeError::DuplicateLocal(name.to_string()));
        }
        if fn_scope.next_slot >= limit {
            return Err(ScopeError::TooManyLocals);
        }
        let slot = fn_scope.next_slot;
        fn_scope.next_slot += 1;
        fn_scope.max_slot = fn_scope.max_slot.max(fn_scope.next_slot);
        let name = arena.alloc_str(name);
        fn_scope.blocks.last_mut().unwrap().locals.push(LocalSlot { name, slot, mutable });
        Ok(slot)
    }

    pub fn is_mutable_local(&self, name: &str) -> Option<bool> {
        for block in self.current_fn().blocks.iter().rev() {
            if let Some(l) = block.locals.iter().rev().find(|l| l.name == name) {
                return Some(l.mutable);
            }
        }
        None
    }

    /// Resolve `name` against the current function first, then walk
    /// outward turning each crossed function boundary into a registered
    /// capture, finally falling back to `Resolution::Global`.
    pub fn resolve(&mut self, name: &str) -> Resolution {
        let depth = self.fns.len() - 1;
        if let Some(slot) = self.fns[depth].find_local(name) {
            return Resolution::Local(slot);
        }
        match self.resolve_upvalue(depth, name) {
            Some(idx) => Resolution::Upvalue(idx),
            None => Resolution::Global,
        }
    }

    fn resolve_upvalue(&mut self, fn_idx: usize, name: &str) -> Option<u8> {
        if fn_idx == 0 {
            return None;
        }
        if let Some(idx) = self.fns[fn_idx].find_capture(name) {
            return Some(idx);
        }
        let enclosing = fn_idx - 1;
        let source = if let Some(slot) = self.fns[enclosing].find_local(name) {
            CaptureSource::Local(slot)
        } else if let Some(up) = self.resolve_upvalue(enclosing, name) {
            CaptureSource::Outer(up)
        } else {
            return None;
        };
        let name = self.arena.alloc_str(name);
        let scope = &mut self.fns[fn_idx];
        let idx = scope.captures.len() as u8;
        scope.captures.push((name, source));
        Some(idx)
    }

    fn current_fn(&self) -> &FnScope<'a> {
        self.fns.last().unwrap()
    }

    fn current_fn_mut(&mut self) -> &mut FnScope<'a> {
        self.fns.last_mut().unwrap()
    }

    pub fn depth(&self) -> usize {
        self.fns.len()
    }

    /// How many local slots are currently occupied in the active function.
    /// `break`/`continue` use the difference between this at loop entry and
    /// at the jump site to know how many stack values to discard before
    /// jumping out of nested blocks.
    pub fn current_slot(&self) -> u8 {
        self.current_fn().next_slot
    }

    /// True while compiling statements directly in the module body (not
    /// nested in any `fn`/`proc`, and not nested in any control-flow
    /// block either) — the only place a `let` becomes a module global
    /// instead of a frame-local slot.
    pub fn at_top_level(&self) -> bool {
        self.fns.len() == 1 && self.current_fn().blocks.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_locals_in_same_function() {
        let arena = Arena::new();
        let mut mgr = ScopeManager::new(ScopeLimits::default(), &arena);
        let slot = mgr.declare_local("x", true).unwrap();
        assert_eq!(mgr.resolve("x"), Resolution::Local(slot));
    }

    #[test]
    fn unbound_name_resolves_to_global() {
        let arena = Arena::new();
        let mut mgr = ScopeManager::new(ScopeLimits::default(), &arena);
        assert_eq!(mgr.resolve("missing"), Resolution::Global);
    }

    #[test]
    fn crossing_a_fn_boundary_registers_a_capture() {
        let arena = Arena::new();
        let mut mgr = ScopeManager::new(ScopeLimits::default(), &arena);
        mgr.declare_local("x", false).unwrap();
        mgr.enter_fn().unwrap();
        let res = mgr.resolve("x");
        assert_eq!(res, Resolution::Upvalue(0));
        let (captures, _) = mgr.exit_fn();
        assert_eq!(captures, vec![CaptureSource::Local(0)]);
    }

    #[test]
    fn nested_closures_capture_transitively() {
        let arena = Arena::new();
        let mut mgr = ScopeManager::new(ScopeLimits::default(), &arena);
        mgr.declare_local("x", false).unwrap();
        mgr.enter_fn().unwrap(); // outer closure
        mgr.enter_fn().unwrap(); // inner closure
        assert_eq!(mgr.resolve("x"), Resolution::Upvalue(0));
        let (inner_captures, _) = mgr.exit_fn();
        assert_eq!(inner_captures, vec![CaptureSource::Outer(0)]);
        let (outer_captures, _) = mgr.exit_fn();
        assert_eq!(outer_captures, vec![CaptureSource::Local(0)]);
    }

    #[test]
    fn too_many_locals_is_rejected() {
        let arena = Arena::new();
        let mut mgr = ScopeManager::new(ScopeLimits { max_locals: 2, max_frames: 255, max_stack: 255 }, &arena);
        mgr.declare_local("a", false).unwrap();
        mgr.declare_local("b", false).unwrap();
        assert!(matches!(mgr.declare_local("c", false), Err(ScopeError::TooManyLocals)));
    }
}
