//! Module model.
//!
//! `Module` and `SubModule` are split so an `import "x" as a` and a second
//! `import "x" as b` in the same program can each get their own `Module`
//! object (own name/path for diagnostics) while sharing one `SubModule` —
//! the globals table and the "has this module's top-level code already run"
//! flag. Without the split, a second alias would either re-run top-level
//! code or require deep-cloning the first module's state.

use crate::alloc::ObjRef;
use crate::intern::{InternedStr, StringTable};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// `Module`s live in the GC heap like everything else; this is just the
/// handle type spelled out for readability at call sites.
pub type ModuleHandle = ObjRef;

#[derive(Debug, Clone)]
pub struct GlobalValue {
    pub value: Value,
    pub mutable: bool,
    pub public: bool,
}

#[derive(Debug, Default)]
pub struct SubModule {
    pub globals: HashMap<String, GlobalValue>,
    /// Set once the module's top-level statements have executed; a second
    /// import of the same path must not run them again.
    pub resolved: bool,
    pub top_fn: Option<ObjRef>,
    /// Content-addressed cache from a string literal's FNV-1a identity to
    /// the one heap `Obj::Str` standing in for every occurrence of that
    /// text in this module: `Op::Str` interns through here instead of
    /// allocating fresh every time it executes, so two textually equal
    /// literals (including the same literal re-executed in a loop) share
    /// one object identity.
    strings: StringTable,
    string_cache: HashMap<InternedStr, Value>,
}

impl SubModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, value: Value, mutable: bool, public: bool) {
        self.globals.insert(name.into(), GlobalValue { value, mutable, public });
    }

    pub fn get(&self, name: &str) -> Option<&GlobalValue> {
        self.globals.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GlobalValue> {
        self.globals.get_mut(name)
    }

    /// Looks up `text` in this module's string intern table, returning the
    /// cached heap value if one was already allocated for it. `None` means
    /// the caller must allocate a fresh `Obj::Str` and register it via
    /// [`SubModule::cache_interned`].
    pub fn intern_lookup(&mut self, text: &str) -> Option<Value> {
        let handle = self.strings.intern(text);
        self.string_cache.get(&handle).copied()
    }

    /// Registers the heap value just allocated for `text` so the next
    /// `intern_lookup` of the same text reuses it.
    pub fn cache_interned(&mut self, text: &str, value: Value) {
        let handle = self.strings.intern(text);
        self.string_cache.insert(handle, value);
    }

    /// Every cached interned string value, for the GC mark pass to keep
    /// alive even if nothing else currently references it.
    pub fn interned_values(&self) -> impl Iterator<Item = &Value> {
        self.string_cache.values()
    }
}

/// A module as seen from its import site: a name and filesystem path over
/// a shared `SubModule`. Cloning a `ModuleObj` (for a second `import ...
/// as`) is cheap and correct because the `Rc<RefCell<_>>` is shared, not
/// the data — this is the one reference-counted type in the object graph,
/// mirroring the one place the teacher's own codebase reaches for
/// `Rc<RefCell<_>>`, and it holds no cycle back into the GC heap beyond
/// plain `Value`s subject to the normal mark pass.
#[derive(Debug, Clone)]
pub struct ModuleObj {
    pub name: String,
    pub path: String,
    pub sub: Rc<RefCell<SubModule>>,
    /// True for a shadow clone produced by a second `import ... as` of the
    /// same path; sweeping a shadow must not touch the shared `SubModule`
    /// twice (the heap slab takes care of that by construction: only the
    /// `Rc` is dropped, and `SubModule` only truly drops when the last
    /// `ModuleObj` pointing at it does).
    pub shadow: bool,
}

impl ModuleObj {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into(), sub: Rc::new(RefCell::new(SubModule::new())), shadow: false }
    }

    pub fn shadow_clone(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), path: self.path.clone(), sub: Rc::clone(&self.sub), shadow: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_clone_shares_globals_table() {
        let base = ModuleObj::new("m", "m.ast");
        base.sub.borrow_mut().define("x", Value::Int(1), false, true);
        let alias = base.shadow_clone("alias");
        assert!(alias.shadow);
        alias.sub.borrow_mut().define("y", Value::Int(2), false, true);
        assert!(base.sub.borrow().get("y").is_some());
    }

    #[test]
    fn resolved_flag_prevents_rerun() {
        let m = ModuleObj::new("m", "m.ast");
        assert!(!m.sub.borrow().resolved);
        m.sub.borrow_mut().resolved = true;
        assert!(m.sub.borrow().resolved);
    }
}
