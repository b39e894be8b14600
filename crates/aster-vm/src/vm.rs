//! The `Vm`: heap, operand stack, call frames, handler stack, and the
//! module table that backs `import`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use aster_compiler::{CompiledModule, FnProto};
use aster_core::{
    Exception, ExceptionHandler, Frame, GcConfig, Gc, Heap, MetaClosure, ModuleObj, NativeFn, Obj, ObjRef, ScopeLimits,
    Value,
};

use crate::error::VmError;

/// One realized module: its heap object plus the `Fn` prototypes compiled
/// into it, indexed the same way `MakeFn`'s operand indexes into
/// `CompiledModule::functions`.
struct Realized {
    module: ObjRef,
    top_fn: ObjRef,
}

pub struct Vm {
    pub heap: Heap,
    pub(crate) gc: Gc,
    pub(crate) stack: Vec<Value>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) handlers: Vec<ExceptionHandler>,
    /// Per-module table of realized `Fn` prototypes; `MakeFn(idx)` looks up
    /// the currently executing frame's function's home module here.
    pub(crate) fn_tables: HashMap<ObjRef, Vec<ObjRef>>,
    /// Built-in modules (`io`, `math`, `os`, `time`, `random`), keyed by
    /// name, resolved by `Op::Import` before ever touching the filesystem.
    native_modules: HashMap<String, ObjRef>,
    /// Resolved user-module paths, so a second `import` of the same path
    /// shadow-clones instead of recompiling and re-running top-level code.
    modules: HashMap<String, ObjRef>,
    base_dir: PathBuf,
    pub(crate) scope_limits: ScopeLimits,
}

impl Vm {
    pub fn new(base_dir: PathBuf, scope_limits: ScopeLimits, gc_config: GcConfig) -> Self {
        let mut heap = Heap::new();
        let mut native_modules = HashMap::new();
        for module in aster_stdlib::register_native_modules(&mut heap) {
            let name = module.name.clone();
            let r = heap.alloc(Obj::NativeModule(module));
            native_modules.insert(name, r);
        }
        Self {
            heap,
            gc: Gc::new(gc_config),
            stack: Vec::new(),
            frames: Vec::new(),
            handlers: Vec::new(),
            fn_tables: HashMap::new(),
            native_modules,
            modules: HashMap::new(),
            base_dir,
            scope_limits,
        }
    }

    /// Realizes a freshly compiled module: allocates its `Fn` prototypes,
    /// registers them under a fresh `fn_table`, and wraps `compiled.main`
    /// as a synthetic top-level `Fn` so running a module is just calling a
    /// function like any other.
    fn realize(&mut self, name: &str, path: &str, compiled: CompiledModule) -> Realized {
        let module = self.heap.alloc(Obj::Module(ModuleObj::new(name, path)));
        for &(prelude_name, arity, func) in crate::prelude::PRELUDE {
            self.define_prelude_fn(module, prelude_name, arity, func);
        }

        let mut table = Vec::with_capacity(compiled.functions.len());
        for proto in compiled.functions {
            let FnProto { name, arity, chunk, captures, self_capture } = proto;
            let captures: Vec<aster_core::CaptureSource> = captures.into_iter().map(Into::into).collect();
            let meta = if captures.is_empty() { None } else { Some(MetaClosure { captures, self_capture }) };
            let fn_ref = self.heap.alloc(Obj::Fn(aster_core::FnObj { name, arity, chunk, module, meta }));
            table.push(fn_ref);
        }
        self.fn_tables.insert(module, table);

        let top_fn = self.heap.alloc(Obj::Fn(aster_core::FnObj {
            name: "<module>".to_string(),
            arity: 0,
            chunk: compiled.main,
            module,
            meta: None,
        }));
        if let Obj::Module(m) = self.heap.get(module) {
            m.sub.borrow_mut().top_fn = Some(top_fn);
        }
        Realized { module, top_fn }
    }

    /// Compiles and realizes the program's entry script, pushing its
    /// top-level frame so `dispatch::run(self, 0)` is ready to execute it.
    pub fn load_root(&mut self, source: &str, pathname: &str) -> Result<(), VmError> {
        let compiled = self.compile_source(source, pathname)?;
        let Realized { top_fn, .. } = self.realize("<main>", pathname, compiled);
        self.frames.push(Frame::new(top_fn, 0));
        Ok(())
    }

    fn compile_source(&self, source: &str, pathname: &str) -> Result<CompiledModule, VmError> {
        let stmts = aster_ast::parse_source(source, std::rc::Rc::from(pathname))
            .map_err(|e| VmError::new(e, 1, pathname))?;
        aster_compiler::compile(&stmts, self.scope_limits).map_err(|e| {
            let line = e.line;
            VmError::new(e.to_string(), line, pathname)
        })
    }

    /// `Op::Import`'s implementation: resolve `path` to a `Value`, running
    /// a user module's top-level code the first time it's imported and
    /// shadow-cloning the `Module` object on every later import.
    pub fn resolve_import(&mut self, path: &str) -> Result<Value, VmError> {
        if let Some(&native) = self.native_modules.get(path) {
            return Ok(Value::Obj(native));
        }
        if let Some(&existing) = self.modules.get(path) {
            let clone = match self.heap.get(existing) {
                Obj::Module(m) => m.shadow_clone(default_alias(path)),
                _ => unreachable!("modules table only ever holds Module objects"),
            };
            return Ok(Value::Obj(self.heap.alloc(Obj::Module(clone))));
        }

        let file_path = self.base_dir.join(path);
        let source = std::fs::read_to_string(&file_path)
            .map_err(|e| VmError::new(format!("failed to read module '{path}': {e}"), 0, path))?;
        let compiled = self.compile_source(&source, path)?;
        let Realized { module, top_fn } = self.realize(&default_alias(path), path, compiled);
        self.modules.insert(path.to_string(), module);

        match crate::builtins_glue::invoke(self, Value::Obj(top_fn), Vec::new())? {
            crate::throw::Flow::Value(_) => {}
            crate::throw::Flow::Thrown => {
                return Err(VmError::new(format!("uncaught exception while loading module '{path}'"), 0, path));
            }
        }
        if let Obj::Module(m) = self.heap.get(module) {
            m.sub.borrow_mut().resolved = true;
        }
        Ok(Value::Obj(module))
    }

    /// Registers a native function as a global available from any module,
    /// the way `len`/`print` are resolved through plain `GetGlobal`.
    pub(crate) fn define_prelude_fn(&mut self, module: ObjRef, name: &str, arity: i32, func: aster_core::NativeFnPtr) {
        let r = self.heap.alloc(Obj::NativeFn(NativeFn { name: name.to_string(), arity, func }));
        if let Obj::Module(m) = self.heap.get(module) {
            m.sub.borrow_mut().define(name, Value::Obj(r), false, true);
        }
    }

    pub fn root_module(&self) -> Option<ObjRef> {
        self.frames.first().map(|f| match self.heap.get(f.func) {
            Obj::Fn(fo) => fo.module,
            _ => unreachable!(),
        })
    }

    pub(crate) fn current_frame_module(&self) -> ObjRef {
        let f = self.frames.last().expect("no active frame");
        match self.heap.get(f.func) {
            Obj::Fn(fo) => fo.module,
            _ => unreachable!("Frame::func always points at an Obj::Fn"),
        }
    }

    pub(crate) fn current_location(&self) -> (u32, String) {
        match self.frames.last() {
            Some(f) => match self.heap.get(f.func) {
                Obj::Fn(fo) => {
                    let line = fo.chunk.get_line(f.ip.saturating_sub(1));
                    let path = match self.heap.get(fo.module) {
                        Obj::Module(m) => m.path.clone(),
                        _ => String::new(),
                    };
                    (line, path)
                }
                _ => (0, String::new()),
            },
            None => (0, String::new()),
        }
    }

    pub(crate) fn trace_snapshot(&self) -> Vec<(String, u32)> {
        self.frames
            .iter()
            .rev()
            .map(|f| match self.heap.get(f.func) {
                Obj::Fn(fo) => (fo.name.clone(), fo.chunk.get_line(f.ip.saturating_sub(1))),
                _ => ("<?>".to_string(), 0),
            })
            .collect()
    }

    /// GC roots: every live value on the operand stack, each active
    /// frame's function and closure, and everything reachable from
    /// every realized module's globals (already covered transitively via
    /// `Obj::Module`'s own mark arm, so only the module handles themselves
    /// need to be roots here).
    pub(crate) fn collect_garbage(&mut self) {
        let mut roots: Vec<Value> = self.stack.clone();
        for frame in &self.frames {
            roots.push(Value::Obj(frame.func));
            if let Some(c) = frame.closure {
                roots.push(Value::Obj(c));
            }
        }
        for &module in self.fn_tables.keys() {
            roots.push(Value::Obj(module));
        }
        for &native in self.native_modules.values() {
            roots.push(Value::Obj(native));
        }
        for &module in self.modules.values() {
            roots.push(Value::Obj(module));
        }
        self.gc.collect(&mut self.heap, roots);
    }

    pub(crate) fn should_collect(&self) -> bool {
        self.gc.should_collect(&self.heap)
    }

    /// Builds the `Exception` report (frame depth plus value) for an
    /// uncaught throw at the top level, mirroring `aster_core::exception`'s
    /// documented tier-3 use.
    pub fn uncaught_exception(&self, value: Value) -> Exception {
        Exception { value, frame_depth: self.frames.len() }
    }
}

fn default_alias(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
