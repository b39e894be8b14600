//! Single-pass AST-to-bytecode compiler.
//!
//! One pass: every statement and expression is visited exactly once and
//! lowered directly to instructions, with the scope manager resolving
//! identifiers as it goes. Forward jumps are emitted with a placeholder
//! offset and patched once their target is known; loops emit their
//! backward jump directly since the target is already behind them.

use crate::error::CompileError;
use crate::scope::{CaptureSource, Resolution, ScopeError, ScopeKind, ScopeManager};
use aster_ast::{BinaryOp, CollectionKind, Expr, FnDecl, ForHead, LogicalOp, Stmt, UnaryOp};
use aster_bytecode::{Chunk, Op};
use aster_core::{Arena, ScopeLimits};

pub struct FnProto {
    pub name: String,
    pub arity: u8,
    pub chunk: Chunk,
    pub captures: Vec<CaptureSource>,
    /// `Some(i)` when this function's own name is among its captures at
    /// index `i` — a nested recursive `fn` closing over itself. `MakeFn`
    /// patches the closure's `i`th captured slot to point back at itself
    /// once it's allocated, since a by-value capture can't otherwise see a
    /// value that doesn't exist yet at capture time.
    pub self_capture: Option<u8>,
}

pub struct CompiledModule {
    pub main: Chunk,
    pub functions: Vec<FnProto>,
}

struct LoopCtx {
    break_jumps: Vec<usize>,
    /// Forward-patched: `continue` never knows in advance where its loop's
    /// per-iteration "advance and re-test" code will start, so it emits a
    /// placeholder jump here and every loop compiler patches the whole list
    /// to the right address once it knows it.
    continue_jumps: Vec<usize>,
    /// Local-slot count at the point the loop body starts; a `break` or
    /// `continue` nested inside further blocks pops back down to this
    /// before jumping so it never leaves orphaned values on the stack.
    slot_mark: u8,
}

impl LoopCtx {
    fn new(slot_mark: u8) -> Self {
        Self { break_jumps: Vec::new(), continue_jumps: Vec::new(), slot_mark }
    }
}

pub struct Compiler<'a> {
    scope: ScopeManager<'a>,
    functions: Vec<FnProto>,
    loops: Vec<LoopCtx>,
    hidden_counter: u32,
}

type CResult<T> = Result<T, CompileError>;

/// Compiles a module's statements into bytecode. The scope manager's local
/// and capture names are scratch: they never outlive this call, so they're
/// allocated out of a throwaway bump arena instead of the GC heap — only
/// `CompiledModule`'s owned `String`s and `Op`s survive past `compile`.
pub fn compile(stmts: &[Stmt], limits: ScopeLimits) -> CResult<CompiledModule> {
    let arena = Arena::new();
    let mut c =
        Compiler { scope: ScopeManager::new(limits, &arena), functions: Vec::new(), loops: Vec::new(), hidden_counter: 0 };
    let mut main = Chunk::new("main");
    c.compile_block_inline(stmts, &mut main)?;
    main.emit(Op::Halt, stmts.last().map(|s| c.stmt_line(s)).unwrap_or(1));
    Ok(CompiledModule { main, functions: c.functions })
}

impl<'a> Compiler<'a> {
    fn hidden_name(&mut self, tag: &str) -> String {
        self.hidden_counter += 1;
        format!("$${tag}{}", self.hidden_counter)
    }

    fn stmt_line(&self, stmt: &Stmt) -> u32 {
        match stmt {
            Stmt::Let { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::For { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Try { span, .. }
            | Stmt::Throw { span, .. }
            | Stmt::Import { span, .. } => span.line,
            Stmt::FnDecl(f) => f.span.line,
            Stmt::Break(span) | Stmt::Continue(span) => span.line,
            Stmt::Expr(e) => e.span().line,
            Stmt::Block(stmts) => stmts.first().map(|s| self.stmt_line(s)).unwrap_or(0),
        }
    }

    /// Compile statements into an existing block scope (the caller already
    /// pushed one) without creating a new one — used for the module top
    /// level and for function bodies, which own their own outermost scope.
    fn compile_block_inline(&mut self, stmts: &[Stmt], chunk: &mut Chunk) -> CResult<()> {
        for stmt in stmts {
            self.compile_stmt(stmt, chunk)?;
        }
        Ok(())
    }

    fn compile_scoped_block(&mut self, stmts: &[Stmt], kind: ScopeKind, chunk: &mut Chunk, line: u32) -> CResult<()> {
        self.scope.enter_block(kind);
        self.compile_block_inline(stmts, chunk)?;
        let locals = self.scope.exit_block();
        for _ in 0..locals {
            chunk.emit(Op::Pop, line);
        }
        Ok(())
    }

    fn compile_stmt(&mut self, stmt: &Stmt, chunk: &mut Chunk) -> CResult<()> {
        let line = self.stmt_line(stmt);
        match stmt {
            Stmt::Let { name, mutable, value, .. } => {
                match value {
                    Some(expr) => self.compile_expr(expr, chunk)?,
                    None => {
                        chunk.emit(Op::Empty, line);
                    }
                }
                if self.scope.at_top_level() {
                    let idx = chunk.add_string(name);
                    chunk.emit(Op::DefGlobal(idx), line);
                } else {
                    self.scope.declare_local(name, *mutable).map_err(|e| CompileError::from_scope(e, line))?;
                    // value is already on the stack in its new local slot; nothing more to emit.
                }
                Ok(())
            }
            Stmt::Expr(expr) => {
                self.compile_expr(expr, chunk)?;
                chunk.emit(Op::Pop, line);
                Ok(())
            }
            Stmt::Block(stmts) => self.compile_scoped_block(stmts, ScopeKind::Block, chunk, line),
            Stmt::If { cond, then_branch, elifs, else_branch, .. } => {
                self.compile_if(cond, then_branch, elifs, else_branch, chunk, line)
            }
            Stmt::While { cond, body, .. } => self.compile_while(cond, body, chunk, line),
            Stmt::For { head, body, .. } => self.compile_for(head, body, chunk, line),
            Stmt::FnDecl(decl) => self.compile_fn_decl(decl, chunk),
            Stmt::Return { value, .. } => {
                match value {
                    Some(expr) => self.compile_expr(expr, chunk)?,
                    None => {
                        chunk.emit(Op::Empty, line);
                    }
                }
                chunk.emit(Op::Return, line);
                Ok(())
            }
            Stmt::Break(span) => {
                let extra = self.unwind_to_loop(span.line)?;
                for _ in 0..extra {
                    chunk.emit(Op::Pop, span.line);
                }
                let jmp = chunk.emit(Op::Jump(0), span.line);
                self.loops.last_mut().unwrap().break_jumps.push(jmp);
                Ok(())
            }
            Stmt::Continue(span) => {
                let extra = self.unwind_to_loop(span.line)?;
                for _ in 0..extra {
                    chunk.emit(Op::Pop, span.line);
                }
                let jmp = chunk.emit(Op::Jump(0), span.line);
                self.loops.last_mut().unwrap().continue_jumps.push(jmp);
                Ok(())
            }
            Stmt::Try { body, catch_name, catch_body, .. } => self.compile_try(body, catch_name, catch_body, chunk, line),
            Stmt::Throw { value, .. } => {
                self.compile_expr(value, chunk)?;
                chunk.emit(Op::Throw, line);
                Ok(())
            }
            Stmt::Import { path, alias, .. } => {
                // Interface-only at this layer: resolution/loading is the
                // VM's job (spec.md scopes module loading to the embedder).
                // The compiler only reserves the global the import binds.
                let name = alias.clone().unwrap_or_else(|| module_default_alias(path));
                self.compile_import(path, &name, chunk, line)
            }
        }
    }

    fn compile_import(&mut self, path: &str, alias: &str, chunk: &mut Chunk, line: u32) -> CResult<()> {
        let path_idx = chunk.add_string(path);
        // Resolution itself (reading the file, deciding native vs. user
        // module, running top-level code once) is the VM's module loader;
        // the compiler only records which path to resolve.
        chunk.emit(Op::Import(path_idx), line);
        let name_idx = chunk.add_string(alias);
        if self.scope.at_top_level() {
            chunk.emit(Op::DefGlobal(name_idx), line);
        } else {
            self.scope.declare_local(alias, false).map_err(|e| CompileError::from_scope(e, line))?;
        }
        Ok(())
    }

    fn compile_if(
        &mut self,
        cond: &Expr,
        then_branch: &[Stmt],
        elifs: &[(Expr, Vec<Stmt>)],
        else_branch: &Option<Vec<Stmt>>,
        chunk: &mut Chunk,
        line: u32,
    ) -> CResult<()> {
        self.compile_expr(cond, chunk)?;
        let skip_then = chunk.emit(Op::JumpIfFalse(0), line);
        self.compile_scoped_block(then_branch, ScopeKind::If, chunk, line)?;
        let mut end_jumps = vec![chunk.emit(Op::Jump(0), line)];
        chunk.patch_jump(skip_then);

        for (econd, ebody) in elifs {
            self.compile_expr(econd, chunk)?;
            let skip = chunk.emit(Op::JumpIfFalse(0), line);
            self.compile_scoped_block(ebody, ScopeKind::Elif, chunk, line)?;
            end_jumps.push(chunk.emit(Op::Jump(0), line));
            chunk.patch_jump(skip);
        }

        if let Some(eb) = else_branch {
            self.compile_scoped_block(eb, ScopeKind::Else, chunk, line)?;
        }
        for j in end_jumps {
            chunk.patch_jump(j);
        }
        Ok(())
    }

    fn compile_while(&mut self, cond: &Expr, body: &[Stmt], chunk: &mut Chunk, line: u32) -> CResult<()> {
        let loop_start = chunk.code.len();
        self.compile_expr(cond, chunk)?;
        let exit_jump = chunk.emit(Op::JumpIfFalse(0), line);
        self.loops.push(LoopCtx::new(self.scope.current_slot()));
        self.compile_scoped_block(body, ScopeKind::While, chunk, line)?;
        let ctx = self.loops.pop().unwrap();
        for j in ctx.continue_jumps {
            chunk.patch_jump(j);
        }
        chunk.emit_loop(loop_start, line);
        chunk.patch_jump(exit_jump);
        for j in ctx.break_jumps {
            chunk.patch_jump(j);
        }
        Ok(())
    }

    fn compile_for(&mut self, head: &ForHead, body: &[Stmt], chunk: &mut Chunk, line: u32) -> CResult<()> {
        self.scope.enter_block(ScopeKind::For);
        let result = match head {
            ForHead::Numeric(n) => self.compile_for_numeric(n, body, chunk, line),
            ForHead::Iterator(it) => self.compile_for_iterator(it, body, chunk, line),
        };
        let locals = self.scope.exit_block();
        for _ in 0..locals {
            chunk.emit(Op::Pop, line);
        }
        result
    }

    fn compile_for_numeric(&mut self, n: &aster_ast::ForNumeric, body: &[Stmt], chunk: &mut Chunk, line: u32) -> CResult<()> {
        self.compile_expr(&n.from, chunk)?;
        let var_slot = self.scope.declare_local(&n.var, true).map_err(|e| CompileError::from_scope(e, line))?;
        let to_name = self.hidden_name("to");
        self.compile_expr(&n.to, chunk)?;
        self.scope.declare_local(&to_name, false).map_err(|e| CompileError::from_scope(e, line))?;

        let loop_start = chunk.code.len();
        chunk.emit(Op::GetLocal(var_slot), line);
        let to_slot = match self.scope.resolve(&to_name) {
            Resolution::Local(s) => s,
            _ => unreachable!("hidden bound loop just declared"),
        };
        chunk.emit(Op::GetLocal(to_slot), line);
        chunk.emit(Op::Lt, line);
        let exit_jump = chunk.emit(Op::JumpIfFalse(0), line);

        self.loops.push(LoopCtx::new(self.scope.current_slot()));
        self.compile_scoped_block(body, ScopeKind::For, chunk, line)?;
        let ctx = self.loops.pop().unwrap();
        for j in ctx.continue_jumps {
            chunk.patch_jump(j);
        }

        chunk.emit(Op::GetLocal(var_slot), line);
        match &n.step {
            Some(step) => self.compile_expr(step, chunk)?,
            None => {
                chunk.emit(Op::CInt(1), line);
            }
        }
        chunk.emit(Op::Add, line);
        chunk.emit(Op::SetLocal(var_slot), line);
        chunk.emit(Op::Pop, line);
        chunk.emit_loop(loop_start, line);
        chunk.patch_jump(exit_jump);

        for j in ctx.break_jumps {
            chunk.patch_jump(j);
        }
        Ok(())
    }

    fn compile_for_iterator(&mut self, it: &aster_ast::ForIterator, body: &[Stmt], chunk: &mut Chunk, line: u32) -> CResult<()> {
        let src_name = self.hidden_name("src");
        let idx_name = self.hidden_name("idx");
        self.compile_expr(&it.iterable, chunk)?;
        let src_slot = self.scope.declare_local(&src_name, false).map_err(|e| CompileError::from_scope(e, line))?;
        chunk.emit(Op::CInt(0), line);
        let idx_slot = self.scope.declare_local(&idx_name, true).map_err(|e| CompileError::from_scope(e, line))?;

        let len_idx = chunk.add_string("len");
        let loop_start = chunk.code.len();
        chunk.emit(Op::GetLocal(idx_slot), line);
        chunk.emit(Op::GetGlobal(len_idx), line);
        chunk.emit(Op::GetLocal(src_slot), line);
        chunk.emit(Op::Call(1), line);
        chunk.emit(Op::Lt, line);
        let exit_jump = chunk.emit(Op::JumpIfFalse(0), line);

        self.scope.enter_block(ScopeKind::For);
        chunk.emit(Op::GetLocal(src_slot), line);
        chunk.emit(Op::GetLocal(idx_slot), line);
        chunk.emit(Op::GetIndex, line);
        self.scope.declare_local(&it.var, false).map_err(|e| CompileError::from_scope(e, line))?;

        self.loops.push(LoopCtx::new(self.scope.current_slot()));
        self.compile_block_inline(body, chunk)?;
        let locals = self.scope.exit_block();
        for _ in 0..locals {
            chunk.emit(Op::Pop, line);
        }
        let ctx = self.loops.pop().unwrap();
        for j in ctx.continue_jumps {
            chunk.patch_jump(j);
        }

        chunk.emit(Op::GetLocal(idx_slot), line);
        chunk.emit(Op::CInt(1), line);
        chunk.emit(Op::Add, line);
        chunk.emit(Op::SetLocal(idx_slot), line);
        chunk.emit(Op::Pop, line);
        chunk.emit_loop(loop_start, line);
        chunk.patch_jump(exit_jump);

        for j in ctx.break_jumps {
            chunk.patch_jump(j);
        }
        Ok(())
    }

    /// Number of locals declared since the innermost loop's body began that
    /// a `break`/`continue` at the current point must pop before jumping.
    fn unwind_to_loop(&mut self, line: u32) -> CResult<u8> {
        let mark = self
            .loops
            .last()
            .ok_or_else(|| CompileError::new("'break'/'continue' outside a loop", line))?
            .slot_mark;
        Ok(self.scope.current_slot() - mark)
    }

    fn compile_try(&mut self, body: &[Stmt], catch_name: &Option<String>, catch_body: &[Stmt], chunk: &mut Chunk, line: u32) -> CResult<()> {
        let try_open = chunk.emit(Op::TryOpen(0), line);
        self.compile_scoped_block(body, ScopeKind::Try, chunk, line)?;
        chunk.emit(Op::TryClose, line);
        let skip_catch = chunk.emit(Op::Jump(0), line);
        chunk.patch_jump(try_open);

        self.scope.enter_block(ScopeKind::Catch);
        if let Some(name) = catch_name {
            self.scope.declare_local(name, false).map_err(|e| CompileError::from_scope(e, line))?;
        } else {
            chunk.emit(Op::Pop, line); // thrown value pushed by the VM unwind, discarded if uncaught-by-name
        }
        self.compile_block_inline(catch_body, chunk)?;
        let locals = self.scope.exit_block();
        for _ in 0..locals {
            chunk.emit(Op::Pop, line);
        }
        chunk.patch_jump(skip_catch);
        Ok(())
    }

    fn compile_fn_decl(&mut self, decl: &FnDecl, chunk: &mut Chunk) -> CResult<()> {
        let line = decl.span.line;
        // Nested (non-top-level) declarations reserve their own name as a
        // local *before* compiling the body, so a recursive self-call inside
        // resolves as a capture of this slot instead of falling through to
        // a nonexistent global. Top-level declarations don't need this: an
        // unresolved name inside the body already falls back to
        // `Resolution::Global`, and by the time a top-level function is
        // actually called its own `DefGlobal` has long since run.
        if !self.scope.at_top_level() {
            self.scope.declare_local(&decl.name, false).map_err(|e| CompileError::from_scope(e, line))?;
        }
        let proto_idx = self.compile_function_body(&decl.name, &decl.params, &decl.body, line)?;
        chunk.emit(Op::MakeFn(proto_idx), line);
        if self.scope.at_top_level() {
            let idx = chunk.add_string(&decl.name);
            chunk.emit(Op::DefGlobal(idx), line);
        }
        Ok(())
    }

    /// Compile a function/lambda body into its own chunk and register it
    /// as a module-level prototype, returning its index for `MakeFn`.
    fn compile_function_body(&mut self, name: &str, params: &[String], body: &[Stmt], line: u32) -> CResult<u16> {
        self.scope.enter_fn().map_err(|e| CompileError::from_scope(e, line))?;
        let mut fn_chunk = Chunk::new(name);
        for param in params {
            self.scope.declare_local(param, true).map_err(|e| CompileError::from_scope(e, line))?;
        }
        self.compile_block_inline(body, &mut fn_chunk)?;
        // Implicit `return empty;` if control falls off the end.
        fn_chunk.emit(Op::Empty, line);
        fn_chunk.emit(Op::Return, line);
        let self_capture = self.scope.pending_capture_index(name);
        let (captures, _max_slot) = self.scope.exit_fn();

        let proto = FnProto { name: name.to_string(), arity: params.len() as u8, chunk: fn_chunk, captures, self_capture };
        self.functions.push(proto);
        Ok((self.functions.len() - 1) as u16)
    }

    fn compile_expr(&mut self, expr: &Expr, chunk: &mut Chunk) -> CResult<()> {
        let line = expr.span().line;
        match expr {
            Expr::Literal { value, .. } => self.compile_literal(value, chunk, line),
            Expr::Ident { name, .. } => self.compile_ident_read(name, chunk, line),
            Expr::Unary { op, operand, .. } => {
                self.compile_expr(operand, chunk)?;
                chunk.emit(
                    match op {
                        UnaryOp::Neg => Op::Neg,
                        UnaryOp::Not => Op::Not,
                        UnaryOp::BNot => Op::BNot,
                    },
                    line,
                );
                Ok(())
            }
            Expr::Binary { left, op, right, .. } => {
                self.compile_expr(left, chunk)?;
                self.compile_expr(right, chunk)?;
                chunk.emit(binary_opcode(op), line);
                Ok(())
            }
            Expr::Logical { left, op, right, .. } => self.compile_logical(left, op, right, chunk, line),
            Expr::Assign { target, value, .. } => self.compile_assign(target, value, chunk, line),
            Expr::Call { callee, args, .. } => {
                self.compile_expr(callee, chunk)?;
                for a in args {
                    self.compile_expr(a, chunk)?;
                }
                chunk.emit(Op::Call(args.len() as u8), line);
                Ok(())
            }
            Expr::Member { object, name, .. } => {
                self.compile_expr(object, chunk)?;
                let idx = chunk.add_string(name);
                chunk.emit(Op::GetAttr(idx), line);
                Ok(())
            }
            Expr::Index { object, index, .. } => {
                self.compile_expr(object, chunk)?;
                self.compile_expr(index, chunk)?;
                chunk.emit(Op::GetIndex, line);
                Ok(())
            }
            Expr::Collection { kind, elements, .. } => self.compile_collection(kind, elements, chunk, line),
            Expr::Is { value, type_name, .. } => {
                self.compile_expr(value, chunk)?;
                match type_name.as_str() {
                    "array" => chunk.emit(Op::IsArray, line),
                    "list" => chunk.emit(Op::IsList, line),
                    "dict" => chunk.emit(Op::IsDict, line),
                    "record" => chunk.emit(Op::IsRecord, line),
                    _ => {
                        let idx = chunk.add_string(type_name);
                        chunk.emit(Op::Is(idx), line)
                    }
                };
                Ok(())
            }
            Expr::Lambda { params, body, is_proc: _, span } => {
                let name = self.hidden_name("lambda");
                let proto_idx = self.compile_function_body(&name, params, body, span.line)?;
                chunk.emit(Op::MakeFn(proto_idx), line);
                Ok(())
            }
        }
    }

    fn compile_literal(&mut self, value: &aster_ast::Literal, chunk: &mut Chunk, line: u32) -> CResult<()> {
        use aster_ast::Literal as L;
        match value {
            L::Int(i) => {
                if let Ok(small) = i16::try_from(*i) {
                    chunk.emit(Op::CInt(small), line);
                } else {
                    let idx = chunk.add_int(*i);
                    chunk.emit(Op::Int(idx), line);
                }
            }
            L::Float(f) => {
                let idx = chunk.add_float(*f);
                chunk.emit(Op::Float(idx), line);
            }
            L::Str(s) => {
                let idx = chunk.add_string(s);
                chunk.emit(Op::Str(idx), line);
            }
            L::Bool(true) => {
                chunk.emit(Op::True, line);
            }
            L::Bool(false) => {
                chunk.emit(Op::False, line);
            }
            L::Empty => {
                chunk.emit(Op::Empty, line);
            }
        }
        Ok(())
    }

    fn compile_ident_read(&mut self, name: &str, chunk: &mut Chunk, line: u32) -> CResult<()> {
        match self.scope.resolve(name) {
            Resolution::Local(slot) => {
                chunk.emit(Op::GetLocal(slot), line);
            }
            Resolution::Upvalue(idx) => {
                chunk.emit(Op::GetOut(idx), line);
            }
            Resolution::Global => {
                let idx = chunk.add_string(name);
                chunk.emit(Op::GetGlobal(idx), line);
            }
        }
        Ok(())
    }

    fn compile_logical(&mut self, left: &Expr, op: &LogicalOp, right: &Expr, chunk: &mut Chunk, line: u32) -> CResult<()> {
        self.compile_expr(left, chunk)?;
        match op {
            LogicalOp::Or => {
                let short_circuit = chunk.emit(Op::JumpIfTrue(0), line);
                chunk.emit(Op::Pop, line);
                self.compile_expr(right, chunk)?;
                chunk.patch_jump(short_circuit);
            }
            LogicalOp::And => {
                let short_circuit = chunk.emit(Op::JumpIfFalse(0), line);
                chunk.emit(Op::Pop, line);
                self.compile_expr(right, chunk)?;
                chunk.patch_jump(short_circuit);
            }
        }
        Ok(())
    }

    fn compile_assign(&mut self, target: &Expr, value: &Expr, chunk: &mut Chunk, line: u32) -> CResult<()> {
        match target {
            Expr::Ident { name, .. } => {
                self.compile_expr(value, chunk)?;
                match self.scope.resolve(name) {
                    Resolution::Local(slot) => {
                        chunk.emit(Op::SetLocal(slot), line);
                    }
                    Resolution::Upvalue(idx) => {
                        chunk.emit(Op::SetOut(idx), line);
                    }
                    Resolution::Global => {
                        let idx = chunk.add_string(name);
                        chunk.emit(Op::SetGlobal(idx), line);
                    }
                }
                Ok(())
            }
            Expr::Member { object, name, .. } => {
                self.compile_expr(object, chunk)?;
                self.compile_expr(value, chunk)?;
                let idx = chunk.add_string(name);
                chunk.emit(Op::SetField(idx), line);
                Ok(())
            }
            Expr::Index { object, index, .. } => {
                self.compile_expr(object, chunk)?;
                self.compile_expr(index, chunk)?;
                self.compile_expr(value, chunk)?;
                chunk.emit(Op::SetIndex, line);
                Ok(())
            }
            _ => Err(CompileError::new("invalid assignment target", line)),
        }
    }

    fn compile_collection(
        &mut self,
        kind: &CollectionKind,
        elements: &[(Option<String>, Expr)],
        chunk: &mut Chunk,
        line: u32,
    ) -> CResult<()> {
        match kind {
            CollectionKind::Array | CollectionKind::List => {
                for (_, e) in elements {
                    self.compile_expr(e, chunk)?;
                }
                let n = elements.len() as u16;
                let op = match kind {
                    CollectionKind::Array => Op::Array(n),
                    CollectionKind::List => Op::List(n),
                    _ => unreachable!(),
                };
                chunk.emit(op, line);
            }
            CollectionKind::Dict => {
                for (key, e) in elements {
                    let key = key.as_deref().expect("dict literal entries always carry a key");
                    let idx = chunk.add_string(key);
                    chunk.emit(Op::Str(idx), line);
                    self.compile_expr(e, chunk)?;
                }
                chunk.emit(Op::Dict(elements.len() as u16), line);
            }
            CollectionKind::Record => {
                for (key, e) in elements {
                    let key = key.as_deref().expect("record literal entries always carry a key");
                    let idx = chunk.add_string(key);
                    chunk.emit(Op::Str(idx), line);
                    self.compile_expr(e, chunk)?;
                }
                chunk.emit(Op::Record(elements.len() as u16), line);
            }
        }
        Ok(())
    }
}

fn binary_opcode(op: &BinaryOp) -> Op {
    match op {
        BinaryOp::Add | BinaryOp::Concat => Op::Add,
        BinaryOp::Sub => Op::Sub,
        BinaryOp::Mul => Op::Mul,
        BinaryOp::Div => Op::Div,
        BinaryOp::Mod => Op::Mod,
        BinaryOp::BAnd => Op::BAnd,
        BinaryOp::BOr => Op::BOr,
        BinaryOp::BXor => Op::BXor,
        BinaryOp::Shl => Op::Shl,
        BinaryOp::Shr => Op::Shr,
        BinaryOp::Lt => Op::Lt,
        BinaryOp::Le => Op::Le,
        BinaryOp::Gt => Op::Gt,
        BinaryOp::Ge => Op::Ge,
        BinaryOp::Eq => Op::Eq,
        BinaryOp::Ne => Op::Ne,
    }
}

fn module_default_alias(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).trim_end_matches(".ast").to_string()
}

impl From<ScopeError> for CompileError {
    fn from(e: ScopeError) -> Self {
        CompileError::new(e.to_string(), 0)
    }
}
