//! Scope manager and single-pass bytecode compiler.

pub mod compiler;
pub mod error;
pub mod scope;

pub use compiler::{compile, CompiledModule, FnProto};
pub use error::CompileError;
pub use scope::{CaptureSource, Resolution, ScopeError, ScopeKind, ScopeManager, SymbolKind};

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::ScopeLimits;

    fn compile_src(src: &str) -> CompiledModule {
        let stmts = aster_ast::parse_source(src, std::rc::Rc::from("<test>")).expect("parse");
        compile(&stmts, ScopeLimits::default()).expect("compile")
    }

    #[test]
    fn compiles_arithmetic_expression_statement() {
        let module = compile_src("print(1 + 2 * 3);");
        assert!(!module.main.code.is_empty());
    }

    #[test]
    fn compiles_closure_capturing_outer_local() {
        // `counter` is local to `makeInc` (not a module global), so `inc`
        // must close over it rather than resolving it as `GetGlobal`.
        let module =
            compile_src("fn makeInc() { let mut counter = 0; fn inc() { counter = counter + 1; return counter; } return inc; }");
        assert_eq!(module.functions.len(), 2);
        let inner = &module.functions[0];
        assert_eq!(inner.captures.len(), 1);
    }

    #[test]
    fn break_and_continue_compile_inside_while() {
        let module = compile_src("let mut i = 0; while i < 10 { if i is int { break; } continue; }");
        assert!(module.main.code.iter().any(|op| matches!(op, aster_bytecode::Op::Jump(_))));
    }

    #[test]
    fn or_and_and_lower_to_short_circuit_jumps() {
        let module = compile_src("let x = true or false;");
        assert!(module
            .main
            .code
            .iter()
            .any(|op| matches!(op, aster_bytecode::Op::JumpIfTrue(_) | aster_bytecode::Op::JumpIfFalse(_))));
    }
}
