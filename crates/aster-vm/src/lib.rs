//! The Aster bytecode VM: heap, GC, call dispatch, and the single
//! `run_program` entry point the CLI drives.

pub mod builtins_glue;
pub mod closures;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod prelude;
pub mod throw;
pub mod vm;

use std::path::PathBuf;

pub use aster_core::{GcConfig, ScopeLimits};
pub use error::VmError;
pub use throw::Flow;
pub use vm::Vm;

use aster_core::Value;

/// Parses, compiles and runs `source` as the program's root module,
/// returning the value its top-level code produced (always `Value::Empty`
/// unless `exit` diverged first) or the tier-2 `VmError` for an uncaught
/// throw/fault.
///
/// `base_dir` anchors relative `import` paths; it's the directory
/// `pathname` lives in for ordinary script execution.
pub fn run_program(
    source: &str,
    pathname: &str,
    base_dir: PathBuf,
    scope_limits: ScopeLimits,
    gc_config: GcConfig,
) -> Result<Value, VmError> {
    let mut vm = Vm::new(base_dir, scope_limits, gc_config);
    vm.load_root(source, pathname)?;
    match dispatch::run(&mut vm, 0)? {
        Flow::Value(v) => Ok(v),
        Flow::Thrown => unreachable!("an uncaught throw at depth 0 is always a VmError, never Flow::Thrown"),
    }
}
