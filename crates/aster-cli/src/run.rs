//! `run` subcommand handler: the default invocation shape, `aster <file>`.

use std::path::PathBuf;
use std::process;

use aster_core::{GcConfig, ScopeLimits};

use crate::utils::{base_dir_of, read_source_or_exit};

pub struct RunOptions {
    pub gc_threshold: Option<usize>,
    pub max_stack: Option<usize>,
}

/// Execute an Aster script file, printing the tiered diagnostic and exiting
/// non-zero on a compile error or uncaught runtime throw (spec.md §6/§7).
pub fn handle_run(file: &str, opts: &RunOptions) {
    let source = read_source_or_exit(file);
    let base_dir = base_dir_of(file);

    let mut gc_config = GcConfig::default();
    if let Some(t) = opts.gc_threshold {
        gc_config.initial_threshold = t;
    }
    let mut scope_limits = ScopeLimits::default();
    if let Some(s) = opts.max_stack {
        scope_limits.max_stack = s;
    }

    match aster_vm::run_program(&source, file, base_dir, scope_limits, gc_config) {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}", e.diagnostic().render(Some(&source)));
            process::exit(1);
        }
    }
}
