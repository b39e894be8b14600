//! Native module bodies. Each module registers itself into a root scope
//! before compilation and exposes its symbols as module globals at VM
//! startup, matching spec.md §4.10's native-module note. Bodies here are
//! small, real, pure-Rust implementations — no dynamic-library loading
//! is wired up for these five; see `crate::abi` for the contract a real
//! platform loader would use instead.

pub mod io;
pub mod math;
pub mod os;
pub mod random;
pub mod time;

use aster_core::{Heap, NativeModuleObj};

/// Builds the five built-in native modules, ready to be registered as
/// module globals (`import "io" as io`, etc.) before a program compiles.
pub fn register_all(heap: &mut Heap) -> Vec<NativeModuleObj> {
    vec![
        io::register(heap),
        math::register(heap),
        os::register(heap),
        time::register(heap),
        random::register(heap),
    ]
}
