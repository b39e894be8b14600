//! Built-in method tables, native module bodies, and the native-library
//! ABI contract for Aster.

pub mod abi;
pub mod builtins;
pub mod modules;

pub use builtins::{lookup as lookup_method, MethodFn};
pub use modules::register_all as register_native_modules;
