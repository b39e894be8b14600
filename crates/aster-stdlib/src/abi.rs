//! Native module ABI — the Rust rendition of spec.md §6's C ABI for
//! loading a platform shared library as a native module.
//!
//! A conforming library exports a fixed set of setter symbols the loader
//! calls at load time to install function pointers the library uses to
//! construct `Value`s and hand them back, plus a one-time `znative_init`
//! called once every setter is installed. This module is the loading
//! contract only — no bundled native module ships as a `cdylib`, so
//! nothing here is ever exercised by the five built-in modules in
//! `crate::modules`, which are plain Rust.

use std::path::Path;

use libloading::{Library, Symbol};

/// Required setter symbols, in the order the loader installs them. Missing
/// any of these in the target library is a fatal load error.
pub const REQUIRED_SETTERS: &[&str] = &[
    "value_at",
    "to_empty",
    "to_bool",
    "to_int",
    "to_str",
    "to_array",
    "to_list",
    "empty_value",
    "bool_value",
    "int_value",
    "str_value",
    "array_value",
    "list_value",
    "str_create",
    "str_buff",
    "array_create",
    "array_set_bool_at",
    "array_set_int_at",
    "array_set_str_at",
    "array_set_array_at",
    "list_create",
    "list_add_bool",
    "list_add_int",
    "list_add_str",
    "list_add_array",
    "list_add_list",
];

/// The one-time init symbol called after every setter above is installed.
pub const INIT_SYMBOL: &str = "znative_init";

#[derive(Debug)]
pub enum AbiError {
    Load(libloading::Error),
    MissingSymbol(String),
}

impl std::fmt::Display for AbiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbiError::Load(e) => write!(f, "failed to load native module: {e}"),
            AbiError::MissingSymbol(name) => write!(f, "native module is missing required symbol '{name}'"),
        }
    }
}

impl std::error::Error for AbiError {}

/// A handle to a loaded native module `cdylib`, verified to export every
/// required setter and the init symbol. The library is kept alive for as
/// long as this handle lives.
pub struct NativeLibrary {
    #[allow(dead_code)]
    lib: Library,
    pub path: String,
}

/// Loads `path` as a native module and checks it exports every symbol
/// `REQUIRED_SETTERS` and `INIT_SYMBOL` name, without calling any of them —
/// actually invoking `znative_init` requires handing the library live
/// `Value`-constructing callbacks, which belongs to `aster-vm` once it
/// owns a `Heap` to back them.
///
/// # Safety
/// Loading an arbitrary shared library runs its static initializers.
/// Callers must only pass paths to trusted native modules.
pub unsafe fn load(path: &Path) -> Result<NativeLibrary, AbiError> {
    let lib = Library::new(path).map_err(AbiError::Load)?;
    for name in REQUIRED_SETTERS.iter().chain(std::iter::once(&INIT_SYMBOL)) {
        let symbol_name = format!("{name}\0");
        let _: Symbol<*const ()> =
            lib.get(symbol_name.as_bytes()).map_err(|_| AbiError::MissingSymbol((*name).to_string()))?;
    }
    Ok(NativeLibrary { lib, path: path.to_string_lossy().to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_errors() {
        let result = unsafe { load(Path::new("/nonexistent/libaster_native_test.so")) };
        assert!(matches!(result, Err(AbiError::Load(_))));
    }

    #[test]
    fn required_setters_cover_the_spec_list() {
        assert!(REQUIRED_SETTERS.contains(&"str_create"));
        assert!(REQUIRED_SETTERS.contains(&"list_add_list"));
        assert_eq!(REQUIRED_SETTERS.len(), 26);
    }
}
