use std::fmt;

/// Errors raised by the core data model itself (as opposed to `VmError`,
/// which belongs to `aster-vm` and carries a source location).
#[derive(Debug, Clone)]
pub enum CoreError {
    ModuleNotResolved(String),
    InvalidDictKey(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::ModuleNotResolved(path) => write!(f, "module '{path}' has not finished loading"),
            CoreError::InvalidDictKey(ty) => write!(f, "value of type '{ty}' cannot be used as a dict key"),
        }
    }
}

impl std::error::Error for CoreError {}
