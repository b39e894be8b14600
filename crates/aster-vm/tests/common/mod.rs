//! Shared helpers for driving `aster_vm::run_program` end to end.

use std::path::PathBuf;

use aster_core::{GcConfig, ScopeLimits};
use aster_vm::VmError;

/// Runs `source` as a standalone script rooted at the crate's `tests/`
/// directory, so `import "fixtures/..."` resolves relative paths the
/// way a real script's sibling imports would.
pub fn run(source: &str) -> Result<aster_core::Value, VmError> {
    let base_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
    aster_vm::run_program(source, "test.as", base_dir, ScopeLimits::default(), GcConfig::default())
}

/// Asserts the program runs to completion without an uncaught throw or
/// fault. Scripts assert their own expectations internally with the
/// `assert` builtin; a clean `Ok` here means every one of them held.
pub fn assert_ok(source: &str) {
    if let Err(e) = run(source) {
        panic!("program should have succeeded but failed: {e}\nsource:\n{source}");
    }
}

/// Asserts the program fails with an uncaught error whose message
/// contains `expected_substring`.
pub fn assert_fails(source: &str, expected_substring: &str) {
    match run(source) {
        Ok(v) => panic!("program should have failed but returned {v:?}\nsource:\n{source}"),
        Err(e) => assert!(
            e.message.contains(expected_substring),
            "error message `{}` should contain `{}`\nsource:\n{}",
            e.message,
            expected_substring,
            source
        ),
    }
}
