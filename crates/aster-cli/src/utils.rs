//! Shared CLI utilities for reading input and formatting errors.

use std::fs;
use std::io::{self, Read};
use std::process;

/// Read source code from a file or stdin. `file == "-"` reads from stdin.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// Read `file`, exiting with tier-1 status on any I/O failure.
pub fn read_source_or_exit(file: &str) -> String {
    match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error reading file '{file}': {err}");
            process::exit(1);
        }
    }
}

/// The directory relative imports in `file` resolve against.
pub fn base_dir_of(file: &str) -> std::path::PathBuf {
    std::path::Path::new(file).parent().map(|p| p.to_path_buf()).unwrap_or_default()
}
