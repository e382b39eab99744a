//! Input helpers for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read input from a file path, or stdin when the path is absent or `-`.
pub fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// File name component used as a source label, ignoring the stdin marker.
pub fn file_name_of(file: Option<&Path>) -> Option<String> {
    let path = file?;
    if path.to_string_lossy() == "-" {
        return None;
    }
    path.file_name().map(|n| n.to_string_lossy().to_string())
}
