//! CLI command implementations.

pub mod unwrap;
pub mod wrap;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads the whole input, from stdin when `input` is `-`.
pub fn read_input(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input).map_err(|e| format!("Failed to read {}: {}", input, e).into())
    }
}

/// Writes `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
