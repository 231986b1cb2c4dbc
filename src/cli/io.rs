//! JSON I/O handling for CLI
//!
//! - Input: one JSON document via stdin, may span lines
//! - Output: one JSON document via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read the whole of stdin as one request body
pub fn read_input() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(input)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write text to stdout as-is
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
