//! CLI module for shopsearch
//!
//! Provides command-line interface for:
//! - serve: run the HTTP search API
//! - plan: print the engine query for a request read from stdin
//! - index: regenerate the product index
//! - synonyms: replace synonym rules from a file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{index, plan, render_plan, run, run_command, serve, synonyms};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};
