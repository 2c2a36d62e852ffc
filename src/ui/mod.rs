//! User interface module - workflow-command output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing, log groups and step outputs

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

pub mod formatter;

/// Print a plain informational line.
pub fn display_info(message: &str) {
    println!("{}", message);
}

/// Print a debug line.
pub fn display_debug(message: &str) {
    println!("{}", formatter::format_debug(message));
}

/// Print a notice annotation.
pub fn display_notice(message: &str) {
    println!("{}", formatter::format_notice(message));
}

/// Print an error annotation; this is what marks the step as failed.
pub fn display_error(message: &str) {
    println!("{}", formatter::format_error(message));
}

/// A log group that closes itself when dropped.
///
/// Dropping on an early `?` return keeps the log framing balanced.
#[must_use = "the group ends as soon as the guard is dropped"]
pub struct Group {
    _private: (),
}

impl Group {
    pub fn start(title: &str) -> Self {
        println!("{}", formatter::format_group_start(title));
        Group { _private: () }
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        println!("{}", formatter::format_group_end());
    }
}

/// Append a step output to the file the runner named in `GITHUB_OUTPUT`.
pub fn write_output(output_file: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_file)?;
    file.write_all(formatter::format_output(name, value).as_bytes())?;
    Ok(())
}
