//! Pure formatting functions for workflow-command output.
//!
//! A CI runner reads `::command::value` lines from stdout. Everything here
//! returns the line to print so the rendering can be tested without capturing
//! output.

/// Escape a message so the runner does not split it or read it as a command.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape_data(message))
}

/// Open a collapsible log group.
pub fn format_group_start(title: &str) -> String {
    command("group", title)
}

/// Close the innermost log group.
pub fn format_group_end() -> String {
    "::endgroup::".to_string()
}

/// Format a debug line, shown only when step debugging is enabled.
pub fn format_debug(message: &str) -> String {
    command("debug", message)
}

/// Format a notice annotation.
pub fn format_notice(message: &str) -> String {
    command("notice", message)
}

/// Format an error annotation.
pub fn format_error(message: &str) -> String {
    command("error", message)
}

/// Format a step output entry for the `GITHUB_OUTPUT` file.
///
/// Uses the heredoc form so values may span lines; the delimiter is chosen so
/// it cannot appear in `value`.
pub fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = String::from("ghadelimiter");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}
