//! Output formatters shared by the commands.
//!
//! Structured results go through [`format_output`]. Tool logs and trees have
//! their own renderers because their text form is line-oriented rather than
//! a dump of the JSON value.

use crate::cli::OutputFormat;
use agent_vfs_store::{Node, Store};
use agent_vfs_tools::ToolLogEntry;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use agent_vfs_cli::cli::OutputFormat;
/// use agent_vfs_cli::formatters::format_output;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     files: usize,
/// }
///
/// let output = format_output(&Summary { files: 3 }, OutputFormat::Json)?;
/// assert!(output.contains("\"files\": 3"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Renders a tool log, one call per block.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_log(log: &[ToolLogEntry], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json::format(&log);
    }

    let mut out = String::new();
    for entry in log {
        let header = format!(
            "[{}] {} {} {}",
            entry.sequence, entry.tool, entry.command, entry.path
        );
        let status = if entry.result.is_success() { "ok" } else { "failed" };

        if format == OutputFormat::Pretty {
            let status = if entry.result.is_success() {
                status.green().bold()
            } else {
                status.red().bold()
            };
            writeln!(out, "{} {status}", header.bold())?;
        } else {
            writeln!(out, "{header} {status}")?;
        }
        for line in entry.result.text().lines() {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(out.trim_end().to_string())
}

/// Renders every node of a store, indented by depth.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_tree(store: &Store, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let nodes: Vec<_> = store.walk().map(Node::metadata).collect();
        return json::format(&nodes);
    }

    let mut out = String::from("/");
    for node in store.walk() {
        let indent = "  ".repeat(node.path().depth());
        let (marker, name) = match node {
            Node::File(file) => ("[FILE]", file.name().to_string()),
            Node::Directory(dir) => ("[DIR]", dir.name().to_string()),
        };
        if format == OutputFormat::Pretty {
            let name = if node.is_directory() {
                name.blue().bold().to_string()
            } else {
                name
            };
            write!(out, "\n{indent}{} {name}", marker.dimmed())?;
        } else {
            write!(out, "\n{indent}{marker} {name}")?;
        }
    }
    Ok(out)
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }

    /// Format data as compact JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as single-line JSON, for piping.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    fn format_value(value: &Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => format!("\"{}\"", s.green()),
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Array(items) => {
                let body: Vec<String> = items
                    .iter()
                    .map(|item| format!("{next_indent_str}{}", format_value(item, indent + 1)))
                    .collect();
                format!("[\n{}\n{indent_str}]", body.join(",\n"))
            }
            Value::Object(map) if map.is_empty() => "{}".to_string(),
            Value::Object(map) => {
                let body: Vec<String> = map
                    .iter()
                    .map(|(key, val)| {
                        format!(
                            "{next_indent_str}\"{}\": {}",
                            key.blue().bold(),
                            format_value(val, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{indent_str}}}", body.join(",\n"))
            }
        }
    }
}
