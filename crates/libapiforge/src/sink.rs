//! Writing generated declarations into an existing source file.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
};

use tracing::info;

use crate::error::{ForgeError, Result};

/// Text identifying the line after which generated code starts.
pub const START_MARKER: &str = "START AUTO GENERATED";
/// Text identifying the line before which generated code ends.
pub const END_MARKER: &str = "END AUTO GENERATED";
/// Formatter run on the target file after splicing by default.
pub const DEFAULT_FORMATTER: &str = "mix format";

/// Byte offset just past the line containing `at`.
fn end_of_line(content: &str, at: usize) -> usize {
    content[at..]
        .find('\n')
        .map_or(content.len(), |newline| at + newline + 1)
}

/// Byte offset of the start of the line containing `at`.
fn start_of_line(content: &str, at: usize) -> usize {
    content[..at].rfind('\n').map_or(0, |newline| newline + 1)
}

/// Replace the region between the marker lines of `content` with `generated`.
///
/// The marker lines and everything outside them are kept verbatim.
pub fn splice(content: &str, generated: &str) -> Result<String> {
    let start = content
        .find(START_MARKER)
        .ok_or_else(|| ForgeError::Splice(format!("no line containing {START_MARKER:?}")))?;
    let region_start = end_of_line(content, start);

    let end = content[region_start..]
        .find(END_MARKER)
        .map(|offset| region_start + offset)
        .ok_or_else(|| {
            ForgeError::Splice(format!("no line containing {END_MARKER:?} after the start marker"))
        })?;
    let region_end = start_of_line(content, end);

    let mut output = String::with_capacity(content.len() + generated.len());
    output.push_str(&content[..region_start]);
    output.push_str(generated);
    if !generated.is_empty() && !generated.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&content[region_end..]);
    Ok(output)
}

/// Splice `generated` into the file at `path`.
pub fn splice_file(path: &Path, generated: &str) -> Result<()> {
    let current = fs::read_to_string(path)?;
    let updated = splice(&current, generated)?;
    fs::write(path, updated)?;
    info!(path = %path.display(), "updated generated region");
    Ok(())
}

/// Run a formatter command line on `path`, appending the path as the final argument.
pub fn run_formatter(command_line: &str, path: &Path) -> Result<()> {
    let words = shell_words::split(command_line)
        .map_err(|e| ForgeError::Formatter(format!("invalid command {command_line:?}: {e}")))?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| ForgeError::Formatter("empty formatter command".to_string()))?;
    let program = which::which(program)
        .map_err(|e| ForgeError::Formatter(format!("{program} not found: {e}")))?;

    info!(formatter = %program.display(), path = %path.display(), "formatting");
    let output = Command::new(&program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ForgeError::Formatter(format!("failed to run {}: {e}", program.display())))?;

    if !output.status.success() {
        return Err(ForgeError::Formatter(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
