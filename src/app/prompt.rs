//! Interactive prompts for range bounds and the download confirmation.
//!
//! Both prompts read one line at a time from any `BufRead`, so a run can be
//! driven from a terminal, a pipe or a test buffer.

use std::io::{self, BufRead, Write};

use tracing::debug;

/// Asks for a sequence-number bound; empty input or EOF takes `default`.
///
/// Unparseable input is reported and the question is asked again.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `out`.
pub fn prompt_bound<R, W>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: u64,
) -> io::Result<u64>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "Enter {label} file number (default {default}): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            debug!(label, default, "prompt input closed, using default");
            return Ok(default);
        }

        match parse_bound(&line, default) {
            Some(value) => return Ok(value),
            None => writeln!(out, "Invalid number '{}', try again.", line.trim())?,
        }
    }
}

/// Asks a yes/no question; only `y` (any case, surrounding space ignored) is yes.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `out`.
pub fn prompt_confirm<R, W>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{question} (y/n): ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(is_yes(&line))
}

fn parse_bound(line: &str, default: u64) -> Option<u64> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed.parse().ok()
}

fn is_yes(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("y")
}
