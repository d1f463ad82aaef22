//! Render invocation: run the external render command and capture its output.
//!
//! The child's stdout and stderr share one pipe, so render diagnostics land
//! inline with the rendered text and a failing command's first output line
//! can be surfaced to the user. The pipe is drained to EOF *before* waiting
//! on the child — waiting first would deadlock once a large render fills the
//! pipe buffer.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use anyhow::Context;
use log::debug;

/// Result of one render invocation.
///
/// `Err` at the `invoke` level means the process could not be started at all
/// (pipe or spawn failure); an outcome means it ran to completion.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Exit status 0. Lines keep their terminators; unterminated trailing
    /// output is kept as a final line.
    Success(Vec<String>),
    /// Nonzero exit status.
    Failed { code: i32, diagnostic: Option<String> },
    /// Killed by a signal (or otherwise no exit code).
    Terminated { diagnostic: Option<String> },
}

impl RenderOutcome {
    /// User-facing message for a non-success outcome, built from the render's
    /// own first output line when it produced any.
    pub fn failure_message(&self) -> Option<String> {
        let (what, diagnostic) = match self {
            RenderOutcome::Success(_) => return None,
            RenderOutcome::Failed { code, diagnostic } => {
                (format!("render failed (exit code {code})"), diagnostic)
            }
            RenderOutcome::Terminated { diagnostic } => ("render terminated".into(), diagnostic),
        };
        Some(match diagnostic {
            Some(d) => format!("{what}: {d}"),
            None => what,
        })
    }
}

/// Run `program` with `args`, capture combined stdout+stderr as lines, and
/// classify the exit status.
pub fn invoke(program: &str, args: &[String]) -> anyhow::Result<RenderOutcome> {
    let (reader, writer) = io::pipe().context("failed to create pipe for render output")?;
    let err_writer = writer
        .try_clone()
        .context("failed to clone pipe for render stderr")?;

    // Scope the Command so the parent's copies of the write ends close after
    // spawn; otherwise the read below never sees EOF.
    let mut child = {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(err_writer));
        cmd.spawn()
            .with_context(|| format!("failed to run render command '{program}'"))?
    };

    let lines = read_lines(reader).context("failed to read render output")?;
    let status = child.wait().context("failed to wait for render command")?;
    debug!("render '{program}' exited with {status}, {} lines", lines.len());

    let diagnostic = lines.first().map(|l| l.trim_end().to_string());
    Ok(match status.code() {
        Some(0) => RenderOutcome::Success(lines),
        Some(code) => RenderOutcome::Failed { code, diagnostic },
        None => RenderOutcome::Terminated { diagnostic },
    })
}

/// Split a byte stream into newline-terminated lines, lossily decoded.
/// A final unterminated chunk becomes the last line.
fn read_lines<R: Read>(reader: R) -> io::Result<Vec<String>> {
    let mut buf = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut chunk = Vec::new();
    loop {
        chunk.clear();
        if buf.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&chunk).into_owned());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_lines_keeps_terminators() {
        let lines = read_lines(Cursor::new(b"one\ntwo\n")).unwrap();
        assert_eq!(lines, vec!["one\n", "two\n"]);
    }

    #[test]
    fn read_lines_partial_tail() {
        let lines = read_lines(Cursor::new(b"one\ntwo")).unwrap();
        assert_eq!(lines, vec!["one\n", "two"]);
    }

    #[test]
    fn read_lines_empty() {
        let lines = read_lines(Cursor::new(b"")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn read_lines_invalid_utf8_is_lossy() {
        let lines = read_lines(Cursor::new(b"ok\n\xff\xfe\n")).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok\n");
        assert!(lines[1].contains('\u{fffd}'));
    }

    #[test]
    fn failure_message_with_diagnostic() {
        let outcome = RenderOutcome::Failed {
            code: 2,
            diagnostic: Some("bad input".into()),
        };
        assert_eq!(
            outcome.failure_message().unwrap(),
            "render failed (exit code 2): bad input"
        );
    }

    #[test]
    fn failure_message_without_output() {
        let outcome = RenderOutcome::Terminated { diagnostic: None };
        assert_eq!(outcome.failure_message().unwrap(), "render terminated");
    }

    #[test]
    fn success_has_no_failure_message() {
        let outcome = RenderOutcome::Success(vec!["x\n".into()]);
        assert!(outcome.failure_message().is_none());
    }
}
