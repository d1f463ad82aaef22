//! Terminal I/O layer: raw mode guard, content drawing, status bar.

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    style::{self, Stylize},
    terminal,
};
use std::io::{self, Write, stdout};

use super::state::Viewport;

// ---------------------------------------------------------------------------
// RawGuard — Drop restores raw mode / alternate screen on every exit path
// ---------------------------------------------------------------------------

// Error text for the user is written only after this guard has cleaned up,
// so diagnostics never get garbled by (or lost with) the alternate screen.
pub(super) struct RawGuard {
    cleaned: bool,
}

impl RawGuard {
    pub(super) fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        stdout().execute(terminal::EnterAlternateScreen)?;
        stdout().execute(cursor::Hide)?;
        Ok(Self { cleaned: false })
    }

    pub(super) fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;
        let mut out = stdout();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub(super) fn check_tty() -> anyhow::Result<()> {
    use std::io::IsTerminal;
    // Only stdout matters. crossterm's `use-dev-tty` reads keyboard from
    // /dev/tty (Unix) or Console API (Windows), so stdin being a pipe is fine.
    if !io::stdout().is_terminal() {
        anyhow::bail!("pagewatch requires an interactive terminal");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Full redraw: visible content slice, then the status bar on the last row.
pub(super) fn draw(lines: &[String], vp: &Viewport, name: &str) -> io::Result<()> {
    let mut out = stdout();
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for row in 0..vp.height() {
        let Some(line) = lines.get(vp.offset() + row as usize) else {
            break;
        };
        out.queue(cursor::MoveTo(0, row))?;
        write!(out, "{}", fit_width(line, vp.width()))?;
    }

    draw_status_bar(&mut out, lines.len(), vp, name)?;
    out.flush()
}

/// Strip the line terminator and truncate to the viewport width.
fn fit_width(line: &str, width: u16) -> &str {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.char_indices().nth(width as usize) {
        Some((byte_idx, _)) => &line[..byte_idx],
        None => line,
    }
}

/// Status bar on the bottom row: file name, visible range, percent, hints.
fn draw_status_bar(
    out: &mut impl Write,
    total: usize,
    vp: &Viewport,
    name: &str,
) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, vp.height()))?;

    let first = if total == 0 { 0 } else { vp.offset() + 1 };
    let last = (vp.offset() + vp.height() as usize).min(total);
    let max_offset = total.saturating_sub(vp.height() as usize);
    let pct = if max_offset == 0 {
        100
    } else {
        vp.offset() * 100 / max_offset
    };

    let middle = format!(
        " {name} | {first}-{last}/{total}  {pct}%  [j/k d/u gg/G q:quit]"
    );
    let padded = format!("{:<width$}", middle, width = vp.width() as usize);
    write!(out, "{}", padded.on_dark_grey().white())?;
    out.queue(style::ResetColor)?;
    Ok(())
}
