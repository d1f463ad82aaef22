//! Live-reload pager: the event loop driving watch, render, and display.
//!
//! Single-threaded and cooperative: each cycle drains the watch channel,
//! then polls the keyboard with a short timeout, and handles exactly one
//! event before redrawing. A render invocation is a blocking step of event
//! handling — no input is processed and nothing is drawn while the render
//! command runs, and change notifications arriving meanwhile queue up in the
//! watch channel for the next cycle.
//!
//! Render failures after startup are fatal on purpose: a broken render
//! usually means the rendering toolchain is misconfigured, and silently
//! showing stale content would mislead the user.

mod input;
mod state;
mod terminal;

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use crate::config::Config;
use crate::content::{Document, compute_anchor};
use crate::render::{self, RenderOutcome};
use crate::watch::{FileWatcher, WatchEvent};

use input::{Action, GestureState, map_key_event};
use state::Viewport;

/// One event from either of the loop's two sources.
enum LoopEvent {
    FileChanged,
    Deleted,
    Key(crossterm::event::KeyEvent),
    Resized(u16, u16),
}

/// Run the viewer until the user quits or the watched file is deleted.
///
/// `program`/`args` are the render command; it receives no stdin and its
/// combined output becomes the displayed content.
pub fn run(file: &Path, program: &str, args: &[String], config: &Config) -> Result<()> {
    terminal::check_tty()?;

    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    // Watch before the first render so no early write slips through unseen.
    let watcher = FileWatcher::new(file)?;

    let mut guard = terminal::RawGuard::enter()?;

    let (cols, rows) = crossterm::terminal::size()?;
    let mut vp = Viewport::new(cols, content_rows(rows));

    // First render: with nothing to display, failure here is fatal like any
    // other render failure. The guard's Drop restores the screen before main
    // reports the error.
    let mut doc = Document::new(render_lines(program, args)?);
    terminal::draw(doc.lines(), &vp, &name)?;

    let mut gesture = GestureState::new();
    loop {
        match next_event(&watcher, config.viewer.poll_interval)? {
            LoopEvent::FileChanged => {
                debug!("file changed, re-rendering");
                let lines = render_lines(program, args)?;
                let anchor = compute_anchor(Some(doc.lines()), &lines, vp.offset());
                doc.replace(lines);
                vp.set_offset(anchor, doc.len());
            }
            LoopEvent::Deleted => {
                info!("watched file deleted, exiting");
                break;
            }
            LoopEvent::Key(key) => match map_key_event(key, &mut gesture) {
                Some(Action::Quit) => break,
                Some(action) => {
                    state::apply_action(&mut vp, action, doc.len(), config.viewer.scroll_step);
                }
                None => continue, // no-op key, nothing to redraw
            },
            LoopEvent::Resized(cols, rows) => {
                debug!("terminal resized to {cols}x{rows}");
                vp.resize(cols, content_rows(rows));
                vp.set_offset(vp.offset(), doc.len());
            }
        }
        terminal::draw(doc.lines(), &vp, &name)?;
    }

    guard.cleanup();
    Ok(())
}

/// Content rows: the bottom row is reserved for the status bar.
fn content_rows(rows: u16) -> u16 {
    rows.saturating_sub(1).max(1)
}

/// Invoke the render command and unwrap a successful outcome. Non-success is
/// fatal for the whole program, reported with the render's own diagnostic.
fn render_lines(program: &str, args: &[String]) -> Result<Vec<String>> {
    match render::invoke(program, args)? {
        RenderOutcome::Success(lines) => Ok(lines),
        outcome => match outcome.failure_message() {
            Some(msg) => bail!(msg),
            None => bail!("render failed"),
        },
    }
}

/// Block until either source produces an event.
///
/// The watch channel is drained first each cycle (a queued deletion wins
/// over queued changes); the keyboard is polled with the configured timeout
/// so new watch notifications are picked up promptly.
fn next_event(watcher: &FileWatcher, poll: Duration) -> Result<LoopEvent> {
    loop {
        if let Some(ev) = watcher.try_next()? {
            return Ok(match ev {
                WatchEvent::Changed => LoopEvent::FileChanged,
                WatchEvent::Removed => LoopEvent::Deleted,
            });
        }
        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(LoopEvent::Key(key));
                }
                Event::Resize(cols, rows) => return Ok(LoopEvent::Resized(cols, rows)),
                _ => {}
            }
        }
    }
}
