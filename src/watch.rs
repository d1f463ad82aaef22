//! File watcher — monitors one file for changes via notify (inotify on Linux).
//!
//! notify::RecommendedWatcher runs callbacks on an internal thread.
//! FileWatcher bridges classified notifications to the main thread via
//! mpsc::channel.
//!
//! The watch is on the file itself, not its parent directory: deletion of
//! the watched file is a terminal condition for the viewer (there is nothing
//! left to render), so losing the watch along with the file is intended.
//! Editors that save through a rename land in the same bucket.

use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};

use anyhow::Result;
use notify::event::{AccessKind, AccessMode, EventKind, ModifyKind};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

/// Event classes the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchEvent {
    /// Content was modified or a writer closed the file: reload.
    Changed,
    /// The watched file itself is gone: terminate cleanly.
    Removed,
}

/// Map a notify event kind to a viewer event. Metadata and rename noise is
/// dropped here so the reload path only ever sees real content changes.
pub fn classify(kind: &EventKind) -> Option<WatchEvent> {
    match kind {
        EventKind::Remove(_) => Some(WatchEvent::Removed),
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => Some(WatchEvent::Changed),
        EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Modify(ModifyKind::Name(_)) => None,
        EventKind::Modify(_) => Some(WatchEvent::Changed),
        _ => None,
    }
}

pub struct FileWatcher {
    rx: mpsc::Receiver<WatchEvent>,
    _watcher: RecommendedWatcher, // Drop stops watching
}

impl FileWatcher {
    /// Create a FileWatcher that monitors the given file.
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    if let Some(ev) = classify(&event.kind) {
                        let _ = tx.send(ev);
                    }
                }
            },
            notify::Config::default(),
        )?;
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow::anyhow!("failed to watch {}: {e}", path.display()))?;

        Ok(Self { rx, _watcher: watcher })
    }

    /// Drain queued notifications (non-blocking). A burst of change events
    /// collapses into one `Changed`; a queued `Removed` wins outright, since
    /// re-rendering a deleted file is pointless.
    ///
    /// A disconnected channel means the watcher thread died: loop-level
    /// fatal, not something to retry.
    pub fn try_next(&self) -> Result<Option<WatchEvent>> {
        let mut seen = None;
        loop {
            match self.rx.try_recv() {
                Ok(WatchEvent::Removed) => return Ok(Some(WatchEvent::Removed)),
                Ok(WatchEvent::Changed) => seen = Some(WatchEvent::Changed),
                Err(TryRecvError::Empty) => return Ok(seen),
                Err(TryRecvError::Disconnected) => {
                    anyhow::bail!("file watcher channel closed unexpectedly")
                }
            }
        }
    }
}
