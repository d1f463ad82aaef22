//! pagewatch — a live-reloading pager for rendered documents.
//!
//! Watches a single source file, re-runs an external render command whenever
//! the file changes, and shows the captured output in a scrollable terminal
//! view. The scroll position is re-anchored to the first changed line after
//! each reload, so the reader stays on the part of the document they were
//! editing.

pub mod config;
pub mod content;
pub mod render;
pub mod viewer;
pub mod watch;
