//! Displayed content and the reload anchor heuristic.
//!
//! Pure logic, no I/O. The document is replaced wholesale on every reload;
//! the anchor heuristic compares the outgoing and incoming line sequences to
//! decide where the view should land afterwards.

/// The currently displayed line sequence. Lines keep their terminators.
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the content with a freshly rendered sequence.
    pub fn replace(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }
}

/// Pick the scroll offset hint for a reload.
///
/// Editors typically rewrite a file by modifying or appending a contiguous
/// region, so the first line that differs from the previous content is where
/// the reader wants to look. Compared by exact byte content.
///
/// - first load (`old` is `None`) → 0
/// - first differing prefix index → that index
/// - equal prefix but lengths differ → `new.len()` (surface the tail change)
/// - identical content → `previous_offset`
///
/// The result is a hint only; callers clamp it against the viewport before
/// adopting it.
pub fn compute_anchor(old: Option<&[String]>, new: &[String], previous_offset: usize) -> usize {
    let Some(old) = old else {
        return 0;
    };

    if let Some(idx) = old.iter().zip(new).position(|(a, b)| a != b) {
        return idx;
    }

    if old.len() != new.len() {
        return new.len();
    }

    previous_offset
}
