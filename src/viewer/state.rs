//! Viewport state: scroll offset, dimensions, clamping, scroll operations.
//!
//! Pure logic, no I/O. The viewport is the only writer of the scroll offset;
//! every mutation goes through `clamp`, so the offset is always valid for
//! the current content length and height.

use super::input::Action;

pub(super) struct Viewport {
    offset: usize,
    height: u16, // content rows (status bar excluded)
    width: u16,
}

impl Viewport {
    pub(super) fn new(width: u16, height: u16) -> Self {
        Self { offset: 0, height, width }
    }

    pub(super) fn offset(&self) -> usize {
        self.offset
    }

    pub(super) fn height(&self) -> u16 {
        self.height
    }

    pub(super) fn width(&self) -> u16 {
        self.width
    }

    /// Update dimensions only. Callers re-clamp explicitly afterwards, since
    /// the valid offset range depends on content length too.
    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Largest offset that still fills the viewport; 0 when everything fits.
    pub(super) fn clamp(&self, offset: usize, content_len: usize) -> usize {
        let height = self.height as usize;
        if content_len <= height {
            0
        } else {
            offset.min(content_len - height)
        }
    }

    /// Adopt an offset hint, clamped.
    pub(super) fn set_offset(&mut self, offset: usize, content_len: usize) {
        self.offset = self.clamp(offset, content_len);
    }

    pub(super) fn scroll_by(&mut self, delta: isize, content_len: usize) {
        let target = self.offset.saturating_add_signed(delta);
        self.set_offset(target, content_len);
    }

    pub(super) fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub(super) fn scroll_to_bottom(&mut self, content_len: usize) {
        self.set_offset(content_len, content_len);
    }

    fn half_page(&self) -> isize {
        (self.height as isize / 2).max(1)
    }
}

/// Dispatch a navigation action to the viewport. `step` is the configured
/// line count for line-wise motions.
pub(super) fn apply_action(vp: &mut Viewport, action: Action, content_len: usize, step: usize) {
    let step = step as isize;
    match action {
        Action::LineDown => vp.scroll_by(step, content_len),
        Action::LineUp => vp.scroll_by(-step, content_len),
        Action::HalfPageDown => vp.scroll_by(vp.half_page(), content_len),
        Action::HalfPageUp => vp.scroll_by(-vp.half_page(), content_len),
        Action::JumpToTop => vp.scroll_to_top(),
        Action::JumpToBottom => vp.scroll_to_bottom(content_len),
        // Quit never reaches the viewport; the event loop handles it.
        Action::Quit => {}
    }
}
