use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::time::Instant;

const FRAME_INTERVAL_MS: u128 = 120;
const DOT_COUNT: usize = 3;

/// The transient "typing..." row shown while a reply is pending.
///
/// A single shared indicator, never a transcript entry: at most one is live
/// no matter how many requests are outstanding, and any bot append clears it
/// first. With overlapping turns it may be cleared by an unrelated reply and
/// is not re-shown.
#[derive(Debug)]
pub struct TypingIndicator {
    visible: bool,
    frame: usize,
    last_frame_update: Instant,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            visible: false,
            frame: 0,
            last_frame_update: Instant::now(),
        }
    }

    /// Idempotent: a second `show()` never produces a second indicator.
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.frame = 0;
            self.last_frame_update = Instant::now();
        }
    }

    /// No-op when not visible.
    pub fn clear(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update_spinner(&mut self) {
        if self.visible && self.last_frame_update.elapsed().as_millis() >= FRAME_INTERVAL_MS {
            self.frame = (self.frame + 1) % DOT_COUNT;
            self.last_frame_update = Instant::now();
        }
    }

    /// The animated dots row appended after the newest transcript entry.
    pub fn lines(&self) -> Vec<Line<'static>> {
        if !self.visible {
            return Vec::new();
        }

        let mut spans = Vec::with_capacity(DOT_COUNT * 2);
        for i in 0..DOT_COUNT {
            let dot = if i == self.frame { "●" } else { "○" };
            spans.push(Span::styled(
                dot.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }

        vec![Line::from(spans)]
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_is_idempotent() {
        let mut indicator = TypingIndicator::new();
        indicator.show();
        indicator.show();
        assert!(indicator.is_visible());
        assert_eq!(indicator.lines().len(), 1);
    }

    #[test]
    fn clear_tolerates_double_invocation() {
        let mut indicator = TypingIndicator::new();
        indicator.show();
        indicator.clear();
        indicator.clear();
        assert!(!indicator.is_visible());
        assert!(indicator.lines().is_empty());
    }
}
