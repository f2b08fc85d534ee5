//! Horizontal scroll state for scroll containers.
//!
//! `ScrollState` tracks `scrollLeft` for an overflow container, clamped to
//! `[0, content_width - viewport_width]`, and remembers the behavior of the
//! most recent programmatic scroll so tests can tell smooth scrolls from jumps.

// ---------------------------------------------------------------------------
// ScrollBehavior
// ---------------------------------------------------------------------------

/// How a programmatic scroll is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump to the target offset.
    #[default]
    Instant,
    /// Animate to the target offset.
    Smooth,
}

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Horizontal scroll position of a container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollState {
    /// Current scroll offset, always within `[0, max_scroll()]`.
    pub left: f64,
    /// Total width of the scrollable content.
    pub content_width: f64,
    /// Width of the visible part of the container.
    pub viewport_width: f64,
    /// Behavior used by the last `scroll_to` call, if any.
    pub last_behavior: Option<ScrollBehavior>,
}

impl ScrollState {
    /// Create a scroll state with zero offset.
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            left: 0.0,
            content_width,
            viewport_width,
            last_behavior: None,
        }
    }

    /// The largest valid offset: `max(0, content_width - viewport_width)`.
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scroll to an absolute offset, clamping to the valid range.
    pub fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior) {
        self.left = left.clamp(0.0, self.max_scroll());
        self.last_behavior = Some(behavior);
    }

    /// Scroll by a relative delta, clamping to the valid range.
    pub fn scroll_by(&mut self, dx: f64, behavior: ScrollBehavior) {
        self.scroll_to(self.left + dx, behavior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_zero() {
        let s = ScrollState::new(800.0, 300.0);
        assert_eq!(s.left, 0.0);
        assert_eq!(s.max_scroll(), 500.0);
        assert!(s.last_behavior.is_none());
    }

    #[test]
    fn scroll_to_clamps_both_ends() {
        let mut s = ScrollState::new(800.0, 300.0);
        s.scroll_to(900.0, ScrollBehavior::Smooth);
        assert_eq!(s.left, 500.0);
        s.scroll_to(-20.0, ScrollBehavior::Instant);
        assert_eq!(s.left, 0.0);
        assert_eq!(s.last_behavior, Some(ScrollBehavior::Instant));
    }

    #[test]
    fn scroll_by_is_relative() {
        let mut s = ScrollState::new(800.0, 300.0);
        s.scroll_by(120.0, ScrollBehavior::Smooth);
        s.scroll_by(30.0, ScrollBehavior::Smooth);
        assert_eq!(s.left, 150.0);
    }

    #[test]
    fn content_narrower_than_viewport_never_scrolls() {
        let mut s = ScrollState::new(200.0, 300.0);
        assert_eq!(s.max_scroll(), 0.0);
        s.scroll_to(50.0, ScrollBehavior::Smooth);
        assert_eq!(s.left, 0.0);
    }
}
