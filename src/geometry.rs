//! Bounding-box geometry in CSS pixels.
//!
//! [`Rect`] is an element's layout box: position plus size, as laid out before
//! any ancestor scroll offset is applied. Subtracting the enclosing scroll
//! area's offset gives what `getBoundingClientRect()` would report. Only the
//! horizontal axis is consumed by the tab strip auto-scroll.

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A layout bounding box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Return a copy shifted horizontally by `dx`.
    #[inline]
    pub fn translate_x(self, dx: f64) -> Rect {
        Rect {
            x: self.x + dx,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(Rect::ZERO, Rect::default());
    }

    #[test]
    fn edges() {
        let r = Rect::new(10.0, 0.0, 80.0, 20.0);
        assert_eq!(r.right(), 90.0);
        assert_eq!(r.center_x(), 50.0);
    }

    #[test]
    fn translate_keeps_size() {
        let r = Rect::new(10.0, 5.0, 80.0, 20.0).translate_x(-15.0);
        assert_eq!(r, Rect::new(-5.0, 5.0, 80.0, 20.0));
    }
}
