//! Axis-aligned overlap tests between cars and pickups.

use glam::Vec2;

/// Axis-aligned rectangle, top-left anchored; y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// True when the rectangles overlap or touch.
///
/// Separation requires one rect to sit strictly past the other on some
/// axis, so shared edges count as contact.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || b.right() < a.x || a.bottom() < b.y || b.bottom() < a.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
    }

    #[test]
    fn test_contained_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(rects_overlap(&outer, &inner));
    }

    #[test]
    fn test_separated_horizontally() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_separated_vertically() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 11.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_touching_edges_count_as_contact() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &below));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500f32..500.0, ay in -500f32..500.0,
            aw in 0f32..200.0, ah in 0f32..200.0,
            bx in -500f32..500.0, by in -500f32..500.0,
            bw in 0f32..200.0, bh in 0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn gap_on_an_axis_means_no_overlap(
            ax in -500f32..500.0, ay in -500f32..500.0,
            aw in 0f32..200.0, ah in 0f32..200.0,
            gap in 0.1f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(ax + aw + gap, ay, aw, ah);
            prop_assert!(!rects_overlap(&a, &b));
        }
    }
}
