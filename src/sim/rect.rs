//! Axis-aligned rectangles
//!
//! Every collidable entity in the arena (tank, shot, wall) projects to one of
//! these. The overlap predicate below is the single collision primitive; wall
//! and tank checks both reduce to it.

use glam::DVec2;

/// Axis-aligned rectangle, center plus half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: DVec2,
    pub half: DVec2,
}

impl Rect {
    /// Degenerate geometry (zero, negative, or non-finite extents) is a
    /// programmer error, rejected up front.
    pub fn new(center: DVec2, half: DVec2) -> Self {
        assert!(
            center.is_finite() && half.is_finite(),
            "rect: non-finite geometry: center={center}, half={half}"
        );
        assert!(
            half.x > 0.0 && half.y > 0.0,
            "rect: half-extents must be positive, got {half}"
        );
        Self { center, half }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.half.y
    }

    /// True iff the projections overlap strictly on both axes. Touching
    /// edges do not count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Per-axis overlap magnitudes: `(half_a + half_b) - |center_a - center_b|`
    /// on each axis. Both components are positive iff the rects overlap; the
    /// smaller one is the axis of least penetration.
    #[inline]
    pub fn overlap_depths(&self, other: &Rect) -> DVec2 {
        (self.half + other.half) - (self.center - other.center).abs()
    }
}
