//! Collision detection and response
//!
//! Shot-vs-wall contact reports per-axis overlap depths, not just a boolean,
//! so the bounce response can reflect across the axis of least penetration.

use glam::DVec2;

use super::rect::Rect;

/// Overlap depths of a shot against a wall, `None` when there is no contact.
///
/// Delegates the hit/miss decision to [`Rect::overlaps`]; the depths come from
/// [`Rect::overlap_depths`] and are only meaningful on a hit.
pub fn wall_contact(shot: &Rect, wall: &Rect) -> Option<DVec2> {
    if shot.overlaps(wall) {
        Some(shot.overlap_depths(wall))
    } else {
        None
    }
}

/// Reflect a direction vector across the axis of minimum overlap.
///
/// A smaller X overlap means the shot entered through a vertical face, so the
/// horizontal component flips; otherwise the vertical component flips.
pub fn reflect_off(dir: DVec2, overlap: DVec2) -> DVec2 {
    if overlap.x < overlap.y {
        DVec2::new(-dir.x, dir.y)
    } else {
        DVec2::new(dir.x, -dir.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(cx: f64, cy: f64, hw: f64, hh: f64) -> Rect {
        Rect::new(DVec2::new(cx, cy), DVec2::new(hw, hh))
    }

    #[test]
    fn test_wall_contact_miss() {
        let shot = rect(0.0, 0.0, 0.1, 0.1);
        let wall = rect(10.0, 0.0, 1.0, 1.0);
        assert!(wall_contact(&shot, &wall).is_none());
    }

    #[test]
    fn test_wall_contact_reports_depths() {
        // Shot just inside the left face of a wall centered at (10, 0)
        let shot = rect(9.05, 0.0, 0.1, 0.1);
        let wall = rect(10.0, 0.0, 1.0, 1.0);

        let depths = wall_contact(&shot, &wall).expect("shot penetrates wall");
        // X overlap: (0.1 + 1.0) - 0.95 = 0.15; Y overlap: 1.1
        assert!((depths.x - 0.15).abs() < 1e-12);
        assert!((depths.y - 1.1).abs() < 1e-12);
        assert!(depths.x < depths.y);
    }

    #[test]
    fn test_reflect_flips_x_on_minimum_x_overlap() {
        // Heading 0 degrees into a vertical wall face
        let dir = DVec2::new(1.0, 0.0);
        let reflected = reflect_off(dir, DVec2::new(0.15, 1.1));
        assert!((reflected.x - (-1.0)).abs() < 1e-12);
        assert!(reflected.y.abs() < 1e-12);
    }

    #[test]
    fn test_reflect_flips_y_on_minimum_y_overlap() {
        let dir = DVec2::new(0.3, -0.8);
        let reflected = reflect_off(dir, DVec2::new(0.9, 0.2));
        assert!((reflected.x - 0.3).abs() < 1e-12);
        assert!((reflected.y - 0.8).abs() < 1e-12);
    }

    proptest::proptest! {
        #[test]
        fn prop_reflect_twice_is_identity(
            dx in -1.0f64..1.0, dy in -1.0f64..1.0,
            ox in 0.01f64..10.0, oy in 0.01f64..10.0,
        ) {
            let dir = DVec2::new(dx, dy);
            let overlap = DVec2::new(ox, oy);
            let twice = reflect_off(reflect_off(dir, overlap), overlap);
            proptest::prop_assert_eq!(twice, dir);
        }

        #[test]
        fn prop_reflect_preserves_magnitude(
            dx in -1.0f64..1.0, dy in -1.0f64..1.0,
            ox in 0.01f64..10.0, oy in 0.01f64..10.0,
        ) {
            let dir = DVec2::new(dx, dy);
            let reflected = reflect_off(dir, DVec2::new(ox, oy));
            proptest::prop_assert!((reflected.length() - dir.length()).abs() < 1e-12);
        }
    }
}
