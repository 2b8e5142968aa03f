// ============================================================================
// vector.rs - Glidepan
// Minimal 2D point/vector value.
// ============================================================================

use serde::{Deserialize, Serialize};

/// A 2D point or vector in distance units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_is_distance_from_origin() {
        assert_eq!(Point::new(3.0, -4.0).magnitude(), 5.0);
        assert_eq!(Point::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn is_zero_needs_both_axes_at_rest() {
        assert!(Point::ZERO.is_zero());
        assert!(!Point::new(0.0, 0.5).is_zero());
        assert!(!Point::new(-1.0, 0.0).is_zero());
    }
}
