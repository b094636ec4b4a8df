//! 3D positions.

use serde::{Deserialize, Serialize};

/// A point in 3D space (world coordinates of the grid).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation `self + t * (other - self)`, component-wise.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Position {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(2.0, 4.0, -6.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Position::new(1.0, 1.0, 1.0);
        let b = Position::new(3.0, 5.0, 1.0);
        assert_eq!(a.lerp(&b, 0.5), Position::new(2.0, 3.0, 1.0));
    }
}
