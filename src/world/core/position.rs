use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// Integer voxel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Voxel cell containing a world-space point
    pub fn containing(point: Point3<f32>) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negative_coordinates() {
        let pos = VoxelPos::containing(Point3::new(-0.25, 3.99, 7.0));
        assert_eq!(pos, VoxelPos::new(-1, 3, 7));
    }
}
