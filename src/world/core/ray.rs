use cgmath::Point3;

/// Box face a segment enters through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFace {
    Bottom, // -Y
    Top,    // +Y
    Back,   // -Z
    Front,  // +Z
    Left,   // -X
    Right,  // +X
}

/// Where a segment first enters a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: Point3<f32>,
    pub face: BlockFace,
    /// Distance from the segment start to `point`
    pub distance: f32,
}
