/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for swept collision and ray picking - no methods, just data
/// transformations. Boxes are always axis-aligned with `min <= max`.
use crate::constants::physics::CLIP_EPSILON;
use crate::world::core::{BlockFace, RaycastHit};
use cgmath::{MetricSpace, Point3, Vector3};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> AABB {
    AABB { min, max }
}

/// Unit cube occupying the voxel cell at (x, y, z)
pub fn unit_cube(x: i32, y: i32, z: i32) -> AABB {
    let min = Point3::new(x as f32, y as f32, z as f32);
    AABB {
        min,
        max: min + Vector3::new(1.0, 1.0, 1.0),
    }
}

/// Create AABB from center point and half extents
pub fn aabb_from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> AABB {
    AABB {
        min: center - half_extents,
        max: center + half_extents,
    }
}

/// Get center point of AABB
pub fn aabb_center(aabb: &AABB) -> Point3<f32> {
    Point3::new(
        (aabb.min.x + aabb.max.x) * 0.5,
        (aabb.min.y + aabb.max.y) * 0.5,
        (aabb.min.z + aabb.max.z) * 0.5,
    )
}

/// True for the all-zero box used as an "unset" marker
pub fn aabb_is_null(aabb: &AABB) -> bool {
    aabb.min == Point3::new(0.0, 0.0, 0.0) && aabb.max == Point3::new(0.0, 0.0, 0.0)
}

/// Grow the box only in the directions `delta` points.
///
/// The result covers every position the box passes through while moving by
/// `delta`, so it is the query volume for a motion step.
pub fn aabb_expand(aabb: &AABB, delta: Vector3<f32>) -> AABB {
    let mut out = *aabb;
    if delta.x < 0.0 {
        out.min.x += delta.x;
    } else if delta.x > 0.0 {
        out.max.x += delta.x;
    }
    if delta.y < 0.0 {
        out.min.y += delta.y;
    } else if delta.y > 0.0 {
        out.max.y += delta.y;
    }
    if delta.z < 0.0 {
        out.min.z += delta.z;
    } else if delta.z > 0.0 {
        out.max.z += delta.z;
    }
    out
}

/// Inverse of [`aabb_expand`]: pull the edges `delta` points at back in
pub fn aabb_shrink(aabb: &AABB, delta: Vector3<f32>) -> AABB {
    let mut out = *aabb;
    if delta.x < 0.0 {
        out.min.x -= delta.x;
    } else if delta.x > 0.0 {
        out.max.x -= delta.x;
    }
    if delta.y < 0.0 {
        out.min.y -= delta.y;
    } else if delta.y > 0.0 {
        out.max.y -= delta.y;
    }
    if delta.z < 0.0 {
        out.min.z -= delta.z;
    } else if delta.z > 0.0 {
        out.max.z -= delta.z;
    }
    out
}

/// Symmetric inflation by a per-axis margin (negative margins deflate)
pub fn aabb_grow(aabb: &AABB, margin: Vector3<f32>) -> AABB {
    AABB {
        min: aabb.min - margin,
        max: aabb.max + margin,
    }
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f32>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Translate AABB by offset (mutating)
pub fn aabb_translate(aabb: &mut AABB, offset: Vector3<f32>) {
    aabb.min += offset;
    aabb.max += offset;
}

/// Shared body of the three axis clips, run once the overlap check on the
/// other two axes has passed.
fn clip_axis(stationary_min: f32, stationary_max: f32, moving_min: f32, moving_max: f32, delta: f32) -> f32 {
    let mut delta = delta;
    if delta > 0.0 && moving_max <= stationary_min {
        let gap = stationary_min - moving_max - CLIP_EPSILON;
        if gap < delta {
            delta = gap;
        }
    }
    if delta < 0.0 && moving_min >= stationary_max {
        let gap = stationary_max - moving_min + CLIP_EPSILON;
        if gap > delta {
            delta = gap;
        }
    }
    delta
}

/// Largest x movement `moving` can make before touching `stationary`.
///
/// Only clamps when the boxes overlap strictly on y and z; motion away from
/// the obstacle, or from a box already past it, is returned unchanged.
pub fn aabb_clip_x_collide(stationary: &AABB, moving: &AABB, dx: f32) -> f32 {
    if moving.max.y <= stationary.min.y || moving.min.y >= stationary.max.y {
        return dx;
    }
    if moving.max.z <= stationary.min.z || moving.min.z >= stationary.max.z {
        return dx;
    }
    clip_axis(stationary.min.x, stationary.max.x, moving.min.x, moving.max.x, dx)
}

/// Largest y movement `moving` can make before touching `stationary`
pub fn aabb_clip_y_collide(stationary: &AABB, moving: &AABB, dy: f32) -> f32 {
    if moving.max.x <= stationary.min.x || moving.min.x >= stationary.max.x {
        return dy;
    }
    if moving.max.z <= stationary.min.z || moving.min.z >= stationary.max.z {
        return dy;
    }
    clip_axis(stationary.min.y, stationary.max.y, moving.min.y, moving.max.y, dy)
}

/// Largest z movement `moving` can make before touching `stationary`
pub fn aabb_clip_z_collide(stationary: &AABB, moving: &AABB, dz: f32) -> f32 {
    if moving.max.x <= stationary.min.x || moving.min.x >= stationary.max.x {
        return dz;
    }
    if moving.max.y <= stationary.min.y || moving.min.y >= stationary.max.y {
        return dz;
    }
    clip_axis(stationary.min.z, stationary.max.z, moving.min.z, moving.max.z, dz)
}

/// Strict overlap test - boxes sharing only a face do not intersect
pub fn aabb_intersects(a: &AABB, b: &AABB) -> bool {
    b.max.x > a.min.x
        && b.min.x < a.max.x
        && b.max.y > a.min.y
        && b.min.y < a.max.y
        && b.max.z > a.min.z
        && b.min.z < a.max.z
}

/// Inclusive overlap test - touching faces count
pub fn aabb_intersects_inner(a: &AABB, b: &AABB) -> bool {
    b.max.x >= a.min.x
        && b.min.x <= a.max.x
        && b.max.y >= a.min.y
        && b.min.y <= a.max.y
        && b.max.z >= a.min.z
        && b.min.z <= a.max.z
}

/// Strict point containment - points on the surface are outside
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    point.x > aabb.min.x
        && point.x < aabb.max.x
        && point.y > aabb.min.y
        && point.y < aabb.max.y
        && point.z > aabb.min.z
        && point.z < aabb.max.z
}

/// Average of the three extents, used for render-distance culling
pub fn aabb_size(aabb: &AABB) -> f32 {
    let d = aabb.max - aabb.min;
    (d.x + d.y + d.z) / 3.0
}

/// Point where segment `from -> to` crosses the plane `axis = value`, if the
/// crossing lies within the segment.
fn segment_plane_intersection(from: Point3<f32>, to: Point3<f32>, axis: usize, value: f32) -> Option<Point3<f32>> {
    let d = to - from;
    let (start, span) = match axis {
        0 => (from.x, d.x),
        1 => (from.y, d.y),
        _ => (from.z, d.z),
    };
    if span * span < 1.0e-7 {
        return None;
    }
    let t = (value - start) / span;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(from + d * t)
}

/// Ray-vs-box test along the segment `from -> to`.
///
/// Each of the six face planes is intersected with the segment; points falling
/// outside the face's extent on the other two axes are discarded and the one
/// nearest `from` wins.
pub fn aabb_clip(aabb: &AABB, from: Point3<f32>, to: Point3<f32>) -> Option<RaycastHit> {
    let in_x_face = |p: &Point3<f32>| {
        p.y >= aabb.min.y && p.y <= aabb.max.y && p.z >= aabb.min.z && p.z <= aabb.max.z
    };
    let in_y_face = |p: &Point3<f32>| {
        p.x >= aabb.min.x && p.x <= aabb.max.x && p.z >= aabb.min.z && p.z <= aabb.max.z
    };
    let in_z_face = |p: &Point3<f32>| {
        p.x >= aabb.min.x && p.x <= aabb.max.x && p.y >= aabb.min.y && p.y <= aabb.max.y
    };

    // Visiting order decides ties: -x, +x, -y, +y, -z, +z
    let candidates = [
        (segment_plane_intersection(from, to, 0, aabb.min.x).filter(in_x_face), BlockFace::Left),
        (segment_plane_intersection(from, to, 0, aabb.max.x).filter(in_x_face), BlockFace::Right),
        (segment_plane_intersection(from, to, 1, aabb.min.y).filter(in_y_face), BlockFace::Bottom),
        (segment_plane_intersection(from, to, 1, aabb.max.y).filter(in_y_face), BlockFace::Top),
        (segment_plane_intersection(from, to, 2, aabb.min.z).filter(in_z_face), BlockFace::Back),
        (segment_plane_intersection(from, to, 2, aabb.max.z).filter(in_z_face), BlockFace::Front),
    ];

    let mut nearest: Option<Point3<f32>> = None;
    for point in candidates.iter().filter_map(|(p, _)| *p) {
        match nearest {
            Some(best) if from.distance2(point) >= from.distance2(best) => {}
            _ => nearest = Some(point),
        }
    }
    let point = nearest?;

    // An edge or corner hit matches several planes; the last one listed wins
    let face = candidates
        .iter()
        .filter(|(p, _)| *p == Some(point))
        .map(|(_, face)| *face)
        .last()?;

    Some(RaycastHit {
        point,
        face,
        distance: from.distance(point),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn boxed(min: [f32; 3], max: [f32; 3]) -> AABB {
        create_aabb(Point3::from(min), Point3::from(max))
    }

    #[test]
    fn test_expand_only_grows_towards_motion() {
        let b = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let e = aabb_expand(&b, Vector3::new(-0.5, 2.0, 0.0));
        assert_eq!(e, boxed([-0.5, 0.0, 0.0], [1.0, 3.0, 1.0]));
        assert_eq!(aabb_shrink(&e, Vector3::new(-0.5, 2.0, 0.0)), b);
    }

    #[test]
    fn test_grow_and_move() {
        let b = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let g = aabb_grow(&b, Vector3::new(0.5, 0.0, 1.0));
        assert_eq!(g, boxed([-0.5, 0.0, -1.0], [1.5, 1.0, 2.0]));
        let m = aabb_translated(&b, Vector3::new(1.0, -2.0, 3.0));
        assert_eq!(m, boxed([1.0, -2.0, 3.0], [2.0, -1.0, 4.0]));
    }

    #[test]
    fn test_clip_x_clamps_to_gap() {
        let wall = boxed([2.0, 0.0, 0.0], [3.0, 1.0, 1.0]);
        let mover = boxed([0.0, 0.0, 0.0], [1.5, 1.0, 1.0]);
        assert_eq!(aabb_clip_x_collide(&wall, &mover, 2.0), 0.5);
        // Moving away is never restricted
        assert_eq!(aabb_clip_x_collide(&wall, &mover, -2.0), -2.0);
        // Short of the wall stays as requested
        assert_eq!(aabb_clip_x_collide(&wall, &mover, 0.25), 0.25);
    }

    #[test]
    fn test_clip_y_negative_lands_on_top() {
        let floor = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let mover = boxed([0.2, 1.5, 0.2], [0.8, 3.3, 0.8]);
        assert_eq!(aabb_clip_y_collide(&floor, &mover, -1.0), -0.5);
    }

    #[test]
    fn test_clip_ignores_face_touching_boxes() {
        // Touching on z only: no strict overlap, so no clamp on x
        let wall = boxed([2.0, 0.0, 1.0], [3.0, 1.0, 2.0]);
        let mover = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert_eq!(aabb_clip_x_collide(&wall, &mover, 5.0), 5.0);
    }

    #[test]
    fn test_clip_identity_without_cross_axis_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let a = [rng.gen_range(-4.0f32..4.0), rng.gen_range(-4.0f32..4.0), rng.gen_range(-4.0f32..4.0)];
            let stationary = boxed(a, [a[0] + 1.0, a[1] + 1.0, a[2] + 1.0]);
            let b = [rng.gen_range(-4.0f32..4.0), rng.gen_range(-4.0f32..4.0), rng.gen_range(-4.0f32..4.0)];
            let moving = boxed(b, [b[0] + 0.6, b[1] + 1.8, b[2] + 0.6]);
            let delta = rng.gen_range(-8.0f32..8.0);

            let overlap_x = moving.max.x > stationary.min.x && moving.min.x < stationary.max.x;
            let overlap_y = moving.max.y > stationary.min.y && moving.min.y < stationary.max.y;
            let overlap_z = moving.max.z > stationary.min.z && moving.min.z < stationary.max.z;

            if !(overlap_y && overlap_z) {
                assert_eq!(aabb_clip_x_collide(&stationary, &moving, delta), delta);
            }
            if !(overlap_x && overlap_z) {
                assert_eq!(aabb_clip_y_collide(&stationary, &moving, delta), delta);
            }
            if !(overlap_x && overlap_y) {
                assert_eq!(aabb_clip_z_collide(&stationary, &moving, delta), delta);
            }
        }
    }

    #[test]
    fn test_enclosed_box_cannot_move() {
        let mover = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let shell = [
            boxed([-1.0, 0.0, 0.0], [0.0, 1.0, 1.0]),
            boxed([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
            boxed([0.0, -1.0, 0.0], [1.0, 0.0, 1.0]),
            boxed([0.0, 1.0, 0.0], [1.0, 2.0, 1.0]),
            boxed([0.0, 0.0, -1.0], [1.0, 1.0, 0.0]),
            boxed([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
        ];
        for requested in [
            Vector3::new(0.7, -0.3, 0.2),
            Vector3::new(-2.0, 5.0, -1.0),
        ] {
            let mut moving = mover;
            let dy = shell.iter().fold(requested.y, |d, s| aabb_clip_y_collide(s, &moving, d));
            aabb_translate(&mut moving, Vector3::new(0.0, dy, 0.0));
            let dx = shell.iter().fold(requested.x, |d, s| aabb_clip_x_collide(s, &moving, d));
            aabb_translate(&mut moving, Vector3::new(dx, 0.0, 0.0));
            let dz = shell.iter().fold(requested.z, |d, s| aabb_clip_z_collide(s, &moving, d));
            aabb_translate(&mut moving, Vector3::new(0.0, 0.0, dz));
            assert_eq!((dx, dy, dz), (0.0, 0.0, 0.0));
            assert_eq!(moving, mover);
        }
    }

    #[test]
    fn test_intersection_variants_on_shared_face() {
        let a = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = boxed([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(!aabb_intersects(&a, &b));
        assert!(aabb_intersects_inner(&a, &b));
        assert!(aabb_intersects(&a, &boxed([0.5, 0.5, 0.5], [3.0, 3.0, 3.0])));
        assert!(!aabb_contains_point(&a, Point3::new(1.0, 0.5, 0.5)));
        assert!(aabb_contains_point(&a, Point3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_clip_hits_min_x_face() {
        let b = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let hit = aabb_clip(&b, Point3::new(-1.0, 0.5, 0.5), Point3::new(2.0, 0.5, 0.5))
            .expect("segment crosses the box");
        assert_eq!(hit.point, Point3::new(0.0, 0.5, 0.5));
        assert_eq!(hit.face, BlockFace::Left);
        assert_eq!(hit.face.id(), 4);
        assert!((hit.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_from_above_hits_top() {
        let b = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let hit = aabb_clip(&b, Point3::new(0.5, 2.0, 0.25), Point3::new(0.5, 0.0, 0.25))
            .expect("segment crosses the box");
        assert_eq!(hit.face, BlockFace::Top);
        assert_eq!(hit.face.id(), 1);
        assert_eq!(hit.point, Point3::new(0.5, 1.0, 0.25));
    }

    #[test]
    fn test_clip_misses() {
        let b = boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        // Passes beside the box
        assert!(aabb_clip(&b, Point3::new(-1.0, 2.0, 0.5), Point3::new(2.0, 2.0, 0.5)).is_none());
        // Stops short of the box
        assert!(aabb_clip(&b, Point3::new(-3.0, 0.5, 0.5), Point3::new(-1.0, 0.5, 0.5)).is_none());
    }

    #[test]
    fn test_size_is_average_extent() {
        let b = boxed([0.0, 0.0, 0.0], [0.6, 1.8, 0.6]);
        assert!((aabb_size(&b) - 1.0).abs() < 1e-6);
        assert!(aabb_is_null(&boxed([0.0; 3], [0.0; 3])));
        assert!(!aabb_is_null(&b));
    }
}
