use crate::math::{Vec2, Vec3};

/// Orientation test on the path `p0 -> p1 -> p2`: true for a clockwise turn
/// in bitmap space (y up), i.e. a negative determinant.
pub fn turns_right(p0: Vec2, p1: Vec2, p2: Vec2) -> bool {
    let d0 = p1 - p0;
    let d1 = p2 - p1;
    let det = d0.x * d1.y - d0.y * d1.x;
    det < 0.0
}

/// Projected quadrilateral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad2 {
    pub p: [Vec2; 4],
}

/// Quadrilateral in 3D, e.g. one face of a sub-cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad3 {
    pub p: [Vec3; 4],
}

impl Quad2 {
    pub fn new(p: [Vec2; 4]) -> Self {
        Quad2 { p }
    }

    /// Every consecutive vertex triple turns clockwise.
    ///
    /// A quad that fails is degenerate or faces away from the viewer.
    pub fn is_valid(&self) -> bool {
        let p = &self.p;
        turns_right(p[0], p[1], p[2])
            && turns_right(p[1], p[2], p[3])
            && turns_right(p[2], p[3], p[0])
            && turns_right(p[3], p[0], p[1])
    }

    /// Half-plane test against all four edges of a valid quad
    pub fn contains(&self, point: Vec2) -> bool {
        let p = &self.p;
        turns_right(p[0], p[1], point)
            && turns_right(p[1], p[2], point)
            && turns_right(p[2], p[3], point)
            && turns_right(p[3], p[0], point)
    }

    /// Integer bounds `(min_x, min_y, max_x, max_y)` covering every vertex
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.p {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }
        (
            min_x.floor() as i64,
            min_y.floor() as i64,
            max_x.ceil() as i64,
            max_y.ceil() as i64,
        )
    }
}

impl Quad3 {
    pub fn new(p: [Vec3; 4]) -> Self {
        Quad3 { p }
    }
}
