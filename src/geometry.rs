//! Scene geometry primitives
//!
//! All coordinates are in image pixel space: origin at the top-left of the
//! photograph, x increasing to the right, y increasing downward.

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Squared-length threshold below which a line counts as degenerate
const DEGENERATE_LENGTH_SQ: f32 = 1e-6;

/// A line through two points, in pixel coordinates.
///
/// Lines are immutable once assigned to a role (ground or scale); replacing
/// a role's line discards the old one.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    /// Create a new line between two points
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the segment between the endpoints
    pub fn length(&self) -> f32 {
        self.start.distance_to(&self.end)
    }

    /// Squared length of the segment
    pub fn length_squared(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        dx * dx + dy * dy
    }

    /// Check whether the endpoints coincide (within floating tolerance)
    ///
    /// A degenerate line has no direction, so perpendicular distances to it
    /// are undefined.
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < DEGENERATE_LENGTH_SQ
    }
}

/// Perpendicular distance from a point to the infinite line through `line`
///
/// Computed as `|cross(B - A, A - P)| / |B - A|` where A and B are the line's
/// endpoints. Returns `None` when the line is degenerate and the distance is
/// undefined; callers decide how to surface that case.
pub fn point_to_line_distance(point: &Point, line: &Line) -> Option<f32> {
    if line.is_degenerate() {
        return None;
    }

    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    let cross = dx * (line.start.y - point.y) - dy * (line.start.x - point.x);
    Some(cross.abs() / line.length())
}
