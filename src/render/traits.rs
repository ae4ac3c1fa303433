//! Canvas trait

use crate::types::{Color, Point};
use std::fmt::Debug;

/// Primitive drawing surface the shape model paints on
///
/// Implementations own the pixel policy: clipping, edge coverage and any
/// anti-aliasing are theirs to decide.
pub trait Canvas: Debug {
    /// Paint a filled ellipse; `radius` carries (rx, ry)
    fn draw_ellipse(&mut self, center: Point, radius: Point, color: Color);

    /// Paint a filled closed polygon
    fn draw_polygon(&mut self, points: &[Point], color: Color);

    /// Stroke a single segment
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
}
