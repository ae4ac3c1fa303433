//! Vector shape model

use crate::render::Canvas;
use crate::svg::Transform;
use crate::types::{Color, Point};

/// A drawable vector shape
///
/// The variant set is closed: every element the document parser accepts
/// maps onto one of these. `Clone` is a deep copy throughout; a `Group`
/// owns its children exclusively and a `Use` owns its private clone, so
/// dropping a shape recursively drops everything under it and no cycles
/// are representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Ellipse(Ellipse),
    Polygon(Polygon),
    Polyline(Polyline),
    Group(Group),
    Use(Use),
}

/// Filled ellipse; radii are stored as a point (rx, ry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ellipse {
    pub fill: Color,
    pub center: Point,
    pub radius: Point,
}

/// Closed filled vertex loop, at least 3 vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub fill: Color,
    pub points: Vec<Point>,
}

/// Open stroked vertex chain, at least 2 vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyline {
    pub stroke: Color,
    pub points: Vec<Point>,
}

/// Ordered children, drawn back to front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub children: Vec<Shape>,
}

/// Private deep clone of a previously defined shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use(Box<Shape>);

impl Use {
    /// Clones the referenced shape immediately; the copy is frozen, so
    /// later changes to the original are never visible through the `Use`.
    pub fn new(referenced: &Shape) -> Self {
        Use(Box::new(referenced.clone()))
    }

    /// The owned clone, for inspection
    #[allow(dead_code)]
    pub fn shape(&self) -> &Shape {
        &self.0
    }
}

impl Shape {
    /// Draw onto the canvas with the primitive operations
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Shape::Ellipse(e) => canvas.draw_ellipse(e.center, e.radius, e.fill),
            Shape::Polygon(p) => canvas.draw_polygon(&p.points, p.fill),
            Shape::Polyline(l) => {
                for pair in l.points.windows(2) {
                    canvas.draw_line(pair[0], pair[1], l.stroke);
                }
            }
            Shape::Group(g) => {
                for child in &g.children {
                    child.draw(canvas);
                }
            }
            Shape::Use(u) => u.0.draw(canvas),
        }
    }

    /// Apply a parsed transform with the given pivot
    ///
    /// An ellipse rotates and scales by its center only; its radii are
    /// unchanged by rotation and scale about the zero point rather than
    /// the pivot. Groups re-apply the transform to every child on each
    /// call, and a `Use` forwards to its owned clone.
    pub fn transform(&mut self, t: &Transform, origin: Point) {
        match self {
            Shape::Ellipse(e) => {
                e.center = t.apply(e.center, origin);
                if let Some(factor) = t.scale {
                    e.radius = e.radius.scale(Point::ZERO, factor);
                }
            }
            Shape::Polygon(Polygon { points, .. })
            | Shape::Polyline(Polyline { points, .. }) => {
                for p in points {
                    *p = t.apply(*p, origin);
                }
            }
            Shape::Group(g) => {
                for child in &mut g.children {
                    child.transform(t, origin);
                }
            }
            Shape::Use(u) => u.0.transform(t, origin),
        }
    }
}
