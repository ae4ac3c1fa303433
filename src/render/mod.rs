//! Rasterization

mod png;
mod traits;

pub use self::png::PngCanvas;
pub use self::traits::Canvas;

use crate::shape::Shape;
use crate::types::Point;

/// Draw the fully transformed shape list onto a fresh canvas
///
/// Shapes are drawn in document order; later shapes overdraw earlier ones.
/// No transform happens here, the parser already baked the geometry.
pub fn render(dimensions: Point, shapes: &[Shape]) -> PngCanvas {
    let mut canvas = PngCanvas::new(dimensions.x as u32, dimensions.y as u32);
    for shape in shapes {
        shape.draw(&mut canvas);
    }
    canvas
}
