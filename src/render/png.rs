//! PNG raster canvas backed by the `image` crate

use super::traits::Canvas;
use crate::errors::Result;
use crate::types::{Color, Point};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Hard-edged RGB raster with a white background
#[derive(Debug)]
pub struct PngCanvas {
    pixels: RgbImage,
}

impl PngCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, rgb(Color::WHITE)),
        }
    }

    /// Encode as PNG regardless of the output file extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.pixels.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Read one pixel back; out-of-bounds reads as white
    #[allow(dead_code)]
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x as u32 >= self.pixels.width() || y as u32 >= self.pixels.height()
        {
            return Color::WHITE;
        }
        let Rgb([r, g, b]) = *self.pixels.get_pixel(x as u32, y as u32);
        Color { r, g, b }
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.pixels.width() && (y as u32) < self.pixels.height()
        {
            self.pixels.put_pixel(x as u32, y as u32, rgb(color));
        }
    }
}

fn rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

impl Canvas for PngCanvas {
    /// Membership test over the bounding box, boundary inclusive
    fn draw_ellipse(&mut self, center: Point, radius: Point, color: Color) {
        if radius.x <= 0 || radius.y <= 0 {
            return;
        }
        for y in center.y - radius.y..=center.y + radius.y {
            for x in center.x - radius.x..=center.x + radius.x {
                let dx = f64::from(x - center.x) / f64::from(radius.x);
                let dy = f64::from(y - center.y) / f64::from(radius.y);
                if dx * dx + dy * dy <= 1.0 {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Even-odd scanline fill, plus the outline so that boundary pixels
    /// are always covered
    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

        let mut crossings = Vec::new();
        for y in min_y..=max_y {
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                // half-open rule: each edge covers [min(ay,by), max(ay,by))
                if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
                    let t = f64::from(y - a.y) / f64::from(b.y - a.y);
                    crossings.push(f64::from(a.x) + t * f64::from(b.x - a.x));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x0 = pair[0].ceil() as i32;
                let x1 = pair[1].floor() as i32;
                for x in x0..=x1 {
                    self.plot(x, y, color);
                }
            }
        }

        for i in 0..points.len() {
            self.draw_line(points[i], points[(i + 1) % points.len()], color);
        }
    }

    /// Straight interpolation with rounding, one plot per major-axis step
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.plot(from.x, from.y, color);
            return;
        }
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.plot(
                from.x + (t * f64::from(dx)).round() as i32,
                from.y + (t * f64::from(dy)).round() as i32,
                color,
            );
        }
    }
}
