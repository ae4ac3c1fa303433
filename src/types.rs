//! Geometric and color value types

use derive_more::{Add, AddAssign, Neg, Sub, SubAssign};
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{alpha1, char, i32},
    combinator::{map, map_res},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};
use strum::EnumString;

/// Integer pixel coordinate pair
///
/// All geometric operations are pure and return new points.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Add, AddAssign, Sub, SubAssign, Neg,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Move by the given displacement
    pub fn translate(self, d: Point) -> Point {
        self + d
    }

    /// Rotate about `origin` by integer degrees, counter-clockwise positive,
    /// rounded to the nearest integer coordinates
    pub fn rotate(self, origin: Point, degrees: i32) -> Point {
        let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
        let dx = f64::from(self.x - origin.x);
        let dy = f64::from(self.y - origin.y);
        Point {
            x: origin.x + (cos * dx - sin * dy).round() as i32,
            y: origin.y + (sin * dx + cos * dy).round() as i32,
        }
    }

    /// Scale about `origin` by a uniform integer factor
    pub fn scale(self, origin: Point, factor: i32) -> Point {
        Point {
            x: origin.x + (self.x - origin.x) * factor,
            y: origin.y + (self.y - origin.y) * factor,
        }
    }

    /// Parse an "x,y" pair from `nom`
    pub fn parse(input: &str) -> IResult<&str, Point> {
        map(separated_pair(i32, char(','), i32), |(x, y)| Point { x, y })(input)
    }
}

/// RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    /// Parse a "#rrggbb" hex triple or one of the named palette colors
    pub fn parse(input: &str) -> IResult<&str, Color> {
        alt((hex_color, named_color))(input)
    }
}

/// The fixed named palette accepted in `fill` and `stroke` attributes
#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum NamedColor {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl From<NamedColor> for Color {
    fn from(name: NamedColor) -> Color {
        use NamedColor::*;
        let (r, g, b) = match name {
            Black => (0, 0, 0),
            White => (255, 255, 255),
            Red => (255, 0, 0),
            Green => (0, 255, 0),
            Blue => (0, 0, 255),
            Yellow => (255, 255, 0),
            Magenta => (255, 0, 255),
            Cyan => (0, 255, 255),
        };
        Color { r, g, b }
    }
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    map(
        preceded(char('#'), tuple((hex_byte, hex_byte, hex_byte))),
        |(r, g, b)| Color { r, g, b },
    )(input)
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |s| u8::from_str_radix(s, 16),
    )(input)
}

fn named_color(input: &str) -> IResult<&str, Color> {
    map_res(alpha1, |s: &str| s.parse::<NamedColor>().map(Color::from))(input)
}

#[cfg(test)]
mod tests {
    use super::{Color, Point};

    #[test]
    fn translate_roundtrip() {
        let p = Point { x: 7, y: -3 };
        let d = Point { x: 12, y: 40 };
        assert_eq!(p.translate(d).translate(-d), p);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Point { x: 10, y: 0 };
        assert_eq!(p.rotate(Point::ZERO, 90), Point { x: 0, y: 10 });
        assert_eq!(p.rotate(Point::ZERO, -90), Point { x: 0, y: -10 });
    }

    #[test]
    fn rotate_full_turn_is_identity() {
        let origin = Point { x: 3, y: 5 };
        for p in [Point { x: 17, y: 4 }, Point { x: -8, y: 11 }, Point::ZERO] {
            assert_eq!(p.rotate(origin, 360), p);
        }
    }

    #[test]
    fn rotate_about_pivot() {
        let p = Point { x: 6, y: 5 };
        let origin = Point { x: 5, y: 5 };
        assert_eq!(p.rotate(origin, 180), Point { x: 4, y: 5 });
    }

    #[test]
    fn scale_about_origin() {
        let p = Point { x: 4, y: 6 };
        let origin = Point { x: 2, y: 2 };
        assert_eq!(p.scale(origin, 3), Point { x: 8, y: 14 });
        assert_eq!(p.scale(Point::ZERO, 2), Point { x: 8, y: 12 });
    }

    #[test]
    fn point_parse() {
        fn pt(s: &str) -> Point {
            Point::parse(s).unwrap().1
        }

        assert_eq!(pt("3,4"), Point { x: 3, y: 4 });
        assert_eq!(pt("-3,+4"), Point { x: -3, y: 4 });
        assert!(Point::parse("3;4").is_err());
    }

    #[test]
    fn color_parse() {
        fn col(s: &str) -> Color {
            Color::parse(s).unwrap().1
        }

        assert_eq!(col("#ff0080"), Color { r: 255, g: 0, b: 128 });
        assert_eq!(col("red"), Color { r: 255, g: 0, b: 0 });
        assert_eq!(col("cyan"), Color { r: 0, g: 255, b: 255 });
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("mauve").is_err());
    }
}
