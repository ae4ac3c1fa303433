//! Transform attribute grammar

use crate::types::Point;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, i32, multispace0, space0, space1},
    combinator::{map, value},
    multi::many1,
    sequence::{delimited, preceded, separated_pair},
    IResult,
};

/// Parsed `transform` attribute
///
/// The operations may appear in any textual order, but application order
/// is always translate, then rotate, then scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    pub translate: Option<Point>,
    pub rotate: Option<i32>,
    pub scale: Option<i32>,
}

impl Transform {
    /// Apply to one point about the given pivot, in the fixed order
    pub fn apply(&self, p: Point, origin: Point) -> Point {
        let p = match self.translate {
            Some(d) => p.translate(d),
            None => p,
        };
        let p = match self.rotate {
            Some(degrees) => p.rotate(origin, degrees),
            None => p,
        };
        match self.scale {
            Some(factor) => p.scale(origin, factor),
            None => p,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Translate(Point),
    Rotate(i32),
    Scale(i32),
}

/// Parse a full `transform` attribute value from `nom`
pub fn transform(input: &str) -> IResult<&str, Transform> {
    map(many1(delimited(multispace0, op, multispace0)), |ops| {
        let mut t = Transform::default();
        for op in ops {
            match op {
                Op::Translate(d) => t.translate = Some(d),
                Op::Rotate(degrees) => t.rotate = Some(degrees),
                Op::Scale(factor) => t.scale = Some(factor),
            }
        }
        t
    })(input)
}

/// Parse a `transform-origin` attribute value ("ox oy") from `nom`
pub fn origin(input: &str) -> IResult<&str, Point> {
    map(separated_pair(i32, separator, i32), |(x, y)| Point { x, y })(input)
}

/// Bare integer attribute value
pub(crate) fn integer(input: &str) -> IResult<&str, i32> {
    i32(input)
}

fn op(input: &str) -> IResult<&str, Op> {
    alt((
        map(preceded(tag("translate"), parens(pair)), Op::Translate),
        map(preceded(tag("rotate"), parens(i32)), Op::Rotate),
        map(preceded(tag("scale"), parens(i32)), Op::Scale),
    ))(input)
}

fn pair(input: &str) -> IResult<&str, Point> {
    map(separated_pair(i32, separator, i32), |(x, y)| Point { x, y })(input)
}

/// Argument separator: a comma with optional spaces, or plain spaces
fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(space0, char(','), space0)),
        value((), space1),
    ))(input)
}

fn parens<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(
        preceded(multispace0, char('(')),
        delimited(multispace0, inner, multispace0),
        char(')'),
    )
}
