//! SVG document parser

use super::tag::Tag;
use super::transform;
use crate::errors::{Error, Result};
use crate::shape::{Ellipse, Group, Polygon, Polyline, Shape, Use};
use crate::types::{Color, Point};
use nom::{
    character::complete::multispace1, combinator::all_consuming, multi::separated_list1,
    Finish, IResult,
};
use roxmltree::Node;
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

/// Parsed SVG document: canvas size plus the fully transformed shape list
///
/// All transforms are baked in during parsing; drawing the shapes in order
/// is all that is left to do.
#[derive(Debug)]
pub struct SvgFile {
    pub dimensions: Point,
    pub shapes: Vec<Shape>,
    pub warnings: Vec<String>,
}

impl SvgFile {
    /// Load and parse an SVG file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse SVG document text
    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();

        let width = dimension_attr(root, "width")?;
        let height = dimension_attr(root, "height")?;

        let mut session = Session::default();
        let mut shapes = Vec::new();
        for child in root.children().filter(Node::is_element) {
            parse_element(child, &mut shapes, &mut session)?;
        }

        Ok(SvgFile {
            dimensions: Point { x: width, y: height },
            shapes,
            warnings: session.warnings,
        })
    }
}

/// State for one parse session
///
/// The registry is a view of previously parsed shapes: an entry mirrors
/// the shape in the owning tree, including transforms an enclosing group
/// applies after the element was registered. It never owns the shapes in
/// the output tree. `registered` logs ids in registration order so a
/// group can tell which entries its own transform must reach.
#[derive(Debug, Default)]
struct Session {
    registry: HashMap<String, Shape>,
    registered: Vec<String>,
    warnings: Vec<String>,
}

/// Parse one element and append the resulting shape to `shapes`
///
/// Recurses for groups; a group's own transform is applied only after all
/// of its children are built, so it reaches every descendant uniformly.
fn parse_element(node: Node, shapes: &mut Vec<Shape>, session: &mut Session) -> Result<()> {
    let name = node.tag_name().name();
    let Ok(tag) = name.parse::<Tag>() else {
        session
            .warnings
            .push(format!("skipping unrecognized element <{name}>"));
        return Ok(());
    };

    let mark = session.registered.len();
    let mut shape = match tag {
        Tag::Group => {
            let mut children = Vec::new();
            for child in node.children().filter(Node::is_element) {
                parse_element(child, &mut children, session)?;
            }
            Shape::Group(Group { children })
        }
        Tag::Ellipse => Shape::Ellipse(Ellipse {
            fill: color_attr(node, "fill")?,
            center: Point {
                x: int_attr(node, "cx")?,
                y: int_attr(node, "cy")?,
            },
            radius: Point {
                x: int_attr(node, "rx")?,
                y: int_attr(node, "ry")?,
            },
        }),
        Tag::Circle => {
            let r = int_attr(node, "r")?;
            Shape::Ellipse(Ellipse {
                fill: color_attr(node, "fill")?,
                center: Point {
                    x: int_attr(node, "cx")?,
                    y: int_attr(node, "cy")?,
                },
                radius: Point { x: r, y: r },
            })
        }
        Tag::Rect => {
            let x = int_attr(node, "x")?;
            let y = int_attr(node, "y")?;
            let width = int_attr(node, "width")?;
            let height = int_attr(node, "height")?;
            // corners follow the inclusive pixel convention of the raster
            Shape::Polygon(Polygon {
                fill: color_attr(node, "fill")?,
                points: vec![
                    Point { x, y },
                    Point { x: x + width - 1, y },
                    Point {
                        x: x + width - 1,
                        y: y + height - 1,
                    },
                    Point {
                        x,
                        y: y + height - 1,
                    },
                ],
            })
        }
        Tag::Polygon => Shape::Polygon(Polygon {
            fill: color_attr(node, "fill")?,
            points: points_attr(node, 3)?,
        }),
        Tag::Polyline => Shape::Polyline(Polyline {
            stroke: color_attr(node, "stroke")?,
            points: points_attr(node, 2)?,
        }),
        Tag::Line => Shape::Polyline(Polyline {
            stroke: color_attr(node, "stroke")?,
            points: vec![
                Point {
                    x: int_attr(node, "x1")?,
                    y: int_attr(node, "y1")?,
                },
                Point {
                    x: int_attr(node, "x2")?,
                    y: int_attr(node, "y2")?,
                },
            ],
        }),
        Tag::Use => {
            let href = require_attr(node, "href")?;
            let id = href.strip_prefix('#').unwrap_or(href);
            let referenced = session
                .registry
                .get(id)
                .ok_or_else(|| Error::UnresolvedReference(id.to_string()))?;
            Shape::Use(Use::new(referenced))
        }
    };

    if let Some(text) = node.attribute("transform") {
        let t = parse_attr(node, "transform", text, transform::transform)?;
        let origin = match node.attribute("transform-origin") {
            Some(text) => parse_attr(node, "transform-origin", text, transform::origin)?,
            None => Point::ZERO,
        };
        shape.transform(&t, origin);

        // ids registered inside this subtree mirror shapes the transform
        // just moved; keep their registry entries in step
        let subtree: HashSet<&str> = session.registered[mark..]
            .iter()
            .map(String::as_str)
            .collect();
        for id in subtree {
            if let Some(mirrored) = session.registry.get_mut(id) {
                mirrored.transform(&t, origin);
            }
        }
    }

    // registered before any sibling is parsed, never before
    if let Some(id) = node.attribute("id") {
        session.registry.insert(id.to_string(), shape.clone());
        session.registered.push(id.to_string());
    }

    shapes.push(shape);
    Ok(())
}

fn require_attr<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| Error::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name,
    })
}

/// Run a `nom` attribute grammar over the whole trimmed value
fn parse_attr<'a, T>(
    node: Node,
    name: &'static str,
    value: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Result<T> {
    all_consuming(parser)(value.trim())
        .finish()
        .map(|(_, parsed)| parsed)
        .map_err(|_| malformed(node, name, value))
}

fn malformed(node: Node, attribute: &'static str, value: &str) -> Error {
    Error::Attribute {
        element: node.tag_name().name().to_string(),
        attribute,
        value: value.to_string(),
    }
}

fn int_attr(node: Node, name: &'static str) -> Result<i32> {
    parse_attr(node, name, require_attr(node, name)?, transform::integer)
}

/// Positive integer attribute, for the root canvas size
fn dimension_attr(node: Node, name: &'static str) -> Result<i32> {
    let value = require_attr(node, name)?;
    let n = parse_attr(node, name, value, transform::integer)?;
    if n <= 0 {
        return Err(malformed(node, name, value));
    }
    Ok(n)
}

fn color_attr(node: Node, name: &'static str) -> Result<Color> {
    parse_attr(node, name, require_attr(node, name)?, Color::parse)
}

fn points_attr(node: Node, min: usize) -> Result<Vec<Point>> {
    let value = require_attr(node, "points")?;
    let points = parse_attr(
        node,
        "points",
        value,
        separated_list1(multispace1, Point::parse),
    )?;
    if points.len() < min {
        return Err(malformed(node, "points", value));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::SvgFile;
    use crate::errors::Error;
    use crate::shape::Shape;
    use crate::types::{Color, Point};

    fn doc(body: &str) -> SvgFile {
        SvgFile::parse(&format!(
            "<svg width=\"100\" height=\"100\">{body}</svg>"
        ))
        .unwrap()
    }

    #[test]
    fn root_dimensions() {
        let file = doc("");
        assert_eq!(file.dimensions, Point { x: 100, y: 100 });
        assert!(file.shapes.is_empty());
    }

    #[test]
    fn rect_corners_are_inclusive() {
        let file = doc("<rect fill=\"red\" x=\"0\" y=\"0\" width=\"10\" height=\"5\"/>");
        let Shape::Polygon(p) = &file.shapes[0] else {
            panic!("expected polygon");
        };
        assert_eq!(
            p.points,
            [
                Point { x: 0, y: 0 },
                Point { x: 9, y: 0 },
                Point { x: 9, y: 4 },
                Point { x: 0, y: 4 },
            ]
        );
        assert_eq!(p.fill, Color { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn circle_becomes_ellipse() {
        let file = doc("<circle fill=\"blue\" cx=\"5\" cy=\"5\" r=\"3\"/>");
        let Shape::Ellipse(e) = &file.shapes[0] else {
            panic!("expected ellipse");
        };
        assert_eq!(e.center, Point { x: 5, y: 5 });
        assert_eq!(e.radius, Point { x: 3, y: 3 });
    }

    #[test]
    fn line_becomes_two_point_polyline() {
        let file =
            doc("<line stroke=\"black\" x1=\"1\" y1=\"2\" x2=\"8\" y2=\"9\"/>");
        let Shape::Polyline(l) = &file.shapes[0] else {
            panic!("expected polyline");
        };
        assert_eq!(l.points, [Point { x: 1, y: 2 }, Point { x: 8, y: 9 }]);
    }

    #[test]
    fn polygon_points_list() {
        let file = doc("<polygon fill=\"green\" points=\"0,0 4,0 4,4 0,4\"/>");
        let Shape::Polygon(p) = &file.shapes[0] else {
            panic!("expected polygon");
        };
        assert_eq!(p.points.len(), 4);
        assert_eq!(p.points[2], Point { x: 4, y: 4 });
    }

    #[test]
    fn element_transform_with_origin() {
        let file = doc(
            "<circle fill=\"red\" cx=\"5\" cy=\"5\" r=\"2\" \
             transform=\"rotate(180)\" transform-origin=\"5 0\"/>",
        );
        let Shape::Ellipse(e) = &file.shapes[0] else {
            panic!("expected ellipse");
        };
        assert_eq!(e.center, Point { x: 5, y: -5 });
    }

    #[test]
    fn group_transform_applies_after_children() {
        // the inner rect has its own transform; the group's translate is
        // layered on top of the already transformed child
        let file = doc(
            "<g transform=\"translate(10 0)\">\
               <rect fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\" \
                transform=\"translate(0 10)\"/>\
             </g>",
        );
        let Shape::Group(g) = &file.shapes[0] else {
            panic!("expected group");
        };
        let Shape::Polygon(p) = &g.children[0] else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 10, y: 10 });
    }

    #[test]
    fn use_transform_leaves_original_untouched() {
        let file = doc(
            "<rect id=\"s1\" fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\"/>\
             <use href=\"#s1\" transform=\"translate(5 0)\"/>",
        );
        let Shape::Use(u) = &file.shapes[1] else {
            panic!("expected use");
        };
        let Shape::Polygon(p) = u.shape() else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 5, y: 0 });

        // the original is untouched by the use element's transform
        let Shape::Polygon(p) = &file.shapes[0] else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 0, y: 0 });
    }

    #[test]
    fn use_sees_group_transform_applied_after_registration() {
        // the enclosing group's translate runs after s1 is registered but
        // before the outer use resolves it; the use must reference the
        // shape as it now stands in the tree, not as first registered
        let file = doc(
            "<g transform=\"translate(50 0)\">\
               <rect id=\"s1\" fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\"/>\
             </g>\
             <use href=\"#s1\"/>",
        );
        let Shape::Use(u) = &file.shapes[1] else {
            panic!("expected use");
        };
        let Shape::Polygon(p) = u.shape() else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 50, y: 0 });

        // matching the owning copy inside the group
        let Shape::Group(g) = &file.shapes[0] else {
            panic!("expected group");
        };
        let Shape::Polygon(p) = &g.children[0] else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 50, y: 0 });
    }

    #[test]
    fn nested_group_transforms_all_reach_the_registry() {
        let file = doc(
            "<g transform=\"translate(1 0)\">\
               <g transform=\"translate(10 0)\">\
                 <rect id=\"s1\" fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\"/>\
               </g>\
             </g>\
             <use href=\"#s1\"/>",
        );
        let Shape::Use(u) = &file.shapes[1] else {
            panic!("expected use");
        };
        let Shape::Polygon(p) = u.shape() else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 11, y: 0 });
    }

    #[test]
    fn use_inside_group_gets_the_group_transform_once() {
        // both the original and the sibling use get the group's translate
        // exactly once; the use's copy was cloned before it ran
        let file = doc(
            "<g transform=\"translate(5 0)\">\
               <rect id=\"s1\" fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\"/>\
               <use href=\"#s1\"/>\
             </g>",
        );
        let Shape::Group(g) = &file.shapes[0] else {
            panic!("expected group");
        };
        let Shape::Use(u) = &g.children[1] else {
            panic!("expected use");
        };
        let Shape::Polygon(p) = u.shape() else {
            panic!("expected polygon");
        };
        assert_eq!(p.points[0], Point { x: 5, y: 0 });
    }

    #[test]
    fn forward_reference_is_fatal() {
        let err = SvgFile::parse(
            "<svg width=\"10\" height=\"10\">\
               <use href=\"#later\"/>\
               <rect id=\"later\" fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\"/>\
             </svg>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference(id) if id == "later"));
    }

    #[test]
    fn unrecognized_element_is_skipped_with_warning() {
        let file = doc(
            "<text x=\"1\" y=\"1\">hi</text>\
             <circle fill=\"red\" cx=\"5\" cy=\"5\" r=\"1\"/>",
        );
        assert_eq!(file.shapes.len(), 1);
        assert_eq!(file.warnings.len(), 1);
        assert!(file.warnings[0].contains("<text>"));
    }

    #[test]
    fn malformed_attributes_are_fatal() {
        let bad = [
            "<circle fill=\"red\" cx=\"abc\" cy=\"5\" r=\"1\"/>",
            "<circle fill=\"nope\" cx=\"5\" cy=\"5\" r=\"1\"/>",
            "<rect fill=\"red\" x=\"0\" y=\"0\" width=\"2\" height=\"2\" \
              transform=\"rotate(ninety)\"/>",
            "<polygon fill=\"red\" points=\"0,0 1,1\"/>",
        ];
        for body in bad {
            let res = SvgFile::parse(&format!(
                "<svg width=\"10\" height=\"10\">{body}</svg>"
            ));
            assert!(
                matches!(res, Err(Error::Attribute { .. })),
                "accepted: {body}"
            );
        }
    }

    #[test]
    fn missing_attribute_is_fatal() {
        let res = SvgFile::parse(
            "<svg width=\"10\" height=\"10\">\
               <circle cx=\"5\" cy=\"5\" r=\"1\"/>\
             </svg>",
        );
        assert!(matches!(
            res,
            Err(Error::MissingAttribute { attribute: "fill", .. })
        ));
    }

    #[test]
    fn non_positive_dimensions_name_the_offending_attribute() {
        let err = SvgFile::parse("<svg width=\"10\" height=\"-3\"></svg>").unwrap_err();
        let Error::Attribute { attribute, value, .. } = err else {
            panic!("expected attribute error, got {err:?}");
        };
        assert_eq!(attribute, "height");
        assert_eq!(value, "-3");
    }

    #[test]
    fn not_xml_is_fatal() {
        assert!(matches!(SvgFile::parse("<svg"), Err(Error::Xml(_))));
    }
}
