//! Recognized SVG element tags

use strum::EnumString;

/// The fixed element subset the document parser dispatches on
///
/// Anything that fails to parse into this set is skipped with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    #[strum(serialize = "g")]
    Group,
    Ellipse,
    Circle,
    Rect,
    Polygon,
    Polyline,
    Line,
    Use,
}
