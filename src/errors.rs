//! Conversion errors

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that aborts a conversion
///
/// Unrecognized elements are deliberately not listed here: the parser
/// records them as warnings and continues with the element's siblings.
#[derive(Debug, Error)]
pub enum Error {
    /// Input file missing or unreadable
    #[error("can't read input: {0}")]
    Read(#[from] io::Error),

    /// Document is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required attribute is absent
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute value does not match its grammar
    #[error("<{element}>: malformed '{attribute}' value '{value}'")]
    Attribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    /// `use` names an id that has not been defined yet
    #[error("<use> references unknown id '{0}'")]
    UnresolvedReference(String),

    /// Output image could not be encoded or written
    #[error("can't write output: {0}")]
    Write(#[from] image::ImageError),
}
