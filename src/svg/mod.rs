mod doc;
mod tag;
pub mod transform;

pub use self::doc::SvgFile;
pub use self::transform::Transform;
