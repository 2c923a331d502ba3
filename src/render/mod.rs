pub mod json;
pub mod svg;

pub use json::{SceneDocument, write_json};
pub use svg::{write_svg, write_svg_to};
