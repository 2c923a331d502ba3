pub mod bounds;
pub mod hit;
pub mod mapper;

pub use bounds::Bounds;
pub use hit::point_in_polygon;
pub use mapper::{CoordinateMapper, PixelPoint, rotated_rectangle_corners};
