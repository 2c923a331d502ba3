//! quaymap - Overlay quay mooring safety status on a shipyard facility map

pub mod config;
pub mod dataset;
pub mod domain;
pub mod geometry;
pub mod mooring;
pub mod render;
pub mod scene;
pub mod selection;

pub use geometry::{CoordinateMapper, PixelPoint};
pub use mooring::{MooringIndex, aggregate, classify};
pub use scene::{Scene, SceneBuilder, ViewportState};
