pub mod builder;
pub mod popup;
pub mod viewport;

pub use builder::SceneBuilder;
pub use popup::{QuayMooringPopupInfo, ThresholdReading, popup_info};
pub use viewport::ViewportState;

use serde::Serialize;

use crate::config::Palette;
use crate::domain::{FacilityGroup, MooringStatus};
use crate::geometry::{Bounds, PixelPoint, point_in_polygon};
use crate::mooring::MooringIndex;

/// A facility polyline ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct Polyline {
    #[serde(serialize_with = "serialize_group")]
    pub group: FacilityGroup,
    pub name: String,
    pub points: Vec<PixelPoint>,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

/// An interactive quay rectangle
#[derive(Debug, Clone, Serialize)]
pub struct QuaySector {
    pub quay_name: String,
    pub quay_desc: String,
    pub points: Vec<PixelPoint>,
    /// Rotation in degrees about `pivot`
    pub angle: f64,
    pub pivot: PixelPoint,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// None when no mooring record matches the quay
    pub status: Option<MooringStatus>,
    /// Hit-test polygon in 0-100 local space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub text: String,
    pub position: PixelPoint,
    pub angle: f64,
    pub font_size: f64,
    pub fill: String,
}

/// One drawable, in draw order
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polyline(Polyline),
    Quay(QuaySector),
    Label(Label),
}

/// Placement of the whole map group on the canvas
///
/// The group's top-left corner (the extent minimum) is pinned at
/// (`left`, `top`) and the group is rotated by `angle` degrees about it,
/// clockwise on screen for positive angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupTransform {
    pub angle: f64,
    pub left: f64,
    pub top: f64,
}

impl GroupTransform {
    /// Group-local offset (relative to the extent minimum) to canvas coordinates
    pub fn apply(&self, local: PixelPoint) -> PixelPoint {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        PixelPoint::new(
            self.left + local.x * cos - local.y * sin,
            self.top + local.x * sin + local.y * cos,
        )
    }

    /// Canvas coordinates back to a group-local offset
    pub fn invert(&self, canvas: PixelPoint) -> PixelPoint {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let dx = canvas.x - self.left;
        let dy = canvas.y - self.top;
        PixelPoint::new(dx * cos + dy * sin, -dx * sin + dy * cos)
    }
}

/// A complete renderable map for one viewport
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub transform: GroupTransform,
    /// Extent of the map group in projected pixels
    #[serde(serialize_with = "serialize_bounds")]
    pub extent: Option<Bounds>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn quays(&self) -> impl Iterator<Item = &QuaySector> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Quay(q) => Some(q),
            _ => None,
        })
    }

    pub fn quay(&self, name: &str) -> Option<&QuaySector> {
        self.quays().find(|q| q.quay_name == name)
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Label(l) => Some(l),
            _ => None,
        })
    }

    /// Resolve a group-local pointer offset to the quay under it
    ///
    /// The offset is normalized against the group extent to 0-100 and tested
    /// against each quay's sector in draw order.
    pub fn hit_test(&self, local: PixelPoint) -> Option<&QuaySector> {
        let extent = self.extent.as_ref()?;
        let percent = extent.to_percent(extent.min_x + local.x, extent.min_y + local.y);

        self.quays().find(|q| {
            q.sector
                .as_ref()
                .is_some_and(|sector| point_in_polygon(percent, sector))
        })
    }

    /// Resolve a screen pointer to the quay under it
    pub fn quay_at(&self, pointer: PixelPoint, viewport: &ViewportState) -> Option<&QuaySector> {
        let canvas = viewport.screen_to_map(pointer);
        self.hit_test(self.transform.invert(canvas))
    }

    /// Popup for a click on the quay at `pointer`
    ///
    /// Only quays with a mooring record open a popup.
    pub fn select(
        &self,
        pointer: PixelPoint,
        viewport: &ViewportState,
        moorings: &MooringIndex,
        palette: &Palette,
    ) -> Option<QuayMooringPopupInfo> {
        let quay = self.quay_at(pointer, viewport)?;
        if !moorings.contains(&quay.quay_name) {
            return None;
        }
        Some(popup_info(&quay.quay_name, &quay.quay_desc, moorings, palette))
    }
}

fn serialize_group<S>(group: &FacilityGroup, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(group.as_str())
}

fn serialize_bounds<S>(bounds: &Option<Bounds>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match bounds {
        Some(b) => [b.min_x, b.min_y, b.max_x, b.max_y].serialize(serializer),
        None => serializer.serialize_none(),
    }
}
