use geo::{LineString, Point, Rotate};
use serde::Serialize;

use crate::config::Calibration;
use crate::domain::{QuayOrigin, SurveyPoint};

/// A point in screen space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Affine mapping from survey coordinates to viewport pixels
///
/// The survey is stored rotated a quarter turn relative to the screen, so the
/// axes swap:
/// - x = (northing - inner_y) * height / (outer_y - inner_y)
/// - y = (easting - inner_x) * width / (outer_x - inner_x) * ratio_x * height / width
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    inner_x: f64,
    inner_y: f64,
    outer_x: f64,
    outer_y: f64,
    ratio_x: f64,
}

impl CoordinateMapper {
    pub fn new(calibration: &Calibration) -> Self {
        Self {
            inner_x: calibration.inner_x,
            inner_y: calibration.inner_y,
            outer_x: calibration.outer_x,
            outer_y: calibration.outer_y,
            ratio_x: calibration.ratio_x,
        }
    }

    /// Project a survey point into a viewport of the given size
    pub fn project(&self, point: SurveyPoint, width: f64, height: f64) -> PixelPoint {
        let delta_y = self.ratio_x * height / width;
        self.project_with_delta(point, width, height, delta_y)
    }

    fn project_with_delta(
        &self,
        point: SurveyPoint,
        width: f64,
        height: f64,
        delta_y: f64,
    ) -> PixelPoint {
        let x = (point.northing - self.inner_y) * height / (self.outer_y - self.inner_y);
        let y = (point.easting - self.inner_x) * width / (self.outer_x - self.inner_x) * delta_y;
        PixelPoint::new(x, y)
    }

    /// Project an ordered point sequence, preserving order
    pub fn project_sequence(&self, points: &[SurveyPoint], width: f64, height: f64) -> Vec<PixelPoint> {
        let delta_y = self.ratio_x * height / width;
        points
            .iter()
            .map(|&p| self.project_with_delta(p, width, height, delta_y))
            .collect()
    }
}

/// Closed five-point rectangle for a quay, rotated about its origin
///
/// Corners run origin, +width, +width+height, +height, and back to origin.
/// A missing or zero degree leaves the rectangle untouched.
pub fn rotated_rectangle_corners(origin: &QuayOrigin) -> Vec<SurveyPoint> {
    let (ox, oy) = (origin.origin_x, origin.origin_y);
    let (width, height) = (origin.width, origin.height);

    let corners = vec![
        (ox, oy),
        (ox + width, oy),
        (ox + width, oy + height),
        (ox, oy + height),
        (ox, oy),
    ];

    let degree = origin.degree_or_zero();
    if degree == 0.0 {
        return corners
            .into_iter()
            .map(|(x, y)| SurveyPoint::new(x, y))
            .collect();
    }

    let ring: LineString<f64> = corners.into();
    ring.rotate_around_point(degree, Point::new(ox, oy))
        .0
        .into_iter()
        .map(|c| SurveyPoint::new(c.x, c.y))
        .collect()
}
