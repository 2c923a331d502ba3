use crate::config::ViewportConfig;
use crate::geometry::PixelPoint;

/// Zoom change per zoom-button press
pub const ZOOM_STEP: f64 = 0.2;
/// Wheel delta that changes the zoom by 1.0
pub const WHEEL_DIVISOR: f64 = 200.0;

/// Interactive view state owned by the host shell
///
/// Screen coordinates relate to map coordinates by `screen = map * zoom + pan`.
/// Zooming keeps the point under the cursor fixed on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    pan: PixelPoint,
    focal: PixelPoint,
}

impl ViewportState {
    /// Create a viewport at its minimum zoom, focused on its center
    pub fn new(width: f64, height: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            width,
            height,
            zoom: min_zoom,
            min_zoom,
            max_zoom,
            pan: PixelPoint::new(0.0, 0.0),
            focal: PixelPoint::new(width / 2.0, height / 2.0),
        }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(
            config.width as f64,
            config.height as f64,
            config.min_zoom,
            config.max_zoom,
        )
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> PixelPoint {
        self.pan
    }

    pub fn focal(&self) -> PixelPoint {
        self.focal
    }

    /// Text and stroke multiplier relative to the baseline height
    pub fn scale(&self, baseline_height: f64) -> f64 {
        self.height / baseline_height
    }

    /// Mouse wheel: zoom about the pointer and remember it as the focal point
    pub fn wheel(&mut self, delta_y: f64, pointer: PixelPoint) {
        self.focal = pointer;
        self.zoom_to_point(pointer, self.zoom + delta_y / WHEEL_DIVISOR);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_to_point(self.focal, self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_to_point(self.focal, self.zoom - ZOOM_STEP);
    }

    /// Pointer release moves the focal point
    pub fn release(&mut self, pointer: PixelPoint) {
        self.focal = pointer;
    }

    /// Resize keeps zoom, pan and focal point
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn zoom_to_point(&mut self, point: PixelPoint, zoom: f64) {
        // max/min rather than clamp: an inverted range must not panic
        let zoom = zoom.max(self.min_zoom).min(self.max_zoom);
        let anchor = self.screen_to_map(point);
        self.zoom = zoom;
        self.pan = PixelPoint::new(point.x - anchor.x * zoom, point.y - anchor.y * zoom);
    }

    pub fn screen_to_map(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        )
    }

    pub fn map_to_screen(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }
}
