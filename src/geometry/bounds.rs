use super::PixelPoint;

/// Bounding box in screen space (pixels)
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[PixelPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        bounds.expand(&points[1..]);
        Some(bounds)
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[PixelPoint]) {
        for p in points {
            self.min_x = self.min_x.min(p.x);
            self.max_x = self.max_x.max(p.x);
            self.min_y = self.min_y.min(p.y);
            self.max_y = self.max_y.max(p.y);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Express a point relative to the box as 0-100 percentages
    ///
    /// Degenerate axes map to 0.
    pub fn to_percent(&self, x: f64, y: f64) -> [f64; 2] {
        let px = if self.width() > 0.0 {
            (x - self.min_x) / self.width() * 100.0
        } else {
            0.0
        };
        let py = if self.height() > 0.0 {
            (y - self.min_y) / self.height() * 100.0
        } else {
            0.0
        };
        [px, py]
    }
}
