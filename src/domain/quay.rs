use serde::{Deserialize, Serialize};

/// Placement of a quay berth rectangle in survey space
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuayOrigin {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees about the origin (absent = 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
}

impl QuayOrigin {
    pub fn degree_or_zero(&self) -> f64 {
        self.degree.unwrap_or(0.0)
    }
}

/// A named quay berth, keyed by `quay_name`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuayGeometry {
    pub quay_name: String,
    #[serde(default)]
    pub quay_desc: String,
    pub origin: QuayOrigin,
    /// Hit-test polygon in normalized 0-100 local space of the map group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<Vec<[f64; 2]>>,
}
