use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{FacilityGroup, MooringStatus};

/// Survey-to-screen calibration for one facility.
///
/// The defaults were fitted by hand to a single shipyard survey: the bounding
/// box, the axis ratios, the map group angle and the quay sector angle do not
/// carry over to other facilities.
///
///   Bounding box:  inner (171659.5794, 251671.8693) -> outer (175102.6454, 256071.2663)
///   Group angle:   -39.5 deg, labels counter-rotated by +39.5 deg
///   Quay sectors:  -50.8 deg minus the quay's own rotation
#[derive(Debug, Clone, Deserialize)]
pub struct Calibration {
    #[serde(default = "default_inner_x")]
    pub inner_x: f64,
    #[serde(default = "default_inner_y")]
    pub inner_y: f64,
    #[serde(default = "default_outer_x")]
    pub outer_x: f64,
    #[serde(default = "default_outer_y")]
    pub outer_y: f64,
    /// X extent relative to Y
    #[serde(default = "default_ratio_x")]
    pub ratio_x: f64,
    /// Y extent relative to X; surveyed alongside `ratio_x` but not used by
    /// the mapping, kept as calibration metadata
    #[serde(default = "default_ratio_y")]
    pub ratio_y: f64,
    #[serde(default = "default_group_angle")]
    pub group_angle: f64,
    #[serde(default = "default_label_angle")]
    pub label_angle: f64,
    #[serde(default = "default_sector_angle")]
    pub sector_angle: f64,
    /// Group offset as a fraction of the viewport width
    #[serde(default = "default_group_left")]
    pub group_left: f64,
    /// Group offset as a fraction of the viewport height
    #[serde(default = "default_group_top")]
    pub group_top: f64,
    /// Labels anchored at their origin instead of their second point
    #[serde(default = "default_origin_anchored_labels")]
    pub origin_anchored_labels: Vec<String>,
    /// Viewport height at which text and strokes are drawn at 1:1
    #[serde(default = "default_baseline_height")]
    pub baseline_height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_inner_x() -> f64 {
    171659.5794
}
fn default_inner_y() -> f64 {
    251671.8693
}
fn default_outer_x() -> f64 {
    175102.6454
}
fn default_outer_y() -> f64 {
    256071.2663
}
fn default_ratio_x() -> f64 {
    0.7826222548226548
}
fn default_ratio_y() -> f64 {
    1.2777556398860699
}
fn default_group_angle() -> f64 {
    -39.5
}
fn default_label_angle() -> f64 {
    39.5
}
fn default_sector_angle() -> f64 {
    -50.8
}
fn default_group_left() -> f64 {
    0.1
}
fn default_group_top() -> f64 {
    0.5
}
fn default_origin_anchored_labels() -> Vec<String> {
    ["H1", "H2", "H3", "H4"].iter().map(|s| s.to_string()).collect()
}
fn default_baseline_height() -> f64 {
    1000.0
}
fn default_font_size() -> f64 {
    10.0
}
fn default_stroke_width() -> f64 {
    1.0
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            inner_x: default_inner_x(),
            inner_y: default_inner_y(),
            outer_x: default_outer_x(),
            outer_y: default_outer_y(),
            ratio_x: default_ratio_x(),
            ratio_y: default_ratio_y(),
            group_angle: default_group_angle(),
            label_angle: default_label_angle(),
            sector_angle: default_sector_angle(),
            group_left: default_group_left(),
            group_top: default_group_top(),
            origin_anchored_labels: default_origin_anchored_labels(),
            baseline_height: default_baseline_height(),
            font_size: default_font_size(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl Calibration {
    pub fn is_origin_anchored(&self, label: &str) -> bool {
        self.origin_anchored_labels.iter().any(|l| l == label)
    }
}

/// Fill and stroke pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
}

impl Style {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

/// Colors for every facility group and mooring status
#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    #[serde(default = "default_coastline")]
    pub coastline: Style,
    #[serde(default = "default_coastline_fill")]
    pub coastline_fill: Style,
    #[serde(default = "default_lot")]
    pub lot_small: Style,
    #[serde(default = "default_lot")]
    pub lot_middle: Style,
    #[serde(default = "default_road")]
    pub road: Style,
    #[serde(default = "default_road_centerline")]
    pub road_centerline: Style,
    #[serde(default = "default_label")]
    pub label: Style,
    /// Quay without a mooring record
    #[serde(default = "default_quay_neutral")]
    pub quay_neutral: Style,
    #[serde(default = "default_satisfied")]
    pub satisfied: String,
    #[serde(default = "default_marginal")]
    pub marginal: String,
    #[serde(default = "default_impossible")]
    pub impossible: String,
}

fn default_coastline() -> Style {
    Style::new("transparent", "darkgrey")
}
fn default_coastline_fill() -> Style {
    Style::new("#b2cfff", "#b2cfff")
}
fn default_lot() -> Style {
    Style::new("#f2fee3", "#cfe2ca")
}
fn default_road() -> Style {
    Style::new("#fff", "darkgrey")
}
fn default_road_centerline() -> Style {
    Style::new("transparent", "lightgrey")
}
fn default_label() -> Style {
    Style::new("#000", "transparent")
}
fn default_quay_neutral() -> Style {
    Style::new("rgba(90, 142, 162, 0.4)", "#85fff5")
}
fn default_satisfied() -> String {
    "green".to_string()
}
fn default_marginal() -> String {
    "orange".to_string()
}
fn default_impossible() -> String {
    "red".to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            coastline: default_coastline(),
            coastline_fill: default_coastline_fill(),
            lot_small: default_lot(),
            lot_middle: default_lot(),
            road: default_road(),
            road_centerline: default_road_centerline(),
            label: default_label(),
            quay_neutral: default_quay_neutral(),
            satisfied: default_satisfied(),
            marginal: default_marginal(),
            impossible: default_impossible(),
        }
    }
}

impl Palette {
    pub fn group_style(&self, group: FacilityGroup) -> &Style {
        match group {
            FacilityGroup::Coastline => &self.coastline,
            FacilityGroup::CoastlineFill => &self.coastline_fill,
            FacilityGroup::LotSmall => &self.lot_small,
            FacilityGroup::LotMiddle => &self.lot_middle,
            FacilityGroup::Road => &self.road,
            FacilityGroup::RoadCenterline => &self.road_centerline,
            FacilityGroup::QuayName => &self.label,
        }
    }

    pub fn status_color(&self, status: MooringStatus) -> &str {
        match status {
            MooringStatus::Satisfied => &self.satisfied,
            MooringStatus::Marginal => &self.marginal,
            MooringStatus::Impossible => &self.impossible,
        }
    }
}

fn default_width() -> u32 {
    1600
}
fn default_height() -> u32 {
    1000
}
fn default_min_zoom() -> f64 {
    1.2
}
fn default_max_zoom() -> f64 {
    2.4
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl ViewportConfig {
    /// Reject sizes and zoom ranges the viewport cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Viewport must be at least 1x1 pixels");
        }
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            anyhow::bail!(
                "Invalid zoom range: min_zoom = {}, max_zoom = {} (need 0 < min_zoom <= max_zoom)",
                min,
                max
            );
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// Locations of the JSON exports the map is built from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetPaths {
    #[serde(default)]
    pub shipyard: Option<PathBuf>,
    #[serde(default)]
    pub quays: Option<PathBuf>,
    #[serde(default)]
    pub moorings: Option<PathBuf>,
    #[serde(default)]
    pub typhoons: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub datasets: DatasetPaths,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub calibration: Calibration,
    #[serde(default)]
    pub palette: Palette,
}

impl FileConfig {
    /// Search the default locations and return the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("quaymap.toml"));
    paths.push(PathBuf::from(".quaymap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("quaymap").join("config.toml"));
        paths.push(config_dir.join("quaymap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".quaymap.toml"));
        paths.push(home.join(".config").join("quaymap").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.viewport.min_zoom, 1.2);
        assert_eq!(config.viewport.max_zoom, 2.4);
        assert_eq!(config.calibration.sector_angle, -50.8);
        assert!(config.calibration.is_origin_anchored("H3"));
        assert!(!config.calibration.is_origin_anchored("K1"));
        assert_eq!(config.palette.marginal, "orange");
    }

    #[test]
    fn test_partial_calibration_override() {
        let config: FileConfig = toml::from_str(
            r##"
            [calibration]
            group_angle = -10.0
            origin_anchored_labels = ["A1"]

            [palette]
            satisfied = "#00ff00"
            "##,
        )
        .unwrap();
        assert_eq!(config.calibration.group_angle, -10.0);
        assert_eq!(config.calibration.inner_x, 171659.5794);
        assert!(config.calibration.is_origin_anchored("A1"));
        assert!(!config.calibration.is_origin_anchored("H1"));
        assert_eq!(
            config.palette.status_color(MooringStatus::Satisfied),
            "#00ff00"
        );
        assert_eq!(config.palette.road.stroke, "darkgrey");
    }

    #[test]
    fn test_viewport_validation() {
        assert!(ViewportConfig::default().validate().is_ok());

        let inverted = ViewportConfig {
            min_zoom: 3.0,
            max_zoom: 2.0,
            ..Default::default()
        };
        let err = inverted.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid zoom range"));

        let nan = ViewportConfig {
            max_zoom: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let empty = ViewportConfig {
            width: 0,
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quaymap.toml");
        std::fs::write(
            &path,
            "verbose = true\n[viewport]\nwidth = 800\n[datasets]\nquays = \"quays.json\"\n",
        )
        .unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.viewport.height, 1000);
        assert_eq!(config.datasets.quays, Some(PathBuf::from("quays.json")));
    }
}
