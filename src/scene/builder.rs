use std::collections::HashMap;

use tracing::debug;

use super::{GroupTransform, Label, Polyline, QuaySector, Scene, Shape, ViewportState};
use crate::config::{Calibration, Palette};
use crate::domain::{FacilityGroup, FacilityShape, QuayGeometry, SurveyPoint};
use crate::geometry::{Bounds, CoordinateMapper, PixelPoint, rotated_rectangle_corners};
use crate::mooring::MooringIndex;

/// Assembles a [`Scene`] from static facility data and the current mooring
/// schedule
///
/// Draw order: facility groups in [`FacilityGroup::DRAW_ORDER`], then quay
/// sectors, then quay labels. Every call rebuilds the scene from scratch.
pub struct SceneBuilder<'a> {
    mapper: CoordinateMapper,
    calibration: &'a Calibration,
    palette: &'a Palette,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(calibration: &'a Calibration, palette: &'a Palette) -> Self {
        Self {
            mapper: CoordinateMapper::new(calibration),
            calibration,
            palette,
        }
    }

    pub fn build(
        &self,
        facility: &[FacilityShape],
        quays: &[QuayGeometry],
        moorings: &MooringIndex,
        viewport: &ViewportState,
    ) -> Scene {
        let (width, height) = (viewport.width, viewport.height);
        let scale = viewport.scale(self.calibration.baseline_height);
        let stroke_width = self.calibration.stroke_width * scale;

        let mut shapes = Vec::new();
        let mut extent: Option<Bounds> = None;

        for group in FacilityGroup::DRAW_ORDER {
            let style = self.palette.group_style(group);
            for shape in facility.iter().filter(|s| s.group == group) {
                let points = self.mapper.project_sequence(&shape.points, width, height);
                include(&mut extent, &points);
                shapes.push(Shape::Polyline(Polyline {
                    group,
                    name: shape.name.clone(),
                    points,
                    fill: style.fill.clone(),
                    stroke: style.stroke.clone(),
                    stroke_width,
                }));
            }
        }

        let mut last_index: HashMap<&str, usize> = HashMap::new();
        for (i, quay) in quays.iter().enumerate() {
            last_index.insert(quay.quay_name.as_str(), i);
        }

        for (i, quay) in quays.iter().enumerate() {
            if last_index.get(quay.quay_name.as_str()) != Some(&i) {
                continue;
            }
            let sector = self.quay_sector(quay, moorings, width, height, stroke_width);
            include(&mut extent, &sector.points);
            shapes.push(Shape::Quay(sector));
        }

        for name in moorings.quay_names() {
            if !last_index.contains_key(name) {
                debug!(quay = name, "mooring record has no quay geometry, skipping");
            }
        }

        let font_size = self.calibration.font_size * scale;
        for shape in facility.iter().filter(|s| s.group == FacilityGroup::QuayName) {
            match self.label_anchor(shape) {
                Some(anchor) => shapes.push(Shape::Label(Label {
                    text: shape.name.clone(),
                    position: self.mapper.project(anchor, width, height),
                    angle: self.calibration.label_angle,
                    font_size,
                    fill: self.palette.label.fill.clone(),
                })),
                None => debug!(label = %shape.name, "quay label has no anchor point, skipping"),
            }
        }

        debug!(
            shapes = shapes.len(),
            width, height, "scene built"
        );

        Scene {
            width,
            height,
            transform: GroupTransform {
                angle: self.calibration.group_angle,
                left: width * self.calibration.group_left,
                top: height * self.calibration.group_top,
            },
            extent,
            shapes,
        }
    }

    fn quay_sector(
        &self,
        quay: &QuayGeometry,
        moorings: &MooringIndex,
        width: f64,
        height: f64,
        stroke_width: f64,
    ) -> QuaySector {
        let corners = rotated_rectangle_corners(&quay.origin);
        let points = self.mapper.project_sequence(&corners, width, height);
        let pivot = Bounds::from_points(&points)
            .map(|b| PixelPoint::new(b.min_x, b.min_y))
            .unwrap_or(PixelPoint::new(0.0, 0.0));

        let status = moorings.get(&quay.quay_name).map(|m| m.status);
        let fill = match status {
            Some(s) => self.palette.status_color(s).to_string(),
            None => self.palette.quay_neutral.fill.clone(),
        };

        QuaySector {
            quay_name: quay.quay_name.clone(),
            quay_desc: quay.quay_desc.clone(),
            points,
            angle: self.calibration.sector_angle - quay.origin.degree_or_zero(),
            pivot,
            fill,
            stroke: self.palette.quay_neutral.stroke.clone(),
            stroke_width,
            status,
            sector: quay.sector.clone(),
        }
    }

    /// Labels listed in the calibration sit on their origin; every other
    /// label sits on the second point of its polyline.
    fn label_anchor(&self, shape: &FacilityShape) -> Option<SurveyPoint> {
        let second = shape.points.get(1).copied();
        let anchor = if self.calibration.is_origin_anchored(&shape.name) {
            shape.origin.or(second)
        } else {
            second.or(shape.origin)
        };
        anchor.or(shape.points.first().copied())
    }
}

/// Grow the hit-test extent by a shape's projected points
///
/// Sectors contribute their unrotated corners and labels are left out, so the
/// extent approximates the width and height of the drawn map group rather
/// than its exact rotated bounds.
fn include(extent: &mut Option<Bounds>, points: &[PixelPoint]) {
    match extent {
        Some(bounds) => bounds.expand(points),
        None => *extent = Bounds::from_points(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MooringRecord, MooringStatus, QuayOrigin};

    fn quay(name: &str, x: f64, y: f64) -> QuayGeometry {
        QuayGeometry {
            quay_name: name.to_string(),
            quay_desc: format!("{} quay", name),
            origin: QuayOrigin {
                origin_x: x,
                origin_y: y,
                width: 40.0,
                height: 200.0,
                degree: None,
            },
            sector: Some(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
        }
    }

    fn shape(name: &str, group: FacilityGroup) -> FacilityShape {
        FacilityShape::new(
            name,
            group,
            vec![
                SurveyPoint::new(172000.0, 252000.0),
                SurveyPoint::new(172500.0, 252500.0),
                SurveyPoint::new(173000.0, 252000.0),
            ],
        )
    }

    fn build(
        facility: &[FacilityShape],
        quays: &[QuayGeometry],
        records: &[MooringRecord],
        speed: f64,
    ) -> Scene {
        let calibration = Calibration::default();
        let palette = Palette::default();
        let viewport = ViewportState::new(1600.0, 1000.0, 1.2, 2.4);
        let index = MooringIndex::build(records, speed);
        SceneBuilder::new(&calibration, &palette).build(facility, quays, &index, &viewport)
    }

    fn kinds(scene: &Scene) -> Vec<&'static str> {
        scene
            .shapes
            .iter()
            .map(|s| match s {
                Shape::Polyline(p) => p.group.as_str(),
                Shape::Quay(_) => "quay",
                Shape::Label(_) => "label",
            })
            .collect()
    }

    #[test]
    fn test_draw_order() {
        let facility = vec![
            shape("K1", FacilityGroup::QuayName),
            shape("r1", FacilityGroup::RoadCenterline),
            shape("r2", FacilityGroup::Road),
            shape("c1", FacilityGroup::Coastline),
            shape("s1", FacilityGroup::LotSmall),
            shape("m1", FacilityGroup::LotMiddle),
            shape("f1", FacilityGroup::CoastlineFill),
        ];
        let scene = build(&facility, &[quay("K1", 173000.0, 253000.0)], &[], 25.0);

        assert_eq!(
            kinds(&scene),
            vec![
                "coastline-fill",
                "lot-middle",
                "lot-small",
                "coastline",
                "road",
                "road-centerline",
                "quay",
                "label",
            ]
        );
    }

    #[test]
    fn test_status_colors() {
        let quays = vec![
            quay("K1", 173000.0, 253000.0),
            quay("K2", 173100.0, 253000.0),
            quay("K3", 173200.0, 253000.0),
            quay("K4", 173300.0, 253000.0),
        ];
        let records = vec![
            MooringRecord::with_thresholds("K1", Some(30.0), None, None),
            MooringRecord::with_thresholds("K2", Some(10.0), Some(30.0), None),
            MooringRecord::with_thresholds("K3", Some(10.0), Some(12.0), Some(14.0)),
        ];
        let scene = build(&[], &quays, &records, 25.0);

        let k1 = scene.quay("K1").unwrap();
        assert_eq!(k1.status, Some(MooringStatus::Satisfied));
        assert_eq!(k1.fill, "green");
        assert_eq!(scene.quay("K2").unwrap().fill, "orange");
        assert_eq!(scene.quay("K3").unwrap().fill, "red");

        let k4 = scene.quay("K4").unwrap();
        assert_eq!(k4.status, None);
        assert_eq!(k4.fill, Palette::default().quay_neutral.fill);
    }

    #[test]
    fn test_unmatched_mooring_is_omitted() {
        let records = vec![
            MooringRecord::with_thresholds("K1", Some(30.0), None, None),
            MooringRecord::with_thresholds("Z99", Some(30.0), None, None),
        ];
        let scene = build(&[], &[quay("K1", 173000.0, 253000.0)], &records, 25.0);

        assert_eq!(scene.quays().count(), 1);
        assert!(scene.quay("Z99").is_none());
    }

    #[test]
    fn test_select_opens_popup_only_for_moored_quay() {
        let mut k1 = quay("K1", 173000.0, 253000.0);
        k1.sector = Some(vec![[0.0, 0.0], [50.0, 0.0], [50.0, 100.0], [0.0, 100.0]]);
        let mut k2 = quay("K2", 174000.0, 254000.0);
        k2.sector = Some(vec![[50.0, 0.0], [100.0, 0.0], [100.0, 100.0], [50.0, 100.0]]);
        let records = vec![MooringRecord::with_thresholds("K1", Some(30.0), None, None)];

        let calibration = Calibration::default();
        let palette = Palette::default();
        let viewport = ViewportState::new(1600.0, 1000.0, 1.2, 2.4);
        let index = MooringIndex::build(&records, 25.0);
        let scene =
            SceneBuilder::new(&calibration, &palette).build(&[], &[k1, k2], &index, &viewport);

        let extent = scene.extent.clone().unwrap();
        let pointer_at = |fx: f64, fy: f64| {
            let local = PixelPoint::new(extent.width() * fx, extent.height() * fy);
            viewport.map_to_screen(scene.transform.apply(local))
        };

        let left = pointer_at(0.25, 0.5);
        assert_eq!(scene.quay_at(left, &viewport).unwrap().quay_name, "K1");
        let popup = scene.select(left, &viewport, &index, &palette).unwrap();
        assert_eq!(popup.quay_name, "K1");
        assert_eq!(popup.real.unwrap().speed, Some(30.0));

        // K2 is hit but has no mooring record
        let right = pointer_at(0.75, 0.5);
        assert_eq!(scene.quay_at(right, &viewport).unwrap().quay_name, "K2");
        assert!(scene.select(right, &viewport, &index, &palette).is_none());
    }

    #[test]
    fn test_duplicate_quay_last_wins() {
        let quays = vec![quay("K1", 173000.0, 253000.0), quay("K1", 174000.0, 254000.0)];
        let scene = build(&[], &quays, &[], 25.0);

        assert_eq!(scene.quays().count(), 1);
        let mapper = CoordinateMapper::new(&Calibration::default());
        let expected = mapper.project(SurveyPoint::new(174000.0, 254000.0), 1600.0, 1000.0);
        assert_eq!(scene.quay("K1").unwrap().points[0], expected);
    }

    #[test]
    fn test_sector_is_closed_and_angled() {
        let mut rotated = quay("K1", 173000.0, 253000.0);
        rotated.origin.degree = Some(10.0);
        let scene = build(&[], &[rotated], &[], 25.0);

        let sector = scene.quay("K1").unwrap();
        assert_eq!(sector.points.len(), 5);
        assert_eq!(sector.points[0], sector.points[4]);
        assert!((sector.angle - (-60.8)).abs() < 1e-9);
    }

    #[test]
    fn test_label_anchoring() {
        let origin = SurveyPoint::new(173500.0, 253500.0);
        let facility = vec![
            shape("H2", FacilityGroup::QuayName).with_origin(origin),
            shape("K7", FacilityGroup::QuayName).with_origin(origin),
        ];
        let scene = build(&facility, &[], &[], 25.0);
        let mapper = CoordinateMapper::new(&Calibration::default());

        let labels: Vec<&Label> = scene.labels().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].position, mapper.project(origin, 1600.0, 1000.0));
        assert_eq!(
            labels[1].position,
            mapper.project(facility[1].points[1], 1600.0, 1000.0)
        );
        assert_eq!(labels[0].angle, 39.5);
    }

    #[test]
    fn test_label_without_points_is_skipped() {
        let facility = vec![FacilityShape::new("K8", FacilityGroup::QuayName, Vec::new())];
        let scene = build(&facility, &[], &[], 25.0);
        assert_eq!(scene.labels().count(), 0);
    }

    #[test]
    fn test_empty_shape_gives_empty_polyline() {
        let facility = vec![FacilityShape::new("c0", FacilityGroup::Coastline, Vec::new())];
        let scene = build(&facility, &[], &[], 25.0);

        match &scene.shapes[0] {
            Shape::Polyline(p) => assert!(p.points.is_empty()),
            other => panic!("unexpected shape {:?}", other),
        }
        assert!(scene.extent.is_none());
    }

    #[test]
    fn test_sizes_scale_with_height() {
        let calibration = Calibration::default();
        let palette = Palette::default();
        let index = MooringIndex::default();
        let facility = vec![shape("K1", FacilityGroup::QuayName), shape("r", FacilityGroup::Road)];
        let builder = SceneBuilder::new(&calibration, &palette);

        let small = builder.build(&facility, &[], &index, &ViewportState::new(800.0, 500.0, 1.2, 2.4));
        let label = small.labels().next().unwrap();
        assert_eq!(label.font_size, 5.0);
        match &small.shapes[0] {
            Shape::Polyline(p) => assert_eq!(p.stroke_width, 0.5),
            other => panic!("unexpected shape {:?}", other),
        }
        assert!((small.transform.left - 80.0).abs() < 1e-9);
        assert_eq!(small.transform.top, 250.0);
    }
}
