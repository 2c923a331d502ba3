use super::SurveyPoint;

/// Facility group classification based on the survey `_Group` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityGroup {
    Coastline,
    CoastlineFill,
    LotSmall,
    LotMiddle,
    Road,
    RoadCenterline,
    QuayName,
}

impl FacilityGroup {
    /// Draw order, bottom layer first. Quay sectors and labels are drawn after
    /// every facility group.
    pub const DRAW_ORDER: [FacilityGroup; 6] = [
        FacilityGroup::CoastlineFill,
        FacilityGroup::LotMiddle,
        FacilityGroup::LotSmall,
        FacilityGroup::Coastline,
        FacilityGroup::Road,
        FacilityGroup::RoadCenterline,
    ];

    /// Classify a survey group tag into a FacilityGroup
    pub fn from_group_tag(tag: &str) -> Option<FacilityGroup> {
        match tag {
            "GIF_COASTLINE" => Some(FacilityGroup::Coastline),
            "GIF_COASTLINE_P" => Some(FacilityGroup::CoastlineFill),
            "GIF_LOTSMALL" => Some(FacilityGroup::LotSmall),
            "GIF_LOTMIDDLE" => Some(FacilityGroup::LotMiddle),
            "GIF_ROAD" => Some(FacilityGroup::Road),
            "GIF_ROADCENTERLINE" => Some(FacilityGroup::RoadCenterline),
            "GIF_QUAYNAME" => Some(FacilityGroup::QuayName),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityGroup::Coastline => "coastline",
            FacilityGroup::CoastlineFill => "coastline-fill",
            FacilityGroup::LotSmall => "lot-small",
            FacilityGroup::LotMiddle => "lot-middle",
            FacilityGroup::Road => "road",
            FacilityGroup::RoadCenterline => "road-centerline",
            FacilityGroup::QuayName => "quay-name",
        }
    }
}

/// A static polyline from the facility survey
#[derive(Debug, Clone)]
pub struct FacilityShape {
    pub name: String,
    pub group: FacilityGroup,
    /// Ordered points; order defines polyline connectivity
    pub points: Vec<SurveyPoint>,
    pub origin: Option<SurveyPoint>,
}

impl FacilityShape {
    pub fn new(name: impl Into<String>, group: FacilityGroup, points: Vec<SurveyPoint>) -> Self {
        Self {
            name: name.into(),
            group,
            points,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: SurveyPoint) -> Self {
        self.origin = Some(origin);
        self
    }
}
