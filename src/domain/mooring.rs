use serde::{Deserialize, Serialize};

/// Which side of the vessel lies against the quay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Alongside {
    Stbd,
    Port,
}

/// One mooring schedule entry for a quay under a typhoon revision
///
/// Field names follow the schedule export so records can be read as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MooringRecord {
    #[serde(rename = "year_tphn_no", default)]
    pub year_typhoon_no: String,
    #[serde(rename = "mnth_date", default)]
    pub month_date: String,
    #[serde(rename = "rev_numb", default)]
    pub revision: u32,
    pub quay_name: String,
    #[serde(rename = "proj_no", default)]
    pub project_no: String,
    #[serde(rename = "alsd_dirt", default)]
    pub alongside: Option<Alongside>,
    /// Realized wind speed threshold
    #[serde(rename = "real_wdsp", default)]
    pub real_wind: Option<f64>,
    #[serde(rename = "real_moor_dwg", default)]
    pub real_drawing: Option<String>,
    /// Maximum wind speed threshold
    #[serde(rename = "max_wdsp", default)]
    pub max_wind: Option<f64>,
    #[serde(rename = "max_moor_dwg", default)]
    pub max_drawing: Option<String>,
    /// Safety-limit wind speed threshold
    #[serde(rename = "sfty_wdsp", default)]
    pub safety_wind: Option<f64>,
    #[serde(rename = "sfty_moor_dwg", default)]
    pub safety_drawing: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "updt_indc", default)]
    pub modified: Option<String>,
}

impl MooringRecord {
    /// Record with only the fields the classifier looks at
    pub fn with_thresholds(
        quay_name: impl Into<String>,
        real: Option<f64>,
        max: Option<f64>,
        safety: Option<f64>,
    ) -> Self {
        Self {
            year_typhoon_no: String::new(),
            month_date: String::new(),
            revision: 0,
            quay_name: quay_name.into(),
            project_no: String::new(),
            alongside: None,
            real_wind: real,
            real_drawing: None,
            max_wind: max,
            max_drawing: None,
            safety_wind: safety,
            safety_drawing: None,
            status: None,
            modified: None,
        }
    }
}

/// Safety verdict for a moored vessel at the active typhoon speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MooringStatus {
    Satisfied,
    Marginal,
    Impossible,
}

impl MooringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MooringStatus::Satisfied => "SATISFIED",
            MooringStatus::Marginal => "MARGINAL",
            MooringStatus::Impossible => "IMPOSSIBLE",
        }
    }
}
