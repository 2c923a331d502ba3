use serde::Serialize;

use crate::config::Palette;
use crate::mooring::MooringIndex;

/// One wind threshold as shown in the popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdReading {
    pub speed: Option<f64>,
    /// Satisfied color when the threshold covers the typhoon speed, impossible
    /// color when it does not, neutral stroke when the threshold is missing
    pub color: String,
    pub drawing: Option<String>,
}

/// Details shown when a quay is selected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuayMooringPopupInfo {
    pub quay_name: String,
    pub quay_desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real: Option<ThresholdReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<ThresholdReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<ThresholdReading>,
}

fn reading(
    speed: Option<f64>,
    drawing: &Option<String>,
    typhoon_speed: f64,
    palette: &Palette,
) -> ThresholdReading {
    let color = match speed {
        Some(s) if s >= typhoon_speed => palette.satisfied.clone(),
        Some(_) => palette.impossible.clone(),
        None => palette.quay_neutral.stroke.clone(),
    };
    ThresholdReading {
        speed,
        color,
        drawing: drawing.clone(),
    }
}

/// Build the popup for a quay; without a mooring record only the name and
/// description are filled in
pub fn popup_info(
    quay_name: &str,
    quay_desc: &str,
    moorings: &MooringIndex,
    palette: &Palette,
) -> QuayMooringPopupInfo {
    let mut info = QuayMooringPopupInfo {
        quay_name: quay_name.to_string(),
        quay_desc: quay_desc.to_string(),
        real: None,
        max: None,
        safety: None,
    };

    if let Some(entry) = moorings.get(quay_name) {
        let speed = moorings.typhoon_speed();
        let r = &entry.record;
        info.real = Some(reading(r.real_wind, &r.real_drawing, speed, palette));
        info.max = Some(reading(r.max_wind, &r.max_drawing, speed, palette));
        info.safety = Some(reading(r.safety_wind, &r.safety_drawing, speed, palette));
    }

    info
}
