use serde::{Deserialize, Serialize};

/// A typhoon forecast revision
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TyphoonInfo {
    #[serde(rename = "year_tphn_no", default)]
    pub year_typhoon_no: String,
    pub year: String,
    /// Month and day as `MMDD`
    #[serde(rename = "mnth_date")]
    pub month_date: String,
    /// Typhoon number with the revision after `_`, e.g. `13_2`
    #[serde(rename = "tphn_no")]
    pub typhoon_no: String,
    #[serde(rename = "tphn_name")]
    pub name: String,
    /// Forecast wind speed
    #[serde(rename = "tphn_spd")]
    pub speed: f64,
}

impl TyphoonInfo {
    /// Typhoon number without the revision suffix
    pub fn base_number(&self) -> &str {
        self.typhoon_no.split('_').next().unwrap_or_default()
    }

    pub fn revision(&self) -> Option<&str> {
        self.typhoon_no.split('_').nth(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typhoon_number_parts() {
        let json = r#"{"year":"2020","mnth_date":"0902","tphn_no":"9_3","tphn_name":"MAYSAK","tphn_spd":42}"#;
        let info: TyphoonInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.base_number(), "9");
        assert_eq!(info.revision(), Some("3"));
        assert_eq!(info.speed, 42.0);
    }

    #[test]
    fn test_typhoon_without_revision() {
        let json = r#"{"year":"2020","mnth_date":"0902","tphn_no":"9","tphn_name":"MAYSAK","tphn_spd":42}"#;
        let info: TyphoonInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.base_number(), "9");
        assert_eq!(info.revision(), None);
    }
}
