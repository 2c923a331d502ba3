use serde::{Deserialize, Deserializer};

/// A real-world facility survey coordinate
///
/// The survey exports store both components as decimal strings under `_X`
/// (easting) and `_Y` (northing). They are parsed once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SurveyPoint {
    #[serde(rename = "_X", deserialize_with = "de_coordinate")]
    pub easting: f64,
    #[serde(rename = "_Y", deserialize_with = "de_coordinate")]
    pub northing: f64,
}

impl SurveyPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

/// Accept either a JSON number or a decimal string
pub(crate) fn de_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(n) => Ok(n),
        RawCoordinate::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_coordinates() {
        let json = r#"{"_X":"172000.25","_Y":"252000.5"}"#;
        let point: SurveyPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point, SurveyPoint::new(172000.25, 252000.5));
    }

    #[test]
    fn test_parse_numeric_coordinates() {
        let json = r#"{"_X":172000,"_Y":252000.5}"#;
        let point: SurveyPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.easting, 172000.0);
    }

    #[test]
    fn test_reject_malformed_coordinate() {
        let json = r#"{"_X":"abc","_Y":"1"}"#;
        let err = serde_json::from_str::<SurveyPoint>(json).unwrap_err();
        assert!(err.to_string().contains("invalid coordinate"));
    }
}
