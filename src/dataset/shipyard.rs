//! Parser for the shipyard survey export
//!
//! The export is an XML document converted to JSON, so a list with a single
//! child shows up as a bare object. Attribute names keep their `_` prefix.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::domain::{FacilityGroup, FacilityShape, SurveyPoint};

/// A child list that collapses to a bare object when it has one entry
///
/// Element errors are passed through unchanged so a bad coordinate is
/// reported with its value.
#[derive(Debug)]
struct OneOrMany<T>(Vec<T>);

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        self.0
    }
}

struct OneOrManyVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OneOrManyVisitor<T> {
    type Value = OneOrMany<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object or an array of objects")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(OneOrMany(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let item = T::deserialize(MapAccessDeserializer::new(map))?;
        Ok(OneOrMany(vec![item]))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OneOrManyVisitor(PhantomData))
    }
}

#[derive(Debug, Deserialize)]
struct ShipyardDocument {
    #[serde(rename = "Shipyard")]
    shipyard: Shipyard,
}

#[derive(Debug, Deserialize)]
struct Shipyard {
    #[serde(rename = "Spaces")]
    spaces: Spaces,
}

#[derive(Debug, Deserialize)]
struct Spaces {
    #[serde(rename = "Space", default)]
    space: OneOrMany<SpaceElement>,
}

/// One `<Space>` child; exactly one of the fields is normally present
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpaceElement {
    land_scape: Option<RawShape>,
    road: Option<RawShape>,
    area: Option<RawShape>,
    quay_name: Option<RawShape>,
}

#[derive(Debug, Deserialize)]
struct RawShape {
    #[serde(rename = "Points", default)]
    points: Option<RawPoints>,
    #[serde(rename = "CenterPoints", default)]
    center_points: Option<RawPoints>,
    #[serde(rename = "Origin", default)]
    origin: Option<SurveyPoint>,
    #[serde(rename = "_Name", default)]
    name: String,
    #[serde(rename = "_Group", default)]
    group: String,
}

#[derive(Debug, Deserialize)]
struct RawPoints {
    #[serde(rename = "Point", default)]
    point: OneOrMany<SurveyPoint>,
}

/// Parse a shipyard export into facility shapes, in document order
///
/// # Algorithm
/// 1. Take the `LandScape`, `Road`, `Area` or `QuayName` payload of each space
/// 2. Classify it from its `_Group` tag, skipping unknown groups
/// 3. Road centerlines read `CenterPoints`; everything else reads `Points`,
///    falling back to the other list when the preferred one is absent
pub fn parse_shipyard(json: &str) -> Result<Vec<FacilityShape>, serde_json::Error> {
    let document: ShipyardDocument = serde_json::from_str(json)?;

    let mut shapes = Vec::new();
    let mut skipped = 0usize;

    for element in document.shipyard.spaces.space.into_vec() {
        let raw = match element
            .land_scape
            .or(element.road)
            .or(element.area)
            .or(element.quay_name)
        {
            Some(r) => r,
            None => continue,
        };

        let group = match FacilityGroup::from_group_tag(&raw.group) {
            Some(g) => g,
            None => {
                debug!(group = %raw.group, name = %raw.name, "skipping unknown facility group");
                skipped += 1;
                continue;
            }
        };

        let points = if group == FacilityGroup::RoadCenterline {
            raw.center_points.or(raw.points)
        } else {
            raw.points.or(raw.center_points)
        }
        .map(|p| p.point.into_vec())
        .unwrap_or_default();

        let mut shape = FacilityShape::new(raw.name, group, points);
        shape.origin = raw.origin;
        shapes.push(shape);
    }

    debug!(shapes = shapes.len(), skipped, "parsed shipyard export");
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
      "Shipyard": {
        "_Version": "1",
        "Spaces": {
          "_X": "0",
          "Space": [
            {"LandScape": {
              "_Key": "1", "_Name": "coast", "_Group": "GIF_COASTLINE",
              "Points": {"Point": [{"_X": "172000.0", "_Y": "252000.0"}, {"_X": "172100.0", "_Y": "252100.0"}]}
            }},
            {"Area": {
              "_Name": "lot", "_Group": "GIF_LOTSMALL",
              "Points": {"Point": {"_X": "172200.0", "_Y": "252200.0"}}
            }},
            {"Road": {
              "_Name": "main", "_Group": "GIF_ROADCENTERLINE", "_Width": "8", "_Lane": "2",
              "Points": {"Point": [{"_X": "1", "_Y": "1"}]},
              "CenterPoints": {"Point": [{"_X": "2", "_Y": "2"}, {"_X": "3", "_Y": "3"}]}
            }},
            {"QuayName": {
              "_Name": "H1", "_Group": "GIF_QUAYNAME",
              "Origin": {"_X": "173000.0", "_Y": "253000.0"},
              "Points": {"Point": [{"_X": "173001.0", "_Y": "253001.0"}]}
            }},
            {"Area": {"_Name": "shed", "_Group": "GIF_BUILDING", "Points": {"Point": []}}}
          ]
        }
      }
    }"#;

    #[test]
    fn test_parse_shipyard() {
        let shapes = parse_shipyard(EXPORT).unwrap();
        assert_eq!(shapes.len(), 4);

        assert_eq!(shapes[0].group, FacilityGroup::Coastline);
        assert_eq!(shapes[0].points.len(), 2);
        assert_eq!(shapes[0].points[1], SurveyPoint::new(172100.0, 252100.0));

        // single point serialized as an object
        assert_eq!(shapes[1].group, FacilityGroup::LotSmall);
        assert_eq!(shapes[1].points.len(), 1);

        // centerlines read CenterPoints
        assert_eq!(shapes[2].group, FacilityGroup::RoadCenterline);
        assert_eq!(shapes[2].points.len(), 2);

        assert_eq!(shapes[3].name, "H1");
        assert_eq!(shapes[3].origin, Some(SurveyPoint::new(173000.0, 253000.0)));
    }

    #[test]
    fn test_parse_single_space() {
        let json = r#"{"Shipyard":{"Spaces":{"Space":{"LandScape":{"_Name":"c","_Group":"GIF_COASTLINE_P"}}}}}"#;
        let shapes = parse_shipyard(json).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].group, FacilityGroup::CoastlineFill);
        assert!(shapes[0].points.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_coordinate() {
        let json = r#"{"Shipyard":{"Spaces":{"Space":[{"LandScape":{"_Name":"c","_Group":"GIF_COASTLINE",
            "Points":{"Point":[{"_X":"north","_Y":"1"}]}}}]}}}"#;
        let err = parse_shipyard(json).unwrap_err();
        assert!(err.to_string().contains(r#"invalid coordinate: "north""#));

        // same for a single point written as an object
        let json = r#"{"Shipyard":{"Spaces":{"Space":{"Area":{"_Name":"a","_Group":"GIF_LOTSMALL",
            "Points":{"Point":{"_X":"1","_Y":"east"}}}}}}}"#;
        let err = parse_shipyard(json).unwrap_err();
        assert!(err.to_string().contains(r#"invalid coordinate: "east""#));
    }
}
