use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mooring::MooringSummary;
use crate::scene::Scene;

/// Scene plus the schedule summary, as written by the JSON output
#[derive(Debug, Serialize)]
pub struct SceneDocument<'a> {
    pub typhoon_speed: f64,
    pub summary: MooringSummary,
    pub scene: &'a Scene,
}

pub fn write_json(path: &Path, document: &SceneDocument<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).context("Failed to serialize scene")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GroupTransform;

    #[test]
    fn test_write_json() {
        let scene = Scene {
            width: 100.0,
            height: 50.0,
            transform: GroupTransform {
                angle: 0.0,
                left: 0.0,
                top: 0.0,
            },
            extent: None,
            shapes: Vec::new(),
        };
        let document = SceneDocument {
            typhoon_speed: 25.0,
            summary: MooringSummary::default(),
            scene: &scene,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        write_json(&path, &document).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["typhoon_speed"], 25.0);
        assert_eq!(value["summary"]["total"], 0);
        assert!(value["scene"]["extent"].is_null());
    }
}
