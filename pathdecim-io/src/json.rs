//! Scene JSON format
//!
//! A [`Scene`] serialized with serde: objects with their kind, mode,
//! selection flag, world matrix (16 floats, column-major) and splines.

use crate::error::IoError;
use pathdecim_core::{Error, Result, Scene};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Scene JSON reader
pub struct SceneJsonReader;

impl SceneJsonReader {
    pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let reader = BufReader::new(File::open(path)?);
        let scene: Scene = serde_json::from_reader(reader).map_err(|e| parse_error(&e))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn parse_scene(content: &str) -> Result<Scene> {
        let scene: Scene = serde_json::from_str(content).map_err(|e| parse_error(&e))?;
        scene.validate()?;
        Ok(scene)
    }
}

fn parse_error(e: &serde_json::Error) -> Error {
    IoError::ParseError {
        line: e.line(),
        message: e.to_string(),
    }
    .into()
}

/// Scene JSON writer
pub struct SceneJsonWriter;

impl SceneJsonWriter {
    pub fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, scene)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_string(scene: &Scene) -> Result<String> {
        serde_json::to_string_pretty(scene).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathdecim_core::*;

    const SCENE: &str = r#"{
        "active": 0,
        "objects": [
            {
                "name": "Road",
                "selected": true,
                "splines": [
                    { "type": "poly", "points": [ { "co": [0, 0, 0, 1] }, { "co": [1, 0, 0, 1] } ] },
                    { "type": "bezier", "points": [
                        { "co": [0, 0, 0], "handle_left": [-1, 0, 0], "handle_right": [1, 0, 0] }
                    ] }
                ]
            },
            { "name": "Ground", "kind": "mesh" }
        ]
    }"#;

    #[test]
    fn test_parse_scene_defaults() {
        let scene = SceneJsonReader::parse_scene(SCENE).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.active, Some(ObjectId(0)));

        let road = &scene.objects[0];
        assert_eq!(road.kind, ObjectKind::Curve);
        assert_eq!(road.mode, ObjectMode::Object);
        assert_eq!(road.matrix_world, WorldTransform::identity());
        assert_eq!(road.splines[1].kind(), SplineKind::Bezier);
        assert_eq!(scene.objects[1].kind, ObjectKind::Mesh);
    }

    #[test]
    fn test_parse_error_has_line() {
        let err = SceneJsonReader::parse_scene("{\n\"objects\": [ { \"name\": 3 } ]\n}").unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref m) if m.contains("line 2")));
    }

    #[test]
    fn test_invalid_active_rejected() {
        let err = SceneJsonReader::parse_scene(r#"{ "active": 4, "objects": [] }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_write_and_reload() {
        let temp_file = "test_pathdecim_scene.json";
        let mut scene = SceneJsonReader::parse_scene(SCENE).unwrap();
        scene.objects[0].matrix_world = WorldTransform::uniform_scaling(2.0);

        assert!(SceneJsonWriter::to_string(&scene).unwrap().contains("\"Road\""));
        SceneJsonWriter::write_scene(&scene, temp_file).unwrap();
        let loaded = SceneJsonReader::read_scene(temp_file).unwrap();
        assert_eq!(loaded, scene);

        std::fs::remove_file(temp_file).unwrap();
    }
}
