//! I/O operations for curve scenes
//!
//! This crate reads and writes the files the decimator works on:
//! - Scene JSON, a full [`Scene`] with objects, transforms and splines
//! - XYZ/CSV point lists, plain polylines one point per line

pub mod json;
pub mod xyz_csv;
pub mod error;

pub use error::*;
pub use json::{SceneJsonReader, SceneJsonWriter};
pub use xyz_csv::{Delimiter, XyzCsvReader, XyzCsvWriteOptions, XyzCsvWriter};

use pathdecim_core::{CurveObject, ObjectKind, Result, Scene, Spline};
use std::path::Path;

/// File formats understood by [`read_scene`] and [`write_scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Json,
    Xyz,
    Csv,
}

impl SceneFormat {
    /// Pick a format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(SceneFormat::Json),
            Some("xyz") | Some("txt") => Ok(SceneFormat::Xyz),
            Some("csv") => Ok(SceneFormat::Csv),
            _ => Err(IoError::InvalidFormat {
                format: path.display().to_string(),
            }
            .into()),
        }
    }
}

/// Auto-detect format and read a scene.
///
/// Point lists become a single selected, active curve object named after the
/// file stem.
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    match SceneFormat::from_path(path)? {
        SceneFormat::Json => SceneJsonReader::read_scene(path),
        SceneFormat::Xyz | SceneFormat::Csv => {
            let splines = XyzCsvReader::read_splines(path)?;
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Curve");
            log::debug!("read {} spline(s) from {}", splines.len(), path.display());

            let mut scene = Scene::new();
            let id = scene.add(CurveObject::curve(name, splines).with_selected(true));
            scene.active = Some(id);
            Ok(scene)
        }
    }
}

/// Auto-detect format and write a scene.
///
/// Point lists hold the splines of every curve object, in object order and
/// in object-local coordinates.
pub fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let path = path.as_ref();
    match SceneFormat::from_path(path)? {
        SceneFormat::Json => SceneJsonWriter::write_scene(scene, path),
        format => {
            let splines: Vec<Spline> = scene
                .objects
                .iter()
                .filter(|o| o.kind == ObjectKind::Curve)
                .flat_map(|o| o.splines.iter().cloned())
                .collect();
            let options = if format == SceneFormat::Csv {
                XyzCsvWriteOptions::csv_with_header()
            } else {
                XyzCsvWriteOptions::xyz()
            };
            XyzCsvWriter::write_splines(&splines, path, &options)
        }
    }
}
