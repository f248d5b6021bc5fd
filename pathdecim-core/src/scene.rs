//! In-memory curve scene
//!
//! A self-contained [`CurveHost`] that mirrors the rules of an interactive
//! editor closely enough to exercise the decimator outside of one: only the
//! active object can enter edit mode, and selection and deletion only work
//! in edit mode.

use crate::{
    error::Error, point::Point3f, spline::*, traits::*, transform::WorldTransform, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named object in a [`Scene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub mode: ObjectMode,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub matrix_world: WorldTransform,
    #[serde(default)]
    pub splines: Vec<Spline>,
}

impl CurveObject {
    /// Create an unselected curve object with an identity transform
    pub fn curve<S: Into<String>>(name: S, splines: Vec<Spline>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Curve,
            mode: ObjectMode::Object,
            selected: false,
            matrix_world: WorldTransform::identity(),
            splines,
        }
    }

    /// Create a non-curve object, which the decimator ignores
    pub fn mesh<S: Into<String>>(name: S) -> Self {
        Self {
            kind: ObjectKind::Mesh,
            ..Self::curve(name, Vec::new())
        }
    }

    pub fn with_transform(mut self, matrix_world: WorldTransform) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Total number of control points over all splines
    pub fn point_count(&self) -> usize {
        self.splines.iter().map(Spline::len).sum()
    }
}

/// A flat list of objects with an optional active object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<CurveObject>,
    #[serde(default)]
    pub active: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its id
    pub fn add(&mut self, object: CurveObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Result<&CurveObject> {
        self.objects
            .get(id.0)
            .ok_or_else(|| Error::Host(format!("no object {}", id)))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut CurveObject> {
        self.objects
            .get_mut(id.0)
            .ok_or_else(|| Error::Host(format!("no object {}", id)))
    }

    /// Find an object by name
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Check that ids are in range before the scene is handed to a decimator
    pub fn validate(&self) -> Result<()> {
        if let Some(active) = self.active {
            if active.0 >= self.objects.len() {
                return Err(Error::InvalidData(format!(
                    "active object {} out of range ({} objects)",
                    active,
                    self.objects.len()
                )));
            }
        }
        Ok(())
    }

    fn spline(&self, id: ObjectId, spline: usize) -> Result<&Spline> {
        let object = self.object(id)?;
        object.splines.get(spline).ok_or_else(|| {
            Error::Host(format!("object '{}' has no spline {}", object.name, spline))
        })
    }

    fn edit_object_mut(&mut self, id: ObjectId) -> Result<&mut CurveObject> {
        let object = self.object_mut(id)?;
        if object.mode != ObjectMode::Edit {
            return Err(Error::Host(format!(
                "object '{}' is not in edit mode",
                object.name
            )));
        }
        Ok(object)
    }
}

impl CurveHost for Scene {
    fn selected_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| ObjectId(i))
            .collect()
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) -> Result<()> {
        if let Some(id) = id {
            self.object(id)?;
        }
        self.active = id;
        Ok(())
    }

    fn object_kind(&self, id: ObjectId) -> Result<ObjectKind> {
        Ok(self.object(id)?.kind)
    }

    fn object_mode(&self, id: ObjectId) -> Result<ObjectMode> {
        Ok(self.object(id)?.mode)
    }

    fn set_object_mode(&mut self, id: ObjectId, mode: ObjectMode) -> Result<()> {
        if mode == ObjectMode::Edit && self.active != Some(id) {
            return Err(Error::Host(format!(
                "only the active object can enter edit mode (requested {})",
                id
            )));
        }
        let object = self.object_mut(id)?;
        if mode == ObjectMode::Edit && object.kind == ObjectKind::Empty {
            return Err(Error::Host(format!(
                "object '{}' has no editable data",
                object.name
            )));
        }
        object.mode = mode;
        Ok(())
    }

    fn world_transform(&self, id: ObjectId) -> Result<WorldTransform> {
        Ok(self.object(id)?.matrix_world)
    }

    fn spline_count(&self, id: ObjectId) -> Result<usize> {
        Ok(self.object(id)?.splines.len())
    }

    fn spline_kind(&self, id: ObjectId, spline: usize) -> Result<SplineKind> {
        Ok(self.spline(id, spline)?.kind())
    }

    fn spline_positions(&self, id: ObjectId, spline: usize) -> Result<Vec<Point3f>> {
        Ok(self.spline(id, spline)?.positions())
    }

    fn select_points(&mut self, id: ObjectId, spline: usize, indices: &BTreeSet<usize>) -> Result<()> {
        let object = self.edit_object_mut(id)?;
        if spline >= object.splines.len() {
            return Err(Error::Host(format!(
                "object '{}' has no spline {}",
                object.name, spline
            )));
        }
        for s in object.splines.iter_mut() {
            s.clear_selection();
        }
        object.splines[spline].select_indices(indices);
        Ok(())
    }

    fn delete_selected_points(&mut self, id: ObjectId) -> Result<usize> {
        let object = self.edit_object_mut(id)?;
        Ok(object.splines.iter_mut().map(Spline::remove_selected).sum())
    }

    fn update_object(&mut self, id: ObjectId) -> Result<()> {
        let object = self.object(id)?;
        log::trace!(
            "object '{}' updated: {} spline(s), {} point(s)",
            object.name,
            object.splines.len(),
            object.point_count()
        );
        Ok(())
    }
}
