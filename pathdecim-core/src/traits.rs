//! Core traits for pathdecim
//!
//! [`CurveHost`] is the boundary between the decimator and the application
//! that owns curve geometry. The decimator never touches points directly: it
//! reads positions, asks the host to select the points it wants gone, and then
//! asks the host to delete its selection.

use crate::{point::Point3f, spline::SplineKind, transform::WorldTransform, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Handle to an object owned by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an object holds. Only curves are decimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Curve,
    Mesh,
    Empty,
}

/// Interaction mode of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectMode {
    #[default]
    Object,
    Edit,
}

impl fmt::Display for ObjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectMode::Object => f.write_str("OBJECT"),
            ObjectMode::Edit => f.write_str("EDIT"),
        }
    }
}

/// Adapter over an application that owns curve objects.
///
/// Spline indices are positions in the object's spline list; point indices
/// are positions within a spline. Both are stable for the duration of a
/// decimation pass because points are only removed, never splines.
pub trait CurveHost {
    /// Objects currently selected by the user, in selection order
    fn selected_objects(&self) -> Vec<ObjectId>;

    /// The active object, if any
    fn active_object(&self) -> Option<ObjectId>;

    /// Make `id` the active object (or clear it with `None`)
    fn set_active_object(&mut self, id: Option<ObjectId>) -> Result<()>;

    fn object_kind(&self, id: ObjectId) -> Result<ObjectKind>;

    fn object_mode(&self, id: ObjectId) -> Result<ObjectMode>;

    /// Switch an object into or out of its editable context
    fn set_object_mode(&mut self, id: ObjectId, mode: ObjectMode) -> Result<()>;

    fn world_transform(&self, id: ObjectId) -> Result<WorldTransform>;

    fn spline_count(&self, id: ObjectId) -> Result<usize>;

    fn spline_kind(&self, id: ObjectId, spline: usize) -> Result<SplineKind>;

    /// Object-local point positions of one spline, in point order
    fn spline_positions(&self, id: ObjectId, spline: usize) -> Result<Vec<Point3f>>;

    /// World-space point positions of one spline
    fn world_positions(&self, id: ObjectId, spline: usize) -> Result<Vec<Point3f>> {
        let transform = self.world_transform(id)?;
        Ok(self
            .spline_positions(id, spline)?
            .iter()
            .map(|p| transform.transform_point(p))
            .collect())
    }

    /// Select exactly `indices` in `spline`, clearing every other selection
    /// on the object first. Handle-bearing points get their handles selected
    /// too.
    fn select_points(&mut self, id: ObjectId, spline: usize, indices: &BTreeSet<usize>) -> Result<()>;

    /// Delete all selected points of an object in edit mode, returning the
    /// number of control points removed
    fn delete_selected_points(&mut self, id: ObjectId) -> Result<usize>;

    /// Called once an object has left edit mode after being modified
    fn update_object(&mut self, _id: ObjectId) -> Result<()> {
        Ok(())
    }
}
