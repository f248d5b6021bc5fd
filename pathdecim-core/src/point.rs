//! Control point types and related functionality

use nalgebra::{Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A homogeneous coordinate `(x, y, z, w)`
pub type Vector4f = Vector4<f32>;

/// Behaviour shared by every kind of curve control point.
///
/// The decimator only ever reads [`ControlPoint::position`]; selection is
/// used by hosts to mark points for deletion.
pub trait ControlPoint {
    /// Local-space position of the point
    fn position(&self) -> Point3f;

    /// Mark or unmark the point (and anything attached to it) as selected
    fn set_selected(&mut self, selected: bool);

    /// Whether the point itself is selected
    fn is_selected(&self) -> bool;
}

/// A position-only control point stored in homogeneous coordinates.
///
/// Used by poly and NURBS splines. The fourth component is the NURBS weight
/// and plays no part in the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomogeneousPoint {
    pub co: Vector4f,
    #[serde(default)]
    pub select: bool,
}

impl HomogeneousPoint {
    /// Create an unselected point with weight 1
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::with_weight(x, y, z, 1.0)
    }

    /// Create an unselected point with an explicit weight
    pub fn with_weight(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            co: Vector4f::new(x, y, z, w),
            select: false,
        }
    }

    /// The NURBS weight
    pub fn weight(&self) -> f32 {
        self.co.w
    }
}

impl Default for HomogeneousPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Point3f> for HomogeneousPoint {
    fn from(p: Point3f) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl ControlPoint for HomogeneousPoint {
    fn position(&self) -> Point3f {
        Point3f::new(self.co.x, self.co.y, self.co.z)
    }

    fn set_selected(&mut self, selected: bool) {
        self.select = selected;
    }

    fn is_selected(&self) -> bool {
        self.select
    }
}

/// A Bezier control point with its two handles.
///
/// Selecting a Bezier point selects both handles as well, so that deleting
/// the point takes the handles with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub co: Point3f,
    pub handle_left: Point3f,
    pub handle_right: Point3f,
    #[serde(default)]
    pub select_control_point: bool,
    #[serde(default)]
    pub select_left_handle: bool,
    #[serde(default)]
    pub select_right_handle: bool,
}

impl BezierPoint {
    /// Create a point whose handles sit on the control point itself
    pub fn new(co: Point3f) -> Self {
        Self::with_handles(co, co, co)
    }

    pub fn with_handles(co: Point3f, handle_left: Point3f, handle_right: Point3f) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
            select_control_point: false,
            select_left_handle: false,
            select_right_handle: false,
        }
    }

    /// True if the control point or either handle is selected
    pub fn any_selected(&self) -> bool {
        self.select_control_point || self.select_left_handle || self.select_right_handle
    }
}

impl Default for BezierPoint {
    fn default() -> Self {
        Self::new(Point3f::origin())
    }
}

impl ControlPoint for BezierPoint {
    fn position(&self) -> Point3f {
        self.co
    }

    fn set_selected(&mut self, selected: bool) {
        self.select_control_point = selected;
        self.select_left_handle = selected;
        self.select_right_handle = selected;
    }

    fn is_selected(&self) -> bool {
        self.select_control_point
    }
}
