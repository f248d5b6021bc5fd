//! Object-to-world transformation

use crate::point::{Point3f, Vector3f};
use nalgebra::{Matrix4, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// The world matrix of a curve object.
///
/// Spline points are stored in object-local space; distance-based decimation
/// measures spacing after mapping them through this transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    pub matrix: Matrix4<f32>,
}

impl WorldTransform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(translation: Vector3f) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Per-axis scale
    pub fn scaling(scale: Vector3f) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Map a local position into world space
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3f::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// `self * other`: apply `other` first, then `self`
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for WorldTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for WorldTransform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}
