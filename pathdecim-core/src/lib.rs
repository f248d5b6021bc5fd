//! Core data structures and traits for pathdecim
//!
//! This crate provides the curve data model (control points, splines and
//! curve objects), the world transform, and the [`CurveHost`] trait through
//! which the decimator talks to whatever application owns the geometry.
//! [`Scene`] is an in-memory host used by the CLI and the tests.

pub mod point;
pub mod spline;
pub mod traits;
pub mod transform;
pub mod scene;
pub mod error;

pub use point::*;
pub use spline::*;
pub use traits::*;
pub use transform::*;
pub use scene::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Vector4, Matrix4};
