//! Curve control point decimation
//!
//! This crate reduces the number of control points on curve splines while
//! always keeping each spline's first and last point:
//! - Index stride selection (keep every Nth point)
//! - Minimum distance selection (keep points spaced at least D apart)
//! - A driver that runs either policy over every target object of a
//!   [`CurveHost`](pathdecim_core::CurveHost)

pub mod selection;
pub mod config;
pub mod guard;
pub mod decimator;

pub use selection::*;
pub use config::*;
pub use guard::*;
pub use decimator::*;

use pathdecim_core::Point3f;

/// Chooses which points of a single spline survive decimation
pub trait PointSelector {
    /// Compute the keep-set for a spline given its world-space positions
    fn select(&self, positions: &[Point3f]) -> KeepSet;

    /// Whether [`PointSelector::select`] looks at positions at all.
    ///
    /// Callers can skip the world transform when it does not.
    fn needs_positions(&self) -> bool {
        true
    }
}
