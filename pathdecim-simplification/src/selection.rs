//! Keep-set selection
//!
//! Both selectors are pure functions of a spline's point count (and, for the
//! distance policy, its positions). They never fail: out-of-range parameters
//! are clamped. Every result contains index 0 and index `n - 1` when `n >= 1`,
//! and splines with two points or fewer are never decimated.

use crate::PointSelector;
use pathdecim_core::Point3f;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Smallest meaningful stride; smaller values are raised to this
pub const MIN_STEP: usize = 2;

/// Indices of the points to delete from a spline
pub type DeleteSet = BTreeSet<usize>;

/// Indices of the points of one spline that survive decimation.
///
/// Always sorted ascending and bounded by the spline length it was computed
/// for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet {
    indices: BTreeSet<usize>,
}

impl KeepSet {
    /// Keep every index of an `n`-point spline
    pub fn all(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Kept indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Indices of an `n`-point spline that are not kept
    pub fn complement(&self, n: usize) -> DeleteSet {
        (0..n).filter(|i| !self.indices.contains(i)).collect()
    }

    fn insert(&mut self, index: usize) {
        self.indices.insert(index);
    }
}

impl FromIterator<usize> for KeepSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

/// Keep the endpoints plus every interior index divisible by `step`.
///
/// `step` below [`MIN_STEP`] is raised to it.
pub fn select_by_stride(n: usize, step: usize) -> KeepSet {
    if n <= 2 {
        return KeepSet::all(n);
    }
    let step = step.max(MIN_STEP);

    let mut keep: KeepSet = (1..n - 1).filter(|i| i % step == 0).collect();
    keep.insert(0);
    keep.insert(n - 1);
    keep
}

/// Keep the endpoints plus interior points at least `threshold` away from
/// the previously kept point.
///
/// Greedy single pass with no look-ahead. The last point is kept whatever its
/// distance to the last kept interior point. A threshold that is not
/// strictly positive (including NaN) keeps everything.
pub fn select_by_distance(positions: &[Point3f], threshold: f32) -> KeepSet {
    let n = positions.len();
    if n <= 2 || threshold.is_nan() || threshold <= 0.0 {
        return KeepSet::all(n);
    }

    let mut keep = KeepSet::default();
    keep.insert(0);
    let mut last_kept = positions[0];

    for (i, p) in positions.iter().enumerate().take(n - 1).skip(1) {
        if (p - last_kept).norm() >= threshold {
            keep.insert(i);
            last_kept = *p;
        }
    }

    keep.insert(n - 1);
    keep
}

/// Decimation policy applied to every spline of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Keep every `step`-th index
    Stride { step: usize },
    /// Keep points spaced at least `threshold` apart in world space
    MinDistance { threshold: f32 },
}

impl PointSelector for Policy {
    fn select(&self, positions: &[Point3f]) -> KeepSet {
        match *self {
            Policy::Stride { step } => select_by_stride(positions.len(), step),
            Policy::MinDistance { threshold } => select_by_distance(positions, threshold),
        }
    }

    fn needs_positions(&self) -> bool {
        matches!(self, Policy::MinDistance { .. })
    }
}
