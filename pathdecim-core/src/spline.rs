//! Spline containers

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Shape kind of a spline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplineKind {
    Poly,
    Nurbs,
    Bezier,
}

impl SplineKind {
    /// Whether points of this kind carry handles
    pub fn has_handles(&self) -> bool {
        matches!(self, SplineKind::Bezier)
    }
}

impl fmt::Display for SplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplineKind::Poly => "POLY",
            SplineKind::Nurbs => "NURBS",
            SplineKind::Bezier => "BEZIER",
        };
        f.write_str(name)
    }
}

/// An ordered run of control points forming one path segment of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Spline {
    Poly { points: Vec<HomogeneousPoint> },
    Nurbs { points: Vec<HomogeneousPoint> },
    Bezier { points: Vec<BezierPoint> },
}

impl Spline {
    /// Create a poly spline from plain positions
    pub fn poly_from_positions<I: IntoIterator<Item = Point3f>>(positions: I) -> Self {
        Spline::Poly {
            points: positions.into_iter().map(HomogeneousPoint::from).collect(),
        }
    }

    /// Create a Bezier spline whose handles coincide with the control points
    pub fn bezier_from_positions<I: IntoIterator<Item = Point3f>>(positions: I) -> Self {
        Spline::Bezier {
            points: positions.into_iter().map(BezierPoint::new).collect(),
        }
    }

    pub fn kind(&self) -> SplineKind {
        match self {
            Spline::Poly { .. } => SplineKind::Poly,
            Spline::Nurbs { .. } => SplineKind::Nurbs,
            Spline::Bezier { .. } => SplineKind::Bezier,
        }
    }

    /// Number of control points
    pub fn len(&self) -> usize {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => points.len(),
            Spline::Bezier { points } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local-space positions in point order
    pub fn positions(&self) -> Vec<Point3f> {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => positions_of(points),
            Spline::Bezier { points } => positions_of(points),
        }
    }

    /// Deselect every point and handle
    pub fn clear_selection(&mut self) {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => set_all(points, false),
            Spline::Bezier { points } => set_all(points, false),
        }
    }

    /// Select the points at `indices`; indices past the end are ignored.
    ///
    /// Existing selection state is left untouched.
    pub fn select_indices(&mut self, indices: &BTreeSet<usize>) {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => select_in(points, indices),
            Spline::Bezier { points } => select_in(points, indices),
        }
    }

    /// Indices of the currently selected points
    pub fn selected_indices(&self) -> BTreeSet<usize> {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => selected_in(points),
            Spline::Bezier { points } => selected_in(points),
        }
    }

    /// Remove every selected point, returning how many were removed
    pub fn remove_selected(&mut self) -> usize {
        match self {
            Spline::Poly { points } | Spline::Nurbs { points } => retain_unselected(points),
            Spline::Bezier { points } => retain_unselected(points),
        }
    }
}

fn positions_of<P: ControlPoint>(points: &[P]) -> Vec<Point3f> {
    points.iter().map(ControlPoint::position).collect()
}

fn set_all<P: ControlPoint>(points: &mut [P], selected: bool) {
    for p in points.iter_mut() {
        p.set_selected(selected);
    }
}

fn select_in<P: ControlPoint>(points: &mut [P], indices: &BTreeSet<usize>) {
    for &i in indices {
        if let Some(p) = points.get_mut(i) {
            p.set_selected(true);
        }
    }
}

fn selected_in<P: ControlPoint>(points: &[P]) -> BTreeSet<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_selected())
        .map(|(i, _)| i)
        .collect()
}

fn retain_unselected<P: ControlPoint>(points: &mut Vec<P>) -> usize {
    let before = points.len();
    points.retain(|p| !p.is_selected());
    before - points.len()
}
