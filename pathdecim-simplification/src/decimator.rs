//! Decimation driver
//!
//! Runs a [`PointSelector`] over every spline of every target object of a
//! [`CurveHost`], deleting the points the selector does not keep.

use crate::config::DecimateConfig;
use crate::guard::{ActiveStateGuard, EditSession};
use crate::selection::{DeleteSet, Policy};
use crate::PointSelector;
use pathdecim_core::{CurveHost, ObjectId, ObjectKind, Result, SplineKind};
use std::fmt;

/// Warning reported when there is nothing to decimate
pub const NO_TARGET_MESSAGE: &str = "No curve object selected (or active).";

/// Totals for one decimation pass.
///
/// `points_removed` counts control points only; handle data removed along
/// with Bezier points is not counted separately, so the number is a lower
/// bound on what the host actually dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimationReport {
    pub objects: usize,
    pub splines: usize,
    pub points_removed: usize,
}

impl fmt::Display for DecimationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimated {} curve(s), {} spline(s). Removed ~{} point(s).",
            self.objects, self.splines, self.points_removed
        )
    }
}

/// How a decimation pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All targets were processed
    Finished(DecimationReport),
    /// Nothing was done; carries the warning shown to the user
    Cancelled(String),
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Outcome::Finished(_))
    }

    pub fn report(&self) -> Option<&DecimationReport> {
        match self {
            Outcome::Finished(report) => Some(report),
            Outcome::Cancelled(_) => None,
        }
    }
}

/// Points that would be removed from one spline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplinePlan {
    pub object: ObjectId,
    pub spline: usize,
    pub kind: SplineKind,
    pub point_count: usize,
    pub delete: DeleteSet,
}

/// Decimates the curve objects of a host
#[derive(Debug, Clone)]
pub struct PathDecimator<S: PointSelector = Policy> {
    selector: S,
}

impl PathDecimator<Policy> {
    /// Decimator for the policy described by `config`
    pub fn new(config: &DecimateConfig) -> Self {
        Self {
            selector: config.policy(),
        }
    }
}

impl<S: PointSelector> PathDecimator<S> {
    /// Decimator using a custom selector
    pub fn with_selector(selector: S) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Objects a pass would operate on: the selected curve objects, or the
    /// active object when no curve is selected and it is a curve itself.
    pub fn resolve_targets<H: CurveHost + ?Sized>(host: &H) -> Vec<ObjectId> {
        let is_curve = |id: ObjectId| matches!(host.object_kind(id), Ok(ObjectKind::Curve));

        let selected: Vec<ObjectId> = host
            .selected_objects()
            .into_iter()
            .filter(|&id| is_curve(id))
            .collect();
        if !selected.is_empty() {
            return selected;
        }
        host.active_object()
            .filter(|&id| is_curve(id))
            .into_iter()
            .collect()
    }

    /// Compute what a pass would delete without touching the host
    pub fn plan<H: CurveHost + ?Sized>(&self, host: &H) -> Result<Vec<SplinePlan>> {
        let mut plans = Vec::new();
        for id in Self::resolve_targets(host) {
            for spline in 0..host.spline_count(id)? {
                let (point_count, delete) = self.spline_delete_set(host, id, spline)?;
                plans.push(SplinePlan {
                    object: id,
                    spline,
                    kind: host.spline_kind(id, spline)?,
                    point_count,
                    delete,
                });
            }
        }
        Ok(plans)
    }

    /// Decimate every target object.
    ///
    /// Each object is made active and put in edit mode while its splines are
    /// processed, then returned to object mode. The host's previously active
    /// object and mode are restored afterwards on a best-effort basis.
    pub fn run<H: CurveHost + ?Sized>(&self, host: &mut H) -> Result<Outcome> {
        let targets = Self::resolve_targets(&*host);
        if targets.is_empty() {
            log::warn!("{}", NO_TARGET_MESSAGE);
            return Ok(Outcome::Cancelled(NO_TARGET_MESSAGE.to_string()));
        }

        let mut report = DecimationReport {
            objects: targets.len(),
            ..Default::default()
        };

        let mut host = ActiveStateGuard::new(host);
        for &id in &targets {
            host.set_active_object(Some(id))?;
            let (splines, removed) = self.decimate_object(&mut *host, id)?;
            report.splines += splines;
            report.points_removed += removed;
        }
        drop(host);

        log::info!("{}", report);
        Ok(Outcome::Finished(report))
    }

    /// Decimate one object, which must already be active. Returns the number
    /// of splines processed and points removed.
    fn decimate_object<H: CurveHost + ?Sized>(&self, host: &mut H, id: ObjectId) -> Result<(usize, usize)> {
        let mut session = EditSession::enter(host, id)?;

        let spline_count = session.spline_count(id)?;
        let mut removed = 0;
        for spline in 0..spline_count {
            let (point_count, delete) = self.spline_delete_set(&*session, id, spline)?;
            log::debug!(
                "object {} spline {}: {} point(s), removing {}",
                id,
                spline,
                point_count,
                delete.len()
            );
            if delete.is_empty() {
                continue;
            }

            session.select_points(id, spline, &delete)?;
            let deleted = session.delete_selected_points(id)?;
            if deleted != delete.len() {
                log::debug!(
                    "host removed {} point(s) from object {} spline {}, expected {}",
                    deleted,
                    id,
                    spline,
                    delete.len()
                );
            }
            removed += delete.len();
        }

        session.finish()?;
        if spline_count > 0 {
            host.update_object(id)?;
        }
        Ok((spline_count, removed))
    }

    fn spline_delete_set<H: CurveHost + ?Sized>(
        &self,
        host: &H,
        id: ObjectId,
        spline: usize,
    ) -> Result<(usize, DeleteSet)> {
        let positions = if self.selector.needs_positions() {
            host.world_positions(id, spline)?
        } else {
            host.spline_positions(id, spline)?
        };
        let n = positions.len();
        if n <= 2 {
            return Ok((n, DeleteSet::new()));
        }
        Ok((n, self.selector.select(&positions).complement(n)))
    }
}
