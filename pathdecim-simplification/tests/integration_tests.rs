//! Integration tests for pathdecim-simplification
//!
//! These run full decimation passes against the in-memory scene host and
//! check geometry, reports and restored editor state.

use approx::assert_relative_eq;
use pathdecim_core::*;
use pathdecim_simplification::*;
use std::collections::BTreeSet;

fn line(n: usize, spacing: f32) -> Vec<Point3f> {
    (0..n).map(|i| Point3f::new(i as f32 * spacing, 0.0, 0.0)).collect()
}

fn positions(scene: &Scene, id: ObjectId, spline: usize) -> Vec<Point3f> {
    scene.object(id).unwrap().splines[spline].positions()
}

#[test]
fn test_stride_over_mixed_splines() {
    let mut scene = Scene::new();
    let id = scene.add(
        CurveObject::curve(
            "Path",
            vec![
                Spline::poly_from_positions(line(10, 1.0)),
                Spline::bezier_from_positions(line(5, 1.0)),
                Spline::Nurbs {
                    points: line(2, 1.0).into_iter().map(HomogeneousPoint::from).collect(),
                },
            ],
        )
        .with_selected(true),
    );

    let outcome = PathDecimator::new(&DecimateConfig::stride(3)).run(&mut scene).unwrap();
    let report = outcome.report().copied().unwrap();

    assert_eq!(report.objects, 1);
    assert_eq!(report.splines, 3);
    // 10 -> {0,3,6,9}, 5 -> {0,3,4}, 2 untouched
    assert_eq!(report.points_removed, 6 + 2);

    let xs: Vec<f32> = positions(&scene, id, 0).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 3.0, 6.0, 9.0]);
    let xs: Vec<f32> = positions(&scene, id, 1).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 3.0, 4.0]);
    assert_eq!(positions(&scene, id, 2).len(), 2);
}

#[test]
fn test_distance_mode_scenario() {
    let mut scene = Scene::new();
    let pts = [0.0, 0.1, 1.0, 1.05, 2.0]
        .iter()
        .map(|&x| Point3f::new(x, 0.0, 0.0))
        .collect::<Vec<_>>();
    let id = scene.add(CurveObject::curve("Path", vec![Spline::poly_from_positions(pts)]));
    scene.active = Some(id);

    let outcome = PathDecimator::new(&DecimateConfig::min_distance(0.5))
        .run(&mut scene)
        .unwrap();

    assert_eq!(outcome.report().unwrap().points_removed, 2);
    let xs: Vec<f32> = positions(&scene, id, 0).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_distance_uses_world_space() {
    // Local spacing 0.3 is below the threshold, but the object is scaled by 2.
    let mut scene = Scene::new();
    let local = scene.add(
        CurveObject::curve("Local", vec![Spline::poly_from_positions(line(6, 0.3))])
            .with_selected(true),
    );
    let scaled = scene.add(
        CurveObject::curve("Scaled", vec![Spline::poly_from_positions(line(6, 0.3))])
            .with_selected(true)
            .with_transform(WorldTransform::uniform_scaling(2.0)),
    );

    PathDecimator::new(&DecimateConfig::min_distance(0.5))
        .run(&mut scene)
        .unwrap();

    assert_eq!(positions(&scene, local, 0).len(), 4);
    assert_eq!(positions(&scene, scaled, 0).len(), 6);
    // Stored geometry stays in local space
    assert_relative_eq!(positions(&scene, scaled, 0)[5], Point3f::new(1.5, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_zero_distance_keeps_everything() {
    let mut scene = Scene::new();
    let id = scene.add(
        CurveObject::curve("Path", vec![Spline::poly_from_positions(line(8, 0.01))])
            .with_selected(true),
    );

    let outcome = PathDecimator::new(&DecimateConfig::min_distance(0.0))
        .run(&mut scene)
        .unwrap();

    assert_eq!(outcome.report().unwrap().points_removed, 0);
    assert_eq!(scene.object(id).unwrap().point_count(), 8);
}

#[test]
fn test_empty_and_short_splines_counted() {
    let mut scene = Scene::new();
    scene.add(
        CurveObject::curve(
            "Sparse",
            vec![
                Spline::poly_from_positions(Vec::new()),
                Spline::poly_from_positions(line(1, 1.0)),
                Spline::bezier_from_positions(line(2, 1.0)),
            ],
        )
        .with_selected(true),
    );
    scene.add(CurveObject::curve("NoSplines", Vec::new()).with_selected(true));

    let outcome = PathDecimator::new(&DecimateConfig::stride(2)).run(&mut scene).unwrap();
    assert_eq!(
        outcome,
        Outcome::Finished(DecimationReport {
            objects: 2,
            splines: 3,
            points_removed: 0,
        })
    );
}

#[test]
fn test_bezier_handles_deleted_with_points() {
    let mut scene = Scene::new();
    let points: Vec<BezierPoint> = line(5, 1.0)
        .into_iter()
        .map(|p| {
            BezierPoint::with_handles(
                p,
                p - Vector3f::new(0.25, 0.0, 0.0),
                p + Vector3f::new(0.25, 0.0, 0.0),
            )
        })
        .collect();
    let id = scene.add(CurveObject::curve("Bez", vec![Spline::Bezier { points }]).with_selected(true));

    PathDecimator::new(&DecimateConfig::stride(2)).run(&mut scene).unwrap();

    let Spline::Bezier { points } = &scene.object(id).unwrap().splines[0] else {
        panic!("spline kind changed");
    };
    assert_eq!(points.len(), 3);
    assert_relative_eq!(points[1].handle_left, Point3f::new(1.75, 0.0, 0.0));
    assert!(points.iter().all(|p| !p.any_selected()));
}

#[test]
fn test_active_object_and_mode_restored() {
    let mut scene = Scene::new();
    let a = scene.add(CurveObject::curve("A", vec![Spline::poly_from_positions(line(6, 1.0))]).with_selected(true));
    let b = scene.add(CurveObject::curve("B", vec![Spline::poly_from_positions(line(6, 1.0))]).with_selected(true));
    let m = scene.add(CurveObject::mesh("Mesh"));
    scene.active = Some(b);
    scene.set_object_mode(b, ObjectMode::Edit).unwrap();

    let outcome = PathDecimator::new(&DecimateConfig::default()).run(&mut scene).unwrap();
    assert!(outcome.is_finished());

    assert_eq!(scene.active, Some(b));
    assert_eq!(scene.object(b).unwrap().mode, ObjectMode::Edit);
    assert_eq!(scene.object(a).unwrap().mode, ObjectMode::Object);
    assert_eq!(scene.object(m).unwrap().mode, ObjectMode::Object);
    // 6 points with step 2 -> {0,2,4,5}
    assert_eq!(scene.object(a).unwrap().point_count(), 4);
    assert_eq!(scene.object(b).unwrap().point_count(), 4);
}

#[test]
fn test_no_target_leaves_scene_untouched() {
    let mut scene = Scene::new();
    scene.add(CurveObject::curve("Unselected", vec![Spline::poly_from_positions(line(9, 1.0))]));
    let before = scene.clone();

    let outcome = PathDecimator::new(&DecimateConfig::default()).run(&mut scene).unwrap();
    assert!(matches!(outcome, Outcome::Cancelled(_)));
    assert_eq!(scene, before);
}

#[test]
fn test_repeated_passes_keep_endpoints() {
    let mut scene = Scene::new();
    let id = scene.add(
        CurveObject::curve("Path", vec![Spline::poly_from_positions(line(100, 0.1))])
            .with_selected(true),
    );
    let decimator = PathDecimator::new(&DecimateConfig::stride(3));

    for _ in 0..6 {
        decimator.run(&mut scene).unwrap();
        let pts = positions(&scene, id, 0);
        assert_relative_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[pts.len() - 1].x, 9.9, epsilon = 1e-4);
    }
    assert_eq!(positions(&scene, id, 0).len(), 2);
}

/// Keeps only the endpoints of every spline
struct EndpointsOnly;

impl PointSelector for EndpointsOnly {
    fn select(&self, positions: &[Point3f]) -> KeepSet {
        match positions.len() {
            0 => KeepSet::default(),
            n => [0, n - 1].into_iter().collect(),
        }
    }

    fn needs_positions(&self) -> bool {
        false
    }
}

#[test]
fn test_custom_selector() {
    let mut scene = Scene::new();
    let id = scene.add(
        CurveObject::curve("Path", vec![Spline::poly_from_positions(line(7, 1.0))])
            .with_selected(true),
    );

    let decimator = PathDecimator::with_selector(EndpointsOnly);
    let plans = decimator.plan(&scene).unwrap();
    assert_eq!(plans[0].delete, BTreeSet::from([1, 2, 3, 4, 5]));

    let outcome = decimator.run(&mut scene).unwrap();
    assert_eq!(outcome.report().unwrap().points_removed, 5);
    assert_eq!(scene.object(id).unwrap().point_count(), 2);
}

/// Host wrapper whose deletion primitive always fails
struct BrokenDelete(Scene);

impl CurveHost for BrokenDelete {
    fn selected_objects(&self) -> Vec<ObjectId> {
        self.0.selected_objects()
    }
    fn active_object(&self) -> Option<ObjectId> {
        self.0.active_object()
    }
    fn set_active_object(&mut self, id: Option<ObjectId>) -> Result<()> {
        self.0.set_active_object(id)
    }
    fn object_kind(&self, id: ObjectId) -> Result<ObjectKind> {
        self.0.object_kind(id)
    }
    fn object_mode(&self, id: ObjectId) -> Result<ObjectMode> {
        self.0.object_mode(id)
    }
    fn set_object_mode(&mut self, id: ObjectId, mode: ObjectMode) -> Result<()> {
        self.0.set_object_mode(id, mode)
    }
    fn world_transform(&self, id: ObjectId) -> Result<WorldTransform> {
        self.0.world_transform(id)
    }
    fn spline_count(&self, id: ObjectId) -> Result<usize> {
        self.0.spline_count(id)
    }
    fn spline_kind(&self, id: ObjectId, spline: usize) -> Result<SplineKind> {
        self.0.spline_kind(id, spline)
    }
    fn spline_positions(&self, id: ObjectId, spline: usize) -> Result<Vec<Point3f>> {
        self.0.spline_positions(id, spline)
    }
    fn select_points(&mut self, id: ObjectId, spline: usize, indices: &BTreeSet<usize>) -> Result<()> {
        self.0.select_points(id, spline, indices)
    }
    fn delete_selected_points(&mut self, _id: ObjectId) -> Result<usize> {
        Err(Error::Host("delete operator unavailable".to_string()))
    }
}

#[test]
fn test_host_failure_restores_state() {
    let mut scene = Scene::new();
    let id = scene.add(
        CurveObject::curve("Path", vec![Spline::poly_from_positions(line(5, 1.0))])
            .with_selected(true),
    );
    let other = scene.add(CurveObject::curve("Other", Vec::new()));
    scene.active = Some(other);
    let mut host = BrokenDelete(scene);

    let result = PathDecimator::new(&DecimateConfig::default()).run(&mut host);
    assert!(matches!(result, Err(Error::Host(_))));

    assert_eq!(host.0.active, Some(other));
    assert_eq!(host.0.object(id).unwrap().mode, ObjectMode::Object);
    assert_eq!(host.0.object(id).unwrap().point_count(), 5);
}

#[test]
fn test_dyn_host() {
    let mut scene = Scene::new();
    scene.add(
        CurveObject::curve("Path", vec![Spline::poly_from_positions(line(5, 1.0))])
            .with_selected(true),
    );
    let host: &mut dyn CurveHost = &mut scene;

    let outcome = PathDecimator::new(&DecimateConfig::default()).run(host).unwrap();
    assert_eq!(outcome.report().unwrap().points_removed, 2);
}
