/// Scene-level tests for the cube renderer.
///
/// These render whole frames into the color and id buffers and check what
/// ends up under specific pixels, then drive drags through the frame loop.
///
/// Run with:   cargo test --test scenes
use cubeturn::math::normalize_matrix_values;
use cubeturn::{
    Action, BigCube, Canvas, Config, Face, FrameInput, Interaction, Mat3, PickTarget, Scene,
};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::FRAC_PI_2;
use test_log::test;

fn scene(width: usize, height: usize, radius: f64) -> Scene {
    let config = Config {
        assembly_radius: radius,
        ..Config::default()
    };
    Scene::new(config, width, height).expect("valid config")
}

/// Pixel coordinates of every non-background pixel, grouped by cube id
fn regions_by_cube(canvas: &Canvas) -> BTreeMap<u32, BTreeSet<(i64, i64)>> {
    let mut regions: BTreeMap<u32, BTreeSet<(i64, i64)>> = BTreeMap::new();
    for y in 0..canvas.height() as i64 {
        for x in 0..canvas.width() as i64 {
            if let Some(target) = PickTarget::decode(canvas.id_at(x, y)) {
                regions.entry(target.cube_id).or_default().insert((x, y));
            }
        }
    }
    regions
}

/// True when the pixels form one 4-connected component
fn is_contiguous(pixels: &BTreeSet<(i64, i64)>) -> bool {
    let Some(&start) = pixels.iter().next() else {
        return true;
    };
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some((x, y)) = stack.pop() {
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if pixels.contains(&next) && seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen.len() == pixels.len()
}

/// Id of the sub-cube at grid position `(x, y, z)` in a 3×3×3 assembly
fn grid_id(x: u32, y: u32, z: u32) -> u32 {
    1 + x + 3 * y + 9 * z
}

#[test]
fn identity_view_shows_the_front_layer() {
    let mut scene = scene(120, 120, 45.0);
    let canvas = scene.render_frame(&FrameInput::hover(0.0, 0.0));

    let regions = regions_by_cube(canvas);
    let expected: BTreeSet<u32> = (0..3)
        .flat_map(|x| (0..3).map(move |y| grid_id(x, y, 2)))
        .collect();
    assert_eq!(regions.keys().copied().collect::<BTreeSet<_>>(), expected);

    for (cube_id, pixels) in &regions {
        assert_eq!(pixels.len(), 900, "cube {cube_id}");
        assert!(is_contiguous(pixels), "cube {cube_id}");
    }
    for y in 0..120 {
        for x in 0..120 {
            let inside = (15..105).contains(&x) && (15..105).contains(&y);
            assert_eq!(canvas.id_at(x, y) != 0, inside, "({x}, {y})");
        }
    }
    // Every visible sticker is a front face.
    let front = PickTarget::decode(canvas.id_at(60, 60)).unwrap();
    assert_eq!(front, PickTarget::new(grid_id(1, 1, 2), Face::Front));
}

#[test]
fn isometric_view_shows_three_faces_and_hides_the_core() {
    let mut scene = scene(160, 160, 40.0);
    let isometric = Mat3::rotate_x((1.0f64 / 2.0f64.sqrt()).atan()) * Mat3::rotate_y(-FRAC_PI_2 / 2.0);
    scene.cube_mut().orbit(isometric);
    let canvas = scene.render_frame(&FrameInput::hover(0.0, 0.0));

    let regions = regions_by_cube(canvas);
    let mut expected = BTreeSet::new();
    for z in 0..3 {
        for y in 0..3 {
            for x in 0..3 {
                if x == 2 || y == 2 || z == 2 {
                    expected.insert(grid_id(x, y, z));
                }
            }
        }
    }
    assert_eq!(expected.len(), 19);
    assert_eq!(regions.keys().copied().collect::<BTreeSet<_>>(), expected);
    assert!(!regions.contains_key(&grid_id(1, 1, 1)));
    for (cube_id, pixels) in &regions {
        assert!(is_contiguous(pixels), "cube {cube_id}");
    }
    assert_eq!(canvas.id_at(2, 2), 0);
    assert_eq!(canvas.id_at(157, 157), 0);
}

#[test]
fn layer_drag_commits_an_exact_quarter_turn() {
    let config = Config::default();
    let mut cube = BigCube::new(3, 10.0);
    let grabbed = PickTarget::new(5, Face::Front);

    let t = Interaction::Idle.step(&FrameInput::press(50.0, 50.0), Some(grabbed), &cube, &config);
    let Interaction::LayerDragging(drag) = &t.next else {
        panic!("expected a layer drag, got {:?}", t.next);
    };
    let axis2 = drag.axis2;
    let t = t.next.step(
        &FrameInput::press(50.0 + 50.0 * drag.axis1_pixel.x, 50.0 + 50.0 * drag.axis1_pixel.y),
        None,
        &cube,
        &config,
    );
    let Action::Turn(live) = t.action else {
        panic!("expected a live turn, got {:?}", t.action);
    };
    assert!((live.theta - 1.0).abs() < 1e-12);
    assert_eq!(live.axis, axis2);

    let t = t.next.step(&FrameInput::hover(100.0, 50.0), None, &cube, &config);
    assert!(t.next.is_idle());
    let Action::Commit(turn) = t.action else {
        panic!("expected a commit, got {:?}", t.action);
    };
    assert_eq!(cube.commit_turn(&turn), Ok(1));

    let quarter = normalize_matrix_values(Mat3::rotate_y(FRAC_PI_2));
    let mut turned = 0;
    for sub in cube.cubes() {
        if sub.center_base.y == 0.0 {
            assert_eq!(sub.own_rotation, quarter, "cube {}", sub.id);
            turned += 1;
        } else {
            assert_eq!(sub.own_rotation, Mat3::IDENTITY, "cube {}", sub.id);
        }
        for row in sub.own_rotation.m {
            assert!(row.iter().all(|&v| v == -1.0 || v == 0.0 || v == 1.0));
        }
    }
    assert_eq!(turned, 9);
}

#[test]
fn dragging_a_sticker_through_the_frame_loop_turns_its_layer() {
    let mut scene = scene(120, 120, 45.0);
    let center = grid_id(1, 1, 2);

    scene.render_frame(&FrameInput::hover(60.5, 60.5));
    assert_eq!(scene.hover(), Some(PickTarget::new(center, Face::Front)));

    scene.render_frame(&FrameInput::press(60.5, 60.5));
    assert!(matches!(scene.interaction(), Interaction::LayerDragging(_)));

    scene.render_frame(&FrameInput::press(110.5, 60.5));
    let rotating: Vec<u32> = scene
        .cube()
        .cubes()
        .iter()
        .filter(|sub| sub.is_rotating)
        .map(|sub| sub.id)
        .collect();
    assert_eq!(rotating.len(), 9);
    assert!(rotating.iter().all(|&id| (id - 1) / 3 % 3 == 1));
    let live = scene.cube().get(center).unwrap().live_rotation;
    assert_eq!(live, Mat3::rotate_y(1.0));

    scene.render_frame(&FrameInput::hover(110.5, 60.5));
    assert!(scene.interaction().is_idle());
    let quarter = normalize_matrix_values(Mat3::rotate_y(FRAC_PI_2));
    for sub in scene.cube().cubes() {
        assert!(!sub.is_rotating);
        let expected = if sub.center_base.y == 0.0 { quarter } else { Mat3::IDENTITY };
        assert_eq!(sub.own_rotation, expected, "cube {}", sub.id);
    }
    // The middle layer swung a quarter turn to the right, so the center of
    // the view now shows the left sticker of the cube that sat left-center.
    let canvas = scene.canvas();
    assert_eq!(
        PickTarget::decode(canvas.id_at(60, 60)),
        Some(PickTarget::new(grid_id(0, 1, 1), Face::Left))
    );
}

#[test]
fn short_drag_snaps_back() {
    let mut scene = scene(120, 120, 45.0);
    scene.render_frame(&FrameInput::hover(60.5, 60.5));
    scene.render_frame(&FrameInput::press(60.5, 60.5));
    scene.render_frame(&FrameInput::press(75.5, 60.5));
    scene.render_frame(&FrameInput::hover(75.5, 60.5));
    assert!(scene
        .cube()
        .cubes()
        .iter()
        .all(|sub| sub.own_rotation == Mat3::IDENTITY));
}

#[test]
fn orbit_then_turn_keeps_orientations_exact() {
    let mut scene = scene(200, 200, 60.0);
    scene.cube_mut().orbit(Mat3::rotate_x(0.35) * Mat3::rotate_y(-0.5));
    scene.render_frame(&FrameInput::hover(100.5, 100.5));
    let target = scene.hover().expect("assembly under the screen center");

    scene.render_frame(&FrameInput::press(100.5, 100.5));
    let Interaction::LayerDragging(drag) = scene.interaction().clone() else {
        panic!("expected a layer drag");
    };
    assert_eq!(drag.target, target);
    let end = (100.5 + 80.0 * drag.axis1_pixel.x, 100.5 + 80.0 * drag.axis1_pixel.y);
    scene.render_frame(&FrameInput::press(end.0, end.1));
    scene.render_frame(&FrameInput::hover(end.0, end.1));

    for sub in scene.cube().cubes() {
        for row in sub.own_rotation.m {
            assert!(row.iter().all(|&v| v == -1.0 || v == 0.0 || v == 1.0));
        }
        let grid = (1.0 / 40.0) * sub.center_base;
        for c in [grid.x, grid.y, grid.z] {
            assert!(c == -1.0 || c == 0.0 || c == 1.0, "cube {} at {:?}", sub.id, sub.center_base);
        }
    }
    let moved = scene
        .cube()
        .cubes()
        .iter()
        .filter(|sub| sub.own_rotation != Mat3::IDENTITY)
        .count();
    assert_eq!(moved, 9);
}

#[test]
fn resize_reallocates_both_buffers() {
    let mut scene = scene(800, 600, 200.0);
    scene.render_frame(&FrameInput::hover(400.0, 300.0));
    assert!(scene.hover().is_some());

    scene.resize(400, 300);
    let canvas = scene.canvas();
    assert_eq!((canvas.width(), canvas.height()), (400, 300));
    assert_eq!(canvas.pixels().len(), 400 * 300);
    assert_eq!(canvas.ids().len(), 400 * 300);
    assert_eq!(canvas.id_at(700, 500), 0);
    assert_eq!(canvas.id_at(450, 100), 0);
    assert_eq!(canvas.pixel_at(799, 599), 0);
    assert_eq!(scene.hover(), None);

    let canvas = scene.render_frame(&FrameInput::hover(200.0, 150.0));
    assert_eq!(canvas.id_at(700, 500), 0);
    assert_ne!(canvas.id_at(200, 150), 0);
}
