//! Scene model: the N×N×N assembly of sub-cubes.
//!
//! Positions live in the assembly's local frame. A sub-cube vertex reaches
//! the screen as
//! `orbit * live * (center_base + own * corner * radius) + screen_center`,
//! where `live` is the transient rotation of an in-progress layer turn.

use crate::error::CubeError;
use crate::math::{normalize_matrix_values, quarter_turns, rotation_around_axis, Mat3, Vec3};
use crate::quad::Quad3;
use log::debug;
use std::f64::consts::FRAC_PI_2;

/// Faces of a unit cube, named by their outward normal in the sub-cube's own frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Y
    Up,
    /// -Y
    Down,
    /// -X
    Left,
    /// +X
    Right,
    /// +Z, toward the viewer at identity orbit
    Front,
    /// -Z
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Face> {
        Face::ALL.get(index).copied()
    }

    pub fn normal(self) -> Vec3 {
        match self {
            Face::Up => Vec3::new(0.0, 1.0, 0.0),
            Face::Down => Vec3::new(0.0, -1.0, 0.0),
            Face::Left => Vec3::new(-1.0, 0.0, 0.0),
            Face::Right => Vec3::new(1.0, 0.0, 0.0),
            Face::Front => Vec3::new(0.0, 0.0, 1.0),
            Face::Back => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Corner indices, clockwise when viewed from outside the cube
    pub fn corners(self) -> [usize; 4] {
        FACE_CORNERS[self.index()]
    }
}

/// Unit cube corners; bit 0 selects +x, bit 1 +y, bit 2 +z
pub const CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Indexed by [`Face::index`]
const FACE_CORNERS: [[usize; 4]; 6] = [
    [2, 3, 7, 6], // Up
    [4, 5, 1, 0], // Down
    [2, 6, 4, 0], // Left
    [7, 3, 1, 5], // Right
    [6, 7, 5, 4], // Front
    [3, 2, 0, 1], // Back
];

/// The twelve edges as corner index pairs
pub const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7), // along x
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7), // along y
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7), // along z
];

#[derive(Debug, Clone)]
pub struct SubCube {
    /// 1-based; 0 means "no cube"
    pub id: u32,
    /// Position in the assembly's local frame
    pub center_base: Vec3,
    /// Derived each frame: orbit and live rotation applied, plus screen center
    pub center_final: Vec3,
    /// Accumulated committed quarter turns; entries are exactly -1, 0 or 1
    pub own_rotation: Mat3,
    /// Transient rotation of the layer being dragged
    pub live_rotation: Mat3,
    /// Half side length
    pub radius: f64,
    /// Part of the layer being dragged this frame
    pub is_rotating: bool,
}

impl SubCube {
    /// Rotation applied to points of the unit cube, excluding the orbit
    fn local_transform(&self) -> Mat3 {
        self.live_rotation * self.own_rotation
    }

    /// Outward normal of `face` in the assembly's local frame, ignoring any live turn
    pub fn face_normal(&self, face: Face) -> Vec3 {
        self.own_rotation * face.normal()
    }

    /// The 8 corners in screen space for the given orbit and screen center
    pub fn world_corners(&self, orbit: &Mat3, screen_center: Vec3) -> [Vec3; 8] {
        let local = self.local_transform();
        let center = self.live_rotation * self.center_base;
        CORNERS.map(|corner| {
            let offset = local * (self.radius * corner);
            *orbit * (center + offset) + screen_center
        })
    }

    /// Screen-space quad of one face
    pub fn face_quad(corners: &[Vec3; 8], face: Face) -> Quad3 {
        Quad3::new(face.corners().map(|i| corners[i]))
    }
}

/// A quarter-turnable layer rotation in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTurn {
    /// Sub-cube the drag started on; its layer turns
    pub anchor: u32,
    /// Signed basis axis in the assembly's local frame
    pub axis: Vec3,
    /// Live angle in radians
    pub theta: f64,
}

/// The whole assembly
#[derive(Debug, Clone)]
pub struct BigCube {
    size: usize,
    cubes: Vec<SubCube>,
    /// Free rotation of the whole assembly from orbit dragging
    pub orbit_rotation: Mat3,
}

impl BigCube {
    /// Lays out `size`³ sub-cubes of half side `radius` on a grid centered at the origin
    pub fn new(size: usize, radius: f64) -> Self {
        let offset = (size as f64 - 1.0) / 2.0;
        let mut cubes = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let grid = Vec3::new(x as f64 - offset, y as f64 - offset, z as f64 - offset);
                    let center_base = (2.0 * radius) * grid;
                    cubes.push(SubCube {
                        id: cubes.len() as u32 + 1,
                        center_base,
                        center_final: center_base,
                        own_rotation: Mat3::IDENTITY,
                        live_rotation: Mat3::IDENTITY,
                        radius,
                        is_rotating: false,
                    });
                }
            }
        }
        BigCube {
            size,
            cubes,
            orbit_rotation: Mat3::IDENTITY,
        }
    }

    /// Sub-cubes per edge
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cubes(&self) -> &[SubCube] {
        &self.cubes
    }

    pub fn get(&self, id: u32) -> Option<&SubCube> {
        if id == 0 {
            return None;
        }
        self.cubes.get(id as usize - 1)
    }

    /// Half side length shared by every sub-cube
    pub fn cube_radius(&self) -> f64 {
        self.cubes.first().map_or(0.0, |cube| cube.radius)
    }

    /// Composes a frame's orbit delta onto the accumulated orbit
    pub fn orbit(&mut self, delta: Mat3) {
        self.orbit_rotation = delta * self.orbit_rotation;
    }

    /// Recomputes every `center_final`
    pub fn update_positions(&mut self, screen_center: Vec3) {
        let orbit = self.orbit_rotation;
        for cube in &mut self.cubes {
            cube.center_final = orbit * (cube.live_rotation * cube.center_base) + screen_center;
        }
    }

    /// True when `cube` lies in the same layer as `anchor` across `axis`
    fn in_layer(cube: &SubCube, anchor: &SubCube, axis: Vec3) -> bool {
        let distance = (cube.center_base - anchor.center_base).dot(axis);
        distance.abs() < anchor.radius
    }

    /// Drops any live layer rotation
    pub fn clear_turn(&mut self) {
        for cube in &mut self.cubes {
            cube.live_rotation = Mat3::IDENTITY;
            cube.is_rotating = false;
        }
    }

    /// Applies `rotation` to the anchor's layer, resetting every other sub-cube.
    /// Returns the number of sub-cubes in the layer.
    fn rotate_layer(&mut self, anchor: u32, axis: Vec3, rotation: Mat3) -> Result<usize, CubeError> {
        let anchor = self
            .get(anchor)
            .cloned()
            .ok_or(CubeError::UnknownSubCube(anchor))?;
        let mut members = 0;
        for cube in &mut self.cubes {
            cube.is_rotating = Self::in_layer(cube, &anchor, axis);
            cube.live_rotation = if cube.is_rotating {
                members += 1;
                rotation
            } else {
                Mat3::IDENTITY
            };
        }
        Ok(members)
    }

    /// Shows `turn` as this frame's live layer rotation
    pub fn set_turn(&mut self, turn: &LayerTurn) -> Result<usize, CubeError> {
        let rotation = rotation_around_axis(turn.axis, turn.theta)?;
        self.rotate_layer(turn.anchor, turn.axis, rotation)
    }

    /// Snaps `turn` to the nearest quarter turn and folds it permanently into
    /// the layer's orientations and positions. Returns the quarter-turn count.
    pub fn commit_turn(&mut self, turn: &LayerTurn) -> Result<i64, CubeError> {
        let turns = quarter_turns(turn.theta);
        let snapped = normalize_matrix_values(rotation_around_axis(
            turn.axis,
            turns as f64 * FRAC_PI_2,
        )?);
        self.rotate_layer(turn.anchor, turn.axis, snapped)?;
        for cube in self.cubes.iter_mut().filter(|cube| cube.is_rotating) {
            cube.own_rotation = snapped * cube.own_rotation;
            cube.center_base = snapped * cube.center_base;
        }
        self.clear_turn();
        debug!(
            "committed {} quarter turn(s) about {:?} for layer of cube {}",
            turns, turn.axis, turn.anchor
        );
        Ok(turns)
    }

    /// Back to the solved state with identity orbit
    pub fn reset(&mut self) {
        *self = BigCube::new(self.size, self.cube_radius());
    }
}
