//! Per-frame orchestration.
//!
//! A [`Scene`] owns every piece of mutable state (buffers, the assembly and the
//! interaction state machine) and runs one frame at a time: clear, update
//! transforms from input, depth sort, rasterize, pick.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::cube::{BigCube, Face, SubCube, EDGES};
use crate::error::CubeError;
use crate::graphics::{draw_line, fill_convex_quad, project_quad, project_to_screen};
use crate::interaction::{Action, Interaction};
use crate::math::{Mat3, Vec3};
use crate::pick::{pick, PickTarget};
use crate::sort::back_to_front;
use crate::state::FrameInput;
use log::{info, trace, warn};

pub struct Scene {
    config: Config,
    canvas: Canvas,
    cube: BigCube,
    interaction: Interaction,
    /// Face under the pointer in the last completed frame
    hover: Option<PickTarget>,
    frame: u64,
}

impl Scene {
    pub fn new(config: Config, width: usize, height: usize) -> Result<Self, CubeError> {
        config.validate()?;
        let cube = BigCube::new(config.grid_size, config.cube_radius());
        let mut canvas = Canvas::new(width, height, config.row_order);
        canvas.clear(config.background);
        info!(
            "{}³ cubes, assembly radius {}, canvas {}x{}",
            config.grid_size, config.assembly_radius, width, height
        );
        Ok(Scene {
            config,
            canvas,
            cube,
            interaction: Interaction::Idle,
            hover: None,
            frame: 0,
        })
    }

    /// Reallocates both buffers; their old contents are gone, including the
    /// last pick.
    pub fn resize(&mut self, width: usize, height: usize) {
        info!("resize to {}x{}", width, height);
        self.canvas.resize(width, height);
        self.hover = None;
    }

    /// Solved state, identity orbit, no drag in progress
    pub fn reset(&mut self) {
        self.cube.reset();
        self.interaction = Interaction::Idle;
        self.hover = None;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn cube(&self) -> &BigCube {
        &self.cube
    }

    /// Mutable access for setting up views, e.g. a fixed orbit
    pub fn cube_mut(&mut self) -> &mut BigCube {
        &mut self.cube
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn hover(&self) -> Option<PickTarget> {
        self.hover
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    fn screen_center(&self) -> Vec3 {
        Vec3::new(
            self.canvas.width() as f64 / 2.0,
            self.canvas.height() as f64 / 2.0,
            0.0,
        )
    }

    /// Runs one frame and returns the finished color buffer
    pub fn render_frame(&mut self, input: &FrameInput) -> &Canvas {
        self.frame += 1;
        trace!("frame {} input {:?}", self.frame, input);

        self.canvas.clear(self.config.background);

        let transition = self
            .interaction
            .step(input, self.hover, &self.cube, &self.config);
        self.interaction = transition.next;
        let layer_axis = self.apply(transition.action);

        let screen_center = self.screen_center();
        self.cube.update_positions(screen_center);
        let world_axis = layer_axis.map(|axis| self.cube.orbit_rotation * axis);
        let order = back_to_front(self.cube.cubes(), world_axis, screen_center);

        let highlighted = match &self.interaction {
            Interaction::LayerDragging(drag) => Some(drag.target),
            _ => self.hover,
        };
        for index in order {
            let sub = &self.cube.cubes()[index];
            draw_sub_cube(
                &mut self.canvas,
                sub,
                &self.cube.orbit_rotation,
                screen_center,
                &self.config,
                highlighted,
            );
        }

        self.hover = pick(&self.canvas, input.pointer);
        &self.canvas
    }

    /// Applies an action to the assembly; returns the local axis of a live
    /// layer turn, if one is showing.
    fn apply(&mut self, action: Action) -> Option<Vec3> {
        self.cube.clear_turn();
        match action {
            Action::None => None,
            Action::Orbit(delta) => {
                self.cube.orbit(delta);
                None
            }
            Action::Turn(turn) => match self.cube.set_turn(&turn) {
                Ok(_) => Some(turn.axis),
                Err(err) => {
                    warn!("dropping layer turn: {}", err);
                    debug_assert!(false, "layer turn rejected: {err}");
                    None
                }
            },
            Action::Commit(turn) => {
                if let Err(err) = self.cube.commit_turn(&turn) {
                    warn!("dropping layer commit: {}", err);
                    debug_assert!(false, "layer commit rejected: {err}");
                }
                None
            }
        }
    }
}

/// Paints the visible faces of one sub-cube, then the edges bordering them
fn draw_sub_cube(
    canvas: &mut Canvas,
    sub: &SubCube,
    orbit: &Mat3,
    screen_center: Vec3,
    config: &Config,
    highlighted: Option<PickTarget>,
) {
    let corners = sub.world_corners(orbit, screen_center);
    let mut visible = Vec::with_capacity(3);
    for face in Face::ALL {
        let quad = project_quad(&SubCube::face_quad(&corners, face));
        let target = PickTarget::new(sub.id, face);
        if fill_convex_quad(canvas, &quad, config.palette[face.index()], target.encode()) {
            visible.push((face, quad));
        }
    }

    let screen = corners.map(project_to_screen);
    for &(a, b) in EDGES.iter() {
        let borders_visible = visible.iter().any(|(face, _)| {
            let face_corners = face.corners();
            face_corners.contains(&a) && face_corners.contains(&b)
        });
        if borders_visible {
            draw_line(canvas, screen[a], screen[b], config.edge_color);
        }
    }

    for (face, quad) in &visible {
        if highlighted == Some(PickTarget::new(sub.id, *face)) {
            for i in 0..4 {
                draw_line(canvas, quad.p[i], quad.p[(i + 1) % 4], config.highlight_color);
            }
        }
    }
}
