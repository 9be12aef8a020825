//! Pointer interaction as an explicit state machine.
//!
//! [`Interaction::step`] is pure: it reads the frame input, the pick result
//! from the previous frame and the current scene, and returns the next state
//! together with an [`Action`] for the frame driver to apply. Picking lags one
//! frame behind what is on screen; it only gates starting a drag.

use crate::config::Config;
use crate::cube::{BigCube, LayerTurn};
use crate::graphics::project_to_screen;
use crate::math::{Mat3, Vec2, Vec3};
use crate::pick::PickTarget;
use crate::state::FrameInput;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Dragging empty space rotates the whole assembly
    OrbitDragging { last_pointer: Vec2 },
    /// Dragging a sticker turns one layer
    LayerDragging(LayerDrag),
}

/// Working memory of a layer drag, fixed when the drag starts
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDrag {
    pub target: PickTarget,
    pub clicked_pixel: Vec2,
    /// In-plane axes of the grabbed face, local frame; `(normal, axis1, axis2)`
    /// is right-handed
    pub axis1: Vec3,
    pub axis2: Vec3,
    /// Screen projections of the axes under the orbit at drag start
    pub axis1_pixel: Vec2,
    pub axis2_pixel: Vec2,
    secondary_reported: bool,
}

impl LayerDrag {
    /// `None` if the target names no sub-cube
    pub fn begin(target: PickTarget, clicked_pixel: Vec2, cube: &BigCube) -> Option<LayerDrag> {
        let grabbed = cube.get(target.cube_id)?;
        let normal = grabbed.face_normal(target.face);
        let axis1 = normal.cyclic_shift();
        let mut axis2 = axis1.cyclic_shift();
        if normal.cross(axis1).dot(axis2) < 0.0 {
            axis2 = -axis2;
        }
        let orbit = cube.orbit_rotation;
        Some(LayerDrag {
            target,
            clicked_pixel,
            axis1,
            axis2,
            axis1_pixel: project_to_screen(orbit * axis1),
            axis2_pixel: project_to_screen(orbit * axis2),
            secondary_reported: false,
        })
    }

    /// Live turn for the pointer's cumulative drag from the click.
    ///
    /// Dragging along `axis1` turns about `axis2`; dragging along `axis2`
    /// turns about `-axis1`. Either way the grabbed sticker follows the pointer.
    pub fn turn_at(&self, pointer: Vec2, divisor: f64) -> LayerTurn {
        let drag = pointer - self.clicked_pixel;
        let along1 = drag.dot(self.axis1_pixel);
        let along2 = drag.dot(self.axis2_pixel);
        let (axis, distance) = if along1.abs() >= along2.abs() {
            (self.axis2, along1)
        } else {
            (-self.axis1, along2)
        };
        LayerTurn {
            anchor: self.target.cube_id,
            axis,
            theta: distance / divisor,
        }
    }
}

/// What the frame driver should do to the scene this frame
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Compose onto the orbit rotation
    Orbit(Mat3),
    /// Show a live layer rotation
    Turn(LayerTurn),
    /// Snap and permanently apply a layer rotation
    Commit(LayerTurn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: Interaction,
    pub action: Action,
}

impl Transition {
    fn to(next: Interaction, action: Action) -> Self {
        Transition { next, action }
    }
}

/// Orbit increment for a frame-to-frame pointer delta; the x rotation is
/// inverted so dragging up tips the front upward.
pub fn orbit_delta(delta: Vec2, divisor: f64) -> Mat3 {
    Mat3::rotate_x(-delta.y / divisor) * Mat3::rotate_y(delta.x / divisor)
}

impl Interaction {
    pub fn step(
        &self,
        input: &FrameInput,
        hover: Option<PickTarget>,
        cube: &BigCube,
        config: &Config,
    ) -> Transition {
        match self {
            Interaction::Idle => {
                if !input.primary {
                    return Transition::to(Interaction::Idle, Action::None);
                }
                let drag = hover.and_then(|target| LayerDrag::begin(target, input.pointer, cube));
                match drag {
                    Some(drag) => {
                        debug!(
                            "layer drag on cube {} face {:?}",
                            drag.target.cube_id, drag.target.face
                        );
                        Transition::to(Interaction::LayerDragging(drag), Action::None)
                    }
                    None => {
                        if let Some(target) = hover {
                            warn!("pick target {:?} names no sub-cube, orbiting", target);
                        }
                        debug!("orbit drag at {:?}", input.pointer);
                        Transition::to(
                            Interaction::OrbitDragging {
                                last_pointer: input.pointer,
                            },
                            Action::None,
                        )
                    }
                }
            }
            Interaction::OrbitDragging { last_pointer } => {
                if !input.primary {
                    debug!("orbit drag released");
                    return Transition::to(Interaction::Idle, Action::None);
                }
                let delta = input.pointer - *last_pointer;
                let action = if delta == Vec2::ZERO {
                    Action::None
                } else {
                    Action::Orbit(orbit_delta(delta, config.orbit_divisor))
                };
                Transition::to(
                    Interaction::OrbitDragging {
                        last_pointer: input.pointer,
                    },
                    action,
                )
            }
            Interaction::LayerDragging(drag) => {
                let turn = drag.turn_at(input.pointer, config.layer_divisor);
                if !input.primary {
                    debug!("layer drag released at theta {:.3}", turn.theta);
                    return Transition::to(Interaction::Idle, Action::Commit(turn));
                }
                let mut drag = drag.clone();
                if input.secondary && !drag.secondary_reported {
                    warn!("secondary button during a layer drag is not supported, ignoring");
                    drag.secondary_reported = true;
                } else if !input.secondary {
                    drag.secondary_reported = false;
                }
                Transition::to(Interaction::LayerDragging(drag), Action::Turn(turn))
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}
