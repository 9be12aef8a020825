//! Software-rendered N×N×N twisty cube.
//!
//! Everything from scan conversion to hit-testing runs on the CPU: faces are
//! filled into a color buffer alongside a per-pixel object-id buffer, painted
//! back to front, and the id under the pointer decides what a drag grabs.
//! Windowing and event delivery are left to the caller, which feeds a
//! [`FrameInput`] to [`Scene::render_frame`] each frame and presents the
//! returned [`Canvas`].

pub mod canvas;
pub mod config;
pub mod cube;
pub mod error;
pub mod frame;
pub mod graphics;
pub mod interaction;
pub mod math;
pub mod pick;
pub mod quad;
pub mod sort;
pub mod state;

pub use canvas::{Canvas, RowOrder};
pub use config::Config;
pub use cube::{BigCube, Face, LayerTurn, SubCube};
pub use error::CubeError;
pub use frame::Scene;
pub use interaction::{Action, Interaction, LayerDrag};
pub use math::{Mat3, Quat, Rotation, Vec2, Vec3};
pub use pick::PickTarget;
pub use state::FrameInput;
