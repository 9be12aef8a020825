use crate::math::Vec2;

/// Input sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer in bitmap coordinates (origin bottom-left)
    pub pointer: Vec2,
    /// Primary (left) button held
    pub primary: bool,
    /// Secondary (right) button held
    pub secondary: bool,
}

impl FrameInput {
    pub fn new(pointer: Vec2, primary: bool, secondary: bool) -> Self {
        FrameInput {
            pointer,
            primary,
            secondary,
        }
    }

    /// Pointer at rest with no buttons held
    pub fn hover(x: f64, y: f64) -> Self {
        FrameInput::new(Vec2::new(x, y), false, false)
    }

    /// Pointer with the primary button held
    pub fn press(x: f64, y: f64) -> Self {
        FrameInput::new(Vec2::new(x, y), true, false)
    }
}
