use crate::math::Vec3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CubeError {
    #[error("rotation axis must be one of ±X, ±Y, ±Z, got {axis:?}")]
    InvalidAxis { axis: Vec3 },

    #[error("grid size must be between 1 and {max}, got {size}")]
    InvalidGridSize { size: usize, max: usize },

    #[error("assembly radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("{name} divisor must be positive and finite, got {value}")]
    InvalidDivisor { name: &'static str, value: f64 },

    #[error("no sub-cube with id {0}")]
    UnknownSubCube(u32),
}
