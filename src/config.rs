use crate::canvas::{rgb, RowOrder};
use crate::error::CubeError;
use clap::Parser;

/// Largest supported grid dimension
pub const MAX_GRID_SIZE: usize = 9;

/// Sticker colors, indexed by [`crate::cube::Face::index`]
pub const FACE_PALETTE: [u32; 6] = [
    rgb(0xFF, 0xFF, 0xFF), // Up: white
    rgb(0xFF, 0xD5, 0x00), // Down: yellow
    rgb(0xFF, 0x58, 0x00), // Left: orange
    rgb(0xC4, 0x1E, 0x3A), // Right: red
    rgb(0x00, 0x9E, 0x60), // Front: green
    rgb(0x00, 0x51, 0xBA), // Back: blue
];

pub const BACKGROUND_COLOR: u32 = 0xAAAAAA;
pub const EDGE_COLOR: u32 = rgb(0, 0, 0);
pub const HIGHLIGHT_COLOR: u32 = rgb(0xFF, 0x00, 0xFF);

/// Everything the core needs to know up front
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sub-cubes per edge (N)
    pub grid_size: usize,
    /// Half side length of the whole assembly, in pixels
    pub assembly_radius: f64,
    /// Pixels of drag per radian of layer turn
    pub layer_divisor: f64,
    /// Pixels of drag per radian of orbit
    pub orbit_divisor: f64,
    pub row_order: RowOrder,
    pub palette: [u32; 6],
    pub background: u32,
    pub edge_color: u32,
    pub highlight_color: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 3,
            assembly_radius: 18.0,
            layer_divisor: 50.0,
            orbit_divisor: 100.0,
            row_order: RowOrder::TopDown,
            palette: FACE_PALETTE,
            background: BACKGROUND_COLOR,
            edge_color: EDGE_COLOR,
            highlight_color: HIGHLIGHT_COLOR,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CubeError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(CubeError::InvalidGridSize {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if !(self.assembly_radius.is_finite() && self.assembly_radius > 0.0) {
            return Err(CubeError::InvalidRadius(self.assembly_radius));
        }
        for (name, value) in [("layer", self.layer_divisor), ("orbit", self.orbit_divisor)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CubeError::InvalidDivisor { name, value });
            }
        }
        Ok(())
    }

    /// Half side length of one sub-cube
    pub fn cube_radius(&self) -> f64 {
        self.assembly_radius / self.grid_size as f64
    }
}

/// A console-based software-rendered twisty cube
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Sub-cubes per edge
    #[arg(short = 'n', long, default_value_t = 3)]
    pub size: usize,

    /// Half side length of the assembly in pixels (a terminal cell is 1×2 pixels)
    #[arg(short, long, default_value_t = 18.0)]
    pub radius: f64,

    /// Drag distance in pixels per radian of layer turn
    #[arg(long, default_value_t = 50.0)]
    pub layer_divisor: f64,

    /// Drag distance in pixels per radian of orbit
    #[arg(long, default_value_t = 100.0)]
    pub orbit_divisor: f64,

    /// Event poll interval between frames, in milliseconds
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,
}

impl Args {
    pub fn to_config(&self) -> Config {
        Config {
            grid_size: self.size,
            assembly_radius: self.radius,
            layer_divisor: self.layer_divisor,
            orbit_divisor: self.orbit_divisor,
            ..Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(Config::default().cube_radius(), 6.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = Config {
            grid_size: 0,
            ..Config::default()
        };
        assert!(matches!(zero.validate(), Err(CubeError::InvalidGridSize { size: 0, .. })));

        let flat = Config {
            assembly_radius: -1.0,
            ..Config::default()
        };
        assert_eq!(flat.validate(), Err(CubeError::InvalidRadius(-1.0)));

        let frozen = Config {
            orbit_divisor: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            frozen.validate(),
            Err(CubeError::InvalidDivisor { name: "orbit", .. })
        ));
    }

    #[test]
    fn args_map_onto_config() {
        let args = Args::parse_from(["cubeturn", "-n", "4", "--radius", "30", "--layer-divisor", "25"]);
        let config = args.to_config();
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.assembly_radius, 30.0);
        assert_eq!(config.layer_divisor, 25.0);
        assert_eq!(config.orbit_divisor, 100.0);
    }
}
