//! Color buffer paired with a per-pixel object-id buffer.
//!
//! Coordinates are bitmap coordinates: origin at the bottom-left, y grows
//! upward. The storage row order is configurable so the presentation side can
//! blit rows in whatever order its device expects.

/// Packs 8-bit channels into the `0x00RRGGBB` pixel format
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Splits a `0x00RRGGBB` pixel into its channels
pub const fn channels(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Id written where no surface was drawn
pub const BACKGROUND_ID: u32 = 0;

/// Order of rows in [`Canvas::pixels`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// First stored row is the top of the image
    #[default]
    TopDown,
    /// First stored row is the bottom of the image (y = 0)
    BottomUp,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    row_order: RowOrder,
    pixels: Vec<u32>,
    ids: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, row_order: RowOrder) -> Self {
        Canvas {
            width,
            height,
            row_order,
            pixels: vec![0; width * height],
            ids: vec![BACKGROUND_ID; width * height],
        }
    }

    /// Discards both buffers and allocates fresh ones of the new size
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height];
        self.ids = vec![BACKGROUND_ID; width * height];
    }

    /// Fills the color buffer with `color` and resets every id to background
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
        self.ids.fill(BACKGROUND_ID);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    /// Row-major color buffer in the configured row order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Row-major id buffer in the configured row order
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Storage index of a bitmap coordinate, `None` when out of bounds
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let row = match self.row_order {
            RowOrder::TopDown => self.height - 1 - y,
            RowOrder::BottomUp => y,
        };
        Some(row * self.width + x)
    }

    /// Writes a color without touching the id buffer
    pub fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
        }
    }

    /// Writes color and id together
    pub fn set_surface_pixel(&mut self, x: i64, y: i64, color: u32, id: u32) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
            self.ids[offset] = id;
        }
    }

    /// Color at a bitmap coordinate, 0 when out of bounds
    pub fn pixel_at(&self, x: i64, y: i64) -> u32 {
        self.offset(x, y).map_or(0, |offset| self.pixels[offset])
    }

    /// Object id at a bitmap coordinate, background when out of bounds
    pub fn id_at(&self, x: i64, y: i64) -> u32 {
        self.offset(x, y).map_or(BACKGROUND_ID, |offset| self.ids[offset])
    }
}
