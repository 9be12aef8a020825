use crate::canvas::Canvas;
use crate::math::{Vec2, Vec3};
use crate::quad::{Quad2, Quad3};

/// Orthographic projection: drops z
pub fn project_to_screen(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}

pub fn project_quad(quad: &Quad3) -> Quad2 {
    Quad2::new(quad.p.map(project_to_screen))
}

/// Fills a convex quad, writing `color` and `id` for every pixel whose center
/// lies inside it.
///
/// Quads failing the winding check are skipped and `false` is returned; this
/// is how faces turned away from the viewer are culled.
pub fn fill_convex_quad(canvas: &mut Canvas, quad: &Quad2, color: u32, id: u32) -> bool {
    if !quad.is_valid() {
        return false;
    }

    // Compute bounding box of the quad, clamped to the canvas
    let (min_x, min_y, max_x, max_y) = quad.bounds();
    let min_x = min_x.max(0);
    let min_y = min_y.max(0);
    let max_x = max_x.min(canvas.width() as i64 - 1);
    let max_y = max_y.min(canvas.height() as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if quad.contains(center) {
                canvas.set_surface_pixel(x, y, color, id);
            }
        }
    }
    true
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm.
///
/// Only the color buffer is written; edges are not pickable.
pub fn draw_line(canvas: &mut Canvas, from: Vec2, to: Vec2, color: u32) {
    let (mut x0, mut y0, x1, y1) = (
        from.x.floor() as i64,
        from.y.floor() as i64,
        to.x.floor() as i64,
        to.y.floor() as i64,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        canvas.set_pixel(x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
