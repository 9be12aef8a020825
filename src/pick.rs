//! Hit-testing through the object-id buffer.
//!
//! Every drawn face writes `cube_id * 6 + face_index`; since cube ids start at
//! 1, id 0 stays free for the background.

use crate::canvas::Canvas;
use crate::cube::Face;
use crate::math::Vec2;

/// A sub-cube face under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickTarget {
    pub cube_id: u32,
    pub face: Face,
}

impl PickTarget {
    pub fn new(cube_id: u32, face: Face) -> Self {
        PickTarget { cube_id, face }
    }

    pub fn encode(self) -> u32 {
        self.cube_id * 6 + self.face.index() as u32
    }

    /// `None` for the background
    pub fn decode(id: u32) -> Option<PickTarget> {
        let cube_id = id / 6;
        if cube_id == 0 {
            return None;
        }
        let face = Face::from_index((id % 6) as usize)?;
        Some(PickTarget { cube_id, face })
    }
}

/// Reads the id under `pointer` from a completed frame
pub fn pick(canvas: &Canvas, pointer: Vec2) -> Option<PickTarget> {
    let id = canvas.id_at(pointer.x.floor() as i64, pointer.y.floor() as i64);
    PickTarget::decode(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RowOrder;

    #[test]
    fn ids_round_trip_through_the_encoding() {
        for cube_id in [1, 5, 27, 729] {
            for face in Face::ALL {
                let target = PickTarget::new(cube_id, face);
                assert_eq!(PickTarget::decode(target.encode()), Some(target));
            }
        }
    }

    #[test]
    fn background_ids_decode_to_none() {
        for id in 0..6 {
            assert_eq!(PickTarget::decode(id), None);
        }
    }

    #[test]
    fn pick_reads_the_id_buffer() {
        let mut canvas = Canvas::new(10, 10, RowOrder::TopDown);
        let target = PickTarget::new(5, Face::Front);
        canvas.set_surface_pixel(3, 4, 0xFFFFFF, target.encode());
        assert_eq!(pick(&canvas, Vec2::new(3.6, 4.2)), Some(target));
        assert_eq!(pick(&canvas, Vec2::new(4.0, 4.0)), None);
        assert_eq!(pick(&canvas, Vec2::new(-3.0, 40.0)), None);
    }
}
