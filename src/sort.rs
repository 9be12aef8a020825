//! Back-to-front ordering of sub-cubes for the painter's algorithm.
//!
//! There is no z-buffer: the rasterizer's last write wins, so a sub-cube must
//! be painted after everything it may cover. Larger z is nearer the viewer.

use crate::cube::SubCube;
use crate::math::Vec3;

/// Stable insertion sort of `order` by ascending `key`
pub fn insertion_sort_by_key<T: Copy>(order: &mut [T], key: impl Fn(T) -> f64) {
    for i in 1..order.len() {
        let item = order[i];
        let item_key = key(item);
        let mut j = i;
        while j > 0 && key(order[j - 1]) > item_key {
            order[j] = order[j - 1];
            j -= 1;
        }
        order[j] = item;
    }
}

/// Indices into `cubes`, farthest first.
///
/// Without a layer turn the key is each final center's z. With one, `axis` is
/// the turn axis in screen space: cubes are bucketed into slices by their
/// distance from `screen_center` along it, slices are painted by the z of
/// their representative point `screen_center + distance * axis`, and cubes
/// within a slice fall back to their own z.
pub fn back_to_front(cubes: &[SubCube], layer_axis: Option<Vec3>, screen_center: Vec3) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cubes.len()).collect();
    insertion_sort_by_key(&mut order, |i| cubes[i].center_final.z);

    let Some(axis) = layer_axis else {
        return order;
    };
    let Some(radius) = cubes.first().map(|cube| cube.radius) else {
        return order;
    };

    let along = |i: usize| (cubes[i].center_final - screen_center).dot(axis);
    let mut by_distance = order.clone();
    insertion_sort_by_key(&mut by_distance, along);

    // Consecutive cubes closer than one radius along the axis share a slice.
    let mut slices: Vec<(f64, Vec<usize>)> = Vec::new();
    for i in by_distance {
        let distance = along(i);
        match slices.last_mut() {
            Some((first, members)) if distance - *first < radius => members.push(i),
            _ => slices.push((distance, vec![i])),
        }
    }

    let representative_z = |distance: f64| screen_center.z + distance * axis.z;
    let mut slice_order: Vec<usize> = (0..slices.len()).collect();
    insertion_sort_by_key(&mut slice_order, |s| representative_z(slices[s].0));

    let mut result = Vec::with_capacity(cubes.len());
    for s in slice_order {
        let members = &mut slices[s].1;
        insertion_sort_by_key(members, |i| cubes[i].center_final.z);
        result.extend_from_slice(members);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::BigCube;
    use crate::math::Mat3;

    #[test]
    fn insertion_sort_is_stable() {
        let mut items = [(3, 1.0), (1, 0.0), (2, 1.0), (4, -1.0), (5, 1.0)];
        insertion_sort_by_key(&mut items, |(_, key)| key);
        let ids: Vec<i32> = items.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![4, 1, 3, 2, 5]);
    }

    #[test]
    fn plain_sort_is_ascending_in_z() {
        let mut cube = BigCube::new(3, 10.0);
        cube.orbit(Mat3::rotate_x(0.4) * Mat3::rotate_y(-0.9));
        cube.update_positions(Vec3::new(100.0, 100.0, 0.0));
        let order = back_to_front(cube.cubes(), None, Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(order.len(), 27);
        for (position, &a) in order.iter().enumerate() {
            for &b in &order[position + 1..] {
                let (za, zb) = (cube.cubes()[a].center_final.z, cube.cubes()[b].center_final.z);
                assert!(za <= zb);
            }
        }
    }

    #[test]
    fn layer_sort_keeps_slices_together() {
        let center = Vec3::new(100.0, 100.0, 0.0);
        let mut cube = BigCube::new(3, 10.0);
        cube.orbit(Mat3::rotate_x(0.5) * Mat3::rotate_y(0.6));
        cube.set_turn(&crate::cube::LayerTurn {
            anchor: 14,
            axis: Vec3::Y,
            theta: 0.7,
        })
        .unwrap();
        cube.update_positions(center);
        let axis = cube.orbit_rotation * Vec3::Y;
        let order = back_to_front(cube.cubes(), Some(axis), center);
        assert_eq!(order.len(), 27);

        // Slices appear as three contiguous runs of nine.
        let slice_of = |i: usize| cube.cubes()[i].center_base.y;
        for run in order.chunks(9) {
            assert!(run.iter().all(|&i| slice_of(i) == slice_of(run[0])));
        }
        // The rotating middle slice sits between the other two.
        assert!(order[9..18].iter().all(|&i| cube.cubes()[i].is_rotating));
        // The Y axis tilts toward the viewer here, so -Y is painted first.
        assert!(axis.z > 0.0);
        assert_eq!(slice_of(order[0]), -20.0);
    }
}
