//! Mapping observer directions to region addresses.
//!
//! The face grid resolution and in-cell tessellation are chosen from the
//! observer distance so that the patch under the observer covers roughly
//! `area_size` world units and its triangles roughly `triangle_size`.

use glam::DVec3;
use orrery_math::{SphericalQuad, slerp};
use orrery_mesh::EdgeMesh;
use tracing::warn;

use crate::region::Region;

/// Upper bound on the face grid exponent; a face never splits finer than
/// `2^MAX_DIVIDER_POWER` cells per side.
pub const MAX_DIVIDER_POWER: i32 = 5;

/// Locate the region under `vector_to_center`.
///
/// `vector_to_center` points from the sphere center towards the observer in
/// the sphere's local frame; it need not be normalized. `radius` scales the
/// unit reference mesh to world units. `area_size` is the target world-space
/// extent of one cell and `triangle_size` the target extent of one triangle
/// inside it.
#[must_use]
pub fn locate(
    mesh: &EdgeMesh,
    vector_to_center: DVec3,
    radius: f64,
    area_size: f64,
    triangle_size: f64,
) -> Region {
    let polygon = mesh.nearest_polygon(vector_to_center);

    let power = ((mesh.min_side_length(polygon) * radius / area_size)
        .log2()
        .round() as i32)
        .clamp(0, MAX_DIVIDER_POWER);
    let divider = 1 << power;

    let mut sector = mesh.quad(polygon);
    let mut x = 0;
    let mut y = 0;

    if sector.contains(vector_to_center) {
        for _ in 0..power {
            let right = slerp(sector.right_top(), sector.right_bottom(), 0.5);
            let bottom = slerp(sector.right_bottom(), sector.left_bottom(), 0.5);
            let left = slerp(sector.left_bottom(), sector.left_top(), 0.5);
            let top = slerp(sector.left_top(), sector.right_top(), 0.5);

            let vertical_normal = bottom.cross(top);
            let horizontal_normal = right.cross(left);

            let x_bit = i32::from(vector_to_center.dot(vertical_normal) > 0.0);
            let y_bit = i32::from(vector_to_center.dot(horizontal_normal) > 0.0);

            sector.cut(x_bit, y_bit, 2);
            x = 2 * x + x_bit;
            y = 2 * y + y_bit;
        }
    } else {
        // Numerically on a face boundary the nearest face can miss the
        // direction; fall back to the corner cell rather than descending
        // with inconsistent bits.
        warn!(
            polygon,
            ?vector_to_center,
            "direction outside nearest face, falling back to corner cell"
        );
    }

    let subdivider = (mesh.max_side_length(polygon) * radius / f64::from(divider) / triangle_size)
        .log2()
        .round() as i32;

    Region::new(polygon, divider, x, y, subdivider)
}

/// The spherical quad covering `region` on the unit reference mesh.
#[must_use]
pub fn sector(mesh: &EdgeMesh, region: &Region) -> SphericalQuad {
    let mut quad = mesh.quad(region.polygon);
    quad.cut(region.x, region.y, region.divider);
    quad
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_for(sector: &SphericalQuad) -> DVec3 {
        let sum: DVec3 = sector.corners().iter().copied().sum();
        sum / 4.0
    }

    #[test]
    fn test_locate_roundtrips_through_sector_center() {
        let mesh = EdgeMesh::cube();
        for power in 0..=3 {
            let divider = 1 << power;
            // Pick area_size so that min_side * radius / area_size = divider.
            let area_size = mesh.min_side_length(0) / f64::from(divider);
            for polygon in 0..mesh.polygons.len() {
                for x in 0..divider {
                    for y in 0..divider {
                        let region = Region::new(polygon, divider, x, y, 0);
                        let probe = probe_for(&sector(&mesh, &region));
                        let found = locate(&mesh, probe, 1.0, area_size, 10.0);
                        assert_eq!(found.polygon, polygon);
                        assert_eq!(found.divider, divider);
                        assert_eq!((found.x, found.y), (x, y), "{region}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_divider_grows_as_area_size_shrinks() {
        let mesh = EdgeMesh::cube();
        let probe = DVec3::new(0.1, 0.2, -1.0);
        let mut last_divider = 0;
        let mut area_size = mesh.min_side_length(0) * 2.0;
        for _ in 0..8 {
            let region = locate(&mesh, probe, 1.0, area_size, 10.0);
            assert!(region.divider >= last_divider);
            last_divider = region.divider;
            area_size /= 2.0;
        }
        assert_eq!(last_divider, 1 << MAX_DIVIDER_POWER);
    }

    #[test]
    fn test_divider_clamped_to_max_power() {
        let mesh = EdgeMesh::cube();
        let region = locate(&mesh, DVec3::NEG_Z, 1.0, 1e-9, 10.0);
        assert_eq!(region.divider, 1 << MAX_DIVIDER_POWER);
    }

    #[test]
    fn test_subdivider_can_be_negative_for_coarse_triangles() {
        let mesh = EdgeMesh::cube();
        let region = locate(&mesh, DVec3::NEG_Z, 1.0, mesh.min_side_length(0), 100.0);
        assert!(region.subdivider < 0);
    }

    #[test]
    fn test_seam_direction_falls_back_to_corner_cell() {
        let mesh = EdgeMesh::cube();
        // Exactly between two faces the edge-plane dot is zero, so the
        // nearest face rejects the direction and the descent is skipped.
        let seam = DVec3::new(1.0, 0.0, -1.0).normalize();
        let area_size = mesh.min_side_length(0) / 8.0;
        let region = locate(&mesh, seam, 1.0, area_size, 10.0);
        assert_eq!((region.x, region.y), (0, 0));
        assert_eq!(region.divider, 8);
        assert!(region.is_in_grid());
    }

    #[test]
    fn test_locate_is_deterministic() {
        let mesh = EdgeMesh::cube();
        let probe = DVec3::new(0.3, -0.1, -0.9);
        let a = locate(&mesh, probe, 10.0, 2.0, 0.5);
        let b = locate(&mesh, probe, 10.0, 2.0, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_face_selection_by_dominant_axis() {
        let mesh = EdgeMesh::cube();
        let region = locate(&mesh, DVec3::NEG_Z, 1.0, 1.0, 1.0);
        let quad = mesh.quad(region.polygon);
        for corner in quad.corners() {
            assert!(corner.z < 0.0);
        }
    }
}
