//! Neighbourhood resolution around a region, across face seams.
//!
//! Cardinal neighbours that stay inside the face grid are plain coordinate
//! offsets. Stepping off the grid crosses a face seam: the coordinates wrap
//! and are remapped by the rotation between the two faces' edge frames.
//! Diagonal steps off the grid split into one-seam and corner cases; at a
//! mesh corner the diagonal is replaced by every other face meeting that
//! vertex.

use orrery_mesh::{AdjacentPolygon, EdgeMesh};

use crate::region::Region;

/// Cell offsets per edge slot: right, bottom, left, top.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

fn offset_region(region: Region, dx: i32, dy: i32) -> Region {
    Region::new(
        region.polygon,
        region.divider,
        region.x + dx,
        region.y + dy,
        region.subdivider,
    )
}

/// Remap an off-grid step onto the face across `adjacent`.
///
/// Coordinates wrap modulo the grid, then rotate by the shift between the
/// faces' edge frames.
fn cross_face(region: Region, dx: i32, dy: i32, adjacent: AdjacentPolygon) -> Region {
    let d = region.divider;
    let x = (region.x + dx).rem_euclid(d);
    let y = (region.y + dy).rem_euclid(d);
    let (x, y) = match adjacent.edge_shift.rem_euclid(4) {
        0 => (x, y),
        1 => (d - 1 - y, x),
        2 => (d - 1 - x, d - 1 - y),
        _ => (y, d - 1 - x),
    };
    Region::new(adjacent.polygon, d, x, y, region.subdivider)
}

/// The region itself followed by its resolved neighbours.
///
/// Emits up to nine regions: self, four cardinals, and the diagonal
/// candidates. A cardinal across a boundary edge with no adjacent face is
/// skipped. At a vertex where only three faces meet the diagonal slot
/// contributes nothing.
#[must_use]
pub fn self_and_neighbours(mesh: &EdgeMesh, region: Region) -> Vec<Region> {
    let d = region.divider;
    let in_range = |v: i32| (0..d).contains(&v);

    let mut out = Vec::with_capacity(9);
    out.push(region);

    for (slot, &(dx, dy)) in NEIGHBOUR_OFFSETS.iter().enumerate() {
        if in_range(region.x + dx) && in_range(region.y + dy) {
            out.push(offset_region(region, dx, dy));
        } else if let Some(adjacent) = mesh.adjacent_polygon(region.polygon, slot) {
            out.push(cross_face(region, dx, dy, adjacent));
        }
    }

    for slot0 in 0..4 {
        let slot1 = (slot0 + 1) % 4;
        let (dx0, dy0) = NEIGHBOUR_OFFSETS[slot0];
        let (dx1, dy1) = NEIGHBOUR_OFFSETS[slot1];
        let (dx, dy) = (dx0 + dx1, dy0 + dy1);
        let valid0 = in_range(region.x + dx0) && in_range(region.y + dy0);
        let valid1 = in_range(region.x + dx1) && in_range(region.y + dy1);

        match (valid0, valid1) {
            (true, true) => out.push(offset_region(region, dx, dy)),
            (false, true) => {
                if let Some(adjacent) = mesh.adjacent_polygon(region.polygon, slot0) {
                    out.push(cross_face(region, dx, dy, adjacent));
                }
                // Near a seam the unwrapped diagonal still names a distinct
                // sector; its quad degenerates to the seam when sampled.
                out.push(offset_region(region, dx, dy));
            }
            (true, false) => {
                if let Some(adjacent) = mesh.adjacent_polygon(region.polygon, slot1) {
                    out.push(cross_face(region, dx, dy, adjacent));
                }
            }
            (false, false) => {
                let across0 = mesh.adjacent_polygon(region.polygon, slot0).map(|a| a.polygon);
                let across1 = mesh.adjacent_polygon(region.polygon, slot1).map(|a| a.polygon);
                for adjacent in mesh.polygons_by_vertex(region.polygon, slot1) {
                    if adjacent.polygon == region.polygon
                        || Some(adjacent.polygon) == across0
                        || Some(adjacent.polygon) == across1
                    {
                        continue;
                    }
                    out.push(cross_face(region, dx, dy, adjacent));
                }
            }
        }
    }

    out
}
