//! The region address value type.

use std::fmt;

/// Address of one LOD patch on the reference mesh.
///
/// `polygon` selects a face of the reference mesh; `divider` is the
/// power-of-two resolution of that face's cell grid; `(x, y)` is the cell in
/// the `divider × divider` grid; `subdivider` is the extra tessellation
/// exponent applied inside the cell.
///
/// Regions are immutable values with structural equality on all five fields
/// and are used directly as cache keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Face polygon index in the reference mesh.
    pub polygon: usize,
    /// Power-of-two grid resolution of the face.
    pub divider: i32,
    /// Cell column, `0..divider` for in-face regions.
    pub x: i32,
    /// Cell row, `0..divider` for in-face regions.
    pub y: i32,
    /// Tessellation exponent inside the cell; non-positive means none.
    pub subdivider: i32,
}

impl Region {
    /// Create a region address.
    #[must_use]
    pub fn new(polygon: usize, divider: i32, x: i32, y: i32, subdivider: i32) -> Self {
        Self {
            polygon,
            divider,
            x,
            y,
            subdivider,
        }
    }

    /// Whether the cell coordinates lie inside the face grid.
    ///
    /// Diagonal resolution near a seam can emit candidates outside the grid;
    /// their sectors degenerate onto the seam.
    #[must_use]
    pub fn is_in_grid(&self) -> bool {
        (0..self.divider).contains(&self.x) && (0..self.divider).contains(&self.y)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) of {} on face {}, subdivider {}",
            self.x, self.y, self.divider, self.polygon, self.subdivider
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(region: &Region) -> u64 {
        let mut hasher = DefaultHasher::new();
        region.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_is_structural_on_all_fields() {
        let region = Region::new(2, 4, 1, 3, 2);
        assert_eq!(region, Region::new(2, 4, 1, 3, 2));
        assert_ne!(region, Region::new(3, 4, 1, 3, 2));
        assert_ne!(region, Region::new(2, 8, 1, 3, 2));
        assert_ne!(region, Region::new(2, 4, 0, 3, 2));
        assert_ne!(region, Region::new(2, 4, 1, 0, 2));
        assert_ne!(region, Region::new(2, 4, 1, 3, 0));
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let a = Region::new(2, 4, 1, 3, 2);
        let b = Region::new(2, 4, 1, 3, 2);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_grid_bounds() {
        assert!(Region::new(0, 4, 0, 3, 0).is_in_grid());
        assert!(!Region::new(0, 4, 4, 3, 0).is_in_grid());
        assert!(!Region::new(0, 4, 0, -1, 0).is_in_grid());
    }

    #[test]
    fn test_display_names_the_cell() {
        let region = Region::new(1, 8, 5, 2, 3);
        assert_eq!(region.to_string(), "(5, 2) of 8 on face 1, subdivider 3");
    }
}
