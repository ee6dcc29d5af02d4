//! Region addressing on a cube-sphere: mapping observer directions to
//! quad-tree cell addresses and resolving neighbours across face seams.

mod addressing;
mod neighbours;
mod region;

pub use addressing::{MAX_DIVIDER_POWER, locate, sector};
pub use neighbours::{NEIGHBOUR_OFFSETS, self_and_neighbours};
pub use region::Region;
