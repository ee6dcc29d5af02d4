//! A quad patch on the sphere, stored as four corner direction vectors.

use glam::DVec3;

use crate::slerp;

/// A quadrilateral patch of the sphere described by its four corner vectors,
/// ordered `[right-top, right-bottom, left-bottom, left-top]`.
///
/// Edge slot `k` runs from corner `k` to corner `k + 1` (wrapping), so slot 0
/// is the right edge, slot 1 the bottom, slot 2 the left and slot 3 the top.
/// The in-quad `x` axis grows from the left edge to the right edge and `y`
/// from the bottom edge to the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalQuad {
    corners: [DVec3; 4],
}

impl SphericalQuad {
    /// Build a quad from corners in `[right-top, right-bottom, left-bottom,
    /// left-top]` order.
    #[must_use]
    pub fn new(corners: [DVec3; 4]) -> Self {
        Self { corners }
    }

    /// Corner vectors in slot order.
    #[must_use]
    pub fn corners(&self) -> [DVec3; 4] {
        self.corners
    }

    /// The right-top corner (slot 0).
    #[must_use]
    pub fn right_top(&self) -> DVec3 {
        self.corners[0]
    }

    /// The right-bottom corner (slot 1).
    #[must_use]
    pub fn right_bottom(&self) -> DVec3 {
        self.corners[1]
    }

    /// The left-bottom corner (slot 2).
    #[must_use]
    pub fn left_bottom(&self) -> DVec3 {
        self.corners[2]
    }

    /// The left-top corner (slot 3).
    #[must_use]
    pub fn left_top(&self) -> DVec3 {
        self.corners[3]
    }

    /// Normal of the plane through the origin and the left edge.
    ///
    /// Points into the quad: a direction inside the patch has a positive
    /// dot product with it.
    #[must_use]
    pub fn left_normal(&self) -> DVec3 {
        self.left_bottom().cross(self.left_top())
    }

    /// Normal of the plane through the origin and the right edge.
    /// A direction inside the patch has a negative dot product with it.
    #[must_use]
    pub fn right_normal(&self) -> DVec3 {
        self.right_bottom().cross(self.right_top())
    }

    /// Normal of the plane through the origin and the bottom edge
    /// (positive dot product inside).
    #[must_use]
    pub fn bottom_normal(&self) -> DVec3 {
        self.right_bottom().cross(self.left_bottom())
    }

    /// Normal of the plane through the origin and the top edge
    /// (negative dot product inside).
    #[must_use]
    pub fn top_normal(&self) -> DVec3 {
        self.right_top().cross(self.left_top())
    }

    /// Whether `direction` points into the spherical wedge spanned by this
    /// quad, tested against the four half-spaces of its edge planes.
    #[must_use]
    pub fn contains(&self, direction: DVec3) -> bool {
        direction.dot(self.left_normal()) > 0.0
            && direction.dot(self.right_normal()) < 0.0
            && direction.dot(self.bottom_normal()) > 0.0
            && direction.dot(self.top_normal()) < 0.0
    }

    /// Narrow the quad to the vertical strip `x` of `divider` equal columns,
    /// interpolating along great arcs.
    pub fn cut_by_x(&mut self, x: i32, divider: i32) {
        let divider = f64::from(divider);
        let hi = f64::from(x + 1) / divider;
        let lo = f64::from(x) / divider;

        let rt = slerp(self.left_top(), self.right_top(), hi);
        let rb = slerp(self.left_bottom(), self.right_bottom(), hi);
        let lb = slerp(self.left_bottom(), self.right_bottom(), lo);
        let lt = slerp(self.left_top(), self.right_top(), lo);

        self.corners = [rt, rb, lb, lt];
    }

    /// Narrow the quad to the horizontal strip `y` of `divider` equal rows.
    pub fn cut_by_y(&mut self, y: i32, divider: i32) {
        let divider = f64::from(divider);
        let hi = f64::from(y + 1) / divider;
        let lo = f64::from(y) / divider;

        let rt = slerp(self.right_bottom(), self.right_top(), hi);
        let rb = slerp(self.right_bottom(), self.right_top(), lo);
        let lb = slerp(self.left_bottom(), self.left_top(), lo);
        let lt = slerp(self.left_bottom(), self.left_top(), hi);

        self.corners = [rt, rb, lb, lt];
    }

    /// Narrow the quad to cell `(x, y)` of a `divider × divider` grid.
    pub fn cut(&mut self, x: i32, y: i32, divider: i32) {
        self.cut_by_x(x, divider);
        self.cut_by_y(y, divider);
    }
}
