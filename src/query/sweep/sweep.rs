use crate::math::{Point, Real, UnitVector};
use crate::shape::FeatureId;

/// The result of a sweep of a sphere or capsule against a shape.
///
/// All the geometric data are expressed in world-space.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SweepIntersection {
    /// The fraction of the motion after which the swept shape touches the target. A swept
    /// shape already overlapping the target hits at time zero.
    pub time_of_impact: Real,
    /// The contact point on the target surface.
    pub point: Point<Real>,
    /// The outward normal of the target at the contact point.
    ///
    /// Unreliable when `time_of_impact` is zero.
    pub normal: UnitVector<Real>,
    /// The feature of the target that was hit.
    pub feature: FeatureId,
}

impl SweepIntersection {
    /// Keeps the closest of `self` and `other`.
    pub fn closest(self, other: Option<Self>) -> Self {
        match other {
            Some(other) if other.time_of_impact < self.time_of_impact => other,
            _ => self,
        }
    }
}
