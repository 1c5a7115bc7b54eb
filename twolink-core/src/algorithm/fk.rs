use nalgebra::{Point2, Vector2};

use crate::{ArmPose, LinkLengths};

/// Joint endpoints relative to the anchor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointPositions {
    /// End of the anchor link.
    pub elbow: Point2<f32>,
    /// End of the floating link.
    pub effector: Point2<f32>,
}

pub struct ForwardKinematics {
    l1: f32,
    l2: f32,
}

impl ForwardKinematics {
    pub fn new(links: LinkLengths) -> Self {
        Self {
            l1: links.anchor,
            l2: links.floating,
        }
    }

    /// Project the pose onto the plane.
    ///
    /// Points are relative to the anchor with the y-axis pointing up.
    pub fn solve(&self, pose: &ArmPose) -> JointPositions {
        let theta_1 = pose.anchor.to_radians();
        let theta_2 = pose.floating_absolute().to_radians();

        let elbow = Point2::new(self.l1 * theta_1.cos(), self.l1 * theta_1.sin());
        let effector = elbow + Vector2::new(self.l2 * theta_2.cos(), self.l2 * theta_2.sin());

        JointPositions { elbow, effector }
    }
}
