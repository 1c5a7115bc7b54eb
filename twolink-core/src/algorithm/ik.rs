use nalgebra::Vector2;

use crate::{consts::KINEMATIC_EPSILON, math::law_of_cosines, ArmPose, LinkLengths};

/// Reachability of a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reach {
    /// The effector can be placed on the target.
    Reachable,
    /// The target lies beyond the combined link length.
    Unreachable,
    /// The target coincides with the anchor.
    Degenerate,
}

pub struct InverseKinematics {
    l1: f32,
    l2: f32,
}

impl InverseKinematics {
    pub fn new(links: LinkLengths) -> Self {
        Self {
            l1: links.anchor,
            l2: links.floating,
        }
    }

    /// Classify the target offset.
    pub fn reach(&self, target: &Vector2<f32>) -> Reach {
        let r = target.norm();

        if r > self.l1 + self.l2 {
            Reach::Unreachable
        } else if r < KINEMATIC_EPSILON {
            Reach::Degenerate
        } else {
            Reach::Reachable
        }
    }

    /// Solve the joint angles for a target offset relative to the anchor.
    ///
    /// Targets out of reach are approximated by pointing the fully extended
    /// arm at the target. A target on the anchor folds the arm as far as
    /// the link lengths allow with the anchor link at 0°.
    pub fn solve(&self, target: &Vector2<f32>) -> ArmPose {
        let (dz, dy) = (target.x, target.y);

        // R is the leg between the anchor and the target.
        let r = target.norm();
        log::trace!("IK Vector length R: {:.2}", r);

        match self.reach(target) {
            Reach::Unreachable => {
                log::warn!("Target ({:.2}, {:.2}) is out of reach", dz, dy);

                ArmPose::new(dy.atan2(dz).to_degrees(), 0.0)
            }
            Reach::Degenerate => {
                log::debug!("Target coincides with anchor, folding arm");

                let lambda = law_of_cosines(self.l1, self.l2, 0.0);

                ArmPose::new(0.0, 180.0 - lambda.to_degrees())
            }
            Reach::Reachable => {
                let theta = dy.atan2(dz);
                log::trace!(
                    "IK theta:          {:5.2}rad {:5.2}°",
                    theta,
                    theta.to_degrees()
                );
                let kappa = law_of_cosines(self.l1, r, self.l2);
                log::trace!(
                    "IK kappa:          {:5.2}rad {:5.2}°",
                    kappa,
                    kappa.to_degrees()
                );
                let lambda = law_of_cosines(self.l1, self.l2, r);
                log::trace!(
                    "IK lambda:         {:5.2}rad {:5.2}°",
                    lambda,
                    lambda.to_degrees()
                );

                ArmPose::new(
                    (theta + kappa).to_degrees(),
                    (std::f32::consts::PI - lambda).to_degrees(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::ForwardKinematics;

    const TOLERANCE: f32 = 0.01;

    fn solvers(links: LinkLengths) -> (InverseKinematics, ForwardKinematics) {
        (InverseKinematics::new(links), ForwardKinematics::new(links))
    }

    #[test]
    fn test_ik_round_trip() {
        let (ik, fk) = solvers(LinkLengths::default());

        let targets = [
            (150.0, -50.0),
            (50.0, 100.0),
            (-120.0, 30.0),
            (0.0, 199.0),
            (10.0, 0.0),
            (-80.0, -140.0),
        ];

        for (dz, dy) in targets {
            let target = Vector2::new(dz, dy);
            let pose = ik.solve(&target);
            let joints = fk.solve(&pose);

            assert!(pose.is_finite());
            assert!(
                (joints.effector.coords - target).norm() < TOLERANCE,
                "target ({}, {}) projected to {}",
                dz,
                dy,
                joints.effector
            );
        }
    }

    #[test]
    fn test_ik_round_trip_unequal_links() {
        let (ik, fk) = solvers(LinkLengths::new(120.0, 60.0).unwrap());

        let target = Vector2::new(90.0, 70.0);
        let joints = fk.solve(&ik.solve(&target));

        assert!((joints.effector.coords - target).norm() < TOLERANCE);
    }

    #[test]
    fn test_ik_reach_boundary() {
        let (ik, _) = solvers(LinkLengths::default());

        let target = Vector2::new(120.0, 160.0);
        assert_eq!(ik.reach(&target), Reach::Reachable);

        let pose = ik.solve(&target);

        assert!(pose.floating.abs() < TOLERANCE);
        assert!((pose.anchor - 160.0_f32.atan2(120.0).to_degrees()).abs() < TOLERANCE);
    }

    #[test]
    fn test_ik_unreachable() {
        let (ik, _) = solvers(LinkLengths::default());

        for scale in [1.01, 2.0, 50.0, 1e6] {
            let target = Vector2::new(-30.0, 40.0) * (200.0 / 50.0) * scale;
            assert_eq!(ik.reach(&target), Reach::Unreachable);

            let pose = ik.solve(&target);

            assert_eq!(pose.floating, 0.0);
            assert!((pose.anchor - 40.0_f32.atan2(-30.0).to_degrees()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_ik_degenerate() {
        let (ik, _) = solvers(LinkLengths::default());

        let target = Vector2::zeros();
        assert_eq!(ik.reach(&target), Reach::Degenerate);

        let pose = ik.solve(&target);

        assert!(pose.is_finite());
        assert_eq!(pose.anchor, 0.0);
        assert!((pose.floating - 180.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_ik_inside_inner_radius() {
        let (ik, fk) = solvers(LinkLengths::new(100.0, 40.0).unwrap());

        // Closer than |L1 - L2|, the arm folds completely towards the target.
        let target = Vector2::new(0.0, 30.0);
        let pose = ik.solve(&target);

        assert!(pose.is_finite());
        assert!((pose.floating - 180.0).abs() < TOLERANCE);
        assert!((fk.solve(&pose).effector.coords.norm() - 60.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_ik_default_scenario() {
        let (ik, _) = solvers(LinkLengths::default());

        let start = Vector2::new(150.0, -50.0);
        assert!(start.norm() <= 200.0);
        assert_eq!(ik.reach(&start), Reach::Reachable);

        let pose = ik.solve(&start);
        let theta = (-50.0_f32).atan2(150.0);
        let kappa = law_of_cosines(100.0, start.norm(), 100.0);
        let lambda = law_of_cosines(100.0, 100.0, start.norm());

        assert!((pose.anchor - (theta + kappa).to_degrees()).abs() < TOLERANCE);
        assert!((pose.floating - (180.0 - lambda.to_degrees())).abs() < TOLERANCE);
        // 180° - acos(-0.25)
        assert!((pose.floating - 75.5225).abs() < TOLERANCE);

        let end = Vector2::new(50.0, 100.0);
        assert_eq!(ik.reach(&end), Reach::Reachable);

        let pose = ik.solve(&end);
        let theta = 100.0_f32.atan2(50.0);
        let kappa = law_of_cosines(100.0, end.norm(), 100.0);
        let lambda = law_of_cosines(100.0, 100.0, end.norm());

        assert!((pose.anchor - (theta + kappa).to_degrees()).abs() < TOLERANCE);
        assert!((pose.floating - (180.0 - lambda.to_degrees())).abs() < TOLERANCE);
        // 180° - acos(0.375)
        assert!((pose.floating - 112.0243).abs() < TOLERANCE);
    }
}
