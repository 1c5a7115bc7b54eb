use std::time::Duration;

use twolink_core::{math::lerp, ArmPose};

/// Linear motion of a single joint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointInterpolation {
    /// Angle at the start of the timeline.
    pub start: f32,
    /// Angle once the duration has passed.
    pub end: f32,
    /// Time to travel from start to end.
    pub duration: Duration,
}

impl JointInterpolation {
    pub fn new(start: f32, end: f32, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    /// Normalized progress, clamped to `[0, 1]`.
    ///
    /// A zero duration is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Joint angle after the elapsed time.
    #[inline]
    pub fn angle(&self, elapsed: Duration) -> f32 {
        lerp(self.start, self.end, self.progress(elapsed))
    }
}

/// Timeline between a rest pose and a reach pose.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterpolationSpec {
    pub anchor: JointInterpolation,
    pub floating: JointInterpolation,
}

impl InterpolationSpec {
    /// Construct the timeline from two solved poses.
    pub fn from_poses(
        start: ArmPose,
        end: ArmPose,
        anchor_duration: Duration,
        floating_duration: Duration,
    ) -> Self {
        Self {
            anchor: JointInterpolation::new(start.anchor, end.anchor, anchor_duration),
            floating: JointInterpolation::new(start.floating, end.floating, floating_duration),
        }
    }

    /// Duration of the slowest joint.
    #[inline]
    pub fn max_duration(&self) -> Duration {
        self.anchor.duration.max(self.floating.duration)
    }

    /// Normalized timeline progress, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let total = self.max_duration();

        if total.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
        }
    }

    /// Elapsed time for a normalized position on the timeline.
    ///
    /// The fraction is clamped to `[0, 1]`, NaN seeks to the start.
    pub fn seek(&self, fraction: f32) -> Duration {
        if fraction.is_nan() {
            return Duration::ZERO;
        }

        self.max_duration().mul_f32(fraction.clamp(0.0, 1.0))
    }

    /// Check if the timeline has passed its end.
    #[inline]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.max_duration()
    }

    /// Interpolated pose after the elapsed time.
    pub fn pose_at(&self, elapsed: Duration) -> ArmPose {
        ArmPose::new(self.anchor.angle(elapsed), self.floating.angle(elapsed))
    }
}
