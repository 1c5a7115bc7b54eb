// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

pub mod algorithm;
pub mod math;

mod pose;

pub use self::pose::{ArmPose, LinkLengths};

/// Kinematic constants.
pub mod consts {
    /// Distances below this are treated as the anchor itself.
    pub const KINEMATIC_EPSILON: f32 = 1e-4;
}
