/// Fixed link lengths of the arm.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkLengths {
    /// Length of the link pivoting at the anchor.
    pub anchor: f32,
    /// Length of the link pivoting at the end of the anchor link.
    pub floating: f32,
}

impl LinkLengths {
    /// Construct the link lengths.
    ///
    /// Returns `None` if either length is not a strictly positive finite number.
    pub fn new(anchor: f32, floating: f32) -> Option<Self> {
        let valid = |length: f32| length.is_finite() && length > 0.0;

        if valid(anchor) && valid(floating) {
            Some(Self { anchor, floating })
        } else {
            None
        }
    }

    /// Maximum distance from the anchor the end effector can reach.
    #[inline]
    pub fn reach(&self) -> f32 {
        self.anchor + self.floating
    }
}

impl Default for LinkLengths {
    fn default() -> Self {
        Self {
            anchor: 100.0,
            floating: 100.0,
        }
    }
}

impl std::fmt::Display for LinkLengths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Anchor link: {:.2}; Floating link: {:.2}",
            self.anchor, self.floating
        )
    }
}

/// Joint configuration of the arm.
///
/// Both angles are in degrees. The floating angle is the bend relative to
/// the anchor link, not an absolute world angle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArmPose {
    /// Angle of the anchor link.
    pub anchor: f32,
    /// Bend of the floating link relative to the anchor link.
    pub floating: f32,
}

impl ArmPose {
    pub fn new(anchor: f32, floating: f32) -> Self {
        Self { anchor, floating }
    }

    /// Absolute angle of the floating link.
    #[inline]
    pub fn floating_absolute(&self) -> f32 {
        self.anchor - self.floating
    }

    /// Check that both angles are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.anchor.is_finite() && self.floating.is_finite()
    }
}

impl std::fmt::Display for ArmPose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Anchor: {:.2}rad {:.2}°; Floating: {:.2}rad {:.2}°",
            self.anchor.to_radians(),
            self.anchor,
            self.floating.to_radians(),
            self.floating,
        )
    }
}
