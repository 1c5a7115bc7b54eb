use std::time::Duration;

use twolink_core::LinkLengths;

use crate::render::{Stroke, Style, Viewport};

/// Twolink global configuration.
#[derive(Clone, Debug, Default)]
pub struct GlobalConfig {
    /// Name of the binary.
    pub bin_name: String,

    /// Whether the application runs as daemon.
    pub daemon: bool,
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct ArmConfig {
    /// Length of the anchor link.
    pub anchor_length: f32,
    /// Length of the floating link.
    pub floating_length: f32,
}

impl ArmConfig {
    /// Validated link lengths.
    pub fn links(&self) -> crate::runtime::Result<LinkLengths> {
        LinkLengths::new(self.anchor_length, self.floating_length).ok_or(
            crate::Error::InvalidLinkLength(self.anchor_length, self.floating_length),
        )
    }
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            anchor_length: 100.0,
            floating_length: 100.0,
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Distance between the anchor and the bottom edge.
    pub anchor_offset: f32,
}

impl ViewportConfig {
    /// Validated viewport.
    pub fn viewport(&self) -> crate::runtime::Result<Viewport> {
        let valid = |v: f32| v.is_finite() && v > 0.0;

        if valid(self.width) && valid(self.height) {
            Ok(Viewport::new(self.width, self.height))
        } else {
            Err(crate::Error::InvalidViewport(self.width, self.height))
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            anchor_offset: crate::consts::DEFAULT_ANCHOR_OFFSET,
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Rest target relative to the anchor.
    pub start: [f32; 2],
    /// Reach target relative to the anchor.
    pub end: [f32; 2],
    /// Anchor joint duration in milliseconds.
    pub anchor_duration: u64,
    /// Floating joint duration in milliseconds.
    pub floating_duration: u64,
    /// Frame refresh interval in milliseconds.
    pub refresh_interval: u64,
}

impl AnimationConfig {
    #[inline]
    pub fn anchor_duration(&self) -> Duration {
        Duration::from_millis(self.anchor_duration)
    }

    #[inline]
    pub fn floating_duration(&self) -> Duration {
        Duration::from_millis(self.floating_duration)
    }

    /// Frame refresh interval, never shorter than one millisecond.
    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval.max(1))
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start: [150.0, -50.0],
            end: [50.0, 100.0],
            anchor_duration: 1_000,
            floating_duration: 1_000,
            refresh_interval: crate::consts::DEFAULT_REFRESH_INTERVAL.as_millis() as u64,
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// Background colour.
    pub background: String,
    /// Stroke of the anchor link.
    pub anchor_link: Stroke,
    /// Stroke of the floating link.
    pub floating_link: Stroke,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = Style::default();

        Self {
            background: style.background,
            anchor_link: style.anchor_link,
            floating_link: style.floating_link,
        }
    }
}

impl From<StyleConfig> for Style {
    fn from(config: StyleConfig) -> Self {
        Self {
            background: config.background,
            anchor_link: config.anchor_link,
            floating_link: config.floating_link,
        }
    }
}

/// Twolink configuration.
#[derive(Clone, Debug, Default, serde_derive::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arm geometry.
    pub arm: ArmConfig,
    /// Viewport configuration.
    pub viewport: ViewportConfig,
    /// Timeline configuration.
    pub animation: AnimationConfig,
    /// Stroke and background style.
    pub style: StyleConfig,
}
