// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `twolink` library drives a two-link planar arm.
///
/// The arm is either pointed at a target through inverse kinematics or
/// animated along a timeline between two solved poses. Every change to the
/// pose is projected onto the viewport and handed to a renderer.
///
/// The `controller` module owns the arm state and implements the input
/// handlers. The `interpolation` module describes the timeline. The `render`
/// module provides the projection, the renderer contract and the renderers
/// shipped with the runtime. The `runtime` module contains the player loop
/// and the error type.
pub mod controller;
pub mod interpolation;
pub mod render;

mod config;

pub use self::config::*;

pub use twolink_core as core;

pub mod runtime;
pub use self::runtime::Error;
pub use self::runtime::Player;

/// Twolink runtime module containing various constants.
pub mod consts {
    use std::time::Duration;

    /// Twolink runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use twolink::consts::VERSION;
    ///
    /// println!("Twolink runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Default frame refresh interval.
    ///
    /// # Remarks
    ///
    /// Roughly matches a 60Hz display refresh.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(16);

    /// Default distance between the anchor and the bottom of the viewport.
    pub const DEFAULT_ANCHOR_OFFSET: f32 = 250.0;

    /// Twolink input queue size.
    pub const QUEUE_SIZE_INPUT: usize = 16;
}

/// Load a configuration from a TOML file.
pub fn from_file<T, P>(path: P) -> runtime::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<std::path::Path>,
{
    let contents = std::fs::read_to_string(path).map_err(Error::Io)?;

    toml::from_str(&contents).map_err(Error::Config)
}
