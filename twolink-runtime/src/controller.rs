use std::time::{Duration, Instant};

use nalgebra::{Point2, Vector2};
use twolink_core::{
    algorithm::{ForwardKinematics, InverseKinematics},
    math::shortest_rotation,
    ArmPose, LinkLengths,
};

use crate::{
    interpolation::InterpolationSpec,
    render::{Projection, Renderer, ScrubControl, Segment, Style},
};

/// Control path currently owning the pose.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// The pose follows the timeline.
    Timeline,
    /// The pose follows the pointer.
    Manual,
}

impl std::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlMode::Timeline => write!(f, "timeline"),
            ControlMode::Manual => write!(f, "manual"),
        }
    }
}

/// Playback state of the timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimelineState {
    /// Frames are requested until the timeline completes.
    Running,
    /// The timeline reached its end.
    Finished,
    /// Playback was revoked by pointer input before the end.
    Cancelled,
}

/// Handle to a requested animation frame.
///
/// Only the most recently issued request is honoured. Revoking the request
/// turns any tick still carrying it into a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

/// Outcome of a frame tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The frame was drawn and another frame is requested.
    Continue(FrameRequest),
    /// The frame was drawn and the timeline completed.
    Finished,
    /// The request was revoked or superseded, nothing was drawn.
    Stale,
}

/// Arm state shared by the pointer, scrub and frame handlers.
///
/// Every handler runs to completion and ends with a redraw. The pointer and
/// the timeline both write the pose; the control mode decides which one a
/// pending frame tick is allowed to overwrite.
pub struct ArmController {
    ik: InverseKinematics,
    fk: ForwardKinematics,
    projection: Projection,
    style: Style,
    spec: InterpolationSpec,
    pose: ArmPose,
    elapsed: Duration,
    mode: ControlMode,
    state: TimelineState,
    last_tick: Option<Instant>,
    pending: Option<FrameRequest>,
    request_sequence: u64,
}

impl ArmController {
    /// Construct the controller.
    ///
    /// The rest and reach targets are solved once and form the timeline.
    pub fn new(
        links: LinkLengths,
        projection: Projection,
        style: Style,
        (rest, reach): (Vector2<f32>, Vector2<f32>),
        (anchor_duration, floating_duration): (Duration, Duration),
    ) -> Self {
        let ik = InverseKinematics::new(links);

        let start = ik.solve(&rest);
        let end = ik.solve(&reach);

        log::debug!("Arm links: {}", links);
        log::debug!("Rest pose:  {}", start);
        log::debug!("Reach pose: {}", end);

        let spec = InterpolationSpec::from_poses(start, end, anchor_duration, floating_duration);

        Self {
            ik,
            fk: ForwardKinematics::new(links),
            projection,
            style,
            spec,
            pose: start,
            elapsed: Duration::ZERO,
            mode: ControlMode::Timeline,
            state: TimelineState::Running,
            last_tick: None,
            pending: None,
            request_sequence: 0,
        }
    }

    /// Construct the controller from the configuration.
    pub fn from_config(config: &crate::Config) -> crate::runtime::Result<Self> {
        let links = config.arm.links()?;
        let viewport = config.viewport.viewport()?;

        let animation = &config.animation;

        Ok(Self::new(
            links,
            Projection::new(viewport, config.viewport.anchor_offset),
            config.style.clone().into(),
            (
                Vector2::new(animation.start[0], animation.start[1]),
                Vector2::new(animation.end[0], animation.end[1]),
            ),
            (animation.anchor_duration(), animation.floating_duration()),
        ))
    }

    #[inline]
    pub fn pose(&self) -> &ArmPose {
        &self.pose
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    #[inline]
    pub fn spec(&self) -> &InterpolationSpec {
        &self.spec
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The frame request the next tick must carry, if any.
    #[inline]
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.request_sequence += 1;

        let request = FrameRequest(self.request_sequence);
        self.pending = Some(request);
        request
    }

    fn revoke_frame(&mut self) {
        if let Some(request) = self.pending.take() {
            log::debug!("Revoked frame request {:?}", request);
        }
    }

    /// Start the timeline.
    ///
    /// Draws the current pose and requests the first frame.
    pub fn start<R: Renderer + ?Sized>(
        &mut self,
        now: Instant,
        renderer: &mut R,
    ) -> FrameRequest {
        log::info!(
            "Starting timeline of {} ms",
            self.spec.max_duration().as_millis()
        );

        self.last_tick = Some(now);
        self.set_from_interpolation();
        self.draw(renderer);

        self.request_frame()
    }

    /// Set the pose from the timeline at the current elapsed time.
    pub fn set_from_interpolation(&mut self) {
        let pose = self.spec.pose_at(self.elapsed);

        log::trace!(
            "Timeline {:5} ms: {} (Δ anchor {:.2}°)",
            self.elapsed.as_millis(),
            pose,
            shortest_rotation(pose.anchor - self.pose.anchor)
        );

        self.pose = pose;
    }

    /// Seek the timeline to a normalized position.
    ///
    /// Seeking hands control back to the timeline but does not restart a
    /// finished or cancelled playback.
    pub fn on_scrub_input<R: Renderer + ?Sized>(&mut self, fraction: f32, renderer: &mut R) {
        if !fraction.is_finite() {
            log::warn!("Ignoring scrub input {}", fraction);
            return;
        }

        self.elapsed = self.spec.seek(fraction);
        self.mode = ControlMode::Timeline;

        log::debug!(
            "Scrub to {:.2} ({} ms)",
            fraction,
            self.elapsed.as_millis()
        );

        self.set_from_interpolation();
        self.draw(renderer);
    }

    /// Point the arm at a screen position.
    ///
    /// The pointer takes over the pose and revokes pending timeline frames.
    pub fn on_pointer<R: Renderer + ?Sized>(&mut self, screen: &Point2<f32>, renderer: &mut R) {
        let target = self.projection.to_target(screen);

        self.on_pointer_target(&target, renderer)
    }

    /// Point the arm at a target relative to the anchor.
    pub fn on_pointer_target<R: Renderer + ?Sized>(
        &mut self,
        target: &Vector2<f32>,
        renderer: &mut R,
    ) {
        if self.mode != ControlMode::Manual {
            log::debug!("Switching to {} control", ControlMode::Manual);
        }

        self.mode = ControlMode::Manual;

        if self.pending.is_some() {
            self.revoke_frame();

            if self.state == TimelineState::Running {
                self.state = TimelineState::Cancelled;
            }
        }

        self.pose = self.ik.solve(target);
        self.draw(renderer);
    }

    /// Advance the timeline by the wall-clock time since the previous tick.
    pub fn frame_tick<R, S>(
        &mut self,
        request: FrameRequest,
        now: Instant,
        renderer: &mut R,
        scrub: &mut S,
    ) -> Tick
    where
        R: Renderer + ?Sized,
        S: ScrubControl + ?Sized,
    {
        if self.pending != Some(request) || self.mode != ControlMode::Timeline {
            log::trace!("Dropping stale frame request {:?}", request);
            return Tick::Stale;
        }

        self.pending = None;

        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.elapsed += dt;

        scrub.set_value(self.spec.progress(self.elapsed));

        self.set_from_interpolation();
        self.draw(renderer);

        if self.spec.is_complete(self.elapsed) {
            log::info!("Timeline finished after {} ms", self.elapsed.as_millis());

            self.state = TimelineState::Finished;
            Tick::Finished
        } else {
            Tick::Continue(self.request_frame())
        }
    }

    /// Draw the arm in its current pose.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let joints = self.fk.solve(&self.pose);

        let anchor = self.projection.anchor();
        let elbow = self.projection.to_screen(&joints.elbow);
        let effector = self.projection.to_screen(&joints.effector);

        renderer.clear(self.projection.viewport(), &self.style.background);
        renderer.draw_segment(Segment::Anchor, &anchor, &elbow, &self.style.anchor_link);
        renderer.draw_segment(
            Segment::Floating,
            &elbow,
            &effector,
            &self.style.floating_link,
        );
    }
}
