use nalgebra::Point2;

use super::{Renderer, ScrubControl, Segment, Stroke, Viewport};

/// Renderer writing every frame to the log.
#[derive(Default)]
pub struct LogRenderer {
    frame: u64,
    /// Last value written by the timeline, in whole percent.
    progress: Option<u8>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Renderer for LogRenderer {
    fn clear(&mut self, viewport: &Viewport, background: &str) {
        self.frame += 1;

        log::trace!(
            "Frame {:4} clear {}x{} {}",
            self.frame,
            viewport.width,
            viewport.height,
            background
        );
    }

    fn draw_segment(
        &mut self,
        segment: Segment,
        from: &Point2<f32>,
        to: &Point2<f32>,
        stroke: &Stroke,
    ) {
        log::debug!(
            "Frame {:4} {:<8} ({:7.2}, {:7.2}) ⇒ ({:7.2}, {:7.2}) {} {:.1}px",
            self.frame,
            segment,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke.color,
            stroke.width
        );
    }
}

impl ScrubControl for LogRenderer {
    fn set_value(&mut self, fraction: f32) {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0) as u8;

        // Report every tenth, the timeline writes on every frame.
        if self.progress.map_or(true, |last| percent / 10 != last / 10) {
            log::info!("Timeline at {:3}%", percent);
        }

        self.progress = Some(percent);
    }
}
