use nalgebra::Point2;

use super::{Renderer, ScrubControl, Segment, Stroke, Viewport};

/// Renderer keeping all drawn segments in memory.
#[derive(Default)]
pub(crate) struct Recorder {
    pub(crate) frames: Vec<Vec<(Segment, Point2<f32>, Point2<f32>)>>,
}

impl Recorder {
    pub(crate) fn last_frame(&self) -> &[(Segment, Point2<f32>, Point2<f32>)] {
        self.frames.last().map_or(&[], |frame| frame.as_slice())
    }
}

impl Renderer for Recorder {
    fn clear(&mut self, _viewport: &Viewport, _background: &str) {
        self.frames.push(Vec::new());
    }

    fn draw_segment(
        &mut self,
        segment: Segment,
        from: &Point2<f32>,
        to: &Point2<f32>,
        _stroke: &Stroke,
    ) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push((segment, *from, *to));
        }
    }
}

impl ScrubControl for Vec<f32> {
    fn set_value(&mut self, fraction: f32) {
        self.push(fraction);
    }
}
