use nalgebra::{Point2, Vector2};

pub use self::logger::LogRenderer;
pub use self::trace::TraceRenderer;

mod logger;
mod trace;

#[cfg(test)]
pub(crate) mod testing;

/// Drawing surface dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Mapping between anchor relative coordinates and screen coordinates.
///
/// Anchor relative coordinates have the y-axis pointing up, screen
/// coordinates grow downwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    viewport: Viewport,
    anchor: Point2<f32>,
}

impl Projection {
    /// Place the anchor horizontally centered, `anchor_offset` pixels above
    /// the bottom edge of the viewport.
    pub fn new(viewport: Viewport, anchor_offset: f32) -> Self {
        Self {
            viewport,
            anchor: Point2::new(0.5 * viewport.width, viewport.height - anchor_offset),
        }
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Anchor position in screen coordinates.
    #[inline]
    pub fn anchor(&self) -> Point2<f32> {
        self.anchor
    }

    /// Convert an anchor relative point to screen coordinates.
    #[inline]
    pub fn to_screen(&self, point: &Point2<f32>) -> Point2<f32> {
        Point2::new(self.anchor.x + point.x, self.anchor.y - point.y)
    }

    /// Convert a screen position to a target offset relative to the anchor.
    #[inline]
    pub fn to_target(&self, screen: &Point2<f32>) -> Vector2<f32> {
        Vector2::new(screen.x - self.anchor.x, self.anchor.y - screen.y)
    }
}

/// Line stroke.
#[derive(Clone, Debug, PartialEq, serde_derive::Deserialize)]
pub struct Stroke {
    /// Colour name understood by the renderer.
    pub color: String,
    /// Line width in pixels.
    pub width: f32,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub background: String,
    pub anchor_link: Stroke,
    pub floating_link: Stroke,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: "black".to_string(),
            anchor_link: Stroke::new("red", 10.0),
            floating_link: Stroke::new("blue", 10.0),
        }
    }
}

/// Which link a segment represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Anchor to elbow.
    Anchor,
    /// Elbow to effector.
    Floating,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Anchor => write!(f, "anchor"),
            Segment::Floating => write!(f, "floating"),
        }
    }
}

/// Drawing surface.
///
/// A frame consists of a single call to `clear` followed by one call to
/// `draw_segment` per link.
pub trait Renderer {
    /// Fill the viewport with the background colour.
    fn clear(&mut self, viewport: &Viewport, background: &str);

    /// Draw a straight line in screen coordinates.
    fn draw_segment(
        &mut self,
        segment: Segment,
        from: &Point2<f32>,
        to: &Point2<f32>,
        stroke: &Stroke,
    );
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn clear(&mut self, viewport: &Viewport, background: &str) {
        (**self).clear(viewport, background)
    }

    fn draw_segment(
        &mut self,
        segment: Segment,
        from: &Point2<f32>,
        to: &Point2<f32>,
        stroke: &Stroke,
    ) {
        (**self).draw_segment(segment, from, to, stroke)
    }
}

/// Timeline position widget.
pub trait ScrubControl {
    /// Reflect the normalized timeline progress.
    fn set_value(&mut self, fraction: f32);
}

impl<S: ScrubControl + ?Sized> ScrubControl for Box<S> {
    fn set_value(&mut self, fraction: f32) {
        (**self).set_value(fraction)
    }
}
