use nalgebra::Point2;

use super::{Renderer, Segment, Stroke, Viewport};

/// Renderer recording every segment to a CSV trace.
///
/// Each row holds the frame number, the segment and its screen coordinates.
pub struct TraceRenderer<W: std::io::Write> {
    writer: csv::Writer<W>,
    frame: u64,
    /// First row that failed to write.
    error: Option<csv::Error>,
}

impl TraceRenderer<std::fs::File> {
    /// Create the trace file, truncating any existing file.
    pub fn create<P: AsRef<std::path::Path>>(path: P) -> crate::runtime::Result<Self> {
        Self::from_writer(csv::Writer::from_path(path)?)
    }
}

impl<W: std::io::Write> TraceRenderer<W> {
    /// Wrap a CSV writer and emit the header row.
    pub fn from_writer(mut writer: csv::Writer<W>) -> crate::runtime::Result<Self> {
        writer.write_record([
            "frame", "segment", "from_x", "from_y", "to_x", "to_y", "color", "width",
        ])?;

        Ok(Self {
            writer,
            frame: 0,
            error: None,
        })
    }

    /// Number of frames drawn.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Flush buffered rows to the underlying writer.
    ///
    /// Fails if any row was dropped since the previous flush.
    pub fn flush(&mut self) -> crate::runtime::Result {
        self.writer.flush().map_err(crate::Error::Io)?;

        match self.error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> crate::runtime::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }

        self.writer
            .into_inner()
            .map_err(|e| crate::Error::Io(e.into_error()))
    }
}

impl<W: std::io::Write> Renderer for TraceRenderer<W> {
    fn clear(&mut self, _viewport: &Viewport, _background: &str) {
        self.frame += 1;
    }

    fn draw_segment(
        &mut self,
        segment: Segment,
        from: &Point2<f32>,
        to: &Point2<f32>,
        stroke: &Stroke,
    ) {
        let record = [
            self.frame.to_string(),
            segment.to_string(),
            format!("{:.3}", from.x),
            format!("{:.3}", from.y),
            format!("{:.3}", to.x),
            format!("{:.3}", to.y),
            stroke.color.clone(),
            stroke.width.to_string(),
        ];

        if let Err(e) = self.writer.write_record(&record) {
            log::error!("Failed to write trace: {}", e);

            self.error.get_or_insert(e);
        }
    }
}
