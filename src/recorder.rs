use crate::brush::BrushState;
use crate::error::{CanvasError, CanvasResult};
use crate::stroke::{Point, StrokeBuilder, StrokePath};

/// Turns one pointer-down..pointer-up gesture into a [`StrokePath`].
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    // Transient state: the stroke being drawn (if any)
    current: Option<StrokeBuilder>,
}

fn is_finite(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Starts a stroke at `point` with a copy of `brush`.
    ///
    /// Returns false without touching state if a stroke is already in progress
    /// or the point is not finite.
    pub fn begin_stroke(&mut self, point: Point, brush: &BrushState) -> bool {
        if self.current.is_some() {
            log::debug!("Ignoring pointer down while a stroke is in progress");
            return false;
        }
        if !is_finite(point) {
            log::warn!("Ignoring non-finite stroke start {:?}", point);
            return false;
        }
        let builder = StrokeBuilder::new(point, brush.color(), brush.width());
        log::debug!("Begin stroke {} at {:?}", builder.id(), point);
        self.current = Some(builder);
        true
    }

    /// Appends a sample to the active stroke.
    ///
    /// `Ok(false)` means the sample was dropped (repeat of the last point or not
    /// finite) and nothing needs redrawing.
    pub fn extend_stroke(&mut self, point: Point) -> CanvasResult<bool> {
        let stroke = self.current.as_mut().ok_or(CanvasError::NoActiveStroke)?;
        if !is_finite(point) {
            log::warn!("Dropping non-finite stroke sample {:?}", point);
            return Ok(false);
        }
        if stroke.last_point() == Some(point) {
            return Ok(false);
        }
        stroke.add_point(point);
        Ok(true)
    }

    /// Finishes the active stroke, or `None` when nothing was being recorded
    pub fn end_stroke(&mut self) -> Option<StrokePath> {
        let stroke = self.current.take()?.finish();
        log::debug!("End stroke {} with {} points", stroke.id(), stroke.points().len());
        Some(stroke)
    }

    pub fn in_progress(&self) -> Option<&StrokeBuilder> {
        self.current.as_ref()
    }

    pub fn is_recording(&self) -> bool {
        self.current.is_some()
    }
}
