use egui::{Color32, Pos2, Rect};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CanvasError, CanvasResult};

/// Surface coordinates of a sampled pointer position
pub type Point = Pos2;

/// Identity of a recorded stroke, stable across undo/redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    id: StrokeId,
    points: Vec<Point>,
    color: Color32,
    width: f32,
}

// Define a reference-counted type alias for StrokePath
pub type StrokeRef = Arc<StrokePath>;

pub(crate) fn validate_width(width: f32) -> CanvasResult<f32> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(CanvasError::InvalidBrushWidth(width))
    }
}

impl StrokePath {
    /// Builds a finished stroke. A stroke needs at least one point and a positive width.
    pub fn new(color: Color32, width: f32, points: Vec<Point>) -> CanvasResult<Self> {
        if points.is_empty() {
            return Err(CanvasError::EmptyStroke);
        }
        Ok(Self {
            id: StrokeId::new(),
            points,
            color,
            width: validate_width(width)?,
        })
    }

    pub fn new_ref(color: Color32, width: f32, points: Vec<Point>) -> CanvasResult<StrokeRef> {
        Self::new(color, width, points).map(Arc::new)
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// True when every point coincides, so the stroke renders as a dot
    pub fn is_dot(&self) -> bool {
        self.points.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Area touched by the stroke, including the brush radius
    pub fn bounds(&self) -> Rect {
        Rect::from_points(&self.points).expand(self.width / 2.0)
    }
}

/// Mutable stroke for the gesture currently being drawn.
///
/// Color and width are fixed at construction; only points are appended.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    id: StrokeId,
    points: Vec<Point>,
    color: Color32,
    width: f32,
}

impl StrokeBuilder {
    pub fn new(start: Point, color: Color32, width: f32) -> Self {
        Self {
            id: StrokeId::new(),
            points: vec![start],
            color,
            width,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    // Convert to an immutable StrokePath, keeping the id
    pub fn finish(self) -> StrokePath {
        StrokePath {
            id: self.id,
            points: self.points,
            color: self.color,
            width: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_stroke_requires_points() {
        let result = StrokePath::new(Color32::RED, 5.0, Vec::new());
        assert!(matches!(result, Err(CanvasError::EmptyStroke)));
    }

    #[test]
    fn test_stroke_rejects_bad_width() {
        for width in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let result = StrokePath::new(Color32::RED, width, vec![pos2(1.0, 1.0)]);
            assert!(matches!(result, Err(CanvasError::InvalidBrushWidth(_))));
        }
    }

    #[test]
    fn test_single_point_is_dot() {
        let stroke = StrokePath::new(Color32::RED, 4.0, vec![pos2(3.0, 3.0)]).unwrap();
        assert!(stroke.is_dot());
        let rect = stroke.bounds();
        assert_eq!(rect.min, pos2(1.0, 1.0));
        assert_eq!(rect.max, pos2(5.0, 5.0));
    }

    #[test]
    fn test_builder_keeps_id_and_order() {
        let mut builder = StrokeBuilder::new(pos2(0.0, 0.0), Color32::BLUE, 2.0);
        builder.add_point(pos2(1.0, 0.0));
        builder.add_point(pos2(2.0, 0.0));
        let id = builder.id();

        let stroke = builder.finish();
        assert_eq!(stroke.id(), id);
        assert_eq!(stroke.points(), &[pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(2.0, 0.0)]);
        assert!(!stroke.is_dot());
    }
}
