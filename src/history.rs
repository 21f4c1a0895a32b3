use std::sync::Arc;

use crate::error::{CanvasError, CanvasResult, HistoryDirection};
use crate::stroke::{StrokePath, StrokeRef};

/// Read-only, ordered view of the visible strokes, oldest first
pub type StrokeSnapshot = Arc<[StrokeRef]>;

/// Committed strokes plus the redo buffer for whole-stroke undo/redo.
///
/// A stroke lives in at most one of the two stacks. Committing after an
/// undo discards the redo buffer.
#[derive(Debug, Default)]
pub struct HistoryStack {
    /// Strokes currently visible
    committed: Vec<StrokeRef>,
    /// Strokes removed by undo, most recently undone last
    redo_buffer: Vec<StrokeRef>,
    /// Bumped on every successful mutation
    revision: u64,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, stroke: StrokePath) -> StrokeRef {
        let stroke = Arc::new(stroke);
        log::debug!(
            "Commit stroke {} (discarding {} redo entries)",
            stroke.id(),
            self.redo_buffer.len()
        );
        self.committed.push(Arc::clone(&stroke));
        self.redo_buffer.clear(); // Clear redo stack when a new stroke is committed
        self.revision += 1;
        stroke
    }

    /// Moves the newest committed stroke to the redo buffer and returns it
    pub fn undo(&mut self) -> CanvasResult<StrokeRef> {
        let stroke = self
            .committed
            .pop()
            .ok_or(CanvasError::EmptyHistory(HistoryDirection::Undo))?;
        log::debug!("Undo stroke {}", stroke.id());
        self.redo_buffer.push(Arc::clone(&stroke));
        self.revision += 1;
        Ok(stroke)
    }

    /// Moves the most recently undone stroke back on top of the committed list
    pub fn redo(&mut self) -> CanvasResult<StrokeRef> {
        let stroke = self
            .redo_buffer
            .pop()
            .ok_or(CanvasError::EmptyHistory(HistoryDirection::Redo))?;
        log::debug!("Redo stroke {}", stroke.id());
        self.committed.push(Arc::clone(&stroke));
        self.revision += 1;
        Ok(stroke)
    }

    /// Copy of the committed list that later mutations cannot affect
    pub fn snapshot_visible(&self) -> StrokeSnapshot {
        self.committed.iter().cloned().collect()
    }

    /// Borrowed view for same-thread rendering
    pub fn committed(&self) -> &[StrokeRef] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[StrokeRef] {
        &self.redo_buffer
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
