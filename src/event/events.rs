use crate::compositor::ExportedImage;
use crate::stroke::StrokeId;

/// Signals the drawing core emits to the shell
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Visible state changed; the surface should be rendered again
    SurfaceNeedsRedraw,
    /// Advisory availability of the undo/redo controls
    HistoryAvailabilityChanged {
        can_undo: bool,
        can_redo: bool,
    },
    StrokeCommitted {
        id: StrokeId,
    },
    ExportCompleted(ExportedImage),
    ExportFailed {
        reason: String,
    },
}
