use thiserror::Error;

/// Errors produced by the drawing core.
///
/// `NoActiveStroke` and `EmptyHistory` describe harmless no-ops: the state is left
/// exactly as it was and the shell usually ignores them.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Extend/end was called while no stroke is being recorded
    #[error("no stroke is being recorded")]
    NoActiveStroke,

    /// Undo or redo at a history boundary
    #[error("nothing to {0}")]
    EmptyHistory(HistoryDirection),

    /// A surface or export was requested with a zero or unrepresentable size
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: u32, height: u32 },

    /// The raster could not be serialized
    #[error("failed to encode image: {0}")]
    EncodingFailure(String),

    #[error("invalid brush width {0}, expected a finite positive value")]
    InvalidBrushWidth(f32),

    #[error("invalid color tag {0:?}")]
    InvalidColor(String),

    #[error("stroke has no points")]
    EmptyStroke,

    #[error("failed to decode background image: {0}")]
    BackgroundDecode(#[from] image::ImageError),

    #[error("an export is already running")]
    ExportInProgress,

    #[error("export worker stopped without a result: {0}")]
    ExportWorkerLost(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which way a history move was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

pub type CanvasResult<T> = Result<T, CanvasError>;

impl From<serde_json::Error> for CanvasError {
    fn from(error: serde_json::Error) -> Self {
        CanvasError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CanvasError::EmptyHistory(HistoryDirection::Redo).to_string(),
            "nothing to redo"
        );
        assert_eq!(
            CanvasError::InvalidSurfaceSize { width: 0, height: 10 }.to_string(),
            "invalid surface size 0x10"
        );
    }
}
