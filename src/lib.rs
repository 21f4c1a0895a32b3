#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod brush;
pub mod canvas;
pub mod compositor;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod raster;
pub mod recorder;
pub mod renderer;
pub mod stroke;

mod components;
mod panels;

pub use app::PaintApp;
pub use background::Background;
pub use brush::{BrushSize, BrushState};
pub use canvas::DrawingCanvas;
pub use compositor::{ExportedImage, RasterImage, export_bitmap};
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventQueue};
pub use history::HistoryStack;
pub use recorder::StrokeRecorder;
pub use renderer::SurfaceRenderer;
pub use stroke::{Point, StrokePath, StrokeRef};
