use egui::Color32;
use tiny_skia::Pixmap;

use crate::background::Background;
use crate::brush::{BrushSize, BrushSizes, BrushState};
use crate::compositor::{self, ExportJob, ExportRequest, ExportedImage, RasterImage};
use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::history::{HistoryStack, StrokeSnapshot};
use crate::recorder::StrokeRecorder;
use crate::renderer::{SceneView, SurfaceRenderer};
use crate::stroke::{Point, StrokeId, StrokeRef};

/// The drawing core behind the shell.
///
/// Owns brush, recorder, history, background and the surface bitmap. Callers
/// drive it with inbound commands and observe it through [`CanvasEvent`]s and
/// immutable snapshots; nothing hands out the live mutable structures.
#[derive(Debug)]
pub struct DrawingCanvas {
    brush: BrushState,
    palette: Vec<Color32>,
    brush_sizes: BrushSizes,
    recorder: StrokeRecorder,
    history: HistoryStack,
    background: Option<Background>,
    renderer: SurfaceRenderer,
    events: EventBus,
    pending_export: Option<ExportJob>,
    /// Last availability pair sent to the shell
    availability: (bool, bool),
}

impl DrawingCanvas {
    pub fn new(config: &CanvasConfig, width: u32, height: u32) -> CanvasResult<Self> {
        Ok(Self {
            brush: config.initial_brush()?,
            palette: config.palette_colors()?,
            brush_sizes: config.brush_sizes,
            recorder: StrokeRecorder::new(),
            history: HistoryStack::new(),
            background: None,
            renderer: SurfaceRenderer::new(width, height)?,
            events: EventBus::new(),
            pending_export: None,
            availability: (false, false),
        })
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    fn notify_redraw(&mut self) {
        self.events.emit(CanvasEvent::SurfaceNeedsRedraw);
        let availability = (self.history.can_undo(), self.history.can_redo());
        if availability != self.availability {
            self.availability = availability;
            self.events.emit(CanvasEvent::HistoryAvailabilityChanged {
                can_undo: availability.0,
                can_redo: availability.1,
            });
        }
    }

    // Brush

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn palette(&self) -> &[Color32] {
        &self.palette
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    /// Selects a palette entry as the brush color
    pub fn select_palette_color(&mut self, index: usize) -> CanvasResult<Color32> {
        let color = self
            .palette
            .get(index)
            .copied()
            .ok_or_else(|| CanvasError::InvalidColor(format!("palette index {index}")))?;
        self.set_brush_color(color);
        Ok(color)
    }

    pub fn set_brush_width(&mut self, width: f32) -> CanvasResult<()> {
        self.brush.set_width(width).inspect_err(|err| {
            log::warn!("Rejected brush width: {}", err);
        })
    }

    pub fn set_brush_size(&mut self, size: BrushSize) -> CanvasResult<()> {
        self.set_brush_width(self.brush_sizes.width(size))
    }

    pub fn brush_sizes(&self) -> BrushSizes {
        self.brush_sizes
    }

    // Pointer input

    /// Starts a stroke with the current brush; ignored while one is in progress
    pub fn pointer_down(&mut self, point: Point) {
        if self.recorder.begin_stroke(point, &self.brush) {
            self.notify_redraw();
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> CanvasResult<()> {
        if self.recorder.extend_stroke(point)? {
            self.notify_redraw();
        }
        Ok(())
    }

    /// Commits the in-progress stroke to history and returns its id
    pub fn pointer_up(&mut self) -> CanvasResult<StrokeId> {
        let stroke = self.recorder.end_stroke().ok_or(CanvasError::NoActiveStroke)?;
        let committed = self.history.commit(stroke);
        let id = committed.id();
        self.events.emit(CanvasEvent::StrokeCommitted { id });
        self.notify_redraw();
        Ok(id)
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_recording()
    }

    // History

    pub fn undo(&mut self) -> CanvasResult<StrokeRef> {
        let stroke = self.history.undo()?;
        self.notify_redraw();
        Ok(stroke)
    }

    pub fn redo(&mut self) -> CanvasResult<StrokeRef> {
        let stroke = self.history.redo()?;
        self.notify_redraw();
        Ok(stroke)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn snapshot_visible(&self) -> StrokeSnapshot {
        self.history.snapshot_visible()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_buffer().len()
    }

    // Surface

    pub fn set_background(&mut self, background: Option<Background>) {
        match &background {
            Some(image) => log::info!(
                "Background set to {}x{} image",
                image.width(),
                image.height()
            ),
            None => log::info!("Background cleared"),
        }
        self.background = background;
        self.notify_redraw();
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.renderer.size()
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        if self.renderer.size() == (width, height) {
            return Ok(());
        }
        self.renderer.resize(width, height)?;
        self.notify_redraw();
        Ok(())
    }

    /// Renders the visible surface: background, committed strokes, live stroke
    pub fn render(&mut self) -> &Pixmap {
        let scene = SceneView {
            committed: self.history.committed(),
            revision: self.history.revision(),
            in_progress: self.recorder.in_progress(),
            background: self.background.as_ref(),
        };
        self.renderer.render(&scene)
    }

    pub fn render_color_image(&mut self) -> egui::ColorImage {
        self.render();
        self.renderer.to_color_image()
    }

    // Export

    fn export_request(&self, width: u32, height: u32) -> CanvasResult<ExportRequest> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSurfaceSize { width, height });
        }
        Ok(ExportRequest {
            width,
            height,
            background: self.background.clone(),
            strokes: self.history.snapshot_visible(),
        })
    }

    /// Flattens the committed strokes synchronously, without the in-progress stroke
    pub fn export_bitmap(&self, width: u32, height: u32) -> CanvasResult<RasterImage> {
        compositor::export_bitmap(width, height, self.background.as_ref(), self.history.committed())
    }

    /// Runs a full export (composite and PNG encode) on the calling thread
    pub fn export_now(&self, width: u32, height: u32) -> CanvasResult<ExportedImage> {
        self.export_request(width, height)?.run()
    }

    /// Starts an export of the current committed strokes on a worker thread.
    ///
    /// The result arrives through [`DrawingCanvas::poll_export`].
    pub fn request_export(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        if self.pending_export.is_some() {
            return Err(CanvasError::ExportInProgress);
        }
        let request = self.export_request(width, height).inspect_err(|err| {
            self.events.emit(CanvasEvent::ExportFailed {
                reason: err.to_string(),
            });
        })?;
        self.pending_export = Some(ExportJob::spawn(request)?);
        Ok(())
    }

    pub fn is_exporting(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Collects a finished export and emits its completion or failure event
    pub fn poll_export(&mut self) -> Option<CanvasResult<ExportedImage>> {
        let result = self.pending_export.as_mut()?.try_take()?;
        self.pending_export = None;
        self.emit_export_result(&result);
        Some(result)
    }

    /// Blocks until the running export finishes
    pub fn wait_for_export(&mut self) -> Option<CanvasResult<ExportedImage>> {
        let result = self.pending_export.take()?.wait();
        self.emit_export_result(&result);
        Some(result)
    }

    fn emit_export_result(&self, result: &CanvasResult<ExportedImage>) {
        let event = match result {
            Ok(image) => CanvasEvent::ExportCompleted(image.clone()),
            Err(err) => CanvasEvent::ExportFailed {
                reason: err.to_string(),
            },
        };
        self.events.emit(event);
    }
}
