use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::background::Background;
use crate::brush::BrushSize;
use crate::canvas::DrawingCanvas;
use crate::compositor::{self, ExportedImage};
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::event::{CanvasEvent, EventQueue};
use crate::panels::{brush_size_dialog, central_panel, tools_panel};

/// Initial surface size before the first layout pass
const INITIAL_SURFACE: (u32, u32) = (800, 600);

/// Native shell around [`DrawingCanvas`]: palette, brush dialog, undo/redo,
/// background loading and export-to-file.
pub struct PaintApp {
    canvas: DrawingCanvas,
    events: EventQueue,
    config: CanvasConfig,
    texture: Option<egui::TextureHandle>,
    surface_dirty: bool,
    can_undo: bool,
    can_redo: bool,
    selected_color: usize,
    show_brush_dialog: bool,
    /// Export in flight; the save button is disabled meanwhile
    exporting: bool,
    background_path: String,
    export_dir: PathBuf,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> CanvasResult<Self> {
        let canvas = DrawingCanvas::new(&config, INITIAL_SURFACE.0, INITIAL_SURFACE.1)?;
        let events = EventQueue::new();
        canvas.subscribe(Box::new(events.clone()));
        let export_dir = std::env::temp_dir().join("drawing_app");

        Ok(Self {
            canvas,
            events,
            selected_color: config.default_color_index,
            config,
            texture: None,
            surface_dirty: true,
            can_undo: false,
            can_redo: false,
            show_brush_dialog: false,
            exporting: false,
            background_path: String::new(),
            export_dir,
            status: None,
        })
    }

    pub fn canvas(&self) -> &DrawingCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DrawingCanvas {
        &mut self.canvas
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn selected_color(&self) -> usize {
        self.selected_color
    }

    pub fn background_path_mut(&mut self) -> &mut String {
        &mut self.background_path
    }

    pub fn open_brush_dialog(&mut self) {
        self.show_brush_dialog = true;
    }

    pub fn is_brush_dialog_open(&self) -> bool {
        self.show_brush_dialog
    }

    pub fn select_color(&mut self, index: usize) {
        match self.canvas.select_palette_color(index) {
            Ok(color) => {
                log::info!("Brush color set to {}", crate::brush::to_hex_color(color));
                self.selected_color = index;
            }
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn select_brush_size(&mut self, size: BrushSize) {
        if let Err(err) = self.canvas.set_brush_size(size) {
            log::warn!("{}", err);
        }
        self.show_brush_dialog = false;
    }

    pub fn close_brush_dialog(&mut self) {
        self.show_brush_dialog = false;
    }

    pub fn undo(&mut self) {
        // Boundary undo is a no-op; the button is disabled anyway
        let _ = self.canvas.undo();
    }

    pub fn redo(&mut self) {
        let _ = self.canvas.redo();
    }

    pub fn load_background(&mut self) {
        let path = self.background_path.trim().to_owned();
        if path.is_empty() {
            self.status = Some("Enter an image path first".to_owned());
            return;
        }
        match Background::open(&path) {
            Ok(background) => {
                self.canvas.set_background(Some(background));
                self.status = Some(format!("Background loaded from {path}"));
            }
            Err(err) => {
                log::error!("Failed to load background {}: {}", path, err);
                self.status = Some(format!("Could not load background: {err}"));
            }
        }
    }

    pub fn clear_background(&mut self) {
        self.canvas.set_background(None);
    }

    /// Exports the surface at its current size on the worker thread
    pub fn save(&mut self) {
        let (width, height) = self.canvas.surface_size();
        match self.canvas.request_export(width, height) {
            Ok(()) => {
                self.exporting = true;
                self.status = Some("Saving...".to_owned());
            }
            Err(err) => {
                log::error!("Could not start export: {}", err);
                self.status = Some(format!("Something went wrong while saving the file: {err}"));
            }
        }
    }

    fn write_export(&mut self, image: &ExportedImage) {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let file_name = compositor::export_file_name(&self.config.export_prefix, seconds);
        self.status = Some(match compositor::save_png(&self.export_dir, &file_name, &image.png) {
            Ok(path) => format!("File saved successfully: {}", path.display()),
            Err(err) => {
                log::error!("Failed to write export: {}", err);
                format!("Something went wrong while saving the file: {err}")
            }
        });
    }

    fn handle_events(&mut self) {
        self.canvas.poll_export();
        for event in self.events.drain() {
            match event {
                CanvasEvent::SurfaceNeedsRedraw => self.surface_dirty = true,
                CanvasEvent::HistoryAvailabilityChanged { can_undo, can_redo } => {
                    self.can_undo = can_undo;
                    self.can_redo = can_redo;
                }
                CanvasEvent::StrokeCommitted { id } => log::trace!("Stroke {} committed", id),
                CanvasEvent::ExportCompleted(image) => {
                    self.exporting = false;
                    self.write_export(&image);
                }
                CanvasEvent::ExportFailed { reason } => {
                    self.exporting = false;
                    self.status = Some(format!("Something went wrong while saving the file: {reason}"));
                }
            }
        }
    }

    /// Uploads the surface to the GPU texture if it changed and returns the texture
    pub fn surface_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let texture = match self.texture.take() {
            Some(mut texture) => {
                if self.surface_dirty {
                    texture.set(self.canvas.render_color_image(), egui::TextureOptions::NEAREST);
                }
                texture
            }
            None => ctx.load_texture(
                "drawing_surface",
                self.canvas.render_color_image(),
                egui::TextureOptions::NEAREST,
            ),
        };
        self.surface_dirty = false;
        let id = texture.id();
        self.texture = Some(texture);
        id
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_events();

        tools_panel(self, ctx);
        central_panel(self, ctx);
        brush_size_dialog(self, ctx);

        // Pick up events produced by this frame's input right away
        self.handle_events();
        if self.exporting || self.surface_dirty {
            ctx.request_repaint();
        }
    }
}
