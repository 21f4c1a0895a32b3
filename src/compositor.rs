use futures::channel::oneshot;
use image::RgbaImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::background::Background;
use crate::error::{CanvasError, CanvasResult};
use crate::history::StrokeSnapshot;
use crate::raster;
use crate::stroke::StrokeRef;

/// Flattened export output with straight-alpha RGBA pixels
pub type RasterImage = RgbaImage;

/// Flattens the background and the committed strokes into a `width` x `height` raster.
///
/// Without a background the raster starts white. A background is stretched to
/// exactly the requested size. Strokes are drawn oldest first with the same
/// painting rules as the live surface.
pub fn export_bitmap(
    width: u32,
    height: u32,
    background: Option<&Background>,
    committed: &[StrokeRef],
) -> CanvasResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(CanvasError::InvalidSurfaceSize { width, height });
    }
    let mut pixmap = raster::new_pixmap(width, height)?;
    raster::paint_background(&mut pixmap, background);
    for stroke in committed {
        raster::paint_stroke(&mut pixmap, stroke.points(), stroke.color(), stroke.width());
    }
    raster::pixmap_to_image(&pixmap)
}

pub fn encode_png(raster: &RasterImage) -> CanvasResult<Vec<u8>> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|err| CanvasError::EncodingFailure(err.to_string()))?;
    Ok(bytes)
}

/// PNG-encoded export result handed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Immutable inputs of one export, safe to move to a worker thread
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub width: u32,
    pub height: u32,
    pub background: Option<Background>,
    pub strokes: StrokeSnapshot,
}

impl ExportRequest {
    pub fn run(&self) -> CanvasResult<ExportedImage> {
        log::info!(
            "Exporting {} strokes at {}x{}",
            self.strokes.len(),
            self.width,
            self.height
        );
        let raster = export_bitmap(self.width, self.height, self.background.as_ref(), &self.strokes)?;
        let png = encode_png(&raster)?;
        log::info!("Export encoded to {} bytes", png.len());
        Ok(ExportedImage {
            width: self.width,
            height: self.height,
            png,
        })
    }
}

/// Export running on a worker thread
#[derive(Debug)]
pub struct ExportJob {
    receiver: oneshot::Receiver<CanvasResult<ExportedImage>>,
}

impl ExportJob {
    pub fn spawn(request: ExportRequest) -> CanvasResult<Self> {
        let (sender, receiver) = oneshot::channel();
        std::thread::Builder::new()
            .name("drawing-export".to_owned())
            .spawn(move || {
                let result = request.run();
                if let Err(err) = &result {
                    log::error!("Export failed: {}", err);
                }
                // The receiver may already be gone if the session ended
                let _ = sender.send(result);
            })?;
        Ok(Self { receiver })
    }

    /// Non-blocking check for the result; `None` while the worker is still busy
    pub fn try_take(&mut self) -> Option<CanvasResult<ExportedImage>> {
        match self.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::Canceled) => Some(Err(CanvasError::ExportWorkerLost(
                "result channel closed".to_owned(),
            ))),
        }
    }

    /// Blocks until the worker finishes
    pub fn wait(self) -> CanvasResult<ExportedImage> {
        futures::executor::block_on(self.receiver).unwrap_or_else(|oneshot::Canceled| {
            Err(CanvasError::ExportWorkerLost("result channel closed".to_owned()))
        })
    }
}

/// `<prefix><unix seconds>.png`
pub fn export_file_name(prefix: &str, unix_seconds: u64) -> String {
    format!("{prefix}{unix_seconds}.png")
}

/// Writes encoded bytes to `dir/file_name`, creating `dir` if needed
pub fn save_png(dir: &Path, file_name: &str, png: &[u8]) -> CanvasResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, png)?;
    log::info!("Saved export to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokePath;
    use egui::{Color32, pos2};
    use std::sync::Arc;

    #[test]
    fn test_zero_dimensions_rejected() {
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            assert!(matches!(
                export_bitmap(w, h, None, &[]),
                Err(CanvasError::InvalidSurfaceSize { .. })
            ));
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("DrawingApp_", 1700000000), "DrawingApp_1700000000.png");
    }

    #[test]
    fn test_job_delivers_result() {
        let stroke =
            StrokePath::new_ref(Color32::RED, 4.0, vec![pos2(1.0, 1.0), pos2(8.0, 8.0)]).unwrap();
        let request = ExportRequest {
            width: 10,
            height: 10,
            background: None,
            strokes: Arc::from(vec![stroke]),
        };
        let expected = request.run().unwrap();

        let job = ExportJob::spawn(request).unwrap();
        let exported = job.wait().unwrap();
        assert_eq!(exported, expected);
        assert_eq!(&exported.png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_job_reports_invalid_size() {
        let request = ExportRequest {
            width: 0,
            height: 5,
            background: None,
            strokes: Arc::from(Vec::new()),
        };
        let job = ExportJob::spawn(request).unwrap();
        assert!(matches!(job.wait(), Err(CanvasError::InvalidSurfaceSize { .. })));
    }
}
