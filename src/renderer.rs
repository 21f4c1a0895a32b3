use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::background::Background;
use crate::error::CanvasResult;
use crate::raster;
use crate::stroke::{StrokeBuilder, StrokeId, StrokeRef};

/// Everything the visible surface is drawn from, borrowed for one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub committed: &'a [StrokeRef],
    /// History revision the committed slice belongs to
    pub revision: u64,
    pub in_progress: Option<&'a StrokeBuilder>,
    pub background: Option<&'a Background>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LayerKey {
    revision: u64,
    background: Option<usize>,
    size: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameKey {
    layer: LayerKey,
    live: Option<(StrokeId, usize)>,
}

/// Owns the surface bitmap and redraws it from a [`SceneView`].
///
/// Background and committed strokes are cached in a base layer that is only
/// rebuilt when the history revision, background or size changes. The live
/// stroke is painted on top of a copy of that layer.
#[derive(Debug)]
pub struct SurfaceRenderer {
    base: Pixmap,
    base_key: Option<LayerKey>,
    frame: Pixmap,
    frame_key: Option<FrameKey>,
}

impl SurfaceRenderer {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Ok(Self {
            base: raster::new_pixmap(width, height)?,
            base_key: None,
            frame: raster::new_pixmap(width, height)?,
            frame_key: None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    /// Reallocates the surface for a new layout size; the next render redraws everything
    pub fn resize(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        if self.size() == (width, height) {
            return Ok(());
        }
        let base = raster::new_pixmap(width, height)?;
        let frame = raster::new_pixmap(width, height)?;
        log::debug!("Surface resized to {}x{}", width, height);
        self.base = base;
        self.frame = frame;
        self.base_key = None;
        self.frame_key = None;
        Ok(())
    }

    /// Draws background, committed strokes oldest first, then the live stroke
    pub fn render(&mut self, scene: &SceneView<'_>) -> &Pixmap {
        let layer = LayerKey {
            revision: scene.revision,
            background: scene.background.map(Background::id),
            size: self.size(),
        };
        let key = FrameKey {
            layer,
            live: scene.in_progress.map(|s| (s.id(), s.points().len())),
        };
        if self.frame_key == Some(key) {
            return &self.frame;
        }

        if self.base_key != Some(layer) {
            raster::paint_background(&mut self.base, scene.background);
            for stroke in scene.committed {
                raster::paint_stroke(&mut self.base, stroke.points(), stroke.color(), stroke.width());
            }
            self.base_key = Some(layer);
        }

        self.frame.fill(tiny_skia::Color::TRANSPARENT);
        self.frame.draw_pixmap(
            0,
            0,
            self.base.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        if let Some(live) = scene.in_progress {
            raster::paint_stroke(&mut self.frame, live.points(), live.color(), live.width());
        }
        self.frame_key = Some(key);
        &self.frame
    }

    /// Last rendered frame as an egui image for texture upload
    pub fn to_color_image(&self) -> egui::ColorImage {
        let (width, height) = self.size();
        egui::ColorImage::from_rgba_premultiplied(
            [width as usize, height as usize],
            self.frame.data(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokePath;
    use egui::{Color32, pos2};
    use std::sync::Arc;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let color = pixmap.pixel(x, y).unwrap().demultiply();
        [color.red(), color.green(), color.blue(), color.alpha()]
    }

    fn horizontal(y: f32, color: Color32) -> StrokeRef {
        Arc::new(StrokePath::new(color, 6.0, vec![pos2(0.0, y), pos2(40.0, y)]).unwrap())
    }

    #[test]
    fn test_live_stroke_drawn_on_top() {
        let mut renderer = SurfaceRenderer::new(40, 40).unwrap();
        let committed = vec![horizontal(20.0, Color32::RED)];
        let mut live = StrokeBuilder::new(pos2(20.0, 0.0), Color32::GREEN, 6.0);
        live.add_point(pos2(20.0, 40.0));

        let frame = renderer.render(&SceneView {
            committed: &committed,
            revision: 1,
            in_progress: Some(&live),
            background: None,
        });
        assert_eq!(pixel(frame, 20, 20), [0, 255, 0, 255]);
        assert_eq!(pixel(frame, 5, 20), [255, 0, 0, 255]);
        assert_eq!(pixel(frame, 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_base_layer_rebuilt_on_revision_change() {
        let mut renderer = SurfaceRenderer::new(40, 40).unwrap();
        let committed = vec![horizontal(20.0, Color32::RED)];
        let scene = SceneView {
            committed: &committed,
            revision: 1,
            in_progress: None,
            background: None,
        };
        assert_eq!(pixel(renderer.render(&scene), 5, 20), [255, 0, 0, 255]);

        // Undo: same frame size, empty committed list, new revision
        let undone = SceneView {
            committed: &[],
            revision: 2,
            ..scene
        };
        assert_eq!(pixel(renderer.render(&undone), 5, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn test_resize_reallocates_surface() {
        let mut renderer = SurfaceRenderer::new(10, 10).unwrap();
        renderer.resize(30, 20).unwrap();
        assert_eq!(renderer.size(), (30, 20));
        assert!(renderer.resize(0, 20).is_err());
        assert_eq!(renderer.size(), (30, 20));

        let image = renderer.to_color_image();
        assert_eq!(image.size, [30, 20]);
    }
}
