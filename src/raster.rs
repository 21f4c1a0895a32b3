//! Stroke and background painting shared by the live surface and the compositor.

use egui::Color32;
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::background::Background;
use crate::error::{CanvasError, CanvasResult};
use crate::stroke::Point;

/// Fill used when there is no background image
pub const DEFAULT_FILL: Color32 = Color32::WHITE;

/// Allocates a transparent pixmap, rejecting zero or oversized dimensions
pub fn new_pixmap(width: u32, height: u32) -> CanvasResult<Pixmap> {
    Pixmap::new(width, height).ok_or(CanvasError::InvalidSurfaceSize { width, height })
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Fills the whole pixmap with the default fill, then the stretched background on top
pub fn paint_background(pixmap: &mut Pixmap, background: Option<&Background>) {
    let [r, g, b, a] = DEFAULT_FILL.to_srgba_unmultiplied();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

    if let Some(background) = background {
        let stretched = background.stretched(pixmap.width(), pixmap.height());
        if let Some(layer) = image_to_pixmap(&stretched) {
            pixmap.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }
}

/// Draws one stroke as a connected line with round caps and joins.
///
/// A stroke whose points all coincide becomes a filled dot of diameter `width`.
pub fn paint_stroke(pixmap: &mut Pixmap, points: &[Point], color: Color32, width: f32) {
    let Some(first) = points.first() else {
        return;
    };
    let paint = paint_for(color);

    if points.iter().all(|p| p == first) {
        if let Some(dot) = PathBuilder::from_circle(first.x, first.y, width / 2.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in &points[1..] {
        builder.line_to(point.x, point.y);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Converts straight-alpha RGBA pixels into a premultiplied pixmap
pub fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Converts a premultiplied pixmap back into straight-alpha RGBA pixels
pub fn pixmap_to_image(pixmap: &Pixmap) -> CanvasResult<RgbaImage> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        CanvasError::EncodingFailure("pixel buffer does not match surface size".to_owned())
    })
}
