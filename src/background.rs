use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::CanvasResult;

// Static counter for generating unique IDs
static NEXT_BACKGROUND_ID: AtomicUsize = AtomicUsize::new(1);

/// Decoded background image shared between the live surface and export workers.
///
/// Cloning is cheap; the pixels are never mutated after decoding. The image is
/// stretched to the surface size when drawn, ignoring its aspect ratio.
#[derive(Debug, Clone)]
pub struct Background {
    id: usize,
    image: Arc<RgbaImage>,
}

impl Background {
    pub fn new(image: RgbaImage) -> Self {
        let id = NEXT_BACKGROUND_ID.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            image: Arc::new(image),
        }
    }

    /// Decode any format the `image` crate understands
    pub fn from_bytes(bytes: &[u8]) -> CanvasResult<Self> {
        let decoded = image::load_from_memory(bytes).inspect_err(|err| {
            log::error!("Failed to decode background image: {}", err);
        })?;
        log::debug!("Decoded background image: {}x{}", decoded.width(), decoded.height());
        Ok(Self::new(decoded.to_rgba8()))
    }

    pub fn open(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        log::info!("Loading background image from {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The image resized to exactly `width` x `height` (stretch-to-fit)
    pub fn stretched(&self, width: u32, height: u32) -> RgbaImage {
        if self.image.dimensions() == (width, height) {
            return RgbaImage::clone(&self.image);
        }
        imageops::resize(&*self.image, width, height, FilterType::Triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_ids_are_unique() {
        let a = Background::new(RgbaImage::new(1, 1));
        let b = Background::new(RgbaImage::new(1, 1));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_stretch_ignores_aspect_ratio() {
        let background = Background::new(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255])));
        let stretched = background.stretched(3, 9);
        assert_eq!(stretched.dimensions(), (3, 9));
    }

    #[test]
    fn test_decode_png_bytes() {
        let image = RgbaImage::from_pixel(5, 3, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let background = Background::from_bytes(&bytes).unwrap();
        assert_eq!((background.width(), background.height()), (5, 3));
        assert_eq!(background.image().get_pixel(4, 2), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(Background::from_bytes(b"definitely not an image").is_err());
    }
}
