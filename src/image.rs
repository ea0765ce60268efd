use image::{DynamicImage, ImageFormat};

/// A decoded upload together with the metadata needed to display it upright.
#[derive(Debug, Clone)]
pub struct Image {
    pub format: Option<ImageFormat>,
    /// Raw Exif chunk as exposed by the decoder, starting at the TIFF header
    pub exif: Option<Vec<u8>>,
    pub pixels: DynamicImage,
}

impl Image {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }
}
