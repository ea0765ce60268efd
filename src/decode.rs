use std::{io::Cursor, path::Path};

use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::{dc_err, dc_try, error::ClassifierError, image::Image};

/// Reads the whole file and decodes it, guessing the format from its contents.
pub fn decode(path: &Path) -> Result<Image, ClassifierError> {
    let bytes = std::fs::read(path)
        .map_err(|error| dc_err!("unable to open image '{}': {error}", path.display()))?;
    decode_bytes(&bytes)
}

/// Decodes an in-memory upload, keeping its Exif chunk if the decoder exposes one.
pub fn decode_bytes(bytes: &[u8]) -> Result<Image, ClassifierError> {
    let reader = dc_try!(ImageReader::new(Cursor::new(bytes)).with_guessed_format());
    let format = reader.format();
    let mut decoder = dc_try!(reader.into_decoder());
    // unreadable metadata is the same as no metadata, the pixels are still usable
    let exif = decoder.exif_metadata().ok().flatten();
    let pixels = dc_try!(DynamicImage::from_decoder(decoder));
    Ok(Image {
        format,
        exif,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jpeg_with_exif, png_bytes, raw_exif_with_orientation};
    use image::ImageFormat;

    #[test]
    fn test_decode_png_without_exif() {
        let pixels = DynamicImage::new_rgb8(7, 3);
        let image = decode_bytes(&png_bytes(&pixels)).unwrap();
        assert_eq!(image.format, Some(ImageFormat::Png));
        assert_eq!(image.exif, None);
        assert_eq!(image.dimensions(), (7, 3));
    }

    #[test]
    fn test_decode_jpeg_keeps_exif() {
        let exif = raw_exif_with_orientation(6);
        let bytes = jpeg_with_exif(&DynamicImage::new_rgb8(16, 8), &exif);
        let image = decode_bytes(&bytes).unwrap();
        assert_eq!(image.format, Some(ImageFormat::Jpeg));
        assert_eq!(
            crate::exif::orientation_tag(image.exif.as_deref()),
            Some(6)
        );
        assert_eq!(image.dimensions(), (16, 8));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let err = decode(Path::new("/nonexistent/dog.jpg")).unwrap_err();
        assert!(err.0.contains("unable to open image '/nonexistent/dog.jpg'"));
    }
}
