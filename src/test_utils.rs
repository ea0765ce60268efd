//! Builders for the in-memory images and Exif chunks used across the unit tests

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// An RGB image where every pixel is distinguishable, so any rotation or flip shows up in comparisons
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([x as u8, y as u8, (x * 7 + y * 13) as u8])
    }))
}

/// A minimal big-endian TIFF structure with a single IFD0 entry: Orientation (0x0112), SHORT
pub fn raw_exif_with_orientation(orientation: u16) -> Vec<u8> {
    let mut exif = Vec::new();
    exif.extend_from_slice(b"MM\x00\x2a");
    exif.extend_from_slice(&8u32.to_be_bytes()); // IFD0 right after the header
    exif.extend_from_slice(&1u16.to_be_bytes()); // one entry
    exif.extend_from_slice(&0x0112u16.to_be_bytes());
    exif.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    exif.extend_from_slice(&1u32.to_be_bytes());
    exif.extend_from_slice(&orientation.to_be_bytes());
    exif.extend_from_slice(&[0, 0]); // value padding
    exif.extend_from_slice(&0u32.to_be_bytes()); // no next IFD
    exif
}

/// Valid TIFF structure whose only IFD0 entry is ImageWidth, i.e. no orientation
pub fn raw_exif_without_orientation() -> Vec<u8> {
    let mut exif = raw_exif_with_orientation(1);
    exif[10..12].copy_from_slice(&0x0100u16.to_be_bytes());
    exif
}

pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Encodes as JPEG and splices an APP1 Exif segment in right after the SOI marker
pub fn jpeg_with_exif(image: &DynamicImage, raw_exif: &[u8]) -> Vec<u8> {
    let mut jpeg = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let segment_len = (2 + 6 + raw_exif.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + segment_len as usize + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\x00\x00");
    out.extend_from_slice(raw_exif);
    out.extend_from_slice(&jpeg[2..]);
    out
}
