//! Puts uploads upright before they are classified or displayed.
//!
//! Phone cameras store the sensor readout as-is and record how the phone was held
//! in the Exif orientation tag. Only the pure rotations (3, 6 and 8) are undone here;
//! the mirrored variants (2, 4, 5 and 7) are left alone since cameras do not produce them.

use image::metadata::Orientation;
use image::DynamicImage;

use crate::{decode::decode_bytes, error::ClassifierError, exif::orientation_tag, image::Image};

/// Correction applied to an image, in counter-clockwise degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Maps an Exif orientation tag to the rotation that undoes it.
    /// Anything other than 3, 6 or 8 needs no rotation.
    pub fn from_exif_tag(tag: u32) -> Self {
        match tag {
            3 => Rotation::Ccw180,
            6 => Rotation::Ccw270,
            8 => Rotation::Ccw90,
            _ => Rotation::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }

    /// Quarter turns swap width and height; the result is always large enough
    /// to hold the whole source image.
    pub fn apply(self, image: &mut DynamicImage) {
        match self {
            Rotation::None => (), // no transformations needed
            Rotation::Ccw90 => *image = image.rotate270(),
            Rotation::Ccw180 => *image = image.rotate180(),
            Rotation::Ccw270 => *image = image.rotate90(),
        }
    }
}

/// An upright image and the rotation it took to get there.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub image: Image,
    pub rotation: Rotation,
}

/// Decodes an upload and rotates it upright according to its Exif orientation.
///
/// Missing or unreadable metadata is not an error: the decoded image is returned unchanged.
/// Only decoding failures are reported.
pub fn normalize(bytes: &[u8]) -> Result<Normalized, ClassifierError> {
    let image = decode_bytes(bytes)?;
    Ok(normalize_image(image))
}

pub fn normalize_image(mut image: Image) -> Normalized {
    let rotation = orientation_tag(image.exif.as_deref())
        .map(Rotation::from_exif_tag)
        .unwrap_or_default();

    if rotation != Rotation::None {
        rotation.apply(&mut image.pixels);
        // the pixels are upright now, so the tag must not be applied a second time
        // by whoever displays a re-encoded copy
        if let Some(exif) = &mut image.exif {
            Orientation::remove_from_exif_chunk(exif);
        }
    }

    Normalized { image, rotation }
}
