use exif::{In, Tag};

/// APP1 payload prefix, which some decoders leave in front of the TIFF header
const APP1_EXIF_PREFIX: &[u8] = b"Exif\0\0";

/// Looks up the orientation tag in a raw Exif chunk.
///
/// Every link of the chain is optional: no chunk, a chunk that does not parse,
/// no Orientation field in the primary IFD, or a field without an integer value
/// all mean "no orientation" rather than an error.
pub fn orientation_tag(raw_exif: Option<&[u8]>) -> Option<u32> {
    let raw = raw_exif?;
    let raw = raw.strip_prefix(APP1_EXIF_PREFIX).unwrap_or(raw);
    // based on the Exif crate example: https://docs.rs/kamadak-exif/latest/exif/index.html#examples
    let exif = match exif::Reader::new().read_raw(raw.to_vec()) {
        Ok(exif) => exif,
        Err(error) => {
            tracing::debug!("ignoring unreadable Exif chunk: {error}");
            return None;
        }
    };
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    field.value.get_uint(0)
}
