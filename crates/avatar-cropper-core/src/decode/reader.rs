//! Decoding of avatar source images with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use log::debug;

use super::{DecodeError, DecodedImage, ImageSource, Orientation};

/// Decode image bytes in any enabled format, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data is damaged or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Read and decode an image from a file path.
pub fn decode_file(path: &Path) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))?;
    let image = decode_image(&bytes)?;
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    Ok(image)
}

/// Load and decode an [`ImageSource`].
///
/// `file://` URIs are read from disk; every other scheme belongs to the
/// host platform and is rejected with `DecodeError::UnsupportedSource`.
pub fn load_source(source: &ImageSource) -> Result<DecodedImage, DecodeError> {
    match source {
        ImageSource::File(path) => decode_file(path),
        ImageSource::Uri(uri) => match uri.strip_prefix("file://") {
            Some(path) => decode_file(Path::new(path)),
            None => Err(DecodeError::UnsupportedSource(uri.clone())),
        },
    }
}

/// Read the EXIF orientation tag, defaulting to `Orientation::Normal`.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
