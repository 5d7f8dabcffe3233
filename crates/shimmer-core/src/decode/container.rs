//! Container decoding (JPEG, PNG) into RGBA pixel buffers.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, ImageFormat, Orientation};
use crate::buffer::PixelBuffer;

/// Decode an image of the declared container.
///
/// The decoder is pinned to `format`; bytes of some other container fail
/// with `DecodeError::CorruptedFile` instead of being sniffed and accepted.
/// JPEG input is turned upright according to its EXIF orientation. The
/// result is always RGBA8.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes are not a valid image
/// of the declared container.
pub fn decode_image(bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer, DecodeError> {
    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = match format {
        ImageFormat::Jpeg => apply_orientation(img, extract_orientation(bytes)),
        ImageFormat::Png => img,
    };

    let (width, height) = (img.width(), img.height());
    PixelBuffer::from_rgba_image(img.into_rgba8()).ok_or(DecodeError::InvalidDimensions {
        width: width.into(),
        height: height.into(),
    })
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if there is no EXIF block or it cannot be
/// read.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
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
    if orientation != Orientation::Normal {
        log::debug!("applying EXIF orientation {:?}", orientation);
    }
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
