use image::{imageops::FilterType, ImageFormat, ImageResult, RgbaImage};

/// Size of gallery thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 128;

/// Decode PNG bytes and scale them to a gallery thumbnail.
///
/// The image is stretched to exactly `THUMBNAIL_SIZE` x `THUMBNAIL_SIZE`,
/// so non-square previews lose their aspect ratio.
pub fn from_png_bytes(png_data: &[u8]) -> ImageResult<RgbaImage> {
    let img = image::load_from_memory_with_format(png_data, ImageFormat::Png)?;

    Ok(img
        .resize_exact(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}
