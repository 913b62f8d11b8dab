/// Preview extraction from .kra documents
/// Reads the embedded preview.png without unpacking anything to disk
use image::RgbaImage;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use super::error::PreviewError;
use super::thumbnail;

/// Name of the preview image Krita stores at the archive root
pub const PREVIEW_ENTRY: &str = "preview.png";

/// Extract the gallery thumbnail of a .kra document.
///
/// Returns `None` when the file is not a readable archive, has no
/// preview entry, or the preview is not a valid PNG. The reason is only
/// logged; callers show a placeholder instead.
pub fn extract_preview(kra_path: &Path) -> Option<RgbaImage> {
    match try_extract_preview(kra_path) {
        Ok(thumbnail) => Some(thumbnail),
        Err(err) => {
            tracing::debug!("No thumbnail: {}", err);
            None
        }
    }
}

/// Same as [`extract_preview`] but reports why no thumbnail was produced.
///
/// No extension check is done here; any zip archive with a root-level
/// `preview.png` works.
pub fn try_extract_preview(kra_path: &Path) -> Result<RgbaImage, PreviewError> {
    let png_data = read_preview_entry(kra_path)?;

    thumbnail::from_png_bytes(&png_data).map_err(|source| PreviewError::ImageDecodeFailure {
        path: kra_path.to_path_buf(),
        source,
    })
}

/// Read the raw bytes of preview.png; the archive is closed on return
fn read_preview_entry(kra_path: &Path) -> Result<Vec<u8>, PreviewError> {
    let file = File::open(kra_path).map_err(|e| PreviewError::archive(kra_path, ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(|e| PreviewError::archive(kra_path, e))?;

    let mut entry = match archive.by_name(PREVIEW_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(PreviewError::PreviewMissing {
                path: kra_path.to_path_buf(),
            })
        }
        Err(e) => return Err(PreviewError::archive(kra_path, e)),
    };

    let mut png_data = Vec::new();
    entry
        .read_to_end(&mut png_data)
        .map_err(|source| PreviewError::PreviewUnreadable {
            path: kra_path.to_path_buf(),
            source,
        })?;

    Ok(png_data)
}
