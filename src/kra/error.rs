use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;

/// Reasons a document yields no thumbnail
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Not a zip archive, corrupt, or the file could not be opened
    #[error("Cannot open {} as an archive: {source}", .path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    /// Archive is fine but has no preview.png at its root
    #[error("No preview entry in {}", .path.display())]
    PreviewMissing { path: PathBuf },
    /// The preview entry is listed but its bytes could not be read
    #[error("Failed to read preview entry of {}: {source}", .path.display())]
    PreviewUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Preview bytes are not a valid PNG
    #[error("Failed to decode preview of {}: {source}", .path.display())]
    ImageDecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PreviewError {
    pub(crate) fn archive(path: &Path, source: ZipError) -> Self {
        Self::ArchiveUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The document this error refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ArchiveUnreadable { path, .. }
            | Self::PreviewMissing { path }
            | Self::PreviewUnreadable { path, .. }
            | Self::ImageDecodeFailure { path, .. } => path,
        }
    }
}
