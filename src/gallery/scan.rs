/// Folder scanning: discover -> timestamp -> sort -> extract
///
/// A scan only reads the file system. Per-file problems (unreadable
/// metadata, broken archives, missing previews) never abort it.
use chrono::{DateTime, Utc};
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::{GalleryEntry, ScanResult};
use crate::kra::extract_preview;

/// Extension of Krita documents, compared case-insensitively
pub const KRA_EXTENSION: &str = ".kra";

/// A discovered document before its preview is loaded
#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    display_name: String,
    created: DateTime<Utc>,
}

/// Build the gallery for a folder.
///
/// Returns an empty result when the path is empty, missing, or not a
/// directory. Documents without a usable preview are still listed, with
/// `thumbnail: None`.
pub fn build_gallery(dir: impl AsRef<Path>) -> ScanResult {
    let dir = dir.as_ref();

    if dir.as_os_str().is_empty() || !dir.is_dir() {
        tracing::debug!("Gallery folder unavailable: {}", dir.display());
        return ScanResult::default();
    }

    let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());

    let mut candidates = discover(&dir);
    sort_newest_first(&mut candidates);

    let result: ScanResult = candidates
        .into_iter()
        .map(|candidate| {
            let thumbnail = extract_preview(&candidate.path);
            GalleryEntry {
                path: candidate.path,
                display_name: candidate.display_name,
                thumbnail,
            }
        })
        .collect();

    tracing::info!(
        "Scanned {}: {} documents, {} without preview",
        dir.display(),
        result.len(),
        result.placeholder_count()
    );

    result
}

/// Run [`build_gallery`] on the blocking thread pool.
///
/// Must be called from within a tokio runtime. If the scan task dies the
/// gallery is simply empty.
pub async fn build_gallery_async(dir: PathBuf) -> ScanResult {
    match tokio::task::spawn_blocking(move || build_gallery(&dir)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Gallery scan task failed: {}", e);
            ScanResult::default()
        }
    }
}

/// Does this file name look like a Krita document?
pub fn is_kra_name(file_name: &OsStr) -> bool {
    file_name
        .to_string_lossy()
        .to_lowercase()
        .ends_with(KRA_EXTENSION)
}

/// Creation time used for ordering.
///
/// Unreadable metadata sorts the file as the oldest possible.
pub fn creation_time(path: &Path) -> DateTime<Utc> {
    creation_time_or_oldest(path, fs::metadata(path))
}

fn creation_time_or_oldest<E: std::fmt::Display>(
    path: &Path,
    metadata: Result<Metadata, E>,
) -> DateTime<Utc> {
    match metadata {
        Ok(metadata) => metadata_creation_time(&metadata).unwrap_or(DateTime::<Utc>::MIN_UTC),
        Err(e) => {
            tracing::debug!("No timestamp for {}: {}", path.display(), e);
            DateTime::<Utc>::MIN_UTC
        }
    }
}

// Unix has no portable birth time; the inode change time is what
// file managers report as "created" there.
#[cfg(unix)]
fn metadata_creation_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(metadata.ctime_nsec()).ok()?;
    DateTime::<Utc>::from_timestamp(metadata.ctime(), nanos)
}

#[cfg(not(unix))]
fn metadata_creation_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(DateTime::<Utc>::from)
}

/// List the folder's immediate regular files with a .kra name,
/// in directory enumeration order
fn discover(dir: &Path) -> Vec<Candidate> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        // Symlinks report their own type here, so they are skipped too
        .filter(|entry| entry.file_type().is_file() && is_kra_name(entry.file_name()))
        .map(|entry| {
            let display_name = entry.file_name().to_string_lossy().into_owned();
            // Regular files only, so the entry's lstat is the file's own metadata
            let created = creation_time_or_oldest(entry.path(), entry.metadata());
            let path = entry.into_path();
            Candidate {
                path,
                display_name,
                created,
            }
        })
        .collect()
}

/// Newest first; `sort_by` is stable so equal times keep enumeration order
fn sort_newest_first(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.created.cmp(&a.created));
}
