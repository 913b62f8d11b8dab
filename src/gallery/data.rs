/// Data structures produced by a gallery scan
///
/// Nothing here outlives the scan that created it: every call to
/// `build_gallery` returns fresh entries.
use image::RgbaImage;
use std::path::PathBuf;

/// One tile of the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    /// Full path to the .kra file, unique within one scan
    pub path: PathBuf,
    /// Filename only (e.g., "sketch.kra")
    pub display_name: String,
    /// 128x128 preview, None when the shell should draw a placeholder
    pub thumbnail: Option<RgbaImage>,
}

impl GalleryEntry {
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

/// Ordered result of one scan, newest document first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    entries: Vec<GalleryEntry>,
}

impl ScanResult {
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryEntry> {
        self.entries.iter()
    }

    /// Number of entries that will be shown with a placeholder
    pub fn placeholder_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.has_thumbnail()).count()
    }

    pub fn into_entries(self) -> Vec<GalleryEntry> {
        self.entries
    }
}

impl FromIterator<GalleryEntry> for ScanResult {
    fn from_iter<I: IntoIterator<Item = GalleryEntry>>(iter: I) -> Self {
        ScanResult {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ScanResult {
    type Item = GalleryEntry;
    type IntoIter = std::vec::IntoIter<GalleryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a GalleryEntry;
    type IntoIter = std::slice::Iter<'a, GalleryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
