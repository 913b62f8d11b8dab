/// Gallery building
///
/// This module handles:
/// - Discovering .kra documents in a single folder (data.rs holds the result types)
/// - Ordering them by creation time, newest first
/// - Pairing every document with its thumbnail or a placeholder

pub mod data;
pub mod scan;

pub use data::{GalleryEntry, ScanResult};
pub use scan::{build_gallery, build_gallery_async, creation_time, is_kra_name, KRA_EXTENSION};
