//! kra-gallery: thumbnail gallery for folders of Krita documents
//!
//! The library scans a single folder for `.kra` files, pulls the embedded
//! `preview.png` out of each one and returns the documents newest first.
//! Presentation, settings and opening documents belong to the caller
//! (see the `kra-gallery` binary for a small shell).

pub mod gallery;
pub mod kra;

#[cfg(test)]
mod testing;

pub use gallery::{build_gallery, build_gallery_async, GalleryEntry, ScanResult};
pub use kra::{extract_preview, PreviewError, THUMBNAIL_SIZE};
