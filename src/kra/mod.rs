/// Krita document (.kra) preview extraction
///
/// This module handles:
/// - Opening .kra containers as zip archives
/// - Reading the embedded preview.png entry
/// - Decoding and scaling it to a gallery thumbnail

pub mod error;
pub mod preview;
pub mod thumbnail;

pub use error::PreviewError;
pub use preview::{extract_preview, try_extract_preview, PREVIEW_ENTRY};
pub use thumbnail::THUMBNAIL_SIZE;
