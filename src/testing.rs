//! Test fixtures: real .kra containers written with the zip writer
//!
//! Only available when compiled with `cfg(test)`.

use image::{ImageFormat, Rgba, RgbaImage};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::kra::PREVIEW_ENTRY;

/// Encode a solid-color PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer.into_inner()
}

/// Write a zip archive at `path` holding the given (name, bytes) entries
pub fn write_kra(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("Failed to create test archive");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, data) in entries {
        zip.start_file(*name, options)
            .expect("Failed to start archive entry");
        zip.write_all(data).expect("Failed to write archive entry");
    }

    zip.finish().expect("Failed to finish test archive");
}

/// Write a minimal Krita document with a preview of the given size
pub fn write_kra_with_preview(path: &Path, width: u32, height: u32) {
    let png = png_bytes(width, height);
    write_kra(
        path,
        &[
            ("mimetype", b"application/x-krita".as_slice()),
            (PREVIEW_ENTRY, png.as_slice()),
        ],
    );
}

/// Write a Krita document that has no preview entry
pub fn write_kra_without_preview(path: &Path) {
    write_kra(
        path,
        &[
            ("mimetype", b"application/x-krita".as_slice()),
            ("maindoc.xml", b"<DOC/>".as_slice()),
        ],
    );
}

/// Sleep long enough for the next file to get a later creation time
pub fn tick() {
    thread::sleep(Duration::from_millis(50));
}
