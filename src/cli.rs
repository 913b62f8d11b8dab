//! Command line shell around the gallery library
//!
//! Stands in for a docked gallery panel: picks the folder, renders the
//! entries as text or JSON, and hands clicked documents to the system.

use clap::{Parser, Subcommand};
use kra_gallery::{build_gallery, GalleryEntry, ScanResult};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "kra-gallery", version, about = "Thumbnail gallery for folders of Krita documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the .kra documents of a folder, newest first
    List {
        /// Folder to scan (defaults to the last folder used)
        dir: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Open a document with the default application
    Open {
        /// Document to open
        file: PathBuf,
    },
    /// Write the thumbnails of a folder as PNG files
    Export {
        /// Folder to scan
        dir: PathBuf,
        /// Destination folder for the PNG files
        out: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to save thumbnail: {0}")]
    Image(#[from] image::ImageError),
}

/// JSON view of a gallery entry
#[derive(Debug, Serialize)]
struct EntryView<'a> {
    path: &'a Path,
    display_name: &'a str,
    has_thumbnail: bool,
    thumbnail_size: Option<[u32; 2]>,
}

impl<'a> From<&'a GalleryEntry> for EntryView<'a> {
    fn from(entry: &'a GalleryEntry) -> Self {
        EntryView {
            path: &entry.path,
            display_name: &entry.display_name,
            has_thumbnail: entry.has_thumbnail(),
            thumbnail_size: entry.thumbnail.as_ref().map(|t| [t.width(), t.height()]),
        }
    }
}

pub fn run(cli: Cli, settings_path: Option<&Path>) -> Result<(), ShellError> {
    match cli.command {
        None => {
            let folder = select_folder(None, settings_path);
            list(&build_gallery(&folder), false, &mut io::stdout().lock())
        }
        Some(Command::List { dir, json }) => {
            let folder = select_folder(dir, settings_path);
            list(&build_gallery(&folder), json, &mut io::stdout().lock())
        }
        Some(Command::Open { file }) => {
            open_document(&file)?;
            Ok(())
        }
        Some(Command::Export { dir, out }) => {
            let folder = select_folder(Some(dir), settings_path);
            let written = export(&build_gallery(&folder), &out)?;
            println!("Wrote {} thumbnails to {}", written, out.display());
            Ok(())
        }
    }
}

/// Resolve the folder to scan.
///
/// An explicit folder that exists becomes the new remembered folder;
/// without one the remembered folder (or Pictures) is used.
pub fn select_folder(dir: Option<PathBuf>, settings_path: Option<&Path>) -> PathBuf {
    let mut settings = settings_path.map(Settings::load_from).unwrap_or_default();

    let Some(dir) = dir else {
        return settings.start_folder();
    };

    if dir.is_dir() {
        if let Some(path) = settings_path {
            // Stored absolute so the next run finds it from any working directory
            let remembered = std::path::absolute(&dir).unwrap_or_else(|_| dir.clone());
            settings.last_folder = Some(remembered);
            if let Err(e) = settings.save_to(path) {
                tracing::warn!("Folder will not be remembered: {}", e);
            }
        }
    }

    dir
}

/// Render the gallery, one line per document
pub fn list(result: &ScanResult, json: bool, out: &mut impl Write) -> Result<(), ShellError> {
    if json {
        let views: Vec<EntryView> = result.iter().map(EntryView::from).collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in result {
        let thumbnail = match &entry.thumbnail {
            Some(thumb) => format!("{}x{}", thumb.width(), thumb.height()),
            None => "placeholder".to_string(),
        };
        writeln!(out, "{}\t{}\t{}", entry.display_name, thumbnail, entry.path.display())?;
    }

    Ok(())
}

/// Save every available thumbnail as `<display name>.png` in `out_dir`.
/// Returns how many files were written.
pub fn export(result: &ScanResult, out_dir: &Path) -> Result<usize, ShellError> {
    fs::create_dir_all(out_dir)?;

    let mut written = 0;
    for entry in result {
        let Some(thumbnail) = &entry.thumbnail else {
            continue;
        };
        let target = out_dir.join(format!("{}.png", entry.display_name));
        thumbnail.save(&target)?;
        written += 1;
    }

    tracing::info!(
        "Exported {} thumbnails, skipped {} placeholders",
        written,
        result.placeholder_count()
    );

    Ok(written)
}

/// Hand a document to the system opener.
///
/// Entries may be stale by the time they are clicked, so a missing file
/// is ignored. Returns whether the opener was invoked.
pub fn open_document(file: &Path) -> Result<bool, ShellError> {
    if !file.exists() {
        tracing::warn!("Document no longer exists: {}", file.display());
        return Ok(false);
    }

    open::that(file)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use kra_gallery::kra::PREVIEW_ENTRY;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_kra(path: &Path, with_preview: bool) {
        let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("mimetype", options).unwrap();
        zip.write_all(b"application/x-krita").unwrap();
        if with_preview {
            let mut png = Cursor::new(Vec::new());
            RgbaImage::from_pixel(48, 32, Rgba([10, 20, 30, 255]))
                .write_to(&mut png, ImageFormat::Png)
                .unwrap();
            zip.start_file(PREVIEW_ENTRY, options).unwrap();
            zip.write_all(png.get_ref()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn sample_gallery() -> (tempfile::TempDir, ScanResult) {
        let dir = tempfile::tempdir().unwrap();
        write_kra(&dir.path().join("with.kra"), true);
        write_kra(&dir.path().join("without.kra"), false);
        let result = build_gallery(dir.path());
        (dir, result)
    }

    #[test]
    fn test_explicit_folder_is_remembered() {
        let config = tempfile::tempdir().unwrap();
        let settings_path = config.path().join("settings.json");
        let gallery = tempfile::tempdir().unwrap();

        let folder = select_folder(Some(gallery.path().to_path_buf()), Some(&settings_path));

        assert_eq!(folder, gallery.path());
        assert_eq!(
            Settings::load_from(&settings_path).last_folder.as_deref(),
            Some(gallery.path())
        );
        assert_eq!(select_folder(None, Some(&settings_path)), gallery.path());
    }

    #[test]
    fn test_relative_folder_is_remembered_absolute() {
        let config = tempfile::tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        // Tests run from the package root, where src/ exists
        let folder = select_folder(Some(PathBuf::from("src")), Some(&settings_path));

        assert_eq!(folder, PathBuf::from("src"));
        let saved = Settings::load_from(&settings_path).last_folder.unwrap();
        assert!(saved.is_absolute());
        assert!(saved.ends_with("src"));
        assert!(saved.is_dir());
    }

    #[test]
    fn test_missing_folder_is_not_remembered() {
        let config = tempfile::tempdir().unwrap();
        let settings_path = config.path().join("settings.json");
        let missing = config.path().join("missing");

        let folder = select_folder(Some(missing.clone()), Some(&settings_path));

        assert_eq!(folder, missing);
        assert!(!settings_path.exists());
    }

    #[test]
    fn test_list_text_output() {
        let (_dir, result) = sample_gallery();
        let mut out = Vec::new();

        list(&result, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().any(|l| l.starts_with("with.kra\t128x128\t")));
        assert!(text.lines().any(|l| l.starts_with("without.kra\tplaceholder\t")));
    }

    #[test]
    fn test_list_json_output() {
        let (_dir, result) = sample_gallery();
        let mut out = Vec::new();

        list(&result, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        let with = items
            .iter()
            .find(|i| i["display_name"] == "with.kra")
            .unwrap();
        assert_eq!(with["has_thumbnail"], true);
        assert_eq!(with["thumbnail_size"], serde_json::json!([128, 128]));
        let without = items
            .iter()
            .find(|i| i["display_name"] == "without.kra")
            .unwrap();
        assert_eq!(without["has_thumbnail"], false);
        assert!(without["thumbnail_size"].is_null());
    }

    #[test]
    fn test_export_skips_placeholders() {
        let (_dir, result) = sample_gallery();
        let out = tempfile::tempdir().unwrap();

        let written = export(&result, out.path()).unwrap();

        assert_eq!(written, 1);
        let saved = image::open(out.path().join("with.kra.png")).unwrap();
        assert_eq!((saved.width(), saved.height()), (128, 128));
        assert!(!out.path().join("without.kra.png").exists());
    }

    #[test]
    fn test_open_missing_document_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!open_document(&dir.path().join("gone.kra")).unwrap());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["kra-gallery", "list", "/art", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::List { dir: Some(_), json: true })
        ));

        let cli = Cli::try_parse_from(["kra-gallery", "export", "/art", "/out"]).unwrap();
        match cli.command {
            Some(Command::Export { dir, out }) => {
                assert_eq!(dir, PathBuf::from("/art"));
                assert_eq!(out, PathBuf::from("/out"));
            }
            other => panic!("expected export, got {:?}", other),
        }
        assert!(Cli::try_parse_from(["kra-gallery", "export", "/out"]).is_err());

        let cli = Cli::try_parse_from(["kra-gallery"]).unwrap();
        assert!(cli.command.is_none());
    }
}
