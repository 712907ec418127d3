//! Document I/O for frame runs

use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a logo PDF, sizing it from its first page
pub async fn load_logo(path: impl AsRef<Path>) -> Result<LogoAsset> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_string());
    let logo = tokio::task::spawn_blocking(move || LogoAsset::from_pdf_bytes(name, bytes)).await??;
    Ok(logo)
}

/// Save a document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || write_document(doc, &path)).await?
}

/// Serialize a finished document and move it into place.
///
/// The bytes go to a temporary file next to `path` that is renamed over the
/// target, so a failed write never leaves a truncated PDF behind.
pub(crate) fn write_document(mut doc: Document, path: &Path) -> Result<()> {
    let bytes = serialize(&mut doc)?;
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn serialize(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn one_page() -> Document {
        crate::render::PageBuilder::new(100.0, 50.0).finish()
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.pdf");
        std::fs::write(&path, b"stale").unwrap();

        write_document(one_page(), &path).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_write_leaves_target_untouched() {
        let dir = TempDir::new().unwrap();
        // A directory sits where the PDF should go, so the rename fails
        let path = dir.path().join("run.pdf");
        std::fs::create_dir(&path).unwrap();

        assert!(write_document(one_page(), &path).is_err());
        assert!(path.is_dir());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs").join("run.pdf");

        write_document(one_page(), &path).unwrap();
        assert!(path.is_file());
    }
}
