use std::path::{Path, PathBuf};

use anyhow::Context;
use image::ImageFormat;
use leafscan_types::SelectedFile;

/// Terminal stand-in for a file input. Like a browser picker it keeps the
/// last chosen path and raises no change for the same path until cleared.
#[derive(Debug, Default)]
pub struct FilePicker {
    retained: Option<PathBuf>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the file at `path`. `Ok(None)` when it is the path already held.
    pub async fn pick(&mut self, path: &Path) -> anyhow::Result<Option<SelectedFile>> {
        if self.retained.as_deref() == Some(path) {
            return Ok(None);
        }

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Could not read {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.retained = Some(path.to_path_buf());
        Ok(Some(SelectedFile::new(name, declared_mime(path), bytes)))
    }

    pub fn retained(&self) -> Option<&Path> {
        self.retained.as_deref()
    }

    pub fn clear(&mut self) {
        self.retained = None;
    }
}

/// Content type as a browser would declare it, from the file extension
pub fn declared_mime(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}
