// SPDX-License-Identifier: MPL-2.0
//! Source images picked by the user.

use bytes::Bytes;
use image_rs::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};

/// File extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff", "ico",
];

/// Media type sent when the file extension is unknown.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Errors raised while turning a picked file into a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The file extension is not one of the supported image types.
    NotAnImage { path: PathBuf },
    /// The file could not be read.
    Unreadable { path: PathBuf, reason: String },
    /// The file exists but contains no data.
    Empty { path: PathBuf },
}

impl SelectionError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SelectionError::NotAnImage { .. } => "notification-selection-not-image",
            SelectionError::Unreadable { .. } => "notification-selection-unreadable",
            SelectionError::Empty { .. } => "notification-selection-empty",
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotAnImage { path } => {
                write!(f, "Not a supported image: {}", path.display())
            }
            SelectionError::Unreadable { path, reason } => {
                write!(f, "Cannot read {}: {reason}", path.display())
            }
            SelectionError::Empty { path } => write!(f, "File is empty: {}", path.display()),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Returns `true` if the path has one of the supported image extensions.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Returns the media type matching the file name's extension.
#[must_use]
pub fn media_type_for(name: &str) -> &'static str {
    ImageFormat::from_path(name).map_or(FALLBACK_MEDIA_TYPE, |format| format.to_mime_type())
}

/// A local image chosen by the user, held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    media_type: &'static str,
    bytes: Bytes,
}

impl SourceFile {
    /// Creates a source from a file name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        Self {
            media_type: media_type_for(&name),
            name,
            bytes: bytes.into(),
        }
    }

    /// Reads a picked file from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the path is not a supported image,
    /// cannot be read, or is empty.
    pub async fn load(path: PathBuf) -> Result<Self, SelectionError> {
        if !is_supported_image(&path) {
            return Err(SelectionError::NotAnImage { path });
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(SelectionError::Unreadable {
                    path,
                    reason: err.to_string(),
                })
            }
        };
        if bytes.is_empty() {
            return Err(SelectionError::Empty { path });
        }

        let name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(name, bytes))
    }

    /// Returns the file name (without directories).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the media type derived from the file name.
    #[must_use]
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for("photo.png"), "image/png");
        assert_eq!(media_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(media_type_for("notes.txt"), FALLBACK_MEDIA_TYPE);
        assert_eq!(media_type_for("no_extension"), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn supported_image_check_ignores_case() {
        assert!(is_supported_image(Path::new("/tmp/a.PNG")));
        assert!(is_supported_image(Path::new("b.webp")));
        assert!(!is_supported_image(Path::new("c.pdf")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn new_source_keeps_name_and_bytes() {
        let source = SourceFile::new("photo.png", vec![9u8, 8, 7]);
        assert_eq!(source.name(), "photo.png");
        assert_eq!(source.media_type(), "image/png");
        assert_eq!(source.len(), 3);
    }

    #[tokio::test]
    async fn load_reads_file_contents() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"png-bytes").expect("failed to write fixture");

        let source = SourceFile::load(path).await.expect("load should succeed");
        assert_eq!(source.name(), "photo.png");
        assert_eq!(source.bytes().as_ref(), b"png-bytes");
    }

    #[tokio::test]
    async fn load_rejects_non_images() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").expect("failed to write fixture");

        let err = SourceFile::load(path).await.unwrap_err();
        assert!(matches!(err, SelectionError::NotAnImage { .. }));
        assert_eq!(err.i18n_key(), "notification-selection-not-image");
    }

    #[tokio::test]
    async fn load_reports_missing_and_empty_files() {
        let dir = tempdir().expect("failed to create temp dir");

        let missing = dir.path().join("missing.png");
        let err = SourceFile::load(missing).await.unwrap_err();
        assert!(matches!(err, SelectionError::Unreadable { .. }));

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").expect("failed to write fixture");
        let err = SourceFile::load(empty).await.unwrap_err();
        assert!(matches!(err, SelectionError::Empty { .. }));
    }
}
