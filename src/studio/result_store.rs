// SPDX-License-Identifier: MPL-2.0
//! Result store: the most recent processed image.

use super::handle::DisplayHandle;
use crate::error::Result;
use bytes::Bytes;
use std::path::Path;

/// File name suggested when saving a processed image.
pub const DOWNLOAD_FILE_NAME: &str = "processed_image.jpg";

/// Holds at most one processed image.
#[derive(Debug, Default)]
pub struct ResultStore {
    current: Option<DisplayHandle>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle` as the current result, releasing the previous one first.
    pub fn replace(&mut self, handle: DisplayHandle) {
        if let Some(previous) = self.current.take() {
            previous.release();
        }
        self.current = Some(handle);
    }

    /// Releases the current result, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.release();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&DisplayHandle> {
        self.current.as_ref()
    }

    /// Exposes the current result for saving, without touching the store.
    #[must_use]
    pub fn download(&self) -> Option<Download> {
        self.current.as_ref().map(|handle| Download {
            file_name: DOWNLOAD_FILE_NAME,
            bytes: handle.bytes().clone(),
        })
    }
}

/// A processed image ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    file_name: &'static str,
    bytes: Bytes,
}

impl Download {
    /// Suggested file name for the save dialog.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Writes the image to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.bytes).await?;
        Ok(())
    }
}
