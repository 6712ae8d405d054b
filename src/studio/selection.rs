// SPDX-License-Identifier: MPL-2.0
//! Selection manager: the current source image and its preview.

use super::handle::{DisplayHandle, HandleLedger};
use super::source::SourceFile;
use std::fmt;
use std::sync::Arc;

/// Identifies one selection. Every call that selects a file gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source-{}", self.0)
    }
}

/// The selected file together with its preview handle.
#[derive(Debug)]
pub struct SelectedSource {
    id: SourceId,
    file: SourceFile,
    preview: DisplayHandle,
}

impl SelectedSource {
    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    #[must_use]
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    #[must_use]
    pub fn preview(&self) -> &DisplayHandle {
        &self.preview
    }
}

/// Owns at most one [`SelectedSource`].
#[derive(Debug)]
pub struct SelectionManager {
    ledger: Arc<HandleLedger>,
    current: Option<SelectedSource>,
    next_id: u64,
}

impl SelectionManager {
    pub fn new(ledger: Arc<HandleLedger>) -> Self {
        Self {
            ledger,
            current: None,
            next_id: 0,
        }
    }

    /// Replaces the current source with `file`.
    ///
    /// The previous preview is released before the new one is created.
    pub fn select(&mut self, file: SourceFile) -> SourceId {
        if let Some(previous) = self.current.take() {
            previous.preview.release();
        }

        let id = SourceId(self.next_id);
        self.next_id += 1;

        let preview = self.ledger.create(file.bytes().clone());
        tracing::debug!(source = %id, name = file.name(), len = file.len(), "source selected");
        self.current = Some(SelectedSource { id, file, preview });
        id
    }

    /// Drops the current source, releasing its preview.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.preview.release();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&SelectedSource> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<SourceId> {
        self.current.as_ref().map(SelectedSource::id)
    }
}
