// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::studio::{Operation, SelectionError, SourceFile, TransformOutcome};
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;
use unic_langid::LanguageIdentifier;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the image picker.
    OpenFileDialog,
    /// Result from the image picker.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A picked or dropped file finished loading.
    SourceLoaded(Result<SourceFile, SelectionError>),
    /// One of the operation buttons was pressed.
    Trigger(Operation),
    /// The remote call for the request in flight completed.
    TransformSettled(TransformOutcome),
    /// Open the save dialog for the processed image.
    Download,
    /// Result from the save dialog.
    DownloadDialogResult(Option<PathBuf>),
    /// The processed image was written (or not) to the chosen path.
    DownloadWritten(Result<PathBuf, Error>),
    LanguageSelected(LanguageIdentifier),
    Notification(notifications::NotificationMessage),
    Tick(Instant), // Periodic tick for notification auto-dismiss
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `ja`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preselect on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SALES_STUDIO_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional service base URL.
    /// Takes precedence over `SALES_STUDIO_API_URL` and settings.toml.
    pub api_url: Option<String>,
}
