// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of `App`
//! it may touch and returns the follow-up [`Task`].

use super::{notifications, Message};
use crate::config::{self, Config};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::service::{ServiceClient, TransformRequestError};
use crate::studio::{
    Operation, SelectionError, SourceFile, Studio, TransformOutcome, TransformRequest,
    IMAGE_EXTENSIONS,
};
use iced::Task;
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

/// Mutable view over the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub config: &'a mut Config,
    /// Whether config changes may be written back to disk.
    pub persist_config: bool,
    pub studio: &'a mut Studio,
    pub client: Option<&'a ServiceClient>,
    pub notifications: &'a mut notifications::Manager,
}

/// Opens the image picker.
pub fn handle_open_file_dialog() -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Starts loading a picked or dropped file.
///
/// A cancelled dialog (`None`) leaves the current selection untouched.
pub fn handle_selected_path(path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };
    tracing::debug!(path = %path.display(), "loading source image");
    Task::perform(SourceFile::load(path), Message::SourceLoaded)
}

pub fn handle_source_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<SourceFile, SelectionError>,
) -> Task<Message> {
    match result {
        Ok(file) => ctx.studio.select_file(Some(file)),
        Err(err) => {
            tracing::error!(error = %err, "failed to select image");
            ctx.notifications
                .push(notifications::Notification::error(err.i18n_key()));
        }
    }
    Task::none()
}

/// Starts `operation` on the current image and sends it to the service.
pub fn handle_trigger(ctx: &mut UpdateContext<'_>, operation: Operation) -> Task<Message> {
    dispatch_transform(ctx, operation).map_or_else(Task::none, |(_, task)| task)
}

/// Packages the request for `operation` and builds the task that submits it.
///
/// Returns `None` when the studio refuses the trigger. Without a usable client
/// the request fails straight away, which still goes through
/// [`Studio::settle`] so the busy state is cleared.
pub(super) fn dispatch_transform(
    ctx: &mut UpdateContext<'_>,
    operation: Operation,
) -> Option<(TransformRequest, Task<Message>)> {
    let request = ctx.studio.trigger(operation)?;
    let sent = request.clone();

    let task = match ctx.client {
        Some(client) => {
            let client = client.clone();
            Task::perform(
                async move { client.submit(request).await },
                Message::TransformSettled,
            )
        }
        None => {
            let error = TransformRequestError::InvalidEndpoint("no service configured".into());
            Task::done(Message::TransformSettled(TransformOutcome::of(
                &request,
                Err(error),
            )))
        }
    };
    Some((sent, task))
}

pub fn handle_transform_settled(
    ctx: &mut UpdateContext<'_>,
    outcome: TransformOutcome,
) -> Task<Message> {
    ctx.studio.settle(outcome, &mut *ctx.notifications);
    Task::none()
}

/// Opens the save dialog for the processed image, if there is one.
pub fn handle_download(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(download) = ctx.studio.download() else {
        return Task::none();
    };
    let file_name = download.file_name();

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_file_name(file_name)
                .add_filter("JPEG", &["jpg", "jpeg"])
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::DownloadDialogResult,
    )
}

/// Writes the processed image to the path chosen in the save dialog.
pub fn handle_download_dialog_result(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };
    // The result may have been cleared while the dialog was open.
    let Some(download) = ctx.studio.download() else {
        return Task::none();
    };

    Task::perform(
        async move {
            download.write_to(&path).await?;
            Ok::<_, Error>(path)
        },
        Message::DownloadWritten,
    )
}

pub fn handle_download_written(
    ctx: &mut UpdateContext<'_>,
    result: Result<PathBuf, Error>,
) -> Task<Message> {
    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), "processed image saved");
            ctx.notifications.push(
                notifications::Notification::success("notification-download-success")
                    .with_arg("path", path.display().to_string()),
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to save processed image");
            ctx.notifications.push(
                notifications::Notification::error("notification-download-error")
                    .with_detail(err.i18n_key()),
            );
        }
    }
    Task::none()
}

/// Switches the UI language and remembers the choice in settings.toml.
///
/// Nothing is written when settings.toml could not be read at startup.
pub fn handle_language_selected(
    ctx: &mut UpdateContext<'_>,
    locale: LanguageIdentifier,
) -> Task<Message> {
    if ctx.i18n.current_locale() == &locale {
        return Task::none();
    }
    ctx.i18n.set_locale(locale.clone());
    ctx.config.general.language = Some(locale.to_string());

    if !ctx.persist_config {
        tracing::warn!(%locale, "settings.toml unreadable, language change not saved");
        return Task::none();
    }

    if let Err(err) = config::save(ctx.config) {
        tracing::warn!(error = %err, "failed to save language preference");
        ctx.notifications
            .push(notifications::Notification::error("notification-config-save-error"));
    }
    Task::none()
}

/// Releases every image before the window goes away.
pub fn handle_window_close(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.studio.teardown();
    ctx.notifications.clear();
    iced::exit()
}

