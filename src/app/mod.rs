// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires the studio (selection, dispatch, results) to the
//! service client, localization and toasts, and translates messages into side
//! effects like file dialogs, remote calls or config persistence.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::service::ServiceClient;
use crate::studio::Studio;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    /// `false` when settings.toml exists but could not be read, so saving
    /// defaults would overwrite the user's file.
    persist_config: bool,
    studio: Studio,
    /// `None` when the configured service URL is unusable.
    client: Option<ServiceClient>,
    theme_mode: ThemeMode,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("studio", &self.studio)
            .field("service", &self.client.as_ref().map(ServiceClient::base_url))
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
///
/// Close requests are delivered as messages so images are released first.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(mut flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.take());

    // iced requires an `Fn` boot function; the flags are consumed on first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            config: Config::default(),
            persist_config: true,
            studio: Studio::new(),
            client: None,
            theme_mode: ThemeMode::System,
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Initializes application state and optionally starts loading the image
    /// given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let mut app = Self::with_config(config, &flags);

        if let Some(key) = config_warning {
            app.persist_config = false;
            app.notifications
                .push(notifications::Notification::error(key));
        }

        let task = update::handle_selected_path(flags.file_path.map(std::path::PathBuf::from));
        (app, task)
    }

    /// Builds the application from an already loaded configuration.
    fn with_config(config: Config, flags: &Flags) -> Self {
        let i18n = I18n::new(flags.lang.clone(), &config);
        let studio = Studio::new().with_stale_policy(config.service.stale_policy());
        let mut notifications = notifications::Manager::new();

        let settings = config.service_settings(flags.api_url.as_deref());
        let client = match ServiceClient::new(&settings) {
            Ok(client) => {
                tracing::info!(base_url = client.base_url(), "processing service configured");
                Some(client)
            }
            Err(err) => {
                tracing::error!(base_url = %settings.base_url, error = %err, "unusable service URL");
                notifications.push(
                    notifications::Notification::error("notification-service-config-error")
                        .with_detail(err.i18n_key()),
                );
                None
            }
        };

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            persist_config: true,
            studio,
            client,
            notifications,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.studio.source() {
            Some(source) => format!("{} - {app_name}", source.file().name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            i18n: &mut self.i18n,
            config: &mut self.config,
            persist_config: self.persist_config,
            studio: &mut self.studio,
            client: self.client.as_ref(),
            notifications: &mut self.notifications,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.context();

        match message {
            Message::OpenFileDialog => update::handle_open_file_dialog(),
            Message::OpenFileDialogResult(path) => update::handle_selected_path(path),
            Message::FileDropped(path) => update::handle_selected_path(Some(path)),
            Message::SourceLoaded(result) => update::handle_source_loaded(&mut ctx, result),
            Message::Trigger(operation) => update::handle_trigger(&mut ctx, operation),
            Message::TransformSettled(outcome) => {
                update::handle_transform_settled(&mut ctx, outcome)
            }
            Message::Download => update::handle_download(&mut ctx),
            Message::DownloadDialogResult(path) => {
                update::handle_download_dialog_result(&mut ctx, path)
            }
            Message::DownloadWritten(result) => update::handle_download_written(&mut ctx, result),
            Message::LanguageSelected(locale) => {
                update::handle_language_selected(&mut ctx, locale)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_) => {
                ctx.notifications.tick();
                Task::none()
            }
            Message::WindowCloseRequested(_) => update::handle_window_close(&mut ctx),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            studio: &self.studio,
            notifications: &self.notifications,
        })
    }
}
