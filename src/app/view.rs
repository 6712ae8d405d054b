// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! A single screen: header with the language switch, the before/after image
//! panels, the operation buttons and the download button. Toasts are stacked
//! on top.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::studio::{DisplayHandle, Operation, Studio};
use crate::ui::design_tokens::{border, opacity, palette, radius, sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use iced::widget::{button, container, Column, Container, Image, Row, Stack, Text};
use iced::{alignment, Background, Color, ContentFit, Element, Length, Theme};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub studio: &'a Studio,
    pub notifications: &'a notifications::Manager,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::XL)
        .max_width(960.0)
        .push(view_header(ctx.i18n))
        .push(
            button(Text::new(ctx.i18n.tr("pick-file")).size(typography::BODY_LG))
                .on_press(Message::OpenFileDialog)
                .padding(spacing::SM),
        )
        .push(view_panels(ctx.i18n, ctx.studio))
        .push(view_actions(ctx.i18n, ctx.studio));

    let page = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new().push(page).push(toasts).into()
}

fn view_header(i18n: &I18n) -> Element<'_, Message> {
    let titles = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(i18n.tr("window-title")).size(typography::TITLE_LG))
        .push(Text::new(i18n.tr("app-subtitle")).size(typography::BODY));

    let languages = i18n
        .available_locales
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, locale| {
            let is_current = locale == i18n.current_locale();
            row.push(
                button(Text::new(locale.language.as_str().to_uppercase()).size(typography::CAPTION))
                    .on_press_maybe((!is_current).then(|| Message::LanguageSelected(locale.clone())))
                    .padding([spacing::XXS, spacing::XS])
                    .style(if is_current {
                        button::primary
                    } else {
                        button::secondary
                    }),
            )
        });

    Row::new()
        .align_y(alignment::Vertical::Center)
        .push(Container::new(titles).width(Length::Fill))
        .push(languages)
        .into()
}

fn view_panels<'a>(i18n: &'a I18n, studio: &'a Studio) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::LG)
        .push(view_panel(
            i18n.tr("panel-before"),
            studio.preview(),
            i18n.tr("placeholder-upload"),
        ))
        .push(view_panel(
            i18n.tr("panel-after"),
            studio.result(),
            i18n.tr("placeholder-result"),
        ))
        .into()
}

fn view_panel<'a>(
    label: String,
    image: Option<&'a DisplayHandle>,
    placeholder: String,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match image {
        Some(handle) => Image::new(handle.image().clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::IMAGE_MAX_HEIGHT))
            .into(),
        None => Container::new(Text::new(placeholder).size(typography::BODY))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PLACEHOLDER_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(label).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::FillPortion(1))
    .padding(spacing::MD)
    .style(panel_style)
    .into()
}

fn view_actions<'a>(i18n: &'a I18n, studio: &'a Studio) -> Element<'a, Message> {
    let busy_label = i18n.tr("action-processing");

    let operations = Operation::ALL.iter().fold(
        Row::new().spacing(spacing::MD),
        |row, &operation| {
            let label = if studio.is_busy() {
                busy_label.clone()
            } else {
                i18n.tr(operation.label_key())
            };
            row.push(
                button(
                    Text::new(label)
                        .size(typography::BODY_LG)
                        .width(Length::Fill)
                        .center(),
                )
                .on_press_maybe(studio.can_trigger().then_some(Message::Trigger(operation)))
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .width(Length::FillPortion(1))
                .padding(spacing::SM)
                .style(operation_button_style(operation_accent(operation))),
            )
        },
    );

    let download = button(Text::new(i18n.tr("download")).size(typography::BODY_LG))
        .on_press_maybe(studio.result().map(|_| Message::Download))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding(spacing::SM)
        .style(button::success);

    Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(operations)
        .push(download)
        .into()
}

/// Accent colour of the button triggering `operation`.
fn operation_accent(operation: Operation) -> Color {
    match operation {
        Operation::RemoveBackground => palette::PRIMARY_500,
        Operation::BlurBackground => palette::TEAL_500,
    }
}

fn operation_button_style(accent: Color) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        let background = match status {
            button::Status::Disabled => accent.scale_alpha(opacity::OVERLAY_MEDIUM),
            _ => accent,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette::WHITE,
            ..button::primary(theme, status)
        }
    }
}

fn panel_style(theme: &Theme) -> container::Style {
    let background = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(iced::Background::Color(background)),
        border: iced::Border {
            color: palette::GRAY_200,
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
