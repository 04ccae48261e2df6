pub mod components;
pub mod register_view;
pub mod report_view;

use blitz45::{Notice, NoticeKind, Severity};
use iced::widget::{button, center, column, container, opaque, row, space, text};
use iced::{Color, Element, Fill};

pub fn card_style(_theme: &iced::Theme, bg_color: Color, border_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: border_color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Row colours by class name: `vencendo-7d` red, `vencendo-45d` amber.
pub fn severity_colors(severity: Severity) -> (Color, Color) {
    match severity.class_name() {
        Some("vencendo-7d") => (Color::from_rgb(0.35, 0.12, 0.12), Color::from_rgb(0.8, 0.3, 0.3)),
        Some("vencendo-45d") => (Color::from_rgb(0.32, 0.26, 0.1), Color::from_rgb(0.8, 0.65, 0.25)),
        _ => (Color::from_rgb(0.16, 0.17, 0.2), Color::from_rgb(0.3, 0.32, 0.36)),
    }
}

pub fn notice_banner<'a, M: 'a>(notice: &'a Notice) -> Element<'a, M> {
    let (bg, border) = match notice.kind {
        NoticeKind::Success => (Color::from_rgb(0.2, 0.25, 0.15), Color::from_rgb(0.5, 0.6, 0.3)),
        NoticeKind::Error => (Color::from_rgb(0.3, 0.15, 0.15), Color::from_rgb(0.7, 0.35, 0.35)),
    };

    container(text(&notice.message).size(14))
        .padding(12)
        .width(Fill)
        .style(move |theme| card_style(theme, bg, border))
        .into()
}

/// Modal shown on top of `base`. With `on_cancel` it is a confirm dialog,
/// without it a plain alert.
pub fn modal<'a, M: Clone + 'a>(
    base: Element<'a, M>,
    message: &'a str,
    on_ok: M,
    on_cancel: Option<M>,
) -> Element<'a, M> {
    let mut actions = row![space().width(Fill)].spacing(10);
    if let Some(on_cancel) = on_cancel {
        actions = actions.push(
            button("Cancelar")
                .on_press(on_cancel)
                .style(button::secondary)
                .padding([8, 16]),
        );
    }
    actions = actions.push(button("OK").on_press(on_ok).padding([8, 16]));

    let dialog = container(column![text(message).size(16), actions].spacing(20))
        .padding(24)
        .max_width(460.0)
        .style(|theme| {
            card_style(
                theme,
                Color::from_rgb(0.13, 0.14, 0.17),
                Color::from_rgb(0.45, 0.45, 0.55),
            )
        });

    let backdrop = container(center(dialog)).style(|_| container::Style {
        background: Some(iced::Background::Color(Color {
            a: 0.7,
            ..Color::BLACK
        })),
        ..Default::default()
    });

    iced::widget::stack![base, opaque(backdrop)].into()
}
