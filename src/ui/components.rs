//! Reusable UI components.

use iced::widget::{button, column, container, row, space, text, Column, Row, Text};
use iced::{Color, Element, Fill, FillPortion};

pub fn label_text(label: &str) -> Text<'_> {
    text(label).size(15).color(Color::from_rgb(0.7, 0.7, 0.7))
}

pub fn form_field<'a, M: 'a>(label: &'a str, input: impl Into<Element<'a, M>>) -> Column<'a, M> {
    column![label_text(label), input.into()].spacing(6)
}

/// One table cell; widths are relative so header and rows line up.
pub fn cell<'a>(value: impl text::IntoFragment<'a>, portion: u16) -> Text<'a> {
    text(value).size(14).width(FillPortion(portion))
}

pub fn card_header<'a, M: Clone + 'a>(title: &'a str, actions: Row<'a, M>) -> Row<'a, M> {
    row![text(title).size(22), space().width(Fill), actions]
        .spacing(10)
        .align_y(iced::Alignment::Center)
}

pub fn card_container<'a, M: 'a>(
    content: impl Into<Element<'a, M>>,
    bg: Color,
    border: Color,
) -> container::Container<'a, M> {
    container(content)
        .padding(20)
        .width(Fill)
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(bg)),
            border: iced::Border {
                color: border,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
}

pub fn tab_button<M: Clone + 'static>(
    label: &'static str,
    active: bool,
    on_press: M,
) -> button::Button<'static, M> {
    button(label)
        .on_press(on_press)
        .padding([8, 16])
        .style(if active {
            button::primary
        } else {
            button::secondary
        })
}
