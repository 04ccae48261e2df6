//! Report table card.

use crate::ui::{self, components};
use blitz45::services::report::EMPTY_REPORT_MESSAGE;
use blitz45::services::{Report, ReportRow};
use blitz45::UrgencyMode;
use iced::widget::{button, column, container, row, text, Column};
use iced::{Color, Element, Fill};

const COLUMNS: [(&str, u16); 6] = [
    ("Produto", 4),
    ("Código", 3),
    ("Lote", 2),
    ("Vencimento", 2),
    ("Dias", 1),
    ("Registrado em", 3),
];

fn header_row<'a, M: 'a>() -> Element<'a, M> {
    let mut header = row![].spacing(8);
    for (title, portion) in COLUMNS {
        header = header.push(
            components::cell(title, portion).color(Color::from_rgb(0.7, 0.7, 0.7)),
        );
    }
    container(header).padding([6, 10]).into()
}

fn record_row<'a, M: 'a>(r: &'a ReportRow) -> Element<'a, M> {
    let (bg, border) = ui::severity_colors(r.severity);

    container(
        row![
            components::cell(r.name.as_str(), COLUMNS[0].1),
            components::cell(r.code.as_str(), COLUMNS[1].1),
            components::cell(r.lot.as_str(), COLUMNS[2].1),
            components::cell(r.expiration.as_str(), COLUMNS[3].1),
            components::cell(r.days_remaining.to_string(), COLUMNS[4].1),
            components::cell(r.registered.as_str(), COLUMNS[5].1),
        ]
        .spacing(8),
    )
    .padding([6, 10])
    .width(Fill)
    .style(move |theme| ui::card_style(theme, bg, border))
    .into()
}

pub fn view<'a, M: Clone + 'a>(
    report: &'a Report,
    mode: UrgencyMode,
    on_export: M,
    on_clear: M,
    on_refresh: M,
) -> Element<'a, M> {
    let actions = row![
        button("Atualizar").on_press(on_refresh).padding([6, 12]),
        button("Exportar CSV").on_press(on_export).padding([6, 12]),
        button("Limpar dados")
            .on_press(on_clear)
            .style(button::danger)
            .padding([6, 12]),
    ]
    .spacing(8);

    let caption = match mode {
        UrgencyMode::Frozen => "Dias restantes calculados no momento do registro.",
        UrgencyMode::Live => "Dias restantes recalculados para hoje.",
    };

    let body: Element<'a, M> = match report {
        Report::Empty => container(text(EMPTY_REPORT_MESSAGE).size(15))
            .padding(20)
            .center_x(Fill)
            .into(),
        Report::Rows(rows) => {
            Column::with_children(rows.iter().map(record_row::<M>))
                .spacing(4)
                .into()
        }
    };

    let content = column![
        components::card_header("Relatório", actions),
        text(caption)
            .size(13)
            .color(Color::from_rgb(0.6, 0.6, 0.6)),
        header_row::<M>(),
        body,
    ]
    .spacing(12);

    components::card_container(
        content,
        Color::from_rgb(0.15, 0.25, 0.2),
        Color::from_rgb(0.3, 0.5, 0.4),
    )
    .into()
}
