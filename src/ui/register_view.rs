//! Registration form card.

use crate::ui::components;
use blitz45::domain::STALENESS_THRESHOLD_DAYS;
use blitz45::services::RegistrationForm;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Color, Element, Fill};

/// Id of the first field, focused on start-up and after each commit.
pub const NAME_INPUT_ID: &str = "produto-nome";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Code,
    Lot,
    ExpirationDate,
}

pub fn view<'a, M: Clone + 'a>(
    form: &'a RegistrationForm,
    on_change: fn(Field, String) -> M,
    on_submit: M,
) -> Element<'a, M> {
    let input = |placeholder: &'a str, value: &'a str, field: Field| {
        text_input(placeholder, value)
            .on_input(move |v| on_change(field, v))
            .on_submit(on_submit.clone())
            .padding(10)
            .size(16)
    };

    let content = column![
        text("Registrar produto").size(22),
        text(format!(
            "Produtos com vencimento em até {} dias são registrados direto; \
             acima disso é pedida confirmação.",
            STALENESS_THRESHOLD_DAYS
        ))
        .size(13)
        .color(Color::from_rgb(0.6, 0.6, 0.6)),
        components::form_field(
            "Nome do produto",
            input("Ex.: Leite integral 1L", form.name.as_str(), Field::Name).id(NAME_INPUT_ID),
        ),
        row![
            components::form_field(
                "Código de barras",
                input("7891000100103", form.code.as_str(), Field::Code),
            )
            .width(Fill),
            components::form_field("Lote", input("L2309", form.lot.as_str(), Field::Lot)).width(Fill),
        ]
        .spacing(15),
        components::form_field(
            "Data de vencimento",
            input(
                "AAAA-MM-DD ou DD/MM/AAAA",
                form.expiration_date.as_str(),
                Field::ExpirationDate,
            ),
        ),
        container(
            button("Registrar")
                .on_press(on_submit.clone())
                .padding([10, 24]),
        )
        .center_x(Fill),
    ]
    .spacing(16);

    components::card_container(
        content,
        Color::from_rgb(0.15, 0.2, 0.25),
        Color::from_rgb(0.3, 0.4, 0.5),
    )
    .into()
}
