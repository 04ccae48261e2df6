use crate::ui::{self, components, register_view, report_view};
use blitz45::services::registration::{self, PendingRegistration, RegistrationOutcome};
use blitz45::services::report::{self, CLEAR_WARNING};
use blitz45::services::{RegistrationForm, Report};
use blitz45::{BlitzError, Config, Confirmation, FileStorage, Notice, RecordStore, SystemClock};
use iced::widget::{column, container, operation, row, scrollable, space, text};
use iced::{Element, Fill, Task};
use std::time::Duration;
use tracing::{debug, error};

const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Register,
    Report,
}

#[derive(Debug, Clone)]
pub enum Message {
    PageSelected(Page),
    FieldChanged(register_view::Field, String),
    Submit,
    DialogAnswered(Confirmation),
    ExportCsv,
    ClearAll,
    Refresh,
    NoticeExpired(u64),
}

/// What the modal overlay is currently asking.
#[derive(Debug, Clone)]
enum Dialog {
    ConfirmRegistration {
        pending: PendingRegistration,
        prompt: String,
    },
    ConfirmClear,
    Alert(String),
}

pub struct State {
    config: Config,
    store: RecordStore<FileStorage>,
    clock: SystemClock,
    page: Page,
    form: RegistrationForm,
    report: Report,
    notice: Option<(u64, Notice)>,
    notice_seq: u64,
    dialog: Option<Dialog>,
}

impl State {
    pub fn new(config: Config, storage: FileStorage) -> Self {
        let store = RecordStore::new(storage);
        let report = report::load_report(&store, config.urgency_mode, &SystemClock);
        Self {
            config,
            store,
            clock: SystemClock,
            page: Page::Register,
            form: RegistrationForm::default(),
            report,
            notice: None,
            notice_seq: 0,
            dialog: None,
        }
    }

    fn reload_report(&mut self) {
        self.report = report::load_report(&self.store, self.config.urgency_mode, &self.clock);
    }

    /// Shows `notice` and schedules its dismissal. A newer notice outlives
    /// the timers of the ones it replaced.
    fn show_notice(&mut self, notice: Notice) -> Task<Message> {
        self.notice_seq += 1;
        let seq = self.notice_seq;
        self.notice = Some((seq, notice));
        Task::perform(tokio::time::sleep(NOTICE_TTL), move |_| {
            Message::NoticeExpired(seq)
        })
    }

    fn show_error(&mut self, err: &BlitzError) -> Task<Message> {
        error!("{}", err);
        self.show_notice(Notice::error(err.to_portuguese()))
    }

    fn finish_registration(&mut self, outcome: RegistrationOutcome) -> Task<Message> {
        let notice_task = outcome
            .notice()
            .map(|n| self.show_notice(n))
            .unwrap_or_else(Task::none);

        match outcome {
            RegistrationOutcome::Committed(_) => {
                self.form = RegistrationForm::default();
                self.reload_report();
                Task::batch(vec![
                    notice_task,
                    operation::focus(register_view::NAME_INPUT_ID),
                ])
            }
            RegistrationOutcome::NeedsConfirmation(pending) => {
                let prompt = pending.prompt();
                self.dialog = Some(Dialog::ConfirmRegistration { pending, prompt });
                notice_task
            }
            RegistrationOutcome::Cancelled => notice_task,
        }
    }
}

pub fn init(config: Config, storage: FileStorage) -> (State, Task<Message>) {
    (
        State::new(config, storage),
        operation::focus(register_view::NAME_INPUT_ID),
    )
}

pub fn update(state: &mut State, message: Message) -> Task<Message> {
    match message {
        Message::PageSelected(page) => {
            state.page = page;
            match page {
                Page::Report => {
                    state.reload_report();
                    Task::none()
                }
                Page::Register => operation::focus(register_view::NAME_INPUT_ID),
            }
        }
        Message::FieldChanged(field, value) => {
            let form = &mut state.form;
            match field {
                register_view::Field::Name => form.name = value,
                register_view::Field::Code => form.code = value,
                register_view::Field::Lot => form.lot = value,
                register_view::Field::ExpirationDate => form.expiration_date = value,
            }
            Task::none()
        }
        Message::Submit => {
            if state.dialog.is_some() {
                return Task::none();
            }
            match registration::submit(&mut state.store, &state.form, &state.clock) {
                Ok(outcome) => state.finish_registration(outcome),
                Err(e) => state.show_error(&e),
            }
        }
        Message::DialogAnswered(answer) => match state.dialog.take() {
            Some(Dialog::ConfirmRegistration { pending, .. }) => {
                match registration::resolve(&mut state.store, pending, answer, &state.clock) {
                    Ok(outcome) => state.finish_registration(outcome),
                    Err(e) => state.show_error(&e),
                }
            }
            Some(Dialog::ConfirmClear) => match report::clear_all(&mut state.store, answer) {
                Ok(Some(notice)) => {
                    state.reload_report();
                    state.dialog = Some(Dialog::Alert(notice.message));
                    Task::none()
                }
                Ok(None) => Task::none(),
                Err(e) => state.show_error(&e),
            },
            Some(Dialog::Alert(_)) | None => Task::none(),
        },
        Message::ExportCsv => {
            match report::export_csv(
                &state.store,
                &state.config.export_dir,
                state.config.urgency_mode,
                &state.clock,
            ) {
                Ok(path) => state.show_notice(Notice::success(format!(
                    "Relatório exportado: {}",
                    path.display()
                ))),
                Err(BlitzError::NothingToExport) => {
                    let message = BlitzError::NothingToExport.to_portuguese();
                    state.dialog = Some(Dialog::Alert(message));
                    Task::none()
                }
                Err(e) => state.show_error(&e),
            }
        }
        Message::ClearAll => {
            state.dialog = Some(Dialog::ConfirmClear);
            Task::none()
        }
        Message::Refresh => {
            state.reload_report();
            Task::none()
        }
        Message::NoticeExpired(seq) => {
            if matches!(state.notice, Some((current, _)) if current == seq) {
                debug!("Notice {} dismissed", seq);
                state.notice = None;
            }
            Task::none()
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let mut content = column![view_header(state.page)].spacing(15).padding(15);

    if let Some((_, notice)) = &state.notice {
        content = content.push(ui::notice_banner(notice));
    }

    content = content.push(match state.page {
        Page::Register => register_view::view(&state.form, Message::FieldChanged, Message::Submit),
        Page::Report => report_view::view(
            &state.report,
            state.config.urgency_mode,
            Message::ExportCsv,
            Message::ClearAll,
            Message::Refresh,
        ),
    });

    let base: Element<'_, Message> = container(scrollable(content))
        .width(Fill)
        .height(Fill)
        .into();

    match &state.dialog {
        None => base,
        Some(Dialog::ConfirmRegistration { prompt, .. }) => ui::modal(
            base,
            prompt,
            Message::DialogAnswered(Confirmation::Accepted),
            Some(Message::DialogAnswered(Confirmation::Declined)),
        ),
        Some(Dialog::ConfirmClear) => ui::modal(
            base,
            CLEAR_WARNING,
            Message::DialogAnswered(Confirmation::Accepted),
            Some(Message::DialogAnswered(Confirmation::Declined)),
        ),
        Some(Dialog::Alert(message)) => ui::modal(
            base,
            message,
            Message::DialogAnswered(Confirmation::Accepted),
            None,
        ),
    }
}

fn view_header(page: Page) -> Element<'static, Message> {
    row![
        text("BLITZ 45 Dias")
            .size(26)
            .color(iced::Color::from_rgb(0.9, 0.9, 1.0)),
        space().width(Fill),
        components::tab_button(
            "Registro",
            page == Page::Register,
            Message::PageSelected(Page::Register),
        ),
        components::tab_button(
            "Relatório",
            page == Page::Report,
            Message::PageSelected(Page::Report),
        ),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center)
    .into()
}
