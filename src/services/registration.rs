//! Registration flow - business logic only.
//!
//! A submission inside the staleness criterion is committed straight away.
//! Anything further out comes back as [`RegistrationOutcome::NeedsConfirmation`]
//! and is only stored once [`resolve`] receives [`Confirmation::Accepted`].

use crate::domain::{
    days_until, parse_calendar_date, Clock, Confirmation, Notice, ProductRecord,
    STALENESS_THRESHOLD_DAYS,
};
use crate::error::{BlitzError, Result};
use crate::repositories::{KeyValueStorage, RecordStore};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

pub const REGISTERED_MESSAGE: &str = "Produto registrado com sucesso!";
pub const CANCELLED_MESSAGE: &str = "Registro cancelado pelo usuário.";

/// Raw values typed into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub code: String,
    pub lot: String,
    pub expiration_date: String,
}

/// A validated submission waiting for the user to override the criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    name: String,
    code: String,
    lot: String,
    expiration_date: NaiveDate,
    days_remaining: i64,
}

impl PendingRegistration {
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining
    }

    pub fn prompt(&self) -> String {
        format!(
            "ATENÇÃO: Este produto vence em {} dias (fora do critério de {} dias).\n\n\
             Deseja registrar mesmo assim?",
            self.days_remaining, STALENESS_THRESHOLD_DAYS
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Committed(ProductRecord),
    NeedsConfirmation(PendingRegistration),
    Cancelled,
}

impl RegistrationOutcome {
    /// Notice to show for a finished submission.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Committed(_) => Some(Notice::success(REGISTERED_MESSAGE)),
            Self::Cancelled => Some(Notice::error(CANCELLED_MESSAGE)),
            Self::NeedsConfirmation(_) => None,
        }
    }
}

fn validate(form: &RegistrationForm, clock: &impl Clock) -> Result<PendingRegistration> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(BlitzError::MissingName);
    }
    let expiration_date = parse_calendar_date(&form.expiration_date)?;
    let days_remaining = days_until(expiration_date, clock.now_local());

    Ok(PendingRegistration {
        name: name.to_string(),
        code: form.code.trim().to_string(),
        lot: form.lot.trim().to_string(),
        expiration_date,
        days_remaining,
    })
}

fn commit<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    pending: PendingRegistration,
    clock: &impl Clock,
) -> Result<RegistrationOutcome> {
    let record = ProductRecord {
        name: pending.name,
        code: pending.code,
        lot: pending.lot,
        expiration_date: pending.expiration_date,
        days_remaining: pending.days_remaining,
        registered_at: clock.now_utc(),
    };

    let count = store.append(record.clone())?;
    info!(
        days_remaining = record.days_remaining,
        total = count,
        "Product registered"
    );
    Ok(RegistrationOutcome::Committed(record))
}

/// Validates a form submission and commits it when inside the criterion.
#[instrument(skip_all, fields(name = %form.name))]
pub fn submit<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    form: &RegistrationForm,
    clock: &impl Clock,
) -> Result<RegistrationOutcome> {
    let pending = validate(form, clock)?;

    if pending.days_remaining <= STALENESS_THRESHOLD_DAYS {
        return commit(store, pending, clock);
    }

    debug!(
        days_remaining = pending.days_remaining,
        "Outside criterion, confirmation required"
    );
    Ok(RegistrationOutcome::NeedsConfirmation(pending))
}

/// Finishes a submission that needed an override.
pub fn resolve<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    pending: PendingRegistration,
    answer: Confirmation,
    clock: &impl Clock,
) -> Result<RegistrationOutcome> {
    if answer.is_accepted() {
        commit(store, pending, clock)
    } else {
        debug!("Registration declined by user");
        Ok(RegistrationOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, NoticeKind};
    use crate::repositories::{MemoryStorage, STORAGE_KEY};

    fn clock() -> FixedClock {
        FixedClock::at(2026, 10, 14, 9, 30)
    }

    fn form(name: &str, expiration: &str) -> RegistrationForm {
        RegistrationForm {
            name: name.into(),
            code: "7891234567890".into(),
            lot: "L-77".into(),
            expiration_date: expiration.into(),
        }
    }

    #[test]
    fn test_inside_criterion_commits_without_prompt() {
        let mut store = RecordStore::new(MemoryStorage::new());

        let outcome = submit(&mut store, &form("Queijo", "2026-10-24"), &clock()).unwrap();

        let RegistrationOutcome::Committed(record) = &outcome else {
            panic!("expected commit, got {:?}", outcome);
        };
        assert_eq!(record.days_remaining, 10);
        assert_eq!(record.registered_at, clock().now_utc());
        assert_eq!(store.load(), vec![record.clone()]);

        let notice = outcome.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, REGISTERED_MESSAGE);
    }

    #[test]
    fn test_threshold_day_commits() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let outcome = submit(&mut store, &form("Creme", "2026-11-28"), &clock()).unwrap();
        assert!(matches!(outcome, RegistrationOutcome::Committed(ref r) if r.days_remaining == 45));
    }

    #[test]
    fn test_outside_criterion_declined_leaves_store_unchanged() {
        let mut store = RecordStore::new(MemoryStorage::new());

        let outcome = submit(&mut store, &form("Farinha", "2027-01-22"), &clock()).unwrap();
        let RegistrationOutcome::NeedsConfirmation(pending) = outcome else {
            panic!("expected confirmation request");
        };
        assert_eq!(pending.days_remaining(), 100);
        assert!(pending.prompt().contains("vence em 100 dias"));
        assert!(store.load().is_empty());

        let outcome = resolve(&mut store, pending, Confirmation::Declined, &clock()).unwrap();
        assert_eq!(outcome, RegistrationOutcome::Cancelled);
        assert_eq!(outcome.notice(), Some(Notice::error(CANCELLED_MESSAGE)));
        assert!(store.load().is_empty());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_outside_criterion_accepted_appends() {
        let mut store = RecordStore::new(MemoryStorage::new());

        let outcome = submit(&mut store, &form("Farinha", "2027-01-22"), &clock()).unwrap();
        let RegistrationOutcome::NeedsConfirmation(pending) = outcome else {
            panic!("expected confirmation request");
        };

        let outcome = resolve(&mut store, pending, Confirmation::Accepted, &clock()).unwrap();
        assert!(matches!(outcome, RegistrationOutcome::Committed(_)));

        let stored = store.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Farinha");
        assert_eq!(stored[0].days_remaining, 100);
    }

    #[test]
    fn test_commit_keeps_readable_legacy_records() {
        let legacy = r#"[
            {"nome": "A", "codigo": "1", "lote": "L1", "vencimento": "2026-10-20",
             "diasRestantes": 6, "dataRegistro": "2026-10-14T11:30:00.000Z"},
            {"nome": "B", "codigo": "2", "lote": "L2", "vencimento": "",
             "diasRestantes": null, "dataRegistro": "2026-10-14T11:31:00.000Z"}
        ]"#;
        let mut store = RecordStore::new(MemoryStorage::with_entry(STORAGE_KEY, legacy));

        let outcome = submit(&mut store, &form("C", "2026-10-24"), &clock()).unwrap();
        assert!(matches!(outcome, RegistrationOutcome::Committed(_)));

        let names: Vec<_> = store.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_invalid_input_is_rejected_without_mutation() {
        let mut store = RecordStore::new(MemoryStorage::new());

        assert_eq!(
            submit(&mut store, &form("   ", "2026-10-24"), &clock()),
            Err(BlitzError::MissingName)
        );
        assert_eq!(
            submit(&mut store, &form("Pão", ""), &clock()),
            Err(BlitzError::MissingExpirationDate)
        );
        assert!(matches!(
            submit(&mut store, &form("Pão", "amanhã"), &clock()),
            Err(BlitzError::InvalidExpirationDate(_))
        ));
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_expired_product_commits_directly() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let outcome = submit(&mut store, &form("Manteiga", "10/10/2026"), &clock()).unwrap();
        assert!(matches!(outcome, RegistrationOutcome::Committed(ref r) if r.days_remaining == -4));
    }
}
