//! Report flow - sorting, severity, CSV export and bulk clear.

use crate::config::UrgencyMode;
use crate::domain::{
    format_date_br, format_datetime_br, Clock, Confirmation, Notice, ProductRecord, Severity,
    ISO_DATE_FORMAT,
};
use crate::error::{BlitzError, Result};
use crate::repositories::{KeyValueStorage, RecordStore};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const EMPTY_REPORT_MESSAGE: &str = "Nenhum produto registrado ainda.";
pub const CLEARED_MESSAGE: &str = "Dados limpos com sucesso.";
pub const CLEAR_WARNING: &str = "ATENÇÃO!\n\n\
    Isso apagará TODOS os registros de produtos salvos neste computador.\n\
    Use isso apenas após gerar o relatório e ter certeza que não precisa mais dos dados.\n\n\
    Esta ação não pode ser desfeita. Deseja continuar?";

pub const CSV_HEADER: &str =
    "Produto;Codigo_Barras;Lote;Data_Vencimento;Dias_Restantes;Data_Registro";
pub const CSV_DELIMITER: &str = ";";
pub const CSV_FILE_PREFIX: &str = "RELATORIO_BLITZ_";

/// One formatted line of the report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub code: String,
    pub lot: String,
    pub expiration: String,
    pub days_remaining: i64,
    pub registered: String,
    pub severity: Severity,
}

impl ReportRow {
    fn from_record(record: &ProductRecord, days_remaining: i64) -> Self {
        Self {
            name: record.name.clone(),
            code: record.code.clone(),
            lot: record.lot.clone(),
            expiration: format_date_br(record.expiration_date),
            days_remaining,
            registered: format_datetime_br(record.registered_at),
            severity: Severity::classify(days_remaining),
        }
    }

    pub fn class_name(&self) -> Option<&'static str> {
        self.severity.class_name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Nothing stored; the table shows [`EMPTY_REPORT_MESSAGE`].
    Empty,
    Rows(Vec<ReportRow>),
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        match self {
            Self::Empty => &[],
            Self::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn displayed_days(record: &ProductRecord, mode: UrgencyMode, now: NaiveDateTime) -> i64 {
    match mode {
        UrgencyMode::Frozen => record.days_remaining,
        UrgencyMode::Live => record.days_remaining_at(now),
    }
}

/// Rows ordered most urgent first. Ties keep insertion order.
pub fn build_report(records: &[ProductRecord], mode: UrgencyMode, clock: &impl Clock) -> Report {
    if records.is_empty() {
        return Report::Empty;
    }

    let now = clock.now_local();
    let mut rows: Vec<ReportRow> = records
        .iter()
        .map(|r| ReportRow::from_record(r, displayed_days(r, mode, now)))
        .collect();
    rows.sort_by_key(|row| row.days_remaining);

    Report::Rows(rows)
}

pub fn load_report<S: KeyValueStorage>(
    store: &RecordStore<S>,
    mode: UrgencyMode,
    clock: &impl Clock,
) -> Report {
    build_report(&store.load(), mode, clock)
}

// =============================================================================
// CSV export
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

/// Keeps free text from opening extra columns or rows.
fn clean_field(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ';' => ',',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect()
}

pub fn export_file_name(clock: &impl Clock) -> String {
    format!(
        "{}{}.csv",
        CSV_FILE_PREFIX,
        clock.now_utc().date_naive().format(ISO_DATE_FORMAT)
    )
}

/// Renders the stored records, in stored order, as a semicolon CSV.
pub fn render_csv(
    records: &[ProductRecord],
    mode: UrgencyMode,
    clock: &impl Clock,
) -> Result<CsvExport> {
    if records.is_empty() {
        return Err(BlitzError::NothingToExport);
    }

    let now = clock.now_local();
    let lines = records.iter().map(|r| {
        [
            clean_field(&r.name),
            clean_field(&r.code),
            clean_field(&r.lot),
            format_date_br(r.expiration_date),
            displayed_days(r, mode, now).to_string(),
            format_datetime_br(r.registered_at),
        ]
        .join(CSV_DELIMITER)
    });

    let contents = std::iter::once(CSV_HEADER.to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(CsvExport {
        file_name: export_file_name(clock),
        contents,
    })
}

/// Writes the CSV report into `dir` and returns the file path.
#[instrument(skip(store, clock))]
pub fn export_csv<S: KeyValueStorage>(
    store: &RecordStore<S>,
    dir: &Path,
    mode: UrgencyMode,
    clock: &impl Clock,
) -> Result<PathBuf> {
    let export = render_csv(&store.load(), mode, clock)?;

    std::fs::create_dir_all(dir).map_err(|e| BlitzError::ExportFailed(e.to_string()))?;
    let path = dir.join(&export.file_name);
    std::fs::write(&path, export.contents.as_bytes()).map_err(|e| {
        warn!("CSV export to {} failed: {}", path.display(), e);
        BlitzError::ExportFailed(e.to_string())
    })?;

    info!("Report exported to {}", path.display());
    Ok(path)
}

// =============================================================================
// Clear all
// =============================================================================

/// Wipes every record once the user accepted [`CLEAR_WARNING`].
pub fn clear_all<S: KeyValueStorage>(
    store: &mut RecordStore<S>,
    answer: Confirmation,
) -> Result<Option<Notice>> {
    if !answer.is_accepted() {
        return Ok(None);
    }
    store.clear()?;
    Ok(Some(Notice::success(CLEARED_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use crate::repositories::storage::UnreadableStorage;
    use crate::repositories::MemoryStorage;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::at(2026, 10, 14, 9, 30)
    }

    fn record(name: &str, days: i64) -> ProductRecord {
        ProductRecord {
            name: name.into(),
            code: "789100".into(),
            lot: "L9".into(),
            expiration_date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap() + Duration::days(days),
            days_remaining: days,
            registered_at: Utc.with_ymd_and_hms(2026, 10, 1, 14, 0, 0).unwrap(),
        }
    }

    fn store_with(records: &[ProductRecord]) -> RecordStore<MemoryStorage> {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.save(records).unwrap();
        store
    }

    #[test]
    fn test_empty_store_gives_placeholder() {
        let store = RecordStore::new(MemoryStorage::new());
        let report = load_report(&store, UrgencyMode::Frozen, &clock());
        assert!(report.is_empty());
        assert!(report.rows().is_empty());
    }

    #[test]
    fn test_read_failure_gives_placeholder() {
        let store = RecordStore::new(UnreadableStorage);
        assert_eq!(load_report(&store, UrgencyMode::Frozen, &clock()), Report::Empty);
    }

    #[test]
    fn test_rows_sorted_by_urgency_with_stable_ties() {
        let store = store_with(&[
            record("Arroz", 60),
            record("Leite A", 5),
            record("Feijão", 30),
            record("Leite B", 5),
            record("Vencido", -2),
        ]);

        let report = load_report(&store, UrgencyMode::Frozen, &clock());
        let rows = report.rows();

        assert!(rows
            .windows(2)
            .all(|w| w[0].days_remaining <= w[1].days_remaining));
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Vencido", "Leite A", "Leite B", "Feijão", "Arroz"]);
    }

    #[test]
    fn test_row_formatting_and_classes() {
        let report = build_report(
            &[record("A", 7), record("B", 8), record("C", 45), record("D", 46)],
            UrgencyMode::Frozen,
            &clock(),
        );
        let rows = report.rows();

        let classes: Vec<_> = rows.iter().map(|r| r.class_name()).collect();
        assert_eq!(
            classes,
            [Some("vencendo-7d"), Some("vencendo-45d"), Some("vencendo-45d"), None]
        );
        assert_eq!(rows[0].expiration, "21/10/2026");
        assert_eq!(
            rows[0].registered,
            format_datetime_br(Utc.with_ymd_and_hms(2026, 10, 1, 14, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_frozen_and_live_modes() {
        let records = [record("Snapshot", 20)];
        let week_later = FixedClock::at(2026, 10, 21, 8, 0);

        let frozen = build_report(&records, UrgencyMode::Frozen, &week_later);
        assert_eq!(frozen.rows()[0].days_remaining, 20);

        let live = build_report(&records, UrgencyMode::Live, &week_later);
        assert_eq!(live.rows()[0].days_remaining, 13);
        assert_eq!(live.rows()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_export_empty_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(MemoryStorage::new());

        let err = export_csv(&store, dir.path(), UrgencyMode::Frozen, &clock()).unwrap_err();
        assert_eq!(err, BlitzError::NothingToExport);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_csv_semicolons_replaced_and_columns_fixed() {
        let records = [record("Biscoito; recheado", 3), record("Suco", 50)];
        let export = render_csv(&records, UrgencyMode::Frozen, &clock()).unwrap();

        let lines: Vec<_> = export.contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines.iter().all(|l| l.split(';').count() == 6));

        let first: Vec<_> = lines[1].split(';').collect();
        assert_eq!(first[0], "Biscoito, recheado");
        assert_eq!(first[3], "17/10/2026");
        assert_eq!(first[4], "3");
        assert_eq!(lines[2].split(';').next(), Some("Suco"));
    }

    #[test]
    fn test_export_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&[record("Suco", 50)]);

        let path = export_csv(&store, dir.path(), UrgencyMode::Frozen, &clock()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "RELATORIO_BLITZ_2026-10-14.csv"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(CSV_HEADER));
        assert!(contents.contains("\nSuco;789100;L9;03/12/2026;50;"));
    }

    #[test]
    fn test_clear_all_requires_acceptance() {
        let mut store = store_with(&[record("Sal", 100)]);

        assert_eq!(clear_all(&mut store, Confirmation::Declined).unwrap(), None);
        assert_eq!(store.load().len(), 1);

        let notice = clear_all(&mut store, Confirmation::Accepted).unwrap();
        assert_eq!(notice, Some(Notice::success(CLEARED_MESSAGE)));
        assert!(load_report(&store, UrgencyMode::Frozen, &clock()).is_empty());
    }
}
