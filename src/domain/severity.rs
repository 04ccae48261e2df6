//! Urgency tiers for report rows.

/// Staleness criterion: registrations beyond this many days need an override.
pub const STALENESS_THRESHOLD_DAYS: i64 = 45;
pub const CRITICAL_THRESHOLD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

impl Severity {
    pub fn classify(days_remaining: i64) -> Self {
        if days_remaining <= CRITICAL_THRESHOLD_DAYS {
            Self::Critical
        } else if days_remaining <= STALENESS_THRESHOLD_DAYS {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Row class name used by the report stylesheet.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Self::Critical => Some("vencendo-7d"),
            Self::Warning => Some("vencendo-45d"),
            Self::Normal => None,
        }
    }
}
