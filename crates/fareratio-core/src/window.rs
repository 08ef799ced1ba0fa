use chrono::{Days, Local, NaiveDate};

/// Wire format the fare search expects for dates.
const DATE_PARAM_FORMAT: &str = "%d/%m/%Y";

/// Departure window for a fare search: one calendar day, `date_from..=date_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl SearchWindow {
    /// Window covering `date` and the following day.
    #[must_use]
    pub fn starting(date: NaiveDate) -> Self {
        Self {
            date_from: date,
            date_to: date.checked_add_days(Days::new(1)).unwrap_or(date),
        }
    }

    /// Window covering today and tomorrow in local time.
    #[must_use]
    pub fn next_24h() -> Self {
        Self::starting(Local::now().date_naive())
    }

    #[must_use]
    pub fn date_from_param(&self) -> String {
        self.date_from.format(DATE_PARAM_FORMAT).to_string()
    }

    #[must_use]
    pub fn date_to_param(&self) -> String {
        self.date_to.format(DATE_PARAM_FORMAT).to_string()
    }
}
