//! Quotation numbers and validity dates
//!
//! Numbers take the form `Q-<year>-<seq>` with a four-digit sequence that
//! restarts every calendar year.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Yearly quotation number counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationNumberSequence {
    /// Year the counter belongs to
    pub year: i32,
    /// Last number handed out in that year
    pub last_number: u32,
}

impl QuotationNumberSequence {
    pub fn new(year: i32, last_number: u32) -> Self {
        Self { year, last_number }
    }

    /// Restart the counter when `today` falls in a later year
    fn roll_over(&mut self, today: NaiveDate) {
        if self.year != today.year() {
            info!(from = self.year, to = today.year(), "Restarting quotation numbering");
            self.year = today.year();
            self.last_number = 0;
        }
    }

    /// Number the next saved quotation will receive
    pub fn peek(&mut self, today: NaiveDate) -> String {
        self.roll_over(today);
        format_number(self.year, self.last_number.saturating_add(1))
    }

    /// Consume the next number after a quotation is saved
    pub fn commit(&mut self, today: NaiveDate) -> String {
        let number = self.peek(today);
        self.last_number = self.last_number.saturating_add(1);
        number
    }
}

fn format_number(year: i32, sequence: u32) -> String {
    format!("Q-{}-{:04}", year, sequence)
}

/// Last day a quotation dated `quotation_date` is valid
pub fn expiration_date(quotation_date: NaiveDate, valid_days: u32) -> NaiveDate {
    quotation_date
        .checked_add_signed(Duration::days(i64::from(valid_days)))
        .unwrap_or(NaiveDate::MAX)
}
