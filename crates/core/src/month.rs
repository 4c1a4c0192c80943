//! Payroll month (`YYYY-MM`).

use core::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DocumentError> {
        if !(1..=12).contains(&month) {
            return Err(DocumentError::invalid(format!("month out of range: {month}")));
        }
        if !(1..=9999).contains(&year) {
            return Err(DocumentError::invalid(format!("year out of range: {year}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl core::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| DocumentError::invalid(format!("expected YYYY-MM, got {s:?}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| DocumentError::invalid(format!("year in {s:?}: {e}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| DocumentError::invalid(format!("month in {s:?}: {e}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
