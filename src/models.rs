use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SALE_TYPE: &str = "Sale";
pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;
pub const DAYS: std::ops::RangeInclusive<u32> = 1..=31;

/// One row as supplied by the data source, fields still untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub amount: String,
}

impl RawRecord {
    pub fn new(kind: impl Into<String>, date: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            date: date.into(),
            amount: amount.into(),
        }
    }

    pub fn is_sale(&self) -> bool {
        self.kind == SALE_TYPE
    }
}

/// A validated Sale record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sale {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u32>,
    pub days: BTreeSet<u32>,
}

impl Selection {
    /// All months and days, with the given years.
    pub fn with_years(years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            years: years.into_iter().collect(),
            months: MONTHS.collect(),
            days: DAYS.collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.years.contains(&date.year())
            && self.months.contains(&date.month())
            && self.days.contains(&date.day())
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.months.is_empty() || self.days.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub total_sales: f64,
    pub num_orders: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub total_sales: f64,
    pub num_orders: u64,
}

/// Raw selection query; each field is a comma-separated integer list.
#[derive(Debug, Deserialize, Default)]
pub struct SelectionQuery {
    pub years: Option<String>,
    pub months: Option<String>,
    pub days: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub selection: Selection,
    pub totals: Totals,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub days: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn selection_requires_every_component() {
        let mut selection = Selection::with_years([2024]);
        assert!(selection.contains(date(2024, 3, 15)));
        assert!(!selection.contains(date(2023, 3, 15)));

        selection.months = [1, 2].into_iter().collect();
        assert!(!selection.contains(date(2024, 3, 15)));
        assert!(selection.contains(date(2024, 2, 15)));

        selection.days = [1].into_iter().collect();
        assert!(!selection.contains(date(2024, 2, 15)));
        assert!(selection.contains(date(2024, 2, 1)));
    }

    #[test]
    fn selection_with_any_empty_field_is_empty() {
        let mut selection = Selection::with_years([2024]);
        assert!(!selection.is_empty());
        selection.days.clear();
        assert!(selection.is_empty());
        assert!(!selection.contains(date(2024, 1, 1)));
    }

    #[test]
    fn raw_record_type_field_is_renamed() {
        let record: RawRecord =
            serde_json::from_str(r#"{"type":"Sale","date":"2024-01-01","amount":"10"}"#).unwrap();
        assert!(record.is_sale());
        assert!(!RawRecord::new("sale", "2024-01-01", "1").is_sale());
    }
}
