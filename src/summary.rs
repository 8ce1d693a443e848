use crate::errors::DataFormatError;
use crate::models::{RawRecord, Sale, Selection, SummaryRow, Totals};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Filters `records` to Sale entries inside `selection` and totals them per
/// calendar date, ordered by date ascending.
///
/// Every Sale record is validated before anything is aggregated, so one bad
/// row fails the whole call instead of skewing the sums.
pub fn summarize(
    records: &[RawRecord],
    selection: &Selection,
) -> Result<Vec<SummaryRow>, DataFormatError> {
    let sales = parse_sales(records)?;
    Ok(aggregate(&sales, selection))
}

/// Validates and types the Sale records, leaving `records` untouched.
pub fn parse_sales(records: &[RawRecord]) -> Result<Vec<Sale>, DataFormatError> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_sale())
        .map(|(index, record)| -> Result<Sale, DataFormatError> {
            let date = parse_date(&record.date).ok_or_else(|| DataFormatError::MalformedDate {
                index,
                value: record.date.clone(),
            })?;
            let amount =
                parse_amount(&record.amount).ok_or_else(|| DataFormatError::NonNumericAmount {
                    index,
                    value: record.amount.clone(),
                })?;
            Ok(Sale { date, amount })
        })
        .collect()
}

pub fn aggregate(sales: &[Sale], selection: &Selection) -> Vec<SummaryRow> {
    if selection.is_empty() {
        return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
    for sale in sales.iter().filter(|sale| selection.contains(sale.date)) {
        let entry = by_date.entry(sale.date).or_default();
        entry.0 += sale.amount;
        entry.1 += 1;
    }

    by_date
        .into_iter()
        .map(|(date, (total_sales, num_orders))| SummaryRow {
            date,
            total_sales,
            num_orders,
        })
        .collect()
}

/// Distinct years among Sale records, ascending.
pub fn available_years(records: &[RawRecord]) -> Result<Vec<i32>, DataFormatError> {
    let years: BTreeSet<i32> = parse_sales(records)?
        .iter()
        .map(|sale| sale.date.year())
        .collect();
    Ok(years.into_iter().collect())
}

/// Every year present in the data, all months, all days.
pub fn default_selection(records: &[RawRecord]) -> Result<Selection, DataFormatError> {
    Ok(Selection::with_years(available_years(records)?))
}

pub fn totals(rows: &[SummaryRow]) -> Totals {
    rows.iter().fold(Totals::default(), |acc, row| Totals {
        total_sales: acc.total_sales + row.total_sales,
        num_orders: acc.num_orders + row.num_orders,
    })
}

/// Parses a calendar date, discarding any time of day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Parses a currency amount such as `12.5`, `$1,200.00` or ` 7 `.
pub fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_prefix('$').unwrap_or(value);
    let cleaned = if value.contains(',') {
        strip_thousands_separators(value)?
    } else {
        value.to_string()
    };
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Removes `,` only where it separates well-formed thousands groups in the
/// integer part: `1,200.50` is accepted, `12,50` and `1,2,3` are not.
fn strip_thousands_separators(value: &str) -> Option<String> {
    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let is_digits = |group: &str| group.bytes().all(|b| b.is_ascii_digit());
    let mut groups = whole.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !is_digits(first) {
        return None;
    }

    let mut cleaned = format!("{sign}{first}");
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        cleaned.push_str(group);
    }
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}
