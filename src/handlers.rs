use crate::errors::AppError;
use crate::models::{
    OptionsResponse, RawRecord, Selection, SelectionQuery, SummaryResponse, DAYS, MONTHS,
};
use crate::state::AppState;
use crate::summary::{available_years, default_selection, summarize, totals};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::{debug, error, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.title))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_options(State(state): State<AppState>) -> Result<Json<OptionsResponse>, AppError> {
    let records = fetch_records(&state).await?;
    let defaults =
        default_selection(&records).inspect_err(|err| warn!("rejected data set: {err}"))?;

    Ok(Json(OptionsResponse {
        years: defaults.years.into_iter().collect(),
        months: defaults.months.into_iter().collect(),
        days: defaults.days.into_iter().collect(),
    }))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let requested = parse_query(&query)?;
    let records = fetch_records(&state).await?;

    let selection = resolve_selection(requested, &records)?;
    let rows = summarize(&records, &selection).inspect_err(|err| warn!("rejected data set: {err}"))?;
    debug!(rows = rows.len(), "summary computed");

    Ok(Json(SummaryResponse {
        totals: totals(&rows),
        selection,
        rows,
    }))
}

/// Selection fields as sent by the client; `None` means "use the default".
#[derive(Debug, Default, PartialEq)]
pub struct RequestedSelection {
    pub years: Option<BTreeSet<i32>>,
    pub months: Option<BTreeSet<u32>>,
    pub days: Option<BTreeSet<u32>>,
}

pub fn parse_query(query: &SelectionQuery) -> Result<RequestedSelection, AppError> {
    Ok(RequestedSelection {
        years: query
            .years
            .as_deref()
            .map(|raw| parse_list("years", raw, i32::MIN..=i32::MAX))
            .transpose()?,
        months: query
            .months
            .as_deref()
            .map(|raw| parse_list("months", raw, MONTHS))
            .transpose()?,
        days: query
            .days
            .as_deref()
            .map(|raw| parse_list("days", raw, DAYS))
            .transpose()?,
    })
}

fn parse_list<T>(field: &str, raw: &str, range: RangeInclusive<T>) -> Result<BTreeSet<T>, AppError>
where
    T: std::str::FromStr + Ord + std::fmt::Display,
{
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| -> Result<T, AppError> {
            let value = item
                .parse::<T>()
                .map_err(|_| AppError::bad_request(format!("{field}: '{item}' is not an integer")))?;
            if !range.contains(&value) {
                return Err(AppError::bad_request(format!(
                    "{field}: {value} is outside {}..={}",
                    range.start(),
                    range.end()
                )));
            }
            Ok(value)
        })
        .collect()
}

/// Fills absent fields with their defaults. Only the year default depends on
/// the data, so records are only inspected when years were not supplied.
pub fn resolve_selection(
    requested: RequestedSelection,
    records: &[RawRecord],
) -> Result<Selection, AppError> {
    let years = match requested.years {
        Some(years) => years,
        None => available_years(records)
            .inspect_err(|err| warn!("rejected data set: {err}"))?
            .into_iter()
            .collect(),
    };

    Ok(Selection {
        years,
        months: requested.months.unwrap_or_else(|| MONTHS.collect()),
        days: requested.days.unwrap_or_else(|| DAYS.collect()),
    })
}

async fn fetch_records(state: &AppState) -> Result<Vec<RawRecord>, AppError> {
    let source = state.source.clone();
    let origin = source.describe();
    let records = tokio::task::spawn_blocking(move || source.fetch())
        .await?
        .inspect_err(|err| error!("fetch from {origin} failed: {err}"))?;
    debug!(origin = %origin, records = records.len(), "fetched records");
    Ok(records)
}
