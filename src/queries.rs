//! Climate data queries.
//!
//! Each query is implemented as a struct that implements the [Query](crate::query::Query)
//! trait. All of them read from the `measurement` table only.

use crate::error::ClimateApiError;
use crate::models::{self, DateRange, Measurement, TemperatureObservation, TemperatureStats};
use crate::query::Query;
use crate::store::Store;

use async_trait::async_trait;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration};

/// Format of dates stored in the `measurement` table.
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Number of days before the most recent date covered by the recent year queries.
///
/// One more than a common year so the same calendar day a year earlier is included.
pub const RECENT_YEAR_DAYS: i64 = 366;

/// Return the first date of the recent year ending on `max_date`.
///
/// The date is parsed, moved back [RECENT_YEAR_DAYS] calendar days and formatted back to
/// `YYYY-MM-DD` so it compares correctly against stored dates.
pub fn recent_year_cutoff(max_date: &str) -> Result<String, ClimateApiError> {
    let date = Date::parse(max_date, DATE_FORMAT).map_err(|source| {
        ClimateApiError::MalformedDate {
            date: max_date.to_string(),
            source,
        }
    })?;
    let cutoff = date
        .checked_sub(Duration::days(RECENT_YEAR_DAYS))
        .ok_or_else(|| ClimateApiError::DateOutOfRange {
            date: max_date.to_string(),
        })?;
    Ok(cutoff.format(DATE_FORMAT)?)
}

/// Return the most recent measurement date.
async fn max_date(store: &Store) -> Result<String, ClimateApiError> {
    sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
        .fetch_one(store.pool())
        .await?
        .ok_or(ClimateApiError::EmptyDataset)
}

/// Return all measurements within the recent year, in row order.
async fn recent_year_measurements(store: &Store) -> Result<Vec<Measurement>, ClimateApiError> {
    let cutoff = recent_year_cutoff(&max_date(store).await?)?;
    tracing::debug!("recent year cutoff {}", cutoff);
    let measurements = sqlx::query_as::<_, Measurement>(
        "SELECT station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs \
         FROM measurement WHERE date >= ? ORDER BY rowid",
    )
    .bind(cutoff)
    .fetch_all(store.pool())
    .await?;
    Ok(measurements)
}

/// Precipitation per date over the most recent year.
///
/// Dates reported by several stations collapse to a single entry holding the value of the last
/// row read for that date.
pub struct RecentPrecipitation {}

#[async_trait]
impl Query for RecentPrecipitation {
    type Output = models::Precipitation;
    const NAME: &'static str = "precipitation";

    async fn execute(&self, store: &Store) -> Result<Self::Output, ClimateApiError> {
        let mut precipitation = models::Precipitation::new();
        for measurement in recent_year_measurements(store).await? {
            precipitation.insert(measurement.date, measurement.prcp);
        }
        Ok(precipitation)
    }
}

/// Distinct stations that have at least one measurement.
pub struct Stations {}

#[async_trait]
impl Query for Stations {
    type Output = Vec<String>;
    const NAME: &'static str = "stations";

    async fn execute(&self, store: &Store) -> Result<Self::Output, ClimateApiError> {
        let stations = sqlx::query_scalar::<_, String>(
            "SELECT station FROM measurement GROUP BY station ORDER BY station",
        )
        .fetch_all(store.pool())
        .await?;
        Ok(stations)
    }
}

/// Every temperature observation over the most recent year, one per measurement row.
pub struct RecentTemperatures {}

#[async_trait]
impl Query for RecentTemperatures {
    type Output = Vec<TemperatureObservation>;
    const NAME: &'static str = "tobs";

    async fn execute(&self, store: &Store) -> Result<Self::Output, ClimateApiError> {
        let observations = recent_year_measurements(store)
            .await?
            .into_iter()
            .map(TemperatureObservation::from)
            .collect();
        Ok(observations)
    }
}

/// Minimum, mean and maximum temperature for each date in a range.
///
/// The range bounds are not validated. They are compared with stored dates as text, so a
/// malformed bound yields an unexpected or empty result rather than an error.
pub struct TemperatureStatistics {
    pub range: DateRange,
}

#[async_trait]
impl Query for TemperatureStatistics {
    type Output = Vec<TemperatureStats>;
    const NAME: &'static str = "temperature_stats";

    async fn execute(&self, store: &Store) -> Result<Self::Output, ClimateApiError> {
        let rows = match &self.range.end {
            None => sqlx::query_as::<_, (String, f64, f64, f64)>(
                "SELECT date, CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), \
                 CAST(MAX(tobs) AS REAL) \
                 FROM measurement WHERE date >= ? GROUP BY date ORDER BY date",
            )
            .bind(self.range.start.as_str())
            .fetch_all(store.pool())
            .await?,
            Some(end) => sqlx::query_as::<_, (String, f64, f64, f64)>(
                "SELECT date, CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), \
                 CAST(MAX(tobs) AS REAL) \
                 FROM measurement WHERE date >= ? AND date <= ? GROUP BY date ORDER BY date",
            )
            .bind(self.range.start.as_str())
            .bind(end.as_str())
            .fetch_all(store.pool())
            .await?,
        };
        Ok(rows.into_iter().map(TemperatureStats::from).collect())
    }
}
