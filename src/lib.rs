//! This crate provides a read-only HTTP API over climate observations recorded by weather
//! stations: daily precipitation and temperature readings held in a SQLite database.
//!
//! The API answers a small, fixed set of queries:
//!
//! * `/` lists the available API routes.
//! * `/api/v1.0/precipitation` maps each date of the most recent year to a precipitation value.
//! * `/api/v1.0/stations` lists the stations that have recorded measurements.
//! * `/api/v1.0/tobs` lists every temperature observation of the most recent year.
//! * `/api/v1.0/<start>` and `/api/v1.0/<start>/<end>` give the minimum, mean and maximum
//!   temperature for each date in an inclusive range.
//!
//! The "most recent year" runs from 366 days before the latest measurement date up to that
//! date.
//!
//! The service is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs serialisation of JSON response data.
//! * [SQLx](sqlx) provides the pool of read-only SQLite connections.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod query;
pub mod server;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
