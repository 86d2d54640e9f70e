//! Measurement store
//!
//! A read-only pool of SQLite connections onto the climate database. The database is populated
//! out of band before the service starts and is never written to.

use crate::cli::CommandLineArgs;
use crate::error::ClimateApiError;
use crate::models::Station;

use std::time::Duration;

use expanduser::expanduser;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Summary of the data available in the store.
#[derive(Debug, PartialEq)]
pub struct Inventory {
    /// Rows in the `station` table.
    pub stations: Vec<Station>,
    /// Number of rows in the `measurement` table.
    pub measurements: i64,
}

/// Shared handle on the climate database.
///
/// Cloning a [Store] is cheap; clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database named in the command line arguments in read-only mode.
    ///
    /// # Arguments
    ///
    /// * `args`: Command line arguments
    pub async fn connect(args: &CommandLineArgs) -> Result<Self, ClimateApiError> {
        let path = expanduser(&args.database).map_err(sqlx::Error::Io)?;
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);
        let max_connections = args
            .max_connections
            .unwrap_or_else(|| num_cpus::get() as u32);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(args.acquire_timeout))
            .connect_with(options)
            .await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing connection pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// List the stations and count the measurements in the store.
    ///
    /// Fails if either table is missing.
    #[tracing::instrument(level = "DEBUG", skip(self))]
    pub async fn inventory(&self) -> Result<Inventory, ClimateApiError> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name, CAST(latitude AS REAL) AS latitude, \
             CAST(longitude AS REAL) AS longitude, CAST(elevation AS REAL) AS elevation \
             FROM station ORDER BY station",
        )
        .fetch_all(&self.pool)
        .await?;
        let measurements = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(Inventory {
            stations,
            measurements,
        })
    }
}
