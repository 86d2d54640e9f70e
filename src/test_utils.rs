use crate::store::Store;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Stations in the test database: (station, name, latitude, longitude, elevation).
pub(crate) const STATIONS: &[(&str, &str, f64, f64, f64)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
    ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
    // No measurements are recorded for this station.
    ("USC00517948", "PEARL CITY, HI US", 21.3934, -157.9751, 11.9),
];

/// Measurements in the test database, in row order: (station, date, prcp, tobs).
///
/// The most recent date is 2017-08-23, giving a recent year cutoff of 2016-08-22.
pub(crate) const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519397", "2016-08-21", Some(0.1), 76.0),
    ("USC00519397", "2016-08-22", Some(0.0), 77.0),
    ("USC00513117", "2016-08-22", Some(0.3), 75.0),
    ("USC00519281", "2017-02-01", None, 70.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
    ("USC00519281", "2017-08-23", Some(0.5), 79.0),
];

/// Create the measurement and station tables.
pub(crate) async fn create_schema(pool: &SqlitePool) {
    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER NOT NULL,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT,
            PRIMARY KEY (id)
        )",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE station (
            id INTEGER NOT NULL,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT,
            PRIMARY KEY (id)
        )",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Append a measurement row.
pub(crate) async fn insert_measurement(
    store: &Store,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(store.pool())
        .await
        .unwrap();
}

/// Create a Store backed by an in-memory database with empty tables.
pub(crate) async fn get_empty_store() -> Store {
    // An in-memory database lives only as long as its connection, so keep exactly one open.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    create_schema(&pool).await;
    Store::from_pool(pool)
}

/// Create a Store backed by an in-memory database seeded with [STATIONS] and [MEASUREMENTS].
pub(crate) async fn get_test_store() -> Store {
    let store = get_empty_store().await;
    for (station, name, latitude, longitude, elevation) in STATIONS {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(*station)
        .bind(*name)
        .bind(*latitude)
        .bind(*longitude)
        .bind(*elevation)
        .execute(store.pool())
        .await
        .unwrap();
    }
    for (station, date, prcp, tobs) in MEASUREMENTS {
        insert_measurement(&store, station, date, *prcp, *tobs).await;
    }
    store
}
