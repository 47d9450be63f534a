use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{CityStore, StoreCredentials};
use crate::domain::City;

const CREATE_CITIES_TABLE: &str = "CREATE TABLE IF NOT EXISTS cities ( \
     id BIGSERIAL PRIMARY KEY, \
     name TEXT NOT NULL, \
     country TEXT NOT NULL, \
     population BIGINT NOT NULL, \
     lat DOUBLE PRECISION NOT NULL, \
     lon DOUBLE PRECISION NOT NULL \
 )";

/// Postgres-backed city store.
///
/// Each inserted row gets a store-generated `BIGSERIAL` id; callers never
/// choose document identity.
pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    /// Connect to the store and make sure the `cities` table exists.
    pub async fn connect(credentials: &StoreCredentials) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(credentials.max_connections)
            .connect(&credentials.database_url)
            .await
            .context("Failed to connect to city store")?;

        sqlx::query(CREATE_CITIES_TABLE)
            .execute(&pool)
            .await
            .context("Failed to create cities table")?;

        Ok(Self { pool })
    }
}

impl CityStore for PgCityStore {
    /// Insert one batch inside a single transaction.
    ///
    /// The whole batch commits or rolls back as a unit. There is no
    /// conflict clause: inserting the same city twice creates two rows.
    async fn insert_batch(&self, batch: &[City]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let query = build_insert_query(batch.len());
        let mut q = sqlx::query(&query);
        for city in batch {
            q = q
                .bind(&city.name)
                .bind(&city.country)
                .bind(city.population)
                .bind(city.lat)
                .bind(city.lon);
        }

        q.execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(())
    }
}

/// Build a multi-row INSERT with numbered placeholders.
///
/// Example for two rows:
/// `INSERT INTO cities (name, country, population, lat, lon)
///  VALUES ($1, $2, $3, $4, $5), ($6, $7, $8, $9, $10)`
fn build_insert_query(rows: usize) -> String {
    const PARAMS_PER_ROW: usize = 5; // name, country, population, lat, lon

    let mut query = String::from("INSERT INTO cities (name, country, population, lat, lon) VALUES ");

    for i in 0..rows {
        if i > 0 {
            query.push_str(", ");
        }
        let base = i * PARAMS_PER_ROW + 1;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            base,
            base + 1,
            base + 2,
            base + 3,
            base + 4
        ));
    }

    query
}
