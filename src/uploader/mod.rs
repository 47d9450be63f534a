pub mod backoff;

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::domain::City;
use crate::store::CityStore;
use backoff::Backoff;

/// Maximum number of cities committed per batch.
pub const BATCH_SIZE: usize = 400;

/// Pause between successful batches to stay under store rate limits.
const INTER_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Upload the whole catalog to the store in order, one batch at a time.
///
/// Each batch commits atomically; failed commits are retried with
/// exponential backoff and escalate once the backoff ceiling is passed.
/// Batches committed before such a failure stay committed.
///
/// There is no idempotency key: re-running after a partial failure creates
/// duplicate documents for every batch that had already committed.
pub async fn upload_catalog<S: CityStore>(store: &S, cities: &[City]) -> Result<()> {
    if cities.is_empty() {
        tracing::info!("No cities to upload");
        return Ok(());
    }

    let total_batches = cities.len().div_ceil(BATCH_SIZE);
    tracing::info!(
        "Uploading {} cities in {} batches of up to {}",
        cities.len(),
        total_batches,
        BATCH_SIZE
    );

    let started = Instant::now();

    for (index, batch) in cities.chunks(BATCH_SIZE).enumerate() {
        let batch_number = index + 1;
        tracing::info!(
            "Committing batch {}/{} with {} cities",
            batch_number,
            total_batches,
            batch.len()
        );

        commit_with_retry(store, batch, batch_number, total_batches).await?;

        if batch_number < total_batches {
            tokio::time::sleep(INTER_BATCH_DELAY).await;
        }
    }

    tracing::info!(
        "Upload completed in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Commit one batch, retrying until it succeeds or the backoff ceiling is
/// exceeded.
async fn commit_with_retry<S: CityStore>(
    store: &S,
    batch: &[City],
    batch_number: usize,
    total_batches: usize,
) -> Result<()> {
    let mut backoff = Backoff::new();

    loop {
        match store.insert_batch(batch).await {
            Ok(()) => {
                tracing::info!("Batch {}/{} committed", batch_number, total_batches);
                return Ok(());
            }
            Err(e) => match backoff.next_delay() {
                Some(delay) => {
                    tracing::warn!(
                        "Error committing batch {}/{}: {:#}. Retrying in {}s",
                        batch_number,
                        total_batches,
                        e,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    tracing::error!(
                        "Max backoff time exceeded for batch {}/{}. Aborting.",
                        batch_number,
                        total_batches
                    );
                    return Err(e.context(format!(
                        "Failed to commit batch {}/{} within backoff limit",
                        batch_number, total_batches
                    )));
                }
            },
        }
    }
}
