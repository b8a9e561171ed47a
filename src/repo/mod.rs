//! Typed repositories over the persistent store, one per logical collection.
//!
//! All writes are whole-collection replacements (read-modify-write); there
//! are no partial updates. Reads for display go through the query cache;
//! mutations always re-read the store first so a confirmation prompt in the
//! client can never leave them acting on a stale snapshot.

pub mod classes;
pub mod lecturers;
pub mod students;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::QueryCache;
use crate::error::DataError;
use crate::seed;
use crate::store::Store;

/// Cached read of a collection; falls through to the store (and seeds it)
/// on a miss or a cache value with the wrong shape.
pub(crate) fn load_cached<T: DeserializeOwned>(
    store: &Store,
    cache: &mut QueryCache,
    name: &str,
) -> Result<Vec<T>, DataError> {
    if let Some(value) = cache.read(name) {
        if let Ok(list) = serde_json::from_value::<Vec<T>>(value.clone()) {
            return Ok(list);
        }
    }
    load_fresh(store, cache, name)
}

/// Read a collection straight from the store, seeding it with the bundled
/// default dataset when it is absent or not the expected container shape
/// (self-healing, persisted immediately). The cache is refreshed with
/// whatever this returns.
pub(crate) fn load_fresh<T: DeserializeOwned>(
    store: &Store,
    cache: &mut QueryCache,
    name: &str,
) -> Result<Vec<T>, DataError> {
    if let Some(value) = store.get(name)? {
        if let Ok(list) = serde_json::from_value::<Vec<T>>(value.clone()) {
            cache.write(name, value);
            return Ok(list);
        }
        log::warn!("collection {} had an unexpected shape; reseeding", name);
    }

    let seeded = seed::default_collection(name);
    store.set(name, &seeded)?;
    cache.write(name, seeded.clone());
    serde_json::from_value(seeded)
        .map_err(|e| DataError::StorageUnavailable(format!("seed for {}: {}", name, e)))
}

/// Persist the full collection, then overwrite the cached value with the
/// post-mutation state so the next read reflects this write.
pub(crate) fn persist<T: Serialize>(
    store: &Store,
    cache: &mut QueryCache,
    name: &str,
    list: &[T],
) -> Result<(), DataError> {
    let value = serde_json::to_value(list)
        .map_err(|e| DataError::StorageUnavailable(format!("encode {}: {}", name, e)))?;
    store.set(name, &value)?;
    cache.write(name, value);
    Ok(())
}
