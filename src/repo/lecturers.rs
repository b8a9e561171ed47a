use uuid::Uuid;

use crate::cache::QueryCache;
use crate::error::DataError;
use crate::integrity;
use crate::model::{Lecturer, LecturerDraft};
use crate::store::{Store, COLL_LECTURERS};

pub fn list(store: &Store, cache: &mut QueryCache) -> Result<Vec<Lecturer>, DataError> {
    super::load_cached(store, cache, COLL_LECTURERS)
}

pub fn create(
    store: &Store,
    cache: &mut QueryCache,
    draft: LecturerDraft,
) -> Result<Lecturer, DataError> {
    let mut existing: Vec<Lecturer> = super::load_fresh(store, cache, COLL_LECTURERS)?;
    integrity::check_lecturer(&existing, None, &draft)?;

    let lecturer = Lecturer {
        id: Uuid::new_v4().to_string(),
        nip: draft.nip,
        nama: draft.nama,
        status: draft.status,
        sks: draft.sks,
    };
    existing.push(lecturer.clone());
    super::persist(store, cache, COLL_LECTURERS, &existing)?;
    Ok(lecturer)
}

pub fn update(
    store: &Store,
    cache: &mut QueryCache,
    id: &str,
    draft: LecturerDraft,
) -> Result<Lecturer, DataError> {
    let mut existing: Vec<Lecturer> = super::load_fresh(store, cache, COLL_LECTURERS)?;
    let pos = existing
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| DataError::NotFound(format!("dosen {}", id)))?;
    integrity::check_lecturer(&existing, Some(id), &draft)?;

    let lecturer = Lecturer {
        id: id.to_string(),
        nip: draft.nip,
        nama: draft.nama,
        status: draft.status,
        sks: draft.sks,
    };
    existing[pos] = lecturer.clone();
    super::persist(store, cache, COLL_LECTURERS, &existing)?;
    Ok(lecturer)
}

/// Idempotent: deleting an id that is not present is a no-op success, and
/// the store is left untouched.
pub fn delete(store: &Store, cache: &mut QueryCache, id: &str) -> Result<(), DataError> {
    let mut existing: Vec<Lecturer> = super::load_fresh(store, cache, COLL_LECTURERS)?;
    let before = existing.len();
    existing.retain(|l| l.id != id);
    if existing.len() != before {
        super::persist(store, cache, COLL_LECTURERS, &existing)?;
    }
    Ok(())
}
