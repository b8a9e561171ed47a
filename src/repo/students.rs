use crate::cache::QueryCache;
use crate::error::DataError;
use crate::integrity;
use crate::model::{Student, StudentDraft};
use crate::store::{Store, COLL_STUDENTS};

pub fn list(store: &Store, cache: &mut QueryCache) -> Result<Vec<Student>, DataError> {
    super::load_cached(store, cache, COLL_STUDENTS)
}

pub fn create(
    store: &Store,
    cache: &mut QueryCache,
    draft: StudentDraft,
) -> Result<Student, DataError> {
    let mut existing: Vec<Student> = super::load_fresh(store, cache, COLL_STUDENTS)?;
    integrity::check_student(&existing, None, &draft)?;

    let student = Student {
        nim: draft.nim,
        nama: draft.nama,
        jurusan: draft.jurusan,
        status: draft.status,
        sks: draft.sks,
    };
    existing.push(student.clone());
    super::persist(store, cache, COLL_STUDENTS, &existing)?;
    Ok(student)
}

/// Replace the record keyed by `nim` wholesale. The draft may carry a new
/// nim as long as it does not collide with another student.
pub fn update(
    store: &Store,
    cache: &mut QueryCache,
    nim: &str,
    draft: StudentDraft,
) -> Result<Student, DataError> {
    let mut existing: Vec<Student> = super::load_fresh(store, cache, COLL_STUDENTS)?;
    let pos = existing
        .iter()
        .position(|s| s.nim == nim)
        .ok_or_else(|| DataError::NotFound(format!("mahasiswa {}", nim)))?;
    integrity::check_student(&existing, Some(nim), &draft)?;

    let student = Student {
        nim: draft.nim,
        nama: draft.nama,
        jurusan: draft.jurusan,
        status: draft.status,
        sks: draft.sks,
    };
    existing[pos] = student.clone();
    super::persist(store, cache, COLL_STUDENTS, &existing)?;
    Ok(student)
}

/// Unlike lecturers and classes, a student delete targets the natural key
/// directly; a missing nim is an error, not a no-op.
pub fn delete(store: &Store, cache: &mut QueryCache, nim: &str) -> Result<Student, DataError> {
    let mut existing: Vec<Student> = super::load_fresh(store, cache, COLL_STUDENTS)?;
    let pos = existing
        .iter()
        .position(|s| s.nim == nim)
        .ok_or_else(|| DataError::NotFound(format!("mahasiswa {}", nim)))?;
    let removed = existing.remove(pos);
    super::persist(store, cache, COLL_STUDENTS, &existing)?;
    Ok(removed)
}

pub fn resolve_by_nim(
    store: &Store,
    cache: &mut QueryCache,
    nim: &str,
) -> Result<Option<Student>, DataError> {
    let students: Vec<Student> = super::load_cached(store, cache, COLL_STUDENTS)?;
    Ok(integrity::resolve_student(&students, nim).cloned())
}
