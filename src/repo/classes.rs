use serde::Serialize;
use uuid::Uuid;

use crate::cache::QueryCache;
use crate::error::DataError;
use crate::integrity;
use crate::model::{Class, ClassDraft, Lecturer, Student, MAX_STUDENT_SKS};
use crate::store::{Store, COLL_CLASSES, COLL_LECTURERS, COLL_STUDENTS};

/// Display view of a class with its soft references resolved. Dangling
/// references degrade to the raw identifier instead of failing the read.
#[derive(Debug, Serialize)]
pub struct ClassView {
    pub id: String,
    #[serde(rename = "namaKelas")]
    pub nama_kelas: String,
    #[serde(rename = "mataKuliah")]
    pub mata_kuliah: String,
    #[serde(rename = "dosenId")]
    pub dosen_id: String,
    /// Lecturer display name, or the raw id when the reference is dangling.
    pub dosen: String,
    #[serde(rename = "dosenResolved")]
    pub dosen_resolved: bool,
    pub mahasiswa: Vec<MemberView>,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub nim: String,
    /// Student display name, or the raw nim when the reference is dangling.
    pub nama: String,
    pub sks: u32,
    #[serde(rename = "sksMax")]
    pub sks_max: u32,
    pub resolved: bool,
}

pub fn list(store: &Store, cache: &mut QueryCache) -> Result<Vec<ClassView>, DataError> {
    let classes: Vec<Class> = super::load_cached(store, cache, COLL_CLASSES)?;
    let students: Vec<Student> = super::load_cached(store, cache, COLL_STUDENTS)?;
    let lecturers: Vec<Lecturer> = super::load_cached(store, cache, COLL_LECTURERS)?;

    Ok(classes
        .into_iter()
        .map(|c| resolve_view(c, &students, &lecturers))
        .collect())
}

/// Create a class. Unresolved member nims and a dangling lecturer id are
/// tolerated; they come back as consistency warnings alongside the record.
pub fn create(
    store: &Store,
    cache: &mut QueryCache,
    draft: ClassDraft,
) -> Result<(Class, Vec<String>), DataError> {
    let mut existing: Vec<Class> = super::load_fresh(store, cache, COLL_CLASSES)?;
    let warnings = consistency_warnings(store, cache, &draft)?;

    let class = Class {
        id: Uuid::new_v4().to_string(),
        nama_kelas: draft.nama_kelas,
        mata_kuliah: draft.mata_kuliah,
        dosen_id: draft.dosen_id,
        mahasiswa: draft.mahasiswa,
    };
    existing.push(class.clone());
    super::persist(store, cache, COLL_CLASSES, &existing)?;
    Ok((class, warnings))
}

/// Wholesale replacement keyed by id. The stored id always wins over
/// whatever the draft carries, so a caller cannot hijack the identifier.
pub fn update(
    store: &Store,
    cache: &mut QueryCache,
    id: &str,
    draft: ClassDraft,
) -> Result<(Class, Vec<String>), DataError> {
    let mut existing: Vec<Class> = super::load_fresh(store, cache, COLL_CLASSES)?;
    let pos = existing
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| DataError::NotFound(format!("kelas {}", id)))?;
    let warnings = consistency_warnings(store, cache, &draft)?;

    let class = Class {
        id: existing[pos].id.clone(),
        nama_kelas: draft.nama_kelas,
        mata_kuliah: draft.mata_kuliah,
        dosen_id: draft.dosen_id,
        mahasiswa: draft.mahasiswa,
    };
    existing[pos] = class.clone();
    super::persist(store, cache, COLL_CLASSES, &existing)?;
    Ok((class, warnings))
}

/// Idempotent delete by id.
pub fn delete(store: &Store, cache: &mut QueryCache, id: &str) -> Result<(), DataError> {
    let mut existing: Vec<Class> = super::load_fresh(store, cache, COLL_CLASSES)?;
    let before = existing.len();
    existing.retain(|c| c.id != id);
    if existing.len() != before {
        super::persist(store, cache, COLL_CLASSES, &existing)?;
    }
    Ok(())
}

fn consistency_warnings(
    store: &Store,
    cache: &mut QueryCache,
    draft: &ClassDraft,
) -> Result<Vec<String>, DataError> {
    let students: Vec<Student> = super::load_fresh(store, cache, COLL_STUDENTS)?;
    let lecturers: Vec<Lecturer> = super::load_fresh(store, cache, COLL_LECTURERS)?;

    let mut warnings = Vec::new();
    for nim in integrity::unresolved_members(&students, draft) {
        log::warn!("kelas {}: nim {} tidak terdaftar", draft.nama_kelas, nim);
        warnings.push(format!("nim {} tidak terdaftar", nim));
    }
    if integrity::resolve_lecturer(&lecturers, &draft.dosen_id).is_none() {
        log::warn!(
            "kelas {}: dosen {} tidak terdaftar",
            draft.nama_kelas,
            draft.dosen_id
        );
        warnings.push(format!("dosen {} tidak terdaftar", draft.dosen_id));
    }
    Ok(warnings)
}

fn resolve_view(class: Class, students: &[Student], lecturers: &[Lecturer]) -> ClassView {
    let (dosen, dosen_resolved) = match integrity::resolve_lecturer(lecturers, &class.dosen_id) {
        Some(l) => (l.nama.clone(), true),
        None => (class.dosen_id.clone(), false),
    };
    let mahasiswa = class
        .mahasiswa
        .iter()
        .map(|nim| match integrity::resolve_student(students, nim) {
            Some(s) => MemberView {
                nim: s.nim.clone(),
                nama: s.nama.clone(),
                sks: s.sks,
                sks_max: MAX_STUDENT_SKS,
                resolved: true,
            },
            None => MemberView {
                nim: nim.clone(),
                nama: nim.clone(),
                sks: 0,
                sks_max: MAX_STUDENT_SKS,
                resolved: false,
            },
        })
        .collect();

    ClassView {
        id: class.id,
        nama_kelas: class.nama_kelas,
        mata_kuliah: class.mata_kuliah,
        dosen_id: class.dosen_id,
        dosen,
        dosen_resolved,
        mahasiswa,
    }
}
