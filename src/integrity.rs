//! Cross-entity invariants, checked before a mutation commits.
//!
//! This module is the single authority for natural-key uniqueness and the
//! sks caps; repositories delegate here instead of re-implementing the
//! checks with their own rules.

use crate::error::DataError;
use crate::model::{
    ClassDraft, Lecturer, LecturerDraft, Student, StudentDraft, MAX_LECTURER_SKS, MAX_STUDENT_SKS,
};

/// Validate a student draft against the current collection. `current_nim` is
/// the key being updated, or `None` for a create.
pub fn check_student(
    existing: &[Student],
    current_nim: Option<&str>,
    draft: &StudentDraft,
) -> Result<(), DataError> {
    if draft.sks > MAX_STUDENT_SKS {
        return Err(DataError::CreditLimitExceeded {
            sks: draft.sks,
            max: MAX_STUDENT_SKS,
        });
    }
    let collides = existing
        .iter()
        .any(|s| s.nim == draft.nim && current_nim != Some(s.nim.as_str()));
    if collides {
        return Err(DataError::DuplicateKey(format!(
            "nim {} sudah terdaftar",
            draft.nim
        )));
    }
    Ok(())
}

/// Validate a lecturer draft. `current_id` is the id of the record being
/// updated, or `None` for a create.
pub fn check_lecturer(
    existing: &[Lecturer],
    current_id: Option<&str>,
    draft: &LecturerDraft,
) -> Result<(), DataError> {
    if draft.sks > MAX_LECTURER_SKS {
        return Err(DataError::CreditLimitExceeded {
            sks: draft.sks,
            max: MAX_LECTURER_SKS,
        });
    }
    let collides = existing
        .iter()
        .any(|l| l.nip == draft.nip && current_id != Some(l.id.as_str()));
    if collides {
        return Err(DataError::DuplicateKey(format!(
            "nip {} sudah terdaftar",
            draft.nip
        )));
    }
    Ok(())
}

/// Member nims in a class draft that do not resolve to a stored student.
/// Dangling references are tolerated (the UI falls back to showing the raw
/// nim) but reported so the caller can surface a consistency warning.
pub fn unresolved_members(students: &[Student], class: &ClassDraft) -> Vec<String> {
    class
        .mahasiswa
        .iter()
        .filter(|nim| !students.iter().any(|s| &s.nim == *nim))
        .cloned()
        .collect()
}

pub fn resolve_lecturer<'a>(lecturers: &'a [Lecturer], dosen_id: &str) -> Option<&'a Lecturer> {
    lecturers.iter().find(|l| l.id == dosen_id)
}

pub fn resolve_student<'a>(students: &'a [Student], nim: &str) -> Option<&'a Student> {
    students.iter().find(|s| s.nim == nim)
}
