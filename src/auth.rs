use thiserror::Error;

use crate::model::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Lecturers,
    Students,
    Classes,
}

impl Resource {
    fn label(&self) -> &'static str {
        match self {
            Resource::Lecturers => "dosen",
            Resource::Students => "mahasiswa",
            Resource::Classes => "kelas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Mutate,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not logged in")]
    Unauthenticated,
    #[error("role {role:?} may not modify {resource}")]
    Forbidden { role: Role, resource: &'static str },
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::Forbidden { .. } => "forbidden",
        }
    }
}

/// Decide whether the active session may perform `action` on `resource`.
/// The session is an explicit argument; there is no ambient role state.
///
/// Reads are open to every authenticated role. Lecturer mutations are
/// admin-only; student and class mutations are open to admin and dosen.
pub fn authorize<'a>(
    session: Option<&'a Session>,
    resource: Resource,
    action: Action,
) -> Result<&'a Session, AuthError> {
    let session = session.ok_or(AuthError::Unauthenticated)?;
    if action == Action::Read {
        return Ok(session);
    }
    let allowed = match resource {
        Resource::Lecturers => session.role == Role::Admin,
        Resource::Students | Resource::Classes => {
            matches!(session.role, Role::Admin | Role::Dosen)
        }
    };
    if allowed {
        Ok(session)
    } else {
        Err(AuthError::Forbidden {
            role: session.role,
            resource: resource.label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            role,
            nim: None,
            nama: None,
            logged_in_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn unauthenticated_is_refused_even_for_reads() {
        let err = authorize(None, Resource::Students, Action::Read).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[test]
    fn every_role_may_read() {
        for role in [Role::Admin, Role::Dosen, Role::Mahasiswa] {
            let s = session(role);
            authorize(Some(&s), Resource::Classes, Action::Read).expect("read allowed");
        }
    }

    #[test]
    fn only_admin_mutates_lecturers() {
        let admin = session(Role::Admin);
        authorize(Some(&admin), Resource::Lecturers, Action::Mutate).expect("admin");
        for role in [Role::Dosen, Role::Mahasiswa] {
            let s = session(role);
            let err = authorize(Some(&s), Resource::Lecturers, Action::Mutate).unwrap_err();
            assert!(matches!(err, AuthError::Forbidden { .. }));
        }
    }

    #[test]
    fn dosen_mutates_students_and_classes_but_mahasiswa_does_not() {
        let dosen = session(Role::Dosen);
        authorize(Some(&dosen), Resource::Students, Action::Mutate).expect("dosen students");
        authorize(Some(&dosen), Resource::Classes, Action::Mutate).expect("dosen classes");

        let mhs = session(Role::Mahasiswa);
        for resource in [Resource::Students, Resource::Classes] {
            let err = authorize(Some(&mhs), resource, Action::Mutate).unwrap_err();
            assert!(matches!(err, AuthError::Forbidden { .. }));
        }
    }
}
