use serde_json::json;

use crate::auth::{self, Action, Resource};
use crate::ipc::error::{auth_err, data_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::StudentDraft;
use crate::repo;

fn confirmed(req: &Request) -> bool {
    req.params
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(true)
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Students, Action::Read) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    // A mahasiswa client highlights its own row; mark it here so the client
    // does not need session knowledge of its own.
    let own_nim = state.session.as_ref().and_then(|s| s.nim.clone());

    match repo::students::list(store, &mut state.cache) {
        Ok(students) => {
            let rows: Vec<serde_json::Value> = students
                .into_iter()
                .map(|s| {
                    let is_self = own_nim.as_deref() == Some(s.nim.as_str());
                    json!({
                        "nim": s.nim,
                        "nama": s.nama,
                        "jurusan": s.jurusan,
                        "status": s.status,
                        "sks": s.sks,
                        "isSelf": is_self
                    })
                })
                .collect();
            ok(&req.id, json!({ "students": rows }))
        }
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Students, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let draft: StudentDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    if draft.nim.trim().is_empty() || draft.nama.trim().is_empty() {
        return err(&req.id, "bad_params", "nim/nama must not be empty", None);
    }

    match repo::students::create(store, &mut state.cache, draft) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Students, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    if !confirmed(req) {
        return ok(&req.id, json!({ "cancelled": true }));
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let draft: StudentDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let nim = draft.nim.clone();

    match repo::students::update(store, &mut state.cache, &nim, draft) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Students, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    if !confirmed(req) {
        return ok(&req.id, json!({ "cancelled": true }));
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let nim = match req.params.get("nim").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing nim", None),
    };

    // Returns the removed record so the client can name it in the toast.
    match repo::students::delete(store, &mut state.cache, &nim) {
        Ok(student) => ok(&req.id, json!({ "deleted": student })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_resolve_by_nim(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Students, Action::Read) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let nim = match req.params.get("nim").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing nim", None),
    };

    match repo::students::resolve_by_nim(store, &mut state.cache, &nim) {
        Ok(student) => {
            let resolved = student.is_some();
            ok(&req.id, json!({ "student": student, "resolved": resolved }))
        }
        Err(e) => data_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        "students.resolveByNim" => Some(handle_resolve_by_nim(state, req)),
        _ => None,
    }
}
