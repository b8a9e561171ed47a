use serde_json::json;

use crate::auth::{self, Action, Resource};
use crate::ipc::error::{auth_err, data_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::LecturerDraft;
use crate::repo;

/// Confirmation outcome forwarded by the client's modal prompt. Absent means
/// the client did not prompt; a declined prompt cancels the mutation with no
/// side effects and no error.
fn confirmed(req: &Request) -> bool {
    req.params
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(true)
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Lecturers, Action::Read) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match repo::lecturers::list(store, &mut state.cache) {
        Ok(lecturers) => ok(&req.id, json!({ "lecturers": lecturers })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Lecturers, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let draft: LecturerDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    if draft.nip.trim().is_empty() || draft.nama.trim().is_empty() {
        return err(&req.id, "bad_params", "nip/nama must not be empty", None);
    }

    match repo::lecturers::create(store, &mut state.cache, draft) {
        Ok(lecturer) => ok(&req.id, json!({ "lecturer": lecturer })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Lecturers, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    if !confirmed(req) {
        return ok(&req.id, json!({ "cancelled": true }));
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let id = match req.params.get("id").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing id", None),
    };
    let draft: LecturerDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };

    match repo::lecturers::update(store, &mut state.cache, &id, draft) {
        Ok(lecturer) => ok(&req.id, json!({ "lecturer": lecturer })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Lecturers, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    if !confirmed(req) {
        return ok(&req.id, json!({ "cancelled": true }));
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let id = match req.params.get("id").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing id", None),
    };

    match repo::lecturers::delete(store, &mut state.cache, &id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => data_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "lecturers.list" => Some(handle_list(state, req)),
        "lecturers.create" => Some(handle_create(state, req)),
        "lecturers.update" => Some(handle_update(state, req)),
        "lecturers.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
