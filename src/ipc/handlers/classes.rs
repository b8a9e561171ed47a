use serde_json::json;

use crate::auth::{self, Action, Resource};
use crate::ipc::error::{auth_err, data_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::ClassDraft;
use crate::repo;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Classes, Action::Read) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    match repo::classes::list(store, &mut state.cache) {
        Ok(classes) => ok(&req.id, json!({ "classes": classes })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Classes, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let draft: ClassDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    if draft.nama_kelas.trim().is_empty() || draft.mata_kuliah.trim().is_empty() {
        return err(
            &req.id,
            "bad_params",
            "namaKelas/mataKuliah must not be empty",
            None,
        );
    }

    match repo::classes::create(store, &mut state.cache, draft) {
        Ok((class, warnings)) => ok(&req.id, json!({ "class": class, "warnings": warnings })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Classes, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let id = match req.params.get("id").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing id", None),
    };
    let draft: ClassDraft = match serde_json::from_value(req.params.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };

    match repo::classes::update(store, &mut state.cache, &id, draft) {
        Ok((class, warnings)) => ok(&req.id, json!({ "class": class, "warnings": warnings })),
        Err(e) => data_err(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(e) = auth::authorize(state.session.as_ref(), Resource::Classes, Action::Mutate) {
        return auth_err(&req.id, &e);
    }
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let id = match req.params.get("id").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing id", None),
    };

    match repo::classes::delete(store, &mut state.cache, &id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => data_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_list(state, req)),
        "classes.create" => Some(handle_create(state, req)),
        "classes.update" => Some(handle_update(state, req)),
        "classes.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
