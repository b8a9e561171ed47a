use chrono::Utc;
use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, Session};
use crate::store::KEY_SESSION;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let role: Role = match req
        .params
        .get("role")
        .map(|v| serde_json::from_value(v.clone()))
    {
        Some(Ok(r)) => r,
        Some(Err(_)) | None => {
            return err(
                &req.id,
                "bad_params",
                "role must be admin, dosen or mahasiswa",
                None,
            )
        }
    };
    let nim = req
        .params
        .get("nim")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let nama = req
        .params
        .get("nama")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let session = Session {
        role,
        nim,
        nama,
        logged_in_at: Utc::now().to_rfc3339(),
    };
    let doc = match serde_json::to_value(&session) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    if let Err(e) = store.set(KEY_SESSION, &doc) {
        return err(&req.id, "storage_unavailable", e.to_string(), None);
    }

    log::info!("session started: role {:?}", session.role);
    state.session = Some(session);
    ok(&req.id, json!({ "session": state.session }))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(store) = state.store.as_ref() {
        if let Err(e) = store.remove(KEY_SESSION) {
            return err(&req.id, "storage_unavailable", e.to_string(), None);
        }
    }
    state.session = None;
    ok(&req.id, json!({ "loggedOut": true }))
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "session": state.session }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.current" => Some(handle_current(state, req)),
        _ => None,
    }
}
