use std::path::PathBuf;

use serde::Deserialize;

use crate::cache::QueryCache;
use crate::model::Session;
use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<Store>,
    pub cache: QueryCache,
    pub session: Option<Session>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            workspace: None,
            store: None,
            cache: QueryCache::new(),
            session: None,
        }
    }
}
