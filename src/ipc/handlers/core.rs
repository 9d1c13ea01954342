use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let corpus = state.service.snapshot();
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "sourcePath": state.service.source().to_string_lossy(),
            "generation": corpus.generation,
            "loadedAt": corpus.loaded_at.to_rfc3339(),
            "records": corpus.len(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        _ => None,
    }
}
