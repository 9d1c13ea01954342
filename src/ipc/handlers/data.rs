use crate::ipc::error::{load_err, ok};
use crate::ipc::types::{AppState, Request};
use crate::service::ReloadOutcome;
use serde_json::json;

fn handle_reload(state: &mut AppState, req: &Request) -> serde_json::Value {
    let if_changed = req
        .params
        .get("ifChanged")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let result = if if_changed {
        state.service.reload_if_changed()
    } else {
        state.service.reload()
    };

    match result {
        Ok(outcome) => {
            let corpus = state.service.snapshot();
            let reloaded = match &outcome {
                ReloadOutcome::Reloaded {
                    generation,
                    records,
                } => {
                    log::info!("data.reload: generation {generation} with {records} records");
                    true
                }
                ReloadOutcome::Unchanged { generation } => {
                    log::info!("data.reload: source unchanged, generation {generation}");
                    false
                }
            };
            ok(
                &req.id,
                json!({
                    "reloaded": reloaded,
                    "generation": corpus.generation,
                    "records": corpus.len(),
                    "sheets": corpus.sheets,
                }),
            )
        }
        Err(e) => load_err(&req.id, &e),
    }
}

fn handle_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let corpus = state.service.snapshot();
    ok(
        &req.id,
        json!({
            "sourcePath": corpus.source.to_string_lossy(),
            "displayColumns": corpus.display_columns,
            "sheets": corpus.sheets,
            "records": corpus.len(),
            "rows": corpus.row_count,
            "duplicateKeys": corpus.duplicate_keys,
            "fingerprint": corpus.fingerprint,
            "generation": corpus.generation,
            "loadedAt": corpus.loaded_at.to_rfc3339(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "data.reload" => Some(handle_reload(state, req)),
        "data.summary" => Some(handle_summary(state, req)),
        _ => None,
    }
}
