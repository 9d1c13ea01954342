use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::StudentRecord;
use crate::normalize::composite_key;
use serde_json::json;

fn str_param<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.params.get(name).and_then(|v| v.as_str())
}

/// Identity fields and scores, the way a dashboard shows them.
fn record_json(key: &str, record: &StudentRecord, display_columns: &[String]) -> serde_json::Value {
    json!({
        "found": true,
        "key": key,
        "identity": {
            "turma": record.class_label,
            "aluno": record.name,
            "codigo": record.code,
        },
        "scores": record.ordered_scores(display_columns),
    })
}

fn respond(
    state: &AppState,
    req: &Request,
    key: &str,
    record: Option<StudentRecord>,
) -> serde_json::Value {
    match record {
        Some(record) => {
            let corpus = state.service.snapshot();
            ok(&req.id, record_json(key, &record, &corpus.display_columns))
        }
        None => ok(&req.id, json!({ "found": false })),
    }
}

fn handle_lookup(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (Some(name), Some(code)) = (str_param(req, "name"), str_param(req, "code")) else {
        return err(&req.id, "bad_params", "missing params.name or params.code", None);
    };
    let key = composite_key(name, code);
    let record = state.service.lookup(name, code);
    respond(state, req, &key, record)
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(key) = str_param(req, "key") else {
        return err(&req.id, "bad_params", "missing params.key", None);
    };
    let record = state.service.get(key);
    respond(state, req, key, record)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.lookup" => Some(handle_lookup(state, req)),
        "students.get" => Some(handle_get(state, req)),
        _ => None,
    }
}
