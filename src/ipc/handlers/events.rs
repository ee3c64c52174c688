use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::schedule::{self, EventTag};
use crate::store::EventStore;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

struct HandlerErr {
    code: &'static str,
    message: String,
}

impl HandlerErr {
    fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
        }
    }

    fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, None)
    }
}

fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Malformed dates stop here; nothing unparseable ever enters the store.
fn parse_date(raw: &str) -> Result<NaiveDate, HandlerErr> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| HandlerErr::bad_params(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewEvent {
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    tag: EventTag,
}

fn parse_new_event(raw: &serde_json::Value) -> Result<(NaiveDate, NewEvent), HandlerErr> {
    let entry: NewEvent = serde_json::from_value(raw.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid event: {}", e)))?;
    let date = parse_date(&entry.date)?;
    Ok((date, entry))
}

fn events_add(store: &mut EventStore, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let (date, entry) = parse_new_event(params)?;
    let id = store.add(date, entry.time, entry.title, entry.tag);
    Ok(json!({ "eventId": id }))
}

fn events_seed(store: &mut EventStore, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let Some(entries) = params.get("events").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing events"));
    };
    // Validate the whole batch before touching the store.
    let mut parsed = Vec::with_capacity(entries.len());
    for raw in entries {
        parsed.push(parse_new_event(raw)?);
    }
    let ids: Vec<String> = parsed
        .into_iter()
        .map(|(date, entry)| store.add(date, entry.time, entry.title, entry.tag))
        .collect();
    Ok(json!({ "eventIds": ids }))
}

fn events_delete(store: &mut EventStore, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let event_id = get_required_str(params, "eventId")?;
    if !store.remove(&event_id) {
        return Err(HandlerErr {
            code: "not_found",
            message: "event not found".to_string(),
        });
    }
    Ok(json!({ "removed": true }))
}

fn events_on_date(store: &EventStore, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let date = parse_date(&get_required_str(params, "date")?)?;
    let hits = schedule::events_on_date(store.events(), date);
    Ok(json!({ "events": hits }))
}

fn respond(req: &Request, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "events.add" => Some(respond(req, events_add(&mut state.events, &req.params))),
        "events.seed" => Some(respond(req, events_seed(&mut state.events, &req.params))),
        "events.delete" => Some(respond(req, events_delete(&mut state.events, &req.params))),
        "events.list" => Some(ok(&req.id, json!({ "events": state.events.events() }))),
        "events.onDate" => Some(respond(req, events_on_date(&state.events, &req.params))),
        _ => None,
    }
}
