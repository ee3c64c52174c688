use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::schedule;
use chrono::{Local, NaiveDate};
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

/// Reference date for Today/Yesterday labeling and the today marker.
/// Clients pass `today` explicitly (tests rely on this); absent means the
/// local wall-clock date.
fn parse_today(params: &serde_json::Value) -> Result<NaiveDate, HandlerErr> {
    match params.get("today").and_then(|v| v.as_str()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| HandlerErr::bad_params(format!("'{}' is not a YYYY-MM-DD date", raw))),
        None => Ok(Local::now().date_naive()),
    }
}

fn month_grid(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let year = params
        .get("year")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| HandlerErr::bad_params("missing year"))? as i32;
    let month = params
        .get("month")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| HandlerErr::bad_params("missing month"))?;
    if !(1..=12).contains(&month) {
        return Err(HandlerErr::bad_params("month must be between 1 and 12"));
    }
    let today = parse_today(params)?;

    let grid = schedule::build_month_grid(year, month as u32, state.events.events(), today)
        .ok_or_else(|| HandlerErr::bad_params("year out of range"))?;
    Ok(json!(grid))
}

fn agenda(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let today = parse_today(params)?;
    let buckets = schedule::group_by_day_label(state.events.events(), today);
    let rows = schedule::flatten_agenda(&buckets);
    Ok(json!({ "buckets": buckets, "rows": rows }))
}

fn respond(req: &Request, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "calendar.monthGrid" => Some(respond(req, month_grid(state, &req.params))),
        "calendar.agenda" => Some(respond(req, agenda(state, &req.params))),
        _ => None,
    }
}
