use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(ok(
            &req.id,
            json!({ "version": env!("CARGO_PKG_VERSION") }),
        )),
        _ => None,
    }
}
