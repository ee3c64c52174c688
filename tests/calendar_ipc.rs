use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_edusisd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn edusisd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn seed(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    events: serde_json::Value,
) {
    let resp = request(stdin, reader, "seed", "events.seed", json!({ "events": events }));
    assert_eq!(resp["ok"], json!(true), "seed failed: {}", resp);
}

#[test]
fn month_grid_is_front_padded_and_counts_overflow() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    // Five events on Aug 14: two indicators, three overflow.
    seed(
        &mut stdin,
        &mut reader,
        json!([
            { "date": "2026-08-14", "title": "a", "tag": "Quiz" },
            { "date": "2026-08-14", "title": "b", "tag": "Exam" },
            { "date": "2026-08-14", "title": "c" },
            { "date": "2026-08-14", "title": "d" },
            { "date": "2026-08-14", "title": "e" }
        ]),
    );

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "calendar.monthGrid",
        json!({ "year": 2026, "month": 8, "today": "2026-08-26" }),
    );
    let result = &resp["result"];

    // Aug 1 2026 is a Saturday: six filler cells from the tail of July.
    assert_eq!(result["leading"], json!([26, 27, 28, 29, 30, 31]));
    let days = result["days"].as_array().expect("days");
    assert_eq!(days.len(), 31);

    let cell = &days[13];
    assert_eq!(cell["day"], json!(14));
    assert_eq!(cell["indicators"].as_array().expect("indicators").len(), 2);
    assert_eq!(cell["overflow"], json!(3));
    assert_eq!(cell["indicators"][0]["tag"], json!("Quiz"));

    let today_days: Vec<i64> = days
        .iter()
        .filter(|c| c["isToday"] == json!(true))
        .map(|c| c["day"].as_i64().expect("day"))
        .collect();
    assert_eq!(today_days, vec![26]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn agenda_buckets_by_day_label_in_sorted_order() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    seed(
        &mut stdin,
        &mut reader,
        json!([
            { "date": "2026-08-26", "time": "2:00 PM", "title": "Staff meeting", "tag": "Meeting" },
            { "date": "2026-08-15", "time": "All Day", "title": "Report cards", "tag": "Deadline" },
            { "date": "2026-08-25", "time": "9:00 AM", "title": "Quiz 3", "tag": "Quiz" },
            { "date": "2026-08-26", "time": "10:00 AM", "title": "Lab", "tag": "Class" }
        ]),
    );

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "calendar.agenda",
        json!({ "today": "2026-08-26" }),
    );
    let buckets = resp["result"]["buckets"].as_array().expect("buckets");
    let labels: Vec<&str> = buckets
        .iter()
        .map(|b| b["label"].as_str().expect("label"))
        .collect();
    assert_eq!(labels, vec!["Aug 15", "Yesterday", "Today"]);

    // Same-day events keep their insertion order.
    let today_titles: Vec<&str> = buckets[2]["events"]
        .as_array()
        .expect("events")
        .iter()
        .map(|e| e["title"].as_str().expect("title"))
        .collect();
    assert_eq!(today_titles, vec!["Staff meeting", "Lab"]);

    let rows = resp["result"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["kind"], json!("header"));
    assert_eq!(rows[0]["label"], json!("Aug 15"));
    assert_eq!(rows[1]["kind"], json!("event"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn agenda_is_empty_when_no_events_exist() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "calendar.agenda",
        json!({ "today": "2026-08-26" }),
    );
    assert_eq!(resp["result"]["buckets"], json!([]));
    assert_eq!(resp["result"]["rows"], json!([]));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn bad_dates_and_months_are_rejected() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let bad_month = request(
        &mut stdin,
        &mut reader,
        "1",
        "calendar.monthGrid",
        json!({ "year": 2026, "month": 13 }),
    );
    assert_eq!(bad_month["ok"], json!(false));
    assert_eq!(bad_month["error"]["code"], json!("bad_params"));

    let bad_today = request(
        &mut stdin,
        &mut reader,
        "2",
        "calendar.agenda",
        json!({ "today": "not-a-date" }),
    );
    assert_eq!(bad_today["error"]["code"], json!("bad_params"));

    drop(stdin);
    let _ = child.wait();
}
