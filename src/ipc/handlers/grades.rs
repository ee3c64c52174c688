use crate::grades::{self, GradeRecord};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
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

/// Older clients send the grade-entry form's raw REST shape with three
/// fixed quiz fields instead of a `quizzes` list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyQuizFields {
    #[serde(default, alias = "quiz1_marks")]
    quiz1_marks: Option<u32>,
    #[serde(default, alias = "quiz2_marks")]
    quiz2_marks: Option<u32>,
    #[serde(default, alias = "quiz3_marks")]
    quiz3_marks: Option<u32>,
}

fn parse_record(params: &serde_json::Value) -> Result<GradeRecord, HandlerErr> {
    if params.is_null() {
        return Ok(GradeRecord::default());
    }
    let mut record: GradeRecord = serde_json::from_value(params.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid grade record: {}", e)))?;

    if record.quizzes.is_empty() {
        let legacy: LegacyQuizFields = serde_json::from_value(params.clone())
            .map_err(|e| HandlerErr::bad_params(format!("invalid quiz marks: {}", e)))?;
        if legacy.quiz1_marks.is_some()
            || legacy.quiz2_marks.is_some()
            || legacy.quiz3_marks.is_some()
        {
            record.quizzes = vec![
                legacy.quiz1_marks.unwrap_or(0),
                legacy.quiz2_marks.unwrap_or(0),
                legacy.quiz3_marks.unwrap_or(0),
            ];
        }
    }
    Ok(record)
}

fn grades_compute(params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let record = parse_record(params)?;
    let out = grades::compute(&record);
    Ok(json!({
        "bestThreeQuizTotal": out.best_three_quiz_total,
        "totalMarks": out.total_marks,
        "percentage": out.percentage,
        "letter": out.letter,
        "color": out.letter.color(),
        "background": out.letter.background(),
    }))
}

fn handle_grades_compute(req: &Request) -> serde_json::Value {
    match grades_compute(&req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_grades_scale(req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "bands": grades::grading_scale() }))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.compute" => Some(handle_grades_compute(req)),
        "grades.scale" => Some(handle_grades_scale(req)),
        _ => None,
    }
}
