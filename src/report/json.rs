use crate::types::decision::Comparison;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct DecisionDocument<'a> {
    project: &'a str,
    generated_at: String,
    #[serde(flatten)]
    result: &'a Comparison,
}

pub fn to_json(
    comparison: &Comparison,
    project: &str,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DecisionDocument {
        project,
        generated_at: generated_at.to_rfc3339(),
        result: comparison,
    })
}
