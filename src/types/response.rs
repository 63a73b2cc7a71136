use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a response's stored scores already include its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Scores were multiplied by the weight when the response was recorded.
    Weighted,
    /// Scores are raw; the weight is applied during aggregation.
    Raw,
}

/// One answered question. Never edited after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    pub question_text: String,
    pub answer_key: String,
    pub answer_text: String,
    pub weight: f64,
    pub basis: ScoreBasis,
    pub scores: BTreeMap<String, f64>,
    pub rationale: String,
    #[serde(default)]
    pub follow_up: bool,
}

impl Response {
    pub fn stored_score(&self, candidate_id: &str) -> Option<f64> {
        self.scores.get(candidate_id).copied()
    }

    /// Weighted contribution of this response to a candidate's aggregate.
    pub fn contribution(&self, candidate_id: &str) -> f64 {
        let score = self.stored_score(candidate_id).unwrap_or(0.0);
        match self.basis {
            ScoreBasis::Weighted => score,
            ScoreBasis::Raw => score * self.weight,
        }
    }
}
