use crate::engine::resolve::{Confidence, ResolutionPolicy};
use crate::types::response::Response;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_CLEAR_WINNER: &str = "Neutral/Requires Further Analysis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub id: String,
    pub name: String,
    pub total: f64,
    pub percentage: f64,
    /// Weighted contribution per question id.
    pub factor_scores: BTreeMap<String, f64>,
}

/// Snapshot computed from the full response sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub candidates: Vec<CandidateScore>,
    pub recommendation: Option<String>,
    pub confidence: Confidence,
    pub gap: Option<f64>,
    pub policy: ResolutionPolicy,
    pub summary: String,
    pub responses: Vec<Response>,
    pub context: BTreeMap<String, String>,
}

impl Comparison {
    pub fn candidate(&self, id: &str) -> Option<&CandidateScore> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn recommended(&self) -> Option<&CandidateScore> {
        self.recommendation
            .as_deref()
            .and_then(|id| self.candidate(id))
    }

    pub fn recommendation_label(&self) -> &str {
        self.recommended()
            .map(|candidate| candidate.name.as_str())
            .unwrap_or(NO_CLEAR_WINNER)
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &CandidateScore> {
        self.candidates
            .iter()
            .filter(move |candidate| Some(&candidate.id) != self.recommendation.as_ref())
    }
}
