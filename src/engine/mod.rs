pub mod pair;
pub mod resolve;
pub mod rules;

use crate::catalog::candidates::{Candidate, CandidateRegistry};
use crate::catalog::questions::{QuestionCatalog, FOLLOW_UP_WEIGHT};
use crate::error::Result;
use crate::types::decision::{CandidateScore, Comparison};
use crate::types::response::{Response, ScoreBasis};
use resolve::{GapPolicy, ResolutionPolicy};
use rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const DEFAULT_FOLLOW_UP_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// MongoDB against PostgreSQL using the fixed pair table.
    TwoOption,
    /// Any registered candidates using category rules.
    Comparison,
}

impl Mode {
    pub fn catalog(self) -> QuestionCatalog {
        match self {
            Self::TwoOption => QuestionCatalog::two_option(),
            Self::Comparison => QuestionCatalog::guided(),
        }
    }

    pub fn default_policy(self) -> ResolutionPolicy {
        match self {
            Self::TwoOption => ResolutionPolicy::new(GapPolicy::SharePoints),
            Self::Comparison => ResolutionPolicy::new(GapPolicy::Relative),
        }
    }
}

#[derive(Debug, Clone)]
enum Scorer {
    /// Weight applied when the response is recorded.
    Pair,
    /// Weight applied during aggregation.
    Rules(RuleSet),
}

impl Scorer {
    fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::TwoOption => Self::Pair,
            Mode::Comparison => Self::Rules(RuleSet::standard()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Answering,
    FollowUps,
}

/// One assessment session over a fixed candidate set.
///
/// Each session owns its responses and context; nothing is shared between
/// engines except the registry they were built from.
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    mode: Mode,
    scorer: Scorer,
    candidates: Vec<Candidate>,
    policy: ResolutionPolicy,
    weights: BTreeMap<String, f64>,
    follow_up_factor: f64,
    responses: Vec<Response>,
    context: BTreeMap<String, String>,
}

impl ComparisonEngine {
    pub fn two_option(registry: &CandidateRegistry) -> Result<Self> {
        let candidates = registry.resolve(&[pair::CANDIDATE_A, pair::CANDIDATE_B])?;
        Ok(Self::from_parts(Mode::TwoOption, candidates))
    }

    pub fn comparison<S: AsRef<str>>(registry: &CandidateRegistry, ids: &[S]) -> Result<Self> {
        let candidates = registry.resolve(ids)?;
        Ok(Self::from_parts(Mode::Comparison, candidates))
    }

    pub(crate) fn from_parts(mode: Mode, candidates: Vec<Candidate>) -> Self {
        Self {
            mode,
            scorer: Scorer::for_mode(mode),
            candidates,
            policy: mode.default_policy(),
            weights: mode.catalog().default_weights(),
            follow_up_factor: DEFAULT_FOLLOW_UP_FACTOR,
            responses: Vec::new(),
            context: BTreeMap::new(),
        }
    }

    pub fn with_weights(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        for (question_id, weight) in overrides {
            self.set_weight(question_id, *weight);
        }
        self
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_follow_up_factor(mut self, factor: f64) -> Self {
        self.follow_up_factor = factor;
        self
    }

    pub(crate) fn with_history(
        mut self,
        responses: Vec<Response>,
        context: BTreeMap<String, String>,
    ) -> Self {
        self.responses = responses;
        self.context = context;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    pub fn weight(&self, question_id: &str) -> f64 {
        self.weights.get(question_id).copied().unwrap_or(0.0)
    }

    /// Changes the weight used by later responses; recorded ones keep theirs.
    pub fn set_weight(&mut self, question_id: &str, weight: f64) {
        self.weights.insert(question_id.to_string(), weight);
    }

    pub fn phase(&self) -> Phase {
        if self.responses.is_empty() {
            Phase::Empty
        } else if self.responses.iter().any(|response| response.follow_up) {
            Phase::FollowUps
        } else {
            Phase::Answering
        }
    }

    pub fn add_response(
        &mut self,
        question_id: &str,
        question_text: &str,
        answer_key: &str,
        answer_text: &str,
    ) {
        let weight = self.weight(question_id);
        self.record(question_id, question_text, answer_key, answer_text, weight, false);
    }

    /// Records a follow-up answer at its reduced weight.
    pub fn add_follow_up(
        &mut self,
        question_id: &str,
        question_text: &str,
        answer_key: &str,
        answer_text: &str,
    ) {
        let base = self
            .weights
            .get(question_id)
            .copied()
            .unwrap_or(FOLLOW_UP_WEIGHT);
        let weight = base * self.follow_up_factor;
        self.record(question_id, question_text, answer_key, answer_text, weight, true);
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    fn record(
        &mut self,
        question_id: &str,
        question_text: &str,
        answer_key: &str,
        answer_text: &str,
        weight: f64,
        follow_up: bool,
    ) {
        let (scores, rationale, basis, matched) = match &self.scorer {
            Scorer::Pair => {
                let scored = pair::score(question_id, answer_key);
                let scores = BTreeMap::from([
                    (pair::CANDIDATE_A.to_string(), scored.a * weight),
                    (pair::CANDIDATE_B.to_string(), scored.b * weight),
                ]);
                (
                    scores,
                    scored.rationale.to_string(),
                    ScoreBasis::Weighted,
                    scored.matched,
                )
            }
            Scorer::Rules(rules) => {
                let outcome = rules.score(question_id, answer_key, &self.candidates);
                (outcome.scores, outcome.rationale, ScoreBasis::Raw, outcome.matched)
            }
        };

        if !matched && !follow_up {
            warn!(question_id, answer_key, "answer has no scoring entry; recorded as neutral");
        }
        debug!(question_id, answer_key, weight, follow_up, "recorded response");

        self.responses.push(Response {
            question_id: question_id.to_string(),
            question_text: question_text.to_string(),
            answer_key: answer_key.to_string(),
            answer_text: answer_text.to_string(),
            weight,
            basis,
            scores,
            rationale,
            follow_up,
        });
    }

    /// Recomputes the result from scratch; calling it twice gives equal results.
    pub fn calculate(&self) -> Comparison {
        let mut totals = Vec::with_capacity(self.candidates.len());
        let mut breakdowns = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            let mut total = 0.0;
            let mut factor_scores = BTreeMap::<String, f64>::new();
            for response in &self.responses {
                let contribution = response.contribution(&candidate.id);
                total += contribution;
                *factor_scores
                    .entry(response.question_id.clone())
                    .or_insert(0.0) += contribution;
            }
            totals.push(total);
            breakdowns.push(factor_scores);
        }

        let percentages = resolve::percentages(&totals);
        let resolution = resolve::resolve(&totals, &self.policy);
        let recommendation = resolution
            .winner
            .and_then(|index| self.candidates.get(index))
            .map(|candidate| candidate.id.clone());

        let candidates = self
            .candidates
            .iter()
            .zip(totals)
            .zip(percentages)
            .zip(breakdowns)
            .map(|(((candidate, total), percentage), factor_scores)| CandidateScore {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                total,
                percentage,
                factor_scores,
            })
            .collect::<Vec<_>>();

        let summary = match resolution.winner.and_then(|index| candidates.get(index)) {
            Some(winner) => format!(
                "Recommended {} based on {} from weighted analysis",
                winner.name,
                resolution.confidence.label().to_lowercase()
            ),
            None => format!(
                "Scores are too close between {} - requires additional analysis",
                candidates
                    .iter()
                    .map(|candidate| candidate.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" and ")
            ),
        };

        debug!(
            responses = self.responses.len(),
            recommendation = recommendation.as_deref().unwrap_or("none"),
            confidence = resolution.confidence.label(),
            "resolved comparison"
        );

        Comparison {
            candidates,
            recommendation,
            confidence: resolution.confidence,
            gap: resolution.gap,
            policy: self.policy,
            summary,
            responses: self.responses.clone(),
            context: self.context.clone(),
        }
    }
}
