//! Category-driven scoring rules for N-way comparisons.
//!
//! Each question dimension owns one rule function mapping a candidate and an
//! answer key to a raw score. Rules look at the candidate's category,
//! learning curve, scaling model, and capabilities, never at its id, so the
//! comparison set can change without touching the rules.

use crate::catalog::candidates::{Candidate, Capability, Category, LearningCurve};
use std::collections::BTreeMap;
use std::fmt;

pub type RuleFn = fn(&Candidate, &str) -> f64;

#[derive(Clone, Copy)]
pub struct DimensionRule {
    pub question_id: &'static str,
    pub answers: &'static [&'static str],
    pub score: RuleFn,
}

impl fmt::Debug for DimensionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionRule")
            .field("question_id", &self.question_id)
            .field("answers", &self.answers)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub scores: BTreeMap<String, f64>,
    pub rationale: String,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Single,
    Neutral,
    Subset,
}

fn rationale_for(outcome: Outcome, names: &[&str]) -> String {
    match outcome {
        Outcome::Single => format!(
            "Preference aligns with {}'s strengths in this area",
            names.first().copied().unwrap_or_default()
        ),
        Outcome::Neutral => "Response is neutral across database options".to_string(),
        Outcome::Subset => format!("Response favors {} for this factor", names.join(" and ")),
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<DimensionRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    pub fn standard() -> Self {
        let mut set = Self { rules: Vec::new() };
        for rule in [
            DimensionRule {
                question_id: "schema_evolution",
                answers: &[
                    "highly_predictable",
                    "somewhat_predictable",
                    "unpredictable",
                    "completely_unknown",
                ],
                score: schema_evolution,
            },
            DimensionRule {
                question_id: "query_patterns",
                answers: &[
                    "simple_crud",
                    "complex_joins",
                    "analytical_reporting",
                    "document_based",
                    "hierarchical_data",
                    "mixed_patterns",
                ],
                score: query_patterns,
            },
            DimensionRule {
                question_id: "team_expertise",
                answers: &[
                    "strong_sql",
                    "strong_nosql",
                    "javascript_json",
                    "mixed_skills",
                    "limited_experience",
                ],
                score: team_expertise,
            },
            DimensionRule {
                question_id: "consistency_requirements",
                answers: &[
                    "critical_acid",
                    "important_flexible",
                    "eventually_consistent",
                    "performance_priority",
                ],
                score: consistency_requirements,
            },
            DimensionRule {
                question_id: "performance_scaling",
                answers: &[
                    "read_heavy",
                    "write_heavy",
                    "balanced_load",
                    "low_latency",
                    "high_concurrency",
                ],
                score: performance_scaling,
            },
        ] {
            set.register(rule);
        }
        set
    }

    /// Adds or replaces the rule for a question dimension.
    pub fn register(&mut self, rule: DimensionRule) {
        self.rules
            .retain(|existing| existing.question_id != rule.question_id);
        self.rules.push(rule);
    }

    pub fn rule(&self, question_id: &str) -> Option<&DimensionRule> {
        self.rules.iter().find(|rule| rule.question_id == question_id)
    }

    /// Raw per-candidate scores for one answer, plus the rationale they imply.
    pub fn score(
        &self,
        question_id: &str,
        answer_key: &str,
        candidates: &[Candidate],
    ) -> RuleOutcome {
        let rule = self
            .rule(question_id)
            .filter(|rule| rule.answers.contains(&answer_key));

        let Some(rule) = rule else {
            return RuleOutcome {
                scores: candidates
                    .iter()
                    .map(|candidate| (candidate.id.clone(), 0.0))
                    .collect(),
                rationale: format!(
                    "No scoring rule for answer '{answer_key}' to question '{question_id}'"
                ),
                matched: false,
            };
        };

        let scored = candidates
            .iter()
            .map(|candidate| (candidate, (rule.score)(candidate, answer_key)))
            .collect::<Vec<_>>();
        let rationale = rationale(&scored);

        RuleOutcome {
            scores: scored
                .into_iter()
                .map(|(candidate, score)| (candidate.id.clone(), score))
                .collect(),
            rationale,
            matched: true,
        }
    }
}

fn rationale(scored: &[(&Candidate, f64)]) -> String {
    let max = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);
    let top = scored
        .iter()
        .filter(|(_, score)| *score == max)
        .map(|(candidate, _)| candidate.name.as_str())
        .collect::<Vec<_>>();

    let outcome = if top.len() == 1 {
        Outcome::Single
    } else if top.len() == scored.len() {
        Outcome::Neutral
    } else {
        Outcome::Subset
    };
    rationale_for(outcome, &top)
}

fn is_nosql(candidate: &Candidate) -> bool {
    candidate.is(Category::Document) || candidate.is(Category::KeyValue)
}

fn schema_evolution(candidate: &Candidate, answer: &str) -> f64 {
    match (answer, candidate.category) {
        ("highly_predictable", Category::Relational) => 0.5,
        ("highly_predictable", Category::Document) => 0.2,
        ("somewhat_predictable", Category::Relational | Category::Document) => 0.3,
        ("unpredictable" | "completely_unknown", Category::Document) => 0.5,
        ("unpredictable" | "completely_unknown", Category::Relational) => 0.1,
        _ => 0.0,
    }
}

fn query_patterns(candidate: &Candidate, answer: &str) -> f64 {
    match (answer, candidate.category) {
        ("simple_crud", _) => 0.25,
        ("complex_joins" | "analytical_reporting", Category::Relational) => 0.5,
        ("complex_joins" | "analytical_reporting", Category::Document) => 0.1,
        ("document_based" | "hierarchical_data", Category::Document) => 0.5,
        ("document_based" | "hierarchical_data", Category::Relational) => 0.2,
        ("mixed_patterns", Category::MultiModel) => 0.4,
        ("mixed_patterns", Category::Relational) if candidate.has(Capability::NativeJson) => 0.3,
        ("mixed_patterns", _) => 0.2,
        _ => 0.0,
    }
}

fn team_expertise(candidate: &Candidate, answer: &str) -> f64 {
    match answer {
        "strong_sql" if candidate.is(Category::Relational) => 0.4,
        "strong_sql" => 0.1,
        "strong_nosql" if is_nosql(candidate) => 0.4,
        "strong_nosql" => 0.1,
        "javascript_json" if candidate.is(Category::Document) => 0.3,
        "javascript_json" if candidate.has(Capability::NativeJson) => 0.2,
        "javascript_json" => 0.1,
        "mixed_skills" | "limited_experience" => match candidate.learning_curve {
            LearningCurve::Low => 0.2,
            LearningCurve::Medium => 0.15,
            LearningCurve::High => 0.1,
        },
        _ => 0.0,
    }
}

fn consistency_requirements(candidate: &Candidate, answer: &str) -> f64 {
    let relational = candidate.is(Category::Relational);
    match answer {
        "critical_acid" if relational => 0.3,
        "critical_acid" => 0.05,
        "important_flexible" if relational => 0.2,
        "important_flexible" => 0.15,
        "eventually_consistent" | "performance_priority" if is_nosql(candidate) => 0.2,
        "eventually_consistent" | "performance_priority" if relational => 0.1,
        _ => 0.0,
    }
}

fn performance_scaling(candidate: &Candidate, answer: &str) -> f64 {
    match answer {
        "read_heavy" if candidate.is(Category::Relational) => 0.2,
        "read_heavy" if candidate.is(Category::Document) => 0.15,
        "write_heavy" if candidate.scaling_model.scales_out() => 0.25,
        "write_heavy" => 0.1,
        "balanced_load" | "low_latency" => 0.15,
        "high_concurrency" if candidate.has(Capability::ConnectionScaling) => 0.2,
        "high_concurrency" => 0.15,
        _ => 0.0,
    }
}
