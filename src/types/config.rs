use crate::catalog::candidates::Candidate;
use crate::catalog::questions::QuestionCatalog;
use crate::engine::resolve::{GapPolicy, ResolutionPolicy, Thresholds};
use crate::engine::{Mode, DEFAULT_FOLLOW_UP_FACTOR};
use crate::error::SelectorError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorConfig {
    pub project: Option<ProjectConfig>,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    pub assessment: Option<AssessmentConfig>,
    pub resolution: Option<ResolutionConfig>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    pub follow_up_factor: Option<f64>,
    pub max_follow_ups: Option<usize>,
    pub default_candidates: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionConfig {
    pub gap_policy: Option<GapPolicy>,
    pub low_gap: Option<f64>,
    pub high_gap: Option<f64>,
}

pub const DEFAULT_PROJECT_NAME: &str = "Custom Application";
pub const DEFAULT_MAX_FOLLOW_UPS: usize = 3;

impl SelectorConfig {
    pub fn project_name(&self) -> &str {
        self.project
            .as_ref()
            .map(|project| project.name.as_str())
            .unwrap_or(DEFAULT_PROJECT_NAME)
    }

    pub fn follow_up_factor(&self) -> f64 {
        self.assessment
            .as_ref()
            .and_then(|assessment| assessment.follow_up_factor)
            .unwrap_or(DEFAULT_FOLLOW_UP_FACTOR)
    }

    pub fn max_follow_ups(&self) -> usize {
        self.assessment
            .as_ref()
            .and_then(|assessment| assessment.max_follow_ups)
            .unwrap_or(DEFAULT_MAX_FOLLOW_UPS)
    }

    pub fn default_candidates(&self) -> Vec<String> {
        self.assessment
            .as_ref()
            .and_then(|assessment| assessment.default_candidates.clone())
            .unwrap_or_else(|| vec!["postgresql".to_string(), "mongodb".to_string()])
    }

    /// Resolution policy for `mode`, with any configured overrides applied.
    pub fn resolution_policy(&self, mode: Mode) -> ResolutionPolicy {
        let Some(resolution) = &self.resolution else {
            return mode.default_policy();
        };
        let gap = resolution
            .gap_policy
            .unwrap_or_else(|| mode.default_policy().gap);
        let defaults = gap.default_thresholds();
        ResolutionPolicy {
            gap,
            thresholds: Thresholds {
                low: resolution.low_gap.unwrap_or(defaults.low),
                high: resolution.high_gap.unwrap_or(defaults.high),
            },
        }
    }

    pub fn validate(&self) -> Result<(), SelectorError> {
        if let Some(project) = &self.project {
            if project.name.trim().is_empty() {
                return Err(SelectorError::ConfigParse(
                    "project.name must be non-empty".to_string(),
                ));
            }
        }

        let known = known_question_ids();
        let unknown = self
            .weights
            .keys()
            .filter(|key| !known.contains(key.as_str()))
            .cloned()
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            return Err(SelectorError::ConfigParse(format!(
                "weights contains unknown question id(s): {}",
                unknown.join(", ")
            )));
        }
        if let Some((id, weight)) = self
            .weights
            .iter()
            .find(|(_, weight)| !(0.0..=1.0).contains(*weight))
        {
            return Err(SelectorError::ConfigParse(format!(
                "weights.{id} must be between 0.0 and 1.0 (found {weight})"
            )));
        }

        let factor = self.follow_up_factor();
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(SelectorError::ConfigParse(
                "assessment.follow_up_factor must be greater than 0.0 and at most 1.0".to_string(),
            ));
        }
        if let Some(ids) = self
            .assessment
            .as_ref()
            .and_then(|assessment| assessment.default_candidates.as_ref())
        {
            if ids.is_empty() {
                return Err(SelectorError::ConfigParse(
                    "assessment.default_candidates cannot be empty".to_string(),
                ));
            }
        }

        for mode in [Mode::TwoOption, Mode::Comparison] {
            let thresholds = self.resolution_policy(mode).thresholds;
            if thresholds.low <= 0.0 || thresholds.low >= thresholds.high {
                return Err(SelectorError::ConfigParse(format!(
                    "resolution thresholds must satisfy 0 < low_gap < high_gap (found {} and {})",
                    thresholds.low, thresholds.high
                )));
            }
        }

        let mut seen = HashSet::new();
        for candidate in &self.candidates {
            let id = candidate.id.trim();
            if !seen.insert(id) {
                return Err(SelectorError::ConfigParse(format!(
                    "candidates contains duplicate id: {id}"
                )));
            }
        }

        Ok(())
    }
}

fn known_question_ids() -> HashSet<String> {
    [QuestionCatalog::two_option(), QuestionCatalog::guided()]
        .iter()
        .flat_map(|catalog| catalog.default_weights().into_keys())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::candidates::{Category, ScalingModel};

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[project]
name = "Inventory Service"

[weights]
schema_evolution = 0.30
consistency_requirements = 0.10

[assessment]
follow_up_factor = 0.3
max_follow_ups = 2
default_candidates = ["postgresql", "mysql", "cockroachdb"]

[resolution]
gap_policy = "relative"

[[candidates]]
id = "cockroachdb"
name = "CockroachDB"
category = "relational"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "horizontal"
capabilities = ["native_json"]
"#;
        let cfg: SelectorConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.project_name(), "Inventory Service");
        assert_eq!(cfg.weights.get("schema_evolution"), Some(&0.30));
        assert_eq!(cfg.follow_up_factor(), 0.3);
        assert_eq!(cfg.max_follow_ups(), 2);
        assert_eq!(cfg.candidates[0].category, Category::Relational);
        assert_eq!(cfg.candidates[0].scaling_model, ScalingModel::Horizontal);
        assert_eq!(
            cfg.resolution_policy(Mode::TwoOption),
            ResolutionPolicy::new(GapPolicy::Relative)
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let cfg: SelectorConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.project_name(), DEFAULT_PROJECT_NAME);
        assert_eq!(cfg.follow_up_factor(), DEFAULT_FOLLOW_UP_FACTOR);
        assert_eq!(cfg.max_follow_ups(), DEFAULT_MAX_FOLLOW_UPS);
        assert_eq!(cfg.default_candidates(), vec!["postgresql", "mongodb"]);
        assert_eq!(
            cfg.resolution_policy(Mode::TwoOption).gap,
            GapPolicy::SharePoints
        );
        assert_eq!(cfg.resolution_policy(Mode::Comparison).gap, GapPolicy::Relative);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_weight_keys() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[weights]
schema_evolution = 0.2
budget = 0.1
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown question id"));
        assert!(err.to_string().contains("budget"));
    }

    #[test]
    fn validate_rejects_out_of_range_weight() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[weights]
query_patterns = 1.5
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("weights.query_patterns"));
    }

    #[test]
    fn validate_rejects_zero_follow_up_factor() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[assessment]
follow_up_factor = 0.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("follow_up_factor"));
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[resolution]
gap_policy = "share_points"
low_gap = 25.0
high_gap = 20.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("low_gap < high_gap"));
    }

    #[test]
    fn validate_rejects_duplicate_custom_candidates() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[[candidates]]
id = "neo4j"
name = "Neo4j"
category = "graph"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "both"

[[candidates]]
id = "neo4j"
name = "Neo4j again"
category = "graph"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "both"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate id: neo4j"));
    }

    #[test]
    fn validate_treats_padded_ids_as_duplicates() {
        let cfg: SelectorConfig = toml::from_str(
            r#"
[[candidates]]
id = "neo4j"
name = "Neo4j"
category = "graph"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "both"

[[candidates]]
id = " neo4j "
name = "Neo4j padded"
category = "graph"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "both"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate id: neo4j"));
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let result = toml::from_str::<SelectorConfig>(
            r#"
[[candidates]]
id = "x"
name = "X"
category = "spreadsheet"
learning_curve = "low"
ecosystem_maturity = "emerging"
scaling_model = "vertical"
"#,
        );
        assert!(result.is_err());
    }
}
