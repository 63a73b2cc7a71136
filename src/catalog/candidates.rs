use crate::error::{Result, SelectorError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Relational,
    Document,
    KeyValue,
    Graph,
    Columnar,
    MultiModel,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Document => "document",
            Self::KeyValue => "key_value",
            Self::Graph => "graph",
            Self::Columnar => "columnar",
            Self::MultiModel => "multi_model",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningCurve {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcosystemMaturity {
    Emerging,
    Mature,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingModel {
    Vertical,
    Horizontal,
    Both,
}

impl ScalingModel {
    pub fn scales_out(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }
}

/// Traits that scoring rules match on beyond the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// First-class JSON document storage inside a non-document engine.
    NativeJson,
    /// Handles large numbers of simultaneous client connections cheaply.
    ConnectionScaling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub considerations: Vec<String>,
    #[serde(default)]
    pub ideal_for: Vec<String>,
    pub learning_curve: LearningCurve,
    pub ecosystem_maturity: EcosystemMaturity,
    pub scaling_model: ScalingModel,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl Candidate {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is(&self, category: Category) -> bool {
        self.category == category
    }
}

const COMPARISON_PAIRS: [[&str; 2]; 5] = [
    ["postgresql", "mongodb"],
    ["postgresql", "mysql"],
    ["mongodb", "elasticsearch"],
    ["redis", "postgresql"],
    ["mysql", "mongodb"],
];

/// Candidates known to the process, in registration order.
///
/// Populated at startup and only read once an assessment begins.
#[derive(Debug, Clone)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    pub fn builtin() -> Self {
        Self {
            candidates: builtin_candidates(),
        }
    }

    pub fn with_custom(custom: &[Candidate]) -> Result<Self> {
        let mut registry = Self::builtin();
        for candidate in custom {
            registry.register(candidate.clone())?;
        }
        Ok(registry)
    }

    /// Adds a candidate under its trimmed id.
    pub fn register(&mut self, mut candidate: Candidate) -> Result<()> {
        candidate.id = candidate.id.trim().to_string();
        if candidate.id.is_empty() {
            return Err(SelectorError::ConfigParse(
                "candidate id must be non-empty".to_string(),
            ));
        }
        if self.get(&candidate.id).is_some() {
            return Err(SelectorError::DuplicateCandidate(candidate.id));
        }
        self.candidates.push(candidate);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn by_category(&self, category: Category) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.is(category))
            .collect()
    }

    pub fn comparison_pairs(&self) -> Vec<[&str; 2]> {
        COMPARISON_PAIRS
            .iter()
            .filter(|pair| pair.iter().all(|id| self.get(id).is_some()))
            .copied()
            .collect()
    }

    /// Resolves an ordered comparison set, rejecting unknown or repeated ids.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Candidate>> {
        if ids.is_empty() {
            return Err(SelectorError::EmptyComparison);
        }
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id) {
                return Err(SelectorError::DuplicateCandidate(id.to_string()));
            }
            let candidate = self
                .get(id)
                .ok_or_else(|| SelectorError::UnknownCandidate(id.to_string()))?;
            resolved.push(candidate.clone());
        }
        Ok(resolved)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn builtin_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: "postgresql".to_string(),
            name: "PostgreSQL".to_string(),
            category: Category::Relational,
            description: "Advanced open-source relational database with JSON support".to_string(),
            strengths: strings(&[
                "ACID compliance and strong consistency",
                "Advanced SQL features and complex queries",
                "JSON/JSONB support for flexibility",
                "Mature ecosystem and tooling",
            ]),
            considerations: strings(&[
                "Schema migrations can be complex",
                "Vertical scaling limitations",
                "Memory usage can be high",
            ]),
            ideal_for: strings(&[
                "Applications with complex relational data",
                "Financial systems requiring ACID properties",
                "Analytics and reporting workloads",
            ]),
            learning_curve: LearningCurve::Medium,
            ecosystem_maturity: EcosystemMaturity::Enterprise,
            scaling_model: ScalingModel::Vertical,
            capabilities: BTreeSet::from([Capability::NativeJson]),
        },
        Candidate {
            id: "mongodb".to_string(),
            name: "MongoDB".to_string(),
            category: Category::Document,
            description: "Document-oriented NoSQL database with horizontal scaling".to_string(),
            strengths: strings(&[
                "Schema flexibility and evolution",
                "JSON-native document model",
                "Horizontal scaling capabilities",
                "Rapid prototyping and development",
            ]),
            considerations: strings(&[
                "Limited join support",
                "Eventual consistency model",
                "Schema design requires planning",
            ]),
            ideal_for: strings(&[
                "Rapid prototyping and agile development",
                "Content management systems",
                "Applications with evolving schemas",
            ]),
            learning_curve: LearningCurve::Low,
            ecosystem_maturity: EcosystemMaturity::Mature,
            scaling_model: ScalingModel::Horizontal,
            capabilities: BTreeSet::from([Capability::ConnectionScaling]),
        },
        Candidate {
            id: "mysql".to_string(),
            name: "MySQL".to_string(),
            category: Category::Relational,
            description: "Popular open-source relational database".to_string(),
            strengths: strings(&[
                "Wide adoption and community",
                "Excellent performance for read workloads",
                "Simple setup and administration",
            ]),
            considerations: strings(&[
                "Limited advanced SQL features compared to PostgreSQL",
                "Replication can be complex",
                "Less sophisticated JSON handling",
            ]),
            ideal_for: strings(&[
                "Web applications and CMS",
                "E-commerce platforms",
                "Cost-sensitive projects",
            ]),
            learning_curve: LearningCurve::Low,
            ecosystem_maturity: EcosystemMaturity::Enterprise,
            scaling_model: ScalingModel::Both,
            capabilities: BTreeSet::new(),
        },
        Candidate {
            id: "redis".to_string(),
            name: "Redis".to_string(),
            category: Category::KeyValue,
            description: "In-memory data structure store with persistence options".to_string(),
            strengths: strings(&[
                "Extremely fast in-memory operations",
                "Rich data types (sets, lists, hashes)",
                "Excellent for caching and sessions",
            ]),
            considerations: strings(&[
                "Memory-based storage limits dataset size",
                "Persistence configuration critical",
                "Not suitable as primary database for most apps",
            ]),
            ideal_for: strings(&["Caching layers", "Session storage", "Leaderboards and counters"]),
            learning_curve: LearningCurve::Low,
            ecosystem_maturity: EcosystemMaturity::Mature,
            scaling_model: ScalingModel::Horizontal,
            capabilities: BTreeSet::from([Capability::ConnectionScaling]),
        },
        Candidate {
            id: "elasticsearch".to_string(),
            name: "Elasticsearch".to_string(),
            category: Category::Document,
            description: "Distributed search and analytics engine".to_string(),
            strengths: strings(&[
                "Full-text search capabilities",
                "Real-time analytics and aggregations",
                "Horizontal scaling and sharding",
            ]),
            considerations: strings(&[
                "Complex cluster management",
                "Resource intensive",
                "Not ACID compliant",
            ]),
            ideal_for: strings(&[
                "Search-heavy applications",
                "Log and event analysis",
                "Monitoring and observability",
            ]),
            learning_curve: LearningCurve::High,
            ecosystem_maturity: EcosystemMaturity::Mature,
            scaling_model: ScalingModel::Horizontal,
            capabilities: BTreeSet::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: "CockroachDB".to_string(),
            category: Category::Relational,
            description: String::new(),
            strengths: vec![],
            considerations: vec![],
            ideal_for: vec![],
            learning_curve: LearningCurve::Medium,
            ecosystem_maturity: EcosystemMaturity::Mature,
            scaling_model: ScalingModel::Horizontal,
            capabilities: BTreeSet::new(),
        }
    }

    #[test]
    fn builtin_registry_keeps_registration_order() {
        let registry = CandidateRegistry::builtin();
        let ids = registry
            .all()
            .iter()
            .map(|candidate| candidate.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec!["postgresql", "mongodb", "mysql", "redis", "elasticsearch"]
        );
    }

    #[test]
    fn by_category_filters_document_stores() {
        let registry = CandidateRegistry::builtin();
        let names = registry
            .by_category(Category::Document)
            .iter()
            .map(|candidate| candidate.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["MongoDB", "Elasticsearch"]);
    }

    #[test]
    fn resolve_rejects_unknown_candidate() {
        let registry = CandidateRegistry::builtin();
        let err = registry
            .resolve(&["postgresql", "oracle"])
            .expect_err("unknown id should fail");
        assert!(matches!(err, SelectorError::UnknownCandidate(id) if id == "oracle"));
    }

    #[test]
    fn resolve_rejects_duplicates_and_empty_sets() {
        let registry = CandidateRegistry::builtin();
        assert!(matches!(
            registry.resolve(&["mysql", "mysql"]),
            Err(SelectorError::DuplicateCandidate(_))
        ));
        assert!(matches!(
            registry.resolve::<&str>(&[]),
            Err(SelectorError::EmptyComparison)
        ));
    }

    #[test]
    fn custom_candidates_register_before_use() {
        let registry = CandidateRegistry::with_custom(&[custom("cockroachdb")])
            .expect("custom should register");
        let resolved = registry
            .resolve(&["cockroachdb", "postgresql"])
            .expect("custom candidate should resolve");
        assert_eq!(resolved[0].name, "CockroachDB");
    }

    #[test]
    fn padded_custom_id_is_stored_trimmed() {
        let registry = CandidateRegistry::with_custom(&[custom(" cockroachdb ")])
            .expect("padded id should register");
        let resolved = registry
            .resolve(&["cockroachdb"])
            .expect("trimmed id should resolve");
        assert_eq!(resolved[0].id, "cockroachdb");

        let err = CandidateRegistry::with_custom(&[custom("mysql ")]).expect_err("collision");
        assert!(matches!(err, SelectorError::DuplicateCandidate(id) if id == "mysql"));
    }

    #[test]
    fn register_rejects_builtin_id_collision() {
        let err = CandidateRegistry::with_custom(&[custom("mysql")]).expect_err("collision");
        assert!(err.to_string().contains("mysql"));
    }

    #[test]
    fn comparison_pairs_reference_registered_candidates() {
        let registry = CandidateRegistry::builtin();
        let pairs = registry.comparison_pairs();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], ["postgresql", "mongodb"]);
    }
}
