//! Fixed MongoDB/PostgreSQL scoring table.

/// Candidate scored by the first column of the table.
pub const CANDIDATE_A: &str = "mongodb";
/// Candidate scored by the second column of the table.
pub const CANDIDATE_B: &str = "postgresql";

pub const NOT_FOUND_RATIONALE: &str = "Response not found in scoring matrix";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub a: f64,
    pub b: f64,
    pub rationale: &'static str,
    pub matched: bool,
}

type Row = (&'static str, f64, f64, &'static str);

const SCHEMA_EVOLUTION: &[Row] = &[
    (
        "highly_predictable",
        0.0,
        2.0,
        "Well-defined schema benefits from PostgreSQL's structure and migration tools",
    ),
    ("somewhat_predictable", 1.0, 1.0, "Mixed requirements can work with either database"),
    ("unpredictable", 2.0, 0.0, "Frequent schema changes favor MongoDB's flexible document model"),
    ("completely_unknown", 2.0, 0.0, "Unknown evolution patterns benefit from schema flexibility"),
];

const QUERY_PATTERNS: &[Row] = &[
    ("simple_crud", 1.0, 1.0, "Basic operations work well with both databases"),
    ("complex_joins", 0.0, 2.0, "Complex relational queries are PostgreSQL's strength"),
    ("analytical_reporting", 0.0, 2.0, "SQL analytics and reporting favor PostgreSQL"),
    ("document_retrieval", 2.0, 0.0, "Document-based access patterns suit MongoDB"),
    ("hierarchical_nested", 2.0, 0.0, "Nested data structures are natural in MongoDB"),
    ("mixed_patterns", 1.0, 1.0, "Varied patterns may work with either approach"),
];

const TEAM_EXPERTISE: &[Row] = &[
    ("sql_heavy", 0.0, 1.0, "SQL expertise reduces PostgreSQL learning curve"),
    ("nosql_heavy", 1.0, 0.0, "NoSQL experience favors MongoDB adoption"),
    ("javascript_heavy", 1.0, 0.0, "JavaScript familiarity aligns with MongoDB's JSON model"),
    ("mixed_skills", 0.5, 0.5, "Balanced skills allow either choice"),
    ("learning_motivated", 1.0, 1.0, "Team openness to learning supports either technology"),
];

const CONSISTENCY_NEEDS: &[Row] = &[
    (
        "acid_critical",
        0.0,
        2.0,
        "Critical consistency requirements demand PostgreSQL's ACID guarantees",
    ),
    ("mostly_consistent", 0.0, 1.0, "Strong consistency preferences favor PostgreSQL"),
    ("eventually_consistent", 1.0, 0.0, "Eventual consistency acceptable, MongoDB suitable"),
    ("flexible", 1.0, 0.0, "Flexible consistency allows MongoDB's performance benefits"),
];

const PERFORMANCE_PROFILE: &[Row] = &[
    ("read_heavy_analytics", 0.0, 1.0, "Read-heavy analytical workloads suit PostgreSQL"),
    ("write_heavy_scaling", 1.0, 0.0, "High-volume writes benefit from MongoDB's scaling"),
    ("balanced_load", 1.0, 1.0, "Balanced workloads work with either database"),
    ("low_latency_critical", 1.0, 0.0, "Low latency often favors MongoDB's document model"),
    ("high_concurrency", 0.0, 1.0, "High concurrency benefits from PostgreSQL's maturity"),
];

const TABLE: &[(&str, &[Row])] = &[
    ("schema_evolution", SCHEMA_EVOLUTION),
    ("query_patterns", QUERY_PATTERNS),
    ("team_expertise", TEAM_EXPERTISE),
    ("consistency_needs", CONSISTENCY_NEEDS),
    ("performance_profile", PERFORMANCE_PROFILE),
];

/// Looks up the relative preference of one answer for each candidate.
///
/// Unknown pairs score zero for both sides instead of failing.
pub fn score(question_id: &str, answer_key: &str) -> PairScore {
    TABLE
        .iter()
        .find(|(id, _)| *id == question_id)
        .and_then(|(_, rows)| rows.iter().find(|row| row.0 == answer_key))
        .map(|&(_, a, b, rationale)| PairScore {
            a,
            b,
            rationale,
            matched: true,
        })
        .unwrap_or(PairScore {
            a: 0.0,
            b: 0.0,
            rationale: NOT_FOUND_RATIONALE,
            matched: false,
        })
}

#[cfg(test)]
pub(crate) fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    TABLE
        .iter()
        .flat_map(|(id, rows)| rows.iter().map(move |row| (*id, row.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_rationale_and_known_magnitude() {
        let allowed = [0.0, 0.5, 1.0, 2.0];
        for (question_id, answer_key) in entries() {
            let scored = score(question_id, answer_key);
            assert!(scored.matched);
            assert!(!scored.rationale.is_empty());
            assert!(allowed.contains(&scored.a), "{question_id}/{answer_key}");
            assert!(allowed.contains(&scored.b), "{question_id}/{answer_key}");
        }
    }

    #[test]
    fn acid_critical_strongly_favors_postgresql() {
        let scored = score("consistency_needs", "acid_critical");
        assert_eq!((scored.a, scored.b), (0.0, 2.0));
    }

    #[test]
    fn unpredictable_schema_strongly_favors_mongodb() {
        let scored = score("schema_evolution", "unpredictable");
        assert_eq!((scored.a, scored.b), (2.0, 0.0));
    }

    #[test]
    fn unknown_pairs_are_neutral() {
        for (question_id, answer_key) in [
            ("schema_evolution", "sometimes"),
            ("migration_complexity", "uncomfortable"),
        ] {
            let scored = score(question_id, answer_key);
            assert_eq!((scored.a, scored.b), (0.0, 0.0));
            assert_eq!(scored.rationale, NOT_FOUND_RATIONALE);
            assert!(!scored.matched);
        }
    }

    #[test]
    fn table_covers_every_two_option_core_answer() {
        let catalog = crate::catalog::QuestionCatalog::two_option();
        for question in catalog.core() {
            for option in &question.options {
                assert!(score(&question.id, &option.key).matched, "{}", option.key);
            }
        }
    }
}
