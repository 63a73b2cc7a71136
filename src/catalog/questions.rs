use std::collections::BTreeMap;

/// Base weight for follow-up questions before the follow-up factor applies.
pub const FOLLOW_UP_WEIGHT: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionOption {
    pub key: String,
    pub text: String,
    pub explanation: String,
    pub examples: Vec<String>,
    pub considerations: Vec<String>,
    pub follow_ups: Vec<String>,
}

impl QuestionOption {
    fn new(key: &str, text: &str) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
            explanation: String::new(),
            examples: Vec::new(),
            considerations: Vec::new(),
            follow_ups: Vec::new(),
        }
    }

    fn explain(mut self, explanation: &str) -> Self {
        self.explanation = explanation.to_string();
        self
    }

    fn examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|item| item.to_string()).collect();
        self
    }

    fn consider(mut self, considerations: &[&str]) -> Self {
        self.considerations = considerations.iter().map(|item| item.to_string()).collect();
        self
    }

    fn follow_ups(mut self, ids: &[&str]) -> Self {
        self.follow_ups = ids.iter().map(|item| item.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub guidance: String,
    pub weight: f64,
    pub options: Vec<QuestionOption>,
}

impl Question {
    fn new(id: &str, text: &str, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            guidance: String::new(),
            weight,
            options: Vec::new(),
        }
    }

    fn guidance(mut self, guidance: &str) -> Self {
        self.guidance = guidance.to_string();
        self
    }

    fn options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn option(&self, key: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guidance {
    pub question_id: String,
    pub decision_weight: String,
    pub examples_by_option: Vec<(String, String)>,
    pub hints: Vec<String>,
}

/// Ordered core questions plus the follow-up pool they unlock.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    core: Vec<Question>,
    follow_ups: Vec<Question>,
}

impl QuestionCatalog {
    pub fn core(&self) -> &[Question] {
        &self.core
    }

    pub fn follow_up_pool(&self) -> &[Question] {
        &self.follow_ups
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.core
            .iter()
            .chain(self.follow_ups.iter())
            .find(|question| question.id == id)
    }

    pub fn is_follow_up(&self, id: &str) -> bool {
        self.follow_ups.iter().any(|question| question.id == id)
    }

    /// Follow-ups unlocked by choosing `option_key` on `question_id`.
    pub fn follow_ups_for(&self, question_id: &str, option_key: &str) -> Vec<&Question> {
        self.get(question_id)
            .and_then(|question| question.option(option_key))
            .map(|option| {
                option
                    .follow_ups
                    .iter()
                    .filter_map(|id| self.follow_ups.iter().find(|q| &q.id == id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn default_weights(&self) -> BTreeMap<String, f64> {
        self.core
            .iter()
            .chain(self.follow_ups.iter())
            .map(|question| (question.id.clone(), question.weight))
            .collect()
    }

    pub fn guidance(
        &self,
        question_id: &str,
        context: &BTreeMap<String, String>,
    ) -> Option<Guidance> {
        let question = self.get(question_id)?;
        let examples_by_option = question
            .options
            .iter()
            .filter_map(|option| {
                option
                    .examples
                    .first()
                    .map(|example| (option.key.clone(), example.clone()))
            })
            .collect();

        let mut hints = Vec::new();
        if question.id == "team_expertise" && context.contains_key("startup_context") {
            hints.push(
                "As a startup, weigh learning curve against time-to-market".to_string(),
            );
        }
        if question.id == "consistency_requirements" && context.contains_key("financial_domain") {
            hints.push(
                "Financial applications typically require strong consistency for compliance"
                    .to_string(),
            );
        }

        Some(Guidance {
            question_id: question.id.clone(),
            decision_weight: format!("{:.0}%", question.weight * 100.0),
            examples_by_option,
            hints,
        })
    }

    /// Questions for the MongoDB/PostgreSQL assessment.
    pub fn two_option() -> Self {
        let core = vec![
            Question::new(
                "schema_evolution",
                "How predictable is your data structure evolution over the next 2 years?",
                0.25,
            )
            .guidance(
                "Schema flexibility determines whether business logic changes can ship without \
                 fighting the data model.",
            )
            .options(vec![
                QuestionOption::new(
                    "highly_predictable",
                    "Highly predictable - We have well-defined data models that rarely change",
                )
                .follow_ups(&["migration_complexity"]),
                QuestionOption::new(
                    "somewhat_predictable",
                    "Somewhat predictable - Some changes expected but within known patterns",
                ),
                QuestionOption::new(
                    "unpredictable",
                    "Unpredictable - Frequent schema changes driven by evolving business needs",
                )
                .follow_ups(&["schema_governance"]),
                QuestionOption::new(
                    "completely_unknown",
                    "Completely unknown - This is a greenfield project with undefined requirements",
                )
                .follow_ups(&["schema_governance"]),
            ]),
            Question::new(
                "query_patterns",
                "What are your primary data access patterns and query requirements?",
                0.25,
            )
            .guidance("Query shape drives which engine features matter day to day.")
            .options(vec![
                QuestionOption::new(
                    "simple_crud",
                    "Simple CRUD operations - Basic create, read, update, delete",
                ),
                QuestionOption::new(
                    "complex_joins",
                    "Complex joins and relational queries across multiple entities",
                )
                .follow_ups(&["join_complexity"]),
                QuestionOption::new(
                    "analytical_reporting",
                    "Analytical reporting with aggregations, grouping, and statistical functions",
                ),
                QuestionOption::new(
                    "document_retrieval",
                    "Document-based retrieval with flexible search across nested structures",
                ),
                QuestionOption::new(
                    "hierarchical_nested",
                    "Hierarchical or deeply nested data structures",
                ),
                QuestionOption::new("mixed_patterns", "Mixed patterns - combination of the above"),
            ]),
            Question::new(
                "team_expertise",
                "What is your team's current database and development expertise?",
                0.20,
            )
            .guidance(
                "Team expertise affects adoption speed, maintenance burden, and long-term success.",
            )
            .options(vec![
                QuestionOption::new("sql_heavy", "Strong SQL and relational database experience")
                    .follow_ups(&["postgresql_specific_experience"]),
                QuestionOption::new("nosql_heavy", "Strong NoSQL and document database experience")
                    .follow_ups(&["mongodb_specific_experience"]),
                QuestionOption::new(
                    "javascript_heavy",
                    "JavaScript/Node.js heavy with JSON-first thinking",
                )
                .follow_ups(&["mongodb_specific_experience"]),
                QuestionOption::new(
                    "mixed_skills",
                    "Mixed skills across different database technologies",
                ),
                QuestionOption::new(
                    "learning_motivated",
                    "Limited database expertise but motivated to learn",
                ),
            ]),
            Question::new(
                "consistency_needs",
                "How critical are ACID transactions and strong consistency for your use case?",
                0.15,
            )
            .guidance(
                "Understanding the true consistency needs avoids over-engineering while keeping \
                 integrity where it matters.",
            )
            .options(vec![
                QuestionOption::new(
                    "acid_critical",
                    "Critical - Financial transactions, audit trails, or regulatory compliance",
                ),
                QuestionOption::new(
                    "mostly_consistent",
                    "Important - User data integrity matters but some flexibility acceptable",
                ),
                QuestionOption::new(
                    "eventually_consistent",
                    "Eventually consistent - Can handle temporary inconsistencies",
                ),
                QuestionOption::new(
                    "flexible",
                    "Flexible - Performance and availability more important than strict \
                     consistency",
                ),
            ]),
            Question::new(
                "performance_profile",
                "What is your expected performance and scaling profile?",
                0.15,
            )
            .guidance("Different databases excel in different performance scenarios.")
            .options(vec![
                QuestionOption::new(
                    "read_heavy_analytics",
                    "Read-heavy with analytical workloads and complex queries",
                ),
                QuestionOption::new(
                    "write_heavy_scaling",
                    "Write-heavy with high-volume data ingestion and horizontal scaling needs",
                ),
                QuestionOption::new(
                    "balanced_load",
                    "Balanced read/write load with moderate scaling requirements",
                ),
                QuestionOption::new(
                    "low_latency_critical",
                    "Low latency critical for user experience",
                ),
                QuestionOption::new(
                    "high_concurrency",
                    "High concurrency with many simultaneous connections",
                ),
            ]),
        ];

        let follow_ups = vec![
            migration_complexity(),
            schema_governance(),
            join_complexity(),
            Question::new(
                "postgresql_specific_experience",
                "Does your team have specific PostgreSQL experience?",
                FOLLOW_UP_WEIGHT,
            )
            .options(vec![
                QuestionOption::new("extensive", "Extensive PostgreSQL experience"),
                QuestionOption::new("some", "Some PostgreSQL experience"),
                QuestionOption::new("none", "No PostgreSQL-specific experience"),
            ]),
            Question::new(
                "mongodb_specific_experience",
                "Does your team have specific MongoDB operational experience?",
                FOLLOW_UP_WEIGHT,
            )
            .options(vec![
                QuestionOption::new("extensive", "Extensive MongoDB operations experience"),
                QuestionOption::new("some", "Some MongoDB development experience"),
                QuestionOption::new("none", "No MongoDB-specific experience"),
            ]),
        ];

        Self { core, follow_ups }
    }

    /// Database-agnostic questions with guidance for N-way comparisons.
    pub fn guided() -> Self {
        let core = vec![
            Question::new(
                "schema_evolution",
                "How predictable is your data structure evolution over the next 2 years?",
                0.25,
            )
            .guidance(
                "Think about your product roadmap, team dynamics, and requirement stability. \
                 Consider both technical and business factors that drive schema changes.",
            )
            .options(vec![
                QuestionOption::new(
                    "highly_predictable",
                    "Highly predictable - Well-defined models that rarely change",
                )
                .explain("Your data structure is stable with clear, established patterns")
                .examples(&[
                    "Financial trading system with regulatory constraints",
                    "User management system with fixed user profiles",
                ])
                .consider(&["Are you certain requirements won't evolve?"])
                .follow_ups(&["migration_complexity"]),
                QuestionOption::new(
                    "somewhat_predictable",
                    "Somewhat predictable - Some changes expected within known patterns",
                )
                .explain("You expect evolution but within understood boundaries")
                .examples(&["E-commerce platform adding seasonal features"])
                .consider(&["What types of changes do you anticipate?"]),
                QuestionOption::new(
                    "unpredictable",
                    "Unpredictable - Frequent changes driven by business needs",
                )
                .explain("Your schema needs to adapt quickly to changing business requirements")
                .examples(&[
                    "Social media platform with frequent feature updates",
                    "IoT system collecting varied sensor data",
                ])
                .consider(&["Is rapid iteration more important than data consistency?"])
                .follow_ups(&["schema_governance"]),
                QuestionOption::new(
                    "completely_unknown",
                    "Completely unknown - Greenfield project with undefined requirements",
                )
                .explain("You're exploring the problem space with minimal constraints")
                .examples(&["AI research platform with experimental data models"])
                .consider(&["Do you need maximum flexibility over performance?"])
                .follow_ups(&["schema_governance"]),
            ]),
            Question::new(
                "query_patterns",
                "What are your primary data access patterns and query requirements?",
                0.25,
            )
            .guidance(
                "Consider your application's core functionality and how users interact with data. \
                 Think about both current needs and likely future requirements.",
            )
            .options(vec![
                QuestionOption::new(
                    "simple_crud",
                    "Simple CRUD operations - Basic create, read, update, delete",
                )
                .explain("Your application primarily performs straightforward data operations")
                .examples(&["User profile management"])
                .consider(&["Will you need complex reporting later?"]),
                QuestionOption::new(
                    "complex_joins",
                    "Complex joins and relational queries across multiple entities",
                )
                .explain("You need sophisticated queries spanning multiple related data entities")
                .examples(&["ERP system linking orders, customers, and inventory"])
                .follow_ups(&["join_complexity"]),
                QuestionOption::new(
                    "analytical_reporting",
                    "Analytical reporting with aggregations and statistical functions",
                )
                .explain("You need to perform complex analysis and generate insights from data")
                .examples(&["Business intelligence dashboards"])
                .follow_ups(&["join_complexity"]),
                QuestionOption::new(
                    "document_based",
                    "Document-based retrieval with flexible search across nested structures",
                )
                .explain(
                    "Your data is naturally hierarchical or you need flexible search capabilities",
                )
                .examples(&["Content management system with rich articles"]),
                QuestionOption::new(
                    "hierarchical_data",
                    "Hierarchical or deeply nested data structures",
                )
                .explain("Your data naturally forms tree-like or complex nested structures")
                .examples(&["Product catalogs with nested variants"]),
                QuestionOption::new("mixed_patterns", "Mixed patterns - combination of the above")
                    .explain("Your application requires multiple different query patterns")
                    .examples(&["SaaS platform with transactional and reporting features"]),
            ]),
            Question::new(
                "team_expertise",
                "What is your team's current database and development expertise?",
                0.20,
            )
            .guidance(
                "Consider not just current skills but learning capacity, time constraints, and who \
                 will maintain the system long-term.",
            )
            .options(vec![
                QuestionOption::new("strong_sql", "Strong SQL and relational database experience")
                    .explain(
                        "Your team is highly proficient with SQL databases and relational concepts",
                    )
                    .follow_ups(&["vendor_experience"]),
                QuestionOption::new("strong_nosql", "Strong NoSQL and document database experience")
                    .explain(
                        "Your team has significant experience with document databases and NoSQL \
                         concepts",
                    )
                    .follow_ups(&["vendor_experience"]),
                QuestionOption::new(
                    "javascript_json",
                    "JavaScript/Node.js heavy with JSON-first thinking",
                )
                .explain(
                    "Your team primarily works in JavaScript and thinks in JSON data structures",
                ),
                QuestionOption::new(
                    "mixed_skills",
                    "Mixed skills across different database technologies",
                )
                .explain("Your team has varied experience with different database approaches"),
                QuestionOption::new(
                    "limited_experience",
                    "Limited database expertise but motivated to learn",
                )
                .explain("Your team is newer to databases but eager to adopt best practices"),
            ]),
            Question::new(
                "consistency_requirements",
                "How critical are ACID transactions and strong consistency for your use case?",
                0.15,
            )
            .guidance(
                "Think about the business consequences of inconsistent data vs. system \
                 availability. Consider regulatory requirements and user expectations.",
            )
            .options(vec![
                QuestionOption::new(
                    "critical_acid",
                    "Critical - Financial transactions, audit trails, or regulatory compliance",
                )
                .explain(
                    "Data consistency is absolutely critical with zero tolerance for inconsistency",
                )
                .examples(&["Payment processing ledger"])
                .follow_ups(&["transaction_complexity"]),
                QuestionOption::new(
                    "important_flexible",
                    "Important - Data integrity matters but some flexibility acceptable",
                )
                .explain(
                    "You need reliable data but can handle brief inconsistencies during updates",
                )
                .follow_ups(&["transaction_complexity"]),
                QuestionOption::new(
                    "eventually_consistent",
                    "Eventually consistent - Can handle temporary inconsistencies",
                )
                .explain(
                    "You can tolerate short-term inconsistencies if they resolve automatically",
                ),
                QuestionOption::new(
                    "performance_priority",
                    "Performance priority - Availability and speed over strict consistency",
                )
                .explain(
                    "System performance and availability are more critical than perfect \
                     consistency",
                ),
            ]),
            Question::new(
                "performance_scaling",
                "What is your expected performance and scaling profile?",
                0.15,
            )
            .guidance(
                "Consider your current traffic, growth projections, and user expectations. Think \
                 about peak loads, geographic distribution, and budget constraints.",
            )
            .options(vec![
                QuestionOption::new(
                    "read_heavy",
                    "Read-heavy with analytical workloads and complex queries",
                )
                .explain("Your system primarily serves data to users and analytics tools"),
                QuestionOption::new(
                    "write_heavy",
                    "Write-heavy with high-volume data ingestion and scaling needs",
                )
                .explain(
                    "Your system continuously ingests large volumes of data from various sources",
                ),
                QuestionOption::new(
                    "balanced_load",
                    "Balanced read/write load with moderate scaling requirements",
                )
                .explain(
                    "Your system has roughly equal read and write operations with predictable \
                     growth",
                ),
                QuestionOption::new("low_latency", "Low latency critical for user experience")
                    .explain("Response time is crucial for user satisfaction and business success"),
                QuestionOption::new(
                    "high_concurrency",
                    "High concurrency with many simultaneous connections",
                )
                .explain(
                    "Your system needs to handle large numbers of concurrent users efficiently",
                ),
            ]),
        ];

        let follow_ups = vec![
            migration_complexity(),
            schema_governance(),
            join_complexity(),
            Question::new(
                "vendor_experience",
                "Does your team have hands-on experience with the specific databases being \
                 compared?",
                FOLLOW_UP_WEIGHT,
            )
            .options(vec![
                QuestionOption::new("extensive", "Extensive production experience"),
                QuestionOption::new("some", "Some development experience"),
                QuestionOption::new("none", "No vendor-specific experience"),
            ]),
            Question::new(
                "transaction_complexity",
                "How complex are the transactions your system must keep consistent?",
                FOLLOW_UP_WEIGHT,
            )
            .options(vec![
                QuestionOption::new("single_record", "Single-record updates"),
                QuestionOption::new("multi_record", "Multi-record updates within one service"),
                QuestionOption::new("distributed", "Updates spanning several services or regions"),
            ]),
        ];

        Self { core, follow_ups }
    }
}

fn migration_complexity() -> Question {
    Question::new(
        "migration_complexity",
        "How comfortable is your team with database schema migrations?",
        FOLLOW_UP_WEIGHT,
    )
    .options(vec![
        QuestionOption::new(
            "very_comfortable",
            "Very comfortable with migration tools and processes",
        ),
        QuestionOption::new("somewhat_comfortable", "Some experience, willing to learn"),
        QuestionOption::new("uncomfortable", "Prefer to avoid complex migration processes"),
    ])
}

fn schema_governance() -> Question {
    Question::new(
        "schema_governance",
        "How will you govern schema changes in a flexible document model?",
        FOLLOW_UP_WEIGHT,
    )
    .options(vec![
        QuestionOption::new("strict_validation", "Strict validation rules and schema enforcement"),
        QuestionOption::new("gradual_evolution", "Gradual evolution with backward compatibility"),
        QuestionOption::new("minimal_governance", "Minimal governance, trust application logic"),
    ])
}

fn join_complexity() -> Question {
    Question::new(
        "join_complexity",
        "How complex are your typical join operations?",
        FOLLOW_UP_WEIGHT,
    )
    .options(vec![
        QuestionOption::new("simple_joins", "2-3 table joins, straightforward relationships"),
        QuestionOption::new("moderate_joins", "4-6 table joins with some complexity"),
        QuestionOption::new("complex_joins", "7+ table joins with complex business logic"),
    ])
}
