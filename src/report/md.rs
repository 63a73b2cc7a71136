use crate::catalog::candidates::Candidate;
use crate::engine::resolve::Confidence;
use crate::types::decision::Comparison;
use chrono::NaiveDate;

fn status(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "Accepted",
        Confidence::Moderate => "Proposed",
        Confidence::Low => "Under Review",
    }
}

/// Renders the result as an architecture decision record.
///
/// `profiles` supplies strengths and considerations for the scored candidates.
pub fn to_markdown(
    comparison: &Comparison,
    profiles: &[Candidate],
    project: &str,
    date: NaiveDate,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# ADR: Database Selection - {} for {}\n\n",
        comparison.recommendation_label(),
        project
    ));

    output.push_str("## Status\n\n");
    output.push_str(&format!(
        "**{}** - {}\n\nConfidence Level: **{}**\n\n",
        status(comparison.confidence),
        date.format("%Y-%m-%d"),
        comparison.confidence.label()
    ));
    if let Some(gap) = comparison.gap {
        output.push_str(&format!(
            "Score gap: {:.2} ({} policy, thresholds {} / {})\n\n",
            gap,
            comparison.policy.gap.as_str(),
            comparison.policy.thresholds.low,
            comparison.policy.thresholds.high
        ));
    }

    output.push_str("## Decision\n\n");
    match comparison.recommended() {
        Some(winner) => output.push_str(&format!(
            "**We will use {} as the primary database for {}.**\n\n",
            winner.name, project
        )),
        None => output.push_str(
            "**No candidate is clearly ahead; the decision needs further evaluation.**\n\n",
        ),
    }
    output.push_str("| Candidate | Score | Share |\n|---|---:|---:|\n");
    for candidate in &comparison.candidates {
        output.push_str(&format!(
            "| {} | {:.2} | {:.1}% |\n",
            candidate.name, candidate.total, candidate.percentage
        ));
    }
    output.push('\n');
    output.push_str(&format!("{}\n\n", comparison.summary));

    output.push_str("## Rationale\n\n");
    if comparison.responses.is_empty() {
        output.push_str("- no responses recorded\n\n");
    } else {
        let mut responses = comparison.responses.iter().collect::<Vec<_>>();
        responses.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        for response in responses {
            output.push_str(&format!(
                "### {}{} (Weight: {:.1}%)\n\n",
                response.question_text,
                if response.follow_up { " [follow-up]" } else { "" },
                response.weight * 100.0
            ));
            output.push_str(&format!("- **Response**: {}\n", response.answer_text));
            for candidate in &comparison.candidates {
                output.push_str(&format!(
                    "- **{} Impact**: {:.3}\n",
                    candidate.name,
                    response.contribution(&candidate.id)
                ));
            }
            output.push_str(&format!("- **Rationale**: {}\n\n", response.rationale));
        }
    }

    push_consequences(&mut output, comparison, profiles);
    push_implementation_notes(&mut output, comparison);

    output.push_str("## Context\n\n");
    if comparison.context.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for (key, value) in &comparison.context {
            output.push_str(&format!("- **{key}**: {value}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Alternatives Considered\n\n");
    let mut alternatives = comparison.alternatives().peekable();
    if alternatives.peek().is_none() {
        output.push_str("- none\n");
    }
    for alternative in alternatives {
        output.push_str(&format!(
            "- {}: {:.2} ({:.1}%)\n",
            alternative.name, alternative.total, alternative.percentage
        ));
    }

    output
}

fn profile<'a>(profiles: &'a [Candidate], id: &str) -> Option<&'a Candidate> {
    profiles.iter().find(|candidate| candidate.id == id)
}

fn push_list(output: &mut String, items: &[String]) {
    if items.is_empty() {
        output.push_str("- none recorded\n");
    }
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}

fn push_consequences(output: &mut String, comparison: &Comparison, profiles: &[Candidate]) {
    output.push_str("## Consequences\n\n");
    match comparison
        .recommended()
        .and_then(|winner| profile(profiles, &winner.id))
    {
        Some(winner) => {
            output.push_str("### Positive Consequences\n\n");
            push_list(output, &winner.strengths);
            output.push_str("### Negative Consequences to Mitigate\n\n");
            push_list(output, &winner.considerations);
        }
        None => {
            output.push_str(
                "Scores are close, so the consequences depend on the choice made after \
                 further analysis.\n\n",
            );
            for score in &comparison.candidates {
                let Some(candidate) = profile(profiles, &score.id) else {
                    continue;
                };
                output.push_str(&format!("### If {} is chosen\n\n", candidate.name));
                push_list(output, &candidate.strengths);
                if !candidate.considerations.is_empty() {
                    output.push_str("Watch for:\n\n");
                    push_list(output, &candidate.considerations);
                }
            }
        }
    }
}

fn push_implementation_notes(output: &mut String, comparison: &Comparison) {
    output.push_str("## Implementation Notes\n\n### Immediate Next Steps\n\n");
    match comparison.recommended() {
        Some(winner) => {
            let name = &winner.name;
            output.push_str(&format!(
                "1. **Technology Spike**: build a proof of concept with {name} using the core \
                 data models\n"
            ));
            output.push_str(&format!(
                "2. **Team Onboarding**: plan training for {name}-specific patterns\n"
            ));
            output.push_str(
                "3. **Infrastructure Planning**: define hosting, backup and monitoring\n",
            );
            output.push_str(
                "4. **Development Standards**: agree on schema and query conventions\n\n",
            );
        }
        None => {
            let names = comparison
                .candidates
                .iter()
                .map(|candidate| candidate.name.as_str())
                .collect::<Vec<_>>()
                .join(" and ");
            output.push_str(&format!(
                "1. **Parallel Technical Spikes**: build proofs of concept with {names}\n"
            ));
            output.push_str(
                "2. **Team Evaluation**: have the team work hands-on with each option\n",
            );
            output.push_str(
                "3. **Performance Testing**: compare the candidates on the most demanding \
                 workload\n",
            );
            output.push_str(
                "4. **Final Decision Meeting**: revisit this record with the findings\n\n",
            );
        }
    }
}
