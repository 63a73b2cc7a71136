mod catalog;
mod cli;
mod config;
mod engine;
mod error;
mod report;
mod session;
mod telemetry;
mod types;

use crate::catalog::candidates::{CandidateRegistry, Category};
use crate::catalog::questions::QuestionCatalog;
use crate::engine::{ComparisonEngine, Mode};
use crate::error::SelectorError;
use crate::types::config::SelectorConfig;
use clap::Parser;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, SelectorError> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet)?;

    let cfg = config::load_config(&cli.config_dir)?.unwrap_or_default();
    let registry = CandidateRegistry::with_custom(&cfg.candidates)?;

    match cli.command {
        cli::Commands::Questions(cmd) => {
            let catalog = if cmd.guided {
                QuestionCatalog::guided()
            } else {
                QuestionCatalog::two_option()
            };
            let context = parse_context(&cmd.context)?;
            print_catalog(&catalog, &cfg, &context);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Candidates(cmd) => {
            if cmd.pairs {
                for [first, second] in registry.comparison_pairs() {
                    println!("- {first} vs {second}");
                }
                return Ok(exit_code::SUCCESS);
            }

            let candidates = match cmd.category {
                Some(category) => registry.by_category(category_from_arg(category)),
                None => registry.all().iter().collect(),
            };
            if candidates.is_empty() {
                println!("candidates: none");
            }
            for candidate in candidates {
                println!("{} ({}) [{}]", candidate.name, candidate.id, candidate.category);
                if !candidate.description.is_empty() {
                    println!("  {}", candidate.description);
                }
                if !candidate.ideal_for.is_empty() {
                    println!("  ideal for: {}", candidate.ideal_for.join(", "));
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Assess(cmd) => {
            let engine = configure(
                ComparisonEngine::two_option(&registry)?,
                Mode::TwoOption,
                &cfg,
            );
            assess(engine, &cmd.answers, &cfg)
        }
        cli::Commands::Compare(cmd) => {
            let ids = if cmd.dbs.is_empty() {
                cfg.default_candidates()
            } else {
                cmd.dbs
            };
            let engine = configure(
                ComparisonEngine::comparison(&registry, &ids)?,
                Mode::Comparison,
                &cfg,
            );
            assess(engine, &cmd.answers, &cfg)
        }
        cli::Commands::Replay(cmd) => {
            let engine = session::load(&cmd.path)?.restore(&registry)?;
            let project = cmd.project.as_deref().unwrap_or(cfg.project_name());
            emit(&engine, project, cmd.format)
        }
    }
}

fn configure(engine: ComparisonEngine, mode: Mode, cfg: &SelectorConfig) -> ComparisonEngine {
    engine
        .with_weights(&cfg.weights)
        .with_policy(cfg.resolution_policy(mode))
        .with_follow_up_factor(cfg.follow_up_factor())
}

fn assess(
    mut engine: ComparisonEngine,
    args: &cli::AnswerArgs,
    cfg: &SelectorConfig,
) -> Result<i32, SelectorError> {
    let catalog = engine.mode().catalog();
    let answers = args
        .answers
        .iter()
        .map(|raw| split_pair(raw).ok_or_else(|| SelectorError::InvalidAnswer(raw.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    let follow_ups = args
        .follow_ups
        .iter()
        .map(|raw| split_pair(raw).ok_or_else(|| SelectorError::InvalidAnswer(raw.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    for (key, value) in parse_context(&args.context)? {
        engine.add_context(&key, &value);
    }

    let mut unlocked = BTreeSet::new();
    for (question_id, option_key) in answers {
        let (question_text, answer_text) = describe(&catalog, question_id, option_key);
        if catalog.is_follow_up(question_id) {
            warn!(question_id, "follow-up answered as a core question; use --follow-up");
        }
        unlocked.extend(
            catalog
                .follow_ups_for(question_id, option_key)
                .into_iter()
                .map(|question| question.id.clone()),
        );
        engine.add_response(question_id, &question_text, option_key, &answer_text);
    }

    let mut accepted = 0;
    for (question_id, option_key) in follow_ups {
        if !unlocked.contains(question_id) {
            warn!(question_id, "follow-up not unlocked by any answer; skipped");
            continue;
        }
        if accepted >= cfg.max_follow_ups() {
            warn!(
                question_id,
                limit = cfg.max_follow_ups(),
                "follow-up limit reached; skipped"
            );
            continue;
        }
        let (question_text, answer_text) = describe(&catalog, question_id, option_key);
        engine.add_follow_up(question_id, &question_text, option_key, &answer_text);
        accepted += 1;
    }

    info!(
        responses = engine.responses().len(),
        phase = ?engine.phase(),
        "assessment complete"
    );
    if let Some(path) = &args.save {
        session::save(path, &session::Session::capture(&engine))?;
    }
    let project = args.project.as_deref().unwrap_or(cfg.project_name());
    emit(&engine, project, args.format)
}

fn emit(
    engine: &ComparisonEngine,
    project: &str,
    format: cli::ReportFormat,
) -> Result<i32, SelectorError> {
    let comparison = engine.calculate();
    let output_format = match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    };
    let rendered = report::render(&comparison, engine.candidates(), project, output_format)?;
    println!("{rendered}");

    if comparison.recommendation.is_some() {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::WARNINGS)
    }
}

/// Question and answer text for display, falling back to the raw keys.
fn describe(catalog: &QuestionCatalog, question_id: &str, option_key: &str) -> (String, String) {
    let Some(question) = catalog.get(question_id) else {
        warn!(question_id, "question is not in the catalog");
        return (question_id.to_string(), option_key.to_string());
    };
    let answer_text = match question.option(option_key) {
        Some(option) => option.text.clone(),
        None => {
            warn!(question_id, option_key, "option is not offered by this question");
            option_key.to_string()
        }
    };
    (question.text.clone(), answer_text)
}

fn split_pair(raw: &str) -> Option<(&str, &str)> {
    let (key, value) = raw.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn parse_context(raw: &[String]) -> Result<BTreeMap<String, String>, SelectorError> {
    raw.iter()
        .map(|entry| {
            split_pair(entry)
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| SelectorError::InvalidContext(entry.clone()))
        })
        .collect()
}

fn category_from_arg(category: cli::CategoryArg) -> Category {
    match category {
        cli::CategoryArg::Relational => Category::Relational,
        cli::CategoryArg::Document => Category::Document,
        cli::CategoryArg::KeyValue => Category::KeyValue,
        cli::CategoryArg::Graph => Category::Graph,
        cli::CategoryArg::Columnar => Category::Columnar,
        cli::CategoryArg::MultiModel => Category::MultiModel,
    }
}

fn print_catalog(
    catalog: &QuestionCatalog,
    cfg: &SelectorConfig,
    context: &BTreeMap<String, String>,
) {
    for (index, question) in catalog.core().iter().enumerate() {
        let Some(guidance) = catalog.guidance(&question.id, context) else {
            continue;
        };
        let weight = match cfg.weights.get(&guidance.question_id) {
            Some(weight) => format!("{:.0}%", weight * 100.0),
            None => guidance.decision_weight.clone(),
        };
        println!(
            "{}. {} [{}] (weight {})",
            index + 1,
            question.text,
            guidance.question_id,
            weight
        );
        if !question.guidance.is_empty() {
            println!("   {}", question.guidance);
        }
        for option in &question.options {
            println!("   - {}: {}", option.key, option.text);
            if let Some((_, example)) = guidance
                .examples_by_option
                .iter()
                .find(|(key, _)| key == &option.key)
            {
                println!("     e.g. {example}");
            }
            if !option.follow_ups.is_empty() {
                println!("     unlocks: {}", option.follow_ups.join(", "));
            }
        }
        for hint in &guidance.hints {
            println!("   hint: {hint}");
        }
    }

    println!();
    println!("Follow-up questions:");
    for question in catalog.follow_up_pool() {
        println!("- {} [{}]", question.text, question.id);
        for option in &question.options {
            println!("   - {}: {}", option.key, option.text);
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
