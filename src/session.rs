use crate::catalog::candidates::CandidateRegistry;
use crate::engine::resolve::ResolutionPolicy;
use crate::engine::{pair, ComparisonEngine, Mode};
use crate::error::{Result, SelectorError};
use crate::types::response::Response;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::info;

pub const SESSION_VERSION: u32 = 1;

/// Everything needed to rebuild an engine and reproduce its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub saved_at: String,
    pub mode: Mode,
    pub candidates: Vec<String>,
    pub weights: BTreeMap<String, f64>,
    pub resolution: ResolutionPolicy,
    pub responses: Vec<Response>,
    pub context: BTreeMap<String, String>,
}

impl Session {
    pub fn capture(engine: &ComparisonEngine) -> Self {
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            mode: engine.mode(),
            candidates: engine
                .candidates()
                .iter()
                .map(|candidate| candidate.id.clone())
                .collect(),
            weights: engine.weights().clone(),
            resolution: engine.policy(),
            responses: engine.responses().to_vec(),
            context: engine.context().clone(),
        }
    }

    pub fn restore(self, registry: &CandidateRegistry) -> Result<ComparisonEngine> {
        self.validate()?;
        let candidates = registry.resolve(&self.candidates).map_err(|err| {
            SelectorError::SessionInvalid(format!("candidate set cannot be rebuilt: {err}"))
        })?;

        Ok(ComparisonEngine::from_parts(self.mode, candidates)
            .with_weights(&self.weights)
            .with_policy(self.resolution)
            .with_history(self.responses, self.context))
    }

    fn validate(&self) -> Result<()> {
        if self.version != SESSION_VERSION {
            return Err(SelectorError::SessionInvalid(format!(
                "unsupported session version {} (expected {SESSION_VERSION})",
                self.version
            )));
        }
        if self.mode == Mode::TwoOption
            && self.candidates != [pair::CANDIDATE_A, pair::CANDIDATE_B]
        {
            return Err(SelectorError::SessionInvalid(format!(
                "two-option sessions must compare {} and {}",
                pair::CANDIDATE_A,
                pair::CANDIDATE_B
            )));
        }

        let expected = self
            .candidates
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>();
        for (index, response) in self.responses.iter().enumerate() {
            if !response.weight.is_finite() || response.weight < 0.0 {
                return Err(SelectorError::SessionInvalid(format!(
                    "response {index} ({}) has invalid weight {}",
                    response.question_id, response.weight
                )));
            }
            let scored = response
                .scores
                .keys()
                .map(String::as_str)
                .collect::<BTreeSet<_>>();
            if scored != expected {
                return Err(SelectorError::SessionInvalid(format!(
                    "response {index} ({}) does not score exactly the session candidates",
                    response.question_id
                )));
            }
        }
        Ok(())
    }
}

pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, json)?;
    info!(path = %path.display(), responses = session.responses.len(), "saved session");
    Ok(())
}

pub fn load(path: &Path) -> Result<Session> {
    if !path.exists() {
        return Err(SelectorError::SessionNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let session: Session =
        serde_json::from_str(&content).map_err(|e| SelectorError::SessionParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    info!(path = %path.display(), responses = session.responses.len(), "loaded session");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn answered_comparison() -> ComparisonEngine {
        let mut engine = ComparisonEngine::comparison(
            &CandidateRegistry::builtin(),
            &["postgresql", "mongodb", "redis"],
        )
        .expect("builtin ids should resolve");
        engine.add_response("schema_evolution", "Schema?", "unpredictable", "Unpredictable");
        engine.add_response("team_expertise", "Team?", "javascript_json", "JS");
        engine.add_follow_up("schema_governance", "Governance?", "gradual_evolution", "Gradual");
        engine.add_context("migration_source", "sharepoint");
        engine
    }

    #[test]
    fn reloaded_session_reproduces_the_result() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("sessions/run.json");
        let engine = answered_comparison();
        let live = engine.calculate();

        save(&path, &Session::capture(&engine)).expect("session should save");
        let restored = load(&path)
            .expect("session should load")
            .restore(&CandidateRegistry::builtin())
            .expect("session should restore");

        assert_eq!(restored.calculate(), live);
        assert_eq!(restored.weights(), engine.weights());
    }

    #[test]
    fn two_option_session_round_trips_weighted_scores() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("pair.json");
        let mut engine =
            ComparisonEngine::two_option(&CandidateRegistry::builtin()).expect("pair resolves");
        engine.add_response("query_patterns", "Queries?", "complex_joins", "Joins");
        engine.add_response("team_expertise", "Team?", "mixed_skills", "Mixed");

        save(&path, &Session::capture(&engine)).expect("session should save");
        let restored = load(&path)
            .expect("session should load")
            .restore(&CandidateRegistry::builtin())
            .expect("session should restore");
        assert_eq!(restored.calculate(), engine.calculate());
        assert_eq!(restored.mode(), Mode::TwoOption);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load(&dir.path().join("absent.json")).expect_err("file is absent");
        assert!(matches!(err, SelectorError::SessionNotFound(_)));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("fixture should write");
        let err = load(&path).expect_err("content is malformed");
        assert!(matches!(err, SelectorError::SessionParse { .. }));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("partial.json");
        let mut value =
            serde_json::to_value(Session::capture(&answered_comparison())).expect("serializes");
        value
            .as_object_mut()
            .expect("session is an object")
            .remove("weights");
        fs::write(&path, value.to_string()).expect("fixture should write");

        let err = load(&path).expect_err("weights are required");
        assert!(err.to_string().contains("weights"));
    }

    #[test]
    fn unknown_candidate_fails_restore() {
        let mut session = Session::capture(&answered_comparison());
        session.candidates[2] = "couchdb".to_string();
        let err = session
            .restore(&CandidateRegistry::builtin())
            .expect_err("couchdb is not registered");
        assert!(matches!(err, SelectorError::SessionInvalid(_)));
    }

    #[test]
    fn responses_must_cover_the_candidate_set() {
        let mut session = Session::capture(&answered_comparison());
        session.responses[0].scores.remove("redis");
        let err = session
            .restore(&CandidateRegistry::builtin())
            .expect_err("scores no longer match candidates");
        assert!(err.to_string().contains("schema_evolution"));
    }
}
