pub mod json;
pub mod md;

use crate::catalog::candidates::Candidate;
use crate::error::SelectorError;
use crate::types::decision::Comparison;
use chrono::Utc;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    comparison: &Comparison,
    profiles: &[Candidate],
    project: &str,
    format: OutputFormat,
) -> Result<String, SelectorError> {
    let generated_at = Utc::now();
    match format {
        OutputFormat::Json => {
            json::to_json(comparison, project, generated_at).map_err(SelectorError::Json)
        }
        OutputFormat::Md => Ok(md::to_markdown(
            comparison,
            profiles,
            project,
            generated_at.date_naive(),
        )),
    }
}
