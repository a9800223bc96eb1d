pub mod age;
pub mod aggregator;
pub mod classifier;
pub mod detector;
pub mod goals;
pub mod tables;

use crate::domain::model::{AssessmentItem, AssessmentReport, Child, ClassificationResult};
use crate::utils::error::{Result, ScoringError};
use tables::ReferenceTables;

/// Runs the whole scoring chain for one child over one sheet.
#[derive(Debug, Clone, Default)]
pub struct AssessmentScorer {
    tables: ReferenceTables,
}

impl AssessmentScorer {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Fails with `MissingConfigError` when the child has no name.
    pub fn score(&self, child: &Child, items: &[AssessmentItem]) -> Result<AssessmentReport> {
        if child.name.trim().is_empty() {
            return Err(ScoringError::MissingConfigError {
                field: "child_name".to_string(),
            });
        }

        let results = items
            .iter()
            .map(|item| classifier::classify(&self.tables, item, child.age_months))
            .collect::<Result<Vec<ClassificationResult>>>()?;

        let findings = results.iter().filter_map(|r| r.finding.clone()).collect();
        let summary = aggregator::summarize(&results);
        let goals = goals::make_goals(&child.name, &summary.delayed);

        Ok(AssessmentReport {
            child: child.clone(),
            generated_at: chrono::Utc::now(),
            results,
            findings,
            summary,
            goals,
        })
    }
}
