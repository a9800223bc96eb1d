use crate::domain::model::{
    AssessmentSummary, ClassificationResult, ItemResult, MasteryEntry, ProcessSummary,
    ProcessSummaryEntry, Resolution,
};
use std::collections::HashSet;

/// Folds classified items into the summary lists, keeping input order.
pub fn summarize(results: &[ClassificationResult]) -> AssessmentSummary {
    let mut summary = AssessmentSummary::default();

    for result in results {
        let entry = || MasteryEntry {
            sound: result.sound.clone(),
            position: result.position,
            mastery_age_months: result.mastery_age_months,
        };
        match result.result {
            ItemResult::Delayed => summary.delayed.push(entry()),
            ItemResult::IncorrectButAgeAppropriate => {
                summary.age_appropriate_incorrect.push(entry())
            }
            ItemResult::AgeAppropriate => {}
        }
    }

    summary.processes = summarize_processes(results);
    summary
}

/// Splits findings into atypical and typical processes. The same
/// substitution seen in several positions is listed once.
pub fn summarize_processes(results: &[ClassificationResult]) -> ProcessSummary {
    let mut summary = ProcessSummary::default();
    let mut seen = HashSet::new();

    for finding in results.iter().filter_map(|r| r.finding.as_ref()) {
        if !seen.insert((finding.process, finding.target.as_str(), finding.produced.as_str())) {
            continue;
        }

        let resolution = finding.process.resolution();
        let entry = ProcessSummaryEntry {
            process: finding.process,
            target: finding.target.clone(),
            produced: finding.produced.clone(),
            resolution,
        };
        match resolution {
            Resolution::Atypical => summary.atypical.push(entry),
            Resolution::Months(_) => summary.typical.push(entry),
        }
    }

    summary
}
