//! Plain-text and CSV renderings of an [`AssessmentReport`].

use crate::domain::model::{
    AssessmentItem, AssessmentReport, ClassificationResult, MasteryEntry, ProcessFinding,
    ProcessSummaryEntry, Resolution,
};
use crate::domain::services::age::format_age;
use crate::utils::error::{Result, ScoringError};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct ResultRow<'a> {
    sound: &'a str,
    position: &'a str,
    produced: &'a str,
    result: &'a str,
    process: Option<&'a str>,
    process_status: Option<&'a str>,
}

#[derive(Serialize)]
struct ProcessRow<'a> {
    process: &'a str,
    target: &'a str,
    produced: &'a str,
    status: &'a str,
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| ScoringError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ScoringError::ValidationError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn render_results_csv(results: &[ClassificationResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer.serialize(ResultRow {
            sound: &result.sound,
            position: result.position.as_str(),
            produced: &result.produced,
            result: result.result.label(),
            process: result.finding.as_ref().map(|f| f.process.name()),
            process_status: result.finding.as_ref().map(|f| f.status.label()),
        })?;
    }
    into_string(writer)
}

pub fn render_processes_csv(findings: &[ProcessFinding]) -> Result<String> {
    // Header written by hand so an empty file still carries it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["process", "target", "produced", "status"])?;
    for finding in findings {
        writer.serialize(ProcessRow {
            process: finding.process.name(),
            target: &finding.target,
            produced: &finding.produced,
            status: finding.status.label(),
        })?;
    }
    into_string(writer)
}

/// The editable sheet: one row per item, header `sound,position,produced`.
pub fn render_input_sheet(items: &[AssessmentItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["sound", "position", "produced"])?;
    for item in items {
        writer.write_record([item.sound.as_str(), item.position.as_str(), item.produced.as_str()])?;
    }
    into_string(writer)
}

fn mastery_lines(out: &mut String, entries: &[MasteryEntry]) {
    if entries.is_empty() {
        out.push_str("  - None\n");
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "  - /{}/ ({}) – expected by {} yrs",
            entry.sound,
            entry.position,
            entry.expected_by_years()
        );
    }
}

fn process_lines(out: &mut String, entries: &[ProcessSummaryEntry]) {
    if entries.is_empty() {
        out.push_str("  - None\n");
    }
    for entry in entries {
        let _ = write!(
            out,
            "  - {} (e.g., /{}/ → /{}/)",
            entry.process, entry.target, entry.produced
        );
        if let Resolution::Months(months) = entry.resolution {
            let _ = write!(out, " – resolves by {} yrs", months / 12);
        }
        out.push('\n');
    }
}

pub fn render_summary_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Starticulation Articulation Assessment: {} ({})",
        report.child.name,
        format_age(report.child.age_months)
    );
    let _ = writeln!(out, "Generated {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));

    out.push_str("\nSummary Report\nDelayed:\n");
    mastery_lines(&mut out, &report.summary.delayed);
    out.push_str("Age Appropriate but Incorrect:\n");
    mastery_lines(&mut out, &report.summary.age_appropriate_incorrect);

    out.push_str("\nPhonological Process Summary\nAtypical Processes:\n");
    process_lines(&mut out, &report.summary.processes.atypical);
    out.push_str("Typical but Delayed Processes:\n");
    process_lines(&mut out, &report.summary.processes.typical);

    out.push_str("\nRecommended SMART Goals\n");
    if report.goals.is_empty() {
        out.push_str("  - None\n");
    }
    for goal in &report.goals {
        let _ = writeln!(out, "  - {}", goal);
    }

    out
}

pub fn render_goals_text(goals: &[String]) -> String {
    goals.join("\n")
}

/// File-name-safe form of a child's name.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "assessment".to_string()
    } else {
        stem
    }
}
