use crate::app::report;
use crate::core::{
    AssessmentItem, AssessmentReport, Child, ConfigProvider, OutputFormat, Pipeline, Position,
    Storage,
};
use crate::domain::services::age::{format_age, parse_age_months};
use crate::domain::services::tables::ReferenceTables;
use crate::domain::services::AssessmentScorer;
use crate::utils::error::{Result, ScoringError};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// One row of the clinician's sheet as read from CSV.
#[derive(Debug, Deserialize)]
struct SheetRow {
    sound: String,
    position: String,
    #[serde(default)]
    produced: Option<String>,
}

pub struct AssessmentPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) scorer: AssessmentScorer,
}

impl<S: Storage, C: ConfigProvider> AssessmentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_scorer(storage, config, AssessmentScorer::default())
    }

    pub fn with_scorer(storage: S, config: C, scorer: AssessmentScorer) -> Self {
        Self {
            storage,
            config,
            scorer,
        }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn render_files(&self, report: &AssessmentReport) -> Result<Vec<(String, Vec<u8>)>> {
        let stem = report::file_stem(&report.child.name);
        let mut files = Vec::new();

        for format in self.config.output_formats() {
            match format {
                OutputFormat::Csv => {
                    files.push((
                        "results.csv".to_string(),
                        report::render_results_csv(&report.results)?.into_bytes(),
                    ));
                    files.push((
                        "processes.csv".to_string(),
                        report::render_processes_csv(&report.findings)?.into_bytes(),
                    ));
                }
                OutputFormat::Json => {
                    files.push((
                        "report.json".to_string(),
                        serde_json::to_vec_pretty(report)?,
                    ));
                }
                OutputFormat::Txt => {
                    files.push((
                        "summary.txt".to_string(),
                        report::render_summary_text(report).into_bytes(),
                    ));
                    if report.goals.is_empty() {
                        tracing::info!("No delayed sounds, skipping goals file");
                    } else {
                        files.push((
                            format!("{}_goals.txt", stem),
                            report::render_goals_text(&report.goals).into_bytes(),
                        ));
                    }
                }
            }
        }

        Ok(files)
    }
}

/// Parses and checks a sheet against the reference tables. A blank
/// `produced` cell means the sound was produced correctly.
pub fn parse_sheet(data: &[u8], tables: &ReferenceTables) -> Result<Vec<AssessmentItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut items = Vec::new();
    for row in reader.deserialize::<SheetRow>() {
        let row = row?;
        let position: Position = row.position.parse()?;

        tables.mastery_age(&row.sound)?;
        if !tables.is_assessed(&row.sound, position) {
            return Err(ScoringError::PositionNotAllowed {
                sound: row.sound,
                position: position.to_string(),
            });
        }

        let produced = row
            .produced
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| row.sound.clone());
        items.push(AssessmentItem::new(row.sound, position, produced));
    }

    Ok(items)
}

fn bundle_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AssessmentPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<AssessmentItem>> {
        let Some(input) = self.config.input_path() else {
            tracing::info!("No input sheet given, scoring the default all-correct sheet");
            return Ok(self.scorer.tables().assessment_universe());
        };

        tracing::debug!("Reading assessment sheet from: {}", input);
        let data = self.storage.read_file(input).await?;
        let items = parse_sheet(&data, self.scorer.tables())?;

        if items.is_empty() {
            tracing::warn!("Assessment sheet '{}' has no rows", input);
        }
        Ok(items)
    }

    async fn transform(&self, items: Vec<AssessmentItem>) -> Result<AssessmentReport> {
        let age_input = self.config.age_input();
        let child = Child {
            name: self.config.child_name().trim().to_string(),
            age_months: parse_age_months(age_input),
        };

        if child.age_months == 0 {
            tracing::warn!(
                "Age '{}' scored as 0 months; no sound will be reported as delayed",
                age_input
            );
        } else {
            tracing::debug!("Scoring {} at {}", child.name, format_age(child.age_months));
        }

        let report = self.scorer.score(&child, &items)?;

        tracing::debug!(
            "Scored {} items: {} delayed, {} incorrect but age appropriate, {} processes",
            report.results.len(),
            report.summary.delayed.len(),
            report.summary.age_appropriate_incorrect.len(),
            report.findings.len()
        );
        Ok(report)
    }

    async fn load(&self, report: AssessmentReport) -> Result<String> {
        let files = self.render_files(&report)?;

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(&self.output_file(name), data).await?;
        }

        if self.config.bundle() {
            let zip_name = format!("{}_assessment.zip", report::file_stem(&report.child.name));
            tracing::debug!("Bundling {} files into {}", files.len(), zip_name);
            let zip_data = bundle_zip(&files)?;
            self.storage
                .write_file(&self.output_file(&zip_name), &zip_data)
                .await?;
        }

        Ok(self.config.output_path().to_string())
    }
}
