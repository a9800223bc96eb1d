use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through extract, transform and load.
pub struct AssessmentEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AssessmentEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting assessment scoring");

        let items = self.pipeline.extract().await?;
        tracing::info!("Extracted {} assessment items", items.len());

        let report = self.pipeline.transform(items).await?;
        tracing::info!(
            "Scored {} items for {}: {} delayed, {} atypical processes",
            report.results.len(),
            report.child.name,
            report.summary.delayed.len(),
            report.summary.processes.atypical.len()
        );

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Reports saved to: {}", output_path);

        Ok(output_path)
    }
}
