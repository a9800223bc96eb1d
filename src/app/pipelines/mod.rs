pub mod assessment_pipeline;
