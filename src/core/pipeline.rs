pub use crate::app::pipelines::assessment_pipeline::{parse_sheet, AssessmentPipeline};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::AssessmentEngine;
    use crate::core::{ConfigProvider, OutputFormat, Pipeline, Position, Storage};
    use crate::domain::model::{ItemResult, PhonologicalProcess};
    use crate::domain::services::tables::ReferenceTables;
    use crate::utils::error::{Result, ScoringError};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_names(&self) -> Vec<String> {
            let files = self.files.lock().await;
            let mut names: Vec<String> = files.keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScoringError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        child_name: String,
        age: String,
        input: Option<String>,
        output_path: String,
        formats: Vec<OutputFormat>,
        bundle: bool,
    }

    impl MockConfig {
        fn new(age: &str, input: Option<&str>) -> Self {
            Self {
                child_name: "Ava".to_string(),
                age: age.to_string(),
                input: input.map(str::to_string),
                output_path: "out".to_string(),
                formats: OutputFormat::ALL.to_vec(),
                bundle: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn child_name(&self) -> &str {
            &self.child_name
        }

        fn age_input(&self) -> &str {
            &self.age
        }

        fn input_path(&self) -> Option<&str> {
            self.input.as_deref()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[OutputFormat] {
            &self.formats
        }

        fn bundle(&self) -> bool {
            self.bundle
        }
    }

    const SHEET: &str = "sound,position,produced\n\
                         k,initial,t\n\
                         k,final,t\n\
                         s,initial,θ\n\
                         r,initial,w\n\
                         m,initial,\n\
                         st,initial,t\n";

    fn out_key(name: &str) -> String {
        std::path::Path::new("out").join(name).to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_extract_default_sheet_without_input() {
        let pipeline = AssessmentPipeline::new(MockStorage::new(), MockConfig::new("4;6", None));

        let items = pipeline.extract().await.unwrap();

        assert_eq!(items, ReferenceTables::australian().assessment_universe());
    }

    #[tokio::test]
    async fn test_extract_reads_sheet_from_storage() {
        let storage = MockStorage::new();
        storage.put_file("sheet.csv", SHEET).await;
        let pipeline = AssessmentPipeline::new(storage, MockConfig::new("4;6", Some("sheet.csv")));

        let items = pipeline.extract().await.unwrap();

        assert_eq!(items.len(), 6);
        assert_eq!(items[0].produced, "t");
        assert_eq!(items[1].position, Position::Final);
        // Blank produced cell defaults to the target.
        assert_eq!(items[4].produced, "m");
    }

    #[tokio::test]
    async fn test_extract_missing_sheet_is_io_error() {
        let pipeline =
            AssessmentPipeline::new(MockStorage::new(), MockConfig::new("4;6", Some("nope.csv")));

        let result = pipeline.extract().await;

        assert!(matches!(result, Err(ScoringError::IoError(_))));
    }

    #[test]
    fn test_parse_sheet_rejects_invalid_rows() {
        let tables = ReferenceTables::australian();

        let r_final = parse_sheet(b"sound,position,produced\nr,final,w\n", &tables);
        assert!(matches!(r_final, Err(ScoringError::PositionNotAllowed { .. })));

        let unknown = parse_sheet(b"sound,position,produced\nx,initial,x\n", &tables);
        assert!(matches!(unknown, Err(ScoringError::UnknownSound { .. })));

        let bad_position = parse_sheet(b"sound,position,produced\ns,middle,s\n", &tables);
        assert!(matches!(bad_position, Err(ScoringError::InvalidPosition { .. })));
    }

    #[test]
    fn test_parse_sheet_without_produced_column() {
        let tables = ReferenceTables::australian();
        let items = parse_sheet("sound,position\nʒ,medial\n".as_bytes(), &tables).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].produced, "ʒ");
    }

    #[tokio::test]
    async fn test_transform_scores_items() {
        let storage = MockStorage::new();
        storage.put_file("sheet.csv", SHEET).await;
        let pipeline = AssessmentPipeline::new(storage, MockConfig::new("4;6", Some("sheet.csv")));

        let items = pipeline.extract().await.unwrap();
        let report = pipeline.transform(items).await.unwrap();

        assert_eq!(report.child.age_months, 54);
        assert_eq!(report.results[0].result, ItemResult::Delayed);
        assert_eq!(report.results[3].result, ItemResult::IncorrectButAgeAppropriate);
        assert_eq!(report.findings.len(), 5);
        assert_eq!(report.summary.processes.atypical.len(), 1);
        assert_eq!(
            report.summary.processes.atypical[0].process,
            PhonologicalProcess::InterdentalLisp
        );
        assert_eq!(report.goals.len(), 3);
    }

    #[tokio::test]
    async fn test_transform_with_unparseable_age() {
        let pipeline = AssessmentPipeline::new(MockStorage::new(), MockConfig::new("four", None));

        let items = vec![crate::core::AssessmentItem::new("k", Position::Initial, "t")];
        let report = pipeline.transform(items).await.unwrap();

        assert_eq!(report.child.age_months, 0);
        assert_eq!(report.results[0].result, ItemResult::IncorrectButAgeAppropriate);
        assert!(report.goals.is_empty());
    }

    #[tokio::test]
    async fn test_blank_child_name_stops_the_run() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("4;6", None);
        config.child_name = " ".to_string();
        let pipeline = AssessmentPipeline::new(storage.clone(), config);

        let items = vec![crate::core::AssessmentItem::new("k", Position::Initial, "t")];
        let transformed = pipeline.transform(items).await;
        assert!(matches!(
            transformed,
            Err(ScoringError::MissingConfigError { ref field }) if field == "child_name"
        ));

        let err = AssessmentEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(err, ScoringError::MissingConfigError { .. }));
        assert!(storage.file_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_engine_writes_all_formats() {
        let storage = MockStorage::new();
        storage.put_file("sheet.csv", SHEET).await;
        let pipeline =
            AssessmentPipeline::new(storage.clone(), MockConfig::new("4;6", Some("sheet.csv")));

        let output = AssessmentEngine::new(pipeline).run().await.unwrap();

        assert_eq!(output, "out");
        let names = storage.file_names().await;
        for name in [
            "results.csv",
            "processes.csv",
            "report.json",
            "summary.txt",
            "Ava_goals.txt",
        ] {
            assert!(names.contains(&out_key(name)), "missing {}", name);
        }

        let goals = String::from_utf8(storage.get_file(&out_key("Ava_goals.txt")).await.unwrap())
            .unwrap();
        assert_eq!(goals.lines().count(), 3);

        let json: serde_json::Value =
            serde_json::from_slice(&storage.get_file(&out_key("report.json")).await.unwrap())
                .unwrap();
        assert_eq!(json["child"]["age_months"], 54);
        assert_eq!(json["findings"][2]["process"], "interdental lisp");
    }

    #[tokio::test]
    async fn test_load_respects_formats_and_bundle() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("4;6", None);
        config.formats = vec![OutputFormat::Json];
        config.bundle = true;
        let pipeline = AssessmentPipeline::new(storage.clone(), config);

        AssessmentEngine::new(pipeline).run().await.unwrap();

        let names = storage.file_names().await;
        assert_eq!(names, vec![out_key("Ava_assessment.zip"), out_key("report.json")]);

        let zip_data = storage.get_file(&out_key("Ava_assessment.zip")).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
