use clap::Parser;
use starticulation::utils::{logger, validation::Validate};
use starticulation::{AssessmentEngine, AssessmentPipeline, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting starticulation");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Input and output paths are taken relative to the working directory.
    let storage = LocalStorage::new(".".to_string());
    let pipeline = AssessmentPipeline::new(storage, config);
    let engine = AssessmentEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Assessment scored successfully");
            println!("Assessment scored successfully");
            println!("Reports saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Scoring failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
