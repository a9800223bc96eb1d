use clap::Parser;
use starticulation::config::toml_config::TomlConfig;
use starticulation::core::{ConfigProvider, Pipeline};
use starticulation::domain::services::age::{format_age, parse_age_months};
use starticulation::utils::{logger, validation::Validate};
use starticulation::{AssessmentEngine, AssessmentPipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-assess")]
#[command(about = "Score an articulation assessment described by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "assessment.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the bundle setting from config
    #[arg(long)]
    bundle: Option<bool>,

    /// Check the sheet and show what would be written without writing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.log_json());
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(bundle) = args.bundle {
        config.output.bundle = bundle;
        tracing::info!("Bundle overridden to: {}", bundle);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    let storage = LocalStorage::new(".".to_string());
    let pipeline = AssessmentPipeline::new(storage, config);

    let result = if args.dry_run {
        perform_dry_run(&pipeline).await
    } else {
        AssessmentEngine::new(pipeline).run().await.map(|output_path| {
            println!("Assessment scored successfully");
            println!("Reports saved to: {}", output_path);
        })
    };

    if let Err(e) = result {
        tracing::error!(
            "Scoring failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let age_months = parse_age_months(config.age_input());

    println!("Configuration Summary:");
    println!("  Child: {}", config.child_name());
    println!(
        "  Age: {} ({} months)",
        format_age(age_months),
        age_months
    );
    println!(
        "  Input: {}",
        config.input_path().unwrap_or("default sheet, all sounds correct")
    );
    println!("  Output: {}", config.output_path());
    let formats: Vec<String> = config
        .output_formats()
        .iter()
        .map(|f| format!("{:?}", f).to_lowercase())
        .collect();
    println!("  Formats: {}", formats.join(", "));
    println!("  Bundle: {}", config.bundle());

    if args.dry_run {
        println!("  DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    pipeline: &AssessmentPipeline<LocalStorage, TomlConfig>,
) -> starticulation::Result<()> {
    let items = pipeline.extract().await?;
    let report = pipeline.transform(items).await?;

    println!("Dry Run Analysis:");
    println!("  Items scored: {}", report.results.len());
    println!("  Delayed: {}", report.summary.delayed.len());
    println!(
        "  Incorrect but age appropriate: {}",
        report.summary.age_appropriate_incorrect.len()
    );
    println!(
        "  Processes: {} atypical, {} typical",
        report.summary.processes.atypical.len(),
        report.summary.processes.typical.len()
    );
    println!("  Goals: {}", report.goals.len());
    println!();
    println!("Dry run complete. Nothing was written.");

    Ok(())
}
