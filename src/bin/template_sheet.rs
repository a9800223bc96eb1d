use anyhow::Context;
use clap::Parser;
use starticulation::app::report::render_input_sheet;
use starticulation::core::Storage;
use starticulation::domain::services::tables::ReferenceTables;
use starticulation::utils::logger;
use starticulation::LocalStorage;

#[derive(Parser)]
#[command(name = "template-sheet")]
#[command(about = "Write a blank assessment sheet with every target pre-filled")]
struct Args {
    /// Where to write the sheet
    #[arg(short, long, default_value = "assessment_sheet.csv")]
    output: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let items = ReferenceTables::australian().assessment_universe();
    let sheet = render_input_sheet(&items).context("rendering assessment sheet")?;

    LocalStorage::new(".".to_string())
        .write_file(&args.output, sheet.as_bytes())
        .await
        .with_context(|| format!("writing {}", args.output))?;

    tracing::info!("Wrote {} targets to {}", items.len(), args.output);
    println!("Sheet written to {}", args.output);
    println!();
    println!("HOW TO USE: replace each 'produced' cell with the sound the child actually");
    println!("produced. Cells left as the target (or blank) are scored as correct.");
    println!("Use clinical judgment to verify phonological processes like cluster reduction.");

    Ok(())
}
