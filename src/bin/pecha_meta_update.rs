use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pecha_meta_updater::app::App;
use pecha_meta_updater::bdrc::BdrcHttpClient;
use pecha_meta_updater::domain::{PechaId, WorkId};
use pecha_meta_updater::error::MetaError;
use pecha_meta_updater::openpecha::OpenPechaHttpClient;

#[derive(Parser)]
#[command(name = "pecha-meta-update")]
#[command(about = "Update an OpenPecha meta.yml with volume info from the BDRC catalog")]
#[command(version, author)]
struct Cli {
    #[arg(long, default_value = "W22083")]
    work_id: String,

    #[arg(long, default_value = "P000003")]
    pecha_id: String,

    #[arg(long, default_value = "./new_meta")]
    output_dir: PathBuf,

    #[arg(long, default_value = "meta_update.log")]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(meta) = report.downcast_ref::<MetaError>() {
            return ExitCode::from(map_exit_code(meta));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &MetaError) -> u8 {
    match error {
        MetaError::InvalidWorkId(_) | MetaError::InvalidPechaId(_) => 2,
        MetaError::CatalogHttp(_)
        | MetaError::CatalogStatus { .. }
        | MetaError::MetadataHttp(_)
        | MetaError::MetadataStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    // Truncates the previous run's log.
    let log_file = File::create(&cli.log_file).into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    let work_id: WorkId = cli.work_id.parse()?;
    let pecha_id: PechaId = cli.pecha_id.parse()?;

    let catalog = BdrcHttpClient::new()?;
    let metadata = OpenPechaHttpClient::new()?;
    let app = App::new(catalog, metadata, cli.output_dir);

    let outcome = app.update(&work_id, &pecha_id)?;
    println!(
        "{}: {} volume(s) written to {}",
        pecha_id,
        outcome.volume_count,
        outcome.path.display()
    );
    Ok(())
}
