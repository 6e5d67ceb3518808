use std::fs;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use feedstage::config::{ConfigLoader, ResolvedConfig};
use feedstage::domain::ZipCollection;
use feedstage::error::FeedError;
use feedstage::feed::HttpFeedClient;
use feedstage::object_store::HttpObjectStore;
use feedstage::reader::FeedReader;
use feedstage::writer::StoreWriter;

#[derive(Parser)]
#[command(name = "feedstage")]
#[command(about = "Resolve, fetch and stage the newest versioned feed archives")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Download and extract the newest archives without uploading")]
    Fetch(CommonArgs),
    #[command(about = "Download, extract and upload to the object store")]
    Run(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    #[arg(long)]
    config: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(feed) = report.downcast_ref::<FeedError>() {
            return ExitCode::from(map_exit_code(feed));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FeedError) -> u8 {
    match error {
        FeedError::MissingConfig | FeedError::ConfigRead(_) | FeedError::ConfigParse(_) => 2,
        FeedError::DirectoryNotFound(_)
        | FeedError::DownloadFailed { .. }
        | FeedError::UploadFailed { .. }
        | FeedError::FeedHttp(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch(args) => {
            let resolved = ConfigLoader::resolve(args.config.as_deref()).into_diagnostic()?;
            let collections = read_resources(&resolved)?;
            print_summary(&collections);
            Ok(())
        }
        Commands::Run(args) => {
            let resolved = ConfigLoader::resolve(args.config.as_deref()).into_diagnostic()?;
            let collections = read_resources(&resolved)?;
            upload_collections(&resolved, &collections)?;
            print_summary(&collections);
            Ok(())
        }
    }
}

fn read_resources(resolved: &ResolvedConfig) -> miette::Result<Vec<ZipCollection>> {
    fs::create_dir_all(resolved.staging_dir.as_std_path())
        .map_err(|err| FeedError::Filesystem(err.to_string()))
        .into_diagnostic()?;

    let feed = HttpFeedClient::new(&resolved.feed_url).into_diagnostic()?;
    let reader = FeedReader::new(feed, resolved.cadence.clone());

    let mut collections = Vec::new();
    for resource in &resolved.resources {
        let mut outcome = reader.read(resource, &resolved.staging_dir);
        collections.append(&mut outcome.collections);
        if let Some(error) = outcome.error {
            // Archives staged before the failure stay on disk; report how far
            // the run got before surfacing the error.
            print_summary(&collections);
            return Err(error).into_diagnostic();
        }
    }
    Ok(collections)
}

fn upload_collections(
    resolved: &ResolvedConfig,
    collections: &[ZipCollection],
) -> miette::Result<()> {
    let store = HttpObjectStore::new(&resolved.store_url).into_diagnostic()?;
    let writer = StoreWriter::new(store);

    for collection in collections {
        let cadence = if collection.archive.contains("full") {
            &resolved.cadence.weekly
        } else {
            &resolved.cadence.daily
        };
        let src = resolved.staging_dir.join(cadence);
        for file in &collection.files_to_write {
            writer
                .write(&src, file, file, &collection.archive)
                .into_diagnostic()?;
        }
    }
    Ok(())
}

fn print_summary(collections: &[ZipCollection]) {
    for collection in collections {
        println!(
            "{}: {} file(s) staged",
            collection.archive,
            collection.files_to_write.len()
        );
        for file in &collection.files_to_write {
            println!("  {file}");
        }
    }
}
