use clap::Parser;
use cuties::{Config, PetRecord};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prints an announcement for a random adoptable pet.
///
/// The Petfinder API key is read from PETFINDER_KEY, exported or in a .env file. Flags override the
/// PETFINDER_* environment settings.
#[derive(Debug, Parser)]
#[command(name = "cuties", version)]
struct Cli {
    /// Shelter to draw pets from
    #[arg(long)]
    shelter_id: Option<String>,

    /// Petfinder API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the record and announcement as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

#[derive(Serialize)]
struct Announcement<'a> {
    message: String,
    photo: Option<&'a str>,
    photo_alt_text: Option<String>,
    link: Option<&'a str>,
    attempts: usize,
    pet: &'a PetRecord,
}

/// Stdout carries the announcement, so only warnings and errors are logged by default.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "cuties=debug"
    } else {
        "cuties=warn"
    }
}

fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(shelter_id) = cli.shelter_id {
        config.shelter_id = shelter_id;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }
    tracing::debug!(config = ?config, "Loaded configuration");

    let pet = config.client()?.random().await?;

    if cli.json {
        let announcement = Announcement {
            message: pet.message(),
            photo: pet.photo(),
            photo_alt_text: pet.photo_alt_text(),
            link: pet.link(),
            attempts: pet.attempts,
            pet: &pet.data,
        };
        println!("{}", serde_json::to_string_pretty(&announcement)?);
    } else {
        println!("{}", pet.message());
        if let Some(photo) = pet.photo() {
            println!("{}", photo);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch a pet");
            ExitCode::FAILURE
        }
    }
}
