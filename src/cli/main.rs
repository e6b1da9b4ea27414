//! datadictionary - print data dictionary structures as JSON
//!
//! With short names, fetches each structure with its elements and prints one
//! document per line. With `--list`, prints the structure catalog. With
//! neither, prints the dictionary root metadata.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use data_dictionary_sdk::cli::commands::catalog::{handle_list, handle_summary};
use data_dictionary_sdk::cli::commands::fetch::{FetchArgs, handle_fetch};
use data_dictionary_sdk::cli::{CliError, OutputFormat};
use data_dictionary_sdk::{ClientConfig, DataDictionary, HttpTransport, NotesMode};

#[derive(Parser, Debug)]
#[command(name = "datadictionary", version, about = "Data dictionary structure client")]
struct Cli {
    /// Data structure short names to fetch
    short_names: Vec<String>,

    /// Base URL of the data dictionary API
    #[arg(long)]
    url: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// List the data structures in the dictionary
    #[arg(long)]
    list: bool,

    /// Blank element notes whenever any coded value is present
    #[arg(long)]
    strict_notes: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "data_dictionary_sdk=warn",
        1 => "data_dictionary_sdk=info",
        _ => "data_dictionary_sdk=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    config = config.apply_env()?;

    if let Some(url) = &cli.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    if cli.strict_notes {
        config = config.with_notes_mode(NotesMode::CodedWins);
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).context("Failed to load configuration")?;
    let transport = HttpTransport::from_config(&config)?;

    let mut dictionary = DataDictionary::connect_with(&transport, &config).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.short_names.is_empty() && !cli.list {
        handle_summary(&dictionary, cli.format, &mut out)?;
        return Ok(());
    }

    dictionary.fetch_structures(&transport).await?;

    if cli.list {
        handle_list(&dictionary, cli.format, &mut out)?;
    }

    if !cli.short_names.is_empty() {
        let args = FetchArgs {
            names: cli.short_names,
            format: cli.format,
        };
        let mut errors = std::io::stderr();
        handle_fetch(&mut dictionary, &transport, &args, &mut out, &mut errors).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = match err.downcast_ref::<CliError>() {
                Some(cli_err) => cli_err.user_message(),
                None => match err.downcast_ref::<data_dictionary_sdk::DictionaryError>() {
                    Some(dd_err) => dd_err.user_message(),
                    None => format!("{:#}", err),
                },
            };
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
