//! `reelgen-studio` -- generate AI videos from the terminal.
//!
//! # Environment variables
//!
//! | Variable           | Default                  | Description                          |
//! |--------------------|--------------------------|--------------------------------------|
//! | `REELGEN_API_URL`  | `http://localhost:3000`  | reelgen API server                   |
//! | `REELGEN_DATA_DIR` | `<data_local_dir>/reelgen` | Where history is kept              |
//! | `REELGEN_TICK_MS`  | `1000`                   | Progress tick interval               |
//!
//! `--direct` bypasses the API server and calls the upstream model with the
//! `REELGEN_UPSTREAM_*` settings read by the client crate.

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelgen_client::{RemoteVideoClient, UpstreamConfig, VideoBackend};
use reelgen_core::history::{HistoryQuery, HistorySort};
use reelgen_core::request::{GenerationRequest, VideoStyle};
use reelgen_core::validation::validate_request;
use reelgen_store::{FileKeyValueStore, HistoryStore};
use reelgen_studio::backend::ApiVideoBackend;
use reelgen_studio::config::StudioConfig;
use reelgen_studio::download::download_video;
use reelgen_studio::error::StudioError;
use reelgen_studio::form::GenerateForm;
use reelgen_studio::render;
use reelgen_studio::session::{GenerationSession, SessionState};

#[derive(Parser)]
#[command(name = "reelgen-studio")]
#[command(about = "Generate videos from text prompts and manage your generation history")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// reelgen API server base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the local history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a video from a prompt
    Generate {
        #[command(flatten)]
        form: GenerateForm,

        /// Call the upstream model directly instead of the API server
        #[arg(long)]
        direct: bool,

        /// Progress tick interval in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,
    },

    /// Browse and manage past generations
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// List the available style presets
    Styles,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved videos
    List {
        /// Only show prompts containing this text
        #[arg(long)]
        search: Option<String>,

        /// Only show this style
        #[arg(long)]
        style: Option<String>,

        /// newest, oldest or duration
        #[arg(long, default_value = "newest")]
        sort: String,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one saved video
    Delete { id: String },

    /// Delete every saved video
    Clear,

    /// Download a saved video as video_<id>.mp4
    Download {
        id: String,

        /// Target directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "reelgen_studio=debug,reelgen_client=debug,reelgen_store=debug"
    } else {
        "reelgen_studio=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = StudioConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    tracing::debug!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        "Loaded studio configuration",
    );

    match cli.command {
        Commands::Generate {
            form,
            direct,
            tick_ms,
        } => {
            if let Some(ms) = tick_ms {
                config.tick_interval = Duration::from_millis(ms.max(1));
            }
            generate(&config, form.to_request(), direct).await
        }
        Commands::History { command } => history(&config, command).await,
        Commands::Styles => {
            print!("{}", render::style_list());
            Ok(())
        }
    }
}

async fn generate(config: &StudioConfig, request: GenerationRequest, direct: bool) -> Result<()> {
    let request = validate_request(&request)?;

    let backend: Box<dyn VideoBackend> = if direct {
        Box::new(RemoteVideoClient::new(UpstreamConfig::from_env()))
    } else {
        Box::new(ApiVideoBackend::new(config.api_url.clone()))
    };
    let history = open_history(config)?;

    let mut session = GenerationSession::new(backend.as_ref(), &history, config.tick_interval);
    let mut rng = rand::rng();
    let state = session
        .run(&request, &mut rng, |update| {
            print!("\r{}", render::progress_line(update));
            let _ = std::io::stdout().flush();
        })
        .await;
    println!();

    match state {
        SessionState::Completed(record) => {
            print!("{}", render::record_summary(record));
            Ok(())
        }
        SessionState::Error(message) => bail!("Generation failed: {message}"),
        SessionState::Idle | SessionState::Generating(_) => {
            bail!("Generation ended without a result")
        }
    }
}

async fn history(config: &StudioConfig, command: HistoryCommand) -> Result<()> {
    let history = open_history(config)?;

    match command {
        HistoryCommand::List {
            search,
            style,
            sort,
            json,
        } => {
            let style = style
                .map(|s| VideoStyle::parse(&s).with_context(|| format!("Unknown style '{s}'")))
                .transpose()?;
            let sort = HistorySort::parse(&sort)
                .with_context(|| format!("Unknown sort '{sort}' (newest, oldest, duration)"))?;
            let query = HistoryQuery {
                search,
                style,
                sort,
            };

            let entries = history.query(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::history_table(&entries, query.is_filtered()));
            }
        }
        HistoryCommand::Delete { id } => {
            if history.remove(&id)? {
                println!("Deleted {id}");
            } else {
                println!("No history entry with id '{id}'");
            }
        }
        HistoryCommand::Clear => {
            history.clear()?;
            println!("History cleared");
        }
        HistoryCommand::Download { id, output } => {
            let entry = history
                .get(&id)
                .ok_or_else(|| StudioError::EntryNotFound(id.clone()))?;
            let path = download_video(&reqwest::Client::new(), &entry, &output).await?;
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

fn open_history(config: &StudioConfig) -> Result<HistoryStore<FileKeyValueStore>> {
    let kv = FileKeyValueStore::open(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;
    Ok(HistoryStore::new(kv))
}
