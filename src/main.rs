// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use osuclassy::render::{
    CPU_INFERENCE_NOTICE, render_card, render_card_line, render_chart, render_view,
};
use osuclassy::utils::logging::{format_error, format_info, format_warning};
use osuclassy::{
    BeatmapCatalog, BeatmapPager, Config, JsonExporter, ListingKind, OsuClassyClient,
    PredictionError, PredictionResult, PredictionSession, PredictionTransport,
    ProcessingIndicator, ResponseProjector, SelectOutcome, SubmitOutcome, UploadCandidate,
};
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "osuclassy")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Predict osu! beatmap types with the OsuClassy service", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, env = "OSUCLASSY_API_URL", value_name = "URL")]
    api_url: Option<String>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a .osu file and show the predicted beatmap type
    Predict {
        file: PathBuf,

        /// Write the prediction as JSON into this directory
        #[arg(short, long, value_name = "DIR")]
        export: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Read file paths from stdin, one per line, and predict each
    Watch,

    /// Show a stored prediction
    Beatmap {
        beatmapset_id: u64,
        beatmap_id: u64,
    },

    /// List the beatmaps of a beatmapset
    Beatmapset { beatmapset_id: u64 },

    /// Most viewed beatmaps
    Popular(ListingArgs),

    /// Most recently predicted beatmaps
    Recent(ListingArgs),

    /// Every stored beatmap
    All(ListingArgs),
}

#[derive(Args)]
struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Beatmaps per page (defaults to the configured page size)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    osuclassy::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(api_url) = cli.api_url {
        config = config
            .with_base_url(api_url)
            .context("Invalid --api-url")?;
    }

    let client = OsuClassyClient::new(&config.api).context("Failed to create API client")?;

    match cli.command {
        Commands::Predict {
            file,
            export,
            pretty,
        } => {
            let succeeded = cmd_predict(&config, client, file, export, pretty, cli.color).await?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Commands::Watch => {
            cmd_watch(&config, client, cli.color).await?;
        }
        Commands::Beatmap {
            beatmapset_id,
            beatmap_id,
        } => {
            cmd_beatmap(&config, &client, beatmapset_id, beatmap_id).await?;
        }
        Commands::Beatmapset { beatmapset_id } => {
            cmd_beatmapset(&client, beatmapset_id).await?;
        }
        Commands::Popular(args) => {
            cmd_listing(&config, &client, ListingKind::Popular, args).await?;
        }
        Commands::Recent(args) => {
            cmd_listing(&config, &client, ListingKind::Recent, args).await?;
        }
        Commands::All(args) => {
            cmd_listing(&config, &client, ListingKind::All, args).await?;
        }
    }

    Ok(())
}

fn print_notice(config: &Config) {
    if config.display.show_info_banner {
        println!("{}\n", format_info(CPU_INFERENCE_NOTICE));
    }
}

async fn cmd_predict(
    config: &Config,
    client: OsuClassyClient,
    file: PathBuf,
    export: Option<PathBuf>,
    pretty: bool,
    colored: bool,
) -> Result<bool> {
    print_notice(config);

    let candidate = UploadCandidate::from_path(&file)
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let file_name = candidate.file_name().to_string();

    let mut session = PredictionSession::new(client, config);

    match session.select(Some(candidate), Instant::now()) {
        SelectOutcome::Accepted => {}
        SelectOutcome::Rejected(_) => {
            println!("{}", render_view(&session, config.display.chart_width));
            return Ok(false);
        }
        SelectOutcome::Ignored | SelectOutcome::Busy => return Ok(false),
    }

    let indicator = ProcessingIndicator::start(&file_name, colored);
    let outcome = session.submit().await?;
    indicator.finish();
    info!("Request finished in {:.2}s", indicator.elapsed().as_secs_f64());

    println!("{}", render_view(&session, config.display.chart_width));

    match outcome {
        SubmitOutcome::Predicted => {
            if let (Some(dir), Some(prediction)) = (export, session.prediction()) {
                let exporter = JsonExporter::new(dir)?;
                let path = exporter.export_prediction(
                    &file_name,
                    prediction,
                    session.chart(),
                    session.summary(),
                    pretty,
                )?;
                println!("\nSaved prediction to {}", path.display());
            }
            Ok(true)
        }
        SubmitOutcome::Failed(_) => Ok(false),
    }
}

type InFlight = JoinHandle<std::result::Result<PredictionResult, PredictionError>>;

async fn wait_in_flight(
    in_flight: &mut Option<InFlight>,
) -> std::result::Result<std::result::Result<PredictionResult, PredictionError>, JoinError> {
    match in_flight {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn cmd_watch(config: &Config, client: OsuClassyClient, colored: bool) -> Result<()> {
    print_notice(config);
    println!("Enter the path of a .osu file to predict it (Ctrl-D to quit).\n");

    let width = config.display.chart_width;
    let mut session = PredictionSession::new(client, config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;
    let mut indicator: Option<ProcessingIndicator> = None;
    let mut stdin_open = true;

    println!("{}\n", render_view(&session, width));

    while stdin_open || in_flight.is_some() {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    stdin_open = false;
                    continue;
                };

                let path = line.trim();
                let candidate = if path.is_empty() {
                    None
                } else {
                    match UploadCandidate::from_path(path) {
                        Ok(candidate) => Some(candidate),
                        Err(e) => {
                            println!("{}", format_error(&e.to_string()));
                            continue;
                        }
                    }
                };
                let file_name = candidate.as_ref().map(|c| c.file_name().to_string());

                match session.select(candidate, Instant::now()) {
                    SelectOutcome::Ignored => {}
                    SelectOutcome::Busy => {
                        println!(
                            "{}",
                            format_warning("Still predicting the previous beatmap, please wait.")
                        );
                    }
                    SelectOutcome::Rejected(_) => {
                        println!("{}\n", render_view(&session, width));
                    }
                    SelectOutcome::Accepted => match session.prepare_request().await {
                        Ok(request) => {
                            let transport = session.transport().clone();
                            in_flight = Some(tokio::spawn(async move {
                                transport.predict(request).await
                            }));
                            indicator = Some(ProcessingIndicator::start(
                                file_name.as_deref().unwrap_or_default(),
                                colored,
                            ));
                        }
                        Err(e) => {
                            error!("Failed to read upload: {}", e);
                            session.complete(Err(PredictionError::Unknown), Instant::now())?;
                            println!("{}\n", render_view(&session, width));
                        }
                    },
                }
            }
            joined = wait_in_flight(&mut in_flight) => {
                in_flight = None;
                if let Some(indicator) = indicator.take() {
                    indicator.finish();
                }
                let outcome = joined.unwrap_or_else(|e| {
                    error!("Prediction task failed: {}", e);
                    Err(PredictionError::Unknown)
                });
                session.complete(outcome, Instant::now())?;
                println!("{}\n", render_view(&session, width));
            }
            _ = wait_deadline(session.next_deadline()) => {
                if session.tick(Instant::now()) {
                    println!("{}\n", render_view(&session, width));
                }
            }
        }
    }

    Ok(())
}

async fn cmd_beatmap(
    config: &Config,
    client: &OsuClassyClient,
    beatmapset_id: u64,
    beatmap_id: u64,
) -> Result<()> {
    info!("Fetching beatmap {}/{}", beatmapset_id, beatmap_id);

    let Some(beatmap) = client
        .beatmap(beatmapset_id, beatmap_id)
        .await
        .context("Failed to fetch beatmap")?
    else {
        println!("{}", format_warning("Beatmap not found!"));
        return Ok(());
    };

    let projector = ResponseProjector::new(config.projection.clone());
    let scores = beatmap.scores();

    println!(
        "{}",
        render_chart(&projector.project(&scores), config.display.chart_width)
    );
    println!("\n{}", render_card(&beatmap.identity));

    let summary = projector.summary(&scores);
    if !summary.is_empty() {
        println!("\nPredicted type: {}", summary);
    }
    if !beatmap.created_at.is_empty() {
        println!(
            "Predicted at {} (updated {})",
            beatmap.created_at, beatmap.updated_at
        );
    }

    Ok(())
}

async fn cmd_beatmapset(client: &OsuClassyClient, beatmapset_id: u64) -> Result<()> {
    info!("Fetching beatmapset {}", beatmapset_id);

    let beatmaps = client
        .beatmapset(beatmapset_id)
        .await
        .context("Failed to fetch beatmapset")?;

    if beatmaps.is_empty() {
        println!("No beatmaps found for beatmapset {}", beatmapset_id);
        return Ok(());
    }

    println!("BeatmapSet {}\n", beatmapset_id);
    for beatmap in &beatmaps {
        println!("  {}", render_card_line(beatmap));
    }

    Ok(())
}

async fn cmd_listing(
    config: &Config,
    client: &OsuClassyClient,
    kind: ListingKind,
    args: ListingArgs,
) -> Result<()> {
    let limit = args.limit.unwrap_or(config.listing.page_size);
    let mut pager = BeatmapPager::starting_at(kind, args.page, limit);

    println!("{} beatmaps\n", kind);

    for _ in 0..args.pages.max(1) {
        if !pager.has_more() {
            break;
        }
        let page = pager.next_page();
        let fetched = pager
            .fetch_next(client)
            .await
            .with_context(|| format!("Failed to fetch page {}", page))?;
        for beatmap in fetched {
            println!("  {}", render_card_line(beatmap));
        }
    }

    if pager.beatmaps().is_empty() {
        println!("No beatmaps found");
    } else if !pager.has_more() {
        println!("\nNo more beatmaps");
    }

    Ok(())
}
