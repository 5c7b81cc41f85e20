use clap::{Parser, Subcommand};
use event_gallery::imaging::Quality;
use event_gallery::metadata::EventMetadata;
use event_gallery::organize::{OrganizeJob, PipelineOutcome};
use event_gallery::{config, output, sources};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Event details shared by `organize` and `check`.
#[derive(clap::Args, Clone)]
struct EventArgs {
    /// Name of the event (required)
    #[arg(long, default_value = "")]
    event_name: String,

    /// Venue; used in the folder name and page title
    #[arg(long, default_value = "")]
    venue: String,

    /// City or area of the venue
    #[arg(long, default_value = "")]
    location: String,

    /// Event date as it should appear, e.g. 2025-03-01 (required)
    #[arg(long, default_value = "")]
    date: String,

    /// Photographer credit for filenames and the page header (required)
    #[arg(long, default_value = "")]
    photographer: String,
}

impl EventArgs {
    fn metadata(&self) -> EventMetadata {
        EventMetadata::new(
            &self.event_name,
            &self.venue,
            &self.location,
            &self.date,
            &self.photographer,
        )
    }
}

/// Inputs shared by `organize` and `check`.
#[derive(clap::Args, Clone)]
struct JobArgs {
    /// Directory the event folder is created in
    #[arg(long)]
    dest: PathBuf,

    /// Thumbnail quality 0-100 (scale percentage and compression); overrides the config file
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,

    #[command(flatten)]
    event: EventArgs,

    /// Photo files and/or directories, in gallery order
    #[arg(required = true)]
    photos: Vec<PathBuf>,
}

#[derive(Parser)]
#[command(name = "event-gallery")]
#[command(about = "Organize event photos into a static web gallery")]
#[command(long_about = "\
Organize event photos into a static web gallery

Copies each photo under a photographer credit, generates thumbnails, and writes
a self-contained gallery folder:

  {dest}/{venue}-{date}/
  ├── pictures/Credit {photographer} - 1.jpg
  ├── thumbnails/Credit {photographer} - 1.webp
  ├── assets/{css,img,ico}/
  ├── event-info.txt
  └── index.html

Quality (0-100) sets both the thumbnail size as a percentage of the original
and the compression quality. Thumbnails fall back to JPEG when WebP cannot be
written.

Run 'event-gallery gen-config' to generate a documented event-gallery.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./event-gallery.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy, rename, and thumbnail photos and write the gallery
    Organize {
        #[command(flatten)]
        job: JobArgs,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate inputs and show the planned output without writing anything
    Check {
        #[command(flatten)]
        job: JobArgs,
    },
    /// Print a stock event-gallery.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "event_gallery=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Organize { job, json } => {
            let config = config::load_config(cli.config.as_deref())?;
            let job = build_job(&job, &config)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let done_tx = tx.clone();
            let worker = config.organizer().spawn(
                job,
                move |event| {
                    // The receiver outlives the worker.
                    let _ = tx.send(Message::Event(event));
                },
                move |outcome| {
                    let _ = done_tx.send(Message::Done(outcome));
                },
            );

            let mut outcome = None;
            for message in rx {
                match message {
                    Message::Event(event) if !json => output::print_event(&event),
                    Message::Event(_) => {}
                    Message::Done(o) => outcome = Some(o),
                }
            }
            if worker.join().is_err() {
                return Err("organize worker terminated unexpectedly".into());
            }
            let outcome = outcome.ok_or("organize worker finished without an outcome")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_outcome(&outcome);
            }
            Ok(exit_code(&outcome))
        }
        Command::Check { job } => {
            let config = config::load_config(cli.config.as_deref())?;
            let job = build_job(&job, &config)?;
            let plan = config.organizer().plan(&job)?;
            output::print_plan(&plan, &job.metadata, job.quality);
            println!("==> Inputs are valid");
            Ok(ExitCode::SUCCESS)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

enum Message {
    Event(event_gallery::organize::OrganizeEvent),
    Done(PipelineOutcome),
}

fn build_job(
    args: &JobArgs,
    config: &config::OrganizerConfig,
) -> Result<OrganizeJob, sources::SourceError> {
    let photos = sources::expand(&args.photos)?;
    let quality = args.quality.map(Quality::new).unwrap_or_else(|| config.quality());
    Ok(OrganizeJob {
        photos,
        metadata: args.event.metadata(),
        quality,
        destination_root: args.dest.clone(),
    })
}

fn exit_code(outcome: &PipelineOutcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
