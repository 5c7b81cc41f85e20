//! The organize pipeline.
//!
//! Turns an ordered list of source photos plus event metadata into a gallery
//! bundle under `{destination_root}/{folder_name}/`.
//!
//! ## Stages
//!
//! ```text
//! Idle ─▶ LayoutReady ─▶ Processing(1..=N) ─▶ Finalizing ─▶ Done(Success | Failure)
//! ```
//!
//! - **LayoutReady**: every output directory exists and every bundled
//!   resource resolves. Nothing else has been written yet.
//! - **Processing**: one photo at a time, in input order. The original bytes
//!   are copied into `pictures/` (one progress unit), then a thumbnail is
//!   generated into `thumbnails/` (one progress unit).
//! - **Finalizing**: bundled assets, the `event-info.txt` summary, and
//!   `index.html`.
//!
//! Any fatal error ends the run. Files already written stay on disk. A failed
//! summary write is reported as [`OrganizeEvent::Warning`] and the run still
//! succeeds.
//!
//! ## Threading
//!
//! [`Organizer::run`] executes on the calling thread. [`Organizer::spawn`]
//! runs the same pipeline on a dedicated worker thread: events are delivered
//! through the `on_event` callback from that thread, and `on_complete`
//! receives exactly one [`PipelineOutcome`], even if the pipeline panics.

use crate::assets::{self, AssetError, EmbeddedResources, ResourceSource};
use crate::generate::{self, BackLink, GalleryItem, GenerateError};
use crate::imaging::{EncoderChain, Quality, ThumbnailError, ThumbnailFormat, generate_thumbnail};
use crate::layout::{self, DestinationLayout, LayoutError};
use crate::metadata::EventMetadata;
use crate::naming;
use serde::Serialize;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Prefix of every failure message delivered to the caller.
pub const FAILURE_PREFIX: &str = "Error processing photos: ";

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("{0}")]
    InvalidJob(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("could not read source photo {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("could not encode thumbnail for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: crate::imaging::CodecError,
    },
    #[error(transparent)]
    BundledResource(AssetError),
    #[error("could not write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Document(#[from] GenerateError),
}

impl From<AssetError> for OrganizeError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Write { path, source } => Self::OutputWrite { path, source },
            other => Self::BundledResource(other),
        }
    }
}

/// Everything an organize run needs from its caller.
#[derive(Debug, Clone)]
pub struct OrganizeJob {
    /// Source photos in display order. Duplicates are allowed.
    pub photos: Vec<PathBuf>,
    pub metadata: EventMetadata,
    pub quality: Quality,
    pub destination_root: PathBuf,
}

impl OrganizeJob {
    /// Progress units of a full run: one copy and one thumbnail per photo.
    pub fn total_units(&self) -> usize {
        self.photos.len() * 2
    }

    fn validate(&self) -> Result<(), OrganizeError> {
        if self.photos.is_empty() {
            return Err(OrganizeError::InvalidJob("no photos selected".to_string()));
        }
        let missing = self.metadata.missing_fields();
        if !missing.is_empty() {
            return Err(OrganizeError::InvalidJob(format!(
                "missing required event details: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

/// Pipeline state transitions reported as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LayoutReady,
    Processing,
    Finalizing,
}

/// Events emitted while a run is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum OrganizeEvent {
    Stage(Stage),
    /// Monotonic; the last tick of a successful run has `done == total`.
    Progress { done: usize, total: usize },
    PhotoOrganized {
        index: usize,
        source: PathBuf,
        picture: PathBuf,
        thumbnail: PathBuf,
        format: ThumbnailFormat,
    },
    /// A recoverable problem. The run continues.
    Warning { message: String },
}

/// One photo as written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedPhoto {
    pub source: PathBuf,
    /// Filename under `pictures/`.
    pub filename: String,
    /// Filename under `thumbnails/`.
    pub thumbnail_filename: String,
    pub format: ThumbnailFormat,
    pub width: u32,
    pub height: u32,
}

impl ProducedPhoto {
    pub fn gallery_item(&self) -> GalleryItem {
        GalleryItem {
            picture: self.filename.clone(),
            thumbnail: self.thumbnail_filename.clone(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct OrganizeReport {
    pub destination: PathBuf,
    pub photos: Vec<ProducedPhoto>,
    pub document: PathBuf,
    /// `None` when the summary could not be written.
    pub summary: Option<PathBuf>,
}

/// Terminal result of a run, delivered exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Success { destination: PathBuf },
    Failure { message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    fn failure(detail: impl std::fmt::Display) -> Self {
        Self::Failure {
            message: format!("{FAILURE_PREFIX}{detail}"),
        }
    }
}

impl From<Result<OrganizeReport, OrganizeError>> for PipelineOutcome {
    fn from(result: Result<OrganizeReport, OrganizeError>) -> Self {
        match result {
            Ok(report) => Self::Success {
                destination: report.destination,
            },
            Err(err) => Self::failure(err),
        }
    }
}

/// One photo as it will be written, computed without touching disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPhoto {
    pub index: usize,
    pub source: PathBuf,
    pub filename: String,
}

/// What a run would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizePlan {
    pub layout: DestinationLayout,
    pub photos: Vec<PlannedPhoto>,
    pub total_units: usize,
}

/// Configured pipeline. Reusable across runs.
pub struct Organizer {
    encoders: EncoderChain,
    resources: Box<dyn ResourceSource>,
    back_link: Option<BackLink>,
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Organizer {
    /// WebP with JPEG fallback, embedded resources, no back link.
    pub fn new() -> Self {
        Self {
            encoders: EncoderChain::standard(),
            resources: Box::new(EmbeddedResources),
            back_link: None,
        }
    }

    pub fn with_encoders(mut self, encoders: EncoderChain) -> Self {
        self.encoders = encoders;
        self
    }

    pub fn with_resources(mut self, resources: Box<dyn ResourceSource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_back_link(mut self, back_link: Option<BackLink>) -> Self {
        self.back_link = back_link;
        self
    }

    /// Validate a job and compute its output names. Writes nothing.
    pub fn plan(&self, job: &OrganizeJob) -> Result<OrganizePlan, OrganizeError> {
        job.validate()?;
        let layout =
            DestinationLayout::plan(&job.destination_root, &job.metadata.folder_name());
        let photos = job
            .photos
            .iter()
            .enumerate()
            .map(|(i, source)| PlannedPhoto {
                index: i + 1,
                source: source.clone(),
                filename: picture_filename(&job.metadata, i + 1, source),
            })
            .collect();
        Ok(OrganizePlan {
            layout,
            photos,
            total_units: job.total_units(),
        })
    }

    /// Run the pipeline on the calling thread.
    pub fn run(
        &self,
        job: &OrganizeJob,
        on_event: &mut dyn FnMut(OrganizeEvent),
    ) -> Result<OrganizeReport, OrganizeError> {
        job.validate()?;

        let layout = layout::ensure_layout(&job.destination_root, &job.metadata.folder_name())?;
        assets::verify_resources(self.resources.as_ref())?;
        tracing::debug!("layout ready at {}", layout.root.display());
        on_event(OrganizeEvent::Stage(Stage::LayoutReady));

        on_event(OrganizeEvent::Stage(Stage::Processing));
        let total = job.total_units();
        let mut done = 0;
        let mut produced = Vec::with_capacity(job.photos.len());

        for (i, source) in job.photos.iter().enumerate() {
            let index = i + 1;
            let bytes = fs::read(source).map_err(|e| OrganizeError::SourceRead {
                path: source.clone(),
                source: Box::new(e),
            })?;

            let filename = picture_filename(&job.metadata, index, source);
            let picture = layout.pictures.join(&filename);
            write_output(&picture, &bytes)?;
            done += 1;
            on_event(OrganizeEvent::Progress { done, total });

            let thumb = generate_thumbnail(&self.encoders, &bytes, job.quality).map_err(
                |err| match err {
                    ThumbnailError::Decode(e) => OrganizeError::SourceRead {
                        path: source.clone(),
                        source: Box::new(e),
                    },
                    ThumbnailError::Encode(e) => OrganizeError::Encode {
                        path: source.clone(),
                        source: e,
                    },
                },
            )?;
            let thumbnail_filename = naming::thumbnail_filename(&filename, thumb.extension());
            let thumbnail = layout.thumbnails.join(&thumbnail_filename);
            write_output(&thumbnail, &thumb.bytes)?;
            done += 1;
            on_event(OrganizeEvent::Progress { done, total });

            tracing::debug!(
                "{} → {} ({}x{} {})",
                source.display(),
                filename,
                thumb.width,
                thumb.height,
                thumb.format
            );
            on_event(OrganizeEvent::PhotoOrganized {
                index,
                source: source.clone(),
                picture,
                thumbnail,
                format: thumb.format,
            });
            produced.push(ProducedPhoto {
                source: source.clone(),
                filename,
                thumbnail_filename,
                format: thumb.format,
                width: thumb.width,
                height: thumb.height,
            });
        }

        on_event(OrganizeEvent::Stage(Stage::Finalizing));
        assets::copy_static_assets(&layout, self.resources.as_ref())?;

        let summary = match assets::write_metadata_summary(&layout, &job.metadata, produced.len())
        {
            Ok(path) => Some(path),
            Err(e) => {
                let message = format!(
                    "could not write {}: {}",
                    layout.summary_path().display(),
                    e
                );
                tracing::warn!("{}", message);
                on_event(OrganizeEvent::Warning { message });
                None
            }
        };

        let items: Vec<GalleryItem> = produced.iter().map(ProducedPhoto::gallery_item).collect();
        let document =
            generate::write_document(&layout, &job.metadata, &items, self.back_link.as_ref())?;

        Ok(OrganizeReport {
            destination: layout.root,
            photos: produced,
            document,
            summary,
        })
    }

    /// Run the pipeline on a background thread.
    ///
    /// `on_event` is called from the worker thread for every event.
    /// `on_complete` is called exactly once, from the worker thread, after
    /// the last event.
    pub fn spawn<E, C>(self, job: OrganizeJob, on_event: E, on_complete: C) -> JoinHandle<()>
    where
        E: FnMut(OrganizeEvent) + Send + 'static,
        C: FnOnce(PipelineOutcome) + Send + 'static,
    {
        thread::spawn(move || {
            let mut on_event = on_event;
            let result = panic::catch_unwind(AssertUnwindSafe(|| self.run(&job, &mut on_event)));
            let outcome = match result {
                Ok(result) => PipelineOutcome::from(result),
                Err(payload) => {
                    let detail = panic_message(payload.as_ref());
                    tracing::warn!("organize worker panicked: {}", detail);
                    PipelineOutcome::failure(detail)
                }
            };
            on_complete(outcome);
        })
    }
}

fn picture_filename(metadata: &EventMetadata, index: usize, source: &Path) -> String {
    naming::output_filename(metadata.photographer(), index, &naming::source_extension(source))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OrganizeError> {
    fs::write(path, bytes).map_err(|source| OrganizeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error".to_string()
    }
}
