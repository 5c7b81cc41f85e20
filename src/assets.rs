//! Static resources copied into every gallery, and the event summary file.
//!
//! ## Manifest
//!
//! | Resource | Destination |
//! |---|---|
//! | `global.css` | `assets/css/` |
//! | `previous.gif`, `previous_active.gif`, `404-panda.png`, `header1.png` | `assets/img/` |
//! | `favicon.svg` | `assets/ico/` |
//!
//! Resources come from a [`ResourceSource`]: the set compiled into the
//! binary ([`EmbeddedResources`]) or a directory with the same
//! `assets/{css,img,ico}/` structure ([`DirectoryResources`]). A manifest
//! entry the source cannot supply is a packaging defect and is reported as
//! [`AssetError::Missing`], distinct from ordinary I/O failures.
//!
//! ## Summary file
//!
//! `event-info.txt` lists the event details, the photo count, and when the
//! gallery was organized. Failing to write it never fails a run; the caller
//! decides how to report it.

use crate::layout::{AssetDir, DestinationLayout};
use crate::metadata::EventMetadata;
use chrono::NaiveDateTime;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Timestamp format of the `Organized on:` line.
pub const SUMMARY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("bundled resource not found: {resource} (looked in {origin})")]
    Missing { resource: String, origin: String },
    #[error("could not read bundled resource {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One entry of the fixed resource manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledAsset {
    pub dir: AssetDir,
    pub name: &'static str,
}

impl BundledAsset {
    const fn new(dir: AssetDir, name: &'static str) -> Self {
        Self { dir, name }
    }

    /// Path of the resource relative to a resource root, e.g. `assets/img/header1.png`.
    pub fn resource_path(&self) -> String {
        format!("assets/{}/{}", self.dir.name(), self.name)
    }
}

/// Every resource a gallery needs.
pub const MANIFEST: &[BundledAsset] = &[
    BundledAsset::new(AssetDir::Css, "global.css"),
    BundledAsset::new(AssetDir::Img, "previous.gif"),
    BundledAsset::new(AssetDir::Img, "previous_active.gif"),
    BundledAsset::new(AssetDir::Img, "404-panda.png"),
    BundledAsset::new(AssetDir::Img, "header1.png"),
    BundledAsset::new(AssetDir::Ico, "favicon.svg"),
];

/// Where bundled resource bytes come from.
pub trait ResourceSource: Send + Sync {
    /// Human-readable origin for error messages.
    fn origin(&self) -> String;

    /// Bytes of the resource at `resource_path`, or `None` if it is not part
    /// of this source.
    fn load(&self, resource_path: &str) -> Result<Option<Cow<'static, [u8]>>, AssetError>;
}

/// Resources compiled into the binary from `static/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    fn bytes(resource_path: &str) -> Option<&'static [u8]> {
        match resource_path {
            "assets/css/global.css" => {
                Some(include_bytes!("../static/assets/css/global.css").as_slice())
            }
            "assets/img/previous.gif" => {
                Some(include_bytes!("../static/assets/img/previous.gif").as_slice())
            }
            "assets/img/previous_active.gif" => {
                Some(include_bytes!("../static/assets/img/previous_active.gif").as_slice())
            }
            "assets/img/404-panda.png" => {
                Some(include_bytes!("../static/assets/img/404-panda.png").as_slice())
            }
            "assets/img/header1.png" => {
                Some(include_bytes!("../static/assets/img/header1.png").as_slice())
            }
            "assets/ico/favicon.svg" => {
                Some(include_bytes!("../static/assets/ico/favicon.svg").as_slice())
            }
            _ => None,
        }
    }
}

impl ResourceSource for EmbeddedResources {
    fn origin(&self) -> String {
        "embedded resources".to_string()
    }

    fn load(&self, resource_path: &str) -> Result<Option<Cow<'static, [u8]>>, AssetError> {
        Ok(Self::bytes(resource_path).map(Cow::Borrowed))
    }
}

/// Resources read from a directory laid out like `static/`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceSource for DirectoryResources {
    fn origin(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self, resource_path: &str) -> Result<Option<Cow<'static, [u8]>>, AssetError> {
        let path = self.root.join(resource_path);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(Cow::Owned(bytes))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AssetError::Read { path, source }),
        }
    }
}

fn load_required(
    resources: &dyn ResourceSource,
    asset: &BundledAsset,
) -> Result<Cow<'static, [u8]>, AssetError> {
    let resource = asset.resource_path();
    resources
        .load(&resource)?
        .ok_or_else(|| AssetError::Missing {
            resource,
            origin: resources.origin(),
        })
}

/// Check that every manifest entry resolves, without writing anything.
pub fn verify_resources(resources: &dyn ResourceSource) -> Result<(), AssetError> {
    for asset in MANIFEST {
        load_required(resources, asset)?;
    }
    Ok(())
}

/// Copy every manifest entry into the layout, overwriting existing files.
///
/// Returns the written paths in manifest order.
pub fn copy_static_assets(
    layout: &DestinationLayout,
    resources: &dyn ResourceSource,
) -> Result<Vec<PathBuf>, AssetError> {
    let mut written = Vec::with_capacity(MANIFEST.len());
    for asset in MANIFEST {
        let bytes = load_required(resources, asset)?;
        let dest = layout.asset_dir(asset.dir).join(asset.name);
        fs::write(&dest, &bytes).map_err(|source| AssetError::Write {
            path: dest.clone(),
            source,
        })?;
        tracing::debug!("copied {} → {}", asset.resource_path(), dest.display());
        written.push(dest);
    }
    Ok(written)
}

/// Render the summary text for a run.
pub fn format_summary(
    metadata: &EventMetadata,
    photo_count: usize,
    organized_on: NaiveDateTime,
) -> String {
    let lines = [
        format!("Event Name: {}", metadata.event_name()),
        format!("Venue: {}", metadata.venue_or_placeholder()),
        format!("Location: {}", metadata.location_or_placeholder()),
        format!("Event Date: {}", metadata.event_date()),
        format!("Photographer: {}", metadata.photographer()),
        format!("Number of Photos: {}", photo_count),
        format!(
            "Organized on: {}",
            organized_on.format(SUMMARY_TIMESTAMP_FORMAT)
        ),
    ];
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write `event-info.txt` stamped with the current local time.
pub fn write_metadata_summary(
    layout: &DestinationLayout,
    metadata: &EventMetadata,
    photo_count: usize,
) -> io::Result<PathBuf> {
    let now = chrono::Local::now().naive_local();
    let path = layout.summary_path();
    write_summary_to(&path, &format_summary(metadata, photo_count, now))?;
    Ok(path)
}

fn write_summary_to(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text)
}
