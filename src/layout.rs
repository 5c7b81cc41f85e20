//! Destination directory tree.
//!
//! ```text
//! {root}/{folder}/
//! ├── pictures/        # renamed full-size copies
//! ├── thumbnails/      # scaled, re-encoded previews
//! └── assets/
//!     ├── css/
//!     ├── img/
//!     └── ico/
//! ```
//!
//! Every directory exists before the first file is written. Creating the
//! layout again over an existing tree is a no-op.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("could not create directory {}: {source}", path.display())]
pub struct LayoutError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Subdirectory of `assets/` a bundled resource belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetDir {
    Css,
    Img,
    Ico,
}

impl AssetDir {
    pub fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Img => "img",
            Self::Ico => "ico",
        }
    }
}

/// Resolved paths of one organize run's output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLayout {
    pub root: PathBuf,
    pub pictures: PathBuf,
    pub thumbnails: PathBuf,
    pub assets: PathBuf,
}

impl DestinationLayout {
    /// Compute the layout under `destination_root` without touching disk.
    pub fn plan(destination_root: &Path, folder_name: &str) -> Self {
        let root = destination_root.join(folder_name);
        Self {
            pictures: root.join("pictures"),
            thumbnails: root.join("thumbnails"),
            assets: root.join("assets"),
            root,
        }
    }

    pub fn asset_dir(&self, dir: AssetDir) -> PathBuf {
        self.assets.join(dir.name())
    }

    /// Every directory of the layout, parents before children.
    pub fn directories(&self) -> Vec<PathBuf> {
        vec![
            self.root.clone(),
            self.pictures.clone(),
            self.thumbnails.clone(),
            self.asset_dir(AssetDir::Css),
            self.asset_dir(AssetDir::Img),
            self.asset_dir(AssetDir::Ico),
        ]
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join("index.html")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join("event-info.txt")
    }
}

/// Create (or confirm) the full layout for `folder_name` under `destination_root`.
pub fn ensure_layout(
    destination_root: &Path,
    folder_name: &str,
) -> Result<DestinationLayout, LayoutError> {
    let layout = DestinationLayout::plan(destination_root, folder_name);
    for dir in layout.directories() {
        std::fs::create_dir_all(&dir).map_err(|source| LayoutError {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(layout)
}
