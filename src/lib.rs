//! # Event Gallery
//!
//! Organizes one event's photos into a self-contained static gallery: renamed
//! full-size copies with a photographer credit, scaled thumbnails, bundled
//! styling assets, a plain-text summary, and an `index.html` driving a
//! client-side [nanogallery2](https://nanogallery2.nanostudio.org/) viewer.
//!
//! # Pipeline
//!
//! ```text
//! photos + metadata + quality
//!     │
//!     ▼
//! layout      {root}/{venue-date}/{pictures,thumbnails,assets/{css,img,ico}}
//!     │
//!     ▼
//! per photo   copy → pictures/      thumbnail → thumbnails/      (in input order)
//!     │
//!     ▼
//! finalize    assets/ + event-info.txt + index.html
//! ```
//!
//! The whole run lives in [`organize::Organizer`]. It can run on the calling
//! thread or on a background worker that reports progress events and exactly
//! one terminal [`organize::PipelineOutcome`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Event details entered before a run; derived folder name and header title |
//! | [`naming`] | Folder, credit, and thumbnail filename rules |
//! | [`imaging`] | Decode, scale by quality, encode WebP with JPEG fallback |
//! | [`layout`] | Destination directory tree |
//! | [`assets`] | Bundled CSS/images/icon and the `event-info.txt` summary |
//! | [`generate`] | The gallery `index.html`, rendered with Maud |
//! | [`organize`] | The pipeline and its background worker |
//! | [`sources`] | Expands command-line files and directories into a photo list |
//! | [`config`] | Optional `event-gallery.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Quality Knob
//!
//! A single 0-100 value sets both the thumbnail's linear scale and the lossy
//! encoder's quality. At 100 thumbnails keep the original resolution.
//!
//! ## Thumbnail Format Is Reported, Not Assumed
//!
//! Thumbnails are WebP when the encoder can produce them and JPEG otherwise.
//! The format actually written is recorded per photo and flows into the
//! thumbnail filename and the gallery script, so a fallback on one photo never
//! produces a dangling reference.
//!
//! ## Embedded Resources
//!
//! Stylesheet, images, icon, and the gallery's static options are compiled
//! into the binary. A directory can replace the built-in resources, but every
//! file in the manifest must then be present there.

pub mod assets;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod layout;
pub mod metadata;
pub mod naming;
pub mod organize;
pub mod output;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_helpers;
