//! CLI output formatting for organize runs.
//!
//! # Information-First Display
//!
//! Every photo is shown by its positional index and produced name, with the
//! source path as an indented context line. This reads as an inventory of
//! the gallery while still tracing each entry back to its original file.
//!
//! # Output Format
//!
//! ## Organize
//!
//! ```text
//! ==> Layout ready
//! ==> Processing photos
//!     001 Credit J. Doe - 1.png
//!         Source: /photos/a.png
//!         Thumbnail: Credit J. Doe - 1.webp (WebP)
//! ==> Writing gallery
//! ==> Gallery ready: /out/civic-hall-2025-03-01
//! ```
//!
//! ## Check
//!
//! ```text
//! Civic Hall, Metropolis - Launch
//!     Destination: /out/civic-hall-2025-03-01
//!     Quality: 80
//! Photos
//! 001 Credit J. Doe - 1.png
//!     Source: /photos/a.png
//!
//! 1 photo, 2 progress units
//! ```
//!
//! # Architecture
//!
//! Each kind of output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::Quality;
use crate::metadata::EventMetadata;
use crate::organize::{OrganizeEvent, OrganizePlan, PipelineOutcome, Stage};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

// ============================================================================
// Organize events
// ============================================================================

/// Format a single pipeline event as display lines.
///
/// Progress ticks produce no lines; the per-photo entries already show how
/// far the run has come.
pub fn format_event(event: &OrganizeEvent) -> Vec<String> {
    match event {
        OrganizeEvent::Stage(stage) => {
            let label = match stage {
                Stage::LayoutReady => "Layout ready",
                Stage::Processing => "Processing photos",
                Stage::Finalizing => "Writing gallery",
            };
            vec![format!("==> {}", label)]
        }
        OrganizeEvent::Progress { .. } => Vec::new(),
        OrganizeEvent::PhotoOrganized {
            index,
            source,
            picture,
            thumbnail,
            format,
        } => vec![
            format!("    {} {}", format_index(*index), file_name(picture)),
            format!("        Source: {}", source.display()),
            format!("        Thumbnail: {} ({})", file_name(thumbnail), format),
        ],
        OrganizeEvent::Warning { message } => vec![format!("warning: {}", message)],
    }
}

/// Print an event to stdout.
pub fn print_event(event: &OrganizeEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Outcome
// ============================================================================

pub fn format_outcome(outcome: &PipelineOutcome) -> Vec<String> {
    match outcome {
        PipelineOutcome::Success { destination } => {
            vec![format!("==> Gallery ready: {}", destination.display())]
        }
        PipelineOutcome::Failure { message } => vec![message.clone()],
    }
}

/// Print an outcome: success to stdout, failure to stderr.
pub fn print_outcome(outcome: &PipelineOutcome) {
    for line in format_outcome(outcome) {
        if outcome.is_success() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the planned run for the `check` command.
pub fn format_plan(plan: &OrganizePlan, metadata: &EventMetadata, quality: Quality) -> Vec<String> {
    let mut lines = vec![
        metadata.header_title(),
        format!("    Destination: {}", plan.layout.root.display()),
        format!("    Quality: {}", quality.value()),
        "Photos".to_string(),
    ];
    for photo in &plan.photos {
        lines.push(format!("{} {}", format_index(photo.index), photo.filename));
        lines.push(format!("    Source: {}", photo.source.display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(plan.photos.len(), "photo"),
        plural(plan.total_units, "progress unit")
    ));
    lines
}

pub fn print_plan(plan: &OrganizePlan, metadata: &EventMetadata, quality: Quality) {
    for line in format_plan(plan, metadata, quality) {
        println!("{}", line);
    }
}
