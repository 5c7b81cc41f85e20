//! Gallery document generation.
//!
//! Final stage of an organize run. Takes the produced filenames (in input
//! order) and writes one static `index.html` that hands them to
//! [nanogallery2](https://nanogallery2.nanostudio.org/) on the client.
//!
//! ## Document structure
//!
//! - **Head**: nanogallery2 stylesheet (CDN), `assets/css/global.css`,
//!   `assets/ico/favicon.svg`, and an inline style block
//! - **Header**: `© {year} {photographer}` and the event header title
//! - **Gallery**: an empty `#nanogallery2` mount point
//! - **Footer**: optional back link
//! - **Scripts**: jQuery and nanogallery2 (CDN), then the gallery
//!   configuration: one item per photo followed by fixed display options
//!
//! The display options (mosaic layouts, breakpoints, random ordering) live in
//! `static/gallery-options.js` and are injected verbatim. The only data-driven
//! part of the script is the item list.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Metadata text is escaped by maud; filenames embedded in the script are
//! escaped with [`escape_js_single_quoted`].

use crate::layout::DestinationLayout;
use crate::metadata::EventMetadata;
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const GALLERY_VERSION: &str = "3.0.5";
const JQUERY_VERSION: &str = "3.6.0";

const HEAD_CSS: &str = include_str!("../static/gallery-head.css");
const GALLERY_OPTIONS: &str = include_str!("../static/gallery-options.js");

#[derive(Error, Debug)]
#[error("could not write gallery document {}: {source}", path.display())]
pub struct GenerateError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// One photo as the gallery sees it: filenames relative to `pictures/` and
/// `thumbnails/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub picture: String,
    pub thumbnail: String,
}

/// Footer link back to wherever the gallery is listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackLink {
    pub url: String,
    pub label: String,
}

/// Escape text for a single-quoted JavaScript string literal.
///
/// Backslashes first, then quotes. Line breaks and `<` are escaped too so a
/// filename can never end the literal or the enclosing `<script>`.
pub fn escape_js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            _ => out.push(c),
        }
    }
    out
}

fn cdn(path: &str) -> String {
    format!("https://cdnjs.cloudflare.com/ajax/libs/{path}")
}

/// The inline gallery script: item list plus static display options.
pub fn gallery_script(items: &[GalleryItem]) -> String {
    let entries: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "            {{ src: 'pictures/{}', srct: 'thumbnails/{}', title: '', description: '' }}",
                escape_js_single_quoted(&item.picture),
                escape_js_single_quoted(&item.thumbnail),
            )
        })
        .collect();

    let mut script = String::new();
    script.push_str("\n$(document).ready(function() {\n");
    script.push_str("    $(\"#nanogallery2\").nanogallery2({\n");
    script.push_str("        items: [\n");
    script.push_str(&entries.join(",\n"));
    if !entries.is_empty() {
        script.push('\n');
    }
    script.push_str("        ],\n");
    script.push_str(GALLERY_OPTIONS);
    script.push_str("    });\n");
    script.push_str("});\n");
    script
}

/// Render the full gallery document.
pub fn render_document(
    metadata: &EventMetadata,
    items: &[GalleryItem],
    year: i32,
    back_link: Option<&BackLink>,
) -> Markup {
    let title = metadata.header_title();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" type="image/svg+xml" href="assets/ico/favicon.svg";
                meta http-equiv="X-Content-Type-Options" content="nosniff";
                meta http-equiv="X-Frame-Options" content="SAMEORIGIN";
                meta name="referrer" content="no-referrer-when-downgrade";
                link href=(cdn(&format!("nanogallery2/{GALLERY_VERSION}/css/nanogallery2.min.css"))) rel="stylesheet";
                link rel="stylesheet" type="text/css" href="assets/css/global.css";
                style { (PreEscaped(HEAD_CSS)) }
            }
            body {
                (render_header(metadata, &title, year))
                div #gallery-container {
                    div #nanogallery2 {}
                }
                div #footer {
                    @if let Some(link) = back_link {
                        p.index { a href=(link.url) { (link.label) } }
                    }
                }
                script src=(cdn(&format!("jquery/{JQUERY_VERSION}/jquery.min.js"))) {}
                script src=(cdn(&format!("nanogallery2/{GALLERY_VERSION}/jquery.nanogallery2.min.js"))) {}
                script { (PreEscaped(gallery_script(items))) }
            }
        }
    }
}

fn render_header(metadata: &EventMetadata, title: &str, year: i32) -> Markup {
    html! {
        div #header {
            div #headerinfo1 {
                h2 { "Photographer:" (PreEscaped("&nbsp;")) }
                h3 { "© " (year) " " (metadata.photographer()) }
            }
            h1 { (title) }
        }
    }
}

/// Render and write `index.html` into the layout root, stamped with the
/// current local year.
pub fn write_document(
    layout: &DestinationLayout,
    metadata: &EventMetadata,
    items: &[GalleryItem],
    back_link: Option<&BackLink>,
) -> Result<PathBuf, GenerateError> {
    let year = chrono::Local::now().year();
    let path = layout.document_path();
    let html = render_document(metadata, items, year, back_link).into_string();
    fs::write(&path, html).map_err(|source| GenerateError {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("wrote {} ({} items)", path.display(), items.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ensure_layout;
    use crate::test_helpers::sample_metadata;
    use tempfile::TempDir;

    fn item(picture: &str, thumbnail: &str) -> GalleryItem {
        GalleryItem {
            picture: picture.to_string(),
            thumbnail: thumbnail.to_string(),
        }
    }

    fn sample_items() -> Vec<GalleryItem> {
        vec![
            item("Credit J. Doe - 1.png", "Credit J. Doe - 1.webp"),
            item("Credit J. Doe - 2.JPG", "Credit J. Doe - 2.jpg"),
            item("Credit J. Doe - 3.gif", "Credit J. Doe - 3.webp"),
        ]
    }

    fn render(items: &[GalleryItem], back_link: Option<&BackLink>) -> String {
        render_document(&sample_metadata(), items, 2025, back_link).into_string()
    }

    // =========================================================================
    // Escaping
    // =========================================================================

    #[test]
    fn escapes_backslash_before_quote() {
        assert_eq!(escape_js_single_quoted(r"a\b"), r"a\\b");
        assert_eq!(escape_js_single_quoted("O'Brien"), r"O\'Brien");
        assert_eq!(escape_js_single_quoted(r"\'"), r"\\\'");
    }

    #[test]
    fn escapes_script_terminators() {
        assert_eq!(escape_js_single_quoted("</script>"), r"\x3C/script>");
        assert_eq!(escape_js_single_quoted("a\nb"), r"a\nb");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(
            escape_js_single_quoted("Credit J. Doe - 1.png"),
            "Credit J. Doe - 1.png"
        );
    }

    // =========================================================================
    // Script
    // =========================================================================

    #[test]
    fn script_lists_items_in_order() {
        let script = gallery_script(&sample_items());
        let first = script.find("pictures/Credit J. Doe - 1.png").unwrap();
        let second = script.find("pictures/Credit J. Doe - 2.JPG").unwrap();
        let third = script.find("pictures/Credit J. Doe - 3.gif").unwrap();
        assert!(first < second && second < third);
        assert_eq!(script.matches("{ src: ").count(), 3);
    }

    #[test]
    fn script_thumbnail_uses_recorded_extension() {
        let script = gallery_script(&sample_items());
        assert!(script.contains("srct: 'thumbnails/Credit J. Doe - 1.webp'"));
        assert!(script.contains("srct: 'thumbnails/Credit J. Doe - 2.jpg'"));
    }

    #[test]
    fn script_separates_items_without_trailing_comma() {
        let script = gallery_script(&sample_items());
        assert_eq!(script.matches("description: '' },\n").count(), 2);
        assert!(script.contains("description: '' }\n        ],"));
    }

    #[test]
    fn script_escapes_filenames() {
        let script = gallery_script(&[item("Credit O'Neil - 1.jpg", "Credit O'Neil - 1.webp")]);
        assert!(script.contains(r"src: 'pictures/Credit O\'Neil - 1.jpg'"));
    }

    #[test]
    fn script_carries_static_options() {
        let script = gallery_script(&[]);
        assert!(script.contains("items: [\n        ],"));
        assert!(script.contains("thumbnailDisplayOrder: 'random'"));
        assert!(script.contains("galleryMosaicXS"));
        assert!(script.contains("breakpointSizeXL: 1200"));
    }

    // =========================================================================
    // Document
    // =========================================================================

    #[test]
    fn document_starts_with_doctype() {
        assert!(render(&sample_items(), None).starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn document_head_references() {
        let html = render(&sample_items(), None);
        assert!(html.contains("nanogallery2/3.0.5/css/nanogallery2.min.css"));
        assert!(html.contains("jquery/3.6.0/jquery.min.js"));
        assert!(html.contains("nanogallery2/3.0.5/jquery.nanogallery2.min.js"));
        assert!(html.contains(r#"href="assets/css/global.css""#));
        assert!(html.contains(r#"href="assets/ico/favicon.svg""#));
        assert!(html.contains("#headerinfo1"));
    }

    #[test]
    fn document_header_and_title() {
        let html = render(&sample_items(), None);
        assert!(html.contains("<title>Civic Hall, Metropolis - Launch</title>"));
        assert!(html.contains("<h1>Civic Hall, Metropolis - Launch</h1>"));
        assert!(html.contains("© 2025 J. Doe"));
        assert!(html.contains(r#"<div id="nanogallery2"></div>"#));
    }

    #[test]
    fn document_escapes_metadata() {
        let metadata = EventMetadata::new("<b>Launch</b>", "", "", "2025-03-01", "A & B");
        let html = render_document(&metadata, &[], 2025, None).into_string();
        assert!(html.contains("&lt;b&gt;Launch&lt;/b&gt;"));
        assert!(html.contains("© 2025 A &amp; B"));
    }

    #[test]
    fn back_link_is_optional() {
        let without = render(&[], None);
        assert!(!without.contains(r#"class="index""#));

        let link = BackLink {
            url: "https://example.com/shows".to_string(),
            label: "Go Back".to_string(),
        };
        let with = render(&[], Some(&link));
        assert!(with.contains(r#"<a href="https://example.com/shows">Go Back</a>"#));
    }

    #[test]
    fn write_document_into_layout() {
        let tmp = TempDir::new().unwrap();
        let layout = ensure_layout(tmp.path(), "event").unwrap();
        let path = write_document(&layout, &sample_metadata(), &sample_items(), None).unwrap();
        assert_eq!(path, layout.root.join("index.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Credit J. Doe - 3.gif"));
    }

    #[test]
    fn write_document_reports_path_on_failure() {
        let tmp = TempDir::new().unwrap();
        let layout = DestinationLayout::plan(tmp.path(), "missing");
        let err = write_document(&layout, &sample_metadata(), &[], None).unwrap_err();
        assert_eq!(err.path, layout.document_path());
    }
}
