//! Naming policy for everything the organizer writes.
//!
//! All names are derived from event metadata and the position of a photo in
//! the selection, never from file contents. Same input, same names.
//!
//! ## Output names
//!
//! ```text
//! venue "Civic Hall", date "2025-03-01"   →  civic-hall-2025-03-01/
//! photographer "J. Doe", #1, "a.png"      →  Credit J. Doe - 1.png
//! thumbnail of the above (WebP encoder)   →  Credit J. Doe - 1.webp
//! ```

/// Extension used when a source filename carries none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Replace every character outside `[A-Za-z0-9-_]` with `-`.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Destination folder name: `lowercase(sanitize(venue) + "-" + date)`.
///
/// The date goes through the same character filter as the venue so the
/// result is always a single path component made of `[a-z0-9-_]`.
/// For `YYYY-MM-DD` dates this changes nothing. Other separators are not kept:
/// `2025.03.01` and `2025/03/01` both become `2025-03-01`.
pub fn folder_name(venue: &str, event_date: &str) -> String {
    format!("{}-{}", sanitize(venue), sanitize(event_date)).to_lowercase()
}

/// Gallery header: `"<venue>, <location> - <event name>"`.
///
/// Empty venue or location segments are dropped together with their
/// separators:
/// - `("Civic Hall", "Metropolis", "Launch")` → `"Civic Hall, Metropolis - Launch"`
/// - `("", "Metropolis", "Launch")` → `"Metropolis - Launch"`
/// - `("", "", "Launch")` → `"Launch"`
pub fn header_title(venue: &str, location: &str, event_name: &str) -> String {
    let place: Vec<&str> = [venue, location]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if place.is_empty() {
        event_name.to_string()
    } else {
        format!("{} - {}", place.join(", "), event_name)
    }
}

/// Extension of a filename: everything after the last `.`, provided the dot
/// is not the first character. Otherwise [`DEFAULT_EXTENSION`].
///
/// Case is preserved (`b.JPG` → `JPG`).
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => &filename[pos + 1..],
        _ => DEFAULT_EXTENSION,
    }
}

/// Extension of the file a path points at, see [`file_extension`].
pub fn source_extension(path: &std::path::Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_extension(&name).to_string()
}

/// Full-size output filename: `"Credit {photographer} - {index}.{ext}"`.
///
/// `index` is 1-based. Path separators in the photographer credit are
/// replaced with `-` so the name stays inside `pictures/`.
pub fn output_filename(photographer: &str, index: usize, extension: &str) -> String {
    let credit = photographer.replace(['/', '\\'], "-");
    format!("Credit {} - {}.{}", credit, index, extension)
}

/// Thumbnail filename: the output filename with its extension swapped for
/// the one the thumbnail encoder actually produced.
pub fn thumbnail_filename(output_filename: &str, thumbnail_extension: &str) -> String {
    let stem = match output_filename.rfind('.') {
        Some(pos) => &output_filename[..pos],
        None => output_filename,
    };
    format!("{}.{}", stem, thumbnail_extension)
}
