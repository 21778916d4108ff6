//! Decoding of shell `file://` location URLs into host paths.

use percent_encoding::percent_decode_str;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};

/// Decodes a `file://` location into a path with host separators.
///
/// Handles local drives (`file:///C:/Users`), POSIX roots (`file:///home`)
/// and UNC shares (`file://server/share`). Returns `None` for empty or
/// non-`file:` locations such as virtual shell folders.
pub fn decode_location_url(url: &str) -> Option<PathBuf> {
    let url = url.trim();
    let scheme = url.get(..5)?;
    if !scheme.eq_ignore_ascii_case("file:") {
        return None;
    }
    let rest = url[5..].strip_prefix("//")?;

    let raw = match rest.strip_prefix('/') {
        Some(local) if has_drive_prefix(local) => with_drive_root(local),
        Some(local) => format!("/{local}"),
        None => {
            let rest = strip_localhost(rest);
            if rest.is_empty() {
                return None;
            }
            if has_drive_prefix(rest) {
                with_drive_root(rest)
            } else {
                format!("//{rest}")
            }
        }
    };

    // Separators are swapped before decoding so an escaped `%2F` stays part of a name.
    let raw = raw.replace(['/', '\\'], MAIN_SEPARATOR_STR);
    let decoded = percent_decode_str(&raw).decode_utf8_lossy();
    if decoded.is_empty() {
        return None;
    }
    Some(PathBuf::from(decoded.into_owned()))
}

fn has_drive_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/' || bytes[2] == b'\\')
}

/// `C:` alone means the drive's current directory, so give it a root.
fn with_drive_root(s: &str) -> String {
    if s.len() == 2 {
        format!("{s}/")
    } else {
        s.to_string()
    }
}

fn strip_localhost(rest: &str) -> &str {
    match rest.get(..10) {
        Some(host) if host.eq_ignore_ascii_case("localhost/") => &rest[10..],
        _ => rest,
    }
}
