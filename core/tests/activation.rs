use quickfile_core::activation::submit;
use quickfile_core::resolver::WindowHandle;
use quickfile_core::{EntryKind, OutcomeKind};
use std::fs;
use tempfile::tempdir;

mod common;

use common::{Desktop, EXPLORER, OTHER_APP, Shell, file_url, resolver};

/// Verify a file is created in the foreground file manager's directory.
#[test]
fn test_creates_file_in_foreground_directory() {
    let shown = tempdir().unwrap();
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(
        Desktop {
            foreground: Some(1),
            windows: vec![(1, "CabinetWClass", EXPLORER)],
        },
        Shell {
            windows: vec![(1, file_url(shown.path()))],
        },
    );

    let outcome = submit("notes.txt", &resolver, Some(WindowHandle(1)), desktop_dir.path());

    assert_eq!(outcome.kind, OutcomeKind::Created(EntryKind::File));
    assert_eq!(outcome.message, "Created file 'notes.txt'");
    assert!(shown.path().join("notes.txt").is_file());
    assert!(fs::read_dir(desktop_dir.path()).unwrap().next().is_none());
}

/// Verify a background file manager is used when another app has focus.
#[test]
fn test_background_file_manager_beats_desktop() {
    let shown = tempdir().unwrap();
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(
        Desktop {
            foreground: Some(9),
            windows: vec![(9, "MailWindow", OTHER_APP), (2, "CabinetWClass", EXPLORER)],
        },
        Shell {
            windows: vec![(2, file_url(shown.path()))],
        },
    );

    let outcome = submit("Projects", &resolver, Some(WindowHandle(9)), desktop_dir.path());

    assert_eq!(outcome.kind, OutcomeKind::Created(EntryKind::Directory));
    assert_eq!(outcome.message, "Created folder 'Projects'");
    assert!(shown.path().join("Projects").is_dir());
}

/// Verify the fallback directory is used when no file manager is open.
#[test]
fn test_falls_back_without_file_manager() {
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(
        Desktop {
            foreground: Some(9),
            windows: vec![(9, "MailWindow", OTHER_APP)],
        },
        Shell::default(),
    );

    assert_eq!(resolver.resolve_from(Some(WindowHandle(9))), None);

    let outcome = submit("draft.md", &resolver, None, desktop_dir.path());

    assert!(outcome.is_success());
    assert!(desktop_dir.path().join("draft.md").is_file());
}

/// Verify a resolved directory that vanished before creation is replaced by the fallback.
#[test]
fn test_stale_location_falls_back() {
    let shown = tempdir().unwrap();
    let gone = shown.path().join("deleted-since");
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(
        Desktop {
            foreground: Some(1),
            windows: vec![(1, "CabinetWClass", EXPLORER)],
        },
        Shell {
            windows: vec![(1, file_url(&gone))],
        },
    );

    let outcome = submit("a.txt", &resolver, Some(WindowHandle(1)), desktop_dir.path());

    assert!(outcome.is_success());
    assert!(desktop_dir.path().join("a.txt").is_file());
    assert!(!gone.exists());
}

/// Verify illegal names are rejected without touching the filesystem.
#[test]
fn test_illegal_name_is_rejected_before_creation() {
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(Desktop::default(), Shell::default());

    let outcome = submit("a:b", &resolver, None, desktop_dir.path());

    assert_eq!(outcome.kind, OutcomeKind::InvalidName);
    assert_eq!(outcome.message, "Name contains illegal character: :");
    assert!(fs::read_dir(desktop_dir.path()).unwrap().next().is_none());
}

/// Verify an empty name is rejected.
#[test]
fn test_empty_name_is_rejected() {
    let desktop_dir = tempdir().unwrap();
    let resolver = resolver(Desktop::default(), Shell::default());

    let outcome = submit("  ", &resolver, None, desktop_dir.path());

    assert_eq!(outcome.kind, OutcomeKind::InvalidName);
    assert_eq!(outcome.message, "Name cannot be empty");
}

/// Verify a collision is reported and the existing entry is left alone.
#[test]
fn test_collision_is_reported() {
    let desktop_dir = tempdir().unwrap();
    fs::write(desktop_dir.path().join("notes.txt"), "original").unwrap();
    let resolver = resolver(Desktop::default(), Shell::default());

    let outcome = submit("notes.txt", &resolver, None, desktop_dir.path());

    assert_eq!(outcome.kind, OutcomeKind::AlreadyExists);
    assert_eq!(outcome.message, "'notes.txt' already exists");
    assert_eq!(
        fs::read_to_string(desktop_dir.path().join("notes.txt")).unwrap(),
        "original"
    );
}
