use super::*;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::MAIN_SEPARATOR_STR;

const EXPLORER: &str = r"C:\Windows\explorer.exe";
const EDITOR: &str = r"C:\Program Files\Editor\editor.exe";

#[derive(Default)]
struct FakeDesktop {
    foreground: Option<WindowHandle>,
    owners: HashMap<WindowHandle, &'static str>,
    windows: Vec<TopLevelWindow>,
    enumeration_fails: bool,
}

impl FakeDesktop {
    fn window(mut self, id: isize, class_name: &str, owner: &'static str) -> Self {
        self.windows.push(TopLevelWindow {
            handle: WindowHandle(id),
            class_name: class_name.to_string(),
            visible: true,
        });
        self.owners.insert(WindowHandle(id), owner);
        self
    }

    fn hidden(mut self, id: isize, class_name: &str, owner: &'static str) -> Self {
        self = self.window(id, class_name, owner);
        if let Some(last) = self.windows.last_mut() {
            last.visible = false;
        }
        self
    }

    fn focused(mut self, id: isize) -> Self {
        self.foreground = Some(WindowHandle(id));
        self
    }
}

impl WindowSystem for FakeDesktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground
    }

    fn owning_process(&self, window: WindowHandle) -> Result<ProcessIdentity, PlatformError> {
        let exe = self.owners.get(&window).ok_or(PlatformError::Process {
            pid: 0,
            message: "window is gone".to_string(),
        })?;
        Ok(ProcessIdentity {
            pid: window.0 as u32,
            executable: PathBuf::from(exe),
        })
    }

    fn top_level_windows(&self) -> Result<Vec<TopLevelWindow>, PlatformError> {
        if self.enumeration_fails {
            return Err(PlatformError::Window("EnumWindows failed".to_string()));
        }
        Ok(self.windows.clone())
    }
}

#[derive(Default)]
struct FakeShell {
    windows: Vec<ShellWindow>,
    folders: HashMap<WindowHandle, PathBuf>,
    fails: bool,
    calls: Cell<usize>,
}

impl FakeShell {
    fn showing(mut self, id: isize, url: &str) -> Self {
        self.windows.push(ShellWindow {
            handle: WindowHandle(id),
            location_url: url.to_string(),
        });
        self
    }

    fn folder(mut self, id: isize, path: &str) -> Self {
        self.folders.insert(WindowHandle(id), PathBuf::from(path));
        self
    }
}

impl ShellAutomation for FakeShell {
    fn file_manager_windows(&self) -> Result<Vec<ShellWindow>, PlatformError> {
        self.calls.set(self.calls.get() + 1);
        if self.fails {
            return Err(PlatformError::Automation("server busy".to_string()));
        }
        Ok(self.windows.clone())
    }

    fn folder_path(&self, window: WindowHandle) -> Result<Option<PathBuf>, PlatformError> {
        Ok(self.folders.get(&window).cloned())
    }
}

fn resolver(desktop: FakeDesktop, shell: FakeShell) -> ActiveDirectoryResolver<FakeDesktop, FakeShell> {
    ActiveDirectoryResolver::new(desktop, shell, FileManagerProfile::default())
}

fn host(path: &str) -> PathBuf {
    PathBuf::from(path.replace('/', MAIN_SEPARATOR_STR))
}

#[test]
fn foreground_file_manager_wins() {
    let desktop = FakeDesktop::default()
        .window(1, "CabinetWClass", EXPLORER)
        .window(2, "CabinetWClass", EXPLORER)
        .focused(2);
    let shell = FakeShell::default()
        .showing(1, "file:///C:/first")
        .showing(2, "file:///C:/second");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/second")));
}

#[test]
fn background_file_manager_when_other_app_is_focused() {
    let desktop = FakeDesktop::default()
        .window(10, "EditorWindow", EDITOR)
        .window(20, "CabinetWClass", EXPLORER)
        .focused(10);
    let shell = FakeShell::default().showing(20, "file:///C:/Users/me/Downloads");

    assert_eq!(
        resolver(desktop, shell).resolve(),
        Some(host("C:/Users/me/Downloads"))
    );
}

#[test]
fn topmost_background_window_is_preferred() {
    let desktop = FakeDesktop::default()
        .window(10, "EditorWindow", EDITOR)
        .window(21, "ExploreWClass", EXPLORER)
        .window(20, "CabinetWClass", EXPLORER)
        .focused(10);
    let shell = FakeShell::default()
        .showing(20, "file:///C:/lower")
        .showing(21, "file:///C:/upper");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/upper")));
}

#[test]
fn legacy_window_class_is_recognized() {
    let desktop = FakeDesktop::default().window(5, "ExploreWClass", EXPLORER);
    let shell = FakeShell::default().showing(5, "file:///C:/legacy");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/legacy")));
}

#[test]
fn nothing_when_no_file_manager_is_open() {
    let desktop = FakeDesktop::default()
        .window(10, "EditorWindow", EDITOR)
        .focused(10);
    let shell = FakeShell::default();

    assert_eq!(resolver(desktop, shell).resolve(), None);
}

#[test]
fn hidden_file_manager_windows_are_ignored() {
    let desktop = FakeDesktop::default().hidden(7, "CabinetWClass", EXPLORER);
    let shell = FakeShell::default().showing(7, "file:///C:/hidden");

    assert_eq!(resolver(desktop, shell).resolve(), None);
}

#[test]
fn explorer_owned_non_browser_windows_fall_through() {
    // The taskbar belongs to explorer.exe but is not in the shell collection.
    let desktop = FakeDesktop::default()
        .window(1, "Shell_TrayWnd", EXPLORER)
        .window(2, "CabinetWClass", EXPLORER)
        .focused(1);
    let shell = FakeShell::default().showing(2, "file:///C:/work");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/work")));
}

#[test]
fn executable_match_ignores_case_and_directory() {
    let profile = FileManagerProfile::default();
    assert!(profile.is_file_manager_executable(Path::new(r"C:\WINDOWS\EXPLORER.EXE")));
    assert!(profile.is_file_manager_executable(Path::new("/usr/bin/explorer.exe")));
    assert!(!profile.is_file_manager_executable(Path::new(r"C:\tools\not-explorer.exe")));
    assert!(!profile.is_file_manager_executable(Path::new(r"C:\explorer.exe\other.exe")));
}

#[test]
fn virtual_folder_uses_folder_path_lookup() {
    let desktop = FakeDesktop::default()
        .window(3, "CabinetWClass", EXPLORER)
        .focused(3);
    let shell = FakeShell::default()
        .showing(3, "")
        .folder(3, "/srv/library");

    assert_eq!(
        resolver(desktop, shell).resolve(),
        Some(PathBuf::from("/srv/library"))
    );
}

#[test]
fn shell_failure_yields_nothing() {
    let desktop = FakeDesktop::default()
        .window(1, "CabinetWClass", EXPLORER)
        .focused(1);
    let shell = FakeShell {
        fails: true,
        ..FakeShell::default()
    };

    assert_eq!(resolver(desktop, shell).resolve(), None);
}

#[test]
fn owner_lookup_failure_still_tries_background() {
    let mut desktop = FakeDesktop::default().window(4, "CabinetWClass", EXPLORER);
    desktop.foreground = Some(WindowHandle(99));
    let shell = FakeShell::default().showing(4, "file:///C:/still-here");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/still-here")));
}

#[test]
fn focused_window_retried_when_owner_lookup_fails() {
    let mut desktop = FakeDesktop::default()
        .window(4, "CabinetWClass", EXPLORER)
        .focused(4);
    desktop.owners.clear();
    let shell = FakeShell::default().showing(4, "file:///C:/visible");

    assert_eq!(resolver(desktop, shell).resolve(), Some(host("C:/visible")));
}

#[test]
fn focused_window_without_location_is_not_retried() {
    let desktop = FakeDesktop::default()
        .window(1, "CabinetWClass", EXPLORER)
        .window(2, "CabinetWClass", EXPLORER)
        .focused(1);
    let shell = FakeShell::default()
        .showing(1, "")
        .showing(2, "file:///C:/behind");

    let resolver = resolver(desktop, shell);
    assert_eq!(resolver.resolve(), Some(host("C:/behind")));
    assert_eq!(resolver.shell.calls.get(), 2);
}

#[test]
fn enumeration_failure_yields_nothing() {
    let desktop = FakeDesktop {
        enumeration_fails: true,
        ..FakeDesktop::default()
    }
    .window(1, "EditorWindow", EDITOR)
    .focused(1);
    let shell = FakeShell::default().showing(2, "file:///C:/x");

    assert_eq!(resolver(desktop, shell).resolve(), None);
}

#[test]
fn captured_foreground_overrides_current_one() {
    // The prompt is focused by the time the name is confirmed.
    let desktop = FakeDesktop::default()
        .window(50, "QuickFilePrompt", r"C:\apps\quickfile.exe")
        .window(1, "CabinetWClass", EXPLORER)
        .window(2, "CabinetWClass", EXPLORER)
        .focused(50);
    let shell = FakeShell::default()
        .showing(1, "file:///C:/top")
        .showing(2, "file:///C:/captured");

    let resolver = resolver(desktop, shell);
    assert_eq!(resolver.resolve(), Some(host("C:/top")));
    assert_eq!(
        resolver.resolve_from(Some(WindowHandle(2))),
        Some(host("C:/captured"))
    );
}

#[test]
fn no_shell_query_without_candidates() {
    let desktop = FakeDesktop::default()
        .window(10, "EditorWindow", EDITOR)
        .focused(10);
    let resolver = resolver(desktop, FakeShell::default());

    assert_eq!(resolver.resolve(), None);
    assert_eq!(resolver.shell.calls.get(), 0);
}

#[test]
fn profile_from_config() {
    let config = ResolverConfig {
        file_manager_executable: "nautilus".to_string(),
        window_classes: vec!["org.gnome.Nautilus".to_string()],
        fallback_directory: None,
    };
    let profile = FileManagerProfile::from(&config);

    assert!(profile.is_file_manager_executable(Path::new("/usr/bin/nautilus")));
    assert!(profile.is_file_manager_class("org.gnome.Nautilus"));
    assert!(!profile.is_file_manager_class("CabinetWClass"));
}
