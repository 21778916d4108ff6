//! One hotkey activation: validate, resolve, create.

use crate::creator;
use crate::paths::target_directory;
use crate::resolver::{ActiveDirectoryResolver, ShellAutomation, WindowHandle, WindowSystem};
use crate::types::{EntryName, Outcome};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Allows at most one activation to run at a time.
#[derive(Clone, Default)]
pub struct ActivationGate {
    active: Arc<AtomicBool>,
}

impl ActivationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a permit if no other activation is running.
    pub fn try_acquire(&self) -> Option<ActivationPermit> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(ActivationPermit {
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Held for the lifetime of one activation. Dropping it reopens the gate.
pub struct ActivationPermit {
    active: Arc<AtomicBool>,
}

impl Drop for ActivationPermit {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Creates the entry named by `input` in the directory the user is looking at.
///
/// The name is validated before any platform or filesystem access. The
/// resolved directory is re-checked right before creation and replaced by
/// `fallback` if it no longer exists.
pub fn submit<W: WindowSystem, S: ShellAutomation>(
    input: &str,
    resolver: &ActiveDirectoryResolver<W, S>,
    foreground: Option<WindowHandle>,
    fallback: &Path,
) -> Outcome {
    let name = match EntryName::try_from(input) {
        Ok(name) => name,
        Err(err) => {
            info!(%err, "name rejected");
            return Outcome::from(&err);
        }
    };

    let base = target_directory(resolver.resolve_from(foreground), fallback);
    let outcome = Outcome::from(creator::create(&base, name.as_ref()));
    info!(
        base = %base.display(),
        name = %name,
        success = outcome.is_success(),
        message = %outcome.message,
        "activation finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_allows_one_permit() {
        let gate = ActivationGate::new();

        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_active());
        assert!(gate.try_acquire().is_none());
        assert!(gate.clone().try_acquire().is_none());

        drop(permit);
        assert!(!gate.is_active());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn permit_released_from_another_thread() {
        let gate = ActivationGate::new();
        let permit = gate.try_acquire().unwrap();

        std::thread::spawn(move || drop(permit)).join().unwrap();

        assert!(gate.try_acquire().is_some());
    }
}
