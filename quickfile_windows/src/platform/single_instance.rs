//! Single instance enforcement using a named mutex.

use windows::Win32::{
    Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE},
    System::Threading::{CreateMutexW, ReleaseMutex},
};
use windows::core::PCWSTR;
use windows_strings::w;

#[cfg(debug_assertions)]
const MUTEX_NAME: PCWSTR = w!("Local\\QuickFile_SingleInstance_Debug");

#[cfg(not(debug_assertions))]
const MUTEX_NAME: PCWSTR = w!("Local\\QuickFile_SingleInstance");

/// Guard that releases the mutex when dropped.
pub struct SingleInstanceGuard(HANDLE);

impl Drop for SingleInstanceGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = ReleaseMutex(self.0);
            let _ = CloseHandle(self.0);
        }
    }
}

/// Returns a guard if this is the only running instance, `None` otherwise.
///
/// A second instance has nothing to hand over to the first, so the caller
/// simply exits.
pub fn acquire() -> windows::core::Result<Option<SingleInstanceGuard>> {
    let handle = unsafe { CreateMutexW(None, false, MUTEX_NAME) }?;

    if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
        let _ = unsafe { CloseHandle(handle) };
        return Ok(None);
    }

    Ok(Some(SingleInstanceGuard(handle)))
}
