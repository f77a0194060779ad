//! macOS URL launching via LaunchServices.
//!
//! Handler resolution calls `LSCopyDefaultApplicationURLForURL`, which
//! returns the bundle URL of the default application for a URL (or NULL if
//! nothing is registered for its scheme).  Launching goes through
//! `/usr/bin/open`, which uses the same LaunchServices database.

use std::ffi::{c_void, OsStr};
use std::path::Path;

use core_foundation::base::{kCFAllocatorDefault, CFIndex, TCFType};
use core_foundation::string::kCFStringEncodingUTF8;
use core_foundation::url::{CFURLCreateWithBytes, CFURLRef, CFURL};
use tracing::debug;

use super::launch;
use crate::application::dispatch_rule::{OpenError, UrlOpener};

const OPEN: &str = "/usr/bin/open";

/// `kLSRolesAll`.
const LS_ROLES_ALL: u32 = 0xFFFF_FFFF;

#[link(name = "CoreServices", kind = "framework")]
extern "C" {
    fn LSCopyDefaultApplicationURLForURL(
        in_url: CFURLRef,
        in_role_mask: u32,
        out_error: *mut *mut c_void,
    ) -> CFURLRef;
}

/// macOS implementation of [`UrlOpener`].
#[derive(Debug, Default)]
pub struct MacosUrlOpener;

impl MacosUrlOpener {
    pub fn new() -> Self {
        Self
    }
}

impl UrlOpener for MacosUrlOpener {
    fn can_open(&self, url: &str) -> bool {
        let handler = default_application_for(url);
        debug!("default handler for {url}: {:?}", handler.as_ref().map(|h| h.get_string().to_string()));
        handler.is_some()
    }

    fn open(&self, url: &str) -> Result<(), OpenError> {
        launch(OPEN, OsStr::new(url))
    }

    fn open_path(&self, path: &Path) -> Result<(), OpenError> {
        launch(OPEN, path.as_os_str())
    }
}

/// Resolves the default application bundle URL for `url`.
fn default_application_for(url: &str) -> Option<CFURL> {
    let bytes = url.as_bytes();

    // SAFETY: `bytes` is valid for `bytes.len()` bytes for the duration of
    // the call; a NULL base URL is permitted.  The returned reference follows
    // the Create rule and is released by the CFURL wrapper.
    let cf_url = unsafe {
        CFURLCreateWithBytes(
            kCFAllocatorDefault,
            bytes.as_ptr(),
            bytes.len() as CFIndex,
            kCFStringEncodingUTF8,
            std::ptr::null(),
        )
    };
    if cf_url.is_null() {
        return None;
    }
    // SAFETY: non-null reference obtained under the Create rule above.
    let cf_url = unsafe { CFURL::wrap_under_create_rule(cf_url) };

    // SAFETY: `cf_url` is a valid CFURL; a NULL error out-pointer is permitted.
    // The returned reference follows the Copy rule.
    let app = unsafe {
        LSCopyDefaultApplicationURLForURL(
            cf_url.as_concrete_TypeRef(),
            LS_ROLES_ALL,
            std::ptr::null_mut(),
        )
    };
    if app.is_null() {
        None
    } else {
        // SAFETY: non-null reference obtained under the Copy rule above.
        Some(unsafe { CFURL::wrap_under_create_rule(app) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke-test: every macOS install has a browser registered for https.
    #[test]
    fn test_macos_can_open_https() {
        assert!(MacosUrlOpener::new().can_open("https://example.com/home"));
    }

    #[test]
    fn test_macos_cannot_open_unregistered_scheme() {
        assert!(!MacosUrlOpener::new().can_open("wifi-opener-unregistered-scheme://x"));
    }
}
