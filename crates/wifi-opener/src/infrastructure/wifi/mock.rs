//! Scripted interface source for unit testing.
//!
//! Replays a fixed list of readings, one per call to `interfaces()`.  Once
//! the script is exhausted the last reading repeats forever, which is what a
//! machine sitting on one network looks like to the watcher.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use wifi_opener_core::InterfaceReading;

use crate::application::watch_network::{WifiError, WifiInterfaceSource};

#[derive(Default)]
pub struct ScriptedInterfaceSource {
    script: Mutex<VecDeque<Vec<InterfaceReading>>>,
    last: Mutex<Vec<InterfaceReading>>,
    fail_next: AtomicBool,
}

impl ScriptedInterfaceSource {
    /// Creates a source that returns each element of `script` in turn.
    pub fn new(script: Vec<Vec<InterfaceReading>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Convenience: a single interface `device` whose SSID follows `ssids`.
    pub fn from_ssids(device: &str, ssids: Vec<Option<&str>>) -> Self {
        Self::new(
            ssids
                .into_iter()
                .map(|ssid| vec![InterfaceReading::new(device, ssid.map(str::to_string))])
                .collect(),
        )
    }

    /// Makes the next call fail without consuming a script entry.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl WifiInterfaceSource for ScriptedInterfaceSource {
    fn interfaces(&self) -> Result<Vec<InterfaceReading>, WifiError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(WifiError::Platform("scripted failure".into()));
        }
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}
