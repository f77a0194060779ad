//! Recording notifier for unit testing.

use std::sync::Mutex;

use crate::application::notify::{Notice, UserNotifier};

/// Records every notice instead of showing it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl UserNotifier for RecordingNotifier {
    fn alert(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
