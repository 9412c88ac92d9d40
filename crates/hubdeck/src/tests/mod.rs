mod config;
mod listener;
mod sound;

use std::sync::{Arc, Mutex};

/// Recording stand-in for a visual alert backend.
#[derive(Debug, Default, Clone)]
pub(crate) struct ProbeNotifier {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ProbeNotifier {
    pub(crate) fn record(&self, title: &str, body: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((title.to_string(), body.to_string()));
        }
    }

    /// Every (title, body) pair shown so far.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}
