// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

use sfc_renderer::provider::LogLevel;
use sfc_renderer::provider::LogProvider;
use std::sync::Arc;
use std::sync::Mutex;

/// A log provider which keeps every message in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// processor and inspect the other.
#[derive(Clone, Default)]
pub struct CaptureLog {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// The messages logged at exactly `level`.
    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl LogProvider for CaptureLog {
    fn log(&self, level: LogLevel, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }
}
