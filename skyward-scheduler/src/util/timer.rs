/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Monotonic wall-clock timer for `scheduling_duration_msec`.

use std::time::{Duration, Instant};

/// Measures one scheduling run. `duration_ms` is only meaningful after both
/// `start` and `stop` have been called.
#[derive(Debug, Default)]
pub struct Timer {
    started: Option<Instant>,
    elapsed: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.elapsed.as_millis() as i64
    }
}
