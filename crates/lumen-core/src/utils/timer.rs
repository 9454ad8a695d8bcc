// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame timing primitives.

use std::fmt;
use std::time::{Duration, Instant};

/// The wall-clock delta between the start of the current frame and the previous one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestep {
    seconds: f32,
}

impl Timestep {
    /// Creates a timestep from a delta expressed in seconds.
    pub const fn from_seconds(seconds: f32) -> Self {
        Self { seconds }
    }

    /// Computes the timestep between two platform clock readings, in seconds.
    ///
    /// A negative delta (clock reset, restarted application) is clamped to zero.
    pub fn between(previous: f64, current: f64) -> Self {
        Self {
            seconds: (current - previous).max(0.0) as f32,
        }
    }

    /// The delta in seconds.
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// The delta in milliseconds.
    pub fn milliseconds(&self) -> f32 {
        self.seconds * 1000.0
    }
}

impl From<Timestep> for f32 {
    fn from(ts: Timestep) -> Self {
        ts.seconds
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} ms", self.milliseconds())
    }
}

/// A simple CPU stopwatch, started on creation.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Creates and starts a new stopwatch.
    #[inline]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restarts the stopwatch from now.
    #[inline]
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }

    /// Time elapsed since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time elapsed since the stopwatch was started, in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Time elapsed since the stopwatch was started, in milliseconds.
    #[inline]
    pub fn elapsed_ms_f32(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn timestep_between_readings() {
        let ts = Timestep::between(1.25, 1.5);
        assert!((ts.seconds() - 0.25).abs() < 1e-6);
        assert!((ts.milliseconds() - 250.0).abs() < 1e-3);
    }

    #[test]
    fn timestep_never_negative() {
        assert_eq!(Timestep::between(3.0, 1.0).seconds(), 0.0);
    }

    #[test]
    fn stopwatch_measures_sleep() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(20));
        assert!(watch.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn stopwatch_restart_resets_origin() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(50));
        let before = watch.elapsed();
        watch.restart();
        assert!(watch.elapsed() < before);
    }
}
