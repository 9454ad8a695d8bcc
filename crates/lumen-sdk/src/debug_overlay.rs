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

//! The default overlay: frame statistics and a vsync toggle.

use std::time::Duration;

use lumen_core::event::{Event, KeyCode, Propagation};
use lumen_core::layer::{Layer, LayerContext, UiPass};
use lumen_core::utils::timer::{Stopwatch, Timestep};

/// Frame timings accumulated between two reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames recorded.
    pub frames: u32,
    /// Sum of the recorded frame times, in milliseconds.
    pub total_ms: f32,
    /// Draw calls issued during the last recorded frame.
    pub draw_calls: u32,
    /// Time spent between the UI pass brackets of the last frame, in milliseconds.
    pub ui_ms: f32,
}

impl FrameStats {
    /// Adds one frame.
    pub fn record(&mut self, ts: Timestep) {
        self.frames += 1;
        self.total_ms += ts.milliseconds();
    }

    /// Mean frame time, or `None` before the first frame.
    pub fn average_ms(&self) -> Option<f32> {
        (self.frames > 0).then(|| self.total_ms / self.frames as f32)
    }

    /// Frames per second implied by the mean frame time.
    pub fn fps(&self) -> Option<f32> {
        self.average_ms()
            .filter(|ms| *ms > 0.0)
            .map(|ms| 1000.0 / ms)
    }
}

/// Measures every frame and logs a summary at a fixed interval.
///
/// Also the application's [`UiPass`]: it brackets the UI sub-pass. F2 toggles
/// vsync. Events are never consumed.
#[derive(Debug)]
pub struct DebugOverlay {
    stats: FrameStats,
    report_interval: Duration,
    since_report: Stopwatch,
    ui_timer: Stopwatch,
    toggle_vsync: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl DebugOverlay {
    /// Creates an overlay reporting every `report_interval`.
    pub fn new(report_interval: Duration) -> Self {
        Self {
            stats: FrameStats::default(),
            report_interval,
            since_report: Stopwatch::new(),
            ui_timer: Stopwatch::new(),
            toggle_vsync: false,
        }
    }

    /// Statistics gathered since the last report.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn report(&mut self, vsync: bool) {
        if let (Some(average), Some(fps)) = (self.stats.average_ms(), self.stats.fps()) {
            log::info!(
                "{average:.2} ms/frame ({fps:.0} FPS), {} draw calls, UI {:.2} ms, vsync {}",
                self.stats.draw_calls,
                self.stats.ui_ms,
                if vsync { "on" } else { "off" },
            );
        }
        self.stats = FrameStats::default();
        self.since_report.restart();
    }
}

impl Layer for DebugOverlay {
    fn name(&self) -> &str {
        "DebugOverlay"
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, ts: Timestep) {
        self.stats.record(ts);
        if std::mem::take(&mut self.toggle_vsync) {
            let vsync = !ctx.window.is_vsync();
            ctx.window.set_vsync(vsync);
            log::info!("VSync {}.", if vsync { "enabled" } else { "disabled" });
        }
    }

    fn on_ui_render(&mut self, ctx: &mut LayerContext<'_>, _ts: Timestep) {
        // Every layer has updated by now.
        self.stats.draw_calls = ctx.renderer.command().draw_calls();
    }

    fn on_event(&mut self, event: &Event) -> Propagation {
        if let Event::KeyPressed(e) = event {
            if e.key == KeyCode::F2 && !e.is_repeat() {
                self.toggle_vsync = true;
            }
        }
        Propagation::Unhandled
    }

    fn ui_pass(&mut self) -> Option<&mut dyn UiPass> {
        Some(self as &mut dyn UiPass)
    }
}

impl UiPass for DebugOverlay {
    fn begin(&mut self, _ctx: &mut LayerContext<'_>) {
        self.ui_timer.restart();
    }

    fn end(&mut self, ctx: &mut LayerContext<'_>) {
        self.stats.ui_ms = self.ui_timer.elapsed_ms_f32();
        if self.since_report.elapsed() >= self.report_interval {
            self.report(ctx.window.is_vsync());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::event::KeyPressedEvent;

    #[test]
    fn stats_average_and_fps() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average_ms(), None);
        stats.record(Timestep::from_seconds(0.010));
        stats.record(Timestep::from_seconds(0.030));
        assert_eq!(stats.frames, 2);
        let average = stats.average_ms().unwrap();
        assert!((average - 20.0).abs() < 1e-3);
        assert!((stats.fps().unwrap() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn zero_length_frames_have_no_fps() {
        let mut stats = FrameStats::default();
        stats.record(Timestep::from_seconds(0.0));
        assert_eq!(stats.average_ms(), Some(0.0));
        assert_eq!(stats.fps(), None);
    }

    #[test]
    fn f2_is_observed_but_not_consumed() {
        let mut overlay = DebugOverlay::default();
        let press = Event::KeyPressed(KeyPressedEvent::new(KeyCode::F2, 0));
        assert_eq!(overlay.on_event(&press), Propagation::Unhandled);
        assert!(overlay.toggle_vsync);

        let mut overlay = DebugOverlay::default();
        let repeat = Event::KeyPressed(KeyPressedEvent::new(KeyCode::F2, 3));
        overlay.on_event(&repeat);
        assert!(!overlay.toggle_vsync);
    }

    #[test]
    fn overlay_provides_the_ui_pass() {
        let mut overlay = DebugOverlay::default();
        assert!(overlay.ui_pass().is_some());
    }
}
