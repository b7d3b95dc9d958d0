#![forbid(unsafe_code)]

//! Render metrics and the `BUCKLEY_RENDER_DEBUG` stderr reporter.
//!
//! The frame driver records one entry per render and, when the debug
//! environment variable is set to any non-empty value, writes a summary
//! line to stderr about once per second. Purely observational: nothing in
//! the render pipeline reads these numbers back.

use std::time::{Duration, Instant};

/// How often the debug reporter writes a line.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Check whether periodic stderr reporting is enabled.
pub fn debug_enabled() -> bool {
    std::env::var_os("BUCKLEY_RENDER_DEBUG").is_some_and(|v| !v.is_empty())
}

/// Accumulated frame-loop counters.
#[derive(Debug)]
pub struct RenderMetrics {
    /// Ticks observed, rendering or not.
    pub ticks: u64,
    /// Renders performed.
    pub renders: u64,
    /// Full repaints among the renders.
    pub full_redraws: u64,
    /// Incremental repaints among the renders.
    pub partial_redraws: u64,
    /// Tick boundaries missed because a render overran the period.
    pub dropped_frames: u64,
    /// Changed cells across all renders (tracked only when debugging).
    pub cells_updated: u64,
    /// Bytes handed to the backend across all renders.
    pub bytes_emitted: u64,
    render_time_total: Duration,
    last_report: Instant,
}

impl RenderMetrics {
    /// Start with zeroed counters.
    pub fn new() -> Self {
        Self {
            ticks: 0,
            renders: 0,
            full_redraws: 0,
            partial_redraws: 0,
            dropped_frames: 0,
            cells_updated: 0,
            bytes_emitted: 0,
            render_time_total: Duration::ZERO,
            last_report: Instant::now(),
        }
    }

    /// Record one tick of the frame loop.
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Record a completed render.
    pub fn record_render(&mut self, elapsed: Duration, bytes: usize, cells: usize, full: bool) {
        self.renders += 1;
        if full {
            self.full_redraws += 1;
        } else {
            self.partial_redraws += 1;
        }
        self.render_time_total += elapsed;
        self.bytes_emitted += bytes as u64;
        self.cells_updated += cells as u64;
    }

    /// Record missed tick boundaries.
    pub fn record_dropped(&mut self, count: u64) {
        self.dropped_frames += count;
    }

    /// Mean wall time per render.
    pub fn mean_render_time(&self) -> Duration {
        if self.renders == 0 {
            Duration::ZERO
        } else {
            self.render_time_total / self.renders as u32
        }
    }

    /// Percentage of ticks whose boundary was missed.
    pub fn dropped_pct(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.dropped_frames as f64 * 100.0 / self.ticks as f64
        }
    }

    /// Write a summary line to stderr if debugging is on and the report
    /// interval has elapsed.
    pub fn maybe_report(&mut self) {
        if !debug_enabled() || self.last_report.elapsed() < REPORT_INTERVAL {
            return;
        }
        self.last_report = Instant::now();
        eprintln!(
            "render: frames={} mean={:?} dropped={:.1}% cells={} full={} partial={}",
            self.renders,
            self.mean_render_time(),
            self.dropped_pct(),
            self.cells_updated,
            self.full_redraws,
            self.partial_redraws,
        );
    }
}

impl Default for RenderMetrics {
    fn default() -> Self {
        Self::new()
    }
}
