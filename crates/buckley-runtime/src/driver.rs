#![forbid(unsafe_code)]

//! The frame driver: a fixed-rate ticker that turns dirty scenes into
//! emitted bytes.
//!
//! Each tick delivers age-expired coalescer flushes, advances the animation
//! clock, and, when the scene is dirty, renders the compositor and hands the
//! bytes to the backend sink. The driver owns the dirty flag: mutators mark
//! it (directly or from a flush callback through a [`DriverHandle`]) and a
//! successful render clears it.
//!
//! A render that overruns the tick period does not trigger catch-up ticks;
//! the next tick lands on the next period boundary and the dropped-frame
//! counter records the missed ones.
//!
//! On shutdown the driver stops ticking, flushes the coalescer, and emits a
//! final reset (style reset, show cursor, and alt-screen leave when the
//! host entered it) so the terminal is usable again.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use buckley_render::ansi;
use buckley_render::compositor::Compositor;

use crate::coalescer::StreamCoalescer;
use crate::metrics::{self, RenderMetrics};

/// Byte sink the driver hands each rendered frame to.
pub type ByteSink = Box<dyn FnMut(&[u8]) -> io::Result<()> + Send>;

/// Frame driver configuration.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Target ticks per second. Zero falls back to 60.
    pub fps: u32,
    /// Whether the host entered the alternate screen; governs the final
    /// reset emitted on shutdown.
    pub alt_screen: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: false,
        }
    }
}

/// Frame counter driven by the ticker, for animation timing.
#[derive(Debug)]
pub struct AnimationClock {
    started: Instant,
    frames: u64,
}

impl AnimationClock {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
        }
    }

    fn advance(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    /// Frames elapsed since the driver started.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Wall time elapsed since the driver started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// State shared between the driver thread and its handles.
#[derive(Debug)]
struct DriverShared {
    running: AtomicBool,
    dirty: AtomicBool,
    full_redraw: AtomicBool,
    frames: AtomicU64,
    dropped_frames: AtomicU64,
}

/// A cloneable remote control for a running [`FrameDriver`].
///
/// Flush callbacks and input handlers hold one of these to mark the scene
/// dirty from any thread.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    shared: Arc<DriverShared>,
}

impl DriverHandle {
    /// Mark the scene dirty; the next tick renders it.
    pub fn mark_dirty(&self) {
        self.shared.dirty.store(true, Ordering::Release);
    }

    /// Force a full repaint on the next tick (used after a resize or a
    /// backend failure).
    pub fn request_full(&self) {
        self.shared.full_redraw.store(true, Ordering::Release);
        self.shared.dirty.store(true, Ordering::Release);
    }

    /// Ticks elapsed so far.
    pub fn frames(&self) -> u64 {
        self.shared.frames.load(Ordering::Relaxed)
    }

    /// Tick boundaries missed so far.
    pub fn dropped_frames(&self) -> u64 {
        self.shared.dropped_frames.load(Ordering::Relaxed)
    }
}

/// Owns the ticker thread and the scene it renders.
pub struct FrameDriver {
    shared: Arc<DriverShared>,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for FrameDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("running", &self.shared.running.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl FrameDriver {
    /// Spawn the ticker thread.
    ///
    /// The driver takes shared ownership of the compositor and coalescer
    /// and exclusive ownership of the sink.
    pub fn spawn(
        config: DriverConfig,
        compositor: Arc<Mutex<Compositor>>,
        coalescer: Arc<StreamCoalescer>,
        sink: ByteSink,
    ) -> Self {
        let shared = Arc::new(DriverShared {
            running: AtomicBool::new(true),
            dirty: AtomicBool::new(false),
            full_redraw: AtomicBool::new(true),
            frames: AtomicU64::new(0),
            dropped_frames: AtomicU64::new(0),
        });

        let thread_shared = Arc::clone(&shared);
        let thread = thread::spawn(move || {
            run_loop(config, thread_shared, compositor, coalescer, sink);
        });

        Self {
            shared,
            thread: Some(thread),
        }
    }

    /// A cloneable handle for marking the scene dirty from other threads.
    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Mark the scene dirty; the next tick renders it.
    pub fn mark_dirty(&self) {
        self.handle().mark_dirty();
    }

    /// Force a full repaint on the next tick.
    pub fn request_full(&self) {
        self.handle().request_full();
    }

    /// Tick boundaries missed so far.
    pub fn dropped_frames(&self) -> u64 {
        self.shared.dropped_frames.load(Ordering::Relaxed)
    }

    /// Whether the ticker thread is still running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Stop the ticker, flush the coalescer, emit the final reset, and
    /// join the thread.
    pub fn shutdown(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock_compositor(compositor: &Arc<Mutex<Compositor>>) -> std::sync::MutexGuard<'_, Compositor> {
    compositor.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run_loop(
    config: DriverConfig,
    shared: Arc<DriverShared>,
    compositor: Arc<Mutex<Compositor>>,
    coalescer: Arc<StreamCoalescer>,
    mut sink: ByteSink,
) {
    let fps = if config.fps == 0 { 60 } else { config.fps };
    let period = Duration::from_nanos(1_000_000_000 / fps as u64);
    let debug = metrics::debug_enabled();

    tracing::debug!(fps, "frame driver started");

    let mut clock = AnimationClock::new();
    let mut stats = RenderMetrics::new();
    let mut next_tick = Instant::now() + period;

    while shared.running.load(Ordering::Acquire) {
        let now = Instant::now();
        if let Some(wait) = next_tick.checked_duration_since(now) {
            thread::sleep(wait);
        }

        coalescer.tick();
        shared.frames.store(clock.advance(), Ordering::Relaxed);
        stats.record_tick();

        let want_full = shared.full_redraw.swap(false, Ordering::AcqRel);
        if shared.dirty.swap(false, Ordering::AcqRel) || want_full {
            let started = Instant::now();
            let (bytes, cells) = {
                let comp = lock_compositor(&compositor);
                let cells = if debug {
                    comp.compose();
                    comp.diff_stats().changed_cells
                } else {
                    0
                };
                let bytes = if want_full {
                    comp.render_full()
                } else {
                    comp.render()
                };
                (bytes, cells)
            };

            if let Err(error) = sink(&bytes) {
                tracing::warn!(%error, "backend write failed; scheduling full redraw");
                shared.full_redraw.store(true, Ordering::Release);
                shared.dirty.store(true, Ordering::Release);
            }
            stats.record_render(started.elapsed(), bytes.len(), cells, want_full);
        }

        // Schedule the next boundary without catching up on missed ones.
        next_tick += period;
        let now = Instant::now();
        let mut missed = 0u64;
        while next_tick <= now {
            next_tick += period;
            missed += 1;
        }
        if missed > 0 {
            shared.dropped_frames.fetch_add(missed, Ordering::Relaxed);
            stats.record_dropped(missed);
        }

        stats.maybe_report();
    }

    // Shutdown: deliver stragglers, then put the terminal back together.
    coalescer.flush_all();
    let mut reset = Vec::new();
    reset.extend_from_slice(ansi::SGR_RESET);
    reset.extend_from_slice(ansi::CURSOR_SHOW);
    if config.alt_screen {
        reset.extend_from_slice(ansi::ALT_SCREEN_LEAVE);
    }
    if let Err(error) = sink(&reset) {
        tracing::warn!(%error, "final reset failed");
    }
    tracing::debug!("frame driver stopped");
}
