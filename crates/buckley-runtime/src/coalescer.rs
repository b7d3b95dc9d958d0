#![forbid(unsafe_code)]

//! Stream coalescing for high-frequency text chunks.
//!
//! Model output arrives as short chunks at kHz rates. Posting each chunk to
//! the UI individually drowns the frame loop, so the coalescer batches them
//! per session and posts once per flush: when a buffer grows past the size
//! threshold, when its oldest pending byte exceeds the age threshold on a
//! frame tick, or on an explicit flush.
//!
//! For any single session the posted bytes are the exact in-order
//! concatenation of the added chunks. Ordering across sessions is
//! unspecified.
//!
//! # Locking
//!
//! One mutex guards the session map. The flush callback is always invoked
//! after the lock is released, so a callback may draw to a screen (or take
//! any other lock) without inverting lock order against `add`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default size threshold in characters.
pub const DEFAULT_MAX_CHARS: usize = 128;

/// Default age threshold.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(16);

/// Callback invoked once per flush with the session id and its batched text.
pub type FlushCallback = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Flush thresholds. Zero values fall back to the defaults.
#[derive(Debug, Clone, Copy)]
pub struct CoalescerConfig {
    /// Flush as soon as a session's pending length reaches this many bytes.
    pub max_chars: usize,
    /// Flush on tick once the oldest pending byte is this old.
    pub max_wait: Duration,
}

impl Default for CoalescerConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl CoalescerConfig {
    fn normalized(self) -> Self {
        Self {
            max_chars: if self.max_chars == 0 {
                DEFAULT_MAX_CHARS
            } else {
                self.max_chars
            },
            max_wait: if self.max_wait.is_zero() {
                DEFAULT_MAX_WAIT
            } else {
                self.max_wait
            },
        }
    }
}

/// Pending text for one session.
///
/// An entry exists only while it holds text, so `first_added` is always the
/// arrival time of the oldest unflushed byte.
#[derive(Debug)]
struct Pending {
    text: String,
    first_added: Instant,
}

/// Batches per-session text chunks into size-, age-, or explicitly
/// triggered flushes.
pub struct StreamCoalescer {
    pending: Mutex<HashMap<String, Pending>>,
    max_chars: usize,
    max_wait: Duration,
    on_flush: Option<FlushCallback>,
}

impl std::fmt::Debug for StreamCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCoalescer")
            .field("max_chars", &self.max_chars)
            .field("max_wait", &self.max_wait)
            .field("has_callback", &self.on_flush.is_some())
            .finish_non_exhaustive()
    }
}

impl StreamCoalescer {
    /// Create a coalescer with no flush callback. Flushes still clear the
    /// buffers; nothing is posted.
    pub fn new(config: CoalescerConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a coalescer that posts each flush to `on_flush`.
    pub fn with_callback(config: CoalescerConfig, on_flush: FlushCallback) -> Self {
        Self::build(config, Some(on_flush))
    }

    fn build(config: CoalescerConfig, on_flush: Option<FlushCallback>) -> Self {
        let config = config.normalized();
        Self {
            pending: Mutex::new(HashMap::new()),
            max_chars: config.max_chars,
            max_wait: config.max_wait,
            on_flush,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn post(&self, session_id: &str, text: &str) {
        tracing::debug!(session = session_id, bytes = text.len(), "flush");
        if let Some(on_flush) = &self.on_flush {
            on_flush(session_id, text);
        }
    }

    /// Append a chunk to a session's pending buffer.
    ///
    /// A buffer created by this call starts its age clock now. If the
    /// append brings the pending length to the size threshold, the session
    /// flushes synchronously before `add` returns.
    pub fn add(&self, session_id: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        let ready = {
            let mut pending = self.lock();
            let buf = pending
                .entry(session_id.to_string())
                .or_insert_with(|| Pending {
                    text: String::new(),
                    first_added: Instant::now(),
                });
            buf.text.push_str(text);
            if buf.text.len() >= self.max_chars {
                pending.remove(session_id)
            } else {
                None
            }
        };
        if let Some(buf) = ready {
            self.post(session_id, &buf.text);
        }
    }

    /// Flush every session whose oldest pending byte has reached the age
    /// threshold. Called by the frame driver once per tick.
    pub fn tick(&self) {
        let now = Instant::now();
        let expired: Vec<(String, Pending)> = {
            let mut pending = self.lock();
            let due: Vec<String> = pending
                .iter()
                .filter(|(_, buf)| now.duration_since(buf.first_added) >= self.max_wait)
                .map(|(id, _)| id.clone())
                .collect();
            due.into_iter()
                .filter_map(|id| pending.remove(&id).map(|buf| (id, buf)))
                .collect()
        };
        for (session_id, buf) in expired {
            self.post(&session_id, &buf.text);
        }
    }

    /// Flush one session unconditionally. Nothing is posted for a session
    /// with no pending text.
    pub fn flush(&self, session_id: &str) {
        let buf = self.lock().remove(session_id);
        if let Some(buf) = buf {
            self.post(session_id, &buf.text);
        }
    }

    /// Flush every pending session.
    pub fn flush_all(&self) {
        let drained: Vec<(String, Pending)> = self.lock().drain().collect();
        for (session_id, buf) in drained {
            self.post(&session_id, &buf.text);
        }
    }

    /// Discard a session's pending text without posting. A later `add`
    /// starts a fresh age clock.
    pub fn clear(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    /// Check whether any session has pending text.
    pub fn has_pending(&self) -> bool {
        !self.lock().is_empty()
    }
}
