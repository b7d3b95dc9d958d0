#![forbid(unsafe_code)]

//! Memoized style encoding.
//!
//! Encoding a [`Style`] to its SGR byte sequence is cheap but not free, and
//! a busy frame asks for the same handful of styles thousands of times. The
//! cache maps each style to its encoded form once and shares the bytes via
//! `Arc`. Concurrent readers proceed in parallel; a miss briefly upgrades to
//! exclusive access. The cache is a pure optimization: every lookup returns
//! exactly what [`ansi::encode_style`](crate::ansi::encode_style) would
//! produce.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ansi;
use crate::style::Style;

/// Thread-safe memoization from styles to encoded SGR sequences.
#[derive(Debug, Default)]
pub struct StyleCache {
    entries: RwLock<HashMap<Style, Arc<[u8]>>>,
}

impl StyleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the encoded SGR sequence for `style`, computing and storing
    /// it on first sight.
    pub fn encoded(&self, style: Style) -> Arc<[u8]> {
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&style)
        {
            return Arc::clone(hit);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have raced us between the two locks.
        if let Some(hit) = entries.get(&style) {
            return Arc::clone(hit);
        }
        let mut bytes = Vec::new();
        ansi::encode_style(&mut bytes, style);
        let encoded: Arc<[u8]> = bytes.into();
        entries.insert(style, Arc::clone(&encoded));
        encoded
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of distinct styles cached.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
