#![forbid(unsafe_code)]

//! Layered composition: a base screen plus a stack of overlays.
//!
//! Overlays are full-size screens composed low-to-high onto the base before
//! each render. The compose rule is opaque-over-transparent where
//! transparency means the empty cell: an overlay cell survives onto the base
//! iff it is not a plain space in the default style. There is no alpha
//! blending; a client that wants "background fill but foreground inherit"
//! writes its own styled space into the overlay.
//!
//! Every layer sits behind its own `RwLock` so a UI thread can draw into a
//! layer while producers fill others. Lock order is fixed: the base write
//! lock first, then overlay read locks bottom-up, which precludes deadlock
//! against any path that follows the same order.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::diff::{self, DiffStats};
use crate::geometry::Region;
use crate::screen::Screen;

/// A shared, lock-guarded draw surface.
pub type SharedScreen = Arc<RwLock<Screen>>;

fn read(screen: &SharedScreen) -> RwLockReadGuard<'_, Screen> {
    screen.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(screen: &SharedScreen) -> RwLockWriteGuard<'_, Screen> {
    screen.write().unwrap_or_else(PoisonError::into_inner)
}

/// A base screen with an ordered stack of overlay layers.
#[derive(Debug)]
pub struct Compositor {
    base: SharedScreen,
    layers: Vec<SharedScreen>,
}

impl Compositor {
    /// Create a compositor with an empty base of the given size and no
    /// overlays.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            base: Arc::new(RwLock::new(Screen::new(width, height))),
            layers: Vec::new(),
        }
    }

    /// The base draw surface.
    pub fn screen(&self) -> SharedScreen {
        Arc::clone(&self.base)
    }

    /// Current dimensions as (width, height).
    pub fn size(&self) -> (u16, u16) {
        read(&self.base).size()
    }

    /// Number of overlay layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Append a new empty overlay sized to the base and return its handle.
    pub fn add_layer(&mut self) -> SharedScreen {
        let (width, height) = self.size();
        let layer = Arc::new(RwLock::new(Screen::new(width, height)));
        self.layers.push(Arc::clone(&layer));
        layer
    }

    /// Pop the topmost overlay. No-op when there are none.
    pub fn remove_layer(&mut self) {
        self.layers.pop();
    }

    /// Drop all overlays.
    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Resize the base and every overlay to the same dimensions.
    pub fn resize(&mut self, width: u16, height: u16) {
        write(&self.base).resize(width, height);
        for layer in &self.layers {
            write(layer).resize(width, height);
        }
    }

    /// Set the base cursor position and visibility.
    pub fn set_cursor(&mut self, x: u16, y: u16, visible: bool) {
        let mut base = write(&self.base);
        base.set_cursor(x, y);
        base.set_cursor_visible(visible);
    }

    /// Merge the overlays into the base's current buffer, low to high.
    ///
    /// Idempotent: composing twice without intervening draws copies the same
    /// cells again. Continuation slots are copied as-is so wide glyph
    /// placement survives composition.
    pub fn compose(&self) {
        let mut base = write(&self.base);
        let (width, height) = base.size();
        for layer in &self.layers {
            let overlay = read(layer);
            for y in 0..height {
                for x in 0..width {
                    let cell = overlay.get(x, y);
                    if !cell.is_empty() {
                        base.put_raw(x, y, cell);
                    }
                }
            }
        }
    }

    /// Compose, then emit the incremental diff for the merged scene.
    pub fn render(&self) -> Vec<u8> {
        self.compose();
        diff::render(&mut write(&self.base))
    }

    /// Compose, then emit a full repaint of the merged scene.
    pub fn render_full(&self) -> Vec<u8> {
        self.compose();
        diff::render_full(&mut write(&self.base))
    }

    /// Compose, then emit the diff restricted to `region`.
    pub fn render_region(&self, region: Region) -> Vec<u8> {
        self.compose();
        diff::render_region(&mut write(&self.base), region)
    }

    /// Observational diff counters for the base screen as it stands.
    pub fn diff_stats(&self) -> DiffStats {
        diff::diff_stats(&read(&self.base))
    }
}
