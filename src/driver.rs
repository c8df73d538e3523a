//! Driver - wall-clock pumping for particle engines.
//!
//! Engines are cooperative: something must call `pump` with the current
//! engine time. This module is that something for real applications,
//! translating `Instant` into engine time behind a stoppable handle.
//!
//! # Example
//!
//! ```ignore
//! use spark_particles::driver::{self, DriverHandle};
//!
//! let handle = DriverHandle::new();
//!
//! // Option 1: blocking loop at ~60fps
//! driver::run(&handle, &[&hearts, &balloons, &sparkles]);
//!
//! // Option 2: tick manually from your own event loop
//! while driver::tick(&handle, &[&hearts]) {
//!     // poll input, check timeouts, ...
//! }
//! ```
//!
//! Signals are thread-local, so engines and their subscribers live on the
//! driving thread; the atomic stop flag is the only thing that crosses
//! threads (Ctrl+C handlers, supervisors).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::engine::ParticleEngine;

/// Pause between pumps in the blocking loop (~60fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// =============================================================================
// Driver Handle
// =============================================================================

/// Handle owning a driving session's clock and stop flag.
///
/// Engine time is measured from the handle's creation, so every engine
/// pumped through one handle shares a timeline.
pub struct DriverHandle {
    running: Arc<AtomicBool>,
    started: Instant,
}

impl DriverHandle {
    /// Start a new driving session; the clock begins now.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            started: Instant::now(),
        }
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the session (the next `tick` returns false).
    /// Use this to trigger graceful shutdown from handlers.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        debug!("driver stopped");
    }

    /// Shared stop flag for cross-thread shutdown (signal handlers).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Engine time: elapsed wall clock since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for DriverHandle {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Loop
// =============================================================================

/// Pump every engine once with the session's current time (non-blocking).
///
/// Returns `false` once the session is stopped; engines are not pumped
/// after that.
pub fn tick(handle: &DriverHandle, engines: &[&ParticleEngine]) -> bool {
    if !handle.is_running() {
        return false;
    }
    let now = handle.elapsed();
    for engine in engines {
        engine.pump(now);
    }
    handle.is_running()
}

/// Pump in a blocking loop at [`FRAME_INTERVAL`] until stopped.
pub fn run(handle: &DriverHandle, engines: &[&ParticleEngine]) {
    while tick(handle, engines) {
        thread::sleep(FRAME_INTERVAL);
    }
}

// =============================================================================
// Tests
// =============================================================================
