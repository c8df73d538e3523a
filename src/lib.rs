//! # spark-particles
//!
//! Reactive particle lifecycle engine for celebratory overlay effects.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! One generic engine, three periodic tasks, instantiated once per effect
//! family (hearts, balloons, sparkles):
//!
//! ```text
//! pump(now) → Spawner / Advancer / Reaper ticks
//!           → particles signal
//!           → render effect (repaints on each collection change)
//! ```
//!
//! The Spawner inserts while the engine is active and under capacity, the
//! Advancer drifts every live particle, and the Reaper deletes off-screen or
//! expired particles from construction until disposal - so effects wind down
//! gracefully when deactivated instead of vanishing. Renderers subscribe to
//! the collection signal and read immutable snapshots; nothing else ever
//! touches an engine's particles.
//!
//! ## Modules
//!
//! - [`engine`] - the lifecycle engine, its configuration, and particles
//! - [`families`] - built-in hearts / balloons / sparkles presets
//! - [`viewport`] - reactive spawn/cull bounds
//! - [`render`] - snapshot subscriptions and the terminal glyph renderer
//! - [`driver`] - wall-clock pumping loop
//!
//! ## Example
//!
//! ```ignore
//! use spark_particles::{driver, families, on_collection_changed, ParticleEngine};
//!
//! let hearts = ParticleEngine::new(families::hearts())?;
//! let _stop = on_collection_changed(&hearts, |snapshot| repaint(snapshot));
//!
//! hearts.set_active(true);
//! driver::run(&driver::DriverHandle::new(), &[&hearts]);
//! ```

pub mod driver;
pub mod engine;
pub mod families;
pub mod render;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::Rgba;

pub use engine::{
    AttributeRanges, ConfigError, CullRule, EngineConfig, ExcitedParams, Mode, Particle,
    ParticleEngine, ParticleId, SpawnArea, SpinRange, Tasks,
};

pub use render::{on_collection_changed, Cleanup, Layer, TerminalRenderer};

pub use driver::DriverHandle;

pub use viewport::{
    detect_viewport_size, set_viewport_size, viewport_height, viewport_size, viewport_width,
};
