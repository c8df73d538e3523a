//! Engine configuration - per-family parameter values.
//!
//! Each effect family (hearts, balloons, sparkles) is one `EngineConfig`
//! value handed to [`ParticleEngine::new`](super::ParticleEngine::new).
//! Attribute ranges are sampled uniformly per spawned particle; a degenerate
//! range (`start == end`) pins the attribute to a constant.
//!
//! Configuration is the only thing that can be invalid in this crate, and it
//! is rejected synchronously at construction - ticks on a live engine cannot
//! fail.

use std::ops::Range;
use std::time::Duration;

use thiserror::Error;

use crate::types::Rgba;

// =============================================================================
// Mode
// =============================================================================

/// Intensity mode selecting which parameter set the Spawner uses.
///
/// `Excited` only has an effect on engines configured with
/// [`ExcitedParams`]; other families ignore mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Excited,
}

// =============================================================================
// Spawn Area & Cull Rule
// =============================================================================

/// Where newly spawned particles enter the viewport.
///
/// The viewport is re-queried on every spawn, so a resize immediately
/// affects where new particles appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnArea {
    /// Enter below the bottom edge, `offset` units past it (drifters).
    BelowBottom { offset: f32 },
    /// Appear anywhere inside the viewport (sparkles).
    Scattered,
}

/// When a particle becomes eligible for removal by the Reaper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CullRule {
    /// Removed once `y < -margin` (drifted past the top edge).
    AboveTop { margin: f32 },
    /// Removed once `now - spawned_at >= lifetime`.
    ///
    /// Requires [`AttributeRanges::lifetime_ms`] to be set.
    Expired,
}

// =============================================================================
// Attribute Ranges
// =============================================================================

/// Initial rotation range and per-tick rotation rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinRange {
    /// Initial angle in degrees, sampled at spawn.
    pub initial: Range<f32>,
    /// Degrees added per Advancer tick.
    pub rate: f32,
}

/// Randomization ranges for per-particle attributes, sampled independently
/// at spawn time. Fixed for the particle's whole life afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRanges {
    /// Visual size in viewport units.
    pub size: Range<f32>,
    /// Upward drift per Advancer tick. Must be non-negative - upward drift
    /// never reverses.
    pub speed: Range<f32>,
    /// Horizontal drift factor per Advancer tick, `None` for straight risers.
    pub sway: Option<Range<f32>>,
    /// Rotation behavior, `None` for non-rotating families.
    pub spin: Option<SpinRange>,
    /// Rendering opacity (0.0 - 1.0).
    pub opacity: Range<f32>,
    /// Lifetime in milliseconds for age-culled families.
    pub lifetime_ms: Option<Range<u64>>,
    /// Colors drawn uniformly at random. Must not be empty.
    pub palette: Vec<Rgba>,
    /// Number of visual variants the renderer can map (glyph index, etc.).
    /// Must be at least 1.
    pub variants: u8,
}

impl Default for AttributeRanges {
    fn default() -> Self {
        Self {
            size: 10.0..20.0,
            speed: 1.0..2.0,
            sway: None,
            spin: None,
            opacity: 1.0..1.0,
            lifetime_ms: None,
            palette: vec![Rgba::rgb(255, 255, 255)],
            variants: 1,
        }
    }
}

// =============================================================================
// Excited Parameters
// =============================================================================

/// Parameter set swapped in while the engine is in [`Mode::Excited`].
///
/// Capacity and spawn interval replace the normal values atomically;
/// the multipliers apply to newly spawned particles only - particles
/// already alive keep their original attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcitedParams {
    pub capacity: usize,
    pub spawn_interval: Duration,
    pub speed_multiplier: f32,
    pub size_multiplier: f32,
}

// =============================================================================
// Engine Config
// =============================================================================

/// Complete configuration for one engine instance.
///
/// See the [`families`](crate::families) module for the built-in presets.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum live population. The Spawner refuses to add at cap; existing
    /// particles are never truncated. Zero is legal (permanently at cap).
    pub capacity: usize,
    /// Particles seeded when the engine transitions to Running.
    pub initial_batch: usize,
    /// Spawner period.
    pub spawn_interval: Duration,
    /// Advancer period.
    pub advance_interval: Duration,
    /// Reaper period. The Reaper runs from construction to disposal,
    /// independent of the active signal.
    pub reap_interval: Duration,
    /// Where new particles enter.
    pub spawn_area: SpawnArea,
    /// Damping factor applied to `sway` each Advancer tick.
    pub sway_damping: f32,
    /// Per-particle randomization ranges.
    pub attributes: AttributeRanges,
    /// Removal rule evaluated by the Reaper.
    pub cull: CullRule,
    /// Excited-mode parameter set, `None` for single-mode families.
    pub excited: Option<ExcitedParams>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            initial_batch: 0,
            spawn_interval: Duration::from_millis(1000),
            advance_interval: Duration::from_millis(100),
            reap_interval: Duration::from_millis(1000),
            spawn_area: SpawnArea::BelowBottom { offset: 50.0 },
            sway_damping: 1.0,
            attributes: AttributeRanges::default(),
            cull: CullRule::AboveTop { margin: 100.0 },
            excited: None,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration. Called once by `ParticleEngine::new`.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("spawn"));
        }
        if self.advance_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("advance"));
        }
        if self.reap_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("reap"));
        }
        if let Some(excited) = &self.excited {
            if excited.spawn_interval.is_zero() {
                return Err(ConfigError::ZeroInterval("excited spawn"));
            }
        }

        let attrs = &self.attributes;
        if attrs.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if attrs.variants == 0 {
            return Err(ConfigError::NoVariants);
        }
        if attrs.size.start > attrs.size.end {
            return Err(ConfigError::InvalidRange("size"));
        }
        if attrs.speed.start > attrs.speed.end {
            return Err(ConfigError::InvalidRange("speed"));
        }
        if attrs.speed.start < 0.0 {
            return Err(ConfigError::NegativeSpeed);
        }
        if attrs.opacity.start > attrs.opacity.end {
            return Err(ConfigError::InvalidRange("opacity"));
        }
        if let Some(sway) = &attrs.sway {
            if sway.start > sway.end {
                return Err(ConfigError::InvalidRange("sway"));
            }
        }
        if let Some(spin) = &attrs.spin {
            if spin.initial.start > spin.initial.end {
                return Err(ConfigError::InvalidRange("spin"));
            }
        }
        if let Some(lifetime) = &attrs.lifetime_ms {
            if lifetime.start > lifetime.end {
                return Err(ConfigError::InvalidRange("lifetime"));
            }
        }
        if matches!(self.cull, CullRule::Expired) && attrs.lifetime_ms.is_none() {
            return Err(ConfigError::MissingLifetime);
        }

        Ok(())
    }

    /// Capacity in effect for the given mode.
    ///
    /// Falls back to the normal capacity when no excited set is configured.
    pub fn capacity_for(&self, mode: Mode) -> usize {
        match (mode, &self.excited) {
            (Mode::Excited, Some(excited)) => excited.capacity,
            _ => self.capacity,
        }
    }

    /// Spawner period in effect for the given mode.
    pub fn spawn_interval_for(&self, mode: Mode) -> Duration {
        match (mode, &self.excited) {
            (Mode::Excited, Some(excited)) => excited.spawn_interval,
            _ => self.spawn_interval,
        }
    }

    /// `(speed, size)` multipliers applied to spawns in the given mode.
    pub fn multipliers_for(&self, mode: Mode) -> (f32, f32) {
        match (mode, &self.excited) {
            (Mode::Excited, Some(excited)) => {
                (excited.speed_multiplier, excited.size_multiplier)
            }
            _ => (1.0, 1.0),
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Invalid configuration, rejected at engine construction.
///
/// This is the crate's only error class: ticks on a live engine mutate an
/// in-memory collection and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} interval must be non-zero")]
    ZeroInterval(&'static str),
    #[error("color palette must not be empty")]
    EmptyPalette,
    #[error("invalid {0} range: start must not exceed end")]
    InvalidRange(&'static str),
    #[error("speed range must be non-negative")]
    NegativeSpeed,
    #[error("expiry culling requires a lifetime range")]
    MissingLifetime,
    #[error("variant count must be at least 1")]
    NoVariants,
}

// =============================================================================
// Tests
// =============================================================================
