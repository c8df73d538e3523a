//! Effect family presets for spark-particles.
//!
//! Contains the three built-in families of the celebration overlay:
//! - hearts (rising, rotating, with an excited burst mode)
//! - balloons (rising, swaying)
//! - sparkles (stationary, age-culled twinkles)
//!
//! The tuning constants are empirical - they reproduce the original overlay's
//! feel and are configuration defaults, not invariants. Take a preset and
//! override fields freely.

use std::time::Duration;

use crate::engine::{
    AttributeRanges, CullRule, EngineConfig, ExcitedParams, SpawnArea, SpinRange,
};
use crate::types::Rgba;

// =============================================================================
// Hearts
// =============================================================================

/// Floating hearts - rise from below the bottom edge, rotating slowly.
///
/// The only family with an excited mode: a tenfold capacity raise, a much
/// denser spawn cadence, and faster/larger new spawns. Reverting the mode is
/// the caller's timeout (the original page held it for 10 seconds).
pub fn hearts() -> EngineConfig {
    EngineConfig {
        capacity: 20,
        initial_batch: 5,
        spawn_interval: Duration::from_millis(1500),
        advance_interval: Duration::from_millis(80),
        reap_interval: Duration::from_millis(750),
        spawn_area: SpawnArea::BelowBottom { offset: 50.0 },
        sway_damping: 1.0,
        attributes: AttributeRanges {
            size: 15.0..35.0,
            speed: 1.0..3.0,
            sway: None,
            spin: Some(SpinRange {
                initial: 0.0..360.0,
                rate: 0.5,
            }),
            opacity: 0.7..0.7,
            lifetime_ms: None,
            // Weighted toward the signature pink - it appears twice.
            palette: vec![
                Rgba::from_rgb_int(0xff6b9d),
                Rgba::from_rgb_int(0xff8fab),
                Rgba::from_rgb_int(0xffb3c1),
                Rgba::from_rgb_int(0xff6b9d),
                Rgba::from_rgb_int(0xe91e63),
            ],
            variants: 1,
        },
        cull: CullRule::AboveTop { margin: 100.0 },
        excited: Some(ExcitedParams {
            capacity: 200,
            spawn_interval: Duration::from_millis(150),
            speed_multiplier: 1.5,
            size_multiplier: 1.3,
        }),
    }
}

// =============================================================================
// Balloons
// =============================================================================

/// Floating balloons - larger, slower risers that sway sideways.
pub fn balloons() -> EngineConfig {
    EngineConfig {
        capacity: 15,
        initial_batch: 4,
        spawn_interval: Duration::from_millis(3000),
        advance_interval: Duration::from_millis(120),
        reap_interval: Duration::from_millis(3000),
        spawn_area: SpawnArea::BelowBottom { offset: 100.0 },
        sway_damping: 0.3,
        attributes: AttributeRanges {
            size: 25.0..55.0,
            speed: 0.6..1.8,
            sway: Some(-1.0..1.0),
            spin: None,
            opacity: 0.8..0.8,
            lifetime_ms: None,
            palette: vec![
                Rgba::from_rgb_int(0xff6b9d),
                Rgba::from_rgb_int(0xff8fab),
                Rgba::from_rgb_int(0xffb3c1),
                Rgba::from_rgb_int(0xff6b9d),
                Rgba::from_rgb_int(0xe91e63),
                Rgba::from_rgb_int(0x9c27b0),
                Rgba::from_rgb_int(0xff9800),
            ],
            variants: 1,
        },
        cull: CullRule::AboveTop { margin: 150.0 },
        excited: None,
    }
}

// =============================================================================
// Sparkles
// =============================================================================

/// Ambient sparkles - scattered across the viewport, stationary, removed
/// once their randomized lifetime elapses.
pub fn sparkles() -> EngineConfig {
    EngineConfig {
        capacity: 60,
        initial_batch: 20,
        spawn_interval: Duration::from_millis(500),
        advance_interval: Duration::from_millis(100),
        reap_interval: Duration::from_millis(1000),
        spawn_area: SpawnArea::Scattered,
        sway_damping: 1.0,
        attributes: AttributeRanges {
            size: 4.0..12.0,
            // Sparkles twinkle in place; the Advancer tick is a no-op drift.
            speed: 0.0..0.0,
            sway: None,
            spin: None,
            opacity: 0.2..1.0,
            lifetime_ms: Some(2000..5000),
            palette: vec![
                Rgba::from_rgb_int(0xffd700),
                Rgba::from_rgb_int(0xff6b9d),
                Rgba::from_rgb_int(0xff8fab),
                Rgba::from_rgb_int(0xffb3c1),
                Rgba::from_rgb_int(0xe91e63),
                Rgba::from_rgb_int(0x9c27b0),
            ],
            variants: 1,
        },
        cull: CullRule::Expired,
        excited: None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Mode, ParticleEngine};

    #[test]
    fn test_all_presets_construct_engines() {
        for config in [hearts(), balloons(), sparkles()] {
            assert!(ParticleEngine::new(config).is_ok());
        }
    }

    #[test]
    fn test_hearts_excited_raises_capacity_tenfold() {
        let config = hearts();
        let excited = config.excited.expect("hearts carry an excited set");
        assert_eq!(excited.capacity, config.capacity * 10);
        assert!(excited.spawn_interval < config.spawn_interval);
        assert_eq!(config.capacity_for(Mode::Excited), 200);
    }

    #[test]
    fn test_only_hearts_have_excited_mode() {
        assert!(hearts().excited.is_some());
        assert!(balloons().excited.is_none());
        assert!(sparkles().excited.is_none());
    }

    #[test]
    fn test_palettes_match_the_overlay() {
        assert_eq!(hearts().attributes.palette.len(), 5);
        assert_eq!(balloons().attributes.palette.len(), 7);
        assert_eq!(sparkles().attributes.palette.len(), 6);
    }

    #[test]
    fn test_sparkles_are_age_culled_and_stationary() {
        let config = sparkles();
        assert_eq!(config.cull, CullRule::Expired);
        assert!(config.attributes.lifetime_ms.is_some());
        assert_eq!(config.attributes.speed, 0.0..0.0);
        assert_eq!(config.spawn_area, SpawnArea::Scattered);
    }

    #[test]
    fn test_risers_enter_below_the_viewport() {
        assert_eq!(
            hearts().spawn_area,
            SpawnArea::BelowBottom { offset: 50.0 }
        );
        assert_eq!(
            balloons().spawn_area,
            SpawnArea::BelowBottom { offset: 100.0 }
        );
    }

    #[test]
    fn test_balloons_sway_with_damping() {
        let config = balloons();
        assert_eq!(config.attributes.sway, Some(-1.0..1.0));
        assert!((config.sway_damping - 0.3).abs() < f32::EPSILON);
    }
}
