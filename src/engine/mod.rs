//! Particle Lifecycle Engine - bounded, timer-driven particle collections.
//!
//! One [`ParticleEngine`] per effect family (hearts, balloons, sparkles),
//! each owning one collection and three periodic tasks:
//!
//! - **Spawner** - inserts new particles while active and under capacity
//! - **Advancer** - drifts every live particle upward each tick
//! - **Reaper** - deletes off-screen or expired particles; runs from
//!   construction to disposal, independent of the active signal
//!
//! # Data Flow
//!
//! ```text
//! pump(now) → due ticks (Spawner / Advancer / Reaper)
//!           → particles signal
//!           → render effect (repaints on each collection change)
//! ```
//!
//! The collection lives in a `Signal<Vec<Particle>>`; every insert, advance
//! pass, and removal publishes a fresh snapshot, which is the
//! collection-changed notification renderers subscribe to.
//!
//! # Scheduling
//!
//! Execution is single-threaded and cooperative: the driving loop calls
//! [`ParticleEngine::pump`] with the current engine time and each armed
//! schedule fires once per elapsed period. No tick blocks, every tick is
//! O(population), and the insert / mutate-in-place / delete-by-id effects
//! commute - same-instant ordering between the three tasks carries no
//! correctness weight.

mod config;
mod particle;
mod schedule;

pub use config::{
    AttributeRanges, ConfigError, CullRule, EngineConfig, ExcitedParams, Mode, SpawnArea,
    SpinRange,
};
pub use particle::{Particle, ParticleId};
pub use schedule::Tasks;

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::time::Duration;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spark_signals::{signal, Signal};

use crate::viewport;
use schedule::Schedule;

// =============================================================================
// Particle Engine
// =============================================================================

/// A bounded particle collection under three periodic tasks.
///
/// Construction validates the configuration and arms the Reaper;
/// [`set_active`](Self::set_active) arms and disarms the Spawner and
/// Advancer. Disposal (explicit or on drop) cancels all three schedules
/// unconditionally.
///
/// The engine is the exclusive owner of its collection - instances never
/// share state, and renderers only read snapshots.
///
/// # Example
///
/// ```ignore
/// use spark_particles::{families, ParticleEngine};
///
/// let hearts = ParticleEngine::new(families::hearts())?;
/// hearts.set_active(true);
/// // drive from your loop, or use spark_particles::driver
/// hearts.pump(std::time::Duration::from_millis(16));
/// ```
#[derive(Debug)]
pub struct ParticleEngine {
    config: EngineConfig,
    mode: Cell<Mode>,
    armed: Cell<Tasks>,
    disposed: Cell<bool>,
    /// Last engine time observed by `pump` (also the seed/mode-switch
    /// reference point).
    clock: Cell<Duration>,
    next_id: Cell<u64>,
    spawner: RefCell<Schedule>,
    advancer: RefCell<Schedule>,
    reaper: RefCell<Schedule>,
    particles: Signal<Vec<Particle>>,
    rng: RefCell<StdRng>,
}

impl ParticleEngine {
    /// Create a dormant engine from a validated configuration.
    ///
    /// The collection starts empty, the Reaper is armed (its schedule
    /// belongs to the engine's lifetime), and no spawning or advancing
    /// happens until [`set_active`](Self::set_active).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid configuration - the only error
    /// condition in this crate.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) but with a fixed RNG seed, for deterministic
    /// tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let now = Duration::ZERO;
        Ok(Self {
            spawner: RefCell::new(Schedule::new(config.spawn_interval, now)),
            advancer: RefCell::new(Schedule::new(config.advance_interval, now)),
            reaper: RefCell::new(Schedule::new(config.reap_interval, now)),
            config,
            mode: Cell::new(Mode::Normal),
            armed: Cell::new(Tasks::REAPER),
            disposed: Cell::new(false),
            clock: Cell::new(now),
            next_id: Cell::new(0),
            particles: signal(Vec::new()),
            rng: RefCell::new(rng),
        })
    }

    // -------------------------------------------------------------------------
    // Activity signal
    // -------------------------------------------------------------------------

    /// Transition between Dormant and Running.
    ///
    /// On false→true: seed the initial batch (clamped to capacity) and arm
    /// the Spawner and Advancer. On true→false: disarm them; existing
    /// particles are NOT cleared - the Reaper keeps running and the
    /// collection winds down naturally.
    ///
    /// Idempotent in both directions; a no-op after disposal.
    pub fn set_active(&self, active: bool) {
        if self.disposed.get() || active == self.is_active() {
            return;
        }

        let now = self.clock.get();
        if active {
            self.seed_initial_batch(now);
            let mode = self.mode.get();
            self.spawner
                .borrow_mut()
                .rearm(self.config.spawn_interval_for(mode), now);
            self.advancer
                .borrow_mut()
                .rearm(self.config.advance_interval, now);
            self.armed
                .set(self.armed.get() | Tasks::SPAWNER | Tasks::ADVANCER);
            debug!("engine activated ({} seeded)", self.len());
        } else {
            self.armed
                .set(self.armed.get() & !(Tasks::SPAWNER | Tasks::ADVANCER));
            debug!("engine deactivated, {} particles winding down", self.len());
        }
    }

    /// Whether the Spawner/Advancer pair is currently armed.
    pub fn is_active(&self) -> bool {
        self.armed.get().contains(Tasks::SPAWNER)
    }

    // -------------------------------------------------------------------------
    // Mode switching
    // -------------------------------------------------------------------------

    /// Switch between the normal and excited parameter sets.
    ///
    /// Swaps capacity and spawn interval atomically and changes the
    /// speed/size multipliers applied to FUTURE spawns; particles already
    /// alive keep their attributes, and reverting never force-removes them.
    ///
    /// Ignored by engines configured without [`ExcitedParams`], and after
    /// disposal.
    pub fn set_mode(&self, mode: Mode) {
        if self.disposed.get() || self.config.excited.is_none() || mode == self.mode.get() {
            return;
        }

        self.mode.set(mode);
        if self.is_active() {
            self.spawner
                .borrow_mut()
                .rearm(self.config.spawn_interval_for(mode), self.clock.get());
        }
        debug!("mode switched to {mode:?}, capacity now {}", self.capacity());
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Capacity in effect for the current mode.
    pub fn capacity(&self) -> usize {
        self.config.capacity_for(self.mode.get())
    }

    // -------------------------------------------------------------------------
    // Pump
    // -------------------------------------------------------------------------

    /// Fire every armed schedule that has come due at engine time `now`.
    ///
    /// Synchronous and in-thread: each schedule fires once per elapsed
    /// period (deterministic catch-up), except the Reaper whose elapsed
    /// periods collapse into one pass - reaping is idempotent at a fixed
    /// `now`. A no-op after disposal.
    pub fn pump(&self, now: Duration) {
        if self.disposed.get() {
            return;
        }
        self.clock.set(now);

        let armed = self.armed.get();
        if armed.contains(Tasks::SPAWNER) {
            let due = self.spawner.borrow_mut().due_ticks(now);
            for _ in 0..due {
                self.spawn_tick(now);
            }
        }
        if armed.contains(Tasks::ADVANCER) {
            let due = self.advancer.borrow_mut().due_ticks(now);
            for _ in 0..due {
                self.advance_tick();
            }
        }
        if armed.contains(Tasks::REAPER) && self.reaper.borrow_mut().due_ticks(now) > 0 {
            self.reap_tick(now);
        }
    }

    // -------------------------------------------------------------------------
    // Disposal
    // -------------------------------------------------------------------------

    /// Tear the engine down: cancel all three schedules unconditionally.
    ///
    /// After disposal every operation is a no-op and no further
    /// collection-changed notifications fire. Also invoked on drop.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.armed.set(Tasks::empty());
        debug!("engine disposed with {} live particles", self.len());
    }

    /// Whether the engine has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    // -------------------------------------------------------------------------
    // Collection access
    // -------------------------------------------------------------------------

    /// The collection signal. Renderers subscribe through
    /// [`render::on_collection_changed`](crate::render::on_collection_changed)
    /// or their own `effect`.
    pub fn particles(&self) -> &Signal<Vec<Particle>> {
        &self.particles
    }

    /// An immutable snapshot of the live collection.
    pub fn snapshot(&self) -> Vec<Particle> {
        self.particles.get()
    }

    /// Current population.
    pub fn len(&self) -> usize {
        self.particles.get().len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.get().is_empty()
    }

    /// The set of currently armed periodic tasks.
    pub fn armed_tasks(&self) -> Tasks {
        self.armed.get()
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Spawner
    // -------------------------------------------------------------------------

    fn seed_initial_batch(&self, now: Duration) {
        let count = self.config.initial_batch.min(self.capacity());
        if count == 0 {
            return;
        }
        let mut list = self.particles.get();
        for _ in 0..count {
            list.push(self.make_particle(now));
        }
        self.particles.set(list);
    }

    /// One Spawner firing: insert a single randomized particle, or silently
    /// skip at capacity (back-pressure; excess attempts are never queued).
    fn spawn_tick(&self, now: Duration) {
        let mut list = self.particles.get();
        if list.len() >= self.capacity() {
            trace!("spawn skipped, at capacity {}", self.capacity());
            return;
        }
        list.push(self.make_particle(now));
        self.particles.set(list);
    }

    fn allocate_id(&self) -> ParticleId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ParticleId(id)
    }

    fn make_particle(&self, now: Duration) -> Particle {
        // Re-query the viewport on every spawn so resizes take effect
        // immediately.
        let (width, height) = viewport::viewport_size();
        let attrs = &self.config.attributes;
        let (speed_mul, size_mul) = self.config.multipliers_for(self.mode.get());
        let mut rng = self.rng.borrow_mut();

        let (x, y) = match self.config.spawn_area {
            SpawnArea::BelowBottom { offset } => {
                (sample_f32(&mut rng, &(0.0..width)), height + offset)
            }
            SpawnArea::Scattered => (
                sample_f32(&mut rng, &(0.0..width)),
                sample_f32(&mut rng, &(0.0..height)),
            ),
        };
        let (rotation, spin) = match &attrs.spin {
            Some(spin) => (sample_f32(&mut rng, &spin.initial), spin.rate),
            None => (0.0, 0.0),
        };
        let sway = match &attrs.sway {
            Some(range) => sample_f32(&mut rng, range),
            None => 0.0,
        };
        let lifetime = attrs
            .lifetime_ms
            .as_ref()
            .map(|range| Duration::from_millis(sample_u64(&mut rng, range)));
        let color = attrs.palette[rng.gen_range(0..attrs.palette.len())];
        let variant = rng.gen_range(0..attrs.variants);

        Particle {
            id: self.allocate_id(),
            x,
            y,
            speed: sample_f32(&mut rng, &attrs.speed) * speed_mul,
            sway,
            rotation,
            spin,
            size: sample_f32(&mut rng, &attrs.size) * size_mul,
            opacity: sample_f32(&mut rng, &attrs.opacity),
            color,
            variant,
            spawned_at: now,
            lifetime,
        }
    }

    // -------------------------------------------------------------------------
    // Advancer
    // -------------------------------------------------------------------------

    /// One Advancer firing: a pure per-particle transform, independent
    /// across particles.
    fn advance_tick(&self) {
        let mut list = self.particles.get();
        if list.is_empty() {
            return;
        }
        let damping = self.config.sway_damping;
        for particle in &mut list {
            particle.y -= particle.speed;
            particle.x += particle.sway * damping;
            particle.rotation += particle.spin;
        }
        self.particles.set(list);
    }

    // -------------------------------------------------------------------------
    // Reaper
    // -------------------------------------------------------------------------

    /// One Reaper pass: delete every particle past its cull rule.
    /// Publishes only if something was removed.
    fn reap_tick(&self, now: Duration) {
        let mut list = self.particles.get();
        let before = list.len();
        let cull = self.config.cull;
        list.retain(|particle| !is_culled(particle, cull, now));
        if list.len() != before {
            trace!("reaped {} particles", before - list.len());
            self.particles.set(list);
        }
    }
}

impl Drop for ParticleEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn is_culled(particle: &Particle, cull: CullRule, now: Duration) -> bool {
    match cull {
        CullRule::AboveTop { margin } => particle.y < -margin,
        CullRule::Expired => particle.is_expired(now),
    }
}

/// Sample a value uniformly from a range; a degenerate range pins the
/// attribute to a constant (`gen_range` rejects empty ranges).
fn sample_f32(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.start >= range.end {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

fn sample_u64(rng: &mut StdRng, range: &Range<u64>) -> u64 {
    if range.start >= range.end {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{reset_viewport_state, set_viewport_size};
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() {
        reset_viewport_state();
        set_viewport_size(200.0, 100.0);
    }

    /// Riser config: spawns every 100ms, advances every 10ms, reaps every
    /// 50ms, culled 20 units above the top edge.
    fn riser_config() -> EngineConfig {
        EngineConfig {
            capacity: 10,
            initial_batch: 0,
            spawn_interval: ms(100),
            advance_interval: ms(10),
            reap_interval: ms(50),
            spawn_area: SpawnArea::BelowBottom { offset: 10.0 },
            sway_damping: 0.3,
            attributes: AttributeRanges {
                size: 15.0..35.0,
                speed: 5.0..10.0,
                sway: Some(-1.0..1.0),
                spin: Some(SpinRange {
                    initial: 0.0..360.0,
                    rate: 0.5,
                }),
                ..AttributeRanges::default()
            },
            cull: CullRule::AboveTop { margin: 20.0 },
            excited: None,
        }
    }

    /// Twinkler config: age-culled, stationary, fixed 2000ms lifetime.
    fn twinkler_config() -> EngineConfig {
        EngineConfig {
            capacity: 30,
            initial_batch: 5,
            spawn_interval: ms(500),
            advance_interval: ms(100),
            reap_interval: ms(100),
            spawn_area: SpawnArea::Scattered,
            sway_damping: 1.0,
            attributes: AttributeRanges {
                speed: 0.0..0.0,
                lifetime_ms: Some(2000..2000),
                ..AttributeRanges::default()
            },
            cull: CullRule::Expired,
            excited: None,
        }
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        setup();
        let mut config = riser_config();
        config.advance_interval = Duration::ZERO;
        assert_eq!(
            ParticleEngine::new(config).unwrap_err(),
            ConfigError::ZeroInterval("advance")
        );
    }

    #[test]
    fn test_fresh_engine_is_dormant_with_reaper_armed() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 1).unwrap();
        assert!(engine.is_empty());
        assert!(!engine.is_active());
        assert_eq!(engine.armed_tasks(), Tasks::REAPER);
    }

    #[test]
    fn test_capacity_never_exceeded_by_spawner() {
        setup();
        let mut config = riser_config();
        config.capacity = 3;
        config.reap_interval = ms(1_000_000); // reaper never fires here
        let engine = ParticleEngine::with_seed(config, 2).unwrap();
        engine.set_active(true);

        // 5 spawn periods elapse; population caps at 3, not 5.
        for tick in 1..=5 {
            engine.pump(ms(tick * 100));
            assert!(engine.len() <= 3);
        }
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_zero_capacity_spawns_nothing() {
        setup();
        let mut config = riser_config();
        config.capacity = 0;
        config.initial_batch = 5;
        let engine = ParticleEngine::with_seed(config, 3).unwrap();
        engine.set_active(true);
        engine.pump(ms(1000));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_activate_seeds_initial_batch_once() {
        setup();
        let mut config = riser_config();
        config.initial_batch = 4;
        let engine = ParticleEngine::with_seed(config, 4).unwrap();

        engine.set_active(true);
        assert_eq!(engine.len(), 4);
        let ids: Vec<ParticleId> = engine.snapshot().iter().map(|p| p.id).collect();

        // Re-activating while Running must not reset or duplicate.
        engine.set_active(true);
        let after: Vec<ParticleId> = engine.snapshot().iter().map(|p| p.id).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn test_ids_unique_and_monotonic() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 5).unwrap();
        engine.set_active(true);
        engine.pump(ms(500));

        let snapshot = engine.snapshot();
        assert!(snapshot.len() > 1);
        for pair in snapshot.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_upward_drift_is_monotonic() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 6).unwrap();
        engine.set_active(true);
        engine.pump(ms(100));

        let mut previous = engine.snapshot();
        for step in 1..=10 {
            engine.pump(ms(100 + step * 10));
            let current = engine.snapshot();
            for particle in &current {
                if let Some(was) = previous.iter().find(|p| p.id == particle.id) {
                    assert!(particle.y <= was.y, "upward drift reversed");
                }
            }
            previous = current;
        }
    }

    #[test]
    fn test_advancer_applies_sway_and_spin() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 7).unwrap();
        engine.set_active(true);
        engine.pump(ms(100));
        let before = engine.snapshot();

        engine.pump(ms(110)); // exactly one advance period later
        let after = engine.snapshot();

        for (was, now) in before.iter().zip(after.iter()) {
            assert_eq!(now.y, was.y - was.speed);
            assert_eq!(now.x, was.x + was.sway * 0.3);
            assert_eq!(now.rotation, was.rotation + 0.5);
        }
    }

    #[test]
    fn test_reaper_removes_everything_past_cull_rule() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 8).unwrap();
        engine.set_active(true);

        // Run long enough for early spawns to clear the top margin.
        for tick in 1..=400 {
            engine.pump(ms(tick * 10));
        }
        let margin = 20.0;
        for particle in engine.snapshot() {
            assert!(particle.y >= -margin, "cullable particle survived a reap");
        }
    }

    #[test]
    fn test_sparkle_expiry_boundaries() {
        setup();
        let mut config = twinkler_config();
        config.initial_batch = 1;
        config.spawn_interval = ms(1_000_000); // only the seeded particle
        let engine = ParticleEngine::with_seed(config, 9).unwrap();
        engine.set_active(true);
        assert_eq!(engine.len(), 1);

        // Seeded at t=0 with a 2000ms lifetime.
        engine.pump(ms(1999));
        assert_eq!(engine.len(), 1, "reaped before its lifetime elapsed");

        engine.pump(ms(2001));
        assert_eq!(engine.len(), 0, "survived past its lifetime");
    }

    #[test]
    fn test_sparkle_expires_at_exact_lifetime() {
        setup();
        let mut config = twinkler_config();
        config.initial_batch = 1;
        config.spawn_interval = ms(1_000_000);
        let engine = ParticleEngine::with_seed(config, 10).unwrap();
        engine.set_active(true);

        engine.pump(ms(2000));
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn test_deactivation_lets_collection_wind_down() {
        setup();
        let engine = ParticleEngine::with_seed(twinkler_config(), 11).unwrap();
        engine.set_active(true);
        engine.pump(ms(500));
        assert!(!engine.is_empty());

        engine.set_active(false);
        assert!(!engine.is_empty(), "deactivation must not clear immediately");
        assert_eq!(engine.armed_tasks(), Tasks::REAPER);

        // The Reaper keeps running without the active signal and the
        // collection empties on its own once every lifetime has elapsed.
        engine.pump(ms(5000));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_excited_mode_raises_cap_and_scales_new_spawns() {
        setup();
        let mut config = riser_config();
        config.capacity = 2;
        config.attributes.speed = 5.0..5.0;
        config.attributes.size = 10.0..10.0;
        config.excited = Some(ExcitedParams {
            capacity: 200,
            spawn_interval: ms(10),
            speed_multiplier: 1.5,
            size_multiplier: 1.3,
        });
        let engine = ParticleEngine::with_seed(config, 12).unwrap();
        engine.set_active(true);

        // Fill to the normal cap.
        engine.pump(ms(200));
        assert_eq!(engine.len(), 2);
        let normal_ids: Vec<ParticleId> = engine.snapshot().iter().map(|p| p.id).collect();

        engine.set_mode(Mode::Excited);
        assert_eq!(engine.capacity(), 200);
        engine.pump(ms(250));
        assert!(engine.len() > 2, "excited spawner should outpace normal cap");

        for particle in engine.snapshot() {
            if normal_ids.contains(&particle.id) {
                // Particles alive before the switch keep their attributes.
                assert_eq!(particle.speed, 5.0);
                assert_eq!(particle.size, 10.0);
            } else {
                assert!((particle.speed - 7.5).abs() < 1e-3);
                assert!((particle.size - 13.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_mode_revert_never_force_removes() {
        setup();
        let mut config = riser_config();
        config.capacity = 2;
        config.excited = Some(ExcitedParams {
            capacity: 200,
            spawn_interval: ms(10),
            speed_multiplier: 1.5,
            size_multiplier: 1.3,
        });
        let engine = ParticleEngine::with_seed(config, 13).unwrap();
        engine.set_active(true);
        engine.set_mode(Mode::Excited);
        engine.pump(ms(100));
        let excited_count = engine.len();
        assert!(excited_count > 2);

        engine.set_mode(Mode::Normal);
        // Over the normal cap, but nothing is truncated; the Spawner just
        // refuses until the Reaper drains the excess.
        assert_eq!(engine.len(), excited_count);
        assert_eq!(engine.capacity(), 2);

        engine.pump(ms(200));
        assert!(engine.len() <= excited_count);
    }

    #[test]
    fn test_mode_switch_ignored_without_excited_params() {
        setup();
        let engine = ParticleEngine::with_seed(riser_config(), 14).unwrap();
        engine.set_mode(Mode::Excited);
        assert_eq!(engine.mode(), Mode::Normal);
    }

    #[test]
    fn test_spawner_notifies_on_each_insert() {
        setup();
        let engine = Rc::new(ParticleEngine::with_seed(riser_config(), 15).unwrap());
        let notifications = Rc::new(StdCell::new(0usize));

        let particles = engine.particles().clone();
        let seen = notifications.clone();
        let stop = spark_signals::effect(move || {
            let _ = particles.get();
            seen.set(seen.get() + 1);
        });
        let baseline = notifications.get();

        engine.set_active(true);
        engine.pump(ms(100));
        assert!(notifications.get() > baseline);
        stop();
    }

    #[test]
    fn test_disposal_silences_all_ticks() {
        setup();
        let engine = ParticleEngine::with_seed(twinkler_config(), 16).unwrap();
        engine.set_active(true);
        engine.pump(ms(500));

        let notifications = Rc::new(StdCell::new(0usize));
        let particles = engine.particles().clone();
        let seen = notifications.clone();
        let stop = spark_signals::effect(move || {
            let _ = particles.get();
            seen.set(seen.get() + 1);
        });
        let baseline = notifications.get();

        engine.dispose();
        assert_eq!(engine.armed_tasks(), Tasks::empty());

        // Pump far past the longest configured interval: no tick fires, no
        // notification arrives, and the lapsed lifetimes stay unreaped.
        let survivors = engine.len();
        engine.pump(ms(100_000));
        assert_eq!(notifications.get(), baseline);
        assert_eq!(engine.len(), survivors);

        engine.set_active(true);
        assert!(!engine.is_active());
        stop();
    }

    #[test]
    fn test_spawn_requeries_viewport() {
        setup();
        let mut config = riser_config();
        config.spawn_area = SpawnArea::BelowBottom { offset: 0.0 };
        let engine = ParticleEngine::with_seed(config, 17).unwrap();
        engine.set_active(true);

        engine.pump(ms(100));
        assert_eq!(engine.snapshot()[0].y, 100.0);

        // Resize between spawns: the next particle enters at the new edge.
        set_viewport_size(400.0, 50.0);
        engine.pump(ms(200));
        assert_eq!(engine.snapshot()[1].y, 50.0);
    }
}
