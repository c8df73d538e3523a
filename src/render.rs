//! Render adapter - snapshot subscriptions and a terminal glyph renderer.
//!
//! The engine's only rendering contract is its collection signal: subscribe,
//! receive an immutable snapshot on every collection change, paint however
//! you like. [`on_collection_changed`] packages that contract; the engine
//! has no dependency on how particles are drawn.
//!
//! [`TerminalRenderer`] is the crate's own consumer of the contract: it
//! paints layered families as colored glyphs into any [`io::Write`] target
//! (the demo points it at stdout, tests at a buffer).

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use spark_signals::effect;

use crate::engine::{Particle, ParticleEngine};
use crate::types::Rgba;
use crate::viewport;

// =============================================================================
// Subscription
// =============================================================================

/// Cleanup function returned by subscriptions.
///
/// Call it to stop receiving notifications and release the effect.
pub type Cleanup = Box<dyn FnOnce()>;

/// Subscribe to an engine's collection-changed notifications.
///
/// The callback receives an immutable snapshot of the live collection,
/// once immediately on subscription and then after every Spawner insert,
/// Advancer pass, and Reaper removal. Callbacks never mutate particles.
///
/// # Example
///
/// ```ignore
/// let stop = on_collection_changed(&hearts, |snapshot| {
///     repaint(snapshot);
/// });
/// // ...
/// stop();
/// ```
pub fn on_collection_changed<F>(engine: &ParticleEngine, mut callback: F) -> Cleanup
where
    F: FnMut(&[Particle]) + 'static,
{
    let particles = engine.particles().clone();
    Box::new(effect(move || {
        let snapshot = particles.get();
        callback(&snapshot);
    }))
}

// =============================================================================
// Terminal Renderer
// =============================================================================

/// One effect family's slice of a frame.
pub struct Layer<'a> {
    /// Snapshot of the family's live particles.
    pub particles: &'a [Particle],
    /// Glyphs indexed by particle variant.
    pub glyphs: &'a [char],
}

/// Paints particle layers as colored glyphs on a terminal grid.
///
/// Viewport units map 1:1 to terminal cells; particles outside the current
/// viewport (including risers still below the bottom edge) are skipped.
/// Frames are wrapped in a synchronized update so the repaint never tears.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer writing to the given target.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Paint one frame: clear, then draw every layer in order (later layers
    /// overdraw earlier ones).
    pub fn render(&mut self, layers: &[Layer<'_>]) -> io::Result<()> {
        let (width, height) = viewport::viewport_size();

        queue!(self.out, BeginSynchronizedUpdate, Clear(ClearType::All))?;
        for layer in layers {
            for particle in layer.particles {
                if particle.x < 0.0
                    || particle.y < 0.0
                    || particle.x >= width
                    || particle.y >= height
                {
                    continue;
                }
                let glyph = layer.glyphs[particle.variant as usize % layer.glyphs.len()];
                queue!(
                    self.out,
                    MoveTo(particle.x as u16, particle.y as u16),
                    SetForegroundColor(faded(particle.color, particle.opacity)),
                    Print(glyph),
                )?;
            }
        }
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    /// The underlying write target.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Scale a color toward black by the particle's opacity; terminals have no
/// per-cell alpha.
fn faded(color: Rgba, opacity: f32) -> Color {
    let factor = opacity.clamp(0.0, 1.0);
    Color::Rgb {
        r: (color.r as f32 * factor) as u8,
        g: (color.g as f32 * factor) as u8,
        b: (color.b as f32 * factor) as u8,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ParticleEngine, ParticleId};
    use crate::families;
    use crate::viewport::{reset_viewport_state, set_viewport_size};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            id: ParticleId(0),
            x,
            y,
            speed: 1.0,
            sway: 0.0,
            rotation: 0.0,
            spin: 0.0,
            size: 20.0,
            opacity: 1.0,
            color: Rgba::from_rgb_int(0xff6b9d),
            variant: 0,
            spawned_at: Duration::ZERO,
            lifetime: None,
        }
    }

    #[test]
    fn test_subscription_delivers_snapshots() {
        reset_viewport_state();
        set_viewport_size(100.0, 100.0);
        let engine = ParticleEngine::with_seed(families::sparkles(), 42).unwrap();

        let seen = Rc::new(Cell::new(0usize));
        let seen_clone = seen.clone();
        let stop = on_collection_changed(&engine, move |snapshot| {
            seen_clone.set(snapshot.len());
        });

        // Fires immediately with the (empty) current collection.
        assert_eq!(seen.get(), 0);

        engine.set_active(true);
        assert_eq!(seen.get(), 20, "seed batch not delivered");

        stop();
        engine.pump(Duration::from_millis(500));
        assert_eq!(seen.get(), 20, "notification after cleanup");
    }

    #[test]
    fn test_renders_visible_particles_as_glyphs() {
        reset_viewport_state();
        set_viewport_size(80.0, 24.0);

        let particles = vec![particle_at(10.0, 5.0)];
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer
            .render(&[Layer {
                particles: &particles,
                glyphs: &['♥'],
            }])
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains('♥'));
    }

    #[test]
    fn test_skips_offscreen_particles() {
        reset_viewport_state();
        set_viewport_size(80.0, 24.0);

        // Below the bottom edge (fresh riser) and above the top (about to
        // be culled): neither lands on the grid.
        let particles = vec![particle_at(10.0, 30.0), particle_at(10.0, -3.0)];
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer
            .render(&[Layer {
                particles: &particles,
                glyphs: &['♥'],
            }])
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(!output.contains('♥'));
    }

    #[test]
    fn test_variant_selects_glyph() {
        reset_viewport_state();
        set_viewport_size(80.0, 24.0);

        let mut sparkle = particle_at(1.0, 1.0);
        sparkle.variant = 1;
        let particles = vec![sparkle];
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer
            .render(&[Layer {
                particles: &particles,
                glyphs: &['✦', '✧'],
            }])
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains('✧'));
        assert!(!output.contains('✦'));
    }
}
