//! Celebration overlay demo.
//!
//! Drives all three effect families fullscreen: balloons behind, hearts in
//! front, sparkles on top. Effects start shortly after launch (the "page
//! loaded" signal); pressing `e` or space excites the hearts for ten
//! seconds, then they settle back down on their own.
//!
//! Keys: `e` / space - excite hearts, `q` / Esc / Ctrl+C - quit.

use std::io::{self, stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use spark_signals::effect;

use spark_particles::driver::{self, DriverHandle, FRAME_INTERVAL};
use spark_particles::{
    families, set_viewport_size, Layer, Mode, ParticleEngine, TerminalRenderer,
};

/// Effects activate this long after launch.
const LOAD_DELAY: Duration = Duration::from_secs(1);

/// How long the hearts stay excited after a keypress.
const EXCITED_HOLD: Duration = Duration::from_secs(10);

const HEART_GLYPHS: [char; 1] = ['♥'];
const BALLOON_GLYPHS: [char; 1] = ['●'];
const SPARKLE_GLYPHS: [char; 1] = ['✦'];

fn main() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let result = celebrate();

    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn celebrate() -> io::Result<()> {
    spark_particles::detect_viewport_size();

    let hearts = ParticleEngine::new(families::hearts()).map_err(io::Error::other)?;
    let balloons = ParticleEngine::new(families::balloons()).map_err(io::Error::other)?;
    let sparkles = ParticleEngine::new(families::sparkles()).map_err(io::Error::other)?;

    // The ONE render effect: reads all three collection signals so any
    // engine's change repaints the combined frame.
    let hearts_signal = hearts.particles().clone();
    let balloons_signal = balloons.particles().clone();
    let sparkles_signal = sparkles.particles().clone();
    let mut renderer = TerminalRenderer::new(stdout());
    let stop_render = effect(move || {
        let heart_frame = hearts_signal.get();
        let balloon_frame = balloons_signal.get();
        let sparkle_frame = sparkles_signal.get();
        let _ = renderer.render(&[
            Layer {
                particles: &balloon_frame,
                glyphs: &BALLOON_GLYPHS,
            },
            Layer {
                particles: &heart_frame,
                glyphs: &HEART_GLYPHS,
            },
            Layer {
                particles: &sparkle_frame,
                glyphs: &SPARKLE_GLYPHS,
            },
        ]);
    });

    let handle = DriverHandle::new();
    let mut activated = false;
    let mut excited_until: Option<Duration> = None;

    loop {
        let now = handle.elapsed();

        if !activated && now >= LOAD_DELAY {
            hearts.set_active(true);
            balloons.set_active(true);
            sparkles.set_active(true);
            activated = true;
        }

        if let Some(deadline) = excited_until {
            if now >= deadline {
                hearts.set_mode(Mode::Normal);
                excited_until = None;
            }
        }

        // Poll doubles as the frame pause.
        if poll(FRAME_INTERVAL)? {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break;
                    }
                    KeyCode::Char('e') | KeyCode::Char(' ') => {
                        hearts.set_mode(Mode::Excited);
                        excited_until = Some(handle.elapsed() + EXCITED_HOLD);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => set_viewport_size(cols as f32, rows as f32),
                _ => {}
            }
        }

        if !driver::tick(&handle, &[&hearts, &balloons, &sparkles]) {
            break;
        }
    }

    stop_render();
    hearts.dispose();
    balloons.dispose();
    sparkles.dispose();
    Ok(())
}
