//! Terminal front-end: spins a demo stage as colored ASCII art
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use spin3d_core::{Animator, Demo, FrameScheduler, Renderer};
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

pub mod cli;
pub mod logging;
pub mod renderer;
pub mod screen;

pub use renderer::{terminal_viewport, AsciiRenderer};
pub use screen::TerminalGuard;

/// Source of the "stop animating" request
pub trait QuitSignal {
    fn quit_requested(&mut self) -> io::Result<bool>;
}

/// Quits on Q, Esc or Ctrl-C read from the terminal
pub struct KeyboardQuit;

impl QuitSignal for KeyboardQuit {
    fn quit_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    _ => {}
                }
            }
        }
        Ok(false)
    }
}

/// Paces frames at a fixed rate and ends the loop when quit is requested.
///
/// A failure reading input also ends the loop; the error is kept for
/// [`FixedRate::take_error`].
pub struct FixedRate<Q = KeyboardQuit> {
    frame_time: Duration,
    last_frame: Option<Instant>,
    fps_window: Instant,
    frame_count: u32,
    quit: Q,
    input_error: Option<io::Error>,
}

impl FixedRate {
    pub fn new(fps: u32) -> Self {
        Self::with_quit_signal(fps, KeyboardQuit)
    }
}

impl<Q: QuitSignal> FixedRate<Q> {
    pub fn with_quit_signal(fps: u32, quit: Q) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_frame: None,
            fps_window: Instant::now(),
            frame_count: 0,
            quit,
            input_error: None,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// The input error that stopped the loop, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.input_error.take()
    }

    fn track_fps(&mut self, now: Instant) {
        self.frame_count += 1;
        let elapsed = now - self.fps_window;
        if elapsed.as_secs() >= 1 {
            log::debug!("{:.1} fps", self.frame_count as f32 / elapsed.as_secs_f32());
            self.frame_count = 0;
            self.fps_window = now;
        }
    }
}

impl<Q: QuitSignal> FrameScheduler for FixedRate<Q> {
    fn next_frame(&mut self) -> bool {
        if self.input_error.is_some() {
            return false;
        }

        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }
        }

        let now = Instant::now();
        self.last_frame = Some(now);
        self.track_fps(now);

        match self.quit.quit_requested() {
            Ok(quit) => !quit,
            Err(e) => {
                self.input_error = Some(e);
                false
            }
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    demo: Demo,
    animator: Animator<AsciiRenderer<Stdout>>,
}

impl TerminalApp {
    /// Stage `demo` for the current terminal size
    pub fn new(demo: Demo) -> Result<Self> {
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        let viewport = terminal_viewport(cols, rows)?;

        let stage = demo.stage(viewport)?;
        let renderer = AsciiRenderer::new(viewport, stdout());
        log::debug!("terminal renderer sized {:?}", renderer.viewport());

        Ok(Self {
            demo,
            animator: Animator::new(stage, renderer),
        })
    }

    pub fn demo(&self) -> Demo {
        self.demo
    }

    /// Take over the terminal and animate until `scheduler` stops or
    /// `frames` ticks have run.
    ///
    /// The terminal is restored before any error is returned. A draw error
    /// wins over an input error, which wins over a restore error.
    pub fn run<Q: QuitSignal>(
        &mut self,
        scheduler: &mut FixedRate<Q>,
        frames: Option<u64>,
    ) -> Result<u64> {
        let mut guard = TerminalGuard::enter(stdout()).context("failed to set up terminal")?;

        let result = match frames {
            Some(frames) => self.animator.run(FrameScheduler::take(&mut *scheduler, frames)),
            None => self.animator.run(&mut *scheduler),
        };
        let restored = guard.restore();

        let ticks = result.context("failed to draw frame")?;
        if let Some(e) = scheduler.take_error() {
            return Err(e).context("failed to read terminal input");
        }
        restored.context("failed to restore terminal")?;
        Ok(ticks)
    }
}
