use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{FrameEvents, GameConfig, GameEngine, GameState, InputSnapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Interactive keyboard play. Owns the terminal, the engine and the round
/// state; key presses accumulate into an input snapshot that is handed to
/// the engine once per frame along with the measured frame delta.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_input: InputSnapshot,
    restart_pressed: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config)?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_input: InputSnapshot::default(),
            restart_pressed: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Frames at 30 FPS; the core's own clock decides when a tick fires.
        let frame_interval = Duration::from_millis(33);
        let mut frame_timer = interval(frame_interval);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulate and render one frame
                _ = frame_timer.tick() => {
                    let delta = last_frame.elapsed().as_secs_f32();
                    last_frame = Instant::now();

                    let events = self.step_frame(delta);
                    self.track_metrics(events);

                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.config(), &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.pending_input.press(direction);
                }
                KeyAction::Restart => {
                    self.restart_pressed = true;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// Hand the frame's delta and queued input to the engine, then clear
    /// the queue for the next frame.
    fn step_frame(&mut self, delta: f32) -> FrameEvents {
        let events = self.engine.on_frame(
            &mut self.state,
            delta,
            &self.pending_input,
            self.restart_pressed,
        );

        self.pending_input = InputSnapshot::default();
        self.restart_pressed = false;
        events
    }

    fn track_metrics(&mut self, events: FrameEvents) {
        if events.game_over {
            self.metrics.on_round_over(self.state.score);
        }
        if events.restarted {
            self.metrics.on_round_start();
        }
        if self.state.is_playing() {
            self.metrics.update();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
