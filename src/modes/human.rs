use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Action, GameConfig, GameEngine, GameState, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the simulation rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard-driven game in the terminal.
///
/// Owns the engine, the state and both timers. Everything runs on one task,
/// so input handling and ticks never overlap.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    /// Validates `config` before building the engine
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("Invalid game settings")?;

        let mut engine = GameEngine::new(config);
        let tick_interval = Duration::from_millis(engine.config().tick_interval_ms);
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err).context("Failed to enter alternate screen");
        }
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                disable_raw_mode().ok();
                let mut out = std::io::stderr();
                execute!(out, LeaveAlternateScreen).ok();
                return Err(err).context("Failed to create terminal");
            }
        };

        info!(
            grid_size = self.state.grid_size,
            tick_ms = self.tick_interval.as_millis() as u64,
            "game started"
        );

        // Restore the terminal whether or not the loop failed
        let result = match Self::prepare_terminal(&mut terminal) {
            Ok(()) => self.run_game_loop(&mut terminal).await,
            Err(err) => Err(err),
        };
        let cleanup = Self::cleanup_terminal(&mut terminal);

        info!(score = self.state.score, games = self.metrics.games_played, "game closed");
        result.and(cleanup)
    }

    fn prepare_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

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
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => self.apply_action(action),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => {
                debug!("quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn apply_action(&mut self, action: Action) {
        self.state.apply(action);

        if action == Action::TogglePause {
            match self.state.phase() {
                Phase::Paused => self.metrics.pause_clock(),
                Phase::Running => self.metrics.resume_clock(),
                Phase::GameOver | Phase::Won => {}
            }
            debug!(paused = self.state.paused, "pause toggled");
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.tick(&mut self.state);

        if result.advanced && result.terminated {
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                won = self.state.won,
                collision = ?result.info.collision_type,
                "game over"
            );
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        info!("game restarted");
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
