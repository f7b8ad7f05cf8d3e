use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use crate::error::SessionError;
use crate::game::input::{HoldMode, InputTracker};
use crate::game::scoring::Phase;
use crate::game::{Match, TickOutcome};

/// Smallest court area, in cells, that still shows the paddles and ball.
pub const MIN_COURT_COLS: u16 = 40;
pub const MIN_COURT_ROWS: u16 = 12;

pub struct App {
    pub should_quit: bool,
    game: Match,
    input: InputTracker,
    /// Court area from the last draw; `None` until the first frame.
    court: Option<Rect>,
    /// Last rejected action, shown in the help bar until the next success.
    pub status: Option<String>,
}

impl App {
    pub fn new(seed: Option<u64>, hold: HoldMode) -> Self {
        Self {
            should_quit: false,
            game: Match::new(seed),
            input: InputTracker::new(hold),
            court: None,
            status: None,
        }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut Match {
        &mut self.game
    }

    pub fn hold_mode(&self) -> HoldMode {
        self.input.mode()
    }

    /// Called by the renderer with the area the court was given this frame.
    pub fn set_court_area(&mut self, area: Rect) {
        self.court = Some(area);
    }

    fn check_surface(&self) -> Result<(), SessionError> {
        let (cols, rows) = self.court.map_or((0, 0), |a| (a.width, a.height));
        if cols < MIN_COURT_COLS || rows < MIN_COURT_ROWS {
            return Err(SessionError::SurfaceUnavailable {
                cols,
                rows,
                min_cols: MIN_COURT_COLS,
                min_rows: MIN_COURT_ROWS,
            });
        }
        Ok(())
    }

    pub fn surface_ready(&self) -> bool {
        self.check_surface().is_ok()
    }

    pub fn on_tick(&mut self) {
        // Hold the simulation while nothing can show it.
        if !self.game.phase().is_playing() || !self.surface_ready() {
            return;
        }

        let outcome = self.game.tick(self.input.controls());
        self.input.expire();

        let score = self.game.score();
        match outcome {
            TickOutcome::Point(side) => {
                tracing::debug!(
                    scorer = side.label(),
                    player = score.player(),
                    cpu = score.opponent(),
                    "point"
                );
            }
            TickOutcome::Won(side) => {
                tracing::info!(
                    winner = side.label(),
                    player = score.player(),
                    cpu = score.opponent(),
                    "match finished"
                );
                self.input.clear();
            }
            TickOutcome::Rally | TickOutcome::Halted => {}
        }
    }

    /// Idle -> Playing.
    pub fn start_match(&mut self) -> Result<(), SessionError> {
        if self.game.phase() != Phase::Idle {
            return Ok(());
        }
        self.begin("match started")
    }

    /// Any phase -> Playing with a fresh match.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.begin("match reset")
    }

    fn begin(&mut self, what: &str) -> Result<(), SessionError> {
        if let Err(e) = self.check_surface() {
            tracing::warn!(error = %e, "refusing to start play");
            self.status = Some(e.to_string());
            return Err(e);
        }
        self.game.reset();
        self.input.clear();
        self.status = None;
        tracing::info!("{}", what);
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Paddle keys go to the tracker in every phase so a release is never lost.
        if self.input.handle_key(&key) {
            return;
        }

        // Everything else acts on press only.
        if key.kind != KeyEventKind::Press {
            return;
        }

        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.game.phase() {
                Phase::Idle => self.start_match(),
                Phase::Finished { .. } => self.reset(),
                Phase::Playing => Ok(()),
            },
            _ => Ok(()),
        };
        if let Err(e) = result {
            tracing::debug!(key = ?key.code, error = %e, "key action refused");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Side;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let mut app = App::new(Some(1), HoldMode::Released);
        app.set_court_area(Rect::new(0, 0, 100, 30));
        app
    }

    /// Feed the CPU points until the match ends.
    fn finish(app: &mut App) {
        for _ in 0..10 {
            let state = app.game.state_mut();
            state.player_y = 500.0;
            state.ball_x = 4.0;
            state.ball_y = 300.0;
            state.ball_vx = -5.0;
            state.ball_vy = 0.0;
            app.on_tick();
        }
    }

    #[test]
    fn starts_idle_and_enter_starts_play() {
        let mut app = ready_app();
        assert_eq!(app.game().phase(), Phase::Idle);

        app.on_tick();
        assert_eq!(app.game().phase(), Phase::Idle);

        app.on_key(press(KeyCode::Enter));
        assert_eq!(app.game().phase(), Phase::Playing);
    }

    #[test]
    fn start_is_refused_without_a_surface() {
        let mut app = App::new(Some(1), HoldMode::Released);
        assert!(matches!(
            app.start_match(),
            Err(SessionError::SurfaceUnavailable { cols: 0, rows: 0, .. })
        ));
        assert_eq!(app.game().phase(), Phase::Idle);

        app.set_court_area(Rect::new(0, 0, 20, 8));
        app.on_key(press(KeyCode::Char(' ')));
        assert_eq!(app.game().phase(), Phase::Idle);
        assert!(app.status.is_some());

        app.set_court_area(Rect::new(0, 0, 80, 24));
        app.on_key(press(KeyCode::Char(' ')));
        assert_eq!(app.game().phase(), Phase::Playing);
        assert!(app.status.is_none());
    }

    #[test]
    fn r_is_refused_without_a_surface() {
        let mut app = App::new(Some(1), HoldMode::Released);
        app.set_court_area(Rect::new(0, 0, 20, 8));
        app.on_key(press(KeyCode::Char('r')));
        assert_eq!(app.game().phase(), Phase::Idle);
        assert!(!app.should_quit);
        assert!(app
            .status
            .as_deref()
            .is_some_and(|status| status.contains("20x8")));
    }

    #[test]
    fn ticks_are_held_while_the_surface_is_too_small() {
        let mut app = ready_app();
        app.start_match().unwrap();
        app.set_court_area(Rect::new(0, 0, 10, 4));
        let before = app.game().state().clone();
        app.on_tick();
        assert_eq!(app.game().state(), &before);
    }

    #[test]
    fn held_up_key_moves_the_paddle_each_tick() {
        let mut app = ready_app();
        app.start_match().unwrap();
        app.on_key(press(KeyCode::Up));
        app.on_tick();
        app.on_tick();
        assert_eq!(app.game().state().player_y, 300.0 - 16.0);

        app.on_key(KeyEvent::new_with_kind(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        app.on_tick();
        assert_eq!(app.game().state().player_y, 300.0 - 16.0);
    }

    #[test]
    fn tenth_cpu_point_finishes_and_enter_plays_again() {
        let mut app = ready_app();
        app.start_match().unwrap();
        finish(&mut app);
        assert_eq!(
            app.game().phase(),
            Phase::Finished {
                winner: Side::Opponent
            }
        );
        assert_eq!(app.game().score().opponent(), 10);

        // Start does nothing once finished; play-again and reset do.
        app.start_match().unwrap();
        assert!(matches!(app.game().phase(), Phase::Finished { .. }));

        app.on_key(press(KeyCode::Enter));
        assert_eq!(app.game().phase(), Phase::Playing);
        assert_eq!(app.game().score().opponent(), 0);
    }

    #[test]
    fn r_resets_mid_match() {
        let mut app = ready_app();
        app.start_match().unwrap();
        for _ in 0..50 {
            app.on_tick();
        }
        app.on_key(press(KeyCode::Char('r')));
        assert_eq!(app.game().phase(), Phase::Playing);
        assert_eq!(app.game().state().ball_x, 400.0);
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = ready_app();
            app.on_key(press(code));
            assert!(app.should_quit);
        }
        let mut app = ready_app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn unknown_keys_change_nothing() {
        let mut app = ready_app();
        app.on_key(press(KeyCode::Char('x')));
        app.on_key(press(KeyCode::F(5)));
        assert!(!app.should_quit);
        assert_eq!(app.game().phase(), Phase::Idle);
    }
}
