//! Session: run loop, scoring and the current screen
//!
//! A session lives as long as the page. It owns the round being played,
//! replaces it wholesale on every restart and keeps the scoreboard in between.

pub mod button;
pub mod scoreboard;
pub mod screen;
pub mod stepper;

pub use button::Button;
pub use scoreboard::{RoundOutcome, Scoreboard};
pub use screen::{Action, EndOfRoundScreen, GameOverScreen, GamePlayScreen, Screen, SplashScreen};
pub use stepper::FixedStep;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::render::{Frame, Renderer};
use crate::sim::GameState;
use crate::tuning::Tuning;

/// Process-wide game session
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    /// Seeds each new round
    rng: Pcg32,
    game_state: GameState,
    screen: Screen,
    stepper: FixedStep,
    /// Simulated milliseconds since the round loop started
    sim_time_ms: f64,
    is_running: bool,
    board: Scoreboard,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let game_state = GameState::new(rng.random(), &tuning);
        let stepper = FixedStep::new(tuning.fixed_step_ms, tuning.max_steps_per_frame);
        Self {
            tuning,
            rng,
            game_state,
            screen: Screen::default(),
            stepper,
            sim_time_ms: 0.0,
            is_running: false,
            board: Scoreboard::new(),
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.board
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Simulation clock of the current round (ms)
    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    /// Start the fixed-step loop for the current round
    pub fn run_game(&mut self) {
        self.is_running = true;
        self.stepper.reset();
        self.sim_time_ms = 0.0;
        log::info!(
            "Round started (seed {}, multiplier {}x, beat {}s)",
            self.game_state.seed,
            self.board.multiplier,
            self.board.last_run_time
        );
    }

    /// Run one animation frame at host time `now` (ms)
    ///
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.is_running {
            return false;
        }

        let dt = self.tuning.fixed_step_secs();
        for _ in 0..self.stepper.frame(now) {
            self.sim_time_ms += self.stepper.step_ms();
            self.game_state.advance(dt, self.sim_time_ms);
        }

        if self.game_state.has_fallen() {
            self.end_game();
        }
        self.is_running
    }

    /// Book the finished round and move to the next screen
    pub fn end_game(&mut self) {
        self.is_running = false;
        let run_time = self.game_state.run_time();
        let outcome = self.board.finish_round(run_time, self.tuning.win_score);
        log::info!(
            "Round over after {}s: {:?} (score {}, high score {})",
            run_time,
            outcome,
            self.board.score,
            self.board.high_score
        );

        self.screen = match outcome {
            RoundOutcome::Continue { .. } => {
                Screen::EndOfRound(EndOfRoundScreen::new(self.board.multiplier, run_time))
            }
            RoundOutcome::Won { beat_high_score } => {
                Screen::GameOver(GameOverScreen::new(beat_high_score, true))
            }
            RoundOutcome::Lost { beat_high_score } => {
                Screen::GameOver(GameOverScreen::new(beat_high_score, false))
            }
        };
    }

    /// Throw away the current round and start a fresh one
    fn restart(&mut self) {
        self.game_state = GameState::new(self.rng.random(), &self.tuning);
        self.run_game();
        self.screen = Screen::game_play();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::StartGame => {
                self.run_game();
                self.screen = Screen::game_play();
            }
            Action::ResetRound => {
                self.board.reset_multiplier();
                self.restart();
            }
            Action::RiskRound => {
                self.board.raise_stakes(self.game_state.run_time());
                self.restart();
            }
            Action::NewGame => {
                self.board.new_game();
                self.restart();
            }
            Action::Jump(secs) => {
                self.game_state.jump(secs, self.sim_time_ms);
            }
            Action::MoveHandle(point) => {
                self.game_state.handle = point;
            }
        }
    }

    pub fn on_click(&mut self, click: Vec2) {
        let action = self.screen.on_click(click);
        self.apply(action);
    }

    pub fn on_pointer_down(&mut self, click: Vec2, now: f64) {
        self.screen.on_pointer_down(click, now);
    }

    pub fn on_pointer_up(&mut self, now: f64) {
        let action = self.screen.on_pointer_up(now);
        self.apply(action);
    }

    pub fn on_pointer_move(&mut self, point: Vec2) {
        let action = self.screen.on_pointer_move(point, self.tuning.handle_ceiling);
        self.apply(action);
    }

    /// Read-only view for the renderer
    pub fn view(&self) -> Frame<'_> {
        let state = &self.game_state;
        Frame {
            chicken: &state.chicken,
            landing_bar: &state.landing_bar,
            handle: state.handle,
            bugs: &state.bugs,
            run_time: state.run_time(),
            score: self.board.score,
            high_score: self.board.high_score,
            multiplier: self.board.multiplier,
            last_run_time: self.board.last_run_time,
            overlay: self.screen.overlay(&self.board, self.tuning.win_score),
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.render(&self.view());
    }
}
