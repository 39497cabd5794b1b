//! Screens of the game's state machine
//!
//! Splash → GamePlay → EndOfRound or GameOver → GamePlay.
//!
//! Screens only hold UI state (press time, buttons). Every handler returns an
//! `Action` and the session applies it, so a screen never touches the game
//! state or the scoreboard directly.

use glam::Vec2;

use super::button::Button;
use super::scoreboard::Scoreboard;
use crate::render::Overlay;
use crate::sim::RunTime;

/// What the session should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    /// Splash start: run the first round
    StartGame,
    /// End of round, play it safe
    ResetRound,
    /// End of round, raise multiplier and time to beat
    RiskRound,
    /// Game over, start from zero
    NewGame,
    /// Jump with the given press duration (seconds)
    Jump(f32),
    /// Move the handle to this point
    MoveHandle(Vec2),
}

/// Title screen
#[derive(Debug, Clone, PartialEq)]
pub struct SplashScreen {
    pub start: Button,
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self {
            start: Button::new("Start", Vec2::new(0.0, -0.25)),
        }
    }
}

/// Active play
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePlayScreen {
    /// Host time of the last pointer down (ms)
    pub pressed_at: Option<f64>,
}

/// Round beaten; reset or risk
#[derive(Debug, Clone, PartialEq)]
pub struct EndOfRoundScreen {
    pub reset: Button,
    pub risk: Button,
    /// Multiplier if the player takes the risk
    pub new_multiplier: u32,
    /// Run time the next round must beat after a risk
    pub run_time: RunTime,
}

impl EndOfRoundScreen {
    pub fn new(multiplier: u32, run_time: RunTime) -> Self {
        let new_multiplier = multiplier + 1;
        Self {
            reset: Button::new("1x Reset", Vec2::new(-0.22, -0.25)),
            risk: Button::new(format!("{new_multiplier}x Risk"), Vec2::new(0.22, -0.25)),
            new_multiplier,
            run_time,
        }
    }
}

/// Game won or lost
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverScreen {
    pub start: Button,
    pub win: bool,
    pub beat_high_score: bool,
}

impl GameOverScreen {
    pub fn new(beat_high_score: bool, win: bool) -> Self {
        Self {
            start: Button::new("Start", Vec2::new(0.0, -0.25)),
            win,
            beat_high_score,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.win { "Chicken Dinner!" } else { "Game Over" }
    }

    pub fn subline(&self) -> &'static str {
        if self.beat_high_score {
            "new highscore"
        } else {
            "final score"
        }
    }
}

/// The current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Splash(SplashScreen),
    GamePlay(GamePlayScreen),
    EndOfRound(EndOfRoundScreen),
    GameOver(GameOverScreen),
}

impl Default for Screen {
    fn default() -> Self {
        Self::Splash(SplashScreen::default())
    }
}

impl Screen {
    pub fn game_play() -> Self {
        Self::GamePlay(GamePlayScreen::default())
    }

    pub fn is_game_play(&self) -> bool {
        matches!(self, Self::GamePlay(_))
    }

    pub fn on_click(&mut self, click: Vec2) -> Action {
        match self {
            Self::Splash(screen) => {
                if screen.start.contains(click) {
                    Action::StartGame
                } else {
                    Action::None
                }
            }
            Self::GamePlay(_) => Action::None,
            Self::EndOfRound(screen) => {
                if screen.reset.contains(click) {
                    Action::ResetRound
                } else if screen.risk.contains(click) {
                    Action::RiskRound
                } else {
                    Action::None
                }
            }
            Self::GameOver(screen) => {
                if screen.start.contains(click) {
                    Action::NewGame
                } else {
                    Action::None
                }
            }
        }
    }

    pub fn on_pointer_down(&mut self, click: Vec2, now: f64) {
        match self {
            Self::Splash(screen) => screen.start.down(click),
            Self::GamePlay(screen) => screen.pressed_at = Some(now),
            Self::EndOfRound(screen) => {
                screen.reset.down(click);
                screen.risk.down(click);
            }
            Self::GameOver(screen) => screen.start.down(click),
        }
    }

    /// During play, releasing the pointer jumps; the press length sets the
    /// jump height. A release without a press is timed from zero, which
    /// clamps to the highest jump.
    pub fn on_pointer_up(&mut self, now: f64) -> Action {
        match self {
            Self::Splash(screen) => {
                screen.start.up();
                Action::None
            }
            Self::GamePlay(screen) => {
                let before = screen.pressed_at.take().unwrap_or(0.0);
                let secs = ((now - before) / 1000.0).max(0.0) as f32;
                Action::Jump(secs)
            }
            Self::EndOfRound(screen) => {
                screen.reset.up();
                screen.risk.up();
                Action::None
            }
            Self::GameOver(screen) => {
                screen.start.up();
                Action::None
            }
        }
    }

    /// During play the handle follows the pointer but never rises above
    /// `ceiling`
    pub fn on_pointer_move(&self, point: Vec2, ceiling: f32) -> Action {
        match self {
            Self::GamePlay(_) => Action::MoveHandle(Vec2::new(point.x, point.y.min(ceiling))),
            Self::Splash(_) | Self::EndOfRound(_) | Self::GameOver(_) => Action::None,
        }
    }

    /// Text and buttons to draw over the field
    pub fn overlay(&self, board: &Scoreboard, win_score: u64) -> Overlay {
        match self {
            Self::Splash(screen) => Overlay {
                show_bodies: false,
                light_colors: false,
                headline: Some("Chicken On A Line".to_string()),
                lines: vec![format!(
                    "swipe to balance, click to jump, {win_score} points to win"
                )],
                buttons: vec![screen.start.clone()],
            },
            Self::GamePlay(_) => Overlay {
                show_bodies: true,
                ..Default::default()
            },
            Self::EndOfRound(screen) => Overlay {
                show_bodies: true,
                light_colors: true,
                headline: Some("Good Round".to_string()),
                lines: vec![
                    format!("round's score {}", board.round_score),
                    format!("Beat {}s or game over", screen.run_time),
                ],
                buttons: vec![screen.reset.clone(), screen.risk.clone()],
            },
            Self::GameOver(screen) => Overlay {
                show_bodies: true,
                light_colors: true,
                headline: Some(screen.headline().to_string()),
                lines: vec![format!("{} {}", screen.subline(), board.score)],
                buttons: vec![screen.start.clone()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: f32 = -0.25;

    #[test]
    fn test_splash_start_button() {
        let mut screen = Screen::default();
        assert_eq!(screen.on_click(Vec2::new(0.0, 0.3)), Action::None);
        assert_eq!(screen.on_click(Vec2::new(0.05, -0.25)), Action::StartGame);
    }

    #[test]
    fn test_press_duration_becomes_jump() {
        let mut screen = Screen::game_play();
        screen.on_pointer_down(Vec2::ZERO, 1000.0);
        let Action::Jump(secs) = screen.on_pointer_up(1250.0) else {
            panic!("expected a jump");
        };
        assert!((secs - 0.25).abs() < 1e-6);

        // The press is consumed
        assert_eq!(screen.on_pointer_up(1400.0), Action::Jump(1.4));
    }

    #[test]
    fn test_release_without_press_is_a_long_hold() {
        let mut screen = Screen::game_play();
        let Action::Jump(secs) = screen.on_pointer_up(86_400_000.0) else {
            panic!("expected a jump");
        };
        assert!(secs >= 0.3, "clamps to the longest press, got {secs}");
    }

    #[test]
    fn test_handle_clamped_below_ceiling() {
        let screen = Screen::game_play();
        assert_eq!(
            screen.on_pointer_move(Vec2::new(0.2, 0.4), CEILING),
            Action::MoveHandle(Vec2::new(0.2, -0.25))
        );
        assert_eq!(
            screen.on_pointer_move(Vec2::new(-0.1, -0.4), CEILING),
            Action::MoveHandle(Vec2::new(-0.1, -0.4))
        );
        assert_eq!(
            Screen::default().on_pointer_move(Vec2::ZERO, CEILING),
            Action::None
        );
    }

    #[test]
    fn test_end_of_round_buttons() {
        let mut screen = Screen::EndOfRound(EndOfRoundScreen::new(2, RunTime::from_secs(9.1)));
        assert_eq!(screen.on_click(Vec2::new(-0.22, -0.25)), Action::ResetRound);
        assert_eq!(screen.on_click(Vec2::new(0.22, -0.25)), Action::RiskRound);
        assert_eq!(screen.on_click(Vec2::new(0.0, 0.0)), Action::None);

        let Screen::EndOfRound(inner) = &screen else {
            unreachable!()
        };
        assert_eq!(inner.new_multiplier, 3);
        assert_eq!(inner.risk.label, "3x Risk");
    }

    #[test]
    fn test_buttons_track_pointer() {
        let mut screen = Screen::GameOver(GameOverScreen::new(false, false));
        screen.on_pointer_down(Vec2::new(0.0, -0.25), 0.0);
        assert!(matches!(&screen, Screen::GameOver(s) if s.start.is_down));
        assert_eq!(screen.on_pointer_up(10.0), Action::None);
        assert!(matches!(&screen, Screen::GameOver(s) if !s.start.is_down));
    }

    #[test]
    fn test_game_over_text() {
        let board = Scoreboard {
            score: 2050,
            ..Default::default()
        };
        let screen = Screen::GameOver(GameOverScreen::new(true, true));
        let overlay = screen.overlay(&board, 2000);
        assert_eq!(overlay.headline.as_deref(), Some("Chicken Dinner!"));
        assert_eq!(overlay.lines, vec!["new highscore 2050".to_string()]);
        assert!(overlay.light_colors);

        let lost = GameOverScreen::new(false, false);
        assert_eq!(lost.headline(), "Game Over");
        assert_eq!(lost.subline(), "final score");
    }

    #[test]
    fn test_gameplay_overlay_is_bare() {
        let overlay = Screen::game_play().overlay(&Scoreboard::default(), 2000);
        assert!(overlay.show_bodies);
        assert!(overlay.headline.is_none());
        assert!(overlay.buttons.is_empty());
    }
}
