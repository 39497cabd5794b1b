//! Renderer contract
//!
//! The simulation never draws. Each frame the session hands a read-only
//! `Frame` to a `Renderer`; nothing flows back.

use glam::Vec2;

use crate::session::Button;
use crate::sim::{Body, RunTime};

/// Screen-specific text and buttons drawn on top of the field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Draw chicken, bar, line and bugs
    pub show_bodies: bool,
    /// Dimmed palette behind a menu
    pub light_colors: bool,
    pub headline: Option<String>,
    pub lines: Vec<String>,
    pub buttons: Vec<Button>,
}

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub chicken: &'a Body,
    pub landing_bar: &'a Body,
    pub handle: Vec2,
    pub bugs: &'a [Body],
    pub run_time: RunTime,
    pub score: u64,
    pub high_score: u64,
    pub multiplier: u32,
    pub last_run_time: RunTime,
    pub overlay: Overlay,
}

impl Frame<'_> {
    /// Score corner text, left to right, top to bottom
    pub fn hud_lines(&self) -> [String; 5] {
        [
            format!("score {}", self.score),
            format!("high score {}", self.high_score),
            format!("beat {}s", self.last_run_time),
            format!("multiplier {}x", self.multiplier),
            format!("{}s", self.run_time),
        ]
    }
}

/// Something that can present a frame
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Renderer that writes the HUD to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} | chicken ({:.3}, {:.3}) bugs {}",
            self.frames,
            frame.hud_lines().join(" | "),
            frame.chicken.origin.x,
            frame.chicken.origin.y,
            frame.bugs.len()
        );
        if let Some(headline) = &frame.overlay.headline {
            log::trace!("overlay: {headline} {:?}", frame.overlay.lines);
        }
    }
}
