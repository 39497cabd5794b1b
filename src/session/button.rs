//! Menu buttons with hit boxes

use glam::Vec2;

/// Default button size (full width and height)
pub const BUTTON_SIZE: Vec2 = Vec2::new(0.38, 0.11);

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub origin: Vec2,
    pub dimension: Vec2,
    /// Pressed but not yet released; only changes how it is drawn
    pub is_down: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, origin: Vec2) -> Self {
        Self {
            label: label.into(),
            origin,
            dimension: BUTTON_SIZE,
            is_down: false,
        }
    }

    /// Whether a click lands on the button (edges included)
    pub fn contains(&self, click: Vec2) -> bool {
        let half = self.dimension / 2.0;
        click.x >= self.origin.x - half.x
            && click.x <= self.origin.x + half.x
            && click.y >= self.origin.y - half.y
            && click.y <= self.origin.y + half.y
    }

    pub fn down(&mut self, click: Vec2) {
        self.is_down = self.contains(click);
    }

    pub fn up(&mut self) {
        self.is_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_box() {
        let button = Button::new("Start", Vec2::new(0.0, -0.25));
        assert!(button.contains(Vec2::new(0.0, -0.25)));
        assert!(button.contains(Vec2::new(0.19, -0.25)));
        assert!(!button.contains(Vec2::new(0.2, -0.25)));
        assert!(!button.contains(Vec2::new(0.0, -0.1)));
    }

    #[test]
    fn test_down_up() {
        let mut button = Button::new("Start", Vec2::ZERO);
        button.down(Vec2::new(0.5, 0.5));
        assert!(!button.is_down);
        button.down(Vec2::ZERO);
        assert!(button.is_down);
        button.up();
        assert!(!button.is_down);
    }
}
