//! Named on-screen controls and hit testing
//!
//! Controls are kept in back-to-front order; hit testing walks them
//! front-to-back so a popup's close button wins over anything beneath it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, EntityIds};

/// Every tappable control in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKind {
    /// Menu: start a game
    Start,
    /// Nudge the ball left
    Left,
    /// Nudge the ball right
    Right,
    /// Clear the track
    Clear,
    /// Back to the menu
    Back,
    /// Show instructions
    Help,
    /// Close the instructions popup
    ClosePopup,
}

impl ControlKind {
    /// Stable name used by hosts
    pub fn name(self) -> &'static str {
        match self {
            ControlKind::Start => "start",
            ControlKind::Left => "left",
            ControlKind::Right => "right",
            ControlKind::Clear => "clear",
            ControlKind::Back => "back",
            ControlKind::Help => "help",
            ControlKind::ClosePopup => "closePopup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(ControlKind::Start),
            "left" => Some(ControlKind::Left),
            "right" => Some(ControlKind::Right),
            "clear" => Some(ControlKind::Clear),
            "back" | "menu" => Some(ControlKind::Back),
            "help" => Some(ControlKind::Help),
            "closePopup" => Some(ControlKind::ClosePopup),
            _ => None,
        }
    }

    /// Text drawn for the control
    pub fn label(self) -> &'static str {
        match self {
            ControlKind::Start => "Start Game",
            ControlKind::Left => "⬅️",
            ControlKind::Right => "➡️",
            ControlKind::Clear => "🔄",
            ControlKind::Back => "MENU",
            ControlKind::Help => "❓",
            ControlKind::ClosePopup => "✖️",
        }
    }

    /// Half extents of the hit box (matches the label's font size)
    pub fn half_size(self) -> Vec2 {
        match self {
            ControlKind::Start => Vec2::new(110.0, 25.0),
            ControlKind::Left | ControlKind::Right | ControlKind::Clear => Vec2::new(30.0, 25.0),
            ControlKind::Back => Vec2::new(50.0, 20.0),
            ControlKind::Help | ControlKind::ClosePopup => Vec2::new(20.0, 20.0),
        }
    }
}

/// A placed control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: EntityId,
    pub kind: ControlKind,
    pub center: Vec2,
}

impl Control {
    pub fn new(ids: &mut EntityIds, kind: ControlKind, center: Vec2) -> Self {
        Self {
            id: ids.next_id(),
            kind,
            center,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        let half = self.kind.half_size();
        d.x <= half.x && d.y <= half.y
    }
}

/// Front-most control under `point`
pub fn hit_test(controls: &[Control], point: Vec2) -> Option<ControlKind> {
    controls
        .iter()
        .rev()
        .find(|c| c.contains(point))
        .map(|c| c.kind)
}

/// Menu layout: a single start button
pub fn menu_controls(size: Vec2, ids: &mut EntityIds) -> Vec<Control> {
    vec![Control::new(
        ids,
        ControlKind::Start,
        Vec2::new(size.x / 2.0, size.y * 0.45),
    )]
}

/// Play layout: nudge/clear row along the bottom, menu bottom-left, help top-right
pub fn play_controls(size: Vec2, ids: &mut EntityIds) -> Vec<Control> {
    vec![
        Control::new(ids, ControlKind::Left, Vec2::new(size.x / 4.0, 50.0)),
        Control::new(ids, ControlKind::Right, Vec2::new(size.x / 2.0, 50.0)),
        Control::new(ids, ControlKind::Clear, Vec2::new(3.0 * size.x / 4.0, 50.0)),
        Control::new(ids, ControlKind::Back, Vec2::new(50.0, 50.0)),
        Control::new(ids, ControlKind::Help, Vec2::new(size.x - 50.0, size.y - 50.0)),
    ]
}

/// Close button placed inside the centered help popup
pub fn close_popup_control(size: Vec2, ids: &mut EntityIds) -> Control {
    Control::new(
        ids,
        ControlKind::ClosePopup,
        size / 2.0 + Vec2::new(0.0, -70.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_names_round_trip() {
        for kind in [
            ControlKind::Start,
            ControlKind::Left,
            ControlKind::Right,
            ControlKind::Clear,
            ControlKind::Back,
            ControlKind::Help,
            ControlKind::ClosePopup,
        ] {
            assert_eq!(ControlKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ControlKind::from_name("menu"), Some(ControlKind::Back));
        assert_eq!(ControlKind::from_name("popup"), None);
    }

    #[test]
    fn test_play_layout_hits() {
        let mut ids = EntityIds::new();
        let controls = play_controls(SIZE, &mut ids);

        assert_eq!(hit_test(&controls, Vec2::new(200.0, 50.0)), Some(ControlKind::Left));
        assert_eq!(hit_test(&controls, Vec2::new(400.0, 60.0)), Some(ControlKind::Right));
        assert_eq!(hit_test(&controls, Vec2::new(600.0, 40.0)), Some(ControlKind::Clear));
        assert_eq!(hit_test(&controls, Vec2::new(30.0, 50.0)), Some(ControlKind::Back));
        assert_eq!(hit_test(&controls, Vec2::new(750.0, 550.0)), Some(ControlKind::Help));
        assert_eq!(hit_test(&controls, Vec2::new(400.0, 300.0)), None);
    }

    #[test]
    fn test_front_most_control_wins() {
        let mut ids = EntityIds::new();
        let mut controls = vec![Control::new(&mut ids, ControlKind::Clear, Vec2::new(400.0, 230.0))];
        controls.push(close_popup_control(SIZE, &mut ids));

        assert_eq!(
            hit_test(&controls, Vec2::new(400.0, 230.0)),
            Some(ControlKind::ClosePopup)
        );
    }

    #[test]
    fn test_menu_start_button() {
        let mut ids = EntityIds::new();
        let controls = menu_controls(SIZE, &mut ids);
        assert_eq!(hit_test(&controls, Vec2::new(400.0, 270.0)), Some(ControlKind::Start));
        assert_eq!(hit_test(&controls, Vec2::new(400.0, 500.0)), None);
    }
}
