//! What the presentation collaborator receives each tick.
//!
//! The core does no drawing. It builds a [`FrameView`] describing the live
//! entities, the HUD text and any full-screen overlay, and hands it to a
//! [`Presenter`].

use serde::{Deserialize, Serialize};

use crate::camera::Camera2D;
use crate::entities::{Entity, Tag};
use crate::math::Vec2;
use crate::progress::ProgressState;
use crate::state::GameMode;

pub type Color = [f32; 4];

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const LIGHT_GREY: Color = [200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0];
const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
const GOLD: Color = [1.0, 215.0 / 255.0, 0.0, 1.0];
const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
const RED: Color = [1.0, 0.0, 0.0, 1.0];

/// Fill colour for an entity of the given tag.
pub fn palette(tag: Tag) -> Color {
    match tag {
        Tag::Player => RED,
        Tag::Platform => [139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 1.0],
        Tag::Ground => [34.0 / 255.0, 139.0 / 255.0, 34.0 / 255.0, 1.0],
        Tag::Enemy => [1.0, 0.0, 1.0, 1.0],
        Tag::Coin => GOLD,
    }
}

/// Draw data for one live entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub tag: Tag,
    /// Top-left corner in world space.
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            tag: entity.tag(),
            position: entity.position,
            size: entity.size,
            color: palette(entity.tag()),
        }
    }
}

/// How a text position is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// Text element in screen-space pixels (0,0 = top-left of the viewport).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudText {
    pub text: String,
    pub size: f32,
    pub position: Vec2,
    pub anchor: Anchor,
    pub color: Color,
}

impl HudText {
    fn corner(text: String, size: f32, position: Vec2, color: Color) -> Self {
        Self {
            text,
            size,
            position,
            anchor: Anchor::TopLeft,
            color,
        }
    }

    fn centred(text: String, size: f32, position: Vec2, color: Color) -> Self {
        Self {
            text,
            size,
            position,
            anchor: Anchor::Center,
            color,
        }
    }
}

/// A layer of screen-space text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HudLayer {
    elements: Vec<HudText>,
}

impl HudLayer {
    /// Create an empty HUD layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text element to the layer.
    pub fn add_text(&mut self, text: HudText) {
        self.elements.push(text);
    }

    pub fn elements(&self) -> &[HudText] {
        &self.elements
    }

    /// The text of every element, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.iter().map(|e| e.text.as_str())
    }

    /// Score, level and coin counters in the top-left corner.
    pub fn counters(progress: &ProgressState) -> Self {
        let mut hud = Self::new();
        hud.add_text(HudText::corner(
            format!("Score: {}", progress.score()),
            24.0,
            Vec2::new(20.0, 20.0),
            WHITE,
        ));
        hud.add_text(HudText::corner(
            format!("Level: {}", progress.current_level()),
            24.0,
            Vec2::new(20.0, 50.0),
            WHITE,
        ));
        hud.add_text(HudText::corner(
            format!(
                "Coins: {}/{}",
                progress.coins_collected(),
                progress.total_coins()
            ),
            20.0,
            Vec2::new(20.0, 80.0),
            YELLOW,
        ));
        hud
    }

    /// Full-screen text for the non-playing modes, centred on `viewport`.
    pub fn overlay(mode: GameMode, progress: &ProgressState, viewport: Vec2) -> Option<Self> {
        let centre = viewport * 0.5;
        let at = |dy: f32| Vec2::new(centre.x, centre.y + dy);
        let score = progress.score();

        let lines: Vec<HudText> = match mode {
            GameMode::Playing { .. } => return None,
            GameMode::LevelComplete { level } => vec![
                HudText::centred(format!("Level {level} Complete!"), 48.0, at(-60.0), GREEN),
                HudText::centred(format!("Score: {score}"), 24.0, at(-20.0), WHITE),
                HudText::centred("Press SPACE for Next Level".into(), 20.0, at(20.0), WHITE),
                HudText::centred("Press R to Restart".into(), 18.0, at(50.0), LIGHT_GREY),
            ],
            GameMode::GameComplete => vec![
                HudText::centred("Congratulations!".into(), 48.0, at(-80.0), GOLD),
                HudText::centred("You completed all levels!".into(), 24.0, at(-40.0), WHITE),
                HudText::centred(format!("Final Score: {score}"), 28.0, at(0.0), YELLOW),
                HudText::centred("Press R to Play Again".into(), 20.0, at(40.0), WHITE),
            ],
            GameMode::GameOver => vec![
                HudText::centred("Game Over!".into(), 48.0, at(0.0), RED),
                HudText::centred(format!("Final Score: {score}"), 24.0, at(60.0), WHITE),
                HudText::centred("Press R to Restart".into(), 20.0, at(100.0), WHITE),
            ],
        };
        Some(Self { elements: lines })
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub mode: GameMode,
    /// Live entities while playing; empty otherwise.
    pub entities: Vec<EntityView>,
    pub progress: ProgressState,
    pub hud: HudLayer,
    pub overlay: Option<HudLayer>,
    pub camera: Camera2D,
}

/// Receives one [`FrameView`] per tick.
pub trait Presenter {
    fn present(&mut self, frame: &FrameView);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_text() {
        let mut progress = ProgressState::new();
        progress.begin_level(5);
        let hud = HudLayer::counters(&progress);

        let lines: Vec<_> = hud.lines().collect();
        assert_eq!(lines, vec!["Score: 0", "Level: 1", "Coins: 0/5"]);
        assert_eq!(hud.elements()[2].color, YELLOW);
    }

    #[test]
    fn test_no_overlay_while_playing() {
        let progress = ProgressState::new();
        let viewport = Vec2::new(800.0, 600.0);
        assert!(HudLayer::overlay(GameMode::Playing { level: 1 }, &progress, viewport).is_none());
    }

    #[test]
    fn test_level_complete_overlay_names_finished_level() {
        let mut progress = ProgressState::new();
        progress.advance_level();
        let overlay = HudLayer::overlay(
            GameMode::LevelComplete { level: 1 },
            &progress,
            Vec2::new(800.0, 600.0),
        )
        .expect("overlay");

        let first = &overlay.elements()[0];
        assert_eq!(first.text, "Level 1 Complete!");
        assert_eq!(first.position, Vec2::new(400.0, 240.0));
        assert_eq!(first.anchor, Anchor::Center);
        assert!(overlay.lines().any(|l| l == "Press SPACE for Next Level"));
    }

    #[test]
    fn test_terminal_overlays_show_final_score() {
        let progress = ProgressState::new();
        let viewport = Vec2::new(800.0, 600.0);
        for mode in [GameMode::GameOver, GameMode::GameComplete] {
            let overlay = HudLayer::overlay(mode, &progress, viewport).expect("overlay");
            assert!(overlay.lines().any(|l| l == "Final Score: 0"));
        }
    }
}
