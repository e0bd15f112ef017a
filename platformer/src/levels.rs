//! Static level fixtures and the catalog that serves them.

use serde::{Deserialize, Serialize};

use crate::error::{LevelError, LevelNotFound};
use crate::math::{Rect, Vec2};

/// Horizontal patrol direction of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = LevelError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(LevelError::InvalidDirection(other)),
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Where an enemy appears and which way it starts walking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Top-left corner of the enemy.
    pub position: Vec2,
    pub direction: Direction,
}

/// One level's geometry. Coin positions are coin centres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub platforms: Vec<Rect>,
    pub coins: Vec<Vec2>,
    pub enemies: Vec<EnemySpawn>,
}

impl LevelDefinition {
    fn validate(&self, level: u32) -> Result<(), LevelError> {
        if self.coins.is_empty() {
            return Err(LevelError::NoCoins { level });
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            if platform.width <= 0.0 || platform.height <= 0.0 {
                return Err(LevelError::InvalidPlatform {
                    level,
                    index,
                    width: platform.width,
                    height: platform.height,
                });
            }
        }
        Ok(())
    }
}

/// Immutable, 1-indexed list of levels.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Wrap a list of levels. Level 1 is the first element.
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// The three levels shipped with the game.
    pub fn builtin() -> Self {
        Self::new(vec![level_one(), level_two(), level_three()])
    }

    /// Startup check that every level is playable.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for (number, level) in (1u32..).zip(&self.levels) {
            level.validate(number)?;
        }
        Ok(())
    }

    /// Fetch level `number`, counting from 1.
    pub fn lookup(&self, number: u32) -> Result<&LevelDefinition, LevelNotFound> {
        number
            .checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
            .ok_or(LevelNotFound(number))
    }

    pub fn contains(&self, number: u32) -> bool {
        self.lookup(number).is_ok()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn platform(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, width, height)
}

fn coin(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn enemy(x: f32, y: f32, direction: Direction) -> EnemySpawn {
    EnemySpawn {
        position: Vec2::new(x, y),
        direction,
    }
}

fn level_one() -> LevelDefinition {
    LevelDefinition {
        platforms: vec![
            platform(300.0, 400.0, 200.0, 20.0),
            platform(600.0, 300.0, 150.0, 20.0),
            platform(100.0, 250.0, 100.0, 20.0),
        ],
        coins: vec![coin(350.0, 350.0), coin(650.0, 250.0), coin(150.0, 200.0)],
        enemies: vec![enemy(400.0, 500.0, Direction::Right)],
    }
}

fn level_two() -> LevelDefinition {
    LevelDefinition {
        platforms: vec![
            platform(200.0, 450.0, 150.0, 20.0),
            platform(400.0, 350.0, 100.0, 20.0),
            platform(600.0, 250.0, 120.0, 20.0),
            platform(100.0, 150.0, 80.0, 20.0),
        ],
        coins: vec![
            coin(250.0, 400.0),
            coin(450.0, 300.0),
            coin(650.0, 200.0),
            coin(150.0, 100.0),
            coin(500.0, 100.0),
        ],
        enemies: vec![
            enemy(300.0, 450.0, Direction::Right),
            enemy(550.0, 250.0, Direction::Left),
        ],
    }
}

fn level_three() -> LevelDefinition {
    LevelDefinition {
        platforms: vec![
            platform(150.0, 500.0, 100.0, 20.0),
            platform(300.0, 400.0, 80.0, 20.0),
            platform(450.0, 300.0, 100.0, 20.0),
            platform(600.0, 200.0, 80.0, 20.0),
            platform(100.0, 100.0, 60.0, 20.0),
            platform(700.0, 100.0, 60.0, 20.0),
        ],
        coins: vec![
            coin(200.0, 450.0),
            coin(350.0, 350.0),
            coin(500.0, 250.0),
            coin(650.0, 150.0),
            coin(150.0, 50.0),
            coin(750.0, 50.0),
            coin(400.0, 50.0),
        ],
        enemies: vec![
            enemy(200.0, 500.0, Direction::Right),
            enemy(400.0, 300.0, Direction::Left),
            enemy(650.0, 200.0, Direction::Right),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_lookup_is_one_indexed() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.lookup(1).map(|l| l.coins.len()), Ok(3));
        assert_eq!(catalog.lookup(3).map(|l| l.coins.len()), Ok(7));
        assert_eq!(catalog.lookup(0).err(), Some(LevelNotFound(0)));
        assert_eq!(catalog.lookup(4).err(), Some(LevelNotFound(4)));
        assert!(!catalog.contains(4));
    }

    #[test]
    fn test_validation_rejects_coinless_level() {
        let catalog = LevelCatalog::new(vec![LevelDefinition {
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
        }]);
        assert_eq!(catalog.validate(), Err(LevelError::NoCoins { level: 1 }));
    }

    #[test]
    fn test_validation_rejects_flat_platform() {
        let mut level = level_one();
        level.platforms[1].height = 0.0;
        let catalog = LevelCatalog::new(vec![level_two(), level]);
        assert!(matches!(
            catalog.validate(),
            Err(LevelError::InvalidPlatform { level: 2, index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert_eq!(
            LevelCatalog::new(Vec::new()).validate(),
            Err(LevelError::EmptyCatalog)
        );
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::try_from(-1), Ok(Direction::Left));
        assert_eq!(Direction::try_from(1), Ok(Direction::Right));
        assert_eq!(Direction::try_from(0), Err(LevelError::InvalidDirection(0)));
    }

    #[test]
    fn test_level_definition_json_uses_signed_directions() {
        let json = serde_json::to_value(level_one()).expect("serialize");
        assert_eq!(json["enemies"][0]["direction"], 1);

        let bad = r#"{"platforms":[],"coins":[],"enemies":[{"position":{"x":0,"y":0},"direction":2}]}"#;
        assert!(serde_json::from_str::<LevelDefinition>(bad).is_err());
    }
}
