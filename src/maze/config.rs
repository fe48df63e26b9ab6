use strum::{Display, EnumString};

use super::{
    error::MazeError,
    grid::{Color, Object},
    tile::{TileMap, BORDER, GOAL, START, WALL},
};

/// What obstacle groups and fixed walls are made of
#[derive(EnumString, Display, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum ObstacleKind {
    #[default]
    Wall,
    Lava,
}

impl ObstacleKind {
    /// Parse `"wall"` or `"lava"`
    pub fn from_name(name: &str) -> Result<Self, MazeError> {
        name.parse()
            .map_err(|_| MazeError::UnknownObstacleKind(name.to_string()))
    }

    /// The object placed for this kind, with `wall_color` used for walls
    pub fn object(self, wall_color: Color) -> Object {
        match self {
            ObstacleKind::Wall => Object::Wall(wall_color),
            ObstacleKind::Lava => Object::Lava,
        }
    }
}

/// Twice the tile count, saturating at `u32::MAX`
fn default_budget(width: usize, height: usize) -> u32 {
    let steps = width.saturating_mul(height).saturating_mul(2);
    u32::try_from(steps).unwrap_or(u32::MAX)
}

/// Parameters of one obstacle maze variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Tile rows, all of one width
    pub tiles: Vec<String>,
    /// Fewest obstacle groups placed per episode
    pub min_obstacles: usize,
    /// Most obstacle groups placed per episode, unbounded if `None`
    pub max_obstacles: Option<usize>,
    pub obstacle_kind: ObstacleKind,
    /// Start anywhere free instead of on an `S` cell
    pub random_agent_start: bool,
    /// Put the goal anywhere free instead of on a `G` cell
    pub random_goal: bool,
    /// Episode step budget, twice the tile count if `None`
    pub max_steps: Option<u32>,
}

impl MazeConfig {
    /// A configuration with no obstacle groups, fixed start and goal, and wall obstacles
    pub fn new<S: AsRef<str>>(tiles: &[S]) -> Self {
        Self {
            tiles: tiles.iter().map(|r| r.as_ref().to_string()).collect(),
            min_obstacles: 0,
            max_obstacles: None,
            obstacle_kind: ObstacleKind::default(),
            random_agent_start: false,
            random_goal: false,
            max_steps: None,
        }
    }

    pub fn with_obstacles(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_obstacles = min;
        self.max_obstacles = max;
        self
    }

    pub fn with_obstacle_kind(mut self, kind: ObstacleKind) -> Self {
        self.obstacle_kind = kind;
        self
    }

    pub fn with_random_agent_start(mut self, random: bool) -> Self {
        self.random_agent_start = random;
        self
    }

    pub fn with_random_goal(mut self, random: bool) -> Self {
        self.random_goal = random;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn tile_width(&self) -> usize {
        self.tiles.first().map_or(0, |r| r.chars().count())
    }

    pub fn tile_height(&self) -> usize {
        self.tiles.len()
    }

    /// The episode step budget, the default when `max_steps` is unset or zero
    pub fn step_budget(&self) -> u32 {
        self.max_steps
            .filter(|&n| n > 0)
            .unwrap_or_else(|| default_budget(self.tile_width(), self.tile_height()))
    }

    /// The inclusive range of obstacle group counts given `available` groups
    pub fn obstacle_bounds(&self, available: usize) -> Result<(usize, usize), MazeError> {
        let max = self.max_obstacles.map_or(available, |m| m.min(available));
        if self.min_obstacles > max {
            return Err(MazeError::InvalidObstacleBounds {
                min: self.min_obstacles,
                max,
                available,
            });
        }
        Ok((self.min_obstacles, max))
    }

    /// Check every precondition of grid population and parse the tiles.
    ///
    /// A configuration that passes can be populated on every reset without failing.
    pub fn validate(&self) -> Result<TileMap, MazeError> {
        let width = self.tile_width();
        if width == 0 {
            return Err(MazeError::EmptyLayout);
        }
        if let Some((row, found)) = self
            .tiles
            .iter()
            .map(|r| r.chars().count())
            .enumerate()
            .find(|(_, w)| *w != width)
        {
            return Err(MazeError::RaggedLayout {
                row,
                expected: width,
                found,
            });
        }

        let tiles = TileMap::parse(self.tiles.as_slice());
        self.obstacle_bounds(tiles.obstacle_groups().len())?;

        if !self.random_agent_start && !tiles.contains(START) {
            return Err(MazeError::MissingSymbol(START));
        }
        if !self.random_goal && !tiles.contains(GOAL) {
            return Err(MazeError::MissingSymbol(GOAL));
        }

        let blocked: usize = tiles
            .symbols()
            .filter(|c| *c == BORDER || *c == WALL || c.is_ascii_digit())
            .map(|c| tiles.positions(c).count())
            .sum();
        let open = tiles.width() * tiles.height() - blocked;
        let reserved = if self.random_agent_start && !self.random_goal {
            tiles.positions(GOAL).count()
        } else {
            0
        };
        let needed = match (self.random_agent_start, self.random_goal) {
            (false, false) => 0,
            (true, false) => reserved + 1,
            (_, true) => 2,
        };
        if open < needed {
            return Err(MazeError::NotEnoughOpenCells);
        }

        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_kind_names() {
        assert_eq!(ObstacleKind::from_name("wall"), Ok(ObstacleKind::Wall));
        assert_eq!(ObstacleKind::from_name("lava"), Ok(ObstacleKind::Lava));
        assert_eq!(
            ObstacleKind::from_name("sand"),
            Err(MazeError::UnknownObstacleKind("sand".into()))
        );
        assert_eq!(ObstacleKind::Lava.to_string(), "lava");
    }

    #[test]
    fn default_step_budget() {
        let config = MazeConfig::new(&["S..", "..G"]);
        assert_eq!(config.step_budget(), 12);
        assert_eq!(config.clone().with_max_steps(7).step_budget(), 7);
        assert_eq!(
            config.with_max_steps(0).step_budget(),
            12,
            "Zero falls back to the default budget"
        );
    }

    #[test]
    fn default_budget_saturates() {
        assert_eq!(default_budget(11, 11), 242);
        assert_eq!(default_budget(1 << 16, 1 << 16), u32::MAX);
        assert_eq!(default_budget(usize::MAX, 3), u32::MAX);
    }

    #[test]
    fn validate_rejects_ragged_rows() {
        let config = MazeConfig::new(&["S..", ".G"]);
        assert_eq!(
            config.validate(),
            Err(MazeError::RaggedLayout {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(MazeConfig::new(&empty).validate(), Err(MazeError::EmptyLayout));
    }

    #[test]
    fn validate_clamps_upper_bound_only() {
        let tiles = ["S01", "..G"];
        assert!(MazeConfig::new(&tiles)
            .with_obstacles(1, Some(9))
            .validate()
            .is_ok());
        assert_eq!(
            MazeConfig::new(&tiles).with_obstacles(3, None).validate(),
            Err(MazeError::InvalidObstacleBounds {
                min: 3,
                max: 2,
                available: 2
            })
        );
        assert!(MazeConfig::new(&tiles)
            .with_obstacles(2, Some(1))
            .validate()
            .is_err());
    }

    #[test]
    fn validate_requires_fixed_symbols() {
        assert_eq!(
            MazeConfig::new(&["..G"]).validate(),
            Err(MazeError::MissingSymbol(START))
        );
        assert_eq!(
            MazeConfig::new(&["S.."]).validate(),
            Err(MazeError::MissingSymbol(GOAL))
        );
        assert!(MazeConfig::new(&["S.."]).with_random_goal(true).validate().is_ok());
    }

    #[test]
    fn validate_requires_open_cells() {
        let config = MazeConfig::new(&["#0#"])
            .with_random_agent_start(true)
            .with_random_goal(true);
        assert_eq!(config.validate(), Err(MazeError::NotEnoughOpenCells));

        let config = MazeConfig::new(&["#.G"]).with_random_agent_start(true);
        assert!(config.validate().is_ok());
        let config = MazeConfig::new(&["#0G"]).with_random_agent_start(true);
        assert_eq!(config.validate(), Err(MazeError::NotEnoughOpenCells));
    }
}
