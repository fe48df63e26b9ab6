use log::debug;
use rand::{seq::IteratorRandom, seq::SliceRandom, Rng};
use strum::VariantArray;

use super::{
    config::MazeConfig,
    error::MazeError,
    grid::{Color, Direction, Grid, Object},
    select::select_obstacle_groups,
    tile::{Pos, TileMap, BORDER, GOAL, START, WALL},
};

/// Mission text attached to every episode
pub const MISSION: &str = "get to the green goal square";

/// One freshly generated maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub agent_pos: Pos,
    pub agent_dir: Direction,
    pub goal_pos: Pos,
    /// Obstacle groups placed this episode
    pub obstacles: Vec<char>,
    pub mission: &'static str,
}

/// Build the grid for one episode.
///
/// Placements happen in a fixed order and later ones overwrite earlier ones: outer walls,
/// the chosen obstacle groups, border cells, fixed walls, the agent, then the goal.
pub fn populate<R: Rng>(
    config: &MazeConfig,
    tiles: &TileMap,
    rng: &mut R,
) -> Result<Layout, MazeError> {
    let (width, height) = (tiles.width(), tiles.height());
    let mut grid = Grid::new(width, height);
    grid.wall_rect(0, 0, width, height);

    let groups = tiles.obstacle_groups();
    let bounds = config.obstacle_bounds(groups.len())?;
    let obstacles = select_obstacle_groups(&groups, bounds, rng);
    let obstacle = config.obstacle_kind.object(Color::Purple);
    for &group in &obstacles {
        for pos in tiles.positions(group) {
            grid.set(pos, Some(obstacle));
        }
    }
    debug!("placed obstacle groups {obstacles:?} as {}", config.obstacle_kind);

    for pos in tiles.positions(BORDER) {
        grid.set(pos, Some(Object::Wall(Color::Grey)));
    }

    let wall = config.obstacle_kind.object(Color::Grey);
    for pos in tiles.positions(WALL) {
        grid.set(pos, Some(wall));
    }

    let agent_pos = if config.random_agent_start {
        let reserved: Vec<Pos> = if config.random_goal {
            Vec::new()
        } else {
            tiles.positions(GOAL).collect()
        };
        grid.empty_cells()
            .filter(|pos| !reserved.contains(pos))
            .choose(rng)
            .ok_or(MazeError::NotEnoughOpenCells)?
    } else {
        tiles
            .positions(START)
            .choose(rng)
            .ok_or(MazeError::MissingSymbol(START))?
    };
    let agent_dir = *Direction::VARIANTS
        .choose(rng)
        .expect("there are four directions");

    let goal_pos = if config.random_goal {
        grid.empty_cells()
            .filter(|pos| *pos != agent_pos)
            .choose(rng)
            .ok_or(MazeError::NotEnoughOpenCells)?
    } else {
        tiles
            .positions(GOAL)
            .choose(rng)
            .ok_or(MazeError::MissingSymbol(GOAL))?
    };
    grid.set(goal_pos, Some(Object::Goal));
    debug!("agent at {agent_pos:?} facing {agent_dir:?}, goal at {goal_pos:?}");

    Ok(Layout {
        grid,
        agent_pos,
        agent_dir,
        goal_pos,
        obstacles,
        mission: MISSION,
    })
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::maze::ObstacleKind;

    fn build(config: &MazeConfig, seed: u64) -> Layout {
        let tiles = config.validate().unwrap();
        populate(config, &tiles, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn fixed_start_and_goal() {
        let layout = build(&MazeConfig::new(&["S.G"]), 1);
        assert_eq!(layout.agent_pos, (1, 1));
        assert_eq!(layout.goal_pos, (3, 1));
        assert_eq!(layout.grid.get((3, 1)), Some(Object::Goal));
        assert_eq!(layout.grid.get((0, 0)), Some(Object::Wall(Color::Grey)));
        assert_eq!(layout.grid.get((1, 1)), None);
        assert_eq!(layout.mission, MISSION);
    }

    #[test]
    fn all_obstacle_groups_as_lava() {
        let config = MazeConfig::new(&["S0.", "11#", "..G"])
            .with_obstacles(2, None)
            .with_obstacle_kind(ObstacleKind::Lava);
        let layout = build(&config, 3);

        let mut groups = layout.obstacles.clone();
        groups.sort();
        assert_eq!(groups, vec!['0', '1']);
        for pos in [(2, 1), (1, 2), (2, 2), (3, 2)] {
            assert_eq!(layout.grid.get(pos), Some(Object::Lava), "{pos:?}");
        }
    }

    #[test]
    fn wall_obstacles_are_purple() {
        let config = MazeConfig::new(&["S0#G"]).with_obstacles(1, Some(1));
        let layout = build(&config, 0);
        assert_eq!(layout.grid.get((2, 1)), Some(Object::Wall(Color::Purple)));
        assert_eq!(layout.grid.get((3, 1)), Some(Object::Wall(Color::Grey)));
    }

    #[test]
    fn no_obstacles_when_max_is_zero() {
        let config = MazeConfig::new(&["S0#G"]).with_obstacles(0, Some(0));
        let layout = build(&config, 0);
        assert!(layout.obstacles.is_empty());
        assert_eq!(layout.grid.get((2, 1)), None);
    }

    #[test]
    fn random_placements_avoid_blocked_cells() {
        let config = MazeConfig::new(&["S..0.", ".#.0.", "..1..", "22..G"])
            .with_obstacles(0, None)
            .with_obstacle_kind(ObstacleKind::Lava)
            .with_random_agent_start(true)
            .with_random_goal(true);
        for seed in 0..200 {
            let layout = build(&config, seed);
            assert_ne!(layout.agent_pos, layout.goal_pos);
            assert_eq!(layout.grid.get(layout.goal_pos), Some(Object::Goal));

            let mut agent_cell = layout.grid.clone();
            agent_cell.set(layout.goal_pos, None);
            assert_eq!(agent_cell.get(layout.agent_pos), None, "seed {seed}");

            let goals = layout
                .grid
                .encode()
                .iter()
                .flatten()
                .filter(|c| c[0] == Object::Goal.kind())
                .count();
            assert_eq!(goals, 1);
        }
    }

    #[test]
    fn random_agent_keeps_off_fixed_goal() {
        let config = MazeConfig::new(&["..G"]).with_random_agent_start(true);
        for seed in 0..50 {
            let layout = build(&config, seed);
            assert_ne!(layout.agent_pos, (3, 1));
            assert_eq!(layout.goal_pos, (3, 1));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = MazeConfig::new(&["S0..1", "2.#.3", "44..G"])
            .with_obstacles(1, Some(4))
            .with_random_goal(true);
        assert_eq!(build(&config, 42), build(&config, 42));
    }
}
