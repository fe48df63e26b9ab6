use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use strum::VariantArray;

use crate::env::{DiscreteActionSpace, Environment, Report};

use super::{
    config::MazeConfig,
    error::MazeError,
    grid::{Direction, Object, AGENT_KIND},
    levels,
    populate::{populate, Layout},
    tile::{Pos, TileMap},
};

/// Agent actions, numbered as in MiniGrid
#[derive(VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Left = 0,
    Right = 1,
    Forward = 2,
    /// End the episode without reward
    Done = 6,
}

/// Fully observable view of the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// `[y][x]` cells as `[type, colour, state]`, with the agent cell as `[10, 0, direction]`
    pub image: Vec<Vec<[u8; 3]>>,
    pub agent_pos: Pos,
    pub agent_dir: Direction,
    pub mission: &'static str,
}

/// A maze of randomly selected obstacle groups, regenerated on every reset
///
/// Reaching the goal ends the episode with reward `1 - 0.9 * steps / max_steps`; stepping into
/// lava ends it with no reward. Episodes are truncated after the configured step budget.
pub struct ObstacleMaze {
    config: MazeConfig,
    tiles: TileMap,
    rng: StdRng,
    layout: Layout,
    agent_pos: Pos,
    agent_dir: Direction,
    step_count: u32,
    terminated: bool,
    pub report: Report,
}

impl ObstacleMaze {
    /// Validate `config` and generate the first layout
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`ObstacleMaze::new`] with a fixed seed
    pub fn with_seed(config: MazeConfig, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Build one of the named variants in [`levels`]
    pub fn from_scenario(name: &str) -> Result<Self, MazeError> {
        Self::new(levels::scenario(name)?)
    }

    fn with_rng(config: MazeConfig, mut rng: StdRng) -> Result<Self, MazeError> {
        let tiles = config.validate()?;
        let layout = populate(&config, &tiles, &mut rng)?;
        info!(
            "obstacle maze {}x{}, {} obstacle groups, {} steps per episode",
            tiles.width(),
            tiles.height(),
            tiles.obstacle_groups().len(),
            config.step_budget()
        );
        Ok(Self {
            agent_pos: layout.agent_pos,
            agent_dir: layout.agent_dir,
            config,
            tiles,
            rng,
            layout,
            step_count: 0,
            terminated: false,
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    /// Reseed the generator; the next reset is reproducible from here
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// The layout generated at the last reset
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    pub fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> u32 {
        self.config.step_budget()
    }

    pub fn mission(&self) -> &'static str {
        self.layout.mission
    }

    /// Text rendering of the current grid and agent
    pub fn render(&self) -> String {
        self.layout
            .grid
            .render(Some((self.agent_pos, self.agent_dir)))
    }

    fn observe(&self) -> Observation {
        let mut image = self.layout.grid.encode();
        let (x, y) = self.agent_pos;
        image[y][x] = [AGENT_KIND, 0, self.agent_dir as u8];
        Observation {
            image,
            agent_pos: self.agent_pos,
            agent_dir: self.agent_dir,
            mission: self.layout.mission,
        }
    }

    fn success_reward(&self) -> f32 {
        1.0 - 0.9 * (self.step_count as f32 / self.max_steps() as f32)
    }
}

impl DiscreteActionSpace for ObstacleMaze {
    fn actions(&self) -> Vec<Self::Action> {
        Action::VARIANTS.to_vec()
    }
}

impl Environment for ObstacleMaze {
    type State = Observation;
    type Action = Action;

    fn is_active(&self) -> bool {
        !self.terminated && self.step_count < self.max_steps()
    }

    fn reset(&mut self) -> Self::State {
        self.layout = populate(&self.config, &self.tiles, &mut self.rng)
            .expect("layout preconditions are checked when the maze is built");
        self.agent_pos = self.layout.agent_pos;
        self.agent_dir = self.layout.agent_dir;
        self.step_count = 0;
        self.terminated = false;
        self.observe()
    }

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        if !self.is_active() {
            return (None, 0.0);
        }
        self.step_count += 1;
        self.report.entry("steps").and_modify(|x| *x += 1.0);
        let mut reward = 0.0;

        match action {
            Action::Left => self.agent_dir = self.agent_dir.left(),
            Action::Right => self.agent_dir = self.agent_dir.right(),
            Action::Forward => {
                let ahead = self.agent_dir.ahead(self.agent_pos);
                if let Some(next) = ahead.filter(|&p| self.layout.grid.in_bounds(p)) {
                    match self.layout.grid.get(next) {
                        None => self.agent_pos = next,
                        Some(obj) if obj.can_overlap() => {
                            self.agent_pos = next;
                            self.terminated = true;
                            if obj == Object::Goal {
                                reward = self.success_reward();
                            }
                        }
                        Some(_) => {}
                    }
                }
            }
            Action::Done => self.terminated = true,
        }

        self.report.entry("reward").and_modify(|x| *x += reward as f64);

        let next_state = self.is_active().then(|| self.observe());
        (next_state, reward)
    }

    fn random_action(&mut self) -> Self::Action {
        *Action::VARIANTS
            .choose(&mut self.rng)
            .expect("action set is not empty")
    }
}
