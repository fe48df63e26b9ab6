use super::{config::MazeConfig, error::MazeError};

pub const GRID_0_0: [&str; 11] = [
    "...3.0....G",
    ".333.0.....",
    ".....00.444",
    "6....#..4..",
    "6....#.....",
    "6..#####...",
    "6....#.....",
    "..1..#.2...",
    "111..222...",
    "..........5",
    "S.......555",
];

pub const GRID_1_0: [&str; 11] = [
    "66..4444..G",
    "6..........",
    "6..........",
    ".....#.....",
    "..22.#.333.",
    "..2#####.3.",
    "5.2..#.....",
    "5....#.....",
    "55........1",
    "0000......1",
    "S........11",
];

pub const GRID_2_0: [&str; 11] = [
    "G.44.333...",
    "..4....3..5",
    "..4.......5",
    ".....#....5",
    "..0..#....5",
    "000#####...",
    ".111.#.....",
    "...1.#..222",
    "........2..",
    "...........",
    "S...6666...",
];

pub const GRID_3_0: [&str; 11] = [
    "..11..0...G",
    "...1..0....",
    "...1..0..4.",
    ".2...#0444.",
    ".2...#.....",
    ".22#####.33",
    "....6#....3",
    "....6#....3",
    "....66..555",
    "..........5",
    "S..........",
];

pub const GRID_4_0: [&str; 11] = [
    "G.......666",
    "...44.....6",
    "...4.....55",
    "...4.#...5.",
    "000..#...5.",
    "..0#####...",
    ".....#.2...",
    "...3.#.222.",
    ".333.......",
    "......1....",
    "S.....111..",
];

pub const GRID_5_0: [&str; 11] = [
    ".6666.0...G",
    "......0.555",
    ".....00.5..",
    ".111.#.....",
    "...1.#.....",
    "2..#####...",
    "2....#....4",
    "22...#.3444",
    ".......3...",
    "......33...",
    "S..........",
];

pub const GRID_6_0: [&str; 11] = [
    "..222G..555",
    "..2......5.",
    "....66.....",
    "....6#.....",
    "000.6#.....",
    "..0#####.44",
    ".....#....4",
    "...1.#....4",
    ".111.......",
    "..........3",
    "S.......333",
];

pub const GRID_7_0: [&str; 11] = [
    "444..G..555",
    ".4........5",
    "........111",
    "666..#....1",
    "6....#.....",
    "...#####000",
    ".....#....0",
    ".22..#.....",
    ".2........3",
    ".2........3",
    ".....S...33",
];

pub const GRID_8_0: [&str; 11] = [
    "55...444000",
    "5....4..0..",
    "5.G........",
    ".....#.....",
    "11...#..222",
    "1..#####2..",
    "1....#....3",
    "666..#....3",
    "6........33",
    "...........",
    "..........S",
];

pub const GRID_9_0: [&str; 11] = [
    "..........G",
    "..33.......",
    "...3444....",
    "22.3.#4....",
    ".2...#.....",
    ".2.#####555",
    ".....#0...5",
    "66...#0....",
    ".6....00...",
    ".6........1",
    "S.......111",
];

pub const GRID_10_0: [&str; 11] = [
    "000.......G",
    ".0........6",
    ".....555..6",
    ".....#.5.66",
    "..1..#.....",
    "..1#####222",
    ".11..#....2",
    ".....#.33..",
    "........3..",
    "....4...3..",
    "S.444......",
];

pub const GRID_11_0: [&str; 11] = [
    "..444.....G",
    "....4.....6",
    "..3.......6",
    "..333#...66",
    ".....#....2",
    ".00#####..2",
    "..0..#...22",
    "..0..#.....",
    ".....1....5",
    ".....1..555",
    "S....11....",
];

pub const SIMPLE_GRID_0_0: [&str; 7] = [
    "...0..G",
    "33.0.44",
    "6..#...",
    "6.###..",
    "...#...",
    "11.22.5",
    "S.....5",
];

pub const SIMPLE_GRID_1_0: [&str; 4] = [
    "S0..G",
    ".1...",
    "...#.",
    "S..#G",
];

/// Every layout by name
pub const LAYOUTS: [(&str, &[&str]); 14] = [
    ("grid-0-0", &GRID_0_0),
    ("grid-1-0", &GRID_1_0),
    ("grid-2-0", &GRID_2_0),
    ("grid-3-0", &GRID_3_0),
    ("grid-4-0", &GRID_4_0),
    ("grid-5-0", &GRID_5_0),
    ("grid-6-0", &GRID_6_0),
    ("grid-7-0", &GRID_7_0),
    ("grid-8-0", &GRID_8_0),
    ("grid-9-0", &GRID_9_0),
    ("grid-10-0", &GRID_10_0),
    ("grid-11-0", &GRID_11_0),
    ("simple-grid-0-0", &SIMPLE_GRID_0_0),
    ("simple-grid-1-0", &SIMPLE_GRID_1_0),
];

/// Look up a layout by name
pub fn layout(name: &str) -> Option<&'static [&'static str]> {
    LAYOUTS.iter().find(|(n, _)| *n == name).map(|(_, rows)| *rows)
}

/// A named maze variant
struct Scenario {
    id: &'static str,
    layout: &'static [&'static str],
    obstacles: (usize, usize),
    random_agent_start: bool,
    random_goal: bool,
}

const SCENARIOS: [Scenario; 6] = [
    Scenario {
        id: "ObsMaze-00-2Obs",
        layout: &GRID_0_0,
        obstacles: (2, 2),
        random_agent_start: false,
        random_goal: true,
    },
    Scenario {
        id: "ObsMaze-00-5to7Obs",
        layout: &GRID_0_0,
        obstacles: (5, 7),
        random_agent_start: false,
        random_goal: true,
    },
    Scenario {
        id: "ObsMazeSimple-00-2Obs",
        layout: &SIMPLE_GRID_0_0,
        obstacles: (2, 2),
        random_agent_start: false,
        random_goal: true,
    },
    Scenario {
        id: "ObsMazeSimple-00-5to7Obs",
        layout: &SIMPLE_GRID_0_0,
        obstacles: (5, 7),
        random_agent_start: false,
        random_goal: true,
    },
    Scenario {
        id: "ObsMazeSimple-01-1Obs",
        layout: &SIMPLE_GRID_1_0,
        obstacles: (1, 1),
        random_agent_start: false,
        random_goal: false,
    },
    Scenario {
        id: "ObsMazeSimple-01-2Obs",
        layout: &SIMPLE_GRID_1_0,
        obstacles: (2, 2),
        random_agent_start: false,
        random_goal: false,
    },
];

/// Names of every registered variant
pub fn scenario_ids() -> impl Iterator<Item = &'static str> {
    SCENARIOS.iter().map(|s| s.id)
}

/// The configuration of a named variant, with wall obstacles and the default step budget
pub fn scenario(id: &str) -> Result<MazeConfig, MazeError> {
    let s = SCENARIOS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| MazeError::UnknownScenario(id.to_string()))?;
    let (min, max) = s.obstacles;
    Ok(MazeConfig::new(s.layout)
        .with_obstacles(min, Some(max))
        .with_random_agent_start(s.random_agent_start)
        .with_random_goal(s.random_goal))
}
