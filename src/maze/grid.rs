use std::fmt;

use strum::{Display, FromRepr, VariantArray};

use super::tile::Pos;

/// Object colours, indexed as MiniGrid indexes them
#[derive(FromRepr, Display, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Yellow = 4,
    Grey = 5,
}

/// Anything that can occupy a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Object {
    Wall(Color),
    Lava,
    Goal,
}

impl Object {
    /// Object type index
    pub const fn kind(&self) -> u8 {
        match self {
            Object::Wall(_) => 2,
            Object::Goal => 8,
            Object::Lava => 9,
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Object::Wall(color) => *color,
            Object::Goal => Color::Green,
            Object::Lava => Color::Red,
        }
    }

    /// Whether an agent may move onto this object
    pub const fn can_overlap(&self) -> bool {
        !matches!(self, Object::Wall(_))
    }

    /// `[type, colour, state]` triple
    pub const fn encode(&self) -> [u8; 3] {
        [self.kind(), self.color() as u8, 0]
    }

    fn glyph(&self) -> char {
        match self {
            Object::Wall(Color::Grey) => '#',
            Object::Wall(_) => 'W',
            Object::Lava => '~',
            Object::Goal => 'G',
        }
    }
}

/// Agent facing, numbered as MiniGrid numbers directions
#[derive(VariantArray, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    /// Turn 90° clockwise
    pub fn right(self) -> Self {
        Self::VARIANTS[(self as usize + 1) % 4]
    }

    /// Turn 90° counter-clockwise
    pub fn left(self) -> Self {
        Self::VARIANTS[(self as usize + 3) % 4]
    }

    /// The cell one step ahead of `pos`, if it is not off the top or left edge
    pub fn ahead(self, (x, y): Pos) -> Option<Pos> {
        match self {
            Direction::Right => Some((x + 1, y)),
            Direction::Down => Some((x, y + 1)),
            Direction::Left => x.checked_sub(1).map(|x| (x, y)),
            Direction::Up => y.checked_sub(1).map(|y| (x, y)),
        }
    }
}

/// Type index of an empty cell
pub const EMPTY_KIND: u8 = 1;
/// Type index of the agent
pub const AGENT_KIND: u8 = 10;

/// A rectangular grid of optional objects
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Object>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, (x, y): Pos) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<Object> {
        self.in_bounds(pos)
            .then(|| self.cells[self.index(pos)])
            .flatten()
    }

    /// Put `obj` at `pos`, replacing whatever was there
    ///
    /// **Panics** if `pos` is out of bounds
    pub fn set(&mut self, pos: Pos, obj: Option<Object>) {
        assert!(self.in_bounds(pos), "{pos:?} is outside the grid");
        let i = self.index(pos);
        self.cells[i] = obj;
    }

    pub fn horz_wall(&mut self, x: usize, y: usize, len: usize) {
        for i in x..x + len {
            self.set((i, y), Some(Object::Wall(Color::Grey)));
        }
    }

    pub fn vert_wall(&mut self, x: usize, y: usize, len: usize) {
        for j in y..y + len {
            self.set((x, j), Some(Object::Wall(Color::Grey)));
        }
    }

    /// Outline the rectangle with top-left `(x, y)` and size `w` × `h` with walls
    pub fn wall_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        self.horz_wall(x, y, w);
        self.horz_wall(x, y + h - 1, w);
        self.vert_wall(x, y, h);
        self.vert_wall(x + w - 1, y, h);
    }

    /// Unoccupied cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Encode as `[y][x]` triples of `[type, colour, state]`
    pub fn encode(&self) -> Vec<Vec<[u8; 3]>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| match self.get((x, y)) {
                        Some(obj) => obj.encode(),
                        None => [EMPTY_KIND, 0, 0],
                    })
                    .collect()
            })
            .collect()
    }

    /// Render as text, one character per cell, with the agent drawn as an arrow
    pub fn render(&self, agent: Option<(Pos, Direction)>) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = match agent {
                    Some((pos, dir)) if pos == (x, y) => ['>', 'v', '<', '^'][dir as usize],
                    _ => self.get((x, y)).map_or('.', |o| o.glyph()),
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, (x, y): Pos) -> usize {
        y * self.width + x
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_rect_outlines_grid() {
        let mut grid = Grid::new(4, 3);
        grid.wall_rect(0, 0, 4, 3);
        assert_eq!(grid.to_string(), "####\n#..#\n####\n");
        assert_eq!(grid.empty_cells().collect::<Vec<_>>(), vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn set_overwrites() {
        let mut grid = Grid::new(3, 3);
        grid.set((1, 1), Some(Object::Wall(Color::Purple)));
        grid.set((1, 1), Some(Object::Lava));
        assert_eq!(grid.get((1, 1)), Some(Object::Lava));
        assert_eq!(grid.get((5, 5)), None, "Out of bounds reads are empty");
    }

    #[test]
    fn encoding_matches_object_indices() {
        let mut grid = Grid::new(2, 1);
        grid.set((1, 0), Some(Object::Goal));
        assert_eq!(grid.encode(), vec![vec![[1, 0, 0], [8, 1, 0]]]);
        assert_eq!(Object::Wall(Color::Grey).encode(), [2, 5, 0]);
        assert_eq!(Object::Lava.encode(), [9, 0, 0]);
        assert!(!Object::Wall(Color::Grey).can_overlap());
        assert!(Object::Lava.can_overlap());
    }

    #[test]
    fn render_draws_agent() {
        let grid = Grid::new(2, 1);
        assert_eq!(grid.render(Some(((0, 0), Direction::Up))), "^.\n");
    }

    #[test]
    fn direction_turns() {
        assert_eq!(Direction::Right.right(), Direction::Down);
        assert_eq!(Direction::Up.right(), Direction::Right);
        assert_eq!(Direction::Right.left(), Direction::Up);
        assert_eq!(Direction::Left.ahead((2, 2)), Some((1, 2)));
        assert_eq!(Direction::Up.ahead((2, 0)), None);
        assert_eq!(Direction::from_repr(1), Some(Direction::Down));
    }
}
