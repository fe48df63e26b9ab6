use std::collections::{BTreeMap, BTreeSet};

/// Cell coordinates `(x, y)`, origin at the top-left of the padded array
pub type Pos = (usize, usize);

/// Empty cell, never recorded
pub const EMPTY: char = '.';
/// Border wall, also used to fill the padding ring
pub const BORDER: char = '=';
/// Fixed internal wall
pub const WALL: char = '#';
/// Candidate agent start
pub const START: char = 'S';
/// Candidate fixed goal
pub const GOAL: char = 'G';

/// Padding applied around a tile array unless stated otherwise
pub const DEFAULT_PADDING: usize = 1;
/// Symbols skipped while parsing unless stated otherwise
pub const DEFAULT_IGNORE: &str = ".";

/// The coordinates of every symbol in a padded tile array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    symbols: BTreeMap<char, BTreeSet<Pos>>,
}

impl TileMap {
    /// Parse with the default padding and ignore set
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Self {
        parse_tile_array(rows, DEFAULT_PADDING, DEFAULT_IGNORE)
    }

    /// Width of the padded array
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the padded array
    pub fn height(&self) -> usize {
        self.height
    }

    /// All coordinates labelled `symbol`, if any
    pub fn get(&self, symbol: char) -> Option<&BTreeSet<Pos>> {
        self.symbols.get(&symbol)
    }

    /// Coordinates labelled `symbol`, empty when the symbol is absent
    pub fn positions(&self, symbol: char) -> impl Iterator<Item = Pos> + '_ {
        self.symbols.get(&symbol).into_iter().flatten().copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains_key(&symbol)
    }

    /// Every symbol present, in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.keys().copied()
    }

    /// The digit symbols present, each naming one selectable obstacle group
    pub fn obstacle_groups(&self) -> Vec<char> {
        self.symbols().filter(char::is_ascii_digit).collect()
    }
}

/// Parse a tile array into the coordinate sets of each symbol.
///
/// The array is first surrounded by `padding` rings of [`BORDER`], so a cell at
/// `(x, y)` in `rows` lands at `(x + padding, y + padding)`. Cells whose symbol is
/// in `ignore` are skipped.
///
/// Rows are expected to share one width; checking that is left to the caller
/// (see [`MazeConfig::validate`](super::MazeConfig::validate)).
pub fn parse_tile_array<S: AsRef<str>>(rows: &[S], padding: usize, ignore: &str) -> TileMap {
    let inner_width = rows.first().map_or(0, |r| r.as_ref().chars().count());
    debug_assert!(
        rows.iter().all(|r| r.as_ref().chars().count() == inner_width),
        "tile rows must share one width"
    );

    let width = inner_width + 2 * padding;
    let height = rows.len() + 2 * padding;
    let border_row = BORDER.to_string().repeat(inner_width);
    let side = BORDER.to_string().repeat(padding);

    let padded = std::iter::repeat(border_row.as_str())
        .take(padding)
        .chain(rows.iter().map(AsRef::as_ref))
        .chain(std::iter::repeat(border_row.as_str()).take(padding));

    let mut symbols = BTreeMap::<char, BTreeSet<Pos>>::new();
    for (y, row) in padded.enumerate() {
        let cells = side.chars().chain(row.chars()).chain(side.chars());
        for (x, c) in cells.enumerate() {
            if ignore.contains(c) {
                continue;
            }
            symbols.entry(c).or_default().insert((x, y));
        }
    }

    TileMap {
        width,
        height,
        symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_positions() {
        let tiles = TileMap::parse(&["S.G"]);
        assert_eq!(tiles.width(), 5);
        assert_eq!(tiles.height(), 3);
        assert_eq!(tiles.get(START), Some(&BTreeSet::from([(1, 1)])));
        assert_eq!(tiles.get(GOAL), Some(&BTreeSet::from([(3, 1)])));
        assert!(tiles.get(EMPTY).is_none(), "Ignored symbols are not recorded");
    }

    #[test]
    fn padding_ring_is_border() {
        let tiles = parse_tile_array(&["ab", "cd"], 2, "");
        let border = tiles.get(BORDER).unwrap();
        assert_eq!(border.len(), 6 * 6 - 4);
        assert!(border.contains(&(0, 0)));
        assert!(border.contains(&(5, 5)));
        assert_eq!(tiles.positions('d').collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn cells_partition_padded_grid() {
        let rows = ["..11#", "S.1.G", "22..."];
        let tiles = TileMap::parse(&rows);

        let mut seen = BTreeSet::new();
        let mut total = 0;
        for symbol in tiles.symbols() {
            let set = tiles.get(symbol).unwrap();
            total += set.len();
            seen.extend(set.iter().copied());
        }
        assert_eq!(total, seen.len(), "No cell belongs to two symbols");

        let expected: BTreeSet<Pos> = (0..tiles.height())
            .flat_map(|y| (0..tiles.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                let inner = x >= 1 && y >= 1 && x <= 5 && y <= 3;
                !(inner && rows[y - 1].as_bytes()[x - 1] == b'.')
            })
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn obstacle_groups_are_digits() {
        let tiles = TileMap::parse(&["0.3#", "S.3G", "9..."]);
        assert_eq!(tiles.obstacle_groups(), vec!['0', '3', '9']);
        assert_eq!(tiles.get('3').unwrap().len(), 2);
    }
}
