use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Tile value that counts as a win.
pub const WIN_TILE: Tile = 2048;

pub type Tile = u64;
pub type Score = u64;
pub type Line = [Tile; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Lines are reversed before compaction when travelling toward the high index.
    #[inline]
    fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts full names and WASD keys (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Move::Up),
            "down" | "s" => Ok(Move::Down),
            "left" | "a" => Ok(Move::Left),
            "right" | "d" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// Result of sliding and merging a single line toward index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShift {
    pub line: Line,
    /// Sum of the tiles created by merges.
    pub score: Score,
    pub merged: bool,
}

/// Result of shifting a whole board, before any tile is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    pub score: Score,
    pub merged: bool,
}

/// 4x4 2048 board, row-major. 0 is an empty cell; every other cell is a power of two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([[Tile; SIZE]; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from explicit rows.
    ///
    /// Values are taken as-is; callers are responsible for passing 0 or powers of two.
    /// A pair of `1 << 63` tiles cannot grow further and is left unmerged.
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
    /// let s = b.shift(Move::Left);
    /// assert_eq!(s.board.rows()[0], [4, 0, 0, 0]);
    /// assert_eq!(s.score, 4);
    /// ```
    #[inline]
    pub const fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    #[inline]
    pub fn rows(&self) -> [[Tile; SIZE]; SIZE] {
        self.0
    }

    /// Value at `(row, col)`; 0 if empty.
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    pub fn shift(self, dir: Move) -> Shifted {
        let mut board = self;
        let mut score = 0;
        let mut merged = false;
        for idx in 0..SIZE {
            let mut line = self.line(dir, idx);
            if dir.is_reversed() {
                line.reverse();
            }
            let mut shifted = slide_line(line);
            if dir.is_reversed() {
                shifted.line.reverse();
            }
            board.set_line(dir, idx, shifted.line);
            score = Score::saturating_add(score, shifted.score);
            merged |= shifted.merged;
        }
        Shifted { board, score, merged }
    }

    /// Insert a random 2 or 4 (equal odds) into a uniformly chosen empty cell.
    ///
    /// A full board is returned unchanged.
    /// ```
    /// use game_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty: Vec<(usize, usize)> = self.empty_cells().collect();
        if empty.is_empty() {
            return self;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let mut board = self;
        board.0[row][col] = generate_random_tile(rng);
        board
    }

    /// True when no cell is empty and no orthogonal neighbours are equal.
    pub fn is_game_over(&self) -> bool {
        if self.count_empty() > 0 {
            return false;
        }
        for row in 0..SIZE {
            for col in 0..SIZE {
                let val = self.0[row][col];
                if col + 1 < SIZE && self.0[row][col + 1] == val {
                    return false;
                }
                if row + 1 < SIZE && self.0[row + 1][col] == val {
                    return false;
                }
            }
        }
        true
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.empty_cells().count()
    }

    /// Return the highest tile value present on the board (0 when empty).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the board.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.0.iter().flatten().fold(0, |acc: u64, &v| acc.saturating_add(v))
    }

    fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.0[row][col] == 0)
    }

    /// Row `idx` for horizontal moves, column `idx` for vertical moves, in board order.
    fn line(&self, dir: Move, idx: usize) -> Line {
        match dir {
            Move::Left | Move::Right => self.0[idx],
            Move::Up | Move::Down => std::array::from_fn(|row| self.0[row][idx]),
        }
    }

    fn set_line(&mut self, dir: Move, idx: usize, line: Line) {
        match dir {
            Move::Left | Move::Right => self.0[idx] = line,
            Move::Up | Move::Down => {
                for (row, val) in line.into_iter().enumerate() {
                    self.0[row][idx] = val;
                }
            }
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<[[Tile; SIZE]; SIZE]> for Board {
    fn from(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Board::from_rows(rows)
    }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Shifted {
    board.shift(direction)
}

/// Compact a line toward index 0, then merge equal neighbours in one left-to-right pass.
///
/// A freshly merged tile never merges again in the same pass, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`.
pub fn slide_line(line: Line) -> LineShift {
    let mut tiles: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut score = 0;
    let mut merged = false;
    let mut i = 0;
    while i + 1 < tiles.len() {
        if tiles[i] == tiles[i + 1] {
            if let Some(doubled) = tiles[i].checked_mul(2) {
                tiles[i] = doubled;
                score = Score::saturating_add(score, doubled);
                tiles.remove(i + 1);
                merged = true;
            }
        }
        i += 1;
    }
    let mut out = [0; SIZE];
    out[..tiles.len()].copy_from_slice(&tiles);
    LineShift { line: out, score, merged }
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_bool(0.5) { 2 } else { 4 }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        &x => format!("{:^7}", x),
    }
}
