//! 5x5 occupancy grid
//!
//! Pure coordinate bookkeeping: one optional card per cell, placement,
//! removal, and the reverse lookup the resolvers need. The grid owns the
//! cards; a card's position IS the cell holding it.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::types::{Card, CardId, Direction};

/// Side length of the square board
pub const GRID_SIZE: usize = 5;

/// A cell coordinate, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Checked constructor; coordinates outside the grid are a defect
    pub fn new(row: usize, col: usize) -> GameResult<Self> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// Unchecked constructor for indices already proven in range
    pub(crate) const fn raw(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// One cell over in `dir`, or None at the board edge
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr as isize)?;
        let col = self.col.checked_add_signed(dc as isize)?;
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(Self { row, col })
    }

    /// The up-to-4 orthogonal neighbors, in up/down/left/right order
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Coord)> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter_map(move |dir| self.step(dir).map(|c| (dir, c)))
    }

    fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }
}

/// The 5x5 card grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Row-major cells, index = row * GRID_SIZE + col
    cells: Vec<Option<Card>>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID_SIZE * GRID_SIZE],
        }
    }

    pub fn at(&self, coord: Coord) -> Option<&Card> {
        self.cells[coord.index()].as_ref()
    }

    pub fn at_mut(&mut self, coord: Coord) -> Option<&mut Card> {
        self.cells[coord.index()].as_mut()
    }

    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        self.cells[coord.index()].is_none()
    }

    /// Place a card on an empty cell
    pub fn place(&mut self, card: Card, coord: Coord) -> GameResult<()> {
        let slot = &mut self.cells[coord.index()];
        if slot.is_some() {
            return Err(GameError::CellOccupied {
                row: coord.row,
                col: coord.col,
            });
        }
        *slot = Some(card);
        Ok(())
    }

    /// Remove and return the card at `coord`, if any
    pub fn take(&mut self, coord: Coord) -> Option<Card> {
        self.cells[coord.index()].take()
    }

    /// Reverse lookup: which cell holds the card with this id
    pub fn find(&self, id: CardId) -> Option<Coord> {
        self.cards().find(|(_, card)| card.id == id).map(|(c, _)| c)
    }

    /// All occupied cells in row-major order
    pub fn cards(&self) -> impl Iterator<Item = (Coord, &Card)> {
        self.cells.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|card| (Coord::raw(i / GRID_SIZE, i % GRID_SIZE), card))
        })
    }

    /// The templar's cell and card, if it is still on the board
    pub fn templar(&self) -> Option<(Coord, &Card)> {
        self.cards().find(|(_, card)| card.is_templar())
    }

    pub fn empty_cells(&self) -> Vec<Coord> {
        (0..GRID_SIZE * GRID_SIZE)
            .filter(|&i| self.cells[i].is_none())
            .map(|i| Coord::raw(i / GRID_SIZE, i % GRID_SIZE))
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
