use crate::{GameConfig, GameError, PlacementPolicy, Position, Result};
use itertools::iproduct;
use ndarray::Array2;
use rand::Rng;

/// Hidden content of a cell once mines have been placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Mine,
    Adjacent(u8),
}

impl CellValue {
    pub fn is_mine(self) -> bool {
        matches!(self, CellValue::Mine)
    }

    pub fn adjacent(self) -> Option<u8> {
        match self {
            CellValue::Mine => None,
            CellValue::Adjacent(count) => Some(count),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Adjacent(0)
    }
}

/// The mine layout of one game. Mines are placed lazily by [`Board::generate`]
/// so that the first revealed cell is always safe; until then every cell
/// holds the `Adjacent(0)` placeholder.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<CellValue>,
    width: u32,
    height: u32,
    mines_count: u32,
    placement: PlacementPolicy,
    generated: bool,
}

impl Board {
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = (config.width(), config.height());
        Board {
            cells: Array2::default((height as usize, width as usize)),
            width,
            height,
            mines_count: config.mines(),
            placement: config.placement(),
            generated: false,
        }
    }

    /// Builds an already generated board with mines at exactly `mines`.
    /// Duplicates count once; out of range positions are rejected.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn from_mines(width: u32, height: u32, mines: &[Position]) -> Result<Self> {
        let mut board = Board {
            cells: Array2::default((height as usize, width as usize)),
            width,
            height,
            mines_count: 0,
            placement: PlacementPolicy::SafeSeed,
            generated: true,
        };
        for &pos in mines {
            let index = board.nd_index(pos)?;
            if !board.cells[index].is_mine() {
                board.cells[index] = CellValue::Mine;
                board.mines_count += 1;
            }
        }
        board.count_all_adjacent();
        Ok(board)
    }

    /// Places the mines, keeping `seed` safe, using the thread-local RNG.
    pub fn generate(&mut self, seed: Position) -> Result<()> {
        self.generate_with(seed, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(&mut self, seed: Position, rng: &mut R) -> Result<()> {
        if self.generated {
            return Err(GameError::AlreadyGenerated);
        }
        self.nd_index(seed)?;

        let protected = self.protected_cells(seed);
        let mask = self.sample_mines(&protected, rng);
        self.cells = mask.mapv(|is_mine| {
            if is_mine {
                CellValue::Mine
            } else {
                CellValue::Adjacent(0)
            }
        });
        self.count_all_adjacent();
        self.generated = true;

        log::debug!(
            "placed {} mines on {}x{} board, seed {:?}, {} protected cells",
            self.mines_count,
            self.width,
            self.height,
            seed,
            protected.len()
        );
        Ok(())
    }

    fn protected_cells(&self, seed: Position) -> Vec<Position> {
        let mut protected = vec![seed];
        if self.placement == PlacementPolicy::SafeNeighborhood {
            let neighbors: Vec<Position> = self.neighbors(seed).collect();
            let free = self.cell_count() - 1 - neighbors.len() as u32;
            if self.mines_count <= free {
                protected.extend(neighbors);
            } else {
                log::warn!(
                    "{} mines do not fit outside the neighborhood of {:?}, only the seed cell is kept safe",
                    self.mines_count,
                    seed
                );
            }
        }
        protected
    }

    /// Rejection sampling over uniform draws in `[0, cells)`. Whichever of
    /// mines and safe cells is the minority among the eligible cells gets
    /// sampled; the other one is the starting fill.
    fn sample_mines<R: Rng>(&self, protected: &[Position], rng: &mut R) -> Array2<bool> {
        let cells = self.cell_count();
        let eligible = cells - protected.len() as u32;
        let fill_with_mines = self.mines_count > eligible / 2;
        let mut remaining = if fill_with_mines {
            eligible - self.mines_count
        } else {
            self.mines_count
        };

        let mut mask = Array2::from_elem(self.cells.raw_dim(), fill_with_mines);
        for pos in protected {
            mask[pos.to_nd_index()] = false;
        }

        while remaining > 0 {
            let index = rng.gen_range(0..cells);
            let pos = Position::new((index % self.width) as i32, (index / self.width) as i32);
            if protected.contains(&pos) {
                continue;
            }
            let cell = &mut mask[pos.to_nd_index()];
            if *cell == fill_with_mines {
                *cell = !fill_with_mines;
                remaining -= 1;
            }
        }
        mask
    }

    fn count_all_adjacent(&mut self) {
        let counts: Vec<(Position, u8)> = self
            .positions()
            .filter(|&pos| !self.is_mine(pos))
            .map(|pos| (pos, self.count_adjacent_mines(pos)))
            .collect();
        for (pos, count) in counts {
            self.cells[pos.to_nd_index()] = CellValue::Adjacent(count);
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub(crate) fn cells_shape(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }

    pub(crate) fn nd_index(&self, pos: Position) -> Result<[usize; 2]> {
        if self.is_within_bounds(pos) {
            Ok(pos.to_nd_index())
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    /// In-bounds neighbors of `pos`, row-major from the top-left.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().filter(move |p| self.is_within_bounds(*p))
    }

    /// All positions of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.height as i32, 0..self.width as i32).map(|(y, x)| Position::new(x, y))
    }

    pub fn cell_value(&self, pos: Position) -> Result<CellValue> {
        let index = self.nd_index(pos)?;
        if !self.generated {
            return Err(GameError::NotGenerated);
        }
        Ok(self.cells[index])
    }

    /// Whether `pos` holds a mine. Out of bounds positions and ungenerated
    /// boards never do.
    pub fn is_mine(&self, pos: Position) -> bool {
        self.is_within_bounds(pos) && self.cells[pos.to_nd_index()].is_mine()
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.neighbors(pos).filter(|p| self.is_mine(*p)).count() as u8
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |pos| self.is_mine(*pos))
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn placement(&self) -> PlacementPolicy {
        self.placement
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mines_count(&self) -> u32 {
        self.mines_count
    }

    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn safe_cell_count(&self) -> u32 {
        self.cell_count() - self.mines_count
    }
}
