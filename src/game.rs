use crate::{Board, CellValue, GameConfig, Position, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No cell revealed yet; mines are not placed.
    Pending,
    Running,
    Won,
    Lost,
}

impl GameState {
    pub fn is_finished(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// What the player sees in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Opened(u8),
    /// The mine that ended the game.
    Exploded,
    /// An unflagged mine uncovered after a loss.
    Mine,
    /// A flag on a safe cell, uncovered after a loss.
    Misflagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenedCell {
    pub position: Position,
    pub adjacent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    Opened,
    Exploded(Position),
    Won,
    /// Out of bounds, already opened or flagged.
    NoChange,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    pub status: RevealStatus,
    /// Newly opened cells in the order they were opened.
    pub opened: Vec<OpenedCell>,
    /// Set on the reveal that moved the game out of `Pending`.
    pub started: bool,
}

impl RevealOutcome {
    fn unchanged(status: RevealStatus) -> Self {
        Self {
            status,
            opened: Vec::new(),
            started: false,
        }
    }

    pub fn has_update(&self) -> bool {
        !matches!(self.status, RevealStatus::NoChange | RevealStatus::GameOver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStatus {
    Flagged,
    Unflagged,
    NoChange,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagOutcome {
    pub status: FlagStatus,
    /// Mines minus flags; negative when the player over-flags.
    pub mines_remaining: i32,
}

/// One game session: a board, what the player has uncovered so far, and the
/// `Pending -> Running -> Won | Lost` state machine.
pub struct Game {
    config: GameConfig,
    board: Board,
    cells: Array2<CellState>,
    state: GameState,
    open_count: u32,
    flag_count: u32,
    exploded: Option<Position>,
    rng: StdRng,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A session whose mine layouts are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let board = Board::new(&config);
        Self {
            cells: Array2::default(board.cells_shape()),
            config,
            board,
            state: GameState::Pending,
            open_count: 0,
            flag_count: 0,
            exploded: None,
            rng,
            started_at: None,
            finished_at: None,
        }
    }

    /// A pending session over a board whose mines are already placed.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn from_board(board: Board) -> Self {
        use crate::SizeLimits;

        let (width, height) = board.dimensions();
        let limits = SizeLimits::new(1, width.max(height));
        let config = GameConfig::with_limits(width, height, board.mines_count(), limits);
        let mut game = Self::with_rng(config, StdRng::seed_from_u64(0));
        game.board = board;
        game
    }

    /// Throws away the current board and starts over with the same
    /// configuration.
    pub fn new_game(&mut self) {
        self.board = Board::new(&self.config);
        self.cells = Array2::default(self.board.cells_shape());
        self.state = GameState::Pending;
        self.open_count = 0;
        self.flag_count = 0;
        self.exploded = None;
        self.started_at = None;
        self.finished_at = None;
        log::debug!(
            "new {}x{} game with {} mines",
            self.config.width(),
            self.config.height(),
            self.config.mines()
        );
    }

    /// Changes dimensions and mine count, clamped against the current size
    /// limits, and starts a new game.
    pub fn configure(&mut self, width: u32, height: u32, mines: u32) {
        self.reconfigure(self.config.resized(width, height, mines));
    }

    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.new_game();
    }

    pub fn reveal(&mut self, pos: Position) -> RevealOutcome {
        match self.try_reveal(pos) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("ignoring reveal at {:?}: {}", pos, err);
                RevealOutcome::unchanged(RevealStatus::NoChange)
            }
        }
    }

    fn try_reveal(&mut self, pos: Position) -> Result<RevealOutcome> {
        if self.state.is_finished() {
            return Ok(RevealOutcome::unchanged(RevealStatus::GameOver));
        }
        let index = self.board.nd_index(pos)?;
        if self.cells[index] != CellState::Hidden {
            return Ok(RevealOutcome::unchanged(RevealStatus::NoChange));
        }

        let started = self.state == GameState::Pending;
        if started {
            self.start(pos)?;
        }

        if self.board.cell_value(pos)?.is_mine() {
            self.lose(pos);
            return Ok(RevealOutcome {
                status: RevealStatus::Exploded(pos),
                opened: Vec::new(),
                started,
            });
        }

        let opened = self.open_region(pos)?;
        let status = if self.board.cell_count() - self.open_count == self.board.mines_count() {
            self.win();
            RevealStatus::Won
        } else {
            RevealStatus::Opened
        };
        Ok(RevealOutcome {
            status,
            opened,
            started,
        })
    }

    fn start(&mut self, seed: Position) -> Result<()> {
        if !self.board.is_generated() {
            self.board.generate_with(seed, &mut self.rng)?;
        }
        self.state = GameState::Running;
        self.started_at = Some(Instant::now());
        log::debug!("game started at {:?}", seed);
        Ok(())
    }

    /// Opens `start` and, through zero cells, everything reachable from it.
    /// Each cell is visited at most once; flagged cells stay closed.
    fn open_region(&mut self, start: Position) -> Result<Vec<OpenedCell>> {
        let mut opened = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            let index = self.board.nd_index(pos)?;
            if self.cells[index] != CellState::Hidden {
                continue;
            }
            let CellValue::Adjacent(adjacent) = self.board.cell_value(pos)? else {
                continue;
            };

            self.cells[index] = CellState::Opened(adjacent);
            self.open_count += 1;
            opened.push(OpenedCell {
                position: pos,
                adjacent,
            });

            if adjacent == 0 {
                for neighbor in self.board.neighbors(pos) {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        log::trace!("opened {} cells from {:?}", opened.len(), start);
        Ok(opened)
    }

    fn lose(&mut self, exploded: Position) {
        self.state = GameState::Lost;
        self.exploded = Some(exploded);
        self.finished_at = Some(Instant::now());

        for pos in self.board.positions() {
            let cell = &mut self.cells[pos.to_nd_index()];
            *cell = match (*cell, self.board.is_mine(pos)) {
                _ if pos == exploded => CellState::Exploded,
                (CellState::Hidden, true) => CellState::Mine,
                (CellState::Flagged, false) => CellState::Misflagged,
                (state, _) => state,
            };
        }
        log::info!(
            "game lost at {:?} after {} opened cells",
            exploded,
            self.open_count
        );
    }

    fn win(&mut self) {
        self.state = GameState::Won;
        self.finished_at = Some(Instant::now());

        for pos in self.board.mine_positions() {
            self.cells[pos.to_nd_index()] = CellState::Flagged;
        }
        self.flag_count = self.board.mines_count();
        log::info!("game won in {} seconds", self.elapsed_seconds());
    }

    /// Toggles a flag on a hidden cell. Flagging is allowed before the first
    /// reveal and never places mines.
    pub fn toggle_flag(&mut self, pos: Position) -> FlagOutcome {
        let status = if self.state.is_finished() {
            FlagStatus::GameOver
        } else {
            match self.board.nd_index(pos) {
                Err(_) => FlagStatus::NoChange,
                Ok(index) => {
                    let cell = &mut self.cells[index];
                    match *cell {
                        CellState::Hidden => {
                            *cell = CellState::Flagged;
                            self.flag_count += 1;
                            FlagStatus::Flagged
                        }
                        CellState::Flagged => {
                            *cell = CellState::Hidden;
                            self.flag_count -= 1;
                            FlagStatus::Unflagged
                        }
                        _ => FlagStatus::NoChange,
                    }
                }
            }
        };

        FlagOutcome {
            status,
            mines_remaining: self.mines_remaining(),
        }
    }

    pub fn cell_state(&self, pos: Position) -> Result<CellState> {
        Ok(self.cells[self.board.nd_index(pos)?])
    }

    pub fn mines_remaining(&self) -> i32 {
        self.board.mines_count() as i32 - self.flag_count as i32
    }

    /// Whole seconds since the first reveal, frozen once the game ends.
    pub fn elapsed_seconds(&self) -> u64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64().round() as u64,
            (Some(start), None) => start.elapsed().as_secs_f64().round() as u64,
            (None, _) => 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }

    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    pub fn flag_count(&self) -> u32 {
        self.flag_count
    }

    pub fn exploded(&self) -> Option<Position> {
        self.exploded
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
