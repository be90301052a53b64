use crate::GameError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MIN_SIZE: u32 = 8;
pub const DEFAULT_MAX_SIZE: u32 = 50;

/// Inclusive bounds applied to board width and height. The upper bound is
/// never below 2 so that every board can hold a mine and a safe cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    min: u32,
    max: u32,
}

impl SizeLimits {
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min).max(2),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn clamp(&self, size: u32) -> u32 {
        size.clamp(self.min, self.max)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE)
    }
}

/// Which cells the first reveal protects from mine placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Only the first revealed cell is guaranteed safe.
    #[default]
    SafeSeed,
    /// The first revealed cell and its in-bounds neighbors are guaranteed
    /// safe, falling back to `SafeSeed` when the mines would not fit.
    SafeNeighborhood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    width: u32,
    height: u32,
    mines: u32,
    placement: PlacementPolicy,
    limits: SizeLimits,
}

impl GameConfig {
    /// Builds a configuration with the default size limits. Out of range
    /// values are clamped, never rejected.
    pub fn new(width: u32, height: u32, mines: u32) -> Self {
        Self::with_limits(width, height, mines, SizeLimits::default())
    }

    pub fn with_limits(width: u32, height: u32, mines: u32, limits: SizeLimits) -> Self {
        let width = limits.clamp(width);
        let mut height = limits.clamp(height);
        if width * height < 2 {
            height = 2;
        }
        let mines = mines.clamp(1, width.saturating_mul(height) - 1);
        Self {
            width,
            height,
            mines,
            placement: PlacementPolicy::default(),
            limits,
        }
    }

    /// Same limits and placement policy, new dimensions and mine count.
    pub fn resized(&self, width: u32, height: u32, mines: u32) -> Self {
        Self::with_limits(width, height, mines, self.limits).with_placement(self.placement)
    }

    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mines(&self) -> u32 {
        self.mines
    }

    pub fn placement(&self) -> PlacementPolicy {
        self.placement
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    pub fn total_cells(&self) -> u32 {
        self.width * self.height
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::Beginner.config()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new(8, 8, 10),
            Self::Intermediate => GameConfig::new(16, 16, 40),
            Self::Expert => GameConfig::new(30, 16, 99),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == name)
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}
