#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Galton board engine.
//!
//! This crate defines the data surface that connects the simulation systems
//! and the adapters. Adapters describe a board through [`BoardSettings`],
//! validate it into an immutable [`BoardConfig`], and hand that configuration
//! to the simulator. The simulator publishes its result as [`SlotCounts`],
//! which the rendering adapter consumes exactly once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of peg rows a default board drops balls through.
pub const DEFAULT_NUM_ROWS: u32 = 12;
/// Number of balls simulated by a default run.
pub const DEFAULT_NUM_BALLS: u64 = 100_000;
/// Default board width in pixels, one slot per pixel column.
pub const DEFAULT_BOARD_WIDTH: u32 = 667;
/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u32 = 667;
/// Default peg radius in pixels.
pub const DEFAULT_PEG_RADIUS: f64 = 4.0;
/// Default fraction of bounce force converted into momentum.
pub const DEFAULT_ELASTICITY: f64 = 0.7;
/// Default zig-zag offset applied to pegs on odd rows.
pub const DEFAULT_PEG_OFFSET: f64 = DEFAULT_PEG_RADIUS * 0.5;
/// Default standard deviation of a ball's starting position.
pub const DEFAULT_INITIAL_VARIANCE: f64 = 2.0;

/// Background fill used before any bars are drawn.
pub const BACKGROUND_COLOR: Rgb = Rgb::new(102, 51, 153);
/// Fill used for bars in the left half of the board.
pub const LEFT_HALF_COLOR: Rgb = Rgb::new(122, 122, 244);
/// Fill used for bars in the right half of the board.
pub const RIGHT_HALF_COLOR: Rgb = Rgb::new(122, 244, 122);

/// Opaque RGB color expressed as byte channels.
///
/// Serialises as a `[red, green, blue]` array so configuration files stay terse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Rgb {
    /// Creates a color from byte channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the channels as a `[red, green, blue]` array.
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

/// Editable description of a board, typically loaded from a configuration file.
///
/// Every field falls back to its default when omitted. Settings carry no
/// guarantees until they are validated into a [`BoardConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSettings {
    /// Number of peg rows each ball passes through.
    pub num_rows: u32,
    /// Number of balls dropped per simulation run.
    pub num_balls: u64,
    /// Board width in pixels; also the number of slots.
    pub board_width: u32,
    /// Board height in pixels.
    pub board_height: u32,
    /// Peg radius in pixels.
    pub peg_radius: f64,
    /// Fraction of bounce force converted into momentum.
    pub elasticity: f64,
    /// Horizontal offset applied to pegs on odd rows.
    pub peg_offset: f64,
    /// Standard deviation of the starting position around the board centre.
    pub initial_variance: f64,
    /// Bar color for the left half of the board.
    pub left_color: Rgb,
    /// Bar color for the right half of the board.
    pub right_color: Rgb,
    /// Color of every pixel not covered by a bar.
    pub background_color: Rgb,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            num_rows: DEFAULT_NUM_ROWS,
            num_balls: DEFAULT_NUM_BALLS,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            peg_radius: DEFAULT_PEG_RADIUS,
            elasticity: DEFAULT_ELASTICITY,
            peg_offset: DEFAULT_PEG_OFFSET,
            initial_variance: DEFAULT_INITIAL_VARIANCE,
            left_color: LEFT_HALF_COLOR,
            right_color: RIGHT_HALF_COLOR,
            background_color: BACKGROUND_COLOR,
        }
    }
}

impl BoardSettings {
    /// Validates the settings into an immutable board configuration.
    pub fn validate(self) -> Result<BoardConfig, ConfigError> {
        BoardConfig::try_from(self)
    }
}

/// Reasons a set of [`BoardSettings`] cannot describe a board.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The board must be at least one pixel wide.
    #[error("board width must be positive")]
    ZeroWidth,
    /// The board must be at least one pixel tall.
    #[error("board height must be positive")]
    ZeroHeight,
    /// Pegs must have a strictly positive, finite radius.
    #[error("peg radius must be positive and finite, got {0}")]
    InvalidPegRadius(f64),
    /// Two peg radii must fit inside the board so the clamp interval is non-empty.
    #[error("peg radius {peg_radius} leaves no room on a board {board_width} pixels wide")]
    PegRadiusTooLarge {
        /// Offending radius.
        peg_radius: f64,
        /// Width of the board the radius was checked against.
        board_width: u32,
    },
    /// A scalar tuning parameter was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending setting.
        name: &'static str,
        /// Value supplied for it.
        value: f64,
    },
    /// A standard deviation cannot be negative.
    #[error("initial variance must not be negative, got {0}")]
    NegativeVariance(f64),
}

/// Immutable, validated board configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
    num_rows: u32,
    num_balls: u64,
    board_width: u32,
    board_height: u32,
    peg_radius: f64,
    elasticity: f64,
    peg_offset: f64,
    initial_variance: f64,
    left_color: Rgb,
    right_color: Rgb,
    background_color: Rgb,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::from_valid(BoardSettings::default())
    }
}

impl TryFrom<BoardSettings> for BoardConfig {
    type Error = ConfigError;

    fn try_from(settings: BoardSettings) -> Result<Self, Self::Error> {
        if settings.board_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if settings.board_height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if !settings.peg_radius.is_finite() || settings.peg_radius <= 0.0 {
            return Err(ConfigError::InvalidPegRadius(settings.peg_radius));
        }
        if settings.peg_radius * 2.0 > f64::from(settings.board_width) {
            return Err(ConfigError::PegRadiusTooLarge {
                peg_radius: settings.peg_radius,
                board_width: settings.board_width,
            });
        }
        for (name, value) in [
            ("elasticity", settings.elasticity),
            ("peg offset", settings.peg_offset),
            ("initial variance", settings.initial_variance),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if settings.initial_variance < 0.0 {
            return Err(ConfigError::NegativeVariance(settings.initial_variance));
        }

        Ok(Self::from_valid(settings))
    }
}

impl BoardConfig {
    fn from_valid(settings: BoardSettings) -> Self {
        Self {
            num_rows: settings.num_rows,
            num_balls: settings.num_balls,
            board_width: settings.board_width,
            board_height: settings.board_height,
            peg_radius: settings.peg_radius,
            elasticity: settings.elasticity,
            peg_offset: settings.peg_offset,
            initial_variance: settings.initial_variance,
            left_color: settings.left_color,
            right_color: settings.right_color,
            background_color: settings.background_color,
        }
    }

    /// Returns a copy of the configuration that drops a different number of balls.
    #[must_use]
    pub fn with_num_balls(&self, num_balls: u64) -> Self {
        Self {
            num_balls,
            ..self.clone()
        }
    }

    /// Number of peg rows each ball passes through.
    #[must_use]
    pub const fn num_rows(&self) -> u32 {
        self.num_rows
    }

    /// Number of balls dropped per simulation run.
    #[must_use]
    pub const fn num_balls(&self) -> u64 {
        self.num_balls
    }

    /// Board width in pixels.
    #[must_use]
    pub const fn board_width(&self) -> u32 {
        self.board_width
    }

    /// Board height in pixels.
    #[must_use]
    pub const fn board_height(&self) -> u32 {
        self.board_height
    }

    /// Peg radius in pixels.
    #[must_use]
    pub const fn peg_radius(&self) -> f64 {
        self.peg_radius
    }

    /// Fraction of bounce force converted into momentum.
    #[must_use]
    pub const fn elasticity(&self) -> f64 {
        self.elasticity
    }

    /// Horizontal offset applied to pegs on odd rows.
    #[must_use]
    pub const fn peg_offset(&self) -> f64 {
        self.peg_offset
    }

    /// Standard deviation of the starting position.
    #[must_use]
    pub const fn initial_variance(&self) -> f64 {
        self.initial_variance
    }

    /// Bar color for the left half of the board.
    #[must_use]
    pub const fn left_color(&self) -> Rgb {
        self.left_color
    }

    /// Bar color for the right half of the board.
    #[must_use]
    pub const fn right_color(&self) -> Rgb {
        self.right_color
    }

    /// Color of every pixel not covered by a bar.
    #[must_use]
    pub const fn background_color(&self) -> Rgb {
        self.background_color
    }
}

/// Ball-landing frequency per pixel column of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotCounts {
    counts: Vec<u64>,
}

impl SlotCounts {
    /// Creates `len` empty slots.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    /// Wraps an existing sequence of counts.
    #[must_use]
    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    /// Records one ball in the provided slot.
    ///
    /// Indices past the last slot are attributed to the last slot; an empty
    /// sequence ignores the ball.
    pub fn record(&mut self, index: usize) {
        let Some(last) = self.counts.len().checked_sub(1) else {
            return;
        };
        self.counts[index.min(last)] += 1;
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when there are no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count stored in the provided slot, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    /// Largest count across all slots, or zero when empty.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every slot.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count-weighted mean slot index, or `None` when every slot is empty.
    #[must_use]
    pub fn mean_index(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(index, &count)| index as f64 * count as f64)
            .sum();
        Some(weighted / total as f64)
    }

    /// Borrows the counts in slot order.
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }
}
