#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Galton board simulation system that drops balls through rows of pegs.
//!
//! Each ball performs a biased random walk with momentum: every row nudges it
//! left or right, the nudge feeds into a decaying momentum term, and the
//! resulting position is clamped inside the board walls. The landing column
//! of every ball is tallied into raw slot counts, which are then smoothed
//! into the counts published for rendering.

mod source;

pub use source::{BounceSource, RngBounceSource};

use galton_board_core::{BoardConfig, SlotCounts};
use galton_board_system_smoothing::smooth_slot_counts;
use tracing::{debug, info};

/// Number of progress records emitted over a full run.
const PROGRESS_UPDATES: u64 = 20;
/// Fraction of momentum carried from one row into the next.
const MOMENTUM_RETENTION: f64 = 0.8;
/// Bounce probability when a ball meets a peg dead centre.
const BASE_BOUNCE_PROBABILITY: f64 = 0.5;
/// Change in bounce probability per peg radius of offset.
const BOUNCE_PROBABILITY_SLOPE: f64 = 0.1;
const MIN_BOUNCE_PROBABILITY: f64 = 0.2;
const MAX_BOUNCE_PROBABILITY: f64 = 0.8;

/// Simulator owning a board configuration, its randomness and the published slot counts.
#[derive(Debug)]
pub struct Simulation<S> {
    config: BoardConfig,
    source: S,
    slot_counts: SlotCounts,
}

impl Simulation<RngBounceSource> {
    /// Creates a simulator whose draws are seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy(config: BoardConfig) -> Self {
        Self::new(config, RngBounceSource::from_entropy())
    }

    /// Creates a simulator that replays the same run for the same seed.
    #[must_use]
    pub fn seeded(config: BoardConfig, seed: u64) -> Self {
        Self::new(config, RngBounceSource::seeded(seed))
    }
}

impl<S: BounceSource> Simulation<S> {
    /// Creates a simulator with zeroed slot counts drawing randomness from `source`.
    #[must_use]
    pub fn new(config: BoardConfig, source: S) -> Self {
        let slot_counts = SlotCounts::zeroed(config.board_width() as usize);
        Self {
            config,
            source,
            slot_counts,
        }
    }

    /// Smoothed counts published by the most recent [`Simulation::simulate`] call.
    #[must_use]
    pub fn slot_counts(&self) -> &SlotCounts {
        &self.slot_counts
    }

    /// Consumes the simulator, returning the published slot counts.
    #[must_use]
    pub fn into_slot_counts(self) -> SlotCounts {
        self.slot_counts
    }

    /// Drops every configured ball and overwrites the slot counts with the smoothed tally.
    pub fn simulate(&mut self) {
        debug!(config = ?self.config, "starting simulation");
        let raw = self.drop_balls();
        self.slot_counts = smooth_slot_counts(&raw);
        info!(
            balls = raw.total(),
            peak = self.slot_counts.max(),
            "simulation finished"
        );
    }

    /// Drops every configured ball and returns the unsmoothed landing tally.
    #[must_use]
    pub fn drop_balls(&mut self) -> SlotCounts {
        let num_balls = self.config.num_balls();
        let progress_step = (num_balls / PROGRESS_UPDATES).max(1);
        let mut raw = SlotCounts::zeroed(self.config.board_width() as usize);

        for ball in 0..num_balls {
            let bin_index = self.calculate_bin_index();
            raw.record(bin_index);

            let simulated = ball + 1;
            if simulated % progress_step == 0 {
                info!(simulated, total = num_balls, "simulated {simulated}/{num_balls} balls");
            }
        }

        raw
    }

    /// Walks a single ball through every row and returns the column it lands in.
    ///
    /// The result always lies within `[peg_radius, board_width - peg_radius]`
    /// after truncation towards zero.
    #[must_use]
    pub fn calculate_bin_index(&mut self) -> usize {
        let config = &self.config;
        let width = f64::from(config.board_width());
        let peg_radius = config.peg_radius();

        let mut position = width / 2.0 + self.source.normal(config.initial_variance());
        let mut momentum = 0.0;

        for row in 0..config.num_rows() {
            let peg_center = position + f64::from(row % 2) * config.peg_offset();
            // `position` cancels out, leaving a distance that depends only on row
            // parity. Kept as is: the bounce odds below are tuned against it.
            let distance_from_center = (position - peg_center) / peg_radius;

            let bounce_probability = (BASE_BOUNCE_PROBABILITY
                + BOUNCE_PROBABILITY_SLOPE * distance_from_center)
                .clamp(MIN_BOUNCE_PROBABILITY, MAX_BOUNCE_PROBABILITY);
            let direction = if self.source.uniform() < bounce_probability {
                1.0
            } else {
                -1.0
            };
            let bounce_force = (1.0 - distance_from_center.abs()) * config.elasticity();

            momentum = momentum * MOMENTUM_RETENTION + direction * bounce_force * peg_radius * 2.0;
            position = (position + momentum).clamp(peg_radius, width - peg_radius);
        }

        position as usize
    }
}
