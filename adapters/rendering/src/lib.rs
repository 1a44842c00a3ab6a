#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Histogram rendering adapter for Galton board slot counts.
//!
//! Rendering happens in two steps. [`histogram_bars`] lays out one filled
//! rectangle per slot without touching any pixels, and [`HistogramCanvas`]
//! rasterises that layout into an RGB buffer that can be written to disk.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use galton_board_core::{BoardConfig, Rgb, SlotCounts};
use image::{ImageFormat, RgbImage};
use tracing::{debug, error, info};

/// Filled rectangle representing a single slot of the histogram.
///
/// Both corners are inclusive and may extend one pixel past the image, in
/// which case the overhang is clipped when drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bar {
    /// Left edge in pixels.
    pub x0: u32,
    /// Top edge in pixels.
    pub y0: u32,
    /// Right edge in pixels.
    pub x1: u32,
    /// Bottom edge in pixels, always the board height.
    pub y1: u32,
    /// Height of the bar scaled against the tallest slot.
    pub height: u32,
    /// Fill applied to the rectangle.
    pub color: Rgb,
}

/// Scales `frequency` against `max_frequency` so the tallest slot fills the board.
///
/// Returns zero when no slot has any balls.
#[must_use]
pub fn bar_height(frequency: u64, max_frequency: u64, board_height: u32) -> u32 {
    if max_frequency == 0 {
        return 0;
    }
    (frequency as f64 / max_frequency as f64 * f64::from(board_height)) as u32
}

/// Lays out one bar per slot, split into left and right colors at the board midpoint.
///
/// The split is purely positional: a bar whose left edge lies before
/// `board_width / 2` takes the left color regardless of its height.
#[must_use]
pub fn histogram_bars(config: &BoardConfig, slot_counts: &SlotCounts) -> Vec<Bar> {
    let board_width = config.board_width();
    let board_height = config.board_height();
    let Some(bar_width) = (board_width as usize).checked_div(slot_counts.len()) else {
        return Vec::new();
    };
    let bar_width = bar_width.max(1) as u32;
    let midpoint = board_width / 2;
    let max_frequency = slot_counts.max();

    slot_counts
        .as_slice()
        .iter()
        .enumerate()
        .map(|(index, &frequency)| {
            let height = bar_height(frequency, max_frequency, board_height);
            let x0 = (index as u32).saturating_mul(bar_width);
            let color = if x0 < midpoint {
                config.left_color()
            } else {
                config.right_color()
            };
            Bar {
                x0,
                y0: board_height - height,
                x1: x0.saturating_add(bar_width),
                y1: board_height,
                height,
                color,
            }
        })
        .collect()
}

/// RGB image buffer the histogram is drawn into.
#[derive(Clone, Debug)]
pub struct HistogramCanvas {
    config: BoardConfig,
    image: RgbImage,
}

impl HistogramCanvas {
    /// Creates a canvas sized to the board and filled with its background color.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let image = RgbImage::from_pixel(
            config.board_width(),
            config.board_height(),
            image::Rgb(config.background_color().channels()),
        );
        Self { config, image }
    }

    /// Borrows the underlying image buffer.
    #[must_use]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Draws one bar per slot on top of the current buffer contents.
    pub fn draw_histogram(&mut self, slot_counts: &SlotCounts) {
        let bars = histogram_bars(&self.config, slot_counts);
        debug!(bars = bars.len(), peak = slot_counts.max(), "drawing histogram");
        for bar in &bars {
            fill_rect(&mut self.image, bar);
        }
    }

    /// Draws the histogram and returns the finished image.
    pub fn generate_image(&mut self, slot_counts: &SlotCounts) -> &RgbImage {
        self.draw_histogram(slot_counts);
        &self.image
    }

    /// Encodes the buffer to `path`.
    ///
    /// The format follows the file extension and falls back to PNG when the
    /// extension is missing or unrecognised. Failures are logged before being
    /// returned to the caller.
    pub fn save_image(&self, path: impl AsRef<Path>) -> AnyResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        let result = self
            .image
            .save_with_format(path, format)
            .with_context(|| format!("failed to save histogram image to {}", path.display()));

        match &result {
            Ok(()) => info!(path = %path.display(), "saved histogram image"),
            Err(err) => error!(path = %path.display(), "error saving image: {err:#}"),
        }
        result
    }
}

fn fill_rect(image: &mut RgbImage, bar: &Bar) {
    let (width, height) = image.dimensions();
    if bar.x0 >= width || bar.y0 >= height {
        return;
    }

    let pixel = image::Rgb(bar.color.channels());
    let x_end = bar.x1.min(width - 1);
    let y_end = bar.y1.min(height - 1);
    for y in bar.y0..=y_end {
        for x in bar.x0..=x_end {
            image.put_pixel(x, y, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use galton_board_core::{BoardSettings, BACKGROUND_COLOR, LEFT_HALF_COLOR, RIGHT_HALF_COLOR};

    use super::*;

    fn board(width: u32, height: u32) -> BoardConfig {
        BoardSettings {
            board_width: width,
            board_height: height,
            peg_radius: 1.0,
            ..BoardSettings::default()
        }
        .validate()
        .expect("test board is valid")
    }

    fn pixel(canvas: &HistogramCanvas, x: u32, y: u32) -> Rgb {
        let [red, green, blue] = canvas.image().get_pixel(x, y).0;
        Rgb::new(red, green, blue)
    }

    #[test]
    fn bar_height_scales_against_the_peak() {
        assert_eq!(bar_height(10, 10, 100), 100);
        assert_eq!(bar_height(5, 10, 100), 50);
        assert_eq!(bar_height(1, 3, 100), 33);
        assert_eq!(bar_height(7, 0, 100), 0);
    }

    #[test]
    fn three_slot_layout_splits_left_then_right() {
        let counts = SlotCounts::from_counts(vec![10, 0, 5]);
        let bars = histogram_bars(&board(3, 100), &counts);

        let heights: Vec<u32> = bars.iter().map(|bar| bar.height).collect();
        assert_eq!(heights, vec![100, 0, 50]);

        let colors: Vec<Rgb> = bars.iter().map(|bar| bar.color).collect();
        assert_eq!(colors, vec![LEFT_HALF_COLOR, RIGHT_HALF_COLOR, RIGHT_HALF_COLOR]);

        assert_eq!(
            bars[2],
            Bar {
                x0: 2,
                y0: 50,
                x1: 3,
                y1: 100,
                height: 50,
                color: RIGHT_HALF_COLOR,
            }
        );
    }

    #[test]
    fn short_slot_sequences_widen_the_bars() {
        let counts = SlotCounts::from_counts(vec![1, 1, 1]);
        let bars = histogram_bars(&board(9, 10), &counts);

        let edges: Vec<(u32, u32)> = bars.iter().map(|bar| (bar.x0, bar.x1)).collect();
        assert_eq!(edges, vec![(0, 3), (3, 6), (6, 9)]);
        assert_eq!(bars[1].color, LEFT_HALF_COLOR);
        assert_eq!(bars[2].color, RIGHT_HALF_COLOR);
    }

    #[test]
    fn empty_slot_counts_lay_out_nothing() {
        assert!(histogram_bars(&board(9, 10), &SlotCounts::default()).is_empty());
    }

    #[test]
    fn rasterised_bars_cover_inclusive_edges() {
        let mut canvas = HistogramCanvas::new(board(3, 100));
        let _ = canvas.generate_image(&SlotCounts::from_counts(vec![10, 0, 5]));

        assert_eq!(pixel(&canvas, 0, 0), LEFT_HALF_COLOR);
        // The first bar's right edge overlaps the empty second slot.
        assert_eq!(pixel(&canvas, 1, 0), LEFT_HALF_COLOR);
        assert_eq!(pixel(&canvas, 1, 99), LEFT_HALF_COLOR);
        assert_eq!(pixel(&canvas, 2, 49), BACKGROUND_COLOR);
        assert_eq!(pixel(&canvas, 2, 50), RIGHT_HALF_COLOR);
        assert_eq!(pixel(&canvas, 2, 99), RIGHT_HALF_COLOR);
    }

    #[test]
    fn all_zero_counts_leave_only_background() {
        let mut canvas = HistogramCanvas::new(board(16, 8));
        let counts = SlotCounts::zeroed(16);

        assert!(histogram_bars(&canvas.config, &counts)
            .iter()
            .all(|bar| bar.height == 0));

        canvas.draw_histogram(&counts);
        assert!(canvas
            .image()
            .pixels()
            .all(|pixel| pixel.0 == BACKGROUND_COLOR.channels()));
    }
}
