#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Moving-average smoothing applied to raw slot counts before rendering.

use galton_board_core::SlotCounts;

/// Number of neighbours on each side of a slot included in its window.
pub const WINDOW_RADIUS: usize = 3;

/// Replaces every slot with the floor of the mean of its centred window.
///
/// The window spans up to [`WINDOW_RADIUS`] slots on either side and shrinks
/// at the boundaries instead of wrapping or padding with zeros.
#[must_use]
pub fn smooth_slot_counts(raw: &SlotCounts) -> SlotCounts {
    let counts = raw.as_slice();
    let smoothed = (0..counts.len())
        .map(|index| {
            let start = index.saturating_sub(WINDOW_RADIUS);
            let end = (index + WINDOW_RADIUS + 1).min(counts.len());
            let window = &counts[start..end];
            window.iter().sum::<u64>() / window.len() as u64
        })
        .collect();
    SlotCounts::from_counts(smoothed)
}
