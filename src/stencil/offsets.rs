//! The fixed 32-point sampling stencil and its per-pass tap tables.
//!
//! The stencil is a 6x6 grid of odd offsets centered on the origin with the
//! four corners removed, listed top row first. The corner cut keeps the
//! input vector at 32 samples; it is a structural constant, not a tunable.

/// Offsets sampled around a target location, in the order the network's
/// 32 inputs are wired.
pub const STENCIL: [(i32, i32); 32] = [
    (-3, -5), (-1, -5), (1, -5), (3, -5),
    (-5, -3), (-3, -3), (-1, -3), (1, -3), (3, -3), (5, -3),
    (-5, -1), (-3, -1), (-1, -1), (1, -1), (3, -1), (5, -1),
    (-5, 1), (-3, 1), (-1, 1), (1, 1), (3, 1), (5, 1),
    (-5, 3), (-3, 3), (-1, 3), (1, 3), (3, 3), (5, 3),
    (-3, 5), (-1, 5), (1, 5), (3, 5),
];

/// Indices of the four innermost taps, the (+-1, +-1) offsets. Their mean is
/// the local normalization scale.
pub const CENTER_TAPS: [usize; 4] = [12, 13, 18, 19];

/// Position of an offset in [`STENCIL`], if present.
pub fn offset_index(dx: i32, dy: i32) -> Option<usize> {
    STENCIL.iter().position(|&(x, y)| x == dx && y == dy)
}

/// Taps for the diagonal fill pass, on the low-resolution source grid.
///
/// An odd output coordinate sits half a pixel down-right of source pixel
/// `x/2`; offset `d` on the fine grid becomes `(d + 1) / 2` on the coarse
/// grid (every `d` is odd, so the division is exact).
pub fn diagonal_taps() -> [(i32, i32); 32] {
    let mut taps = [(0, 0); 32];
    for (tap, &(dx, dy)) in taps.iter_mut().zip(STENCIL.iter()) {
        *tap = ((dx + 1) / 2, (dy + 1) / 2);
    }
    taps
}

/// Taps for the axial fill pass, on the partially filled output grid.
///
/// The stencil rotates 45 degrees onto the fine grid: offset `(dx, dy)`
/// becomes `((dx - dy) / 2, (dx + dy) / 2)`. Both sums are even, so the
/// taps are exact, and each lands on a direct or diagonal pixel (the
/// coordinate sum `dx` is odd, preserving even parity around an axial
/// center).
pub fn axial_taps() -> [(i32, i32); 32] {
    let mut taps = [(0, 0); 32];
    for (tap, &(dx, dy)) in taps.iter_mut().zip(STENCIL.iter()) {
        *tap = ((dx - dy) / 2, (dx + dy) / 2);
    }
    taps
}
