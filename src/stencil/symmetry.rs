//! Symmetry orbits of the stencil under the square's 8-element group, and
//! the in-place weight averaging that keeps layer 0 isotropic.

use std::sync::OnceLock;

use crate::math::matrix::Matrix;
use crate::stencil::offsets::{offset_index, STENCIL};

/// The stencil splits into five orbits: three of size 8 and two of size 4
/// (the diagonal (+-1,+-1) and (+-3,+-3) families, fixed by one reflection).
pub const ORBIT_COUNT: usize = 5;

/// Images of an offset under the dihedral group of order 8: four rotations
/// and four reflections. May repeat when the offset lies on a mirror axis.
fn dihedral_images(dx: i32, dy: i32) -> [(i32, i32); 8] {
    [
        (dx, dy),
        (-dy, dx),
        (-dx, -dy),
        (dy, -dx),
        (dy, dx),
        (-dx, dy),
        (-dy, -dx),
        (dx, -dy),
    ]
}

/// Maps each stencil index to its orbit id, derived once from the group
/// action and cached. Ids are assigned in first-appearance order over the
/// stencil, so the table is deterministic.
pub fn orbit_ids() -> &'static [u8; 32] {
    static TABLE: OnceLock<[u8; 32]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [u8::MAX; 32];
        let mut next = 0u8;
        for i in 0..STENCIL.len() {
            if table[i] != u8::MAX {
                continue;
            }
            let (dx, dy) = STENCIL[i];
            for (ix, iy) in dihedral_images(dx, dy) {
                let j = offset_index(ix, iy)
                    .expect("stencil is closed under the dihedral action");
                table[j] = next;
            }
            next += 1;
        }
        assert_eq!(next as usize, ORBIT_COUNT);
        table
    })
}

/// Replaces every spatial weight of a layer-0 weights matrix (rows indexed
/// by stencil position, columns by neuron) with the mean of its orbit,
/// independently per neuron. Biases live in a separate matrix and are
/// untouched.
///
/// The orbit mean is computed with a pairwise reduction; orbit sizes are
/// powers of two, so an orbit whose members already hold the mean sums and
/// divides exactly, making the operation exactly idempotent.
pub fn symmetrize(weights: &mut Matrix) {
    assert_eq!(weights.rows, STENCIL.len(), "expected one row per stencil tap");
    let orbits = orbit_ids();

    for j in 0..weights.cols {
        let mut members: [Vec<f64>; ORBIT_COUNT] = Default::default();
        for i in 0..STENCIL.len() {
            members[orbits[i] as usize].push(weights.data[i][j]);
        }

        let mut means = [0.0f64; ORBIT_COUNT];
        for (o, vals) in members.iter_mut().enumerate() {
            means[o] = pairwise_sum(vals) / vals.len() as f64;
        }

        for i in 0..STENCIL.len() {
            weights.data[i][j] = means[orbits[i] as usize];
        }
    }
}

/// Sums a power-of-two-length slice as a balanced tree, in place.
fn pairwise_sum(vals: &mut [f64]) -> f64 {
    let mut n = vals.len();
    debug_assert!(n.is_power_of_two());
    while n > 1 {
        for i in 0..n / 2 {
            vals[i] = vals[2 * i] + vals[2 * i + 1];
        }
        n /= 2;
    }
    vals[0]
}
