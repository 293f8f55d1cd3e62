pub mod offsets;
pub mod sampling;
pub mod symmetry;

pub use offsets::{axial_taps, diagonal_taps, CENTER_TAPS, STENCIL};
pub use sampling::{
    center_average, denormalize_value, normalize_patch, normalize_value, sample_patch, PATCH_LEN,
};
pub use symmetry::{orbit_ids, symmetrize, ORBIT_COUNT};
