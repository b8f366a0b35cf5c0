//! Embedded fiducial marker dictionary.

/// A fixed square-marker dictionary.
///
/// Bits are stored row-major in a `u16` with bit index `y * size + x` and
/// **black = 1**. Every code carries an orientation anchor: the top-left
/// module is black and the other three corner modules are white, so no
/// non-trivial rotation of any code can collide with another code within a
/// Hamming distance of 1.
#[derive(Clone, Copy, Debug)]
pub struct Dictionary {
    /// Human-readable name for logging.
    pub name: &'static str,
    /// Marker side length in modules (inner bits per side).
    pub size: usize,
    /// Maximum Hamming distance the codes can correct.
    pub max_correction_bits: u8,
    /// One code per marker id.
    pub codes: &'static [u16],
}

impl Dictionary {
    /// Total number of inner modules per marker.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.size * self.size
    }
}

/// The built-in 4x4 dictionary used for working-area corner markers.
///
/// Besides the corner anchor, the 12 free modules carry the id nibble three
/// times (a rate-1/3 repetition code), giving a minimum pairwise distance of
/// 3 and single-bit correction.
pub const GRIDNAV_4X4: Dictionary = Dictionary {
    name: "GRIDNAV_4X4",
    size: 4,
    max_correction_bits: 1,
    codes: &[
        0x0001, // id 0
        0x0443, // id 1
        0x0885, // id 2
        0x0CC7, // id 3
        0x2111, // id 4
        0x2553, // id 5
        0x2995, // id 6
        0x2DD7, // id 7
    ],
};

/// Rotate a row-major code by `rot` quarter turns clockwise.
pub fn rotate_code(code: u16, size: usize, rot: u8) -> u16 {
    let rot = rot & 3;
    if rot == 0 {
        return code;
    }

    let mut out = 0u16;
    for y in 0..size {
        for x in 0..size {
            let (sx, sy) = match rot {
                1 => (y, size - 1 - x),
                2 => (size - 1 - x, size - 1 - y),
                _ => (size - 1 - y, x),
            };
            let bit = (code >> (sy * size + sx)) & 1;
            out |= bit << (y * size + x);
        }
    }
    out
}
