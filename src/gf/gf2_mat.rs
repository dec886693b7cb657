//! GF(2) Matrix Algebra
//!
//! Square binary matrices in the two sizes the white-box construction
//! needs: 8x8 for per-byte mixing bijections and 32x32 for per-column
//! mixing bijections. A matrix is an array of row bitmasks; row 0 produces
//! the most significant output bit, and a byte or 32-bit word acts as a
//! column vector with its most significant bit first. This replaces the
//! arbitrary-dimension matrix type of a general-purpose library with two
//! fixed-shape value types, so no dimension checks can fail at runtime.
//!
//! Random matrices are drawn from a caller-supplied CSPRNG through the
//! fallible byte interface, so an entropy failure surfaces as an error.
//! Invertible matrices are found by rejection sampling; roughly 71% of
//! uniform binary matrices of these sizes are invertible, so the expected
//! number of draws is small.

use std::error::Error;

use rand::{CryptoRng, RngCore};

/// An 8x8 matrix over GF(2), one byte per row.
pub type GF2Mat8 = [u8; 8];

/// A 32x32 matrix over GF(2), one 32-bit word per row.
pub type GF2Mat32 = [u32; 32];

/// Draw a uniformly random 8x8 binary matrix.
pub fn gf2_rand_matrix8<R: RngCore + CryptoRng>(rng: &mut R) -> Result<GF2Mat8, Box<dyn Error>> {
    let mut rows = [0u8; 8];
    rng.try_fill_bytes(&mut rows)?;
    Ok(rows)
}

/// Draw a uniformly random 32x32 binary matrix.
pub fn gf2_rand_matrix32<R: RngCore + CryptoRng>(rng: &mut R) -> Result<GF2Mat32, Box<dyn Error>> {
    let mut bytes = [0u8; 128];
    rng.try_fill_bytes(&mut bytes)?;

    let mut rows = [0u32; 32];
    for (row, chunk) in rows.iter_mut().zip(bytes.chunks_exact(4)) {
        *row = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Ok(rows)
}

/// Draw a random invertible 8x8 binary matrix.
///
/// Rejection-samples uniform matrices until one inverts, and returns the
/// matrix together with its inverse.
pub fn gf2_rand_invertible_matrix8<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(GF2Mat8, GF2Mat8), Box<dyn Error>> {
    loop {
        let m = gf2_rand_matrix8(rng)?;
        if let Some(m_inv) = gf2_inv8(&m) {
            return Ok((m, m_inv));
        }
    }
}

/// Draw a random invertible 32x32 binary matrix.
///
/// Rejection-samples uniform matrices until one inverts, and returns the
/// matrix together with its inverse.
pub fn gf2_rand_invertible_matrix32<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(GF2Mat32, GF2Mat32), Box<dyn Error>> {
    loop {
        let m = gf2_rand_matrix32(rng)?;
        if let Some(m_inv) = gf2_inv32(&m) {
            return Ok((m, m_inv));
        }
    }
}

/// Invert an 8x8 binary matrix by Gauss-Jordan elimination.
///
/// Returns `None` if the matrix is singular.
pub fn gf2_inv8(m: &GF2Mat8) -> Option<GF2Mat8> {
    let mut a = *m;
    let mut inv: GF2Mat8 = [0; 8];
    for (i, row) in inv.iter_mut().enumerate() {
        *row = 0x80 >> i;
    }

    for col in 0..8 {
        let bit = 0x80u8 >> col;
        let pivot = (col..8).find(|&r| a[r] & bit != 0)?;
        a.swap(col, pivot);
        inv.swap(col, pivot);

        for r in 0..8 {
            if r != col && a[r] & bit != 0 {
                a[r] ^= a[col];
                inv[r] ^= inv[col];
            }
        }
    }

    Some(inv)
}

/// Invert a 32x32 binary matrix by Gauss-Jordan elimination.
///
/// Returns `None` if the matrix is singular.
pub fn gf2_inv32(m: &GF2Mat32) -> Option<GF2Mat32> {
    let mut a = *m;
    let mut inv: GF2Mat32 = [0; 32];
    for (i, row) in inv.iter_mut().enumerate() {
        *row = 0x8000_0000 >> i;
    }

    for col in 0..32 {
        let bit = 0x8000_0000u32 >> col;
        let pivot = (col..32).find(|&r| a[r] & bit != 0)?;
        a.swap(col, pivot);
        inv.swap(col, pivot);

        for r in 0..32 {
            if r != col && a[r] & bit != 0 {
                a[r] ^= a[col];
                inv[r] ^= inv[col];
            }
        }
    }

    Some(inv)
}

/// Multiply an 8x8 binary matrix by a byte taken as a column vector.
pub fn gf2_mat8_times_vec(m: &GF2Mat8, x: u8) -> u8 {
    let mut y = 0u8;

    for (i, row) in m.iter().enumerate() {
        if (row & x).count_ones() & 1 == 1 {
            y |= 0x80 >> i;
        }
    }

    y
}

/// Multiply a 32x32 binary matrix by a 32-bit word taken as a column
/// vector.
pub fn gf2_mat32_times_vec(m: &GF2Mat32, x: u32) -> u32 {
    let mut y = 0u32;

    for (i, row) in m.iter().enumerate() {
        if (row & x).count_ones() & 1 == 1 {
            y |= 0x8000_0000 >> i;
        }
    }

    y
}
