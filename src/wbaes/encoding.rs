//! Non-linear Nibble Encodings
//!
//! Every 4-bit value that crosses a table boundary inside the white-box
//! network is wrapped in a random bijection of {0..15}, and the consuming
//! table starts by applying the matching inverse. This module provides the
//! permutation generator and the external encoding helpers that apply the
//! same idea at the plaintext/ciphertext boundary, one low-nibble and one
//! high-nibble permutation per state byte.
//!
//! Permutations are produced by a Fisher-Yates shuffle over a
//! caller-supplied CSPRNG.

use std::error::Error;

use rand::{CryptoRng, RngCore};

/// A bijection of the sixteen 4-bit values.
pub type NibblePerm = [u8; 16];

/// A per-byte external encoding: index 0 holds the low-nibble permutation
/// and index 1 the high-nibble permutation for each of the 16 state bytes.
pub type ExtEncoding = [[NibblePerm; 2]; 16];

/// The identity permutation of {0..15}.
pub const IDENTITY_NIBBLE_PERM: NibblePerm =
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Shuffle a nibble permutation in place.
fn knuth_shuffle<R: RngCore + CryptoRng>(
    rng: &mut R,
    x: &mut NibblePerm,
) -> Result<(), Box<dyn Error>> {
    let mut bytes = [0u8; 15];
    rng.try_fill_bytes(&mut bytes)?;

    for i in (1..16).rev() {
        let j = (bytes[15 - i] as usize) % (i + 1);
        x.swap(i, j);
    }

    Ok(())
}

/// Generate a random nibble permutation and its inverse.
pub(crate) fn gen_rand_nibble_perm<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(NibblePerm, NibblePerm), Box<dyn Error>> {
    let mut x = IDENTITY_NIBBLE_PERM;
    knuth_shuffle(rng, &mut x)?;

    let mut inv_x = [0u8; 16];
    for (i, &v) in x.iter().enumerate() {
        inv_x[v as usize] = i as u8;
    }

    Ok((x, inv_x))
}

/// Apply an external encoding to a 16-byte state in place.
///
/// Each byte is rewritten as `f[i][1][high(x)] << 4 | f[i][0][low(x)]`.
/// Applied to the plaintext before white-box encryption with `ext_f`, and
/// produced on the ciphertext by the last-round tables with `ext_g`.
pub fn encode_ext_x(f: &ExtEncoding, x: &mut [u8; 16]) {
    for (b, perms) in x.iter_mut().zip(f.iter()) {
        *b = perms[1][(*b >> 4) as usize] << 4 | perms[0][(*b & 0x0f) as usize];
    }
}

/// Remove an external encoding from a 16-byte state in place.
///
/// The inverse of [`encode_ext_x`]: pass the inverse permutation pair.
pub fn decode_ext_x(inv_f: &ExtEncoding, x: &mut [u8; 16]) {
    for (b, perms) in x.iter_mut().zip(inv_f.iter()) {
        *b = perms[1][(*b >> 4) as usize] << 4 | perms[0][(*b & 0x0f) as usize];
    }
}
