//! GF(2^8) Arithmetic
//!
//! This module provides arithmetic over the AES finite field GF(2^8), with
//! the irreducible polynomial x^8 + x^4 + x^3 + x + 1 (0x11B). Elements are
//! bytes; addition is XOR and multiplication is carried out schoolbook-style
//! via repeated `gf_xtime` steps.
//!
//! It also derives the AES S-box from first principles: the multiplicative
//! inverse followed by the standard affine transformation. The derivation is
//! primarily of use for validating the precomputed S-box table in the `aes`
//! module, and it documents where that table comes from.
//!
//! All functions are total over their byte inputs; there are no error
//! conditions.

/// Add two elements of GF(2^8).
///
/// Addition in a binary field is bitwise XOR.
pub fn gf_add(gf1: u8, gf2: u8) -> u8 {
    gf1 ^ gf2
}

/// Multiply an element of GF(2^8) by x (0x02).
///
/// A left shift, reduced by the field polynomial when the high bit falls
/// off.
pub fn gf_xtime(gf: u8) -> u8 {
    if gf & 0x80 != 0 {
        (gf << 1) ^ 0x1b
    } else {
        gf << 1
    }
}

/// Multiply two elements of GF(2^8).
///
/// Schoolbook multiplication: eight rounds of `gf_xtime` on the running
/// product, adding `g` whenever the corresponding bit of `f` is set,
/// starting from the most significant coefficient.
pub fn gf_mul(f: u8, g: u8) -> u8 {
    let mut h = 0u8;

    for i in (0..8).rev() {
        h = gf_xtime(h);
        if (f >> i) & 0x01 == 1 {
            h = gf_add(h, g);
        }
    }

    h
}

/// Invert an element of GF(2^8).
///
/// Computes f^254 by repeated squaring, which equals f^-1 for nonzero f by
/// Fermat's little theorem in GF(2^8). Zero maps to zero, which is exactly
/// the convention the S-box derivation needs.
pub fn gf_inv(f: u8) -> u8 {
    let mut f_inv = 1u8;
    let mut temp = f;

    for _ in 0..7 {
        temp = gf_mul(temp, temp);
        f_inv = gf_mul(f_inv, temp);
    }

    f_inv
}

/// Rows of the S-box affine matrix as bitmasks, row i producing output
/// bit i (least significant bit first, matching FIPS-197's b_i indexing).
const AFFINE_ROWS: [u8; 8] = [0xf1, 0xe3, 0xc7, 0x8f, 0x1f, 0x3e, 0x7c, 0xf8];

/// The affine constant 0x63.
const AFFINE_CONST: u8 = 0x63;

/// The AES affine transformation over GF(2).
///
/// Output bit i is the parity of the masked input bits XORed with bit i of
/// the constant 0x63.
pub fn aes_affine(w: u8) -> u8 {
    let mut y = AFFINE_CONST;

    for (i, row) in AFFINE_ROWS.iter().enumerate() {
        if (row & w).count_ones() & 1 == 1 {
            y ^= 1 << i;
        }
    }

    y
}

/// Derive the AES S-box: S(x) = affine(inv(x)).
pub fn aes_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];

    for (x, s) in sbox.iter_mut().enumerate() {
        *s = aes_affine(gf_inv(x as u8));
    }

    sbox
}

/// Derive the inverse AES S-box by inverting [`aes_sbox`].
pub fn aes_inv_sbox() -> [u8; 256] {
    let sbox = aes_sbox();
    let mut isbox = [0u8; 256];

    for (x, s) in sbox.iter().enumerate() {
        isbox[*s as usize] = x as u8;
    }

    isbox
}
