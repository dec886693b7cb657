//! AES-128 Reference Core
//!
//! A plain software implementation of AES-128 block encryption and
//! decryption, together with the key expansion in the two forms the rest of
//! the crate consumes: the byte buffer used by the round loop here, and the
//! flat 44-word schedule the white-box table generator is built from.
//!
//! The white-box construction never calls into this cipher at run time; it
//! exists as the round-key source for table generation and as the reference
//! against which the table network is validated.
//!
//! # Examples
//!
//! Encrypting and decrypting a single block:
//!
//! ```
//! use whitebox_aes::aes::{aes_enc_block, aes_dec_block};
//!
//! let plaintext: [u8; 16] = [
//!     0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93,
//!     0x17, 0x2a,
//! ];
//! let key: [u8; 16] = [
//!     0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
//!     0x4f, 0x3c,
//! ];
//!
//! let ciphertext = aes_enc_block(&plaintext, &key);
//! assert_eq!(aes_dec_block(&ciphertext, &key), plaintext);
//! ```
//!
//! # Notes
//!
//! - The round keys are stored in a fixed byte buffer rather than a
//!   multi-dimensional array as traditionally specified.
//! - The S-box tables below are the standard AES constants; the `gf` module
//!   re-derives them from the field inverse and affine map, and the test
//!   suite checks both against each other.

use crate::gf::gf_mul;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes.
pub const AES_128_KEY_SIZE: usize = 16;

/// The number of columns comprising a state in AES.
const NB: usize = 4;

/// The number of rounds for AES-128.
const NR: usize = 10;

/// The S-box used in the SubBytes step.
///
/// Each byte in the state array is replaced with its corresponding value in
/// the S-box, providing the non-linear transformation in the cipher.
pub const S_BOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// The inverse S-box used in the InvSubBytes step.
pub const INV_S_BOX: [u8; 256] = [
    0x52, 0x09, 0x6a, 0xd5, 0x30, 0x36, 0xa5, 0x38, 0xbf, 0x40, 0xa3, 0x9e, 0x81, 0xf3, 0xd7, 0xfb,
    0x7c, 0xe3, 0x39, 0x82, 0x9b, 0x2f, 0xff, 0x87, 0x34, 0x8e, 0x43, 0x44, 0xc4, 0xde, 0xe9, 0xcb,
    0x54, 0x7b, 0x94, 0x32, 0xa6, 0xc2, 0x23, 0x3d, 0xee, 0x4c, 0x95, 0x0b, 0x42, 0xfa, 0xc3, 0x4e,
    0x08, 0x2e, 0xa1, 0x66, 0x28, 0xd9, 0x24, 0xb2, 0x76, 0x5b, 0xa2, 0x49, 0x6d, 0x8b, 0xd1, 0x25,
    0x72, 0xf8, 0xf6, 0x64, 0x86, 0x68, 0x98, 0x16, 0xd4, 0xa4, 0x5c, 0xcc, 0x5d, 0x65, 0xb6, 0x92,
    0x6c, 0x70, 0x48, 0x50, 0xfd, 0xed, 0xb9, 0xda, 0x5e, 0x15, 0x46, 0x57, 0xa7, 0x8d, 0x9d, 0x84,
    0x90, 0xd8, 0xab, 0x00, 0x8c, 0xbc, 0xd3, 0x0a, 0xf7, 0xe4, 0x58, 0x05, 0xb8, 0xb3, 0x45, 0x06,
    0xd0, 0x2c, 0x1e, 0x8f, 0xca, 0x3f, 0x0f, 0x02, 0xc1, 0xaf, 0xbd, 0x03, 0x01, 0x13, 0x8a, 0x6b,
    0x3a, 0x91, 0x11, 0x41, 0x4f, 0x67, 0xdc, 0xea, 0x97, 0xf2, 0xcf, 0xce, 0xf0, 0xb4, 0xe6, 0x73,
    0x96, 0xac, 0x74, 0x22, 0xe7, 0xad, 0x35, 0x85, 0xe2, 0xf9, 0x37, 0xe8, 0x1c, 0x75, 0xdf, 0x6e,
    0x47, 0xf1, 0x1a, 0x71, 0x1d, 0x29, 0xc5, 0x89, 0x6f, 0xb7, 0x62, 0x0e, 0xaa, 0x18, 0xbe, 0x1b,
    0xfc, 0x56, 0x3e, 0x4b, 0xc6, 0xd2, 0x79, 0x20, 0x9a, 0xdb, 0xc0, 0xfe, 0x78, 0xcd, 0x5a, 0xf4,
    0x1f, 0xdd, 0xa8, 0x33, 0x88, 0x07, 0xc7, 0x31, 0xb1, 0x12, 0x10, 0x59, 0x27, 0x80, 0xec, 0x5f,
    0x60, 0x51, 0x7f, 0xa9, 0x19, 0xb5, 0x4a, 0x0d, 0x2d, 0xe5, 0x7a, 0x9f, 0x93, 0xc9, 0x9c, 0xef,
    0xa0, 0xe0, 0x3b, 0x4d, 0xae, 0x2a, 0xf5, 0xb0, 0xc8, 0xeb, 0xbb, 0x3c, 0x83, 0x53, 0x99, 0x61,
    0x17, 0x2b, 0x04, 0x7e, 0xba, 0x77, 0xd6, 0x26, 0xe1, 0x69, 0x14, 0x63, 0x55, 0x21, 0x0c, 0x7d,
];

/// The round constants for AES-128 key expansion; RCON[i] is x^(i-1) as a
/// power of {02} in GF(2^8), indexed from 1.
const RCON: [u8; 11] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

/// Expand an AES-128 key into the round-key byte buffer.
///
/// The expanded keys are stored in a single contiguous buffer of eleven
/// 16-byte round keys.
pub fn expand_key(key: &[u8; AES_128_KEY_SIZE]) -> [u8; 176] {
    let nk = AES_128_KEY_SIZE / 4;
    let mut expanded_key = [0u8; 176];
    let mut temp = [0u8; 4];

    expanded_key[..AES_128_KEY_SIZE].copy_from_slice(key);

    for i in nk..NB * (NR + 1) {
        temp.copy_from_slice(&expanded_key[(i - 1) * 4..i * 4]);

        if i % nk == 0 {
            // RotWord, SubWord, then the round constant on the first byte.
            temp.rotate_left(1);
            for t in temp.iter_mut() {
                *t = S_BOX[*t as usize];
            }
            temp[0] ^= RCON[i / nk];
        }

        for j in 0..4 {
            expanded_key[i * 4 + j] = expanded_key[(i - nk) * 4 + j] ^ temp[j];
        }
    }

    expanded_key
}

/// Expand an AES-128 key into the flat 44-word round-key schedule.
///
/// Words carry big-endian byte semantics: word 0 is the first four key
/// bytes with the first byte in the most significant position. This is the
/// form the white-box table generator consumes.
pub fn aes128_key_schedule(key: &[u8; AES_128_KEY_SIZE]) -> [u32; 44] {
    let expanded_key = expand_key(key);
    let mut words = [0u32; 44];

    for (word, chunk) in words.iter_mut().zip(expanded_key.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    words
}

/// Add a round key to the state using an XOR operation.
fn add_round_key(round: usize, state: &mut [[u8; 4]; 4], expanded_key: &[u8; 176]) {
    for i in 0..4 {
        for j in 0..4 {
            state[j][i] ^= expanded_key[round * NB * 4 + i * NB + j];
        }
    }
}

/// Perform the SubBytes transformation.
fn sub_bytes(state: &mut [[u8; 4]; 4]) {
    for row in state.iter_mut() {
        for b in row.iter_mut() {
            *b = S_BOX[*b as usize];
        }
    }
}

/// Perform the InvSubBytes transformation.
fn inv_sub_bytes(state: &mut [[u8; 4]; 4]) {
    for row in state.iter_mut() {
        for b in row.iter_mut() {
            *b = INV_S_BOX[*b as usize];
        }
    }
}

/// Perform the ShiftRows transformation.
///
/// Cyclically shifts row i of the state matrix i columns to the left.
fn shift_rows(state: &mut [[u8; 4]; 4]) {
    for i in 1..4 {
        state[i].rotate_left(i);
    }
}

/// Perform the InvShiftRows transformation.
///
/// Cyclically shifts row i of the state matrix i columns to the right.
fn inv_shift_rows(state: &mut [[u8; 4]; 4]) {
    for i in 1..4 {
        state[i].rotate_right(i);
    }
}

/// Perform the MixColumns transformation.
///
/// Each column of the state is multiplied by the fixed polynomial matrix
/// over GF(2^8).
fn mix_columns(state: &mut [[u8; 4]; 4]) {
    for i in 0..4 {
        let a = state[0][i];
        let b = state[1][i];
        let c = state[2][i];
        let d = state[3][i];

        state[0][i] = gf_mul(a, 0x02) ^ gf_mul(b, 0x03) ^ c ^ d;
        state[1][i] = a ^ gf_mul(b, 0x02) ^ gf_mul(c, 0x03) ^ d;
        state[2][i] = a ^ b ^ gf_mul(c, 0x02) ^ gf_mul(d, 0x03);
        state[3][i] = gf_mul(a, 0x03) ^ b ^ c ^ gf_mul(d, 0x02);
    }
}

/// Perform the InvMixColumns transformation.
fn inv_mix_columns(state: &mut [[u8; 4]; 4]) {
    for i in 0..4 {
        let a = state[0][i];
        let b = state[1][i];
        let c = state[2][i];
        let d = state[3][i];

        state[0][i] = gf_mul(a, 0x0e) ^ gf_mul(b, 0x0b) ^ gf_mul(c, 0x0d) ^ gf_mul(d, 0x09);
        state[1][i] = gf_mul(a, 0x09) ^ gf_mul(b, 0x0e) ^ gf_mul(c, 0x0b) ^ gf_mul(d, 0x0d);
        state[2][i] = gf_mul(a, 0x0d) ^ gf_mul(b, 0x09) ^ gf_mul(c, 0x0e) ^ gf_mul(d, 0x0b);
        state[3][i] = gf_mul(a, 0x0b) ^ gf_mul(b, 0x0d) ^ gf_mul(c, 0x09) ^ gf_mul(d, 0x0e);
    }
}

/// Copy a 16-byte block into a 4x4 state array.
fn copy_block_to_state(block: &[u8; AES_BLOCK_SIZE]) -> [[u8; 4]; 4] {
    let mut state = [[0u8; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            state[j][i] = block[i * 4 + j];
        }
    }

    state
}

/// Copy a 4x4 state array into a 16-byte block.
fn copy_state_to_block(state: &[[u8; 4]; 4]) -> [u8; AES_BLOCK_SIZE] {
    let mut block = [0u8; AES_BLOCK_SIZE];

    for i in 0..4 {
        for j in 0..4 {
            block[i * 4 + j] = state[j][i];
        }
    }

    block
}

/// Encrypt a single block with AES-128.
///
/// A total function over its inputs; the key and block sizes are fixed by
/// the types.
pub fn aes_enc_block(
    block: &[u8; AES_BLOCK_SIZE],
    key: &[u8; AES_128_KEY_SIZE],
) -> [u8; AES_BLOCK_SIZE] {
    let mut state = copy_block_to_state(block);
    let expanded_key = expand_key(key);

    add_round_key(0, &mut state, &expanded_key);

    for round in 1..NR {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(round, &mut state, &expanded_key);
    }

    // Final round (without mix_columns)
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(NR, &mut state, &expanded_key);

    copy_state_to_block(&state)
}

/// Decrypt a single block with AES-128.
pub fn aes_dec_block(
    ciphertext: &[u8; AES_BLOCK_SIZE],
    key: &[u8; AES_128_KEY_SIZE],
) -> [u8; AES_BLOCK_SIZE] {
    let mut state = copy_block_to_state(ciphertext);
    let expanded_key = expand_key(key);

    add_round_key(NR, &mut state, &expanded_key);

    for round in (1..NR).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(round, &mut state, &expanded_key);
        inv_mix_columns(&mut state);
    }

    // Final round (without inv_mix_columns)
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(0, &mut state, &expanded_key);

    copy_state_to_block(&state)
}
