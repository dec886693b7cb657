//! White-box Table Generation
//!
//! Compiles an AES-128 round-key schedule into the encryption table bundle.
//! The pipeline follows Chow's construction:
//!
//! 1. T-boxes fuse AddRoundKey and SubBytes per round and lane, with the
//!    round keys pre-permuted by ShiftRows so the evaluator can shift the
//!    state instead.
//! 2. The four Ty-i tables express MixColumns as byte-to-word lookups and
//!    are composed with the T-boxes into 32-bit-valued Ty-boxes; the final
//!    round's T-boxes (with the last round key folded in) become the
//!    last-round byte tables.
//! 3. A random invertible 32x32 mixing bijection per round-column is
//!    applied to the Ty-box outputs, and its inverse is deferred to the MBL
//!    tables so the two XOR-reduction stages of a column cancel it again.
//! 4. A random invertible 8x8 map per round-lane is applied to the MBL
//!    output bytes, routed through inverse ShiftRows so that the next
//!    round's Ty-box (or the last-round table) begins by undoing it.
//! 5. Every table output nibble is wrapped in a random 4-bit bijection and
//!    every table input starts by inverting the encoding its producer
//!    applied; the XOR-reduction tables carry the encodings across the
//!    combine trees. At the boundary, the plaintext side decodes the
//!    external input encoding and the last-round tables apply the external
//!    output encoding.
//!
//! The matrices and internal encodings live only inside this module;
//! only their action, baked into the tables, survives in the bundle.
//! Generation is a pure function of (round keys, RNG stream): a fixed seed
//! reproduces the bundle byte for byte.

use std::error::Error;

use rand::{CryptoRng, RngCore};

use crate::aes::S_BOX;
use crate::gf::{
    gf2_mat32_times_vec, gf2_mat8_times_vec, gf2_rand_invertible_matrix32,
    gf2_rand_invertible_matrix8, gf_mul, GF2Mat8,
};

use super::encoding::{gen_rand_nibble_perm, NibblePerm};
use super::wbaes_tables::{WbaesEncryptionTable, WbaesExtEncoding, XorTable};

/// ShiftRows as a permutation of byte indices: position i of the shifted
/// state is position SHIFT_MAP[i] of the unshifted state.
pub(crate) const SHIFT_MAP: [usize; 16] =
    [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];

/// Inverse of [`SHIFT_MAP`].
pub(crate) const INV_SHIFT_MAP: [usize; 16] =
    [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Configuration for table generation.
#[derive(Clone, Debug, Default)]
pub struct WbaesGenConfig {
    /// Whether to draw random external input/output encodings. When false,
    /// the external encodings are identity permutations and the evaluator
    /// output equals plain AES ciphertext.
    pub external_encodings: bool,
}

/// The internal nibble encodings, generation-local.
///
/// `int_s`/`int_m` wrap the eight output nibbles of every Ty-box and MBL
/// table. `int_outs`/`int_outm` wrap the outputs of the XOR-reduction
/// groups: per column, two level-1 pair groups and one level-2 group, so
/// twelve groups of eight nibble positions per round. The input decodings
/// of every consumer are forced to be the inverses of its producers'
/// output encodings, so only the inverses are stored alongside.
struct IntEncoding {
    int_s: [[[NibblePerm; 8]; 16]; 9],
    inv_int_s: [[[NibblePerm; 8]; 16]; 9],
    int_m: [[[NibblePerm; 8]; 16]; 9],
    inv_int_m: [[[NibblePerm; 8]; 16]; 9],
    int_outs: [[[NibblePerm; 8]; 12]; 9],
    inv_int_outs: [[[NibblePerm; 8]; 12]; 9],
    int_outm: [[[NibblePerm; 8]; 12]; 9],
    inv_int_outm: [[[NibblePerm; 8]; 12]; 9],
}

impl IntEncoding {
    /// A zeroed encoding set; ~126 KiB of scratch that is dropped before
    /// generation returns.
    fn new() -> Self {
        let lane = [[[0u8; 16]; 8]; 16];
        let group = [[[0u8; 16]; 8]; 12];

        Self {
            int_s: [lane; 9],
            inv_int_s: [lane; 9],
            int_m: [lane; 9],
            inv_int_m: [lane; 9],
            int_outs: [group; 9],
            inv_int_outs: [group; 9],
            int_outm: [group; 9],
            inv_int_outm: [group; 9],
        }
    }
}

/// Rewrite a byte through a high/low nibble permutation pair.
fn permute_byte(hi: &NibblePerm, lo: &NibblePerm, x: u8) -> u8 {
    hi[(x >> 4) as usize] << 4 | lo[(x & 0x0f) as usize]
}

/// Encode the eight nibbles of a word, most significant nibble first.
fn encode_word(perms: &[NibblePerm; 8], w: u32) -> u32 {
    let mut out = 0u32;

    for (p, perm) in perms.iter().enumerate() {
        let shift = 28 - 4 * p;
        out |= (perm[((w >> shift) & 0x0f) as usize] as u32) << shift;
    }

    out
}

/// Generate the external input/output encodings.
fn gen_external_encoding<R: RngCore + CryptoRng>(
    config: &WbaesGenConfig,
    rng: &mut R,
) -> Result<WbaesExtEncoding, Box<dyn Error>> {
    let mut ee = WbaesExtEncoding::identity();

    if config.external_encodings {
        for i in 0..16 {
            for h in 0..2 {
                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ee.ext_f[i][h] = x;
                ee.inv_ext_f[i][h] = inv_x;

                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ee.ext_g[i][h] = x;
                ee.inv_ext_g[i][h] = inv_x;
            }
        }
    }

    Ok(ee)
}

/// Generate the internal nibble encodings for all rounds.
fn gen_internal_encoding<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<IntEncoding, Box<dyn Error>> {
    let mut ie = IntEncoding::new();

    for r in 0..9 {
        for n in 0..16 {
            for p in 0..8 {
                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ie.int_s[r][n][p] = x;
                ie.inv_int_s[r][n][p] = inv_x;

                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ie.int_m[r][n][p] = x;
                ie.inv_int_m[r][n][p] = inv_x;
            }
        }
        for g in 0..12 {
            for p in 0..8 {
                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ie.int_outs[r][g][p] = x;
                ie.inv_int_outs[r][g][p] = inv_x;

                let (x, inv_x) = gen_rand_nibble_perm(rng)?;
                ie.int_outm[r][g][p] = x;
                ie.inv_int_outm[r][g][p] = inv_x;
            }
        }
    }

    Ok(ie)
}

/// Expand a round-key word into its four big-endian bytes.
fn round_key_bytes(words: &[u32]) -> [u8; 16] {
    let mut out = [0u8; 16];

    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }

    out
}

/// Build the T-boxes: S(x ^ k'[r][n]) with the round key permuted by
/// ShiftRows, and the final round key folded into round 9.
fn gen_t_boxes(round_keys: &[u32; 44]) -> [[[u8; 256]; 16]; 10] {
    let mut t_boxes = [[[0u8; 256]; 16]; 10];

    for (r, round) in t_boxes.iter_mut().enumerate() {
        let rk = round_key_bytes(&round_keys[4 * r..4 * r + 4]);
        for (n, t) in round.iter_mut().enumerate() {
            let k = rk[SHIFT_MAP[n]];
            for (x, v) in t.iter_mut().enumerate() {
                *v = S_BOX[(x as u8 ^ k) as usize];
            }
        }
    }

    // The final round XOR-accumulates the 11th round key after SubBytes.
    for c in 0..4 {
        let word = round_keys[40 + c];
        for i in 0..4 {
            let k = (word >> (24 - 8 * i)) as u8;
            for x in 0..256 {
                t_boxes[9][4 * c + i][x] ^= k;
            }
        }
    }

    t_boxes
}

/// Build the four Ty-i tables, one per column position.
///
/// `tyi[i][x]` is the MixColumns column produced by byte x placed in row i,
/// packed into a word with row 0 in the most significant byte.
fn gen_tyi_tables() -> [[u32; 256]; 4] {
    let mut tyi = [[0u32; 256]; 4];

    for x in 0..256 {
        let x1 = x as u32;
        let x2 = gf_mul(0x02, x as u8) as u32;
        let x3 = gf_mul(0x03, x as u8) as u32;

        tyi[0][x] = x2 << 24 | x1 << 16 | x1 << 8 | x3;
        tyi[1][x] = x3 << 24 | x2 << 16 | x1 << 8 | x1;
        tyi[2][x] = x1 << 24 | x3 << 16 | x2 << 8 | x1;
        tyi[3][x] = x1 << 24 | x1 << 16 | x3 << 8 | x2;
    }

    tyi
}

/// Compose T-boxes with Ty-i tables into the Ty-boxes, and copy the final
/// round into the last-round byte tables.
fn composite_t_tyi(
    t_boxes: &[[[u8; 256]; 16]; 10],
    tyi_tables: &[[u32; 256]; 4],
    et: &mut WbaesEncryptionTable,
) {
    for r in 0..9 {
        for n in 0..16 {
            for x in 0..256 {
                et.ty_boxes[r][n][x] = tyi_tables[n % 4][t_boxes[r][n][x] as usize];
            }
        }
    }

    et.last_box = t_boxes[9];
}

/// Apply the mixing bijections: a 32x32 map per round-column on the Ty-box
/// outputs with its inverse deferred to the MBL tables, then an 8x8 map
/// per round-lane threaded into the next round through inverse ShiftRows.
fn apply_mixing_bijections<R: RngCore + CryptoRng>(
    et: &mut WbaesEncryptionTable,
    rng: &mut R,
) -> Result<(), Box<dyn Error>> {
    for r in 0..9 {
        for c in 0..4 {
            let (mb, mb_inv) = gf2_rand_invertible_matrix32(rng)?;

            for i in 0..4 {
                let n = 4 * c + i;
                let shift = 24 - 8 * i;
                for x in 0..256 {
                    et.ty_boxes[r][n][x] = gf2_mat32_times_vec(&mb, et.ty_boxes[r][n][x]);
                    et.mbl_tables[r][n][x] = gf2_mat32_times_vec(&mb_inv, (x as u32) << shift);
                }
            }
        }
    }

    for r in 0..9 {
        let mut l: [GF2Mat8; 16] = [[0u8; 8]; 16];
        let mut l_inv: [GF2Mat8; 16] = [[0u8; 8]; 16];
        for n in 0..16 {
            let (m, m_inv) = gf2_rand_invertible_matrix8(rng)?;
            l[n] = m;
            l_inv[n] = m_inv;
        }

        // Each output byte of a column lands at state position 4c+k and
        // reaches lane inv_shift_map[4c+k] after the next ShiftRows, so
        // that lane's map is applied here and undone below.
        for n in 0..16 {
            let c = n / 4;
            for x in 0..256 {
                let w = et.mbl_tables[r][n][x];
                et.mbl_tables[r][n][x] = (gf2_mat8_times_vec(
                    &l[INV_SHIFT_MAP[4 * c]],
                    (w >> 24) as u8,
                ) as u32)
                    << 24
                    | (gf2_mat8_times_vec(&l[INV_SHIFT_MAP[4 * c + 1]], (w >> 16) as u8) as u32)
                        << 16
                    | (gf2_mat8_times_vec(&l[INV_SHIFT_MAP[4 * c + 2]], (w >> 8) as u8) as u32)
                        << 8
                    | gf2_mat8_times_vec(&l[INV_SHIFT_MAP[4 * c + 3]], w as u8) as u32;
            }
        }

        if r < 8 {
            for n in 0..16 {
                let temp = et.ty_boxes[r + 1][n];
                for x in 0..256 {
                    et.ty_boxes[r + 1][n][x] =
                        temp[gf2_mat8_times_vec(&l_inv[n], x as u8) as usize];
                }
            }
        } else {
            for n in 0..16 {
                let temp = et.last_box[n];
                for x in 0..256 {
                    et.last_box[n][x] = temp[gf2_mat8_times_vec(&l_inv[n], x as u8) as usize];
                }
            }
        }
    }

    Ok(())
}

/// Wrap table outputs in their nibble encodings and pre-decode every table
/// input axis with the inverse of its producer's encoding.
fn apply_nonlinear_encoding(
    et: &mut WbaesEncryptionTable,
    ie: &IntEncoding,
    ee: &WbaesExtEncoding,
) {
    // Output side: every Ty-box and MBL word nibble gets its encoding.
    for r in 0..9 {
        for n in 0..16 {
            for x in 0..256 {
                et.ty_boxes[r][n][x] = encode_word(&ie.int_s[r][n], et.ty_boxes[r][n][x]);
                et.mbl_tables[r][n][x] = encode_word(&ie.int_m[r][n], et.mbl_tables[r][n][x]);
            }
        }
    }

    // Round 0 Ty-box inputs remove the external input encoding; ShiftRows
    // routes the byte encoded for lane shift_map[n] into lane n.
    for n in 0..16 {
        let f = &ee.inv_ext_f[SHIFT_MAP[n]];
        let temp = et.ty_boxes[0][n];
        for x in 0..256 {
            et.ty_boxes[0][n][x] = temp[permute_byte(&f[1], &f[0], x as u8) as usize];
        }
    }

    // Rounds 1..8 Ty-box inputs remove the previous round's second-stage
    // output encodings.
    for r in 1..9 {
        for n in 0..16 {
            let m = SHIFT_MAP[n];
            let hi = &ie.inv_int_outm[r - 1][3 * (m / 4) + 2][2 * (m % 4)];
            let lo = &ie.inv_int_outm[r - 1][3 * (m / 4) + 2][2 * (m % 4) + 1];
            let temp = et.ty_boxes[r][n];
            for x in 0..256 {
                et.ty_boxes[r][n][x] = temp[permute_byte(hi, lo, x as u8) as usize];
            }
        }
    }

    // MBL inputs remove this round's first-stage output encodings.
    for r in 0..9 {
        for n in 0..16 {
            let (c, i) = (n / 4, n % 4);
            let hi = &ie.inv_int_outs[r][3 * c + 2][2 * i];
            let lo = &ie.inv_int_outs[r][3 * c + 2][2 * i + 1];
            let temp = et.mbl_tables[r][n];
            for x in 0..256 {
                et.mbl_tables[r][n][x] = temp[permute_byte(hi, lo, x as u8) as usize];
            }
        }
    }

    // The last-round tables remove round 8's second-stage output encodings
    // and apply the external output encoding.
    for n in 0..16 {
        let m = SHIFT_MAP[n];
        let hi = &ie.inv_int_outm[8][3 * (m / 4) + 2][2 * (m % 4)];
        let lo = &ie.inv_int_outm[8][3 * (m / 4) + 2][2 * (m % 4) + 1];
        let g = &ee.ext_g[n];
        let temp = et.last_box[n];
        for x in 0..256 {
            let y = temp[permute_byte(hi, lo, x as u8) as usize];
            et.last_box[n][x] = permute_byte(&g[1], &g[0], y);
        }
    }
}

/// Fill one XOR-reduction table: decode both operands through the inverses
/// of their producers' encodings, XOR, and re-encode the result.
fn fill_xor_table(table: &mut XorTable, dec_x: &NibblePerm, dec_y: &NibblePerm, enc: &NibblePerm) {
    for x in 0..16 {
        for y in 0..16 {
            table[x][y] = enc[(dec_x[x] ^ dec_y[y]) as usize];
        }
    }
}

/// Build the two XOR-reduction families for every round.
///
/// Per column c the tables are laid out as the evaluator walks them:
/// level-1 pair tables at 16c..16c+8 (lanes 4c, 4c+1) and 16c+8..16c+16
/// (lanes 4c+2, 4c+3), one per nibble position, then level-2 tables at
/// 64+8c..64+8c+8 combining the two pair results.
fn gen_xor_tables(et: &mut WbaesEncryptionTable, ie: &IntEncoding) {
    for r in 0..9 {
        for c in 0..4 {
            for p in 0..8 {
                let (r1, r2) = (&mut et.r1_xor_tables[r], &mut et.r2_xor_tables[r]);

                fill_xor_table(
                    &mut r1[16 * c + p],
                    &ie.inv_int_s[r][4 * c][p],
                    &ie.inv_int_s[r][4 * c + 1][p],
                    &ie.int_outs[r][3 * c][p],
                );
                fill_xor_table(
                    &mut r1[16 * c + 8 + p],
                    &ie.inv_int_s[r][4 * c + 2][p],
                    &ie.inv_int_s[r][4 * c + 3][p],
                    &ie.int_outs[r][3 * c + 1][p],
                );
                fill_xor_table(
                    &mut r1[64 + 8 * c + p],
                    &ie.inv_int_outs[r][3 * c][p],
                    &ie.inv_int_outs[r][3 * c + 1][p],
                    &ie.int_outs[r][3 * c + 2][p],
                );

                fill_xor_table(
                    &mut r2[16 * c + p],
                    &ie.inv_int_m[r][4 * c][p],
                    &ie.inv_int_m[r][4 * c + 1][p],
                    &ie.int_outm[r][3 * c][p],
                );
                fill_xor_table(
                    &mut r2[16 * c + 8 + p],
                    &ie.inv_int_m[r][4 * c + 2][p],
                    &ie.inv_int_m[r][4 * c + 3][p],
                    &ie.int_outm[r][3 * c + 1][p],
                );
                fill_xor_table(
                    &mut r2[64 + 8 * c + p],
                    &ie.inv_int_outm[r][3 * c][p],
                    &ie.inv_int_outm[r][3 * c + 1][p],
                    &ie.int_outm[r][3 * c + 2][p],
                );
            }
        }
    }
}

/// Generate a white-box encryption table bundle from an AES-128 round-key
/// schedule.
///
/// Either the complete bundle and its external encodings are returned, or
/// an error; no partially constructed bundle is ever visible. The only
/// runtime error is a failure of the supplied RNG's entropy source.
///
/// # Examples
///
/// ```
/// use rand::rngs::OsRng;
/// use whitebox_aes::aes::aes128_key_schedule;
/// use whitebox_aes::wbaes::{wbaes_encrypt, wbaes_gen_encryption_table, WbaesGenConfig};
///
/// let key = [0u8; 16];
/// let round_keys = aes128_key_schedule(&key);
/// let (et, _ee) =
///     wbaes_gen_encryption_table(&round_keys, &WbaesGenConfig::default(), &mut OsRng)
///         .expect("Table generation failed");
///
/// let mut state = [0u8; 16];
/// wbaes_encrypt(&et, &mut state);
/// ```
pub fn wbaes_gen_encryption_table<R: RngCore + CryptoRng>(
    round_keys: &[u32; 44],
    config: &WbaesGenConfig,
    rng: &mut R,
) -> Result<(WbaesEncryptionTable, WbaesExtEncoding), Box<dyn Error>> {
    let ee = gen_external_encoding(config, rng)?;
    let ie = gen_internal_encoding(rng)?;

    let mut et = WbaesEncryptionTable::new();
    let t_boxes = gen_t_boxes(round_keys);
    let tyi_tables = gen_tyi_tables();
    composite_t_tyi(&t_boxes, &tyi_tables, &mut et);

    apply_mixing_bijections(&mut et, rng)?;
    apply_nonlinear_encoding(&mut et, &ie, &ee);
    gen_xor_tables(&mut et, &ie);

    Ok((et, ee))
}
