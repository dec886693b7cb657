//! White-box AES Encryption
//!
//! Evaluates the table network on a 16-byte state. The round structure
//! follows Muir's tutorial rendering of Chow's construction:
//!
//! ```text
//! state = plaintext
//! for r = 1 ... 9
//!     ShiftRows(state)
//!     TBoxesTyiTables(state)   -- ty_boxes   and r1_xor_tables
//!     XORTables(state)         -- mbl_tables and r2_xor_tables
//! ShiftRows(state)
//! TBoxes(state, 10)            -- last_box
//! ciphertext = state
//! ```
//!
//! Every step is a table lookup or a nibble-indexed XOR-table reduction;
//! there is no branching on state bytes, and the routine is total over any
//! 16-byte input. The bundle is only borrowed, so concurrent evaluation on
//! distinct state buffers is safe.

use super::wbaes_gen::SHIFT_MAP;
use super::wbaes_tables::{WbaesEncryptionTable, XorTable};

/// Apply ShiftRows to a flat 16-byte state.
fn shift_rows(x: &mut [u8; 16]) {
    let temp = *x;

    for (i, b) in x.iter_mut().enumerate() {
        *b = temp[SHIFT_MAP[i]];
    }
}

/// Look up one word table per lane of each column and XOR-reduce the four
/// words back to four state bytes through the nibble tree.
///
/// Used twice per round: once with the Ty-boxes and the first reduction
/// family, once with the MBL tables and the second family.
fn ref_table(tables: &[[u32; 256]; 16], xor_tables: &[XorTable; 96], x: &mut [u8; 16]) {
    for i in 0..4 {
        let a = tables[i * 4][x[i * 4] as usize];
        let b = tables[i * 4 + 1][x[i * 4 + 1] as usize];
        let c = tables[i * 4 + 2][x[i * 4 + 2] as usize];
        let d = tables[i * 4 + 3][x[i * 4 + 3] as usize];

        // Pairwise reduction per nibble position, then the level-2 table
        // combines the two pair results and re-encodes.
        let mut nibbles = [0u8; 8];
        for (j, out) in nibbles.iter_mut().enumerate() {
            let shift = 28 - 4 * j;
            let ab = xor_tables[i * 16 + j][((a >> shift) & 0x0f) as usize]
                [((b >> shift) & 0x0f) as usize];
            let cd = xor_tables[i * 16 + 8 + j][((c >> shift) & 0x0f) as usize]
                [((d >> shift) & 0x0f) as usize];
            *out = xor_tables[64 + i * 8 + j][ab as usize][cd as usize];
        }

        for k in 0..4 {
            x[i * 4 + k] = nibbles[2 * k] << 4 | nibbles[2 * k + 1];
        }
    }
}

/// Encrypt a 16-byte state in place with a white-box table bundle.
///
/// If the bundle was generated with external encodings, the state must be
/// pre-encoded with `ext_f` and the result carries `ext_g`; otherwise the
/// state is plain AES plaintext and the result plain AES ciphertext.
pub fn wbaes_encrypt(et: &WbaesEncryptionTable, x: &mut [u8; 16]) {
    for r in 0..9 {
        shift_rows(x);
        ref_table(&et.ty_boxes[r], &et.r1_xor_tables[r], x);
        ref_table(&et.mbl_tables[r], &et.r2_xor_tables[r], x);
    }

    shift_rows(x);
    for (b, table) in x.iter_mut().zip(et.last_box.iter()) {
        *b = table[*b as usize];
    }
}
