use super::super::encoding::*;
use super::super::wbaes_tables::WbaesExtEncoding;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn rand_ext_encoding(rng: &mut ChaCha20Rng) -> (ExtEncoding, ExtEncoding) {
    let mut f = [[IDENTITY_NIBBLE_PERM; 2]; 16];
    let mut inv_f = [[IDENTITY_NIBBLE_PERM; 2]; 16];

    for i in 0..16 {
        for h in 0..2 {
            let (x, inv_x) = gen_rand_nibble_perm(rng).expect("RNG failed");
            f[i][h] = x;
            inv_f[i][h] = inv_x;
        }
    }

    (f, inv_f)
}

#[test]
fn test_nibble_perm_is_bijection() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);

    for _ in 0..64 {
        let (x, inv_x) = gen_rand_nibble_perm(&mut rng).expect("RNG failed");

        let mut sorted = x;
        sorted.sort_unstable();
        assert_eq!(sorted, IDENTITY_NIBBLE_PERM, "not a permutation: {:?}", x);

        for v in 0..16 {
            assert_eq!(inv_x[x[v] as usize] as usize, v);
            assert_eq!(x[inv_x[v] as usize] as usize, v);
        }
    }
}

#[test]
fn test_ext_encode_decode_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(12);
    let (f, inv_f) = rand_ext_encoding(&mut rng);

    for _ in 0..32 {
        let mut state = [0u8; 16];
        rng.fill_bytes(&mut state);
        let original = state;

        encode_ext_x(&f, &mut state);
        decode_ext_x(&inv_f, &mut state);
        assert_eq!(state, original);
    }

    // Per-byte coverage of all 256 values through lane 0.
    for v in 0..=255u8 {
        let mut state = [v; 16];
        encode_ext_x(&f, &mut state);
        decode_ext_x(&inv_f, &mut state);
        assert_eq!(state, [v; 16]);
    }
}

#[test]
fn test_identity_encoding_is_noop() {
    let ee = WbaesExtEncoding::identity();
    let mut state: [u8; 16] = *b"0123456789abcdef";
    let original = state;

    encode_ext_x(&ee.ext_f, &mut state);
    assert_eq!(state, original);
    decode_ext_x(&ee.inv_ext_g, &mut state);
    assert_eq!(state, original);
}
