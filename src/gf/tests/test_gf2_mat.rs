use super::super::gf2_mat::*;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const IDENTITY8: GF2Mat8 = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

#[test]
fn test_identity_action_8() {
    for x in 0..=255u8 {
        assert_eq!(gf2_mat8_times_vec(&IDENTITY8, x), x);
    }
}

#[test]
fn test_identity_action_32() {
    let mut identity: GF2Mat32 = [0; 32];
    for (i, row) in identity.iter_mut().enumerate() {
        *row = 0x8000_0000 >> i;
    }

    for &x in &[0u32, 1, 0x8000_0000, 0xdead_beef, 0xffff_ffff] {
        assert_eq!(gf2_mat32_times_vec(&identity, x), x);
    }
}

#[test]
fn test_singular_matrix_has_no_inverse() {
    assert!(gf2_inv8(&[0u8; 8]).is_none());
    assert!(gf2_inv32(&[0u32; 32]).is_none());

    // Two equal rows force singularity.
    let mut m = IDENTITY8;
    m[7] = m[0];
    assert!(gf2_inv8(&m).is_none());
}

#[test]
fn test_rand_invertible_8_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..16 {
        let (m, m_inv) = gf2_rand_invertible_matrix8(&mut rng).expect("RNG failed");

        for x in 0..=255u8 {
            assert_eq!(gf2_mat8_times_vec(&m, gf2_mat8_times_vec(&m_inv, x)), x);
            assert_eq!(gf2_mat8_times_vec(&m_inv, gf2_mat8_times_vec(&m, x)), x);
        }
    }
}

#[test]
fn test_rand_invertible_32_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);

    for _ in 0..8 {
        let (m, m_inv) = gf2_rand_invertible_matrix32(&mut rng).expect("RNG failed");

        // All basis vectors: equivalent to checking M * M^-1 = I.
        for i in 0..32 {
            let e = 1u32 << i;
            assert_eq!(gf2_mat32_times_vec(&m, gf2_mat32_times_vec(&m_inv, e)), e);
            assert_eq!(gf2_mat32_times_vec(&m_inv, gf2_mat32_times_vec(&m, e)), e);
        }
    }
}

#[test]
fn test_mat_vec_is_linear() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let m = gf2_rand_matrix32(&mut rng).expect("RNG failed");

    for &(x, y) in &[(0x1234_5678u32, 0x9abc_def0u32), (1, 2), (0xffff_0000, 0x0000_ffff)] {
        assert_eq!(
            gf2_mat32_times_vec(&m, x ^ y),
            gf2_mat32_times_vec(&m, x) ^ gf2_mat32_times_vec(&m, y)
        );
    }
}
