use super::super::gf256::*;

use crate::aes::{INV_S_BOX, S_BOX};

#[test]
fn test_xtime_is_shift_and_conditional_reduce() {
    for a in 0..=255u8 {
        let expected = if a & 0x80 != 0 { (a << 1) ^ 0x1b } else { a << 1 };
        assert_eq!(gf_xtime(a), expected, "xtime mismatch at {:#04x}", a);
    }
}

#[test]
fn test_mul_commutative() {
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            assert_eq!(
                gf_mul(a, b),
                gf_mul(b, a),
                "multiplication not commutative at {:#04x}, {:#04x}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_mul_identities() {
    for a in 0..=255u8 {
        assert_eq!(gf_mul(a, 0x01), a);
        assert_eq!(gf_mul(a, 0x00), 0);
        assert_eq!(gf_mul(a, 0x02), gf_xtime(a));
        assert_eq!(gf_mul(a, 0x03), gf_xtime(a) ^ a);
    }
}

#[test]
fn test_add_is_xor() {
    assert_eq!(gf_add(0x57, 0x83), 0xd4);
    assert_eq!(gf_add(0xff, 0xff), 0x00);
}

#[test]
fn test_mul_known_vector() {
    // {57} * {83} = {c1}, the worked example from FIPS-197 section 4.2.
    assert_eq!(gf_mul(0x57, 0x83), 0xc1);
    assert_eq!(gf_mul(0x57, 0x13), 0xfe);
}

#[test]
fn test_inv_is_involution_and_multiplicative_inverse() {
    assert_eq!(gf_inv(0x00), 0x00);

    for a in 1..=255u8 {
        let a_inv = gf_inv(a);
        assert_eq!(gf_mul(a, a_inv), 0x01, "inverse failed at {:#04x}", a);
        assert_eq!(gf_inv(a_inv), a, "double inverse failed at {:#04x}", a);
    }
}

#[test]
fn test_affine_constant() {
    // affine(0) must give the S-box entry for 0.
    assert_eq!(aes_affine(0x00), 0x63);
}

#[test]
fn test_sbox_derivation_matches_standard_table() {
    let sbox = aes_sbox();
    let isbox = aes_inv_sbox();

    for x in 0..256 {
        assert_eq!(sbox[x], S_BOX[x], "derived S-box differs at {:#04x}", x);
        assert_eq!(
            isbox[x], INV_S_BOX[x],
            "derived inverse S-box differs at {:#04x}",
            x
        );
    }
}
