use super::super::aes_core::*;
use hex::decode as hex_decode;

fn block_from_hex(s: &str) -> [u8; 16] {
    let bytes = hex_decode(s).expect("invalid hex in test vector");
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    block
}

#[test]
fn test_aes128_enc_fips197_appendix_b() {
    let plaintext = block_from_hex("3243f6a8885a308d313198a2e0370734");
    let key = block_from_hex("2b7e151628aed2a6abf7158809cf4f3c");
    let expected_ciphertext = block_from_hex("3925841d02dc09fbdc118597196a0b32");

    assert_eq!(aes_enc_block(&plaintext, &key), expected_ciphertext);
}

#[test]
fn test_aes128_enc_fips197_appendix_c() {
    let plaintext = block_from_hex("00112233445566778899aabbccddeeff");
    let key = block_from_hex("000102030405060708090a0b0c0d0e0f");
    let expected_ciphertext = block_from_hex("69c4e0d86a7b0430d8cdb78070b4c55a");

    assert_eq!(aes_enc_block(&plaintext, &key), expected_ciphertext);
}

#[test]
fn test_aes128_enc_sp800_38a_vector() {
    let plaintext = block_from_hex("6bc1bee22e409f96e93d7e117393172a");
    let key = block_from_hex("2b7e151628aed2a6abf7158809cf4f3c");
    let expected_ciphertext = block_from_hex("3ad77bb40d7a3660a89ecaf32466ef97");

    assert_eq!(aes_enc_block(&plaintext, &key), expected_ciphertext);
}

#[test]
fn test_aes128_enc_zero_key_zero_block() {
    let expected_ciphertext = block_from_hex("66e94bd4ef8a2c3b884cfa59ca342b2e");

    assert_eq!(aes_enc_block(&[0u8; 16], &[0u8; 16]), expected_ciphertext);
}

#[test]
fn test_aes128_dec_inverts_enc() {
    let plaintext = block_from_hex("00112233445566778899aabbccddeeff");
    let key = block_from_hex("000102030405060708090a0b0c0d0e0f");

    let ciphertext = aes_enc_block(&plaintext, &key);
    assert_eq!(aes_dec_block(&ciphertext, &key), plaintext);
}

#[test]
fn test_key_schedule_words_fips197_appendix_a() {
    let key = block_from_hex("2b7e151628aed2a6abf7158809cf4f3c");
    let words = aes128_key_schedule(&key);

    // First words are the key itself, big-endian.
    assert_eq!(words[0], 0x2b7e1516);
    assert_eq!(words[3], 0x09cf4f3c);

    // Intermediate and final words from the FIPS-197 A.1 expansion trace.
    assert_eq!(words[4], 0xa0fafe17);
    assert_eq!(words[10], 0x5935807a);
    assert_eq!(words[40], 0xd014f9a8);
    assert_eq!(words[43], 0xb6630ca6);
}

#[test]
fn test_expand_key_matches_word_schedule() {
    let key = block_from_hex("000102030405060708090a0b0c0d0e0f");
    let expanded = expand_key(&key);
    let words = aes128_key_schedule(&key);

    for (i, word) in words.iter().enumerate() {
        let chunk = &expanded[i * 4..i * 4 + 4];
        assert_eq!(
            *word,
            u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        );
    }
}
