mod test_aes_core;
