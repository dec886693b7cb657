mod test_encoding;
mod test_wbaes_gen;
