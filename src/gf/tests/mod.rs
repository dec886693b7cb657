mod test_gf256;
mod test_gf2_mat;
