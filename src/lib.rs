//! White-Box AES-128 Library
//!
//! This library implements Chow et al.'s white-box AES-128 construction: a
//! secret key is compiled once into a network of lookup tables such that
//! evaluating the network on a 16-byte block produces the same ciphertext as
//! standard AES-128, while the key never appears in the tables in the clear.
//!
//! The crate is organized into three modules:
//!
//! - `gf`: arithmetic over GF(2^8) and linear algebra over GF(2), the
//!   mathematical ground the table generation is built on.
//! - `aes`: a plain software AES-128 core and its key schedule, used as the
//!   reference cipher and as the round-key source for table generation.
//! - `wbaes`: the white-box core itself, split into table generation,
//!   encoding utilities, the table bundle with its fixed serialized layout,
//!   and the table-driven encryption routine.

pub mod aes;
pub mod gf;
pub mod wbaes;
