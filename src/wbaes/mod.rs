mod encoding;
mod wbaes_enc;
mod wbaes_gen;
mod wbaes_tables;

pub use encoding::*;
pub use wbaes_enc::*;
pub use wbaes_gen::*;
pub use wbaes_tables::*;

#[cfg(test)]
mod tests;
