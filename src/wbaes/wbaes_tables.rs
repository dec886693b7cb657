//! White-box Encryption Table Bundle
//!
//! The fixed-shape table bundle produced by the generator and consumed
//! read-only by the encryption routine, together with its serialized form.
//!
//! The serialized layout is a headerless, versionless byte-for-byte dump of
//! the fields in declaration order, with every 32-bit word written
//! little-endian:
//!
//! 1. `r1_xor_tables` - 221,184 bytes
//! 2. `r2_xor_tables` - 221,184 bytes
//! 3. `last_box` - 4,096 bytes
//! 4. `mbl_tables` - 147,456 bytes
//! 5. `ty_boxes` - 147,456 bytes
//!
//! 741,376 bytes in total. A loader is only willing to accept exactly that
//! length; anything else is refused without constructing a bundle.

use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use super::encoding::{ExtEncoding, IDENTITY_NIBBLE_PERM};

/// A 16x16 nibble XOR-reduction table.
pub type XorTable = [[u8; 16]; 16];

/// Size of the serialized table bundle in bytes.
pub const WBAES_TABLE_BYTES: usize = 741_376;

/// The white-box AES-128 encryption table bundle.
///
/// Owns every sub-table of the network; the mixing bijections and nibble
/// encodings that shaped them exist only inside the generator. The large
/// tables are held in individual heap allocations, so the bundle value
/// itself stays small and cheap to move. The encryption routine borrows
/// the bundle immutably, so concurrent use on distinct state buffers needs
/// no synchronization.
pub struct WbaesEncryptionTable {
    /// XOR reductions combining the four Ty-box words of a column.
    pub r1_xor_tables: Box<[[XorTable; 96]; 9]>,
    /// XOR reductions combining the four MBL words of a column.
    pub r2_xor_tables: Box<[[XorTable; 96]; 9]>,
    /// Final-round byte tables, one per lane.
    pub last_box: [[u8; 256]; 16],
    /// Inverse mixing-bijection tables, byte-of-column to word.
    pub mbl_tables: Box<[[[u32; 256]; 16]; 9]>,
    /// Composed T-box/Ty-i tables with the mixing bijection applied.
    pub ty_boxes: Box<[[[u32; 256]; 16]; 9]>,
}

impl WbaesEncryptionTable {
    /// Create a zeroed bundle.
    ///
    /// The ~741 KiB of tables go to the heap field by field; only the
    /// 4 KiB last-round tables live inline.
    pub fn new() -> Self {
        Self {
            r1_xor_tables: Box::new([[[[0; 16]; 16]; 96]; 9]),
            r2_xor_tables: Box::new([[[[0; 16]; 16]; 96]; 9]),
            last_box: [[0; 256]; 16],
            mbl_tables: Box::new([[[0; 256]; 16]; 9]),
            ty_boxes: Box::new([[[0; 256]; 16]; 9]),
        }
    }

    /// Serialize the bundle into its fixed 741,376-byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WBAES_TABLE_BYTES);

        for round in self.r1_xor_tables.iter() {
            for table in round {
                for row in table {
                    out.extend_from_slice(row);
                }
            }
        }
        for round in self.r2_xor_tables.iter() {
            for table in round {
                for row in table {
                    out.extend_from_slice(row);
                }
            }
        }
        for lane in self.last_box.iter() {
            out.extend_from_slice(lane);
        }
        for round in self.mbl_tables.iter() {
            for lane in round {
                for word in lane {
                    out.extend_from_slice(&word.to_le_bytes());
                }
            }
        }
        for round in self.ty_boxes.iter() {
            for lane in round {
                for word in lane {
                    out.extend_from_slice(&word.to_le_bytes());
                }
            }
        }

        out
    }

    /// Deserialize a bundle from its fixed byte layout.
    ///
    /// Refuses any input whose length is not exactly
    /// [`WBAES_TABLE_BYTES`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn Error>> {
        if bytes.len() != WBAES_TABLE_BYTES {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "WBAES TABLE ERROR: expected {} bytes, got {}",
                    WBAES_TABLE_BYTES,
                    bytes.len()
                ),
            )));
        }

        let mut et = Self::new();
        let mut pos = 0usize;

        for round in et.r1_xor_tables.iter_mut() {
            for table in round.iter_mut() {
                for row in table.iter_mut() {
                    row.copy_from_slice(&bytes[pos..pos + 16]);
                    pos += 16;
                }
            }
        }
        for round in et.r2_xor_tables.iter_mut() {
            for table in round.iter_mut() {
                for row in table.iter_mut() {
                    row.copy_from_slice(&bytes[pos..pos + 16]);
                    pos += 16;
                }
            }
        }
        for lane in et.last_box.iter_mut() {
            lane.copy_from_slice(&bytes[pos..pos + 256]);
            pos += 256;
        }
        for round in et.mbl_tables.iter_mut() {
            for lane in round.iter_mut() {
                for word in lane.iter_mut() {
                    *word =
                        u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]);
                    pos += 4;
                }
            }
        }
        for round in et.ty_boxes.iter_mut() {
            for lane in round.iter_mut() {
                for word in lane.iter_mut() {
                    *word =
                        u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]);
                    pos += 4;
                }
            }
        }

        Ok(et)
    }

    /// Write the serialized bundle to a file.
    ///
    /// On failure the target file is removed, so a partial bundle is never
    /// left on disk.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        if let Err(e) = fs::write(path, self.to_bytes()) {
            let _ = fs::remove_file(path);
            return Err(Box::new(e));
        }
        Ok(())
    }

    /// Read a serialized bundle from a file.
    ///
    /// Refuses files whose length does not match the fixed footprint.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl Default for WbaesEncryptionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The external input/output encodings published alongside a table bundle.
///
/// `ext_f` is applied to the plaintext before the table network and `ext_g`
/// comes out baked into the last-round tables; the inverses let a caller
/// recover plain AES semantics. When a bundle is generated without external
/// encodings, all four members are identity permutations.
pub struct WbaesExtEncoding {
    pub ext_f: ExtEncoding,
    pub inv_ext_f: ExtEncoding,
    pub ext_g: ExtEncoding,
    pub inv_ext_g: ExtEncoding,
}

impl WbaesExtEncoding {
    /// An external encoding in which every permutation is the identity.
    pub fn identity() -> Self {
        let id = [[IDENTITY_NIBBLE_PERM; 2]; 16];
        Self {
            ext_f: id,
            inv_ext_f: id,
            ext_g: id,
            inv_ext_g: id,
        }
    }
}
