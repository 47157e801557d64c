//! RDOS directory record codec.
//!
//! # Record layout (32 bytes, little-endian words)
//!
//! | Offset      | Width | Field                                          |
//! |-------------|-------|------------------------------------------------|
//! | `0x00-0x17` | 24    | File name, space-filled, high bit may be set   |
//! | `0x18`      | 1     | File type letter (`A`, `I`, `T`, `B`, ...)     |
//! | `0x19`      | 1     | Length in 256-byte blocks                      |
//! | `0x1A-0x1B` | 2     | Load address (Applesoft and binary files)      |
//! | `0x1C-0x1D` | 2     | Length in bytes                                |
//! | `0x1E-0x1F` | 2     | Starting block                                 |
//!
//! The first name byte doubles as a status flag: `0x00` ends the directory,
//! `0x80` marks a deleted file whose record is still physically present.
//!
//! Every field is read at a fixed offset and independently of the others.
//! The format carries no checksum.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::error::{RdosError, Result};

/// Size of one directory record on disk.
pub const RECORD_SIZE: usize = 32;
/// Size of one storage block (block = sector).
pub const BLOCK_SIZE: usize = 256;
/// Width of the space-padded name field.
pub const MAX_FILENAME_LEN: usize = 24;

/// First byte of the record that terminates the directory.
pub const END_OF_DIRECTORY: u8 = 0x00;
/// First byte of a deleted record.
pub const DELETED_MARKER: u8 = 0x80;

/// Name reported for deleted records, padded to the full field width.
pub const DELETED_FILENAME: &str = "<NOT IN USE>            ";

const OFF_TYPE:        usize = 0x18;
const OFF_BLOCKS:      usize = 0x19;
const OFF_ADDRESS:     usize = 0x1A;
const OFF_BYTE_LENGTH: usize = 0x1C;
const OFF_START_BLOCK: usize = 0x1E;

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// A borrowed, length-checked 32-byte directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    bytes: &'a [u8; RECORD_SIZE],
}

impl<'a> RawRecord<'a> {
    /// Wrap `bytes`, rejecting anything that is not exactly 32 bytes long.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let bytes: &'a [u8; RECORD_SIZE] = bytes
            .try_into()
            .map_err(|_| RdosError::MalformedRecord { len: bytes.len() })?;
        Ok(Self { bytes })
    }

    pub fn slot(&self) -> RecordSlot {
        RecordSlot::probe(*self)
    }
}

impl<'a> TryFrom<&'a [u8]> for RawRecord<'a> {
    type Error = RdosError;

    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        RawRecord::new(bytes)
    }
}

impl<'a> From<&'a [u8; RECORD_SIZE]> for RawRecord<'a> {
    fn from(bytes: &'a [u8; RECORD_SIZE]) -> Self {
        Self { bytes }
    }
}

// ── RecordSlot ────────────────────────────────────────────────────────────────

/// Status of a directory slot, read from the first byte alone.
///
/// Callers walking a directory stop at [`RecordSlot::EndOfDirectory`]
/// before handing the record to [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordSlot {
    EndOfDirectory,
    Deleted,
    InUse,
}

impl RecordSlot {
    pub fn probe(raw: RawRecord<'_>) -> Self {
        match raw.bytes[0] {
            END_OF_DIRECTORY => RecordSlot::EndOfDirectory,
            DELETED_MARKER   => RecordSlot::Deleted,
            _                => RecordSlot::InUse,
        }
    }
}

// ── DirectoryEntry ────────────────────────────────────────────────────────────

/// Decoded view of one directory record.
///
/// Built fresh by [`decode`] on every query; it holds no reference to the
/// record or to the volume it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// All 24 characters of the name, padding included. Deleted records
    /// report [`DELETED_FILENAME`].
    pub filename:       String,
    /// Raw type letter at offset `0x18`, high bit stripped.
    pub type_marker:    char,
    pub size_in_blocks: u8,
    pub load_address:   u16,
    pub byte_length:    u16,
    pub starting_block: u16,
    pub deleted:        bool,
    #[serde(skip)]
    end_of_directory:   bool,
}

impl DirectoryEntry {
    /// Type letter as listed in a catalog; blank for deleted files.
    pub fn filetype(&self) -> char {
        if self.deleted { ' ' } else { self.type_marker }
    }

    /// RDOS has no file locking.
    pub fn is_locked(&self) -> bool {
        false
    }

    /// True when this record was the directory terminator.
    pub fn is_end_of_directory(&self) -> bool {
        self.end_of_directory
    }

    /// Bytes allocated on disk, always a whole number of blocks.
    pub fn allocated_len(&self) -> usize {
        self.size_in_blocks as usize * BLOCK_SIZE
    }
}

/// Decode a directory record into its typed fields.
///
/// Pure and infallible: the length was already checked by [`RawRecord`].
pub fn decode(raw: RawRecord<'_>) -> DirectoryEntry {
    let b = raw.bytes;
    let slot = RecordSlot::probe(raw);
    let deleted = slot == RecordSlot::Deleted;

    let filename = if deleted {
        DELETED_FILENAME.to_string()
    } else {
        apple_string(&b[..MAX_FILENAME_LEN])
    };

    DirectoryEntry {
        filename,
        type_marker:      (b[OFF_TYPE] & 0x7F) as char,
        size_in_blocks:   b[OFF_BLOCKS],
        load_address:     LittleEndian::read_u16(&b[OFF_ADDRESS..OFF_ADDRESS + 2]),
        byte_length:      LittleEndian::read_u16(&b[OFF_BYTE_LENGTH..OFF_BYTE_LENGTH + 2]),
        starting_block:   LittleEndian::read_u16(&b[OFF_START_BLOCK..OFF_START_BLOCK + 2]),
        deleted,
        end_of_directory: slot == RecordSlot::EndOfDirectory,
    }
}

/// Apple II text is 7-bit ASCII, frequently stored with bit 7 set.
fn apple_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| (b & 0x7F) as char).collect()
}
