//! Block-addressable access to a volume image.
//!
//! The accessor in [`crate::content`] only sees the [`BlockStore`] trait.
//! [`ImageStore`] is the stock implementation over any `Read + Seek`
//! source: a disk image file, or an in-memory `Cursor` in tests.
//!
//! # Geometry
//! RDOS numbers blocks linearly, but RDOS 2.1 volumes were 13-sector disks
//! that are usually preserved inside 16-sector images. In that layout block
//! `n` is sector `n % 13` of track `n / 13`, and sectors 13-15 of every
//! image track are unused. [`Geometry::Tracked`] expresses that mapping;
//! [`Geometry::Linear`] covers images where blocks are simply contiguous.
//!
//! # Short images
//! Blocks past the end of the image are not an I/O error here. The store
//! returns whatever bytes exist and the accessor reports the shortfall as
//! `TruncatedRead`.

use std::io::{self, Read, Seek, SeekFrom};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::entry::BLOCK_SIZE;

/// Source of raw 256-byte blocks.
///
/// Implementations should return `count * 256` bytes; fewer bytes mean the
/// volume ended early. Block 0 is the first block of the region holding
/// the directory's files.
pub trait BlockStore {
    fn read_blocks(&mut self, start: u16, count: u8) -> io::Result<Vec<u8>>;
}

impl<S: BlockStore + ?Sized> BlockStore for &mut S {
    fn read_blocks(&mut self, start: u16, count: u8) -> io::Result<Vec<u8>> {
        (**self).read_blocks(start, count)
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Linear,
    Tracked {
        /// Sectors per track as seen by the volume (13 for RDOS 2.1).
        sectors_per_track:       u8,
        /// Sectors per track as stored in the image (16 for `.dsk`).
        image_sectors_per_track: u8,
    },
}

/// Configuration for [`ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Byte offset of block 0 within the image.
    pub data_offset: u64,
    pub geometry:    Geometry,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            data_offset: 0,
            geometry:    Geometry::Linear,
        }
    }
}

impl StoreOptions {
    /// 13-sector RDOS volume held in a 16-sector image.
    pub fn rdos_13_sector() -> Self {
        Self {
            data_offset: 0,
            geometry:    Geometry::Tracked {
                sectors_per_track:       13,
                image_sectors_per_track: 16,
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn validate(&self) -> io::Result<()> {
        if let Geometry::Tracked { sectors_per_track, image_sectors_per_track } = self.geometry {
            if sectors_per_track == 0 || sectors_per_track > image_sectors_per_track {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!(
                        "invalid geometry: {sectors_per_track} sectors per track \
                         in an image with {image_sectors_per_track}"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Absolute image offset of `block`.
    pub fn block_offset(&self, block: u32) -> u64 {
        let image_sector = match self.geometry {
            Geometry::Linear => block as u64,
            Geometry::Tracked { sectors_per_track, image_sectors_per_track } => {
                let spt   = sectors_per_track.max(1) as u64;
                let track = block as u64 / spt;
                track * image_sectors_per_track as u64 + block as u64 % spt
            }
        };
        self.data_offset + image_sector * BLOCK_SIZE as u64
    }
}

// ── ImageStore ────────────────────────────────────────────────────────────────

pub struct ImageStore<R: Read + Seek> {
    reader:  R,
    options: StoreOptions,
}

impl<R: Read + Seek> ImageStore<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, options: StoreOptions::default() }
    }

    pub fn with_options(reader: R, options: StoreOptions) -> io::Result<Self> {
        options.validate()?;
        Ok(Self { reader, options })
    }
}

impl<R: Read + Seek> BlockStore for ImageStore<R> {
    fn read_blocks(&mut self, start: u16, count: u8) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count as usize * BLOCK_SIZE);
        for i in 0..count as u32 {
            let block  = start as u32 + i;
            let offset = self.options.block_offset(block);
            self.reader.seek(SeekFrom::Start(offset))?;
            let got = (&mut self.reader)
                .take(BLOCK_SIZE as u64)
                .read_to_end(&mut out)?;
            if got < BLOCK_SIZE {
                debug!("block {} at offset {:#x} is short: {} bytes", block, offset, got);
                break;
            }
        }
        Ok(out)
    }
}
