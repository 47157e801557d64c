//! File payload retrieval.
//!
//! RDOS allocates whole blocks, so a file occupies `size_in_blocks * 256`
//! bytes on disk while its logical length is `byte_length`. The two are
//! stored independently. [`read_content`] reads the full allocation and
//! cuts it down to the logical length; it either returns exactly
//! `byte_length` bytes or fails.

use log::{debug, warn};

use crate::entry::DirectoryEntry;
use crate::error::{RdosError, Result};
use crate::store::BlockStore;

/// Read the exact content of `entry` from `store`.
///
/// Every call goes back to the store; nothing is cached.
pub fn read_content<S: BlockStore + ?Sized>(entry: &DirectoryEntry, store: &mut S) -> Result<Vec<u8>> {
    if entry.is_end_of_directory() {
        return Err(RdosError::InvalidEntry("end-of-directory record has no content"));
    }
    if entry.deleted {
        return Err(RdosError::InvalidEntry("deleted file has no content"));
    }

    debug!(
        "reading {:?}: blocks {}..{}, {} bytes",
        entry.filename.trim_end(),
        entry.starting_block,
        entry.starting_block as u32 + entry.size_in_blocks as u32,
        entry.byte_length,
    );

    let mut data  = store.read_blocks(entry.starting_block, entry.size_in_blocks)?;
    let allocated = entry.allocated_len();
    let needed    = entry.byte_length as usize;

    // Bytes beyond the allocation belong to other files, whatever the store returned.
    if needed > allocated || data.len() < allocated {
        warn!(
            "truncated read for {:?}: allocation {} bytes, length {} bytes, store returned {}",
            entry.filename.trim_end(), allocated, needed, data.len(),
        );
        return Err(RdosError::TruncatedRead {
            needed: allocated.max(needed),
            got:    data.len().min(allocated),
        });
    }

    data.truncate(needed);
    Ok(data)
}
